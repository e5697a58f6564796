//! ASCII board rendering.
//!
//! ```text
//!
//!    1   2   3
//! A  X | O |
//!   -----------
//! B    | X |
//!   -----------
//! C  O |   |
//!
//! ```

use ttt_core::{Board, Cell};

use crate::CRLF;

const ROW_LABELS: [&str; 3] = ["A ", "B ", "C "];

/// Render `board` as the fixed 3x3 grid sent to players and spectators.
pub fn render_board(board: &Board) -> String {
    let mut out = String::with_capacity(96);

    out.push_str(CRLF);
    out.push_str("   1   2   3");
    out.push_str(CRLF);

    for (i, row) in board.rows().iter().enumerate() {
        out.push_str(ROW_LABELS[i]);
        for (j, cell) in row.iter().enumerate() {
            match cell {
                Cell::Empty => out.push_str("   "),
                Cell::Taken(m) => {
                    out.push(' ');
                    out.push(m.as_char());
                    out.push(' ');
                }
            }
            if j < 2 {
                out.push('|');
            }
        }
        out.push_str(CRLF);

        if i < 2 {
            out.push_str("  -----------");
            out.push_str(CRLF);
        }
    }
    out.push_str(CRLF);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headers_labels_and_separators() {
        let board = Board::from_rows(["XO.", ".X.", "O.."]).unwrap();
        let text = render_board(&board);
        let lines: Vec<&str> = text.split("\r\n").collect();

        assert_eq!(
            lines,
            vec![
                "",
                "   1   2   3",
                "A  X | O |   ",
                "  -----------",
                "B    | X |   ",
                "  -----------",
                "C  O |   |   ",
                "",
                "",
            ]
        );
    }
}
