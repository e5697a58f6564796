//! Per-game task.
//!
//! Exactly one task drives a game: it owns both players and the
//! [`GameState`], so board and turn are never touched from elsewhere.
//! The registry and spectator sessions only see the [`GameHandle`].
//!
//! Lifecycle:
//! 1. register the handle, announce markers,
//! 2. loop: board to both players + spectators, prompt the current
//!    player until a valid move arrives, evaluate,
//! 3. on win / draw / I/O failure: final board and outcome to everyone,
//!    drop spectators, close players, unregister, release identities,
//!    emit exactly one [`GameResult`].

use tracing::{debug, error, info, warn};
use ttt_core::{GameResult, GameState, Marker, Move, Status};
use ttt_protocol::{render_board, text};

use crate::connection::ConnectionError;
use crate::player::Player;
use crate::registry::{GameHandle, GameRegistry};
use crate::spectators::SpectatorSet;
use crate::types::{GameId, ResultTx};

/// What a game needs from the rest of the server.
#[derive(Clone, Debug)]
pub(crate) struct GameContext {
    pub registry: GameRegistry,
    pub results: ResultTx,
}

/// How the turn loop ended.
#[derive(Debug)]
enum Ending {
    Finished(Status),
    /// Cause of the failure, as shown to the players.
    Aborted(String),
}

struct Game {
    id: GameId,
    /// Indexed by marker: `X` first, `O` second.
    players: [Player; 2],
    state: GameState,
    spectators: SpectatorSet,
}

/// Run one game from first prompt to result.
pub(crate) async fn run_game(ctx: GameContext, first: Player, second: Player) {
    let mut game = Game {
        id: GameId::generate(),
        players: [first, second],
        state: GameState::new(),
        spectators: SpectatorSet::new(),
    };

    let ending = match ctx.registry.register(game.handle()).await {
        Ok(()) => {
            info!(
                game = %game.id,
                x = %game.players[0].name(),
                o = %game.players[1].name(),
                "game started"
            );
            match game.play().await {
                Ok(status) => Ending::Finished(status),
                Err(e) => Ending::Aborted(e.to_string()),
            }
        }
        Err(e) => {
            error!(game = %game.id, error = %e, "could not register game");
            Ending::Aborted(e.to_string())
        }
    };

    game.finish(ending, &ctx).await;
}

impl Game {
    fn handle(&self) -> GameHandle {
        GameHandle {
            id: self.id.clone(),
            first: self.players[0].name().to_string(),
            second: self.players[1].name().to_string(),
            spectators: self.spectators.clone(),
        }
    }

    fn seat(&mut self, marker: Marker) -> &mut Player {
        match marker {
            Marker::X => &mut self.players[0],
            Marker::O => &mut self.players[1],
        }
    }

    fn name_of(&self, marker: Marker) -> &str {
        match marker {
            Marker::X => self.players[0].name(),
            Marker::O => self.players[1].name(),
        }
    }

    async fn play(&mut self) -> Result<Status, ConnectionError> {
        for marker in [Marker::X, Marker::O] {
            let greeting = text::game_starting(marker, self.name_of(marker.opponent()));
            self.seat(marker).conn.send(&greeting).await?;
        }

        loop {
            let current = self.state.current();
            let board = render_board(self.state.board());

            let opponent = self.state.waiting();

            self.seat(current).conn.send(&board).await?;
            let waiting = self.seat(opponent);
            waiting.conn.send(&board).await?;
            waiting.conn.send(text::WAITING_FOR_TURN).await?;

            let notice = text::turn_notice(self.name_of(current));
            self.spectators.broadcast(&format!("{board}{notice}"));

            self.take_turn(current).await?;
            if self.state.status().is_over() {
                return Ok(self.state.status());
            }
        }
    }

    /// Prompt `current` until a valid move is applied.
    ///
    /// Invalid input is answered with a retry line and does not cost the turn.
    async fn take_turn(&mut self, current: Marker) -> Result<(), ConnectionError> {
        loop {
            let input = self.seat(current).conn.prompt(text::MOVE_PROMPT).await?;

            match input.parse::<Move>().and_then(|mv| self.state.play(mv)) {
                Ok(status) => {
                    debug!(game = %self.id, player = %self.name_of(current), %input, ?status, "move");
                    return Ok(());
                }
                Err(err) => {
                    debug!(game = %self.id, %input, %err, "rejected move");
                    self.seat(current).conn.send(&text::invalid_move(err)).await?;
                }
            }
        }
    }

    async fn finish(self, ending: Ending, ctx: &GameContext) {
        let Game {
            id,
            players: [mut first, mut second],
            state,
            spectators,
        } = self;
        let (x_name, o_name) = (first.name().to_string(), second.name().to_string());

        let (announcement, result) = match &ending {
            Ending::Finished(Status::Won(marker)) => {
                let winner = match marker {
                    Marker::X => &x_name,
                    Marker::O => &o_name,
                };
                info!(game = %id, %winner, "game won");
                (
                    format!("{}{}", render_board(state.board()), text::winner(winner)),
                    GameResult::won(id.as_str(), &x_name, &o_name, winner),
                )
            }
            Ending::Finished(_) => {
                info!(game = %id, "game drawn");
                (
                    format!("{}{}", render_board(state.board()), text::DRAW),
                    GameResult::draw(id.as_str(), &x_name, &o_name),
                )
            }
            Ending::Aborted(cause) => {
                warn!(game = %id, error = %cause, "game aborted");
                (
                    text::aborted(cause),
                    GameResult::aborted(id.as_str(), &x_name, &o_name, cause.as_str()),
                )
            }
        };

        // The outcome is settled; a player that can't be reached any more
        // doesn't change it.
        for player in [&mut first, &mut second] {
            if let Err(e) = player.conn.send(&announcement).await {
                debug!(game = %id, player = %player.name(), error = %e, "could not announce result");
            }
        }
        spectators.broadcast(&announcement);
        let dropped = spectators.disconnect_all();
        debug!(game = %id, spectators = dropped, "spectators released");

        let logins = [first.close().await, second.close().await];
        ctx.registry.remove(&id).await;
        drop(logins);

        if ctx.results.send(result).is_err() {
            warn!(game = %id, "results reporter is gone; result not recorded");
        }
    }
}
