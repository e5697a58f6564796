//! Per-connection session state machine.
//!
//! ```text
//! Greeting ──login──▶ Authenticating ──ok──▶ Lobby ──play──▶ Queued (handed to matchmaker)
//!    │                     │                  │ ▲
//!    │                     └─fail──▶ Closed   └─┘ stats / top10
//!    ├──spectate──▶ Spectating (until the game ends or the client leaves)
//!    └──quit / unknown──▶ Closed
//! ```
//!
//! Any read or write failure goes straight to `Closed`. The identity,
//! once claimed, lives in the `LoginGuard` carried by the state, so
//! leaving the machine on any path releases it.

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use ttt_protocol::{text, LobbyCommand, MainCommand, CRLF};

use crate::connection::{Connection, ConnectionError};
use crate::error::{SessionError, SessionResult};
use crate::login::LoginGuard;
use crate::player::QueuedPlayer;
use crate::spectators::SpectatorSet;
use crate::state::ServerState;
use crate::types::{GameId, SpectatorRx};

enum Step {
    Greeting,
    Authenticating,
    Lobby(LoginGuard),
    Queued(LoginGuard),
    Spectating,
    Closed,
}

/// Drive one client connection until it is closed or handed off.
pub(crate) async fn run_session(state: ServerState, mut conn: Connection) {
    let client = conn.id();
    let mut step = Step::Greeting;

    loop {
        let outcome = match step {
            Step::Greeting => greet(&mut conn).await,
            Step::Authenticating => authenticate(&state, &mut conn).await,
            Step::Lobby(login) => lobby(&state, &mut conn, login).await,
            Step::Queued(login) => return queue(&state, conn, login).await,
            Step::Spectating => return spectate(&state, conn).await,
            Step::Closed => {
                debug!(%client, "session closed");
                return conn.close().await;
            }
        };

        step = match outcome {
            Ok(next) => next,
            Err(SessionError::Connection(e)) => {
                info!(%client, reason = %e, "connection lost");
                Step::Closed
            }
            Err(SessionError::Store { reply, source }) => {
                error!(%client, error = %source, "collaborator failure");
                return conn.farewell(reply).await;
            }
        };
    }
}

async fn greet(conn: &mut Connection) -> SessionResult<Step> {
    let choice = conn.prompt(text::MAIN_MENU).await?;

    let next = match MainCommand::parse(&choice) {
        Some(MainCommand::Login) => Step::Authenticating,
        Some(MainCommand::Spectate) => Step::Spectating,
        Some(MainCommand::Quit) => {
            conn.send(text::GOODBYE).await?;
            Step::Closed
        }
        None => {
            conn.send(text::INVALID_MAIN_CHOICE).await?;
            Step::Closed
        }
    };
    Ok(next)
}

async fn authenticate(state: &ServerState, conn: &mut Connection) -> SessionResult<Step> {
    let client = conn.id();
    let name = conn.prompt(text::NICKNAME_PROMPT).await?;
    if name.is_empty() {
        conn.send(text::EMPTY_NICKNAME).await?;
        return Ok(Step::Closed);
    }

    // Claimed before talking to the store: a second connection for the
    // same identity is turned away right here.
    let Some(login) = state.logged_in().claim(&name) else {
        info!(%client, player = %name, "rejected duplicate login");
        conn.send(text::ALREADY_LOGGED_IN).await?;
        return Ok(Step::Closed);
    };

    let accounts = state.accounts();
    let login_failed = |e| SessionError::store(text::LOGIN_FAILED, e);

    if !accounts.identity_exists(&name).await.map_err(login_failed)? {
        let secret = conn.prompt(text::REGISTER_PROMPT).await?;
        accounts
            .create_identity(&name, &secret)
            .await
            .map_err(login_failed)?;
        conn.send(text::REGISTERED).await?;
        info!(%client, player = %name, "registered new identity");
        return Ok(Step::Lobby(login));
    }

    let attempts = state.login_attempts();
    for attempt in 1..=attempts {
        let secret = conn.prompt(text::PASSWORD_PROMPT).await?;
        if accounts
            .verify_secret(&name, &secret)
            .await
            .map_err(login_failed)?
        {
            conn.send(text::WELCOME_BACK).await?;
            info!(%client, player = %name, "logged in");
            return Ok(Step::Lobby(login));
        }
        if attempt < attempts {
            conn.send(&text::attempts_left(attempts - attempt)).await?;
        }
    }

    warn!(%client, player = %name, "too many failed password attempts");
    conn.send(text::INVALID_PASSWORD).await?;
    Ok(Step::Closed)
}

async fn lobby(state: &ServerState, conn: &mut Connection, login: LoginGuard) -> SessionResult<Step> {
    loop {
        let choice = conn.prompt(text::LOBBY_MENU).await?;
        conn.send(CRLF).await?;

        match LobbyCommand::parse(&choice) {
            Some(LobbyCommand::Play) => {
                conn.send(text::WAITING_FOR_OPPONENT).await?;
                return Ok(Step::Queued(login));
            }
            Some(LobbyCommand::Stats) => {
                let stats = state
                    .stats()
                    .player_stats(login.name())
                    .await
                    .map_err(|e| SessionError::store(text::STATS_FAILED, e))?;
                conn.send(&text::stats(login.name(), &stats)).await?;
            }
            Some(LobbyCommand::Top10) => {
                let top = state
                    .stats()
                    .top_players(state.leaderboard_size())
                    .await
                    .map_err(|e| SessionError::store(text::TOP_FAILED, e))?;
                conn.send(&text::top_players(&top)).await?;
            }
            Some(LobbyCommand::Quit) => {
                conn.send(text::GOODBYE).await?;
                return Ok(Step::Closed);
            }
            None => conn.send(text::INVALID_LOBBY_CHOICE).await?,
        }
    }
}

async fn queue(state: &ServerState, conn: Connection, login: LoginGuard) {
    info!(client = %conn.id(), player = %login.name(), "queued for a game");
    if let Err(player) = state.matchmaker().submit(QueuedPlayer::new(login, conn)) {
        warn!(player = %player.name(), "matchmaker is not running");
        player.conn.farewell(text::GOODBYE).await;
    }
}

async fn spectate(state: &ServerState, mut conn: Connection) {
    match choose_game(state, &mut conn).await {
        Ok(Some((spectators, feed))) => watch(conn, spectators, feed).await,
        Ok(None) => conn.close().await,
        Err(e) => {
            debug!(client = %conn.id(), reason = %e, "spectator left before joining");
            conn.close().await;
        }
    }
}

/// List running games, read a choice, and register as a spectator.
///
/// `Ok(None)` means the client was told why it can't spectate.
async fn choose_game(
    state: &ServerState,
    conn: &mut Connection,
) -> Result<Option<(SpectatorSet, SpectatorRx)>, ConnectionError> {
    let games = state.games().snapshot().await;
    if games.is_empty() {
        conn.send(text::NO_ACTIVE_GAMES).await?;
        return Ok(None);
    }

    conn.send(text::AVAILABLE_GAMES).await?;
    for game in &games {
        conn.send(&text::game_listing(game.id.as_str(), &game.first, &game.second))
            .await?;
    }

    let chosen = GameId::from(conn.prompt(text::GAME_ID_PROMPT).await?.as_str());

    // The listing may be stale by now; the registry and then the
    // spectator set itself have the final word.
    let Some(game) = state.games().lookup(&chosen).await else {
        conn.send(text::INVALID_GAME_ID).await?;
        return Ok(None);
    };
    let (tx, feed) = mpsc::unbounded_channel();
    if game.spectators.add(conn.id(), tx).is_err() {
        conn.send(text::INVALID_GAME_ID).await?;
        return Ok(None);
    }

    if let Err(e) = conn.send(&text::now_spectating(chosen.as_str())).await {
        game.spectators.remove(conn.id());
        return Err(e);
    }
    info!(client = %conn.id(), game = %chosen, "spectator joined");
    Ok(Some((game.spectators, feed)))
}

enum WatchEvent {
    Update(Option<String>),
    Input(Result<String, ConnectionError>),
}

/// Forward broadcast text to the socket until the game drops us or the
/// client goes away. Anything the spectator types is ignored.
async fn watch(mut conn: Connection, spectators: SpectatorSet, mut feed: SpectatorRx) {
    let client = conn.id();

    loop {
        let event = tokio::select! {
            update = feed.recv() => WatchEvent::Update(update),
            input = conn.read_line() => WatchEvent::Input(input),
        };

        match event {
            WatchEvent::Update(Some(text)) => {
                if let Err(e) = conn.send(&text).await {
                    debug!(%client, reason = %e, "spectator write failed");
                    break;
                }
            }
            WatchEvent::Update(None) => break,
            WatchEvent::Input(Ok(_)) => {}
            WatchEvent::Input(Err(e)) => {
                debug!(%client, reason = %e, "spectator left");
                break;
            }
        }
    }

    spectators.remove(client);
    conn.close().await;
}
