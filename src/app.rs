//! The interactive session loop.
//!
//! One task multiplexes the event socket, stdin commands, and the
//! lost-connection abort deadline with `tokio::select!`. All view-model state
//! is mutated here, serially, and re-rendered before the next input is
//! processed. A socket close or error tears the whole session down and starts
//! a fresh one — the terminal analogue of the original's notify-and-reload.

use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

use crate::api::GameApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::protocol::{validate_player_name, Announce};
use crate::session::GameSession;
use crate::socket::{SocketController, SocketMessage};
use crate::view;

enum SessionEnd {
    /// The user left; stop for good.
    Quit,
    /// The socket died; start over from scratch.
    Restart,
}

/// Run interactive sessions until the user quits.
pub async fn run(config: &ClientConfig, initial_name: Option<String>) -> Result<(), ClientError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut pending_join = initial_name;
    loop {
        match run_session(config, pending_join.take(), &mut lines).await? {
            SessionEnd::Quit => return Ok(()),
            SessionEnd::Restart => {
                view::print_error("connection to the server was lost — starting over");
            }
        }
    }
}

async fn run_session(
    config: &ClientConfig,
    mut pending_join: Option<String>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<SessionEnd, ClientError> {
    let api = GameApi::new(config)?;
    let mut socket = SocketController::connect(&config.socket_url()).await?;
    let mut session = GameSession::new();

    // One-shot roster load; afterward only pushed events change it.
    match api.players().await {
        Ok(players) => session.roster.load(players),
        Err(e) => view::print_error(&e.to_string()),
    }

    view::print_status(&session);
    print_help();

    loop {
        let abort_deadline = session.abort_deadline();
        tokio::select! {
            msg = socket.recv() => match msg {
                Some(SocketMessage::Connected) => {
                    session.on_connected();
                    view::print_status(&session);
                    if let Some(name) = pending_join.take() {
                        join(&api, &mut socket, &mut session, &name).await?;
                    }
                }
                Some(SocketMessage::Event(event)) => {
                    debug!(?event, "server event");
                    let notices = session.apply_event(&event, Instant::now());
                    view::print_notices(&notices);
                    view::print_status(&session);
                }
                Some(SocketMessage::Closed(detail)) => {
                    if let Some(detail) = detail {
                        debug!(detail = %detail, "socket closed");
                    }
                    return Ok(SessionEnd::Restart);
                }
                None => return Ok(SessionEnd::Restart),
            },

            line = lines.next_line() => match line? {
                Some(line) => {
                    if let Some(end) =
                        handle_command(&api, &mut socket, &mut session, lines, line.trim()).await?
                    {
                        return Ok(end);
                    }
                }
                // EOF: leave without a confirmation prompt, but still tell the
                // server best-effort.
                None => {
                    quit(&api, &session).await;
                    return Ok(SessionEnd::Quit);
                }
            },

            _ = sleep_until(abort_deadline), if abort_deadline.is_some() => {
                if let Some(notices) = session.poll_abort(Instant::now()) {
                    view::print_notices(&notices);
                    view::print_status(&session);
                }
            }
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

async fn handle_command(
    api: &GameApi,
    socket: &mut SocketController,
    session: &mut GameSession,
    lines: &mut Lines<BufReader<Stdin>>,
    command: &str,
) -> Result<Option<SessionEnd>, ClientError> {
    let (verb, rest) = match command.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (command, ""),
    };
    match verb {
        "" => {}
        "join" => {
            if session.has_joined() {
                view::print_error("already joined");
            } else if let Err(msg) = validate_player_name(rest) {
                view::print_error(&msg);
            } else {
                if session.roster.is_full() {
                    view::print_error("the lobby looks full — the server may reject this");
                }
                join(api, socket, session, rest).await?;
            }
        }
        "start" => {
            if !session.can_start_game() {
                view::print_error(start_refusal(session));
            } else {
                match api.start(session.player_name()).await {
                    // The authoritative started flag flips only on the pushed
                    // game_started event.
                    Ok(resp) if resp.started => {}
                    Ok(resp) => view::print_error(
                        resp.error.as_deref().unwrap_or("Could not start the game"),
                    ),
                    Err(e) => view::print_error(&e.to_string()),
                }
            }
        }
        "players" => view::print_status(session),
        "quit" | "exit" => {
            if session.has_joined() {
                println!("{} [y/N]", session.quit_warning());
                let confirmed = matches!(
                    lines.next_line().await?.as_deref().map(str::trim),
                    Some("y") | Some("Y") | Some("yes") | None
                );
                if !confirmed {
                    return Ok(None);
                }
            }
            quit(api, session).await;
            return Ok(Some(SessionEnd::Quit));
        }
        "help" => print_help(),
        other => view::print_error(&format!("unknown command: {} (try `help`)", other)),
    }
    Ok(None)
}

async fn join(
    api: &GameApi,
    socket: &mut SocketController,
    session: &mut GameSession,
    name: &str,
) -> Result<(), ClientError> {
    match api.join(name).await {
        Ok(resp) => {
            let notices = session.handle_join_response(name, &resp);
            view::print_notices(&notices);
            if session.has_joined() {
                // Announce our presence so the server can tie this socket to
                // the player.
                socket
                    .send(&Announce {
                        player_name: name.to_string(),
                    })
                    .await?;
            }
            view::print_status(session);
        }
        Err(ClientError::Rejected { message }) => view::print_error(&message),
        Err(e) => view::print_error(&e.to_string()),
    }
    Ok(())
}

/// Best-effort leave notification, awaited before teardown so it has the best
/// chance of arriving.
async fn quit(api: &GameApi, session: &GameSession) {
    if session.has_joined() {
        api.quit(session.player_name()).await;
    }
}

fn start_refusal(session: &GameSession) -> &'static str {
    if session.is_game_started() {
        "the game is already started"
    } else if !session.is_master() {
        "only the game master can start the game"
    } else {
        "not enough players yet"
    }
}

fn print_help() {
    println!("commands: join <name> | start | players | quit | help");
}
