//! Terminal rendering.
//!
//! One explicit render pass after every state mutation replaces the original's
//! declarative bindings: the status block and roster are rebuilt from the
//! session, notices are printed as highlighted lines. The string-producing core
//! is separate from the printing so it can be asserted on.

use colored::*;

use crate::session::{GameSession, Notice, NoticeLevel};

/// Build the plain-text status block for the current session state.
pub fn render_status(session: &GameSession) -> String {
    let mut out = String::new();

    let connection = if session.is_connected() {
        "connected"
    } else {
        "disconnected"
    };
    let phase = if session.is_game_started() {
        "game in progress"
    } else if session.has_joined() {
        "in lobby"
    } else {
        "not joined"
    };
    out.push_str(&format!("[{}] {}", connection, phase));

    if session.has_joined() {
        out.push_str(&format!(" — playing as \"{}\"", session.player_name()));
        if session.is_master() {
            out.push_str(" (master)");
        }
    }
    if let Some(label) = session.role_label() {
        out.push_str(&format!(" — role: {}", label));
    }
    out.push('\n');

    if session.roster.has_players() {
        out.push_str(&format!("players ({}):\n", session.roster.count()));
        for player in session.roster.sorted_players() {
            out.push_str(&format!("  {:>3}  {}\n", player.score, player.name));
        }
    } else {
        out.push_str("players: none\n");
    }

    if session.can_start_game() {
        out.push_str("the game is yours to start — type `start`\n");
    }

    out
}

/// Print the status block.
pub fn print_status(session: &GameSession) {
    print!("{}", render_status(session));
}

/// Print notices; warnings stand out, everything else is dimmed.
pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Warning => {
                println!("{} {}", "!".bright_yellow().bold(), notice.text.bright_yellow())
            }
            NoticeLevel::Info => println!("{} {}", "·".dimmed(), notice.text.dimmed()),
        }
    }
}

/// Print a failure the way every request-rejected error is surfaced: one
/// highlighted line, then carry on.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".bright_red().bold(), message);
}
