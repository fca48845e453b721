//! The player-list view-model.
//!
//! Owns the authoritative local copy of connected players. Populated once from
//! `GET /players` at session start; afterward it changes only through pushed
//! events (`new_player`, `player_quit`, `game_aborted`).

use std::cmp::Ordering;

use crate::protocol::{Player, ServerEvent, MAX_PLAYER_COUNT};

#[derive(Debug, Default)]
pub struct PlayerRoster {
    players: Vec<Player>,
}

impl PlayerRoster {
    pub fn new() -> Self {
        PlayerRoster::default()
    }

    /// Replace the whole roster with the server's list, in server order.
    pub fn load(&mut self, players: Vec<Player>) {
        self.players = players;
    }

    /// Append-only insertion; display order is arrival order.
    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Remove the first (only) entry matching `name`. Returns whether an entry
    /// was removed.
    pub fn remove_player(&mut self, name: &str) -> bool {
        if let Some(pos) = self.players.iter().position(|p| p.name == name) {
            self.players.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn count(&self) -> usize {
        self.players.len()
    }

    pub fn has_players(&self) -> bool {
        self.count() > 0
    }

    /// Whether the lobby has hit the server's cap. Advisory only — the server
    /// is the authority and rejects the join regardless.
    pub fn is_full(&self) -> bool {
        self.count() >= MAX_PLAYER_COUNT
    }

    /// Players in arrival order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players in display order: ascending score, ties broken by name.
    pub fn sorted_players(&self) -> Vec<Player> {
        let mut sorted = self.players.clone();
        sorted.sort_by(compare_players);
        sorted
    }

    /// Route the roster-relevant pushed events; other events are ignored here.
    pub fn apply_event(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::NewPlayer { player } => self.add_player(player.clone()),
            ServerEvent::PlayerQuit { player_name } => {
                self.remove_player(player_name);
            }
            ServerEvent::GameAborted => self.clear(),
            _ => {}
        }
    }
}

/// Total order over players: primary key ascending score, secondary key
/// ascending name.
pub fn compare_players(a: &Player, b: &Player) -> Ordering {
    a.score.cmp(&b.score).then_with(|| a.name.cmp(&b.name))
}
