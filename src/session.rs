//! The main game view-model: this session's identity, role, and the game
//! lifecycle.
//!
//! All state lives in plain fields mutated from the single session loop;
//! handlers run to completion, so no locking is needed. Every mutation returns
//! the notices to surface, and the caller re-renders before processing the
//! next input.

use std::time::{Duration, Instant};

use crate::protocol::{JoinResponse, Role, ServerEvent, MIN_PLAYER_COUNT};
use crate::roster::PlayerRoster;

/// How long a `lost_connection` warning stands before the session aborts
/// itself. Cancelled by any subsequent server event.
pub const LOST_CONNECTION_ABORT: Duration = Duration::from_secs(30);

/// Something the user should see, rendered after the mutation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Notice {
            text: text.into(),
            level: NoticeLevel::Info,
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Notice {
            text: text.into(),
            level: NoticeLevel::Warning,
        }
    }
}

#[derive(Debug, Default)]
pub struct GameSession {
    pub roster: PlayerRoster,
    player_name: String,
    role: Option<Role>,
    connected: bool,
    joined: bool,
    master: bool,
    game_started: bool,
    abort_deadline: Option<Instant>,
}

impl GameSession {
    pub fn new() -> Self {
        GameSession::default()
    }

    // -- observable state ---------------------------------------------------

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn has_joined(&self) -> bool {
        self.joined
    }

    pub fn is_master(&self) -> bool {
        self.master
    }

    pub fn is_game_started(&self) -> bool {
        self.game_started
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// `"spy"` / `"counter-spy"`, or `None` while unassigned.
    pub fn role_label(&self) -> Option<&'static str> {
        self.role.map(|r| r.label())
    }

    /// The game may be started from here only by the master, before it has
    /// started, with enough players in the lobby.
    pub fn can_start_game(&self) -> bool {
        self.master && !self.game_started && self.roster.count() >= MIN_PLAYER_COUNT
    }

    pub fn abort_deadline(&self) -> Option<Instant> {
        self.abort_deadline
    }

    // -- transitions --------------------------------------------------------

    /// The event socket is open.
    pub fn on_connected(&mut self) {
        self.connected = true;
    }

    /// Digest the `/join` response. On success the session takes the name as
    /// its identity; on failure nothing changes and the server's message (or a
    /// fixed fallback) is surfaced.
    pub fn handle_join_response(&mut self, name: &str, resp: &JoinResponse) -> Vec<Notice> {
        if !resp.joined {
            let message = resp
                .error
                .clone()
                .unwrap_or_else(|| "Could not join the game".to_string());
            return vec![Notice::warning(message)];
        }
        self.joined = true;
        self.player_name = name.to_string();
        let mut notices = vec![Notice::info(format!("Joined as \"{}\"", name))];
        if resp.is_master {
            self.master = true;
            notices.push(Notice::warning(
                "You are the game master — you decide when the game starts",
            ));
        }
        notices
    }

    /// Apply one server-pushed event. `now` anchors the lost-connection abort
    /// window.
    pub fn apply_event(&mut self, event: &ServerEvent, now: Instant) -> Vec<Notice> {
        // Any event other than the warning itself is proof the connection is
        // alive again.
        if !matches!(event, ServerEvent::LostConnection) {
            self.abort_deadline = None;
        }

        self.roster.apply_event(event);

        match event {
            ServerEvent::NewPlayer { player } => {
                vec![Notice::info(format!("\"{}\" joined the game", player.name))]
            }
            ServerEvent::PlayerQuit { player_name } => {
                vec![Notice::info(format!("\"{}\" left the game", player_name))]
            }
            ServerEvent::NewMaster { player_name } => {
                if !self.player_name.is_empty() && *player_name == self.player_name {
                    self.master = true;
                    vec![Notice::warning(
                        "You are now the game master — you decide when the game starts",
                    )]
                } else {
                    self.master = false;
                    vec![Notice::info(format!(
                        "\"{}\" is now the game master",
                        player_name
                    ))]
                }
            }
            ServerEvent::PlayerRoleAssigned { role } => {
                self.role = Some(*role);
                vec![Notice::warning(format!("Your role is: {}", role))]
            }
            ServerEvent::GameStarted => {
                self.game_started = true;
                vec![Notice::warning("The game has started!")]
            }
            ServerEvent::GameAborted => {
                self.reset();
                vec![Notice::warning("The game was aborted")]
            }
            ServerEvent::LostConnection => {
                self.abort_deadline = Some(now + LOST_CONNECTION_ABORT);
                vec![Notice::warning(format!(
                    "Server lost a player's connection — the game aborts in {} seconds unless it recovers",
                    LOST_CONNECTION_ABORT.as_secs()
                ))]
            }
            ServerEvent::GameFinished => vec![Notice::info("The game has finished")],
            ServerEvent::NewRound => vec![Notice::info("A new round has begun")],
            ServerEvent::PlayerPickedWord { player_name, .. } => {
                vec![Notice::info(format!("\"{}\" picked a word", player_name))]
            }
            ServerEvent::RoundResolved => vec![Notice::info("Round resolved")],
        }
    }

    /// Fire the lost-connection abort once its deadline passes. Returns the
    /// notices to show, or `None` while no abort is due.
    pub fn poll_abort(&mut self, now: Instant) -> Option<Vec<Notice>> {
        let deadline = self.abort_deadline?;
        if now < deadline {
            return None;
        }
        self.abort_deadline = None;
        self.reset();
        self.roster.clear();
        Some(vec![Notice::warning(
            "Connection did not recover — the game was aborted",
        )])
    }

    /// The leave-confirmation prompt; stronger wording once the game runs.
    pub fn quit_warning(&self) -> &'static str {
        if self.game_started {
            "The game is running — leaving now abandons your team. Really quit?"
        } else {
            "Leaving removes you from the lobby. Really quit?"
        }
    }

    /// Full session reset, as performed on `game_aborted`. The socket is still
    /// open, so `connected` survives.
    fn reset(&mut self) {
        self.game_started = false;
        self.joined = false;
        self.master = false;
        self.player_name.clear();
        self.role = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Player;
    use rstest::rstest;

    fn joined_session(name: &str) -> GameSession {
        let mut session = GameSession::new();
        session.on_connected();
        let resp = JoinResponse {
            joined: true,
            is_master: false,
            error: None,
        };
        session.handle_join_response(name, &resp);
        session
    }

    fn player(name: &str, score: u32) -> Player {
        Player {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_initial_state_all_unset() {
        let session = GameSession::new();
        assert!(!session.is_connected());
        assert!(!session.has_joined());
        assert!(!session.is_master());
        assert!(!session.is_game_started());
        assert!(session.role().is_none());
        assert!(session.player_name().is_empty());
    }

    #[test]
    fn test_connected_flag_set_on_open() {
        let mut session = GameSession::new();
        session.on_connected();
        assert!(session.is_connected());
    }

    #[test]
    fn test_join_success_sets_identity() {
        let session = joined_session("ada");
        assert!(session.has_joined());
        assert_eq!(session.player_name(), "ada");
        assert!(!session.is_master());
    }

    #[test]
    fn test_join_response_master_flag_honored() {
        let mut session = GameSession::new();
        let resp = JoinResponse {
            joined: true,
            is_master: true,
            error: None,
        };
        let notices = session.handle_join_response("ada", &resp);
        assert!(session.is_master());
        assert!(notices.iter().any(|n| n.level == NoticeLevel::Warning));
    }

    #[test]
    fn test_join_failure_leaves_state_unchanged() {
        let mut session = GameSession::new();
        let resp = JoinResponse {
            joined: false,
            is_master: false,
            error: Some("Player name already in use \"ada\"".to_string()),
        };
        let notices = session.handle_join_response("ada", &resp);
        assert!(!session.has_joined());
        assert!(session.player_name().is_empty());
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].text, "Player name already in use \"ada\"");
    }

    #[test]
    fn test_join_failure_without_message_uses_fallback() {
        let mut session = GameSession::new();
        let resp = JoinResponse::default();
        let notices = session.handle_join_response("ada", &resp);
        assert_eq!(notices[0].text, "Could not join the game");
    }

    #[test]
    fn test_new_master_matching_name_promotes() {
        let mut session = joined_session("ada");
        session.apply_event(
            &ServerEvent::NewMaster {
                player_name: "ada".to_string(),
            },
            Instant::now(),
        );
        assert!(session.is_master());
    }

    #[test]
    fn test_new_master_other_name_demotes() {
        let mut session = joined_session("ada");
        let now = Instant::now();
        session.apply_event(
            &ServerEvent::NewMaster {
                player_name: "ada".to_string(),
            },
            now,
        );
        session.apply_event(
            &ServerEvent::NewMaster {
                player_name: "bob".to_string(),
            },
            now,
        );
        assert!(!session.is_master());
    }

    #[test]
    fn test_new_master_before_join_never_promotes() {
        // An empty local name must not match anything.
        let mut session = GameSession::new();
        session.apply_event(
            &ServerEvent::NewMaster {
                player_name: "".to_string(),
            },
            Instant::now(),
        );
        assert!(!session.is_master());
    }

    #[rstest]
    #[case(false, false, 0, false)]
    #[case(false, false, 1, false)]
    #[case(true, false, 1, false)]
    #[case(true, false, 2, true)]
    #[case(true, true, 2, false)]
    #[case(false, false, 5, false)]
    #[case(true, false, 5, true)]
    fn test_can_start_game(
        #[case] master: bool,
        #[case] started: bool,
        #[case] count: usize,
        #[case] expected: bool,
    ) {
        let mut session = GameSession::new();
        session.master = master;
        session.game_started = started;
        for i in 0..count {
            session.roster.add_player(player(&format!("p{}", i), 3));
        }
        assert_eq!(session.can_start_game(), expected);
    }

    #[test]
    fn test_game_started_only_via_pushed_event() {
        let mut session = joined_session("ada");
        assert!(!session.is_game_started());
        session.apply_event(&ServerEvent::GameStarted, Instant::now());
        assert!(session.is_game_started());
    }

    #[rstest]
    #[case(Role::Spy, "spy")]
    #[case(Role::CounterSpy, "counter-spy")]
    fn test_role_label_after_assignment(#[case] role: Role, #[case] label: &str) {
        let mut session = joined_session("ada");
        assert!(session.role_label().is_none());
        session.apply_event(&ServerEvent::PlayerRoleAssigned { role }, Instant::now());
        assert_eq!(session.role_label(), Some(label));
    }

    #[test]
    fn test_game_aborted_resets_everything() {
        let now = Instant::now();
        let mut session = joined_session("ada");
        session.roster.load(vec![player("ada", 3), player("bob", 3)]);
        session.apply_event(
            &ServerEvent::NewMaster {
                player_name: "ada".to_string(),
            },
            now,
        );
        session.apply_event(&ServerEvent::GameStarted, now);
        session.apply_event(
            &ServerEvent::PlayerRoleAssigned { role: Role::Spy },
            now,
        );

        session.apply_event(&ServerEvent::GameAborted, now);

        assert!(!session.is_game_started());
        assert!(!session.has_joined());
        assert!(!session.is_master());
        assert!(session.player_name().is_empty());
        assert!(session.role().is_none());
        assert_eq!(session.roster.count(), 0);
        // The socket is still open.
        assert!(session.is_connected());
    }

    #[test]
    fn test_lost_connection_arms_abort_deadline() {
        let now = Instant::now();
        let mut session = joined_session("ada");
        session.apply_event(&ServerEvent::LostConnection, now);
        assert_eq!(session.abort_deadline(), Some(now + LOST_CONNECTION_ABORT));
    }

    #[test]
    fn test_subsequent_event_cancels_abort_deadline() {
        let now = Instant::now();
        let mut session = joined_session("ada");
        session.apply_event(&ServerEvent::LostConnection, now);
        session.apply_event(
            &ServerEvent::NewPlayer {
                player: player("bob", 3),
            },
            now,
        );
        assert!(session.abort_deadline().is_none());
    }

    #[test]
    fn test_poll_abort_before_deadline_is_none() {
        let now = Instant::now();
        let mut session = joined_session("ada");
        session.apply_event(&ServerEvent::LostConnection, now);
        assert!(session.poll_abort(now).is_none());
        assert!(session
            .poll_abort(now + Duration::from_secs(29))
            .is_none());
        assert!(session.has_joined());
    }

    #[test]
    fn test_poll_abort_after_deadline_resets_session() {
        let now = Instant::now();
        let mut session = joined_session("ada");
        session.roster.add_player(player("ada", 3));
        session.apply_event(&ServerEvent::LostConnection, now);

        let notices = session
            .poll_abort(now + LOST_CONNECTION_ABORT)
            .expect("abort due");
        assert!(!notices.is_empty());
        assert!(!session.has_joined());
        assert_eq!(session.roster.count(), 0);
        // One-shot: a second poll stays quiet.
        assert!(session
            .poll_abort(now + LOST_CONNECTION_ABORT)
            .is_none());
    }

    #[test]
    fn test_quit_warning_strengthens_once_started() {
        let mut session = joined_session("ada");
        let before = session.quit_warning();
        session.apply_event(&ServerEvent::GameStarted, Instant::now());
        let after = session.quit_warning();
        assert_ne!(before, after);
        assert!(after.contains("running"));
    }

    #[test]
    fn test_roster_events_flow_through_session() {
        let now = Instant::now();
        let mut session = joined_session("ada");
        session.apply_event(
            &ServerEvent::NewPlayer {
                player: player("bob", 3),
            },
            now,
        );
        assert_eq!(session.roster.count(), 1);
        session.apply_event(
            &ServerEvent::PlayerQuit {
                player_name: "bob".to_string(),
            },
            now,
        );
        assert_eq!(session.roster.count(), 0);
    }
}
