//! Wire types shared by the HTTP actions and the event socket.
//!
//! The server pushes JSON envelopes of the shape `{ "event": <name>, ...payload }`
//! over the socket; HTTP responses are small ad-hoc JSON bodies. Everything here
//! mirrors what the server actually emits — there is no negotiated schema.

use serde::{Deserialize, Serialize};

/// A game cannot start with fewer players than this.
pub const MIN_PLAYER_COUNT: usize = 2;
/// The server rejects joins beyond this many players.
pub const MAX_PLAYER_COUNT: usize = 8;
/// The server rejects player names longer than this.
pub const MAX_PLAYER_NAME_LENGTH: usize = 12;

/// Every new player starts with this score.
pub const INITIAL_SCORE: u32 = 3;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// The two mutually exclusive roles assigned once a game starts.
///
/// Integer-encoded on the wire: `0` = spy, `1` = counter-spy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Spy,
    CounterSpy,
}

impl Role {
    /// The display string shown to the player.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Spy => "spy",
            Role::CounterSpy => "counter-spy",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Role {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Role::Spy),
            1 => Ok(Role::CounterSpy),
            other => Err(format!("unknown role value: {}", other)),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Role::Spy => 0,
            Role::CounterSpy => 1,
        })
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Role::try_from(value).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// One connected player as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

impl Player {
    /// A freshly joined player at the starting score.
    pub fn new(name: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            score: INITIAL_SCORE,
        }
    }
}

/// Validate a candidate player name before it is sent to `/join`.
///
/// The server enforces the same rules; checking locally saves a round trip and
/// gives an immediate message.
pub fn validate_player_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Player name cannot be empty".to_string());
    }
    let len = name.chars().count();
    if len > MAX_PLAYER_NAME_LENGTH {
        return Err(format!(
            "Max player name length is {}, was {}",
            MAX_PLAYER_NAME_LENGTH, len
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Socket envelopes
// ---------------------------------------------------------------------------

/// An inbound server-pushed event, decoded from the `{ "event": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    NewPlayer { player: Player },
    PlayerQuit { player_name: String },
    NewMaster { player_name: String },
    PlayerRoleAssigned { role: Role },
    GameStarted,
    GameAborted,
    LostConnection,
    // Round-flow events a newer server may push; the client surfaces them as
    // notices without acting on them.
    GameFinished,
    NewRound,
    PlayerPickedWord {
        #[serde(default)]
        player_name: String,
        #[serde(default)]
        word: String,
    },
    RoundResolved,
}

/// The single outbound socket message: announce our name after a successful join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announce {
    pub player_name: String,
}

// ---------------------------------------------------------------------------
// HTTP bodies
// ---------------------------------------------------------------------------

/// `POST /join` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinResponse {
    #[serde(default)]
    pub joined: bool,
    /// Present and true when this join made us the master player.
    #[serde(default)]
    pub is_master: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /start` response. The server sends an empty body on success.
#[derive(Debug, Clone, Deserialize)]
pub struct StartResponse {
    #[serde(default = "default_true")]
    pub started: bool,
    #[serde(default)]
    pub error: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for StartResponse {
    fn default() -> Self {
        StartResponse {
            started: true,
            error: None,
        }
    }
}

/// Error body attached to non-2xx responses: `{ "error": <message> }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
