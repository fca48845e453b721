//! Client library for the spylinq spy / counter-spy party game.
//!
//! The server owns all game logic; this crate is the terminal-side half:
//! HTTP actions ([`api`]), the persistent event socket ([`socket`]), the two
//! view-models ([`roster`], [`session`]), an explicit render layer ([`view`]),
//! and the interactive loop that ties them together ([`app`]).

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod panel;
pub mod protocol;
pub mod roster;
pub mod session;
pub mod socket;
pub mod view;

pub use error::ClientError;
