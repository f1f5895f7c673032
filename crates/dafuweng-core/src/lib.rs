//! Dafuweng - a Taiwan-themed Monopoly game engine
//!
//! This crate provides the core game logic for Dafuweng, including:
//! - The circular board of property units and its text loader
//! - Player economic ledgers and the seat roster
//! - The turn-resolution state machine with purchase/upgrade decisions
//!
//! # Architecture
//!
//! The engine is platform-agnostic and performs no I/O. A front end
//! feeds it [`TurnAction`]s and renders the [`GameEvent`]s that come
//! back; interactive decisions (buy? upgrade?) surface as explicit
//! phases instead of blocking prompts. The bundled console front end
//! lives in the `dafuweng-cli` crate.
//!
//! # Modules
//!
//! - [`unit`]: board units, their variants, and landing behavior
//! - [`board`]: the circular board, move arithmetic, and the loader
//! - [`player`]: player ledgers and the seat roster
//! - [`actions`]: turn actions and game events
//! - [`game`]: the turn-resolution state machine

pub mod actions;
pub mod board;
pub mod game;
pub mod player;
pub mod unit;

// Re-export commonly used types
pub use actions::{GameEvent, TurnAction};
pub use board::{Board, Destination};
pub use game::{GameError, GameRules, GameState, TurnPhase};
pub use player::{Player, PlayerId, PlayerRoster, PlayerStatus, MAX_PLAYERS};
pub use unit::{Unit, UnitKind, VisitOutcome, MAX_LEVEL};
