//! # connect-n
//!
//! Game-state engine for two-player gravity connection games ("Connect
//! Four" and its relatives) on any board size and any match length.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, immutable states, the rules engine
//! - [`ai`] — Agent trait, random/human/baseline agents, game loop and tally
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
