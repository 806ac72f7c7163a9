//! # Dungeon World
//!
//! The "World Bible" crate - contains the tile vocabulary, map storage, and
//! procedural level generation. This crate is the single source of truth for
//! terrain and does not contain any tactical logic.

pub mod generation;
pub mod map;
pub mod tiles;

pub use generation::*;
pub use map::*;
pub use tiles::*;
