//! # Tactical Core (The Tactician)
//!
//! The "senses" of the dungeon crawl. This crate reads terrain from
//! `dungeon_world` and turns it into visibility, routes, and per-turn enemy
//! decisions.
//!
//! ## Core Components
//!
//! - **fov**: Field of view via recursive shadowcasting
//! - **pathfinding**: A* search over 8-directional grid movement
//! - **behavior**: Rule-driven enemy decision making
//!
//! ## Design Philosophy
//!
//! - **Terrain-Driven**: Every decision derives from the shared map, never
//!   from private copies of it
//! - **Turn-Scoped**: Calls are synchronous and side-effect free apart from
//!   marking explored tiles and advancing patrol state
//! - **Total**: Coordinate mistakes come back as `None` or empty results,
//!   not panics

pub mod behavior;
pub mod fov;
pub mod pathfinding;

pub use behavior::*;
pub use fov::*;
pub use pathfinding::*;
