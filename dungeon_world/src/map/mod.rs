//! Map storage and spatial queries.

mod room;

pub use room::*;

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tiles::Tile;

/// Sampling attempts before `find_random_*` gives up.
const MAX_SAMPLE_ATTEMPTS: u32 = 1000;

/// The playable grid for one dungeon level.
///
/// Owns the tile array, the rooms carved into it, and the set of cells the
/// player has seen so far. Every coordinate query is bounds-safe: reads off
/// the map return `None` or fail closed, writes off the map are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    /// Row-major tile storage, indexed as `tiles[y][x]`.
    pub tiles: Vec<Vec<Tile>>,
    /// Rooms in generation order. Empty for cave maps.
    pub rooms: Vec<Room>,
    /// Cells revealed by field of view computations. Only ever grows.
    pub explored_tiles: HashSet<(i32, i32)>,
    /// Seed the map was generated from, when it came from the generator.
    pub seed: Option<u64>,
}

impl GameMap {
    /// Create a map filled with floor tiles.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![Tile::floor(); width.max(0) as usize]; height.max(0) as usize],
            rooms: Vec::new(),
            explored_tiles: HashSet::new(),
            seed: None,
        }
    }

    /// Whether the coordinates lie on the map.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Tile at the position, or `None` out of bounds.
    pub fn get_tile(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.tiles[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Replace the tile at the position. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            self.tiles[y as usize][x as usize] = tile;
        }
    }

    /// Whether an entity can stand at the position. Out of bounds is not
    /// walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |tile| tile.walkable)
    }

    /// Whether light passes through the position. Out of bounds is not
    /// transparent.
    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |tile| tile.transparent)
    }

    /// Whether the position blocks movement. Out of bounds blocks.
    pub fn is_blocking(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(true, |tile| tile.blocking)
    }

    /// Whether the position blocks sight. Out of bounds is opaque.
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(true, |tile| tile.opaque())
    }

    /// Record that the cell has been seen.
    pub fn mark_explored(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            self.explored_tiles.insert((x, y));
        }
    }

    /// Whether the cell has ever been seen.
    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.explored_tiles.contains(&(x, y))
    }

    /// Append a room to the room list.
    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Rejection-sample a walkable cell anywhere on the map.
    ///
    /// Returns `None` when no walkable cell turns up within the attempt
    /// budget, which callers should treat as "this map has nowhere to put
    /// things".
    pub fn find_random_floor_tile(&self, rng: &mut impl Rng) -> Option<(i32, i32)> {
        if self.width <= 0 || self.height <= 0 {
            return None;
        }
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let x = rng.gen_range(0..self.width);
            let y = rng.gen_range(0..self.height);
            if self.is_walkable(x, y) {
                return Some((x, y));
            }
        }
        None
    }

    /// Rejection-sample an interior wall cell that touches walkable terrain
    /// orthogonally. Useful for placing doors and secret passages.
    pub fn find_random_wall_tile(&self, rng: &mut impl Rng) -> Option<(i32, i32)> {
        if self.width < 3 || self.height < 3 {
            return None;
        }
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let x = rng.gen_range(1..self.width - 1);
            let y = rng.gen_range(1..self.height - 1);
            if self.is_blocking(x, y)
                && (self.is_walkable(x + 1, y)
                    || self.is_walkable(x - 1, y)
                    || self.is_walkable(x, y + 1)
                    || self.is_walkable(x, y - 1))
            {
                return Some((x, y));
            }
        }
        None
    }
}
