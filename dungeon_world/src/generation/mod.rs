//! Procedural dungeon generation.
//!
//! Two modes share one entry point:
//!
//! - **BSP** (default): recursively partition the playable area, center a
//!   room in every leaf, connect consecutive rooms with L-corridors, and
//!   place the stairs in the first and last rooms
//! - **Cave**: seed random noise, smooth it with cellular automata, and keep
//!   the largest connected pocket
//!
//! Generation is deterministic: the same config and seed always produce the
//! same map, and calling [`DungeonGenerator::generate`] twice yields
//! identical results.

mod bsp;
mod caves;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::map::{GameMap, Room};
use crate::tiles::{Tile, TileKind};

/// Reasons a generation config cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("map dimensions {width}x{height} cannot fit a minimum-size room")]
    MapTooSmall { width: i32, height: i32 },

    #[error("min_room_size {min} exceeds max_room_size {max}")]
    RoomSizeOrder { min: i32, max: i32 },

    #[error("min_rooms {min} exceeds max_rooms {max}")]
    RoomCountOrder { min: i32, max: i32 },

    #[error("cave_density {0} must lie within [0.0, 1.0]")]
    CaveDensity(f64),
}

/// Parameters controlling dungeon generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: i32,
    pub height: i32,
    pub min_room_size: i32,
    pub max_room_size: i32,
    /// Desired room count bounds. Carried for callers and sanity-checked by
    /// [`DungeonConfig::validate`]; the partition itself decides how many
    /// rooms actually fit.
    pub min_rooms: i32,
    pub max_rooms: i32,
    /// Generation seed. `None` is resolved to a random seed by the
    /// generator.
    pub seed: Option<u64>,
    /// Generate an open cave instead of rooms and corridors.
    pub use_cave: bool,
    /// Fraction of cells seeded as floor in cave mode.
    pub cave_density: f64,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            min_room_size: 5,
            max_room_size: 15,
            min_rooms: 5,
            max_rooms: 10,
            seed: None,
            use_cave: false,
            cave_density: 0.45,
        }
    }
}

impl DungeonConfig {
    /// Parse a config from TOML text. Missing fields fall back to the
    /// defaults; the result is validated before it is returned.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: DungeonConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the config is structurally usable.
    ///
    /// Generation itself never fails; this is the opt-in strictness for
    /// callers that want impossible configs rejected up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width - 2 < self.min_room_size || self.height - 2 < self.min_room_size {
            return Err(ConfigError::MapTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_room_size > self.max_room_size {
            return Err(ConfigError::RoomSizeOrder {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        if self.min_rooms > self.max_rooms {
            return Err(ConfigError::RoomCountOrder {
                min: self.min_rooms,
                max: self.max_rooms,
            });
        }
        if !(0.0..=1.0).contains(&self.cave_density) {
            return Err(ConfigError::CaveDensity(self.cave_density));
        }
        Ok(())
    }
}

/// Builds dungeon levels from a config.
///
/// The generator owns no RNG state. [`DungeonGenerator::new`] resolves a
/// missing seed once; every [`DungeonGenerator::generate`] call then seeds a
/// fresh `ChaCha8Rng` from it, so repeated calls are bit-identical.
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    config: DungeonConfig,
    seed: u64,
}

impl DungeonGenerator {
    /// Create a generator, drawing a concrete seed when the config has none.
    pub fn new(mut config: DungeonConfig) -> Self {
        let seed = match config.seed {
            Some(seed) => seed,
            None => rand::thread_rng().gen_range(0..1_000_000_000),
        };
        config.seed = Some(seed);
        Self { config, seed }
    }

    /// The config this generator runs with, seed resolved.
    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Generate a complete level.
    pub fn generate(&self) -> GameMap {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut map = GameMap::new(self.config.width, self.config.height);
        map.seed = Some(self.seed);

        // Step 1: start solid; both modes carve into rock.
        for y in 0..map.height {
            for x in 0..map.width {
                map.set_tile(x, y, Tile::wall());
            }
        }

        // Step 2: carve the layout.
        if self.config.use_cave {
            caves::generate_caves(&mut map, &self.config, &mut rng);
        } else {
            let rooms = bsp::generate_rooms(&mut map, &self.config, &mut rng);
            self.connect_rooms(&mut map, &rooms, &mut rng);
            for room in rooms {
                map.add_room(room);
            }
        }

        // Step 3: stairs go in the first and last rooms. Cave maps have no
        // rooms, so they get none.
        self.place_stairs(&mut map);

        map
    }

    /// Join consecutive rooms with L-shaped corridors.
    fn connect_rooms(&self, map: &mut GameMap, rooms: &[Room], rng: &mut ChaCha8Rng) {
        for pair in rooms.windows(2) {
            let (ax, ay) = pair[0].center();
            let (bx, by) = pair[1].center();
            if rng.gen_bool(0.5) {
                carve_horizontal_corridor(map, ax, bx, ay);
                carve_vertical_corridor(map, ay, by, bx);
            } else {
                carve_vertical_corridor(map, ay, by, ax);
                carve_horizontal_corridor(map, ax, bx, by);
            }
        }
    }

    fn place_stairs(&self, map: &mut GameMap) {
        if map.rooms.is_empty() {
            return;
        }
        // Down first, then up: a single-room map keeps only the way out.
        let (down_x, down_y) = map.rooms[map.rooms.len() - 1].center();
        map.set_tile(down_x, down_y, Tile::stairs_down());
        let (up_x, up_y) = map.rooms[0].center();
        map.set_tile(up_x, up_y, Tile::stairs_up());
    }
}

/// Generate a dungeon in one call.
pub fn generate_dungeon(config: DungeonConfig) -> GameMap {
    DungeonGenerator::new(config).generate()
}

/// Turn wall tiles along a horizontal run into floor, leaving carved cells
/// alone.
fn carve_horizontal_corridor(map: &mut GameMap, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        let is_wall = map
            .get_tile(x, y)
            .map_or(false, |tile| tile.kind == TileKind::Wall);
        if is_wall {
            map.set_tile(x, y, Tile::floor());
        }
    }
}

fn carve_vertical_corridor(map: &mut GameMap, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        let is_wall = map
            .get_tile(x, y)
            .map_or(false, |tile| tile.kind == TileKind::Wall);
        if is_wall {
            map.set_tile(x, y, Tile::floor());
        }
    }
}
