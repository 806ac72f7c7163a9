//! Cave generation with cellular automata.

use std::collections::HashSet;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::DungeonConfig;
use crate::map::GameMap;
use crate::tiles::{Tile, TileKind};

/// Smoothing iterations over the initial noise.
const SMOOTHING_PASSES: u32 = 5;

/// Replace the map's interior with an organic cave.
pub(super) fn generate_caves(map: &mut GameMap, config: &DungeonConfig, rng: &mut ChaCha8Rng) {
    // Step 1: seed random noise at the configured density.
    for y in 0..map.height {
        for x in 0..map.width {
            if rng.gen::<f64>() < config.cave_density {
                map.set_tile(x, y, Tile::floor());
            } else {
                map.set_tile(x, y, Tile::wall());
            }
        }
    }

    // Step 2: smooth the noise into connected blobs.
    for _ in 0..SMOOTHING_PASSES {
        smooth(map);
    }

    // Step 3: drop every pocket except the biggest one.
    keep_largest_region(map);
}

/// One cellular automaton pass over a snapshot of the grid: a floor
/// majority among the 8 neighbors makes floor, a wall majority makes wall,
/// an exact four-four tie leaves the cell as it was.
fn smooth(map: &mut GameMap) {
    let mut next = map.tiles.clone();
    for y in 0..map.height {
        for x in 0..map.width {
            let floors = count_floor_neighbors(map, x, y);
            if floors > 4 {
                next[y as usize][x as usize] = Tile::floor();
            } else if floors < 4 {
                next[y as usize][x as usize] = Tile::wall();
            }
        }
    }
    map.tiles = next;
}

/// Floor cells among the 8 neighbors. Off-map neighbors count as not floor.
fn count_floor_neighbors(map: &GameMap, x: i32, y: i32) -> u32 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if map.get_tile(x + dx, y + dy).map(|tile| tile.kind) == Some(TileKind::Floor) {
                count += 1;
            }
        }
    }
    count
}

/// Flood-fill every floor region and wall off all but the largest, so the
/// cave is one connected space.
fn keep_largest_region(map: &mut GameMap) {
    let mut visited: HashSet<(i32, i32)> = HashSet::new();
    let mut largest: Vec<(i32, i32)> = Vec::new();

    for y in 0..map.height {
        for x in 0..map.width {
            if visited.contains(&(x, y)) {
                continue;
            }
            if map.get_tile(x, y).map(|tile| tile.kind) == Some(TileKind::Floor) {
                let region = flood_fill(map, x, y, &mut visited);
                if region.len() > largest.len() {
                    largest = region;
                }
            }
        }
    }

    let keep: HashSet<(i32, i32)> = largest.into_iter().collect();
    for y in 0..map.height {
        for x in 0..map.width {
            if keep.contains(&(x, y)) {
                continue;
            }
            if map.get_tile(x, y).map(|tile| tile.kind) == Some(TileKind::Floor) {
                map.set_tile(x, y, Tile::wall());
            }
        }
    }
}

/// Collect one 4-connected floor region with an explicit stack.
fn flood_fill(
    map: &GameMap,
    start_x: i32,
    start_y: i32,
    visited: &mut HashSet<(i32, i32)>,
) -> Vec<(i32, i32)> {
    let mut region = Vec::new();
    let mut stack = vec![(start_x, start_y)];

    while let Some((x, y)) = stack.pop() {
        if visited.contains(&(x, y)) {
            continue;
        }
        if map.get_tile(x, y).map(|tile| tile.kind) != Some(TileKind::Floor) {
            continue;
        }
        visited.insert((x, y));
        region.push((x, y));
        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    region
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_map(width: i32, height: i32) -> GameMap {
        let mut map = GameMap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map.set_tile(x, y, Tile::wall());
            }
        }
        map
    }

    #[test]
    fn test_smooth_majority_rules() {
        // All-floor 5x5: corners see 3 floor neighbors and become wall,
        // edges see 5 and interior cells 8, so both stay floor.
        let mut map = GameMap::new(5, 5);
        smooth(&mut map);

        for (x, y) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
            assert_eq!(map.get_tile(x, y).unwrap().kind, TileKind::Wall);
        }
        assert_eq!(map.get_tile(2, 0).unwrap().kind, TileKind::Floor);
        assert_eq!(map.get_tile(2, 2).unwrap().kind, TileKind::Floor);
    }

    #[test]
    fn test_smooth_tie_leaves_cell_unchanged() {
        // Exactly four floor neighbors around (2, 2) in both setups.
        let mut walled = walled_map(5, 5);
        for (x, y) in [(1, 1), (3, 1), (1, 3), (3, 3)] {
            walled.set_tile(x, y, Tile::floor());
        }
        smooth(&mut walled);
        assert_eq!(walled.get_tile(2, 2).unwrap().kind, TileKind::Wall);

        let mut open = walled_map(5, 5);
        for (x, y) in [(1, 1), (3, 1), (1, 3), (3, 3), (2, 2)] {
            open.set_tile(x, y, Tile::floor());
        }
        smooth(&mut open);
        assert_eq!(open.get_tile(2, 2).unwrap().kind, TileKind::Floor);
    }

    #[test]
    fn test_count_floor_neighbors_ignores_off_map() {
        let map = GameMap::new(3, 3);
        assert_eq!(count_floor_neighbors(&map, 0, 0), 3);
        assert_eq!(count_floor_neighbors(&map, 1, 0), 5);
        assert_eq!(count_floor_neighbors(&map, 1, 1), 8);
    }

    #[test]
    fn test_keep_largest_region_seals_small_pockets() {
        let mut map = walled_map(9, 5);
        // Big region: three cells. Small region: one cell, walled apart.
        for (x, y) in [(1, 2), (2, 2), (3, 2)] {
            map.set_tile(x, y, Tile::floor());
        }
        map.set_tile(6, 2, Tile::floor());

        keep_largest_region(&mut map);

        assert!(map.is_walkable(1, 2));
        assert!(map.is_walkable(2, 2));
        assert!(map.is_walkable(3, 2));
        assert!(!map.is_walkable(6, 2));
    }

    #[test]
    fn test_flood_fill_respects_diagonal_gaps() {
        // Two floor cells touching only diagonally are separate regions.
        let mut map = walled_map(4, 4);
        map.set_tile(1, 1, Tile::floor());
        map.set_tile(2, 2, Tile::floor());

        let mut visited = HashSet::new();
        let region = flood_fill(&map, 1, 1, &mut visited);
        assert_eq!(region.len(), 1);
        assert!(!visited.contains(&(2, 2)));
    }
}
