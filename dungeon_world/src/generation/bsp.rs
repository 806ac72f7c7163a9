//! Binary space partitioning for room placement.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::DungeonConfig;
use crate::map::{GameMap, Room, RoomId};
use crate::tiles::{Tile, TileKind};

/// Levels of recursive splitting below the root.
const MAX_DEPTH: u32 = 5;

/// One rectangle in the partition tree.
///
/// Nodes live in an arena `Vec` and refer to their children by index; the
/// root sits at index 0. The tree is a scratch structure, discarded once the
/// rooms have been extracted.
#[derive(Debug, Clone)]
pub(super) struct BspNode {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub room: Option<RoomId>,
}

impl BspNode {
    fn leaf(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            left: None,
            right: None,
            room: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Partition the playable area, carve one room per leaf, and return the
/// rooms in extraction order.
pub(super) fn generate_rooms(
    map: &mut GameMap,
    config: &DungeonConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<Room> {
    // Step 1: build the partition tree over the area inside the border.
    let mut arena = vec![BspNode::leaf(1, 1, config.width - 2, config.height - 2)];
    split_node(&mut arena, 0, 0, config, rng);

    // Step 2: place one room per leaf, depth-first left to right.
    let mut rooms = Vec::new();
    extract_rooms(&mut arena, 0, config, rng, &mut rooms);

    // Step 3: carve the rooms into the map.
    for room in &rooms {
        carve_room(map, room, &rooms);
    }

    rooms
}

/// Recursively split a node while the depth budget and the room size bounds
/// allow it.
fn split_node(
    arena: &mut Vec<BspNode>,
    index: usize,
    depth: u32,
    config: &DungeonConfig,
    rng: &mut ChaCha8Rng,
) {
    if depth >= MAX_DEPTH {
        return;
    }

    let (x, y, width, height) = {
        let node = &arena[index];
        (node.x, node.y, node.width, node.height)
    };

    // A split direction is only legal when both children can still hold a
    // maximum-size room along the divided axis.
    let can_split_top_bottom = height > config.max_room_size * 2;
    let can_split_left_right = width > config.max_room_size * 2;
    if !can_split_top_bottom && !can_split_left_right {
        return;
    }

    let split_top_bottom = if can_split_top_bottom && can_split_left_right {
        rng.gen_bool(0.5)
    } else {
        can_split_top_bottom
    };

    let (left, right) = if split_top_bottom {
        let min_split = config.min_room_size;
        let max_split = height - config.min_room_size;
        if min_split >= max_split {
            return;
        }
        let split_at = rng.gen_range(min_split..=max_split);
        (
            BspNode::leaf(x, y, width, split_at),
            BspNode::leaf(x, y + split_at, width, height - split_at),
        )
    } else {
        let min_split = config.min_room_size;
        let max_split = width - config.min_room_size;
        if min_split >= max_split {
            return;
        }
        let split_at = rng.gen_range(min_split..=max_split);
        (
            BspNode::leaf(x, y, split_at, height),
            BspNode::leaf(x + split_at, y, width - split_at, height),
        )
    };

    let left_index = arena.len();
    arena.push(left);
    let right_index = arena.len();
    arena.push(right);
    arena[index].left = Some(left_index);
    arena[index].right = Some(right_index);

    split_node(arena, left_index, depth + 1, config, rng);
    split_node(arena, right_index, depth + 1, config, rng);
}

/// Walk the tree and place a centered room in every leaf.
fn extract_rooms(
    arena: &mut [BspNode],
    index: usize,
    config: &DungeonConfig,
    rng: &mut ChaCha8Rng,
    rooms: &mut Vec<Room>,
) {
    if arena[index].is_leaf() {
        let (node_x, node_y, node_width, node_height) = {
            let node = &arena[index];
            (node.x, node.y, node.width, node.height)
        };

        // Clamp the lower bound too, so degenerate leaves sample an empty
        // room instead of panicking on an inverted range.
        let max_width = config.max_room_size.min(node_width);
        let min_width = config.min_room_size.min(max_width);
        let room_width = rng.gen_range(min_width..=max_width);

        let max_height = config.max_room_size.min(node_height);
        let min_height = config.min_room_size.min(max_height);
        let room_height = rng.gen_range(min_height..=max_height);

        let room_x = node_x + (node_width - room_width) / 2;
        let room_y = node_y + (node_height - room_height) / 2;

        let id = RoomId(rooms.len() as u32);
        arena[index].room = Some(id);
        rooms.push(Room::new(id, room_x, room_y, room_width, room_height));
        return;
    }

    if let Some(left) = arena[index].left {
        extract_rooms(arena, left, config, rng, rooms);
    }
    if let Some(right) = arena[index].right {
        extract_rooms(arena, right, config, rng, rooms);
    }
}

/// Carve a room's floor and re-assert the wall ring around it, leaving
/// cells that belong to other rooms alone.
fn carve_room(map: &mut GameMap, room: &Room, rooms: &[Room]) {
    for y in room.y..room.y + room.height {
        for x in room.x..room.x + room.width {
            map.set_tile(x, y, Tile::floor());
        }
    }

    for y in room.y - 1..=room.y + room.height {
        for x in room.x - 1..=room.x + room.width {
            let is_wall = map
                .get_tile(x, y)
                .map_or(false, |tile| tile.kind == TileKind::Wall);
            if is_wall && !rooms.iter().any(|other| other.contains(x, y)) {
                map.set_tile(x, y, Tile::wall());
            }
        }
    }
}
