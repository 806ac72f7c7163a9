//! Tile definitions - the per-cell vocabulary of the dungeon.

use serde::{Deserialize, Serialize};

/// Every kind of tile that can appear on a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
    DoorClosed,
    DoorOpen,
    StairsUp,
    StairsDown,
    Water,
    Lava,
    Trap,
    Void,
}

/// Named colors attached to tiles. Passed through to the renderer unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileColor {
    White,
    Gray,
    Yellow,
    Brown,
    Blue,
    Red,
    Black,
}

/// A single map cell: what it is, how it draws, and how it behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub glyph: char,
    pub color: TileColor,
    /// Blocks movement through the cell.
    pub blocking: bool,
    /// Light passes through the cell.
    pub transparent: bool,
    /// An entity can stand on the cell.
    pub walkable: bool,
}

impl Tile {
    fn new(
        kind: TileKind,
        glyph: char,
        color: TileColor,
        blocking: bool,
        transparent: bool,
        walkable: bool,
    ) -> Self {
        Self {
            kind,
            glyph,
            color,
            blocking,
            transparent,
            walkable,
        }
    }

    // Constructors below list flags as (blocking, transparent, walkable).

    /// Open floor.
    pub fn floor() -> Self {
        Tile::new(TileKind::Floor, '.', TileColor::White, false, true, true)
    }

    /// Solid wall.
    pub fn wall() -> Self {
        Tile::new(TileKind::Wall, '#', TileColor::Gray, true, false, false)
    }

    /// Staircase leading down to the next level.
    pub fn stairs_down() -> Self {
        Tile::new(
            TileKind::StairsDown,
            '>',
            TileColor::Yellow,
            false,
            true,
            true,
        )
    }

    /// Staircase leading back up.
    pub fn stairs_up() -> Self {
        Tile::new(
            TileKind::StairsUp,
            '<',
            TileColor::Yellow,
            false,
            true,
            true,
        )
    }

    /// Closed door. Opaque and impassable until opened.
    pub fn door_closed() -> Self {
        Tile::new(
            TileKind::DoorClosed,
            '+',
            TileColor::Brown,
            true,
            false,
            false,
        )
    }

    /// Open door.
    pub fn door_open() -> Self {
        Tile::new(TileKind::DoorOpen, '/', TileColor::Brown, false, true, true)
    }

    /// Water. See-through but not standable.
    pub fn water() -> Self {
        Tile::new(TileKind::Water, '~', TileColor::Blue, false, true, false)
    }

    /// Lava. See-through but not standable.
    pub fn lava() -> Self {
        Tile::new(TileKind::Lava, '=', TileColor::Red, false, true, false)
    }

    /// Trap. Walks like floor; triggering is the combat layer's concern.
    pub fn trap() -> Self {
        Tile::new(TileKind::Trap, '^', TileColor::Red, false, true, true)
    }

    /// Nothing at all. Used outside the playable area.
    pub fn void() -> Self {
        Tile::new(TileKind::Void, ' ', TileColor::Black, true, false, false)
    }

    /// Whether the tile blocks line of sight. Derived from transparency.
    pub fn opaque(&self) -> bool {
        !self.transparent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_is_open() {
        let tile = Tile::floor();
        assert_eq!(tile.kind, TileKind::Floor);
        assert_eq!(tile.glyph, '.');
        assert!(tile.walkable);
        assert!(tile.transparent);
        assert!(!tile.blocking);
        assert!(!tile.opaque());
    }

    #[test]
    fn test_wall_is_solid() {
        let tile = Tile::wall();
        assert_eq!(tile.kind, TileKind::Wall);
        assert_eq!(tile.glyph, '#');
        assert!(!tile.walkable);
        assert!(!tile.transparent);
        assert!(tile.blocking);
        assert!(tile.opaque());
    }

    #[test]
    fn test_doors_toggle_passability() {
        let closed = Tile::door_closed();
        let open = Tile::door_open();
        assert!(closed.blocking && !closed.walkable && closed.opaque());
        assert!(!open.blocking && open.walkable && !open.opaque());
        assert_eq!(closed.color, TileColor::Brown);
        assert_eq!(open.color, TileColor::Brown);
    }

    #[test]
    fn test_liquids_are_transparent_but_not_walkable() {
        for tile in [Tile::water(), Tile::lava()] {
            assert!(tile.transparent);
            assert!(!tile.walkable);
            assert!(!tile.blocking);
        }
    }

    #[test]
    fn test_stairs_and_traps_walk_like_floor() {
        for tile in [Tile::stairs_up(), Tile::stairs_down(), Tile::trap()] {
            assert!(tile.walkable);
            assert!(tile.transparent);
            assert!(!tile.blocking);
        }
    }

    #[test]
    fn test_opaque_mirrors_transparency_everywhere() {
        let all = [
            Tile::floor(),
            Tile::wall(),
            Tile::stairs_down(),
            Tile::stairs_up(),
            Tile::door_closed(),
            Tile::door_open(),
            Tile::water(),
            Tile::lava(),
            Tile::trap(),
            Tile::void(),
        ];
        for tile in all {
            assert_eq!(tile.opaque(), !tile.transparent);
        }
    }

    #[test]
    fn test_tile_serializes_round_trip() {
        let tile = Tile::stairs_down();
        let json = serde_json::to_string(&tile).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(tile, back);
    }
}
