use serde::{Deserialize, Serialize};

/// Identifier for a room within a single map.
///
/// Assigned ordinally in generation order so the same seed always names the
/// same rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room_{}", self.0)
    }
}

/// A rectangular room carved into the dungeon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(id: RoomId, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }

    /// Center cell of the room.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Bounding box as (x1, y1, x2, y2), exclusive on the far edges.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Whether this room shares at least one cell with another.
    pub fn intersects(&self, other: &Room) -> bool {
        let (ax1, ay1, ax2, ay2) = self.bounds();
        let (bx1, by1, bx2, by2) = other.bounds();
        !(ax2 <= bx1 || bx2 <= ax1 || ay2 <= by1 || by2 <= ay1)
    }

    /// Whether the point lies inside the room.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}
