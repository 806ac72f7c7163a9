use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub Uuid);

impl EnemyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for EnemyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an enemy decides its turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiType {
    /// Runs from the player, never attacks.
    Passive,
    /// Chases the player on sight and attacks when adjacent.
    Aggressive,
    /// Holds its ground and only retaliates against adjacent players.
    Defensive,
    /// Walks a fixed route, attacking players that get too close.
    Patrol,
}

/// The spatial state of one enemy.
///
/// Combat stats are not this crate's concern and ride through in
/// `extra_components` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub position: (i32, i32),
    /// Distance at which the enemy notices the player.
    pub aggro_range: i32,
    /// Components owned by other layers, kept verbatim.
    #[serde(default)]
    pub extra_components: HashMap<String, serde_json::Value>,
}

impl Enemy {
    /// Create an enemy at the given position with the default aggro range.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            id: EnemyId::new(),
            position: (x, y),
            aggro_range: 5,
            extra_components: HashMap::new(),
        }
    }

    /// Override the aggro range.
    pub fn with_aggro_range(mut self, range: i32) -> Self {
        self.aggro_range = range;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enemy_defaults() {
        let enemy = Enemy::new(3, 4);
        assert_eq!(enemy.position, (3, 4));
        assert_eq!(enemy.aggro_range, 5);
        assert!(enemy.extra_components.is_empty());
        assert_ne!(enemy.id, EnemyId::nil());
    }

    #[test]
    fn test_with_aggro_range() {
        let enemy = Enemy::new(0, 0).with_aggro_range(8);
        assert_eq!(enemy.aggro_range, 8);
    }

    #[test]
    fn test_enemy_ids_are_unique() {
        assert_ne!(EnemyId::new(), EnemyId::new());
    }

    #[test]
    fn test_extra_components_survive_serialization() {
        let mut enemy = Enemy::new(1, 1);
        enemy.extra_components.insert(
            "health".to_string(),
            serde_json::json!({ "current": 10, "max": 10 }),
        );

        let json = serde_json::to_string(&enemy).unwrap();
        let back: Enemy = serde_json::from_str(&json).unwrap();
        assert_eq!(back.position, (1, 1));
        assert_eq!(
            back.extra_components.get("health"),
            enemy.extra_components.get("health")
        );
    }
}
