//! Rule-driven enemy decision making.
//!
//! Each AI type maps what the enemy can see to one discrete action per
//! turn:
//!
//! - **Passive**: flees when the player gets close, otherwise waits
//! - **Aggressive**: attacks when adjacent, otherwise closes in
//! - **Defensive**: holds position and attacks only when adjacent
//! - **Patrol**: walks its route, attacking players that come within reach
//!
//! "Visible" means the player's cell is in the FOV set handed to `decide`;
//! "adjacent" means Chebyshev distance of at most one, so diagonal contact
//! counts.

mod enemy;

pub use enemy::*;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use dungeon_world::GameMap;

use crate::pathfinding::{a_star_path, chebyshev_distance, manhattan_distance};

/// Discrete actions an enemy can take on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move,
    Attack,
    Flee,
    Wait,
}

/// An action plus the cell it is aimed at, when one applies.
///
/// `Attack` and chase `Move`s target the player, patrol `Move`s target the
/// current waypoint, `Flee` targets the chosen escape cell, and `Wait`
/// targets nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub target: Option<(i32, i32)>,
}

/// Per-enemy decision controller.
///
/// Holds the AI type and the patrol progress, which is the only state that
/// persists between turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyAi {
    pub ai_type: AiType,
    pub patrol_route: Vec<(i32, i32)>,
    patrol_index: usize,
}

impl EnemyAi {
    /// Create a controller for the given AI type.
    pub fn new(ai_type: AiType) -> Self {
        Self {
            ai_type,
            patrol_route: Vec::new(),
            patrol_index: 0,
        }
    }

    /// Attach a patrol route, used by [`AiType::Patrol`].
    pub fn with_patrol_route(mut self, route: Vec<(i32, i32)>) -> Self {
        self.patrol_route = route;
        self
    }

    /// Whether the enemy notices and engages the player: visible and within
    /// aggro range.
    pub fn is_aggro(&self, enemy: &Enemy, player: (i32, i32), fov: &HashSet<(i32, i32)>) -> bool {
        fov.contains(&player) && manhattan_distance(enemy.position, player) <= enemy.aggro_range
    }

    /// Path from the enemy to the player across walkable terrain.
    pub fn get_path_to_player(
        &self,
        enemy: &Enemy,
        player: (i32, i32),
        map: &GameMap,
    ) -> Vec<(i32, i32)> {
        a_star_path(enemy.position, player, |x, y| map.is_walkable(x, y))
    }

    /// Decide the enemy's action for this turn.
    pub fn decide_action(
        &mut self,
        enemy: &Enemy,
        player: (i32, i32),
        map: &GameMap,
        fov: &HashSet<(i32, i32)>,
    ) -> Action {
        self.decide(enemy, player, map, fov).action
    }

    /// Decide the action together with the cell it targets.
    pub fn decide(
        &mut self,
        enemy: &Enemy,
        player: (i32, i32),
        map: &GameMap,
        fov: &HashSet<(i32, i32)>,
    ) -> Decision {
        match self.ai_type {
            AiType::Passive => self.decide_passive(enemy, player, map, fov),
            AiType::Aggressive => self.decide_aggressive(enemy, player, fov),
            AiType::Defensive => self.decide_defensive(enemy, player, fov),
            AiType::Patrol => self.decide_patrol(enemy, player, fov),
        }
    }

    /// Passive: flee while the player is visible and close.
    fn decide_passive(
        &self,
        enemy: &Enemy,
        player: (i32, i32),
        map: &GameMap,
        fov: &HashSet<(i32, i32)>,
    ) -> Decision {
        if fov.contains(&player) {
            let close = manhattan_distance(enemy.position, player) <= enemy.aggro_range;
            if close || is_adjacent(enemy.position, player) {
                let target = self.flee_position(enemy, player, map);
                return Decision {
                    action: Action::Flee,
                    target: Some(target),
                };
            }
        }
        Decision {
            action: Action::Wait,
            target: None,
        }
    }

    /// Aggressive: attack when adjacent, otherwise close the distance.
    fn decide_aggressive(
        &self,
        enemy: &Enemy,
        player: (i32, i32),
        fov: &HashSet<(i32, i32)>,
    ) -> Decision {
        if !fov.contains(&player) {
            return Decision {
                action: Action::Wait,
                target: None,
            };
        }
        if is_adjacent(enemy.position, player) {
            Decision {
                action: Action::Attack,
                target: Some(player),
            }
        } else {
            Decision {
                action: Action::Move,
                target: Some(player),
            }
        }
    }

    /// Defensive: hold position, strike back when the player closes in.
    fn decide_defensive(
        &self,
        enemy: &Enemy,
        player: (i32, i32),
        fov: &HashSet<(i32, i32)>,
    ) -> Decision {
        if fov.contains(&player) && is_adjacent(enemy.position, player) {
            return Decision {
                action: Action::Attack,
                target: Some(player),
            };
        }
        Decision {
            action: Action::Wait,
            target: None,
        }
    }

    /// Patrol: walk the route, but retaliate when the player is in reach.
    fn decide_patrol(
        &mut self,
        enemy: &Enemy,
        player: (i32, i32),
        fov: &HashSet<(i32, i32)>,
    ) -> Decision {
        if fov.contains(&player) && is_adjacent(enemy.position, player) {
            return Decision {
                action: Action::Attack,
                target: Some(player),
            };
        }
        match self.patrol_target(enemy) {
            Some(target) if enemy.position != target => Decision {
                action: Action::Move,
                target: Some(target),
            },
            _ => Decision {
                action: Action::Wait,
                target: None,
            },
        }
    }

    /// Pick the walkable orthogonal neighbor farthest from the player,
    /// scanning N, E, S, W and keeping the first maximum. Falls back to the
    /// current cell when every neighbor is blocked.
    fn flee_position(&self, enemy: &Enemy, player: (i32, i32), map: &GameMap) -> (i32, i32) {
        let (ex, ey) = enemy.position;
        let mut best = enemy.position;
        let mut best_distance = -1;
        for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
            let candidate = (ex + dx, ey + dy);
            if !map.is_walkable(candidate.0, candidate.1) {
                continue;
            }
            let distance = manhattan_distance(candidate, player);
            if distance > best_distance {
                best_distance = distance;
                best = candidate;
            }
        }
        best
    }

    /// Current patrol waypoint. Standing on it advances the index, wrapping
    /// at the end of the route.
    fn patrol_target(&mut self, enemy: &Enemy) -> Option<(i32, i32)> {
        if self.patrol_route.is_empty() {
            return None;
        }
        let mut target = self.patrol_route[self.patrol_index];
        if enemy.position == target {
            self.patrol_index = (self.patrol_index + 1) % self.patrol_route.len();
            target = self.patrol_route[self.patrol_index];
        }
        Some(target)
    }
}

/// Chebyshev adjacency, diagonals included.
fn is_adjacent(a: (i32, i32), b: (i32, i32)) -> bool {
    chebyshev_distance(a, b) <= 1
}
