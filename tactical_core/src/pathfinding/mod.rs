//! A* pathfinding and grid distance helpers.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Search node tracking cost and parentage. Nodes live in an arena `Vec`
/// and refer to their parent by index.
#[derive(Debug, Clone)]
struct Node {
    position: (i32, i32),
    g_cost: f64,
    h_cost: f64,
    parent: Option<usize>,
}

impl Node {
    fn f_cost(&self) -> f64 {
        self.g_cost + self.h_cost
    }
}

/// Neighbor order: N, NE, E, SE, S, SW, W, NW.
const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const ORTHOGONAL_COST: f64 = 1.0;
/// Cheap stand-in for sqrt(2).
const DIAGONAL_COST: f64 = 1.5;

/// Manhattan distance between two cells.
pub fn manhattan_distance(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Chebyshev distance: the move count under 8-directional movement.
pub fn chebyshev_distance(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs().max((a.1 - b.1).abs())
}

/// Find a path from `start` to `goal` with A*.
///
/// Movement is 8-directional; diagonal steps cost 1.5 against 1.0 for
/// orthogonal ones. `passable` decides which cells may be entered and must
/// return `false` out of bounds. The result excludes `start` and ends with
/// `goal`; an empty vec means no path exists, the endpoints coincide, or an
/// endpoint is impassable.
pub fn a_star_path<F>(start: (i32, i32), goal: (i32, i32), passable: F) -> Vec<(i32, i32)>
where
    F: Fn(i32, i32) -> bool,
{
    if start == goal {
        return Vec::new();
    }
    if !passable(start.0, start.1) || !passable(goal.0, goal.1) {
        return Vec::new();
    }

    let mut nodes = vec![Node {
        position: start,
        g_cost: 0.0,
        h_cost: manhattan_distance(start, goal) as f64,
        parent: None,
    }];
    let mut open_set: Vec<usize> = vec![0];
    let mut closed_set: HashMap<(i32, i32), f64> = HashMap::new();

    while !open_set.is_empty() {
        // Lowest f first; ties fall to the cheaper path so far, then to
        // insertion order (the sort is stable).
        open_set.sort_by(|&a, &b| {
            nodes[a]
                .f_cost()
                .partial_cmp(&nodes[b].f_cost())
                .unwrap_or(Ordering::Equal)
                .then(
                    nodes[a]
                        .g_cost
                        .partial_cmp(&nodes[b].g_cost)
                        .unwrap_or(Ordering::Equal),
                )
        });
        let current = open_set.remove(0);
        let position = nodes[current].position;
        let g_cost = nodes[current].g_cost;

        if position == goal {
            return reconstruct_path(&nodes, current);
        }

        if closed_set.get(&position).map_or(false, |&g| g <= g_cost) {
            continue;
        }
        closed_set.insert(position, g_cost);

        for (dx, dy) in DIRECTIONS {
            let next = (position.0 + dx, position.1 + dy);
            if !passable(next.0, next.1) {
                continue;
            }

            let step = if dx != 0 && dy != 0 {
                DIAGONAL_COST
            } else {
                ORTHOGONAL_COST
            };
            let g = g_cost + step;
            if closed_set.get(&next).map_or(false, |&best| best <= g) {
                continue;
            }

            nodes.push(Node {
                position: next,
                g_cost: g,
                h_cost: manhattan_distance(next, goal) as f64,
                parent: Some(current),
            });
            open_set.push(nodes.len() - 1);
        }
    }

    Vec::new()
}

/// Walk parent links back to the start, then flip and drop the start cell.
fn reconstruct_path(nodes: &[Node], goal_index: usize) -> Vec<(i32, i32)> {
    let mut path = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(index) = cursor {
        path.push(nodes[index].position);
        cursor = nodes[index].parent;
    }
    path.reverse();

    if path.len() > 1 {
        path.remove(0);
        path
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_world::{GameMap, Tile};

    fn open_grid(width: i32, height: i32) -> impl Fn(i32, i32) -> bool {
        move |x, y| x >= 0 && x < width && y >= 0 && y < height
    }

    fn path_cost(start: (i32, i32), path: &[(i32, i32)]) -> f64 {
        let mut cost = 0.0;
        let mut previous = start;
        for &cell in path {
            let dx = (cell.0 - previous.0).abs();
            let dy = (cell.1 - previous.1).abs();
            assert!(dx <= 1 && dy <= 1 && (dx, dy) != (0, 0), "non-adjacent step");
            cost += if dx == 1 && dy == 1 { 1.5 } else { 1.0 };
            previous = cell;
        }
        cost
    }

    #[test]
    fn test_same_start_and_goal_is_empty() {
        assert!(a_star_path((3, 3), (3, 3), open_grid(10, 10)).is_empty());
    }

    #[test]
    fn test_impassable_endpoints_yield_no_path() {
        let passable = |x: i32, y: i32| (x, y) != (0, 0) && x >= 0 && y >= 0 && x < 5 && y < 5;
        assert!(a_star_path((0, 0), (3, 3), passable).is_empty());
        assert!(a_star_path((3, 3), (0, 0), passable).is_empty());
    }

    #[test]
    fn test_diagonal_line_is_found_exactly() {
        let path = a_star_path((0, 0), (3, 3), open_grid(10, 10));
        assert_eq!(path, vec![(1, 1), (2, 2), (3, 3)]);
        assert!((path_cost((0, 0), &path) - 4.5).abs() < 0.01);
    }

    #[test]
    fn test_straight_line_costs_its_length() {
        let path = a_star_path((0, 0), (0, 7), open_grid(10, 10));
        assert_eq!(path.len(), 7);
        assert_eq!(path.last(), Some(&(0, 7)));
        assert!((path_cost((0, 0), &path) - 7.0).abs() < 0.01);
    }

    #[test]
    fn test_mixed_route_is_chebyshev_optimal() {
        let path = a_star_path((0, 0), (2, 1), open_grid(10, 10));
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some(&(2, 1)));
        assert!((path_cost((0, 0), &path) - 2.5).abs() < 0.01);
    }

    #[test]
    fn test_path_excludes_start_and_includes_goal() {
        let path = a_star_path((2, 2), (5, 2), open_grid(10, 10));
        assert!(!path.contains(&(2, 2)));
        assert_eq!(path.last(), Some(&(5, 2)));
    }

    #[test]
    fn test_walled_off_goal_has_no_path() {
        let mut map = GameMap::new(9, 9);
        for (x, y) in [
            (4, 4),
            (5, 4),
            (6, 4),
            (4, 5),
            (6, 5),
            (4, 6),
            (5, 6),
            (6, 6),
        ] {
            map.set_tile(x, y, Tile::wall());
        }
        let path = a_star_path((1, 1), (5, 5), |x, y| map.is_walkable(x, y));
        assert!(path.is_empty());
    }

    #[test]
    fn test_path_routes_around_obstacles() {
        let mut map = GameMap::new(8, 8);
        // A wall bar with one gap at the top.
        for y in 1..8 {
            map.set_tile(3, y, Tile::wall());
        }
        let path = a_star_path((1, 4), (6, 4), |x, y| map.is_walkable(x, y));

        assert!(!path.is_empty());
        assert_eq!(path.last(), Some(&(6, 4)));
        let mut previous = (1, 4);
        for &cell in &path {
            assert!(map.is_walkable(cell.0, cell.1));
            assert_eq!(chebyshev_distance(previous, cell), 1);
            previous = cell;
        }
        // The only opening is at (3, 0).
        assert!(path.contains(&(3, 0)));
    }

    #[test]
    fn test_path_between_generated_room_centers() {
        let config = dungeon_world::DungeonConfig {
            seed: Some(42),
            ..dungeon_world::DungeonConfig::default()
        };
        let map = dungeon_world::generate_dungeon(config);
        assert!(map.rooms.len() >= 2);

        let start = map.rooms[0].center();
        let goal = map.rooms[map.rooms.len() - 1].center();
        let path = a_star_path(start, goal, |x, y| map.is_walkable(x, y));
        assert!(!path.is_empty());
        assert_eq!(path.last(), Some(&goal));
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance((0, 0), (3, 4)), 7);
        assert_eq!(manhattan_distance((2, 2), (2, 2)), 0);
        assert_eq!(manhattan_distance((-1, -1), (1, 1)), 4);
    }

    #[test]
    fn test_chebyshev_distance() {
        assert_eq!(chebyshev_distance((0, 0), (3, 4)), 4);
        assert_eq!(chebyshev_distance((0, 0), (5, 2)), 5);
        assert_eq!(chebyshev_distance((2, 2), (2, 2)), 0);
        assert_eq!(chebyshev_distance((0, 0), (1, 1)), 1);
    }
}
