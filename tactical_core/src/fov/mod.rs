//! Field of view via recursive shadowcasting.
//!
//! # Algorithm
//!
//! The space around the observer is divided into 8 octants, each scanned
//! independently:
//!
//! 1. **Rows**: cells are visited row by row moving away from the observer
//! 2. **Window**: a pair of slopes brackets the cells still lit within the
//!    octant; cells outside the window are skipped
//! 3. **Shadows**: the first opaque cell in a run narrows the window for all
//!    deeper rows by recursing, and the scan resumes past the run
//! 4. **Stop**: a row that ends still blocked terminates the whole octant
//!
//! Cells inside the radius are collected into the visible set and marked
//! explored on the map as a side effect. The observer's own cell is always
//! visible, even at radius zero.

use std::collections::HashSet;

use dungeon_world::GameMap;

/// Octant transforms as (xx, xy, yx, yy) row/column multipliers.
const OCTANTS: [[i32; 4]; 8] = [
    [1, 0, 0, -1],
    [0, 1, 1, 0],
    [-1, 0, 0, 1],
    [0, -1, -1, 0],
    [-1, 0, 0, -1],
    [0, -1, 1, 0],
    [1, 0, 0, 1],
    [0, 1, -1, 0],
];

/// Computes visible cells and records them as explored on the map it wraps.
pub struct FieldOfView<'a> {
    map: &'a mut GameMap,
}

impl<'a> FieldOfView<'a> {
    /// Bind a calculator to the given map.
    pub fn new(map: &'a mut GameMap) -> Self {
        Self { map }
    }

    /// Compute the set of cells visible from `(x, y)` within `radius`.
    ///
    /// The radius check is inclusive and measured as squared Euclidean
    /// distance. Candidates that land off the map are dropped cell by cell,
    /// so observers at the edge keep the rest of their fan.
    pub fn compute(&mut self, x: i32, y: i32, radius: i32) -> HashSet<(i32, i32)> {
        let mut visible = HashSet::new();
        visible.insert((x, y));
        self.map.mark_explored(x, y);

        for octant in 0..8 {
            self.cast_light(&mut visible, x, y, radius, 1, 1.0, 0.0, octant);
        }

        visible
    }

    /// Scan one octant from `row` outward inside the slope window
    /// `[end, start]`.
    fn cast_light(
        &mut self,
        visible: &mut HashSet<(i32, i32)>,
        cx: i32,
        cy: i32,
        radius: i32,
        row: i32,
        mut start: f64,
        end: f64,
        octant: usize,
    ) {
        if start < end {
            return;
        }
        let [xx, xy, yx, yy] = OCTANTS[octant];
        let radius_sq = radius * radius;

        for j in row..=radius {
            let dy = -j;
            let mut blocked = false;
            let mut new_start = start;

            for dx in -j..=0 {
                let l_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
                let r_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);
                if start < r_slope {
                    continue;
                }
                if end > l_slope {
                    break;
                }

                let x = cx + dx * xx + dy * xy;
                let y = cy + dx * yx + dy * yy;
                if !self.map.in_bounds(x, y) {
                    continue;
                }

                if dx * dx + dy * dy <= radius_sq {
                    visible.insert((x, y));
                    self.map.mark_explored(x, y);
                }

                if blocked {
                    if self.map.is_opaque(x, y) {
                        new_start = r_slope;
                    } else {
                        blocked = false;
                        start = new_start;
                    }
                } else if self.map.is_opaque(x, y) && j < radius {
                    // Shadow begins: deeper rows behind this cell get a
                    // narrowed window, the current row resumes after it.
                    blocked = true;
                    self.cast_light(visible, cx, cy, radius, j + 1, start, l_slope, octant);
                    new_start = r_slope;
                }
            }

            if blocked {
                break;
            }
        }
    }
}
