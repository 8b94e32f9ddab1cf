/*
  Vantage, a chess-position search and tuning engine.
  Copyright (C) 2026 Vantage Contributors.

  Vantage is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Vantage is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Tunable knobs for a single search invocation.

/// The hard ply cap on iterative deepening.
pub const MAX_DEPTH: u8 = 64;

/// Mate-in-0 sentinel.
pub const MATE: i32 = 32_000;

#[derive(Debug, Clone, Copy)]
/// Configuration for one `get_best_move` call. Constructed with `Default`
/// and overridden field-by-field.
pub struct SearchConfig {
    /// Depth cap for iterative deepening; never exceeds [`MAX_DEPTH`].
    pub max_depth: u8,
    /// How many nodes pass between deadline polls. `1` checks at every
    /// node entry; raised in practice to cut `Instant::now()` overhead.
    pub node_check_interval: u64,
    /// Whether to print the per-iteration `info depth ... pv ...` line.
    pub report_progress: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            max_depth: MAX_DEPTH,
            node_check_interval: 1,
            report_progress: true,
        }
    }
}
