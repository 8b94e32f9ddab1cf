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

//! Time control. Search is single-threaded and strictly sequential, so
//! this needs no atomics or locks — it is a plain deadline checked
//! cooperatively at node entry.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct SearchLimit {
    deadline: Option<Instant>,
    check_interval: u64,
    nodes_since_check: u64,
    expired: bool,
}

impl SearchLimit {
    #[must_use]
    pub fn new(budget: Duration, check_interval: u64) -> SearchLimit {
        SearchLimit {
            deadline: Some(Instant::now() + budget),
            check_interval: check_interval.max(1),
            nodes_since_check: 0,
            expired: false,
        }
    }

    #[must_use]
    /// A limit that never expires, used by the tuner's quiescence calls.
    pub fn infinite() -> SearchLimit {
        SearchLimit {
            deadline: None,
            check_interval: 1,
            nodes_since_check: 0,
            expired: false,
        }
    }

    /// Poll the clock at node entry. Cheap on most calls: only actually
    /// reads the clock every `check_interval` nodes.
    pub fn poll(&mut self) -> bool {
        if self.expired {
            return true;
        }
        let Some(deadline) = self.deadline else { return false };
        self.nodes_since_check += 1;
        if self.nodes_since_check < self.check_interval {
            return false;
        }
        self.nodes_since_check = 0;
        self.expired = Instant::now() >= deadline;
        self.expired
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_limit_never_expires() {
        let mut limit = SearchLimit::infinite();
        for _ in 0..1000 {
            assert!(!limit.poll());
        }
    }

    #[test]
    fn zero_budget_expires_immediately() {
        let mut limit = SearchLimit::new(Duration::ZERO, 1);
        std::thread::sleep(Duration::from_millis(1));
        assert!(limit.poll());
    }
}
