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

//! Bump-pointer storage for the sparse per-entry coefficient tuples.
//!
//! Each `TexelEntry` needs a slice of coefficient tuples, refilled from a
//! shared stack in fixed-size chunks when exhausted, to avoid one
//! allocation per training position. Storing a borrowed `&'arena [Tuple]`
//! directly on the entry would make `TexelEntry` self-referential, which
//! Rust has no safe way to express. [`TupleArena`] gets the same
//! amortized-allocation behavior without that hazard: chunks are boxed
//! slices that never move once pushed, and each entry holds a
//! [`TupleHandle`] (chunk index + offset + length) rather than a borrowed
//! slice, resolved back through [`TupleArena::get`].
pub(crate) const STACKSIZE: usize = 65_536;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TupleHandle {
    chunk: usize,
    start: usize,
    len: usize,
}

pub(crate) struct TupleArena {
    chunks: Vec<Box<[(u32, i32)]>>,
    used_in_last: usize,
}

impl TupleArena {
    pub(crate) fn new() -> TupleArena {
        TupleArena {
            chunks: Vec::new(),
            used_in_last: 0,
        }
    }

    fn ensure_room(&mut self, needed: usize) {
        let room = self
            .chunks
            .last()
            .map_or(0, |c| c.len() - self.used_in_last);
        if room < needed {
            let size = STACKSIZE.max(needed);
            self.chunks.push(vec![(0u32, 0i32); size].into_boxed_slice());
            self.used_in_last = 0;
        }
    }

    /// Copy `coeffs` (term index, nonzero white-relative coefficient) into
    /// the arena and return a handle to the stored slice.
    pub(crate) fn alloc(&mut self, coeffs: &[(usize, i32)]) -> TupleHandle {
        self.ensure_room(coeffs.len());
        let chunk = self.chunks.len() - 1;
        let start = self.used_in_last;
        let slice = &mut self.chunks[chunk][start..start + coeffs.len()];
        for (dst, &(index, coeff)) in slice.iter_mut().zip(coeffs) {
            *dst = (index as u32, coeff);
        }
        self.used_in_last += coeffs.len();
        TupleHandle {
            chunk,
            start,
            len: coeffs.len(),
        }
    }

    #[must_use]
    pub(crate) fn get(&self, handle: TupleHandle) -> &[(u32, i32)] {
        &self.chunks[handle.chunk][handle.start..handle.start + handle.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_single_allocation() {
        let mut arena = TupleArena::new();
        let handle = arena.alloc(&[(3, 1), (9, -1)]);
        assert_eq!(arena.get(handle), &[(3, 1), (9, -1)]);
    }

    #[test]
    fn refills_a_new_chunk_when_the_current_one_is_exhausted() {
        let mut arena = TupleArena::new();
        let first = arena.alloc(&vec![(0, 1); STACKSIZE]);
        let second = arena.alloc(&[(1, 2)]);
        assert_eq!(arena.get(first).len(), STACKSIZE);
        assert_eq!(arena.get(second), &[(1, 2)]);
    }
}
