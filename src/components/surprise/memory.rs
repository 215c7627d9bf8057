//! Tile-matching mini game.
//!
//! Pure board state: two tiles per face, shuffled at deal time. A
//! mismatched pair stays face-up until the next interaction flips it back,
//! so the board needs no timers.

use crate::components::heart_rain::particles::RandomSource;

/// One tile on the board. `face` indexes into the content's tile faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
	pub face: usize,
	pub revealed: bool,
	pub matched: bool,
}

/// Board state for the memory level.
#[derive(Clone, Debug, Default)]
pub struct MemoryBoard {
	tiles: Vec<Tile>,
	picked: Vec<usize>,
}

impl MemoryBoard {
	/// Deal a shuffled board with two tiles per face.
	pub fn deal(faces: usize, rng: &mut dyn RandomSource) -> Self {
		let mut tiles: Vec<Tile> = (0..faces)
			.flat_map(|face| {
				[Tile {
					face,
					revealed: false,
					matched: false,
				}; 2]
			})
			.collect();

		// Fisher-Yates
		for i in (1..tiles.len()).rev() {
			let j = (rng.sample() * (i as f64 + 1.0)) as usize;
			tiles.swap(i, j.min(i));
		}

		Self {
			tiles,
			picked: Vec::new(),
		}
	}

	pub fn tiles(&self) -> &[Tile] {
		&self.tiles
	}

	pub fn matched_count(&self) -> usize {
		self.tiles.iter().filter(|t| t.matched).count()
	}

	/// True once every tile is matched. An empty board is never solved.
	pub fn solved(&self) -> bool {
		!self.tiles.is_empty() && self.tiles.iter().all(|t| t.matched)
	}

	/// Reveal the tile at `idx`. A mismatched pair left from the previous
	/// turn is flipped back first; a matching second pick locks both tiles
	/// immediately. Returns true when the board changed.
	pub fn pick(&mut self, idx: usize) -> bool {
		if idx >= self.tiles.len() {
			return false;
		}
		if self.picked.len() == 2 {
			self.hide_pending();
		}

		let tile = self.tiles[idx];
		if tile.matched || tile.revealed {
			return false;
		}
		self.tiles[idx].revealed = true;
		self.picked.push(idx);

		if let [a, b] = self.picked[..] {
			if self.tiles[a].face == self.tiles[b].face {
				self.tiles[a].matched = true;
				self.tiles[b].matched = true;
				self.picked.clear();
			}
		}
		true
	}

	fn hide_pending(&mut self) {
		for idx in self.picked.drain(..) {
			self.tiles[idx].revealed = false;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::heart_rain::particles::SeededRandom;

	fn positions_of(board: &MemoryBoard, face: usize) -> Vec<usize> {
		board
			.tiles()
			.iter()
			.enumerate()
			.filter(|(_, t)| t.face == face)
			.map(|(i, _)| i)
			.collect()
	}

	#[test]
	fn test_deal_pairs_every_face() {
		let mut rng = SeededRandom::new(1);
		let board = MemoryBoard::deal(6, &mut rng);
		assert_eq!(board.tiles().len(), 12);
		for face in 0..6 {
			assert_eq!(positions_of(&board, face).len(), 2);
		}
		assert!(board.tiles().iter().all(|t| !t.revealed && !t.matched));
	}

	#[test]
	fn test_deal_deterministic_under_seed() {
		let mut a = SeededRandom::new(9);
		let mut b = SeededRandom::new(9);
		let left = MemoryBoard::deal(6, &mut a);
		let right = MemoryBoard::deal(6, &mut b);
		assert_eq!(left.tiles(), right.tiles());
	}

	#[test]
	fn test_matching_pair_locks() {
		let mut rng = SeededRandom::new(2);
		let mut board = MemoryBoard::deal(3, &mut rng);
		let pair = positions_of(&board, 0);
		assert!(board.pick(pair[0]));
		assert!(board.pick(pair[1]));
		assert!(board.tiles()[pair[0]].matched);
		assert!(board.tiles()[pair[1]].matched);
		assert_eq!(board.matched_count(), 2);
	}

	#[test]
	fn test_mismatch_flips_back_on_next_pick() {
		let mut rng = SeededRandom::new(3);
		let mut board = MemoryBoard::deal(3, &mut rng);
		let a = positions_of(&board, 0)[0];
		let b = positions_of(&board, 1)[0];
		board.pick(a);
		board.pick(b);
		// Mismatch stays face-up for the player to see.
		assert!(board.tiles()[a].revealed);
		assert!(board.tiles()[b].revealed);

		let c = positions_of(&board, 2)[0];
		board.pick(c);
		assert!(!board.tiles()[a].revealed);
		assert!(!board.tiles()[b].revealed);
		assert!(board.tiles()[c].revealed);
	}

	#[test]
	fn test_redundant_picks_ignored() {
		let mut rng = SeededRandom::new(4);
		let mut board = MemoryBoard::deal(2, &mut rng);
		let pair = positions_of(&board, 0);
		assert!(board.pick(pair[0]));
		// Same tile again: no-op.
		assert!(!board.pick(pair[0]));
		// Out of range: no-op.
		assert!(!board.pick(99));
		board.pick(pair[1]);
		// Matched tiles can't be picked again.
		assert!(!board.pick(pair[0]));
	}

	#[test]
	fn test_solving_the_board() {
		let mut rng = SeededRandom::new(5);
		let mut board = MemoryBoard::deal(3, &mut rng);
		assert!(!board.solved());
		for face in 0..3 {
			let pair = positions_of(&board, face);
			board.pick(pair[0]);
			board.pick(pair[1]);
		}
		assert!(board.solved());
	}

	#[test]
	fn test_empty_board_never_solved() {
		assert!(!MemoryBoard::default().solved());
	}
}
