//! Animation state for the heart backdrop.
//!
//! Owns the surface geometry, the heart pool, and the frame-loop phase.
//! Created once when the component mounts, then mutated only from the
//! animation, resize, and visibility callbacks — all of which run on the
//! single browser execution context, so ticks never observe a half-applied
//! resize and no synchronization is needed.

use super::config::HeartRainConfig;
use super::particles::{Heart, HeartPool, RandomSource};

/// Upper bound on the device pixel ratio, to bound backing-buffer cost on
/// high-density displays.
const MAX_PIXEL_RATIO: f64 = 2.0;

/// Frame-loop phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// A tick is scheduled; the loop keeps rescheduling itself.
	Running,
	/// Host view is hidden; no tick is scheduled.
	Paused,
	/// Torn down. Terminal: every later callback is a no-op.
	Stopped,
}

/// Logical surface size plus device pixel density.
///
/// `width`/`height` are CSS pixels; the physical backing buffer is the
/// logical size multiplied by `pixel_ratio`. All drawing happens in logical
/// units via a canvas transform, so the rest of the engine never sees
/// physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
	pub width: f64,
	pub height: f64,
	pub pixel_ratio: f64,
}

impl SurfaceSize {
	/// Derive a surface size from raw container dimensions. Dimensions are
	/// floored and clamped to at least 1 so a collapsed container never
	/// produces a degenerate buffer; the pixel ratio is capped at 2 and
	/// falls back to 1 when the environment reports nothing sensible.
	pub fn from_container(width: f64, height: f64, pixel_ratio: f64) -> Self {
		let ratio = if pixel_ratio > 0.0 {
			pixel_ratio.min(MAX_PIXEL_RATIO)
		} else {
			1.0
		};
		Self {
			width: width.floor().max(1.0),
			height: height.floor().max(1.0),
			pixel_ratio: ratio,
		}
	}

	/// Backing-buffer width in physical pixels.
	pub fn physical_width(&self) -> u32 {
		(self.width * self.pixel_ratio).floor() as u32
	}

	/// Backing-buffer height in physical pixels.
	pub fn physical_height(&self) -> u32 {
		(self.height * self.pixel_ratio).floor() as u32
	}
}

/// Core backdrop state: configuration, surface bounds, pool, and phase.
pub struct HeartRainState {
	pub config: HeartRainConfig,
	pub surface: SurfaceSize,
	pool: HeartPool,
	rng: Box<dyn RandomSource>,
	phase: Phase,
}

impl HeartRainState {
	/// Build the pool against the given surface and enter `Running`.
	pub fn new(config: HeartRainConfig, surface: SurfaceSize, mut rng: Box<dyn RandomSource>) -> Self {
		let pool = HeartPool::new(&config, surface.width, surface.height, rng.as_mut());
		Self {
			config,
			surface,
			pool,
			rng,
			phase: Phase::Running,
		}
	}

	pub fn hearts(&self) -> &[Heart] {
		self.pool.hearts()
	}

	pub fn pool_len(&self) -> usize {
		self.pool.len()
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn is_running(&self) -> bool {
		self.phase == Phase::Running
	}

	pub fn is_stopped(&self) -> bool {
		self.phase == Phase::Stopped
	}

	/// Advance every heart one tick against the current bounds.
	pub fn advance(&mut self) {
		self.pool.advance(
			self.surface.width,
			self.surface.height,
			&self.config,
			self.rng.as_mut(),
		);
	}

	/// Adopt a new surface size. Takes effect on the next tick; hearts keep
	/// their positions and are recycled against the new bounds as they exit.
	pub fn resize(&mut self, surface: SurfaceSize) {
		self.surface = surface;
	}

	/// Host view became hidden. Returns true when a pending frame should be
	/// cancelled (i.e. the loop was running).
	pub fn pause(&mut self) -> bool {
		if self.phase == Phase::Running {
			self.phase = Phase::Paused;
			true
		} else {
			false
		}
	}

	/// Host view became visible again. Returns true when exactly one frame
	/// should be scheduled (i.e. the loop was paused, not already running
	/// and not torn down).
	pub fn resume(&mut self) -> bool {
		if self.phase == Phase::Paused {
			self.phase = Phase::Running;
			true
		} else {
			false
		}
	}

	/// Enter the terminal phase. Returns true only on the first call so the
	/// caller releases its registrations exactly once.
	pub fn teardown(&mut self) -> bool {
		if self.phase == Phase::Stopped {
			false
		} else {
			self.phase = Phase::Stopped;
			true
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::heart_rain::particles::SeededRandom;

	fn state(count: usize) -> HeartRainState {
		let config = HeartRainConfig {
			count,
			..HeartRainConfig::default()
		};
		let surface = SurfaceSize::from_container(400.0, 300.0, 1.0);
		HeartRainState::new(config, surface, Box::new(SeededRandom::new(42)))
	}

	#[test]
	fn test_surface_from_container() {
		let surface = SurfaceSize::from_container(400.0, 300.0, 2.0);
		assert_eq!(surface.width, 400.0);
		assert_eq!(surface.height, 300.0);
		assert_eq!(surface.physical_width(), 800);
		assert_eq!(surface.physical_height(), 600);
	}

	#[test]
	fn test_surface_ratio_capped() {
		let surface = SurfaceSize::from_container(400.0, 300.0, 3.0);
		assert_eq!(surface.pixel_ratio, 2.0);
		assert_eq!(surface.physical_width(), 800);
	}

	#[test]
	fn test_surface_degenerate_inputs() {
		let surface = SurfaceSize::from_container(0.0, -5.0, 0.0);
		assert_eq!(surface.width, 1.0);
		assert_eq!(surface.height, 1.0);
		assert_eq!(surface.pixel_ratio, 1.0);
	}

	#[test]
	fn test_surface_floors_fractional_sizes() {
		let surface = SurfaceSize::from_container(400.7, 300.2, 1.5);
		assert_eq!(surface.width, 400.0);
		assert_eq!(surface.height, 300.0);
		assert_eq!(surface.physical_width(), 600);
	}

	#[test]
	fn test_starts_running_with_full_pool() {
		let s = state(55);
		assert_eq!(s.phase(), Phase::Running);
		assert_eq!(s.pool_len(), 55);
	}

	#[test]
	fn test_pause_resume_cycle() {
		let mut s = state(10);
		assert!(s.pause());
		assert_eq!(s.phase(), Phase::Paused);
		// Hidden again while already paused: nothing to cancel.
		assert!(!s.pause());
		assert!(s.resume());
		assert_eq!(s.phase(), Phase::Running);
		// Visible while already running: must not schedule a second frame.
		assert!(!s.resume());
	}

	#[test]
	fn test_teardown_idempotent() {
		let mut s = state(10);
		assert!(s.teardown());
		assert!(!s.teardown());
		assert_eq!(s.phase(), Phase::Stopped);
		assert!(s.is_stopped());
		// Late visibility callbacks are no-ops.
		assert!(!s.resume());
		assert!(!s.pause());
	}

	#[test]
	fn test_resize_applies_to_next_advance() {
		let mut s = state(10);
		s.resize(SurfaceSize::from_container(200.0, 150.0, 2.0));
		assert_eq!(s.surface.width, 200.0);
		for _ in 0..600 {
			s.advance();
		}
		// Everything recycles against the new bounds eventually.
		for heart in s.hearts() {
			assert!(heart.y <= 150.0 + 30.0);
		}
		assert_eq!(s.pool_len(), 10);
	}
}
