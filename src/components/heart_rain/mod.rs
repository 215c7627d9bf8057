//! Falling-hearts backdrop component.
//!
//! A self-contained animation engine behind the UI:
//! - Fixed-capacity pool of heart particles, recycled in place as they
//!   leave the surface
//! - Canvas sized to its parent container via `ResizeObserver`, with the
//!   device pixel ratio capped at 2
//! - Self-rescheduling `requestAnimationFrame` loop that pauses while the
//!   tab is hidden and resumes on return
//!
//! # Example
//!
//! ```ignore
//! use birthday_surprise::{HeartRain, HeartRainConfig};
//!
//! view! {
//!     <div class="container">
//!         <HeartRain config=HeartRainConfig { count: 80, ..Default::default() } />
//!         // ...UI layered on top...
//!     </div>
//! }
//! ```

mod component;
pub mod config;
pub mod particles;
mod render;
mod state;

pub use component::HeartRain;
pub use config::{Color, HeartRainConfig};
