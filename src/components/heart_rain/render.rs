//! Canvas drawing for the heart backdrop.
//!
//! One pass per tick: clear the logical surface, then draw every heart in
//! pool order with its current translation, rotation, and opacity. All
//! coordinates are logical units; the component installs a transform that
//! maps them onto the physical backing buffer.

use web_sys::CanvasRenderingContext2d;

use super::state::HeartRainState;

/// Draw the current tick's hearts.
pub fn draw_frame(ctx: &CanvasRenderingContext2d, state: &HeartRainState) {
	let surface = state.surface;
	ctx.clear_rect(0.0, 0.0, surface.width, surface.height);
	ctx.set_fill_style_str(&state.config.color.to_css());

	for heart in state.hearts() {
		ctx.save();
		let _ = ctx.translate(heart.x, heart.y);
		let _ = ctx.rotate(heart.rot);
		ctx.set_global_alpha(heart.alpha);
		trace_heart(ctx, heart.size);
		ctx.fill();
		ctx.restore();
	}
}

/// Trace a heart silhouette centered on the local origin: two symmetric
/// cubic curves meeting at a point below and a cleft above, contained
/// within ±size on both axes.
fn trace_heart(ctx: &CanvasRenderingContext2d, size: f64) {
	let cleft = size * 0.3;
	ctx.begin_path();
	ctx.move_to(0.0, cleft);
	let _ = ctx.bezier_curve_to(size, -size * 0.2, size, size * 0.9, 0.0, size);
	let _ = ctx.bezier_curve_to(-size, size * 0.9, -size, -size * 0.2, 0.0, cleft);
	ctx.close_path();
}
