//! Leptos component owning the heart backdrop canvas.
//!
//! The component wires three registrations around the engine state: a
//! `requestAnimationFrame` closure that re-schedules itself each tick, a
//! `ResizeObserver` on the parent container that keeps the backing buffer
//! matched to the rendered size, and a `visibilitychange` listener that
//! pauses the loop while the tab is hidden. Cleanup cancels the pending
//! frame and releases all three registrations; it is idempotent and late
//! callbacks are no-ops.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::__reexports::send_wrapper::SendWrapper;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement, ResizeObserver,
	VisibilityState, Window,
};

use super::config::HeartRainConfig;
use super::particles::BrowserRandom;
use super::render;
use super::state::{HeartRainState, SurfaceSize};

/// Acquire the 2d context, or nothing when the environment cannot provide
/// one. The backdrop is decorative, so absence disables it without
/// touching the surrounding UI.
fn acquire_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()?
		.dyn_into::<CanvasRenderingContext2d>()
		.ok()
}

/// Measure the parent container (the canvas itself as fallback), resize the
/// backing buffer to logical × pixel-ratio physical pixels, pin the CSS size
/// to the logical size, and install the logical-unit transform. Returns the
/// surface the next tick should draw against.
fn apply_surface(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	pixel_ratio: f64,
) -> SurfaceSize {
	let rect = canvas
		.parent_element()
		.map(|parent| parent.get_bounding_client_rect())
		.unwrap_or_else(|| canvas.get_bounding_client_rect());
	let surface = SurfaceSize::from_container(rect.width(), rect.height(), pixel_ratio);

	canvas.set_width(surface.physical_width());
	canvas.set_height(surface.physical_height());
	let style = HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{}px", surface.width));
	let _ = style.set_property("height", &format!("{}px", surface.height));
	let _ = ctx.set_transform(
		surface.pixel_ratio,
		0.0,
		0.0,
		surface.pixel_ratio,
		0.0,
		0.0,
	);

	surface
}

/// Request one animation frame for `cb`, returning its handle.
fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}

/// Renders the falling-hearts backdrop into its parent container.
///
/// Fire-and-forget: mount it behind the UI and it fills the parent, ignores
/// pointer events, and needs no callbacks. Configuration is read once at
/// mount; remount the component to reconfigure.
#[component]
pub fn HeartRain(
	#[prop(default = HeartRainConfig::default())] config: HeartRainConfig,
	#[prop(default = None)] class: Option<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<HeartRainState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let visibility_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let observer: Rc<RefCell<Option<ResizeObserver>>> = Rc::new(RefCell::new(None));
	let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

	let (state_init, animate_init, resize_cb_init, visibility_cb_init, observer_init, frame_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		visibility_cb.clone(),
		observer.clone(),
		frame.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let Some(ctx) = acquire_context(&canvas) else {
			warn!("heart backdrop disabled: 2d canvas context unavailable");
			return;
		};

		let surface = apply_surface(&canvas, &ctx, window.device_pixel_ratio());
		*state_init.borrow_mut() = Some(HeartRainState::new(
			config.clone(),
			surface,
			Box::new(BrowserRandom),
		));

		// Container resizes retarget the buffer before the next tick runs;
		// the callback and ticks share one execution context.
		{
			let (state_resize, canvas_resize, ctx_resize) =
				(state_init.clone(), canvas.clone(), ctx.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					// Observer disconnect on teardown is the primary guard;
					// this covers a callback already in flight.
					if s.is_stopped() {
						return;
					}
					let ratio = web_sys::window()
						.map(|w| w.device_pixel_ratio())
						.unwrap_or(1.0);
					s.resize(apply_surface(&canvas_resize, &ctx_resize, ratio));
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				match ResizeObserver::new(cb.as_ref().unchecked_ref()) {
					Ok(ro) => {
						let target: Element = canvas
							.parent_element()
							.unwrap_or_else(|| canvas.clone().into());
						ro.observe(&target);
						*observer_init.borrow_mut() = Some(ro);
					}
					Err(_) => {
						warn!("heart backdrop: ResizeObserver unavailable, size fixed at mount");
					}
				}
			}
		}

		let (state_anim, animate_inner, frame_anim) = (
			state_init.clone(),
			animate_init.clone(),
			frame_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			frame_anim.set(None);
			let mut reschedule = false;
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.is_running() {
					render::draw_frame(&ctx, s);
					s.advance();
					reschedule = true;
				}
			}
			if reschedule {
				if let Some(ref cb) = *animate_inner.borrow() {
					frame_anim.set(request_frame(cb));
				}
			}
		}));

		{
			let (state_vis, animate_vis, frame_vis) = (
				state_init.clone(),
				animate_init.clone(),
				frame_init.clone(),
			);
			*visibility_cb_init.borrow_mut() = Some(Closure::new(move || {
				let visible = web_sys::window()
					.and_then(|w| w.document())
					.map(|d| d.visibility_state() == VisibilityState::Visible)
					.unwrap_or(true);
				if let Some(ref mut s) = *state_vis.borrow_mut() {
					if !visible {
						if s.pause() {
							if let Some(handle) = frame_vis.take() {
								if let Some(w) = web_sys::window() {
									let _ = w.cancel_animation_frame(handle);
								}
							}
						}
					} else if s.resume() {
						if let Some(ref cb) = *animate_vis.borrow() {
							frame_vis.set(request_frame(cb));
						}
					}
				}
			}));
			if let Some(ref cb) = *visibility_cb_init.borrow() {
				if let Some(document) = window.document() {
					let _ = document
						.add_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref());
				}
			}
		}

		if let Some(ref cb) = *animate_init.borrow() {
			frame_init.set(request_frame(cb));
		}
	});

	// The teardown captures browser-only `!Send` handles (`Rc`/`Closure`),
	// but `on_cleanup` requires `Send + Sync`. In the single-threaded wasm
	// target these values never cross threads, so a `SendWrapper` satisfies
	// the bound without changing behavior.
	let cleanup = SendWrapper::new((state, frame, observer, visibility_cb, resize_cb, animate));
	on_cleanup(move || {
		let (state, frame, observer, visibility_cb, resize_cb, animate) = &*cleanup;
		{
			let mut state = state.borrow_mut();
			let Some(ref mut s) = *state else {
				return;
			};
			if !s.teardown() {
				return;
			}
		}
		if let Some(handle) = frame.take() {
			if let Some(w) = web_sys::window() {
				let _ = w.cancel_animation_frame(handle);
			}
		}
		if let Some(ro) = observer.borrow_mut().take() {
			ro.disconnect();
		}
		if let Some(cb) = visibility_cb.borrow_mut().take() {
			if let Some(document) = web_sys::window().and_then(|w| w.document()) {
				let _ = document
					.remove_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref());
			}
		}
		resize_cb.borrow_mut().take();
		animate.borrow_mut().take();
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class=class
			style="position: absolute; inset: 0; width: 100%; height: 100%; pointer-events: none;"
			aria-hidden="true"
		/>
	}
}
