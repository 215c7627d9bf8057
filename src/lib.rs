//! birthday-surprise: an interactive birthday card rendered client-side.
//!
//! This crate provides a WASM app with two halves: a falling-hearts canvas
//! backdrop (a self-contained animation engine with pooled particles,
//! resize tracking, and visibility-driven pause/resume) and a small
//! multi-step game layered on top (secret code gate, memory match, quiz,
//! final letter).

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::heart_rain::{HeartRain, HeartRainConfig};
pub use components::surprise::{SurpriseCard, SurpriseContent};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("birthday-surprise: logging initialized");
}

/// Load card content from a script element with id="surprise-data".
/// Expected format: JSON matching [`SurpriseContent`]; missing fields fall
/// back to the built-in placeholder content.
fn load_content() -> Option<SurpriseContent> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("surprise-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<SurpriseContent>(&json_text) {
		Ok(content) => {
			info!(
				"birthday-surprise: loaded content for {} ({} quiz questions)",
				content.recipient,
				content.quiz.len()
			);
			Some(content)
		}
		Err(e) => {
			warn!("birthday-surprise: failed to parse content: {}", e);
			None
		}
	}
}

/// Main application component.
/// Mounts the heart backdrop behind the card; the backdrop is
/// fire-and-forget and never intercepts pointer events.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let content = load_content().unwrap_or_default();
	let title = content.title.clone();
	let content_signal = Signal::derive(move || content.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="container">
			<HeartRain />
			<SurpriseCard content=content_signal />
		</div>
	}
}
