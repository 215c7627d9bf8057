//! Step flow for the surprise card.
//!
//! Four steps gated in order: a welcome screen with the secret-code input,
//! the memory board, the quiz, and the final letter with its gift modal.
//! All state lives in signals; there are no timers and no async work.

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::memory::MemoryBoard;
use super::quiz::QuizProgress;
use super::types::SurpriseContent;
use crate::components::heart_rain::particles::BrowserRandom;

/// Which part of the card the player is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
	Welcome,
	Memory,
	Quiz,
	Final,
}

impl Step {
	/// Header progress percentage.
	pub fn progress(self) -> u32 {
		match self {
			Step::Welcome => 10,
			Step::Memory => 45,
			Step::Quiz => 75,
			Step::Final => 100,
		}
	}
}

/// The interactive card layered over the heart backdrop.
///
/// Pass content via the `content` signal; see [`SurpriseContent`] for the
/// data-driven fields.
#[component]
pub fn SurpriseCard(#[prop(into)] content: Signal<SurpriseContent>) -> impl IntoView {
	let step = RwSignal::new(Step::Welcome);
	let name = RwSignal::new(String::new());
	let code = RwSignal::new(String::new());
	let error = RwSignal::new(None::<String>);
	let board = RwSignal::new(MemoryBoard::default());
	let quiz = RwSignal::new(QuizProgress::default());
	let gift_open = RwSignal::new(false);

	let deal_board = move || {
		let faces = content.with(|c| c.tile_faces.len());
		board.set(MemoryBoard::deal(faces, &mut BrowserRandom));
	};

	let on_start = move |_: MouseEvent| {
		error.set(None);
		let entered = code.get().trim().to_lowercase();
		if entered.is_empty() {
			error.set(Some("Type the secret code first.".into()));
			return;
		}
		let expected = content.with(|c| c.secret_code.trim().to_lowercase());
		if entered != expected {
			error.set(Some("Nope. Try again.".into()));
			return;
		}
		deal_board();
		step.set(Step::Memory);
	};

	let on_pick = move |idx: usize| {
		board.update(|b| {
			b.pick(idx);
		});
		if board.with(|b| b.solved()) {
			if content.with(|c| c.quiz.is_empty()) {
				step.set(Step::Final);
			} else {
				quiz.set(QuizProgress::default());
				step.set(Step::Quiz);
			}
		}
	};

	let on_answer = move |option: usize| {
		let total = content.with(|c| c.quiz.len());
		let was_correct = content.with(|c| {
			c.quiz
				.get(quiz.get().index)
				.is_some_and(|q| q.answer_index == option)
		});
		let mut progress = quiz.get();
		let finished = progress.answer(total, was_correct);
		quiz.set(progress);
		if finished {
			step.set(Step::Final);
		}
	};

	let greeting = move || {
		let name = name.get();
		let name = name.trim();
		if name.is_empty() {
			"You did it. Now open the gift.".to_string()
		} else {
			format!("{name}, you did it. Now open the gift.")
		}
	};

	view! {
		<div class="shell">
			<div class="header">
				<div>
					<div class="title">{move || content.get().title}</div>
					<div class="sub">"Tiny game, big reveal."</div>
				</div>
				<div class="badge">
					<span class="dot"></span>
					<span>"Progress"</span>
					<span class="kbd">{move || format!("{}%", step.get().progress())}</span>
				</div>
			</div>

			<div class="content">
				<div class="progress">
					<div style:width=move || format!("{}%", step.get().progress())></div>
				</div>

				{move || match step.get() {
					Step::Welcome => view! {
						<div class="grid two">
							<div class="card">
								<h2 class="card-headline">
									{move || format!("Hi {} 💗", content.get().recipient)}
								</h2>
								<p class="small">
									"This is a tiny birthday mission. Beat the mini game, \
									 unlock the final message."
								</p>

								<div class="field">
									<div class="small">"Your nickname (optional)"</div>
									<input
										class="input"
										prop:value=move || name.get()
										on:input=move |ev| name.set(event_target_value(&ev))
										placeholder="ex) cutie, captain, etc"
									/>
								</div>

								<div class="field">
									<div class="small">"Secret code"</div>
									<input
										class="input"
										prop:value=move || code.get()
										on:input=move |ev| code.set(event_target_value(&ev))
										placeholder=move || content.get().code_hint
									/>
								</div>

								{move || error.get().map(|msg| view! {
									<div class="small error">{msg}</div>
								})}

								<div class="row">
									<button class="btn primary" on:click=on_start>
										"Start the mission"
									</button>
									<button
										class="btn ghost"
										on:click=move |_| {
											code.set(String::new());
											error.set(None);
										}
									>
										"Reset"
									</button>
								</div>
							</div>

							<div class="card">
								<div class="small">"What's inside?"</div>
								<ul>
									<li>"Memory match game"</li>
									<li>"Mini quiz"</li>
									<li>"Final birthday letter"</li>
								</ul>
							</div>
						</div>
					}.into_any(),

					Step::Memory => view! {
						<div class="grid two">
							<div class="card">
								<div class="row spread">
									<div>
										<div class="card-title">"Level 1: Memory Match"</div>
										<div class="small">
											"Match all pairs to unlock the next level ✨"
										</div>
									</div>
									<div class="badge">
										<span class="dot"></span>
										<span>
											{move || board.with(|b| format!(
												"{}/{} matched",
												b.matched_count(),
												b.tiles().len(),
											))}
										</span>
									</div>
								</div>

								<div class="board">
									{move || board.with(|b| b.tiles().to_vec())
										.into_iter()
										.enumerate()
										.map(|(idx, tile)| {
											let shown = tile.revealed || tile.matched;
											let face = content.with(|c| {
												c.tile_faces
													.get(tile.face)
													.cloned()
													.unwrap_or_default()
											});
											view! {
												<button
													class="tile"
													class:revealed=tile.revealed
													class:matched=tile.matched
													on:click=move |_| on_pick(idx)
												>
													<span class="emoji">
														{if shown { face } else { "❔".to_string() }}
													</span>
												</button>
											}
										})
										.collect_view()}
								</div>

								<div class="row">
									<button class="btn" on:click=move |_| deal_board()>
										"Shuffle"
									</button>
									<button
										class="btn ghost"
										on:click=move |_| step.set(Step::Welcome)
									>
										"Back"
									</button>
								</div>
							</div>

							<div class="card">
								<div class="card-title">"Cute scoreboard"</div>
								<p class="small">
									{move || {
										let name = name.get();
										let name = name.trim();
										if name.is_empty() {
											"Ok… don't act shy 😌".to_string()
										} else {
											format!("Ok {name}… don't act shy 😌")
										}
									}}
								</p>
								<div class="letter">
									<div class="card-title">"Rules"</div>
									<div class="small">
										"Tap tiles, find pairs, win. That's it. (But it's \
										 still kinda addictive.)"
									</div>
								</div>
							</div>
						</div>
					}.into_any(),

					Step::Quiz => view! {
						<div class="grid two">
							<div class="card">
								<div class="card-title">"Level 2: Mini Quiz"</div>
								<p class="small">"Just vibes. No stress. Pick the best answer 😌"</p>

								<div class="letter">
									<div class="question">
										{move || content.with(|c| {
											c.quiz
												.get(quiz.get().index)
												.map(|q| q.prompt.clone())
												.unwrap_or_default()
										})}
									</div>
									<div class="grid">
										{move || {
											let options = content.with(|c| {
												c.quiz
													.get(quiz.get().index)
													.map(|q| q.options.clone())
													.unwrap_or_default()
											});
											options
												.into_iter()
												.enumerate()
												.map(|(idx, option)| view! {
													<button
														class="btn"
														on:click=move |_| on_answer(idx)
													>
														{option}
													</button>
												})
												.collect_view()
										}}
									</div>
								</div>

								<div class="row spread">
									<div class="small">
										{move || format!(
											"Question {} / {}",
											quiz.get().index + 1,
											content.with(|c| c.quiz.len()),
										)}
									</div>
									<div class="badge">
										<span class="dot"></span>
										<span>{move || format!("Correct: {}", quiz.get().correct)}</span>
									</div>
								</div>
							</div>

							<div class="card">
								<div class="card-title">"Almost there…"</div>
								<p class="small">
									"After this, you'll unlock the final message. 🎁"
								</p>
							</div>
						</div>
					}.into_any(),

					Step::Final => view! {
						<div class="grid two">
							<div class="card">
								<div class="headline">"HAPPY BIRTHDAY 🎂💗"</div>
								<p class="small">{greeting}</p>

								<div class="letter">
									<div class="card-title">"A tiny letter"</div>
									{move || content.get()
										.letter
										.into_iter()
										.map(|paragraph| view! { <p>{paragraph}</p> })
										.collect_view()}
									<div class="small signature">
										{move || content.get().signature}
									</div>
								</div>

								<div class="row">
									<button
										class="btn primary"
										on:click=move |_| gift_open.set(true)
									>
										"Open Gift 🎁"
									</button>
									<button
										class="btn"
										on:click=move |_| step.set(Step::Welcome)
									>
										"Play again"
									</button>
								</div>
							</div>

							<div class="card">
								<div class="card-title">"Rewards"</div>
								<ul>
									{move || content.get()
										.rewards
										.into_iter()
										.map(|reward| view! { <li>{reward}</li> })
										.collect_view()}
								</ul>
							</div>

							{move || gift_open.get().then(|| view! {
								<div class="modal-overlay" on:click=move |_| gift_open.set(false)>
									<div
										class="modal-card"
										on:click=|ev: MouseEvent| ev.stop_propagation()
									>
										<div class="modal-top">
											<div class="modal-title">"🎁 Surprise unlocked!"</div>
											<button
												class="modal-close"
												on:click=move |_| gift_open.set(false)
											>
												"✕"
											</button>
										</div>
										<div class="modal-body">
											<div class="modal-big">"💗💗💗"</div>
											<p class="modal-text">
												"Okay miss main character… you won. Your gift: \
												 unlimited hugs + \"I'm proud of you\" forever."
											</p>
											<div class="row">
												<button
													class="btn"
													on:click=move |_| gift_open.set(false)
												>
													"Close"
												</button>
											</div>
											<div class="modal-hint">
												"psst… check your real gift now 😌🎀"
											</div>
										</div>
									</div>
								</div>
							})}
						</div>
					}.into_any(),
				}}
			</div>
		</div>
	}
}
