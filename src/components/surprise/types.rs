//! Content model for the surprise card.
//!
//! Everything the card displays is data: the recipient, the secret code,
//! the tile faces, the quiz, and the letter. Content is loaded from a JSON
//! script block at startup; any missing field falls back to the built-in
//! placeholder content, so the app always has something to show.

use serde::Deserialize;

/// One multiple-choice question.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion {
	/// Question text.
	pub prompt: String,
	/// Answer options, in display order.
	pub options: Vec<String>,
	/// Index into `options` of the "right" answer.
	pub answer_index: usize,
}

/// Complete card content.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SurpriseContent {
	/// Page and header title.
	pub title: String,
	/// Who the card is for.
	pub recipient: String,
	/// Code required to start, compared trimmed and lowercased.
	pub secret_code: String,
	/// Placeholder hint shown in the code input.
	pub code_hint: String,
	/// One emoji per pair of memory tiles.
	pub tile_faces: Vec<String>,
	/// Quiz questions, asked in order.
	pub quiz: Vec<QuizQuestion>,
	/// Letter paragraphs for the final step.
	pub letter: Vec<String>,
	/// Letter sign-off.
	pub signature: String,
	/// Rewards listed next to the letter.
	pub rewards: Vec<String>,
}

impl Default for SurpriseContent {
	fn default() -> Self {
		let quiz = vec![
			QuizQuestion {
				prompt: "Who's the cutest?".into(),
				options: vec![
					"You, obviously".into(),
					"Also you".into(),
					"Trick question: still you".into(),
				],
				answer_index: 0,
			},
			QuizQuestion {
				prompt: "What's the plan for the big day?".into(),
				options: vec![
					"Eat cake".into(),
					"Take cute photos".into(),
					"All of the above".into(),
				],
				answer_index: 2,
			},
			QuizQuestion {
				prompt: "What are you to me?".into(),
				options: vec![
					"A friend".into(),
					"A crush".into(),
					"My whole world".into(),
				],
				answer_index: 2,
			},
		];

		Self {
			title: "Birthday Surprise 🎁".into(),
			recipient: "birthday star".into(),
			secret_code: "cupcake".into(),
			code_hint: "hint: the thing I always promise to bake you".into(),
			tile_faces: vec![
				"🎀".into(),
				"💗".into(),
				"🍓".into(),
				"🧸".into(),
				"✨".into(),
				"🌙".into(),
			],
			quiz,
			letter: vec![
				"Today is your day. You make ordinary afternoons feel like a \
				 celebration, and I wanted you to have a tiny one you could \
				 carry in your pocket."
					.into(),
				"I love you. Always.".into(),
			],
			signature: "From: your favorite person (allegedly)".into(),
			rewards: vec![
				"1x wish, no questions asked".into(),
				"2x choose-the-movie nights".into(),
				"3x forgiveness coupons".into(),
			],
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_content_is_consistent() {
		let content = SurpriseContent::default();
		assert!(!content.tile_faces.is_empty());
		assert!(!content.secret_code.is_empty());
		for question in &content.quiz {
			assert!(question.answer_index < question.options.len());
		}
	}

	#[test]
	fn test_partial_json_falls_back_to_defaults() {
		let content: SurpriseContent =
			serde_json::from_str(r#"{ "recipient": "Sam", "secret_code": "Tommy" }"#).unwrap();
		assert_eq!(content.recipient, "Sam");
		assert_eq!(content.secret_code, "Tommy");
		assert_eq!(content.quiz, SurpriseContent::default().quiz);
	}

	#[test]
	fn test_full_json_round_trip() {
		let json = r#"{
			"title": "Surprise!",
			"recipient": "Alex",
			"secret_code": "waffles",
			"code_hint": "breakfast",
			"tile_faces": ["🌟", "🌈"],
			"quiz": [
				{ "prompt": "Best day?", "options": ["Today", "Tomorrow"], "answer_index": 0 }
			],
			"letter": ["Happy birthday."],
			"signature": "Me",
			"rewards": ["cake"]
		}"#;
		let content: SurpriseContent = serde_json::from_str(json).unwrap();
		assert_eq!(content.tile_faces.len(), 2);
		assert_eq!(content.quiz.len(), 1);
		assert_eq!(content.quiz[0].answer_index, 0);
	}
}
