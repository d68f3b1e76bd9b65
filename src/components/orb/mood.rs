//! Mapping from the mood slider to orb behaviour.
//!
//! The slider reports 0 (bad) to 100 (good). Its category picks the preset,
//! and its value picks a tint interpolated along three colour stops.

use super::preset::MoodPreset;
use super::theme::Color;

/// Coarse bucket of a mood slider value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoodCategory {
	Sad,
	Neutral,
	Happy,
}

impl MoodCategory {
	/// `0..=30` sad, `31..=65` neutral, `66..=100` happy. Anything else
	/// counts as happy.
	pub fn from_value(value: i32) -> Self {
		match value {
			0..=30 => MoodCategory::Sad,
			31..=65 => MoodCategory::Neutral,
			_ => MoodCategory::Happy,
		}
	}

	pub fn preset(self) -> MoodPreset {
		match self {
			MoodCategory::Sad => MoodPreset::Calm,
			MoodCategory::Neutral => MoodPreset::Moderate,
			MoodCategory::Happy => MoodPreset::Vibrant,
		}
	}
}

const TINT_STOPS: [(i32, Color); 3] = [
	(0, Color::rgb(235, 168, 157)),   // coral
	(50, Color::rgb(245, 215, 140)),  // amber
	(100, Color::rgb(220, 200, 240)), // lavender
];

/// Tint colour for a slider value, clamped to `0..=100`.
pub fn tint_for(value: i32) -> Color {
	let value = value.clamp(0, 100);
	let (lower, upper) = TINT_STOPS
		.windows(2)
		.map(|w| (w[0], w[1]))
		.find(|(lo, hi)| value >= lo.0 && value <= hi.0)
		.unwrap_or((TINT_STOPS[0], TINT_STOPS[2]));
	let span = (upper.0 - lower.0).max(1) as f64;
	lower.1.lerp(upper.1, (value - lower.0) as f64 / span)
}
