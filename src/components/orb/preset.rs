//! Mood presets: named bundles of motion coefficients.
//!
//! Each preset carries two regimes, idle and listening. The listening regime
//! is always the more energetic one: larger angular amplitudes, faster
//! rotation and stronger droplet breathing.

use std::fmt;
use std::str::FromStr;

/// Motion coefficients for one regime (idle or listening).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
	pub phi_amp: f64,
	pub phi_speed: f64,
	pub theta_amp: f64,
	/// Idle: oscillation frequency. Listening: steady drift rate.
	pub theta_speed: f64,
	pub rot_speed: f64,
	pub drop_amp: f64,
}

/// Both regimes of a preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
	pub idle: Motion,
	pub listening: Motion,
}

impl Coefficients {
	pub fn motion(&self, listening: bool) -> &Motion {
		if listening { &self.listening } else { &self.idle }
	}
}

const CALM: Coefficients = Coefficients {
	idle: Motion {
		phi_amp: 0.08,
		phi_speed: 0.6,
		theta_amp: 0.06,
		theta_speed: 0.4,
		rot_speed: 0.15,
		drop_amp: 0.05,
	},
	listening: Motion {
		phi_amp: 0.20,
		phi_speed: 1.8,
		theta_amp: 0.15,
		theta_speed: 1.0,
		rot_speed: 0.70,
		drop_amp: 0.10,
	},
};

const MODERATE: Coefficients = Coefficients {
	idle: Motion {
		phi_amp: 0.15,
		phi_speed: 0.9,
		theta_amp: 0.12,
		theta_speed: 0.6,
		rot_speed: 0.25,
		drop_amp: 0.08,
	},
	listening: Motion {
		phi_amp: 0.30,
		phi_speed: 2.2,
		theta_amp: 0.20,
		theta_speed: 1.4,
		rot_speed: 1.00,
		drop_amp: 0.15,
	},
};

const VIBRANT: Coefficients = Coefficients {
	idle: Motion {
		phi_amp: 0.25,
		phi_speed: 1.3,
		theta_amp: 0.20,
		theta_speed: 0.9,
		rot_speed: 0.40,
		drop_amp: 0.12,
	},
	listening: Motion {
		phi_amp: 0.45,
		phi_speed: 2.8,
		theta_amp: 0.30,
		theta_speed: 2.0,
		rot_speed: 1.50,
		drop_amp: 0.20,
	},
};

/// Named mood preset, chosen from the user's mood category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MoodPreset {
	Calm,
	Moderate,
	#[default]
	Vibrant,
}

impl MoodPreset {
	pub const ALL: [MoodPreset; 3] = [MoodPreset::Calm, MoodPreset::Moderate, MoodPreset::Vibrant];

	pub fn coefficients(self) -> &'static Coefficients {
		match self {
			MoodPreset::Calm => &CALM,
			MoodPreset::Moderate => &MODERATE,
			MoodPreset::Vibrant => &VIBRANT,
		}
	}

	pub fn key(self) -> &'static str {
		match self {
			MoodPreset::Calm => "calm",
			MoodPreset::Moderate => "moderate",
			MoodPreset::Vibrant => "vibrant",
		}
	}
}

impl fmt::Display for MoodPreset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// A preset key that names none of the presets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown mood preset: {:?}", self.0)
	}
}

impl std::error::Error for UnknownPreset {}

impl FromStr for MoodPreset {
	type Err = UnknownPreset;

	/// Accepts the preset names and the single-letter keys used by the chat
	/// app (`a` = calm, `b` = moderate, `c` = vibrant).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"calm" | "a" => Ok(MoodPreset::Calm),
			"moderate" | "b" => Ok(MoodPreset::Moderate),
			"vibrant" | "c" => Ok(MoodPreset::Vibrant),
			_ => Err(UnknownPreset(s.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn listening_is_more_energetic_for_every_preset() {
		for preset in MoodPreset::ALL {
			let c = preset.coefficients();
			assert!(c.listening.phi_amp > c.idle.phi_amp, "{preset}");
			assert!(c.listening.theta_amp > c.idle.theta_amp, "{preset}");
			assert!(c.listening.rot_speed > c.idle.rot_speed, "{preset}");
			assert!(c.listening.drop_amp > c.idle.drop_amp, "{preset}");
		}
	}

	#[test]
	fn presets_are_ordered_by_energy() {
		let [calm, moderate, vibrant] = MoodPreset::ALL.map(|p| p.coefficients());
		assert!(calm.idle.phi_amp < moderate.idle.phi_amp);
		assert!(moderate.idle.phi_amp < vibrant.idle.phi_amp);
		assert!(calm.listening.rot_speed < moderate.listening.rot_speed);
		assert!(moderate.listening.rot_speed < vibrant.listening.rot_speed);
	}

	#[test]
	fn vibrant_is_default() {
		assert_eq!(MoodPreset::default(), MoodPreset::Vibrant);
		assert_eq!(MoodPreset::Vibrant.coefficients().idle.rot_speed, 0.40);
	}

	#[test]
	fn parses_names_and_letter_keys() {
		assert_eq!("calm".parse(), Ok(MoodPreset::Calm));
		assert_eq!("B".parse(), Ok(MoodPreset::Moderate));
		assert_eq!(" vibrant ".parse(), Ok(MoodPreset::Vibrant));
		assert_eq!("c".parse(), Ok(MoodPreset::Vibrant));
		assert_eq!(
			"furious".parse::<MoodPreset>(),
			Err(UnknownPreset("furious".into()))
		);
	}

	#[test]
	fn motion_selects_regime() {
		let c = MoodPreset::Calm.coefficients();
		assert_eq!(c.motion(false), &c.idle);
		assert_eq!(c.motion(true), &c.listening);
	}
}
