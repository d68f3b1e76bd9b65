//! Colours and drawing constants for the orb.
//!
//! The orb cycles every droplet through a fixed three-colour corporate
//! palette. An optional mood tint is blended into each sample at a fixed
//! ratio, so the whole field leans towards the user's mood colour without
//! losing its own hues.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors. Channels are rounded to the
	/// nearest integer.
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
		Self {
			r: channel(self.r, other.r),
			g: channel(self.g, other.g),
			b: channel(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Share of the mood tint mixed into every palette sample.
pub const TINT_RATIO: f64 = 0.18;

/// Palette phase advanced per second of orb time.
pub const CYCLE_SPEED: f64 = 0.3;

/// A cyclic palette that droplets drift through over time.
#[derive(Clone, Debug)]
pub struct OrbPalette {
	pub colors: [Color; 3],
}

impl OrbPalette {
	/// Corporate colors: tech cyan, visionary violet, soft blue.
	pub fn corporate() -> Self {
		Self {
			colors: [
				Color::rgb(49, 190, 239),  // #31BEEF
				Color::rgb(153, 78, 149),  // #994E95
				Color::rgb(161, 184, 242), // #A1B8F2
			],
		}
	}

	/// Samples the palette at orb time `time` for a droplet with phase
	/// `offset`. The phase wraps into `[0, 3)` so negative inputs are safe.
	pub fn cyclic(&self, time: f64, offset: f64) -> Color {
		let n = self.colors.len() as f64;
		let t = ((time * CYCLE_SPEED + offset) % n + n) % n;
		let idx = t.floor();
		let frac = t - idx;
		let idx = idx as usize;
		let from = self.colors[idx % self.colors.len()];
		let to = self.colors[(idx + 1) % self.colors.len()];
		from.lerp(to, frac)
	}

	/// [`OrbPalette::cyclic`] with the optional mood tint blended in.
	pub fn sample(&self, time: f64, offset: f64, tint: Option<Color>) -> Color {
		let base = self.cyclic(time, offset);
		match tint {
			Some(tint) => base.lerp(tint, TINT_RATIO),
			None => base,
		}
	}
}

impl Default for OrbPalette {
	fn default() -> Self {
		Self::corporate()
	}
}

/// Dark halo drawn behind the sphere for contrast on light backgrounds.
#[derive(Clone, Debug)]
pub struct ShadowStyle {
	/// Offset of the shadow centre from the sphere centre, in px.
	pub offset: (f64, f64),
	/// Inner and outer gradient radius as multiples of the sphere radius.
	pub inner: f64,
	pub outer: f64,
	pub color: Color,
	/// Alpha at the centre and at the `mid_stop` position.
	pub alpha: f64,
	pub mid_alpha: f64,
	pub mid_stop: f64,
}

/// Colored glow around the sphere, tracking the palette at phase 0.
#[derive(Clone, Debug)]
pub struct GlowStyle {
	pub inner: f64,
	pub outer: f64,
	pub idle_alpha: f64,
	pub listening_alpha: f64,
	/// Alpha at the middle stop, relative to the centre alpha.
	pub mid_falloff: f64,
}

/// Glossy droplet look for each particle.
#[derive(Clone, Debug)]
pub struct DropletStyle {
	/// Highlight centre shift towards the upper left, as a fraction of the dot size.
	pub highlight_shift: f64,
	/// Highlight alpha relative to the droplet alpha.
	pub highlight_alpha: f64,
	/// Position of the solid color stop.
	pub body_stop: f64,
	/// Rim alpha relative to the droplet alpha.
	pub rim_alpha: f64,
}

/// Complete visual style of an orb.
#[derive(Clone, Debug)]
pub struct OrbStyle {
	pub palette: OrbPalette,
	/// Sphere radius as a fraction of the instance size.
	pub radius_factor: f64,
	pub shadow: ShadowStyle,
	pub glow: GlowStyle,
	pub droplet: DropletStyle,
}

impl Default for OrbStyle {
	fn default() -> Self {
		Self {
			palette: OrbPalette::corporate(),
			radius_factor: 0.36,
			shadow: ShadowStyle {
				offset: (2.0, 4.0),
				inner: 0.3,
				outer: 1.3,
				color: Color::rgb(30, 20, 50),
				alpha: 0.18,
				mid_alpha: 0.06,
				mid_stop: 0.6,
			},
			glow: GlowStyle {
				inner: 0.1,
				outer: 1.5,
				idle_alpha: 0.15,
				listening_alpha: 0.25,
				mid_falloff: 0.3,
			},
			droplet: DropletStyle {
				highlight_shift: 0.3,
				highlight_alpha: 0.9,
				body_stop: 0.3,
				rim_alpha: 0.3,
			},
		}
	}
}
