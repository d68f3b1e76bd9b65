//! Per-instance orb state and the shared modulation it reads each frame.
//!
//! Every orb owns its particles, its clock and its rotation. The only thing
//! orbs share is a [`Modulation`] snapshot (listening flag, mood preset and
//! mood tint) held in a [`ModulationCell`]. UI handlers write the cell; each
//! orb reads one snapshot at the start of a frame and uses it for the whole
//! frame, so a frame never sees a half-applied change.

use std::cell::Cell;
use std::rc::Rc;

use rand::Rng;

use super::particle::Particle;
use super::preset::{Motion, MoodPreset};
use super::theme::Color;

/// Process-wide behaviour shared by all orbs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Modulation {
	pub listening: bool,
	pub preset: MoodPreset,
	pub tint: Option<Color>,
}

impl Modulation {
	pub fn motion(&self) -> &'static Motion {
		self.preset.coefficients().motion(self.listening)
	}
}

/// Shared holder for the current [`Modulation`].
///
/// Single writer, many readers, all on the UI thread. Writes replace the
/// whole snapshot (last write wins); readers copy it out with [`get`].
///
/// [`get`]: ModulationCell::get
#[derive(Clone, Debug, Default)]
pub struct ModulationCell {
	inner: Rc<Cell<Modulation>>,
}

impl ModulationCell {
	pub fn new(initial: Modulation) -> Self {
		Self {
			inner: Rc::new(Cell::new(initial)),
		}
	}

	pub fn get(&self) -> Modulation {
		self.inner.get()
	}

	pub fn update(&self, f: impl FnOnce(&mut Modulation)) {
		let mut next = self.inner.get();
		f(&mut next);
		self.inner.set(next);
	}

	pub fn set_listening(&self, listening: bool) {
		self.update(|m| m.listening = listening);
	}

	pub fn set_preset(&self, preset: MoodPreset) {
		self.update(|m| m.preset = preset);
	}

	pub fn set_tint(&self, tint: Option<Color>) {
		self.update(|m| m.tint = tint);
	}
}

/// How many particles an orb of a given size gets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
	/// Sizes strictly above this are dense.
	pub threshold: f64,
	pub dense: usize,
	pub sparse: usize,
}

impl Density {
	pub fn particles_for(&self, size: f64) -> usize {
		if size > self.threshold { self.dense } else { self.sparse }
	}
}

impl Default for Density {
	fn default() -> Self {
		Self {
			threshold: 100.0,
			dense: 200,
			sparse: 80,
		}
	}
}

/// Orb size for a container of `width` x `height` px: the smaller side if it
/// is positive, else whichever side is, else `fallback`.
pub fn fit_size(width: f64, height: f64, fallback: f64) -> f64 {
	[width.min(height), width, height]
		.into_iter()
		.find(|&s| s > 0.0)
		.unwrap_or(fallback)
}

/// A particle projected onto the drawing surface for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Rotated depth; larger is closer to the viewer.
	pub z: f64,
	/// `z` normalised to `[0, 1]`, back to front.
	pub depth: f64,
	/// Index into [`OrbState::particles`].
	pub index: usize,
}

/// Animation state of one orb.
///
/// Created once per instance, then mutated every frame by the loop: first
/// [`advance`](OrbState::advance) with the wall-clock delta, then
/// [`project`](OrbState::project) to obtain the draw list.
#[derive(Clone, Debug)]
pub struct OrbState {
	pub size: f64,
	pub radius: f64,
	pub particles: Vec<Particle>,
	/// Seconds of animation since the orb was created. Only advances while running.
	pub time: f64,
	pub rotation_y: f64,
}

impl OrbState {
	pub fn new(size: f64, radius_factor: f64, density: &Density, rng: &mut impl Rng) -> Self {
		let count = density.particles_for(size);
		Self {
			size,
			radius: size * radius_factor,
			particles: Particle::sphere(count, rng),
			time: 0.0,
			rotation_y: 0.0,
		}
	}

	pub fn center(&self) -> (f64, f64) {
		(self.size / 2.0, self.size / 2.0)
	}

	/// Advances the clock and the global rotation by `dt` seconds.
	pub fn advance(&mut self, dt: f64, modulation: &Modulation) {
		let dt = dt.max(0.0);
		self.time += dt;
		self.rotation_y += dt * modulation.motion().rot_speed;
	}

	/// Updates every particle for the current time and returns them projected
	/// to screen space, sorted back to front.
	pub fn project(&mut self, modulation: &Modulation) -> Vec<Projected> {
		let motion = modulation.motion();
		let (cx, cy) = self.center();
		let (sin_r, cos_r) = self.rotation_y.sin_cos();
		let (time, radius) = (self.time, self.radius);

		let mut projected: Vec<Projected> = self
			.particles
			.iter_mut()
			.enumerate()
			.map(|(index, p)| {
				p.update(time, motion, modulation.listening);
				let (x, y, z) = p.position(radius);

				let rx = x * cos_r - z * sin_r;
				let rz = x * sin_r + z * cos_r;
				let drop = p.drop_effect(time, motion.drop_amp);

				let depth = if radius > 0.0 {
					((rz / radius + 1.0) / 2.0).clamp(0.0, 1.0)
				} else {
					0.5
				};

				Projected {
					x: cx + rx * drop,
					y: cy + y * drop,
					z: rz,
					depth,
					index,
				}
			})
			.collect();

		projected.sort_by(|a, b| a.z.total_cmp(&b.z));
		projected
	}

	pub fn dot_size(&self, p: &Projected, listening: bool) -> f64 {
		let boost = if listening { 1.3 } else { 1.0 };
		self.particles[p.index].base_size * (0.4 + 0.6 * p.depth) * boost
	}

	pub fn dot_alpha(&self, p: &Projected, listening: bool) -> f64 {
		let damp = if listening { 1.0 } else { 0.85 };
		self.particles[p.index].base_alpha * (0.3 + 0.7 * p.depth) * damp
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn orb(size: f64, seed: u64) -> OrbState {
		OrbState::new(size, 0.36, &Density::default(), &mut StdRng::seed_from_u64(seed))
	}

	#[test]
	fn density_follows_size_threshold() {
		let d = Density::default();
		assert_eq!(d.particles_for(140.0), 200);
		assert_eq!(d.particles_for(100.0), 80);
		assert_eq!(d.particles_for(28.0), 80);
	}

	#[test]
	fn fit_size_prefers_smaller_positive_side() {
		assert_eq!(fit_size(300.0, 140.0, 220.0), 140.0);
		assert_eq!(fit_size(56.0, 0.0, 40.0), 56.0);
		assert_eq!(fit_size(0.0, 32.0, 40.0), 32.0);
		assert_eq!(fit_size(0.0, 0.0, 220.0), 220.0);
	}

	#[test]
	fn projection_is_sorted_back_to_front() {
		let mut state = orb(220.0, 11);
		let m = Modulation::default();
		for step in 0..20 {
			state.advance(0.37 * step as f64, &m);
			let frame = state.project(&m);
			assert!(frame.windows(2).all(|w| w[0].z <= w[1].z));
		}
	}

	#[test]
	fn idle_projection_is_deterministic() {
		let mut state = orb(140.0, 5);
		let m = Modulation {
			listening: false,
			..Modulation::default()
		};
		state.advance(3.2, &m);
		let first = state.project(&m);
		let second = state.project(&m);
		assert_eq!(first.len(), second.len());
		for (a, b) in first.iter().zip(&second) {
			assert_eq!(a.index, b.index);
			assert_eq!(a.x, b.x);
			assert_eq!(a.y, b.y);
		}
	}

	#[test]
	fn vibrant_idle_scenario_at_five_seconds() {
		let mut state = orb(140.0, 2024);
		assert_eq!(state.particles.len(), 200);

		let m = Modulation {
			listening: false,
			preset: MoodPreset::Vibrant,
			tint: None,
		};
		state.advance(5.0, &m);
		assert_eq!(state.time, 5.0);

		for p in state.project(&m) {
			assert!((0.0..=1.0).contains(&p.depth));
			assert!(state.dot_size(&p, m.listening) > 0.0);
			assert!(state.dot_alpha(&p, m.listening) > 0.0);
		}
	}

	#[test]
	fn rotation_speed_follows_listening() {
		let mut idle = orb(60.0, 1);
		let mut active = idle.clone();
		let preset = MoodPreset::Calm;
		idle.advance(
			2.0,
			&Modulation {
				listening: false,
				preset,
				tint: None,
			},
		);
		active.advance(
			2.0,
			&Modulation {
				listening: true,
				preset,
				tint: None,
			},
		);
		assert!((idle.rotation_y - 0.30).abs() < 1e-12);
		assert!((active.rotation_y - 1.40).abs() < 1e-12);
	}

	#[test]
	fn negative_dt_does_not_rewind() {
		let mut state = orb(60.0, 1);
		let m = Modulation::default();
		state.advance(1.0, &m);
		state.advance(-5.0, &m);
		assert_eq!(state.time, 1.0);
	}

	#[test]
	fn projected_points_stay_near_center() {
		let mut state = orb(200.0, 9);
		let m = Modulation {
			listening: true,
			..Modulation::default()
		};
		state.advance(7.5, &m);
		let (cx, cy) = state.center();
		let max_reach = state.radius * (1.0 + m.motion().drop_amp) + 1e-9;
		for p in state.project(&m) {
			let d = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
			assert!(d <= max_reach);
		}
	}

	#[test]
	fn modulation_cell_is_shared_between_clones() {
		let cell = ModulationCell::default();
		let reader = cell.clone();
		assert_eq!(reader.get().preset, MoodPreset::Vibrant);

		cell.set_listening(true);
		cell.set_preset(MoodPreset::Calm);
		cell.set_tint(Some(Color::rgb(1, 2, 3)));

		let snap = reader.get();
		assert!(snap.listening);
		assert_eq!(snap.preset, MoodPreset::Calm);
		assert_eq!(snap.tint, Some(Color::rgb(1, 2, 3)));
	}

	#[test]
	fn dot_size_and_alpha_grow_towards_front() {
		let state = orb(140.0, 3);
		let back = Projected {
			x: 0.0,
			y: 0.0,
			z: -1.0,
			depth: 0.0,
			index: 0,
		};
		let front = Projected { depth: 1.0, z: 1.0, ..back };
		assert!(state.dot_size(&front, false) > state.dot_size(&back, false));
		assert!(state.dot_alpha(&front, false) > state.dot_alpha(&back, false));
		assert!(state.dot_size(&front, true) > state.dot_size(&front, false));
	}
}
