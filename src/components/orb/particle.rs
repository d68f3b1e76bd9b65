//! Droplet particles resting on the surface of the orb sphere.

use std::f64::consts::{PI, TAU};

use rand::Rng;

use super::preset::Motion;

/// Rest position of particle `index` out of `total` on a Fibonacci sphere,
/// as `(phi, theta)`. Points spiral by the golden angle, so they cover the
/// sphere almost uniformly without bunching at the poles.
pub fn fibonacci_point(index: usize, total: usize) -> (f64, f64) {
	let phi = (1.0 - 2.0 * (index as f64 + 0.5) / total as f64).acos();
	let theta = PI * (1.0 + 5f64.sqrt()) * index as f64;
	(phi, theta)
}

/// A single droplet on the sphere.
#[derive(Clone, Debug)]
pub struct Particle {
	pub base_phi: f64,
	pub base_theta: f64,
	/// Current angular position, recomputed every frame.
	pub phi: f64,
	pub theta: f64,
	/// Phase into the palette cycle, in `[0, 3)`.
	pub color_offset: f64,
	pub base_size: f64,
	pub base_alpha: f64,
	/// Phase and frequency of the droplet breathing.
	pub radius_offset: f64,
	pub radius_speed: f64,
}

impl Particle {
	pub fn new(index: usize, total: usize, rng: &mut impl Rng) -> Self {
		let (phi, theta) = fibonacci_point(index, total);
		Self {
			base_phi: phi,
			base_theta: theta,
			phi,
			theta,
			color_offset: rng.gen_range(0.0..3.0),
			base_size: rng.gen_range(1.5..4.0),
			base_alpha: rng.gen_range(0.5..1.0),
			radius_offset: rng.gen_range(0.0..TAU),
			radius_speed: rng.gen_range(0.5..2.0),
		}
	}

	/// Builds the full particle set for one orb.
	pub fn sphere(total: usize, rng: &mut impl Rng) -> Vec<Self> {
		(0..total).map(|i| Particle::new(i, total, &mut *rng)).collect()
	}

	/// Moves the particle to its animated position at orb time `time`.
	pub fn update(&mut self, time: f64, motion: &Motion, listening: bool) {
		self.phi = self.base_phi + (time * motion.phi_speed + self.radius_offset).sin() * motion.phi_amp;
		self.theta = if listening {
			self.base_theta
				+ time * motion.theta_speed
				+ (time * 2.5 + self.radius_offset).cos() * motion.theta_amp
		} else {
			self.base_theta + (time * motion.theta_speed + self.color_offset).sin() * motion.theta_amp
		};
	}

	/// Cartesian position on a sphere of the given radius.
	pub fn position(&self, radius: f64) -> (f64, f64, f64) {
		let (sin_phi, cos_phi) = self.phi.sin_cos();
		let (sin_theta, cos_theta) = self.theta.sin_cos();
		(
			radius * sin_phi * cos_theta,
			radius * cos_phi,
			radius * sin_phi * sin_theta,
		)
	}

	/// Radial breathing factor applied to the projected position.
	pub fn drop_effect(&self, time: f64, drop_amp: f64) -> f64 {
		1.0 + (time * self.radius_speed + self.radius_offset).sin() * drop_amp
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::orb::preset::MoodPreset;

	fn unit_points(n: usize) -> Vec<(f64, f64, f64)> {
		(0..n)
			.map(|i| {
				let (phi, theta) = fibonacci_point(i, n);
				(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
			})
			.collect()
	}

	fn nearest_neighbor_distances(points: &[(f64, f64, f64)]) -> Vec<f64> {
		points
			.iter()
			.enumerate()
			.map(|(i, a)| {
				points
					.iter()
					.enumerate()
					.filter(|(j, _)| *j != i)
					.map(|(_, b)| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2) + (a.2 - b.2).powi(2)).sqrt())
					.fold(f64::INFINITY, f64::min)
			})
			.collect()
	}

	#[test]
	fn fibonacci_points_are_spread_evenly() {
		for n in [80, 200, 500] {
			let nn = nearest_neighbor_distances(&unit_points(n));
			let scale = (n as f64).sqrt();
			let min = nn.iter().copied().fold(f64::INFINITY, f64::min);
			let mean = nn.iter().sum::<f64>() / n as f64;

			// Hexagonal packing spacing for n points on the unit sphere.
			let ideal = (8.0 * PI / (3f64.sqrt() * n as f64)).sqrt();

			assert!(min * scale > 3.0, "n={n}: min spacing {min}");
			assert!(mean > ideal * 0.85 && mean <= ideal, "n={n}: mean {mean} vs {ideal}");
		}
	}

	#[test]
	fn fibonacci_phi_spans_pole_to_pole() {
		let n = 200;
		let (first, _) = fibonacci_point(0, n);
		let (last, _) = fibonacci_point(n - 1, n);
		assert!(first > 0.0 && first < 0.2);
		assert!(last < PI && last > PI - 0.2);
	}

	#[test]
	fn random_parameters_stay_in_range() {
		let mut rng = StdRng::seed_from_u64(7);
		for p in Particle::sphere(300, &mut rng) {
			assert!((0.0..3.0).contains(&p.color_offset));
			assert!((1.5..4.0).contains(&p.base_size));
			assert!((0.5..1.0).contains(&p.base_alpha));
			assert!((0.0..TAU).contains(&p.radius_offset));
			assert!((0.5..2.0).contains(&p.radius_speed));
		}
	}

	#[test]
	fn seeded_construction_is_reproducible() {
		let a = Particle::sphere(50, &mut StdRng::seed_from_u64(42));
		let b = Particle::sphere(50, &mut StdRng::seed_from_u64(42));
		for (pa, pb) in a.iter().zip(&b) {
			assert_eq!(pa.color_offset, pb.color_offset);
			assert_eq!(pa.base_size, pb.base_size);
			assert_eq!(pa.radius_speed, pb.radius_speed);
		}
	}

	#[test]
	fn update_at_time_zero_idle_stays_near_base() {
		let mut p = Particle::new(10, 80, &mut StdRng::seed_from_u64(1));
		let motion = MoodPreset::Vibrant.coefficients().idle;
		p.update(0.0, &motion, false);
		assert!((p.phi - p.base_phi).abs() <= motion.phi_amp + 1e-12);
		assert!((p.theta - p.base_theta).abs() <= motion.theta_amp + 1e-12);
	}

	#[test]
	fn listening_theta_drifts_steadily() {
		let mut p = Particle::new(3, 80, &mut StdRng::seed_from_u64(1));
		let motion = MoodPreset::Moderate.coefficients().listening;
		p.update(10.0, &motion, true);
		let drift = p.theta - p.base_theta;
		let expected = 10.0 * motion.theta_speed;
		assert!((drift - expected).abs() <= motion.theta_amp + 1e-12);
	}

	#[test]
	fn position_lies_on_sphere() {
		let mut p = Particle::new(5, 80, &mut StdRng::seed_from_u64(3));
		p.update(2.0, &MoodPreset::Calm.coefficients().idle, false);
		let (x, y, z) = p.position(50.0);
		assert!(((x * x + y * y + z * z).sqrt() - 50.0).abs() < 1e-9);
	}
}
