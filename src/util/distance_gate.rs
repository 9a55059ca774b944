use glam::Vec3;

/// Lets a sample through only once it is strictly farther than `min_distance` from the last
/// sample that got through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceGate {
	min_distance_squared: f32,
	last: Option<Vec3>,
}

impl DistanceGate {
	pub fn new(min_distance: f32) -> Self {
		Self {
			min_distance_squared: min_distance * min_distance,
			last: None,
		}
	}

	pub fn last(&self) -> Option<Vec3> {
		self.last
	}

	/// Forgets the last sample so the next one always passes.
	pub fn reset(&mut self) {
		self.last = None;
	}

	pub fn reset_to(&mut self, position: Vec3) {
		self.last = Some(position);
	}

	pub fn would_pass(&self, position: Vec3) -> bool {
		self
			.last
			.map_or(true, |last| (position - last).length_squared() > self.min_distance_squared)
	}

	/// Returns whether `position` passed, remembering it if so.
	pub fn try_pass(&mut self, position: Vec3) -> bool {
		let passed = self.would_pass(position);
		if passed {
			self.last = Some(position);
		}
		passed
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::vec3;

	#[test]
	fn first_sample_passes() {
		let mut gate = DistanceGate::new(1.0);
		assert!(gate.try_pass(Vec3::ZERO));
		assert_eq!(gate.last(), Some(Vec3::ZERO));
	}

	#[test]
	fn gates_on_distance_from_last_passed() {
		let mut gate = DistanceGate::new(1.0);
		gate.reset_to(Vec3::ZERO);
		assert!(!gate.try_pass(vec3(0.6, 0.0, 0.0)));
		assert!(!gate.try_pass(vec3(1.0, 0.0, 0.0)));
		assert!(gate.try_pass(vec3(1.1, 0.0, 0.0)));
		assert!(!gate.try_pass(vec3(1.5, 0.0, 0.0)));
		assert!(gate.try_pass(vec3(1.1, 1.1, 0.0)));
	}

	#[test]
	fn reset_reopens_gate() {
		let mut gate = DistanceGate::new(10.0);
		gate.reset_to(Vec3::ZERO);
		assert!(!gate.would_pass(Vec3::ONE));
		gate.reset();
		assert!(gate.try_pass(Vec3::ONE));
	}
}
