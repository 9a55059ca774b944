use glam::{Vec3, Vec4};

/// Recent pixel-eraser positions, kept in a fixed-size ring so a line material can mask out the
/// erased region before the stroke data catches up. Unused slots hold `+inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct EraserTrail {
	points: Vec<Vec4>,
	next: usize,
}

impl EraserTrail {
	pub fn new(len: usize) -> Self {
		Self {
			points: vec![Vec4::INFINITY; len.max(1)],
			next: 0,
		}
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Overwrites the oldest slot once the ring is full.
	pub fn push(&mut self, position: Vec3) {
		self.points[self.next] = position.extend(0.0);
		self.next = (self.next + 1) % self.points.len();
	}

	pub fn clear(&mut self) {
		self.points.fill(Vec4::INFINITY);
		self.next = 0;
	}

	pub fn points(&self) -> &[Vec4] {
		&self.points
	}
}

/// Parameters handed to the line material while the pixel eraser is in use.
#[derive(Debug, Clone, PartialEq)]
pub struct EraserUniforms {
	pub eraser_position: Vec3,
	pub erase_radius: f32,
	pub trail: EraserTrail,
}

impl EraserUniforms {
	pub fn new(trail_len: usize) -> Self {
		Self {
			eraser_position: Vec3::INFINITY,
			erase_radius: 0.0,
			trail: EraserTrail::new(trail_len),
		}
	}

	/// The trail as tightly packed `vec4<f32>`s.
	pub fn trail_bytes(&self) -> &[u8] {
		bytemuck::cast_slice(self.trail.points())
	}
}
