use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABox {
	min: Vec3,
	max: Vec3,
}

impl AABox {
	pub fn new(min: Vec3, max: Vec3) -> Self {
		Self { min, max }
	}

	pub fn empty() -> Self {
		Self::new(Vec3::MAX, Vec3::MIN)
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
	}

	pub fn min(&self) -> Vec3 {
		self.min
	}

	pub fn max(&self) -> Vec3 {
		self.max
	}

	pub fn expanded_to_contain(self, point: Vec3) -> Self {
		Self::new(self.min.min(point), self.max.max(point))
	}

	pub fn union(self, other: Self) -> Self {
		Self::new(self.min.min(other.min), self.max.max(other.max))
	}

	pub fn containing(points: impl IntoIterator<Item = Vec3>) -> Self {
		points
			.into_iter()
			.fold(Self::empty(), |b, p| b.expanded_to_contain(p))
	}

	/// Inclusive on every face, unlike a half-open raster cell.
	pub fn contains(&self, point: Vec3) -> bool {
		point.cmpge(self.min).all() && point.cmple(self.max).all()
	}
}

impl Default for AABox {
	fn default() -> Self {
		Self::empty()
	}
}

/// The eraser volume. Never stored by the engine; supplied per operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
	pub center: Vec3,
	pub radius: f32,
}

impl Sphere {
	pub fn new(center: Vec3, radius: f32) -> Self {
		Self { center, radius }
	}

	/// Zero, negative and NaN radii describe an empty volume.
	pub fn is_empty(&self) -> bool {
		!(self.radius > 0.0)
	}

	/// Broad phase: rejects on a separating axis along x, y or z.
	pub fn intersects_box(&self, bounds: &AABox) -> bool {
		if self.is_empty() || bounds.is_empty() {
			return false;
		}
		let (c, r) = (self.center, self.radius);
		let (min, max) = (bounds.min, bounds.max);
		!(c.x + r < min.x
			|| c.x - r > max.x
			|| c.y + r < min.y
			|| c.y - r > max.y
			|| c.z + r < min.z
			|| c.z - r > max.z)
	}

	/// Narrow phase against the segment `a..b`.
	pub fn intersects_segment(&self, a: Vec3, b: Vec3) -> bool {
		if self.is_empty() {
			return false;
		}
		let closest = closest_point_on_segment(self.center, a, b);
		closest.distance_squared(self.center) <= self.radius * self.radius
	}
}

/// Clamped projection of `p` onto `a..b`. A zero-length segment is treated as the point `a`.
pub fn closest_point_on_segment(p: Vec3, a: Vec3, b: Vec3) -> Vec3 {
	let ab = b - a;
	let denom = ab.length_squared();
	if denom <= f32::EPSILON * f32::EPSILON {
		return a;
	}
	let t = ((p - a).dot(ab) / denom).clamp(0.0, 1.0);
	a + ab * t
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use glam::vec3;

	#[test]
	fn containing_encapsulates_points() {
		let points = [vec3(1.0, -2.0, 0.5), vec3(-1.0, 3.0, 0.0), vec3(0.0, 0.0, 4.0)];
		let b = AABox::containing(points);
		assert_eq!(b.min(), vec3(-1.0, -2.0, 0.0));
		assert_eq!(b.max(), vec3(1.0, 3.0, 4.0));
		assert!(points.iter().all(|&p| b.contains(p)));
	}

	#[test]
	fn empty_box() {
		let b = AABox::containing(std::iter::empty());
		assert!(b.is_empty());
		assert!(!Sphere::new(Vec3::ZERO, 100.0).intersects_box(&b));
	}

	#[test]
	fn single_point_box_is_not_empty() {
		let b = AABox::containing([Vec3::ONE]);
		assert!(!b.is_empty());
		assert!(b.contains(Vec3::ONE));
	}

	#[test]
	fn sphere_box_separating_axes() {
		let b = AABox::new(Vec3::ZERO, Vec3::ONE);
		assert!(Sphere::new(vec3(0.5, 0.5, 0.5), 0.1).intersects_box(&b));
		assert!(Sphere::new(vec3(1.5, 0.5, 0.5), 0.5).intersects_box(&b));
		assert!(!Sphere::new(vec3(1.5, 0.5, 0.5), 0.4).intersects_box(&b));
		assert!(!Sphere::new(vec3(0.5, -0.6, 0.5), 0.5).intersects_box(&b));
		assert!(!Sphere::new(vec3(0.5, 0.5, 2.0), 0.9).intersects_box(&b));
	}

	#[test]
	fn box_test_is_conservative_at_corners() {
		// The corner region passes the axis tests even though the sphere misses the box.
		let b = AABox::new(Vec3::ZERO, Vec3::ONE);
		let sphere = Sphere::new(vec3(1.4, 1.4, 1.4), 0.5);
		assert!(sphere.intersects_box(&b));
	}

	#[test]
	fn degenerate_radius_never_intersects() {
		let b = AABox::new(Vec3::ZERO, Vec3::ONE);
		for radius in [0.0, -1.0, f32::NAN] {
			let sphere = Sphere::new(vec3(0.5, 0.5, 0.5), radius);
			assert!(!sphere.intersects_box(&b));
			assert!(!sphere.intersects_segment(Vec3::ZERO, Vec3::ONE));
		}
	}

	#[test]
	fn closest_point_clamps_to_endpoints() {
		let a = vec3(0.0, 0.0, 0.0);
		let b = vec3(2.0, 0.0, 0.0);
		assert_eq!(closest_point_on_segment(vec3(-5.0, 1.0, 0.0), a, b), a);
		assert_eq!(closest_point_on_segment(vec3(7.0, 1.0, 0.0), a, b), b);
		let mid = closest_point_on_segment(vec3(0.5, 3.0, -1.0), a, b);
		assert_relative_eq!(mid.x, 0.5);
		assert_relative_eq!(mid.y, 0.0);
	}

	#[test]
	fn zero_length_segment_is_a_point() {
		let p = vec3(1.0, 1.0, 1.0);
		assert_eq!(closest_point_on_segment(Vec3::ZERO, p, p), p);
		assert!(Sphere::new(vec3(1.0, 1.1, 1.0), 0.2).intersects_segment(p, p));
		assert!(!Sphere::new(vec3(1.0, 1.5, 1.0), 0.2).intersects_segment(p, p));
	}

	#[test]
	fn segment_touching_at_radius() {
		let sphere = Sphere::new(vec3(1.0, 1.0, 0.0), 1.0);
		assert!(sphere.intersects_segment(vec3(0.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0)));
		assert!(!sphere.intersects_segment(vec3(0.0, -0.1, 0.0), vec3(2.0, -0.1, 0.0)));
	}
}
