use glam::Vec3;

use super::Stroke;

/// A single highlighted stroke, drawn on its own render target.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Highlight {
	points: Vec<Vec3>,
}

impl Highlight {
	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	pub fn is_active(&self) -> bool {
		!self.points.is_empty()
	}

	pub fn clear(&mut self) {
		self.points.clear();
	}

	pub fn set(&mut self, stroke: &Stroke) {
		self.points.clear();
		self.points.extend_from_slice(stroke.points());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::StrokeStore;
	use crate::palette::ColorIndex;

	#[test]
	fn copies_and_clears() {
		let mut store = StrokeStore::new();
		store.commit(vec![Vec3::ZERO, Vec3::ONE], ColorIndex(0));
		let mut highlight = Highlight::default();
		assert!(!highlight.is_active());
		highlight.set(store.get(0).unwrap());
		assert_eq!(highlight.points(), &[Vec3::ZERO, Vec3::ONE]);
		// The copy outlives the stroke.
		store.clear_all();
		assert!(highlight.is_active());
		highlight.clear();
		assert!(highlight.points().is_empty());
	}
}
