use glam::Vec3;
use itertools::Itertools;

use crate::geom::{AABox, Sphere};
use crate::palette::ColorIndex;

/// A completed polyline. Always holds at least two points while it lives in a [`StrokeStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
	points: Vec<Vec3>,
	color: ColorIndex,
	bounds: AABox,
}

impl Stroke {
	fn new(points: Vec<Vec3>, color: ColorIndex) -> Option<Self> {
		if points.len() < 2 {
			return None;
		}
		let bounds = AABox::containing(points.iter().copied());
		Some(Self {
			points,
			color,
			bounds,
		})
	}

	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	pub fn color(&self) -> ColorIndex {
		self.color
	}

	pub fn bounds(&self) -> AABox {
		self.bounds
	}

	pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
		self.points.iter().copied().tuple_windows()
	}

	/// Broad phase against the cached bounds, then every segment.
	pub fn intersects(&self, sphere: &Sphere) -> bool {
		sphere.intersects_box(&self.bounds)
			&& self
				.segments()
				.any(|(a, b)| sphere.intersects_segment(a, b))
	}
}

/// The authoritative, densely indexed collection of completed strokes, in creation order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StrokeStore {
	strokes: Vec<Stroke>,
	revision: u64,
}
static_assertions::assert_impl_all!(StrokeStore: Send, Sync);

impl StrokeStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.strokes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.strokes.is_empty()
	}

	/// Bumped on every structural mutation.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn get(&self, index: usize) -> Option<&Stroke> {
		self.strokes.get(index)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Stroke> + '_ {
		self.strokes.iter()
	}

	pub fn color_of(&self, index: usize) -> Option<ColorIndex> {
		self.get(index).map(Stroke::color)
	}

	pub fn points_of(&self, index: usize) -> Option<&[Vec3]> {
		self.get(index).map(Stroke::points)
	}

	pub fn bounds_of(&self, index: usize) -> Option<AABox> {
		self.get(index).map(Stroke::bounds)
	}

	fn touch(&mut self) {
		self.revision = self.revision.wrapping_add(1);
	}

	/// Appends a stroke, returning its index. Fewer than two points are discarded.
	pub fn commit(&mut self, points: Vec<Vec3>, color: ColorIndex) -> Option<usize> {
		let point_count = points.len();
		let Some(stroke) = Stroke::new(points, color) else {
			tracing::debug!(point_count, "discarding degenerate stroke");
			return None;
		};
		self.strokes.push(stroke);
		self.touch();
		let index = self.strokes.len() - 1;
		tracing::debug!(index, point_count, %color, "committed stroke");
		Some(index)
	}

	/// Removes the stroke at `index`, shifting later strokes down by one.
	pub fn remove(&mut self, index: usize) -> Option<Stroke> {
		if index >= self.strokes.len() {
			return None;
		}
		let stroke = self.strokes.remove(index);
		self.touch();
		tracing::debug!(index, color = %stroke.color, "removed stroke");
		Some(stroke)
	}

	/// Replaces the points of the stroke at `index`. A replacement with fewer than two points
	/// removes the stroke instead. Returns whether the stroke is still present.
	pub fn replace_points(&mut self, index: usize, points: Vec<Vec3>) -> bool {
		self.splice_runs(index, [points]) > 0
	}

	/// Replaces the stroke at `index` with one stroke per run, in order and with the same color.
	/// Runs with fewer than two points are dropped. Returns how many strokes now occupy the slot;
	/// zero means the stroke was removed.
	pub fn splice_runs(&mut self, index: usize, runs: impl IntoIterator<Item = Vec<Vec3>>) -> usize {
		let Some(color) = self.color_of(index) else {
			return 0;
		};
		let replacements = runs
			.into_iter()
			.filter_map(|run| Stroke::new(run, color))
			.collect_vec();
		let count = replacements.len();
		self.strokes.splice(index..=index, replacements);
		self.touch();
		tracing::debug!(index, count, %color, "replaced stroke points");
		count
	}

	pub fn clear_all(&mut self) {
		if self.strokes.is_empty() {
			return;
		}
		tracing::debug!(count = self.strokes.len(), "clearing strokes");
		self.strokes.clear();
		self.touch();
	}

	/// Index of the first stroke, in store order, with a segment inside `sphere`.
	pub fn first_intersecting(&self, sphere: &Sphere) -> Option<usize> {
		self.strokes.iter().position(|stroke| stroke.intersects(sphere))
	}
}
