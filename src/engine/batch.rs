use glam::Vec3;

use super::StrokeStore;
use crate::geom::{AABox, Sphere};
use crate::palette::ColorIndex;

#[derive(Debug, Default, Clone, PartialEq)]
struct Batch {
	points: Vec<Vec3>,
	bounds: AABox,
}

/// Per-color polylines projected from a [`StrokeStore`].
///
/// Each stroke contributes `[break_point, p0, p1, ..]` to the batch of its color, so a line
/// renderer draws one primitive per color and the jump through the break point separates the
/// strokes. Never edited directly; only [`RenderBatches::rebuild`] writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBatches {
	break_point: Vec3,
	batches: Vec<Batch>,
	revision: Option<u64>,
}
static_assertions::assert_impl_all!(RenderBatches: Send, Sync);

impl RenderBatches {
	pub fn new(color_count: usize, break_point: Vec3) -> Self {
		Self {
			break_point,
			batches: vec![Batch::default(); color_count],
			revision: None,
		}
	}

	pub fn break_point(&self) -> Vec3 {
		self.break_point
	}

	/// Whether the batches reflect the current contents of `store`.
	pub fn is_current(&self, store: &StrokeStore) -> bool {
		self.revision == Some(store.revision())
	}

	pub fn rebuild(&mut self, store: &StrokeStore) {
		for batch in &mut self.batches {
			batch.points.clear();
			batch.bounds = AABox::empty();
		}
		for stroke in store.iter() {
			let Some(batch) = self.batches.get_mut(stroke.color().get()) else {
				tracing::warn!(color = %stroke.color(), "stroke color outside palette, not rendered");
				continue;
			};
			batch.points.reserve(stroke.points().len() + 1);
			batch.points.push(self.break_point);
			batch.points.extend_from_slice(stroke.points());
			batch.bounds = batch.bounds.union(stroke.bounds());
		}
		self.revision = Some(store.revision());
		tracing::debug!(
			strokes = store.len(),
			points = self.batches.iter().map(|b| b.points.len()).sum::<usize>(),
			"rebuilt render batches"
		);
	}

	/// Empty for colors outside the palette.
	pub fn batch(&self, color: ColorIndex) -> &[Vec3] {
		self
			.batches
			.get(color.get())
			.map(|b| b.points.as_slice())
			.unwrap_or_default()
	}

	/// The batch as raw `f32` triples, ready for a vertex buffer.
	pub fn batch_bytes(&self, color: ColorIndex) -> &[u8] {
		bytemuck::cast_slice(self.batch(color))
	}

	/// Bounds of the strokes in a batch, ignoring break points.
	pub fn bounds(&self, color: ColorIndex) -> AABox {
		self
			.batches
			.get(color.get())
			.map_or_else(AABox::empty, |b| b.bounds)
	}

	/// Colors whose batch bounds the sphere may touch.
	pub fn touched_colors(&self, sphere: &Sphere) -> Vec<ColorIndex> {
		self
			.iter_bounds()
			.filter(|(_, bounds)| sphere.intersects_box(bounds))
			.map(|(color, _)| color)
			.collect()
	}

	fn iter_bounds(&self) -> impl Iterator<Item = (ColorIndex, AABox)> + '_ {
		self
			.batches
			.iter()
			.enumerate()
			.map(|(i, b)| (ColorIndex(i), b.bounds))
	}

	pub fn iter(&self) -> impl Iterator<Item = (ColorIndex, &[Vec3])> + '_ {
		self
			.batches
			.iter()
			.enumerate()
			.map(|(i, b)| (ColorIndex(i), b.points.as_slice()))
	}
}
