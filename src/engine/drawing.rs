use std::fmt;

use glam::{Vec3, Vec4};

use super::{erase, EraserUniforms, Highlight, PixelEraseReport, Recorder, RenderBatches, StrokeStore};
use crate::config::EngineConfig;
use crate::geom::Sphere;
use crate::palette::{ColorIndex, Palette};
use crate::util::DistanceGate;

/// Told about every color change, e.g. to tint the pen model or move a palette cursor.
pub type ColorListener = Box<dyn FnMut(ColorIndex, Vec4) + Send>;

/// One drawing surface: the stroke store plus everything derived from or feeding into it.
///
/// Every method finishes its work before returning. Operations that change the store rebuild the
/// render batches afterwards, so readers never see batches built from a half-updated store.
pub struct StrokeEngine {
	config: EngineConfig,
	store: StrokeStore,
	recorder: Recorder,
	batches: RenderBatches,
	highlight: Highlight,
	pixel_gate: DistanceGate,
	uniforms: EraserUniforms,
	color: ColorIndex,
	color_listener: Option<ColorListener>,
}
static_assertions::assert_impl_all!(StrokeEngine: Send);

impl fmt::Debug for StrokeEngine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StrokeEngine")
			.field("strokes", &self.store.len())
			.field("drawing", &self.recorder.is_recording())
			.field("color", &self.color)
			.finish_non_exhaustive()
	}
}

impl Default for StrokeEngine {
	fn default() -> Self {
		Self::new(EngineConfig::default())
	}
}

impl StrokeEngine {
	pub fn new(config: EngineConfig) -> Self {
		let mut batches = RenderBatches::new(config.palette().len(), config.break_point());
		let store = StrokeStore::new();
		batches.rebuild(&store);
		Self {
			store,
			recorder: Recorder::new(config.min_move_distance()),
			batches,
			highlight: Highlight::default(),
			pixel_gate: DistanceGate::new(config.pixel_eraser_min_move_distance()),
			uniforms: EraserUniforms::new(config.eraser_trail_len()),
			color: config.initial_color(),
			color_listener: None,
			config,
		}
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn palette(&self) -> &Palette {
		self.config.palette()
	}

	pub fn store(&self) -> &StrokeStore {
		&self.store
	}

	pub fn batches(&self) -> &RenderBatches {
		&self.batches
	}

	pub fn highlight(&self) -> &Highlight {
		&self.highlight
	}

	pub fn eraser_uniforms(&self) -> &EraserUniforms {
		&self.uniforms
	}

	/// The stroke being drawn, for the current-line renderer.
	pub fn active_stroke(&self) -> &[Vec3] {
		self.recorder.active_points()
	}

	pub fn is_drawing(&self) -> bool {
		self.recorder.is_recording()
	}

	pub fn color(&self) -> ColorIndex {
		self.color
	}

	pub fn color_value(&self) -> Vec4 {
		self.palette().color(self.color)
	}

	/// Installs the color listener and tells it the current color straight away.
	pub fn set_color_listener(&mut self, listener: impl FnMut(ColorIndex, Vec4) + Send + 'static) {
		self.color_listener = Some(Box::new(listener));
		self.notify_color();
	}

	fn notify_color(&mut self) {
		let (color, value) = (self.color, self.color_value());
		if let Some(listener) = self.color_listener.as_mut() {
			listener(color, value);
		}
	}

	/// Selects a color, clamping out-of-range indices into the palette.
	pub fn set_color(&mut self, index: i64) {
		let color = self.palette().clamp(index);
		if color.get() as i64 != index {
			tracing::warn!(index, %color, "color index out of range, clamped");
		}
		self.color = color;
		self.notify_color();
	}

	/// Selects the next color, wrapping around the palette.
	pub fn increment_color(&mut self) {
		self.color = self.palette().next(self.color);
		tracing::debug!(color = %self.color, "color changed");
		self.notify_color();
	}

	fn rebuild(&mut self) {
		if !self.batches.is_current(&self.store) {
			self.batches.rebuild(&self.store);
		}
	}

	pub fn start_drawing(&mut self, tip: Option<Vec3>) -> bool {
		self.recorder.start_drawing(tip)
	}

	pub fn record_if_moved(&mut self, position: Vec3) -> bool {
		self.recorder.record_if_moved(position)
	}

	/// Commits the active stroke under the current color. Returns its store index.
	pub fn stop_drawing(&mut self) -> Option<usize> {
		let points = self.recorder.stop_drawing()?;
		let index = self.store.commit(points, self.color)?;
		self.rebuild();
		Some(index)
	}

	/// Drops the active stroke without committing it.
	pub fn clear_current_stroke(&mut self) {
		self.recorder.cancel();
	}

	/// Removes every stroke, the active stroke and the highlight.
	pub fn clear(&mut self) {
		self.recorder.cancel();
		self.highlight.clear();
		self.store.clear_all();
		self.rebuild();
	}

	/// Whole-stroke erase: removes the first stroke touched by the eraser.
	pub fn erase_at(&mut self, center: Vec3, radius: f32) -> bool {
		let erased = erase::erase_at(&mut self.store, &Sphere::new(center, radius)).is_some();
		if erased {
			self.highlight.clear();
			self.rebuild();
		}
		erased
	}

	/// Clears every stroke if the eraser touches any of them.
	pub fn clear_if_touching(&mut self, center: Vec3, radius: f32) -> bool {
		let cleared = erase::clear_if_touching(&mut self.store, &Sphere::new(center, radius));
		if cleared {
			self.highlight.clear();
			self.rebuild();
		}
		cleared
	}

	/// Highlights the stroke whole-stroke erase would remove, if any.
	pub fn mark_if_touching(&mut self, center: Vec3, radius: f32) -> bool {
		self.highlight.clear();
		let sphere = Sphere::new(center, radius);
		let Some(stroke) = self
			.store
			.first_intersecting(&sphere)
			.and_then(|index| self.store.get(index))
		else {
			return false;
		};
		self.highlight.set(stroke);
		true
	}

	pub fn clear_highlight(&mut self) {
		self.highlight.clear();
	}

	/// Partial erase. The eraser uniforms are refreshed on every call; the strokes themselves are
	/// only re-scanned once the eraser has moved far enough since the last scan.
	pub fn pixel_erase(&mut self, center: Vec3, radius: f32) -> PixelEraseReport {
		self.uniforms.eraser_position = center;
		self.uniforms.erase_radius = radius;
		if !self.pixel_gate.try_pass(center) {
			return PixelEraseReport::default();
		}
		self.uniforms.trail.push(center);

		let sphere = Sphere::new(center, radius);
		let colors = self.batches.touched_colors(&sphere);
		if colors.is_empty() {
			return PixelEraseReport::default();
		}
		let report = erase::pixel_erase(
			&mut self.store,
			&sphere,
			self.config.split_policy(),
			|color| colors.contains(&color),
		);
		if report.changed() {
			self.highlight.clear();
			self.rebuild();
		}
		report
	}

	/// Call when the pixel eraser is put away: the next scan happens wherever it reappears.
	pub fn reset_pixel_eraser(&mut self) {
		self.pixel_gate.reset();
		self.uniforms = EraserUniforms::new(self.config.eraser_trail_len());
	}
}
