//! Drivers that turn controller input into engine calls.
//!
//! Positions and times are supplied by the caller; nothing here reads a clock or a device.

use std::time::Duration;

use glam::Vec3;

use crate::engine::{PixelEraseReport, StrokeEngine};

pub const DEFAULT_ERASER_RADIUS: f32 = 0.2;
pub const DEFAULT_MARK_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_PIXEL_ERASER_RADIUS: f32 = 0.1;

/// Empties every surface.
pub fn clear_all_engines(engines: &mut [StrokeEngine]) {
	for engine in engines.iter_mut() {
		engine.clear();
	}
	tracing::debug!(engines = engines.len(), "cleared all surfaces");
}

/// The drawing pen, bound to a single surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
	/// With drawing disabled, pressing the trigger ends any stroke in progress instead.
	pub drawing_enabled: bool,
}

impl Default for Pen {
	fn default() -> Self {
		Self {
			drawing_enabled: true,
		}
	}
}

impl Pen {
	/// Trigger pressed. Returns the committed stroke index when this ends a stroke.
	pub fn use_down(&self, engine: &mut StrokeEngine, tip: Option<Vec3>) -> Option<usize> {
		if self.drawing_enabled {
			engine.start_drawing(tip);
			None
		} else {
			engine.stop_drawing()
		}
	}

	/// Trigger released.
	pub fn use_up(&self, engine: &mut StrokeEngine) -> Option<usize> {
		engine.stop_drawing()
	}

	/// Called every frame with the tip position.
	pub fn update(&self, engine: &mut StrokeEngine, tip: Vec3) -> bool {
		engine.is_drawing() && engine.record_if_moved(tip)
	}

	pub fn cycle_color(&self, engine: &mut StrokeEngine) {
		engine.increment_color();
	}

	pub fn select_color(&self, engine: &mut StrokeEngine, index: i64) {
		engine.set_color(index);
	}
}

/// Whole-stroke eraser. While held it periodically highlights the stroke it would remove.
#[derive(Debug, Clone, bon::Builder)]
pub struct Eraser {
	#[builder(default = DEFAULT_ERASER_RADIUS)]
	radius: f32,
	#[builder(default = DEFAULT_MARK_INTERVAL)]
	mark_interval: Duration,
	/// Pressing the trigger wipes every surface it touches instead of a single stroke.
	#[builder(default)]
	clear_all: bool,
	#[builder(skip)]
	held: bool,
	#[builder(skip)]
	last_mark: Option<Duration>,
	#[builder(skip = true)]
	marks_cleared: bool,
}

impl Default for Eraser {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl Eraser {
	pub fn radius(&self) -> f32 {
		self.radius
	}

	pub fn is_held(&self) -> bool {
		self.held
	}

	pub fn pick_up(&mut self) {
		self.held = true;
	}

	pub fn put_down(&mut self, engines: &mut [StrokeEngine]) {
		self.held = false;
		self.clear_marks(engines);
	}

	fn clear_marks(&mut self, engines: &mut [StrokeEngine]) {
		for engine in engines.iter_mut() {
			engine.clear_highlight();
		}
		self.marks_cleared = true;
	}

	/// Called every frame. `now` is any monotonic time; only differences matter.
	pub fn update(&mut self, engines: &mut [StrokeEngine], position: Vec3, now: Duration) {
		if self.held {
			let due = self
				.last_mark
				.map_or(true, |last| now.saturating_sub(last) > self.mark_interval);
			if due {
				for engine in engines.iter_mut() {
					engine.mark_if_touching(position, self.radius);
				}
				self.last_mark = Some(now);
				self.marks_cleared = false;
			}
		} else if !self.marks_cleared {
			self.clear_marks(engines);
		}
	}

	/// Trigger pressed. Returns how many surfaces changed.
	pub fn use_down(&self, engines: &mut [StrokeEngine], position: Vec3) -> usize {
		let changed = engines
			.iter_mut()
			.map(|engine| {
				if self.clear_all {
					engine.clear_if_touching(position, self.radius)
				} else {
					engine.erase_at(position, self.radius)
				}
			})
			.filter(|&changed| changed)
			.count();
		tracing::debug!(changed, clear_all = self.clear_all, "eraser used");
		changed
	}
}

/// Partial eraser. Cuts segments out of strokes for as long as it is switched on and erasing.
#[derive(Debug, Clone, bon::Builder)]
pub struct PixelEraser {
	#[builder(default = DEFAULT_PIXEL_ERASER_RADIUS)]
	radius: f32,
	#[builder(default)]
	enabled: bool,
	#[builder(skip)]
	erasing: bool,
}

impl Default for PixelEraser {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl PixelEraser {
	pub fn radius(&self) -> f32 {
		self.radius
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	pub fn is_erasing(&self) -> bool {
		self.erasing
	}

	pub fn start_erasing(&mut self) {
		self.erasing = true;
	}

	/// The next scan happens wherever the eraser is when erasing resumes.
	pub fn stop_erasing(&mut self, engines: &mut [StrokeEngine]) {
		if !std::mem::take(&mut self.erasing) {
			return;
		}
		for engine in engines.iter_mut() {
			engine.reset_pixel_eraser();
		}
	}

	pub fn put_down(&mut self, engines: &mut [StrokeEngine]) {
		self.stop_erasing(engines);
	}

	/// Called every frame.
	pub fn update(&mut self, engines: &mut [StrokeEngine], position: Vec3) -> PixelEraseReport {
		let mut report = PixelEraseReport::default();
		if !(self.enabled && self.erasing) {
			return report;
		}
		for engine in engines.iter_mut() {
			report += engine.pixel_erase(position, self.radius);
		}
		report
	}
}
