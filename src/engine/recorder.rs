use glam::Vec3;

use crate::util::DistanceGate;

/// Accumulates the in-flight stroke. Idle until [`Recorder::start_drawing`], and idle again after
/// [`Recorder::stop_drawing`] hands the points over.
#[derive(Debug, Clone)]
pub struct Recorder {
	active: Option<Vec<Vec3>>,
	gate: DistanceGate,
}

impl Recorder {
	pub fn new(min_move_distance: f32) -> Self {
		Self {
			active: None,
			gate: DistanceGate::new(min_move_distance),
		}
	}

	pub fn is_recording(&self) -> bool {
		self.active.is_some()
	}

	/// Points of the stroke being drawn; empty while idle.
	pub fn active_points(&self) -> &[Vec3] {
		self.active.as_deref().unwrap_or_default()
	}

	/// Starts a stroke with two points at `origin` so a segment is renderable right away.
	/// Does nothing without a tip position or while already recording.
	pub fn start_drawing(&mut self, origin: Option<Vec3>) -> bool {
		let Some(origin) = origin else {
			tracing::debug!("no tip position, not drawing");
			return false;
		};
		if self.is_recording() {
			tracing::debug!("already drawing");
			return false;
		}
		self.active = Some(vec![origin, origin]);
		self.gate.reset_to(origin);
		true
	}

	/// Appends `position` if it is farther than the minimum move distance from the last point.
	pub fn record_if_moved(&mut self, position: Vec3) -> bool {
		let Some(points) = self.active.as_mut() else {
			return false;
		};
		if !self.gate.try_pass(position) {
			tracing::trace!(?position, "pen has not moved far enough");
			return false;
		}
		points.push(position);
		true
	}

	/// Finishes the active stroke. Returns its points unless it never reached two.
	pub fn stop_drawing(&mut self) -> Option<Vec<Vec3>> {
		let points = self.active.take()?;
		self.gate.reset();
		(points.len() >= 2).then_some(points)
	}

	/// Drops the active stroke without finishing it.
	pub fn cancel(&mut self) {
		self.active = None;
		self.gate.reset();
	}
}
