use bon::bon;
use glam::Vec3;
use thiserror::Error;

use crate::palette::{ColorIndex, Palette, PaletteError};

/// Reserved coordinate inserted before every stroke in a render batch.
pub const DEFAULT_BREAK_POINT: Vec3 = Vec3::new(0.0, -10_000.0, 0.0);
pub const DEFAULT_MIN_MOVE_DISTANCE: f32 = 0.001;
pub const DEFAULT_PIXEL_ERASER_MIN_MOVE_DISTANCE: f32 = 0.1;
pub const DEFAULT_ERASER_TRAIL_LEN: usize = 25;

/// What partial erase does with a stroke that the eraser cut in more than one place.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SplitPolicy {
	/// Every contiguous surviving run becomes its own stroke.
	#[default]
	Split,
	/// Toggle-removal: walking the segments, each touched segment flips a "removing" flag and
	/// points are kept only while it is clear. Lossy; a cut stroke keeps a single entry.
	Truncate,
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("{name} must be finite and positive, got {value}")]
	InvalidDistance { name: &'static str, value: f32 },
	#[error("eraser trail must hold at least one point")]
	EmptyTrail,
	#[error("break point must be finite")]
	InvalidBreakPoint,
	#[error(transparent)]
	Palette(#[from] PaletteError),
}
static_assertions::assert_impl_all!(ConfigError: std::error::Error, Send, Sync);

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
	pub(crate) palette: Palette,
	pub(crate) min_move_distance: f32,
	pub(crate) pixel_eraser_min_move_distance: f32,
	pub(crate) break_point: Vec3,
	pub(crate) eraser_trail_len: usize,
	pub(crate) split_policy: SplitPolicy,
	pub(crate) initial_color: ColorIndex,
}

fn check_distance(name: &'static str, value: f32) -> Result<f32, ConfigError> {
	if value.is_finite() && value > 0.0 {
		Ok(value)
	} else {
		Err(ConfigError::InvalidDistance { name, value })
	}
}

#[bon]
impl EngineConfig {
	#[builder]
	pub fn new(
		#[builder(default)] palette: Palette,
		#[builder(default = DEFAULT_MIN_MOVE_DISTANCE)] min_move_distance: f32,
		#[builder(default = DEFAULT_PIXEL_ERASER_MIN_MOVE_DISTANCE)]
		pixel_eraser_min_move_distance: f32,
		#[builder(default = DEFAULT_BREAK_POINT)] break_point: Vec3,
		#[builder(default = DEFAULT_ERASER_TRAIL_LEN)] eraser_trail_len: usize,
		#[builder(default)] split_policy: SplitPolicy,
		#[builder(default)] initial_color: ColorIndex,
	) -> Result<Self, ConfigError> {
		let min_move_distance = check_distance("min_move_distance", min_move_distance)?;
		let pixel_eraser_min_move_distance = check_distance(
			"pixel_eraser_min_move_distance",
			pixel_eraser_min_move_distance,
		)?;
		if eraser_trail_len == 0 {
			return Err(ConfigError::EmptyTrail);
		}
		if !break_point.is_finite() {
			return Err(ConfigError::InvalidBreakPoint);
		}
		let initial_color = ColorIndex(initial_color.get().min(palette.len() - 1));
		Ok(Self {
			palette,
			min_move_distance,
			pixel_eraser_min_move_distance,
			break_point,
			eraser_trail_len,
			split_policy,
			initial_color,
		})
	}

	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	pub fn min_move_distance(&self) -> f32 {
		self.min_move_distance
	}

	pub fn pixel_eraser_min_move_distance(&self) -> f32 {
		self.pixel_eraser_min_move_distance
	}

	pub fn break_point(&self) -> Vec3 {
		self.break_point
	}

	pub fn eraser_trail_len(&self) -> usize {
		self.eraser_trail_len
	}

	pub fn split_policy(&self) -> SplitPolicy {
		self.split_policy
	}

	pub fn initial_color(&self) -> ColorIndex {
		self.initial_color
	}
}

impl EngineConfig {
	/// Default settings over a palette given as CSS color strings.
	pub fn from_css_palette<S: AsRef<str>>(
		css: impl IntoIterator<Item = S>,
	) -> Result<Self, ConfigError> {
		Self::builder().palette(Palette::parse(css)?).build()
	}
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			palette: Palette::default(),
			min_move_distance: DEFAULT_MIN_MOVE_DISTANCE,
			pixel_eraser_min_move_distance: DEFAULT_PIXEL_ERASER_MIN_MOVE_DISTANCE,
			break_point: DEFAULT_BREAK_POINT,
			eraser_trail_len: DEFAULT_ERASER_TRAIL_LEN,
			split_policy: SplitPolicy::default(),
			initial_color: ColorIndex::default(),
		}
	}
}
