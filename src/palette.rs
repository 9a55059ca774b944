use std::sync::Arc;

use glam::{vec4, Vec4};
use thiserror::Error;

/// Index into a [`Palette`]. Strokes and render batches are partitioned by it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("color {_0}")]
pub struct ColorIndex(pub usize);

impl ColorIndex {
	pub fn get(self) -> usize {
		self.0
	}
}

#[derive(Debug, Error)]
pub enum PaletteError {
	#[error("palette must contain at least one color")]
	Empty,
	#[error("invalid color {input:?}")]
	InvalidColor {
		input: String,
		#[source]
		source: csscolorparser::ParseColorError,
	},
}
static_assertions::assert_impl_all!(PaletteError: std::error::Error, Send, Sync);

/// A fixed, ordered list of RGBA colors.
///
/// Palettes are immutable once built and cheap to clone, so independent engines can share one
/// or each carry their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
	colors: Arc<[Vec4]>,
}

impl Palette {
	pub fn new(colors: impl IntoIterator<Item = Vec4>) -> Result<Self, PaletteError> {
		let colors: Arc<[Vec4]> = colors.into_iter().collect();
		if colors.is_empty() {
			return Err(PaletteError::Empty);
		}
		Ok(Self { colors })
	}

	/// Builds a palette from CSS color strings such as `"#ff8800"` or `"rebeccapurple"`.
	pub fn parse<S: AsRef<str>>(css: impl IntoIterator<Item = S>) -> Result<Self, PaletteError> {
		let colors = css
			.into_iter()
			.map(|s| {
				let s = s.as_ref();
				csscolorparser::parse(s)
					.map(|c| vec4(c.r as f32, c.g as f32, c.b as f32, c.a as f32))
					.map_err(|source| PaletteError::InvalidColor {
						input: s.to_owned(),
						source,
					})
			})
			.collect::<Result<Vec<_>, _>>()?;
		Self::new(colors)
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	pub fn colors(&self) -> &[Vec4] {
		&self.colors
	}

	/// Returns the color for `index`, clamping out-of-range indices to the last entry.
	pub fn color(&self, index: ColorIndex) -> Vec4 {
		self.colors[index.0.min(self.len() - 1)]
	}

	/// Clamps any caller-supplied index into `0..len`.
	pub fn clamp(&self, index: i64) -> ColorIndex {
		let last = self.len() as i64 - 1;
		ColorIndex(index.clamp(0, last) as usize)
	}

	/// The next index, wrapping to the first color after the last.
	pub fn next(&self, index: ColorIndex) -> ColorIndex {
		ColorIndex((index.0 + 1) % self.len())
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			colors: Arc::new([
				Vec4::ONE,
				vec4(1.0, 0.0, 0.0, 1.0),
				vec4(0.0, 1.0, 0.0, 1.0),
				vec4(0.0, 0.0, 1.0, 1.0),
				vec4(1.0, 1.0, 0.0, 1.0),
				vec4(0.0, 0.0, 0.0, 1.0),
			]),
		}
	}
}
