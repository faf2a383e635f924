//! Visual theming for the particle field.
//!
//! A particle's color is never stored as a finished value alone: it is derived
//! from the active [`ThemeMode`]'s [`Palette`], a per-particle `shade` jitter and
//! a per-particle alpha. Switching themes re-derives colors from the same inputs,
//! so a particle keeps its place within the palette band instead of rolling new
//! random hues.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// The two supported site themes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	#[default]
	/// Light page, teal particles.
	Light,
	/// Dark page, violet particles.
	Dark,
}

impl ThemeMode {
	/// The other mode.
	pub fn toggle(self) -> Self {
		match self {
			ThemeMode::Light => ThemeMode::Dark,
			ThemeMode::Dark => ThemeMode::Light,
		}
	}

	/// Class name used on the document root (`light` / `dark`).
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Light => "light",
			ThemeMode::Dark => "dark",
		}
	}

	/// Pick the mode out of a whitespace-separated class list.
	/// `dark` wins if both are present; neither means the default.
	pub fn from_class_list(classes: &str) -> Self {
		if classes.split_whitespace().any(|c| c == "dark") {
			ThemeMode::Dark
		} else {
			ThemeMode::Light
		}
	}

	/// Palette used for this mode.
	pub fn palette(self) -> Palette {
		match self {
			ThemeMode::Light => Palette::teal(),
			ThemeMode::Dark => Palette::violet(),
		}
	}
}

/// Inclusive-exclusive channel band `[min, min + span)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelRange {
	/// Lowest channel value.
	pub min: f64,
	/// Width of the band.
	pub span: f64,
}

impl ChannelRange {
	/// Band from `min` covering `span` values.
	pub const fn new(min: f64, span: f64) -> Self {
		Self { min, span }
	}

	fn sample(self, t: f64) -> u8 {
		(self.min + t.clamp(0.0, 1.0) * self.span).clamp(0.0, 255.0) as u8
	}
}

/// Hue family for one theme mode.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	/// Red channel band.
	pub red: ChannelRange,
	/// Green channel band.
	pub green: ChannelRange,
	/// Blue channel band.
	pub blue: ChannelRange,
	/// Color of the connecting lines; alpha is computed per link.
	pub link: Color,
}

impl Palette {
	/// Purple variants used on dark backgrounds.
	pub fn violet() -> Self {
		Self {
			red: ChannelRange::new(100.0, 50.0),
			green: ChannelRange::new(30.0, 30.0),
			blue: ChannelRange::new(220.0, 35.0),
			link: Color::rgb(130, 70, 235),
		}
	}

	/// Teal variants used on light backgrounds.
	pub fn teal() -> Self {
		Self {
			red: ChannelRange::new(20.0, 40.0),
			green: ChannelRange::new(150.0, 50.0),
			blue: ChannelRange::new(160.0, 50.0),
			link: Color::rgb(30, 160, 170),
		}
	}

	/// Derive a particle color from its per-channel shade and alpha.
	pub fn particle_color(&self, shade: [f64; 3], alpha: f64) -> Color {
		Color::rgba(
			self.red.sample(shade[0]),
			self.green.sample(shade[1]),
			self.blue.sample(shade[2]),
			alpha,
		)
	}

	/// Link color at the given opacity.
	pub fn link_color(&self, alpha: f64) -> Color {
		self.link.with_alpha(alpha)
	}
}
