//! Colors for the particle field.
//!
//! Particles keep a base hue for their whole lifetime and only vary in
//! opacity, so colors are stored as HSL and formatted with a per-frame alpha.

use serde::Deserialize;

/// HSL color without an alpha channel.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Hsl {
	/// Hue in degrees.
	pub h: f64,
	/// Saturation in percent.
	pub s: f64,
	/// Lightness in percent.
	pub l: f64,
}

impl Hsl {
	pub const fn new(h: f64, s: f64, l: f64) -> Self {
		Self { h, s, l }
	}

	/// CSS `hsla()` string with the given opacity.
	pub fn to_css(self, alpha: f64) -> String {
		format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, alpha)
	}
}

/// Base colors particles are drawn from.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Palette {
	pub colors: Vec<Hsl>,
}

impl Palette {
	/// Warm pastel palette used by the gallery page (default)
	pub fn keepsake() -> Self {
		Self {
			colors: vec![
				Hsl::new(344.0, 52.0, 77.0), // Rose gold
				Hsl::new(20.0, 100.0, 88.0), // Peach
				Hsl::new(43.0, 74.0, 52.0),  // Gold
				Hsl::new(30.0, 50.0, 96.0),  // Cream
			],
		}
	}

	pub fn get(&self, index: usize) -> Hsl {
		self.colors[index % self.colors.len()]
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::keepsake()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_carries_alpha() {
		let rose = Palette::keepsake().get(0);
		assert_eq!(rose.to_css(0.5), "hsla(344, 52%, 77%, 0.5)");
	}

	#[test]
	fn palette_index_wraps() {
		let palette = Palette::keepsake();
		assert_eq!(palette.get(palette.len()), palette.get(0));
	}

	#[test]
	fn palette_deserializes_from_plain_list() {
		let palette: Palette = serde_json::from_str(r#"[{ "h": 200, "s": 40, "l": 60 }]"#).unwrap();
		assert_eq!(palette.colors, vec![Hsl::new(200.0, 40.0, 60.0)]);
	}
}
