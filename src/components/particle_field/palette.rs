//! Particle colors per theme.

use rand::Rng;

use crate::theme::Theme;

/// Linear RGB color with channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: f32,
	/// Green.
	pub g: f32,
	/// Blue.
	pub b: f32,
}

impl Color {
	/// Color from a `0xRRGGBB` literal.
	pub const fn from_hex(hex: u32) -> Self {
		Self {
			r: ((hex >> 16) & 0xff) as f32 / 255.0,
			g: ((hex >> 8) & 0xff) as f32 / 255.0,
			b: (hex & 0xff) as f32 / 255.0,
		}
	}

	/// Channels as `[r, g, b]`.
	pub fn to_array(self) -> [f32; 3] {
		[self.r, self.g, self.b]
	}
}

/// The five colors particles are drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	colors: [Color; 5],
}

/// Greens, blue, purple and amber.
pub const LIGHT_PALETTE: Palette = Palette {
	colors: [
		Color::from_hex(0x16a34a), // Green
		Color::from_hex(0x22c55e), // Light green
		Color::from_hex(0x0ea5e9), // Blue
		Color::from_hex(0x8b5cf6), // Purple
		Color::from_hex(0xf59e0b), // Amber
	],
};

/// Brighter tones that read on a dark background.
pub const DARK_PALETTE: Palette = Palette {
	colors: [
		Color::from_hex(0x10b981), // Emerald
		Color::from_hex(0x06b6d4), // Cyan
		Color::from_hex(0x8b5cf6), // Violet
		Color::from_hex(0xf59e0b), // Amber
		Color::from_hex(0xec4899), // Pink
	],
};

impl Palette {
	/// The palette particles use under `theme`.
	pub fn for_theme(theme: Theme) -> &'static Palette {
		match theme {
			Theme::Light => &LIGHT_PALETTE,
			Theme::Dark => &DARK_PALETTE,
		}
	}

	/// The colors in order.
	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	/// Uniformly random entry.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
		self.colors[rng.gen_range(0..self.colors.len())]
	}

	/// Whether `color` is one of the palette entries.
	pub fn contains(&self, color: Color) -> bool {
		self.colors.contains(&color)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	#[test]
	fn hex_channels_are_normalized() {
		let c = Color::from_hex(0xff8000);
		assert_eq!(c.to_array(), [1.0, 128.0 / 255.0, 0.0]);
	}

	#[test]
	fn themes_select_distinct_palettes() {
		assert_eq!(Palette::for_theme(Theme::Light), &LIGHT_PALETTE);
		assert_eq!(Palette::for_theme(Theme::Dark), &DARK_PALETTE);
		assert!(!LIGHT_PALETTE.contains(Color::from_hex(0xec4899)));
	}

	#[test]
	fn sampling_reaches_every_entry() {
		let mut rng = SmallRng::seed_from_u64(11);
		let mut seen = [false; 5];
		for _ in 0..500 {
			let c = DARK_PALETTE.sample(&mut rng);
			let idx = DARK_PALETTE.colors().iter().position(|p| *p == c).unwrap();
			seen[idx] = true;
		}
		assert!(seen.iter().all(|s| *s));
	}
}
