//! Point cloud model and per-frame motion for the particle background.

use rand::Rng;
use rand::rngs::SmallRng;

use super::camera::Camera;
use super::palette::{Color, Palette};
use super::render::ParticleRenderer;
use crate::theme::Theme;

/// Points are scattered uniformly in a cube of this edge length.
const SPREAD: f32 = 100.0;
const SIZE_MIN: f32 = 1.0;
const SIZE_RANGE: f32 = 3.0;

/// Constant spin applied every frame (radians).
const SPIN_X: f32 = 0.0005;
const SPIN_Y: f32 = 0.001;
/// Pointer offset per pixel from the viewport centre.
const POINTER_SENSITIVITY: f32 = 0.0005;
/// Share of the pointer offset added to rotation every frame.
const POINTER_ROTATION: f32 = 0.1;
/// Shader clock advance per frame.
const CLOCK_STEP: f32 = 0.01;

/// A single point sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	/// World-space position.
	pub position: [f32; 3],
	/// Palette color.
	pub color: Color,
	/// Point size in pixels before perspective.
	pub size: f32,
}

/// Fixed-size set of particles. Only colors change after construction.
#[derive(Clone, Debug)]
pub struct ParticleCloud {
	particles: Vec<Particle>,
}

impl ParticleCloud {
	/// `count` particles scattered in a cube, colored from `palette`.
	pub fn new<R: Rng + ?Sized>(count: usize, palette: &Palette, rng: &mut R) -> Self {
		let coord = |rng: &mut R| (rng.r#gen::<f32>() - 0.5) * SPREAD;
		let particles = (0..count)
			.map(|_| Particle {
				position: [coord(rng), coord(rng), coord(rng)],
				color: palette.sample(rng),
				size: rng.r#gen::<f32>() * SIZE_RANGE + SIZE_MIN,
			})
			.collect();
		Self { particles }
	}

	/// Give every particle an independently sampled palette color.
	pub fn recolor<R: Rng + ?Sized>(&mut self, palette: &Palette, rng: &mut R) {
		for p in &mut self.particles {
			p.color = palette.sample(rng);
		}
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the cloud has no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// All particles in upload order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Interleaved `xyz` positions for the vertex buffer.
	pub fn positions(&self) -> Vec<f32> {
		self.particles.iter().flat_map(|p| p.position).collect()
	}

	/// Interleaved `rgb` colors for the vertex buffer.
	pub fn colors(&self) -> Vec<f32> {
		self.particles
			.iter()
			.flat_map(|p| p.color.to_array())
			.collect()
	}

	/// Point sizes for the vertex buffer.
	pub fn sizes(&self) -> Vec<f32> {
		self.particles.iter().map(|p| p.size).collect()
	}
}

/// Rotation, pointer influence and the shader clock.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldMotion {
	/// Rotation about the x and y axes (radians).
	pub rotation: [f32; 2],
	/// Last pointer offset from the viewport centre, scaled.
	pub pointer: [f32; 2],
	/// Half the viewport size in pixels.
	pub half_viewport: [f32; 2],
	/// Shader time uniform.
	pub time: f32,
}

impl FieldMotion {
	/// At rest, for a viewport of `width` by `height` pixels.
	pub fn new(width: f32, height: f32) -> Self {
		Self {
			half_viewport: [width / 2.0, height / 2.0],
			..Self::default()
		}
	}

	/// Record the pointer at viewport pixel `(x, y)`. Replaces the previous
	/// offset outright.
	pub fn pointer_moved(&mut self, x: f32, y: f32) {
		self.pointer = [
			(x - self.half_viewport[0]) * POINTER_SENSITIVITY,
			(y - self.half_viewport[1]) * POINTER_SENSITIVITY,
		];
	}

	/// Match a new viewport size.
	pub fn resize(&mut self, width: f32, height: f32) {
		self.half_viewport = [width / 2.0, height / 2.0];
	}

	/// One frame: spin, pointer nudge, clock.
	pub fn advance(&mut self) {
		self.rotation[0] += SPIN_X;
		self.rotation[1] += SPIN_Y;
		self.rotation[0] += self.pointer[1] * POINTER_ROTATION;
		self.rotation[1] += self.pointer[0] * POINTER_ROTATION;
		self.time += CLOCK_STEP;
	}
}

/// Everything the particle background owns: the cloud, its motion, the
/// camera and, once a canvas is attached, the GPU renderer.
pub struct ParticleField {
	cloud: ParticleCloud,
	motion: FieldMotion,
	camera: Camera,
	theme: Theme,
	rng: SmallRng,
	renderer: Option<ParticleRenderer>,
}

impl ParticleField {
	/// A detached field colored for `theme`.
	pub fn new(count: usize, theme: Theme, width: f32, height: f32, mut rng: SmallRng) -> Self {
		let cloud = ParticleCloud::new(count, Palette::for_theme(theme), &mut rng);
		Self {
			cloud,
			motion: FieldMotion::new(width, height),
			camera: Camera::new(width / height.max(1.0)),
			theme,
			rng,
			renderer: None,
		}
	}

	/// The point cloud.
	pub fn cloud(&self) -> &ParticleCloud {
		&self.cloud
	}

	/// Rotation, pointer and clock.
	pub fn motion(&self) -> &FieldMotion {
		&self.motion
	}

	/// The camera.
	pub fn camera(&self) -> &Camera {
		&self.camera
	}

	/// Theme of the current colors.
	pub fn theme(&self) -> Theme {
		self.theme
	}

	/// Whether a renderer has been attached.
	pub fn is_attached(&self) -> bool {
		self.renderer.is_some()
	}

	/// Hand the field a GPU renderer built for its cloud.
	pub fn attach(&mut self, renderer: ParticleRenderer) {
		self.renderer = Some(renderer);
	}

	/// Advance one frame and draw it.
	pub fn tick(&mut self) {
		self.motion.advance();
		if let Some(renderer) = &self.renderer {
			renderer.draw(&self.camera, &self.motion);
		}
	}

	/// Resample every particle's color from `theme`'s palette.
	pub fn recolor(&mut self, theme: Theme) {
		self.theme = theme;
		self.cloud.recolor(Palette::for_theme(theme), &mut self.rng);
		if let Some(renderer) = &self.renderer {
			renderer.upload_colors(&self.cloud);
		}
	}

	/// Record the pointer at viewport pixel `(x, y)`.
	pub fn pointer_moved(&mut self, x: f32, y: f32) {
		self.motion.pointer_moved(x, y);
	}

	/// Match a new viewport size.
	pub fn resize(&mut self, width: f32, height: f32) {
		self.motion.resize(width, height);
		self.camera.set_aspect(width / height.max(1.0));
		if let Some(renderer) = &self.renderer {
			renderer.resize(width, height);
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::super::palette::{DARK_PALETTE, LIGHT_PALETTE};
	use super::*;

	fn field(theme: Theme) -> ParticleField {
		ParticleField::new(100, theme, 1280.0, 720.0, SmallRng::seed_from_u64(42))
	}

	#[test]
	fn cloud_is_built_inside_bounds() {
		let f = field(Theme::Light);
		assert_eq!(f.cloud().len(), 100);
		for p in f.cloud().particles() {
			assert!(p.position.iter().all(|c| (-50.0..50.0).contains(c)));
			assert!((1.0..4.0).contains(&p.size));
			assert!(LIGHT_PALETTE.contains(p.color));
		}
	}

	#[test]
	fn buffers_are_interleaved_per_particle() {
		let f = field(Theme::Light);
		assert_eq!(f.cloud().positions().len(), 300);
		assert_eq!(f.cloud().colors().len(), 300);
		assert_eq!(f.cloud().sizes().len(), 100);
		let first = f.cloud().particles()[0];
		assert_eq!(&f.cloud().colors()[..3], &first.color.to_array());
	}

	#[test]
	fn recolor_draws_only_from_active_palette() {
		let mut f = field(Theme::Light);
		for theme in [Theme::Dark, Theme::Light, Theme::Dark] {
			f.recolor(theme);
			let palette = Palette::for_theme(theme);
			assert!(f.cloud().particles().iter().all(|p| palette.contains(p.color)));
			assert_eq!(f.theme(), theme);
		}
	}

	#[test]
	fn recolor_keeps_count_positions_and_sizes() {
		let mut f = field(Theme::Light);
		let before = f.cloud().clone();
		f.recolor(Theme::Dark);
		assert_eq!(f.cloud().len(), before.len());
		assert_eq!(f.cloud().positions(), before.positions());
		assert_eq!(f.cloud().sizes(), before.sizes());
	}

	#[test]
	fn repeated_recolor_is_a_fresh_sample() {
		let mut f = field(Theme::Dark);
		f.recolor(Theme::Dark);
		let first = f.cloud().colors();
		f.recolor(Theme::Dark);
		assert_ne!(first, f.cloud().colors());
		assert!(f.cloud().particles().iter().all(|p| DARK_PALETTE.contains(p.color)));
	}

	#[test]
	fn tick_spins_and_advances_clock() {
		let mut f = field(Theme::Light);
		f.tick();
		f.tick();
		let m = f.motion();
		assert!((m.rotation[0] - 0.001).abs() < 1e-7);
		assert!((m.rotation[1] - 0.002).abs() < 1e-7);
		assert!((m.time - 0.02).abs() < 1e-7);
	}

	#[test]
	fn pointer_offset_feeds_rotation() {
		let mut motion = FieldMotion::new(1000.0, 800.0);
		motion.pointer_moved(1000.0, 0.0);
		assert!((motion.pointer[0] - 0.25).abs() < 1e-7);
		assert!((motion.pointer[1] + 0.2).abs() < 1e-7);
		motion.advance();
		assert!((motion.rotation[0] - (0.0005 - 0.02)).abs() < 1e-7);
		assert!((motion.rotation[1] - (0.001 + 0.025)).abs() < 1e-7);
	}

	#[test]
	fn pointer_offset_is_replaced_not_smoothed() {
		let mut motion = FieldMotion::new(1000.0, 800.0);
		motion.pointer_moved(0.0, 0.0);
		motion.pointer_moved(500.0, 400.0);
		assert_eq!(motion.pointer, [0.0, 0.0]);
	}

	#[test]
	fn resize_updates_centre_and_aspect() {
		let mut f = field(Theme::Light);
		f.resize(800.0, 800.0);
		assert_eq!(f.motion().half_viewport, [400.0, 400.0]);
		assert_eq!(f.camera().aspect(), 1.0);
	}
}
