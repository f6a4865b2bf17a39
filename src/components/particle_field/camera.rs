//! Perspective camera and model-view math for the particle field.
//!
//! Matrices are column-major `[f32; 16]`, ready for `uniformMatrix4fv`.

/// Vertical field of view in degrees.
const FOV_Y_DEG: f32 = 75.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;
/// Camera sits on the +z axis looking at the origin.
const DISTANCE: f32 = 50.0;

/// Perspective camera looking down the z axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	aspect: f32,
}

impl Camera {
	/// Camera for a viewport with the given aspect ratio.
	pub fn new(aspect: f32) -> Self {
		Self { aspect }
	}

	/// Width over height.
	pub fn aspect(&self) -> f32 {
		self.aspect
	}

	/// Follow a viewport resize.
	pub fn set_aspect(&mut self, aspect: f32) {
		self.aspect = aspect;
	}

	/// Projection matrix for the current aspect.
	#[rustfmt::skip]
	pub fn projection(&self) -> [f32; 16] {
		let f = 1.0 / (FOV_Y_DEG.to_radians() / 2.0).tan();
		let range_inv = 1.0 / (NEAR - FAR);
		[
			f / self.aspect, 0.0, 0.0, 0.0,
			0.0, f, 0.0, 0.0,
			0.0, 0.0, (NEAR + FAR) * range_inv, -1.0,
			0.0, 0.0, 2.0 * NEAR * FAR * range_inv, 0.0,
		]
	}

	/// View translation times the field's rotation (x then y, intrinsic).
	#[rustfmt::skip]
	pub fn model_view(&self, rotation: [f32; 2]) -> [f32; 16] {
		let (sa, ca) = rotation[0].sin_cos();
		let (sb, cb) = rotation[1].sin_cos();
		[
			cb, sa * sb, -ca * sb, 0.0,
			0.0, ca, sa, 0.0,
			sb, -sa * cb, ca * cb, 0.0,
			0.0, 0.0, -DISTANCE, 1.0,
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// `m * v` for a column-major matrix.
	fn transform(m: &[f32; 16], v: [f32; 4]) -> [f32; 4] {
		let mut out = [0.0; 4];
		for (row, slot) in out.iter_mut().enumerate() {
			*slot = (0..4).map(|col| m[col * 4 + row] * v[col]).sum();
		}
		out
	}

	fn ndc(camera: &Camera, rotation: [f32; 2], point: [f32; 3]) -> [f32; 3] {
		let view = transform(&camera.model_view(rotation), [point[0], point[1], point[2], 1.0]);
		let clip = transform(&camera.projection(), view);
		[clip[0] / clip[3], clip[1] / clip[3], clip[2] / clip[3]]
	}

	#[test]
	fn origin_projects_to_screen_centre() {
		let p = ndc(&Camera::new(16.0 / 9.0), [0.3, 1.2], [0.0, 0.0, 0.0]);
		assert!(p[0].abs() < 1e-6 && p[1].abs() < 1e-6);
		assert!(p[2] > -1.0 && p[2] < 1.0);
	}

	#[test]
	fn origin_sits_at_camera_distance() {
		let view = transform(&Camera::new(1.0).model_view([0.0, 0.0]), [0.0, 0.0, 0.0, 1.0]);
		assert_eq!(view, [0.0, 0.0, -50.0, 1.0]);
	}

	#[test]
	fn wider_aspect_compresses_x_only() {
		let point = [10.0, 10.0, 0.0];
		let square = ndc(&Camera::new(1.0), [0.0, 0.0], point);
		let wide = ndc(&Camera::new(2.0), [0.0, 0.0], point);
		assert!((wide[0] - square[0] / 2.0).abs() < 1e-6);
		assert!((wide[1] - square[1]).abs() < 1e-6);
	}

	#[test]
	fn rotation_preserves_distance_from_origin() {
		let mv = Camera::new(1.0).model_view([0.7, -1.9]);
		let v = transform(&mv, [3.0, -4.0, 12.0, 1.0]);
		let (x, y, z) = (v[0], v[1], v[2] + 50.0);
		assert!(((x * x + y * y + z * z).sqrt() - 13.0).abs() < 1e-4);
	}

	#[test]
	fn yaw_turns_x_axis_away_from_camera() {
		let mv = Camera::new(1.0).model_view([0.0, std::f32::consts::FRAC_PI_2]);
		let v = transform(&mv, [1.0, 0.0, 0.0, 1.0]);
		assert!(v[0].abs() < 1e-6);
		assert!((v[2] - (-51.0)).abs() < 1e-5);
	}
}
