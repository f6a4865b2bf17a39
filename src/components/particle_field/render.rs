//! WebGL2 renderer for the particle field.
//!
//! Owns the program, one VAO and three vertex buffers (position, color,
//! size). Positions and sizes are uploaded once; colors are rewritten on
//! every recolor.

use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
	HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
	WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::camera::Camera;
use super::field::{FieldMotion, ParticleCloud};
use super::shaders;
use crate::error::FxError;

#[derive(Default)]
struct Uniforms {
	model_view: Option<WebGlUniformLocation>,
	projection: Option<WebGlUniformLocation>,
	time: Option<WebGlUniformLocation>,
}

/// WebGL2 program, VAO and buffers drawing a particle cloud as points.
pub struct ParticleRenderer {
	canvas: HtmlCanvasElement,
	gl: GL,
	program: WebGlProgram,
	vao: WebGlVertexArrayObject,
	color_buffer: WebGlBuffer,
	_position_buffer: WebGlBuffer,
	_size_buffer: WebGlBuffer,
	uniforms: Uniforms,
	count: i32,
}

impl ParticleRenderer {
	/// Build the pipeline on `canvas` and upload `cloud`. Fails when the
	/// browser has no WebGL2 or a shader does not compile.
	pub fn new(canvas: HtmlCanvasElement, cloud: &ParticleCloud) -> Result<Self, FxError> {
		let gl: GL = canvas
			.get_context_with_context_options("webgl2", &context_options())?
			.ok_or_else(|| FxError::WebGl("WebGL2 not supported".into()))?
			.dyn_into()
			.map_err(|_| FxError::WebGl("unexpected context type".into()))?;

		gl.enable(GL::BLEND);
		gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
		gl.disable(GL::DEPTH_TEST);
		gl.clear_color(0.0, 0.0, 0.0, 0.0);

		let program = link_program(&gl, shaders::VERTEX, shaders::FRAGMENT)?;
		let vao = gl
			.create_vertex_array()
			.ok_or_else(|| FxError::WebGl("failed to create VAO".into()))?;
		gl.bind_vertex_array(Some(&vao));

		let position_buffer = upload_attribute(
			&gl,
			shaders::POSITION_LOCATION,
			3,
			&cloud.positions(),
			GL::STATIC_DRAW,
		)?;
		let color_buffer = upload_attribute(
			&gl,
			shaders::COLOR_LOCATION,
			3,
			&cloud.colors(),
			GL::DYNAMIC_DRAW,
		)?;
		let size_buffer =
			upload_attribute(&gl, shaders::SIZE_LOCATION, 1, &cloud.sizes(), GL::STATIC_DRAW)?;
		gl.bind_vertex_array(None);

		let uniforms = Uniforms {
			model_view: gl.get_uniform_location(&program, "modelViewMatrix"),
			projection: gl.get_uniform_location(&program, "projectionMatrix"),
			time: gl.get_uniform_location(&program, "time"),
		};

		Ok(Self {
			canvas,
			gl,
			program,
			vao,
			color_buffer,
			_position_buffer: position_buffer,
			_size_buffer: size_buffer,
			uniforms,
			count: cloud.len() as i32,
		})
	}

	/// Rewrite the color buffer from `cloud`.
	pub fn upload_colors(&self, cloud: &ParticleCloud) {
		let data = Float32Array::from(cloud.colors().as_slice());
		self.gl
			.bind_buffer(GL::ARRAY_BUFFER, Some(&self.color_buffer));
		self.gl
			.buffer_sub_data_with_i32_and_array_buffer_view(GL::ARRAY_BUFFER, 0, &data);
		self.gl.bind_buffer(GL::ARRAY_BUFFER, None);
	}

	/// Size the drawing buffer for a `width` x `height` CSS-pixel viewport.
	pub fn resize(&self, width: f32, height: f32) {
		let ratio = web_sys::window()
			.map(|w| w.device_pixel_ratio())
			.unwrap_or(1.0) as f32;
		let (w, h) = ((width * ratio) as u32, (height * ratio) as u32);
		self.canvas.set_width(w);
		self.canvas.set_height(h);
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{width}px"));
		let _ = style.set_property("height", &format!("{height}px"));
		self.gl.viewport(0, 0, w as i32, h as i32);
	}

	/// Clear and draw one frame.
	pub fn draw(&self, camera: &Camera, motion: &FieldMotion) {
		let gl = &self.gl;
		gl.clear(GL::COLOR_BUFFER_BIT);
		gl.use_program(Some(&self.program));
		gl.uniform_matrix4fv_with_f32_array(
			self.uniforms.model_view.as_ref(),
			false,
			&camera.model_view(motion.rotation),
		);
		gl.uniform_matrix4fv_with_f32_array(
			self.uniforms.projection.as_ref(),
			false,
			&camera.projection(),
		);
		gl.uniform1f(self.uniforms.time.as_ref(), motion.time);
		gl.bind_vertex_array(Some(&self.vao));
		gl.draw_arrays(GL::POINTS, 0, self.count);
		gl.bind_vertex_array(None);
	}
}

fn context_options() -> js_sys::Object {
	let options = js_sys::Object::new();
	let _ = js_sys::Reflect::set(&options, &"alpha".into(), &true.into());
	let _ = js_sys::Reflect::set(&options, &"antialias".into(), &true.into());
	let _ = js_sys::Reflect::set(&options, &"premultipliedAlpha".into(), &false.into());
	options
}

fn upload_attribute(
	gl: &GL,
	location: u32,
	components: i32,
	data: &[f32],
	usage: u32,
) -> Result<WebGlBuffer, FxError> {
	let buffer = gl
		.create_buffer()
		.ok_or_else(|| FxError::WebGl("failed to create buffer".into()))?;
	gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
	gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &Float32Array::from(data), usage);
	gl.vertex_attrib_pointer_with_i32(location, components, GL::FLOAT, false, 0, 0);
	gl.enable_vertex_attrib_array(location);
	Ok(buffer)
}

fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram, FxError> {
	let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
	let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;
	let program = gl
		.create_program()
		.ok_or_else(|| FxError::WebGl("failed to create program".into()))?;
	gl.attach_shader(&program, &vertex);
	gl.attach_shader(&program, &fragment);
	gl.link_program(&program);

	let linked = gl
		.get_program_parameter(&program, GL::LINK_STATUS)
		.as_bool()
		.unwrap_or(false);
	gl.delete_shader(Some(&vertex));
	gl.delete_shader(Some(&fragment));
	if linked {
		Ok(program)
	} else {
		let info = gl
			.get_program_info_log(&program)
			.unwrap_or_else(|| "unknown link error".into());
		Err(FxError::WebGl(format!("failed to link program: {info}")))
	}
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, FxError> {
	let shader = gl
		.create_shader(kind)
		.ok_or_else(|| FxError::WebGl("failed to create shader".into()))?;
	gl.shader_source(&shader, source);
	gl.compile_shader(&shader);
	if gl
		.get_shader_parameter(&shader, GL::COMPILE_STATUS)
		.as_bool()
		.unwrap_or(false)
	{
		Ok(shader)
	} else {
		let info = gl
			.get_shader_info_log(&shader)
			.unwrap_or_else(|| "unknown compile error".into());
		Err(FxError::WebGl(format!("failed to compile shader: {info}")))
	}
}
