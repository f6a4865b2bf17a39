//! GLSL ES 3.00 programs for the particle point sprites.

/// Position attribute slot, shared by the vertex shader and the VAO setup.
pub const POSITION_LOCATION: u32 = 0;
/// Color attribute slot.
pub const COLOR_LOCATION: u32 = 1;
/// Size attribute slot.
pub const SIZE_LOCATION: u32 = 2;

/// Floats each point drifting on a sine/cosine of the clock and scales its
/// sprite with depth.
pub const VERTEX: &str = r#"#version 300 es
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 color;
layout(location = 2) in float size;

uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;
uniform float time;

out vec3 vColor;

void main() {
	vColor = color;
	vec4 mvPosition = modelViewMatrix * vec4(position, 1.0);

	mvPosition.y += sin(time + position.x * 0.01) * 10.0;
	mvPosition.x += cos(time + position.y * 0.01) * 5.0;

	gl_PointSize = size * (300.0 / -mvPosition.z);
	gl_Position = projectionMatrix * mvPosition;
}
"#;

/// Round sprite with a soft edge at 60% opacity.
pub const FRAGMENT: &str = r#"#version 300 es
precision mediump float;

in vec3 vColor;
out vec4 fragColor;

void main() {
	float r = distance(gl_PointCoord, vec2(0.5, 0.5));
	if (r > 0.5) discard;

	float alpha = 1.0 - smoothstep(0.0, 0.5, r);
	fragColor = vec4(vColor, alpha * 0.6);
}
"#;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn version_directive_comes_first() {
		assert!(VERTEX.starts_with("#version 300 es\n"));
		assert!(FRAGMENT.starts_with("#version 300 es\n"));
	}

	#[test]
	fn attribute_slots_match_layout_qualifiers() {
		for (location, name) in [
			(POSITION_LOCATION, "vec3 position"),
			(COLOR_LOCATION, "vec3 color"),
			(SIZE_LOCATION, "float size"),
		] {
			let decl = format!("layout(location = {location}) in {name};");
			assert!(VERTEX.contains(&decl), "missing `{decl}`");
		}
	}
}
