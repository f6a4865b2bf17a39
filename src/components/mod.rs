/// WebGL particle background.
pub mod particle_field;
