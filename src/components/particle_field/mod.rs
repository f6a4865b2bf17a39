//! Animated point-cloud background.
//!
//! A fixed set of points scattered in a cube, slowly spinning, nudged by the
//! pointer and drawn as soft round sprites with WebGL2. Colors come from the
//! active theme's palette and are resampled on every theme change.
//!
//! # Example
//!
//! ```ignore
//! let frames = FrameScheduler::new();
//! if let Some(field) = particle_field::init(&FxConfig::default(), &frames, Theme::Light) {
//!     theme_controller.subscribe(Rc::new(field));
//! }
//! ```

mod camera;
mod component;
mod field;
/// Particle colors per theme.
pub mod palette;
mod render;
mod shaders;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub use camera::Camera;
pub use component::ParticleBackground;
pub use field::{FieldMotion, Particle, ParticleCloud, ParticleField};
pub use palette::{Color, Palette};

use crate::config::FxConfig;
use crate::dom;
use crate::frame::FrameScheduler;
use crate::theme::{Theme, ThemeListener};

/// Id of the element the canvas is mounted into.
pub const CONTAINER_ID: &str = "bg-particles";

/// Shared handle to the page's particle field.
#[derive(Clone)]
pub struct ParticleFieldHandle(Rc<RefCell<ParticleField>>);

impl ParticleFieldHandle {
	/// Share `field` between the component and theme listeners.
	pub fn new(field: ParticleField) -> Self {
		Self(Rc::new(RefCell::new(field)))
	}

	/// Borrow the field.
	pub fn borrow(&self) -> Ref<'_, ParticleField> {
		self.0.borrow()
	}

	/// Borrow the field mutably.
	pub fn borrow_mut(&self) -> RefMut<'_, ParticleField> {
		self.0.borrow_mut()
	}
}

impl ThemeListener for ParticleFieldHandle {
	fn theme_changed(&self, theme: Theme) {
		debug!("portfolio-fx: recoloring particles for {} theme", theme);
		self.0.borrow_mut().recolor(theme);
	}
}

/// Mount the particle canvas into `#bg-particles`.
///
/// Returns `None` when the page has no container. The renderer attaches
/// once the canvas is in the document.
pub fn init(config: &FxConfig, frames: &FrameScheduler, theme: Theme) -> Option<ParticleFieldHandle> {
	let container = dom::by_id(CONTAINER_ID)?;
	let (w, h) = dom::viewport_size();
	let field = ParticleField::new(
		config.particle_count,
		theme,
		w as f32,
		h as f32,
		SmallRng::from_entropy(),
	);
	let handle = ParticleFieldHandle::new(field);

	let (field, frames) = (handle.clone(), frames.clone());
	leptos::mount::mount_to(container, move || {
		leptos::view! { <ParticleBackground field=field frames=frames /> }
	})
	.forget();

	Some(handle)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn theme_listener_recolors_field() {
		let field = ParticleField::new(30, Theme::Light, 800.0, 600.0, SmallRng::seed_from_u64(3));
		let handle = ParticleFieldHandle::new(field);
		handle.theme_changed(Theme::Dark);
		let field = handle.borrow();
		assert_eq!(field.theme(), Theme::Dark);
		assert!(
			field
				.cloud()
				.particles()
				.iter()
				.all(|p| palette::DARK_PALETTE.contains(p.color))
		);
	}
}
