//! portfolio-fx: interactive effects for a personal portfolio page.
//!
//! This crate attaches behaviour to existing page markup: a WebGL particle
//! background, a custom cursor, a persisted light/dark theme, typing and
//! counter effects, scroll-driven navigation, reveals and parallax, a
//! portfolio filter and a simulated contact form.

use std::rc::Rc;

use log::{Level, debug, info, warn};

// Pulled in for its `js` feature, which backs `SmallRng::from_entropy` on wasm.
use getrandom as _;

pub mod animations;
pub mod components;
pub mod config;
pub mod contact;
pub mod cursor;
pub mod dom;
pub mod error;
pub mod exports;
pub mod frame;
pub mod konami;
pub mod portfolio;
pub mod preloader;
pub mod reveal;
pub mod scroll;
pub mod theme;
pub mod timing;
pub mod tooltips;
pub mod typing;

pub use components::particle_field::{ParticleBackground, ParticleFieldHandle};
pub use config::FxConfig;
pub use error::FxError;
pub use frame::{FrameControl, FrameScheduler};
pub use theme::{Theme, ThemeController};

use components::particle_field;
use scroll::{nav, parallax, smooth};
use theme::{LocalThemeStore, ThemeListener, ThemeStore};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-fx: logging initialized");
}

fn report(component: &str, result: Result<(), FxError>) {
	if let Err(e) = result {
		warn!("portfolio-fx: {} skipped: {}", component, e);
	}
}

/// Lazy images and the debounced scroll hook.
pub fn optimize_performance() -> Result<(), FxError> {
	reveal::init_lazy_images()?;
	scroll::on_scroll_settled(scroll::SETTLE_MS, |y| {
		debug!("portfolio-fx: scroll settled at {}px", y);
	})
}

/// Wire every component. Each one is independent: a failure is logged and
/// the rest still start. Returns the particle field, if one was mounted.
pub fn initialize_animations(
	config: &FxConfig,
	frames: &FrameScheduler,
) -> Option<ParticleFieldHandle> {
	report("custom cursor", cursor::init(frames));
	report("navigation", nav::init(config.nav_offset));

	let stored_theme = LocalThemeStore::default().load().unwrap_or_default();
	let particles = particle_field::init(config, frames, stored_theme);

	report("typing effect", typing::init(&config.typing_texts));
	report("counters", reveal::init_counters(config));
	report("GSAP animations", animations::init());
	report("skill bars", reveal::init_skill_bars());
	report("portfolio filter", portfolio::init());
	report("contact form", contact::init());
	report(
		"smooth scroll",
		smooth::init(frames, config.header_offset, config.scroll_duration_ms),
	);
	report("parallax", parallax::init());
	report("tech stack", tooltips::init());

	let listeners: Vec<Rc<dyn ThemeListener>> = particles
		.iter()
		.map(|field| Rc::new(field.clone()) as Rc<dyn ThemeListener>)
		.collect();
	report("theme toggle", theme::init(listeners).map(|_| ()));
	report("performance", optimize_performance());
	report("easter eggs", konami::init());

	info!("portfolio-fx: page ready");
	particles
}

/// Load the configuration and start everything behind the preloader.
pub fn boot() {
	let config = FxConfig::load();
	let frames = FrameScheduler::new();
	let ready = {
		let (config, frames) = (config.clone(), frames.clone());
		move || {
			initialize_animations(&config, &frames);
		}
	};
	if let Err(e) = preloader::run(ready) {
		warn!("portfolio-fx: preloader skipped: {}", e);
		initialize_animations(&config, &frames);
	}
}
