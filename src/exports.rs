//! JavaScript entry points, one per component, for pages that start the
//! effects themselves instead of running the bundled binary.
//!
//! Calls share one frame loop and one configuration, and a particle field
//! started with `initParticles` is recolored by a later `initThemeToggle`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::components::particle_field::{self, ParticleFieldHandle};
use crate::config::FxConfig;
use crate::frame::FrameScheduler;
use crate::scroll::{nav, parallax, smooth};
use crate::theme::{self, LocalThemeStore, ThemeListener, ThemeStore};
use crate::{animations, contact, cursor, konami, portfolio, reveal, tooltips, typing};

thread_local! {
	static FRAMES: FrameScheduler = FrameScheduler::new();
	static CONFIG: FxConfig = FxConfig::load();
	static PARTICLES: RefCell<Option<ParticleFieldHandle>> = const { RefCell::new(None) };
}

fn frames() -> FrameScheduler {
	FRAMES.with(FrameScheduler::clone)
}

fn config() -> FxConfig {
	CONFIG.with(FxConfig::clone)
}

/// Start every component, as the bundled binary does after the preloader.
#[wasm_bindgen(js_name = initializeAnimations)]
pub fn initialize_animations() {
	let particles = crate::initialize_animations(&config(), &frames());
	PARTICLES.with(|slot| *slot.borrow_mut() = particles);
}

/// Dot and ring cursor.
#[wasm_bindgen(js_name = initCustomCursor)]
pub fn init_custom_cursor() -> Result<(), JsValue> {
	Ok(cursor::init(&frames())?)
}

/// Section highlight, navbar state and the mobile menu.
#[wasm_bindgen(js_name = initNavigation)]
pub fn init_navigation() -> Result<(), JsValue> {
	Ok(nav::init(config().nav_offset)?)
}

/// Returns whether a particle canvas was mounted.
#[wasm_bindgen(js_name = initParticles)]
pub fn init_particles() -> bool {
	let theme = LocalThemeStore::default().load().unwrap_or_default();
	let field = particle_field::init(&config(), &frames(), theme);
	let mounted = field.is_some();
	PARTICLES.with(|slot| *slot.borrow_mut() = field);
	mounted
}

/// Typing effect over the configured texts.
#[wasm_bindgen(js_name = initTypingAnimation)]
pub fn init_typing_animation() -> Result<(), JsValue> {
	Ok(typing::init(&config().typing_texts)?)
}

/// Count-up stats once they scroll into view.
#[wasm_bindgen(js_name = initCounterAnimation)]
pub fn init_counter_animation() -> Result<(), JsValue> {
	Ok(reveal::init_counters(&config())?)
}

/// Hero timeline and scroll reveals. Fails when GSAP is not loaded.
#[wasm_bindgen(js_name = initGsapAnimations)]
pub fn init_gsap_animations() -> Result<(), JsValue> {
	Ok(animations::init()?)
}

/// Fill skill bars once they scroll into view.
#[wasm_bindgen(js_name = initSkillBars)]
pub fn init_skill_bars() -> Result<(), JsValue> {
	Ok(reveal::init_skill_bars()?)
}

/// Portfolio filter buttons.
#[wasm_bindgen(js_name = initPortfolioFilter)]
pub fn init_portfolio_filter() -> Result<(), JsValue> {
	Ok(portfolio::init()?)
}

/// Floating labels and the simulated submit.
#[wasm_bindgen(js_name = initContactForm)]
pub fn init_contact_form() -> Result<(), JsValue> {
	Ok(contact::init()?)
}

/// Eased scrolling for in-page anchors.
#[wasm_bindgen(js_name = initSmoothScroll)]
pub fn init_smooth_scroll() -> Result<(), JsValue> {
	let config = config();
	Ok(smooth::init(
		&frames(),
		config.header_offset,
		config.scroll_duration_ms,
	)?)
}

/// Parallax transforms and scroll hue.
#[wasm_bindgen(js_name = initParallaxEffects)]
pub fn init_parallax_effects() -> Result<(), JsValue> {
	Ok(parallax::init()?)
}

/// Hover tooltips and float stagger for tech badges.
#[wasm_bindgen(js_name = initTechStackAnimation)]
pub fn init_tech_stack_animation() -> Result<(), JsValue> {
	Ok(tooltips::init()?)
}

/// Apply the stored theme and wire the toggle button.
#[wasm_bindgen(js_name = initThemeToggle)]
pub fn init_theme_toggle() -> Result<(), JsValue> {
	let listeners: Vec<Rc<dyn ThemeListener>> = PARTICLES.with(|slot| {
		slot.borrow()
			.iter()
			.map(|field| Rc::new(field.clone()) as Rc<dyn ThemeListener>)
			.collect()
	});
	theme::init(listeners)?;
	Ok(())
}

/// Lazy images and the debounced scroll hook.
#[wasm_bindgen(js_name = optimizePerformance)]
pub fn optimize_performance() -> Result<(), JsValue> {
	Ok(crate::optimize_performance()?)
}

/// Konami code listener and the console banner.
#[wasm_bindgen(js_name = initEasterEggs)]
pub fn init_easter_eggs() -> Result<(), JsValue> {
	Ok(konami::init()?)
}
