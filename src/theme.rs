//! Light/dark theme selection, persistence and the toggle button.
//!
//! [`ThemeController`] owns the selected theme and notifies
//! [`ThemeListener`]s when a change is committed. The toggle button wiring
//! in [`init`] stages each change: a transition class and ripple right away,
//! the commit after [`COMMIT_DELAY_MS`], and class removal after
//! [`TRANSITION_MS`]. A new click cancels whatever the previous click still
//! had pending.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos_meta::{Style, provide_meta_context};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use web_sys::HtmlElement;

use crate::dom;
use crate::error::FxError;

/// Storage key holding `"light"` or `"dark"`.
pub const STORAGE_KEY: &str = "theme";
/// Attribute on `<body>` the stylesheet keys off.
pub const THEME_ATTRIBUTE: &str = "data-theme";
/// Class present on `<body>` while colors animate.
pub const TRANSITION_CLASS: &str = "theme-transitioning";
/// Delay before the new theme is applied and persisted.
pub const COMMIT_DELAY_MS: u32 = 100;
/// Delay before the transition class is removed.
pub const TRANSITION_MS: u32 = 500;
/// Lifetime of the ripple overlay.
pub const RIPPLE_MS: u32 = 600;

const RIPPLE_KEYFRAMES: &str = "@keyframes ripple-expand {
	0% { transform: scale(0); opacity: 1; }
	100% { transform: scale(4); opacity: 0; }
}";

/// The page's visual mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	/// Default mode.
	#[default]
	Light,
	/// Dark mode.
	Dark,
}

impl Theme {
	/// The other theme.
	pub fn opposite(self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}

	/// Attribute and storage spelling.
	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}

	/// Parse the stored spelling; anything else is `None`.
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim() {
			"light" => Some(Theme::Light),
			"dark" => Some(Theme::Dark),
			_ => None,
		}
	}
}

impl fmt::Display for Theme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Where the selected theme survives reloads.
pub trait ThemeStore {
	/// The saved theme, if one was saved and is readable.
	fn load(&self) -> Option<Theme>;
	/// Save `theme`.
	fn save(&self, theme: Theme) -> Result<(), FxError>;
}

/// Process-local store, also the fallback when `localStorage` is unusable.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
	theme: Cell<Option<Theme>>,
}

impl ThemeStore for MemoryThemeStore {
	fn load(&self) -> Option<Theme> {
		self.theme.get()
	}

	fn save(&self, theme: Theme) -> Result<(), FxError> {
		self.theme.set(Some(theme));
		Ok(())
	}
}

/// `localStorage`-backed store that degrades to memory.
#[derive(Debug, Default)]
pub struct LocalThemeStore {
	memory: MemoryThemeStore,
}

impl LocalThemeStore {
	fn storage() -> Option<web_sys::Storage> {
		web_sys::window()?.local_storage().ok().flatten()
	}
}

impl ThemeStore for LocalThemeStore {
	fn load(&self) -> Option<Theme> {
		match Self::storage() {
			Some(storage) => storage
				.get_item(STORAGE_KEY)
				.ok()
				.flatten()
				.and_then(|value| Theme::parse(&value)),
			None => self.memory.load(),
		}
	}

	fn save(&self, theme: Theme) -> Result<(), FxError> {
		self.memory.save(theme)?;
		let storage = Self::storage().ok_or(FxError::StorageUnavailable)?;
		storage.set_item(STORAGE_KEY, theme.as_str())?;
		Ok(())
	}
}

/// Reacts to committed theme changes.
pub trait ThemeListener {
	/// `theme` is now the page's theme.
	fn theme_changed(&self, theme: Theme);
}

/// Owns the selected theme and fans out committed changes.
pub struct ThemeController {
	store: Box<dyn ThemeStore>,
	applied: Cell<Theme>,
	requested: Cell<Theme>,
	listeners: RefCell<Vec<Rc<dyn ThemeListener>>>,
}

impl ThemeController {
	/// Start from the stored theme, or light.
	pub fn new(store: Box<dyn ThemeStore>) -> Self {
		let theme = store.load().unwrap_or_default();
		Self {
			store,
			applied: Cell::new(theme),
			requested: Cell::new(theme),
			listeners: RefCell::new(Vec::new()),
		}
	}

	/// The theme currently applied to the page.
	pub fn current_theme(&self) -> Theme {
		self.applied.get()
	}

	/// Register `listener` and bring it in line with the current theme.
	pub fn subscribe(&self, listener: Rc<dyn ThemeListener>) {
		listener.theme_changed(self.applied.get());
		self.listeners.borrow_mut().push(listener);
	}

	/// Request the opposite of the most recently requested theme and return
	/// it. Nothing is applied until [`commit`](Self::commit).
	pub fn begin_toggle(&self) -> Theme {
		let next = self.requested.get().opposite();
		self.requested.set(next);
		next
	}

	/// Apply `theme`, persist it and notify listeners. A failed save keeps
	/// the theme for this page view only.
	pub fn commit(&self, theme: Theme) {
		self.applied.set(theme);
		self.requested.set(theme);
		if let Err(e) = self.store.save(theme) {
			warn!("portfolio-fx: theme not persisted: {}", e);
		}
		debug!("portfolio-fx: theme is now {}", theme);
		let listeners = self.listeners.borrow().clone();
		for listener in listeners {
			listener.theme_changed(theme);
		}
	}

	/// Request and immediately commit the opposite theme.
	pub fn toggle(&self) -> Theme {
		let next = self.begin_toggle();
		self.commit(next);
		next
	}
}

/// Mirrors the theme into `data-theme` on an element.
pub struct ThemeAttribute(pub HtmlElement);

impl ThemeListener for ThemeAttribute {
	fn theme_changed(&self, theme: Theme) {
		let _ = self.0.set_attribute(THEME_ATTRIBUTE, theme.as_str());
	}
}

/// Apply the stored theme and wire the toggle button.
///
/// `listeners` are subscribed before the button is wired, so they start in
/// sync with the stored theme.
pub fn init(listeners: Vec<Rc<dyn ThemeListener>>) -> Result<Rc<ThemeController>, FxError> {
	let body = dom::body()?;
	let controller = Rc::new(ThemeController::new(Box::new(LocalThemeStore::default())));
	controller.subscribe(Rc::new(ThemeAttribute(body.clone())));
	for listener in listeners {
		controller.subscribe(listener);
	}
	info!("portfolio-fx: theme {}", controller.current_theme());

	mount_keyframes(body.clone());

	let Some(button) = dom::by_id("theme-toggle") else {
		return Ok(controller);
	};

	// Timers still outstanding from the last click.
	let mut pending: Vec<Timeout> = Vec::new();
	let (controller_click, button_click) = (controller.clone(), button.clone());
	EventListener::new(&button, "click", move |_| {
		// Dropping the old handles cancels the previous click's timers.
		pending.clear();

		let next = controller_click.begin_toggle();
		dom::set_class(&body, TRANSITION_CLASS, true);
		spawn_ripple(&button_click);

		let controller = controller_click.clone();
		pending.push(Timeout::new(COMMIT_DELAY_MS, move || {
			controller.commit(next);
		}));
		let body = body.clone();
		pending.push(Timeout::new(TRANSITION_MS, move || {
			dom::set_class(&body, TRANSITION_CLASS, false);
		}));
	})
	.forget();

	Ok(controller)
}

// `Style` hoists its element into `<head>`.
fn mount_keyframes(body: HtmlElement) {
	leptos::mount::mount_to(body, || {
		provide_meta_context();
		view! { <Style id="ripple-keyframes">{RIPPLE_KEYFRAMES}</Style> }
	})
	.forget();
}

/// Square overlay centred on `button`, sized to its larger side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
	/// Left edge in viewport pixels.
	pub left: f64,
	/// Top edge in viewport pixels.
	pub top: f64,
	/// Width and height.
	pub size: f64,
}

impl RippleGeometry {
	/// Geometry for a button at `(left, top)` with the given box size.
	pub fn around(left: f64, top: f64, width: f64, height: f64) -> Self {
		let size = width.max(height);
		Self {
			left: left + width / 2.0 - size / 2.0,
			top: top + height / 2.0 - size / 2.0,
			size,
		}
	}
}

#[component]
fn ThemeRipple(geometry: RippleGeometry) -> impl IntoView {
	let style = format!(
		"position: fixed; left: {}px; top: {}px; width: {size}px; height: {size}px; \
		 background: radial-gradient(circle, rgba(22, 163, 74, 0.3) 0%, transparent 70%); \
		 border-radius: 50%; transform: scale(0); animation: ripple-expand 0.6s ease-out; \
		 pointer-events: none; z-index: 9999;",
		geometry.left,
		geometry.top,
		size = geometry.size,
	);
	view! { <div class="theme-ripple" style=style></div> }
}

fn spawn_ripple(button: &HtmlElement) {
	let Ok(body) = dom::body() else {
		return;
	};
	let rect = button.get_bounding_client_rect();
	let geometry = RippleGeometry::around(rect.left(), rect.top(), rect.width(), rect.height());
	let handle = leptos::mount::mount_to(body, move || view! { <ThemeRipple geometry=geometry /> });
	// Unmounting removes the overlay.
	Timeout::new(RIPPLE_MS, move || drop(handle)).forget();
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Recorder(RefCell<Vec<Theme>>);

	impl ThemeListener for Recorder {
		fn theme_changed(&self, theme: Theme) {
			self.0.borrow_mut().push(theme);
		}
	}

	/// Shares its cell with the test so persisted values can be inspected.
	struct SharedStore(Rc<Cell<Option<Theme>>>);

	impl ThemeStore for SharedStore {
		fn load(&self) -> Option<Theme> {
			self.0.get()
		}

		fn save(&self, theme: Theme) -> Result<(), FxError> {
			self.0.set(Some(theme));
			Ok(())
		}
	}

	struct BrokenStore;

	impl ThemeStore for BrokenStore {
		fn load(&self) -> Option<Theme> {
			None
		}

		fn save(&self, _: Theme) -> Result<(), FxError> {
			Err(FxError::StorageUnavailable)
		}
	}

	#[test]
	fn parse_round_trips_stored_spelling() {
		for theme in [Theme::Light, Theme::Dark] {
			assert_eq!(Theme::parse(theme.as_str()), Some(theme));
		}
		assert_eq!(Theme::parse("sepia"), None);
	}

	#[test]
	fn absent_preference_defaults_to_light() {
		let controller = ThemeController::new(Box::new(MemoryThemeStore::default()));
		assert_eq!(controller.current_theme(), Theme::Light);
	}

	#[test]
	fn persisted_theme_tracks_toggle_parity() {
		for n in 0..8 {
			let saved = Rc::new(Cell::new(None));
			let controller = ThemeController::new(Box::new(SharedStore(saved.clone())));
			for _ in 0..n {
				controller.toggle();
			}
			let expected = if n % 2 == 0 { Theme::Light } else { Theme::Dark };
			assert_eq!(controller.current_theme(), expected);
			if n > 0 {
				assert_eq!(saved.get(), Some(expected));
			}
		}
	}

	#[test]
	fn rapid_double_toggle_ends_on_original_theme() {
		let saved = Rc::new(Cell::new(None));
		let controller = ThemeController::new(Box::new(SharedStore(saved.clone())));
		// Second click lands before the first commit fires; only its commit runs.
		let _cancelled = controller.begin_toggle();
		let second = controller.begin_toggle();
		controller.commit(second);
		assert_eq!(controller.current_theme(), Theme::Light);
		assert_eq!(saved.get(), Some(Theme::Light));
	}

	#[test]
	fn listeners_sync_on_subscribe_and_commit() {
		let saved = Rc::new(Cell::new(Some(Theme::Dark)));
		let controller = ThemeController::new(Box::new(SharedStore(saved)));
		let recorder = Rc::new(Recorder(RefCell::new(Vec::new())));
		controller.subscribe(recorder.clone());
		controller.toggle();
		assert_eq!(*recorder.0.borrow(), [Theme::Dark, Theme::Light]);
	}

	#[test]
	fn failed_save_still_applies_theme() {
		let controller = ThemeController::new(Box::new(BrokenStore));
		assert_eq!(controller.toggle(), Theme::Dark);
		assert_eq!(controller.current_theme(), Theme::Dark);
	}

	#[test]
	fn ripple_is_centred_on_the_button() {
		let ripple = RippleGeometry::around(100.0, 20.0, 40.0, 20.0);
		assert_eq!(ripple.size, 40.0);
		assert_eq!(ripple.left, 100.0);
		assert_eq!(ripple.top, 10.0);
	}
}
