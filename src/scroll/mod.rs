//! Scroll-reactive effects.

/// Section highlight, navbar state and the mobile menu.
pub mod nav;
/// Scroll-linked transforms.
pub mod parallax;
/// Eased anchor scrolling.
pub mod smooth;

use gloo::events::EventListener;

use crate::dom;
use crate::error::FxError;
use crate::timing::debounce;

/// Quiet period after which [`on_scroll_settled`] fires.
pub const SETTLE_MS: u32 = 10;

/// Run `handler` with the scroll offset once scrolling pauses for
/// `wait_ms`.
pub fn on_scroll_settled<F>(wait_ms: u32, mut handler: F) -> Result<(), FxError>
where
	F: FnMut(f64) + 'static,
{
	let window = dom::window()?;
	let mut settled = debounce(wait_ms, false, move || handler(dom::scroll_y()));
	EventListener::new(&window, "scroll", move |_| settled()).forget();
	Ok(())
}
