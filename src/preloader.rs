//! Loading screen shown until the page has loaded and a simulated progress
//! bar has filled.

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use log::{debug, info};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::HtmlElement;

use crate::dom;
use crate::error::FxError;
use crate::timing::random_between;

/// Interval between progress increments.
pub const TICK_MS: u32 = 100;
/// Largest single increment, in percent.
pub const MAX_STEP: f64 = 15.0;
/// Pause at 100% before fading out.
pub const FADE_DELAY_MS: u32 = 300;
/// Fade duration before the preloader leaves the layout.
pub const HIDE_DELAY_MS: u32 = 500;

/// Progress percentage, saturating at 100.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PreloadProgress {
	percent: f64,
}

impl PreloadProgress {
	/// Progress so far, 0 to 100.
	pub fn percent(&self) -> f64 {
		self.percent
	}

	/// Whether the bar has reached 100%.
	pub fn is_complete(&self) -> bool {
		self.percent >= 100.0
	}

	/// Add `step` percent and return the new value.
	pub fn advance(&mut self, step: f64) -> f64 {
		self.percent = (self.percent + step).min(100.0);
		self.percent
	}

	/// Add a random increment in `[0, MAX_STEP)`.
	pub fn advance_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
		self.advance(random_between(rng, 0.0, MAX_STEP))
	}
}

struct Loading {
	progress: PreloadProgress,
	rng: SmallRng,
	preloader: HtmlElement,
	bar: Option<HtmlElement>,
	on_ready: Box<dyn FnOnce()>,
}

fn tick(mut loading: Loading) {
	Timeout::new(TICK_MS, move || {
		let percent = loading.progress.advance_random(&mut loading.rng);
		if let Some(bar) = &loading.bar {
			dom::set_style(bar, "width", &format!("{percent}%"));
		}
		if !loading.progress.is_complete() {
			tick(loading);
			return;
		}
		debug!("portfolio-fx: preload complete");
		let Loading {
			preloader,
			on_ready,
			..
		} = loading;
		Timeout::new(FADE_DELAY_MS, move || {
			dom::set_style(&preloader, "opacity", "0");
			Timeout::new(HIDE_DELAY_MS, move || {
				dom::set_style(&preloader, "display", "none");
				on_ready();
			})
			.forget();
		})
		.forget();
	})
	.forget();
}

/// Play the preloader once the page has loaded, then call `on_ready`.
/// Without a `.preloader` element `on_ready` runs straight away.
pub fn run<F>(on_ready: F) -> Result<(), FxError>
where
	F: FnOnce() + 'static,
{
	let Some(preloader) = dom::query(".preloader") else {
		on_ready();
		return Ok(());
	};
	let loading = Loading {
		progress: PreloadProgress::default(),
		rng: SmallRng::from_entropy(),
		preloader,
		bar: dom::query(".loading-progress"),
		on_ready: Box::new(on_ready),
	};

	let document = dom::document()?;
	if document.ready_state() == "complete" {
		tick(loading);
	} else {
		let window = dom::window()?;
		EventListener::once(&window, "load", move |_| tick(loading)).forget();
	}
	info!("portfolio-fx: preloader running");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn progress_saturates_at_one_hundred() {
		let mut progress = PreloadProgress::default();
		assert_eq!(progress.advance(60.0), 60.0);
		assert!(!progress.is_complete());
		assert_eq!(progress.advance(60.0), 100.0);
		assert!(progress.is_complete());
	}

	#[test]
	fn random_steps_eventually_complete() {
		let mut rng = SmallRng::seed_from_u64(9);
		let mut progress = PreloadProgress::default();
		let mut ticks = 0;
		let mut last = 0.0;
		while !progress.is_complete() {
			let now = progress.advance_random(&mut rng);
			assert!(now >= last && now - last < MAX_STEP);
			last = now;
			ticks += 1;
			assert!(ticks < 10_000);
		}
		assert_eq!(progress.percent(), 100.0);
	}
}
