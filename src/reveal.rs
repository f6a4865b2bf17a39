//! Viewport-triggered one-shots: stat counters, skill bars and lazy images.
//!
//! Every target is watched by an `IntersectionObserver` and unobserved the
//! first time it intersects, so each effect runs at most once per element.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use js_sys::Array;
use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	HtmlElement, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit,
};

use crate::config::FxConfig;
use crate::dom;
use crate::error::FxError;

/// Share of a skill bar that must be visible before it fills.
pub const SKILL_BAR_THRESHOLD: f64 = 0.5;
/// Delay between a skill bar appearing and its width being set.
pub const SKILL_BAR_DELAY_MS: u32 = 200;

/// Call `on_visible` once for each of `targets`, the first time it enters
/// the viewport.
pub fn observe_once<F>(
	targets: &[HtmlElement],
	threshold: Option<f64>,
	mut on_visible: F,
) -> Result<(), FxError>
where
	F: FnMut(HtmlElement) + 'static,
{
	if targets.is_empty() {
		return Ok(());
	}
	let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
		move |entries: Array, observer: IntersectionObserver| {
			for entry in entries.iter() {
				let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
					continue;
				};
				if !entry.is_intersecting() {
					continue;
				}
				let target = entry.target();
				observer.unobserve(&target);
				if let Ok(element) = target.dyn_into::<HtmlElement>() {
					on_visible(element);
				}
			}
		},
	);

	let options = IntersectionObserverInit::new();
	if let Some(threshold) = threshold {
		options.set_threshold(&JsValue::from_f64(threshold));
	}
	let observer =
		IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
	for target in targets {
		observer.observe(target);
	}
	// The observer holds the callback for the page's lifetime.
	callback.forget();
	Ok(())
}

/// Integer prefix of `text`, the way `parseInt` reads `"250+"` as 250.
pub fn parse_leading_int(text: &str) -> Option<i64> {
	let text = text.trim_start();
	let (sign, digits) = match text.strip_prefix('-') {
		Some(rest) => (-1, rest),
		None => (1, text.strip_prefix('+').unwrap_or(text)),
	};
	let end = digits
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(digits.len());
	digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Counts from zero to a target in equal increments.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
	target: f64,
	current: f64,
	increment: f64,
	done: bool,
}

impl CounterAnimation {
	/// Reach `target` in `steps` increments (at least one).
	pub fn new(target: i64, steps: u32) -> Self {
		let target = target as f64;
		Self {
			target,
			current: 0.0,
			increment: target / steps.max(1) as f64,
			done: false,
		}
	}

	/// Whether the target has been reached.
	pub fn is_done(&self) -> bool {
		self.done
	}

	/// Add one increment and return the value to display. The value that
	/// reaches or passes the target is replaced by the target itself.
	pub fn step(&mut self) -> i64 {
		self.current += self.increment;
		if self.current >= self.target {
			self.current = self.target;
			self.done = true;
		}
		self.current.floor() as i64
	}
}

/// Count every `.stat-number[data-count]` up once it scrolls into view.
pub fn init_counters(config: &FxConfig) -> Result<(), FxError> {
	let counters = dom::query_all(".stat-number");
	let (steps, interval) = (config.counter_steps, config.counter_interval_ms);
	observe_once(&counters, None, move |element| {
		let Some(target) = element
			.get_attribute("data-count")
			.as_deref()
			.and_then(parse_leading_int)
		else {
			return;
		};
		debug!("portfolio-fx: counting to {}", target);
		count_up(
			Rc::new(RefCell::new(CounterAnimation::new(target, steps))),
			element,
			interval,
		);
	})?;
	info!("portfolio-fx: watching {} counters", counters.len());
	Ok(())
}

fn count_up(counter: Rc<RefCell<CounterAnimation>>, element: HtmlElement, interval_ms: u32) {
	Timeout::new(interval_ms, move || {
		let value = counter.borrow_mut().step();
		element.set_text_content(Some(&value.to_string()));
		if !counter.borrow().is_done() {
			count_up(counter, element, interval_ms);
		}
	})
	.forget();
}

/// Fill each `.skill-progress[data-percent]` bar once half of it is visible.
pub fn init_skill_bars() -> Result<(), FxError> {
	let bars = dom::query_all(".skill-progress");
	observe_once(&bars, Some(SKILL_BAR_THRESHOLD), |bar| {
		let Some(percent) = bar.get_attribute("data-percent") else {
			return;
		};
		Timeout::new(SKILL_BAR_DELAY_MS, move || {
			dom::set_style(&bar, "width", &format!("{percent}%"));
		})
		.forget();
	})?;
	info!("portfolio-fx: watching {} skill bars", bars.len());
	Ok(())
}

/// Swap `data-src` into `src` for every `img[data-src]` once it is visible.
pub fn init_lazy_images() -> Result<(), FxError> {
	let images = dom::query_all("img[data-src]");
	observe_once(&images, None, |element| {
		let Some(src) = element.get_attribute("data-src") else {
			return;
		};
		if let Some(img) = element.dyn_ref::<HtmlImageElement>() {
			img.set_src(&src);
		}
		dom::set_class(&element, "lazy", false);
	})?;
	debug!("portfolio-fx: {} lazy images", images.len());
	Ok(())
}

/// Whether a box lies entirely inside a `width` x `height` viewport.
pub fn fits_viewport(top: f64, left: f64, bottom: f64, right: f64, width: f64, height: f64) -> bool {
	top >= 0.0 && left >= 0.0 && bottom <= height && right <= width
}

/// Whether `element` is fully visible right now.
pub fn is_in_viewport(element: &HtmlElement) -> bool {
	let rect = element.get_bounding_client_rect();
	let (width, height) = dom::viewport_size();
	fits_viewport(
		rect.top(),
		rect.left(),
		rect.bottom(),
		rect.right(),
		width,
		height,
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(counter: &mut CounterAnimation) -> Vec<i64> {
		let mut shown = Vec::new();
		while !counter.is_done() {
			shown.push(counter.step());
			assert!(shown.len() <= 1000, "counter never finished");
		}
		shown
	}

	#[test]
	fn counter_ends_exactly_on_target() {
		let shown = run(&mut CounterAnimation::new(100, 50));
		assert_eq!(shown.len(), 50);
		assert_eq!(shown[0], 2);
		assert_eq!(*shown.last().unwrap(), 100);
	}

	#[test]
	fn counter_never_overshoots() {
		let shown = run(&mut CounterAnimation::new(333, 50));
		assert!(shown.iter().all(|v| *v <= 333));
		assert!(shown.windows(2).all(|w| w[0] <= w[1]));
		assert_eq!(*shown.last().unwrap(), 333);
	}

	#[test]
	fn counter_floors_intermediate_values() {
		let shown = run(&mut CounterAnimation::new(10, 4));
		assert_eq!(shown, [2, 5, 7, 10]);
	}

	#[test]
	fn zero_target_finishes_at_once() {
		assert_eq!(run(&mut CounterAnimation::new(0, 50)), [0]);
	}

	#[test]
	fn leading_int_matches_parse_int() {
		assert_eq!(parse_leading_int("250"), Some(250));
		assert_eq!(parse_leading_int(" 15+"), Some(15));
		assert_eq!(parse_leading_int("-4px"), Some(-4));
		assert_eq!(parse_leading_int("k9"), None);
		assert_eq!(parse_leading_int(""), None);
	}

	#[test]
	fn viewport_fit_requires_whole_box() {
		assert!(fits_viewport(0.0, 0.0, 100.0, 100.0, 800.0, 600.0));
		assert!(!fits_viewport(-1.0, 0.0, 100.0, 100.0, 800.0, 600.0));
		assert!(!fits_viewport(500.0, 0.0, 601.0, 100.0, 800.0, 600.0));
	}
}
