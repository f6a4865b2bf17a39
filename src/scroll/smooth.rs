//! Eased in-page anchor scrolling driven by the frame loop.

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use log::{debug, info};

use crate::dom;
use crate::error::FxError;
use crate::frame::{FrameControl, FrameScheduler, SubscriptionId};
use crate::timing::ease_in_out_cubic;

/// One scroll from a start offset to a target over a fixed duration.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothScroll {
	start: f64,
	distance: f64,
	duration: f64,
	start_time: Option<f64>,
}

impl SmoothScroll {
	/// Scroll from `start` to `target` over `duration_ms`.
	pub fn new(start: f64, target: f64, duration_ms: f64) -> Self {
		Self {
			start,
			distance: target - start,
			duration: duration_ms,
			start_time: None,
		}
	}

	/// Scroll offset for the frame at `timestamp` and whether another frame
	/// is needed. The first sample fixes the start time.
	///
	/// The frame that reaches the duration is still eased, so the final
	/// offset may land slightly past the target.
	pub fn sample(&mut self, timestamp: f64) -> (f64, FrameControl) {
		if self.duration <= 0.0 {
			return (self.start + self.distance, FrameControl::Done);
		}
		let start_time = *self.start_time.get_or_insert(timestamp);
		let elapsed = timestamp - start_time;
		let position = ease_in_out_cubic(elapsed, self.start, self.distance, self.duration);
		let control = if elapsed < self.duration {
			FrameControl::Continue
		} else {
			FrameControl::Done
		};
		(position, control)
	}
}

/// Scroll the window to `target` over `duration_ms`, replacing whatever
/// scroll `active` refers to.
pub fn scroll_to(
	frames: &FrameScheduler,
	active: &Cell<Option<SubscriptionId>>,
	target: f64,
	duration_ms: f64,
) -> Result<(), FxError> {
	let window = dom::window()?;
	if let Some(previous) = active.take() {
		frames.cancel(previous);
	}
	let mut scroll = SmoothScroll::new(dom::scroll_y(), target, duration_ms);
	let id = frames.subscribe(move |timestamp| {
		let (y, control) = scroll.sample(timestamp);
		window.scroll_to_with_x_and_y(0.0, y);
		control
	});
	active.set(Some(id));
	Ok(())
}

/// Take over clicks on every `a[href^="#"]`.
pub fn init(frames: &FrameScheduler, header_offset: f64, duration_ms: f64) -> Result<(), FxError> {
	let links = dom::query_all(r##"a[href^="#"]"##);
	let active = Rc::new(Cell::new(None));

	for link in &links {
		let (frames, active, link_click) = (frames.clone(), active.clone(), link.clone());
		EventListener::new_with_options(
			link,
			"click",
			EventListenerOptions::enable_prevent_default(),
			move |event| {
				event.prevent_default();
				let Some(href) = link_click.get_attribute("href") else {
					return;
				};
				// `#` alone is not a valid selector; the lookup just misses.
				let Some(target) = dom::query(&href) else {
					return;
				};
				let y = target.offset_top() as f64 - header_offset;
				debug!("portfolio-fx: smooth scroll to {} ({}px)", href, y);
				let _ = scroll_to(&frames, &active, y, duration_ms);
			},
		)
		.forget();
	}
	info!("portfolio-fx: smooth scroll on {} anchors", links.len());
	Ok(())
}
