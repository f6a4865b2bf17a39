//! A single `requestAnimationFrame` loop shared by every per-frame effect.
//!
//! Subscribers are called once per frame in registration order with the
//! frame timestamp and decide whether to stay subscribed. The loop stops
//! requesting frames when nobody is listening and restarts on the next
//! subscription.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Returned by a subscriber after each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
	/// Call again next frame.
	Continue,
	/// Unsubscribe.
	Done,
}

/// Identifies a subscription for [`FrameScheduler::cancel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(f64) -> FrameControl>;

#[derive(Default)]
struct SchedulerInner {
	subscribers: Vec<(SubscriptionId, Subscriber)>,
	cancelled: Vec<SubscriptionId>,
	next_id: u64,
	running: bool,
	#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
	tick: Option<Closure<dyn FnMut(f64)>>,
}

/// Shared handle to the frame loop. Clones refer to the same loop.
#[derive(Clone, Default)]
pub struct FrameScheduler {
	inner: Rc<RefCell<SchedulerInner>>,
}

impl FrameScheduler {
	/// A scheduler with no subscribers; no frame is requested yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Call `subscriber` every frame until it returns [`FrameControl::Done`]
	/// or the subscription is cancelled.
	pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
	where
		F: FnMut(f64) -> FrameControl + 'static,
	{
		let id = {
			let mut inner = self.inner.borrow_mut();
			inner.next_id += 1;
			let id = SubscriptionId(inner.next_id);
			inner.subscribers.push((id, Box::new(subscriber)));
			id
		};
		self.ensure_running();
		id
	}

	/// Drop a subscription. Unknown or finished ids are ignored.
	pub fn cancel(&self, id: SubscriptionId) {
		let mut inner = self.inner.borrow_mut();
		inner.subscribers.retain(|(sub, _)| *sub != id);
		inner.cancelled.push(id);
	}

	/// Number of live subscriptions.
	pub fn len(&self) -> usize {
		self.inner.borrow().subscribers.len()
	}

	/// Whether nothing is subscribed.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Fan one frame out to every subscriber.
	///
	/// Subscribers may subscribe or cancel from inside their callback; new
	/// subscriptions first run on the following frame.
	pub fn dispatch(&self, timestamp: f64) {
		let mut running = {
			let mut inner = self.inner.borrow_mut();
			inner.cancelled.clear();
			std::mem::take(&mut inner.subscribers)
		};

		running.retain_mut(|(_, subscriber)| subscriber(timestamp) == FrameControl::Continue);

		let mut inner = self.inner.borrow_mut();
		let cancelled = std::mem::take(&mut inner.cancelled);
		running.retain(|(id, _)| !cancelled.contains(id));
		running.append(&mut inner.subscribers);
		inner.subscribers = running;
	}

	#[cfg(target_arch = "wasm32")]
	fn ensure_running(&self) {
		let mut inner = self.inner.borrow_mut();
		if inner.running {
			return;
		}
		inner.running = true;
		if inner.tick.is_none() {
			let scheduler = self.clone();
			inner.tick = Some(Closure::new(move |timestamp: f64| {
				scheduler.on_frame(timestamp)
			}));
		}
		let requested = match (web_sys::window(), inner.tick.as_ref()) {
			(Some(window), Some(tick)) => window
				.request_animation_frame(tick.as_ref().unchecked_ref())
				.is_ok(),
			_ => false,
		};
		inner.running = requested;
	}

	// Host builds have no frame source; tests drive `dispatch` directly.
	#[cfg(not(target_arch = "wasm32"))]
	fn ensure_running(&self) {
		self.inner.borrow_mut().running = true;
	}

	#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
	fn on_frame(&self, timestamp: f64) {
		self.dispatch(timestamp);
		let idle = {
			let mut inner = self.inner.borrow_mut();
			inner.running = false;
			inner.subscribers.is_empty()
		};
		if !idle {
			self.ensure_running();
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn subscribers_run_in_registration_order() {
		let frames = FrameScheduler::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		for name in ["cursor", "particles", "scroll"] {
			let log = log.clone();
			frames.subscribe(move |_| {
				log.borrow_mut().push(name);
				FrameControl::Continue
			});
		}
		frames.dispatch(16.0);
		assert_eq!(*log.borrow(), ["cursor", "particles", "scroll"]);
	}

	#[test]
	fn done_subscribers_are_dropped() {
		let frames = FrameScheduler::new();
		let calls = Rc::new(Cell::new(0));
		let counter = calls.clone();
		frames.subscribe(move |_| {
			counter.set(counter.get() + 1);
			if counter.get() == 2 {
				FrameControl::Done
			} else {
				FrameControl::Continue
			}
		});
		for t in 0..5 {
			frames.dispatch(t as f64);
		}
		assert_eq!(calls.get(), 2);
		assert!(frames.is_empty());
	}

	#[test]
	fn cancel_removes_subscription() {
		let frames = FrameScheduler::new();
		let id = frames.subscribe(|_| FrameControl::Continue);
		frames.subscribe(|_| FrameControl::Continue);
		frames.cancel(id);
		frames.dispatch(0.0);
		assert_eq!(frames.len(), 1);
	}

	#[test]
	fn cancel_from_inside_a_frame() {
		let frames = FrameScheduler::new();
		let victim_calls = Rc::new(Cell::new(0));
		let slot: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

		let (f, s) = (frames.clone(), slot.clone());
		frames.subscribe(move |_| {
			if let Some(id) = s.take() {
				f.cancel(id);
			}
			FrameControl::Continue
		});
		let calls = victim_calls.clone();
		let victim = frames.subscribe(move |_| {
			calls.set(calls.get() + 1);
			FrameControl::Continue
		});
		slot.set(Some(victim));

		frames.dispatch(0.0);
		frames.dispatch(1.0);
		assert_eq!(victim_calls.get(), 1);
		assert_eq!(frames.len(), 1);
	}

	#[test]
	fn subscribe_from_inside_a_frame_runs_next_frame() {
		let frames = FrameScheduler::new();
		let late_calls = Rc::new(Cell::new(0));
		let (f, calls) = (frames.clone(), late_calls.clone());
		frames.subscribe(move |_| {
			let calls = calls.clone();
			f.subscribe(move |_| {
				calls.set(calls.get() + 1);
				FrameControl::Done
			});
			FrameControl::Done
		});

		frames.dispatch(0.0);
		assert_eq!(late_calls.get(), 0);
		frames.dispatch(1.0);
		assert_eq!(late_calls.get(), 1);
		assert!(frames.is_empty());
	}

	#[test]
	fn timestamps_are_forwarded() {
		let frames = FrameScheduler::new();
		let seen = Rc::new(Cell::new(0.0));
		let s = seen.clone();
		frames.subscribe(move |t| {
			s.set(t);
			FrameControl::Continue
		});
		frames.dispatch(123.5);
		assert_eq!(seen.get(), 123.5);
	}
}
