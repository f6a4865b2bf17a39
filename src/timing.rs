//! Throttle, debounce and easing helpers.
//!
//! The gating decisions ([`ThrottleGate`], [`DebounceGate`]) are plain state
//! machines over millisecond timestamps; [`throttle`] and [`debounce`] bind
//! them to the host clock and `gloo` timers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use rand::Rng;

use crate::dom;

/// Cubic ease-in-out: position at elapsed `t` for a move from `start` by
/// `change` over `duration`.
///
/// Past `duration` the curve keeps going, so a late sample overshoots.
pub fn ease_in_out_cubic(t: f64, start: f64, change: f64, duration: f64) -> f64 {
	let mut t = t / (duration / 2.0);
	if t < 1.0 {
		return change / 2.0 * t * t * t + start;
	}
	t -= 2.0;
	change / 2.0 * (t * t * t + 2.0) + start
}

/// Uniform sample in `[min, max)`.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
	rng.r#gen::<f64>() * (max - min) + min
}

/// Outcome of offering an event to a gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
	/// Run the handler now.
	Run,
	/// Run it after this many milliseconds.
	Defer(u32),
}

/// Leading-edge throttle with a minimum interval between runs.
#[derive(Clone, Debug)]
pub struct ThrottleGate {
	interval: f64,
	last_run: Option<f64>,
}

impl ThrottleGate {
	/// A gate that admits at most one run per `interval_ms`.
	pub fn new(interval_ms: f64) -> Self {
		Self {
			interval: interval_ms,
			last_run: None,
		}
	}

	/// Offer an event at `now`.
	pub fn poll(&mut self, now: f64) -> Gate {
		match self.last_run {
			Some(last) if now - last < self.interval => {
				Gate::Defer((self.interval - (now - last)).ceil().max(0.0) as u32)
			}
			_ => {
				self.last_run = Some(now);
				Gate::Run
			}
		}
	}

	/// Record a deferred run that fired at `now`.
	pub fn mark(&mut self, now: f64) {
		self.last_run = Some(now);
	}
}

/// Trailing debounce with an optional leading call.
#[derive(Clone, Debug, Default)]
pub struct DebounceGate {
	immediate: bool,
	armed: bool,
}

impl DebounceGate {
	/// `immediate` runs on the leading edge instead of the trailing one.
	pub fn new(immediate: bool) -> Self {
		Self {
			immediate,
			armed: false,
		}
	}

	/// An event arrived; returns whether to run right away. The caller
	/// (re)starts its timer either way.
	pub fn event(&mut self) -> bool {
		let call_now = self.immediate && !self.armed;
		self.armed = true;
		call_now
	}

	/// The quiet period elapsed; returns whether to run now.
	pub fn settle(&mut self) -> bool {
		self.armed = false;
		!self.immediate
	}
}

/// Wrap `handler` so it runs at most once per `wait_ms`; events inside the
/// window collapse into one trailing run.
pub fn throttle<F>(wait_ms: u32, handler: F) -> impl FnMut()
where
	F: FnMut() + 'static,
{
	let handler = Rc::new(RefCell::new(handler));
	let gate = Rc::new(RefCell::new(ThrottleGate::new(wait_ms as f64)));
	let trailing_pending = Rc::new(Cell::new(false));
	let mut trailing: Option<Timeout> = None;

	move || {
		let decision = gate.borrow_mut().poll(dom::now_ms());
		match decision {
			Gate::Run => {
				trailing.take();
				trailing_pending.set(false);
				(handler.borrow_mut())();
			}
			Gate::Defer(delay) => {
				if trailing_pending.get() {
					return;
				}
				trailing_pending.set(true);
				let (handler, gate, pending) =
					(handler.clone(), gate.clone(), trailing_pending.clone());
				trailing.replace(Timeout::new(delay, move || {
					pending.set(false);
					gate.borrow_mut().mark(dom::now_ms());
					(handler.borrow_mut())();
				}));
			}
		}
	}
}

/// Wrap `handler` so it runs once events stop arriving for `wait_ms`
/// (or on the first event of a burst when `immediate`).
pub fn debounce<F>(wait_ms: u32, immediate: bool, handler: F) -> impl FnMut()
where
	F: FnMut() + 'static,
{
	let handler = Rc::new(RefCell::new(handler));
	let gate = Rc::new(RefCell::new(DebounceGate::new(immediate)));
	let mut timer: Option<Timeout> = None;

	move || {
		let call_now = gate.borrow_mut().event();
		let (handler_later, gate_later) = (handler.clone(), gate.clone());
		// Replacing the handle cancels the previous quiet-period timer.
		timer.replace(Timeout::new(wait_ms, move || {
			if gate_later.borrow_mut().settle() {
				(handler_later.borrow_mut())();
			}
		}));
		if call_now {
			(handler.borrow_mut())();
		}
	}
}
