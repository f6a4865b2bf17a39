//! Konami code easter egg and the console greeting.

use std::collections::VecDeque;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use crate::dom;
use crate::error::FxError;

/// Up Up Down Down Left Right Left Right B A.
pub const SEQUENCE: [u32; 10] = [38, 38, 40, 40, 37, 39, 37, 39, 66, 65];
/// How long the page stays hue-rotated.
pub const EFFECT_MS: u32 = 3000;

/// The most recent key codes, at most [`SEQUENCE`]`.len()` of them.
#[derive(Clone, Debug, Default)]
pub struct KonamiBuffer {
	keys: VecDeque<u32>,
}

impl KonamiBuffer {
	/// Fresh, empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Keys currently buffered.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Whether no keys are buffered.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Record a key. Returns `true` when it completes the sequence; the
	/// buffer is then cleared so the same keys cannot fire twice.
	pub fn push(&mut self, key_code: u32) -> bool {
		self.keys.push_back(key_code);
		if self.keys.len() > SEQUENCE.len() {
			self.keys.pop_front();
		}
		if self.keys.iter().eq(SEQUENCE.iter()) {
			self.keys.clear();
			return true;
		}
		false
	}
}

/// Print the styled greeting to the browser console.
pub fn print_banner() {
	web_sys::console::log_2(
		&"%c🚀 Welcome to my portfolio!".into(),
		&"color: #16a34a; font-size: 20px; font-weight: bold;".into(),
	);
	web_sys::console::log_2(
		&"%cInterested in the code? Feel free to explore!".into(),
		&"color: #0ea5e9; font-size: 14px;".into(),
	);
}

/// Print the banner and listen for the code.
pub fn init() -> Result<(), FxError> {
	let body = dom::body()?;
	let mut buffer = KonamiBuffer::new();
	// Restores the filter; a repeat trigger replaces (cancels) it.
	let mut reset: Option<Timeout> = None;

	let document = dom::document()?;
	EventListener::new(&document, "keydown", move |event| {
		let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
			return;
		};
		#[allow(deprecated)]
		let key_code = event.key_code();
		if !buffer.push(key_code) {
			return;
		}
		info!("portfolio-fx: konami code entered");
		dom::set_style(&body, "filter", "hue-rotate(180deg)");
		let body = body.clone();
		reset.replace(Timeout::new(EFFECT_MS, move || {
			dom::set_style(&body, "filter", "none");
		}));
	})
	.forget();

	print_banner();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn feed(buffer: &mut KonamiBuffer, keys: &[u32]) -> usize {
		keys.iter().filter(|k| buffer.push(**k)).count()
	}

	#[test]
	fn sequence_fires_once() {
		let mut buffer = KonamiBuffer::new();
		assert_eq!(feed(&mut buffer, &SEQUENCE), 1);
		assert!(buffer.is_empty());
		// The trailing `A` alone does not re-fire.
		assert!(!buffer.push(65));
	}

	#[test]
	fn fires_after_unrelated_keys() {
		let mut buffer = KonamiBuffer::new();
		assert_eq!(feed(&mut buffer, &[13, 32, 38, 90]), 0);
		assert_eq!(feed(&mut buffer, &SEQUENCE), 1);
	}

	#[test]
	fn near_miss_does_not_fire() {
		let mut buffer = KonamiBuffer::new();
		let swapped = [38, 38, 40, 40, 37, 39, 37, 39, 65, 66];
		assert_eq!(feed(&mut buffer, &swapped), 0);
		assert_eq!(feed(&mut buffer, &SEQUENCE[..9]), 0);
	}

	#[test]
	fn buffer_is_bounded() {
		let mut buffer = KonamiBuffer::new();
		for key in 0..100 {
			buffer.push(key);
			assert!(buffer.len() <= SEQUENCE.len());
		}
	}

	#[test]
	fn twice_in_a_row_fires_twice() {
		let mut buffer = KonamiBuffer::new();
		let keys: Vec<u32> = SEQUENCE.iter().chain(SEQUENCE.iter()).copied().collect();
		assert_eq!(feed(&mut buffer, &keys), 2);
	}
}
