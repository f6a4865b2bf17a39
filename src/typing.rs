//! Typewriter effect cycling through a list of phrases.
//!
//! [`TypingMachine`] is the pure state machine; [`init`] drives it with
//! chained timeouts and writes each frame into `.typing-text`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use log::info;
use web_sys::HtmlElement;

use crate::dom;
use crate::error::FxError;

/// Delay after typing a character.
pub const TYPE_DELAY_MS: u32 = 150;
/// Delay after deleting a character.
pub const DELETE_DELAY_MS: u32 = 75;
/// Pause with the full phrase shown.
pub const FULL_PAUSE_MS: u32 = 2000;
/// Pause with the field empty before the next phrase.
pub const EMPTY_PAUSE_MS: u32 = 500;

/// Whether characters are being added or removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Adding characters.
	Typing,
	/// Removing characters.
	Deleting,
}

/// What to show now and how long until the next step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingStep {
	/// Visible prefix of the current text.
	pub text: String,
	/// Wait before the next step.
	pub delay_ms: u32,
}

/// Cycles through texts, typing and deleting one character per step.
#[derive(Clone, Debug)]
pub struct TypingMachine {
	texts: Vec<Vec<char>>,
	text_index: usize,
	char_index: usize,
	phase: Phase,
}

impl TypingMachine {
	/// Machine over `texts`; `None` when there is nothing to type.
	pub fn new<I, S>(texts: I) -> Option<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let texts: Vec<Vec<char>> = texts
			.into_iter()
			.map(|t| t.as_ref().chars().collect::<Vec<_>>())
			.filter(|t| !t.is_empty())
			.collect();
		if texts.is_empty() {
			return None;
		}
		Some(Self {
			texts,
			text_index: 0,
			char_index: 0,
			phase: Phase::Typing,
		})
	}

	/// Index of the text being typed.
	pub fn text_index(&self) -> usize {
		self.text_index
	}

	/// Characters of it currently shown.
	pub fn char_index(&self) -> usize {
		self.char_index
	}

	/// Current phase.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Advance one character.
	pub fn step(&mut self) -> TypingStep {
		let len = self.texts[self.text_index].len();
		let mut delay_ms = match self.phase {
			Phase::Typing => {
				self.char_index = (self.char_index + 1).min(len);
				TYPE_DELAY_MS
			}
			Phase::Deleting => {
				self.char_index = self.char_index.saturating_sub(1);
				DELETE_DELAY_MS
			}
		};
		let text: String = self.texts[self.text_index][..self.char_index]
			.iter()
			.collect();

		match self.phase {
			Phase::Typing if self.char_index == len => {
				self.phase = Phase::Deleting;
				delay_ms = FULL_PAUSE_MS;
			}
			Phase::Deleting if self.char_index == 0 => {
				self.phase = Phase::Typing;
				self.text_index = (self.text_index + 1) % self.texts.len();
				delay_ms = EMPTY_PAUSE_MS;
			}
			_ => {}
		}
		TypingStep { text, delay_ms }
	}
}

/// Start typing into `.typing-text`, if the page has one.
pub fn init(texts: &[String]) -> Result<(), FxError> {
	let Some(element) = dom::query(".typing-text") else {
		return Ok(());
	};
	let Some(machine) = TypingMachine::new(texts) else {
		return Ok(());
	};
	info!("portfolio-fx: typing {} phrases", texts.len());
	advance(Rc::new(RefCell::new(machine)), element);
	Ok(())
}

fn advance(machine: Rc<RefCell<TypingMachine>>, element: HtmlElement) {
	let step = machine.borrow_mut().step();
	element.set_text_content(Some(&step.text));
	Timeout::new(step.delay_ms, move || advance(machine, element)).forget();
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(machine: &mut TypingMachine, n: usize) -> Vec<(String, u32)> {
		(0..n)
			.map(|_| {
				let s = machine.step();
				(s.text, s.delay_ms)
			})
			.collect()
	}

	#[test]
	fn types_pauses_deletes_and_moves_on() {
		let mut machine = TypingMachine::new(["Hi", "Yo"]).unwrap();
		let steps = run(&mut machine, 5);
		let expected = [
			("H", 150),
			("Hi", 2000),
			("H", 75),
			("", 500),
			("Y", 150),
		];
		for (got, (text, delay)) in steps.iter().zip(expected) {
			assert_eq!(got.0, text);
			assert_eq!(got.1, delay);
		}
		assert_eq!(machine.text_index(), 1);
	}

	#[test]
	fn wraps_to_first_phrase() {
		let mut machine = TypingMachine::new(["ab", "c"]).unwrap();
		// "ab": 2 typed + 2 deleted, "c": 1 typed + 1 deleted.
		run(&mut machine, 6);
		assert_eq!(machine.text_index(), 0);
		assert_eq!(machine.phase(), Phase::Typing);
		assert_eq!(machine.step().text, "a");
	}

	#[test]
	fn indices_stay_in_bounds() {
		let mut machine = TypingMachine::new(["Data", "SQL", "Power BI"]).unwrap();
		for _ in 0..200 {
			machine.step();
			assert!(machine.text_index() < 3);
			assert!(machine.char_index() <= machine.texts[machine.text_index()].len());
		}
	}

	#[test]
	fn counts_characters_not_bytes() {
		let mut machine = TypingMachine::new(["né"]).unwrap();
		assert_eq!(machine.step().text, "n");
		assert_eq!(machine.step(), TypingStep {
			text: "né".into(),
			delay_ms: FULL_PAUSE_MS
		});
	}

	#[test]
	fn empty_phrases_are_skipped() {
		assert!(TypingMachine::new(Vec::<String>::new()).is_none());
		assert!(TypingMachine::new([""]).is_none());
		let mut machine = TypingMachine::new(["", "A"]).unwrap();
		assert_eq!(machine.step().text, "A");
	}
}
