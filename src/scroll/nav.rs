//! Navigation bar: active-section highlighting, the `scrolled` state and
//! the mobile menu toggle.

use gloo::events::EventListener;
use log::info;
use web_sys::HtmlElement;

use crate::dom;
use crate::error::FxError;

/// Scroll depth past which the navbar gets `scrolled`.
pub const SCROLLED_AFTER: f64 = 50.0;

/// A `section[id]` and its vertical extent in document pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
	/// Value of the section's `id`.
	pub id: String,
	/// Document offset of the top edge.
	pub top: f64,
	/// Height in pixels.
	pub height: f64,
}

/// Id of the section containing `scroll_y + offset`. When sections overlap
/// the last one in document order wins.
pub fn active_section(sections: &[Section], scroll_y: f64, offset: f64) -> Option<&str> {
	let probe = scroll_y + offset;
	sections
		.iter()
		.rev()
		.find(|s| probe >= s.top && probe < s.top + s.height)
		.map(|s| s.id.as_str())
}

/// Whether the navbar takes its compact `scrolled` look.
pub fn navbar_scrolled(scroll_y: f64) -> bool {
	scroll_y > SCROLLED_AFTER
}

fn page_sections() -> Vec<Section> {
	dom::query_all("section[id]")
		.into_iter()
		.map(|el| Section {
			id: el.id(),
			top: el.offset_top() as f64,
			height: el.offset_height() as f64,
		})
		.collect()
}

fn highlight(links: &[HtmlElement], id: &str) {
	for link in links {
		let on = link.get_attribute("data-section").as_deref() == Some(id);
		dom::set_class(link, "active", on);
	}
}

/// Wire the navbar. Every piece is optional.
pub fn init(nav_offset: f64) -> Result<(), FxError> {
	let window = dom::window()?;
	let navbar = dom::by_id("navbar");
	let toggle = dom::by_id("nav-toggle");
	let menu = dom::by_id("nav-menu");
	let links = dom::query_all(".nav-link");

	if let Some(navbar) = navbar {
		EventListener::new(&window, "scroll", move |_| {
			dom::set_class(&navbar, "scrolled", navbar_scrolled(dom::scroll_y()));
		})
		.forget();
	}

	if let (Some(toggle), Some(menu)) = (toggle, menu) {
		let (toggle_click, menu_click) = (toggle.clone(), menu.clone());
		EventListener::new(&toggle, "click", move |_| {
			let _ = menu_click.class_list().toggle("active");
			let _ = toggle_click.class_list().toggle("active");
		})
		.forget();

		for link in &links {
			let (toggle, menu) = (toggle.clone(), menu.clone());
			EventListener::new(link, "click", move |_| {
				dom::set_class(&menu, "active", false);
				dom::set_class(&toggle, "active", false);
			})
			.forget();
		}
	}

	let link_count = links.len();
	EventListener::new(&window, "scroll", move |_| {
		let sections = page_sections();
		if let Some(id) = active_section(&sections, dom::scroll_y(), nav_offset) {
			highlight(&links, id);
		}
	})
	.forget();

	info!("portfolio-fx: navigation wired, {} links", link_count);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sections() -> Vec<Section> {
		[("home", 0.0, 800.0), ("about", 800.0, 600.0), ("skills", 1400.0, 900.0)]
			.into_iter()
			.map(|(id, top, height)| Section {
				id: id.into(),
				top,
				height,
			})
			.collect()
	}

	#[test]
	fn probe_is_offset_below_scroll_position() {
		let s = sections();
		assert_eq!(active_section(&s, 0.0, 100.0), Some("home"));
		assert_eq!(active_section(&s, 699.0, 100.0), Some("home"));
		assert_eq!(active_section(&s, 700.0, 100.0), Some("about"));
		assert_eq!(active_section(&s, 1350.0, 100.0), Some("skills"));
	}

	#[test]
	fn nothing_matches_past_the_last_section() {
		assert_eq!(active_section(&sections(), 5000.0, 100.0), None);
	}

	#[test]
	fn last_overlapping_section_wins() {
		let mut s = sections();
		s.push(Section {
			id: "overlay".into(),
			top: 0.0,
			height: 10_000.0,
		});
		assert_eq!(active_section(&s, 900.0, 100.0), Some("overlay"));
	}

	#[test]
	fn navbar_state_flips_after_fifty_pixels() {
		assert!(!navbar_scrolled(50.0));
		assert!(navbar_scrolled(50.5));
	}
}
