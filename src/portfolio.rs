//! Category filter for the portfolio grid.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use log::{debug, info};
use web_sys::HtmlElement;

use crate::dom;
use crate::error::FxError;

/// Filter value that shows every item.
pub const SHOW_ALL: &str = "all";
/// Delay before a shown item fades in.
pub const SHOW_DELAY_MS: u32 = 100;
/// Delay before a hidden item leaves the layout.
pub const HIDE_DELAY_MS: u32 = 300;

/// Whether an item with `category` stays visible under `filter`.
///
/// A button without `data-filter` only matches items without a category.
pub fn is_visible(filter: Option<&str>, category: Option<&str>) -> bool {
	filter == Some(SHOW_ALL) || filter == category
}

fn show(item: &HtmlElement) -> Timeout {
	dom::set_style(item, "display", "block");
	let item = item.clone();
	Timeout::new(SHOW_DELAY_MS, move || {
		dom::set_style(&item, "opacity", "1");
		dom::set_style(&item, "transform", "translateY(0)");
	})
}

fn hide(item: &HtmlElement) -> Timeout {
	dom::set_style(item, "opacity", "0");
	dom::set_style(item, "transform", "translateY(20px)");
	let item = item.clone();
	Timeout::new(HIDE_DELAY_MS, move || {
		dom::set_style(&item, "display", "none");
	})
}

/// Wire every `.filter-btn` to the `.portfolio-item`s.
pub fn init() -> Result<(), FxError> {
	let buttons = Rc::new(dom::query_all(".filter-btn"));
	let items = Rc::new(dom::query_all(".portfolio-item"));
	// Item timers from the most recent click.
	let pending: Rc<RefCell<Vec<Timeout>>> = Rc::new(RefCell::new(Vec::new()));

	for button in buttons.iter() {
		let (buttons, items, pending, button_click) = (
			buttons.clone(),
			items.clone(),
			pending.clone(),
			button.clone(),
		);
		EventListener::new(button, "click", move |_| {
			for other in buttons.iter() {
				dom::set_class(other, "active", false);
			}
			dom::set_class(&button_click, "active", true);

			let filter = button_click.get_attribute("data-filter");
			debug!("portfolio-fx: filter {:?}", filter);
			let mut pending = pending.borrow_mut();
			pending.clear();
			for item in items.iter() {
				let category = item.get_attribute("data-category");
				pending.push(if is_visible(filter.as_deref(), category.as_deref()) {
					show(item)
				} else {
					hide(item)
				});
			}
		})
		.forget();
	}
	info!(
		"portfolio-fx: portfolio filter, {} buttons over {} items",
		buttons.len(),
		items.len()
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn all_shows_everything() {
		for category in [Some("web"), Some("data"), None] {
			assert!(is_visible(Some("all"), category));
		}
	}

	#[test]
	fn category_filter_matches_exactly() {
		assert!(is_visible(Some("data"), Some("data")));
		assert!(!is_visible(Some("data"), Some("web")));
		assert!(!is_visible(Some("data"), None));
		assert!(!is_visible(Some("Data"), Some("data")));
	}

	#[test]
	fn missing_filter_matches_uncategorised_items() {
		assert!(is_visible(None, None));
		assert!(!is_visible(None, Some("web")));
	}
}
