//! Tech-stack badges: hover highlight, a tooltip naming the technology and
//! a staggered float animation.

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use log::info;

use crate::dom;
use crate::error::FxError;

/// Stagger between consecutive badges' float animations, in seconds.
pub const FLOAT_STAGGER_S: f64 = 0.5;
/// Delay before a freshly shown tooltip fades in.
pub const FADE_IN_DELAY_MS: u32 = 10;

const TOOLTIP_STYLE: &str = "position: absolute; top: -40px; left: 50%; \
	transform: translateX(-50%); background: var(--dark-color); \
	color: var(--white-color); padding: 5px 10px; border-radius: 4px; \
	font-size: 12px; white-space: nowrap; z-index: 1000; \
	transition: opacity 0.3s ease;";

/// Inline styles for a badge, hovered or not.
pub fn badge_style(hovered: bool) -> [(&'static str, &'static str); 3] {
	if hovered {
		[
			("transform", "scale(1.2)"),
			("background", "var(--gradient-primary)"),
			("color", "var(--white-color)"),
		]
	} else {
		[
			("transform", "scale(1)"),
			("background", "var(--white-color)"),
			("color", "var(--primary-color)"),
		]
	}
}

/// `animation-delay` for the `index`th badge.
pub fn float_delay(index: usize) -> String {
	format!("{}s", index as f64 * FLOAT_STAGGER_S)
}

#[component]
fn TechTooltip(label: String, hovered: ReadSignal<bool>) -> impl IntoView {
	let (opaque, set_opaque) = signal(false);
	// Each run drops the previous run's handle, cancelling a fade-in that
	// has not fired yet.
	Effect::new(move |pending: Option<Option<Timeout>>| {
		drop(pending);
		if hovered.get() {
			Some(Timeout::new(FADE_IN_DELAY_MS, move || {
				let _ = set_opaque.try_set(true);
			}))
		} else {
			set_opaque.set(false);
			None
		}
	});

	view! {
		<Show when=move || hovered.get()>
			<div
				class="tech-tooltip"
				style=move || format!("{TOOLTIP_STYLE} opacity: {};", if opaque.get() { 1 } else { 0 })
			>
				{label.clone()}
			</div>
		</Show>
	}
}

/// Tooltip, hover styles and float delay for every `.tech-item`.
pub fn init() -> Result<(), FxError> {
	let items = dom::query_all(".tech-item");
	for (index, item) in items.iter().enumerate() {
		let (hovered, set_hovered) = signal(false);
		let label = item.get_attribute("data-tech").unwrap_or_default();
		leptos::mount::mount_to(item.clone(), move || {
			view! { <TechTooltip label=label hovered=hovered /> }
		})
		.forget();

		for (event, on) in [("mouseenter", true), ("mouseleave", false)] {
			let item_event = item.clone();
			EventListener::new(item, event, move |_| {
				for (property, value) in badge_style(on) {
					dom::set_style(&item_event, property, value);
				}
				set_hovered.set(on);
			})
			.forget();
		}

		dom::set_style(item, "animation-delay", &float_delay(index));
	}
	info!("portfolio-fx: {} tech badges", items.len());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn float_delays_are_staggered() {
		assert_eq!(float_delay(0), "0s");
		assert_eq!(float_delay(1), "0.5s");
		assert_eq!(float_delay(4), "2s");
	}

	#[test]
	fn hover_styles_toggle() {
		assert_eq!(badge_style(true)[0], ("transform", "scale(1.2)"));
		assert_eq!(badge_style(false)[0], ("transform", "scale(1)"));
		assert_eq!(badge_style(false)[2].1, "var(--primary-color)");
	}
}
