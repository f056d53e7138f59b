use log::debug;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::error::SetupError;
use crate::page::{set_styles, Observer, Page};

pub const REVEAL_SELECTOR: &str =
    ".card, .c-card, img, .btn, .hero-section, section, .award-item, .trust-badge";
const THRESHOLD: f64 = 0.15;
const ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const VISIBLE_CLASS: &str = "is-visible";

/// Inline styles for the two ends of the reveal animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
}

pub const HIDDEN: RevealStyle = RevealStyle {
    opacity: "0",
    transform: "translateY(30px)",
};

pub const SHOWN: RevealStyle = RevealStyle {
    opacity: "1",
    transform: "translateY(0)",
};

pub const TRANSITION: &str = "opacity 0.8s ease-out, transform 0.8s ease-out";

impl RevealStyle {
    pub fn properties(&self) -> [(&'static str, &'static str); 2] {
        [("opacity", self.opacity), ("transform", self.transform)]
    }
}

/// Elements are revealed once and stay revealed when scrolled out again.
pub fn style_for(is_intersecting: bool) -> Option<RevealStyle> {
    is_intersecting.then_some(SHOWN)
}

pub struct RevealHandle {
    _observer: Observer,
}

pub fn install(page: &Page) -> Result<RevealHandle, SetupError> {
    let observer = Observer::new(THRESHOLD, Some(ROOT_MARGIN), |entry| {
        let Some(style) = style_for(entry.is_intersecting()) else {
            return;
        };
        let target = entry.target();
        let _ = target.class_list().add_1(VISIBLE_CLASS);
        if let Some(html) = target.dyn_ref::<HtmlElement>() {
            set_styles(html, &style.properties());
        }
    })?;

    let mut count = 0;
    for element in page.query_all(REVEAL_SELECTOR) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            set_styles(html, &HIDDEN.properties());
            set_styles(html, &[("transition", TRANSITION)]);
        }
        observer.observe(&element);
        count += 1;
    }
    debug!("Reveal animation on {} elements", count);

    Ok(RevealHandle {
        _observer: observer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_intersecting_entries_are_revealed() {
        assert_eq!(style_for(true), Some(SHOWN));
        assert_eq!(style_for(false), None);
    }

    #[test]
    fn hidden_state_is_offset_and_transparent() {
        assert_eq!(
            HIDDEN.properties(),
            [("opacity", "0"), ("transform", "translateY(30px)")]
        );
        assert_eq!(SHOWN.properties(), [("opacity", "1"), ("transform", "translateY(0)")]);
    }
}
