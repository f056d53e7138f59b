use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::nav_menu::NAV_SELECTOR;
use crate::error::SetupError;
use crate::page::{Listener, Page};

const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;
const HEADER_SELECTOR: &str = ".l-header, header";
pub const FALLBACK_HEADER_PX: f64 = 80.0;

/// `#` and `#!` are placeholder links, not section anchors.
pub fn is_section_anchor(href: &str) -> bool {
    href.len() > 1 && href.starts_with('#') && href != "#!"
}

/// Where to scroll so the target sits just below the fixed header.
pub fn scroll_destination(target_top: f64, header_height: Option<f64>) -> f64 {
    (target_top - header_height.unwrap_or(FALLBACK_HEADER_PX)).max(0.0)
}

pub struct SmoothScrollHandle {
    _click: Listener,
}

pub fn install(page: &Page) -> Result<SmoothScrollHandle, SetupError> {
    let page_ref = page.clone();
    let click = Listener::new(page.document.as_ref(), "click", move |event| {
        let link = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(ANCHOR_SELECTOR).ok().flatten());
        let Some(link) = link else {
            return;
        };
        let href = link.get_attribute("href").unwrap_or_default();
        if !is_section_anchor(&href) {
            return;
        }
        let Some(target) = page_ref
            .query(&href)
            .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        event.prevent_default();
        let header_height = page_ref
            .query(HEADER_SELECTOR)
            .and_then(|h| h.dyn_into::<HtmlElement>().ok())
            .map(|h| f64::from(h.offset_height()));
        let top = scroll_destination(f64::from(target.offset_top()), header_height);
        debug!("Smooth scroll to {} at {}px", href, top);

        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        page_ref.window.scroll_to_with_scroll_to_options(&options);

        if let Some(nav) = page_ref.query(NAV_SELECTOR) {
            if nav.class_list().contains("show") {
                let _ = nav.class_list().remove_1("show");
                if let Ok(body) = page_ref.body() {
                    let _ = body.class_list().remove_1("u-no-scroll");
                }
            }
        }
    })?;

    Ok(SmoothScrollHandle { _click: click })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_links_are_ignored() {
        assert!(!is_section_anchor("#"));
        assert!(!is_section_anchor("#!"));
        assert!(!is_section_anchor("/about"));
        assert!(is_section_anchor("#kontakt"));
    }

    #[test]
    fn destination_subtracts_header() {
        assert_eq!(scroll_destination(1200.0, Some(72.0)), 1128.0);
        assert_eq!(scroll_destination(1200.0, None), 1120.0);
    }

    #[test]
    fn destination_never_goes_above_the_page() {
        assert_eq!(scroll_destination(30.0, Some(72.0)), 0.0);
        assert_eq!(scroll_destination(0.0, None), 0.0);
    }
}
