use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::error::SetupError;
use crate::page::{Listener, Page};
use crate::timing::Throttle;

pub const SECTION_SELECTOR: &str = "section[id]";
pub const LINK_SELECTOR: &str = r##".nav-link[href^="#"]"##;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// The section under `scroll_y + offset`. When sections overlap the last one
/// in document order wins.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, offset: f64) -> Option<&str> {
    let position = scroll_y + offset;
    sections
        .iter()
        .rev()
        .find(|s| s.contains(position))
        .map(|s| s.id.as_str())
}

pub fn links_to(href: &str, section_id: &str) -> bool {
    href.strip_prefix('#') == Some(section_id)
}

pub struct ScrollSpyHandle {
    _scroll: Listener,
}

pub fn install(page: &Page) -> Result<ScrollSpyHandle, SetupError> {
    let sections: Vec<HtmlElement> = page
        .query_all(SECTION_SELECTOR)
        .into_iter()
        .filter_map(|s| s.dyn_into::<HtmlElement>().ok())
        .collect();
    let links = page.query_all(LINK_SELECTOR);
    if sections.is_empty() {
        return Err(SetupError::MissingElement(SECTION_SELECTOR.to_string()));
    }
    if links.is_empty() {
        return Err(SetupError::MissingElement(LINK_SELECTOR.to_string()));
    }

    let window = page.window.clone();
    let offset = page.config.scroll_spy_offset_px;
    let throttle = Throttle::new(page.config.throttle_ms, page.scheduler.clone());

    let scroll = Listener::passive(page.window.as_ref(), "scroll", move |_| {
        throttle.call(|| {
            let bounds: Vec<SectionBounds> = sections
                .iter()
                .map(|s| SectionBounds {
                    id: s.id(),
                    top: f64::from(s.offset_top()),
                    height: f64::from(s.offset_height()),
                })
                .collect();
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            if let Some(id) = active_section(&bounds, scroll_y, offset) {
                highlight(&links, id);
            }
        });
    })?;

    Ok(ScrollSpyHandle { _scroll: scroll })
}

fn highlight(links: &[Element], section_id: &str) {
    for link in links {
        let _ = link.class_list().remove_1("active");
        let _ = link.remove_attribute("aria-current");
        let href = link.get_attribute("href").unwrap_or_default();
        if links_to(&href, section_id) {
            let _ = link.class_list().add_1("active");
            let _ = link.set_attribute("aria-current", "page");
        }
    }
}
