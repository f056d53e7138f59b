//! Purely decorative pointer effects: ripples on buttons and lifted cards.

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::error::SetupError;
use crate::page::{set_styles, Listener, Page};

pub const RIPPLE_SELECTOR: &str = ".btn, .c-button, a.nav-link, .card";
pub const CARD_SELECTOR: &str = ".card, .c-card, .award-item, .trust-badge";
const RIPPLE_MS: u32 = 600;
const RIPPLE_KEYFRAMES: &str =
    "@keyframes ripple-animation { to { transform: scale(2.5); opacity: 0; } }";

pub const CARD_TRANSITION: &str = "all 0.4s ease-in-out";
pub const CARD_LIFTED: [(&str, &str); 2] = [
    ("transform", "translateY(-10px) scale(1.02)"),
    ("box-shadow", "0 12px 40px rgba(255, 107, 53, 0.25)"),
];
pub const CARD_RESTING: [(&str, &str); 2] = [
    ("transform", "translateY(0) scale(1)"),
    ("box-shadow", "var(--shadow-sm)"),
];

/// Box of the clicked element, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// A circle covering the larger side of `rect`, centred on the pointer.
pub fn ripple_at(rect: Rect, client_x: f64, client_y: f64) -> Ripple {
    let size = rect.width.max(rect.height);
    Ripple {
        size,
        left: client_x - rect.left - size / 2.0,
        top: client_y - rect.top - size / 2.0,
    }
}

/// Ripples need a positioning context, unless the element already is one.
pub fn needs_relative_position(position: &str) -> bool {
    position != "absolute" && position != "fixed"
}

pub struct EffectsHandle {
    _listeners: Vec<Listener>,
}

pub fn install(page: &Page) -> Result<EffectsHandle, SetupError> {
    let mut listeners = Vec::new();

    for element in page.query_all(RIPPLE_SELECTOR) {
        let Ok(host) = element.dyn_into::<HtmlElement>() else {
            continue;
        };
        let target = host.clone();
        let page_ref = page.clone();
        listeners.push(Listener::new(host.as_ref(), "mousedown", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                spawn_ripple(&page_ref, &target, mouse);
            }
        })?);
    }

    let mut cards = 0;
    for element in page.query_all(CARD_SELECTOR) {
        let Ok(card) = element.dyn_into::<HtmlElement>() else {
            continue;
        };
        set_styles(&card, &[("transition", CARD_TRANSITION)]);
        let enter = card.clone();
        listeners.push(Listener::new(card.as_ref(), "mouseenter", move |_| {
            set_styles(&enter, &CARD_LIFTED);
        })?);
        let leave = card.clone();
        listeners.push(Listener::new(card.as_ref(), "mouseleave", move |_| {
            set_styles(&leave, &CARD_RESTING);
        })?);
        cards += 1;
    }
    debug!("Hover lift on {} cards", cards);

    Ok(EffectsHandle {
        _listeners: listeners,
    })
}

fn spawn_ripple(page: &Page, host: &HtmlElement, event: &MouseEvent) {
    let bounds = host.get_bounding_client_rect();
    let ripple = ripple_at(
        Rect {
            left: bounds.left(),
            top: bounds.top(),
            width: bounds.width(),
            height: bounds.height(),
        },
        f64::from(event.client_x()),
        f64::from(event.client_y()),
    );

    let Some(span) = page
        .document
        .create_element("span")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let size = format!("{}px", ripple.size);
    let left = format!("{}px", ripple.left);
    let top = format!("{}px", ripple.top);
    set_styles(
        &span,
        &[
            ("width", size.as_str()),
            ("height", size.as_str()),
            ("left", left.as_str()),
            ("top", top.as_str()),
            ("position", "absolute"),
            ("border-radius", "50%"),
            ("background", "rgba(255, 255, 255, 0.6)"),
            ("pointer-events", "none"),
            ("transform", "scale(0)"),
            ("animation", "ripple-animation 0.6s ease-out"),
        ],
    );

    ensure_keyframes(page);
    let position = host.style().get_property_value("position").unwrap_or_default();
    if needs_relative_position(&position) {
        set_styles(host, &[("position", "relative")]);
    }
    set_styles(host, &[("overflow", "hidden")]);
    if host.append_child(&span).is_err() {
        return;
    }

    page.scheduler
        .schedule(RIPPLE_MS, Box::new(move || span.remove()));
}

fn ensure_keyframes(page: &Page) {
    if page.query("style[data-ripple]").is_some() {
        return;
    }
    let Some(head) = page.document.head() else {
        return;
    };
    if let Ok(style) = page.document.create_element("style") {
        let _ = style.set_attribute("data-ripple", "true");
        style.set_text_content(Some(RIPPLE_KEYFRAMES));
        let _ = head.append_child(&style);
    }
}
