use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::error::SetupError;
use crate::page::{as_html, set_styles, Listener, Page};
use crate::timing::Throttle;

const BUTTON_STYLE: &str = "position: fixed; bottom: 30px; right: 30px; width: 50px; height: 50px; \
    background: linear-gradient(135deg, var(--color-primary), var(--color-accent-hover)); color: white; \
    border: none; border-radius: 50%; font-size: 24px; cursor: pointer; opacity: 0; \
    transition: opacity 0.3s ease-in-out, transform 0.3s ease-in-out; z-index: 1000; \
    box-shadow: var(--shadow-lg);";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLook {
    pub opacity: &'static str,
    pub transform: &'static str,
}

pub const SHOWN: ButtonLook = ButtonLook {
    opacity: "1",
    transform: "scale(1)",
};

pub const HIDDEN: ButtonLook = ButtonLook {
    opacity: "0",
    transform: "scale(0.8)",
};

pub const HOVER_TRANSFORM: &str = "scale(1.15)";

pub fn look_for(scroll_y: f64, threshold_px: f64) -> ButtonLook {
    if scroll_y > threshold_px {
        SHOWN
    } else {
        HIDDEN
    }
}

/// Owns the injected button; dropping the handle takes it off the page.
pub struct ScrollTopHandle {
    button: HtmlElement,
    _listeners: Vec<Listener>,
}

impl Drop for ScrollTopHandle {
    fn drop(&mut self) {
        self.button.remove();
    }
}

pub fn install(page: &Page) -> Result<ScrollTopHandle, SetupError> {
    let element = page.document.create_element("button")?;
    element.set_class_name("scroll-to-top");
    element.set_text_content(Some("↑"));
    element.set_attribute("aria-label", "Nach oben scrollen")?;
    element.set_attribute("style", BUTTON_STYLE)?;
    let button = as_html(&element, "button.scroll-to-top")?;
    page.body()?.append_child(&button)?;

    let mut listeners = Vec::new();

    let b = button.clone();
    let window = page.window.clone();
    let threshold = page.config.scroll_top_threshold_px;
    let throttle = Throttle::new(page.config.throttle_ms, page.scheduler.clone());
    listeners.push(Listener::passive(page.window.as_ref(), "scroll", move |_| {
        throttle.call(|| {
            let look = look_for(window.scroll_y().unwrap_or(0.0), threshold);
            set_styles(&b, &[("opacity", look.opacity), ("transform", look.transform)]);
        });
    })?);

    let window = page.window.clone();
    listeners.push(Listener::new(button.as_ref(), "click", move |_| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    })?);

    let enter = button.clone();
    listeners.push(Listener::new(button.as_ref(), "mouseenter", move |_| {
        set_styles(&enter, &[("transform", HOVER_TRANSFORM)]);
    })?);
    let leave = button.clone();
    listeners.push(Listener::new(button.as_ref(), "mouseleave", move |_| {
        set_styles(&leave, &[("transform", SHOWN.transform)]);
    })?);

    Ok(ScrollTopHandle {
        button,
        _listeners: listeners,
    })
}
