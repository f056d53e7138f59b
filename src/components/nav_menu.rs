use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, Node};

use crate::error::SetupError;
use crate::page::{as_html, query_all_in, set_styles, Listener, Page};
use crate::timing::Debounce;

pub const TOGGLE_SELECTOR: &str = ".navbar-toggler";
pub const NAV_SELECTOR: &str = "#main-nav";

pub trait MenuSurface {
    fn is_open(&self) -> bool;
    fn set_open(&self, open: bool);
}

/// Collapsible mobile navigation.
pub struct NavMenu {
    surface: Rc<dyn MenuSurface>,
    breakpoint_px: f64,
}

impl NavMenu {
    pub fn new(surface: Rc<dyn MenuSurface>, breakpoint_px: f64) -> Self {
        Self {
            surface,
            breakpoint_px,
        }
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_open()
    }

    pub fn toggle(&self) {
        let open = !self.surface.is_open();
        self.surface.set_open(open);
    }

    pub fn close(&self) {
        if self.surface.is_open() {
            self.surface.set_open(false);
        }
    }

    pub fn on_key(&self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    pub fn on_document_click(&self, inside_nav: bool, inside_toggle: bool) {
        if !inside_nav && !inside_toggle {
            self.close();
        }
    }

    /// The desktop layout has no collapsed menu.
    pub fn on_resize(&self, viewport_width: f64) {
        if viewport_width >= self.breakpoint_px {
            self.close();
        }
    }
}

struct DomMenu {
    toggle: Element,
    nav: HtmlElement,
    body: HtmlElement,
}

impl MenuSurface for DomMenu {
    fn is_open(&self) -> bool {
        self.nav.class_list().contains("show")
    }

    fn set_open(&self, open: bool) {
        let nav_classes = self.nav.class_list();
        let body_classes = self.body.class_list();
        if open {
            let _ = nav_classes.add_1("show");
            let _ = body_classes.add_1("u-no-scroll");
            let _ = self.toggle.set_attribute("aria-expanded", "true");
            set_styles(&self.nav, &[("height", "calc(100vh - var(--header-h))")]);
        } else {
            let _ = nav_classes.remove_1("show");
            let _ = body_classes.remove_1("u-no-scroll");
            let _ = self.toggle.set_attribute("aria-expanded", "false");
            set_styles(&self.nav, &[("height", "0")]);
        }
    }
}

pub struct NavMenuHandle {
    _listeners: Vec<Listener>,
}

pub fn install(page: &Page) -> Result<NavMenuHandle, SetupError> {
    let toggle = page.require(TOGGLE_SELECTOR)?;
    let nav = as_html(&page.require(NAV_SELECTOR)?, NAV_SELECTOR)?;
    let surface = Rc::new(DomMenu {
        toggle: toggle.clone(),
        nav: nav.clone(),
        body: page.body()?,
    });
    let menu = Rc::new(NavMenu::new(surface, page.config.mobile_breakpoint_px));
    let mut listeners = Vec::new();

    let m = menu.clone();
    listeners.push(Listener::new(toggle.as_ref(), "click", move |event| {
        event.prevent_default();
        event.stop_propagation();
        m.toggle();
        debug!("Nav menu open: {}", m.is_open());
    })?);

    let m = menu.clone();
    listeners.push(Listener::new(page.document.as_ref(), "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            m.on_key(&key.key());
        }
    })?);

    let m = menu.clone();
    let (nav_node, toggle_node): (Node, Node) = (nav.clone().into(), toggle.clone().into());
    listeners.push(Listener::new(page.document.as_ref(), "click", move |event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let inside_nav = nav_node.contains(target.as_ref());
        let inside_toggle = toggle_node.contains(target.as_ref());
        m.on_document_click(inside_nav, inside_toggle);
    })?);

    for link in query_all_in(nav.as_ref(), ".nav-link") {
        let m = menu.clone();
        listeners.push(Listener::new(link.as_ref(), "click", move |_| m.close())?);
    }

    let m = menu;
    let window = page.window.clone();
    let debounce = Debounce::new(page.config.resize_debounce_ms, page.scheduler.clone());
    listeners.push(Listener::passive(page.window.as_ref(), "resize", move |_| {
        let m = m.clone();
        let window = window.clone();
        debounce.call(move || {
            if let Some(width) = window.inner_width().ok().and_then(|w| w.as_f64()) {
                m.on_resize(width);
            }
        });
    })?);

    Ok(NavMenuHandle {
        _listeners: listeners,
    })
}
