use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::error::SetupError;
use crate::page::{Listener, Page};
use crate::scheduler::Scheduler;

pub const DEFAULT_DISPLAY_MS: u32 = 5000;
pub const DEFAULT_FADE_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn alert_class(self) -> &'static str {
        match self {
            Severity::Success => "alert-success",
            Severity::Error => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub display_duration_ms: u32,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
            display_duration_ms: DEFAULT_DISPLAY_MS,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            display_duration_ms: DEFAULT_DISPLAY_MS,
        }
    }

    pub fn with_duration(mut self, display_duration_ms: u32) -> Self {
        self.display_duration_ms = display_duration_ms;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(pub u64);

/// Where toasts are drawn. `remove` must tolerate ids that are already gone.
pub trait ToastSurface {
    fn append(&self, id: ToastId, notification: &Notification);
    fn is_shown(&self, id: ToastId) -> bool;
    fn begin_fade(&self, id: ToastId);
    fn remove(&self, id: ToastId);
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Shows toasts and retires each one on its own timer: visible for its
/// display duration, then a short fade, then removed.
pub struct Toaster {
    surface: Rc<dyn ToastSurface>,
    scheduler: Rc<dyn Scheduler>,
    fade_ms: u32,
    next_id: Cell<u64>,
}

impl Toaster {
    pub fn new(surface: Rc<dyn ToastSurface>, scheduler: Rc<dyn Scheduler>, fade_ms: u32) -> Self {
        Self {
            surface,
            scheduler,
            fade_ms,
            next_id: Cell::new(0),
        }
    }
}

impl Notifier for Toaster {
    fn notify(&self, notification: Notification) {
        let id = ToastId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        debug!("Toast {:?}: {}", notification.severity, notification.message);
        self.surface.append(id, &notification);

        let surface = self.surface.clone();
        let scheduler = self.scheduler.clone();
        let fade_ms = self.fade_ms;
        self.scheduler.schedule(
            notification.display_duration_ms,
            Box::new(move || {
                if !surface.is_shown(id) {
                    // dismissed by hand already
                    surface.remove(id);
                    return;
                }
                surface.begin_fade(id);
                scheduler.schedule(fade_ms, Box::new(move || surface.remove(id)));
            }),
        );
    }
}

/// Toast stack rendered as Bootstrap alerts in a fixed top-right container.
pub struct DomToasts {
    document: Document,
    container: Element,
    toasts: RefCell<HashMap<ToastId, (Element, Listener)>>,
}

impl DomToasts {
    pub fn install(page: &Page) -> Result<Self, SetupError> {
        let container = page.document.create_element("div")?;
        container.set_class_name("position-fixed top-0 end-0 p-3");
        if let Ok(html) = container.clone().dyn_into::<HtmlElement>() {
            let _ = html.style().set_property("z-index", "9999");
        }
        page.body()?.append_child(&container)?;
        Ok(Self {
            document: page.document.clone(),
            container,
            toasts: RefCell::new(HashMap::new()),
        })
    }

    fn build(&self, notification: &Notification) -> Result<(Element, Listener), SetupError> {
        let alert = self.document.create_element("div")?;
        alert.set_class_name(&format!(
            "alert {} alert-dismissible fade show",
            notification.severity.alert_class()
        ));
        if let Ok(html) = alert.clone().dyn_into::<HtmlElement>() {
            let _ = html.style().set_property("box-shadow", "var(--shadow-lg)");
        }
        // text node, never markup
        let text = self.document.create_text_node(&notification.message);
        alert.append_child(&text)?;

        let close = self.document.create_element("button")?;
        close.set_attribute("type", "button")?;
        close.set_class_name("btn-close");
        alert.append_child(&close)?;

        let target = alert.clone();
        let listener = Listener::new(close.as_ref(), "click", move |_| target.remove())?;
        Ok((alert, listener))
    }
}

impl ToastSurface for DomToasts {
    fn append(&self, id: ToastId, notification: &Notification) {
        match self.build(notification) {
            Ok((alert, listener)) => {
                if self.container.append_child(&alert).is_ok() {
                    self.toasts.borrow_mut().insert(id, (alert, listener));
                }
            }
            Err(e) => debug!("Could not render toast: {}", e),
        }
    }

    fn is_shown(&self, id: ToastId) -> bool {
        self.toasts
            .borrow()
            .get(&id)
            .map(|(alert, _)| alert.is_connected())
            .unwrap_or(false)
    }

    fn begin_fade(&self, id: ToastId) {
        if let Some((alert, _)) = self.toasts.borrow().get(&id) {
            let _ = alert.class_list().remove_1("show");
        }
    }

    fn remove(&self, id: ToastId) {
        let removed = self.toasts.borrow_mut().remove(&id);
        if let Some((alert, _listener)) = removed {
            alert.remove();
        }
    }
}

impl Drop for DomToasts {
    fn drop(&mut self) {
        self.container.remove();
    }
}
