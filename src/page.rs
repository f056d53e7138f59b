//! Thin helpers over web-sys shared by every page module.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::config::SiteConfig;
use crate::error::SetupError;
use crate::scheduler::Scheduler;

/// Everything a module needs to install itself on the live document.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub config: Rc<SiteConfig>,
    pub scheduler: Rc<dyn Scheduler>,
}

impl Page {
    pub fn new(window: Window, config: SiteConfig, scheduler: Rc<dyn Scheduler>) -> Result<Self, SetupError> {
        let document = window.document().ok_or(SetupError::NoDocument)?;
        Ok(Self {
            window,
            document,
            config: Rc::new(config),
            scheduler,
        })
    }

    pub fn body(&self) -> Result<HtmlElement, SetupError> {
        self.document
            .body()
            .ok_or_else(|| SetupError::MissingElement("body".to_string()))
    }

    pub fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    pub fn require(&self, selector: &str) -> Result<Element, SetupError> {
        self.query(selector)
            .ok_or_else(|| SetupError::MissingElement(selector.to_string()))
    }

    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        query_all_in(self.document.as_ref(), selector)
    }
}

/// `querySelectorAll` on a document or element, collected into elements.
pub fn query_all_in(root: &web_sys::Node, selector: &str) -> Vec<Element> {
    let list = if let Some(document) = root.dyn_ref::<Document>() {
        document.query_selector_all(selector)
    } else if let Some(element) = root.dyn_ref::<Element>() {
        element.query_selector_all(selector)
    } else {
        return Vec::new();
    };
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn as_html(element: &Element, selector: &str) -> Result<HtmlElement, SetupError> {
    element
        .clone()
        .dyn_into::<HtmlElement>()
        .map_err(|_| SetupError::WrongElementType {
            selector: selector.to_string(),
            expected: "HTMLElement",
        })
}

pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        let _ = style.set_property(property, value);
    }
}

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SetupError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Same as `new` but registered as passive, for scroll and resize.
    pub fn passive(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SetupError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// An `IntersectionObserver` that disconnects when dropped.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Observer {
    pub fn new(
        threshold: f64,
        root_margin: Option<&str>,
        mut on_entry: impl FnMut(&IntersectionObserverEntry) + 'static,
    ) -> Result<Self, SetupError> {
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        on_entry(&entry);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&wasm_bindgen::JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
