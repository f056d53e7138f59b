use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement, Window};

use crate::contact::validation::is_valid_email;
use crate::error::SetupError;
use crate::page::{Listener, Page};
use crate::scheduler::Scheduler;

pub const FORM_SELECTOR: &str = ".newsletter-form";
pub const INVALID_EMAIL: &str = "Bitte geben Sie eine gültige E-Mail-Adresse ein.";
pub const SUBSCRIBED: &str = "Vielen Dank! Sie wurden erfolgreich angemeldet.";
pub const SENDING: &str = "Wird gesendet...";

pub trait SignupSurface {
    fn email(&self) -> String;
    fn clear_email(&self);
    /// `None` when the form has no submit button.
    fn button_label(&self) -> Option<String>;
    fn set_button(&self, label: &str, disabled: bool);
    fn alert(&self, message: &str);
}

/// Newsletter signup stub: checks the address, then pretends to subscribe.
pub struct NewsletterForm {
    surface: Rc<dyn SignupSurface>,
    scheduler: Rc<dyn Scheduler>,
    delay_ms: u32,
}

impl NewsletterForm {
    pub fn new(surface: Rc<dyn SignupSurface>, scheduler: Rc<dyn Scheduler>, delay_ms: u32) -> Self {
        Self {
            surface,
            scheduler,
            delay_ms,
        }
    }

    /// Returns whether the address was accepted.
    pub fn submit(&self) -> bool {
        let email = self.surface.email();
        if !is_valid_email(email.trim()) {
            self.surface.alert(INVALID_EMAIL);
            return false;
        }

        let Some(original_label) = self.surface.button_label() else {
            debug!("Newsletter form without submit button");
            return true;
        };
        info!("Newsletter signup");
        self.surface.set_button(SENDING, true);

        let surface = self.surface.clone();
        self.scheduler.schedule(
            self.delay_ms,
            Box::new(move || {
                surface.alert(SUBSCRIBED);
                surface.clear_email();
                surface.set_button(&original_label, false);
            }),
        );
        true
    }
}

struct DomSignup {
    window: Window,
    input: Option<HtmlInputElement>,
    button: Option<HtmlButtonElement>,
}

impl DomSignup {
    fn new(window: Window, form: &Element) -> Self {
        let find = |selector: &str| form.query_selector(selector).ok().flatten();
        Self {
            window,
            input: find(r#"input[type="email"]"#).and_then(|e| e.dyn_into().ok()),
            button: find(r#"button[type="submit"]"#).and_then(|e| e.dyn_into().ok()),
        }
    }
}

impl SignupSurface for DomSignup {
    fn email(&self) -> String {
        self.input.as_ref().map(|i| i.value()).unwrap_or_default()
    }

    fn clear_email(&self) {
        if let Some(input) = &self.input {
            input.set_value("");
        }
    }

    fn button_label(&self) -> Option<String> {
        self.button
            .as_ref()
            .map(|b| b.text_content().unwrap_or_default())
    }

    fn set_button(&self, label: &str, disabled: bool) {
        if let Some(button) = &self.button {
            button.set_disabled(disabled);
            button.set_text_content(Some(label));
        }
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

pub struct NewsletterHandle {
    _listeners: Vec<Listener>,
}

pub fn install(page: &Page) -> Result<NewsletterHandle, SetupError> {
    let forms = page.query_all(FORM_SELECTOR);
    if forms.is_empty() {
        return Err(SetupError::MissingElement(FORM_SELECTOR.to_string()));
    }

    let mut listeners = Vec::with_capacity(forms.len());
    for form in &forms {
        let newsletter = NewsletterForm::new(
            Rc::new(DomSignup::new(page.window.clone(), form)),
            page.scheduler.clone(),
            page.config.newsletter_delay_ms,
        );
        listeners.push(Listener::new(form.as_ref(), "submit", move |event| {
            event.prevent_default();
            newsletter.submit();
        })?);
    }

    Ok(NewsletterHandle {
        _listeners: listeners,
    })
}
