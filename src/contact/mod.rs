//! Contact form: validation, inline errors and the simulated submission.

pub mod dom;
pub mod form;
pub mod outcome;
pub mod validation;

use std::rc::Rc;

use log::debug;

use self::dom::{DomForm, WebNavigator};
use self::form::{ContactForm, ContactServices, SubmitSettings};
use self::outcome::RandomOutcome;
use crate::components::notification::{DomToasts, Toaster};
use crate::error::SetupError;
use crate::page::{Listener, Page};

pub const FORM_SELECTOR: &str = "#contact-form";

/// Keeps the contact form wired up for as long as it lives.
pub struct ContactFormHandle {
    _toasts: Rc<DomToasts>,
    _submit: Listener,
}

pub fn install(page: &Page) -> Result<ContactFormHandle, SetupError> {
    let element = page.require(FORM_SELECTOR)?;

    let toasts = Rc::new(DomToasts::install(page)?);
    let services = ContactServices {
        scheduler: page.scheduler.clone(),
        notifier: Rc::new(Toaster::new(
            toasts.clone(),
            page.scheduler.clone(),
            page.config.toast_fade_ms,
        )),
        navigator: Rc::new(WebNavigator::new(page.window.clone())),
        outcome: Rc::new(RandomOutcome::new(page.config.failure_rate)),
    };
    let surface = Rc::new(DomForm::new(page.document.clone(), element.clone()));
    let form = ContactForm::new(surface, services, SubmitSettings::from(page.config.as_ref()))?;

    let submit = Listener::new(element.as_ref(), "submit", move |event| {
        event.prevent_default();
        let state = form.submit();
        debug!("Contact form submit -> {:?}", state);
    })?;

    Ok(ContactFormHandle {
        _toasts: toasts,
        _submit: submit,
    })
}
