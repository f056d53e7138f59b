//! In-memory stand-ins for the DOM surfaces, shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::components::notification::{Notification, Notifier, Severity, ToastId, ToastSurface};
use crate::contact::form::{FieldHandle, FormSurface, Navigator, SubmitControl};
use crate::contact::validation::FieldId;

type ErrorLog = Rc<RefCell<Vec<(&'static str, String)>>>;

pub struct FakeField {
    dom_id: &'static str,
    value: RefCell<String>,
    checked: Cell<bool>,
    errors: ErrorLog,
    invalid: Rc<RefCell<Vec<&'static str>>>,
}

impl FieldHandle for FakeField {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn is_checked(&self) -> bool {
        self.checked.get()
    }

    fn mark_invalid(&self, message: &str) {
        self.invalid.borrow_mut().push(self.dom_id);
        self.errors.borrow_mut().push((self.dom_id, message.to_string()));
    }
}

pub struct FakeButton {
    disabled: Cell<bool>,
    text: RefCell<String>,
}

impl FakeButton {
    pub fn disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl SubmitControl for FakeButton {
    fn label(&self) -> String {
        self.text()
    }

    fn set_busy(&self, label: &str) {
        self.disabled.set(true);
        *self.text.borrow_mut() = label.to_string();
    }

    fn restore(&self, label: &str) {
        self.disabled.set(false);
        *self.text.borrow_mut() = label.to_string();
    }
}

pub struct FakeForm {
    fields: HashMap<FieldId, Rc<FakeField>>,
    button: Option<Rc<FakeButton>>,
    errors: ErrorLog,
    invalid: Rc<RefCell<Vec<&'static str>>>,
    clears: Cell<usize>,
}

impl FakeForm {
    pub fn empty() -> Self {
        let errors: ErrorLog = Rc::default();
        let invalid: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let fields = FieldId::ALL
            .iter()
            .map(|id| {
                let field = FakeField {
                    dom_id: id.dom_id(),
                    value: RefCell::new(String::new()),
                    checked: Cell::new(false),
                    errors: errors.clone(),
                    invalid: invalid.clone(),
                };
                (*id, Rc::new(field))
            })
            .collect();
        Self {
            fields,
            button: Some(Rc::new(FakeButton {
                disabled: Cell::new(false),
                text: RefCell::new("Nachricht senden".to_string()),
            })),
            errors,
            invalid,
            clears: Cell::new(0),
        }
    }

    pub fn valid() -> Self {
        let form = Self::empty();
        form.fill_valid();
        form
    }

    pub fn without(mut self, id: FieldId) -> Self {
        self.fields.remove(&id);
        self
    }

    pub fn without_button(mut self) -> Self {
        self.button = None;
        self
    }

    pub fn fill_valid(&self) {
        self.set_value(FieldId::Name, "Max Mustermann");
        self.set_value(FieldId::Email, "max@example.de");
        self.set_value(FieldId::Phone, "+49 30 1234567");
        self.set_value(FieldId::Message, "Bitte rufen Sie mich zurück.");
        self.set_checked(true);
    }

    pub fn set_value(&self, id: FieldId, value: &str) {
        if let Some(field) = self.fields.get(&id) {
            *field.value.borrow_mut() = value.to_string();
        }
    }

    pub fn set_checked(&self, checked: bool) {
        if let Some(field) = self.fields.get(&FieldId::PrivacyConsent) {
            field.checked.set(checked);
        }
    }

    pub fn inline_errors(&self) -> Vec<(&'static str, String)> {
        self.errors.borrow().clone()
    }

    pub fn invalid_fields(&self) -> Vec<&'static str> {
        self.invalid.borrow().clone()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.get()
    }

    pub fn button(&self) -> Rc<FakeButton> {
        self.button.clone().expect("fake form has no button")
    }
}

impl FormSurface for FakeForm {
    fn field(&self, id: FieldId) -> Option<Rc<dyn FieldHandle>> {
        self.fields.get(&id).map(|f| f.clone() as Rc<dyn FieldHandle>)
    }

    fn submit_control(&self) -> Option<Rc<dyn SubmitControl>> {
        self.button.clone().map(|b| b as Rc<dyn SubmitControl>)
    }

    fn clear_errors(&self) {
        self.errors.borrow_mut().clear();
        self.invalid.borrow_mut().clear();
        self.clears.set(self.clears.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(Severity, String)> {
        self.sent
            .borrow()
            .iter()
            .map(|n| (n.severity, n.message.clone()))
            .collect()
    }

    pub fn durations(&self) -> Vec<u32> {
        self.sent.borrow().iter().map(|n| n.display_duration_ms).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.borrow_mut().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.visited.borrow_mut().push(url.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToastState {
    Shown,
    Fading,
    Dismissed,
}

#[derive(Default)]
pub struct FakeToasts {
    toasts: RefCell<Vec<(ToastId, String, ToastState)>>,
}

impl FakeToasts {
    pub fn len(&self) -> usize {
        self.toasts.borrow().len()
    }

    pub fn visible_messages(&self) -> Vec<String> {
        self.toasts
            .borrow()
            .iter()
            .filter(|(_, _, state)| *state == ToastState::Shown)
            .map(|(_, message, _)| message.clone())
            .collect()
    }

    pub fn fading_count(&self) -> usize {
        self.toasts
            .borrow()
            .iter()
            .filter(|(_, _, state)| *state == ToastState::Fading)
            .count()
    }

    /// What the close button does.
    pub fn dismiss(&self, id: ToastId) {
        for toast in self.toasts.borrow_mut().iter_mut() {
            if toast.0 == id {
                toast.2 = ToastState::Dismissed;
            }
        }
    }
}

impl ToastSurface for FakeToasts {
    fn append(&self, id: ToastId, notification: &Notification) {
        self.toasts
            .borrow_mut()
            .push((id, notification.message.clone(), ToastState::Shown));
    }

    fn is_shown(&self, id: ToastId) -> bool {
        self.toasts
            .borrow()
            .iter()
            .any(|(toast, _, state)| *toast == id && *state != ToastState::Dismissed)
    }

    fn begin_fade(&self, id: ToastId) {
        for toast in self.toasts.borrow_mut().iter_mut() {
            if toast.0 == id {
                toast.2 = ToastState::Fading;
            }
        }
    }

    fn remove(&self, id: ToastId) {
        self.toasts.borrow_mut().retain(|(toast, _, _)| *toast != id);
    }
}
