use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window};

use super::form::{FieldHandle, FormSurface, Navigator, SubmitControl};
use super::validation::FieldId;
use crate::page::query_all_in;

const SPINNER: &str = r#"<span class="spinner-border spinner-border-sm me-2"></span>"#;

/// Marker class on a field that failed validation.
pub const INVALID_CLASS: &str = "is-invalid";
/// Class of the inline message inserted after an invalid field.
pub const FEEDBACK_CLASS: &str = "invalid-feedback";

fn class_selector(class: &str) -> String {
    format!(".{}", class)
}

/// `#contact-form` on the live page.
pub struct DomForm {
    document: Document,
    form: Element,
}

impl DomForm {
    pub fn new(document: Document, form: Element) -> Self {
        Self { document, form }
    }
}

impl FormSurface for DomForm {
    fn field(&self, id: FieldId) -> Option<Rc<dyn FieldHandle>> {
        let element = self.document.get_element_by_id(id.dom_id())?;
        Some(Rc::new(DomField {
            document: self.document.clone(),
            element,
        }))
    }

    fn submit_control(&self) -> Option<Rc<dyn SubmitControl>> {
        let button = self
            .form
            .query_selector(r#"button[type="submit"]"#)
            .ok()
            .flatten()?
            .dyn_into::<HtmlButtonElement>()
            .ok()?;
        Some(Rc::new(DomButton { button }))
    }

    fn clear_errors(&self) {
        for error in query_all_in(self.form.as_ref(), &class_selector(FEEDBACK_CLASS)) {
            error.remove();
        }
        for field in query_all_in(self.form.as_ref(), &class_selector(INVALID_CLASS)) {
            let _ = field.class_list().remove_1(INVALID_CLASS);
        }
    }
}

struct DomField {
    document: Document,
    element: Element,
}

impl FieldHandle for DomField {
    fn value(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            self.element.text_content().unwrap_or_default()
        }
    }

    fn is_checked(&self) -> bool {
        self.element
            .dyn_ref::<HtmlInputElement>()
            .map(|input| input.checked())
            .unwrap_or(false)
    }

    fn mark_invalid(&self, message: &str) {
        let _ = self.element.class_list().add_1(INVALID_CLASS);
        let Ok(error) = self.document.create_element("div") else {
            return;
        };
        error.set_class_name(FEEDBACK_CLASS);
        if let Some(html) = error.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("display", "block");
        }
        error.set_text_content(Some(message));
        if let Some(parent) = self.element.parent_node() {
            let _ = parent.append_child(&error);
        }
    }
}

struct DomButton {
    button: HtmlButtonElement,
}

impl SubmitControl for DomButton {
    fn label(&self) -> String {
        self.button.text_content().unwrap_or_default()
    }

    fn set_busy(&self, label: &str) {
        self.button.set_disabled(true);
        self.button.set_inner_html(&format!("{}{}", SPINNER, label));
    }

    fn restore(&self, label: &str) {
        self.button.set_disabled(false);
        self.button.set_text_content(Some(label));
    }
}

pub struct WebNavigator {
    window: Window,
}

impl WebNavigator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Navigator for WebNavigator {
    fn navigate(&self, url: &str) {
        let _ = self.window.location().set_href(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_selects_the_classes_marking_adds() {
        assert_eq!(class_selector(INVALID_CLASS), ".is-invalid");
        assert_eq!(class_selector(FEEDBACK_CLASS), ".invalid-feedback");
        for class in [INVALID_CLASS, FEEDBACK_CLASS] {
            assert!(!class.contains(char::is_whitespace), "{class}");
        }
    }
}
