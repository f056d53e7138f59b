use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a page module could not be installed. None of these are fatal for the
/// page; the module that hits one simply stays off.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("element `{selector}` is not a {expected}")]
    WrongElementType {
        selector: String,
        expected: &'static str,
    },
    #[error("invalid site config: {0}")]
    Config(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SetupError::Js(text)
    }
}
