use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;
use once_cell::sync::Lazy;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::error::SetupError;
use crate::page::{Listener, Page};

const LOGO_CLASS: &str = "c-logo__img";
const FLUID_CLASS: &str = "img-fluid";

const PLACEHOLDER_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="200" viewBox="0 0 300 200">"#,
    r##"<rect width="100%" height="100%" fill="#f8f9fa"/>"##,
    r##"<text x="50%" y="50%" font-family="Arial" font-size="14" fill="#6c757d" text-anchor="middle" dy=".3em">Bild nicht verfügbar</text>"##,
    "</svg>"
);

/// Data URI shown in place of images that fail to load.
pub static PLACEHOLDER: Lazy<String> =
    Lazy::new(|| format!("data:image/svg+xml;base64,{}", STANDARD.encode(PLACEHOLDER_SVG)));

/// The logo is above the fold and must not be deferred.
pub fn should_lazy_load(has_loading_attr: bool, is_logo: bool) -> bool {
    !has_loading_attr && !is_logo
}

pub struct ImagesHandle {
    _listeners: Vec<Listener>,
}

pub fn install(page: &Page) -> Result<ImagesHandle, SetupError> {
    let images: Vec<HtmlImageElement> = page
        .query_all("img")
        .into_iter()
        .filter_map(|img| img.dyn_into().ok())
        .collect();

    let mut listeners = Vec::with_capacity(images.len());
    for img in images {
        let classes = img.class_list();
        if should_lazy_load(img.has_attribute("loading"), classes.contains(LOGO_CLASS)) {
            let _ = img.set_attribute("loading", "lazy");
        }
        if !classes.contains(FLUID_CLASS) {
            let _ = classes.add_1(FLUID_CLASS);
        }

        let target = img.clone();
        listeners.push(Listener::new(img.as_ref(), "error", move |_| {
            if target.src() != *PLACEHOLDER {
                debug!("Image failed to load: {}", target.src());
                target.set_src(&PLACEHOLDER);
            }
        })?);
    }

    Ok(ImagesHandle {
        _listeners: listeners,
    })
}
