use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, Level};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

mod app;
mod components;
mod config;
mod contact;
mod error;
mod page;
mod scheduler;
mod timing;
#[cfg(test)]
mod testing;

use app::PageEnhancements;
use config::SiteConfig;
use error::SetupError;
use page::Page;
use scheduler::WebScheduler;

thread_local! {
    // lives as long as the page
    static ENHANCEMENTS: RefCell<Option<PageEnhancements>> = const { RefCell::new(None) };
}

fn start() -> Result<(), SetupError> {
    let window = window().ok_or(SetupError::NoWindow)?;
    let config = SiteConfig::load(&window);
    let page = Page::new(window, config, Rc::new(WebScheduler::new()))?;
    let enhancements = PageEnhancements::install(&page);
    ENHANCEMENTS.with(|slot| slot.replace(Some(enhancements)));
    Ok(())
}

fn run() {
    if let Err(e) = start() {
        error!("Page enhancements not started: {}", e);
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting page enhancements");
    let Some(document) = window().and_then(|w| w.document()) else {
        error!("No document, nothing to enhance");
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once(run);
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
        on_ready.forget();
    } else {
        run();
    }
}
