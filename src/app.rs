use log::{info, warn};

use crate::components::{
    counter, effects, images, nav_menu, newsletter, privacy, reveal, scroll_spy, scroll_top, smooth_scroll,
};
use crate::contact;
use crate::error::SetupError;
use crate::page::Page;

/// Every enhancement on the page, installed once. Each field owns its
/// module's listeners; a module that could not be installed is `None` and
/// the rest of the page works without it.
pub struct PageEnhancements {
    pub nav_menu: Option<nav_menu::NavMenuHandle>,
    pub reveal: Option<reveal::RevealHandle>,
    pub effects: Option<effects::EffectsHandle>,
    pub scroll_spy: Option<scroll_spy::ScrollSpyHandle>,
    pub smooth_scroll: Option<smooth_scroll::SmoothScrollHandle>,
    pub counters: Option<counter::CounterHandle>,
    pub contact_form: Option<contact::ContactFormHandle>,
    pub newsletter: Option<newsletter::NewsletterHandle>,
    pub scroll_top: Option<scroll_top::ScrollTopHandle>,
    pub images: Option<images::ImagesHandle>,
    pub privacy_links: Option<privacy::PrivacyLinksHandle>,
}

impl PageEnhancements {
    pub fn install(page: &Page) -> Self {
        let enhancements = Self {
            nav_menu: enable("nav menu", nav_menu::install(page)),
            reveal: enable("scroll reveal", reveal::install(page)),
            effects: enable("pointer effects", effects::install(page)),
            scroll_spy: enable("scroll spy", scroll_spy::install(page)),
            smooth_scroll: enable("smooth scroll", smooth_scroll::install(page)),
            counters: enable("counters", counter::install(page)),
            contact_form: enable("contact form", contact::install(page)),
            newsletter: enable("newsletter", newsletter::install(page)),
            scroll_top: enable("scroll to top", scroll_top::install(page)),
            images: enable("images", images::install(page)),
            privacy_links: enable("privacy links", privacy::install(page)),
        };
        info!("Page enhancements ready ({} active)", enhancements.active());
        enhancements
    }

    pub fn active(&self) -> usize {
        [
            self.nav_menu.is_some(),
            self.reveal.is_some(),
            self.effects.is_some(),
            self.scroll_spy.is_some(),
            self.smooth_scroll.is_some(),
            self.counters.is_some(),
            self.contact_form.is_some(),
            self.newsletter.is_some(),
            self.scroll_top.is_some(),
            self.images.is_some(),
            self.privacy_links.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}

fn enable<T>(name: &str, result: Result<T, SetupError>) -> Option<T> {
    match result {
        Ok(handle) => {
            info!("Enabled {}", name);
            Some(handle)
        }
        Err(SetupError::MissingElement(selector)) => {
            info!("Skipping {}: no `{}` on this page", name, selector);
            None
        }
        Err(e) => {
            warn!("Could not enable {}: {}", name, e);
            None
        }
    }
}
