use log::debug;

use crate::error::SetupError;
use crate::page::{Listener, Page};

pub const PRIVACY_LINK_SELECTOR: &str = r#"a[href*="privacy"]"#;

/// Privacy links navigate normally; the listener only notes the click.
pub struct PrivacyLinksHandle {
    _listeners: Vec<Listener>,
}

pub fn opens_in_new_tab(target: Option<&str>) -> bool {
    target == Some("_blank")
}

pub fn install(page: &Page) -> Result<PrivacyLinksHandle, SetupError> {
    let mut listeners = Vec::new();
    for link in page.query_all(PRIVACY_LINK_SELECTOR) {
        let anchor = link.clone();
        listeners.push(Listener::new(link.as_ref(), "click", move |_| {
            let target = anchor.get_attribute("target");
            debug!(
                "Privacy link clicked: {} (new tab: {})",
                anchor.get_attribute("href").unwrap_or_default(),
                opens_in_new_tab(target.as_deref())
            );
        })?);
    }
    Ok(PrivacyLinksHandle {
        _listeners: listeners,
    })
}
