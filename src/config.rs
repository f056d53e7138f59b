use log::{info, warn};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::components::notification::{DEFAULT_DISPLAY_MS, DEFAULT_FADE_MS};
use crate::error::SetupError;

/// Name of the optional global object a page can define to tune the script.
pub const CONFIG_GLOBAL: &str = "__siteConfig";

/// Timings and knobs for the page modules. Every field has a default, so a
/// page may override just the ones it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub submit_delay_ms: u32,
    pub redirect_delay_ms: u32,
    pub failure_rate: f64,
    pub confirmation_url: String,
    pub toast_duration_ms: u32,
    pub toast_fade_ms: u32,
    pub newsletter_delay_ms: u32,
    pub counter_duration_ms: u32,
    pub mobile_breakpoint_px: f64,
    pub scroll_top_threshold_px: f64,
    pub scroll_spy_offset_px: f64,
    pub throttle_ms: u32,
    pub resize_debounce_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            redirect_delay_ms: 1000,
            failure_rate: 0.1,
            confirmation_url: "thank_you.html".to_string(),
            toast_duration_ms: DEFAULT_DISPLAY_MS,
            toast_fade_ms: DEFAULT_FADE_MS,
            newsletter_delay_ms: 1000,
            counter_duration_ms: 2000,
            mobile_breakpoint_px: 1024.0,
            scroll_top_threshold_px: 300.0,
            scroll_spy_offset_px: 100.0,
            throttle_ms: 100,
            resize_debounce_ms: 250,
        }
    }
}

impl SiteConfig {
    /// Clamps values that would otherwise break the modules using them.
    pub fn normalized(mut self) -> Self {
        if self.failure_rate.is_nan() {
            self.failure_rate = Self::default().failure_rate;
        }
        self.failure_rate = self.failure_rate.clamp(0.0, 1.0);
        if self.confirmation_url.trim().is_empty() {
            self.confirmation_url = Self::default().confirmation_url;
        }
        self
    }

    pub fn from_js(value: JsValue) -> Result<Self, SetupError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value::<SiteConfig>(value)
            .map(SiteConfig::normalized)
            .map_err(|e| SetupError::Config(e.to_string()))
    }

    /// Reads `window.__siteConfig`, falling back to defaults when it is absent
    /// or unusable.
    pub fn load(window: &web_sys::Window) -> Self {
        let raw = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str(CONFIG_GLOBAL))
            .unwrap_or(JsValue::UNDEFINED);
        match Self::from_js(raw) {
            Ok(config) => {
                if config != Self::default() {
                    info!("Using site config overrides from window.{}", CONFIG_GLOBAL);
                }
                config
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }
}
