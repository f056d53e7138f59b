use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use crate::error::SetupError;
use crate::page::{Observer, Page};

pub const COUNTER_SELECTOR: &str = "[data-count]";
const COUNTED_ATTR: &str = "data-counted";
const THRESHOLD: f64 = 0.5;

/// Linear count from zero to `target` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    pub target: i64,
    pub duration_ms: f64,
}

impl CountUp {
    /// Value to display `elapsed_ms` after the start, and whether the
    /// animation is finished.
    pub fn value_at(&self, elapsed_ms: f64) -> (i64, bool) {
        if self.duration_ms <= 0.0 {
            return (self.target, true);
        }
        let progress = elapsed_ms / self.duration_ms;
        if progress < 1.0 {
            ((self.target as f64 * progress).floor() as i64, false)
        } else {
            (self.target, true)
        }
    }
}

/// Integer prefix of an attribute value: leading whitespace, an optional
/// sign, then digits. Anything after the digits is ignored.
pub fn parse_target(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// German digit grouping: 1234567 -> "1.234.567".
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

pub struct CounterHandle {
    _observer: Observer,
}

pub fn install(page: &Page) -> Result<CounterHandle, SetupError> {
    let counters = page.query_all(COUNTER_SELECTOR);
    if counters.is_empty() {
        return Err(SetupError::MissingElement(COUNTER_SELECTOR.to_string()));
    }

    let window = page.window.clone();
    let duration_ms = f64::from(page.config.counter_duration_ms);
    let observer = Observer::new(THRESHOLD, None, move |entry| {
        let element = entry.target();
        if !entry.is_intersecting() || element.has_attribute(COUNTED_ATTR) {
            return;
        }
        let _ = element.set_attribute(COUNTED_ATTR, "true");
        let raw = element.get_attribute("data-count").unwrap_or_default();
        match parse_target(&raw) {
            Some(target) => animate(&window, element, CountUp { target, duration_ms }),
            None => debug!("Ignoring counter with data-count={:?}", raw),
        }
    })?;
    for counter in &counters {
        observer.observe(counter);
    }

    Ok(CounterHandle {
        _observer: observer,
    })
}

type FrameCallback = Closure<dyn FnMut(f64)>;

fn animate(window: &Window, element: Element, count: CountUp) {
    let frame: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let window_for_frames = window.clone();
    let mut started_at: Option<f64> = None;

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let start = *started_at.get_or_insert(now);
        let (value, done) = count.value_at(now - start);
        element.set_text_content(Some(&format_grouped(value)));
        if done {
            // drops this closure, ending the loop
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            let _ = window_for_frames.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_linearly_and_floors() {
        let count = CountUp {
            target: 250,
            duration_ms: 2000.0,
        };
        assert_eq!(count.value_at(0.0), (0, false));
        assert_eq!(count.value_at(1000.0), (125, false));
        assert_eq!(count.value_at(1999.0), (249, false));
        assert_eq!(count.value_at(2000.0), (250, true));
        assert_eq!(count.value_at(5000.0), (250, true));
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let count = CountUp {
            target: 42,
            duration_ms: 0.0,
        };
        assert_eq!(count.value_at(0.0), (42, true));
    }

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_target("1500"), Some(1500));
        assert_eq!(parse_target("  98%"), Some(98));
        assert_eq!(parse_target("-12"), Some(-12));
        assert_eq!(parse_target("+7 Jahre"), Some(7));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
    }

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1.000");
        assert_eq!(format_grouped(1234567), "1.234.567");
        assert_eq!(format_grouped(-25000), "-25.000");
    }
}
