mod app;
mod coin;
mod hooks;
mod picker;
mod scheduler;
mod starfield;
mod wheel;

pub use crate::scheduler::{browser_source, BrowserHandle, BrowserScheduler};

use std::rc::Rc;
use suerte_core::Settings;
use wasm_bindgen::prelude::*;

/// Element whose text, if present, holds a JSON settings document.
const SETTINGS_ELEMENT: &str = "suerte-settings";

fn parse_settings(raw: Option<&str>) -> Settings {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Settings::default();
    };
    serde_json::from_str(raw).unwrap_or_else(|why| {
        log::warn!("ignoring page settings: {why}");
        Settings::default()
    })
}

fn page_settings() -> Settings {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SETTINGS_ELEMENT))
        .and_then(|e| e.text_content());
    parse_settings(raw.as_deref())
}

#[wasm_bindgen(start)]
pub fn run() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    let props = app::AppProps {
        settings: Rc::new(page_settings()),
    };
    yew::Renderer::<app::App>::with_props(props).render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use suerte_core::PickerSettings;

    #[test]
    fn page_settings_fall_back_to_defaults() {
        assert_eq!(parse_settings(None), Settings::default());
        assert_eq!(parse_settings(Some("  ")), Settings::default());
        assert_eq!(parse_settings(Some("{not json")), Settings::default());
    }

    #[test]
    fn page_settings_reach_every_section() {
        let raw = r#"{"coin":{"flip_ms":900},"wheel":{"spin_ms":2500},"starfield":{"stars":3}}"#;
        let settings = parse_settings(Some(raw));
        assert_eq!(settings.coin.flip_ms, 900);
        assert_eq!(settings.wheel.spin_ms, 2500);
        assert_eq!(settings.starfield.stars, 3);
        assert_eq!(settings.picker, PickerSettings::default());
    }
}
