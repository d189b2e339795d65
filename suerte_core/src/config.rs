use crate::labels::ListBounds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The wheel never spins with fewer options than this.
pub const WHEEL_MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub coin: CoinSettings,
    pub wheel: WheelSettings,
    pub picker: PickerSettings,
    pub starfield: StarfieldSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinSettings {
    pub flip_ms: u64,
}

impl Default for CoinSettings {
    fn default() -> Self {
        Self { flip_ms: 1500 }
    }
}

impl CoinSettings {
    pub fn flip(&self) -> Duration {
        Duration::from_millis(self.flip_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    pub spin_ms: u64,
    /// Full turns always added to a spin.
    pub min_turns: f64,
    /// Up to this many extra turns, drawn uniformly.
    pub extra_turns: f64,
    pub max_options: usize,
    pub max_label_chars: usize,
    pub options: Vec<String>,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            spin_ms: 4000,
            min_turns: 5.0,
            extra_turns: 3.0,
            max_options: 12,
            max_label_chars: 20,
            options: (1..=4).map(|i| format!("Option {i}")).collect(),
        }
    }
}

impl WheelSettings {
    pub fn spin(&self) -> Duration {
        Duration::from_millis(self.spin_ms)
    }

    pub fn bounds(&self) -> ListBounds {
        ListBounds {
            min: WHEEL_MIN_OPTIONS,
            max: Some(self.max_options.max(WHEEL_MIN_OPTIONS)),
            max_chars: Some(self.max_label_chars),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    pub tick_ms: u64,
    pub ticks: u32,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            ticks: 20,
        }
    }
}

impl PickerSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn bounds(&self) -> ListBounds {
        ListBounds::UNBOUNDED
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    pub stars: usize,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub min_twinkle: f64,
    pub twinkle_spread: f64,
    pub background: String,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            stars: 200,
            max_radius: 1.5,
            min_opacity: 0.3,
            max_opacity: 1.0,
            min_twinkle: 0.01,
            twinkle_spread: 0.02,
            background: "#0a0e27".to_string(),
        }
    }
}
