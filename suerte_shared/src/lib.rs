use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Panel shown by the shell.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Coin,
    Wheel,
    Picker,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Coin, Tab::Wheel, Tab::Picker];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Coin => "Coin",
            Tab::Wheel => "Wheel",
            Tab::Picker => "Lucky draw",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CoinFace {
    Heads,
    Tails,
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoinFace::Heads => "heads",
            CoinFace::Tails => "tails",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevealPhase {
    #[default]
    Idle,
    Animating,
    Revealed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinView {
    pub phase: RevealPhase,
    pub face: Option<CoinFace>,
    pub can_trigger: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WheelView {
    pub phase: RevealPhase,
    pub options: Vec<String>,
    pub rotation_deg: f64,
    pub winner: Option<String>,
    pub can_trigger: bool,
    pub can_add: bool,
    pub can_remove: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickerView {
    pub phase: RevealPhase,
    pub participants: Vec<String>,
    pub highlight: Option<String>,
    pub winner: Option<String>,
    pub ticks_elapsed: u32,
    pub can_trigger: bool,
}

/// One revealed result, as printed by the terminal front end.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DrawRecord {
    pub ts: DateTime<Utc>,
    pub tab: Tab,
    pub result: String,
    pub seed_hash: Option<String>,
}

/// Why a user action was ignored. None of these are failures; the UI shows
/// them as disabled controls.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("a selection is already in progress")]
    Busy,
    #[error("label is empty")]
    EmptyLabel,
    #[error("label is longer than {max} characters")]
    LabelTooLong { max: usize },
    #[error("list already holds the maximum of {max} items")]
    ListFull { max: usize },
    #[error("list must keep at least {min} items")]
    AtMinimum { min: usize },
    #[error("no item at index {index} (list has {len})")]
    NoSuchItem { index: usize, len: usize },
    #[error("need at least {required} items, have {have}")]
    NotEnoughItems { required: usize, have: usize },
    #[error("cannot select from an empty list")]
    EmptySelection,
}

pub type Guarded<T = ()> = Result<T, Rejection>;
