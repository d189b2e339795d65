pub mod coin;
pub mod config;
pub mod geometry;
pub mod labels;
pub mod picker;
pub mod reveal;
pub mod rng;
pub mod schedule;
pub mod select;
pub mod session;
pub mod shell;
pub mod starfield;
pub mod wheel;
pub mod widget;

pub use crate::coin::CoinFlip;
pub use crate::config::{CoinSettings, PickerSettings, Settings, StarfieldSettings, WheelSettings};
pub use crate::labels::{LabelList, ListBounds};
pub use crate::picker::Picker;
pub use crate::reveal::{Phase, Reveal};
pub use crate::rng::{derive_floats, derive_hash_hex, RandomSource, SeededSource, ThreadSource};
pub use crate::schedule::{ManualScheduler, Repeat, Scheduler};
pub use crate::select::{flip, pick_index, select};
pub use crate::session::Mounted;
pub use crate::shell::{Panel, Shell, SourceFactory};
pub use crate::starfield::{Backdrop, Star, Starfield};
pub use crate::wheel::{Wheel, Winner};
pub use crate::widget::{Cadence, Progress, Widget};
pub use suerte_shared::{CoinFace, Guarded, Rejection, RevealPhase, Tab};
