//! Player front end: the [`Player`] frame loop, the UI control surface and
//! pointer input.

pub mod input;
pub mod player;
pub mod ui;

pub use input::{Input, MouseButton};
pub use player::{FrameChanges, FrameReport, Player, PlayerStatus};
pub use ui::{
    ControlEvent, ControlPanel, MuteButtonIcon, PlayButtonIcon, SpeedOptions, TimelineSlider,
};
