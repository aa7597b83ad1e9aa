mod navigator;
mod timer;

pub use crux_core::render::Render;

pub use self::navigator::{NavigationOperation, Navigator};
pub use self::timer::{Timer, TimerId, TimerOperation, TimerOutput};

use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "crate::App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub timer: Timer<Event>,
    pub navigator: Navigator<Event>,
}
