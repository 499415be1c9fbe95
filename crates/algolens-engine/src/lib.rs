//! Orchestration layer: the playback cursor over a trace and the session
//! that ties a structure's state, its latest trace and the undo history
//! together.

mod playback;
mod session;

pub use playback::{Playback, TickToken};
pub use session::Session;
