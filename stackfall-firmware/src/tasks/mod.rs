//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels and the
//! shared controls.

pub mod buttons;
pub mod game;
pub mod score_link;

pub use buttons::button_task;
pub use game::game_task;
pub use score_link::score_link_task;
