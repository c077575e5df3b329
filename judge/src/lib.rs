mod config;
mod game;
mod human;
mod player;
mod recording;
pub use config::*;
pub use game::*;
pub use human::*;
pub use player::*;
pub use recording::*;
