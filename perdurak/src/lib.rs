pub use cards::*;
pub use config::*;
pub use deck::*;
pub use engine::*;
pub use errors::*;
pub use hand::*;
pub use move_checker::*;
pub use protocol_types::*;
pub use table::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod cards;
mod config;
mod deck;
mod engine;
mod errors;
mod hand;
pub mod move_checker;
mod protocol_types;
mod table;
mod visualization;
