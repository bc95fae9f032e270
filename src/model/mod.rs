pub mod board;
pub mod config;
pub mod error;
pub mod keybinds;
pub mod task;
pub mod view_cache;

pub use board::*;
pub use config::*;
pub use error::*;
pub use keybinds::*;
pub use task::*;
pub use view_cache::*;
