pub mod config;
pub mod filter;
pub mod hierarchy;
pub mod id;
pub mod item;

pub use config::*;
pub use filter::*;
pub use hierarchy::*;
pub use id::*;
pub use item::*;
