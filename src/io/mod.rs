pub mod config_io;
pub mod kv;
pub mod lock;
pub mod persist;
pub mod state;
pub mod watcher;
