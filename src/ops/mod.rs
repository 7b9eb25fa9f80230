pub mod hierarchy_ops;
pub mod store;

pub use hierarchy_ops::{Change, StoreError};
pub use store::{ChangeSink, HierarchyStore, NullSink};
