pub mod config;
pub mod connections;
pub mod error;
pub mod geometry;
pub mod id;
pub mod model;
pub mod persist;
pub mod px;
pub mod registry;
pub mod store;
pub mod surface;

pub use config::{BoardConfig, DEFAULT_STORAGE_KEY};
pub use connections::ConnectionGraph;
pub use error::{LoadError, PxError, SaveError, StoreError};
pub use id::{ConnectionId, NodeId};
pub use model::*;
pub use registry::NodeRegistry;
pub use store::{BlobStore, MemoryStore};
pub use surface::{LineId, LineSurface, MemorySurface};

// Re-export geometry types so downstream crates don't need a direct dependency
pub use kurbo::{Line, Point, Size, Vec2};
