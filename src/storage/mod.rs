//! Durable key-value storage
//!
//! The credential store and session manager persist through this layer. Values
//! are opaque strings; callers own the serialization format.

pub mod backend;
pub mod filesystem;
pub mod memory;
pub mod validation;

pub use backend::KeyValueStorage;
pub use filesystem::FileStorage;
pub use memory::MemoryStorage;
pub use validation::validate_key;
