// Version management layer
// - registry.rs: VersionRegistry and the process-wide instance
// - error.rs: Loader errors

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{CURRENT_VERSION, VersionRegistry};
