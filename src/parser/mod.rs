//! Parser layer
//! - properties.rs: escape-free `key=value` parser for the generated class-path file

pub mod properties;

pub use properties::parse_properties;
