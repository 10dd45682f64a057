//! The validation pipeline: primitive grammars, object structure, and the
//! resource-level entry points.

mod primitive;
mod resource;
mod structure;

pub use resource::ResourceValidator;
