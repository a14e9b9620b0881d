//! Search query builder: identifiers from a fixed allow-list only, values as parameters.

mod builder;
pub use builder::*;
