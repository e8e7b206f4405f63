//! Composite and build manifests.
//!
//! Manifests are the on-disk description of a composite: which builds are
//! included and what the projects of each build publish and request.

mod load;
mod types;

pub use load::load_composite;
pub use types::*;
