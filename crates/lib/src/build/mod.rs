//! Builds of a composite and their configured state.
//!
//! A composite consists of a root build plus any number of included builds.
//! Included builds are registered up front but only configured when something
//! needs their state, through [`BuildUnit::with_state`].
//!
//! # Submodules
//!
//! - [`registry`] - The [`BuildRegistry`] and the [`IncludedBuildsProvider`] seam
//! - [`unit`] - The [`BuildUnit`] trait and lazily configured [`IncludedBuild`]s

pub mod registry;
mod types;
pub mod unit;

pub use registry::{BuildRegistry, IncludedBuildsProvider};
pub use types::*;
pub use unit::{BuildLoader, BuildUnit, IncludedBuild};
