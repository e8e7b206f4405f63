//! Plugin resolution against the included builds of a composite.
//!
//! # Modules
//!
//! - [`composite`] - The included-builds resolver and its contributor
//! - [`visibility`] - Which included builds a consumer may take plugins from
//! - [`cache`] - Per-resolver memoization of resolution results
//! - [`binding`] - Resolutions and the classpath they are applied to
//! - [`contributor`] - The resolver seam and per-request result reporting

pub mod binding;
pub mod cache;
pub mod composite;
pub mod contributor;
mod types;
pub mod visibility;

pub use binding::{BindError, DependencyRef, PluginClasspath, PluginResolution, PluginResolveContext};
pub use cache::{CachedResolution, ResolutionCache};
pub use composite::{CompositeBuildPluginResolver, CompositeBuildPluginResolverContributor};
pub use contributor::{PluginResolver, PluginResolverContributor, ResolutionResult};
pub use types::*;
pub use visibility::{eligible_builds, is_eligible};
