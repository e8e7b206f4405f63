/// Application name, used for the binary banner and log targets.
pub const APP_NAME: &str = "incbuild";

/// Source label attached to every outcome of the included-builds resolver.
pub const INCLUDED_BUILDS_SOURCE: &str = "Included Builds";

/// Reason reported when included builds exist but none publish the plugin.
pub const NOT_IN_INCLUDED_BUILDS: &str = "None of the included builds contain this plugin";

/// Default name of the composite manifest at the root of a composite.
pub const COMPOSITE_FILENAME: &str = "composite.json";

/// Name of the per-build manifest inside each included build directory.
pub const BUILD_FILENAME: &str = "build.json";
