//! Plugin identity and plugin requests.
//!
//! A [`PluginId`] is validated once, when a [`PluginRequest`] is parsed from a
//! build script or the command line. Everything downstream compares ids by
//! exact string equality.

mod types;

pub use types::*;
