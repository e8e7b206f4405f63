//! incbuild-lib: plugin resolution across the builds of a composite
//!
//! A composite is a root build plus the builds included into it. When a build
//! script requests a plugin, the plugin may be implemented by a project of
//! another included build. This crate decides which build, if any, provides it:
//! - `build`: the builds of a composite and their lazily configured state
//! - `publication`: what the projects of a build publish
//! - `resolve`: the included-builds plugin resolver, its cache and bindings
//! - `manifest`: loading a composite from `composite.json` / `build.json`

pub mod build;
pub mod consts;
pub mod manifest;
pub mod plugin;
pub mod publication;
pub mod resolve;
