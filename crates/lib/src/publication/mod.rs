//! Project publications and plugin publication lookup.
//!
//! Every configured build exposes a [`ProjectPublicationRegistry`] describing
//! what its projects publish. The composite resolver only cares about plugin
//! publications and reads them through [`find_publication`].

mod lookup;
mod registry;
mod types;

pub use lookup::find_publication;
pub use registry::ProjectPublicationRegistry;
pub use types::*;
