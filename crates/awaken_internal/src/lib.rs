//! This module is separated into its own crate to keep the facade thin, and should not be used directly.

/// `use awaken_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export awaken_types for convenience
pub use awaken_types;

// Re-export commonly used types at crate root
pub use awaken_types::catalog::ItemCatalog;
pub use awaken_types::container::{ContainerSource, ContainerWindow};
pub use awaken_types::presentation::{Assembler, PresentationRecord};
pub use awaken_types::{attribute, catalog, container, error, presentation, random_option, settings};
