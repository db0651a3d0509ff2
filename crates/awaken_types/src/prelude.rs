//! Prelude module for `awaken_types`.
//!
//! This module provides a convenient way to import commonly used types and functions.
//!
//! # Examples
//!
//! ```
//! use awaken_types::prelude::*;
//!
//! let id = random_option::encode(&[OptionInput::with_raw(34, 500)], false);
//! assert_eq!(random_option::unpack(id).options, vec![RandomOption::new(34, 500)]);
//! ```

// Attribute registry
#[doc(inline)]
pub use crate::attribute::{AttributeDefinition, AttributeRegistry, ValueFormat};

// Item catalog
#[doc(inline)]
pub use crate::catalog::{CatalogShard, ItemCatalog, ItemDefinition, ItemKind, SEARCH_LIMIT};

// Slot containers
#[doc(inline)]
pub use crate::container::{
	ContainerSource, ContainerWindow, ExtensionPairing, ParseOptions, SlotRecord, parse_container,
};

// Errors
#[doc(inline)]
pub use crate::error::{AttributeError, CatalogError, OptionError, SettingsError};

// Presentation
#[doc(inline)]
pub use crate::presentation::{Assembler, CharacterColumns, CharacterInventory, PresentationRecord, StatLine};

// Random options
#[doc(inline)]
pub use crate::random_option::{DecodedOption, DecodedOptions, OptionInput, PackedOptions, RandomOption};

// Settings
#[doc(inline)]
pub use crate::settings::Settings;

// Re-export the codec module for advanced usage
#[doc(inline)]
pub use crate::random_option;
