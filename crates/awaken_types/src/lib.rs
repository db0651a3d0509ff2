//! This crate provides the item, inventory and awakening codecs for the `awaken-rs` project.
//!
//! # Modules
//!
//! - **`random_option`**: 64-bit packed random options ("awakenings") with a safe flag
//! - **`container`**: `/` and `,` delimited slot containers (inventory, bank, pockets)
//! - **`catalog`**: Range-sharded item catalog with lazily loaded partitions
//! - **`attribute`**: Attribute id to key, name and unit registry
//! - **`presentation`**: Display-ready records combining all of the above
//! - **`settings`**: Layered runtime settings
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use awaken_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load(None)?;
//! let catalog = ItemCatalog::open(&settings.catalog_dir)?;
//! let registry = AttributeRegistry::open(&settings.attributes_path)?;
//!
//! let assembler = Assembler::new(&catalog, &registry, &settings);
//! let source = ContainerSource::new("0,21,,,,1/", "0/", "");
//! for record in assembler.occupied(source, settings.inventory()) {
//! 	println!("{:?}", record.display_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use awaken_types::random_option;
//!
//! let packed = random_option::unpack(0x2000_0000_0000_0000);
//! assert!(packed.safe);
//! ```

pub mod attribute;
pub mod catalog;
pub mod container;
pub mod error;
pub mod presentation;
pub mod random_option;
pub mod settings;

/// `use awaken_types::prelude::*;` to import commonly used items.
pub mod prelude;
