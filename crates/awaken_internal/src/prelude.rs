//! Prelude module for `awaken_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use awaken_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let window = ContainerWindow::new(0, 42);
//! let slots = parse_container(ContainerSource::new("0,21/", "0/", ""), window, &ParseOptions::default());
//! assert_eq!(slots[0].item_id, Some(21));
//! ```

// Re-export everything from awaken_types::prelude
#[doc(inline)]
pub use awaken_types::prelude::*;

// Re-export the entire awaken_types module for advanced usage
#[doc(inline)]
pub use awaken_types;
