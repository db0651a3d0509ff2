#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `awaken-rs` decodes the packed item, inventory and awakening columns of a
//! legacy game server and turns them into display-ready records.
//!
pub use awaken_internal::*;
