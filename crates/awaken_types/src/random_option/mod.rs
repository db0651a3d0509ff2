//! Packed random-option ("awakening") codec.
//!
//! A random-option id is a 64-bit integer holding up to three attribute
//! adjustments plus a "safe" flag that seals the item's options.
//!
//! # Bit Layout
//!
//! ```text
//!  63 62 61 60                  44 43                  26 25                   8 7      0
//! ┌─────┬──┬──────────────────────┬──────────────────────┬──────────────────────┬────────┐
//! │  -  │S │       slot 3         │       slot 2         │       slot 1         │reserved│
//! └─────┴──┴──────────────────────┴──────────────────────┴──────────────────────┴────────┘
//!
//! slot (18 bits):  [17..10] dst   [9..0] adj_raw
//! ```
//!
//! Slots are packed from slot 1 upwards; the first zero slot ends the list.
//! The third slot's top bit shares bit 61 with the safe flag, so a `dst` of
//! 128 or more cannot be stored in the third slot.
//!
//! # Examples
//!
//! ```
//! use awaken_types::random_option::{self, OptionInput, RandomOption};
//!
//! let id = random_option::encode(&[OptionInput::with_adj(34, 12)], false);
//! let packed = random_option::unpack(id);
//!
//! assert!(!packed.safe);
//! assert_eq!(packed.options, vec![RandomOption::new(34, 500)]);
//! assert_eq!(packed.options[0].adj(), 12);
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeRegistry, ValueFormat};
use crate::error::OptionError;

mod constants;

pub use self::constants::*;

/// One attribute adjustment as stored in an 18-bit slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RandomOption {
	/// Attribute id
	pub dst: u32,
	/// Raw 10-bit adjustment
	pub adj_raw: u16,
}

impl RandomOption {
	/// Creates an option from its raw adjustment; bits above the 10-bit field are dropped.
	pub fn new(dst: u32, adj_raw: u16) -> Self {
		Self {
			dst,
			adj_raw: (u32::from(adj_raw) & ADJ_MASK) as u16,
		}
	}

	/// Creates an option from the magnitude view.
	///
	/// `adj_raw = 512 - adj` when `adj >= 1`, otherwise `adj_raw = adj`,
	/// truncated to 10 bits.
	pub fn from_adj(dst: u32, adj: i32) -> Self {
		let raw = if adj >= 1 {
			i64::from(MAX_AWAKE_VALUE) - i64::from(adj)
		} else {
			i64::from(adj)
		};
		Self {
			dst,
			adj_raw: (raw & i64::from(ADJ_MASK)) as u16,
		}
	}

	/// Splits an 18-bit slot value.
	pub fn from_slot_value(value: u32) -> Self {
		Self {
			dst: value >> ADJ_BITS,
			adj_raw: (value & ADJ_MASK) as u16,
		}
	}

	/// Magnitude view of the adjustment (`512 - adj_raw`).
	pub fn adj(&self) -> i32 {
		MAX_AWAKE_VALUE - i32::from(self.adj_raw)
	}

	/// Packs the option into its 18-bit slot value.
	pub fn slot_value(&self) -> u32 {
		((self.dst << ADJ_BITS) | (u32::from(self.adj_raw) & ADJ_MASK)) & OPTION_MASK as u32
	}
}

/// Caller-supplied option for [`encode`].
///
/// Either `adj_raw` or `adj` must be present; `adj_raw` wins when both are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionInput {
	/// Attribute id
	pub dst: Option<u32>,
	/// Raw 10-bit adjustment
	pub adj_raw: Option<u16>,
	/// Magnitude view of the adjustment
	pub adj: Option<i32>,
}

impl OptionInput {
	/// Input carrying a raw adjustment.
	pub fn with_raw(dst: u32, adj_raw: u16) -> Self {
		Self {
			dst: Some(dst),
			adj_raw: Some(adj_raw),
			adj: None,
		}
	}

	/// Input carrying a magnitude.
	pub fn with_adj(dst: u32, adj: i32) -> Self {
		Self {
			dst: Some(dst),
			adj_raw: None,
			adj: Some(adj),
		}
	}

	/// Resolves the input, or `None` if it cannot be encoded.
	pub fn resolve(&self) -> Option<RandomOption> {
		let dst = self.dst?;
		match (self.adj_raw, self.adj) {
			(Some(raw), _) => Some(RandomOption::new(dst, raw)),
			(None, Some(adj)) => Some(RandomOption::from_adj(dst, adj)),
			(None, None) => None,
		}
	}
}

impl From<RandomOption> for OptionInput {
	fn from(option: RandomOption) -> Self {
		Self::with_raw(option.dst, option.adj_raw)
	}
}

/// Structural view of a packed id, without attribute resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedOptions {
	/// Whether the safe flag is set
	pub safe: bool,
	/// Options in slot order
	pub options: Vec<RandomOption>,
}

/// Returns true if the safe flag is set.
pub fn is_safe(id: u64) -> bool {
	id & SAFE_FLAG != 0
}

/// Splits a packed id into its options.
///
/// A set safe flag short-circuits to an empty option list. Otherwise slots are
/// read from bit 8 upwards until the first zero slot.
pub fn unpack(id: u64) -> PackedOptions {
	if is_safe(id) {
		return PackedOptions {
			safe: true,
			options: Vec::new(),
		};
	}

	let options = (0..MAX_RANDOM_OPTION)
		.map(|slot| ((id >> (FIRST_SLOT_SHIFT + SLOT_BITS * slot as u32)) & OPTION_MASK) as u32)
		.take_while(|&value| value != 0)
		.map(RandomOption::from_slot_value)
		.collect();

	PackedOptions {
		safe: false,
		options,
	}
}

/// Packs resolved options into an id. Only the first three are used.
pub fn pack(options: &[RandomOption], safe: bool) -> u64 {
	let mut id = options
		.iter()
		.take(MAX_RANDOM_OPTION)
		.enumerate()
		.fold(0u64, |acc, (slot, option)| {
			acc | (u64::from(option.slot_value()) << (FIRST_SLOT_SHIFT + SLOT_BITS * slot as u32))
		});

	if safe {
		id |= SAFE_FLAG;
	}
	id
}

/// Encodes caller-supplied options into an id.
///
/// Only the first three inputs are considered. An input without `dst`, or
/// without both `adj_raw` and `adj`, is skipped and does not consume a slot.
pub fn encode(inputs: &[OptionInput], safe: bool) -> u64 {
	let options: Vec<RandomOption> = inputs
		.iter()
		.take(MAX_RANDOM_OPTION)
		.enumerate()
		.filter_map(|(index, input)| {
			let resolved = input.resolve();
			if resolved.is_none() {
				debug!("Skipping incomplete option input #{index}: {input:?}");
			}
			resolved
		})
		.collect();

	pack(&options, safe)
}

/// A decoded option ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedOption {
	/// Attribute id
	pub dst: u32,
	/// Attribute key, if the attribute is known
	#[serde(skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
	/// Raw 10-bit adjustment
	pub adj_raw: u16,
	/// Magnitude view of the adjustment
	pub adj: i32,
	/// Attribute display name, key, or the numeric id when unknown
	pub label: String,
	/// Rendered value, e.g. `+12` or `+3%`
	pub value: String,
	/// Set when the attribute could not be resolved
	#[serde(skip)]
	pub error: Option<OptionError>,
}

impl DecodedOption {
	/// Returns true if the attribute resolved against the registry.
	pub fn is_resolved(&self) -> bool {
		self.error.is_none()
	}
}

/// Result of [`decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedOptions {
	/// Whether the safe flag is set
	pub safe_flag: bool,
	/// Options in slot order
	pub options: Vec<DecodedOption>,
}

impl DecodedOptions {
	/// Returns true if no options were decoded.
	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}
}

/// Resolves a single option against the registry.
pub fn decode_option(
	slot: usize,
	option: RandomOption,
	registry: &AttributeRegistry,
) -> Result<DecodedOption, OptionError> {
	let attribute = registry.lookup(option.dst).map_err(|_| OptionError::UnknownAttribute {
		slot,
		dst: option.dst,
		value: option.slot_value(),
	})?;

	Ok(DecodedOption {
		dst: option.dst,
		key: Some(attribute.key.clone()),
		adj_raw: option.adj_raw,
		adj: option.adj(),
		label: attribute.label().to_string(),
		value: attribute.with_unit(attribute.format.render_adjustment(option.adj_raw)),
		error: None,
	})
}

/// Decodes a packed id into display-ready options.
///
/// An option whose attribute is unknown is kept, labelled with its numeric
/// id and rendered with the standard format.
pub fn decode(id: u64, registry: &AttributeRegistry) -> DecodedOptions {
	let packed = unpack(id);

	let options = packed
		.options
		.into_iter()
		.enumerate()
		.map(|(slot, option)| {
			decode_option(slot, option, registry).unwrap_or_else(|err| {
				warn!("Random option 0x{id:016X}: {err}");
				DecodedOption {
					dst: option.dst,
					key: None,
					adj_raw: option.adj_raw,
					adj: option.adj(),
					label: option.dst.to_string(),
					value: ValueFormat::Standard.render_adjustment(option.adj_raw),
					error: Some(err),
				}
			})
		})
		.collect();

	DecodedOptions {
		safe_flag: packed.safe,
		options,
	}
}
