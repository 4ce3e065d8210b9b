//! Spot domain module.
//!
//! This crate contains the rules for saved spots, implemented purely as
//! deterministic domain logic (no IO, no storage, no platform calls).

pub mod codec;
pub mod collection;
pub mod spot;

pub use codec::CodecError;
pub use collection::SpotCollection;
pub use spot::{Coordinates, Spot, resolve_name};
