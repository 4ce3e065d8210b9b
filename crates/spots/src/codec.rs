//! JSON wire format for the stored spot list.
//!
//! The stored value is a compact JSON array of spot objects. Decoding is
//! all-or-nothing: one bad record rejects the whole document, and the caller
//! decides how to recover.

use serde_json::Value;
use thiserror::Error;

use crate::collection::SpotCollection;
use crate::spot::Spot;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("stored spots are not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("stored spot at index {index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode spots: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SpotCollection {
    /// Compact JSON array, one object per spot.
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(CodecError::Encode)
    }

    /// Decode a stored value.
    ///
    /// A well-formed document that is not an array decodes to an empty
    /// collection; malformed JSON or a malformed record is an error.
    pub fn from_json(raw: &str) -> Result<Self, CodecError> {
        let document: Value = serde_json::from_str(raw).map_err(CodecError::Malformed)?;
        let Value::Array(records) = document else {
            return Ok(Self::new());
        };

        let mut spots = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let spot: Spot = serde_json::from_value(record)
                .map_err(|source| CodecError::InvalidRecord { index, source })?;
            spots.push(spot);
        }
        Ok(spots.into())
    }
}
