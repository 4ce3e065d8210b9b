//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of a saved spot.
///
/// Opaque on the way in: any non-empty string read from storage is a valid id.
/// Freshly generated ids look like `1714564800000-k3j2h1` (unix millis plus a
/// random base36 suffix), so they sort roughly by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(String);

impl SpotId {
    /// Generate an identifier stamped with `at`.
    pub fn generate_at(at: DateTime<Utc>) -> Self {
        Self(format!("{}-{}", at.timestamp_millis(), random_suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn random_suffix() -> String {
    let mut entropy = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(BASE36[(entropy % 36) as usize] as char);
        entropy /= 36;
    }
    suffix
}

impl core::fmt::Display for SpotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SpotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SpotId> for String {
    fn from(value: SpotId) -> Self {
        value.0
    }
}

impl FromStr for SpotId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::invalid_id("SpotId: empty"));
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generated_id_has_millis_prefix_and_base36_suffix() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let id = SpotId::generate_at(at);

        let (prefix, suffix) = id.as_str().split_once('-').unwrap();
        assert_eq!(prefix, at.timestamp_millis().to_string());
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn generated_ids_differ() {
        let at = Utc::now();
        assert_ne!(SpotId::generate_at(at), SpotId::generate_at(at));
    }

    #[test]
    fn parse_accepts_any_non_empty_string() {
        let id: SpotId = "legacy id".parse().unwrap();
        assert_eq!(id.as_str(), "legacy id");
        assert!("".parse::<SpotId>().is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id: SpotId = "a".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a\"");
    }
}
