use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use savemyspot_core::{DomainError, DomainResult, Entity, SpotId, ValueObject};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl ValueObject for Coordinates {}

impl Coordinates {
    /// Validated constructor for coordinates coming from a position fix.
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::validation(format!(
                "latitude out of range: {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::validation(format!(
                "longitude out of range: {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// `lat,lng` as used in map deep links.
    pub fn as_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Six-decimal rendering used on the spot card.
    pub fn display_label(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A named, timestamped coordinate saved by the user.
///
/// Immutable after creation: there is no rename or move operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    id: SpotId,
    name: String,
    #[serde(serialize_with = "serialize_degrees")]
    latitude: f64,
    #[serde(serialize_with = "serialize_degrees")]
    longitude: f64,
    /// ISO-8601 string, kept verbatim so stored content round-trips unchanged.
    created_at: String,
}

impl Spot {
    /// Create a new spot from a fix.
    ///
    /// `existing_count` is the collection size *before* this spot is added;
    /// it drives the `"Spot <n>"` placeholder for blank names.
    pub fn create(
        raw_name: &str,
        coordinates: Coordinates,
        existing_count: usize,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SpotId::generate_at(now),
            name: resolve_name(raw_name, existing_count),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Rebuild a spot from already-known parts (fixtures, migrations).
    pub fn from_parts(
        id: SpotId,
        name: impl Into<String>,
        coordinates: Coordinates,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            created_at: created_at.into(),
        }
    }

    pub fn id_typed(&self) -> &SpotId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Creation time in the viewer's local zone.
    ///
    /// Falls back to the stored string when it is not valid RFC 3339.
    pub fn created_at_label(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(at) => at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Err(_) => self.created_at.clone(),
        }
    }
}

impl Entity for Spot {
    type Id = SpotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Writes degrees the way a JavaScript `JSON.stringify` would: whole values
/// carry no fractional part (`10`, not `10.0`), so stored lists round-trip
/// byte for byte.
fn serialize_degrees<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Degrees are bounded well inside the exactly representable i64 range.
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Trimmed user input, or the positional placeholder when nothing is left.
pub fn resolve_name(raw_name: &str, existing_count: usize) -> String {
    let trimmed = raw_name.trim();
    if trimmed.is_empty() {
        format!("Spot {}", existing_count + 1)
    } else {
        trimmed.to_string()
    }
}
