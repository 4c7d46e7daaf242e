//! Owner/Pet data model module.
//!
//! # Purpose
//! Re-exports the stored records, request payloads, and response projections
//! shared by the store and HTTP API layers.
//!
//! # Notes
//! Timestamps are UTC with whole-second precision and serialize with a `Z`
//! suffix. Patch payloads merge into records through pure `apply` functions.
mod owner;
mod pet;
pub mod timestamp;

pub use owner::{Owner, OwnerCreateRequest, OwnerPatchRequest, OwnerView};
pub use pet::{Pet, PetCreateRequest, PetPatchRequest, PetSummary};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

/// Current UTC time truncated to whole seconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

// `updated_at` never moves backwards, even if the wall clock does.
pub(crate) fn advance(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    previous.max(now)
}

// Distinguishes an explicit `null` (clear the field) from an omitted field
// when paired with `#[serde(default)]`.
pub(crate) fn explicit<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};

    #[test]
    fn now_has_no_subsecond_component() {
        assert_eq!(now().nanosecond(), 0);
    }

    #[test]
    fn advance_never_moves_backwards() {
        let base = now();
        assert_eq!(advance(base, base - Duration::seconds(5)), base);
        assert_eq!(
            advance(base, base + Duration::seconds(5)),
            base + Duration::seconds(5)
        );
    }
}
