//! Status vocabulary traits and token plumbing.
//!
//! Each entity type owns two vocabularies: the unified statuses used by
//! all new logic and the coarser legacy statuses still read by
//! not-yet-migrated consumers. Both are finite token sets, but drifted
//! production data means any raw string can show up in a record, so the
//! enums carry an `Unrecognized` variant instead of rejecting input.

use serde_json::Value;
use std::fmt;

use crate::status::types::{EntityType, UpdateDocument};

/// Macro to generate a status token enum.
///
/// Generates the enum (known variants plus `Unrecognized`), a total
/// `parse`, `as_str`, `Display`, `From<&str>`, and token-level serde
/// impls. `parse` never constructs `Unrecognized` for a known token, so
/// equality on parsed values is equality on tokens.
macro_rules! status_tokens {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Raw value not present in the known vocabulary.
            Unrecognized(String),
        }

        impl $name {
            /// Returns the wire token for this status.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $token,)+
                    Self::Unrecognized(raw) => raw,
                }
            }

            /// Parses a wire token; unknown tokens are preserved as-is.
            #[must_use]
            pub fn parse(raw: &str) -> Self {
                match raw {
                    $($token => Self::$variant,)+
                    other => Self::Unrecognized(other.to_string()),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::parse(raw)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::parse(&raw))
            }
        }
    };
}

pub(crate) use status_tokens;

/// Legacy-side status vocabulary for one entity type.
///
/// Implementations know which record field(s) the value lives in; GRN
/// spreads its legacy status across two fields that must always change
/// together, which is why writing is a method on the value rather than
/// a single field name constant.
pub trait LegacyStatus: Clone + PartialEq + fmt::Debug {
    /// Writes this value into `doc` under its record field name(s).
    fn write_to(&self, doc: &mut UpdateDocument);

    /// JSON representation used in audit entries.
    fn to_audit_value(&self) -> Value;

    /// Documented entity-specific default when no prior value exists.
    fn fallback_default() -> Self;
}

/// Unified-side status vocabulary and transition rules for one entity
/// type.
///
/// The tables behind `KNOWN`, `transitions`, and `to_legacy` are
/// compile-time constants; nothing here allocates or locks.
pub trait UnifiedStatus:
    Clone + PartialEq + fmt::Debug + fmt::Display + for<'a> From<&'a str> + Sized + 'static
{
    /// The entity's legacy vocabulary.
    type Legacy: LegacyStatus;

    /// Entity type this vocabulary belongs to.
    const ENTITY: EntityType;

    /// Unified-side record field holding the status value.
    const UNIFIED_FIELD: &'static str;

    /// Known vocabulary in progression order.
    const KNOWN: &'static [Self];

    /// Natural initial state for records entering the workflow.
    const INITIAL: Self;

    /// Legal forward transitions; empty means terminal, `None` means
    /// the status is unrecognized and has no table entry.
    fn transitions(&self) -> Option<&'static [Self]>;

    /// Legacy equivalent; `None` when unrecognized.
    fn to_legacy(&self) -> Option<Self::Legacy>;

    /// Lossy legacy approximation, used for one-time backfill only.
    /// Several unified values collapse onto one legacy value, so this
    /// never round-trips.
    fn from_legacy(legacy: &Self::Legacy) -> Option<Self>;

    /// Ordinal in the progression, used to classify invalid transitions
    /// as backward vs. skipping; `None` when unrecognized.
    #[must_use]
    fn position(&self) -> Option<usize> {
        Self::KNOWN.iter().position(|status| status == self)
    }

    /// True when this status admits no further transitions.
    #[must_use]
    fn is_terminal(&self) -> bool {
        matches!(self.transitions(), Some(next) if next.is_empty())
    }

    /// True when this status is part of the known vocabulary.
    #[must_use]
    fn is_recognized(&self) -> bool {
        self.position().is_some()
    }

    /// Unified-side field recording when the status last changed.
    #[must_use]
    fn updated_at_field() -> String {
        format!("{}_updated_at", Self::UNIFIED_FIELD)
    }

    /// Unified-side field recording who last changed the status.
    #[must_use]
    fn updated_by_field() -> String {
        format!("{}_updated_by", Self::UNIFIED_FIELD)
    }
}
