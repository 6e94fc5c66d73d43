//! Entity trait - common interface for all record types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::identity::{EntityId, EntityKind};

/// Common trait for all persisted records
pub trait Entity: Serialize + DeserializeOwned {
    /// The record kind (drives the id prefix)
    const KIND: EntityKind;

    /// Get the record's unique ID
    fn id(&self) -> &EntityId;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Get the current status, if this kind has one
    fn status(&self) -> Option<String> {
        None
    }
}

/// A status value that is either a member of the kind's enumeration or
/// text supplied by a caller through an explicit override.
///
/// Validated transitions only ever produce `Known`. `Raw` keeps the caller's
/// text exactly as written (trimmed); a recognized spelling still reads as
/// its enumeration member through [`Status::known`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status<S> {
    Known(S),
    Raw(String),
}

impl<S> Status<S> {
    /// Keep a caller-supplied value verbatim
    pub fn verbatim(text: &str) -> Self {
        Status::Raw(text.trim().to_string())
    }

    /// The caller's text, if this value came from an override
    pub fn raw(&self) -> Option<&str> {
        match self {
            Status::Known(_) => None,
            Status::Raw(text) => Some(text),
        }
    }
}

impl<S: FromStr + Clone> Status<S> {
    /// The enumeration member this value denotes, if any.
    ///
    /// Raw text is matched leniently ("Ready for Shipping" reads as
    /// `ReadyForShipping`).
    pub fn known(&self) -> Option<S> {
        match self {
            Status::Known(s) => Some(s.clone()),
            Status::Raw(text) => text.parse().ok(),
        }
    }

    /// Whether this value denotes no member of the enumeration
    pub fn is_unrecognized(&self) -> bool {
        self.known().is_none()
    }
}

impl<S: FromStr + Clone + PartialEq> Status<S> {
    /// Check whether this status denotes the given member
    pub fn is(&self, value: &S) -> bool {
        self.known().as_ref() == Some(value)
    }
}

impl<S: Default> Default for Status<S> {
    fn default() -> Self {
        Status::Known(S::default())
    }
}

impl<S> From<S> for Status<S> {
    fn from(value: S) -> Self {
        Status::Known(value)
    }
}

impl<S: fmt::Display> fmt::Display for Status<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Known(s) => write!(f, "{}", s),
            Status::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

impl<S: fmt::Display> Serialize for Status<S> {
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Stored text reads back as `Known` only when it is the member's canonical
/// spelling, so whatever was written is what gets serialized again.
impl<'de, S: FromStr + fmt::Display> Deserialize<'de> for Status<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(match text.parse::<S>() {
            Ok(known) if known.to_string() == text => Status::Known(known),
            _ => Status::Raw(text),
        })
    }
}

/// Normalize a status string for matching: lowercase with `_` separators,
/// so "Ready for Shipping", "ready-for-shipping" and "ready_for_shipping"
/// all compare equal.
pub fn normalize_status(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum Light {
        #[default]
        Red,
        Green,
    }

    impl fmt::Display for Light {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Light::Red => write!(f, "red"),
                Light::Green => write!(f, "green"),
            }
        }
    }

    impl FromStr for Light {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match normalize_status(s).as_str() {
                "red" => Ok(Light::Red),
                "green" => Ok(Light::Green),
                _ => Err(format!("Unknown light: {}", s)),
            }
        }
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status("Ready for Shipping"), "ready_for_shipping");
        assert_eq!(normalize_status(" ready-for-shipping "), "ready_for_shipping");
        assert_eq!(normalize_status("SHIPPED"), "shipped");
    }

    #[test]
    fn test_verbatim_keeps_caller_text() {
        let green = Status::<Light>::verbatim("GREEN");
        assert_eq!(green, Status::Raw("GREEN".to_string()));
        assert_eq!(green.to_string(), "GREEN");
        assert_eq!(green.known(), Some(Light::Green));

        let amber = Status::<Light>::verbatim("  Amber ");
        assert_eq!(amber.raw(), Some("Amber"));
        assert!(amber.is_unrecognized());
    }

    #[test]
    fn test_status_serde_as_plain_string() {
        let json = serde_json::to_string(&Status::Known(Light::Red)).unwrap();
        assert_eq!(json, "\"red\"");

        let known: Status<Light> = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(known, Status::Known(Light::Red));

        let raw: Status<Light> = serde_json::from_str("\"blinking\"").unwrap();
        assert!(raw.is_unrecognized());
        assert_eq!(raw.to_string(), "blinking");

        // A recognized but non-canonical spelling survives a round trip
        let shouted: Status<Light> = serde_json::from_str("\"GREEN\"").unwrap();
        assert_eq!(serde_json::to_string(&shouted).unwrap(), "\"GREEN\"");
        assert!(shouted.is(&Light::Green));
    }

    #[test]
    fn test_status_is() {
        let status: Status<Light> = Light::Green.into();
        assert!(status.is(&Light::Green));
        assert!(!status.is(&Light::Red));
        assert!(!Status::<Light>::Raw("green-ish".into()).is(&Light::Green));
        assert!(Status::<Light>::Raw("Green".into()).is(&Light::Green));
    }
}
