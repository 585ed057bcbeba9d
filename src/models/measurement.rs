//! Numeric readings that may be unavailable
//!
//! The service reports missing readings as `"NaN"`, as an empty string or
//! as `null`. Those all decode to [`Measurement::Unavailable`] instead of
//! zero, so a gap in telemetry never turns into a fabricated value.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A numeric reading or an explicit gap
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Measurement {
    /// A reported value
    Value(f64),
    /// The service had no value
    #[default]
    Unavailable,
}

impl Measurement {
    /// The reading, if any
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unavailable => None,
        }
    }

    /// Whether a reading was reported
    pub fn is_available(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::Unavailable
        } else {
            Self::Value(value)
        }
    }
}

impl From<Option<f64>> for Measurement {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unavailable, Self::from)
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::Unavailable => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Measurement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MeasurementVisitor)
    }
}

struct MeasurementVisitor;

impl<'de> Visitor<'de> for MeasurementVisitor {
    type Value = Measurement;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string, \"NaN\", \"\" or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Measurement, E> {
        Ok(Measurement::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Measurement, E> {
        Ok(Measurement::Value(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Measurement, E> {
        Ok(Measurement::Value(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Measurement, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return Ok(Measurement::Unavailable);
        }
        trimmed
            .parse::<f64>()
            .map(Measurement::from)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_none<E: de::Error>(self) -> Result<Measurement, E> {
        Ok(Measurement::Unavailable)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Measurement, E> {
        Ok(Measurement::Unavailable)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Measurement, D::Error> {
        deserializer.deserialize_any(self)
    }
}
