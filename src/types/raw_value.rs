use std::{borrow::Cow, fmt::Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::MaskError;

#[allow(clippy::cast_precision_loss)]
const INTEGRAL_LIMIT: f64 = (1u64 << 53) as f64;

/// The value an input hands to the engine: text, a number, or nothing at all.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    #[default]
    Absent,
}

impl RawValue {
    /// The text the mask gets applied to.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            RawValue::Text(text) => text,
            RawValue::Absent => String::new(),
            number => number.to_string(),
        }
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Text(text) => write!(f, "{text}"),
            RawValue::Integer(number) => write!(f, "{number}"),
            RawValue::Float(number) => write!(f, "{number}"),
            RawValue::Absent => Ok(()),
        }
    }
}

/// Finite floats are accepted, whole ones within the safe integer range become
/// `Integer`-s.
impl TryFrom<f64> for RawValue {
    type Error = MaskError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(MaskError::InvalidValue {
                received: value.to_string(),
            });
        }

        if value.fract() == 0.0 && value.abs() <= INTEGRAL_LIMIT {
            #[allow(clippy::cast_possible_truncation)]
            return Ok(RawValue::Integer(value as i64));
        }

        Ok(RawValue::Float(value))
    }
}

#[cfg(feature = "wasm")]
impl TryFrom<JsValue> for RawValue {
    type Error = MaskError;

    fn try_from(value: JsValue) -> Result<Self, Self::Error> {
        if value.is_null() || value.is_undefined() {
            return Ok(RawValue::Absent);
        }

        if let Some(text) = value.as_string() {
            return Ok(RawValue::Text(text));
        }

        if let Some(number) = value.as_f64() {
            return RawValue::try_from(number);
        }

        Err(MaskError::InvalidValue {
            received: format!("{value:?}"),
        })
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self { RawValue::Integer(value) }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self { RawValue::Integer(value.into()) }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self { RawValue::Integer(value.into()) }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self { RawValue::Text(value) }
}

impl From<&String> for RawValue {
    fn from(value: &String) -> Self { RawValue::Text(value.clone()) }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self { RawValue::Text(value.to_owned()) }
}

impl<'a> From<Cow<'a, str>> for RawValue {
    fn from(value: Cow<'a, str>) -> Self { RawValue::Text(value.into_owned()) }
}

impl<T> From<Option<T>> for RawValue
where
    T: Into<RawValue>,
{
    fn from(value: Option<T>) -> Self { value.map_or(RawValue::Absent, Into::into) }
}
