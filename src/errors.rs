use thiserror::Error;
#[cfg(feature = "wasm")]
use wasm_bindgen::JsValue;

/// Error type for mask configuration and raw input problems. Characters
/// rejected by a mask slot are not errors, they are reported through
/// `ConformOutcome::some_chars_rejected` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaskError {
    /// The placeholder character is also a literal of the mask, so an
    /// unfilled slot could never be told apart from that literal.
    #[error(
        "Placeholder character {placeholder_char:?} must not be used as part of the mask (found \
         at index {index}), pick a different placeholder character"
    )]
    PlaceholderCharInMask {
        placeholder_char: char,
        /// Index of the offending literal within the mask
        index: usize,
    },

    /// The raw value is neither text, a number, nor absent.
    #[error("The value provided needs to be a string or a number, received: {received}")]
    InvalidValue { received: String },

    /// The mask pattern notation could not be parsed.
    #[error("Invalid mask pattern at position {position}: {reason}")]
    InvalidPattern { position: usize, reason: String },

    #[error("Invalid character class expression: {0}")]
    InvalidRegex(#[from] regex::Error),
}

#[cfg(feature = "wasm")]
impl From<MaskError> for JsValue {
    fn from(error: MaskError) -> Self { JsValue::from_str(&error.to_string()) }
}
