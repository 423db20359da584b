use std::{fmt::Debug, sync::Arc};

use regex::Regex;

use crate::MaskError;

/// Signature of caller-supplied single character matchers.
pub type CharMatcher = dyn Fn(char) -> bool + Send + Sync;

/// Predicate deciding whether a single typed character may fill a mask slot.
#[derive(Clone)]
pub enum CharClass {
    /// ASCII digits `0-9`
    Digit,
    /// Any Unicode alphabetic character
    Letter,
    /// Any Unicode alphanumeric character
    Alphanumeric,
    /// Any character at all
    Any,
    /// Exactly the given character
    Char(char),
    /// A regular expression tested against the character on its own
    Regex(Regex),
    /// A caller-supplied matcher
    Custom(Arc<CharMatcher>),
}

impl CharClass {
    /// Compile `expression` into a regular expression matcher.
    ///
    /// ```
    /// use text_conform::CharClass;
    ///
    /// let hex = CharClass::regex("[0-9a-fA-F]")?;
    /// assert!(hex.matches('c'));
    /// assert!(!hex.matches('g'));
    /// # Ok::<(), text_conform::MaskError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `MaskError::InvalidRegex` if `expression` does not compile.
    pub fn regex(expression: &str) -> Result<Self, MaskError> {
        Ok(CharClass::Regex(Regex::new(expression)?))
    }

    pub fn custom<F>(matcher: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        CharClass::Custom(Arc::new(matcher))
    }

    #[must_use]
    pub fn matches(&self, candidate: char) -> bool {
        match self {
            CharClass::Digit => candidate.is_ascii_digit(),
            CharClass::Letter => candidate.is_alphabetic(),
            CharClass::Alphanumeric => candidate.is_alphanumeric(),
            CharClass::Any => true,
            CharClass::Char(expected) => candidate == *expected,
            CharClass::Regex(regex) => {
                let mut buffer = [0u8; 4];
                regex.is_match(candidate.encode_utf8(&mut buffer))
            }
            CharClass::Custom(matcher) => matcher(candidate),
        }
    }
}

impl Debug for CharClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharClass::Digit => write!(f, "Digit"),
            CharClass::Letter => write!(f, "Letter"),
            CharClass::Alphanumeric => write!(f, "Alphanumeric"),
            CharClass::Any => write!(f, "Any"),
            CharClass::Char(expected) => f.debug_tuple("Char").field(expected).finish(),
            CharClass::Regex(regex) => f.debug_tuple("Regex").field(&regex.as_str()).finish(),
            CharClass::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Regular expressions compare by their source, custom matchers by identity.
impl PartialEq for CharClass {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CharClass::Char(left), CharClass::Char(right)) => left == right,
            (CharClass::Regex(left), CharClass::Regex(right)) => left.as_str() == right.as_str(),
            (CharClass::Custom(left), CharClass::Custom(right)) => Arc::ptr_eq(left, right),
            (left, right) => std::mem::discriminant(left) == std::mem::discriminant(right),
        }
    }
}
