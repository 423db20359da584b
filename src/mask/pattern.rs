use std::{fmt::Display, str::FromStr};

use super::{CharClass, Mask, Slot};
use crate::{MaskError, caret_trap::CARET_TRAP};

const ESCAPE: char = '\\';

impl Mask {
    /// Parse a mask from its pattern notation:
    ///
    /// - `9` a digit
    /// - `a` a letter
    /// - `*` a letter or a digit
    /// - `?` any character
    /// - `[]` a caret trap
    /// - `\x` the literal `x`
    ///
    /// Every other character is a literal.
    ///
    /// ```
    /// use text_conform::{Mask, Slot};
    ///
    /// let mask = Mask::parse("+\\9 999")?;
    /// assert_eq!(mask.slots()[1], Slot::Literal('9'));
    /// assert_eq!(mask.slots()[3], Slot::digit());
    /// # Ok::<(), text_conform::MaskError>(())
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, MaskError> {
        let mut slots = Vec::with_capacity(pattern.len());
        let mut chars = pattern.chars().enumerate().peekable();

        while let Some((position, c)) = chars.next() {
            let slot = match c {
                ESCAPE => match chars.next() {
                    Some((_, escaped)) => Slot::Literal(escaped),
                    None => {
                        return Err(MaskError::InvalidPattern {
                            position,
                            reason: "escape character at the end of the pattern".to_owned(),
                        });
                    }
                },
                '9' => Slot::Pattern(CharClass::Digit),
                'a' => Slot::Pattern(CharClass::Letter),
                '*' => Slot::Pattern(CharClass::Alphanumeric),
                '?' => Slot::Pattern(CharClass::Any),
                '[' if chars.next_if(|(_, next)| *next == ']').is_some() => Slot::CaretTrap,
                literal => Slot::Literal(literal),
            };

            slots.push(slot);
        }

        Ok(Self { slots })
    }
}

impl FromStr for Mask {
    type Err = MaskError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> { Mask::parse(pattern) }
}

/// Renders the pattern notation. Classes without a notation (`Regex`,
/// `Custom`, `Char`) render as `?`.
impl Display for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for slot in &self.slots {
            match slot {
                Slot::Literal(literal @ ('9' | 'a' | '*' | '?' | '[' | ESCAPE)) => {
                    write!(f, "{ESCAPE}{literal}")?;
                }
                Slot::Literal(literal) => write!(f, "{literal}")?,
                Slot::Pattern(CharClass::Digit) => write!(f, "9")?,
                Slot::Pattern(CharClass::Letter) => write!(f, "a")?,
                Slot::Pattern(CharClass::Alphanumeric) => write!(f, "*")?,
                Slot::Pattern(_) => write!(f, "?")?,
                Slot::CaretTrap => f.write_str(CARET_TRAP)?,
            }
        }

        Ok(())
    }
}
