#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CharClass, Mask, MaskSource, Slot};

const MINUS: char = '-';

/// Options of [`create_number_mask`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberMaskOptions {
    pub prefix: String,
    pub suffix: String,
    pub include_thousands_separator: bool,
    pub thousands_separator_symbol: String,
    pub allow_decimal: bool,
    pub decimal_symbol: char,
    /// Maximum number of fraction digits, unlimited when `None`
    pub decimal_limit: Option<usize>,
    pub require_decimal: bool,
    pub allow_negative: bool,
    pub allow_leading_zeroes: bool,
    /// Maximum number of integer digits, unlimited when `None`
    pub integer_limit: Option<usize>,
}

impl Default for NumberMaskOptions {
    fn default() -> Self {
        Self {
            prefix: "$".to_owned(),
            suffix: String::new(),
            include_thousands_separator: true,
            thousands_separator_symbol: ",".to_owned(),
            allow_decimal: false,
            decimal_symbol: '.',
            decimal_limit: Some(2),
            require_decimal: false,
            allow_negative: false,
            allow_leading_zeroes: false,
            integer_limit: None,
        }
    }
}

/// A computed mask for currency-like numbers: `$1,234.56`.
///
/// The mask is rebuilt from what was typed so far, so thousands separators
/// appear and move as digits are added. Caret traps around the decimal symbol
/// keep the caret from jumping over it.
///
/// ```
/// use text_conform::{EngineState, MaskConfig, NumberMaskOptions, Update, create_number_mask};
///
/// let mut state = EngineState::new(MaskConfig::new(create_number_mask(NumberMaskOptions::default())))?;
///
/// assert_eq!(
///     state.update("$1234", 5)?,
///     Update::Changed {
///         value: "$1,234".to_owned(),
///         caret_position: 6,
///         rejected: false,
///     }
/// );
/// # Ok::<(), text_conform::MaskError>(())
/// ```
#[must_use]
pub fn create_number_mask(options: NumberMaskOptions) -> MaskSource {
    MaskSource::computed(move |raw_value, _| Some(options.mask_for(raw_value)))
}

impl NumberMaskOptions {
    /// Build the mask fitting `raw_value`.
    #[must_use]
    pub fn mask_for(&self, raw_value: &str) -> Mask {
        let prefix: Vec<char> = self.prefix.chars().collect();
        let suffix: Vec<char> = self.suffix.chars().collect();
        let mut raw: Vec<char> = raw_value.chars().collect();

        if raw.is_empty() || (raw.len() == 1 && prefix.first() == raw.first()) {
            return surround(&prefix, vec![Slot::digit()], &suffix);
        }

        if raw == [self.decimal_symbol] && self.allow_decimal {
            return surround(
                &prefix,
                vec![
                    Slot::Literal('0'),
                    Slot::Literal(self.decimal_symbol),
                    Slot::digit(),
                ],
                &suffix,
            );
        }

        let is_negative = self.allow_negative && raw.first() == Some(&MINUS);
        if is_negative {
            raw.remove(0);
        }

        let index_of_last_decimal = raw.iter().rposition(|&c| c == self.decimal_symbol);
        let follows_decimal_symbol = index_of_last_decimal
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| raw.get(index))
            == Some(&self.decimal_symbol);

        if !suffix.is_empty() && raw.ends_with(&suffix) {
            raw.truncate(raw.len() - suffix.len());
        }

        let prefix_length = if raw.starts_with(&prefix) { prefix.len() } else { 0 };
        let (integer, fraction) = match index_of_last_decimal {
            Some(index) if self.allow_decimal || self.require_decimal => (
                raw.get(prefix_length..index).unwrap_or_default(),
                Some(raw.get(index + 1..).unwrap_or_default()),
            ),
            _ => (&raw[prefix_length..], None),
        };

        let integer = self.format_integer(integer);
        let mut slots: Vec<Slot> = integer.into_iter().map(to_slot).collect();

        if (index_of_last_decimal.is_some() && self.allow_decimal) || self.require_decimal {
            if !follows_decimal_symbol {
                slots.push(Slot::CaretTrap);
            }
            slots.push(Slot::Literal(self.decimal_symbol));
            slots.push(Slot::CaretTrap);

            if let Some(fraction) = fraction {
                let digits = fraction.iter().filter(|c| c.is_ascii_digit());
                let limit = self.decimal_limit.unwrap_or(usize::MAX);
                slots.extend(digits.take(limit).map(|_| Slot::digit()));
            }

            if self.require_decimal && follows_decimal_symbol {
                slots.push(Slot::digit());
            }
        }

        let mut mask: Mask = prefix.iter().copied().map(Slot::Literal).chain(slots).collect();

        if is_negative {
            if mask.len() == prefix.len() {
                mask.push(Slot::digit());
            }
            mask = std::iter::once(Slot::Pattern(CharClass::Char(MINUS)))
                .chain(mask.into_slots())
                .collect();
        }

        mask.extend(suffix.iter().copied().map(Slot::Literal));
        mask
    }

    /// Reduce the integer part to its digits and group them.
    fn format_integer(&self, integer: &[char]) -> Vec<char> {
        let separator: Vec<char> = self.thousands_separator_symbol.chars().collect();

        let integer = match self.integer_limit {
            Some(limit) if limit > 0 => {
                let separators = count_occurrences(integer, &separator);
                &integer[..integer.len().min(limit + separators * separator.len())]
            }
            _ => integer,
        };

        let mut digits: Vec<char> = integer.iter().copied().filter(char::is_ascii_digit).collect();

        if !self.allow_leading_zeroes {
            let leading_zeroes = digits.iter().take_while(|&&c| c == '0').count();
            digits.drain(..leading_zeroes.min(digits.len().saturating_sub(1)));
        }

        if !self.include_thousands_separator {
            return digits;
        }

        let mut grouped = Vec::with_capacity(digits.len() + digits.len() / 3 * separator.len());
        for (index, digit) in digits.iter().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.extend_from_slice(&separator);
            }
            grouped.push(*digit);
        }
        grouped
    }
}

fn surround(prefix: &[char], slots: Vec<Slot>, suffix: &[char]) -> Mask {
    prefix
        .iter()
        .copied()
        .map(Slot::Literal)
        .chain(slots)
        .chain(suffix.iter().copied().map(Slot::Literal))
        .collect()
}

fn to_slot(c: char) -> Slot {
    if c.is_ascii_digit() {
        Slot::digit()
    } else {
        Slot::Literal(c)
    }
}

fn count_occurrences(haystack: &[char], needle: &[char]) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut index = 0;
    while index + needle.len() <= haystack.len() {
        if haystack[index..].starts_with(needle) {
            count += 1;
            index += needle.len();
        } else {
            index += 1;
        }
    }
    count
}
