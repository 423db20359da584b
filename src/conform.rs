use std::collections::VecDeque;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_PLACEHOLDER_CHAR, EditKind, Mask, MaskContext, MaskError, MaskSource,
    convert_mask_to_placeholder,
};

/// Result of laying a raw value onto a mask.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConformOutcome {
    pub conformed_value: String,
    /// Whether any typed character was dropped for not fitting its slot
    pub some_chars_rejected: bool,
}

/// The flags of a mask configuration that influence conformance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConformSettings {
    /// Keep unfilled trailing slots visible as placeholder characters
    pub guide: bool,
    pub placeholder_char: char,
    /// Stop already placed characters from shifting when others are inserted
    /// or deleted around them
    pub keep_char_positions: bool,
}

impl Default for ConformSettings {
    fn default() -> Self {
        Self {
            guide: true,
            placeholder_char: DEFAULT_PLACEHOLDER_CHAR,
            keep_char_positions: false,
        }
    }
}

/// A single edit to be conformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConformInput<'a> {
    pub raw_value: &'a str,
    /// The conformed value before the edit, empty for a fresh input
    pub previous_conformed_value: &'a str,
    /// Placeholder of the mask, see `convert_mask_to_placeholder`
    pub placeholder: &'a str,
    /// Caret position right after the edit
    pub caret_position: usize,
    /// How the raw value differs from the previous one, see
    /// `EditKind::classify`
    pub edit: EditKind,
}

/// Options of the standalone `conform_to_mask` entry point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConformOptions {
    pub settings: ConformSettings,
    pub previous_conformed_value: Option<String>,
    /// Derived from the mask when not given
    pub placeholder: Option<String>,
    /// Defaults to the end of the raw value
    pub caret_position: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaggedChar {
    char: char,
    is_new: bool,
}

/// Conform `raw_value` to `mask` outside of an input session: resolve the
/// mask, derive its placeholder and run `conform`. A disabled mask returns the
/// raw value as-is.
///
/// ```
/// use text_conform::{ConformOptions, Mask, MaskSource, conform_to_mask};
///
/// let mask = MaskSource::from("(999) 999-9999".parse::<Mask>()?);
/// let outcome = conform_to_mask("5551234567", &mask, &ConformOptions::default())?;
/// assert_eq!(outcome.conformed_value, "(555) 123-4567");
/// # Ok::<(), text_conform::MaskError>(())
/// ```
///
/// # Errors
///
/// Returns `MaskError::PlaceholderCharInMask` when the placeholder character
/// is a literal of the resolved mask.
pub fn conform_to_mask(
    raw_value: &str,
    mask: &MaskSource,
    options: &ConformOptions,
) -> Result<ConformOutcome, MaskError> {
    let caret_position = options
        .caret_position
        .unwrap_or_else(|| raw_value.chars().count());
    let context = MaskContext {
        caret_position,
        previous_conformed_value: options.previous_conformed_value.as_deref(),
        placeholder_char: options.settings.placeholder_char,
    };

    let Some(resolved) = mask.resolve(raw_value, &context) else {
        return Ok(ConformOutcome {
            conformed_value: raw_value.to_owned(),
            some_chars_rejected: false,
        });
    };

    let placeholder = match &options.placeholder {
        Some(placeholder) => placeholder.clone(),
        None => convert_mask_to_placeholder(&resolved.mask, options.settings.placeholder_char)?,
    };

    let previous_conformed_value = options.previous_conformed_value.as_deref().unwrap_or_default();

    Ok(conform(
        &resolved.mask,
        &ConformInput {
            raw_value,
            previous_conformed_value,
            placeholder: &placeholder,
            caret_position,
            edit: EditKind::classify(
                raw_value.chars().count(),
                previous_conformed_value.chars().count(),
            ),
        },
        options.settings,
    ))
}

/// Lay the raw value of `input` onto the slots of a caret-trap free `mask`.
///
/// Literals of the mask are copied through, pattern slots are filled with the
/// next raw character they accept. Literals the user typed over are dropped
/// first, characters no slot accepts are dropped and flagged. Once the raw
/// value runs out the rest of the placeholder is appended in guide mode, while
/// without a guide the value simply ends, and after a deletion it ends right
/// behind the last filled slot.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn conform(mask: &Mask, input: &ConformInput<'_>, settings: ConformSettings) -> ConformOutcome {
    let ConformSettings {
        guide,
        placeholder_char,
        keep_char_positions,
    } = settings;
    let suppress_guide = !guide;

    let placeholder: Vec<char> = input.placeholder.chars().collect();
    let previous_length = input.previous_conformed_value.chars().count();
    let mut raw: Vec<char> = input.raw_value.chars().collect();
    let raw_length = raw.len();

    let edit = input.edit;
    let changed = edit.changed_range(input.caret_position);

    if keep_char_positions && !edit.is_addition() {
        let compensation = changed
            .clone()
            .filter(|&index| placeholder.get(index) == Some(&placeholder_char))
            .count();
        let at = changed.start.min(raw.len());
        raw.splice(at..at, std::iter::repeat_n(placeholder_char, compensation));
    }

    let mut queue: VecDeque<TaggedChar> = raw
        .iter()
        .enumerate()
        .map(|(index, &char)| TaggedChar {
            char,
            is_new: changed.contains(&index),
        })
        .collect();

    // Drop retyped literals, comparing against where they sat before the edit
    // when the previous value spanned the whole mask.
    let previous_spans_mask = previous_length == placeholder.len();
    for index in (0..raw_length).rev() {
        let char = queue[index].char;
        if char == placeholder_char {
            continue;
        }

        let placeholder_index = if index >= changed.start && previous_spans_mask {
            index.checked_add_signed(-edit.signed_length())
        } else {
            Some(index)
        };

        if placeholder_index.and_then(|i| placeholder.get(i)) == Some(&char) {
            queue.remove(index);
        }
    }

    let mut conformed_value = String::with_capacity(input.placeholder.len());
    let mut some_chars_rejected = false;
    let mut index = 0;

    'placeholder: while index < placeholder.len() {
        let placeholder_cell = placeholder[index];
        if placeholder_cell != placeholder_char {
            conformed_value.push(placeholder_cell);
            index += 1;
            continue;
        }

        while let Some(TaggedChar { char, is_new }) = queue.pop_front() {
            if char == placeholder_char && !suppress_guide {
                conformed_value.push(placeholder_char);
                index += 1;
                continue 'placeholder;
            }

            if !mask.accepts(index, char) {
                debug!("Rejected {char:?} for slot {index}");
                some_chars_rejected = true;
                continue;
            }

            let must_claim_free_slot = keep_char_positions
                && is_new
                && previous_length > 0
                && guide
                && edit.is_addition();

            if !must_claim_free_slot {
                conformed_value.push(char);
                index += 1;
                continue 'placeholder;
            }

            // A new character only fits if an unfilled slot lies ahead before
            // any old character, which it then takes over.
            let free_slot = queue
                .iter()
                .take_while(|tagged| tagged.char == placeholder_char || tagged.is_new)
                .position(|tagged| tagged.char == placeholder_char);

            if let Some(free_slot) = free_slot {
                conformed_value.push(char);
                queue.remove(free_slot);
                index += 1;
            }

            continue 'placeholder;
        }

        if !suppress_guide {
            conformed_value.extend(&placeholder[index..]);
        }

        break;
    }

    if suppress_guide && !edit.is_addition() {
        let conformed_length = conformed_value.chars().count();
        let last_filled_slot = (0..conformed_length)
            .rev()
            .find(|&i| placeholder.get(i) == Some(&placeholder_char));

        conformed_value = match last_filled_slot {
            Some(last) => conformed_value.chars().take(last + 1).collect(),
            None => String::new(),
        };
    }

    ConformOutcome {
        conformed_value,
        some_chars_rejected,
    }
}
