use crate::{Mask, MaskError, Slot};

/// The placeholder character used when none is configured.
pub const DEFAULT_PLACEHOLDER_CHAR: char = '_';

/// Render `mask` as a placeholder: literals stay as they are and every pattern
/// slot becomes `placeholder_char`. Caret traps occupy no position.
///
/// ```
/// use text_conform::{Mask, convert_mask_to_placeholder};
///
/// let mask: Mask = "(999) 999-9999".parse()?;
/// assert_eq!(convert_mask_to_placeholder(&mask, '_')?, "(___) ___-____");
/// # Ok::<(), text_conform::MaskError>(())
/// ```
///
/// # Errors
///
/// Returns `MaskError::PlaceholderCharInMask` if `placeholder_char` is one of
/// the literals in `mask`.
pub fn convert_mask_to_placeholder(mask: &Mask, placeholder_char: char) -> Result<String, MaskError> {
    if let Some(index) = mask
        .slots()
        .iter()
        .position(|slot| matches!(slot, Slot::Literal(literal) if *literal == placeholder_char))
    {
        return Err(MaskError::PlaceholderCharInMask {
            placeholder_char,
            index,
        });
    }

    Ok(mask
        .slots()
        .iter()
        .filter_map(|slot| match slot {
            Slot::Literal(literal) => Some(*literal),
            Slot::Pattern(_) => Some(placeholder_char),
            Slot::CaretTrap => None,
        })
        .collect())
}
