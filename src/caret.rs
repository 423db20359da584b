use log::trace;

use crate::{EditKind, utils::fold_case::fold_chars};

/// Everything known about an edit once its value has been conformed (and
/// possibly piped). All positions are character indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretContext<'a> {
    pub previous_conformed_value: &'a str,
    pub previous_placeholder: &'a str,
    /// Caret position right after the edit, before conformance
    pub caret_position: usize,
    pub conformed_value: &'a str,
    pub raw_value: &'a str,
    pub placeholder_char: char,
    pub placeholder: &'a str,
    /// Positions in `conformed_value` filled in by a pipe
    pub indexes_of_piped_chars: &'a [usize],
    pub caret_trap_indexes: &'a [usize],
    /// How the raw value differs from `previous_conformed_value`
    pub edit: EditKind,
}

/// Where the search for the new caret position starts and what it looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    starting_search_index: usize,
    target_char: Option<char>,
    /// The character to the right of the caret is followed instead of the one
    /// to its left
    track_right_character: bool,
}

/// Compute where the caret goes in the conformed value.
///
/// The character the caret sat behind before the edit is located in the
/// conformed value, then the position is snapped to the closest editable slot
/// in the direction of the edit: forward to the next unfilled slot after an
/// addition, backward after a deletion. Caret traps stop both scans.
#[must_use]
pub fn adjust_caret_position(context: &CaretContext<'_>) -> usize {
    let raw: Vec<char> = context.raw_value.chars().collect();
    if context.caret_position == 0 || raw.is_empty() {
        return 0;
    }

    let conformed: Vec<char> = context.conformed_value.chars().collect();
    let placeholder: Vec<char> = context.placeholder.chars().collect();
    let edit = context.edit;
    if let EditKind::MultiCharReplace { .. } = edit {
        return context.caret_position.min(conformed.len());
    }

    let possibly_has_rejected_char = edit.is_addition()
        && (context.previous_conformed_value == context.conformed_value
            || context.conformed_value == context.placeholder);

    let anchor = if possibly_has_rejected_char {
        Anchor {
            starting_search_index: context.caret_position.saturating_sub(edit.length()),
            target_char: None,
            track_right_character: false,
        }
    } else {
        find_anchor(context, edit, &raw, &conformed, &placeholder)
    };

    trace!("Caret anchor {anchor:?} for {edit:?}");

    snap(context, edit, anchor, &conformed, &placeholder)
        .unwrap_or_else(|| anchor.starting_search_index.min(conformed.len()))
}

fn find_anchor(
    context: &CaretContext<'_>,
    edit: EditKind,
    raw: &[char],
    conformed: &[char],
    placeholder: &[char],
) -> Anchor {
    let placeholder_char = context.placeholder_char;
    let caret_position = context.caret_position;
    let previous_placeholder: Vec<char> = context.previous_placeholder.chars().collect();

    let normalized_conformed = fold_chars(conformed);
    let normalized_raw = fold_chars(raw);

    let intersection: Vec<char> = normalized_raw[..caret_position.min(normalized_raw.len())]
        .iter()
        .copied()
        .filter(|c| normalized_conformed.contains(c))
        .collect();
    let intersection_length = intersection.len();

    let mut target_char = intersection.last().copied();

    let count_mask_chars = |cells: &[char]| {
        cells
            .iter()
            .take(intersection_length)
            .filter(|&&cell| cell != placeholder_char)
            .count()
    };
    let previous_left_mask_chars = count_mask_chars(&previous_placeholder);
    let left_mask_chars = count_mask_chars(placeholder);
    let mask_length_changed = left_mask_chars != previous_left_mask_chars;

    // The literal right before the caret moved one position to the left.
    let target_is_mask_moving_left = intersection_length >= 2
        && match (
            previous_placeholder.get(intersection_length - 1),
            placeholder.get(intersection_length - 2),
        ) {
            (Some(&previous_cell), Some(&cell)) => {
                previous_cell != placeholder_char
                    && placeholder.get(intersection_length - 1) != Some(&previous_cell)
                    && previous_cell == cell
            }
            _ => false,
        };

    let mut track_right_character = false;
    if !edit.is_addition()
        && (mask_length_changed || target_is_mask_moving_left)
        && previous_left_mask_chars > 0
        && target_char.is_some_and(|target| placeholder.contains(&target))
    {
        if let Some(&right) = normalized_raw.get(caret_position) {
            track_right_character = true;
            target_char = Some(right);
        }
    }

    let is_target = |c: &char| Some(*c) == target_char;

    let count_in_piped_chars = context
        .indexes_of_piped_chars
        .iter()
        .filter_map(|&index| normalized_conformed.get(index))
        .filter(|c| is_target(c))
        .count();

    let count_in_intersection = intersection.iter().filter(|c| is_target(c)).count();

    // Literals ahead of the first slot that the raw value did not supply itself
    let leading_literals = placeholder
        .iter()
        .position(|&cell| cell == placeholder_char)
        .map_or(&[][..], |first_slot| &placeholder[..first_slot]);
    let count_in_placeholder = leading_literals
        .iter()
        .enumerate()
        .filter(|&(index, cell)| is_target(cell) && raw.get(index) != Some(cell))
        .count();

    let required_number_of_matches = count_in_placeholder
        + count_in_intersection
        + count_in_piped_chars
        + usize::from(track_right_character);

    let mut starting_search_index = 0;
    let mut number_of_encountered_matches = 0;
    for (index, c) in normalized_conformed.iter().enumerate() {
        starting_search_index = index + 1;
        if is_target(c) {
            number_of_encountered_matches += 1;
        }
        if number_of_encountered_matches >= required_number_of_matches {
            break;
        }
    }

    Anchor {
        starting_search_index,
        target_char,
        track_right_character,
    }
}

fn snap(
    context: &CaretContext<'_>,
    edit: EditKind,
    anchor: Anchor,
    conformed: &[char],
    placeholder: &[char],
) -> Option<usize> {
    let placeholder_char = context.placeholder_char;
    let start = anchor.starting_search_index;
    let is_caret_trap = |index: usize| context.caret_trap_indexes.contains(&index);

    if edit.is_addition() {
        let mut last_placeholder_char = start;
        for index in start..=placeholder.len() {
            let is_placeholder_char = placeholder.get(index) == Some(&placeholder_char);
            if is_placeholder_char {
                last_placeholder_char = index;
            }
            if is_placeholder_char || is_caret_trap(index) || index == placeholder.len() {
                return Some(last_placeholder_char);
            }
        }
    } else if anchor.track_right_character {
        let normalized_conformed = fold_chars(conformed);
        for index in (0..start).rev() {
            if normalized_conformed.get(index).copied() == anchor.target_char
                || is_caret_trap(index)
                || index == 0
            {
                return Some(index);
            }
        }
    } else {
        for index in (0..=start).rev() {
            let follows_slot = index > 0 && placeholder.get(index - 1) == Some(&placeholder_char);
            if follows_slot || is_caret_trap(index) || index == 0 {
                return Some(index);
            }
        }
    }

    None
}
