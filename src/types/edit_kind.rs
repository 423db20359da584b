use std::ops::Range;

/// The kind of edit that turned the previous conformed value into the raw
/// value, inferred from their lengths alone. Chosen once per update, every
/// conformance and caret branch matches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Characters were typed or pasted
    Addition { length: usize },
    /// At most one character disappeared, or the length did not change
    Deletion { length: usize },
    /// A selection of several characters was deleted or replaced by fewer
    /// characters
    MultiCharReplace { length: usize },
}

impl EditKind {
    #[must_use]
    pub fn classify(raw_length: usize, previous_length: usize) -> Self {
        if raw_length > previous_length {
            return EditKind::Addition {
                length: raw_length - previous_length,
            };
        }

        let length = previous_length - raw_length;
        if length > 1 {
            EditKind::MultiCharReplace { length }
        } else {
            EditKind::Deletion { length }
        }
    }

    #[must_use]
    pub fn is_addition(self) -> bool { matches!(self, EditKind::Addition { .. }) }

    /// Number of characters gained or lost.
    #[must_use]
    pub fn length(self) -> usize {
        match self {
            EditKind::Addition { length }
            | EditKind::Deletion { length }
            | EditKind::MultiCharReplace { length } => length,
        }
    }

    /// `raw_length - previous_length`
    #[must_use]
    pub fn signed_length(self) -> isize {
        let length = isize::try_from(self.length()).unwrap_or(isize::MAX);
        if self.is_addition() { length } else { -length }
    }

    /// Half-open range of raw value indexes touched by the edit given the
    /// caret position after it. Inserted text ends at the caret, deleted text
    /// used to start at it.
    #[must_use]
    pub fn changed_range(self, caret_position: usize) -> Range<usize> {
        match self {
            EditKind::Addition { length } => caret_position.saturating_sub(length)..caret_position,
            EditKind::Deletion { length } | EditKind::MultiCharReplace { length } => {
                caret_position..caret_position + length
            }
        }
    }
}
