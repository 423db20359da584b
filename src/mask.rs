mod char_class;
mod pattern;

use std::{fmt::Debug, sync::Arc};

pub use char_class::{CharClass, CharMatcher};

use crate::caret_trap::process_caret_traps;

/// A single position of a mask.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Copied into the conformed value verbatim
    Literal(char),
    /// Filled by one typed character accepted by the class
    Pattern(CharClass),
    /// Stop position for the caret, occupies no position in the conformed
    /// value. Only computed masks emit these.
    CaretTrap,
}

impl Slot {
    #[must_use]
    pub fn digit() -> Self { Slot::Pattern(CharClass::Digit) }

    #[must_use]
    pub fn letter() -> Self { Slot::Pattern(CharClass::Letter) }

    #[must_use]
    pub fn is_pattern(&self) -> bool { matches!(self, Slot::Pattern(_)) }
}

impl From<char> for Slot {
    fn from(literal: char) -> Self { Slot::Literal(literal) }
}

impl From<CharClass> for Slot {
    fn from(class: CharClass) -> Self { Slot::Pattern(class) }
}

/// An ordered template of literal characters and single character slots that
/// typed text is conformed to.
///
/// Masks are usually written in the pattern notation, see [`Mask::parse`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mask {
    slots: Vec<Slot>,
}

impl Mask {
    #[must_use]
    pub fn new(slots: Vec<Slot>) -> Self { Self { slots } }

    /// A mask made of literals only.
    #[must_use]
    pub fn from_literal_str(text: &str) -> Self { text.chars().map(Slot::Literal).collect() }

    #[must_use]
    pub fn slots(&self) -> &[Slot] { &self.slots }

    #[must_use]
    pub fn into_slots(self) -> Vec<Slot> { self.slots }

    #[must_use]
    pub fn len(&self) -> usize { self.slots.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    pub fn push(&mut self, slot: impl Into<Slot>) { self.slots.push(slot.into()); }

    /// Whether the slot at `index` is a pattern accepting `candidate`.
    #[must_use]
    pub fn accepts(&self, index: usize, candidate: char) -> bool {
        match self.slots.get(index) {
            Some(Slot::Pattern(class)) => class.matches(candidate),
            _ => false,
        }
    }
}

impl FromIterator<Slot> for Mask {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl Extend<Slot> for Mask {
    fn extend<I: IntoIterator<Item = Slot>>(&mut self, iter: I) { self.slots.extend(iter); }
}

impl From<Vec<Slot>> for Mask {
    fn from(slots: Vec<Slot>) -> Self { Self { slots } }
}

/// What a computed mask gets to see besides the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskContext<'a> {
    pub caret_position: usize,
    pub previous_conformed_value: Option<&'a str>,
    pub placeholder_char: char,
}

/// Signature of computed masks. Returning `None` disables masking for the
/// given raw value.
pub type MaskFn = dyn Fn(&str, &MaskContext<'_>) -> Option<Mask> + Send + Sync;

/// Where the mask of an input comes from.
#[derive(Clone, Default)]
pub enum MaskSource {
    /// No masking, values pass through untouched
    #[default]
    Disabled,
    Static(Mask),
    /// Recomputed from the raw value on every update
    Computed(Arc<MaskFn>),
}

impl MaskSource {
    pub fn computed<F>(mask_fn: F) -> Self
    where
        F: Fn(&str, &MaskContext<'_>) -> Option<Mask> + Send + Sync + 'static,
    {
        MaskSource::Computed(Arc::new(mask_fn))
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool { matches!(self, MaskSource::Disabled) }

    /// Produce the mask to use for `raw_value` with its caret traps stripped,
    /// or `None` when masking is disabled.
    #[must_use]
    pub fn resolve(&self, raw_value: &str, context: &MaskContext<'_>) -> Option<ResolvedMask> {
        let mask = match self {
            MaskSource::Disabled => return None,
            MaskSource::Static(mask) => mask.clone(),
            MaskSource::Computed(mask_fn) => mask_fn(raw_value, context)?,
        };

        let (mask, caret_trap_indexes) = process_caret_traps(mask);

        Some(ResolvedMask {
            mask,
            caret_trap_indexes,
        })
    }
}

impl Debug for MaskSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaskSource::Disabled => write!(f, "Disabled"),
            MaskSource::Static(mask) => f.debug_tuple("Static").field(mask).finish(),
            MaskSource::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

impl From<Mask> for MaskSource {
    fn from(mask: Mask) -> Self { MaskSource::Static(mask) }
}

/// A mask ready for conformance: free of caret traps, with the position of
/// every removed trap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedMask {
    pub mask: Mask,
    pub caret_trap_indexes: Vec<usize>,
}
