use pretty_assertions::assert_eq;
use serde::Deserialize;
use text_conform::{DEFAULT_PLACEHOLDER_CHAR, EngineState, Mask, MaskConfig, Update};

const CARET: char = '|';

/// `ExampleCase` describes a masked input and a sequence of edits made to it.
///
/// '|' characters in the `input` and `expected` strings of each step mark the
/// caret. A missing `expected` means the update leaves the input alone.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExampleCase {
    name: String,
    mask: String,
    #[serde(default = "default_guide")]
    guide: bool,
    placeholder_char: Option<char>,
    #[serde(default)]
    keep_char_positions: bool,
    #[serde(default)]
    show_mask: bool,
    steps: Vec<ExampleStep>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
struct ExampleStep {
    input: String,
    expected: Option<String>,
    #[serde(default)]
    rejected: bool,
}

fn default_guide() -> bool { true }

impl ExampleCase {
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Replays every step on a fresh input and compares the outcome.
    ///
    /// # Panics
    ///
    /// If the mask is invalid or any step's outcome differs from the expected
    /// one.
    pub fn run(&self) {
        let mask = Mask::parse(&self.mask).expect("Failed to parse mask");
        let config = MaskConfig::new(mask)
            .with_guide(self.guide)
            .with_placeholder_char(self.placeholder_char.unwrap_or(DEFAULT_PLACEHOLDER_CHAR))
            .with_keep_char_positions(self.keep_char_positions)
            .with_show_mask(self.show_mask);
        let mut state = EngineState::new(config).expect("Failed to create input");

        for step in &self.steps {
            let (raw_value, caret_position) = split_caret(&step.input);
            let update = state
                .update(raw_value, caret_position)
                .expect("Failed to update input");

            let expected = step
                .expected
                .as_deref()
                .map_or(Update::Unchanged, |expected| {
                    let (value, caret_position) = split_caret(expected);
                    Update::Changed {
                        value,
                        caret_position,
                        rejected: step.rejected,
                    }
                });

            assert_eq!(update, expected, "{} after typing {:?}", self.name, step.input);
        }
    }
}

/// Remove the caret marker and return its character index.
///
/// # Panics
///
/// If `text` does not contain exactly one caret marker.
#[must_use]
pub fn split_caret(text: &str) -> (String, usize) {
    let carets: Vec<usize> = text
        .chars()
        .enumerate()
        .filter(|(_, c)| *c == CARET)
        .map(|(index, _)| index)
        .collect();
    assert_eq!(carets.len(), 1, "expected a single caret in {text:?}");

    (text.replace(CARET, ""), carets[0])
}
