#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a pipe gets to see besides the conformed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeContext<'a> {
    pub raw_value: &'a str,
    pub previous_conformed_value: Option<&'a str>,
    pub placeholder: &'a str,
    pub placeholder_char: char,
    pub caret_position: usize,
    pub guide: bool,
    pub keep_char_positions: bool,
}

/// Result of post-processing a conformed value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipeOutcome {
    Accepted {
        value: String,
        /// Positions of the characters the pipe inserted, the caret skips
        /// over them
        indexes_of_piped_chars: Vec<usize>,
    },
    /// The previous conformed value is kept and the edit is flagged as
    /// rejected
    Rejected,
}

impl PipeOutcome {
    #[must_use]
    pub fn is_rejected(&self) -> bool { matches!(self, PipeOutcome::Rejected) }
}

impl From<String> for PipeOutcome {
    fn from(value: String) -> Self {
        PipeOutcome::Accepted {
            value,
            indexes_of_piped_chars: Vec::new(),
        }
    }
}

impl From<&str> for PipeOutcome {
    fn from(value: &str) -> Self { PipeOutcome::from(value.to_owned()) }
}

/// Post-processing step run on every conformed value, for rules a mask
/// cannot express (value ranges, auto-correction).
pub trait Pipe {
    fn transform(&self, conformed_value: &str, context: &PipeContext<'_>) -> PipeOutcome;
}

impl<F> Pipe for F
where
    F: Fn(&str, &PipeContext<'_>) -> PipeOutcome,
{
    fn transform(&self, conformed_value: &str, context: &PipeContext<'_>) -> PipeOutcome {
        self(conformed_value, context)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CONTEXT: PipeContext<'static> = PipeContext {
        raw_value: "12",
        previous_conformed_value: None,
        placeholder: "____",
        placeholder_char: '_',
        caret_position: 2,
        guide: true,
        keep_char_positions: false,
    };

    fn uppercase(value: &str, _: &PipeContext<'_>) -> PipeOutcome { value.to_uppercase().into() }

    fn reject_long_input(value: &str, context: &PipeContext<'_>) -> PipeOutcome {
        if context.raw_value.len() > 1 {
            PipeOutcome::Rejected
        } else {
            value.into()
        }
    }

    #[test]
    fn test_functions_are_pipes() {
        assert_eq!(
            uppercase.transform("ab__", &CONTEXT),
            PipeOutcome::Accepted {
                value: "AB__".to_owned(),
                indexes_of_piped_chars: vec![],
            }
        );
    }

    #[test]
    fn test_pipe_sees_the_raw_value() {
        assert!(reject_long_input.transform("12__", &CONTEXT).is_rejected());
        assert!(
            !reject_long_input
                .transform("1___", &PipeContext {
                    raw_value: "1",
                    ..CONTEXT
                })
                .is_rejected()
        );
    }
}
