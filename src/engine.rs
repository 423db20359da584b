use std::{fmt::Debug, sync::Arc};

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    CaretContext, ConformInput, ConformSettings, DEFAULT_PLACEHOLDER_CHAR, EditKind, MaskContext,
    MaskError,
    MaskSource, Pipe, PipeContext, PipeOutcome, RawValue, ResolvedMask, adjust_caret_position,
    conform, convert_mask_to_placeholder,
};

/// Configuration of a masked input.
#[derive(Clone)]
pub struct MaskConfig {
    pub mask: MaskSource,
    /// Keep unfilled trailing slots visible as placeholder characters
    pub guide: bool,
    pub placeholder_char: char,
    pub keep_char_positions: bool,
    /// Show the placeholder instead of an empty value once the input is
    /// cleared
    pub show_mask: bool,
    pub pipe: Option<Arc<dyn Pipe + Send + Sync>>,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            mask: MaskSource::Disabled,
            guide: true,
            placeholder_char: DEFAULT_PLACEHOLDER_CHAR,
            keep_char_positions: false,
            show_mask: false,
            pipe: None,
        }
    }
}

impl MaskConfig {
    #[must_use]
    pub fn new(mask: impl Into<MaskSource>) -> Self {
        Self {
            mask: mask.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_guide(mut self, guide: bool) -> Self {
        self.guide = guide;
        self
    }

    #[must_use]
    pub fn with_placeholder_char(mut self, placeholder_char: char) -> Self {
        self.placeholder_char = placeholder_char;
        self
    }

    #[must_use]
    pub fn with_keep_char_positions(mut self, keep_char_positions: bool) -> Self {
        self.keep_char_positions = keep_char_positions;
        self
    }

    #[must_use]
    pub fn with_show_mask(mut self, show_mask: bool) -> Self {
        self.show_mask = show_mask;
        self
    }

    #[must_use]
    pub fn with_pipe(mut self, pipe: impl Pipe + Send + Sync + 'static) -> Self {
        self.pipe = Some(Arc::new(pipe));
        self
    }

    /// Check what can be checked before the first update. Computed masks are
    /// only validated once they produce a mask.
    ///
    /// # Errors
    ///
    /// Returns `MaskError::PlaceholderCharInMask` when a static mask contains
    /// the placeholder character as a literal.
    pub fn validate(&self) -> Result<(), MaskError> {
        if let MaskSource::Static(mask) = &self.mask {
            convert_mask_to_placeholder(mask, self.placeholder_char)?;
        }

        Ok(())
    }

    #[must_use]
    pub fn settings(&self) -> ConformSettings {
        ConformSettings {
            guide: self.guide,
            placeholder_char: self.placeholder_char,
            keep_char_positions: self.keep_char_positions,
        }
    }
}

impl Debug for MaskConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskConfig")
            .field("mask", &self.mask)
            .field("guide", &self.guide)
            .field("placeholder_char", &self.placeholder_char)
            .field("keep_char_positions", &self.keep_char_positions)
            .field("show_mask", &self.show_mask)
            .field("pipe", &self.pipe.as_ref().map(|_| ".."))
            .finish()
    }
}

/// What an update asks the host input to do.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Leave the input as it is
    Unchanged,
    Changed {
        value: String,
        caret_position: usize,
        /// A character was dropped by the mask or the pipe rejected the edit
        rejected: bool,
    },
}

/// State of a single masked input, owned by the caller and carried from one
/// update to the next.
#[derive(Debug, Clone)]
pub struct EngineState {
    previous_conformed_value: Option<String>,
    previous_placeholder: Option<String>,
    caret_position: usize,
    config: MaskConfig,
}

impl EngineState {
    /// # Errors
    ///
    /// Returns an error if `config` does not pass `MaskConfig::validate`.
    pub fn new(config: MaskConfig) -> Result<Self, MaskError> {
        config.validate()?;

        Ok(Self {
            previous_conformed_value: None,
            previous_placeholder: None,
            caret_position: 0,
            config,
        })
    }

    /// Replace the configuration. The last conformed value is kept so the
    /// next update conforms the current text against the new mask.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not pass `MaskConfig::validate`, the
    /// state is left untouched in that case.
    pub fn set_config(&mut self, config: MaskConfig) -> Result<(), MaskError> {
        config.validate()?;

        self.config = config;
        self.previous_placeholder = None;
        self.caret_position = 0;
        Ok(())
    }

    /// Forget everything about the values seen so far.
    pub fn reset(&mut self) {
        self.previous_conformed_value = None;
        self.previous_placeholder = None;
        self.caret_position = 0;
    }

    #[must_use]
    pub fn previous_conformed_value(&self) -> Option<&str> { self.previous_conformed_value.as_deref() }

    #[must_use]
    pub fn previous_placeholder(&self) -> Option<&str> { self.previous_placeholder.as_deref() }

    #[must_use]
    pub fn caret_position(&self) -> usize { self.caret_position }

    #[must_use]
    pub fn config(&self) -> &MaskConfig { &self.config }

    /// See [`update`].
    ///
    /// # Errors
    ///
    /// See [`update`].
    pub fn update(
        &mut self,
        raw_value: impl Into<RawValue>,
        caret_position: usize,
    ) -> Result<Update, MaskError> {
        update(self, raw_value, caret_position)
    }
}

/// Conform what the user just typed into an input and work out where its
/// caret goes.
///
/// `caret_position` is the caret right after the edit, counted in characters.
/// Returns `Update::Unchanged` when masking is disabled (either statically or
/// by a computed mask for this value) and when the raw value is the one the
/// previous update produced.
///
/// ```
/// use text_conform::{EngineState, MaskConfig, Update};
///
/// let mut state = EngineState::new(MaskConfig::new("(999) 999-9999".parse::<text_conform::Mask>()?))?;
///
/// assert_eq!(
///     state.update("5", 1)?,
///     Update::Changed {
///         value: "(5__) ___-____".to_owned(),
///         caret_position: 2,
///         rejected: false,
///     }
/// );
/// # Ok::<(), text_conform::MaskError>(())
/// ```
///
/// # Errors
///
/// Returns `MaskError::PlaceholderCharInMask` when the placeholder character
/// is a literal of the computed mask.
pub fn update(
    state: &mut EngineState,
    raw_value: impl Into<RawValue>,
    caret_position: usize,
) -> Result<Update, MaskError> {
    let raw_value = raw_value.into().into_text();
    let config = &state.config;

    if config.mask.is_disabled() {
        debug!("Masking is disabled, leaving {raw_value:?} as is");
        return Ok(Update::Unchanged);
    }

    if state.previous_conformed_value.as_deref() == Some(raw_value.as_str()) {
        debug!("{raw_value:?} is already conformed");
        return Ok(Update::Unchanged);
    }

    let context = MaskContext {
        caret_position,
        previous_conformed_value: state.previous_conformed_value.as_deref(),
        placeholder_char: config.placeholder_char,
    };
    let Some(ResolvedMask {
        mask,
        caret_trap_indexes,
    }) = config.mask.resolve(&raw_value, &context)
    else {
        debug!("Computed mask disabled masking for {raw_value:?}");
        return Ok(Update::Unchanged);
    };

    let placeholder = convert_mask_to_placeholder(&mask, config.placeholder_char)?;
    let previous_conformed_value = state.previous_conformed_value.as_deref().unwrap_or_default();
    let edit = EditKind::classify(
        raw_value.chars().count(),
        previous_conformed_value.chars().count(),
    );

    trace!(
        "Conforming {raw_value:?} ({edit:?}) with the caret at {caret_position} to a mask of {} slots",
        mask.len()
    );

    let outcome = conform(
        &mask,
        &ConformInput {
            raw_value: &raw_value,
            previous_conformed_value,
            placeholder: &placeholder,
            caret_position,
            edit,
        },
        config.settings(),
    );

    let (value, indexes_of_piped_chars, pipe_rejected) = match &config.pipe {
        None => (outcome.conformed_value, Vec::new(), false),
        Some(pipe) => {
            let pipe_context = PipeContext {
                raw_value: &raw_value,
                previous_conformed_value: state.previous_conformed_value.as_deref(),
                placeholder: &placeholder,
                placeholder_char: config.placeholder_char,
                caret_position,
                guide: config.guide,
                keep_char_positions: config.keep_char_positions,
            };

            match pipe.transform(&outcome.conformed_value, &pipe_context) {
                PipeOutcome::Accepted {
                    value,
                    indexes_of_piped_chars,
                } => (value, indexes_of_piped_chars, false),
                PipeOutcome::Rejected => {
                    debug!("Pipe rejected {:?}", outcome.conformed_value);
                    (previous_conformed_value.to_owned(), Vec::new(), true)
                }
            }
        }
    };

    let adjusted_caret_position = adjust_caret_position(&CaretContext {
        previous_conformed_value,
        previous_placeholder: state.previous_placeholder.as_deref().unwrap_or_default(),
        caret_position,
        conformed_value: &value,
        raw_value: &raw_value,
        placeholder_char: config.placeholder_char,
        placeholder: &placeholder,
        indexes_of_piped_chars: &indexes_of_piped_chars,
        caret_trap_indexes: &caret_trap_indexes,
        edit,
    });

    // The previous value may be shorter than the caret after a pipe rejection
    let adjusted_caret_position = if pipe_rejected {
        adjusted_caret_position.min(value.chars().count())
    } else {
        adjusted_caret_position
    };

    // A fully cleared input shows up empty
    let value = if value == placeholder && adjusted_caret_position == 0 {
        if config.show_mask {
            placeholder.clone()
        } else {
            String::new()
        }
    } else {
        value
    };

    trace!("Conformed to {value:?} with the caret at {adjusted_caret_position}");

    state.previous_conformed_value = Some(value.clone());
    state.previous_placeholder = Some(placeholder);
    state.caret_position = adjusted_caret_position;

    Ok(Update::Changed {
        value,
        caret_position: adjusted_caret_position,
        rejected: outcome.some_chars_rejected || pipe_rejected,
    })
}
