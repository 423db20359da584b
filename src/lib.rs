//! Conform text typed into an input to a mask such as `(999) 999-9999` and
//! keep the caret where the user expects it.
//!
//! ```
//! use text_conform::{EngineState, Mask, MaskConfig, Update};
//!
//! let mask: Mask = "(999) 999-9999".parse()?;
//! let mut state = EngineState::new(MaskConfig::new(mask))?;
//!
//! let Update::Changed { value, caret_position, .. } = state.update("5551234", 7)? else {
//!     unreachable!()
//! };
//! assert_eq!(value, "(555) 123-4___");
//! assert_eq!(caret_position, 11);
//! # Ok::<(), text_conform::MaskError>(())
//! ```

mod addons;
mod caret;
mod caret_trap;
mod conform;
mod engine;
mod errors;
mod mask;
mod pipe;
mod placeholder;
mod types;
mod utils;

pub use addons::{
    AutoCorrectedDatePipe, DatePipeOptions, NumberMaskOptions, create_auto_corrected_date_pipe,
    create_number_mask,
};
pub use caret::{CaretContext, adjust_caret_position};
pub use caret_trap::{CARET_TRAP, process_caret_traps};
pub use conform::{
    ConformInput, ConformOptions, ConformOutcome, ConformSettings, conform, conform_to_mask,
};
pub use engine::{EngineState, MaskConfig, Update, update};
pub use errors::MaskError;
pub use mask::{CharClass, CharMatcher, Mask, MaskContext, MaskFn, MaskSource, ResolvedMask, Slot};
pub use pipe::{Pipe, PipeContext, PipeOutcome};
pub use placeholder::{DEFAULT_PLACEHOLDER_CHAR, convert_mask_to_placeholder};
pub use types::{edit_kind::EditKind, raw_value::RawValue};

#[cfg(feature = "wasm")]
pub mod wasm;
