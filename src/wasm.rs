//! Expose masked inputs to JavaScript through WebAssembly.
use wasm_bindgen::prelude::*;

use crate::{
    ConformOptions, ConformSettings, DEFAULT_PLACEHOLDER_CHAR, EngineState, Mask, MaskConfig,
    MaskSource, NumberMaskOptions, RawValue, Update, conform_to_mask, create_number_mask,
};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// The state of one masked `<input>` element.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MaskedInput {
    state: EngineState,
}

#[wasm_bindgen]
impl MaskedInput {
    /// Create an input masked by `pattern`, see `Mask::parse` for the
    /// notation.
    ///
    /// # Errors
    ///
    /// If the pattern is malformed or contains the placeholder character.
    #[wasm_bindgen(constructor)]
    pub fn new(
        pattern: &str,
        guide: bool,
        placeholder_char: Option<char>,
        keep_char_positions: bool,
        show_mask: bool,
    ) -> Result<MaskedInput, JsValue> {
        set_panic_hook();

        let config = MaskConfig::new(Mask::parse(pattern)?)
            .with_guide(guide)
            .with_placeholder_char(placeholder_char.unwrap_or(DEFAULT_PLACEHOLDER_CHAR))
            .with_keep_char_positions(keep_char_positions)
            .with_show_mask(show_mask);

        Ok(Self {
            state: EngineState::new(config)?,
        })
    }

    /// Create an input for currency-like numbers, see `create_number_mask`.
    ///
    /// # Errors
    ///
    /// If the prefix contains the placeholder character.
    #[wasm_bindgen(js_name = numberInput)]
    pub fn number_input(
        prefix: Option<String>,
        allow_decimal: bool,
        allow_negative: bool,
    ) -> Result<MaskedInput, JsValue> {
        set_panic_hook();

        let defaults = NumberMaskOptions::default();
        let options = NumberMaskOptions {
            prefix: prefix.unwrap_or(defaults.prefix.clone()),
            allow_decimal,
            allow_negative,
            ..defaults
        };

        Ok(Self {
            state: EngineState::new(MaskConfig::new(create_number_mask(options)))?,
        })
    }

    /// Conform the current value of the input, `rawValue` may be a string, a
    /// number, `null` or `undefined`. Returns `undefined` when the input is
    /// to be left alone.
    ///
    /// # Errors
    ///
    /// If `rawValue` is of any other type.
    pub fn update(
        &mut self,
        raw_value: JsValue,
        caret_position: usize,
    ) -> Result<Option<MaskedValue>, JsValue> {
        let raw_value = RawValue::try_from(raw_value)?;
        Ok(self.state.update(raw_value, caret_position)?.into())
    }

    /// Like `update` for string values.
    ///
    /// # Errors
    ///
    /// If a computed mask contains the placeholder character.
    #[wasm_bindgen(js_name = updateText)]
    pub fn update_text(
        &mut self,
        raw_value: &str,
        caret_position: usize,
    ) -> Result<Option<MaskedValue>, JsValue> {
        Ok(self.state.update(raw_value, caret_position)?.into())
    }

    pub fn reset(&mut self) { self.state.reset(); }
}

/// Conform `rawValue` to `pattern` once, with the caret at the end.
///
/// # Errors
///
/// If the pattern is malformed or contains the placeholder character.
#[wasm_bindgen(js_name = conformToPattern)]
pub fn conform_to_pattern(
    raw_value: &str,
    pattern: &str,
    guide: bool,
    placeholder_char: Option<char>,
) -> Result<String, JsValue> {
    set_panic_hook();

    let options = ConformOptions {
        settings: ConformSettings {
            guide,
            placeholder_char: placeholder_char.unwrap_or(DEFAULT_PLACEHOLDER_CHAR),
            keep_char_positions: false,
        },
        ..ConformOptions::default()
    };
    let mask = MaskSource::from(Mask::parse(pattern)?);

    Ok(conform_to_mask(raw_value, &mask, &options)?.conformed_value)
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// What the `<input>` element should be updated to.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedValue {
    value: String,
    caret_position: usize,
    rejected: bool,
}

#[wasm_bindgen]
impl MaskedValue {
    #[must_use]
    pub fn value(&self) -> String { self.value.clone() }

    #[wasm_bindgen(js_name = caretPosition)]
    #[must_use]
    pub fn caret_position(&self) -> usize { self.caret_position }

    #[must_use]
    pub fn rejected(&self) -> bool { self.rejected }
}

impl From<Update> for Option<MaskedValue> {
    fn from(update: Update) -> Self {
        match update {
            Update::Unchanged => None,
            Update::Changed {
                value,
                caret_position,
                rejected,
            } => Some(MaskedValue {
                value,
                caret_position,
                rejected,
            }),
        }
    }
}
