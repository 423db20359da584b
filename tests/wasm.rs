#![cfg(feature = "wasm")]

use text_conform::wasm::*;
use wasm_bindgen_test::*;

#[wasm_bindgen_test(unsupported = test)]
fn test_conform_to_pattern() {
    assert_eq!(
        conform_to_pattern("5551234567", "(999) 999-9999", true, None).unwrap(),
        "(555) 123-4567"
    );
    assert_eq!(conform_to_pattern("12", "99/99", true, Some('#')).unwrap(), "12/##");
    assert_eq!(conform_to_pattern("12", "99/99/99", false, None).unwrap(), "12/");
}

#[wasm_bindgen_test(unsupported = test)]
fn test_masked_input() {
    let mut input = MaskedInput::new("(999) 999-9999", true, None, false, false).unwrap();

    let value = input.update_text("1", 1).unwrap().unwrap();
    assert_eq!(value.value(), "(1__) ___-____");
    assert_eq!(value.caret_position(), 2);
    assert!(!value.rejected());

    assert!(input.update_text("(1__) ___-____", 2).unwrap().is_none());

    let value = input.update_text("(1x__) ___-____", 3).unwrap().unwrap();
    assert_eq!(value.value(), "(1__) ___-____");
    assert!(value.rejected());
}

#[wasm_bindgen_test(unsupported = test)]
fn test_number_input() {
    let mut input = MaskedInput::number_input(None, true, false).unwrap();

    let value = input.update_text("$1234", 5).unwrap().unwrap();
    assert_eq!(value.value(), "$1,234");
    assert_eq!(value.caret_position(), 6);

    input.reset();
    let value = input.update_text("9", 1).unwrap().unwrap();
    assert_eq!(value.value(), "$9");
}
