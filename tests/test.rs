mod example_case;

use std::{fs, path::Path};

use example_case::{ExampleCase, split_caret};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use text_conform::{
    ConformOptions, DatePipeOptions, EngineState, Mask, MaskConfig, MaskSource, NumberMaskOptions,
    Update, conform_to_mask, create_auto_corrected_date_pipe, create_number_mask,
};

#[test]
fn test_example_cases() {
    let cases = get_all_cases();
    assert!(!cases.is_empty());

    for case in &cases {
        println!("Running {}", case.name());
        case.run();
    }
}

#[test]
fn test_number_input() {
    let options = NumberMaskOptions {
        allow_decimal: true,
        ..NumberMaskOptions::default()
    };
    let mut state = EngineState::new(MaskConfig::new(create_number_mask(options))).unwrap();

    for (input, expected) in [
        ("1|", "$1|"),
        ("$12|", "$12|"),
        ("$123|", "$123|"),
        ("$1234|", "$1,234|"),
        ("$1,234.|", "$1,234.|"),
        ("$1,234.5|", "$1,234.5|"),
    ] {
        assert_eq!(update(&mut state, input), changed(expected), "typing {input:?}");
    }
}

#[test]
fn test_number_input_with_decimal_right_away() {
    let options = NumberMaskOptions {
        allow_decimal: true,
        ..NumberMaskOptions::default()
    };
    let mut state = EngineState::new(MaskConfig::new(create_number_mask(options))).unwrap();

    assert_eq!(update(&mut state, "1|"), changed("$1|"));
    assert_eq!(update(&mut state, "$1.|"), changed("$1.|"));
    assert_eq!(update(&mut state, "$1.5|"), changed("$1.5|"));
}

#[test]
fn test_date_input() {
    let config = MaskConfig::new(Mask::parse("99/99/9999").unwrap()).with_pipe(
        create_auto_corrected_date_pipe("mm/dd/yyyy", DatePipeOptions::default()),
    );
    let mut state = EngineState::new(config.clone()).unwrap();

    assert_eq!(update(&mut state, "4|"), changed("04/|__/____"));

    let mut state = EngineState::new(config).unwrap();
    assert_eq!(update(&mut state, "1|"), changed("1|_/__/____"));
    assert_eq!(
        update(&mut state, "13|_/__/____"),
        Update::Changed {
            value: "1_/__/____".to_owned(),
            caret_position: 1,
            rejected: true,
        }
    );
    assert_eq!(state.previous_conformed_value(), Some("1_/__/____"));
}

#[test]
fn test_conform_to_mask_with_previous_value() {
    let mask = MaskSource::from(Mask::parse("(999) 999-9999").unwrap());
    let options = ConformOptions {
        previous_conformed_value: Some("(123) 456-____".to_owned()),
        caret_position: Some(3),
        ..ConformOptions::default()
    };

    let outcome = conform_to_mask("(12) 456-____", &mask, &options).unwrap();

    assert_eq!(outcome.conformed_value, "(124) 56_-____");
    assert!(!outcome.some_chars_rejected);
}

fn update(state: &mut EngineState, input: &str) -> Update {
    let (raw_value, caret_position) = split_caret(input);
    state.update(raw_value, caret_position).unwrap()
}

fn changed(expected: &str) -> Update {
    let (value, caret_position) = split_caret(expected);
    Update::Changed {
        value,
        caret_position,
        rejected: false,
    }
}

fn get_all_cases() -> Vec<ExampleCase> {
    let examples_dir = Path::new("tests/examples");
    let entries = fs::read_dir(examples_dir)
        .expect("Failed to read examples directory")
        .collect::<Vec<_>>();

    let mut cases = Vec::new();

    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("yml") {
            let file = fs::File::open(&path).expect("Failed to open example file");
            for document in serde_yaml::Deserializer::from_reader(file) {
                let case = ExampleCase::deserialize(document).expect("Failed to deserialize case");
                cases.push(case);
            }
        }
    }

    cases
}
