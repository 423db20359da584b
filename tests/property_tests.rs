use proptest::prelude::*;
use text_conform::{
    ConformOptions, ConformSettings, EngineState, Mask, MaskConfig, MaskError, MaskSource, Slot,
    Update, conform_to_mask, convert_mask_to_placeholder,
};

// Static masks mixing literals with digit, letter and alphanumeric slots
fn pattern_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("(999) 999-9999"),
        Just("99/99/9999"),
        Just("aa-9999"),
        Just("+1 (999) 999"),
        Just("***-***"),
        Just("9999 9999 9999 9999"),
    ]
}

fn raw_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[0-9]{0,20}",
        "[0-9a-zA-Z()/ +-]{0,20}",
    ]
}

fn slot_strategy() -> impl Strategy<Value = Slot> {
    prop_oneof![
        Just(Slot::digit()),
        Just(Slot::letter()),
        Just(Slot::CaretTrap),
        prop::char::range('!', '~').prop_map(Slot::Literal),
    ]
}

fn conform_once(raw_value: &str, mask: &MaskSource, previous: Option<&str>) -> String {
    conform_with(raw_value, mask, previous, ConformSettings::default())
}

fn conform_with(
    raw_value: &str,
    mask: &MaskSource,
    previous: Option<&str>,
    settings: ConformSettings,
) -> String {
    let options = ConformOptions {
        settings,
        previous_conformed_value: previous.map(ToOwned::to_owned),
        ..ConformOptions::default()
    };

    conform_to_mask(raw_value, mask, &options)
        .expect("Failed to conform")
        .conformed_value
}

proptest! {
    #[test]
    fn conformed_values_conform_to_themselves(
        pattern in pattern_strategy(),
        raw_value in raw_value_strategy(),
    ) {
        let mask = MaskSource::from(Mask::parse(pattern).unwrap());
        let conformed = conform_once(&raw_value, &mask, None);

        prop_assert_eq!(&conform_once(&conformed, &mask, None), &conformed);
        prop_assert_eq!(&conform_once(&conformed, &mask, Some(&conformed)), &conformed);
    }

    // Without a guide, conforming against itself counts as a deletion and
    // trims trailing literals, so only a fresh conformance is stable.
    #[test]
    fn conformed_values_without_guide_conform_to_themselves(
        pattern in pattern_strategy(),
        raw_value in raw_value_strategy(),
    ) {
        let mask = MaskSource::from(Mask::parse(pattern).unwrap());
        let settings = ConformSettings {
            guide: false,
            ..ConformSettings::default()
        };
        let conformed = conform_with(&raw_value, &mask, None, settings);

        prop_assert_eq!(&conform_with(&conformed, &mask, None, settings), &conformed);
    }

    #[test]
    fn updating_with_the_conformed_value_is_a_no_op(
        pattern in pattern_strategy(),
        raw_value in raw_value_strategy(),
    ) {
        let mut state = EngineState::new(MaskConfig::new(Mask::parse(pattern).unwrap())).unwrap();
        let caret_position = raw_value.chars().count();

        let Update::Changed { value, caret_position, .. } =
            state.update(raw_value.as_str(), caret_position).unwrap()
        else {
            panic!("static masks always conform");
        };

        prop_assert!(caret_position <= value.chars().count());
        prop_assert_eq!(state.update(value.as_str(), caret_position).unwrap(), Update::Unchanged);
    }

    #[test]
    fn placeholder_has_one_char_per_slot(
        slots in prop::collection::vec(slot_strategy(), 0..30),
    ) {
        let mask = Mask::new(slots);
        let non_trap_slots = mask.slots().iter().filter(|slot| **slot != Slot::CaretTrap).count();
        let literal_index = mask.slots().iter().position(|slot| *slot == Slot::Literal('_'));

        match (convert_mask_to_placeholder(&mask, '_'), literal_index) {
            (Ok(placeholder), None) => prop_assert_eq!(placeholder.chars().count(), non_trap_slots),
            (Err(error), Some(index)) => prop_assert_eq!(
                error,
                MaskError::PlaceholderCharInMask { placeholder_char: '_', index }
            ),
            (result, index) => prop_assert!(false, "unexpected {:?} for literal at {:?}", result, index),
        }
    }
}
