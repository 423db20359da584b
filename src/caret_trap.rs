use crate::{Mask, Slot};

/// In-band notation of a caret trap inside a mask pattern.
pub const CARET_TRAP: &str = "[]";

/// Remove every caret trap from `mask` and return the trap-free mask together
/// with the index each trap would have in it. A trap at index `i` stops the
/// caret right before the slot that ends up at `i`.
#[must_use]
pub fn process_caret_traps(mask: Mask) -> (Mask, Vec<usize>) {
    let mut indexes = Vec::new();
    let mut slots = Vec::with_capacity(mask.len());

    for slot in mask.into_slots() {
        if slot == Slot::CaretTrap {
            indexes.push(slots.len());
        } else {
            slots.push(slot);
        }
    }

    (Mask::new(slots), indexes)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_without_traps() {
        let mask = Mask::parse("99-99").unwrap();

        assert_eq!(process_caret_traps(mask.clone()), (mask, vec![]));
    }

    #[test]
    fn test_trap_positions_refer_to_the_stripped_mask() {
        let (mask, indexes) = process_caret_traps(Mask::parse("$9[].[]99[]").unwrap());

        assert_eq!(mask, Mask::parse("$9.99").unwrap());
        assert_eq!(indexes, vec![2, 3, 5]);
    }
}
