pub mod edit_kind;
pub mod raw_value;
