/// Lowercase `c` when its lowercase form is a single character, so folding a
/// string never changes its length in characters.
pub fn fold_case(c: char) -> char {
    let mut lowercase = c.to_lowercase();
    match (lowercase.next(), lowercase.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

pub fn fold_chars(text: &[char]) -> Vec<char> { text.iter().copied().map(fold_case).collect() }
