//! Small text helpers shared across the parser and the search engine.

/// Largest char boundary at or below `index`, so byte-offset slicing never
/// lands inside a multi-byte character.
pub fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
