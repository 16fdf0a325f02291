//! Low-level text primitives shared by all extractors.
//!
//! Everything in this crate works on raw file content: a regex match gives
//! a byte offset, `line_number` converts it to a 1-based line, and
//! `find_scope_end` bounds a `{ ... }` body by counting braces. Braces
//! inside string literals and comments are counted like structural ones;
//! this is a documented approximation, not a bug.

/// Convert a byte offset into a 1-based line number by counting
/// newlines before it in the original content.
pub fn line_number(content: &str, offset: usize) -> usize {
    content.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Find the byte offset of the closing brace that ends the scope opened
/// after `start`.
///
/// Scans forward from `start`, incrementing on `{` and decrementing on
/// `}`; the scope is entered once the counter has been positive, and ends
/// where it first returns to zero. Returns `None` when the scope never
/// closes before end of content, in which case callers fall back to
/// treating the remainder of the file as the body.
pub fn find_scope_end(content: &str, start: usize) -> Option<usize> {
    let mut depth: i32 = 0;
    let mut entered = false;

    for (i, &b) in content.as_bytes().iter().enumerate().skip(start) {
        match b {
            b'{' => {
                depth += 1;
                entered = true;
            }
            b'}' => {
                depth -= 1;
                if entered && depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Round a byte position up to the next char boundary, clamped to the
/// content length. Needed when slicing at fixed byte offsets into
/// lossily-decoded content.
pub fn align_to_char_boundary(content: &str, mut pos: usize) -> usize {
    if pos >= content.len() {
        return content.len();
    }
    while !content.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}
