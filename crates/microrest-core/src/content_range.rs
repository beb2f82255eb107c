//! Pagination totals carried by the `Content-Range` response header.

/// Parses the total from a `Content-Range` value such as `posts 0-24/319`.
///
/// Only the text after the last `/` is read. Returns `None` when that part is
/// not an unsigned base-10 integer (including `*` and signed values).
pub fn parse_total(value: &str) -> Option<u64> {
    let total = value.rsplit('/').next()?;
    parse_leading_digits(total.trim())
}

// Reads leading digits and ignores any trailing text.
fn parse_leading_digits(text: &str) -> Option<u64> {
    let end = text
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(text.len(), |(index, _)| index);
    text[..end].parse().ok()
}
