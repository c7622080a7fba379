//! Delimiting of string literals that may embed `\( ... )` interpolations.
//!
//! Offsets are byte offsets. Every delimiter the scanner cares about is ASCII,
//! so walking the UTF-8 bytes never lands inside a multi-byte code point.

use std::ops::Range;

const QUOTE: u8 = b'"';
const ESCAPE: u8 = b'\\';
const OPEN_PAREN: u8 = b'(';
const CLOSE_PAREN: u8 = b')';

/// Finds the closing quote of the string literal whose opening quote is at `open`.
///
/// Interpolations (`\(` ... `)`) are skipped by counting parentheses, and any
/// string literal nested inside an interpolation is skipped recursively.
///
/// Returns `None` when `source[open]` is not a quote, or when the literal, one
/// of its interpolations, or a literal nested inside one is unterminated.
pub fn find_literal_end(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    if bytes.get(open) != Some(&QUOTE) {
        return None;
    }
    scan_literal(bytes, open + 1)
}

/// Returns the span of the whole literal opening at `open`, quotes included.
pub fn literal_span(source: &str, open: usize) -> Option<Range<usize>> {
    find_literal_end(source, open).map(|close| open..close + 1)
}

/// Scans a literal body starting just after its opening quote and returns the
/// offset of the closing quote.
fn scan_literal(bytes: &[u8], mut index: usize) -> Option<usize> {
    while index < bytes.len() {
        match bytes[index] {
            ESCAPE if bytes.get(index + 1) == Some(&OPEN_PAREN) => {
                index = scan_interpolation(bytes, index + 2)?;
            },
            // `\"`, `\\`, `\n`, ... An escape on the last byte runs off the end.
            ESCAPE => index += 2,
            QUOTE => return Some(index),
            _ => index += 1,
        }
    }

    None
}

/// Skips an interpolation body starting just after `\(` and returns the offset
/// following its closing parenthesis.
fn scan_interpolation(bytes: &[u8], mut index: usize) -> Option<usize> {
    let mut depth = 1usize;

    while index < bytes.len() {
        match bytes[index] {
            OPEN_PAREN => depth += 1,
            CLOSE_PAREN => {
                depth -= 1;
                if depth == 0 {
                    return Some(index + 1);
                }
            },
            QUOTE => index = scan_literal(bytes, index + 1)?,
            _ => {},
        }
        index += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain(r#""Save""#, 5)]
    #[case::empty(r#""""#, 1)]
    #[case::escaped_quote(r#""say \"hi\"""#, 11)]
    #[case::escaped_backslash(r#""C:\\""#, 5)]
    #[case::interpolation(r#""Hello, \(name)!""#, 16)]
    #[case::nested_literal(r#""Value: \(label("x"))""#, 21)]
    #[case::nested_parens(r#""\(f(g(1), h()))""#, 16)]
    #[case::paren_inside_nested_literal(r#""\(f(")"))""#, 10)]
    #[case::nested_interpolation(r#""a\(f("b\(c)"))d""#, 16)]
    #[case::stops_at_first_literal(r#""a", "b""#, 2)]
    fn test_find_literal_end(#[case] source: &str, #[case] expected: usize) {
        assert_eq!(find_literal_end(source, 0), Some(expected));
        assert_eq!(source.as_bytes()[expected], b'"');
    }

    #[rstest]
    #[case::unterminated(r#""unterminated"#)]
    #[case::unterminated_interpolation(r#""\(name""#)]
    #[case::unbalanced_parens(r#""\(f(x)""#)]
    #[case::unterminated_nested_literal(r#""\(f("x)"#)]
    #[case::trailing_escape("\"abc\\")]
    #[case::lone_quote("\"")]
    fn test_find_literal_end_malformed(#[case] source: &str) {
        assert_eq!(find_literal_end(source, 0), None);
    }

    #[test]
    fn test_find_literal_end_requires_quote() {
        assert_eq!(find_literal_end("loc(ctx, 42)", 9), None);
        assert_eq!(find_literal_end("x", 5), None);
    }

    #[test]
    fn test_find_literal_end_at_offset() {
        let source = r#"Text("one") + Text("two")"#;
        assert_eq!(find_literal_end(source, 5), Some(9));
        assert_eq!(find_literal_end(source, 19), Some(23));
    }

    #[test]
    fn test_find_literal_end_multibyte() {
        let source = r#"("Сохранить \(count) файлов")"#;
        let close = find_literal_end(source, 1).unwrap();
        assert_eq!(&source[1..=close], r#""Сохранить \(count) файлов""#);
    }

    #[test]
    fn test_literal_span_includes_quotes() {
        let source = r#"x = "Hi, \(user.name)" + y"#;
        let span = literal_span(source, 4).unwrap();
        assert_eq!(&source[span], r#""Hi, \(user.name)""#);
    }
}
