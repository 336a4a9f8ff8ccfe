//! C-source container scanning: find the string literals of an XPM array.

use alloc::vec::Vec;

use crate::error::PixmapError;

/// Logical lines of an XPM body, starting at the header literal.
pub(crate) struct Container<'a> {
    pub header: &'a [u8],
    /// Color definition lines followed by pixel rows.
    pub body: Vec<&'a [u8]>,
}

/// Whether `data` starts with the `/* XPM */` banner.
pub fn is_xpm(data: &[u8]) -> bool {
    data.len() >= 9 && &data[1..8] == b"* XPM *"
}

/// Collect the contents of every string literal outside comments and
/// preprocessor lines, up to the closing `};`.
///
/// Escapes are not interpreted; the symbol alphabet has no `"` or `\`.
pub(crate) fn literals(data: &[u8]) -> Result<Vec<&[u8]>, PixmapError> {
    let mut out = Vec::new();
    let mut i = 0;
    let mut line_start = true;
    while i < data.len() {
        let b = data[i];
        match b {
            b'#' if line_start => {
                i = data[i..]
                    .iter()
                    .position(|&c| c == b'\n')
                    .map_or(data.len(), |p| i + p);
                continue;
            }
            b'/' if data.get(i + 1) == Some(&b'*') => {
                i = data[i + 2..]
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map_or(data.len(), |p| i + 2 + p + 2);
                line_start = false;
                continue;
            }
            b'}' if data.get(i + 1) == Some(&b';') => break,
            b'"' => {
                let start = i + 1;
                let len = data[start..]
                    .iter()
                    .position(|&c| c == b'"')
                    .ok_or(PixmapError::UnterminatedLiteral)?;
                out.push(&data[start..start + len]);
                i = start + len + 1;
                line_start = false;
                continue;
            }
            _ => {}
        }
        line_start = b == b'\n' || (line_start && (b == b' ' || b == b'\t' || b == b'\r'));
        i += 1;
    }
    Ok(out)
}

/// Parse the four leading unsigned integers of a header literal.
///
/// Trailing fields (hotspot, `XPMEXT`) are ignored.
pub(crate) fn header_fields(line: &[u8]) -> Option<[u64; 4]> {
    let text = core::str::from_utf8(line).ok()?;
    let mut fields = [0u64; 4];
    let mut tokens = text.split_ascii_whitespace();
    for field in &mut fields {
        *field = tokens.next()?.parse().ok()?;
    }
    Some(fields)
}

/// Split literals into logical lines and locate the header.
///
/// Literals before the header (array name strings, stray text) are skipped.
pub(crate) fn parse(data: &[u8]) -> Result<Container<'_>, PixmapError> {
    let mut lines = literals(data)?
        .into_iter()
        .flat_map(|lit| lit.split(|&b| b == b'\n'));
    let header = lines
        .by_ref()
        .find(|line| header_fields(line).is_some())
        .ok_or_else(|| PixmapError::MalformedHeader("no header literal found".into()))?;
    Ok(Container {
        header,
        body: lines.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &[u8] = b"/* XPM */\n\
        static char *x[] = {\n\
        /* columns rows colors chars-per-pixel */\n\
        \"2 1 2 1\",\n\
        \"  c white\",\n\
        \". c black\",\n\
        /* pixels */\n\
        \" .\"\n\
        };\n";

    #[test]
    fn sniff() {
        assert!(is_xpm(SMALL));
        assert!(!is_xpm(b"/* XPM"));
        assert!(!is_xpm(b"P6\n1 1\n255\n"));
    }

    #[test]
    fn literals_skip_comments() {
        let lits = literals(SMALL).unwrap();
        assert_eq!(lits, [&b"2 1 2 1"[..], b"  c white", b". c black", b" ."]);
    }

    #[test]
    fn quote_in_comment_is_ignored() {
        let lits = literals(b"/* say \"hi */ \"a\" };").unwrap();
        assert_eq!(lits, [&b"a"[..]]);
    }

    #[test]
    fn preprocessor_lines_skipped() {
        let lits = literals(b"#define FOO \"bar\"\n  \"1 1 1 1\"\n};").unwrap();
        assert_eq!(lits, [&b"1 1 1 1"[..]]);
    }

    #[test]
    fn stops_at_terminator() {
        let lits = literals(b"\"a\"};\n\"b\"").unwrap();
        assert_eq!(lits, [&b"a"[..]]);
    }

    #[test]
    fn unterminated_literal() {
        assert!(matches!(
            literals(b"\"1 1 1 1\",\n\"abc"),
            Err(PixmapError::UnterminatedLiteral)
        ));
    }

    #[test]
    fn header_with_hotspot() {
        assert_eq!(header_fields(b"16 16 4 1 0 0 XPMEXT"), Some([16, 16, 4, 1]));
        assert_eq!(header_fields(b"16 16 4"), None);
        assert_eq!(header_fields(b"c white"), None);
    }

    #[test]
    fn header_search_skips_leading_literals() {
        let c = parse(b"\"name\" \"3 1 1 1\" \"a c red\" \"aaa\" };").unwrap();
        assert_eq!(c.header, b"3 1 1 1");
        assert_eq!(c.body, [&b"a c red"[..], b"aaa"]);
    }

    #[test]
    fn missing_header() {
        assert!(matches!(
            parse(b"\"hello\" };"),
            Err(PixmapError::MalformedHeader(_))
        ));
    }
}
