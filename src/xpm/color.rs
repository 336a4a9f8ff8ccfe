//! Color-definition line resolution.
//!
//! A definition line is `<symbol> <tag> <value> [<tag> <value> ...]`. Tags
//! are recognized only at the start of the text or after whitespace, and only
//! when followed by whitespace; a value runs until the next such tag.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use rgb::RGBA8;

use super::names::{ColorNameLookup, SymbolicNames, TRANSPARENT};
use crate::error::PixmapError;

/// Visual context a color spec applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContextTag {
    /// `c`: color visual.
    Color,
    /// `g`: grayscale visual.
    Gray,
    /// `g4`: four-level grayscale visual.
    Gray4,
    /// `m`: monochrome visual.
    Mono,
    /// `b`: background hint.
    Background,
    /// `s`: symbolic name.
    Symbolic,
}

impl ContextTag {
    /// Tags whose values may color pixels, best first.
    const VISUAL_PRIORITY: [ContextTag; 5] = [
        ContextTag::Color,
        ContextTag::Gray,
        ContextTag::Gray4,
        ContextTag::Mono,
        ContextTag::Background,
    ];

    // g4 must be tried before g
    pub(crate) const MATCH_ORDER: [ContextTag; 6] = [
        ContextTag::Gray4,
        ContextTag::Color,
        ContextTag::Gray,
        ContextTag::Mono,
        ContextTag::Background,
        ContextTag::Symbolic,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ContextTag::Color => "c",
            ContextTag::Gray => "g",
            ContextTag::Gray4 => "g4",
            ContextTag::Mono => "m",
            ContextTag::Background => "b",
            ContextTag::Symbolic => "s",
        }
    }
}

/// The outcome of resolving one definition line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDefinition {
    pub color: RGBA8,
    /// Bits per channel of the chosen spelling; 0 for `None`.
    pub depth: u8,
    /// The value text that was resolved (e.g. `white`, `#FF0000`, `None`).
    pub spelling: String,
    pub symbolic: Option<String>,
}

impl ResolvedDefinition {
    pub fn is_transparent(&self) -> bool {
        self.color.a == 0
    }
}

/// Color spelling used when a line carries no visual spec at all.
const FALLBACK_SPELLING: &str = "gray";

fn tag_at(text: &[u8], i: usize) -> Option<ContextTag> {
    let anchored = i == 0 || text[i - 1].is_ascii_whitespace();
    if !anchored || text[i].is_ascii_whitespace() {
        return None;
    }
    ContextTag::MATCH_ORDER.into_iter().find(|tag| {
        let token = tag.token().as_bytes();
        text[i..].starts_with(token)
            && text
                .get(i + token.len())
                .is_some_and(|b| b.is_ascii_whitespace())
    })
}

fn next_tag(text: &[u8], from: usize) -> Option<(usize, ContextTag)> {
    (from..text.len()).find_map(|i| tag_at(text, i).map(|tag| (i, tag)))
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |p| p + 1);
    &bytes[start..end]
}

/// Split the text after a symbol into ordered `(tag, value)` pairs.
pub fn parse_specs(text: &[u8]) -> Result<Vec<(ContextTag, &[u8])>, PixmapError> {
    let mut specs = Vec::new();
    let Some((first, first_tag)) = next_tag(text, 0) else {
        return Ok(specs);
    };
    if !trim(&text[..first]).is_empty() {
        log::debug!(
            "ignoring text before first color tag: {:?}",
            String::from_utf8_lossy(&text[..first])
        );
    }

    let mut current = Some((first, first_tag));
    while let Some((pos, tag)) = current {
        let value_start = pos + tag.token().len() + 1;
        let next = next_tag(text, value_start);
        let value_end = next.map_or(text.len(), |(i, _)| i);
        let value = trim(&text[value_start.min(value_end)..value_end]);
        if value.is_empty() {
            return Err(PixmapError::AmbiguousColorSpec(format!(
                "`{}` tag has no value in {:?}",
                tag.token(),
                String::from_utf8_lossy(text)
            )));
        }
        specs.push((tag, value));
        current = next;
    }
    Ok(specs)
}

fn value_str(value: &[u8]) -> Result<&str, PixmapError> {
    core::str::from_utf8(value)
        .map_err(|_| PixmapError::UnknownColor(String::from_utf8_lossy(value).into_owned()))
}

/// Resolve the text after a symbol to a color.
///
/// Picks the best visual spec (`c` > `g` > `g4` > `m`, then `b`), records an
/// `s` name in `symbolic` when given, and maps `None` to [`TRANSPARENT`].
pub fn resolve(
    text: &[u8],
    names: &dyn ColorNameLookup,
    symbolic: Option<&mut SymbolicNames>,
) -> Result<ResolvedDefinition, PixmapError> {
    let specs = parse_specs(text)?;
    let find = |wanted: ContextTag| {
        specs
            .iter()
            .find(|(tag, _)| *tag == wanted)
            .map(|(_, v)| *v)
    };

    let chosen = ContextTag::VISUAL_PRIORITY.into_iter().find_map(find);
    let spelling = match chosen {
        Some(value) => value_str(value)?,
        None => {
            log::debug!("no visual color spec, using {FALLBACK_SPELLING}");
            FALLBACK_SPELLING
        }
    };
    let symbolic_name = find(ContextTag::Symbolic)
        .map(value_str)
        .transpose()?
        .map(String::from);

    let (color, depth) = if spelling.eq_ignore_ascii_case("none") {
        (TRANSPARENT, 0)
    } else {
        let resolved = names
            .lookup(spelling)
            .ok_or_else(|| PixmapError::UnknownColor(String::from(spelling)))?;
        (resolved.color, resolved.depth)
    };

    if let (Some(table), Some(name)) = (symbolic, symbolic_name.as_deref()) {
        table.insert(spelling, name);
    }

    Ok(ResolvedDefinition {
        color,
        depth,
        spelling: String::from(spelling),
        symbolic: symbolic_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpm::names::X11Colors;

    fn resolve_plain(text: &str) -> Result<ResolvedDefinition, PixmapError> {
        resolve(text.as_bytes(), &X11Colors, None)
    }

    #[test]
    fn color_beats_gray() {
        let r = resolve_plain(" g white c black").unwrap();
        assert_eq!(r.color, RGBA8::new(0, 0, 0, 255));
        assert_eq!(r.spelling, "black");
    }

    #[test]
    fn gray_beats_gray4_and_mono() {
        let r = resolve_plain(" m black g4 #888 g white").unwrap();
        assert_eq!(r.spelling, "white");
        let r = resolve_plain(" m black g4 #888").unwrap();
        assert_eq!(r.spelling, "#888");
        assert_eq!(r.depth, 4);
    }

    #[test]
    fn symbolic_is_never_a_color() {
        let r = resolve_plain(" s red").unwrap();
        assert_eq!(r.spelling, "gray");
        assert_eq!(r.symbolic.as_deref(), Some("red"));
    }

    #[test]
    fn symbolic_is_recorded_in_session_table() {
        let mut table = SymbolicNames::new();
        let r = resolve(b" c #FF0000 s alert", &X11Colors, Some(&mut table)).unwrap();
        assert_eq!(r.color, RGBA8::new(255, 0, 0, 255));
        assert_eq!(table.get("#ff0000"), Some("alert"));
    }

    #[test]
    fn none_is_transparent() {
        let r = resolve_plain(" c None").unwrap();
        assert!(r.is_transparent());
        assert_eq!(r.color, TRANSPARENT);
        let r = resolve_plain(" c NONE").unwrap();
        assert!(r.is_transparent());
    }

    #[test]
    fn multi_word_values() {
        let r = resolve_plain(" c light blue m white").unwrap();
        assert_eq!(r.color, RGBA8::new(173, 216, 230, 255));
    }

    #[test]
    fn background_is_last_resort() {
        let r = resolve_plain(" b red").unwrap();
        assert_eq!(r.spelling, "red");
        let r = resolve_plain(" b red m white").unwrap();
        assert_eq!(r.spelling, "white");
    }

    #[test]
    fn abutting_tags_are_rejected() {
        assert!(matches!(
            resolve_plain(" c s foo"),
            Err(PixmapError::AmbiguousColorSpec(_))
        ));
        assert!(matches!(
            resolve_plain(" c "),
            Err(PixmapError::AmbiguousColorSpec(_))
        ));
    }

    #[test]
    fn tag_letters_inside_values_are_not_tags() {
        let specs = parse_specs(b" c bisque").unwrap();
        assert_eq!(specs, [(ContextTag::Color, &b"bisque"[..])]);
        let specs = parse_specs(b" c gray50 g4 black").unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1], (ContextTag::Gray4, &b"black"[..]));
    }

    #[test]
    fn unknown_color_name() {
        assert!(matches!(
            resolve_plain(" c blurple"),
            Err(PixmapError::UnknownColor(name)) if name == "blurple"
        ));
    }
}
