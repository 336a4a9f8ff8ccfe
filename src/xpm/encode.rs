use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use super::color::ContextTag;
use super::names::{ColorNameLookup, SymbolicNames, hex_spelling};
use super::symbol::{self, Symbol};
use crate::error::PixmapError;
use crate::image::{IndexedImage, PaletteEntry};
use crate::pixel::check_nonzero;

/// Array name used when the caller gives none.
pub const DEFAULT_NAME: &str = "image";

/// Alpha below this is written as the transparent sentinel.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Writer settings shared by the XPM and Picon encoders.
pub(crate) struct XpmWriter<'a> {
    pub name: &'a str,
    pub names: &'a dyn ColorNameLookup,
    pub symbolic: Option<&'a SymbolicNames>,
    /// Spelling for transparent entries.
    pub transparent_spelling: &'a str,
}

/// Turn an arbitrary string into a C identifier.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    if !name.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
        out.push_str("xpm_");
    }
    for (i, c) in name.chars().enumerate() {
        let keep = if i == 0 && out.is_empty() {
            c.is_ascii_alphabetic()
        } else {
            c.is_ascii_alphanumeric()
        };
        out.push(if keep { c } else { '_' });
    }
    if out == "xpm_" {
        out.push_str(DEFAULT_NAME);
    }
    out
}

/// Whether `name` reads back unchanged as the value of an `s` tag.
///
/// Quotes or line breaks would split the literal, and a word such as `c`
/// or `m` would start another tag.
pub(crate) fn is_writable_symbolic(name: &str) -> bool {
    !name.is_empty()
        && name.trim_matches(|c: char| c.is_ascii_whitespace()).len() == name.len()
        && !name.contains(['"', '\n', '\r'])
        && !name
            .split_ascii_whitespace()
            .any(|word| ContextTag::MATCH_ORDER.iter().any(|tag| tag.token() == word))
}

impl XpmWriter<'_> {
    fn spelling(&self, entry: &PaletteEntry) -> String {
        if entry.color.a < ALPHA_THRESHOLD {
            return String::from(self.transparent_spelling);
        }
        let opaque = rgb::RGBA8 { a: 255, ..entry.color };
        self.names
            .name_for(opaque)
            .unwrap_or_else(|| hex_spelling(opaque))
    }

    pub(crate) fn write(&self, image: &IndexedImage) -> Result<Vec<u8>, PixmapError> {
        let (width, height) = (image.width(), image.height());
        check_nonzero(width, height)?;
        let palette = image.palette();
        let colors = u32::try_from(palette.len())
            .map_err(|_| PixmapError::UnsupportedSymbolWidth(u64::from(u32::MAX)))?;
        let cpp = symbol::width_for(colors)?;
        let symbols = (0..colors)
            .map(|i| symbol::encode(i, cpp))
            .collect::<Result<Vec<Symbol>, _>>()?;

        let mut text = String::new();
        // fmt::Write into a String cannot fail
        let _ = writeln!(text, "/* XPM */");
        let _ = writeln!(text, "static char *{}[] = {{", sanitize_name(self.name));
        let _ = writeln!(text, "/* columns rows colors chars-per-pixel */");
        let _ = writeln!(text, "\"{width} {height} {colors} {cpp}\",");

        for (entry, sym) in palette.iter().zip(&symbols) {
            let spelling = self.spelling(entry);
            let symbolic = entry
                .symbolic
                .as_deref()
                .or_else(|| self.symbolic.and_then(|t| t.get(&spelling)));
            text.push('"');
            text.push_str(sym_str(sym));
            let _ = write!(text, " c {spelling}");
            if let Some(s) = symbolic {
                if !is_writable_symbolic(s) {
                    return Err(PixmapError::AmbiguousColorSpec(format!(
                        "symbolic name {s:?} cannot be written as an `s` value"
                    )));
                }
                let _ = write!(text, " s {s}");
            }
            text.push_str("\",\n");
        }

        text.push_str("/* pixels */\n");
        let row_len = width as usize * cpp + 4;
        text.reserve(row_len * height as usize + 3);
        for y in 0..height {
            text.push('"');
            for &index in image.row(y) {
                text.push_str(sym_str(&symbols[index as usize]));
            }
            text.push('"');
            if y + 1 < height {
                text.push(',');
            }
            text.push('\n');
        }
        text.push_str("};\n");

        log::debug!("encoded xpm {width}x{height}, {colors} colors, {cpp} chars/pixel");
        Ok(text.into_bytes())
    }
}

fn sym_str(symbol: &Symbol) -> &str {
    // alphabet is ASCII
    core::str::from_utf8(symbol.as_bytes()).unwrap_or(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpm::names::X11Colors;
    use alloc::vec;
    use rgb::RGBA8;

    fn writer() -> XpmWriter<'static> {
        XpmWriter {
            name: "image",
            names: &X11Colors,
            symbolic: None,
            transparent_spelling: "None",
        }
    }

    #[test]
    fn exact_layout() {
        let palette = vec![
            PaletteEntry::new(RGBA8::new(0, 0, 0, 255)),
            PaletteEntry::new(RGBA8::new(1, 2, 3, 255)),
        ];
        let img = IndexedImage::new(2, 2, palette, vec![0, 1, 1, 0]).unwrap();
        let out = String::from_utf8(writer().write(&img).unwrap()).unwrap();
        assert_eq!(
            out,
            "/* XPM */\n\
             static char *image[] = {\n\
             /* columns rows colors chars-per-pixel */\n\
             \"2 2 2 1\",\n\
             \"  c black\",\n\
             \". c #010203\",\n\
             /* pixels */\n\
             \" .\",\n\
             \". \"\n\
             };\n"
        );
    }

    #[test]
    fn transparent_and_symbolic() {
        let palette = vec![
            PaletteEntry::new(RGBA8::new(9, 9, 9, 10)),
            PaletteEntry::with_symbolic(RGBA8::new(255, 0, 0, 255), "alert"),
        ];
        let img = IndexedImage::new(2, 1, palette, vec![0, 1]).unwrap();
        let out = String::from_utf8(writer().write(&img).unwrap()).unwrap();
        assert!(out.contains("\"  c None\",\n"));
        assert!(out.contains("\". c red s alert\",\n"));
    }

    #[test]
    fn session_symbolic_names() {
        let mut table = SymbolicNames::new();
        table.insert("#010203", "odd");
        let w = XpmWriter {
            symbolic: Some(&table),
            ..writer()
        };
        let img = IndexedImage::from_rgba(&[RGBA8::new(1, 2, 3, 255)], 1, 1).unwrap();
        let out = String::from_utf8(w.write(&img).unwrap()).unwrap();
        assert!(out.contains("\"  c #010203 s odd\",\n"));
    }

    #[test]
    fn names_become_identifiers() {
        assert_eq!(sanitize_name("icon"), "icon");
        assert_eq!(sanitize_name("my-icon.v2"), "my_icon_v2");
        assert_eq!(sanitize_name("1st"), "_st");
        assert_eq!(sanitize_name("-x"), "xpm__x");
        assert_eq!(sanitize_name(""), "xpm_image");
    }

    #[test]
    fn wide_palette_uses_two_glyphs() {
        let pixels: Vec<RGBA8> = (0..100u8).map(|i| RGBA8::new(i, 0, 0, 255)).collect();
        let img = IndexedImage::from_rgba(&pixels, 100, 1).unwrap();
        let out = String::from_utf8(writer().write(&img).unwrap()).unwrap();
        assert!(out.contains("\"100 1 100 2\",\n"));
    }

    #[test]
    fn empty_image_rejected() {
        let img = IndexedImage::new(0, 0, vec![], vec![]).unwrap();
        assert!(writer().write(&img).is_err());
    }

    #[test]
    fn symbolic_name_must_read_back() {
        assert!(is_writable_symbolic("alert"));
        assert!(is_writable_symbolic("tool bar"));
        assert!(is_writable_symbolic("c4"));
        for bad in ["", " lead", "trail\t", "a c b", "x s", "say \"hi\"", "two\nlines"] {
            assert!(!is_writable_symbolic(bad), "{bad:?}");
        }
    }

    #[test]
    fn unwritable_symbolic_rejected() {
        let palette = vec![PaletteEntry::with_symbolic(RGBA8::new(255, 0, 0, 255), "a m b")];
        let img = IndexedImage::new(1, 1, palette, vec![0]).unwrap();
        assert!(matches!(
            writer().write(&img),
            Err(PixmapError::AmbiguousColorSpec(_))
        ));
    }
}
