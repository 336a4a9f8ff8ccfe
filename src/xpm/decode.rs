use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::color;
use super::container::{self, Container};
use super::names::{ColorNameLookup, SymbolicNames};
use super::symbol::{self, Symbol};
use crate::error::PixmapError;
use crate::image::{IndexedImage, PaletteEntry};
use crate::limits::Limits;

/// Parsed `"<columns> <rows> <colors> <chars-per-pixel>"` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XpmHeader {
    pub columns: u32,
    pub rows: u32,
    pub colors: u32,
    pub symbol_width: usize,
}

impl XpmHeader {
    pub(crate) fn parse(line: &[u8]) -> Result<Self, PixmapError> {
        let [columns, rows, colors, width] = container::header_fields(line).ok_or_else(|| {
            PixmapError::MalformedHeader(format!(
                "expected four integers, got {:?}",
                String::from_utf8_lossy(line)
            ))
        })?;
        if !(1..=symbol::MAX_WIDTH as u64).contains(&width) {
            return Err(PixmapError::UnsupportedSymbolWidth(width));
        }
        if columns == 0 || rows == 0 || colors == 0 {
            return Err(PixmapError::MalformedHeader(format!(
                "columns, rows and colors must be nonzero (got {columns} {rows} {colors})"
            )));
        }
        let narrow = |v: u64, what: &str| {
            u32::try_from(v)
                .map_err(|_| PixmapError::MalformedHeader(format!("{what} {v} out of range")))
        };
        Ok(Self {
            columns: narrow(columns, "columns")?,
            rows: narrow(rows, "rows")?,
            colors: narrow(colors, "colors")?,
            symbol_width: width as usize,
        })
    }
}

/// Symbol → palette index table built from the color definition lines.
struct ColorTable {
    symbols: BTreeMap<u32, u32>,
    palette: Vec<PaletteEntry>,
    depth: u8,
}

impl ColorTable {
    fn build(
        lines: &[&[u8]],
        header: &XpmHeader,
        names: &dyn ColorNameLookup,
        mut symbolic: Option<&mut SymbolicNames>,
    ) -> Result<Self, PixmapError> {
        let width = header.symbol_width;
        let mut table = Self {
            symbols: BTreeMap::new(),
            palette: Vec::with_capacity(lines.len().min(header.colors as usize)),
            depth: 1,
        };
        for i in 0..header.colors as usize {
            let line = lines.get(i).ok_or_else(|| {
                PixmapError::DuplicateOrMissingSymbol(format!(
                    "expected {} color lines, found {i}",
                    header.colors
                ))
            })?;
            if line.len() < width {
                return Err(PixmapError::DuplicateOrMissingSymbol(format!(
                    "color line {i} is shorter than the {width}-character symbol"
                )));
            }
            let (key, rest) = line.split_at(width);
            let resolved = color::resolve(rest, names, symbolic.as_deref_mut())?;
            let index = table.palette.len() as u32;
            if table.symbols.insert(Symbol::pack(key), index).is_some() {
                return Err(PixmapError::DuplicateOrMissingSymbol(format!(
                    "symbol {:?} defined twice",
                    String::from_utf8_lossy(key)
                )));
            }
            table.depth = table.depth.max(resolved.depth);
            table.palette.push(PaletteEntry {
                color: resolved.color,
                symbolic: resolved.symbolic,
            });
        }
        Ok(table)
    }
}

/// Decoded XPM: the image plus the maximum channel depth of its color specs.
#[derive(Debug)]
pub(crate) struct DecodedXpm {
    pub image: IndexedImage,
    pub depth: u8,
}

pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    names: &dyn ColorNameLookup,
    symbolic: Option<&mut SymbolicNames>,
) -> Result<DecodedXpm, PixmapError> {
    if !container::is_xpm(data) {
        return Err(PixmapError::UnrecognizedFormat);
    }
    let Container { header, body } = container::parse(data)?;
    let header = XpmHeader::parse(header)?;
    let (columns, rows) = (header.columns, header.rows);

    if let Some(limits) = limits {
        limits.check(columns, rows)?;
        limits.check_colors(header.colors)?;
    }
    let count = (columns as usize)
        .checked_mul(rows as usize)
        .ok_or(PixmapError::DimensionsTooLarge {
            width: columns,
            height: rows,
        })?;
    let bytes = count
        .checked_mul(core::mem::size_of::<u32>())
        .ok_or(PixmapError::DimensionsTooLarge {
            width: columns,
            height: rows,
        })?;
    if let Some(limits) = limits {
        limits.check_memory(bytes)?;
    }

    let colors = header.colors as usize;
    let table = ColorTable::build(&body, &header, names, symbolic)?;
    if table.palette.iter().any(PaletteEntry::is_transparent) {
        log::trace!("xpm color table has a None entry; image carries alpha");
    }

    let pixel_rows = body.get(colors..).unwrap_or_default();
    if pixel_rows.len() < rows as usize {
        return Err(PixmapError::NotEnoughPixelData(format!(
            "expected {rows} pixel rows, found {}",
            pixel_rows.len()
        )));
    }
    let pixel_rows = &pixel_rows[..rows as usize];

    // Rows are validated before the index plane is allocated.
    let width = header.symbol_width;
    let row_bytes = columns as usize * width;
    if let Some((y, line)) = pixel_rows
        .iter()
        .enumerate()
        .find(|(_, line)| line.len() < row_bytes)
    {
        return Err(PixmapError::NotEnoughPixelData(format!(
            "row {y} has {} bytes, need {row_bytes}",
            line.len()
        )));
    }

    let mut indices = Vec::new();
    indices
        .try_reserve_exact(count)
        .map_err(|_| PixmapError::ResourceExhausted(format!("{count} pixel indices")))?;
    for (y, line) in (0u32..).zip(pixel_rows) {
        for (x, key) in line[..row_bytes].chunks_exact(width).enumerate() {
            let index = table.symbols.get(&Symbol::pack(key)).ok_or(
                PixmapError::CorruptColorIndex { x: x as u32, y },
            )?;
            indices.push(*index);
        }
    }

    log::debug!(
        "decoded xpm {columns}x{rows}, {} colors, {width} chars/pixel",
        header.colors
    );
    Ok(DecodedXpm {
        image: IndexedImage::from_parts_unchecked(columns, rows, table.palette, indices),
        depth: table.depth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpm::names::X11Colors;
    use rgb::RGBA8;

    fn run(data: &[u8]) -> Result<DecodedXpm, PixmapError> {
        decode(data, None, &X11Colors, None)
    }

    #[test]
    fn header_rejects_bad_width() {
        assert!(matches!(
            XpmHeader::parse(b"4 2 2 0"),
            Err(PixmapError::UnsupportedSymbolWidth(0))
        ));
        assert!(matches!(
            XpmHeader::parse(b"4 2 2 4"),
            Err(PixmapError::UnsupportedSymbolWidth(4))
        ));
        assert!(matches!(
            XpmHeader::parse(b"0 2 2 1"),
            Err(PixmapError::MalformedHeader(_))
        ));
    }

    #[test]
    fn four_by_two() {
        let data = b"/* XPM */\n\"4 2 2 1\",\n\". c #000000\",\n\"# c #FFFFFF\",\n\
                     \"..##\",\n\"#..#\"\n};";
        let out = run(data).unwrap();
        let img = out.image;
        assert_eq!((img.width(), img.height()), (4, 2));
        assert_eq!(img.indices(), &[0, 0, 1, 1, 1, 0, 0, 1]);
        assert_eq!(img.pixel(0, 0), RGBA8::new(0, 0, 0, 255));
        assert_eq!(img.pixel(2, 0), RGBA8::new(255, 255, 255, 255));
        assert_eq!(out.depth, 8);
    }

    #[test]
    fn missing_row() {
        let err = run(b"/* XPM */\n\"2 2 1 1\",\n\"a c red\",\n\"aa\"\n};").unwrap_err();
        assert!(matches!(err, PixmapError::NotEnoughPixelData(_)));
    }

    #[test]
    fn short_row() {
        let err = run(b"/* XPM */\n\"2 1 1 1\",\n\"a c red\",\n\"a\"\n};").unwrap_err();
        assert!(matches!(err, PixmapError::NotEnoughPixelData(_)));
    }

    #[test]
    fn unknown_symbol_reports_position() {
        let err = run(b"/* XPM */\n\"2 2 1 1\",\n\"a c red\",\n\"aa\",\n\"ab\"\n};").unwrap_err();
        assert!(matches!(err, PixmapError::CorruptColorIndex { x: 1, y: 1 }));
    }

    #[test]
    fn duplicate_symbol() {
        let err =
            run(b"/* XPM */\n\"1 1 2 1\",\n\"a c red\",\n\"a c blue\",\n\"a\"\n};").unwrap_err();
        assert!(matches!(err, PixmapError::DuplicateOrMissingSymbol(_)));
    }

    #[test]
    fn missing_color_line() {
        let err = run(b"/* XPM */\n\"1 1 3 1\",\n\"a c red\"\n};").unwrap_err();
        assert!(matches!(err, PixmapError::DuplicateOrMissingSymbol(_)));
    }

    #[test]
    fn symbolic_names_recorded() {
        let mut names = SymbolicNames::new();
        let data = b"/* XPM */\n\"1 1 1 1\",\n\"a c #FF0000 s alert\",\n\"a\"\n};";
        let out = decode(data, None, &X11Colors, Some(&mut names)).unwrap();
        assert_eq!(out.image.palette()[0].symbolic.as_deref(), Some("alert"));
        assert_eq!(names.get("#FF0000"), Some("alert"));
    }

    #[test]
    fn limits_apply_to_declared_colors() {
        let limits = Limits {
            max_colors: Some(1),
            ..Default::default()
        };
        let data = b"/* XPM */\n\"1 1 2 1\",\n\"a c red\",\n\"b c blue\",\n\"a\"\n};";
        assert!(matches!(
            decode(data, Some(&limits), &X11Colors, None),
            Err(PixmapError::LimitExceeded(_))
        ));
    }

    #[test]
    fn rows_checked_before_allocating() {
        let err = run(b"/* XPM */\n\"60000 60000 1 1\",\n\"a c red\"\n};").unwrap_err();
        assert!(matches!(err, PixmapError::NotEnoughPixelData(_)));
        let err = run(b"/* XPM */\n\"60000 2 1 1\",\n\"a c red\",\n\"a\",\n\"a\"\n};").unwrap_err();
        assert!(matches!(err, PixmapError::NotEnoughPixelData(_)));
    }
}
