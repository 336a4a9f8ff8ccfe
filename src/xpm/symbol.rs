//! Base-92 pixel symbols.
//!
//! A symbol is a fixed-width little-endian numeral over a 92-glyph alphabet
//! that excludes `"` and `\`, so symbols can sit inside C string literals
//! unescaped.

use crate::error::PixmapError;

/// Symbol alphabet, in digit order.
pub const ALPHABET: &[u8; 92] = b" .XoO+@#$%&*=-;:>,<1234567890qwertyuipasdfghjklzxcvbnmMNBVCZASDFGHJKLPIUYTREWQ!~^/()_`'][{}|";

/// Number of glyphs (the radix).
pub const RADIX: u32 = 92;

/// Widest symbol supported.
pub const MAX_WIDTH: usize = 3;

/// Largest palette representable with [`MAX_WIDTH`] glyphs.
pub const MAX_COLORS: u32 = RADIX * RADIX * RADIX;

const NOT_A_GLYPH: u8 = 0xff;

/// Glyph byte → digit value.
const DIGITS: [u8; 256] = {
    let mut table = [NOT_A_GLYPH; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// A symbol of 1–3 glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    bytes: [u8; MAX_WIDTH],
    width: u8,
}

impl Symbol {
    /// Glyph bytes of this symbol.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.width as usize]
    }

    /// Pack raw key bytes into a map key. `key` must be at most 3 bytes.
    pub(crate) fn pack(key: &[u8]) -> u32 {
        key.iter()
            .enumerate()
            .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i)))
    }
}

/// Minimal symbol width for a palette of `colors` entries.
///
/// Returns [`PixmapError::UnsupportedSymbolWidth`] when the palette does not
/// fit in three glyphs.
pub fn width_for(colors: u32) -> Result<usize, PixmapError> {
    let mut width = 1usize;
    let mut capacity = RADIX;
    while colors > capacity {
        width += 1;
        if width > MAX_WIDTH {
            return Err(PixmapError::UnsupportedSymbolWidth(width as u64));
        }
        capacity *= RADIX;
    }
    Ok(width)
}

/// Encode a palette index as a symbol of `width` glyphs.
pub fn encode(index: u32, width: usize) -> Result<Symbol, PixmapError> {
    if !(1..=MAX_WIDTH).contains(&width) {
        return Err(PixmapError::UnsupportedSymbolWidth(width as u64));
    }
    let capacity = RADIX.pow(width as u32);
    if index >= capacity {
        return Err(PixmapError::UnsupportedVariant(alloc::format!(
            "index {index} does not fit in {width} symbol glyphs"
        )));
    }
    let mut bytes = [b' '; MAX_WIDTH];
    let mut rest = index;
    for slot in bytes.iter_mut().take(width) {
        *slot = ALPHABET[(rest % RADIX) as usize];
        rest /= RADIX;
    }
    Ok(Symbol {
        bytes,
        width: width as u8,
    })
}

/// Decode a symbol into its digit values, least significant first.
pub fn decode_digits(symbol: &[u8]) -> Result<[u8; MAX_WIDTH], PixmapError> {
    if symbol.is_empty() || symbol.len() > MAX_WIDTH {
        return Err(PixmapError::UnsupportedSymbolWidth(symbol.len() as u64));
    }
    let mut digits = [0u8; MAX_WIDTH];
    for (digit, &b) in digits.iter_mut().zip(symbol) {
        let value = DIGITS[b as usize];
        if value == NOT_A_GLYPH {
            return Err(PixmapError::InvalidSymbol(b));
        }
        *digit = value;
    }
    Ok(digits)
}

/// Decode a symbol back into the palette index it encodes.
pub fn decode(symbol: &[u8]) -> Result<u32, PixmapError> {
    let digits = decode_digits(symbol)?;
    Ok(digits[..symbol.len()]
        .iter()
        .rev()
        .fold(0u32, |acc, &d| acc * RADIX + u32::from(d)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_distinct_and_quote_free() {
        let mut seen = [false; 256];
        for &b in ALPHABET {
            assert!(!seen[b as usize], "duplicate glyph {:?}", b as char);
            seen[b as usize] = true;
            assert!(b != b'"' && b != b'\\');
        }
    }

    #[test]
    fn width_is_monotonic_at_boundaries() {
        assert_eq!(width_for(0).unwrap(), 1);
        assert_eq!(width_for(1).unwrap(), 1);
        assert_eq!(width_for(92).unwrap(), 1);
        assert_eq!(width_for(93).unwrap(), 2);
        assert_eq!(width_for(92 * 92).unwrap(), 2);
        assert_eq!(width_for(92 * 92 + 1).unwrap(), 3);
        assert_eq!(width_for(MAX_COLORS).unwrap(), 3);
        assert!(matches!(
            width_for(MAX_COLORS + 1),
            Err(PixmapError::UnsupportedSymbolWidth(4))
        ));
    }

    #[test]
    fn least_significant_glyph_first() {
        assert_eq!(encode(0, 1).unwrap().as_bytes(), b" ");
        assert_eq!(encode(1, 1).unwrap().as_bytes(), b".");
        assert_eq!(encode(92, 2).unwrap().as_bytes(), b" .");
        assert_eq!(encode(93, 2).unwrap().as_bytes(), b"..");
        assert_eq!(encode(92 * 92, 3).unwrap().as_bytes(), b"  .");
    }

    #[test]
    fn encode_decode_agree() {
        for index in [0, 1, 91, 92, 4095, 8463, 8464, 100_000, MAX_COLORS - 1] {
            let width = width_for(index + 1).unwrap();
            let symbol = encode(index, width).unwrap();
            assert_eq!(decode(symbol.as_bytes()).unwrap(), index);
        }
    }

    #[test]
    fn rejects_foreign_bytes() {
        assert!(matches!(decode(b"\""), Err(PixmapError::InvalidSymbol(b'"'))));
        assert!(matches!(
            decode(b"a\\"),
            Err(PixmapError::InvalidSymbol(b'\\'))
        ));
    }

    #[test]
    fn rejects_index_wider_than_symbol() {
        assert!(encode(92, 1).is_err());
        assert!(encode(0, 4).is_err());
    }
}
