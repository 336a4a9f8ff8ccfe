//! Color-name lookup and the per-session symbolic-name table.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use rgb::RGBA8;

/// A resolved color value plus the bit depth its spelling carried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedColor {
    pub color: RGBA8,
    /// Bits per channel implied by the spelling (names are 8).
    pub depth: u8,
}

/// Color-name table used by the resolver and the encoder.
pub trait ColorNameLookup {
    /// Resolve a color name or numeric spec (`#rgb`, `gray50`, ...).
    fn lookup(&self, spec: &str) -> Option<ResolvedColor>;

    /// Exact name for an opaque color, if the table has one.
    fn name_for(&self, color: RGBA8) -> Option<String>;
}

/// Fully transparent sentinel produced by `None`.
pub const TRANSPARENT: RGBA8 = RGBA8::new(0, 0, 0, 0);

/// Built-in X11 color table (X11R6 `rgb.txt` subset, plus `grayN`).
#[derive(Clone, Copy, Debug, Default)]
pub struct X11Colors;

// Sorted by name; the first entry for an RGB value is the preferred spelling.
static X11_NAMES: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [190, 190, 190]),
    ("green", [0, 255, 0]),
    ("greenyellow", [173, 255, 47]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrod", [238, 221, 130]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslateblue", [132, 112, 255]),
    ("lightslategray", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [176, 48, 96]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [160, 32, 240]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("violetred", [208, 32, 144]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

impl X11Colors {
    fn named(name: &str) -> Option<[u8; 3]> {
        X11_NAMES
            .binary_search_by(|(n, _)| (*n).cmp(name))
            .ok()
            .map(|i| X11_NAMES[i].1)
    }

    /// `grayN` for N in 0..=100.
    fn gray_level(name: &str) -> Option<[u8; 3]> {
        let digits = name.strip_prefix("gray")?;
        if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let level: u32 = digits.parse().ok()?;
        if level > 100 {
            return None;
        }
        let v = ((level * 255 + 50) / 100) as u8;
        Some([v, v, v])
    }
}

impl ColorNameLookup for X11Colors {
    fn lookup(&self, spec: &str) -> Option<ResolvedColor> {
        let spec = spec.trim();
        if let Some(hex) = spec.strip_prefix('#') {
            return parse_hex(hex);
        }
        let mut name = String::with_capacity(spec.len());
        for c in spec.chars().filter(|c| !c.is_whitespace()) {
            name.push(c.to_ascii_lowercase());
        }
        // grey and gray spell the same colors
        if let Some(pos) = name.find("grey") {
            name.replace_range(pos..pos + 4, "gray");
        }
        let rgb = Self::named(&name).or_else(|| Self::gray_level(&name))?;
        Some(ResolvedColor {
            color: RGBA8::new(rgb[0], rgb[1], rgb[2], 255),
            depth: 8,
        })
    }

    fn name_for(&self, color: RGBA8) -> Option<String> {
        if color.a != 255 {
            return None;
        }
        let rgb = [color.r, color.g, color.b];
        X11_NAMES
            .iter()
            .find(|(_, v)| *v == rgb)
            .map(|(n, _)| String::from(*n))
    }
}

/// Parse `#` color digits: 3, 6, 9 or 12 hex digits.
fn parse_hex(hex: &str) -> Option<ResolvedColor> {
    let bytes = hex.as_bytes();
    if !bytes.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let per_channel = match bytes.len() {
        3 | 6 | 9 | 12 => bytes.len() / 3,
        _ => return None,
    };
    let mut rgb = [0u8; 3];
    for (channel, chunk) in rgb.iter_mut().zip(bytes.chunks_exact(per_channel)) {
        let text = core::str::from_utf8(chunk).ok()?;
        let value = u32::from_str_radix(text, 16).ok()?;
        let max = (1u32 << (4 * per_channel)) - 1;
        *channel = ((value * 255 + max / 2) / max) as u8;
    }
    Some(ResolvedColor {
        color: RGBA8::new(rgb[0], rgb[1], rgb[2], 255),
        depth: (4 * per_channel) as u8,
    })
}

/// `#RRGGBB` spelling of an opaque color.
pub(crate) fn hex_spelling(color: RGBA8) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

/// Symbolic names seen during one decode/encode session, keyed by the
/// color spelling they were declared with.
///
/// Decoding records every `s` spec; encoding consults the table for palette
/// entries that carry no symbolic name of their own.
#[derive(Clone, Debug, Default)]
pub struct SymbolicNames {
    by_color: BTreeMap<String, String>,
}

impl SymbolicNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `symbolic` for the color spelled `color_spec`.
    pub fn insert(&mut self, color_spec: &str, symbolic: &str) {
        self.by_color
            .insert(color_spec.to_ascii_lowercase(), String::from(symbolic));
    }

    /// Symbolic name registered for `color_spec`.
    pub fn get(&self, color_spec: &str) -> Option<&str> {
        self.by_color
            .get(&color_spec.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_color.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_color.is_empty()
    }
}
