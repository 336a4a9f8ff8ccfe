//! Fixed 128-byte CALS header records.

use alloc::format;
use alloc::vec::Vec;

use crate::info::Orientation;

/// Size of one header record.
pub const RECORD_LEN: usize = 128;

/// Number of header records before the raster payload.
pub const RECORD_COUNT: usize = 16;

/// Byte offset of the raster payload.
pub const HEADER_LEN: usize = RECORD_LEN * RECORD_COUNT;

/// Fields recovered from the header records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalsHeader {
    /// `rpelcnt` pixels per line; 0 when absent.
    pub width: u32,
    /// `rpelcnt` line count; 0 when absent.
    pub height: u32,
    /// `rdensty` in pixels per inch.
    pub density: Option<u32>,
    /// `rtype`; 1 when absent.
    pub rtype: u32,
    /// `rorient` pel path in degrees.
    pub pel_path: u32,
    /// `rorient` line direction in degrees.
    pub direction: u32,
    pub orientation: Orientation,
    /// Where the raster payload starts.
    pub data_offset: usize,
}

/// Skip whitespace, then read a decimal number. Returns the value and the
/// remaining bytes.
fn scan_u32(s: &[u8]) -> Option<(u32, &[u8])> {
    let start = s.iter().position(|b| !b.is_ascii_whitespace())?;
    let s = &s[start..];
    let s = s.strip_prefix(b"+").unwrap_or(s);
    let digits = s.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let value = s[..digits].iter().try_fold(0u32, |acc, &d| {
        acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
    })?;
    Some((value, &s[digits..]))
}

fn scan_pair(s: &[u8]) -> Option<(u32, u32)> {
    let (a, rest) = scan_u32(s)?;
    let rest = rest.strip_prefix(b",")?;
    let (b, _) = scan_u32(rest)?;
    Some((a, b))
}

fn has_key(record: &[u8], key: &str) -> bool {
    record.len() >= key.len() && record[..key.len()].eq_ignore_ascii_case(key.as_bytes())
}

/// Orientation for an `rorient` pel path and line direction.
pub fn orientation_from_rorient(pel_path: u32, direction: u32) -> Orientation {
    let base = match pel_path {
        90 => 5,
        180 => 3,
        270 => 7,
        _ => 1,
    };
    let code = if direction == 90 { base + 1 } else { base };
    Orientation::from_code(code).unwrap_or_default()
}

/// `rorient` pel path and line direction for an orientation.
pub fn rorient_for(orientation: Orientation) -> (u32, u32) {
    let pel_path = match orientation {
        Orientation::TopLeft | Orientation::TopRight => 0,
        Orientation::LeftTop | Orientation::RightTop => 90,
        Orientation::BottomRight | Orientation::BottomLeft => 180,
        Orientation::RightBottom | Orientation::LeftBottom => 270,
    };
    let direction = if orientation.code() % 2 == 0 { 90 } else { 270 };
    (pel_path, direction)
}

/// Scan up to sixteen records for the keys this codec understands.
///
/// Unknown keys are skipped. A short trailing record ends the scan.
pub fn parse(data: &[u8]) -> CalsHeader {
    let mut header = CalsHeader {
        width: 0,
        height: 0,
        density: None,
        rtype: 1,
        pel_path: 0,
        direction: 0,
        orientation: Orientation::TopLeft,
        data_offset: data.len().min(HEADER_LEN),
    };
    for record in data.chunks_exact(RECORD_LEN).take(RECORD_COUNT) {
        if !matches!(record[0], b'r' | b'R') {
            continue;
        }
        if has_key(record, "rdensty:") {
            if let Some((d, _)) = scan_u32(&record[8..]) {
                header.density = Some(d);
            }
        } else if has_key(record, "rpelcnt:") {
            if let Some((w, h)) = scan_pair(&record[8..]) {
                header.width = w;
                header.height = h;
            }
        } else if has_key(record, "rorient:") {
            if let Some((pel_path, direction)) = scan_pair(&record[8..]) {
                header.pel_path = pel_path;
                header.direction = direction;
            }
            header.orientation = orientation_from_rorient(header.pel_path, header.direction);
        } else if has_key(record, "rtype:") {
            if let Some((t, _)) = scan_u32(&record[6..]) {
                header.rtype = t;
            }
        }
    }
    if header.rtype != 1 {
        log::debug!("cals rtype {} treated as type 1", header.rtype);
    }
    header
}

fn push_record(out: &mut Vec<u8>, text: &str) {
    let bytes = text.as_bytes();
    let len = bytes.len().min(RECORD_LEN);
    out.extend_from_slice(&bytes[..len]);
    out.resize(out.len() + RECORD_LEN - len, b' ');
}

/// Append the sixteen header records for a type 1 raster.
pub fn write(out: &mut Vec<u8>, width: u32, height: u32, density: u32, orientation: Orientation) {
    let (pel_path, direction) = rorient_for(orientation);
    for text in [
        "srcdocid: NONE",
        "dstdocid: NONE",
        "txtfilid: NONE",
        "figid: NONE",
        "srcgph: NONE",
        "doccls: NONE",
        "rtype: 1",
    ] {
        push_record(out, text);
    }
    push_record(out, &format!("rorient: {pel_path:03},{direction:03}"));
    push_record(out, &format!("rpelcnt: {width:06},{height:06}"));
    push_record(out, &format!("rdensty: {density:04}"));
    push_record(out, "notes: NONE");
    for _ in 0..5 {
        push_record(out, "");
    }
}
