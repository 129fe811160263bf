//! Text encoding for the base-14 fonts.

use pdf_writer::Content;

use crate::measure::char_to_winansi;

/// Encode a string as WinAnsi bytes. Characters outside the encoding are
/// dropped, matching the measurer, which assigns them zero width.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b >= 32)
        .collect()
}

pub(crate) fn set_fill_color(content: &mut Content, rgb: [u8; 3]) {
    content.set_fill_rgb(
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    );
}
