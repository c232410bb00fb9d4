/*
 * Conversions from the portable color model into GDI values for the native
 * frame host.
 */

use crate::styling_primitives::Color;
use windows::Win32::Foundation::COLORREF;

/*
 * Creates a Win32 COLORREF from a `Color`. GDI expects BGR order and has no
 * alpha channel; per-frame translucency goes through the layered window
 * attributes instead.
 */
pub(crate) fn color_to_colorref(color: &Color) -> COLORREF {
    COLORREF((color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16))
}

/// Scales every channel to `percent` of its value, keeping alpha.
pub(crate) fn shade(color: &Color, percent: u32) -> Color {
    let scale = |c: u8| (c as u32 * percent / 100).min(255) as u8;
    Color::rgba(scale(color.r), scale(color.g), scale(color.b), color.a)
}
