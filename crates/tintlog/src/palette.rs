//! Named 256-colour palette.
//!
//! Maps a fixed set of colour names to 8-bit ANSI palette indices, as used in
//! `38;5;<n>` (foreground) and `48;5;<n>` (background) SGR sequences. The
//! table is static and never changes at runtime.
//!
//! Some names are aliases for the same index: `teal` is `cyan` (6) and
//! `lime_green` is `bright_green` (10).

/// Every known colour name with its palette index, in table order.
pub const PALETTE: [(&str, u8); 43] = [
    // Standard ANSI 16
    ("black", 0),
    ("red", 1),
    ("green", 2),
    ("yellow", 3),
    ("blue", 4),
    ("magenta", 5),
    ("cyan", 6),
    ("white", 7),
    ("bright_black", 8),
    ("bright_red", 9),
    ("bright_green", 10),
    ("bright_yellow", 11),
    ("bright_blue", 12),
    ("bright_magenta", 13),
    ("bright_cyan", 14),
    ("bright_white", 15),
    // Extended cube and grayscale ramp
    ("grey", 16),
    ("navy", 17),
    ("dark_blue", 18),
    ("dark_green", 22),
    ("teal", 6),
    ("lime_green", 10),
    ("purple", 53),
    ("orange", 202),
    ("maroon", 88),
    ("olive", 58),
    ("brown", 94),
    ("light_gray", 249),
    ("medium_gray", 245),
    ("charcoal", 238),
    ("violet", 92),
    ("light_blue", 153),
    ("light_green", 154),
    ("light_cyan", 195),
    ("light_red", 203),
    ("light_magenta", 207),
    ("light_yellow", 227),
    ("neon_green", 118),
    ("turquoise", 44),
    ("salmon", 209),
    ("beige", 230),
    ("mint_green", 48),
    ("lavender", 183),
];

/// Look up the palette index for a colour name.
///
/// Matching is exact and case-sensitive. Unknown names return `None`.
#[must_use]
pub fn lookup(name: &str) -> Option<u8> {
    PALETTE
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, code)| code)
}

/// Iterate over all colour names in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    PALETTE.iter().map(|&(name, _)| name)
}

/// Whether `name` is a known colour.
#[inline]
#[must_use]
pub fn contains(name: &str) -> bool {
    lookup(name).is_some()
}
