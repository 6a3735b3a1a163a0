//! PJL symbol-set names mapped to PCL symbol-set codes.

const SYMBOL_SETS: &[(&str, u16)] = &[
    ("ROMAN8", 277),
    ("ISOL1", 14),
    ("ISOL2", 78),
    ("ISOL5", 174),
    ("PC8", 341),
    ("PC8DN", 373),
    ("PC850", 405),
    ("PC852", 565),
    ("PC8TK", 308),
    ("WINL1", 309),
    ("WINL2", 293),
    ("WINL5", 180),
    ("DESKTOP", 234),
    ("PSTEXT", 330),
    ("VNINTL", 426),
    ("VNUS", 458),
    ("MSPUBL", 202),
    ("MATH8", 269),
    ("PSMATH", 173),
    ("VNMATH", 205),
    ("PIFONT", 501),
    ("LEGAL", 53),
    ("ISO4", 37),
    ("ISO6", 21),
    ("ISO11", 19),
    ("ISO15", 9),
    ("ISO17", 83),
    ("ISO21", 39),
    ("ISO60", 4),
    ("ISO69", 38),
];

/// Maps a PJL `SYMSET` value to the PCL symbol-set code, ignoring case.
pub fn symbol_set_name_to_code(name: &str) -> Option<u16> {
    SYMBOL_SETS
        .iter()
        .find(|(sym, _)| sym.eq_ignore_ascii_case(name))
        .map(|&(_, code)| code)
}
