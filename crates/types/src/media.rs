//! Known paper sizes, in 300 dpi device units, portrait orientation.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaSize {
    pub name: &'static str,
    pub width: f64,
    pub height: f64,
}

impl MediaSize {
    const fn new(name: &'static str, width: f64, height: f64) -> Self {
        Self { name, width, height }
    }
}

pub const MEDIA: &[MediaSize] = &[
    MediaSize::new("defaultpaper", 2550.0, 3300.0),
    MediaSize::new("letter", 2550.0, 3300.0),
    MediaSize::new("legal", 2550.0, 4200.0),
    MediaSize::new("a4", 2480.0, 3507.0),
    MediaSize::new("executive", 2175.0, 3150.0),
    MediaSize::new("ledger", 3300.0, 5100.0),
    MediaSize::new("a3", 3507.0, 4960.0),
    MediaSize::new("com10", 1237.0, 2850.0),
    MediaSize::new("monarch", 1162.0, 2250.0),
    MediaSize::new("c5", 1913.0, 2704.0),
    MediaSize::new("dl", 1299.0, 2598.0),
    MediaSize::new("jisb4", 3035.0, 4299.0),
    MediaSize::new("jisb5", 2150.0, 3035.0),
    MediaSize::new("b5", 2078.0, 2952.0),
    MediaSize::new("b5paper", 2150.0, 3035.0),
    MediaSize::new("jpostcard", 1181.0, 1748.0),
    MediaSize::new("jdoublepostcard", 2362.0, 1748.0),
    MediaSize::new("a5", 1748.0, 2480.0),
    MediaSize::new("a6", 1240.0, 1748.0),
    MediaSize::new("jisb6", 1512.0, 2150.0),
    MediaSize::new("jis8k", 3154.0, 4606.0),
    MediaSize::new("jis16k", 2303.0, 3154.0),
    MediaSize::new("jisexec", 2551.0, 3898.0),
];

/// Entry used when a paper name is not in the table.
pub const FALLBACK_MEDIA: MediaSize = MEDIA[1];

/// Finds a paper size by name (case-insensitive), falling back to letter.
pub fn lookup_media(paper: &str) -> MediaSize {
    MEDIA
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(paper))
        .copied()
        .unwrap_or(FALLBACK_MEDIA)
}
