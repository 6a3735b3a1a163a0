use pjl_resource::Volumes;
use std::path::PathBuf;

/// Environment variable that overrides the PJL font-source machinery.
pub const FONT_SOURCE_ENV: &str = "PCLFONTSOURCE";
pub const VOLUME_0_ENV: &str = "PJL_VOLUME_0";
pub const VOLUME_1_ENV: &str = "PJL_VOLUME_1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Host roots for the `0:` and `1:` volumes.
    pub volumes: Volumes,
    /// Directory that relative font-source search paths are resolved against.
    pub font_root: PathBuf,
    /// A `;`-separated search path used by `fontsource_to_path` instead of
    /// the font-source tables.
    pub font_path_override: Option<String>,
    /// Fixed number of bytes the line buffer grows by when full.
    ///
    /// Defaults to `256`.
    pub line_growth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            volumes: Volumes::default(),
            font_root: PathBuf::from("."),
            font_path_override: None,
            line_growth: 256,
        }
    }
}

impl ParserConfig {
    /// Defaults, overridden by `PCLFONTSOURCE`, `PJL_VOLUME_0` and
    /// `PJL_VOLUME_1` when they are set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(FONT_SOURCE_ENV) {
            config = config.with_font_path_override(path);
        }
        if let Ok(v0) = std::env::var(VOLUME_0_ENV) {
            config.volumes.volume_0 = v0;
        }
        if let Ok(v1) = std::env::var(VOLUME_1_ENV) {
            config.volumes.volume_1 = v1;
        }
        config
    }

    /// Sets the override search path, making sure it ends in a separator.
    pub fn with_font_path_override(mut self, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        self.font_path_override = Some(path);
        self
    }
}
