//! `ParserState`: everything one PJL session owns, plus the API PDL
//! interpreters call into.

use crate::config::ParserConfig;
use crate::environment::{Environment, Variable};
use crate::error::PjlError;
use crate::fontsource::{FontSourceEntry, FontSources, probe};
use crate::softfont::SoftFontRegistry;
use crate::table::Layer;
use pjl_resource::{Sandbox, StdFilesystem};
use pjl_traits::{HostFilesystem, ParamSink, RecordingParamSink};
use pjl_types::{Designator, compare};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// A builder for [`ParserState`].
///
/// Defaults to the real filesystem and a parameter sink that only records
/// what it is given.
#[derive(Debug, Default)]
pub struct ParserBuilder {
    config: ParserConfig,
    filesystem: Option<Arc<dyn HostFilesystem>>,
    params: Option<Arc<dyn ParamSink>>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Routes every sandbox and font-probe call through `filesystem`.
    pub fn with_filesystem(mut self, filesystem: Arc<dyn HostFilesystem>) -> Self {
        self.filesystem = Some(filesystem);
        self
    }

    /// Receives `GSSET`/`GSSETSTRING` assignments.
    pub fn with_param_sink(mut self, params: Arc<dyn ParamSink>) -> Self {
        self.params = Some(params);
        self
    }

    /// Seeds both layers from the factory tables and probes both font-source
    /// layers.
    pub fn build(self) -> ParserState {
        let fs = self
            .filesystem
            .unwrap_or_else(|| Arc::new(StdFilesystem::new()));
        let params = self
            .params
            .unwrap_or_else(|| Arc::new(RecordingParamSink::new()));

        let mut font_sources = FontSources::new();
        font_sources.refresh_font_numbers(Layer::Defaults, fs.as_ref(), &self.config.font_root);
        font_sources.refresh_font_numbers(Layer::Current, fs.as_ref(), &self.config.font_root);

        log::debug!(
            "PJL parser on {} with volumes {} and {}",
            fs.name(),
            self.config.volumes.volume_0,
            self.config.volumes.volume_1
        );

        ParserState {
            environment: Environment::new(),
            font_sources,
            soft_fonts: SoftFontRegistry::new(),
            sandbox: Sandbox::new(fs, self.config.volumes.clone()),
            line: Vec::with_capacity(self.config.line_growth),
            params,
            config: self.config,
        }
    }
}

/// The serializable part of a [`ParserState`].
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentSnapshot {
    pub current: Vec<Variable>,
    pub defaults: Vec<Variable>,
    pub font_sources: Vec<FontSourceEntry>,
    pub default_font_sources: Vec<FontSourceEntry>,
    pub soft_fonts: usize,
}

#[derive(Debug)]
pub struct ParserState {
    pub(crate) config: ParserConfig,
    pub(crate) environment: Environment,
    pub(crate) font_sources: FontSources,
    pub(crate) soft_fonts: SoftFontRegistry,
    pub(crate) sandbox: Sandbox,
    /// Bytes of the line being accumulated; empty at a line boundary.
    pub(crate) line: Vec<u8>,
    pub(crate) params: Arc<dyn ParamSink>,
}

impl Default for ParserState {
    fn default() -> Self {
        ParserBuilder::new().build()
    }
}

impl ParserState {
    pub fn new(config: ParserConfig) -> Self {
        ParserBuilder::new().with_config(config).build()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn font_sources(&self) -> &FontSources {
        &self.font_sources
    }

    pub fn soft_fonts(&self) -> &SoftFontRegistry {
        &self.soft_fonts
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Looks a variable up in the current environment.
    pub fn get_envvar(&self, name: &str) -> Option<&str> {
        self.environment.get(Layer::Current, name)
    }

    /// Looks a variable up in the user defaults.
    pub fn get_defvar(&self, name: &str) -> Option<&str> {
        self.environment.get(Layer::Defaults, name)
    }

    /// Writes the current environment. Returns `false` for unknown names.
    pub fn set_envvar(&mut self, name: &str, value: &str) -> bool {
        self.environment.set(Layer::Current, name, value)
    }

    /// Writes the user defaults and the current environment.
    pub fn set_defvar(&mut self, name: &str, value: &str) -> bool {
        self.environment.set_default(name, value)
    }

    /// Starts a new job: the current environment becomes a copy of the user
    /// defaults, for variables and font sources alike.
    pub fn begin_job(&mut self) {
        self.environment.reseed_current();
        self.font_sources.reseed_current();
    }

    pub fn is_disk_locked(&self) -> bool {
        !self
            .get_envvar("disklock")
            .is_some_and(|value| compare(value, "off"))
    }

    /// Host directory holding the fonts of the source named by `designator`.
    ///
    /// A configured override search path wins over the font-source tables:
    /// its first directory holding at least one entry is returned, or `None`.
    pub fn fontsource_to_path(&self, designator: &str) -> Option<PathBuf> {
        if let Some(search_path) = &self.config.font_path_override {
            return probe(
                self.sandbox.filesystem(),
                &self.config.font_root,
                search_path,
            );
        }
        let designator = Designator::from_code(designator)?;
        self.font_sources.path_for(
            designator,
            self.sandbox.filesystem(),
            &self.config.font_root,
        )
    }

    /// Switches `FONTSOURCE` to the nearest higher-priority source that still
    /// holds fonts, in both the defaults and the current environment.
    pub fn advance_to_next_source(&mut self) -> Designator {
        let active = self.get_envvar("fontsource").unwrap_or_default().to_string();
        let next = self.font_sources.next_source(&active);
        log::info!("font source {} exhausted, switching to {}", active, next);
        self.environment.set_default("fontsource", next.code());
        next
    }

    /// Claims a slot for a newly downloaded permanent soft font.
    pub fn register_soft_font_addition(&mut self) -> usize {
        self.soft_fonts.allocate()
    }

    /// Frees a soft-font slot.
    ///
    /// Returns `true` when the `S` source has just run dry while active; the
    /// caller is then expected to call [`Self::advance_to_next_source`].
    pub fn register_soft_font_deletion(&mut self, slot: usize) -> bool {
        if !self.soft_fonts.release(slot) {
            return false;
        }
        let soft_active = self
            .get_envvar("fontsource")
            .is_some_and(|source| compare(source, Designator::SoftFonts.code()));
        if !soft_active {
            return false;
        }
        self.font_sources.clear_font_number(Designator::SoftFonts);
        true
    }

    /// Size of the first file named `name` on either volume, or 0.
    pub fn resource_size(&self, name: &str) -> u64 {
        self.sandbox.locator().resource_size(name)
    }

    /// Reads the first file named `name` on either volume into `out`.
    pub fn read_resource(&self, name: &str, out: &mut Vec<u8>) -> Result<usize, PjlError> {
        Ok(self.sandbox.locator().read_resource(name, out)?)
    }

    pub fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            current: self.environment.table(Layer::Current).rows().to_vec(),
            defaults: self.environment.table(Layer::Defaults).rows().to_vec(),
            font_sources: self.font_sources.table(Layer::Current).rows().to_vec(),
            default_font_sources: self.font_sources.table(Layer::Defaults).rows().to_vec(),
            soft_fonts: self.soft_fonts.len(),
        }
    }
}
