//! Font sources: where fonts for each designator live, and which of them
//! actually hold fonts.
//!
//! Cartridges, permanent soft fonts and ROM SIMMs are simulated by host
//! directories. A source counts as populated once probing finds at least
//! one entry in one of its search directories; its discovered font number is
//! then non-blank.

use crate::table::{Layer, Layered, Row, Table};
use pjl_traits::HostFilesystem;
use pjl_types::Designator;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Font number recorded for a source that turns out to hold fonts.
const DISCOVERED_FONT_NUMBER: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontSourceEntry {
    pub designator: Designator,
    /// `;`-separated directory list.
    pub search_path: String,
    /// First search directory found to contain entries.
    pub resolved_path: Option<PathBuf>,
    /// Blank until fonts are discovered for this source.
    pub font_number: String,
}

impl FontSourceEntry {
    pub fn is_populated(&self) -> bool {
        !self.font_number.is_empty()
    }
}

fn factory_search_path(designator: Designator) -> &'static str {
    match designator {
        Designator::Internal => "ttfonts/;urwfonts/;pcl/urwfonts/;ghostpdl/pcl/urwfonts/;/windows/fonts/;",
        Designator::Cartridge => "CART0/",
        Designator::Cartridge1 => "CART1/",
        Designator::Cartridge2 => "CART2/",
        Designator::SoftFonts => "MEM0/",
        Designator::Rom1 => "MEM1/",
        Designator::Rom2 => "MEM2/",
        Designator::Rom3 => "MEM3/",
        Designator::Rom4 => "MEM4/",
    }
}

impl Row for FontSourceEntry {
    fn key(&self) -> &str {
        self.designator.code()
    }

    fn factory() -> Vec<Self> {
        Designator::ALL
            .into_iter()
            .map(|designator| FontSourceEntry {
                designator,
                search_path: factory_search_path(designator).to_string(),
                resolved_path: None,
                font_number: String::new(),
            })
            .collect()
    }
}

/// Returns the first directory in `search_path` that has at least one entry.
///
/// Relative directories are resolved against `root`.
pub fn probe(fs: &dyn HostFilesystem, root: &Path, search_path: &str) -> Option<PathBuf> {
    search_path
        .split(';')
        .filter(|dir| !dir.is_empty())
        .map(|dir| root.join(dir))
        .find(|dir| fs.read_dir(dir).is_ok_and(|entries| !entries.is_empty()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FontSources {
    tables: Layered<FontSourceEntry>,
}

impl Default for FontSources {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSources {
    pub fn new() -> Self {
        Self {
            tables: Layered::from_factory(),
        }
    }

    pub fn table(&self, layer: Layer) -> &Table<FontSourceEntry> {
        self.tables.layer(layer)
    }

    pub fn entry(&self, layer: Layer, designator: Designator) -> Option<&FontSourceEntry> {
        self.tables.layer(layer).row(designator.code())
    }

    pub fn set_font_number(&mut self, layer: Layer, designator: Designator, number: &str) {
        if let Some(entry) = self.tables.layer_mut(layer).row_mut(designator.code()) {
            entry.font_number = number.to_string();
        }
    }

    /// Blanks a source's discovered font number in both layers.
    pub fn clear_font_number(&mut self, designator: Designator) {
        self.set_font_number(Layer::Defaults, designator, "");
        self.set_font_number(Layer::Current, designator, "");
    }

    /// Probes every source in `layer` and marks the ones holding fonts.
    pub fn refresh_font_numbers(&mut self, layer: Layer, fs: &dyn HostFilesystem, root: &Path) {
        for designator in Designator::ALL {
            let Some(entry) = self.tables.layer_mut(layer).row_mut(designator.code()) else {
                continue;
            };
            if let Some(found) = probe(fs, root, &entry.search_path) {
                log::debug!("font source {} populated from {}", designator, found.display());
                entry.resolved_path = Some(found);
                entry.font_number = DISCOVERED_FONT_NUMBER.to_string();
            }
        }
    }

    pub fn init_from_factory(&mut self, layer: Layer) {
        self.tables.layer_mut(layer).init_from_factory();
    }

    pub fn reseed_current(&mut self) {
        self.tables.reseed_current();
    }

    /// The source to fall back to when `active` stops providing fonts.
    ///
    /// Walks from `active` toward higher priority, skipping `active` itself,
    /// and stops at the first populated source. Internal fonts are the last
    /// resort. An unknown `active` starts the walk below the lowest-priority
    /// source.
    pub fn next_source(&self, active: &str) -> Designator {
        let table = &self.tables.current;
        let mut index = table.position(active).unwrap_or(table.rows().len());
        while index > 0 {
            index -= 1;
            if table.row_at(index).is_some_and(FontSourceEntry::is_populated) {
                break;
            }
        }
        table
            .row_at(index)
            .map_or(Designator::Internal, |entry| entry.designator)
    }

    /// Probes the current search path for `designator`.
    pub fn path_for(
        &self,
        designator: Designator,
        fs: &dyn HostFilesystem,
        root: &Path,
    ) -> Option<PathBuf> {
        let entry = self.entry(Layer::Current, designator)?;
        probe(fs, root, &entry.search_path)
    }
}
