//! The PJL environment: named textual variables in two layers.
//!
//! Writes go through [`Environment::set`], which applies the side effects
//! from [`crate::side_effects`] to the same layer before returning.

use crate::side_effects::dependent_write;
use crate::table::{Layer, Layered, Row, Table};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

impl Variable {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Values set in the printer when it ships. `INITIALIZE` and `RESET`
/// restore from here.
const FACTORY_DEFAULTS: &[(&str, &str)] = &[
    ("formlines", "60"),
    ("formlines_set", "off"),
    ("widea4", "no"),
    ("edgetoedge", "no"),
    ("fontsource", "I"),
    ("fontnumber", "0"),
    ("pitch", "10.00"),
    ("ptsize", "12.00"),
    ("symset", "pc8"),
    ("copies", "1"),
    ("paper", "letter"),
    ("orientation", "portrait"),
    ("duplex", "off"),
    ("binding", "longedge"),
    ("manualfeed", "off"),
    ("personality", "pcl5c"),
    ("language", "auto"),
    ("disklock", "off"),
    ("plotsizeoverride", "off"),
    ("plotsize1", "0"),
    ("plotsize2", "0"),
    ("paperwidth", ""),
    ("paperlength", ""),
    ("resolution", "0"),
    ("pdfmark", ""),
    ("setdistillerparams", ""),
];

impl Row for Variable {
    fn key(&self) -> &str {
        &self.name
    }

    fn factory() -> Vec<Self> {
        FACTORY_DEFAULTS
            .iter()
            .map(|&(name, value)| Variable::new(name, value))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Environment {
    tables: Layered<Variable>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            tables: Layered::from_factory(),
        }
    }

    pub fn table(&self, layer: Layer) -> &Table<Variable> {
        self.tables.layer(layer)
    }

    pub fn get(&self, layer: Layer, name: &str) -> Option<&str> {
        self.tables.layer(layer).row(name).map(|v| v.value.as_str())
    }

    /// Returns `true` if `name` is a known variable.
    pub fn is_variable(&self, name: &str) -> bool {
        self.tables.current.contains(name)
    }

    /// Writes one layer, then applies at most one dependent write to the
    /// same layer. Unknown names are ignored and report `false`.
    pub fn set(&mut self, layer: Layer, name: &str, value: &str) -> bool {
        if !self.write(layer, name, value) {
            log::debug!("ignoring write to unknown variable {}", name);
            return false;
        }
        if let Some((dependent, derived)) = dependent_write(self.tables.layer(layer), name) {
            self.write(layer, dependent, &derived);
        }
        true
    }

    /// A `DEFAULT` write: the value lands in the current layer and in the
    /// defaults layer.
    pub fn set_default(&mut self, name: &str, value: &str) -> bool {
        self.set(Layer::Current, name, value);
        self.set(Layer::Defaults, name, value)
    }

    fn write(&mut self, layer: Layer, name: &str, value: &str) -> bool {
        match self.tables.layer_mut(layer).row_mut(name) {
            Some(row) => {
                log::debug!("{:?} {} = {}", layer, row.name, value);
                row.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn init_from_factory(&mut self, layer: Layer) {
        self.tables.layer_mut(layer).init_from_factory();
    }

    pub fn reseed_current(&mut self) {
        self.tables.reseed_current();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_has_no_duplicate_names() {
        let rows = Variable::factory();
        for (i, row) in rows.iter().enumerate() {
            assert!(
                !rows[i + 1..].iter().any(|r| r.name.eq_ignore_ascii_case(&row.name)),
                "duplicate {}",
                row.name
            );
        }
    }

    #[test]
    fn test_case_insensitive_round_trip() {
        let mut env = Environment::new();
        assert!(env.set(Layer::Current, "DISKLOCK", "ON"));
        assert_eq!(env.get(Layer::Current, "disklock"), Some("ON"));
        assert_eq!(env.get(Layer::Defaults, "disklock"), Some("off"));
    }

    #[test]
    fn test_unknown_variable_is_ignored() {
        let mut env = Environment::new();
        let before = env.clone();
        assert!(!env.set(Layer::Current, "NOSUCHVAR", "1"));
        assert_eq!(env, before);
        assert_eq!(env.get(Layer::Current, "NOSUCHVAR"), None);
    }

    #[test]
    fn test_paper_write_recomputes_formlines_in_same_layer() {
        let mut env = Environment::new();
        env.set(Layer::Current, "PAPER", "LEGAL");
        assert_eq!(env.get(Layer::Current, "FORMLINES"), Some("78"));
        assert_eq!(env.get(Layer::Defaults, "FORMLINES"), Some("60"));
    }

    #[test]
    fn test_orientation_write_uses_width() {
        let mut env = Environment::new();
        env.set(Layer::Current, "ORIENTATION", "landscape");
        assert_eq!(env.get(Layer::Current, "FORMLINES"), Some("45"));

        env.set(Layer::Current, "PAPER", "a4");
        assert_eq!(env.get(Layer::Current, "FORMLINES"), Some("44"));
    }

    #[test]
    fn test_unknown_paper_uses_letter() {
        let mut env = Environment::new();
        env.set(Layer::Current, "PAPER", "legal");
        env.set(Layer::Current, "PAPER", "napkin");
        assert_eq!(env.get(Layer::Current, "FORMLINES"), Some("60"));
    }

    #[test]
    fn test_default_write_reaches_both_layers() {
        let mut env = Environment::new();
        env.set_default("PAPER", "legal");
        assert_eq!(env.get(Layer::Defaults, "paper"), Some("legal"));
        assert_eq!(env.get(Layer::Current, "paper"), Some("legal"));
        assert_eq!(env.get(Layer::Defaults, "formlines"), Some("78"));
        assert_eq!(env.get(Layer::Current, "formlines"), Some("78"));
    }

    #[test]
    fn test_reseed_current() {
        let mut env = Environment::new();
        env.set(Layer::Current, "COPIES", "3");
        env.reseed_current();
        assert_eq!(env.get(Layer::Current, "copies"), Some("1"));
    }
}
