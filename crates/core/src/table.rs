//! Two-layer keyed tables.
//!
//! Both PJL axes (variables and font sources) keep a *defaults* layer and a
//! *current* layer with identical row shape. [`Table`] is one layer,
//! [`Layered`] is the pair. Row shape is supplied through [`Row`].

use serde::Serialize;

/// A table row with a case-insensitive key and a factory seed.
pub trait Row: Clone {
    /// The row's name; compared case-insensitively.
    fn key(&self) -> &str;

    /// The immutable factory table this row type is seeded from.
    fn factory() -> Vec<Self>;
}

/// Which layer an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Defaults,
    Current,
}

/// A fixed, ordered set of rows. Rows are never added or removed after
/// seeding, only rewritten in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R: Row> Table<R> {
    pub fn from_factory() -> Self {
        Self { rows: R::factory() }
    }

    pub fn init_from_factory(&mut self) {
        self.rows = R::factory();
    }

    pub fn copy_from(&mut self, src: &Self) {
        self.rows.clone_from(&src.rows);
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.key().eq_ignore_ascii_case(key))
    }

    pub fn row(&self, key: &str) -> Option<&R> {
        self.rows.iter().find(|r| r.key().eq_ignore_ascii_case(key))
    }

    pub fn row_mut(&mut self, key: &str) -> Option<&mut R> {
        self.rows
            .iter_mut()
            .find(|r| r.key().eq_ignore_ascii_case(key))
    }

    pub fn row_at(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.row(key).is_some()
    }
}

/// The defaults/current pair for one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layered<R> {
    pub defaults: Table<R>,
    pub current: Table<R>,
}

impl<R: Row> Layered<R> {
    pub fn from_factory() -> Self {
        Self {
            defaults: Table::from_factory(),
            current: Table::from_factory(),
        }
    }

    pub fn layer(&self, layer: Layer) -> &Table<R> {
        match layer {
            Layer::Defaults => &self.defaults,
            Layer::Current => &self.current,
        }
    }

    pub fn layer_mut(&mut self, layer: Layer) -> &mut Table<R> {
        match layer {
            Layer::Defaults => &mut self.defaults,
            Layer::Current => &mut self.current,
        }
    }

    /// Current ← defaults, done at every job boundary.
    pub fn reseed_current(&mut self) {
        self.current.copy_from(&self.defaults);
    }
}
