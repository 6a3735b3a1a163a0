//! Variables whose writes update other variables.
//!
//! Only page geometry has a dependent today: writing `PAPER` or
//! `ORIENTATION` recomputes `FORMLINES` from the page length.

use crate::environment::Variable;
use crate::table::Table;
use pjl_types::lookup_media;

/// Top margin plus bottom margin, in 300 dpi units (one inch total).
const PAGE_MARGINS: f64 = 300.0;
/// Height of one line at the default 6 lines per inch, in 300 dpi units.
const LINE_HEIGHT: f64 = 50.0;

/// Number of text lines that fit on a page of the given length.
pub fn formlines_for_page_length(page_length: f64) -> i64 {
    ((page_length - PAGE_MARGINS) / LINE_HEIGHT).round() as i64
}

/// Returns the single dependent write triggered by writing `name`, computed
/// from the table the write landed in.
///
/// The dependent's own name never triggers anything, so applying the result
/// cannot cascade further.
pub fn dependent_write(table: &Table<Variable>, name: &str) -> Option<(&'static str, String)> {
    if !name.eq_ignore_ascii_case("PAPER") && !name.eq_ignore_ascii_case("ORIENTATION") {
        return None;
    }
    let value = |key: &str| table.row(key).map(|v| v.value.as_str()).unwrap_or("");

    let media = lookup_media(value("PAPER"));
    let page_length = if value("ORIENTATION").eq_ignore_ascii_case("LANDSCAPE") {
        media.width
    } else {
        media.height
    };
    Some(("FORMLINES", formlines_for_page_length(page_length).to_string()))
}
