pub mod designator;
pub mod media;
pub mod symbol_set;
pub mod value;

pub use designator::Designator;
pub use media::{MediaSize, lookup_media};
pub use symbol_set::symbol_set_name_to_code;
pub use value::{compare, to_float, to_int, try_to_int};
