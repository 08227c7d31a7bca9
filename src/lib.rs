pub mod chart;
pub mod figure;
pub mod filter;
pub mod measurement;

pub use figure::{strip_key_prefix, Figure};
pub use filter::SizeFilter;
pub use measurement::{parse_line, Measurement};
