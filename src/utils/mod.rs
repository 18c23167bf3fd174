pub mod colors;
pub mod date;
pub mod formatting;
pub mod numeric;
pub mod path;
pub mod table;
pub mod time;

pub use formatting::{clean_opt, describe_status, money};
pub use numeric::round2;
