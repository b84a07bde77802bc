pub mod listing;
pub mod search;

pub use listing::*;
pub use search::*;
