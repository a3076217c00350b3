pub(crate) mod cache;
pub mod sentiment;
pub(crate) mod stats;
pub(crate) mod utils;
