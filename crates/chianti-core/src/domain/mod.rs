pub mod errors;

pub use errors::{ChiantiError, ChiantiErrorCategory, ChiantiResult};
