pub mod expectations;

pub use expectations::{ensure, require};
