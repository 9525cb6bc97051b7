//! Application state module

mod alerts;
mod forms;
mod overlay;

pub use alerts::*;
pub use forms::*;
pub use overlay::*;
