//! Application configuration module
//!
//! Settings come from the process environment; fixed values such as the
//! template dimensionality and match threshold live in `constants`.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
