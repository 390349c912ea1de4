//! Command implementations

mod load;
mod status;
mod validate;

pub use load::load;
pub use status::status;
pub use validate::validate;
