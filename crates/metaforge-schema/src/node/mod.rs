mod entity;
mod field;
mod package;
mod store;

pub use entity::*;
pub use field::*;
pub use package::*;
pub use store::*;
