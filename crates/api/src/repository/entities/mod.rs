//! SeaORM entity definitions.

pub mod product;
pub mod user;
