//! Shared request/response helper types.

pub mod pagination;

pub use pagination::{ListQuery, PageRequest, SortDirection};
