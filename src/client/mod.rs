//! Client implementation and builder.

mod builder;
mod core;
mod endpoints;

pub use builder::{ClientBuilder, DEFAULT_BASE_URL};
pub use core::CompaniesHouseClient;
