pub mod config;
pub mod core;
pub mod feed;
pub mod generator;
pub mod models;
#[cfg(test)]
pub mod test_helpers;
