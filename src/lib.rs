pub mod config;
pub mod curriculum;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod session;
pub mod srs;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
