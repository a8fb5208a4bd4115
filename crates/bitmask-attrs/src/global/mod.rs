// Globally available exports
pub mod config;
pub mod error;
pub mod registry;
pub mod symbol;
