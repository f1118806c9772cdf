pub mod config;
pub mod export;
pub mod model;
pub mod output;
pub mod scoring;
pub mod store;
