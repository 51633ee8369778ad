pub mod commands;
pub mod errors;
pub mod models;
pub mod services;
pub mod split_engine;
