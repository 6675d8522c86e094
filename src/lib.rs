// Rep counting core: landmark models, exercise classifiers, sessions and storage

pub mod config;
pub mod error;
pub mod models;
pub mod services;
