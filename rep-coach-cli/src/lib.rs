// Library exports for the Rep Coach CLI
// This allows testing of internal modules

pub mod api;
pub mod commands;
pub mod ui;
