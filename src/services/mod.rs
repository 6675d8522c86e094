// Business logic services

pub mod classifier;
pub mod cue;
pub mod dietician;
pub mod frame_source;
pub mod geometry;
pub mod session;
pub mod storage;
