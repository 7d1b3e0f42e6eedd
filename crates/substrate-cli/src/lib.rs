//! Library side of the `substrate-dump` viewer.

pub mod logging;
pub mod paths;
pub mod render;
pub mod step;
pub mod summary;
