// Domain layer - Core editing logic

pub mod errors;
pub mod export;
pub mod model;
pub mod playback;
pub mod rules;
pub mod store;
pub mod timeline;
