//! Trackcut timeline editor library
//!
//! Multi-track segment editing for video and audio uploads: a segment store
//! with cut and remove operations, cursor and playback coordination across
//! tracks, a timeline view, and export to a merge collaborator.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use config_initialization::AppConfig;
pub use domain::errors::DomainError;
pub use domain::model::{FileId, Segment, SegmentId, SourceRef, Track, TrackId, TrackKind};
pub use domain::store::SegmentStore;
pub use error::{TrackcutError, TrackcutResult};
