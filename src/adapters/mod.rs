// Adapters - External system implementations

pub mod audio_extraction;
pub mod merge_service;
pub mod probe_ffprobe;
pub mod storage_local;
pub mod toml_config;

// Re-export adapters
pub use audio_extraction::CannedAudioExtractor;
pub use merge_service::MergeService;
pub use probe_ffprobe::FFprobeAdapter;
pub use storage_local::LocalObjectStore;
pub use toml_config::TomlConfigAdapter;
