use std::sync::Arc;

use crate::adapters::{
    CannedAudioExtractor, FFprobeAdapter, LocalObjectStore, MergeService,
};
use crate::app::{
    editor_interactor::{EditorInteractor, EditorSession},
    export_interactor::ExportInteractor,
    media_interactor::MediaInteractor,
};
use crate::config_initialization::AppConfig;
use crate::domain::errors::DomainError;
use crate::domain::playback::AvSync;
use crate::ports::{AudioExtractionPort, MergePort, ObjectStoragePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn editor_interactor(&self) -> Arc<EditorInteractor>;
    fn export_interactor(&self) -> Arc<ExportInteractor>;
    fn media_interactor(&self) -> Arc<MediaInteractor>;
    /// Fresh editing session using the configured sync tolerance
    fn new_session(&self) -> EditorSession;
}

/// The collaborators every interactor is built from
pub struct Ports {
    pub probe: Arc<dyn ProbePort>,
    pub storage: Arc<dyn ObjectStoragePort>,
    pub merge: Arc<dyn MergePort>,
    pub audio: Arc<dyn AudioExtractionPort>,
}

pub struct DefaultAppContainer {
    editor_interactor: Arc<EditorInteractor>,
    export_interactor: Arc<ExportInteractor>,
    media_interactor: Arc<MediaInteractor>,
    sync: AvSync,
}

impl DefaultAppContainer {
    /// Wire the production adapters from configuration
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let storage = Arc::new(LocalObjectStore::new(&config.storage_root)?);
        let merge = Arc::new(MergeService::new(
            Arc::clone(&storage) as Arc<dyn ObjectStoragePort>,
            config.merge_prefix.clone(),
        ));

        Self::with_ports(
            config,
            Ports {
                probe: Arc::new(FFprobeAdapter::new(config.ffprobe_path.clone())),
                storage,
                merge,
                audio: Arc::new(CannedAudioExtractor),
            },
        )
    }

    /// Wire interactors around caller-supplied ports
    pub fn with_ports(config: &AppConfig, ports: Ports) -> Result<Self, DomainError> {
        let sync = AvSync::new(config.sync_tolerance)?;

        let editor_interactor = Arc::new(EditorInteractor::new(Arc::clone(&ports.probe)));
        let export_interactor = Arc::new(ExportInteractor::new(
            Arc::clone(&ports.merge),
            Arc::clone(&ports.storage),
        ));
        let media_interactor = Arc::new(MediaInteractor::new(
            ports.probe,
            ports.storage,
            ports.merge,
            ports.audio,
            config.upload_prefix.clone(),
        ));

        Ok(Self {
            editor_interactor,
            export_interactor,
            media_interactor,
            sync,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn editor_interactor(&self) -> Arc<EditorInteractor> {
        Arc::clone(&self.editor_interactor)
    }

    fn export_interactor(&self) -> Arc<ExportInteractor> {
        Arc::clone(&self.export_interactor)
    }

    fn media_interactor(&self) -> Arc<MediaInteractor> {
        Arc::clone(&self.media_interactor)
    }

    fn new_session(&self) -> EditorSession {
        EditorSession::with_sync(self.sync)
    }
}
