// Editor interactor - Orchestrates uploads and timeline edits for one session

pub mod script;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::playback::*;
use crate::domain::store::{AddedTrack, SegmentStore};
use crate::domain::timeline::{TimelineIntent, TimelineView};
use crate::error::{TrackcutError, TrackcutResult};
use crate::ports::*;
use crate::utils::path::display_name;

pub use script::{EditScript, EditStep, TimeArg};

/// The local file behind a `FileId`
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    pub path: PathBuf,
    pub name: String,
}

/// In-memory editing state: the current store snapshot, the timeline's
/// selection and the uploads the segments point back to.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    store: SegmentStore,
    view: TimelineView,
    uploads: HashMap<FileId, UploadRecord>,
    sync: AvSync,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sync(sync: AvSync) -> Self {
        Self {
            sync,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    pub fn view(&self) -> &TimelineView {
        &self.view
    }

    pub fn upload(&self, file_id: &FileId) -> Option<&UploadRecord> {
        self.uploads.get(file_id)
    }

    pub fn frame(&self) -> PlaybackFrame<'_> {
        PlaybackCoordinator::frame(&self.store)
    }

    /// Forward a timeline intent and settle the cursor
    pub fn apply(&mut self, intent: TimelineIntent) {
        debug!(?intent, "timeline intent");
        let next = self.view.apply(&self.store, intent);
        self.commit(next);
    }

    /// Block or release timeline edits
    pub fn set_locked(&mut self, locked: bool) {
        self.view.set_disabled(locked);
    }

    /// Align secondary audio elements with the primary element
    pub fn sync_elements<P, S>(&self, primary: &P, secondaries: &mut [S]) -> SyncReport
    where
        P: MediaElement + ?Sized,
        S: MediaElement,
    {
        self.sync.sync(primary, secondaries)
    }

    fn commit(&mut self, next: SegmentStore) {
        self.store = PlaybackCoordinator::settle(&next);
    }

    fn register(&mut self, file_id: FileId, record: UploadRecord) {
        self.uploads.insert(file_id, record);
    }

    /// Resolve a track by id, then by name
    fn find_track(&self, selector: &str) -> TrackcutResult<TrackId> {
        let tracks = self.store.tracks();
        tracks
            .iter()
            .find(|track| track.id.as_str() == selector)
            .or_else(|| tracks.iter().find(|track| track.name == selector))
            .map(|track| track.id.clone())
            .ok_or_else(|| TrackcutError::ScriptError {
                message: format!("No track matches '{}'", selector),
            })
    }

    fn find_segment(&self, selector: &str, index: usize) -> TrackcutResult<(TrackId, SegmentId)> {
        let track_id = self.find_track(selector)?;
        let segment = self
            .store
            .track(&track_id)
            .and_then(|track| track.segments.get(index))
            .ok_or_else(|| TrackcutError::ScriptError {
                message: format!("Track '{}' has no segment #{}", selector, index),
            })?;
        Ok((track_id, segment.id.clone()))
    }
}

/// Interactor for the editing use case
pub struct EditorInteractor {
    probe_port: Arc<dyn ProbePort>,
}

impl EditorInteractor {
    /// Create new editor interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Add one track per file (plus derived audio for video), then probe all
    /// durations concurrently. Completions are applied as they arrive; a failed
    /// probe leaves its segment as a placeholder. A missing file rejects the
    /// whole batch before any track is added.
    pub async fn upload(
        &self,
        session: &mut EditorSession,
        paths: &[PathBuf],
    ) -> Result<Vec<AddedTrack>, DomainError> {
        if let Some(missing) = paths.iter().find(|path| !path.is_file()) {
            return Err(DomainError::FsFail(format!(
                "Input file not found: {}",
                missing.display()
            )));
        }

        let mut added = Vec::with_capacity(paths.len());
        let mut probes = JoinSet::new();

        for path in paths {
            let name = display_name(path);
            let kind = TrackKind::from_path(path);
            let source = SourceRef::new(path.to_string_lossy());
            let (next, track) = session.store.add_track(&name, source.clone(), kind);
            session.commit(next);
            session.register(
                track.file_id.clone(),
                UploadRecord {
                    path: path.clone(),
                    name: name.clone(),
                },
            );
            info!(track = %track.track_id, %kind, "Uploaded {}", name);

            let probe = Arc::clone(&self.probe_port);
            let track_id = track.track_id.clone();
            probes.spawn(async move {
                let result = probe.probe_duration(&source).await;
                (track_id, result)
            });
            added.push(track);
        }

        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok((track_id, Ok(seconds))) => {
                    let next = session.store.apply_probed_duration(&track_id, seconds);
                    session.commit(next);
                }
                Ok((track_id, Err(e))) => {
                    warn!(track = %track_id, "Duration probe failed: {}", e);
                }
                Err(e) => warn!("Duration probe task failed: {}", e),
            }
        }

        Ok(added)
    }

    /// Replay a script step by step
    pub async fn run_script(
        &self,
        session: &mut EditorSession,
        script: &EditScript,
    ) -> TrackcutResult<()> {
        info!(steps = script.steps.len(), "Running edit script");
        for (index, step) in script.steps.iter().enumerate() {
            debug!(index, ?step, "script step");
            self.run_step(session, step).await?;
        }
        Ok(())
    }

    async fn run_step(&self, session: &mut EditorSession, step: &EditStep) -> TrackcutResult<()> {
        let intent = match step {
            EditStep::Upload { files } => {
                self.upload(session, files).await?;
                return Ok(());
            }
            EditStep::Seek { time } => TimelineIntent::Seek {
                time: time.seconds()?,
            },
            EditStep::Click { x, width } => TimelineIntent::Click {
                x: *x,
                width: *width,
            },
            EditStep::Drag { x, width } => TimelineIntent::DragTo {
                x: *x,
                width: *width,
            },
            EditStep::Select { track, segment } => {
                let (track_id, segment_id) = session.find_segment(track, *segment)?;
                TimelineIntent::Select {
                    track_id,
                    segment_id,
                }
            }
            EditStep::Cut { track, segment, at } => {
                let (track_id, segment_id) = session.find_segment(track, *segment)?;
                TimelineIntent::Cut {
                    track_id,
                    segment_id,
                    at: at.seconds()?,
                }
            }
            EditStep::CutSelected => TimelineIntent::CutSelected,
            EditStep::RemoveSegment { track, segment } => {
                let (track_id, segment_id) = session.find_segment(track, *segment)?;
                TimelineIntent::RemoveSegment {
                    track_id,
                    segment_id,
                }
            }
            EditStep::RemoveTrack { track } => TimelineIntent::RemoveTrack {
                track_id: session.find_track(track)?,
            },
        };

        session.apply(intent);
        Ok(())
    }

    /// Load a script file and replay it
    pub async fn run_script_file(
        &self,
        session: &mut EditorSession,
        path: &Path,
    ) -> TrackcutResult<()> {
        let script = EditScript::load(path)?;
        self.run_script(session, &script).await
    }
}
