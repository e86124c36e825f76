// Media interactor - Direct access to the external collaborators

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::adapters::storage_local::blob_path;
use crate::domain::model::SourceRef;
use crate::error::{TrackcutError, TrackcutResult};
use crate::ports::*;
use crate::utils::path::display_name;

/// Interactor for one-shot collaborator calls
pub struct MediaInteractor {
    probe_port: Arc<dyn ProbePort>,
    storage_port: Arc<dyn ObjectStoragePort>,
    merge_port: Arc<dyn MergePort>,
    audio_port: Arc<dyn AudioExtractionPort>,
    upload_prefix: String,
}

impl MediaInteractor {
    /// Create new media interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        storage_port: Arc<dyn ObjectStoragePort>,
        merge_port: Arc<dyn MergePort>,
        audio_port: Arc<dyn AudioExtractionPort>,
        upload_prefix: impl Into<String>,
    ) -> Self {
        Self {
            probe_port,
            storage_port,
            merge_port,
            audio_port,
            upload_prefix: upload_prefix.into(),
        }
    }

    pub async fn probe(&self, input: &Path) -> TrackcutResult<f64> {
        ensure_file(input)?;
        let seconds = self
            .probe_port
            .probe_duration(&SourceRef::new(input.to_string_lossy()))
            .await?;
        info!(input = %input.display(), seconds, "Probed duration");
        Ok(seconds)
    }

    /// Submit files and a raw `segments` field as-is
    pub async fn merge(
        &self,
        inputs: &[PathBuf],
        segments: Option<String>,
    ) -> TrackcutResult<MergeReply> {
        let mut videos = Vec::with_capacity(inputs.len());
        for input in inputs {
            ensure_file(input)?;
            videos.push(UploadedFile {
                name: display_name(input),
                bytes: tokio::fs::read(input).await?,
            });
        }

        let reply = self
            .merge_port
            .merge(MergeSubmission { videos, segments })
            .await?;
        info!(status = reply.status, "Merge replied");
        Ok(reply)
    }

    pub async fn extract_audio(&self, input: Option<&Path>) -> TrackcutResult<ExtractAudioReply> {
        let request = ExtractAudioRequest {
            video: input.map(|p| p.to_string_lossy().to_string()),
        };
        Ok(self.audio_port.extract(request).await?)
    }

    /// Store a local file under the upload prefix
    pub async fn store(&self, input: &Path) -> TrackcutResult<String> {
        ensure_file(input)?;
        let bytes = tokio::fs::read(input).await?;
        let key = blob_path(&self.upload_prefix, &display_name(input));
        Ok(self.storage_port.upload(bytes, &key).await?)
    }

    pub async fn list(&self, prefix: &str) -> TrackcutResult<Vec<String>> {
        Ok(self.storage_port.list(prefix).await?)
    }

    pub async fn delete(&self, url: &str) -> bool {
        self.storage_port.delete(url).await
    }
}

fn ensure_file(path: &Path) -> TrackcutResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(TrackcutError::InputFileNotFound {
            path: path.display().to_string(),
        })
    }
}
