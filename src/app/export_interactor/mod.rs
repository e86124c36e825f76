// Export interactor - Submits the final timeline to the merge collaborator

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};

use crate::app::editor_interactor::EditorSession;
use crate::domain::export::ExportPlan;
use crate::error::{TrackcutError, TrackcutResult};
use crate::ports::*;

/// Name of the downloaded artifact for a given export time
pub fn download_name(millis: i64) -> String {
    format!("merged_video_{}.mp4", millis)
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub plan: ExportPlan,
    /// Artifact URL returned by the merge collaborator
    pub url: String,
    /// Local copy of the artifact
    pub path: PathBuf,
}

/// Interactor for the export use case
pub struct ExportInteractor {
    merge_port: Arc<dyn MergePort>,
    storage_port: Arc<dyn ObjectStoragePort>,
}

impl ExportInteractor {
    /// Create new export interactor with injected ports
    pub fn new(merge_port: Arc<dyn MergePort>, storage_port: Arc<dyn ObjectStoragePort>) -> Self {
        Self {
            merge_port,
            storage_port,
        }
    }

    /// Build the merge request from the session, submit it and download the
    /// artifact into `output_dir`. The timeline is locked while this runs.
    /// Any failure aborts the export; nothing is retried.
    pub async fn export(
        &self,
        session: &mut EditorSession,
        output_dir: &Path,
    ) -> TrackcutResult<ExportOutcome> {
        session.set_locked(true);
        let result = self.run(session, output_dir).await;
        session.set_locked(false);

        if let Err(e) = &result {
            error!("Export failed: {}", e);
        }
        result
    }

    async fn run(&self, session: &EditorSession, output_dir: &Path) -> TrackcutResult<ExportOutcome> {
        let plan = ExportPlan::from_store(session.store()).map_err(export_error)?;
        info!(
            files = plan.files.len(),
            segments = plan.descriptors.len(),
            "Starting export"
        );

        let mut videos = Vec::with_capacity(plan.files.len());
        for file_id in &plan.files {
            let upload = session.upload(file_id).ok_or_else(|| TrackcutError::ExportError {
                message: format!("No upload recorded for file {}", file_id),
            })?;
            let bytes = tokio::fs::read(&upload.path).await.map_err(|e| {
                TrackcutError::ExportError {
                    message: format!("Failed to read {}: {}", upload.path.display(), e),
                }
            })?;
            videos.push(UploadedFile {
                name: upload.name.clone(),
                bytes,
            });
        }

        let submission = MergeSubmission {
            videos,
            segments: Some(plan.segments_json().map_err(export_error)?),
        };
        let reply = self
            .merge_port
            .merge(submission)
            .await
            .map_err(export_error)?;

        let accepted = reply.is_success();
        let url = match reply.body {
            MergeBody::Success {
                success: true, url, ..
            } if accepted => url,
            MergeBody::Success { message, .. } => {
                return Err(TrackcutError::ExportError {
                    message: format!(
                        "Merge did not succeed ({}): {}",
                        reply.status,
                        message.as_deref().unwrap_or("no message")
                    ),
                })
            }
            MergeBody::Failure { error, details } => {
                let message = match details {
                    Some(details) => format!("{} ({}): {}", error, reply.status, details),
                    None => format!("{} ({})", error, reply.status),
                };
                return Err(TrackcutError::ExportError { message });
            }
        };

        let artifact = self.storage_port.fetch(&url).await.map_err(export_error)?;
        tokio::fs::create_dir_all(output_dir).await?;
        let path = output_dir.join(download_name(chrono::Utc::now().timestamp_millis()));
        tokio::fs::write(&path, artifact).await?;

        info!(url = %url, path = %path.display(), "Export complete");
        Ok(ExportOutcome { plan, url, path })
    }
}

fn export_error(e: impl std::fmt::Display) -> TrackcutError {
    TrackcutError::ExportError {
        message: e.to_string(),
    }
}
