//! In-process merge collaborator
//!
//! Validates a merge submission, uploads every input to object storage and
//! answers with the URL of the first upload. Cutting and concatenating the
//! described segments is not performed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::errors::*;
use crate::domain::model::SegmentDescriptor;
use crate::domain::rules::MergeRules;
use crate::ports::*;
use crate::utils::path::{join_key, sanitize_file_name};

pub const PREVIEW_MESSAGE: &str = "Processing simulated in preview";

/// Merge endpoint backed by an object store
pub struct MergeService {
    storage: Arc<dyn ObjectStoragePort>,
    prefix: String,
}

impl MergeService {
    pub fn new(storage: Arc<dyn ObjectStoragePort>, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
        }
    }

    /// Handle one submission; every outcome is a reply
    pub async fn handle(&self, submission: MergeSubmission) -> MergeReply {
        let raw = match submission.segments.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.to_string(),
            _ => return MergeReply::failure(400, "No segments data provided", None),
        };

        let descriptors: Vec<SegmentDescriptor> = match serde_json::from_str(&raw) {
            Ok(descriptors) => descriptors,
            Err(e) => {
                warn!("Rejected malformed segments field: {}", e);
                return MergeReply::failure(400, "Invalid segments data", Some(e.to_string()));
            }
        };

        if let Err(e) = MergeRules::validate(&descriptors, submission.videos.len()) {
            warn!("Rejected merge submission: {}", e);
            let status = e.status();
            let message = match e {
                DomainError::Validation(message) | DomainError::BadArgs(message) => message,
                other => other.to_string(),
            };
            return MergeReply::failure(status, message, None);
        }

        let mut uploaded = Vec::with_capacity(submission.videos.len());
        for video in submission.videos {
            let key = join_key(
                &self.prefix,
                &format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&video.name)),
            );
            match self.storage.upload(video.bytes, &key).await {
                Ok(url) => uploaded.push(url),
                Err(e) => {
                    error!("Error merging videos: {}", e);
                    return MergeReply::failure(
                        e.status(),
                        "Failed to merge videos",
                        Some(e.to_string()),
                    );
                }
            }
        }

        info!(
            files = uploaded.len(),
            segments = descriptors.len(),
            "merge submission accepted"
        );

        match uploaded.into_iter().next() {
            Some(url) => MergeReply {
                status: 200,
                body: MergeBody::Success {
                    success: true,
                    message: Some(PREVIEW_MESSAGE.to_string()),
                    url,
                },
            },
            None => MergeReply::failure(400, "No video files provided", None),
        }
    }
}

#[async_trait]
impl MergePort for MergeService {
    async fn merge(&self, submission: MergeSubmission) -> Result<MergeReply, DomainError> {
        Ok(self.handle(submission).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage_local::LocalObjectStore;

    /// Storage that rejects every call with the given error
    struct BrokenStorage(DomainError);

    #[async_trait]
    impl ObjectStoragePort for BrokenStorage {
        async fn upload(&self, _bytes: Vec<u8>, _path_hint: &str) -> Result<String, DomainError> {
            Err(self.0.clone())
        }

        async fn delete(&self, _url: &str) -> bool {
            false
        }

        async fn list(&self, _prefix: &str) -> Result<Vec<String>, DomainError> {
            Ok(Vec::new())
        }

        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, DomainError> {
            Err(self.0.clone())
        }
    }

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            bytes: name.as_bytes().to_vec(),
        }
    }

    fn error_of(reply: &MergeReply) -> &str {
        match &reply.body {
            MergeBody::Failure { error, .. } => error,
            MergeBody::Success { .. } => panic!("expected failure, got {:?}", reply),
        }
    }

    fn service(dir: &tempfile::TempDir) -> MergeService {
        let storage = LocalObjectStore::new(dir.path()).unwrap();
        MergeService::new(Arc::new(storage), "tmp")
    }

    #[tokio::test]
    async fn test_missing_segments_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let reply = service(&dir)
            .handle(MergeSubmission {
                videos: vec![file("a.mp4")],
                segments: None,
            })
            .await;
        assert_eq!(reply.status, 400);
        assert_eq!(error_of(&reply), "No segments data provided");
    }

    #[tokio::test]
    async fn test_validation_failures_are_400() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        let cases = [
            (vec![file("a.mp4")], "not json", "Invalid segments data"),
            (vec![file("a.mp4")], "[]", "No segments to process"),
            (vec![], r#"[{"fileIndex":0,"start":0,"end":1}]"#, "No video files provided"),
            (
                vec![file("a.mp4")],
                r#"[{"fileIndex":3,"start":0,"end":1}]"#,
                "Invalid file index: 3",
            ),
        ];

        for (videos, segments, expected) in cases {
            let reply = service
                .handle(MergeSubmission {
                    videos,
                    segments: Some(segments.to_string()),
                })
                .await;
            assert_eq!(reply.status, 400, "case {}", segments);
            assert_eq!(error_of(&reply), expected);
        }
    }

    #[tokio::test]
    async fn test_success_returns_first_upload() {
        let dir = tempfile::tempdir().unwrap();
        let reply = service(&dir)
            .handle(MergeSubmission {
                videos: vec![file("first clip.mp4"), file("second.mp4")],
                segments: Some(
                    r#"[{"fileIndex":1,"start":0,"end":2},{"fileIndex":0,"start":2,"end":5}]"#
                        .to_string(),
                ),
            })
            .await;

        assert!(reply.is_success());
        match reply.body {
            MergeBody::Success { success, url, message } => {
                assert!(success);
                assert!(url.ends_with("-first_clip.mp4"));
                assert_eq!(message.as_deref(), Some(PREVIEW_MESSAGE));
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_500_with_details() {
        let broken = BrokenStorage(DomainError::StorageFail("disk full".to_string()));
        let service = MergeService::new(Arc::new(broken), "tmp");
        let reply = service
            .handle(MergeSubmission {
                videos: vec![file("a.mp4")],
                segments: Some(r#"[{"fileIndex":0,"start":0,"end":1}]"#.to_string()),
            })
            .await;
        assert_eq!(reply.status, 500);
        match reply.body {
            MergeBody::Failure { error, details } => {
                assert_eq!(error, "Failed to merge videos");
                assert!(details.unwrap().contains("disk full"));
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_storage_rejection_keeps_error_status() {
        let broken = BrokenStorage(DomainError::BadArgs("empty object key".to_string()));
        let service = MergeService::new(Arc::new(broken), "tmp");
        let reply = service
            .handle(MergeSubmission {
                videos: vec![file("a.mp4")],
                segments: Some(r#"[{"fileIndex":0,"start":0,"end":1}]"#.to_string()),
            })
            .await;
        assert_eq!(reply.status, 400);
        assert_eq!(error_of(&reply), "Failed to merge videos");
    }

    #[test]
    fn test_reply_body_wire_shape() {
        let body = MergeBody::Failure {
            error: "No segments to process".to_string(),
            details: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"No segments to process"}"#
        );
        let parsed: MergeBody =
            serde_json::from_str(r#"{"success":true,"url":"file:///x.mp4"}"#).unwrap();
        assert!(matches!(parsed, MergeBody::Success { .. }));
    }
}
