// Ports - Interface definitions (contracts) for external collaborators

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media duration discovery
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Duration of the media behind `source`, in seconds
    async fn probe_duration(&self, source: &SourceRef) -> Result<f64, DomainError>;
}

/// Port for blob/object storage
#[async_trait]
pub trait ObjectStoragePort: Send + Sync {
    /// Store `bytes` under `path_hint` and return a URL for them
    async fn upload(&self, bytes: Vec<u8>, path_hint: &str) -> Result<String, DomainError>;

    /// Delete an object by URL; `false` when it could not be deleted
    async fn delete(&self, url: &str) -> bool;

    /// URLs of every object under `prefix`
    async fn list(&self, prefix: &str) -> Result<Vec<String>, DomainError>;

    /// Read an object back by URL
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError>;
}

/// One file part of a merge submission
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Multipart-style merge submission: `videos` parts plus a `segments` field
/// carrying a JSON array of `{fileIndex, start, end}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeSubmission {
    pub videos: Vec<UploadedFile>,
    pub segments: Option<String>,
}

/// JSON body returned by the merge collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MergeBody {
    Success {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        url: String,
    },
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

/// Status plus body, mirroring an HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReply {
    pub status: u16,
    pub body: MergeBody,
}

impl MergeReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn failure(status: u16, error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status,
            body: MergeBody::Failure {
                error: error.into(),
                details,
            },
        }
    }
}

/// Port for the merge collaborator
#[async_trait]
pub trait MergePort: Send + Sync {
    /// Submit files and descriptors. `Err` means the submission never got a
    /// reply (transport failure); collaborator errors come back as a reply.
    async fn merge(&self, submission: MergeSubmission) -> Result<MergeReply, DomainError>;
}

/// Request to the audio-extraction collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractAudioRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

/// Reply from the audio-extraction collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractAudioReply {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Port for server-side audio extraction
#[async_trait]
pub trait AudioExtractionPort: Send + Sync {
    async fn extract(&self, request: ExtractAudioRequest) -> Result<ExtractAudioReply, DomainError>;
}
