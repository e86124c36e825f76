//! Preview audio-extraction collaborator
//!
//! Audio is extracted client-side; this endpoint only acknowledges the call.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

pub const EXTRACT_AUDIO_MESSAGE: &str = "This is a simplified API endpoint for the preview environment. In a real implementation, this would extract audio server-side.";

#[derive(Debug, Default, Clone, Copy)]
pub struct CannedAudioExtractor;

#[async_trait]
impl AudioExtractionPort for CannedAudioExtractor {
    async fn extract(&self, request: ExtractAudioRequest) -> Result<ExtractAudioReply, DomainError> {
        debug!(video = ?request.video, "audio extraction requested");
        Ok(ExtractAudioReply {
            message: EXTRACT_AUDIO_MESSAGE.to_string(),
            audio_url: None,
        })
    }
}
