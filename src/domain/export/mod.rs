// Export planning - Turns the final timeline into a merge request

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::store::SegmentStore;

/// Ordered merge request derived from the video tracks
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    /// Distinct source files; position is the `file_index` of descriptors
    pub files: Vec<FileId>,
    pub descriptors: Vec<SegmentDescriptor>,
}

impl ExportPlan {
    /// Collect the video segments of every video track sorted by start,
    /// index distinct files in order of first appearance, and describe each
    /// segment against that index. Segments still waiting for a duration are
    /// left out.
    pub fn from_store(store: &SegmentStore) -> Result<Self, DomainError> {
        let mut segments: Vec<&Segment> = store
            .video_segments()
            .filter(|segment| !segment.is_placeholder())
            .collect();
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));

        if segments.is_empty() {
            return Err(DomainError::Validation(
                "No video segments to merge".to_string(),
            ));
        }

        let mut files: Vec<FileId> = Vec::new();
        let descriptors = segments
            .iter()
            .map(|segment| {
                let file_index = match files.iter().position(|f| f == &segment.file_id) {
                    Some(index) => index,
                    None => {
                        files.push(segment.file_id.clone());
                        files.len() - 1
                    }
                };
                SegmentDescriptor {
                    file_index,
                    start: segment.start,
                    end: segment.end,
                }
            })
            .collect();

        Ok(Self { files, descriptors })
    }

    /// Index of a file in the submission, if referenced
    pub fn index_of(&self, file_id: &FileId) -> Option<usize> {
        self.files.iter().position(|f| f == file_id)
    }

    /// Descriptor list as sent in the `segments` form field
    pub fn segments_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(&self.descriptors)
            .map_err(|e| DomainError::BadArgs(format!("Failed to encode segments: {}", e)))
    }
}
