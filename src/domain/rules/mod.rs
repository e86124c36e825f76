// Domain rules - Cursor placement and merge submission policies

use crate::domain::errors::*;
use crate::domain::model::*;

/// Where a cursor resting in a gap should go
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GapNeighbour<'a> {
    /// The cursor already lies inside this segment
    Containing(&'a Segment),
    /// Nearest segment starting after the cursor
    Following(&'a Segment),
    /// Nearest segment ending before the cursor
    Preceding(&'a Segment),
}

impl<'a> GapNeighbour<'a> {
    pub fn segment(&self) -> &'a Segment {
        match *self {
            GapNeighbour::Containing(segment)
            | GapNeighbour::Following(segment)
            | GapNeighbour::Preceding(segment) => segment,
        }
    }
}

/// Business rules for keeping the cursor off timeline gaps
pub struct CursorPlacement;

impl CursorPlacement {
    /// Classify the best segment for `time`: the first containing one in
    /// iteration order, else the smallest start after `time`, else the largest
    /// end before `time`.
    pub fn neighbour<'a, I>(segments: I, time: f64) -> Option<GapNeighbour<'a>>
    where
        I: IntoIterator<Item = &'a Segment>,
    {
        let mut following: Option<&Segment> = None;
        let mut preceding: Option<&Segment> = None;

        for segment in segments {
            if segment.contains(time) {
                return Some(GapNeighbour::Containing(segment));
            }
            if segment.start > time && following.map_or(true, |f| segment.start < f.start) {
                following = Some(segment);
            }
            if segment.end < time && preceding.map_or(true, |p| segment.end > p.end) {
                preceding = Some(segment);
            }
        }

        following
            .map(GapNeighbour::Following)
            .or(preceding.map(GapNeighbour::Preceding))
    }

    /// Cursor position after relocation: unchanged when inside a segment,
    /// otherwise the nearest following start, the nearest preceding end, or 0.
    pub fn relocate<'a, I>(segments: I, time: f64) -> f64
    where
        I: IntoIterator<Item = &'a Segment>,
    {
        match Self::neighbour(segments, time) {
            Some(GapNeighbour::Containing(_)) => time,
            Some(GapNeighbour::Following(segment)) => segment.start,
            Some(GapNeighbour::Preceding(segment)) => segment.end,
            None => 0.0,
        }
    }
}

/// Business rules for merge submissions
pub struct MergeRules;

impl MergeRules {
    /// Validate descriptors against the number of uploaded files
    pub fn validate(descriptors: &[SegmentDescriptor], file_count: usize) -> Result<(), DomainError> {
        if descriptors.is_empty() {
            return Err(DomainError::Validation("No segments to process".to_string()));
        }
        if file_count == 0 {
            return Err(DomainError::Validation("No video files provided".to_string()));
        }

        for descriptor in descriptors {
            if descriptor.file_index >= file_count {
                return Err(DomainError::Validation(format!(
                    "Invalid file index: {}",
                    descriptor.file_index
                )));
            }
            if !descriptor.start.is_finite()
                || !descriptor.end.is_finite()
                || descriptor.start < 0.0
                || descriptor.start >= descriptor.end
            {
                return Err(DomainError::Validation(format!(
                    "Invalid segment range: {} - {}",
                    descriptor.start, descriptor.end
                )));
            }
        }

        Ok(())
    }
}
