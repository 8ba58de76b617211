//! Motion records for ordered medial paths
//!
//! Each segment becomes a rapid approach at safe height, one cut move per
//! medial point at `Z = -distance`, and a rapid retract above the last point.

use crate::path_orderer::PathSegment;
use serde::{Deserialize, Serialize};

/// Default retract height.
pub const DEFAULT_SAFE_HEIGHT: f64 = 5.0;

/// A single machine motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionRecord {
    /// Non-cutting positioning move
    Rapid { x: f64, y: f64, z: f64 },
    /// Cutting move
    Cut { x: f64, y: f64, z: f64 },
}

impl MotionRecord {
    /// Numeric move code: 0 for rapid, 1 for cut.
    pub fn code(&self) -> u8 {
        match self {
            MotionRecord::Rapid { .. } => 0,
            MotionRecord::Cut { .. } => 1,
        }
    }

    pub fn is_rapid(&self) -> bool {
        matches!(self, MotionRecord::Rapid { .. })
    }

    pub fn coordinates(&self) -> (f64, f64, f64) {
        match *self {
            MotionRecord::Rapid { x, y, z } | MotionRecord::Cut { x, y, z } => (x, y, z),
        }
    }
}

/// Turns path segments into motion records.
#[derive(Debug, Clone, Copy)]
pub struct ToolpathEmitter {
    safe_height: f64,
}

impl Default for ToolpathEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SAFE_HEIGHT)
    }
}

impl ToolpathEmitter {
    pub fn new(safe_height: f64) -> Self {
        Self { safe_height }
    }

    pub fn safe_height(&self) -> f64 {
        self.safe_height
    }

    /// Records for one segment. An empty segment yields no records.
    pub fn emit_segment(&self, segment: &PathSegment) -> Vec<MotionRecord> {
        let (Some(first), Some(last)) = (segment.points.first(), segment.points.last()) else {
            return Vec::new();
        };

        let mut records = Vec::with_capacity(segment.len() + 2);
        records.push(MotionRecord::Rapid {
            x: first.x(),
            y: first.y(),
            z: self.safe_height,
        });
        records.extend(segment.points.iter().map(|p| MotionRecord::Cut {
            x: p.x(),
            y: p.y(),
            z: -p.distance_to_boundary,
        }));
        records.push(MotionRecord::Rapid {
            x: last.x(),
            y: last.y(),
            z: self.safe_height,
        });
        records
    }

    /// Records for all segments in order.
    pub fn emit(&self, segments: &[PathSegment]) -> Vec<MotionRecord> {
        segments
            .iter()
            .flat_map(|segment| self.emit_segment(segment))
            .collect()
    }
}
