use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde::Deserialize;

use crate::session::domain::frame_source::{FrameInput, FrameSource};
use crate::shared::error::{SourceError, StartupError};
use crate::shared::face_mesh::FaceMesh;
use crate::shared::hand_landmarks::{HandLandmarks, Handedness};
use crate::shared::landmarks::LandmarkVector;

/// One recorded frame:
/// `{"face": [[x, y], ...] | null, "hand": {"handedness": "right", "landmarks": [...]} | null, "quit": false}`.
#[derive(Deserialize)]
struct FrameRecord {
    #[serde(default)]
    face: Option<LandmarkVector>,
    #[serde(default)]
    hand: Option<HandRecord>,
    #[serde(default)]
    quit: bool,
}

#[derive(Deserialize)]
struct HandRecord {
    handedness: Handedness,
    landmarks: LandmarkVector,
}

/// Replays landmark detections recorded one JSON object per line.
pub struct JsonlFrameSource {
    lines: Lines<Box<dyn BufRead + Send>>,
    line_no: usize,
    next_index: usize,
}

impl JsonlFrameSource {
    pub fn open(path: &Path) -> Result<Self, StartupError> {
        let file = File::open(path).map_err(|e| {
            StartupError::SourceUnavailable(format!("{}: {e}", path.display()))
        })?;
        log::info!("Replaying frames from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        let boxed: Box<dyn BufRead + Send> = Box::new(reader);
        Self {
            lines: boxed.lines(),
            line_no: 0,
            next_index: 0,
        }
    }

    fn parse(&self, line: &str) -> Result<(Option<FaceMesh>, Option<HandLandmarks>, bool), SourceError> {
        let malformed = |reason: String| SourceError::Malformed {
            line: self.line_no,
            reason,
        };
        let record: FrameRecord = serde_json::from_str(line).map_err(|e| malformed(e.to_string()))?;
        let face = record
            .face
            .map(FaceMesh::new)
            .transpose()
            .map_err(|e| malformed(format!("face: {e}")))?;
        let hand = record
            .hand
            .map(|h| HandLandmarks::new(h.handedness, h.landmarks))
            .transpose()
            .map_err(|e| malformed(format!("hand: {e}")))?;
        Ok((face, hand, record.quit))
    }
}

impl FrameSource for JsonlFrameSource {
    fn next_frame(&mut self) -> Option<Result<FrameInput, SourceError>> {
        loop {
            let read = self.lines.next()?;
            self.line_no += 1;
            let line = match read {
                Ok(line) => line,
                Err(e) => return Some(Err(SourceError::Read(e.to_string()))),
            };
            if line.trim().is_empty() {
                continue;
            }

            return Some(self.parse(&line).map(|(face, hand, quit)| {
                let index = self.next_index;
                self.next_index += 1;
                FrameInput {
                    index,
                    face,
                    hand,
                    quit,
                }
            }));
        }
    }
}
