use crate::shared::error::SourceError;
use crate::shared::face_mesh::FaceMesh;
use crate::shared::hand_landmarks::HandLandmarks;

/// Landmark detections for one camera frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub index: usize,
    pub face: Option<FaceMesh>,
    pub hand: Option<HandLandmarks>,
    /// User pressed the quit key on this frame.
    pub quit: bool,
}

/// Supplies per-frame landmark detections in capture order.
///
/// Implementations own the camera and landmark models; the control loops
/// only see already-normalized landmarks.
pub trait FrameSource: Send {
    /// Blocks until the next frame is available.
    ///
    /// `None` means the stream has ended. An `Err` is a transient read miss:
    /// the caller skips that frame and keeps going.
    fn next_frame(&mut self) -> Option<Result<FrameInput, SourceError>>;
}
