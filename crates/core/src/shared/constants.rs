pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Enrollment images accepted in the approved-user directory.
pub const ENROLLMENT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub const DEFAULT_ENROLL_DIR: &str = "user_db";
pub const DEFAULT_SLIDES_DIR: &str = "ConvertedSlides";

/// Suffix appended to an enrollment image path for precomputed landmarks.
pub const LANDMARK_SIDECAR_SUFFIX: &str = "landmarks.json";

pub const FACE_MATCH_THRESHOLD: f64 = 0.85;

/// Minimum face bounding-box area (output pixels²) before matching runs.
pub const MIN_FACE_SIZE: f64 = 15000.0;

/// Frames the access banner stays up after a grant (~1 second at 30 fps).
pub const DISPLAY_TIME: u32 = 30;

/// Frames a discrete gesture blocks further discrete gestures.
pub const GESTURE_DELAY: u32 = 15;

pub const FRAME_WIDTH: u32 = 1280;
pub const FRAME_HEIGHT: u32 = 720;

/// Navigation hot-zone: right of this x and above `HOT_ZONE_MAX_Y`.
pub const HOT_ZONE_MIN_X: f64 = 750.0;
pub const HOT_ZONE_MAX_Y: f64 = 400.0;

/// Vertical dead band trimmed from top and bottom of the cursor motion range.
pub const CURSOR_Y_MARGIN: f64 = 150.0;

pub const HAND_LANDMARK_COUNT: usize = 21;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_TIP: usize = 8;
pub const FINGER_TIPS: [usize; 5] = [THUMB_TIP, INDEX_FINGER_TIP, 12, 16, 20];

/// Leading face-mesh points hashed into the consistency fingerprint.
pub const FINGERPRINT_POINTS: usize = 5;
