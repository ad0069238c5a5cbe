use std::fmt;

use crate::shared::constants::FINGER_TIPS;
use crate::shared::hand_landmarks::{HandLandmarks, Handedness};

/// Extended/folded state of thumb, index, middle, ring, pinky.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FingerState([bool; 5]);

impl FingerState {
    pub const fn new(fingers: [bool; 5]) -> Self {
        Self(fingers)
    }

    /// Reads finger extension from a hand skeleton.
    ///
    /// The thumb is extended when its tip lies outward of the IP joint along
    /// x (rightward for a right hand). The other fingers are extended when
    /// the tip is above the PIP joint (smaller y).
    pub fn from_hand(hand: &HandLandmarks) -> Self {
        let thumb_tip = hand.point(FINGER_TIPS[0]);
        let thumb_ip = hand.point(FINGER_TIPS[0] - 1);
        let thumb = match hand.handedness() {
            Handedness::Right => thumb_tip.x > thumb_ip.x,
            Handedness::Left => thumb_tip.x < thumb_ip.x,
        };

        let mut fingers = [thumb, false, false, false, false];
        for (slot, &tip) in fingers.iter_mut().zip(FINGER_TIPS.iter()).skip(1) {
            *slot = hand.point(tip).y < hand.point(tip - 2).y;
        }
        Self(fingers)
    }

    pub fn fingers(&self) -> [bool; 5] {
        self.0
    }

    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }
}

impl From<[u8; 5]> for FingerState {
    fn from(bits: [u8; 5]) -> Self {
        Self(bits.map(|b| b != 0))
    }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: Vec<&str> = self.0.iter().map(|&b| if b { "1" } else { "0" }).collect();
        write!(f, "[{}]", bits.join(","))
    }
}
