//! Auto-rotation decision from decoded video dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Preferred screen orientation for a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landscape => write!(f, "landscape"),
            Self::Portrait => write!(f, "portrait"),
        }
    }
}

/// Decide the preferred orientation from pixel dimensions.
///
/// Returns `None` for square video or for non-positive dimensions (engines
/// report partial sizes while streams initialize). The function itself is
/// stateless and repeatable; the controller holds the once-per-session
/// latch that decides whether a result is actually applied.
pub fn decide_orientation(width: i32, height: i32) -> Option<Orientation> {
    if width <= 0 || height <= 0 {
        return None;
    }

    match width.cmp(&height) {
        std::cmp::Ordering::Greater => Some(Orientation::Landscape),
        std::cmp::Ordering::Less => Some(Orientation::Portrait),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_video_is_landscape() {
        assert_eq!(decide_orientation(1920, 1080), Some(Orientation::Landscape));
    }

    #[test]
    fn tall_video_is_portrait() {
        assert_eq!(decide_orientation(1080, 1920), Some(Orientation::Portrait));
    }

    #[test]
    fn square_video_has_no_decision() {
        assert_eq!(decide_orientation(100, 100), None);
    }

    #[test]
    fn partial_sizes_have_no_decision() {
        assert_eq!(decide_orientation(0, 1080), None);
        assert_eq!(decide_orientation(1920, 0), None);
        assert_eq!(decide_orientation(-1, 720), None);
    }

    #[test]
    fn decision_is_repeatable() {
        for _ in 0..3 {
            assert_eq!(decide_orientation(640, 360), Some(Orientation::Landscape));
        }
    }
}
