use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Where the display region sits inside the host presentation window.
///
/// Positioning policy is a host layout concern; this value is carried
/// through to the region untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScreenPosition {
    Fill,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Custom(Rect),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_position_serializes() {
        let pos = ScreenPosition::Custom(Rect {
            x: 10.0,
            y: 20.0,
            width: 640.0,
            height: 360.0,
        });
        let json = serde_json::to_string(&pos).unwrap();
        let back: ScreenPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, back);
    }

    #[test]
    fn named_positions_round_trip() {
        for pos in [
            ScreenPosition::Fill,
            ScreenPosition::TopLeft,
            ScreenPosition::TopRight,
            ScreenPosition::BottomLeft,
            ScreenPosition::BottomRight,
        ] {
            let json = serde_json::to_string(&pos).unwrap();
            let back: ScreenPosition = serde_json::from_str(&json).unwrap();
            assert_eq!(pos, back);
        }
    }
}
