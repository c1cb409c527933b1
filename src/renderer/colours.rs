use crate::dashboard::ConnectionStatus;
use crate::models::SensorStatus;
use image::Rgba;

/// Colours applied to one status, shared by the card grid and the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusColours {
    pub dot: Rgba<u8>,
    pub badge_bg: Rgba<u8>,
    pub badge_fg: Rgba<u8>,
}

const GREEN: StatusColours = StatusColours {
    dot: Rgba([34, 197, 94, 255]),
    badge_bg: Rgba([220, 252, 231, 255]),
    badge_fg: Rgba([22, 101, 52, 255]),
};

const YELLOW: StatusColours = StatusColours {
    dot: Rgba([234, 179, 8, 255]),
    badge_bg: Rgba([254, 249, 195, 255]),
    badge_fg: Rgba([133, 77, 14, 255]),
};

const RED: StatusColours = StatusColours {
    dot: Rgba([239, 68, 68, 255]),
    badge_bg: Rgba([254, 226, 226, 255]),
    badge_fg: Rgba([153, 27, 27, 255]),
};

const GRAY: StatusColours = StatusColours {
    dot: Rgba([107, 114, 128, 255]),
    badge_bg: Rgba([243, 244, 246, 255]),
    badge_fg: Rgba([31, 41, 55, 255]),
};

/// Neutral treatment for statuses outside the known set.
pub const NEUTRAL: StatusColours = GRAY;

pub fn status_colours(status: &SensorStatus) -> StatusColours {
    match status {
        SensorStatus::Normal => GREEN,
        SensorStatus::Warning => YELLOW,
        SensorStatus::Critical => RED,
        SensorStatus::Error => GRAY,
        SensorStatus::Other(_) => NEUTRAL,
    }
}

pub fn connection_colours(status: ConnectionStatus) -> StatusColours {
    match status {
        ConnectionStatus::Connected => GREEN,
        ConnectionStatus::Connecting => YELLOW,
        ConnectionStatus::Disconnected => RED,
    }
}

/// Snapshot canvas colours.
pub(crate) struct Colours {
    pub background: Rgba<u8>,
    pub card: Rgba<u8>,
    pub border: Rgba<u8>,
    pub title: Rgba<u8>,
    pub value: Rgba<u8>,
    pub muted: Rgba<u8>,
}

impl Default for Colours {
    fn default() -> Self {
        Self {
            background: Rgba([243, 244, 246, 255]), // Light gray page
            card: Rgba([255, 255, 255, 255]),
            border: Rgba([209, 213, 219, 255]),
            title: Rgba([31, 41, 55, 255]),
            value: Rgba([17, 24, 39, 255]),
            muted: Rgba([107, 114, 128, 255]),
        }
    }
}
