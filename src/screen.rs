//! Wide/narrow layout detection from the viewport width.

use crate::notify::Position;
use clap::ValueEnum;
use serde::Serialize;

/// Viewports wider than this many pixels use the wide layout.
pub const WIDE_BREAKPOINT_PX: u32 = 768;

/// Pixels assumed per terminal column when deriving a width from `COLUMNS`.
pub const PX_PER_COLUMN: u32 = 8;

pub const DEFAULT_WIDTH_PX: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenType {
    Wide,
    Narrow,
}

impl ScreenType {
    pub fn from_width(width_px: u32) -> Self {
        if width_px > WIDE_BREAKPOINT_PX {
            ScreenType::Wide
        } else {
            ScreenType::Narrow
        }
    }

    /// Where notifications are placed for this layout.
    pub fn toast_position(&self) -> Position {
        match self {
            ScreenType::Wide => Position::TopRight,
            ScreenType::Narrow => Position::BottomCenter,
        }
    }
}

/// Tracks the layout across resize events.
#[derive(Debug, Clone)]
pub struct ScreenWatcher {
    width_px: u32,
    screen_type: ScreenType,
}

impl ScreenWatcher {
    pub fn new(width_px: u32) -> Self {
        Self {
            width_px,
            screen_type: ScreenType::from_width(width_px),
        }
    }

    /// Resolve the starting width: explicit config width, then `COLUMNS`,
    /// then [`DEFAULT_WIDTH_PX`].
    pub fn detect(configured_width: Option<u32>) -> Self {
        let width = configured_width
            .or_else(|| {
                std::env::var("COLUMNS")
                    .ok()
                    .and_then(|c| c.trim().parse::<u32>().ok())
                    .map(|cols| cols.saturating_mul(PX_PER_COLUMN))
            })
            .unwrap_or(DEFAULT_WIDTH_PX);
        Self::new(width)
    }

    pub fn width(&self) -> u32 {
        self.width_px
    }

    pub fn screen_type(&self) -> ScreenType {
        self.screen_type
    }

    /// Record a new width. Returns the new layout when it changed.
    pub fn resize(&mut self, width_px: u32) -> Option<ScreenType> {
        self.width_px = width_px;
        let next = ScreenType::from_width(width_px);
        if next == self.screen_type {
            return None;
        }
        tracing::debug!(width_px, ?next, "layout changed");
        self.screen_type = next;
        Some(next)
    }
}
