use anyhow::{Context, Result};
use image::RgbaImage;
use log::debug;
use std::path::PathBuf;

use crate::config::DashboardConfig;
use crate::dashboard::SensorCard;
use crate::renderer::colours::Colours;
use crate::renderer::drawing;
use crate::renderer::fonts::{self, FontConfig};

pub const CARD_WIDTH: u32 = 240;
pub const CARD_HEIGHT: u32 = 140;
pub const GAP: u32 = 16;
const DOT_RADIUS: i32 = 6;
const PADDING: i32 = 12;

/// Pixel geometry of the card grid for a given canvas width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub width: u32,
    pub height: u32,
}

impl GridLayout {
    pub fn new(width: u32, cards: usize) -> Self {
        let width = width.max(CARD_WIDTH + 2 * GAP);
        let columns = ((width - GAP) / (CARD_WIDTH + GAP)).max(1);
        let rows = (cards as u32).div_ceil(columns);
        let height = GAP + rows.max(1) * (CARD_HEIGHT + GAP);
        Self {
            columns,
            width,
            height,
        }
    }

    pub fn card_origin(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        let column = index % self.columns;
        let row = index / self.columns;
        (
            GAP + column * (CARD_WIDTH + GAP),
            GAP + row * (CARD_HEIGHT + GAP),
        )
    }

    pub fn dot_centre(&self, index: usize) -> (u32, u32) {
        let (x, y) = self.card_origin(index);
        (x + CARD_WIDTH - 20, y + 20)
    }
}

// Draw the card grid. Text is only drawn when a font is available.
pub(crate) fn create_image(width: u32, cards: &[SensorCard], font: Option<&FontConfig>) -> RgbaImage {
    let layout = GridLayout::new(width, cards.len());
    let colours = Colours::default();

    let mut image = RgbaImage::new(layout.width, layout.height);
    drawing::fill(&mut image, colours.background);

    for (index, card) in cards.iter().enumerate() {
        let (x, y) = layout.card_origin(index);
        drawing::card(
            &mut image,
            x as i32,
            y as i32,
            CARD_WIDTH,
            CARD_HEIGHT,
            colours.card,
            colours.border,
        );

        let (dot_x, dot_y) = layout.dot_centre(index);
        drawing::dot(
            &mut image,
            dot_x as i32,
            dot_y as i32,
            DOT_RADIUS,
            card.colours.dot,
        );

        if let Some(font) = font {
            render_card_text(&mut image, &colours, font, card, x as i32, y as i32);
        }
    }

    image
}

fn render_card_text(
    image: &mut RgbaImage,
    colours: &Colours,
    font: &FontConfig,
    card: &SensorCard,
    x: i32,
    y: i32,
) {
    let large = font.with_scale(font.scale.y * 1.6);
    let left = x + PADDING;

    drawing::text(image, colours.title, left, y + PADDING, font, &card.name);
    drawing::text(
        image,
        colours.value,
        left,
        y + 38,
        &large,
        &format!("{} {}", card.value, card.unit),
    );
    drawing::text(image, colours.muted, left, y + 72, font, &card.kind);
    drawing::text(image, colours.muted, left, y + 92, font, &card.location);
    drawing::text(image, colours.muted, left, y + 112, font, &card.time);
}

/// Writes a PNG of the card grid after each successful render.
pub struct SnapshotWriter {
    path: PathBuf,
    width: u32,
    font: Option<FontConfig>,
}

impl SnapshotWriter {
    /// `None` when snapshots are switched off.
    pub fn from_config(config: &DashboardConfig) -> Result<Option<Self>> {
        if !config.save_to_file {
            return Ok(None);
        }

        let font = match config.font.as_deref().filter(|f| !f.is_empty()) {
            Some(path) => Some(fonts::load_font(path, 16.0)?),
            None => None,
        };

        Ok(Some(Self {
            path: PathBuf::from(&config.file),
            width: config.width,
            font,
        }))
    }

    pub fn write(&self, cards: &[SensorCard]) -> Result<()> {
        let image = create_image(self.width, cards, self.font.as_ref());
        image
            .save(&self.path)
            .context(format!("Failed to save dashboard to {}", self.path.display()))?;
        debug!("Dashboard snapshot written to {}", self.path.display());
        Ok(())
    }
}

impl std::fmt::Debug for SnapshotWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotWriter")
            .field("path", &self.path)
            .field("width", &self.width)
            .field("font", &self.font.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::SensorViews;
    use crate::models::{Sensor, SensorStatus};
    use crate::renderer::colours::{status_colours, NEUTRAL};
    use image::GenericImageView;

    fn sensor(id: &str, status: &str) -> Sensor {
        Sensor {
            id: id.to_string(),
            name: format!("Sensor {}", id),
            kind: "temperature".to_string(),
            value: Some(20.0),
            unit: "°C".to_string(),
            status: SensorStatus::from(status),
            location: "Lab".to_string(),
            timestamp: "2024-05-01T12:30:00".to_string(),
        }
    }

    #[test]
    fn test_layout_wraps_cards() {
        let layout = GridLayout::new(800, 5);
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.height, GAP + 2 * (CARD_HEIGHT + GAP));
        assert_eq!(layout.card_origin(3), (GAP, GAP + CARD_HEIGHT + GAP));
    }

    #[test]
    fn test_narrow_canvas_keeps_one_column() {
        let layout = GridLayout::new(10, 2);
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.width, CARD_WIDTH + 2 * GAP);
    }

    #[test]
    fn test_status_dots_use_palette() {
        let mut views = SensorViews::default();
        views.render(&[sensor("s1", "critical"), sensor("s2", "mystery")]);

        let image = create_image(800, views.grid(), None);
        let layout = GridLayout::new(800, 2);

        let (x, y) = layout.dot_centre(0);
        assert_eq!(
            *image.get_pixel(x, y),
            status_colours(&SensorStatus::Critical).dot
        );
        let (x, y) = layout.dot_centre(1);
        assert_eq!(*image.get_pixel(x, y), NEUTRAL.dot);
    }

    #[test]
    fn test_writer_saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.png");
        let config = DashboardConfig {
            file: path.to_string_lossy().to_string(),
            save_to_file: true,
            width: 600,
            font: None,
        };

        let writer = SnapshotWriter::from_config(&config).unwrap().unwrap();
        let mut views = SensorViews::default();
        views.render(&[sensor("s1", "normal")]);
        writer.write(views.grid()).unwrap();

        let saved = image::open(&path).unwrap();
        assert_eq!(saved.width(), 600);
    }

    #[test]
    fn test_disabled_writer() {
        let config = DashboardConfig::default();
        assert!(SnapshotWriter::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_missing_font_is_an_error() {
        let config = DashboardConfig {
            save_to_file: true,
            font: Some("/nonexistent/font.ttf".to_string()),
            ..DashboardConfig::default()
        };
        assert!(SnapshotWriter::from_config(&config).is_err());
    }
}
