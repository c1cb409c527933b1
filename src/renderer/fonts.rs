use anyhow::{Context, Result};
use rusttype::{Font, Scale};
use std::fs;
use std::path::Path;

pub(crate) struct FontConfig {
    pub font: Font<'static>,
    pub scale: Scale,
}

impl FontConfig {
    pub fn with_scale(&self, scale: f32) -> FontConfig {
        FontConfig {
            font: self.font.clone(),
            scale: Scale::uniform(scale),
        }
    }
}

pub(crate) fn load_font<P: AsRef<Path>>(path: P, scale: f32) -> Result<FontConfig> {
    let path = path.as_ref();
    let bytes = fs::read(path).context(format!("Failed to read font {}", path.display()))?;
    let font = Font::try_from_vec(bytes)
        .context(format!("{} is not a usable TrueType font", path.display()))?;
    Ok(FontConfig {
        font,
        scale: Scale::uniform(scale),
    })
}
