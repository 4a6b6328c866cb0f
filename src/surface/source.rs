//! Source image drawn underneath the lane annotations

use std::path::Path;

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::{ColorU8, IntSize, Pixmap};

/// A loaded gel image with both raw RGBA data and a premultiplied pixmap
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub rgba: RgbaImage,
    pixmap: Pixmap,
}

impl SourceImage {
    /// Load an image file in any format the `image` crate understands
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let rgba = image::open(path)
            .with_context(|| format!("Failed to open image {}", path.display()))?
            .into_rgba8();
        Self::from_rgba(rgba)
    }

    /// Wrap an already decoded RGBA image
    pub fn from_rgba(rgba: RgbaImage) -> anyhow::Result<Self> {
        let size = IntSize::from_wh(rgba.width(), rgba.height())
            .ok_or_else(|| anyhow::anyhow!("Image has zero size"))?;

        // tiny-skia stores premultiplied pixels; RgbaImage is straight alpha
        let mut data = Vec::with_capacity(rgba.as_raw().len());
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            let premultiplied = ColorU8::from_rgba(r, g, b, a).premultiply();
            data.extend_from_slice(&[
                premultiplied.red(),
                premultiplied.green(),
                premultiplied.blue(),
                premultiplied.alpha(),
            ]);
        }
        let pixmap = Pixmap::from_vec(data, size)
            .ok_or_else(|| anyhow::anyhow!("Image buffer does not match its size"))?;

        log::debug!("SourceImage loaded: {}x{} pixels", rgba.width(), rgba.height());
        Ok(Self { rgba, pixmap })
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}
