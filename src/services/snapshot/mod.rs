//! Snapshot export and sharing.
//!
//! Turns captured RGBA pixels of the calendar surface into a PNG and hands it
//! to a destination: a file the user picked, or a share target. Failures are
//! reported to the caller and never touch calendar state.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use directories::{ProjectDirs, UserDirs};
use std::fs;
use std::path::{Path, PathBuf};

/// Raw RGBA8 pixels of a captured surface, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl SnapshotImage {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(anyhow!("Snapshot is empty ({}x{})", width, height));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(anyhow!(
                "Snapshot has {} bytes, expected {} for {}x{}",
                rgba.len(),
                expected,
                width,
                height
            ));
        }
        Ok(Self { width, height, rgba })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .context("Failed to write PNG header")?;
            writer
                .write_image_data(&self.rgba)
                .context("Failed to encode PNG data")?;
        }
        Ok(bytes)
    }

    /// Encode and write to `path`
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let bytes = self.encode_png()?;
        fs::write(path, bytes).with_context(|| format!("Failed to write snapshot to {:?}", path))
    }
}

/// External destination for a shared snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait ShareTarget {
    fn share(&self, image_path: &Path, caption: &str) -> Result<()>;
}

/// Opens a Twitter/X post composer with the caption in the default browser.
///
/// Browsers cannot attach local files to the intent, so the image is left on
/// disk for the user to attach.
pub struct TwitterShare;

impl ShareTarget for TwitterShare {
    fn share(&self, image_path: &Path, caption: &str) -> Result<()> {
        let url = tweet_intent_url(caption);
        webbrowser::open(&url).with_context(|| format!("Failed to open browser for {}", url))?;
        log::info!("Opened share composer, image at {:?}", image_path);
        Ok(())
    }
}

pub fn tweet_intent_url(caption: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}",
        urlencoding::encode(caption)
    )
}

/// Writes snapshots for download and share.
pub struct SnapshotExporter {
    share_target: Box<dyn ShareTarget>,
    share_dir: PathBuf,
}

impl SnapshotExporter {
    pub fn new(share_target: Box<dyn ShareTarget>, share_dir: impl Into<PathBuf>) -> Self {
        Self {
            share_target,
            share_dir: share_dir.into(),
        }
    }

    /// Exporter sharing to Twitter/X, keeping shared images in the user's
    /// picture directory (or the app cache when there is none).
    pub fn with_default_target() -> Self {
        let share_dir = UserDirs::new()
            .and_then(|dirs| dirs.picture_dir().map(Path::to_path_buf))
            .or_else(|| {
                ProjectDirs::from("com", "KenBoyle", "CapsuleCalendar")
                    .map(|dirs| dirs.cache_dir().to_path_buf())
            })
            .unwrap_or_else(std::env::temp_dir);
        Self::new(Box::new(TwitterShare), share_dir)
    }

    pub fn download(&self, image: &SnapshotImage, path: &Path) -> Result<()> {
        image.save_png(path)?;
        log::info!(
            "Saved {}x{} snapshot to {:?}",
            image.width(),
            image.height(),
            path
        );
        Ok(())
    }

    /// Save the image under the share directory, then hand it to the target.
    /// Returns where the image was written.
    pub fn share(&self, image: &SnapshotImage, caption: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.share_dir)
            .with_context(|| format!("Failed to create {:?}", self.share_dir))?;
        let file_name = format!("calendar-{}.png", Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.share_dir.join(file_name);
        image.save_png(&path)?;
        self.share_target.share(&path, caption)?;
        Ok(path)
    }
}
