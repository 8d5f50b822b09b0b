//! Testing utilities: a mock handler and file fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use transmute_core::testing::{fixtures, MockHandler};
//!
//! let dir = tempfile::TempDir::new()?;
//! let source = fixtures::write_csv(dir.path(), "people.csv", &["name,age", "Ann,30"])?;
//! let mock = Arc::new(MockHandler::new(Category::TabularInterchange));
//! ```

mod mock_handler;

pub use mock_handler::{MockHandler, MOCK_OUTPUT};

/// Test fixtures and helper functions.
pub mod fixtures {
    use image::{ImageFormat, ImageResult, Rgba, RgbaImage};
    use std::io;
    use std::path::{Path, PathBuf};

    use crate::converter::{Capabilities, ConverterConfig, HandlerSet};
    use crate::dispatcher::{Dispatcher, DispatcherConfig};
    use crate::registry::Registry;

    /// Writes `lines` joined by `\n` (with a trailing newline) to `dir/name`.
    pub fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> io::Result<PathBuf> {
        let path = dir.join(name);
        let mut text = lines.join("\n");
        text.push('\n');
        std::fs::write(&path, text)?;
        Ok(path)
    }

    /// Writes a `width` x `height` image with a diagonal gradient and a
    /// half-transparent alpha channel.
    pub fn write_image(
        path: &Path,
        width: u32,
        height: u32,
        format: ImageFormat,
    ) -> ImageResult<()> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 128])
        });
        match format {
            // JPEG has no alpha channel.
            ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(img)
                .to_rgb8()
                .save_with_format(path, format),
            _ => img.save_with_format(path, format),
        }
    }

    /// A dispatcher over the real handlers with the given capabilities.
    pub fn dispatcher(capabilities: Capabilities) -> Dispatcher {
        let converter = ConverterConfig::default();
        Dispatcher::new(
            Registry::builtin(),
            HandlerSet::new(&converter, capabilities),
            DispatcherConfig::default(),
        )
    }

    /// Names of the entries in `dir`, sorted.
    pub fn dir_entries(dir: &Path) -> io::Result<Vec<String>> {
        let mut names = std::fs::read_dir(dir)?
            .map(|e| e.map(|e| e.file_name().to_string_lossy().to_string()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}
