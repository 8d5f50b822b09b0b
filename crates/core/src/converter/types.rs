//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::error::ConversionError;

/// Handler family a conversion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Raster image re-encoding.
    Image,
    /// Audio transcoding through ffmpeg.
    Audio,
    /// Plain text laid out as a PDF document.
    TextToDocument,
    /// Delimited text <-> JSON records.
    TabularInterchange,
    /// JSON records to a spreadsheet workbook.
    TabularToSpreadsheet,
    /// First worksheet of a workbook to delimited text.
    SpreadsheetToTabular,
    /// Office document to another document format via an external converter.
    DocumentToDocument,
    /// PDF text extraction.
    DocumentToText,
}

impl Category {
    /// Every category, in handler set order.
    pub const ALL: [Category; 8] = [
        Category::Image,
        Category::Audio,
        Category::TextToDocument,
        Category::TabularInterchange,
        Category::TabularToSpreadsheet,
        Category::SpreadsheetToTabular,
        Category::DocumentToDocument,
        Category::DocumentToText,
    ];

    /// Returns the snake_case name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::TextToDocument => "text_to_document",
            Self::TabularInterchange => "tabular_interchange",
            Self::TabularToSpreadsheet => "tabular_to_spreadsheet",
            Self::SpreadsheetToTabular => "spreadsheet_to_tabular",
            Self::DocumentToDocument => "document_to_document",
            Self::DocumentToText => "document_to_text",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerJob {
    /// File to read.
    pub source_path: PathBuf,
    /// File to write. May be a staging path, so handlers must not rely on
    /// its extension and should select codecs from `target_ext` instead.
    pub output_path: PathBuf,
    /// Declared source extension (lowercase, no dot).
    pub source_ext: String,
    /// Requested target extension (lowercase, no dot).
    pub target_ext: String,
}

/// Audio container formats understood by the audio handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// MPEG Audio Layer III
    Mp3,
    /// WAVE (uncompressed)
    Wav,
    /// Ogg Vorbis
    OggVorbis,
}

impl AudioFormat {
    /// Resolves a file extension to an audio format.
    pub fn from_extension(ext: &str) -> Result<Self, ConversionError> {
        match ext {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            "ogg" => Ok(Self::OggVorbis),
            other => Err(ConversionError::unsupported(other)),
        }
    }

    /// Returns the ffmpeg muxer/demuxer name for this format.
    pub fn ffmpeg_format(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::OggVorbis => "ogg",
        }
    }

    /// Returns the ffmpeg codec name for this format.
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            Self::Mp3 => "libmp3lame",
            Self::Wav => "pcm_s16le",
            Self::OggVorbis => "libvorbis",
        }
    }
}
