use super::types::ConversionSpec;
use crate::converter::Category;

pub(super) const BUILTIN_SPECS: [ConversionSpec; 15] = [
    ConversionSpec::new("Image: PNG -> JPG", Category::Image, "png", "jpg"),
    ConversionSpec::new("Image: JPG -> PNG", Category::Image, "jpg", "png"),
    ConversionSpec::new("Image: PNG -> WEBP", Category::Image, "png", "webp"),
    ConversionSpec::new("Image: JPG -> ICO", Category::Image, "jpg", "ico"),
    ConversionSpec::new("Audio: MP3 -> WAV", Category::Audio, "mp3", "wav"),
    ConversionSpec::new("Audio: WAV -> MP3", Category::Audio, "wav", "mp3"),
    ConversionSpec::new("Audio: MP3 -> OGG", Category::Audio, "mp3", "ogg"),
    ConversionSpec::new("Audio: OGG -> WAV", Category::Audio, "ogg", "wav"),
    ConversionSpec::new("Text: TXT -> PDF", Category::TextToDocument, "txt", "pdf"),
    ConversionSpec::new("Data: CSV -> JSON", Category::TabularInterchange, "csv", "json"),
    ConversionSpec::new("Data: JSON -> CSV", Category::TabularInterchange, "json", "csv"),
    ConversionSpec::new("Data: JSON -> XLSX", Category::TabularToSpreadsheet, "json", "xlsx"),
    ConversionSpec::new("Data: XLSX -> CSV", Category::SpreadsheetToTabular, "xlsx", "csv"),
    ConversionSpec::new("Doc: DOCX -> PDF", Category::DocumentToDocument, "docx", "pdf"),
    ConversionSpec::new("PDF -> TXT", Category::DocumentToText, "pdf", "txt"),
];
