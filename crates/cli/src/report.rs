//! Text rendering of command output.

use transmute_core::{Capabilities, ConversionResult, ConversionSpec};

/// The single notification line for a finished conversion.
pub fn notification(result: &ConversionResult) -> String {
    match result {
        ConversionResult::Success { output_path } => {
            format!("File converted and saved as: {}", output_path.display())
        }
        ConversionResult::Failure { message } => format!("Failed to convert: {}", message),
    }
}

pub fn spec_line(spec: &ConversionSpec) -> String {
    format!(
        "{:<22} {:<24} {} -> {}",
        spec.label, spec.category, spec.source_ext, spec.target_ext
    )
}

pub fn capability_lines(caps: &Capabilities) -> Vec<String> {
    let flag = |present: bool| if present { "available" } else { "missing" };
    vec![
        format!("audio_transcoder: {}", flag(caps.audio_transcoder)),
        format!("text_extraction: {}", flag(caps.text_extraction)),
    ]
}
