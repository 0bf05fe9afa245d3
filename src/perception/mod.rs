//! Turning captured screenshots and speech into [`PerceptionData`]
//!
//! Screenshots arrive from the browser as base64 (optionally as data URLs)
//! and go through an [`OcrEngine`]. Speech is transcribed client-side and
//! arrives as text segments.

mod ocr;

use base64::Engine;

use crate::models::PerceptionData;

pub use ocr::{screen_text_from_images, OcrEngine, TesseractOcr};

/// Stand-in transcript when no speech was captured
pub const NO_TRANSCRIPT: &str = "[No audio transcription available]";

/// Decode a screenshot sent as raw base64 or as a
/// `data:image/...;base64,` URL.
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let data = payload
        .split_once(',')
        .map_or(payload, |(_, data)| data)
        .trim();

    base64::engine::general_purpose::STANDARD.decode(data)
}

/// Combine OCR output with the transcript segments (numbered `[1]`, `[2]`, ...)
pub fn assemble(screen_text: String, transcripts: &[String]) -> PerceptionData {
    let audio_transcript = if transcripts.is_empty() {
        NO_TRANSCRIPT.to_string()
    } else {
        transcripts
            .iter()
            .enumerate()
            .map(|(i, text)| format!("[{}] {}", i + 1, text))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    PerceptionData {
        screen_text,
        audio_transcript,
    }
}
