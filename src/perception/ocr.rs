use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::OcrConfig;

/// Recognized text shorter than this is treated as noise.
const MIN_SCREEN_TEXT_CHARS: usize = 10;

/// Optical character recognition backend
///
/// Implementations:
/// - `TesseractOcr`: the `tesseract` command-line tool
#[async_trait::async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in an encoded image (PNG, JPEG, ...)
    async fn recognize(&self, image: &[u8]) -> Result<String>;

    /// Engine name for logging
    fn name(&self) -> &str;
}

/// Runs `tesseract stdin stdout` for each image
pub struct TesseractOcr {
    binary: String,
    languages: String,
}

impl TesseractOcr {
    pub fn new(config: &OcrConfig) -> Self {
        let languages = if config.languages.is_empty() {
            "eng".to_string()
        } else {
            config.languages.join("+")
        };

        info!("Using tesseract OCR ({}) for languages: {}", config.binary, languages);

        Self {
            binary: config.binary.clone(),
            languages,
        }
    }
}

#[async_trait::async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &[u8]) -> Result<String> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", self.languages.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start {}", self.binary))?;

        {
            let mut stdin = child.stdin.take().context("tesseract stdin unavailable")?;
            stdin
                .write_all(image)
                .await
                .context("Failed to send image to tesseract")?;
        }

        let output = child
            .wait_with_output()
            .await
            .context("Failed to wait for tesseract")?;

        if !output.status.success() {
            bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(normalize_text(&String::from_utf8_lossy(&output.stdout)))
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

/// OCR every screen and label the results `--- Screen N ---` (1-based).
///
/// Screens that fail recognition or yield almost no text are skipped.
pub async fn screen_text_from_images(engine: &dyn OcrEngine, images: &[Vec<u8>]) -> String {
    let mut sections = Vec::new();

    for (i, image) in images.iter().enumerate() {
        let screen = i + 1;
        match engine.recognize(image).await {
            Ok(text) if text.chars().count() > MIN_SCREEN_TEXT_CHARS => {
                sections.push(format!("--- Screen {} ---\n{}", screen, text));
            }
            Ok(_) => debug!("Screen {} has no usable text", screen),
            Err(e) => warn!("Failed to process screen {} with {}: {:#}", screen, engine.name(), e),
        }
        info!("Screen {}/{} done", screen, images.len());
    }

    sections.join("\n\n")
}

/// Collapse OCR output into single-spaced text
fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
