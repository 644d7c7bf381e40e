//! Domain models: converter options, configuration records, run results.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// OCR engine passed to the converter with `--ocr-engine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngine {
    /// Let the converter pick an engine.
    Auto,
    /// EasyOCR.
    EasyOcr,
    /// Tesseract.
    Tesseract,
    /// macOS Vision framework.
    Mac,
}

impl OcrEngine {
    /// Name understood by the converter CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::EasyOcr => "easyocr",
            Self::Tesseract => "tesseract",
            Self::Mac => "mac",
        }
    }
}

impl fmt::Display for OcrEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How extracted images are referenced from the converter's markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// Images replaced by a placeholder comment.
    Placeholder,
    /// Images inlined as base64 data URIs.
    Embedded,
    /// Images written to an artifacts directory and linked.
    Referenced,
}

impl ImageMode {
    /// Name understood by the converter CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placeholder => "placeholder",
            Self::Embedded => "embedded",
            Self::Referenced => "referenced",
        }
    }
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option values for one converter run.
///
/// `ocr_engine` only matters when `enable_ocr` is set, and
/// `picture_description_prompt` only when `picture_description` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionOptions {
    /// Map table cells back onto PDF cells instead of trusting the structure model.
    pub table_cell_matching: bool,
    /// Run OCR on bitmap content.
    pub enable_ocr: bool,
    /// OCR engine choice.
    pub ocr_engine: OcrEngine,
    /// Allow the converter to call remote services.
    pub enable_remote_services: bool,
    /// Export figure images.
    pub generate_picture_images: bool,
    /// Export full-page images.
    pub generate_page_images: bool,
    /// Image render scale.
    pub images_scale: Option<f64>,
    /// Image embedding mode.
    pub image_mode: Option<ImageMode>,
    /// Generate picture descriptions with a vision-language model.
    pub picture_description: bool,
    /// Prompt for picture descriptions.
    pub picture_description_prompt: Option<String>,
}

impl ConversionOptions {
    /// Every option name with its rendered value, in declaration order.
    ///
    /// Values share one lowercase convention: `true`/`false`, converter enum
    /// names, and [`ABSENT_VALUE`] for unset options.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("table_cell_matching", self.table_cell_matching.to_string()),
            ("enable_ocr", self.enable_ocr.to_string()),
            ("ocr_engine", self.ocr_engine.to_string()),
            (
                "enable_remote_services",
                self.enable_remote_services.to_string(),
            ),
            (
                "generate_picture_images",
                self.generate_picture_images.to_string(),
            ),
            ("generate_page_images", self.generate_page_images.to_string()),
            (
                "images_scale",
                self.images_scale
                    .map(format_scale)
                    .unwrap_or_else(|| ABSENT_VALUE.to_string()),
            ),
            (
                "image_mode",
                self.image_mode
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| ABSENT_VALUE.to_string()),
            ),
            ("picture_description", self.picture_description.to_string()),
            (
                "picture_description_prompt",
                self.picture_description_prompt
                    .clone()
                    .unwrap_or_else(|| ABSENT_VALUE.to_string()),
            ),
        ]
    }
}

/// Rendering of an unset optional value.
pub const ABSENT_VALUE: &str = "none";

/// Render a scale factor with at least one fractional digit (`2.0`, `1.5`).
pub fn format_scale(scale: f64) -> String {
    format!("{scale:?}")
}

/// One named bundle of converter options under test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationRecord {
    /// Unique identifier; also the converter's output-file suffix.
    pub name: String,
    /// One-line label.
    pub description: String,
    /// Why this combination is worth testing.
    pub rationale: String,
    /// Converter option values.
    pub options: ConversionOptions,
}

impl ConfigurationRecord {
    /// Create a record.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rationale: impl Into<String>,
        options: ConversionOptions,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rationale: rationale.into(),
            options,
        }
    }
}

/// Outcome of running the converter for one configuration.
#[derive(Debug, Clone)]
pub struct RunResult<'a> {
    /// The record that produced this result.
    pub config: &'a ConfigurationRecord,
    /// Whether the converter exited with status zero.
    pub success: bool,
    /// Stdout on success; stderr or a synthesized message on failure.
    pub output: String,
    /// Wall-clock time from spawn to exit.
    pub duration: Duration,
}

impl<'a> RunResult<'a> {
    /// A successful run.
    pub fn succeeded(config: &'a ConfigurationRecord, output: String, duration: Duration) -> Self {
        Self {
            config,
            success: true,
            output,
            duration,
        }
    }

    /// A failed run.
    pub fn failed(config: &'a ConfigurationRecord, output: String, duration: Duration) -> Self {
        Self {
            config,
            success: false,
            output,
            duration,
        }
    }
}
