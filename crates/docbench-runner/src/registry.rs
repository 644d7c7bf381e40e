//! Configuration registry: the ordered set of configurations under test.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::RunnerError;
use crate::models::{ConfigurationRecord, ConversionOptions, ImageMode, OcrEngine};

const DETAILED_TECHNICAL_PROMPT: &str = "Provide a detailed technical description of this image, including any charts, diagrams, or visual elements.";

const TECHNICAL_CONTENT_PROMPT: &str = "Describe this image in detail, focusing on technical content, charts, and any textual elements.";

/// Options every built-in configuration starts from: cell matching on, no OCR,
/// figure images extracted at 2x and referenced from the markdown.
const BASE_OPTIONS: ConversionOptions = ConversionOptions {
    table_cell_matching: true,
    enable_ocr: false,
    ocr_engine: OcrEngine::Auto,
    enable_remote_services: false,
    generate_picture_images: true,
    generate_page_images: false,
    images_scale: Some(2.0),
    image_mode: Some(ImageMode::Referenced),
    picture_description: false,
    picture_description_prompt: None,
};

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| Registry {
    records: builtin_records(),
});

fn builtin_records() -> Vec<ConfigurationRecord> {
    vec![
        ConfigurationRecord::new(
            "baseline",
            "Baseline with Image Extraction",
            "Default settings with image extraction - baseline for comparison",
            BASE_OPTIONS,
        ),
        ConfigurationRecord::new(
            "no_cell_matching",
            "Disable Cell Matching + Images",
            "May fix merged column issues by using structure prediction instead of PDF cell mapping",
            ConversionOptions {
                table_cell_matching: false,
                ..BASE_OPTIONS
            },
        ),
        ConfigurationRecord::new(
            "ocr_auto",
            "OCR + Image Extraction",
            "Extract text from images using automatic OCR engine selection",
            ConversionOptions {
                enable_ocr: true,
                ..BASE_OPTIONS
            },
        ),
        ConfigurationRecord::new(
            "ocr_no_cell_matching",
            "OCR + No Cell Matching + Images",
            "Combine OCR with structure prediction approach for tables",
            ConversionOptions {
                table_cell_matching: false,
                enable_ocr: true,
                ..BASE_OPTIONS
            },
        ),
        ConfigurationRecord::new(
            "ocr_easyocr",
            "OCR (EasyOCR) + Images",
            "Test EasyOCR engine quality for image text extraction",
            ConversionOptions {
                table_cell_matching: false,
                enable_ocr: true,
                ocr_engine: OcrEngine::EasyOcr,
                ..BASE_OPTIONS
            },
        ),
        ConfigurationRecord::new(
            "ocr_mac",
            "OCR (macOS) + Images",
            "Use macOS Vision framework for OCR (may provide better results on macOS)",
            ConversionOptions {
                table_cell_matching: false,
                enable_ocr: true,
                ocr_engine: OcrEngine::Mac,
                ..BASE_OPTIONS
            },
        ),
        ConfigurationRecord::new(
            "ocr_remote_services",
            "OCR (Remote) + Images",
            "Enable remote OCR services for potentially better quality",
            ConversionOptions {
                table_cell_matching: false,
                enable_ocr: true,
                enable_remote_services: true,
                ..BASE_OPTIONS
            },
        ),
        ConfigurationRecord::new(
            "images_with_descriptions",
            "Images + AI Descriptions",
            "Extract images with AI-generated descriptions using VLM",
            ConversionOptions {
                picture_description: true,
                picture_description_prompt: Some(DETAILED_TECHNICAL_PROMPT.to_string()),
                ..BASE_OPTIONS
            },
        ),
        ConfigurationRecord::new(
            "ocr_with_descriptions",
            "OCR + Images + AI Descriptions",
            "Combine OCR text extraction with AI-powered image descriptions for comprehensive image analysis",
            ConversionOptions {
                table_cell_matching: false,
                enable_ocr: true,
                picture_description: true,
                picture_description_prompt: Some(TECHNICAL_CONTENT_PROMPT.to_string()),
                ..BASE_OPTIONS
            },
        ),
        ConfigurationRecord::new(
            "full_page_thumbnails",
            "Full-Page Thumbnails + Images",
            "Generate both figure images and full-page thumbnails for complete visual documentation",
            ConversionOptions {
                generate_page_images: true,
                ..BASE_OPTIONS
            },
        ),
        ConfigurationRecord::new(
            "ocr_easyocr_with_descriptions",
            "OCR (EasyOCR) + Images + AI Descriptions",
            "Combines EasyOCR's clean text extraction with AI-powered image descriptions for comprehensive document understanding",
            ConversionOptions {
                table_cell_matching: false,
                enable_ocr: true,
                ocr_engine: OcrEngine::EasyOcr,
                picture_description: true,
                picture_description_prompt: Some(DETAILED_TECHNICAL_PROMPT.to_string()),
                ..BASE_OPTIONS
            },
        ),
    ]
}

/// Ordered, immutable set of configurations with unique names.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    records: Vec<ConfigurationRecord>,
}

impl Registry {
    /// Build a registry, rejecting duplicate names.
    pub fn new(records: Vec<ConfigurationRecord>) -> Result<Self, RunnerError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.name.as_str()) {
                return Err(RunnerError::DuplicateConfiguration {
                    name: record.name.clone(),
                });
            }
        }
        Ok(Self { records })
    }

    /// The built-in configuration set.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Records in registry order.
    pub fn records(&self) -> &[ConfigurationRecord] {
        &self.records
    }

    /// Iterate records in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigurationRecord> {
        self.records.iter()
    }

    /// Number of configurations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry has no configurations.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look a record up by name.
    pub fn get(&self, name: &str) -> Option<&ConfigurationRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Sub-registry containing only `names`, kept in registry order.
    ///
    /// An empty `names` slice selects everything.
    pub fn select(&self, names: &[String]) -> Result<Registry, RunnerError> {
        if names.is_empty() {
            return Ok(self.clone());
        }

        if let Some(unknown) = names.iter().find(|n| self.get(n).is_none()) {
            return Err(RunnerError::UnknownConfiguration {
                name: unknown.clone(),
                available: self
                    .records
                    .iter()
                    .map(|r| r.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        let records = self
            .records
            .iter()
            .filter(|r| names.contains(&r.name))
            .cloned()
            .collect();

        Ok(Self { records })
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a ConfigurationRecord;
    type IntoIter = std::slice::Iter<'a, ConfigurationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
