//! Converter command-line construction.
//!
//! Option-to-token mapping is an ordered rule table: each rule names the
//! option it covers, when it fires, and what it emits. The builder is pure and
//! never touches the filesystem or spawns anything.

use std::fmt;
use std::path::Path;

use docbench_core::config::converter::ConverterConfig;
use tracing::trace;

use crate::models::{ConfigurationRecord, ConversionOptions, format_scale};

/// A fully built converter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable to spawn.
    pub program: String,
    /// Arguments, converter prefix first.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Program followed by arguments.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }

    /// Whether `flag` is immediately followed by `value`.
    pub fn has_pair(&self, flag: &str, value: &str) -> bool {
        self.args.windows(2).any(|w| w[0] == flag && w[1] == value)
    }

    /// Whether `token` appears anywhere in the arguments.
    pub fn contains(&self, token: &str) -> bool {
        self.args.iter().any(|a| a == token)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.tokens().collect();
        f.write_str(&joined.join(" "))
    }
}

/// One row of the option mapping.
struct OptionRule {
    /// Option the rule covers.
    option: &'static str,
    /// Whether the rule emits anything for these options.
    applies: fn(&ConversionOptions) -> bool,
    /// Tokens appended when the rule applies.
    emit: fn(&ConversionOptions, &mut Vec<String>),
}

const OPTION_RULES: &[OptionRule] = &[
    OptionRule {
        option: "table_cell_matching",
        applies: always,
        emit: emit_cell_matching,
    },
    OptionRule {
        option: "enable_ocr",
        applies: ocr_enabled,
        emit: emit_ocr,
    },
    OptionRule {
        option: "enable_remote_services",
        applies: remote_services_enabled,
        emit: emit_remote_services,
    },
    OptionRule {
        option: "generate_picture_images",
        applies: picture_images_enabled,
        emit: emit_picture_images,
    },
    OptionRule {
        option: "generate_page_images",
        applies: page_images_enabled,
        emit: emit_page_images,
    },
    OptionRule {
        option: "images_scale",
        applies: has_images_scale,
        emit: emit_images_scale,
    },
    OptionRule {
        option: "image_mode",
        applies: has_image_mode,
        emit: emit_image_mode,
    },
    OptionRule {
        option: "picture_description",
        applies: picture_description_enabled,
        emit: emit_picture_description,
    },
];

fn always(_: &ConversionOptions) -> bool {
    true
}

fn ocr_enabled(o: &ConversionOptions) -> bool {
    o.enable_ocr
}

fn remote_services_enabled(o: &ConversionOptions) -> bool {
    o.enable_remote_services
}

fn picture_images_enabled(o: &ConversionOptions) -> bool {
    o.generate_picture_images
}

fn page_images_enabled(o: &ConversionOptions) -> bool {
    o.generate_page_images
}

fn has_images_scale(o: &ConversionOptions) -> bool {
    o.images_scale.is_some()
}

fn has_image_mode(o: &ConversionOptions) -> bool {
    o.image_mode.is_some()
}

fn picture_description_enabled(o: &ConversionOptions) -> bool {
    o.picture_description
}

fn emit_cell_matching(o: &ConversionOptions, out: &mut Vec<String>) {
    out.push("--table-cell-matching".to_string());
    out.push(o.table_cell_matching.to_string());
}

fn emit_ocr(o: &ConversionOptions, out: &mut Vec<String>) {
    out.push("--enable-ocr".to_string());
    out.push("--ocr-engine".to_string());
    out.push(o.ocr_engine.to_string());
}

fn emit_remote_services(_: &ConversionOptions, out: &mut Vec<String>) {
    out.push("--enable-remote-services".to_string());
}

fn emit_picture_images(_: &ConversionOptions, out: &mut Vec<String>) {
    out.push("--generate-picture-images".to_string());
}

fn emit_page_images(_: &ConversionOptions, out: &mut Vec<String>) {
    out.push("--generate-page-images".to_string());
}

fn emit_images_scale(o: &ConversionOptions, out: &mut Vec<String>) {
    if let Some(scale) = o.images_scale {
        out.push("--images-scale".to_string());
        out.push(format_scale(scale));
    }
}

fn emit_image_mode(o: &ConversionOptions, out: &mut Vec<String>) {
    if let Some(mode) = o.image_mode {
        out.push("--image-mode".to_string());
        out.push(mode.to_string());
    }
}

fn emit_picture_description(o: &ConversionOptions, out: &mut Vec<String>) {
    out.push("--picture-description".to_string());
    // An empty prompt means "use the converter's default prompt".
    if let Some(prompt) = o.picture_description_prompt.as_deref().filter(|p| !p.is_empty()) {
        out.push("--picture-description-prompt".to_string());
        out.push(prompt.to_string());
    }
}

/// Tokens for the option portion of a command line.
pub fn option_tokens(options: &ConversionOptions) -> Vec<String> {
    let mut out = Vec::new();
    for rule in OPTION_RULES {
        if (rule.applies)(options) {
            let start = out.len();
            (rule.emit)(options, &mut out);
            trace!(option = rule.option, tokens = ?&out[start..], "Option rule applied");
        }
    }
    out
}

/// Builds converter invocations from configuration records.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    base_args: Vec<String>,
}

impl CommandBuilder {
    /// Create a builder for `program` with leading `base_args`.
    pub fn new(program: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    /// Create a builder from the converter configuration section.
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    /// Build the invocation for one record.
    pub fn build(
        &self,
        record: &ConfigurationRecord,
        input: &Path,
        output_dir: &Path,
    ) -> CommandLine {
        let mut args = self.base_args.clone();
        args.push(input.to_string_lossy().into_owned());
        args.push("--output-dir".to_string());
        args.push(output_dir.to_string_lossy().into_owned());
        args.push("--no-print".to_string());

        args.extend(option_tokens(&record.options));

        args.push("--config-name".to_string());
        args.push(record.name.clone());

        CommandLine {
            program: self.program.clone(),
            args,
        }
    }
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::from_config(&ConverterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageMode, OcrEngine};
    use crate::registry::Registry;
    use std::path::PathBuf;

    fn options() -> ConversionOptions {
        ConversionOptions {
            table_cell_matching: true,
            enable_ocr: false,
            ocr_engine: OcrEngine::Auto,
            enable_remote_services: false,
            generate_picture_images: false,
            generate_page_images: false,
            images_scale: None,
            image_mode: None,
            picture_description: false,
            picture_description_prompt: None,
        }
    }

    fn build(options: ConversionOptions) -> CommandLine {
        let record = ConfigurationRecord::new("sample", "Sample", "test", options);
        CommandBuilder::default().build(
            &record,
            Path::new("docs/sample.pdf"),
            Path::new("out"),
        )
    }

    #[test]
    fn test_full_layout_for_baseline() {
        let record = Registry::builtin().get("baseline").expect("baseline");
        let cmd = CommandBuilder::default().build(
            record,
            Path::new("docling_poc.pdf"),
            Path::new("./output"),
        );
        assert_eq!(
            cmd.to_string(),
            "python docling_test.py docling_poc.pdf --output-dir ./output --no-print \
             --table-cell-matching true --generate-picture-images --images-scale 2.0 \
             --image-mode referenced --config-name baseline"
        );
    }

    #[test]
    fn test_cell_matching_on_without_ocr() {
        let cmd = build(options());
        assert!(cmd.has_pair("--table-cell-matching", "true"));
        assert!(!cmd.contains("--enable-ocr"));
        assert!(!cmd.contains("--ocr-engine"));
    }

    #[test]
    fn test_cell_matching_off_is_explicit() {
        let cmd = build(ConversionOptions {
            table_cell_matching: false,
            ..options()
        });
        assert!(cmd.has_pair("--table-cell-matching", "false"));
    }

    #[test]
    fn test_ocr_engine_adjacent() {
        let cmd = build(ConversionOptions {
            enable_ocr: true,
            ocr_engine: OcrEngine::EasyOcr,
            ..options()
        });
        assert!(cmd.contains("--enable-ocr"));
        assert!(cmd.has_pair("--ocr-engine", "easyocr"));
        let ocr_pos = cmd.args.iter().position(|a| a == "--enable-ocr").expect("flag");
        assert_eq!(cmd.args[ocr_pos + 1], "--ocr-engine");
    }

    #[test]
    fn test_description_without_prompt() {
        let cmd = build(ConversionOptions {
            picture_description: true,
            picture_description_prompt: None,
            ..options()
        });
        assert!(cmd.contains("--picture-description"));
        assert!(!cmd.contains("--picture-description-prompt"));
    }

    #[test]
    fn test_description_with_empty_prompt() {
        let cmd = build(ConversionOptions {
            picture_description: true,
            picture_description_prompt: Some(String::new()),
            ..options()
        });
        assert!(cmd.contains("--picture-description"));
        assert!(!cmd.contains("--picture-description-prompt"));
    }

    #[test]
    fn test_prompt_ignored_when_description_disabled() {
        let cmd = build(ConversionOptions {
            picture_description: false,
            picture_description_prompt: Some("Describe".to_string()),
            ..options()
        });
        assert!(!cmd.contains("--picture-description"));
        assert!(!cmd.contains("--picture-description-prompt"));
    }

    #[test]
    fn test_description_prompt_is_single_token() {
        let cmd = build(ConversionOptions {
            picture_description: true,
            picture_description_prompt: Some("Describe the chart axes.".to_string()),
            ..options()
        });
        assert!(cmd.has_pair("--picture-description-prompt", "Describe the chart axes."));
    }

    #[test]
    fn test_scale_and_mode_emitted_without_image_generation() {
        let cmd = build(ConversionOptions {
            images_scale: Some(1.5),
            image_mode: Some(ImageMode::Embedded),
            ..options()
        });
        assert!(cmd.has_pair("--images-scale", "1.5"));
        assert!(cmd.has_pair("--image-mode", "embedded"));
        assert!(!cmd.contains("--generate-picture-images"));
    }

    #[test]
    fn test_independent_image_toggles() {
        let cmd = build(ConversionOptions {
            generate_picture_images: true,
            generate_page_images: true,
            enable_remote_services: true,
            ..options()
        });
        assert!(cmd.contains("--generate-picture-images"));
        assert!(cmd.contains("--generate-page-images"));
        assert!(cmd.contains("--enable-remote-services"));
    }

    #[test]
    fn test_config_name_is_last() {
        let cmd = build(options());
        let n = cmd.args.len();
        assert_eq!(cmd.args[n - 2], "--config-name");
        assert_eq!(cmd.args[n - 1], "sample");
    }

    #[test]
    fn test_invariants_hold_for_every_builtin() {
        let builder = CommandBuilder::new("convert", Vec::new());
        let input = PathBuf::from("in/report.pdf");
        let output = PathBuf::from("out/dir");

        for record in Registry::builtin() {
            let cmd = builder.build(record, &input, &output);
            assert_eq!(cmd.args[0], "in/report.pdf", "{}", record.name);
            assert!(cmd.has_pair("--output-dir", "out/dir"), "{}", record.name);
            assert!(cmd.contains("--no-print"), "{}", record.name);
            assert!(
                cmd.has_pair("--table-cell-matching", "true")
                    || cmd.has_pair("--table-cell-matching", "false"),
                "{}",
                record.name
            );
            assert_eq!(
                cmd.contains("--enable-ocr"),
                cmd.contains("--ocr-engine"),
                "{}",
                record.name
            );
            if cmd.contains("--picture-description-prompt") {
                assert!(cmd.contains("--picture-description"), "{}", record.name);
            }
        }
    }

    #[test]
    fn test_rule_table_order() {
        let names: Vec<&str> = OPTION_RULES.iter().map(|r| r.option).collect();
        assert_eq!(names.first(), Some(&"table_cell_matching"));
        assert_eq!(names.last(), Some(&"picture_description"));
        assert_eq!(names.len(), 8);
    }
}
