//! Response formatting utilities

use crate::catalog::{InvestmentCatalog, TargetKind};
use crate::interface::message::{ChatMessage, Origin, Transcript};
use crate::interface::theme::Theme;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::Table;
use serde::{Deserialize, Serialize};

/// Output style of the surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain terminal output
    #[default]
    Cli,
    /// Markdown, for piping into a renderer
    Markdown,
}

pub trait Formatter: Send + Sync {
    fn output_format(&self) -> OutputFormat;
    fn format_message(&self, message: &ChatMessage) -> String;
    fn format_catalog(&self, catalog: &InvestmentCatalog) -> String;
    fn format_error(&self, error: &str) -> String;

    fn format_messages(&self, messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|message| self.format_message(message))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_transcript(&self, transcript: &Transcript) -> String {
        self.format_messages(transcript.messages())
    }
}

fn kind_label(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::AssetClass => "فئة أصول",
        TargetKind::Company => "شركة",
    }
}

fn catalog_table(catalog: &InvestmentCatalog, preset: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(preset)
        .set_header(vec!["الاسم", "النوع", "العائد السنوي", "المخاطرة"]);

    for entry in catalog.entries() {
        table.add_row(vec![
            entry.key.clone(),
            kind_label(entry.kind).to_string(),
            format!("{:.1}%", entry.rate_percent()),
            entry.risk_note.clone(),
        ]);
    }
    table
}

pub struct CliFormatter {
    theme: Theme,
}

impl CliFormatter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Formatter for CliFormatter {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Cli
    }

    fn format_message(&self, message: &ChatMessage) -> String {
        let prefix = match message.origin {
            Origin::User => &self.theme.user_prefix,
            Origin::Bot => &self.theme.bot_prefix,
        };
        format!("{prefix} {}", message.text)
    }

    fn format_catalog(&self, catalog: &InvestmentCatalog) -> String {
        catalog_table(catalog, UTF8_FULL).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("{} {error}", self.theme.error_prefix)
    }
}

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn format_message(&self, message: &ChatMessage) -> String {
        let speaker = match message.origin {
            Origin::User => "أنت",
            Origin::Bot => "المساعد",
        };
        format!("**{speaker}:** {}", message.text)
    }

    fn format_catalog(&self, catalog: &InvestmentCatalog) -> String {
        catalog_table(catalog, ASCII_MARKDOWN).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("> ❌ **خطأ:** {error}")
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(format: OutputFormat, theme: Theme) -> Box<dyn Formatter> {
        match format {
            OutputFormat::Cli => Box::new(CliFormatter::new(theme)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_message_prefix() {
        let formatter = CliFormatter::new(Theme::default());
        let line = formatter.format_message(&ChatMessage::user("5000"));
        assert!(line.starts_with(&Theme::default().user_prefix));
        assert!(line.ends_with("5000"));
    }

    #[test]
    fn test_markdown_message() {
        let line = MarkdownFormatter.format_message(&ChatMessage::bot("مرحباً"));
        assert_eq!(line, "**المساعد:** مرحباً");
    }

    #[test]
    fn test_catalog_table_has_every_entry() {
        let catalog = InvestmentCatalog::builtin();
        for formatter in [
            FormatterFactory::create(OutputFormat::Cli, Theme::default()),
            FormatterFactory::create(OutputFormat::Markdown, Theme::default()),
        ] {
            let table = formatter.format_catalog(&catalog);
            for entry in catalog.entries() {
                assert!(table.contains(&entry.key), "{} missing", entry.key);
            }
            assert!(table.contains("12.0%"));
        }
    }

    #[test]
    fn test_transcript_rendering_order() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::bot("first"));
        transcript.push(ChatMessage::user("second"));

        let rendered = MarkdownFormatter.format_transcript(&transcript);
        let first = rendered.find("first").unwrap();
        let second = rendered.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_factory_picks_format() {
        let formatter = FormatterFactory::create(OutputFormat::Markdown, Theme::default());
        assert_eq!(formatter.output_format(), OutputFormat::Markdown);
        assert!(formatter.format_error("x").contains("خطأ"));
    }
}
