//! Slash commands accepted next to the dialogue
//!
//! Anything that does not start with `/` is a dialogue turn.

use crate::error::{AdvisorError, Result};
use crate::intake::{parse_amount, parse_years};

/// Parsed user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show help
    Help,
    /// Show the investment catalog
    Options,
    /// Show the dialogue stage and collected values
    Status,
    /// Show the whole transcript
    History,
    /// Start a new dialogue cycle
    Reset,
    /// One-off projection that leaves the dialogue untouched
    Calc {
        amount: f64,
        target: String,
        years: u32,
    },
    /// Free-form question for the advisor
    Ask { question: String },
    /// Exit the bot
    Exit,
    /// Dialogue turn (not a command)
    Message { text: String },
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(AdvisorError::CommandError("Empty input".to_string()));
        }

        let Some(body) = input.strip_prefix('/') else {
            return Ok(Command::Message {
                text: input.to_string(),
            });
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        let Some((name, args)) = parts.split_first() else {
            return Err(AdvisorError::CommandError("Empty command".to_string()));
        };

        let cmd = name.to_lowercase();
        match cmd.as_str() {
            "help" | "h" | "?" | "مساعدة" => Ok(Command::Help),
            "options" | "o" | "خيارات" | "الخيارات" => Ok(Command::Options),
            "status" | "s" | "الحالة" => Ok(Command::Status),
            "history" | "السجل" => Ok(Command::History),
            "reset" | "r" | "جديد" => Ok(Command::Reset),
            "calc" | "c" | "احسب" => Self::parse_calc(args),
            "ask" | "اسأل" => {
                if args.is_empty() {
                    return Err(AdvisorError::CommandError(
                        "Missing question for ask command".to_string(),
                    ));
                }
                Ok(Command::Ask {
                    question: args.join(" "),
                })
            }
            "exit" | "quit" | "q" | "خروج" => Ok(Command::Exit),
            _ => Err(AdvisorError::CommandError(format!("Unknown command: {cmd}"))),
        }
    }

    /// `<amount> <target...> <years>`; the target may span several words
    fn parse_calc(args: &[&str]) -> Result<Self> {
        let [amount, target @ .., years] = args else {
            return Err(AdvisorError::CommandError(
                "Usage: /calc <amount> <target> <years>".to_string(),
            ));
        };
        if target.is_empty() {
            return Err(AdvisorError::CommandError(
                "Usage: /calc <amount> <target> <years>".to_string(),
            ));
        }

        let amount = parse_amount(amount)
            .ok_or_else(|| AdvisorError::CommandError(format!("Invalid amount: {amount}")))?;
        let years = parse_years(years)
            .ok_or_else(|| AdvisorError::CommandError(format!("Invalid number of years: {years}")))?;

        Ok(Command::Calc {
            amount,
            target: target.join(" "),
            years,
        })
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
أوامر المساعد الاستثماري
========================

  /options                       عرض خيارات الاستثمار (Investment options)
  /status                        حالة المحادثة الحالية (Dialogue status)
  /history                       سجل المحادثة (Transcript)
  /reset                         بدء حساب جديد (Start over)
  /calc <amount> <target> <years>  حساب سريع (Quick projection)
  /ask <question>                سؤال للمستشار (Ask the advisor)
  /help                          عرض المساعدة (Help)
  /exit                          خروج (Exit)

Aliases:
  /o = /options   /s = /status   /r = /reset   /c = /calc   /q = /exit
  /خيارات  /الحالة  /السجل  /جديد  /احسب  /اسأل  /مساعدة  /خروج

أي رسالة لا تبدأ بـ / تُعتبر ردّاً في المحادثة، مثل: 5000 جنيه
"
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Help => "Show help",
            Command::Options => "Show investment options",
            Command::Status => "Show dialogue status",
            Command::History => "Show transcript",
            Command::Reset => "Start a new dialogue",
            Command::Calc { .. } => "Quick profit projection",
            Command::Ask { .. } => "Ask the advisor",
            Command::Exit => "Exit the bot",
            Command::Message { .. } => "Dialogue turn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text_is_dialogue() {
        let cmd = Command::parse("  5000 جنيه ").unwrap();
        assert_eq!(
            cmd,
            Command::Message {
                text: "5000 جنيه".to_string()
            }
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/help").unwrap(), Command::Help);
        assert_eq!(Command::parse("/OPTIONS").unwrap(), Command::Options);
        assert_eq!(Command::parse("/status").unwrap(), Command::Status);
        assert_eq!(Command::parse("/history").unwrap(), Command::History);
        assert_eq!(Command::parse("/reset").unwrap(), Command::Reset);
        assert_eq!(Command::parse("/q").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_arabic_aliases() {
        assert_eq!(Command::parse("/خيارات").unwrap(), Command::Options);
        assert_eq!(Command::parse("/جديد").unwrap(), Command::Reset);
        assert_eq!(Command::parse("/خروج").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_calc() {
        let cmd = Command::parse("/calc 1000 Apple 2").unwrap();
        assert_eq!(
            cmd,
            Command::Calc {
                amount: 1000.0,
                target: "Apple".to_string(),
                years: 2
            }
        );
    }

    #[test]
    fn test_parse_calc_multi_word_target() {
        let cmd = Command::parse("/احسب ١٠٠٠ الصناديق المشتركة 3").unwrap();
        assert_eq!(
            cmd,
            Command::Calc {
                amount: 1000.0,
                target: "الصناديق المشتركة".to_string(),
                years: 3
            }
        );
    }

    #[test]
    fn test_parse_calc_errors() {
        assert!(Command::parse("/calc 1000 2").is_err());
        assert!(Command::parse("/calc abc apple 2").is_err());
        assert!(Command::parse("/calc 1000 apple 2.5").is_err());
    }

    #[test]
    fn test_parse_ask() {
        let cmd = Command::parse("/ask هل الأسهم مناسبة لي؟").unwrap();
        assert_eq!(
            cmd,
            Command::Ask {
                question: "هل الأسهم مناسبة لي؟".to_string()
            }
        );
        assert!(Command::parse("/ask").is_err());
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert!(Command::parse("/bitcoin").is_err());
        assert!(Command::parse("/").is_err());
        assert!(Command::parse("   ").is_err());
    }
}
