//! Investment advisor bot
//!
//! Ties the dialogue engine, the per-session state, the slash commands and
//! the optional completion provider into one object the CLI drives.
//!
//! # Example
//!
//! ```rust,ignore
//! use invest_core::bot::{AdvisorBot, BotConfig, BotOutput};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut bot = AdvisorBot::new(BotConfig::default())?;
//!     println!("{}", bot.start());
//!     if let BotOutput::Reply(text) = bot.process_input("5000 جنيه").await? {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;

use crate::calculator::compound_profit;
use crate::config::AdvisorConfig;
use crate::dialogue::{replies, DialogueEngine};
use crate::error::{AdvisorError, Result};
use crate::interface::{ChatMessage, Formatter, FormatterFactory, Origin, OutputFormat, Session, Theme};
use invest_llm::{CompletionRequest, LLMProvider, Message};
use std::sync::Arc;
use tracing::{debug, info};

pub use commands::Command;

/// Configuration for the advisor bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Dialogue and advisor settings
    pub advisor_config: AdvisorConfig,
    /// Welcome message
    pub welcome_message: String,
    /// Prompt prefix
    pub prompt: String,
    /// How replies are rendered
    pub output_format: OutputFormat,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            advisor_config: AdvisorConfig::default(),
            welcome_message: "💰 المساعد الاستثماري - اكتب /help لعرض الأوامر".to_string(),
            prompt: ">>> ".to_string(),
            output_format: OutputFormat::Cli,
        }
    }
}

impl BotConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let advisor_config = AdvisorConfig::builder().with_env().build()?;

        Ok(Self {
            advisor_config,
            ..Default::default()
        })
    }

    /// Create a builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    advisor_config: Option<AdvisorConfig>,
    welcome_message: Option<String>,
    prompt: Option<String>,
    output_format: Option<OutputFormat>,
}

impl BotConfigBuilder {
    /// Set advisor config
    pub fn advisor_config(mut self, config: AdvisorConfig) -> Self {
        self.advisor_config = Some(config);
        self
    }

    /// Set welcome message
    pub fn welcome_message(mut self, msg: impl Into<String>) -> Self {
        self.welcome_message = Some(msg.into());
        self
    }

    /// Set prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set output format
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Build the config
    pub fn build(self) -> BotConfig {
        let defaults = BotConfig::default();
        BotConfig {
            advisor_config: self.advisor_config.unwrap_or(defaults.advisor_config),
            welcome_message: self.welcome_message.unwrap_or(defaults.welcome_message),
            prompt: self.prompt.unwrap_or(defaults.prompt),
            output_format: self.output_format.unwrap_or(defaults.output_format),
        }
    }
}

/// What the surface should do with a processed input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotOutput {
    /// Rendered text to show
    Reply(String),
    /// The user asked to leave
    Exit,
}

/// Investment advisor bot
pub struct AdvisorBot {
    engine: DialogueEngine,
    session: Session,
    provider: Option<Arc<dyn LLMProvider>>,
    formatter: Box<dyn Formatter>,
    config: BotConfig,
}

impl AdvisorBot {
    /// Create a bot without advisor mode.
    ///
    /// Fails when the configuration is invalid or the catalog file cannot be
    /// loaded; a missing theme file is not an error.
    pub fn new(config: BotConfig) -> Result<Self> {
        let advisor = &config.advisor_config;
        advisor.validate()?;

        let catalog = advisor.load_catalog()?;
        let theme = Theme::load_optional(advisor.theme_path.as_deref());
        let engine = DialogueEngine::new(Arc::new(catalog))
            .with_default_currency(advisor.default_currency.clone());
        let formatter = FormatterFactory::create(config.output_format, theme);

        Ok(Self {
            engine,
            session: Session::new(),
            provider: None,
            formatter,
            config,
        })
    }

    /// Create a bot with advisor mode backed by `provider`
    pub fn with_provider(provider: Arc<dyn LLMProvider>, config: BotConfig) -> Result<Self> {
        let mut bot = Self::new(config)?;
        info!(provider = provider.name(), "Advisor mode enabled");
        bot.provider = Some(provider);
        Ok(bot)
    }

    /// Get the welcome message
    pub fn welcome(&self) -> &str {
        &self.config.welcome_message
    }

    /// Get the prompt
    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }

    pub fn has_advisor(&self) -> bool {
        self.provider.is_some()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    /// Post the opening question and return it rendered
    pub fn start(&mut self) -> String {
        let mark = self.session.transcript().len();
        self.session.start(&self.engine);
        self.render_since(mark)
    }

    /// Render an error the way the active formatter shows errors
    pub fn format_error(&self, error: &AdvisorError) -> String {
        self.formatter.format_error(&error.to_string())
    }

    /// Process user input and return a response
    pub async fn process_input(&mut self, input: &str) -> Result<BotOutput> {
        let command = Command::parse(input)?;
        self.execute_command(command).await
    }

    /// Execute a parsed command
    pub async fn execute_command(&mut self, command: Command) -> Result<BotOutput> {
        debug!(command = command.description(), "Executing command");

        let reply = match command {
            Command::Message { text } => {
                // Skip the user's own line when echoing back.
                let mark = self.session.transcript().len() + 1;
                self.session.submit(&self.engine, &text);
                self.render_since(mark)
            }
            Command::Help => Command::help_text().to_string(),
            Command::Options => self.formatter.format_catalog(self.engine.catalog()),
            Command::Status => self.status(),
            Command::History => {
                if self.session.transcript().is_empty() {
                    "السجل فارغ.".to_string()
                } else {
                    self.formatter.format_transcript(self.session.transcript())
                }
            }
            Command::Reset => {
                let mark = self.session.transcript().len();
                self.session.reset(&self.engine);
                self.render_since(mark)
            }
            Command::Calc {
                amount,
                target,
                years,
            } => self.calc(amount, &target, years)?,
            Command::Ask { question } => self.ask(question).await?,
            Command::Exit => return Ok(BotOutput::Exit),
        };

        Ok(BotOutput::Reply(reply))
    }

    fn render_since(&self, index: usize) -> String {
        self.formatter
            .format_messages(self.session.transcript().since(index))
    }

    fn status(&self) -> String {
        let mut status = replies::state_summary(self.session.state(), self.engine.catalog());
        if self.has_advisor() {
            status.push_str(&format!("\nالرموز المستخدمة: {}", self.session.token_count()));
        }
        status
    }

    fn calc(&self, amount: f64, target: &str, years: u32) -> Result<String> {
        let catalog = self.engine.catalog();
        let entry = catalog
            .lookup(target)
            .and_then(|id| catalog.get(&id))
            .ok_or_else(|| AdvisorError::CommandError(format!("Unsupported target: {target}")))?;

        let profit = compound_profit(amount, entry.annual_rate, years);
        Ok(replies::profit_summary(
            entry,
            amount,
            self.engine.default_currency(),
            years,
            profit,
        ))
    }

    fn system_prompt(&self) -> String {
        let keys: Vec<&str> = self
            .engine
            .catalog()
            .entries()
            .iter()
            .map(|entry| entry.key.as_str())
            .collect();

        format!(
            "أنت مستشار استثمار ودود. أجب باللغة العربية وباختصار، ولا تقدّم وعوداً بأرباح مضمونة.\n\n\
             حالة المحادثة الحالية:\n{}\n\nالخيارات المتاحة: {}",
            replies::state_summary(self.session.state(), self.engine.catalog()),
            keys.join("، ")
        )
    }

    async fn ask(&mut self, question: String) -> Result<String> {
        let provider = self
            .provider
            .clone()
            .ok_or(AdvisorError::AdvisorUnavailable)?;
        let advisor = &self.config.advisor_config;

        let context: Vec<Message> = self
            .session
            .transcript()
            .last(advisor.context_window)
            .iter()
            .map(|message| match message.origin {
                Origin::User => Message::user(message.text.as_str()),
                Origin::Bot => Message::assistant(message.text.as_str()),
            })
            .collect();

        let request = CompletionRequest::new(advisor.model.as_str())
            .with_system(self.system_prompt())
            .with_context(context)
            .with_question(question.as_str())
            .with_max_tokens(advisor.max_tokens)
            .with_temperature(advisor.temperature);

        debug!(
            provider = provider.name(),
            model = %request.model,
            messages = request.messages.len(),
            "Sending advisor question"
        );

        let response = provider.complete(request).await?;
        if response.was_truncated() {
            debug!("Advisor answer hit the token cap");
        }
        let answer = response.text().to_string();
        self.session.record_exchange(&question, &answer, response.usage);

        debug!(tokens = self.session.token_count(), "Advisor answered");
        Ok(self.formatter.format_message(&ChatMessage::bot(answer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::DialogueStage;
    use async_trait::async_trait;
    use invest_llm::{CompletionResponse, StopReason, TokenUsage};
    use mockall::mock;

    mock! {
        Provider {}

        #[async_trait]
        impl LLMProvider for Provider {
            async fn complete(&self, request: CompletionRequest) -> invest_llm::Result<CompletionResponse>;
            fn name(&self) -> &'static str;
        }
    }

    fn answer(text: &str, input_tokens: usize, output_tokens: usize) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::Finished,
            usage: TokenUsage {
                input_tokens,
                output_tokens,
            },
        }
    }

    fn reply(output: BotOutput) -> String {
        match output {
            BotOutput::Reply(text) => text,
            BotOutput::Exit => panic!("unexpected exit"),
        }
    }

    #[test]
    fn test_bot_config_default() {
        let config = BotConfig::default();
        assert!(!config.welcome_message.is_empty());
        assert_eq!(config.prompt, ">>> ");
        assert_eq!(config.output_format, OutputFormat::Cli);
    }

    #[test]
    fn test_bot_config_builder() {
        let config = BotConfig::builder()
            .prompt("$ ")
            .output_format(OutputFormat::Markdown)
            .build();

        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.output_format, OutputFormat::Markdown);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = BotConfig::default();
        config.advisor_config.context_window = 0;
        assert!(AdvisorBot::new(config).is_err());
    }

    #[tokio::test]
    async fn test_full_dialogue_through_bot() {
        let mut bot = AdvisorBot::new(BotConfig::default()).unwrap();
        assert!(!bot.start().is_empty());

        bot.process_input("5000 جنيه").await.unwrap();
        bot.process_input("Apple").await.unwrap();
        bot.process_input("1000").await.unwrap();
        let summary = reply(bot.process_input("2").await.unwrap());

        assert!(summary.contains("254.40"));
        assert_eq!(bot.session().state().stage(), DialogueStage::Complete);
    }

    #[tokio::test]
    async fn test_dialogue_reply_omits_user_echo() {
        let mut bot = AdvisorBot::new(BotConfig::default()).unwrap();
        bot.start();

        let text = reply(bot.process_input("5000 جنيه").await.unwrap());
        assert!(!text.contains("أنت:"));
    }

    #[tokio::test]
    async fn test_calc_leaves_dialogue_alone() {
        let mut bot = AdvisorBot::new(BotConfig::default()).unwrap();
        bot.start();
        let before = bot.session().transcript().len();

        let text = reply(bot.process_input("/calc 1000 apple 2").await.unwrap());

        assert!(text.contains("254.40"));
        assert_eq!(bot.session().state().stage(), DialogueStage::AwaitingSalary);
        assert_eq!(bot.session().transcript().len(), before);
        assert!(bot.process_input("/calc 1000 bitcoin 2").await.is_err());
    }

    #[tokio::test]
    async fn test_reset_and_exit() {
        let mut bot = AdvisorBot::new(BotConfig::default()).unwrap();
        bot.start();
        bot.process_input("5000").await.unwrap();

        bot.process_input("/reset").await.unwrap();
        assert_eq!(bot.session().state().stage(), DialogueStage::AwaitingSalary);

        assert_eq!(bot.process_input("/exit").await.unwrap(), BotOutput::Exit);
    }

    #[tokio::test]
    async fn test_options_and_status() {
        let mut bot = AdvisorBot::new(BotConfig::default()).unwrap();
        bot.start();

        let options = reply(bot.process_input("/options").await.unwrap());
        assert!(options.contains("apple"));

        bot.process_input("5000 دولار").await.unwrap();
        let status = reply(bot.process_input("/status").await.unwrap());
        assert!(status.contains("5000 دولار"));
    }

    #[tokio::test]
    async fn test_ask_without_provider() {
        let mut bot = AdvisorBot::new(BotConfig::default()).unwrap();
        let err = bot.process_input("/ask hello").await.unwrap_err();
        assert!(matches!(err, AdvisorError::AdvisorUnavailable));
    }

    #[tokio::test]
    async fn test_ask_sends_context_and_counts_tokens() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_complete()
            .withf(|request| {
                request.messages.len() == 3
                    && request.question() == Some("هل هذا مناسب؟")
                    && request
                        .system
                        .as_deref()
                        .is_some_and(|system| system.contains("بانتظار اختيار الاستثمار"))
            })
            .times(1)
            .returning(|_| Ok(answer("نعم", 20, 10)));

        let config = BotConfig::builder()
            .advisor_config(AdvisorConfig::builder().context_window(2).build().unwrap())
            .build();
        let mut bot = AdvisorBot::with_provider(Arc::new(provider), config).unwrap();
        bot.start();
        bot.process_input("5000 جنيه").await.unwrap();

        let text = reply(bot.process_input("/ask هل هذا مناسب؟").await.unwrap());

        assert!(text.contains("نعم"));
        assert_eq!(bot.session().token_count(), 30);
        assert_eq!(bot.session().state().stage(), DialogueStage::AwaitingTarget);
    }

    #[tokio::test]
    async fn test_ask_provider_failure() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_complete()
            .returning(|_| Err(invest_llm::LLMError::RateLimited("slow down".to_string())));

        let mut bot = AdvisorBot::with_provider(Arc::new(provider), BotConfig::default()).unwrap();
        let err = bot.process_input("/ask x").await.unwrap_err();

        assert!(matches!(err, AdvisorError::LlmError(_)));
        assert_eq!(bot.session().token_count(), 0);
        assert!(bot.session().transcript().is_empty());
    }
}
