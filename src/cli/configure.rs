//! Interactive credential configuration.
//!
//! On a terminal the prompts are drawn with `dialoguer` and the API secret is
//! read without echo. When stdin is piped, answers are read line by line so
//! the mode can be scripted.

use std::io::{self, BufRead, IsTerminal, Write};

use cld_lar::{ApiCredentials, CldConfig, CredentialsStore, ExportError};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

use super::output::{io_error, write_saved_credentials};

/// Values offered when the operator leaves a prompt blank.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CredentialDefaults {
    /// Previously known cloud name.
    pub cloud_name: Option<String>,
    /// Previously known API key.
    pub api_key: Option<String>,
    /// Previously known API secret.
    pub api_secret: Option<String>,
}

impl CredentialDefaults {
    /// Combines configured values with saved credentials, configured first.
    #[must_use]
    pub fn resolve(config: &CldConfig, saved: Option<&ApiCredentials>) -> Self {
        Self {
            cloud_name: non_blank(config.cloud_name.as_deref())
                .or_else(|| saved.map(|c| c.cloud_name().to_owned())),
            api_key: non_blank(config.api_key.as_deref())
                .or_else(|| saved.map(|c| c.api_key().to_owned())),
            api_secret: non_blank(config.api_secret.as_deref())
                .or_else(|| saved.map(|c| c.api_secret().to_owned())),
        }
    }
}

/// Source of answers for the credential prompts.
pub trait CredentialPrompt {
    /// Asks for a visible value. `current` is shown as a hint.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the terminal cannot be read.
    fn ask(&mut self, label: &str, current: Option<&str>) -> Result<String, ExportError>;

    /// Asks for a value that must not be echoed.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the terminal cannot be read.
    fn ask_secret(&mut self, label: &str, has_current: bool) -> Result<String, ExportError>;
}

/// Terminal prompts drawn with `dialoguer`.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl CredentialPrompt for TerminalPrompt {
    fn ask(&mut self, label: &str, current: Option<&str>) -> Result<String, ExportError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt_label(label, current))
            .allow_empty(true)
            .interact_text()
            .map_err(|error| terminal_error(&error))
    }

    fn ask_secret(&mut self, label: &str, has_current: bool) -> Result<String, ExportError> {
        Password::with_theme(&self.theme)
            .with_prompt(prompt_label(label, has_current.then_some("saved")))
            .allow_empty_password(true)
            .interact()
            .map_err(|error| terminal_error(&error))
    }
}

/// Line-oriented prompts for piped input.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    /// Reads answers from `input` and writes prompts to `output`.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, label: &str) -> Result<String, ExportError> {
        write!(self.output, "{label}: ")
            .and_then(|()| self.output.flush())
            .map_err(|e| io_error(&e))?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|e| ExportError::io("failed to read from the terminal", &e))?;
        Ok(line.trim().to_owned())
    }
}

impl<R: BufRead, W: Write> CredentialPrompt for LinePrompt<R, W> {
    fn ask(&mut self, label: &str, current: Option<&str>) -> Result<String, ExportError> {
        self.read_answer(&prompt_label(label, current))
    }

    fn ask_secret(&mut self, label: &str, has_current: bool) -> Result<String, ExportError> {
        self.read_answer(&prompt_label(label, has_current.then_some("saved")))
    }
}

/// Prompts for credentials and saves them.
///
/// # Errors
///
/// Returns [`ExportError::Configuration`] when the credentials file location
/// cannot be determined, [`ExportError::MissingCredentials`] when a prompt
/// is left blank without a known value, and [`ExportError::Io`] for terminal
/// or file failures.
pub fn run(config: &CldConfig) -> Result<(), ExportError> {
    let store = config.credentials_store()?;
    let saved = load_existing(&store);
    let defaults = CredentialDefaults::resolve(config, saved.as_ref());

    let credentials = if io::stdin().is_terminal() && io::stderr().is_terminal() {
        prompt_for_credentials(&mut TerminalPrompt::default(), &defaults)?
    } else {
        let mut prompt = LinePrompt::new(io::stdin().lock(), io::stderr().lock());
        prompt_for_credentials(&mut prompt, &defaults)?
    };

    store.save(&credentials)?;
    tracing::info!(path = %store.path(), "credentials saved");
    write_saved_credentials(&mut io::stdout().lock(), store.path())
}

/// Asks for the cloud name, API key, and API secret in turn.
///
/// A blank answer keeps the matching value from `defaults`. The saved
/// secret is never shown in the prompt.
///
/// # Errors
///
/// Returns [`ExportError::MissingCredentials`] when a field ends up blank and
/// [`ExportError::Io`] when reading or writing the terminal fails.
pub fn prompt_for_credentials<P: CredentialPrompt + ?Sized>(
    prompt: &mut P,
    defaults: &CredentialDefaults,
) -> Result<ApiCredentials, ExportError> {
    let cloud_name = keep_if_blank(
        prompt.ask("Cloud name", defaults.cloud_name.as_deref())?,
        defaults.cloud_name.as_deref(),
    );
    let api_key = keep_if_blank(
        prompt.ask("API key", defaults.api_key.as_deref())?,
        defaults.api_key.as_deref(),
    );
    let api_secret = keep_if_blank(
        prompt.ask_secret("API secret", defaults.api_secret.is_some())?,
        defaults.api_secret.as_deref(),
    );

    ApiCredentials::new(cloud_name, api_key, api_secret)
}

fn keep_if_blank(answer: String, current: Option<&str>) -> String {
    if answer.trim().is_empty() {
        current.unwrap_or_default().to_owned()
    } else {
        answer
    }
}

fn prompt_label(label: &str, hint: Option<&str>) -> String {
    hint.map_or_else(|| label.to_owned(), |shown| format!("{label} [{shown}]"))
}

fn terminal_error(error: &dialoguer::Error) -> ExportError {
    ExportError::Io {
        message: format!("failed to read from the terminal: {error}"),
    }
}

fn load_existing(store: &CredentialsStore) -> Option<ApiCredentials> {
    match store.load() {
        Ok(saved) => saved,
        Err(error) => {
            tracing::warn!(%error, "ignoring unreadable credentials file");
            None
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}
