//! Miette-based error diagnostics for CLI error presentation.
//!
//! Converts crate errors into diagnostics with help suggestions and, for
//! TOML syntax errors, a labeled snippet of the offending config file.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use super::output;
use crate::domain::PricingError;
use crate::error::{ConfigError, Error, MarketplaceError};

/// Configuration syntax error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(pricescout::config::parse))]
pub struct ConfigSyntaxError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigSyntaxError {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: &str,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Any other CLI failure, with an optional suggestion.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(pricescout::error))]
pub struct CliError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl CliError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Build a diagnostic report for `err`.
///
/// `config_path` names the config file the failed command read, so TOML
/// syntax errors can point into it.
#[must_use]
pub fn report(err: &Error, config_path: Option<&Path>) -> miette::Report {
    if let Error::Config(ConfigError::Parse(parse)) = err {
        if let Some(diagnostic) = config_path.and_then(|path| syntax_error(parse, path)) {
            return miette::Report::new(diagnostic);
        }
    }
    miette::Report::new(CliError {
        message: err.to_string(),
        help: help_for(err),
    })
}

/// Print `err` to stderr, as a diagnostic or as a JSON error line.
pub fn emit(err: &Error, config_path: Option<&Path>) {
    if output::is_json() {
        output::error(&err.to_string());
        return;
    }
    eprintln!("{:?}", report(err, config_path));
}

fn syntax_error(err: &toml::de::Error, path: &Path) -> Option<ConfigSyntaxError> {
    let span = err.span()?;
    let content = std::fs::read_to_string(path).ok()?;
    let len = span.end.saturating_sub(span.start).max(1);
    Some(
        ConfigSyntaxError::new(
            format!("invalid config: {}", err.message()),
            &path.display().to_string(),
            content,
            span.start,
            len,
        )
        .with_help("check the TOML syntax near the highlighted location"),
    )
}

fn help_for(err: &Error) -> Option<String> {
    let help = match err {
        Error::Pricing(PricingError::InsufficientData { .. }) => {
            "broaden the search text, or retry with --no-filter if the relevance filter removed everything"
        }
        Error::Config(ConfigError::MissingField { field }) if field.starts_with("EBAY_") => {
            "set EBAY_CLIENT_ID and EBAY_CLIENT_SECRET in the environment or a .env file"
        }
        Error::Config(ConfigError::MissingField { field }) if *field == "GROQ_API_KEY" => {
            "set GROQ_API_KEY, or skip relevance filtering with --no-filter"
        }
        Error::Config(ConfigError::ReadFile(_)) => "pass an existing file with --config",
        Error::Config(_) => "run `pricescout config validate` to check the configuration",
        Error::Marketplace(MarketplaceError::Auth(_)) => {
            "check that the eBay application keys are valid for the production environment"
        }
        Error::Marketplace(MarketplaceError::Status { status: 429, .. }) => {
            "the marketplace rate limit was hit; wait before retrying"
        }
        Error::Http(_) | Error::Connection(_) => "check your network connection",
        Error::Json(_) => "listing files must hold a JSON array of listing objects",
        _ => return None,
    };
    Some(help.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn insufficient_data_has_help() {
        let err = Error::Pricing(PricingError::InsufficientData { active: 0, sold: 0 });
        let help = help_for(&err).unwrap();
        assert!(help.contains("--no-filter"));
    }

    #[test]
    fn missing_credentials_point_at_env() {
        let err = Error::Config(ConfigError::MissingField {
            field: "EBAY_CLIENT_ID",
        });
        assert!(help_for(&err).unwrap().contains("EBAY_CLIENT_SECRET"));
    }

    #[test]
    fn parse_errors_carry_a_span() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[marketplace]\nsearch_limit = \"lots\"\n").unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let parse = toml::from_str::<crate::app::Config>(&content).unwrap_err();
        let diagnostic = syntax_error(&parse, file.path()).unwrap();
        assert!(diagnostic.message.starts_with("invalid config"));
        assert!(diagnostic.span.offset() > 0);
    }

    #[test]
    fn unrelated_errors_fall_back_to_plain_message() {
        let err = Error::Parse("bad".into());
        let report = report(&err, None);
        assert_eq!(report.to_string(), "parse error: bad");
    }
}
