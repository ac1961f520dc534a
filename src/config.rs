use std::ops::RangeInclusive;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_PERMITTED_EMAIL_DOMAINS: &str = "purdue.edu,alumni.purdue.edu";
const DEFAULT_CODE_DIGITS: u32 = 6;
const MIN_CODE_DIGITS: u32 = 4;
const MAX_CODE_DIGITS: u32 = 9;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub guild: GuildConfig,
    pub verification: VerificationConfig,
    pub smtp: SmtpConfig,
}

/// Snowflakes of the guild resources the bot manages.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildConfig {
    pub guild_id: u64,
    /// Category new ticket channels are created under.
    pub ticket_category_id: u64,
    /// Channel receiving audit log embeds.
    pub log_channel_id: u64,
    /// Role granted after successful email verification.
    pub affiliation_role_id: u64,
    /// Role for members outside the institution, exclusive with the affiliation role.
    pub non_affiliation_role_id: u64,
    /// Esports position roles that are granted through tickets.
    pub esports_role_ids: Vec<u64>,
}

/// Rules for the email verification flow.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationConfig {
    /// Lower-cased domains an address may belong to, without the leading `@`.
    pub permitted_domains: Vec<String>,
    /// Number of digits in a one-time code.
    pub code_digits: u32,
}

impl VerificationConfig {
    /// Inclusive range one-time codes are drawn from.
    ///
    /// The lower bound has a non-zero leading digit so every code has exactly
    /// `code_digits` digits and the `0` sentinel can never be issued.
    pub fn code_range(&self) -> RangeInclusive<i32> {
        let min = 10_i32.pow(self.code_digits - 1);
        let max = 10_i32.pow(self.code_digits) - 1;
        min..=max
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            permitted_domains: parse_list(DEFAULT_PERMITTED_EMAIL_DOMAINS),
            code_digits: DEFAULT_CODE_DIGITS,
        }
    }
}

pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender address, defaults to the SMTP username.
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let smtp_username = required("SMTP_USERNAME")?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            guild: GuildConfig {
                guild_id: required_id("DISCORD_GUILD_ID")?,
                ticket_category_id: required_id("TICKET_CATEGORY_ID")?,
                log_channel_id: required_id("LOG_CHANNEL_ID")?,
                affiliation_role_id: required_id("AFFILIATION_ROLE_ID")?,
                non_affiliation_role_id: required_id("NON_AFFILIATION_ROLE_ID")?,
                esports_role_ids: parse_id_list(
                    "ESPORTS_ROLE_IDS",
                    &required("ESPORTS_ROLE_IDS")?,
                )?,
            },
            verification: VerificationConfig {
                permitted_domains: parse_list(
                    &std::env::var("PERMITTED_EMAIL_DOMAINS")
                        .unwrap_or_else(|_| DEFAULT_PERMITTED_EMAIL_DOMAINS.to_string()),
                ),
                code_digits: match std::env::var("VERIFICATION_CODE_DIGITS") {
                    Ok(value) => parse_code_digits(&value)?,
                    Err(_) => DEFAULT_CODE_DIGITS,
                },
            },
            smtp: SmtpConfig {
                host: required("SMTP_HOST")?,
                password: required("SMTP_PASSWORD")?,
                from: std::env::var("SMTP_FROM").unwrap_or_else(|_| smtp_username.clone()),
                username: smtp_username,
            },
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn required_id(name: &str) -> Result<u64, ConfigError> {
    parse_id(name, &required(name)?)
}

fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: format!("'{}' is not a Discord id: {}", value, e),
        })
}

fn parse_id_list(name: &str, value: &str) -> Result<Vec<u64>, ConfigError> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_id(name, part))
        .collect()
}

/// Splits a comma separated list, lower-casing entries and stripping a leading `@`.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.trim().trim_start_matches('@').to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_code_digits(value: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: "VERIFICATION_CODE_DIGITS".to_string(),
        reason,
    };

    let digits = value
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid(e.to_string()))?;

    if !(MIN_CODE_DIGITS..=MAX_CODE_DIGITS).contains(&digits) {
        return Err(invalid(format!(
            "must be between {} and {}",
            MIN_CODE_DIGITS, MAX_CODE_DIGITS
        )));
    }

    Ok(digits)
}
