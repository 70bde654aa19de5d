use std::env;

use anyhow::{Context, Result};
use typing_core::DEFAULT_TEAM_DOMAINS;
use typing_persistence::connection::DEFAULT_DATABASE_URL;

pub const DEFAULT_AI_BASE_URL: &str = "https://inference.do-ai.run/v1";
pub const DEFAULT_AI_MODEL: &str = "llama3-8b-instruct";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub secret_key: Option<String>,
    /// `APP_ENV=development`; opens the admin gate.
    pub dev_mode: bool,
    pub enable_admin: bool,
    pub model_access_key: Option<String>,
    pub ai_base_url: String,
    pub ai_model: String,
    pub static_dir: String,
    pub team_email_domains: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

        let team_email_domains = match env::var("TEAM_EMAIL_DOMAINS") {
            Ok(raw) => split_list(&raw),
            Err(_) => DEFAULT_TEAM_DOMAINS.iter().map(|d| d.to_string()).collect(),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: port
                .parse()
                .with_context(|| format!("Invalid PORT: {}", port))?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            secret_key: non_empty_var("SECRET_KEY"),
            dev_mode: env::var("APP_ENV")
                .map(|value| value.eq_ignore_ascii_case("development"))
                .unwrap_or(false),
            enable_admin: env::var("ENABLE_ADMIN")
                .map(|value| parse_flag(&value))
                .unwrap_or(false),
            model_access_key: non_empty_var("MODEL_ACCESS_KEY")
                .or_else(|| non_empty_var("DIGITAL_OCEAN_MODEL_ACCESS_KEY")),
            ai_base_url: env::var("AI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_AI_BASE_URL.to_string()),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string()),
            team_email_domains,
        })
    }

    pub fn admin_enabled(&self) -> bool {
        self.dev_mode || self.enable_admin
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
