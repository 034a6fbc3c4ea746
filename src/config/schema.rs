use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rds: RdsSettings,
    pub email: EmailSettings,
    #[serde(default)]
    pub schedule: Schedule,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RdsSettings {
    pub region_id: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    pub instance_ids: Vec<String>,
    pub db_name: String,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    pub from: String,
    pub to: Vec<String>,
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_digest_hour")]
    pub hour_utc: u8,
    #[serde(default = "default_digest_minute")]
    pub minute_utc: u8,
}
