use thiserror::Error;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_non_empty("rds.region_id", &self.rds.region_id)?;
        validate_non_empty("rds.access_key_id", &self.rds.access_key_id)?;
        validate_non_empty("rds.access_key_secret", &self.rds.access_key_secret)?;
        validate_non_empty("rds.db_name", &self.rds.db_name)?;
        validate_non_empty("rds.endpoint", &self.rds.endpoint)?;
        if self.rds.instance_ids.is_empty() {
            return Err(ConfigError::Validation(
                "rds.instance_ids must list at least one instance".to_string(),
            ));
        }
        if self
            .rds
            .instance_ids
            .iter()
            .any(|instance_id| instance_id.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "rds.instance_ids must not contain empty entries".to_string(),
            ));
        }
        if !(30..=100).contains(&self.rds.page_size) {
            return Err(ConfigError::Validation(
                "rds.page_size must be between 30 and 100".to_string(),
            ));
        }
        if self.rds.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "rds.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        validate_non_empty("email.from", &self.email.from)?;
        validate_non_empty("email.smtp_host", &self.email.smtp_host)?;
        validate_non_empty("email.username", &self.email.username)?;
        validate_non_empty("email.password", &self.email.password)?;
        if self.email.to.is_empty() {
            return Err(ConfigError::Validation(
                "email.to must list at least one recipient".to_string(),
            ));
        }
        if self
            .email
            .to
            .iter()
            .any(|recipient| recipient.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "email.to must not contain empty entries".to_string(),
            ));
        }
        if self.email.smtp_port == 0 {
            return Err(ConfigError::Validation(
                "email.smtp_port must be greater than 0".to_string(),
            ));
        }

        if self.schedule.hour_utc > 23 {
            return Err(ConfigError::Validation(
                "schedule.hour_utc must be between 0 and 23".to_string(),
            ));
        }
        if self.schedule.minute_utc > 59 {
            return Err(ConfigError::Validation(
                "schedule.minute_utc must be between 0 and 59".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}
