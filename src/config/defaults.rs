use super::schema::Schedule;

pub(super) fn default_page_size() -> u64 {
    100
}

pub(super) fn default_endpoint() -> String {
    "https://rds.aliyuncs.com".to_string()
}

pub(super) fn default_request_timeout_secs() -> u64 {
    30
}

pub(super) fn default_smtp_port() -> u16 {
    465
}

pub(super) fn default_subject_prefix() -> String {
    "RDS slow query digest".to_string()
}

pub(super) fn default_digest_hour() -> u8 {
    8
}

pub(super) fn default_digest_minute() -> u8 {
    0
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            enabled: false,
            hour_utc: default_digest_hour(),
            minute_utc: default_digest_minute(),
        }
    }
}
