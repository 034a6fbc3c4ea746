use std::time::Duration;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::config::RdsSettings;

use super::model::{ApiErrorEnvelope, DescribeSlowLogsResponse};
use super::signature::{
    canonicalized_query, percent_encode_component, sign_request, SignatureError,
};

const API_VERSION: &str = "2014-08-15";
const ACTION_DESCRIBE_SLOW_LOGS: &str = "DescribeSlowLogs";
const SORT_KEY: &str = "TotalExecutionCounts";
const USER_AGENT: &str = concat!("slowlog-digest/", env!("CARGO_PKG_VERSION"));
const ERROR_BODY_LOG_LIMIT: usize = 512;

#[derive(Debug, Error)]
pub enum RdsError {
    #[error("http client build failed: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request signing failed: {0}")]
    Signature(#[from] SignatureError),
    #[error("api error {code}: {message} (request id: {request_id})")]
    Api {
        code: String,
        message: String,
        request_id: String,
    },
    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl RdsError {
    #[cfg(test)]
    pub(crate) fn mock_unknown_instance(instance_id: &str) -> Self {
        RdsError::Api {
            code: "InvalidDBInstanceId.NotFound".to_string(),
            message: format!("instance {} not found", instance_id),
            request_id: "mock".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct RdsClient {
    http: reqwest::Client,
    endpoint: String,
    region_id: String,
    access_key_id: String,
    access_key_secret: String,
    page_size: u64,
}

impl RdsClient {
    pub fn from_config(settings: &RdsSettings) -> Result<Self, RdsError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(RdsError::ClientBuild)?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            region_id: settings.region_id.clone(),
            access_key_id: settings.access_key_id.clone(),
            access_key_secret: settings.access_key_secret.clone(),
            page_size: settings.page_size,
        })
    }

    /// Fetch one page of slow-log entries for `instance_id` covering `day`.
    /// StartTime and EndTime are the same calendar day, as the API expects.
    pub async fn describe_slow_logs_page(
        &self,
        instance_id: &str,
        db_name: &str,
        day: NaiveDate,
        page_number: u64,
    ) -> Result<DescribeSlowLogsResponse, RdsError> {
        let day_param = format!("{}Z", day.format("%Y-%m-%d"));

        let mut params = self.common_params();
        params.push((
            "Action".to_string(),
            ACTION_DESCRIBE_SLOW_LOGS.to_string(),
        ));
        params.push(("DBInstanceId".to_string(), instance_id.to_string()));
        params.push(("DBName".to_string(), db_name.to_string()));
        params.push(("StartTime".to_string(), day_param.clone()));
        params.push(("EndTime".to_string(), day_param));
        params.push(("SortKey".to_string(), SORT_KEY.to_string()));
        params.push(("PageSize".to_string(), self.page_size.to_string()));
        params.push(("PageNumber".to_string(), page_number.to_string()));

        let signature = sign_request("GET", &params, &self.access_key_secret)?;
        let url = format!(
            "{}/?{}&Signature={}",
            self.endpoint,
            canonicalized_query(&params),
            percent_encode_component(&signature)
        );

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&body)
                && let Some(code) = envelope.code
            {
                return Err(RdsError::Api {
                    code,
                    message: envelope.message.unwrap_or_default(),
                    request_id: envelope.request_id.unwrap_or_default(),
                });
            }
            return Err(RdsError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(response.json::<DescribeSlowLogsResponse>().await?)
    }

    fn common_params(&self) -> Vec<(String, String)> {
        vec![
            ("Format".to_string(), "JSON".to_string()),
            ("Version".to_string(), API_VERSION.to_string()),
            ("AccessKeyId".to_string(), self.access_key_id.clone()),
            ("SignatureMethod".to_string(), "HMAC-SHA1".to_string()),
            ("SignatureVersion".to_string(), "1.0".to_string()),
            ("SignatureNonce".to_string(), Uuid::new_v4().to_string()),
            (
                "Timestamp".to_string(),
                Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            ),
            ("RegionId".to_string(), self.region_id.clone()),
        ]
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= ERROR_BODY_LOG_LIMIT {
        return body.to_string();
    }

    let mut end = ERROR_BODY_LOG_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
