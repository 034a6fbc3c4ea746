use serde::Deserialize;

/// One page of the DescribeSlowLogs response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSlowLogsResponse {
    pub request_id: String,
    pub total_record_count: u64,
    pub page_number: u64,
    #[serde(default)]
    pub page_record_count: u64,
    #[serde(default)]
    pub items: SlowLogItems,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlowLogItems {
    #[serde(rename = "SQLSlowLog", default)]
    pub sql_slow_log: Vec<SlowLogRecord>,
}

/// One aggregated slow-query row. Times are reported in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SlowLogRecord {
    #[serde(rename = "SQLText")]
    pub sql_text: String,
    #[serde(rename = "SQLHASH", default)]
    pub sql_hash: String,
    #[serde(rename = "MySQLTotalExecutionCounts")]
    pub total_execution_counts: u64,
    #[serde(rename = "MySQLTotalExecutionTimes")]
    pub total_execution_times: u64,
    #[serde(default)]
    pub max_execution_time: u64,
    #[serde(default)]
    pub total_lock_times: u64,
    #[serde(default)]
    pub parse_total_row_counts: u64,
    #[serde(default)]
    pub return_total_row_counts: u64,
}

/// Error envelope the API returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiErrorEnvelope {
    pub code: Option<String>,
    pub message: Option<String>,
    pub request_id: Option<String>,
}
