use chrono::NaiveDate;

use super::client::{RdsClient, RdsError};
use super::model::SlowLogRecord;

/// All slow-log rows reported for one instance on one day.
#[derive(Debug, Clone, Default)]
pub struct SlowLogBatch {
    pub total_record_count: u64,
    pub records: Vec<SlowLogRecord>,
}

pub trait SlowLogSource {
    async fn fetch_slow_logs(
        &self,
        instance_id: &str,
        db_name: &str,
        day: NaiveDate,
    ) -> Result<SlowLogBatch, RdsError>;
}

impl SlowLogSource for RdsClient {
    async fn fetch_slow_logs(
        &self,
        instance_id: &str,
        db_name: &str,
        day: NaiveDate,
    ) -> Result<SlowLogBatch, RdsError> {
        let mut records: Vec<SlowLogRecord> = Vec::new();
        let mut total_record_count = 0u64;
        let mut page_number = 1u64;

        loop {
            let page = self
                .describe_slow_logs_page(instance_id, db_name, day, page_number)
                .await?;
            total_record_count = page.total_record_count;

            let page_len = page.items.sql_slow_log.len();
            log::debug!(
                "slow_log_page_fetched request_id={} page={} page_record_count={}",
                page.request_id,
                page.page_number,
                page.page_record_count
            );
            records.extend(page.items.sql_slow_log);

            // An empty page also terminates, in case the reported total and
            // the actual rows disagree.
            if page_len == 0 || records.len() as u64 >= total_record_count {
                break;
            }
            page_number += 1;
        }

        Ok(SlowLogBatch {
            total_record_count,
            records,
        })
    }
}

#[cfg(test)]
pub(crate) struct MockSlowLogSource {
    batches: std::collections::HashMap<String, SlowLogBatch>,
}

#[cfg(test)]
impl MockSlowLogSource {
    pub(crate) fn new() -> Self {
        Self {
            batches: std::collections::HashMap::new(),
        }
    }

    pub(crate) fn with_batch(mut self, instance_id: &str, batch: SlowLogBatch) -> Self {
        self.batches.insert(instance_id.to_string(), batch);
        self
    }
}

#[cfg(test)]
impl SlowLogSource for MockSlowLogSource {
    async fn fetch_slow_logs(
        &self,
        instance_id: &str,
        _db_name: &str,
        _day: NaiveDate,
    ) -> Result<SlowLogBatch, RdsError> {
        self.batches
            .get(instance_id)
            .cloned()
            .ok_or_else(|| RdsError::mock_unknown_instance(instance_id))
    }
}
