use chrono::NaiveDate;

use crate::rds::{SlowLogBatch, SlowLogRecord};

/// One instance's digest for one report day. Built, rendered, mailed and
/// dropped within a single cycle iteration.
#[derive(Debug, Clone)]
pub struct InstanceReport {
    pub instance_id: String,
    pub db_name: String,
    pub report_date: NaiveDate,
    pub total_record_count: u64,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub sql_text: String,
    pub sql_hash: String,
    pub executions: u64,
    pub total_execution_secs: u64,
    pub avg_execution_secs: f64,
    pub max_execution_secs: u64,
    pub total_lock_secs: u64,
    pub parse_row_count: u64,
    pub return_row_count: u64,
}

pub fn build_report(
    instance_id: &str,
    db_name: &str,
    report_date: NaiveDate,
    batch: SlowLogBatch,
) -> InstanceReport {
    let entries = batch.records.into_iter().map(report_entry).collect();

    InstanceReport {
        instance_id: instance_id.to_string(),
        db_name: db_name.to_string(),
        report_date,
        total_record_count: batch.total_record_count,
        entries,
    }
}

fn report_entry(record: SlowLogRecord) -> ReportEntry {
    let avg_execution_secs = average_execution_secs(&record);

    ReportEntry {
        sql_text: record.sql_text,
        sql_hash: record.sql_hash,
        executions: record.total_execution_counts,
        total_execution_secs: record.total_execution_times,
        avg_execution_secs,
        max_execution_secs: record.max_execution_time,
        total_lock_secs: record.total_lock_times,
        parse_row_count: record.parse_total_row_counts,
        return_row_count: record.return_total_row_counts,
    }
}

fn average_execution_secs(record: &SlowLogRecord) -> f64 {
    if record.total_execution_counts == 0 {
        log::warn!(
            "slow_log_zero_execution_count sql_hash={} total_execution_secs={}",
            record.sql_hash,
            record.total_execution_times
        );
        return 0.0;
    }

    record.total_execution_times as f64 / record.total_execution_counts as f64
}
