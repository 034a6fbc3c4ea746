use chrono::NaiveDate;

use crate::config::{Config, EmailSettings, RdsSettings, Schedule};
use crate::mailer::MockReportMailer;
use crate::rds::{MockSlowLogSource, SlowLogBatch, SlowLogRecord};

use super::run_digest_cycle_for_day;

fn test_config(instance_ids: &[&str]) -> Config {
    Config {
        rds: RdsSettings {
            region_id: "cn-hangzhou".to_string(),
            access_key_id: "testid".to_string(),
            access_key_secret: "testsecret".to_string(),
            instance_ids: instance_ids.iter().map(|id| id.to_string()).collect(),
            db_name: "orders".to_string(),
            page_size: 100,
            endpoint: "https://rds.aliyuncs.com".to_string(),
            request_timeout_secs: 30,
        },
        email: EmailSettings {
            from: "Digest <digest@example.com>".to_string(),
            to: vec!["dba@example.com".to_string()],
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
            username: "digest@example.com".to_string(),
            password: "hunter2".to_string(),
            subject_prefix: "RDS slow query digest".to_string(),
        },
        schedule: Schedule::default(),
    }
}

fn record(sql_text: &str, counts: u64, times: u64) -> SlowLogRecord {
    SlowLogRecord {
        sql_text: sql_text.to_string(),
        sql_hash: "cafe01".to_string(),
        total_execution_counts: counts,
        total_execution_times: times,
        max_execution_time: 7,
        total_lock_times: 0,
        parse_total_row_counts: 100,
        return_total_row_counts: 10,
    }
}

fn batch(records: Vec<SlowLogRecord>) -> SlowLogBatch {
    SlowLogBatch {
        total_record_count: records.len() as u64,
        records,
    }
}

fn report_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 5).expect("valid date")
}

#[tokio::test]
async fn sends_one_email_per_instance_with_records() {
    let config = test_config(&["rm-aaa111", "rm-bbb222"]);
    let source = MockSlowLogSource::new()
        .with_batch("rm-aaa111", batch(vec![record("select a", 10, 30)]))
        .with_batch("rm-bbb222", batch(vec![record("select b", 2, 4)]));
    let mailer = MockReportMailer::new();

    run_digest_cycle_for_day(&config, &source, &mailer, report_day()).await;

    let sent = mailer.sent.lock().expect("mock mailer lock");
    assert_eq!(sent.len(), 2);
    assert!(sent[0].0.contains("rm-aaa111"));
    assert!(sent[0].0.contains("2026-08-05"));
    assert!(sent[1].0.contains("rm-bbb222"));
}

#[tokio::test]
async fn instance_without_records_is_skipped() {
    let config = test_config(&["rm-aaa111"]);
    let source = MockSlowLogSource::new().with_batch("rm-aaa111", batch(vec![]));
    let mailer = MockReportMailer::new();

    run_digest_cycle_for_day(&config, &source, &mailer, report_day()).await;

    let sent = mailer.sent.lock().expect("mock mailer lock");
    assert!(sent.is_empty());
}

#[tokio::test]
async fn failing_instance_does_not_abort_the_rest() {
    // rm-missing has no batch registered, so the mock source errors for it
    let config = test_config(&["rm-missing", "rm-bbb222"]);
    let source =
        MockSlowLogSource::new().with_batch("rm-bbb222", batch(vec![record("select b", 5, 10)]));
    let mailer = MockReportMailer::new();

    run_digest_cycle_for_day(&config, &source, &mailer, report_day()).await;

    let sent = mailer.sent.lock().expect("mock mailer lock");
    assert_eq!(sent.len(), 1);
    assert!(sent[0].0.contains("rm-bbb222"));
}

#[tokio::test]
async fn rendered_body_carries_the_computed_average() {
    let config = test_config(&["rm-aaa111"]);
    let source =
        MockSlowLogSource::new().with_batch("rm-aaa111", batch(vec![record("select a", 4, 10)]));
    let mailer = MockReportMailer::new();

    run_digest_cycle_for_day(&config, &source, &mailer, report_day()).await;

    let sent = mailer.sent.lock().expect("mock mailer lock");
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("2.50"));
    assert!(sent[0].1.contains("select a"));
}
