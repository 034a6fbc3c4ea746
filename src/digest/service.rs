use chrono::{Days, NaiveDate, Utc};

use crate::config::Config;
use crate::mailer::ReportMailer;
use crate::rds::SlowLogSource;

use super::report::build_report;
use super::template::render_report;

/// One full digest pass over the configured instances, covering the previous
/// UTC calendar day.
pub async fn run_digest_cycle<S, M>(config: &Config, source: &S, mailer: &M)
where
    S: SlowLogSource,
    M: ReportMailer,
{
    run_digest_cycle_for_day(config, source, mailer, previous_utc_day()).await;
}

/// A failing instance is logged and skipped; the remaining instances still
/// get their digests.
pub async fn run_digest_cycle_for_day<S, M>(
    config: &Config,
    source: &S,
    mailer: &M,
    day: NaiveDate,
) where
    S: SlowLogSource,
    M: ReportMailer,
{
    for instance_id in &config.rds.instance_ids {
        let batch = match source
            .fetch_slow_logs(instance_id, &config.rds.db_name, day)
            .await
        {
            Ok(batch) => batch,
            Err(error) => {
                log::error!(
                    "slow_log_fetch_failed instance={} db={} error={}",
                    instance_id,
                    config.rds.db_name,
                    error
                );
                continue;
            }
        };

        if batch.total_record_count == 0 {
            log::info!(
                "digest_skipped instance={} db={} reason=no_slow_log_records",
                instance_id,
                config.rds.db_name
            );
            continue;
        }

        let report = build_report(instance_id, &config.rds.db_name, day, batch);

        tracing::info!(
            target: "digest",
            module = "digest",
            instance_id = %report.instance_id,
            db_name = %report.db_name,
            total_record_count = report.total_record_count,
            entry_count = report.entries.len(),
            "slow_log_report_built"
        );

        let html = match render_report(&report) {
            Ok(html) => html,
            Err(error) => {
                log::error!(
                    "report_render_failed instance={} error={}",
                    instance_id,
                    error
                );
                continue;
            }
        };

        let subject = format!(
            "{} {} {}",
            config.email.subject_prefix,
            day.format("%Y-%m-%d"),
            instance_id
        );

        if let Err(error) = mailer.send_report(&subject, html).await {
            log::error!("report_send_failed instance={} error={}", instance_id, error);
            continue;
        }

        log::info!(
            "report_sent instance={} db={} entries={} recipients={}",
            instance_id,
            config.rds.db_name,
            report.entries.len(),
            config.email.to.len()
        );
    }
}

pub(crate) fn previous_utc_day() -> NaiveDate {
    let today = Utc::now().date_naive();
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}
