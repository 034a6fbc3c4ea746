use tokio::time::sleep;

use crate::app_context::AppContext;
use crate::digest::run_digest_cycle;

mod schedules;

pub async fn run_once(app: &AppContext) {
    run_digest_cycle(&app.config, &app.rds, &app.mailer).await;
}

/// Resident mode: send the digest once per day at the configured UTC time.
pub async fn run_scheduled(app: &AppContext) {
    loop {
        let wait = schedules::duration_until_next_digest(
            app.config.schedule.hour_utc,
            app.config.schedule.minute_utc,
        );
        log::info!(
            "digest_scheduled hour_utc={} minute_utc={} wait_secs={}",
            app.config.schedule.hour_utc,
            app.config.schedule.minute_utc,
            wait.as_secs()
        );
        sleep(wait).await;

        run_digest_cycle(&app.config, &app.rds, &app.mailer).await;
    }
}
