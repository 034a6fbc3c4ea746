mod app_context;
mod config;
mod digest;
mod jobs;
mod mailer;
mod rds;

use tracing_subscriber::EnvFilter;

use crate::app_context::AppContext;
use crate::config::load_config;
use crate::mailer::SmtpMailer;
use crate::rds::RdsClient;

const CONFIG_PATH: &str = "config.toml";

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

#[tokio::main]
async fn main() {
    init_json_logging();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| CONFIG_PATH.to_string());
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    log::info!(
        "slowlog_digest_starting config={} instances={} scheduled={}",
        config_path,
        config.rds.instance_ids.len(),
        config.schedule.enabled
    );

    let rds = match RdsClient::from_config(&config.rds) {
        Ok(client) => client,
        Err(error) => {
            log::error!("RDS client setup failed: {}", error);
            return;
        }
    };

    let mailer = match SmtpMailer::from_config(&config.email) {
        Ok(mailer) => mailer,
        Err(error) => {
            log::error!("SMTP mailer setup failed: {}", error);
            return;
        }
    };

    let app = AppContext::new(config, rds, mailer);

    if app.config.schedule.enabled {
        jobs::run_scheduled(&app).await;
    } else {
        jobs::run_once(&app).await;
    }
}
