use crate::config::Config;
use crate::mailer::SmtpMailer;
use crate::rds::RdsClient;

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub rds: RdsClient,
    pub mailer: SmtpMailer,
}

impl AppContext {
    pub fn new(config: Config, rds: RdsClient, mailer: SmtpMailer) -> Self {
        Self {
            config,
            rds,
            mailer,
        }
    }
}
