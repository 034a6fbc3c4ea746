mod report;
mod service;
mod template;

pub use report::{build_report, InstanceReport, ReportEntry};
pub use service::{run_digest_cycle, run_digest_cycle_for_day};
pub use template::render_report;

#[cfg(test)]
mod tests;
