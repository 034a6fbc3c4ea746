use askama::Template;

use super::report::{InstanceReport, ReportEntry};

const SQL_TEXT_DISPLAY_LIMIT: usize = 500;
const TRUNCATE_MARKER: &str = " (truncated)";

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    db_name: &'a str,
    instance_id: &'a str,
    report_date: String,
    total_record_count: u64,
    rows: Vec<ReportRow>,
}

struct ReportRow {
    sql_text: String,
    sql_hash: String,
    executions: u64,
    total_secs: u64,
    avg_secs: String,
    max_secs: u64,
    lock_secs: u64,
    parse_rows: u64,
    return_rows: u64,
}

pub fn render_report(report: &InstanceReport) -> Result<String, askama::Error> {
    let template = ReportTemplate {
        db_name: &report.db_name,
        instance_id: &report.instance_id,
        report_date: report.report_date.format("%Y-%m-%d").to_string(),
        total_record_count: report.total_record_count,
        rows: report.entries.iter().map(report_row).collect(),
    };
    template.render()
}

fn report_row(entry: &ReportEntry) -> ReportRow {
    ReportRow {
        sql_text: truncate_sql(&entry.sql_text),
        sql_hash: entry.sql_hash.clone(),
        executions: entry.executions,
        total_secs: entry.total_execution_secs,
        avg_secs: format!("{:.2}", entry.avg_execution_secs),
        max_secs: entry.max_execution_secs,
        lock_secs: entry.total_lock_secs,
        parse_rows: entry.parse_row_count,
        return_rows: entry.return_row_count,
    }
}

fn truncate_sql(text: &str) -> String {
    if text.len() <= SQL_TEXT_DISPLAY_LIMIT {
        return text.to_string();
    }

    let mut end = SQL_TEXT_DISPLAY_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &text[..end], TRUNCATE_MARKER)
}
