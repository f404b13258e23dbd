use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use hkstream_scan::SessionReport;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_report(report: &SessionReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            println!("Session {}:", report.session_id);
            println!(
                "  frames: hk={} other={}  sessions={}  warnings={} errors={}",
                report.stats.n_hk,
                report.stats.n_other,
                report.stats.n_session,
                report.stats.n_warning,
                report.stats.n_error
            );

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    "PROV", "ACTIVE", "N_ACTIVE", "FRAMES", "TICKS", "SPAN",
                ]);
            for (prov_id, info) in &report.providers {
                table.add_row(vec![
                    prov_id.to_string(),
                    info.active.to_string(),
                    info.n_active.to_string(),
                    info.n_frames.to_string(),
                    info.ticks.to_string(),
                    span_text(info.span),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "session={} hk={} other={} warnings={} errors={}",
                report.session_id,
                report.stats.n_hk,
                report.stats.n_other,
                report.stats.n_warning,
                report.stats.n_error
            );
            for (prov_id, info) in &report.providers {
                println!(
                    "  prov={} active={} n_active={} frames={} ticks={} span={}",
                    prov_id,
                    info.active,
                    info.n_active,
                    info.n_frames,
                    info.ticks,
                    span_text(info.span)
                );
            }
        }
    }
}

fn span_text(span: Option<(f64, f64)>) -> String {
    match span {
        Some((lo, hi)) => format!("{lo:.1}..{hi:.1}"),
        None => "-".to_string(),
    }
}
