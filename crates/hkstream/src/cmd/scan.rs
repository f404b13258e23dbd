use std::fs::File;
use std::io::{BufRead, BufReader};

use tracing::error;

use hkstream_frame::StreamRecord;
use hkstream_scan::{HkScanner, ScanConfig};

use crate::cmd::ScanArgs;
use crate::exit::{io_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, OutputFormat};

pub fn run(args: ScanArgs, format: OutputFormat) -> CliResult<i32> {
    let file = File::open(&args.file)
        .map_err(|err| io_error(&format!("open {}", args.file.display()), err))?;
    let reader = BufReader::new(file);

    let mut scanner = match args.tolerance {
        Some(data_time_tolerance) => HkScanner::with_config(ScanConfig {
            data_time_tolerance,
        }),
        None => HkScanner::new(),
    };

    let mut n_invalid = 0u64;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| io_error("read stream", err))?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;

        let value: serde_json::Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                error!(line_no, %err, "unreadable record");
                n_invalid += 1;
                continue;
            }
        };
        let record = match StreamRecord::from_json(&value) {
            Ok(record) => record,
            Err(err) => {
                error!(line_no, %err, "malformed record");
                n_invalid += 1;
                continue;
            }
        };

        match scanner.scan(&record) {
            Ok(Some(report)) => print_report(&report, format),
            Ok(None) => {}
            Err(err) => {
                error!(line_no, %err, "record rejected");
                n_invalid += 1;
            }
        }
    }

    if let Ok(Some(report)) = scanner.scan(&StreamRecord::EndOfStream) {
        print_report(&report, format);
    }

    if n_invalid > 0 {
        error!(n_invalid, "stream contained invalid records");
        return Ok(DATA_INVALID);
    }
    Ok(SUCCESS)
}
