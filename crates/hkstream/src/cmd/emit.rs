use std::fs::File;
use std::io::{BufWriter, Write};

use hkstream_frame::{Block, HkFrame};
use hkstream_session::{SessionBuilder, SessionConfig};

use crate::cmd::EmitArgs;
use crate::exit::{io_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};

pub fn run(args: EmitArgs) -> CliResult<i32> {
    if args.providers == 0 {
        return Err(CliError::new(USAGE, "at least one provider is required"));
    }
    if args.interval <= 0.0 {
        return Err(CliError::new(USAGE, "interval must be positive"));
    }

    let mut session = SessionBuilder::with_config(SessionConfig {
        session_id: args.session_id,
        start_time: args.start_time,
        description: args.description.clone(),
    });
    for i in 0..args.providers {
        session.register_provider(format!("provider-{i}"));
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| io_error(&format!("create {}", path.display()), err))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };

    let start = session.start_time();
    write_frame(&mut out, &session.session_frame())?;
    write_frame(&mut out, &session.status_frame(Some(start)))?;

    for i in 0..args.frames {
        let prov_id = i % args.providers;
        let timestamp = start + (i + 1) as f64 * args.interval;
        let t: Vec<f64> = (0..args.samples)
            .map(|s| timestamp + s as f64 * args.interval / args.samples.max(1) as f64)
            .collect();
        let value: Vec<f64> = t.iter().map(|&t| (t - start).sin()).collect();
        let frame = session.data_frame_with_blocks(
            prov_id,
            Some(timestamp),
            vec![Block::from_fields(t, [("value", value)])],
        );
        write_frame(&mut out, &frame)?;
    }

    out.flush().map_err(|err| io_error("flush stream", err))?;
    Ok(SUCCESS)
}

fn write_frame(out: &mut dyn Write, frame: &HkFrame) -> CliResult<()> {
    let line = serde_json::to_string(frame)
        .map_err(|err| CliError::new(INTERNAL, format!("serialize frame: {err}")))?;
    writeln!(out, "{line}").map_err(|err| io_error("write stream", err))
}
