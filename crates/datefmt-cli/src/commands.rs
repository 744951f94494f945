use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use datefmt_cli::inputs::collect_values;
use datefmt_cli::logging::redact_value;
use datefmt_cli::rows::{InferRow, ParseRow, shape_rows};
use datefmt_core::{Dialect, bind};

use crate::cli::{DialectArg, InferArgs, ParseArgs, ShapesArgs};
use crate::summary::{print_infer_table, print_parse_table, print_shapes_table};

/// Values that failed in a `parse` run.
pub struct ParseOutcome {
    pub failures: usize,
}

pub fn run_infer(args: &InferArgs) -> Result<()> {
    let _guard = info_span!("infer").entered();
    let values = collect_values(&args.values, args.input.as_deref())?;
    let dialects = selected_dialects(args.dialect);
    let rows: Vec<InferRow> = values
        .iter()
        .map(|value| {
            let row = InferRow::new(value, dialects);
            match &row.rejection {
                Some(reason) => debug!(value = redact_value(value), %reason, "no pattern"),
                None => debug!(value = redact_value(value), modern = ?row.modern, "inferred"),
            }
            row
        })
        .collect();
    let matched = rows.iter().filter(|row| row.is_match()).count();
    info!(values = rows.len(), matched, "inference complete");

    if args.json {
        print_json(&rows)?;
    } else {
        print_infer_table(&rows, dialects);
    }
    Ok(())
}

pub fn run_parse(args: &ParseArgs) -> Result<ParseOutcome> {
    let _guard = info_span!("parse", pattern = %args.pattern).entered();
    let formatter = bind(&args.pattern)
        .with_context(|| format!("bind pattern `{}`", args.pattern))?;
    let values = collect_values(&args.values, args.input.as_deref())?;
    let rows: Vec<ParseRow> = values
        .iter()
        .map(|value| {
            let row = ParseRow::new(&formatter, value);
            if let Some(error) = &row.error {
                warn!(value = redact_value(value), %error, "value does not match pattern");
            }
            row
        })
        .collect();
    let failures = rows.iter().filter(|row| !row.is_ok()).count();
    info!(values = rows.len(), failures, "parse complete");

    if args.json {
        print_json(&rows)?;
    } else {
        print_parse_table(formatter.pattern(), &rows);
    }
    Ok(ParseOutcome { failures })
}

pub fn run_shapes(args: &ShapesArgs) -> Result<()> {
    let rows = shape_rows();
    debug!(layouts = rows.len(), "listing shape catalogue");
    if args.json {
        print_json(&rows)?;
    } else {
        print_shapes_table(&rows);
    }
    Ok(())
}

fn selected_dialects(arg: DialectArg) -> &'static [Dialect] {
    match arg {
        DialectArg::Legacy => &[Dialect::Legacy],
        DialectArg::Modern => &[Dialect::Modern],
        DialectArg::Both => &[Dialect::Legacy, Dialect::Modern],
    }
}

fn print_json<T: serde::Serialize>(rows: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows).context("serialize rows")?;
    println!("{json}");
    Ok(())
}
