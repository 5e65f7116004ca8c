//! Text, JSON and CSV renderings of a [`View`].

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use foreboard_core::{FilterOptions, HitMiss, RegulationCount};
use serde::Serialize;

use crate::metric::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub fn render<W: Write>(view: &View, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => writeln!(out, "{}", table(view))?,
        OutputFormat::Json => {
            match view {
                View::Rounds(rows) => serde_json::to_writer_pretty(&mut *out, rows)?,
                View::ScoreToPar(rows) => serde_json::to_writer_pretty(&mut *out, rows)?,
                View::Accuracy(rows) => serde_json::to_writer_pretty(&mut *out, rows)?,
                View::InRegulation(rows) => serde_json::to_writer_pretty(&mut *out, rows)?,
                View::Options(options) => serde_json::to_writer_pretty(&mut *out, options)?,
            }
            writeln!(out)?;
        }
        OutputFormat::Csv => match view {
            View::Rounds(rows) => write_csv(out, rows)?,
            View::ScoreToPar(rows) => write_csv(out, rows)?,
            View::Accuracy(rows) => write_csv(out, rows)?,
            View::InRegulation(rows) => write_csv(out, rows)?,
            View::Options(options) => write_csv(out, &option_rows(options))?,
        },
    }
    Ok(())
}

fn write_csv<W: Write, T: Serialize>(out: &mut W, rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct OptionRow {
    kind: &'static str,
    value: String,
}

fn option_rows(options: &FilterOptions) -> Vec<OptionRow> {
    let mut rows = Vec::new();
    for name in &options.golfers {
        rows.push(option_row("golfer", name));
    }
    for name in &options.courses {
        rows.push(option_row("course", name));
    }
    if let Some(first) = options.first_date {
        rows.push(option_row("first_date", first));
    }
    if let Some(last) = options.last_date {
        rows.push(option_row("last_date", last));
    }
    rows
}

fn option_row(kind: &'static str, value: impl ToString) -> OptionRow {
    OptionRow {
        kind,
        value: value.to_string(),
    }
}

fn table(view: &View) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    match view {
        View::Rounds(rounds) => {
            table.set_header(vec![
                "Date",
                "Golfer",
                "Course",
                "Tee",
                "Holes",
                "Score",
                "ScoreToPar",
                "Putts",
                "PuttsToPar",
                "GIR",
                "FIR",
            ]);
            for round in rounds {
                table.add_row(vec![
                    round.date.to_string(),
                    round.golfer.clone(),
                    round.course.clone(),
                    round.tee.clone(),
                    round.num_holes.to_string(),
                    round.score.to_string(),
                    signed(round.score_to_par),
                    round.putts.to_string(),
                    signed(round.putts_to_par),
                    hit_miss(round.greens()),
                    hit_miss(round.fairways()),
                ]);
            }
        }
        View::ScoreToPar(rows) => {
            table.set_header(vec!["Par", "Mean ScoreToPar"]);
            for row in rows {
                table.add_row(vec![
                    row.par.to_string(),
                    format!("{:+.2}", row.mean_score_to_par),
                ]);
            }
        }
        View::Accuracy(rows) => {
            table.set_header(vec!["Shot", "Direction", "Par", "Count"]);
            for row in rows {
                table.add_row(vec![
                    row.shot.to_string(),
                    row.category.code().to_string(),
                    row.par.to_string(),
                    row.count.to_string(),
                ]);
            }
        }
        View::InRegulation(rows) => {
            table.set_header(vec!["FIR", "GIR", "Holes"]);
            for RegulationCount { fir, gir, holes } in rows {
                table.add_row(vec![outcome(*fir), outcome(*gir), holes.to_string()]);
            }
        }
        View::Options(options) => {
            table.set_header(vec!["Option", "Value"]);
            for row in option_rows(options) {
                table.add_row(vec![row.kind.to_string(), row.value]);
            }
        }
    }

    table
}

fn signed(value: i64) -> String {
    format!("{value:+}")
}

fn hit_miss(split: HitMiss) -> String {
    match split.percent {
        Some(percent) => format!("{}/{} ({percent}%)", split.hit, split.hit + split.missed),
        None => "n/a".to_string(),
    }
}

fn outcome(value: Option<bool>) -> String {
    match value {
        Some(true) => "Hit".to_string(),
        Some(false) => "Missed".to_string(),
        None => "n/a".to_string(),
    }
}
