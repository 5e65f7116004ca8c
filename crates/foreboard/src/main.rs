mod config;
mod metric;
mod render;
mod session;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use foreboard_core::{DateWindow, FilterParams, PipelineError, SummaryCache};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogFormat};
use crate::metric::Metric;
use crate::render::{render, OutputFormat};
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Golf scorecard dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one dashboard metric for the selected golfers, courses and dates
    Show(ShowArgs),
    /// List the golfers, courses and date range available for filtering
    Options(SourceArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Workbook to read instead of the configured data file
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ShowArgs {
    #[command(flatten)]
    source: SourceArgs,
    #[arg(long, value_enum, default_value_t = Metric::Scores)]
    metric: Metric,
    /// Restrict to this golfer (repeatable)
    #[arg(long = "golfer")]
    golfers: Vec<String>,
    /// Restrict to this course (repeatable)
    #[arg(long = "course")]
    courses: Vec<String>,
    /// First date of an inclusive range (YYYY-MM-DD or YYYYMMDD)
    #[arg(long, requires = "to", conflicts_with = "last")]
    from: Option<String>,
    /// Last date of an inclusive range (YYYY-MM-DD or YYYYMMDD)
    #[arg(long, requires = "from", conflicts_with = "last")]
    to: Option<String>,
    /// Only the N most recent round dates
    #[arg(long)]
    last: Option<usize>,
    /// Date window expression: "all", "Last N rounds" or START..END
    #[arg(long, conflicts_with_all = ["from", "to", "last"])]
    window: Option<String>,
}

impl ShowArgs {
    fn date_window(&self, config: &AppConfig) -> Result<DateWindow> {
        if let (Some(start), Some(end)) = (&self.from, &self.to) {
            return DateWindow::between(start, end)
                .with_context(|| format!("invalid date range {start}..{end}"));
        }
        if let Some(count) = self.last {
            return Ok(DateWindow::LastRounds(count));
        }
        let expr = self.window.as_deref().unwrap_or(&config.default_window);
        expr.parse::<DateWindow>()
            .with_context(|| format!("invalid date window {expr:?}"))
    }
}

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(config.log_format);

    let cli = Cli::parse();
    let ttl = Duration::from_secs(config.cache_ttl_secs);
    let cache = Arc::new(SummaryCache::new(ttl));

    match cli.command {
        Command::Show(args) => {
            let session = open_session(&args.source, &config, cache)?;
            let params = FilterParams::new()
                .with_dates(args.date_window(&config)?)
                .with_golfers(args.golfers.iter().cloned())
                .with_courses(args.courses.iter().cloned());

            match session.view(args.metric, &params) {
                Ok(view) => render(&view, args.source.format, &mut io::stdout().lock()),
                Err(PipelineError::EmptyResult) => {
                    warn!(metric = args.metric.label(), "No matching holes");
                    println!("No data for the selected filters.");
                    Ok(())
                }
                Err(err) => Err(err).context("failed to build dashboard view"),
            }
        }
        Command::Options(source) => {
            let session = open_session(&source, &config, cache)?;
            let options = session.options()?;
            render(&options, source.format, &mut io::stdout().lock())
        }
    }
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Plain => builder.init(),
    }
}

fn open_session(
    source: &SourceArgs,
    config: &AppConfig,
    cache: Arc<SummaryCache>,
) -> Result<Session> {
    let upload = source.file.as_deref().map(read_upload).transpose()?;

    let session = Session::load(upload.as_deref(), &config.data_file, cache)
        .with_context(|| format!("failed to load workbook {}", describe(source, config)))?;
    info!(holes = session.table().height(), "Session ready");
    Ok(session)
}

fn read_upload(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .with_context(|| format!("failed to read workbook {}", path.display()))
}

fn describe(source: &SourceArgs, config: &AppConfig) -> String {
    source
        .file
        .as_ref()
        .unwrap_or(&config.data_file)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn show_args(from: &str, to: &str) -> ShowArgs {
        let args = ["foreboard", "show", "--from", from, "--to", to];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Show(show) => show,
            Command::Options(_) => panic!("expected the show command"),
        }
    }

    #[test]
    fn compact_date_bounds_build_an_inclusive_range() {
        let window = show_args("20230101", "20230201")
            .date_window(&AppConfig::default())
            .unwrap();

        let jan = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
        assert_eq!(window, DateWindow::range(jan, feb));
    }

    #[test]
    fn slash_separated_bound_is_a_malformed_date() {
        let err = show_args("2023/01/01", "2023-02-01")
            .date_window(&AppConfig::default())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::MalformedDate(_))
        ));
    }

    #[test]
    fn default_window_comes_from_config() {
        let cli = Cli::try_parse_from(["foreboard", "show"]).unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected the show command");
        };

        let window = args.date_window(&AppConfig::default()).unwrap();

        assert_eq!(window, DateWindow::LastRounds(20));
    }
}
