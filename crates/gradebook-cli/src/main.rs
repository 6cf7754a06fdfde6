//! gradebook CLI - weighted averages from school grade reports

mod console;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gradebook::source::DEFAULT_DATA_DIR;
use gradebook::{open_report, GradeReport, GradebookError, ReportOptions, SchoolYear};
use gradebook_chart::{render_series, DEFAULT_OUTPUT};
use tracing_subscriber::{fmt, EnvFilter};

use crate::console::Palette;

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(
    author,
    version,
    about = "Weighted averages and charts from school grade reports (.xlsx)"
)]
struct Cli {
    /// Report file name inside the data directory (prompted for if omitted)
    file: Option<String>,

    /// Directory the report is looked up in
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Where the chart is written
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Calendar year the school year started in, for dates written as dd.mm
    #[arg(long)]
    school_year: Option<i32>,

    /// Subject to chart (prompted for if omitted, blank skips the chart)
    #[arg(short, long)]
    subject: Option<String>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let palette = Palette::new(!cli.no_color);
    match run(&cli, palette) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = match err.downcast_ref::<GradebookError>() {
                Some(report_err) => console::describe_error(report_err),
                None => format!("{:#}", err),
            };
            eprintln!("{}", palette.error(&message));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, palette: Palette) -> Result<()> {
    let name = match &cli.file {
        Some(name) => name.clone(),
        None => {
            println!("{}", console::INTRO);
            console::prompt(console::FILE_PROMPT).context("Failed to read the file name")?
        }
    };

    let options = ReportOptions {
        school_year: cli
            .school_year
            .map(SchoolYear)
            .unwrap_or_else(SchoolYear::current),
        ..ReportOptions::default()
    };
    tracing::info!(file = %name, data_dir = %cli.data_dir.display(), "opening report");
    let report = open_report(&cli.data_dir, &name, &options)?;

    print_report(&report, palette);

    let subject = match &cli.subject {
        Some(subject) => subject.trim().to_string(),
        None => {
            println!();
            console::prompt(console::CHART_PROMPT).context("Failed to read the subject")?
        }
    };
    if !subject.is_empty() {
        draw_chart(&report, &subject, &cli.output, palette)?;
    }
    Ok(())
}

fn print_report(report: &GradeReport, palette: Palette) {
    println!();
    for line in console::header_lines(report.header()) {
        println!("{}", line);
    }

    println!("\nСредний балл по всем предметам:\n");
    let summary = report.summary();
    for subject in &summary.subjects {
        println!("{}", console::subject_line(subject, palette));
    }

    println!("___________________________");
    println!("{}", console::overall_line(summary.overall, palette));
    println!("{}", console::tally_line(&summary.tally));
}

fn draw_chart(report: &GradeReport, subject: &str, output: &Path, palette: Palette) -> Result<()> {
    let series = match report.chart_series(subject) {
        Ok(series) => series,
        Err(err @ (GradebookError::UnknownSubject(_) | GradebookError::InsufficientData { .. })) => {
            println!("{}", palette.error(&console::describe_error(&err)));
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    render_series(&series, output)
        .with_context(|| format!("Failed to write chart to {}", output.display()))?;
    println!("График сохранён в {}", output.display());
    Ok(())
}
