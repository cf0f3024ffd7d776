use anyhow::{Context, Result};
use clap::Parser;
use csvchart::parser::{parse_chart_request, ChartRequest};
use csvchart::{render, ChartError, ChartSession, OutputFormat, RenderOptions};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "csvchart")]
#[command(about = "Render a chart from CSV data", long_about = None)]
struct Args {
    /// Chart expression, e.g. 'bar(x: region, y: sales)' or 'histogram(data: height)'
    chart: String,

    /// CSV file to read (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the chart (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// JSON file with render options: {"width", "height", "type"}
    #[arg(long)]
    config: Option<PathBuf>,

    /// List the columns and the axis selectors for the chart kind, then exit
    #[arg(long)]
    columns: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Domain errors carry the message meant for the user.
            match err.downcast_ref::<ChartError>() {
                Some(chart_err) => {
                    debug!(error = ?err, "chart request failed");
                    eprintln!("{}", chart_err);
                }
                None => {
                    error!("{:#}", err);
                    eprintln!("Error: {:#}", err);
                }
            }
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
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let mut session = ChartSession::new();
    match &args.input {
        Some(path) => session.load_file(path)?,
        None => session.load_stdin()?,
    }

    if args.columns {
        let request = parse_chart_request(&args.chart)?;
        return list_columns(&mut session, &request);
    }

    // Missing data is reported ahead of a bad chart expression.
    session.require_data()?;
    let request = parse_chart_request(&args.chart)?;
    session.apply_request(&request)?;
    let options = render_options(args)?;
    let series = session.generate()?;
    let bytes = render(series, &options).context("Failed to render chart")?;

    write_output(args.output.as_ref(), &bytes)
}

fn render_options(args: &Args) -> Result<RenderOptions> {
    let mut options = match &args.config {
        Some(path) => RenderOptions::from_file(path)?,
        None => RenderOptions::default(),
    };
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    if let Some(format) = args.format {
        options.format = format;
    }
    Ok(options)
}

fn list_columns(session: &mut ChartSession, request: &ChartRequest) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "columns:")?;
    for header in session.headers() {
        writeln!(out, "  {}", header)?;
    }
    writeln!(out, "{} chart axes:", request.kind)?;
    for control in session.set_kind(request.kind) {
        writeln!(out, "  {} ({})", control.label, control.role)?;
    }
    Ok(())
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => fs::write(path, bytes)
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(bytes)
                .context("Failed to write chart to stdout")?;
            handle.flush().context("Failed to flush stdout")
        }
    }
}
