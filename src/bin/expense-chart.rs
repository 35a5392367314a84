use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use expense_chart::acquire::loader::{DatasetLoader, LoadError};
use expense_chart::acquire::{ExpenseClient, compare_expenses, load_cost_items_from_path, read_table_csv};
use expense_chart::chart::format::format_value;
use expense_chart::config::Config;
use expense_chart::report::{ReportOptions, render_report};
use expense_chart::svg::SvgDocument;
use expense_chart::{ChartOptions, Dataset, FetchError, plotters_surface, render_chart};
use expense_chart::{stats, storage};
use log::{info, warn};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "expense-chart",
    version,
    about = "Compare expense exports and render them as signed bar charts"
)]
struct Cli {
    /// Config file (TOML). Defaults to the user config directory when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two bank exports per category and write an HTML report.
    Compare(CompareArgs),
    /// Chart a two-column `label,value` CSV table.
    Table(TableArgs),
    /// Fetch expenses from the backend API and chart the totals per tag.
    Fetch(FetchArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Logical chart width (default 300).
    #[arg(long)]
    width: Option<f64>,
    /// Logical chart height (default 100).
    #[arg(long)]
    height: Option<f64>,
    /// Gap in front of every bar (default 1).
    #[arg(long)]
    spacing: Option<f64>,
    /// Number format for labels (en, de, cs, fr, ...).
    #[arg(long)]
    locale: Option<String>,
    /// Pixels per logical unit for PNG output (default 4).
    #[arg(long)]
    pixel_scale: Option<u32>,
    /// TTF/OTF font used for the scale label in PNG output.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SaveArgs {
    /// Save the charted data to file (format inferred by --format or extension).
    #[arg(long)]
    save: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --save extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Export of the reference period.
    #[arg(short, long)]
    baseline: PathBuf,
    /// Export of the period to compare.
    #[arg(short, long)]
    current: PathBuf,
    /// HTML report path.
    #[arg(long, default_value = "generated_report.html")]
    out: PathBuf,
    /// Report title.
    #[arg(long)]
    title: Option<String>,
    /// Also write the chart to a standalone file (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    #[command(flatten)]
    chart: ChartArgs,
    #[command(flatten)]
    save: SaveArgs,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Headerless CSV with a label and a value per line.
    #[arg(short, long)]
    input: PathBuf,
    /// Chart path (.svg or .png).
    #[arg(long)]
    plot: PathBuf,
    #[command(flatten)]
    chart: ChartArgs,
    #[command(flatten)]
    save: SaveArgs,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Backend base URL (overrides config and EXPENSE_CHART_API_URL).
    #[arg(long)]
    url: Option<String>,
    /// Chart path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    #[command(flatten)]
    chart: ChartArgs,
    #[command(flatten)]
    save: SaveArgs,
}

fn fmt_opt(v: Option<f64>, locale: &str) -> String {
    match v {
        Some(x) if x.is_finite() => format_value(x, locale),
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    match cli.cmd {
        Command::Compare(args) => cmd_compare(&config, args),
        Command::Table(args) => cmd_table(&config, args),
        Command::Fetch(args) => cmd_fetch(&config, args),
    }
}

fn chart_options(config: &Config, args: &ChartArgs) -> ChartOptions {
    let mut opts = config.chart_options();
    if let Some(w) = args.width {
        opts.width = w;
    }
    if let Some(h) = args.height {
        opts.height = h;
    }
    if let Some(s) = args.spacing {
        opts.spacing = s;
    }
    if let Some(l) = &args.locale {
        opts.locale = l.clone();
    }
    opts
}

/// `.svg` keeps the fixed logical view box; other extensions go through plotters.
fn write_plot(
    dataset: &Dataset,
    path: &Path,
    opts: &ChartOptions,
    config: &Config,
    args: &ChartArgs,
) -> Result<()> {
    if path.extension().and_then(|e| e.to_str()) == Some("svg") {
        let mut doc = SvgDocument::new(opts.width, opts.height);
        render_chart(&mut doc, dataset, opts)?;
        doc.save(path)?;
    } else {
        if let Some(font) = args.font.as_ref().or(config.output.font_path.as_ref()) {
            plotters_surface::register_font_file(font)
                .with_context(|| format!("register font {}", font.display()))?;
        }
        let scale = args.pixel_scale.unwrap_or(config.output.pixel_scale);
        plotters_surface::render_image(dataset, path, opts, scale)?;
    }
    eprintln!("Wrote plot to {}", path.display());
    Ok(())
}

fn save_and_report(dataset: &Dataset, args: &SaveArgs, locale: &str) -> Result<()> {
    if let Some(path) = args.save.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(dataset, path)?,
            "json" => storage::save_json(dataset, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", dataset.len(), path.display());
    }

    if args.stats {
        let s = stats::summarize(dataset);
        println!(
            "count={}  total={}  gains={}  losses={}  min={} max={} mean={}",
            s.count,
            format_value(s.total, locale),
            format_value(s.positive_total, locale),
            format_value(s.negative_total, locale),
            fmt_opt(s.min, locale),
            fmt_opt(s.max, locale),
            fmt_opt(s.mean, locale)
        );
    }
    Ok(())
}

fn cmd_compare(config: &Config, args: CompareArgs) -> Result<()> {
    let settings = config.import_settings();
    let baseline = load_cost_items_from_path(&args.baseline, &settings)
        .with_context(|| format!("load {}", args.baseline.display()))?;
    let current = load_cost_items_from_path(&args.current, &settings)
        .with_context(|| format!("load {}", args.current.display()))?;
    let comparison = compare_expenses(&baseline, &current);
    info!(
        "compared {} baseline and {} current rows into {} categories",
        baseline.len(),
        current.len(),
        comparison.len()
    );

    let opts = chart_options(config, &args.chart);
    let report_opts = ReportOptions {
        title: args
            .title
            .clone()
            .unwrap_or_else(|| ReportOptions::default().title),
        chart: opts.clone(),
    };
    let html = render_report(&comparison, &report_opts)?;
    std::fs::write(&args.out, html).with_context(|| format!("write {}", args.out.display()))?;
    eprintln!("Wrote report to {}", args.out.display());

    let dataset = Dataset::try_from(comparison.as_slice())?;
    if let Some(path) = args.plot.as_ref() {
        write_plot(&dataset, path, &opts, config, &args.chart)?;
    }
    save_and_report(&dataset, &args.save, &opts.locale)
}

fn cmd_table(config: &Config, args: TableArgs) -> Result<()> {
    let file = File::open(&args.input).with_context(|| format!("open {}", args.input.display()))?;
    let dataset = read_table_csv(file).with_context(|| format!("read {}", args.input.display()))?;
    let opts = chart_options(config, &args.chart);
    write_plot(&dataset, &args.plot, &opts, config, &args.chart)?;
    save_and_report(&dataset, &args.save, &opts.locale)
}

fn cmd_fetch(config: &Config, args: FetchArgs) -> Result<()> {
    let base_url = args.url.clone().unwrap_or_else(|| config.api.base_url.clone());
    let client = ExpenseClient::with_timeout(&base_url, Duration::from_secs(config.api.timeout_secs))?;

    let mut loader: DatasetLoader<Dataset, FetchError> = DatasetLoader::new();
    loader.trigger(move |_| {
        let expenses = client.fetch_expenses()?;
        Ok(Dataset::from_expenses(&expenses)?)
    });
    let done = loader
        .wait()
        .ok_or_else(|| anyhow::anyhow!("no acquisition in flight"))?;
    let dataset = match done.result {
        Ok(d) => d,
        Err(LoadError::Job(e)) => return Err(e).context("fetch expenses"),
        Err(e) => return Err(anyhow::anyhow!("{}", e)),
    };
    if dataset.is_empty() {
        warn!("backend returned no expenses");
    }

    let opts = chart_options(config, &args.chart);
    if let Some(path) = args.plot.as_ref() {
        write_plot(&dataset, path, &opts, config, &args.chart)?;
    }
    save_and_report(&dataset, &args.save, &opts.locale)
}
