use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dfd_rs::report::Report;
use dfd_rs::{Selection, filter, loader, storage, viz};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dfd",
    version,
    about = "Load, filter, summarize & visualize digital-focus survey data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the dashboard report for a filter selection (and optionally
    /// save it, export tables, and render charts).
    Report(ReportArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlotFormat {
    Svg,
    Png,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Path to the survey CSV export.
    #[arg(short, long, default_value = "survey.csv")]
    data: PathBuf,
    /// Age groups to include, separated by comma or semicolon.
    /// Omit to include every age group present in the data.
    #[arg(long)]
    ages: Option<String>,
    /// Occupations to include, separated by comma or semicolon.
    /// Omit to include every occupation present in the data.
    #[arg(long)]
    occupations: Option<String>,
    /// Save the full report as pretty JSON.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write per-topic CSV tables into this directory.
    #[arg(long)]
    tables: Option<PathBuf>,
    /// Write bar charts into this directory.
    #[arg(long)]
    plot_dir: Option<PathBuf>,
    /// Chart file format.
    #[arg(long, value_enum, default_value = "svg")]
    plot_format: PlotFormat,
    /// Width of each chart (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of each chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Print the aggregate tables to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.1}"),
        _ => "NA".to_string(),
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
    }
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let records = loader::load_cached(&args.data)?;

    let default = Selection::all(&records);
    let selection = Selection {
        age_groups: match &args.ages {
            Some(s) => parse_list(s).into_iter().collect(),
            None => default.age_groups,
        },
        occupations: match &args.occupations {
            Some(s) => parse_list(s).into_iter().collect(),
            None => default.occupations,
        },
    };

    let subset = filter::apply(&records, &selection)?;
    let report = Report::build(&subset);

    println!("Respondents: {} of {}", report.respondents, records.len());
    println!(
        "Average attention rating (1-5): {}",
        fmt_opt(report.mean_attention)
    );
    println!(
        "Average distraction rating (1-5): {}",
        fmt_opt(report.mean_distraction)
    );
    println!();
    println!("{}", report.insights.attention);
    println!("{}", report.insights.distraction);
    println!("{}", report.insights.screen_time);
    println!("{}", report.insights.platform);
    println!("{}", report.insights.strategy);
    println!("{}", report.insights.focus_balance);
    println!("{}", report.insights.correlation_attention);
    println!("{}", report.insights.correlation_distraction);
    for extra in [
        &report.insights.high_screen_time,
        &report.insights.demographic,
        &report.insights.screen_time_trend,
        &report.insights.best_strategy,
        &report.insights.focus_duration,
        &report.insights.digital_guilt,
        &report.insights.emotional_impact,
    ]
    .into_iter()
    .flatten()
    {
        println!("{extra}");
    }

    if args.stats {
        print_tables(&report);
    }

    if let Some(path) = args.out.as_ref() {
        storage::save_report_json(&report, path)?;
        eprintln!("Saved report to {}", path.display());
    }

    if let Some(dir) = args.tables.as_ref() {
        fs::create_dir_all(dir)?;
        storage::save_counts_csv(
            &report.demographics.age_groups,
            "age_group",
            dir.join("age_groups.csv"),
        )?;
        storage::save_counts_csv(
            &report.demographics.occupations,
            "occupation",
            dir.join("occupations.csv"),
        )?;
        storage::save_counts_csv(&report.platforms, "platform", dir.join("platforms.csv"))?;
        storage::save_counts_csv(
            &report.screen_time_counts,
            "screen_time",
            dir.join("screen_time.csv"),
        )?;
        storage::save_buckets_csv(
            &report.distraction_by_screen_time,
            dir.join("screen_time_distraction.csv"),
        )?;
        storage::save_means_csv(&report.strategies, "strategy", dir.join("strategies.csv"))?;
        storage::save_counts_csv(&report.words, "word", dir.join("words.csv"))?;
        eprintln!("Wrote tables to {}", dir.display());
    }

    if let Some(dir) = args.plot_dir.as_ref() {
        fs::create_dir_all(dir)?;
        let ext = match args.plot_format {
            PlotFormat::Svg => "svg",
            PlotFormat::Png => "png",
        };
        let (w, h) = (args.width, args.height);
        if !report.demographics.age_groups.is_empty() {
            viz::plot_counts(
                &report.demographics.age_groups,
                "Age Group Distribution",
                dir.join(format!("age_groups.{ext}")),
                w,
                h,
            )?;
        }
        if !report.demographics.occupations.is_empty() {
            viz::plot_counts(
                &report.demographics.occupations,
                "Occupation Distribution",
                dir.join(format!("occupations.{ext}")),
                w,
                h,
            )?;
        }
        if !report.platforms.is_empty() {
            viz::plot_counts(
                &report.platforms,
                "Most Commonly Used Digital Platforms",
                dir.join(format!("platforms.{ext}")),
                w,
                h,
            )?;
        }
        if !report.distraction_by_screen_time.is_empty() {
            viz::plot_bucket_means(
                &report.distraction_by_screen_time,
                "Average Distraction Rating by Daily Screen Time",
                dir.join(format!("screen_time_distraction.{ext}")),
                w,
                h,
            )?;
        }
        if !report.strategies.is_empty() {
            viz::plot_means(
                &report.strategies,
                "Average Effectiveness of Coping Strategies",
                dir.join(format!("strategies.{ext}")),
                w,
                h,
            )?;
        }
        eprintln!("Wrote plots to {}", dir.display());
    }

    Ok(())
}

fn print_tables(report: &Report) {
    println!("\nAge groups:");
    for e in &report.demographics.age_groups {
        println!("  {:<28} {}", e.label, e.count);
    }
    println!("\nOccupations:");
    for e in &report.demographics.occupations {
        println!("  {:<28} {}", e.label, e.count);
    }
    println!("\nScreen time:");
    for e in &report.screen_time_counts {
        println!("  {:<28} {}", e.label, e.count);
    }
    println!("\nPlatforms:");
    for e in &report.platforms {
        println!("  {:<28} {}", e.label, e.count);
    }
    println!("\nAverage distraction by screen time:");
    for s in &report.distraction_by_screen_time {
        println!(
            "  {:<28} {:.2} (n={})",
            s.bucket, s.mean_distraction, s.count
        );
    }
    println!("\nCoping strategies by effectiveness:");
    for e in &report.strategies {
        println!("  {:<28} {:.2} (n={})", e.label, e.mean, e.count);
    }
    println!("\nMost frequent words:");
    for e in report.words.iter().take(20) {
        println!("  {:<28} {}", e.label, e.count);
    }
}
