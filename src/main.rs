use anyhow::Result;
use clap::Parser;
use filter_bench_chart::chart::{write_html, ChartConfig};
use filter_bench_chart::figure::Figure;
use filter_bench_chart::filter::SizeFilter;
use filter_bench_chart::measurement::{read_measurements, Measurement};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filter-bench-chart")]
#[command(about = "Chart benchstat results of the Bloom/Cuckoo filter benchmarks")]
struct Cli {
    /// benchstat output to read
    #[arg(short, long, default_value = "assets/img/cuckoo/sizes_bench.txt.benchstat")]
    input: PathBuf,

    /// HTML file to write
    #[arg(short, long, default_value = "_includes/cuckoo_benchmark_figures.html")]
    output: PathBuf,

    /// Size categories to keep (repeatable)
    #[arg(short, long = "size")]
    sizes: Vec<String>,

    /// Optional heading above the chart
    #[arg(short, long)]
    title: Option<String>,

    /// Print the parsed measurements
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let size_filter = if cli.sizes.is_empty() {
        SizeFilter::default()
    } else {
        SizeFilter::new(cli.sizes)?
    };

    let measurements = read_measurements(&cli.input)?;
    let parsed = measurements.len();
    let measurements = size_filter.apply(measurements);

    println!(
        "Parsed {} measurements from {}, kept {} (sizes: {})",
        parsed,
        cli.input.display(),
        measurements.len(),
        size_filter.sizes().join(", ")
    );

    if cli.verbose {
        print_measurements(&measurements);
    }

    let mut figure = Figure::from_measurements(measurements);
    figure.strip_label_prefixes();

    let config = ChartConfig {
        title: cli.title,
        ..ChartConfig::default()
    };
    write_html(&figure, &config, &cli.output)?;

    Ok(())
}

fn print_measurements(measurements: &[Measurement]) {
    println!("\n{:=<80}", "");
    println!("Filter Benchmarks");
    println!("{:=<80}\n", "");

    println!(
        "  {:>8} {:>10} {:>20} {:>12}",
        "Size", "Method", "Filter", "Time"
    );
    println!("  {:-<60}", "");

    for m in measurements {
        println!(
            "  {:>8} {:>10} {:>20} {:>12}",
            m.size,
            m.method,
            m.filter,
            format!("{} {}", m.time, m.unit)
        );
    }
    println!();
}
