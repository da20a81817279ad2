use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use simple_cycles::{
    graph::io, CsrDigraph, CycleConfig, CycleEnumerator, CycleReport, SpawnPolicy,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "simple-cycles")]
#[command(about = "Count the simple cycles of a directed graph", long_about = None)]
struct Cli {
    /// Graph file (binary CSR or text edge list, detected by magic)
    graph: PathBuf,

    /// Worker threads (defaults to the number of cores)
    #[arg(long, short = 't')]
    threads: Option<usize>,

    /// Spawn policy; `all` runs every preset and checks that counts agree
    #[arg(long, short = 'p', value_enum, default_value_t = Preset::Sequential)]
    policy: Preset,

    /// Only count cycles with at most this many edges
    #[arg(long)]
    max_len: Option<usize>,

    /// Start later pivots before earlier searches have joined
    #[arg(long, default_value_t = false)]
    pipeline: bool,

    /// Store the loaded graph in binary form and exit
    #[arg(long, value_name = "OUT")]
    convert: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Sequential,
    Nested,
    RootOnly,
    RootUnbounded,
    All,
}

impl Preset {
    const RUNNABLE: [Preset; 4] = [
        Preset::Sequential,
        Preset::Nested,
        Preset::RootOnly,
        Preset::RootUnbounded,
    ];

    fn policy(self) -> SpawnPolicy {
        match self {
            Preset::Sequential | Preset::All => SpawnPolicy::sequential(),
            Preset::Nested => SpawnPolicy::nested(),
            Preset::RootOnly => SpawnPolicy::root_only(),
            Preset::RootUnbounded => SpawnPolicy::root_unbounded(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Preset::Sequential => "sequential",
            Preset::Nested => "nested",
            Preset::RootOnly => "root-only",
            Preset::RootUnbounded => "root-unbounded",
            Preset::All => "all",
        }
    }
}

#[derive(Serialize)]
struct NamedReport<'a> {
    policy: &'a str,
    #[serde(flatten)]
    report: &'a CycleReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let graph = io::load(&cli.graph)
        .with_context(|| format!("failed to load graph {}", cli.graph.display()))?;

    if let Some(out) = &cli.convert {
        io::store_binary(out, &graph)
            .with_context(|| format!("failed to store binary graph {}", out.display()))?;
        return Ok(());
    }

    let presets: &[Preset] = if cli.policy == Preset::All {
        &Preset::RUNNABLE
    } else {
        std::slice::from_ref(&cli.policy)
    };

    let mut reports = Vec::with_capacity(presets.len());
    for &preset in presets {
        let report = run_preset(&cli, &graph, preset)?;
        info!(
            policy = preset.name(),
            cycles = report.cycles,
            seconds = report.total_time.as_secs_f64(),
            "finished"
        );
        reports.push((preset, report));
    }

    if cli.json {
        let named: Vec<_> = reports
            .iter()
            .map(|(preset, report)| NamedReport {
                policy: preset.name(),
                report,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&named)?);
    } else {
        println!("graph: {} nodes, {} edges", graph.node_count(), graph.edge_count());
        for (preset, report) in &reports {
            println!(
                "{:<15} cycles={:<12} time={:.6}s scc={:.6}s searched={} forks={}",
                preset.name(),
                report.cycles,
                report.total_time.as_secs_f64(),
                report.decomposition_time.as_secs_f64(),
                report.pivots_searched,
                report.forks,
            );
        }
    }

    // Bounded counts below n depend on exploration order.
    let exact = cli.max_len.map_or(true, |k| k >= graph.node_count());
    if let Some((first, rest)) = reports.split_first().filter(|_| exact) {
        for (preset, report) in rest {
            if report.cycles != first.1.cycles {
                bail!(
                    "cycle count mismatch: {} found {}, {} found {}",
                    first.0.name(),
                    first.1.cycles,
                    preset.name(),
                    report.cycles
                );
            }
        }
    }

    Ok(())
}

fn run_preset(cli: &Cli, graph: &CsrDigraph, preset: Preset) -> Result<CycleReport> {
    let config = CycleConfig {
        policy: preset.policy(),
        threads: cli.threads,
        max_len: cli.max_len,
        pipeline: cli.pipeline,
    };
    CycleEnumerator::new(config)
        .run(graph)
        .with_context(|| format!("{} run failed", preset.name()))
}
