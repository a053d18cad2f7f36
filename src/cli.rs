use crate::model::{
    AnalysisOptions, PingEntry, ProbeEvent, RunConfig, RunReport,
};
use crate::probe::{ProbeControl, ProbeEngine};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "pingscope",
    version,
    about = "Run ping (or read a captured transcript) and score the connection"
)]
pub struct Cli {
    /// Host to probe (required unless --input is given)
    pub host: Option<String>,

    /// Number of packets to send (default: until interrupted)
    #[arg(long, short = 'c')]
    pub count: Option<u64>,

    /// Wait interval between packets
    #[arg(long, short = 'i', default_value = "1s")]
    pub interval: humantime::Duration,

    /// Time to wait for each response
    #[arg(long, short = 't', default_value = "5s")]
    pub timeout: humantime::Duration,

    /// Number of data bytes to send
    #[arg(long, short = 's')]
    pub size: Option<u32>,

    /// Analyze a captured ping transcript instead of probing ("-" for stdin)
    #[arg(long)]
    pub input: Option<std::path::PathBuf>,

    /// Print the JSON report instead of the text summary
    #[arg(long)]
    pub json: bool,

    /// Export the full run report to an auto-named JSON file
    #[arg(long, short = 'e')]
    pub export: bool,

    /// Export the full run report to this path instead of the auto-generated one
    #[arg(long)]
    pub export_path: Option<std::path::PathBuf>,

    /// Jitter threshold in milliseconds for the consistency score
    #[arg(long, default_value_t = 50.0)]
    pub jitter_threshold: f64,

    /// Reserved: timeout threshold in milliseconds
    #[arg(long, default_value_t = 1000.0)]
    pub timeout_threshold: f64,

    /// Reserved: stability threshold in percent
    #[arg(long, default_value_t = 95.0)]
    pub stability_threshold: f64,
}

/// Build a `RunConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> Result<RunConfig> {
    let host = args
        .host
        .clone()
        .context("a host is required unless --input is given")?;
    Ok(RunConfig {
        host,
        count: args.count,
        interval: Duration::from(args.interval),
        timeout: Duration::from(args.timeout),
        size: args.size,
        analysis: AnalysisOptions {
            timeout_threshold_ms: args.timeout_threshold,
            jitter_threshold_ms: args.jitter_threshold,
            stability_threshold_pct: args.stability_threshold,
        },
    })
}

pub async fn run(args: Cli) -> Result<()> {
    let report = if args.input.is_some() {
        run_offline(&args)?
    } else {
        run_probe(&args).await?
    };

    handle_exports(&args, &report)?;

    let (out_tx, out_handle) = spawn_output_writer();
    if args.json {
        let out = serde_json::to_string_pretty(&report.analysis)?;
        let _ = out_tx.send(OutputLine::Stdout(out));
    } else {
        for line in crate::text_summary::build_text_summary(&report).lines {
            let _ = out_tx.send(OutputLine::Stdout(line));
        }
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

/// Analyze a captured transcript without spawning anything.
fn run_offline(args: &Cli) -> Result<RunReport> {
    let path = args.input.as_deref().expect("checked by caller");
    let transcript = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let host = args
        .host
        .clone()
        .unwrap_or_else(|| path.display().to_string());
    let options = AnalysisOptions {
        timeout_threshold_ms: args.timeout_threshold,
        jitter_threshold_ms: args.jitter_threshold,
        stability_threshold_pct: args.stability_threshold,
    };
    let entries = crate::parser::parse_output(&transcript);
    let analysis = crate::analysis::analyze_entries(&entries, &options);

    Ok(RunReport {
        timestamp_utc: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into()),
        host: host.clone(),
        duration: "0s".to_string(),
        config: RunConfig {
            host,
            count: args.count,
            interval: Duration::from(args.interval),
            timeout: Duration::from(args.timeout),
            size: args.size,
            analysis: options,
        },
        analysis,
        entries,
    })
}

/// Spawn the probe engine and stream its entries until it finishes.
async fn run_probe(args: &Cli) -> Result<RunReport> {
    let cfg = build_config(args)?;
    let (out_tx, out_handle) = spawn_output_writer();
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<ProbeEvent>();
    let (ctrl_tx, ctrl_rx) = mpsc::unbounded_channel::<ProbeControl>();

    let engine = ProbeEngine::new(cfg);
    let handle = tokio::spawn(async move { engine.run(evt_tx, ctrl_rx).await });

    // Ctrl-C stops the probe; the report still covers everything seen so far.
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrl_tx.send(ProbeControl::Cancel);
        }
    });

    let echo_entries = !args.json;
    while let Some(ev) = evt_rx.recv().await {
        match ev {
            ProbeEvent::Entry(entry) => {
                if echo_entries {
                    let _ = out_tx.send(OutputLine::Stderr(entry_line(&entry)));
                }
            }
            ProbeEvent::Info(info) => {
                let _ = out_tx.send(OutputLine::Stderr(info.to_message()));
            }
        }
    }

    let report = handle
        .await
        .context("probe task failed")?
        .context("probe failed")?;

    drop(out_tx);
    let _ = out_handle.await;
    Ok(report)
}

/// One live-feed line per classified entry.
fn entry_line(entry: &PingEntry) -> String {
    let seq = entry
        .sequence
        .map(|s| format!("seq={s} "))
        .unwrap_or_default();
    match entry.time_ms() {
        Some(ms) => {
            let from = entry
                .source_ip
                .as_deref()
                .map(|ip| format!(" from {ip}"))
                .unwrap_or_default();
            let ttl = entry
                .ttl
                .map(|t| format!(" ttl={t}"))
                .unwrap_or_default();
            format!("{seq}time={ms:.1} ms{ttl}{from}")
        }
        None => match entry.error_kind() {
            Some(crate::model::ErrorKind::Timeout) => format!("{seq}timeout"),
            Some(crate::model::ErrorKind::Unreachable) => format!("{seq}unreachable"),
            _ => format!("{seq}error"),
        },
    }
}

/// Handle export flags for both text and JSON modes.
fn handle_exports(args: &Cli, report: &RunReport) -> Result<()> {
    if let Some(path) = args.export_path.as_deref() {
        crate::storage::export_json(path, report)?;
        eprintln!("Exported: {}", path.display());
    } else if args.export {
        let path = crate::storage::default_export_path(report)?;
        crate::storage::export_json(&path, report)?;
        eprintln!("Exported: {}", path.display());
    }
    Ok(())
}
