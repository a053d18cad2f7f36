//! Probe subprocess collaborator.
//!
//! Spawns the platform ping binary, streams its stdout through the line
//! classifier, maps recoverable stderr conditions to synthetic failure
//! entries, and hands the accumulated run to the analysis pipeline.

mod command;

pub use command::build_ping_args;

use crate::analysis::analyze_entries;
use crate::humanize::format_duration;
use crate::model::{ErrorKind, InfoEvent, PingEntry, ProbeEvent, RunConfig, RunReport};
use crate::parser::parse_line;
use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum ProbeControl {
    /// Stop the probe; the report still covers everything seen so far.
    Cancel,
}

/// How a stderr line from the ping binary should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StderrClass {
    /// Transient network condition: becomes a synthetic failure entry.
    Recoverable(ErrorKind),
    /// Anything else aborts the run.
    Fatal,
}

fn classify_stderr(line: &str) -> StderrClass {
    const RECOVERABLE: [&str; 5] = [
        "No route to host",
        "Network is unreachable",
        "Host is down",
        "Request timeout",
        "Destination unreachable",
    ];
    if !RECOVERABLE.iter().any(|m| line.contains(m)) {
        return StderrClass::Fatal;
    }
    if line.contains("No route to host") || line.contains("Network is unreachable") {
        StderrClass::Recoverable(ErrorKind::Unreachable)
    } else {
        StderrClass::Recoverable(ErrorKind::Other)
    }
}

pub struct ProbeEngine {
    cfg: RunConfig,
}

impl ProbeEngine {
    pub fn new(cfg: RunConfig) -> Self {
        Self { cfg }
    }

    /// Run ping to completion (or cancellation) and return the analyzed report.
    pub async fn run(
        self,
        event_tx: mpsc::UnboundedSender<ProbeEvent>,
        mut control_rx: mpsc::UnboundedReceiver<ProbeControl>,
    ) -> Result<RunReport> {
        let args = build_ping_args(&self.cfg);
        let _ = event_tx.send(ProbeEvent::Info(InfoEvent::ProbeStarted {
            host: self.cfg.host.clone(),
            args: args.clone(),
        }));
        log::debug!("spawning ping {}", args.join(" "));

        let mut child = Command::new("ping")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("failed to spawn ping")?;

        let stdout = child.stdout.take().context("ping stdout not captured")?;
        let stderr = child.stderr.take().context("ping stderr not captured")?;
        let mut out_lines = BufReader::new(stdout).lines();
        let mut err_lines = BufReader::new(stderr).lines();

        let start = Instant::now();
        let mut entries: Vec<PingEntry> = Vec::new();
        let mut out_done = false;
        let mut err_done = false;
        let mut cancelled = false;
        let mut fatal: Option<String> = None;

        while !(out_done && err_done) {
            tokio::select! {
                line = out_lines.next_line(), if !out_done => {
                    match line.context("failed to read ping stdout")? {
                        Some(line) => {
                            if let Some(entry) = parse_line(line.trim()) {
                                entries.push(entry.clone());
                                let _ = event_tx.send(ProbeEvent::Entry(entry));
                            }
                        }
                        None => out_done = true,
                    }
                }
                line = err_lines.next_line(), if !err_done => {
                    match line.context("failed to read ping stderr")? {
                        Some(line) => match classify_stderr(&line) {
                            StderrClass::Recoverable(kind) => {
                                log::warn!("ping stderr (continuing): {line}");
                                let entry = PingEntry::failure(kind, None, None);
                                entries.push(entry.clone());
                                let _ = event_tx.send(ProbeEvent::Entry(entry));
                            }
                            StderrClass::Fatal => {
                                log::error!("ping stderr (fatal): {line}");
                                if fatal.is_none() {
                                    fatal = Some(line);
                                    let _ = child.start_kill();
                                }
                            }
                        },
                        None => err_done = true,
                    }
                }
                ctrl = control_rx.recv(), if !cancelled => {
                    // A closed channel means every controller is gone; treat it
                    // like a cancel so the child never outlives its consumers.
                    match ctrl {
                        Some(ProbeControl::Cancel) | None => {
                            cancelled = true;
                            let _ = event_tx.send(ProbeEvent::Info(InfoEvent::Message(
                                "Stopping…".into(),
                            )));
                            let _ = child.start_kill();
                        }
                    }
                }
            }
        }

        let status = child.wait().await.context("failed to wait for ping")?;
        log::debug!("ping exited with {status}");

        if let Some(line) = fatal {
            return Err(anyhow::anyhow!("ping failed: {line}"));
        }

        Ok(RunReport {
            timestamp_utc: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "now".into()),
            host: self.cfg.host.clone(),
            duration: format_duration(start.elapsed()),
            analysis: analyze_entries(&entries, &self.cfg.analysis),
            entries,
            config: self.cfg,
        })
    }
}
