//! Rendering of scan results for the terminal or for other tools.

use crate::error::{Result, RinexError};
use crate::models::{KindHeader, ParsedFile, ScanFailure, ScanStats};
use crate::processor::ScanReport;
use crate::qc::QcWindow;
use colored::*;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Human readable report, one block per file followed by a summary
pub fn render_text(report: &ScanReport, with_qc: bool) -> String {
    let mut out = String::new();

    for entry in &report.entries {
        write_entry(&mut out, &entry.parsed, with_qc);
    }

    if !report.failures.is_empty() {
        let _ = writeln!(out, "\n{}", "Failures".bright_red().bold());
        for failure in &report.failures {
            let _ = writeln!(
                out,
                "  {} {}",
                failure.path.display().to_string().bright_white(),
                failure.error.red()
            );
        }
    }

    write_summary(&mut out, &report.stats, report.site_count);
    out
}

fn write_entry(out: &mut String, parsed: &ParsedFile, with_qc: bool) {
    let _ = writeln!(out, "{}", parsed.file_name().bright_green().bold());
    let _ = writeln!(
        out,
        "  {} {}  {} {}  {} {}",
        "Marker:".bright_cyan(),
        parsed.marker_name(),
        "Kind:".bright_cyan(),
        parsed.record_kind(),
        "Cadence:".bright_cyan(),
        parsed.cadence()
    );
    let _ = writeln!(
        out,
        "  {} {}  {} {:.2}{}",
        "Start:".bright_cyan(),
        parsed.start_time().format("%Y-%m-%d %H:%M"),
        "Version:".bright_cyan(),
        parsed.version(),
        if parsed.is_hatanaka_compressed() {
            "  (Hatanaka compressed)".yellow().to_string()
        } else {
            String::new()
        }
    );

    if let Some(number) = parsed.marker_number() {
        let _ = writeln!(out, "  {} {}", "Marker number:".bright_cyan(), number);
    }

    match parsed.kind_header() {
        KindHeader::Observation(obs) => {
            let _ = writeln!(
                out,
                "  {} {} {} ({})",
                "Receiver:".bright_cyan(),
                obs.receiver_type,
                obs.receiver_version,
                obs.receiver_number
            );
            let _ = writeln!(
                out,
                "  {} {} ({})  {} {:.4}/{:.4}/{:.4}",
                "Antenna:".bright_cyan(),
                obs.antenna_type,
                obs.antenna_number,
                "H/E/N:".bright_cyan(),
                obs.antenna_height,
                obs.antenna_east,
                obs.antenna_north
            );
        }
        KindHeader::Meteorological(met) => {
            let _ = writeln!(
                out,
                "  {} {}  {} {:.4}",
                "Sensor:".bright_cyan(),
                met.sensor_type,
                "Height:".bright_cyan(),
                met.sensor_height
            );
        }
        KindHeader::Navigation => {}
    }

    if with_qc {
        let window = parsed.qc_window();
        let _ = writeln!(
            out,
            "  {} {} .. {}  {} {}",
            "QC window:".bright_cyan(),
            window.begin_string(),
            window.end_string(),
            "Key:".bright_cyan(),
            parsed.storage_key()
        );
    }
}

fn write_summary(out: &mut String, stats: &ScanStats, site_count: usize) {
    let _ = writeln!(out, "\n{}", "Scan Summary".bright_green().bold());
    let _ = writeln!(
        out,
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    let _ = writeln!(
        out,
        "  {} {} ({} sites)",
        "Files parsed:".bright_cyan(),
        stats.files_parsed.to_string().bright_white().bold(),
        site_count
    );
    let _ = writeln!(
        out,
        "  {} {} observation, {} navigation, {} meteorological",
        "By kind:".bright_cyan(),
        stats.observation_files,
        stats.navigation_files,
        stats.meteorological_files
    );
    if stats.compressed_files > 0 {
        let _ = writeln!(
            out,
            "  {} {}",
            "Need decompression:".bright_cyan(),
            stats.compressed_files
        );
    }
    if stats.files_failed > 0 {
        let _ = writeln!(
            out,
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonEntry<'a>>,
    failures: &'a [ScanFailure],
    stats: &'a ScanStats,
    site_count: usize,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    path: &'a Path,
    #[serde(flatten)]
    parsed: &'a ParsedFile,
    storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    qc_window: Option<QcWindow>,
}

/// Machine readable report
pub fn render_json(report: &ScanReport, with_qc: bool) -> Result<String> {
    let files = report
        .entries
        .iter()
        .map(|entry| JsonEntry {
            path: &entry.path,
            parsed: &entry.parsed,
            storage_key: entry.parsed.storage_key(),
            qc_window: with_qc.then(|| entry.parsed.qc_window()),
        })
        .collect();

    let json = JsonReport {
        files,
        failures: &report.failures,
        stats: &report.stats,
        site_count: report.site_count,
    };

    serde_json::to_string_pretty(&json)
        .map_err(|e| RinexError::configuration(format!("could not serialize report: {}", e)))
}
