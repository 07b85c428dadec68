//! Report generation for simulation results.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use crate::config::SimulationConfig;
use crate::model::is_urgent;

use super::types::SimulationReport;

/// Generate JSON report
pub fn generate_json_report(report: &SimulationReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Generate human-readable text report
pub fn generate_text_report(report: &SimulationReport, output_path: &Path) -> Result<()> {
    let content = render_text_report(report);
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

fn banner(lines: &mut Vec<String>, title: &str) {
    lines.push("=".repeat(80));
    lines.push(format!("{:^80}", title));
    lines.push("=".repeat(80));
    lines.push(String::new());
}

pub fn render_text_report(report: &SimulationReport) -> String {
    let meta = &report.metadata;
    let mut lines: Vec<String> = Vec::new();

    banner(&mut lines, "IOT TRANSMISSION RESEARCH REPORT");

    // Methodology
    lines.push(format!("Generated: {}", meta.generated_at));
    lines.push(String::new());
    lines.push("Methodology Summary:".to_string());
    lines.push(format!("  Total Devices: {}", meta.total_devices));
    for (class, count) in &meta.device_counts {
        lines.push(format!("    {}: {}", class, count));
    }
    lines.push(format!("  Simulation Duration: {} minutes", meta.duration_minutes));
    lines.push(format!("  Monte Carlo Runs: {}", meta.trial_count));
    lines.push(format!("  Events per Run: {}", meta.events_per_trial));
    lines.push(format!("  Random Seed: {} (Reproducible)", meta.seed));
    lines.push(String::new());
    lines.push("Latency Formula:".to_string());
    lines.push("  Latency = Base_Latency + (Data_Size / Bandwidth)".to_string());
    lines.push(format!("  Baseline:  {}", meta.baseline_latency_formula));
    lines.push(format!("  Optimized: {}", meta.optimized_latency_formula));
    lines.push(String::new());

    // Results
    banner(&mut lines, "MONTE CARLO RESULTS");
    lines.push(format!(
        "{:<16} {:>22} {:>22} {:>13}  {}",
        "Metric", "Baseline", "Optimized", "Improvement", "Interpretation"
    ));
    lines.push("-".repeat(80));
    for summary in &report.summary.metrics {
        lines.push(format!(
            "{:<16} {:>22} {:>22} {:>13}  {}",
            format!("{} ({})", summary.metric, summary.metric.unit()),
            format!("{:.2} ± {:.2}", summary.baseline.mean, summary.baseline.ci95),
            format!("{:.2} ± {:.2}", summary.optimized.mean, summary.optimized.ci95),
            summary.improvement.to_string(),
            summary.metric.interpretation()
        ));
    }
    lines.push(String::new());
    lines.push("  Values are means of per-run averages with 95% confidence half-widths.".to_string());
    lines.push("  Improvement % = (Baseline - Optimized) / Baseline x 100".to_string());
    lines.push(String::new());

    // Event distribution
    banner(&mut lines, "EVENT DISTRIBUTION");
    let total_events = report.results.total_events().max(1) as f64;
    for (name, count) in &report.results.event_distribution {
        lines.push(format!(
            "  {:<20} {:>10} ({:>5.1}%){}",
            name,
            count,
            *count as f64 / total_events * 100.0,
            if is_urgent(name) { "  [urgent]" } else { "" }
        ));
    }
    lines.push(String::new());

    // Sample trace
    if !report.results.sample_trace.is_empty() {
        banner(&mut lines, "SAMPLE EVENTS (RUN 1)");
        lines.push(format!(
            "  {:<3} {:<18} {:>8} {:>7} {:>10} {:>10} {:>10} {:>10}",
            "#", "Event", "Size kb", "Urgent", "Base ms", "Opt ms", "Base kb", "Opt kb"
        ));
        for (i, record) in report.results.sample_trace.iter().enumerate() {
            lines.push(format!(
                "  {:<3} {:<18} {:>8} {:>7} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                i + 1,
                record.type_name,
                record.data_kb,
                if record.urgency { "yes" } else { "no" },
                record.baseline_latency,
                record.optimized_latency,
                record.baseline_bandwidth,
                record.optimized_bandwidth
            ));
        }
        lines.push(String::new());
    }

    // Footer
    lines.push("=".repeat(80));

    lines.join("\n")
}

/// Describe the event model and formulas of a configuration
pub fn render_model_description(config: &SimulationConfig) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("EVENT GENERATION MODEL".to_string());
    lines.push(String::new());
    for spec in &config.event_types {
        lines.push(format!(
            "  {} -> Size: {}KB | Probability: {}{}",
            spec.name,
            spec.size_kb,
            spec.probability,
            if is_urgent(&spec.name) { " | urgent" } else { "" }
        ));
    }
    lines.push(String::new());

    lines.push("FORMULAS USED".to_string());
    lines.push(String::new());
    lines.push(format!("  Baseline  {}", config.baseline_latency_formula()));
    lines.push(format!("  Optimized {}", config.optimized_latency_formula()));
    lines.push(format!(
        "  Energy = Data_kb x Energy_per_kb (baseline {}, optimized {})",
        config.baseline.energy_per_kb, config.optimized.energy_per_kb
    ));
    lines.push(format!(
        "  Optimized bandwidth = {} kb for urgent events, Data_kb x {} otherwise",
        config.optimized.urgent_metadata_kb, config.optimized.routine_compression_ratio
    ));
    lines.push("  Improvement % = (Baseline - Optimized) / Baseline x 100".to_string());
    lines.push(String::new());

    lines.push(format!(
        "  Simulation Duration: {} minutes",
        config.general.duration_minutes
    ));
    lines.push(format!("  Devices: {}", config.total_devices()));
    lines.push(format!("  Monte Carlo Runs: {}", config.general.trials));
    lines.push(format!("  Random Seed: {}", config.general.seed));

    lines.join("\n")
}

/// Print a summary to stdout
pub fn print_summary(report: &SimulationReport) {
    println!("\n=== TRANSMISSION STRATEGY COMPARISON ===\n");
    println!("Devices: {}", report.metadata.total_devices);
    println!("Runs: {}", report.metadata.trial_count);
    println!("Events per run: {}", report.metadata.events_per_trial);
    println!("Seed: {}", report.metadata.seed);

    for summary in &report.summary.metrics {
        println!(
            "\n{} ({}):\n  Baseline:    {:.2}\n  Optimized:   {:.2}\n  Improvement: {}",
            summary.metric,
            summary.metric.unit(),
            summary.baseline.mean,
            summary.optimized.mean,
            summary.improvement
        );
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{summarize, Metric, ReportMetadata};
    use crate::simulation::run_simulation;
    use tempfile::TempDir;

    fn small_report() -> SimulationReport {
        let mut config = SimulationConfig::default();
        config.general.duration_minutes = 2;
        config.general.trials = 3;
        let results = run_simulation(&config).unwrap();
        SimulationReport {
            metadata: ReportMetadata::from_config(&config),
            summary: summarize(&results).unwrap(),
            results,
        }
    }

    #[test]
    fn test_text_report_sections() {
        let text = render_text_report(&small_report());
        assert!(text.contains("Total Devices: 37"));
        assert!(text.contains("Simulation Duration: 2 minutes"));
        assert!(text.contains("Monte Carlo Runs: 3"));
        assert!(text.contains("Random Seed: 42 (Reproducible)"));
        assert!(text.contains("Baseline:  Latency = 300 + (Data_kb / 10)"));
        assert!(text.contains("Optimized: Latency = 50 + (Data_kb / 100)"));
        assert!(text.contains("EVENT DISTRIBUTION"));
        assert!(text.contains("SAMPLE EVENTS"));
        assert!(text.contains("Edge reduces WAN delay"));
    }

    #[test]
    fn test_results_table_columns_align() {
        let text = render_text_report(&small_report());
        let lines: Vec<&str> = text.lines().collect();
        let column = |line: &str, needle: &str| line[..line.find(needle).unwrap()].chars().count();

        let header = lines.iter().copied().find(|l| l.starts_with("Metric ")).unwrap();
        let interpretation = column(header, "Interpretation");
        let improvement_end = column(header, "Improvement") + "Improvement".len();

        for metric in Metric::ALL {
            let label = format!("{} ({})", metric, metric.unit());
            let row = lines.iter().copied().find(|l| l.starts_with(&label)).unwrap();
            assert_eq!(column(row, metric.interpretation()), interpretation, "{}", row);

            let before_gap = row.chars().take(interpretation - 2).collect::<String>();
            assert_eq!(before_gap.chars().count(), improvement_end);
            assert!(before_gap.ends_with('%') || before_gap.ends_with("undefined"));
        }
    }

    #[test]
    fn test_reports_written_to_disk() {
        let dir = TempDir::new().unwrap();
        let report = small_report();

        let json_path = dir.path().join("report.json");
        let text_path = dir.path().join("report.txt");
        generate_json_report(&report, &json_path).unwrap();
        generate_text_report(&report, &text_path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["metadata"]["seed"], 42);
        assert_eq!(json["metadata"]["total_devices"], 37);
        assert_eq!(json["results"]["events_per_trial"], 74);
        assert_eq!(json["results"]["baseline"].as_array().unwrap().len(), 3);
        assert_eq!(json["summary"]["metrics"][0]["metric"], "latency");

        assert!(fs::read_to_string(&text_path).unwrap().contains("MONTE CARLO RESULTS"));
    }

    #[test]
    fn test_json_report_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.json");
        assert!(generate_json_report(&small_report(), &path).is_err());
    }

    #[test]
    fn test_model_description() {
        let text = render_model_description(&SimulationConfig::default());
        assert!(text.contains("camera_snapshot -> Size: 500KB | Probability: 0.15"));
        assert!(text.contains("alarm_trigger -> Size: 100KB | Probability: 0.05 | urgent"));
        assert!(text.contains("Baseline  Latency = 300 + (Data_kb / 10)"));
        assert!(text.contains("Monte Carlo Runs: 30"));
    }
}
