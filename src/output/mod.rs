//! Display sinks for sanitized metrics
//!
//! Sinks own all presentation. The scheduling core only ever hands them
//! a `SanitizedMetrics` plus a connectivity flag, or the one-time
//! unsupported notice.

use crate::models::{Config, SanitizedMetrics};
use crate::types::PerformanceLevel;
use chrono::Local;
use colored::Colorize;
use serde::Serialize;
use std::sync::Arc;

/// Placeholder shown for a metric that was not measured this cycle
pub const UNAVAILABLE: &str = "unavailable";

/// Consumer of sanitized metrics
pub trait DisplaySink: Send + Sync {
    /// Render one cycle's metrics and the current connectivity flag
    fn render(&self, metrics: &SanitizedMetrics, online: bool);

    /// Render the one-time degraded state for environments with no
    /// connectivity information at all
    fn render_unsupported(&self);
}

/// Creates the sink matching the output configuration
pub struct SinkFactory;

impl SinkFactory {
    pub fn create(config: &Config) -> Arc<dyn DisplaySink> {
        if config.json_output {
            Arc::new(JsonSink)
        } else {
            Arc::new(ConsoleSink::new(config.enable_color))
        }
    }
}

/// Human-readable one-line-per-cycle console sink
pub struct ConsoleSink {
    enable_color: bool,
}

impl ConsoleSink {
    pub fn new(enable_color: bool) -> Self {
        Self { enable_color }
    }
}

impl DisplaySink for ConsoleSink {
    fn render(&self, metrics: &SanitizedMetrics, online: bool) {
        let timestamp = Local::now().format("%H:%M:%S");
        println!("[{}] {}", timestamp, console_line(metrics, online, self.enable_color));
    }

    fn render_unsupported(&self) {
        println!(
            "Connectivity information is not available in this environment; \
             network quality cannot be measured."
        );
    }
}

/// Build the metric portion of a console line
fn console_line(metrics: &SanitizedMetrics, online: bool, use_color: bool) -> String {
    if !online {
        let label = "disconnected";
        return if use_color {
            label.red().bold().to_string()
        } else {
            label.to_string()
        };
    }

    let download = metrics
        .download_mbps
        .map(format_speed)
        .unwrap_or_else(|| UNAVAILABLE.to_string());
    let upload = metrics
        .upload_mbps
        .map(format_speed)
        .unwrap_or_else(|| UNAVAILABLE.to_string());
    let latency = metrics
        .latency_ms
        .map(|ms| format!("{} ms", ms))
        .unwrap_or_else(|| UNAVAILABLE.to_string());

    if use_color {
        let latency = match metrics.latency_ms.map(PerformanceLevel::from_latency_ms) {
            Some(PerformanceLevel::Good) => latency.green().to_string(),
            Some(PerformanceLevel::Moderate) => latency.yellow().to_string(),
            Some(PerformanceLevel::Poor) => latency.red().to_string(),
            None => latency.dimmed().to_string(),
        };
        format!("↓ {}   ↑ {}   rtt {}", download, upload, latency)
    } else {
        format!("↓ {}   ↑ {}   rtt {}", download, upload, latency)
    }
}

/// Format a throughput value for display
pub fn format_speed(mbps: f64) -> String {
    if mbps >= 100.0 {
        format!("{:.0} Mbps", mbps)
    } else if mbps >= 10.0 {
        format!("{:.1} Mbps", mbps)
    } else {
        format!("{:.2} Mbps", mbps)
    }
}

/// Machine-readable sink: one JSON object per line on stdout
pub struct JsonSink;

#[derive(Serialize)]
struct JsonLine<'a> {
    timestamp: String,
    online: bool,
    #[serde(flatten)]
    metrics: &'a SanitizedMetrics,
}

fn json_line(metrics: &SanitizedMetrics, online: bool) -> String {
    let line = JsonLine {
        timestamp: Local::now().to_rfc3339(),
        online,
        metrics,
    };
    // Serialization of this shape cannot fail; fall back to a bare
    // object rather than propagating.
    serde_json::to_string(&line).unwrap_or_else(|_| "{}".to_string())
}

impl DisplaySink for JsonSink {
    fn render(&self, metrics: &SanitizedMetrics, online: bool) {
        println!("{}", json_line(metrics, online));
    }

    fn render_unsupported(&self) {
        println!("{}", r#"{"unsupported":true}"#);
    }
}
