use crate::explanations::Explanation;
use std::fmt::Write;

/// One bar of a waterfall chart.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallSegment {
    /// Feature name.
    pub feature: String,
    /// The feature's input value for this client.
    pub data: f64,
    /// The feature's attribution.
    pub contribution: f64,
    /// Running total before this feature.
    pub start: f64,
    /// Running total after this feature.
    pub end: f64,
}

/// Waterfall chart data: how individual feature attributions accumulate from
/// the model baseline to the final prediction for one client.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallChart {
    pub base_value: f64,
    pub final_value: f64,
    pub segments: Vec<WaterfallSegment>,
}

impl WaterfallChart {
    /// Builds the cumulative segments from an (already reordered)
    /// explanation. Each segment starts where the previous one ended; the
    /// first starts at the baseline.
    pub fn from_explanation(explanation: &Explanation) -> Self {
        let mut running = explanation.base_value;
        let mut segments = Vec::with_capacity(explanation.values.len());

        for (i, &contribution) in explanation.values.iter().enumerate() {
            let start = running;
            running += contribution;
            segments.push(WaterfallSegment {
                feature: explanation.feature_names[i].clone(),
                data: explanation.data[i],
                contribution,
                start,
                end: running,
            });
        }

        WaterfallChart {
            base_value: explanation.base_value,
            final_value: running,
            segments,
        }
    }

    /// Renders the chart for a terminal: one bar per feature, scaled to the
    /// largest attribution, positive contributions to the right of the axis
    /// and negative ones to the left.
    pub fn render_text(&self) -> String {
        const BAR_WIDTH: usize = 24;

        let name_width = self
            .segments
            .iter()
            .map(|s| s.feature.len())
            .max()
            .unwrap_or(0);
        let max_abs = self
            .segments
            .iter()
            .map(|s| s.contribution.abs())
            .fold(0.0_f64, f64::max);

        let mut out = String::new();
        let _ = writeln!(out, "E[f(X)] = {:+.4}", self.base_value);
        for segment in &self.segments {
            let scaled = if max_abs > 0.0 {
                ((segment.contribution.abs() / max_abs) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let bar: String = if segment.contribution < 0.0 {
                format!("{:>width$}|", "-".repeat(scaled), width = BAR_WIDTH)
            } else {
                format!("{:>width$}|{}", "", "+".repeat(scaled), width = BAR_WIDTH)
            };
            let _ = writeln!(
                out,
                "{:>name_width$} = {:<12} {} {:+.4}",
                segment.feature,
                format!("{:.4}", segment.data),
                bar,
                segment.contribution,
            );
        }
        let _ = writeln!(out, "f(x) = {:+.4}", self.final_value);
        out
    }
}
