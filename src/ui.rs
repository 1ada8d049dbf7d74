//! Terminal rendering: spinners and colored output.
//!
//! Uses `indicatif` for the spinner shown while simulated work runs and
//! `console` for colors. [`Renderer`] prints each panel of the assistant.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::{Insight, Polarity, SuggestedQuery, Trend};
use crate::chat::{ChatSession, MetricGroup, Role};
use crate::error::UploadError;
use crate::shell::{AppState, NavItem};
use crate::upload::{ACCEPTED_EXTENSIONS, FileRow, FileStatus};
use crate::workflow::{ProcessedFile, SummaryReport};

/// Spinner shown while a simulated delay elapses.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn set_message(&self, message: String) {
        self.pb.set_message(message);
    }

    pub fn println(&self, line: String) {
        self.pb.println(line);
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

pub struct Renderer {
    green: Style,
    red: Style,
    yellow: Style,
    blue: Style,
    bold: Style,
    dim: Style,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            blue: Style::new().blue(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }
}

impl Renderer {
    fn polarity_style(&self, polarity: Polarity) -> &Style {
        match polarity {
            Polarity::Positive => &self.green,
            Polarity::Negative => &self.red,
            Polarity::Warning => &self.yellow,
            Polarity::Neutral => &self.blue,
        }
    }

    fn status_mark(&self, status: FileStatus) -> String {
        match status {
            FileStatus::Pending => self.blue.apply_to("…").to_string(),
            FileStatus::Completed => self.green.apply_to("✓").to_string(),
            FileStatus::Errored => self.red.apply_to("✗").to_string(),
        }
    }

    pub fn header(&self, state: &AppState) {
        let nav: Vec<String> = NavItem::ALL
            .iter()
            .map(|item| {
                if state.is_highlighted(*item) {
                    self.bold.apply_to(format!("[{item}]")).to_string()
                } else {
                    self.dim.apply_to(item.to_string()).to_string()
                }
            })
            .collect();
        let title = format!("─── {} ───", state.header_title());
        println!(
            "{}  {}",
            self.bold.apply_to("MarketMaestro"),
            nav.join("  ")
        );
        println!("{}", self.bold.apply_to(title));
    }

    pub fn upload_hint(&self, remaining_slots: usize) {
        println!(
            "  {}",
            self.dim.apply_to(format!(
                "Supported formats: {}",
                ACCEPTED_EXTENSIONS.join(", ")
            ))
        );
        if remaining_slots > 0 {
            let noun = if remaining_slots == 1 {
                "slot"
            } else {
                "slots"
            };
            println!("  {remaining_slots} {noun} remaining");
        }
    }

    pub fn upload_error(&self, err: &UploadError) {
        println!("  {} {err}", self.red.apply_to("!"));
    }

    pub fn file_row(&self, row: &FileRow) -> String {
        format!(
            "  {} {}  {}",
            self.status_mark(row.status),
            row.name,
            self.dim.apply_to(&row.size)
        )
    }

    pub fn file_rows(&self, rows: &[FileRow]) {
        if rows.is_empty() {
            return;
        }
        println!("{}", self.bold.apply_to("Uploaded Files"));
        for row in rows {
            println!("{}", self.file_row(row));
        }
    }

    /// The table shown in the dialog before summarizing.
    pub fn processed_table(&self, files: &[ProcessedFile]) {
        println!("{}", self.bold.apply_to("File Summary"));
        for file in files {
            println!(
                "  {:<36} {:>10}  {}",
                file.name,
                file.size_label,
                self.status_mark(file.status)
            );
        }
    }

    pub fn insight(&self, insight: &Insight) {
        let style = self.polarity_style(insight.polarity);
        println!(
            "  {} {}",
            style.apply_to("■"),
            style.apply_to(&insight.title)
        );
        println!("    {}", insight.description);
    }

    pub fn report(&self, report: &SummaryReport) {
        println!();
        println!("{}", self.green.apply_to("Files Summarized Successfully"));
        for insight in &report.insights {
            self.insight(insight);
        }
        println!();
        println!("{}", self.bold.apply_to("Processed Files"));
        for file in &report.processed_files {
            println!("  {} {}", self.status_mark(file.status), file.name);
        }
    }

    pub fn report_json(&self, report: &SummaryReport) -> Result<(), serde_json::Error> {
        println!("{}", serde_json::to_string_pretty(report)?);
        Ok(())
    }

    fn trend_mark(&self, trend: Trend) -> String {
        match trend {
            Trend::Up => self.green.apply_to("▲").to_string(),
            Trend::Down => self.red.apply_to("▼").to_string(),
            Trend::Neutral => self.dim.apply_to("–").to_string(),
        }
    }

    pub fn metric_groups(&self, groups: &[MetricGroup]) {
        for group in groups {
            println!("  {}", self.bold.apply_to(&group.category));
            for metric in &group.metrics {
                match &metric.details {
                    Some(details) => println!(
                        "    {} {} {}",
                        self.trend_mark(metric.trend),
                        metric.value,
                        self.dim.apply_to(format!("({details})"))
                    ),
                    None => println!("    {} {}", self.trend_mark(metric.trend), metric.value),
                }
            }
        }
    }

    pub fn suggestions(&self, queries: &[SuggestedQuery]) {
        println!("{}", self.bold.apply_to("Suggested Queries"));
        for (index, q) in queries.iter().enumerate() {
            println!("  {index}. {}  {}", q.title, self.dim.apply_to(&q.query));
        }
    }

    pub fn transcript(&self, chat: &ChatSession) {
        for message in chat.messages() {
            match message.role {
                Role::User => println!("{} {}", self.blue.apply_to("you ›"), message.content),
                Role::Assistant => {
                    println!("{} {}", self.green.apply_to("maestro ›"), message.content);
                    if chat.results_visible() {
                        self.metric_groups(&chat.grouped_metrics());
                        println!("  {}", self.bold.apply_to("Related Insights"));
                        for insight in chat.related_insights() {
                            self.insight(insight);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_row_contains_name_and_size() {
        console::set_colors_enabled(false);
        let renderer = Renderer::default();
        let line = renderer.file_row(&FileRow {
            name: "report.pdf".into(),
            size: "2.80 MB".into(),
            status: FileStatus::Completed,
        });
        assert_eq!(line, "  ✓ report.pdf  2.80 MB");
    }
}
