//! Terminal progress bars.
//!
//! [`ProgressBar`] redraws in place with a carriage return; rendering is
//! split from display so the line composition is testable without a
//! terminal. When the styler is disabled, display is suppressed entirely
//! (progress output is decoration, not data).

use crate::styler::Styler;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// A single progress bar.
///
/// ```rust
/// use tinct::{Styler, progress::ProgressBar};
///
/// let styler = Styler::new();
/// let mut bar = ProgressBar::new(10).desc("Copying").show_rate(false).show_eta(false);
/// bar.advance(4);
/// let line = bar.render_line(&styler);
/// assert!(line.contains("4/10"));
/// ```
#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: u64,
    current: u64,
    desc: String,
    unit: String,
    bar_width: usize,
    complete_style: Option<String>,
    incomplete_style: Option<String>,
    percentage_style: Option<String>,
    desc_style: Option<String>,
    show_percentage: bool,
    show_count: bool,
    show_rate: bool,
    show_eta: bool,
    refresh_interval: Duration,
    started: Option<Instant>,
    last_draw: Option<Instant>,
    finished: bool,
}

impl ProgressBar {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            current: 0,
            desc: String::new(),
            unit: "it".to_string(),
            bar_width: 40,
            complete_style: Some("green".to_string()),
            incomplete_style: Some("bright_black".to_string()),
            percentage_style: Some("cyan".to_string()),
            desc_style: Some("bold".to_string()),
            show_percentage: true,
            show_count: true,
            show_rate: true,
            show_eta: true,
            refresh_interval: Duration::from_millis(100),
            started: None,
            last_draw: None,
            finished: false,
        }
    }

    // ==================== Configuration ====================

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Unit name shown next to counts ("files", "rows", ...).
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    pub fn complete_style(mut self, style: impl Into<String>) -> Self {
        self.complete_style = Some(style.into());
        self
    }

    pub fn incomplete_style(mut self, style: impl Into<String>) -> Self {
        self.incomplete_style = Some(style.into());
        self
    }

    pub fn show_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    pub fn show_count(mut self, show: bool) -> Self {
        self.show_count = show;
        self
    }

    pub fn show_rate(mut self, show: bool) -> Self {
        self.show_rate = show;
        self
    }

    pub fn show_eta(mut self, show: bool) -> Self {
        self.show_eta = show;
        self
    }

    /// Minimum time between redraws. Completion always draws.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    // ==================== State ====================

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64
        }
    }

    // ==================== Rendering ====================

    fn apply_style(styler: &Styler, text: &str, style: Option<&str>) -> String {
        match style {
            Some(style) if !style.is_empty() => {
                let mut wrapped = text.to_string();
                for tag in style.split_whitespace().rev() {
                    wrapped = format!("<{0}>{1}</{0}>", tag, wrapped);
                }
                styler.format(&wrapped)
            }
            _ => text.to_string(),
        }
    }

    fn render_bar(&self, styler: &Styler) -> String {
        let filled = (self.bar_width as f64 * self.fraction()) as usize;
        let empty = self.bar_width - filled.min(self.bar_width);

        let complete = Self::apply_style(
            styler,
            &"█".repeat(filled),
            self.complete_style.as_deref(),
        );
        let incomplete = Self::apply_style(
            styler,
            &"░".repeat(empty),
            self.incomplete_style.as_deref(),
        );
        format!("{}{}", complete, incomplete)
    }

    /// Composes the full progress line without writing anything.
    pub fn render_line(&self, styler: &Styler) -> String {
        let mut parts = Vec::new();

        if !self.desc.is_empty() {
            parts.push(Self::apply_style(styler, &self.desc, self.desc_style.as_deref()));
        }

        parts.push(self.render_bar(styler));

        if self.show_percentage {
            let pct = format!("{:>5.1}%", self.fraction() * 100.0);
            parts.push(Self::apply_style(
                styler,
                &pct,
                self.percentage_style.as_deref(),
            ));
        }

        if self.show_count {
            parts.push(format!("{}/{} {}", self.current, self.total, self.unit));
        }

        if let Some(started) = self.started {
            let elapsed = started.elapsed().as_secs_f64();
            if self.show_rate && elapsed > 0.0 {
                let rate = self.current as f64 / elapsed;
                parts.push(format!("[{:.2} {}/s]", rate, self.unit));
            }
            if self.show_eta && self.current > 0 && elapsed > 0.0 {
                let rate = self.current as f64 / elapsed;
                if rate > 0.0 {
                    let remaining = (self.total - self.current) as f64 / rate;
                    parts.push(format!("ETA: {}", format_duration(remaining)));
                }
            }
        }

        parts.join(" ")
    }

    // ==================== Driving ====================

    /// Advances by `n` steps and redraws if the refresh interval elapsed or
    /// the bar just completed. No output while the styler is disabled.
    pub fn advance_and_draw(&mut self, styler: &Styler, n: u64) {
        self.advance(n);

        let now = Instant::now();
        let due = match self.last_draw {
            Some(last) => now.duration_since(last) >= self.refresh_interval,
            None => true,
        };
        if due || self.current == self.total {
            self.draw(styler);
            self.last_draw = Some(now);
        }
    }

    /// Advances the counter without drawing.
    pub fn advance(&mut self, n: u64) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
        self.current = (self.current + n).min(self.total);
    }

    fn draw(&mut self, styler: &Styler) {
        if !styler.is_enabled() {
            return;
        }
        let line = self.render_line(styler);
        let mut stdout = io::stdout();
        let _ = write!(stdout, "\r{}", line);
        let _ = stdout.flush();

        if self.current >= self.total && !self.finished {
            let _ = writeln!(stdout);
            self.finished = true;
        }
    }

    /// Jumps to completion and draws the final state.
    pub fn finish(&mut self, styler: &Styler) {
        if !self.finished {
            self.current = self.total;
            self.draw(styler);
            self.finished = true;
        }
    }
}

/// Formats seconds as `MM:SS`, or `HH:MM:SS` past an hour.
fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 {
        return "--:--".to_string();
    }
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Tracks several progress bars under integer task handles.
#[derive(Debug, Default)]
pub struct MultiProgress {
    tasks: BTreeMap<usize, ProgressBar>,
    next_id: usize,
}

impl MultiProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bar and returns its task handle.
    pub fn add_task(&mut self, bar: ProgressBar) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.insert(id, bar);
        id
    }

    /// Advances one task; unknown handles are ignored.
    pub fn advance(&mut self, styler: &Styler, task: usize, n: u64) {
        if let Some(bar) = self.tasks.get_mut(&task) {
            bar.advance_and_draw(styler, n);
        }
    }

    pub fn get(&self, task: usize) -> Option<&ProgressBar> {
        self.tasks.get(&task)
    }

    /// Drops a task from tracking.
    pub fn remove_task(&mut self, task: usize) {
        self.tasks.remove(&task);
    }

    /// Finishes every remaining task.
    pub fn finish_all(&mut self, styler: &Styler) {
        for bar in self.tasks.values_mut() {
            bar.finish(styler);
        }
    }
}
