//! Output formatting for the CLI.

use console::style;
use grocer_commerce::order::OrderStatus;
use grocer_store::{Navigator, Notice, Notifier};
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Toasts from store operations are printed like any other message.
impl Notifier for Output {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(message) => self.success(&message),
            Notice::Error(message) => self.error(&message),
        }
    }
}

/// There are no routes in a terminal; redirects are only reported.
impl Navigator for Output {
    fn navigate(&self, path: &str) {
        self.debug(&format!("redirect to {}", path));
    }
}

/// Colored order status.
pub fn status_badge(status: OrderStatus) -> String {
    let name = status.display_name();
    match status {
        OrderStatus::Delivered => style(name).green().to_string(),
        OrderStatus::Cancelled => style(name).red().to_string(),
        _ if status.can_cancel() => style(name).yellow().to_string(),
        _ => style(name).cyan().to_string(),
    }
}

/// Truncate to `width` characters for table cells.
pub fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let head: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip() {
        assert_eq!(clip("Milk", 10), "Milk");
        assert_eq!(clip("Organic whole milk", 8), "Organic…");
    }

    #[test]
    fn test_status_badge_keeps_name() {
        console::set_colors_enabled(false);
        assert_eq!(status_badge(OrderStatus::Delivered), "Delivered");
    }
}
