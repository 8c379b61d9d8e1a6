//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shopsmart_commerce::cart::CartSummary;
use shopsmart_commerce::Money;
use shopsmart_storefront::{Notifier, Route, Severity, Toast};

/// Output handler for CLI messages. Also the storefront's rendering surface.
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

    /// Print the pricing block under a cart.
    pub fn summary(&self, summary: &CartSummary) {
        if self.json {
            return;
        }
        self.kv("Subtotal", &summary.subtotal.display());
        if summary.has_discount() {
            self.kv(
                "Reward discount",
                &format!("-{}", summary.reward_discount.display()),
            );
        }
        self.kv("Delivery", if summary.requires_delivery { "yes" } else { "no" });
        println!(
            "  {}: {}",
            style("Total").bold(),
            style(summary.total.display()).bold()
        );
    }

    /// Create a spinner for a backend call.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
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

impl Notifier for Output {
    fn toast(&self, toast: Toast) {
        let msg = format!("{}: {}", toast.summary, toast.detail);
        match toast.severity {
            Severity::Success => self.success(&msg),
            Severity::Info => self.info(&msg),
            Severity::Warn => self.warn(&msg),
            Severity::Error => self.error(&msg),
        }
    }

    fn navigate(&self, route: Route) {
        self.debug(&format!("view: {route}"));
    }
}

/// Badge for a merchant's blacklisted flag.
pub fn merchant_badge(blacklisted: bool) -> String {
    if blacklisted {
        style("blocked").red().to_string()
    } else {
        style("active").green().to_string()
    }
}

/// Price cell, or a dash for an unpriced line.
pub fn price_cell(price: Option<&Money>) -> String {
    price.map(Money::display).unwrap_or_else(|| "-".to_string())
}
