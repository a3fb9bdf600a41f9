//! Terminal drawing for the session view.

use std::io::{self, Write};

use crossterm::style::Stylize;
use watchskip_core::{ResultPanel, SubmitError, Variant};

pub const PROMPT: &str = "Enter YouTube video link...";

fn marker(variant: Variant) -> &'static str {
    match variant {
        Variant::Positive => "✔",
        Variant::Negative => "✘",
    }
}

/// Unstyled panel text, one line per row.
pub fn panel_lines(panel: &ResultPanel) -> [String; 2] {
    [
        format!("{} {}", marker(panel.variant), panel.decision),
        panel.metrics_line(),
    ]
}

pub fn write_panel(out: &mut impl Write, panel: &ResultPanel) -> io::Result<()> {
    let [headline, metrics] = panel_lines(panel);
    let headline = match panel.variant {
        Variant::Positive => headline.green().bold(),
        Variant::Negative => headline.red().bold(),
    };
    writeln!(out, "{headline}")?;
    writeln!(out, "{}", metrics.dark_grey())
}

/// Surface a failed submit the way the UI's blocking notice would.
pub fn notice(out: &mut impl Write, err: &SubmitError) -> io::Result<()> {
    writeln!(out, "{}", err.notice().yellow())
}

pub fn status(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{}", label.dim())
}
