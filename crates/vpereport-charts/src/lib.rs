//! Plotters-based renderers for the report chart set.
//!
//! Every renderer is a plain synchronous function from a value series to a
//! PNG on disk; callers that live in async context run them under
//! `spawn_blocking`. A renderer returns `Ok(false)` instead of erroring when
//! its input is empty or sums to zero, and in that case writes nothing.
//!
//! Output is staged to a sibling `*.tmp.png` file and renamed into place, so
//! a reader never observes a partially written image.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use plotters::style::RGBColor;
use thiserror::Error;

pub mod bar;
pub mod pie;
pub mod ranked;

pub use bar::render_bar;
pub use pie::render_pie;
pub use ranked::render_top_bar;

/// Fixed chart palette, cycled when a series outruns it.
pub const PALETTE: [RGBColor; 4] = [
    RGBColor(66, 133, 244),
    RGBColor(234, 67, 53),
    RGBColor(52, 168, 83),
    RGBColor(251, 188, 5),
];

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing failed for {path}: {reason}")]
    Draw { path: String, reason: String },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ChartError {
    pub(crate) fn draw(path: &Path, reason: impl std::fmt::Display) -> Self {
        ChartError::Draw {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ChartError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[must_use]
pub(crate) fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// True when the series has at least one strictly positive value.
#[must_use]
pub(crate) fn has_positive(series: &[(String, f64)]) -> bool {
    series.iter().any(|(_, v)| *v > 0.0)
}

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Staging path next to `path`, unique per write so concurrent renders of
/// the same chart never share (and never steal) a staging file; last rename
/// wins. Keeps the `.png` suffix so the bitmap backend still recognizes the
/// output format.
#[must_use]
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut name = path
        .file_stem()
        .map_or_else(|| OsString::from("chart"), ToOwned::to_owned);
    name.push(format!(".{}.{seq}.tmp.png", std::process::id()));
    path.with_file_name(name)
}

/// Renames the staged file into its final place.
pub(crate) fn commit(staged: &Path, path: &Path) -> Result<(), ChartError> {
    std::fs::rename(staged, path).map_err(|e| ChartError::io(path, e))
}

/// Formats a value with dotted thousands separators, Spanish style:
/// `1234567.0` → `"1.234.567"`.
#[must_use]
pub fn format_miles(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Truncates a label to `max_chars`, appending an ellipsis when cut.
#[must_use]
pub(crate) fn shorten(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let cut: String = label.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_miles_groups_by_three() {
        assert_eq!(format_miles(1_234_567.0), "1.234.567");
        assert_eq!(format_miles(10_000.0), "10.000");
        assert_eq!(format_miles(999.0), "999");
        assert_eq!(format_miles(0.0), "0");
    }

    #[test]
    fn format_miles_rounds_and_keeps_sign() {
        assert_eq!(format_miles(1499.6), "1.500");
        assert_eq!(format_miles(-1234.0), "-1.234");
    }

    #[test]
    fn staging_path_keeps_png_suffix() {
        let staged = staging_path(Path::new("/tmp/graficos/vpe_barra.png"));
        let name = staged.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("vpe_barra."));
        assert!(name.ends_with(".tmp.png"));
        assert_eq!(staged.parent(), Some(Path::new("/tmp/graficos")));
    }

    #[test]
    fn staging_path_is_unique_per_call() {
        let target = Path::new("/tmp/graficos/vpe_barra.png");
        assert_ne!(staging_path(target), staging_path(target));
    }

    #[test]
    fn shorten_cuts_long_labels() {
        assert_eq!(shorten("corto", 10), "corto");
        let long = "Una nota con un título realmente interminable";
        let cut = shorten(long, 20);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() <= 20);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(palette_color(0), PALETTE[0]);
        assert_eq!(palette_color(4), PALETTE[0]);
        assert_eq!(palette_color(5), PALETTE[1]);
    }
}
