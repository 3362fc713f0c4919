//! Pie chart of the channel share of one metric.

use std::path::Path;

use plotters::prelude::*;

use crate::{commit, format_miles, has_positive, palette_color, staging_path, ChartError};

const SIZE: (u32, u32) = (720, 720);

/// Renders one wedge per series entry with a percentage annotation; the
/// label of each wedge carries the channel name and its absolute value.
///
/// Returns `Ok(false)` without touching the filesystem when the series is
/// empty or its values sum to zero (a pie of nothing has no shape).
///
/// # Errors
///
/// Returns [`ChartError`] when drawing or the final rename fails.
pub fn render_pie(series: &[(String, f64)], title: &str, path: &Path) -> Result<bool, ChartError> {
    if !has_positive(series) {
        tracing::warn!(chart = title, "sin datos para el gráfico de torta, se omite");
        return Ok(false);
    }

    let staged = staging_path(path);

    let sizes: Vec<f64> = series.iter().map(|(_, v)| v.max(0.0)).collect();
    let labels: Vec<String> = series
        .iter()
        .map(|(name, value)| format!("{name} ({})", format_miles(*value)))
        .collect();
    let colors: Vec<RGBColor> = (0..series.len()).map(palette_color).collect();

    {
        let root = BitMapBackend::new(&staged, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| ChartError::draw(path, e))?;
        let root = root
            .titled(title, ("sans-serif", 30).into_font())
            .map_err(|e| ChartError::draw(path, e))?;

        let dims = root.dim_in_pixel();
        #[allow(clippy::cast_possible_wrap)]
        let center = (dims.0 as i32 / 2, dims.1 as i32 / 2);
        let radius = f64::from(dims.0.min(dims.1)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(140.0);
        pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 16).into_font().color(&WHITE));
        root.draw(&pie).map_err(|e| ChartError::draw(path, e))?;

        root.present().map_err(|e| ChartError::draw(path, e))?;
    }

    commit(&staged, path)?;
    tracing::info!(path = %path.display(), "gráfico de torta generado");
    Ok(true)
}
