//! Vertical bar chart of one value per channel.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::{commit, format_miles, has_positive, palette_color, staging_path, ChartError};

const SIZE: (u32, u32) = (1000, 600);

/// Renders one bar per series entry, in the given order, with the value
/// printed above each bar.
///
/// Returns `Ok(false)` without touching the filesystem when the series is
/// empty or entirely zero.
///
/// # Errors
///
/// Returns [`ChartError`] when drawing or the final rename fails.
pub fn render_bar(series: &[(String, f64)], title: &str, path: &Path) -> Result<bool, ChartError> {
    if !has_positive(series) {
        tracing::warn!(chart = title, "sin datos para el gráfico de barras, se omite");
        return Ok(false);
    }

    let staged = staging_path(path);
    let max = series.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let names: Vec<&str> = series.iter().map(|(name, _)| name.as_str()).collect();

    {
        let root = BitMapBackend::new(&staged, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| ChartError::draw(path, e))?;

        #[allow(clippy::cast_precision_loss)]
        let x_max = series.len() as f64;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(0.0..x_max, 0.0..max * 1.15)
            .map_err(|e| ChartError::draw(path, e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(series.len())
            .x_desc("Medios")
            .y_desc("Valor (€)")
            .x_label_formatter(&|x| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let idx = *x as usize;
                names.get(idx).map(ToString::to_string).unwrap_or_default()
            })
            .y_label_formatter(&|y| format_miles(*y))
            .draw()
            .map_err(|e| ChartError::draw(path, e))?;

        #[allow(clippy::cast_precision_loss)]
        chart
            .draw_series(series.iter().enumerate().map(|(i, (_, value))| {
                let x0 = i as f64 + 0.15;
                let x1 = i as f64 + 0.85;
                Rectangle::new([(x0, 0.0), (x1, *value)], palette_color(i).filled())
            }))
            .map_err(|e| ChartError::draw(path, e))?;

        let label_style = ("sans-serif", 16)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        #[allow(clippy::cast_precision_loss)]
        chart
            .draw_series(series.iter().enumerate().map(|(i, (_, value))| {
                Text::new(
                    format_miles(*value),
                    (i as f64 + 0.5, *value + max * 0.01),
                    label_style.clone(),
                )
            }))
            .map_err(|e| ChartError::draw(path, e))?;

        root.present().map_err(|e| ChartError::draw(path, e))?;
    }

    commit(&staged, path)?;
    tracing::info!(path = %path.display(), "gráfico de barras generado");
    Ok(true)
}
