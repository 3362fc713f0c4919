//! Horizontal bar chart for the top-N article ranking.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::{commit, format_miles, has_positive, palette_color, shorten, staging_path, ChartError};

const SIZE: (u32, u32) = (1000, 600);
const LABEL_CHARS: usize = 40;

/// Renders a ranking as horizontal bars, largest value on top, with the
/// value printed just past the end of each bar. The ranking is expected to
/// arrive already sorted descending.
///
/// Returns `Ok(false)` without touching the filesystem when the ranking is
/// empty or entirely zero.
///
/// # Errors
///
/// Returns [`ChartError`] when drawing or the final rename fails.
pub fn render_top_bar(
    ranking: &[(String, f64)],
    title: &str,
    path: &Path,
) -> Result<bool, ChartError> {
    if !has_positive(ranking) {
        tracing::info!(chart = title, "ranking vacío, se omite el gráfico");
        return Ok(false);
    }

    let staged = staging_path(path);
    let max = ranking.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let count = ranking.len();
    // Band n-1-i puts item 0 (the largest) at the top of the chart.
    #[allow(clippy::cast_precision_loss)]
    let band_of = |i: usize| (count - 1 - i) as f64;
    let labels: Vec<String> = ranking
        .iter()
        .map(|(t, _)| shorten(t, LABEL_CHARS))
        .collect();

    {
        let root = BitMapBackend::new(&staged, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| ChartError::draw(path, e))?;

        #[allow(clippy::cast_precision_loss)]
        let y_max = count as f64;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(260)
            .build_cartesian_2d(0.0..max * 1.15, 0.0..y_max)
            .map_err(|e| ChartError::draw(path, e))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(count)
            .x_label_formatter(&|x| format_miles(*x))
            .y_label_formatter(&|y| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let band = *y as usize;
                count
                    .checked_sub(band + 1)
                    .and_then(|idx| labels.get(idx))
                    .cloned()
                    .unwrap_or_default()
            })
            .draw()
            .map_err(|e| ChartError::draw(path, e))?;

        chart
            .draw_series(ranking.iter().enumerate().map(|(i, (_, value))| {
                let y0 = band_of(i);
                Rectangle::new(
                    [(0.0, y0 + 0.15), (*value, y0 + 0.85)],
                    palette_color(0).filled(),
                )
            }))
            .map_err(|e| ChartError::draw(path, e))?;

        let label_style = ("sans-serif", 15)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(ranking.iter().enumerate().map(|(i, (_, value))| {
                Text::new(
                    format_miles(*value),
                    (*value + max * 0.01, band_of(i) + 0.5),
                    label_style.clone(),
                )
            }))
            .map_err(|e| ChartError::draw(path, e))?;

        root.present().map_err(|e| ChartError::draw(path, e))?;
    }

    commit(&staged, path)?;
    tracing::info!(path = %path.display(), "gráfico top se generó");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_ranking_is_a_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("top10_vpe_prensa.png");
        assert!(!render_top_bar(&[], "Top 10 por VPE - Prensa", &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn zero_ranking_is_a_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("top10_vpe_prensa.png");
        let ranking = vec![("Nota".to_string(), 0.0)];
        assert!(!render_top_bar(&ranking, "Top 10 por VPE - Prensa", &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn real_ranking_writes_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("top10_vpe_tv.png");
        let ranking = vec![
            ("Nota grande".to_string(), 150.0),
            ("Nota chica".to_string(), 30.0),
        ];
        assert!(render_top_bar(&ranking, "Top 10 por VPE - TV", &path).unwrap());
        assert!(path.exists());
    }
}
