//! `GET /grafico/{name}` — serves a previously rendered chart.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use super::{ApiError, AppState};

const MSG_NOT_FOUND: &str = "Archivo no encontrado";

pub(super) async fn serve_chart(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !is_safe_chart_name(&name) {
        return Err(ApiError::not_found(MSG_NOT_FOUND));
    }

    let path = state.graph_dir.join(&name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "image/png")], bytes)),
        Err(_) => Err(ApiError::not_found(MSG_NOT_FOUND)),
    }
}

/// Allow-list for servable filenames: an alphanumeric-led stem of ASCII
/// alphanumerics, `_` or `-`, followed by a single `.png` suffix.
///
/// This bars path traversal and also hides the `*.tmp.png` staging files the
/// renderers write before their atomic rename.
fn is_safe_chart_name(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".png") else {
        return false;
    };
    let mut chars = stem.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_fixed_chart_names() {
        assert!(is_safe_chart_name("vpe_barra.png"));
        assert!(is_safe_chart_name("impactos_torta.png"));
        assert!(is_safe_chart_name("top10_vpe_medios_digitales.png"));
    }

    #[test]
    fn rejects_traversal_and_separators() {
        assert!(!is_safe_chart_name("../etc/passwd"));
        assert!(!is_safe_chart_name("..%2Fsecreto.png"));
        assert!(!is_safe_chart_name("sub/dir.png"));
        assert!(!is_safe_chart_name("con espacios.png"));
    }

    #[test]
    fn rejects_non_png_and_empty_names() {
        assert!(!is_safe_chart_name("grafico.jpg"));
        assert!(!is_safe_chart_name(".png"));
        assert!(!is_safe_chart_name(""));
    }

    #[test]
    fn rejects_staging_files() {
        assert!(!is_safe_chart_name("vpe_barra.tmp.png"));
        assert!(!is_safe_chart_name(".vpe_barra.png"));
    }
}
