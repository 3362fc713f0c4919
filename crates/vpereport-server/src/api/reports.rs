//! `POST /` — renders the chart set for one report payload.

use std::path::Path;

use axum::{body::Bytes, extract::State, http::HeaderMap, Extension, Json};
use serde::Serialize;
use serde_json::Value;

use vpereport_charts::{render_bar, render_pie, render_top_bar, ChartError};
use vpereport_core::{channel_articles, channel_totals, top_articles, unwrap_envelope, Channel};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const MSG_EMPTY_BODY: &str = "El cuerpo de la solicitud está vacío o no es JSON válido";
const MSG_BAD_SHAPE: &str = "El formato del JSON no es ni un objeto ni una lista con un objeto";
const MSG_NO_DATA: &str = "El documento no contiene datos de medios";

const TOP_N: usize = 10;

#[derive(Debug, Serialize)]
pub(super) struct ReportResponse {
    status: &'static str,
    archivos_generados: Vec<String>,
}

pub(super) async fn generate_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ReportResponse>, ApiError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request(MSG_EMPTY_BODY))?;
    let doc = unwrap_envelope(payload).ok_or_else(|| ApiError::bad_request(MSG_BAD_SHAPE))?;

    let vpe = named_series(&channel_totals(&doc, "total_vpe"));
    let impactos = named_series(&channel_totals(&doc, "total_audiencia"));
    let rankings: Vec<(Channel, Vec<(String, f64)>)> = Channel::ALL
        .iter()
        .map(|&channel| {
            let articles = channel_articles(&doc, channel);
            (channel, top_articles(&articles, TOP_N))
        })
        .collect();

    if vpe.is_empty() && impactos.is_empty() && rankings.iter().all(|(_, r)| r.is_empty()) {
        return Err(ApiError::bad_request(MSG_NO_DATA));
    }

    let graph_dir = state.graph_dir.clone();
    let files = tokio::task::spawn_blocking(move || {
        render_charts(&graph_dir, &vpe, &impactos, &rankings)
    })
    .await
    .map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "render task join failed");
        ApiError::internal()
    })?
    .map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "chart rendering failed");
        ApiError::internal()
    })?;

    let base = base_url(&state, &headers);
    let archivos_generados = files
        .into_iter()
        .map(|file| match &base {
            Some(b) => format!("{b}/grafico/{file}"),
            None => format!("/grafico/{file}"),
        })
        .collect();

    tracing::info!(request_id = %req_id.0, "report charts rendered");
    Ok(Json(ReportResponse {
        status: "ok",
        archivos_generados,
    }))
}

fn named_series(totals: &[(Channel, f64)]) -> Vec<(String, f64)> {
    totals
        .iter()
        .map(|(channel, value)| (channel.display_name().to_string(), *value))
        .collect()
}

/// Runs the full renderer set and reports the chart files that exist on disk
/// afterwards, in canonical order. A renderer that skipped (empty input)
/// leaves its file absent unless an earlier request produced it, which is
/// exactly the "one current chart set" contract.
fn render_charts(
    graph_dir: &Path,
    vpe: &[(String, f64)],
    impactos: &[(String, f64)],
    rankings: &[(Channel, Vec<(String, f64)>)],
) -> Result<Vec<String>, ChartError> {
    render_bar(vpe, "VPE por Medio", &graph_dir.join("vpe_barra.png"))?;
    render_pie(vpe, "Distribución de VPE", &graph_dir.join("vpe_torta.png"))?;
    render_bar(
        impactos,
        "Impactos por Medio",
        &graph_dir.join("impactos_barra.png"),
    )?;
    render_pie(
        impactos,
        "Distribución de Impactos",
        &graph_dir.join("impactos_torta.png"),
    )?;
    for (channel, ranking) in rankings {
        let title = format!("Top 10 por VPE - {channel}");
        let file = format!("top10_vpe_{}.png", channel.slug());
        render_top_bar(ranking, &title, &graph_dir.join(file))?;
    }

    let mut files = Vec::new();
    for name in chart_filenames() {
        if graph_dir.join(&name).exists() {
            files.push(name);
        }
    }
    Ok(files)
}

/// Full fixed chart set, in response order.
fn chart_filenames() -> Vec<String> {
    let mut names = vec![
        "vpe_barra.png".to_string(),
        "vpe_torta.png".to_string(),
        "impactos_barra.png".to_string(),
        "impactos_torta.png".to_string(),
    ];
    for channel in Channel::ALL {
        names.push(format!("top10_vpe_{}.png", channel.slug()));
    }
    names
}

/// Prefix for returned URLs: the configured public base, else the request
/// `Host` header, else relative paths.
fn base_url(state: &AppState, headers: &HeaderMap) -> Option<String> {
    if let Some(base) = &state.public_base_url {
        return Some(base.trim_end_matches('/').to_string());
    }
    headers
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|host| format!("http://{host}"))
}
