//! Grouping and ranking of per-article records for the top-N charts.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::normalize::clean_value;

/// Title substituted when an article carries none.
pub const DEFAULT_TITLE: &str = "Sin Título";

/// One entry of a `{channel}_raw.noticias` list.
///
/// Both fields are optional in the wire format; `vpe` stays a raw JSON value
/// because it arrives as either a number or a locale-formatted string.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub vpe: Value,
}

/// Groups articles by exact title, sums the normalized VPE per group and
/// returns at most `limit` groups, largest sum first.
///
/// Grouping is case-sensitive and order-insensitive; the sort is stable, so
/// groups with equal sums keep first-seen order.
#[must_use]
pub fn top_articles(articles: &[Article], limit: usize) -> Vec<(String, f64)> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();

    for article in articles {
        let title = article
            .titulo
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let value = clean_value(&article.vpe);
        if let Some(sum) = sums.get_mut(&title) {
            *sum += value;
        } else {
            order.push(title.clone());
            sums.insert(title, value);
        }
    }

    let mut ranked: Vec<(String, f64)> = order
        .into_iter()
        .map(|title| {
            let sum = sums.remove(&title).unwrap_or(0.0);
            (title, sum)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article(title: &str, vpe: Value) -> Article {
        Article {
            titulo: Some(title.to_string()),
            vpe,
        }
    }

    #[test]
    fn groups_by_title_and_sums() {
        let articles = vec![
            article("A", json!("100")),
            article("A", json!("50")),
            article("B", json!("30")),
        ];
        let ranked = top_articles(&articles, 2);
        assert_eq!(ranked, vec![("A".to_string(), 150.0), ("B".to_string(), 30.0)]);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let articles = vec![
            article("low", json!(1)),
            article("high", json!(100)),
            article("mid", json!(10)),
        ];
        let ranked = top_articles(&articles, 2);
        assert_eq!(ranked[0].0, "high");
        assert_eq!(ranked[1].0, "mid");
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let articles = vec![
            article("primero", json!(10)),
            article("segundo", json!(10)),
        ];
        let ranked = top_articles(&articles, 10);
        assert_eq!(ranked[0].0, "primero");
        assert_eq!(ranked[1].0, "segundo");
    }

    #[test]
    fn missing_title_uses_placeholder() {
        let articles = vec![Article {
            titulo: None,
            vpe: json!("25"),
        }];
        let ranked = top_articles(&articles, 10);
        assert_eq!(ranked, vec![(DEFAULT_TITLE.to_string(), 25.0)]);
    }

    #[test]
    fn unparseable_vpe_counts_as_zero() {
        let articles = vec![article("A", json!("no-numérico")), article("A", json!(5))];
        let ranked = top_articles(&articles, 10);
        assert_eq!(ranked, vec![("A".to_string(), 5.0)]);
    }

    #[test]
    fn grouping_is_case_sensitive() {
        let articles = vec![article("Nota", json!(10)), article("nota", json!(20))];
        let ranked = top_articles(&articles, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], ("nota".to_string(), 20.0));
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        assert!(top_articles(&[], 10).is_empty());
    }
}
