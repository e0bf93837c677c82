//! Dashboard REST API endpoints.
//!
//! # Endpoints
//!
//! - `GET /api/sections` - Dashboard sections for the section dropdown
//! - `GET /api/analysis/options?section=X` - Metric dropdown for a section
//! - `GET /api/dashboard/view?section=X&metric=Y&quarter=Z` - Full view
//! - `GET /api/dataset/summary` - Dataset shape and load diagnostics
//!
//! Selector parameters arrive as strings and are parsed explicitly so an
//! unknown value gets a 400 with the offending value in the message.

use axum::Json;
use axum::extract::{Query, State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use analytics::{AnalysisOptions, DashboardView, analysis_options, render_view};
use types::{Metric, QuarterFilter, Section};

use crate::error::{AppError, AppResult};
use crate::state::ServerState;

// =============================================================================
// Sections
// =============================================================================

/// One entry of the section dropdown.
#[derive(Debug, Serialize)]
pub struct SectionEntry {
    pub value: Section,
    pub label: &'static str,
}

/// Response for /api/sections.
#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub sections: Vec<SectionEntry>,
}

/// `GET /api/sections`
pub async fn get_sections() -> Json<SectionsResponse> {
    let sections = Section::ALL
        .into_iter()
        .map(|section| SectionEntry {
            value: section,
            label: section.label(),
        })
        .collect();

    Json(SectionsResponse { sections })
}

// =============================================================================
// Analysis Options
// =============================================================================

/// Query parameters for the options endpoint.
#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    /// Section to list metrics for.
    pub section: String,
}

/// `GET /api/analysis/options?section=X`
pub async fn get_options(Query(query): Query<OptionsQuery>) -> AppResult<Json<AnalysisOptions>> {
    let section = parse_section(&query.section)?;
    Ok(Json(analysis_options(section)))
}

// =============================================================================
// Dashboard View
// =============================================================================

/// Query parameters for the view endpoint.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    /// Section to render.
    pub section: String,
    /// Selected metric; absent means nothing selected yet.
    pub metric: Option<String>,
    /// Quarter filter, `"all"` or `"1"`-`"4"`; defaults to all.
    pub quarter: Option<String>,
}

/// `GET /api/dashboard/view?section=X&metric=Y&quarter=Z`
pub async fn get_view(
    State(state): State<ServerState>,
    Query(query): Query<ViewQuery>,
) -> AppResult<Json<DashboardView>> {
    let section = parse_section(&query.section)?;

    let metric = query
        .metric
        .as_deref()
        .map(|raw| {
            raw.parse::<Metric>()
                .map_err(|_| AppError::BadRequest(format!("unknown metric {raw:?}")))
        })
        .transpose()?;

    let filter = match query.quarter.as_deref() {
        None => QuarterFilter::All,
        Some(raw) => raw
            .parse::<QuarterFilter>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
    };

    Ok(Json(render_view(&state.dataset, section, metric, filter)))
}

// =============================================================================
// Dataset Summary
// =============================================================================

/// Response for /api/dataset/summary.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Number of loaded records.
    pub records: usize,
    /// First record date.
    pub first_date: Option<NaiveDate>,
    /// Last record date.
    pub last_date: Option<NaiveDate>,
    /// Rows dropped during loading.
    pub dropped_rows: usize,
}

/// `GET /api/dataset/summary`
pub async fn get_summary(State(state): State<ServerState>) -> Json<SummaryResponse> {
    let range = state.dataset.date_range();

    Json(SummaryResponse {
        records: state.dataset.len(),
        first_date: range.map(|(first, _)| first),
        last_date: range.map(|(_, last)| last),
        dropped_rows: state.dataset.diagnostics().len(),
    })
}

fn parse_section(raw: &str) -> AppResult<Section> {
    raw.parse::<Section>()
        .map_err(|_| AppError::BadRequest(format!("unknown section {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::Dataset;
    use synth::{SeasonSynthesizer, SynthConfig};

    fn empty_state() -> ServerState {
        ServerState::new(Dataset::from_records(vec![]))
    }

    fn full_year_state() -> ServerState {
        let records = SeasonSynthesizer::new(SynthConfig::default())
            .unwrap()
            .generate();
        ServerState::new(Dataset::from_records(records))
    }

    #[tokio::test]
    async fn test_sections_in_order() {
        let Json(response) = get_sections().await;
        assert_eq!(response.sections.len(), 3);
        assert_eq!(response.sections[0].value, Section::Economic);
        assert_eq!(response.sections[2].label, "Profit vs environment");
    }

    #[tokio::test]
    async fn test_options_rejects_unknown_section() {
        let result = get_options(Query(OptionsQuery {
            section: "finance".into(),
        }))
        .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_view_rejects_bad_quarter() {
        let result = get_view(
            State(empty_state()),
            Query(ViewQuery {
                section: "economic".into(),
                metric: Some("revenue".into()),
                quarter: Some("7".into()),
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_view_without_metric_is_empty() {
        let Json(view) = get_view(
            State(empty_state()),
            Query(ViewQuery {
                section: "economic".into(),
                metric: None,
                quarter: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(view, DashboardView::Empty { message: None });
    }

    #[tokio::test]
    async fn test_summary_on_empty_dataset() {
        let Json(summary) = get_summary(State(empty_state())).await;
        assert_eq!(summary.records, 0);
        assert!(summary.first_date.is_none());
    }

    #[tokio::test]
    async fn test_view_over_generated_season() {
        let Json(view) = get_view(
            State(full_year_state()),
            Query(ViewQuery {
                section: "economic".into(),
                metric: Some("revenue".into()),
                quarter: Some("all".into()),
            }),
        )
        .await
        .unwrap();

        let DashboardView::MonthlySeries { points, kpis, .. } = view else {
            panic!("expected monthly series");
        };
        assert_eq!(points.len(), 12);
        assert_eq!(points.iter().map(|p| p.sample_count).sum::<usize>(), 365);
        assert_eq!(kpis.len(), 5);
    }

    #[tokio::test]
    async fn test_summary_over_generated_season() {
        let Json(summary) = get_summary(State(full_year_state())).await;
        assert_eq!(summary.records, 365);
        assert_eq!(summary.first_date.unwrap().to_string(), "2025-01-01");
        assert_eq!(summary.last_date.unwrap().to_string(), "2025-12-31");
        assert_eq!(summary.dropped_rows, 0);
    }
}
