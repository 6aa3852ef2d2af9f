use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tracing::info;

use super::error::AppError;
use super::state::AppState;
use crate::charts::render_charts;
use crate::filter::FilterSelection;
use crate::labels::Season;
use crate::loader::DataExtent;
use crate::page::dashboard_page;
use crate::render::{DashboardViews, render};

/// Builds a selection from `start`, `end` and repeated `season` parameters.
///
/// Missing dates fall back to the data extent. Seasons default to every
/// season in the data unless at least one `season` parameter is present;
/// empty `season` values are ignored, so `season=` alone selects nothing.
pub fn selection_from_query(
    params: &[(String, String)],
    extent: &DataExtent,
) -> Result<FilterSelection, AppError> {
    let mut start = extent.first;
    let mut end = extent.last;
    let mut seasons: Option<Vec<Season>> = None;

    for (key, value) in params {
        match key.as_str() {
            "start" => start = parse_date("start", value)?,
            "end" => end = parse_date("end", value)?,
            "season" => {
                let chosen = seasons.get_or_insert_with(Vec::new);
                if !value.trim().is_empty() {
                    chosen.push(value.parse().map_err(AppError::BadRequest)?);
                }
            }
            _ => {}
        }
    }

    let seasons = seasons.unwrap_or_else(|| extent.seasons.clone());
    Ok(FilterSelection::new(start, end, seasons)?)
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, AppError> {
    value
        .trim()
        .parse()
        .map_err(|e| AppError::BadRequest(format!("invalid {name} date '{value}': {e}")))
}

fn compute(state: &AppState, params: &[(String, String)]) -> Result<DashboardViews, AppError> {
    let selection = selection_from_query(params, &state.extent)?;
    let views = render(&state.datasets, &selection);

    info!(
        start = %selection.start(),
        end = %selection.end(),
        seasons = selection.seasons().len(),
        hourly_rows = views.hourly_rows,
        daily_rows = views.daily_rows,
        "Views rendered"
    );

    Ok(views)
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let views = compute(&state, &params)?;
    let charts = render_charts(&views)?;
    Ok(Html(dashboard_page(&views, &charts, Some(state.extent.as_ref()))))
}

pub async fn views_json(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<DashboardViews>, AppError> {
    Ok(Json(compute(&state, &params)?))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent() -> DataExtent {
        DataExtent {
            first: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            last: NaiveDate::from_ymd_opt(2012, 12, 31).unwrap(),
            seasons: vec![Season::Spring, Season::Summer, Season::Fall, Season::Winter],
        }
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_to_extent() {
        let selection = selection_from_query(&[], &extent()).unwrap();
        assert_eq!(selection, FilterSelection::full_extent(&extent()));
    }

    #[test]
    fn test_repeated_seasons() {
        let selection = selection_from_query(
            &params(&[("season", ""), ("season", "fall"), ("season", "Winter")]),
            &extent(),
        )
        .unwrap();

        let seasons: Vec<_> = selection.seasons().iter().copied().collect();
        assert_eq!(seasons, vec![Season::Fall, Season::Winter]);
    }

    #[test]
    fn test_empty_season_marker_selects_nothing() {
        let selection = selection_from_query(&params(&[("season", "")]), &extent()).unwrap();
        assert!(selection.seasons().is_empty());
    }

    #[test]
    fn test_dates_override_extent() {
        let selection = selection_from_query(
            &params(&[("start", "2011-06-01"), ("end", "2011-06-30")]),
            &extent(),
        )
        .unwrap();

        assert_eq!(selection.start(), NaiveDate::from_ymd_opt(2011, 6, 1).unwrap());
        assert_eq!(selection.end(), NaiveDate::from_ymd_opt(2011, 6, 30).unwrap());
        assert_eq!(selection.seasons().len(), 4);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            selection_from_query(&params(&[("end", "yesterday")]), &extent()),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            selection_from_query(&params(&[("start", "2012-06-01"), ("end", "2012-01-01")]), &extent()),
            Err(AppError::BadRequest(_))
        ));
    }
}
