//! News and portfolio listings.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use folio_shared::{calculate_pagination, config::ContentSettings, PaginationResult};
use serde::{Deserialize, Serialize};

use crate::content::{NewsArticle, PortfolioProject};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// `?page=&pageSize=`; unparsable values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListingQuery {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse().ok())
            .unwrap_or(1)
    }

    pub fn page_size(&self, settings: &ContentSettings) -> usize {
        let max = settings.max_page_size.max(1);
        let upper = i64::try_from(max).unwrap_or(i64::MAX);
        self.page_size
            .as_deref()
            .and_then(|size| size.trim().parse::<i64>().ok())
            .map(|size| usize::try_from(size.clamp(1, upper)).unwrap_or(max))
            .unwrap_or(settings.default_page_size)
            .clamp(1, max)
    }
}

#[derive(Debug, Serialize)]
pub struct Listing<T> {
    pub entries: Vec<T>,
    pub pagination: PaginationResult,
}

pub fn build_listing<T: Clone>(
    all: &[T],
    query: &ListingQuery,
    settings: &ContentSettings,
) -> Result<Listing<T>, ApiError> {
    let pagination = calculate_pagination(
        all.len(),
        query.page(),
        query.page_size(settings),
        settings.sibling_count,
    )
    .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(Listing {
        entries: all[pagination.start_index..pagination.end_index].to_vec(),
        pagination,
    })
}

/// GET /api/news
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ApiResponse<Listing<NewsArticle>>>, ApiError> {
    let listing = build_listing(&state.content.news, &query, &state.config.content)?;
    Ok(Json(ApiResponse::success(listing)))
}

/// GET /api/news/{slug}
pub async fn get_news_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<NewsArticle>>, ApiError> {
    let article = state
        .content
        .article(&slug)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("news article '{}'", slug)))?;
    Ok(Json(ApiResponse::success(article)))
}

/// GET /api/portfolio
pub async fn list_portfolio(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ApiResponse<Listing<PortfolioProject>>>, ApiError> {
    let listing = build_listing(&state.content.portfolio, &query, &state.config.content)?;
    Ok(Json(ApiResponse::success(listing)))
}
