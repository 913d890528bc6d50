//! Site content: news articles and portfolio projects.
//!
//! Content lives in a TOML file with `[[news]]` and `[[portfolio]]` tables
//! and is loaded once at startup.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use folio_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct NewsArticle {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub published_at: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PortfolioProject {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub year: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub news: Vec<NewsArticle>,
    #[serde(default)]
    pub portfolio: Vec<PortfolioProject>,
}

impl SiteContent {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ContentError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let content = Self::from_toml_str(&raw)?;
        info!(
            path = %path.display(),
            news = content.news.len(),
            portfolio = content.portfolio.len(),
            "Site content loaded"
        );
        Ok(content)
    }

    /// Parses content, rejects duplicate slugs and sorts newest first.
    pub fn from_toml_str(raw: &str) -> Result<Self, AppError> {
        let mut content: SiteContent =
            toml::from_str(raw).map_err(|e| AppError::ContentError(e.to_string()))?;

        ensure_unique("news", content.news.iter().map(|a| a.slug.as_str()))?;
        ensure_unique(
            "portfolio",
            content.portfolio.iter().map(|p| p.slug.as_str()),
        )?;

        // stable sorts keep file order for equal keys
        content.news.sort_by_key(|a| Reverse(a.published_at));
        content.portfolio.sort_by_key(|p| Reverse(p.year));
        Ok(content)
    }

    pub fn article(&self, slug: &str) -> Option<&NewsArticle> {
        self.news.iter().find(|article| article.slug == slug)
    }
}

fn ensure_unique<'a>(
    collection: &str,
    slugs: impl Iterator<Item = &'a str>,
) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if slug.trim().is_empty() {
            return Err(AppError::ContentError(format!("empty slug in {collection}")));
        }
        if !seen.insert(slug) {
            return Err(AppError::ContentError(format!(
                "duplicate slug '{}' in {}",
                slug, collection
            )));
        }
    }
    Ok(())
}
