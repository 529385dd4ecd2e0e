//! Cast listing filters and pagination

use lune_profiles::{Cast, CastTier};
use serde::{Deserialize, Serialize};

/// Filter for cast listings.
///
/// Every field is optional; an empty filter matches every visible cast.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CastFilter {
    /// Only featured casts
    #[serde(default)]
    pub featured_only: bool,

    /// Case-insensitive substring of the cast's location
    pub location: Option<String>,

    /// Minimum age (inclusive)
    pub min_age: Option<u8>,

    /// Maximum age (inclusive)
    pub max_age: Option<u8>,

    /// Restrict to one classification
    pub tier: Option<CastTier>,

    /// Case-insensitive substring of the display name
    pub search: Option<String>,

    /// 1-based page number
    pub page: Option<usize>,

    /// Requested page size, clamped by configuration
    pub page_size: Option<usize>,
}

impl CastFilter {
    /// Empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only featured casts.
    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// Location substring.
    pub fn in_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Inclusive age range.
    pub fn aged(mut self, min: Option<u8>, max: Option<u8>) -> Self {
        self.min_age = min;
        self.max_age = max;
        self
    }

    /// Restrict to one classification.
    pub fn with_tier(mut self, tier: CastTier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Name search.
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Select a page.
    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    /// Check the attribute filters against a cast.
    ///
    /// Visibility and activity are not considered here. Casts without an age
    /// never match an age bound.
    pub fn matches(&self, cast: &Cast) -> bool {
        if self.featured_only && !cast.is_featured {
            return false;
        }
        if let Some(tier) = self.tier {
            if cast.tier_classification != tier {
                return false;
            }
        }
        if let Some(needle) = non_blank(&self.location) {
            let found = cast
                .location
                .as_deref()
                .map(|l| l.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !found {
                return false;
            }
        }
        if let Some(needle) = non_blank(&self.search) {
            if !cast.display_name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if self.min_age.is_some() || self.max_age.is_some() {
            let Some(age) = cast.age else {
                return false;
            };
            if self.min_age.is_some_and(|min| age < min) {
                return false;
            }
            if self.max_age.is_some_and(|max| age > max) {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Listing order: featured first, then newest.
pub(crate) fn sort_for_listing(casts: &mut [Cast]) {
    casts.sort_by(|a, b| {
        b.is_featured
            .cmp(&a.is_featured)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// 1-based page number
    pub page: usize,

    /// Page size used
    pub page_size: usize,

    /// Matching items across all pages
    pub total: usize,
}

impl<T> Page<T> {
    /// Slice `items` into the requested page. Page numbers below 1 read as 1.
    pub fn paginate(items: Vec<T>, page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let total = items.len();
        let start = (page - 1).saturating_mul(page_size);
        let items = items.into_iter().skip(start).take(page_size).collect();
        Self {
            items,
            page,
            page_size,
            total,
        }
    }

    /// Number of pages.
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    /// Check if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Map the items, keeping pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
        }
    }
}
