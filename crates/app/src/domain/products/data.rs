//! Products Data

use std::str::FromStr;

use thiserror::Error;

use crate::domain::products::records::{CategoryUuid, ConfectionerUuid, FlavorUuid, SizeUuid};

/// Page sizes a listing may be requested with.
pub const PAGE_SIZES: [u32; 3] = [12, 24, 36];

/// Page size used when none, or an unsupported one, is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Related products returned when no usable limit is requested.
pub const DEFAULT_RELATED_LIMIT: u32 = 4;

/// Requested option value outside its fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownOptionError {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownOptionError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Listing page size, always one of [`PAGE_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    /// Unsupported or missing values fall back to [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn from_requested(requested: Option<i64>) -> Self {
        requested
            .and_then(|size| u32::try_from(size).ok())
            .filter(|size| PAGE_SIZES.contains(size))
            .map_or(Self(DEFAULT_PAGE_SIZE), Self)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// No ordering beyond the uuid tie-break.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    BestSelling,
    TopRated,
    Newest,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::BestSelling => "best_selling",
            Self::TopRated => "top_rated",
            Self::Newest => "newest",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "relevance" => Ok(Self::Relevance),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "best_selling" => Ok(Self::BestSelling),
            "top_rated" => Ok(Self::TopRated),
            "newest" => Ok(Self::Newest),
            _ => Err(UnknownOptionError::new("sort key", value)),
        }
    }
}

/// Stock availability filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    /// Available and in stock.
    #[default]
    Available,

    /// Unavailable or out of stock.
    Unavailable,

    All,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::All => "all",
        }
    }
}

impl FromStr for Availability {
    type Err = UnknownOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            "all" => Ok(Self::All),
            _ => Err(UnknownOptionError::new("availability", value)),
        }
    }
}

/// Product listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    /// 1-based page number.
    pub page: u32,
    pub page_size: PageSize,
    pub sort: SortKey,
    pub category_uuids: Vec<CategoryUuid>,
    pub flavor_uuids: Vec<FlavorUuid>,
    pub size_uuids: Vec<SizeUuid>,
    pub confectioner_uuids: Vec<ConfectionerUuid>,

    /// Inclusive bounds on the effective price, in minor units.
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub availability: Availability,
    pub search_term: Option<String>,
}

impl ProductListing {
    /// Rows skipped before the requested page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.page_size.get())
    }

    /// Case-insensitive `LIKE` pattern for the search term, with wildcards escaped.
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search_term.as_deref()?.trim();

        if term.is_empty() {
            return None;
        }

        let mut pattern = String::with_capacity(term.len() + 2);

        pattern.push('%');

        for c in term.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }

            pattern.push(c);
        }

        pattern.push('%');

        Some(pattern)
    }
}

impl Default for ProductListing {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            sort: SortKey::default(),
            category_uuids: Vec::new(),
            flavor_uuids: Vec::new(),
            size_uuids: Vec::new(),
            confectioner_uuids: Vec::new(),
            min_price: None,
            max_price: None,
            availability: Availability::default(),
            search_term: None,
        }
    }
}

/// What related products have in common with the reference product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RelatedCriteria {
    #[default]
    Category,
    Flavor,
    Confectioner,
    Popularity,
}

impl RelatedCriteria {
    /// Unknown or missing criteria fall back to [`RelatedCriteria::Category`].
    #[must_use]
    pub fn from_requested(requested: Option<&str>) -> Self {
        match requested {
            Some("flavor") => Self::Flavor,
            Some("confectioner") => Self::Confectioner,
            Some("popularity") => Self::Popularity,
            _ => Self::Category,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Flavor => "flavor",
            Self::Confectioner => "confectioner",
            Self::Popularity => "popularity",
        }
    }
}

/// Related products request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelatedQuery {
    pub limit: u32,
    pub criteria: RelatedCriteria,
}

impl RelatedQuery {
    /// Missing or non-positive limits fall back to [`DEFAULT_RELATED_LIMIT`].
    #[must_use]
    pub fn new(limit: Option<i64>, criteria: RelatedCriteria) -> Self {
        let limit = limit
            .filter(|limit| *limit > 0)
            .map_or(DEFAULT_RELATED_LIMIT, |limit| {
                u32::try_from(limit).unwrap_or(u32::MAX)
            });

        Self { limit, criteria }
    }
}

impl Default for RelatedQuery {
    fn default() -> Self {
        Self::new(None, RelatedCriteria::default())
    }
}
