//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Confectioner UUID
pub type ConfectionerUuid = TypedUuid<ConfectionerRecord>;

/// Flavor UUID
pub type FlavorUuid = TypedUuid<FlavorRecord>;

/// Size UUID
pub type SizeUuid = TypedUuid<SizeRecord>;

/// Product Image UUID
pub type ProductImageUuid = TypedUuid<ProductImageRecord>;

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Stored prices of a product, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPricing {
    pub price: u64,
    pub promotional_price: Option<u64>,
    pub is_promotion: bool,
}

impl ProductPricing {
    /// Price a customer pays: the promotional price while a promotion runs,
    /// the base price otherwise.
    pub fn effective_price(&self) -> u64 {
        match (self.is_promotion, self.promotional_price) {
            (true, Some(promotional_price)) => promotional_price,
            _ => self.price,
        }
    }

    /// Base price, shown struck-through while a promotion runs.
    pub fn original_price(&self) -> Option<u64> {
        self.is_promoted().then_some(self.price)
    }

    pub fn is_promoted(&self) -> bool {
        self.is_promotion && self.promotional_price.is_some()
    }
}

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub confectioner_uuid: ConfectionerUuid,
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub nutritional_info: Option<String>,
    pub pricing: ProductPricing,
    pub available: bool,
    pub stock: u32,
    pub preparation_minutes: u32,
    pub rating: f64,
    pub review_count: u32,
    pub sales_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Available for ordering and with stock left.
    pub fn is_purchasable(&self) -> bool {
        self.available && self.stock > 0
    }
}

/// Product as shown in listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummaryRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub primary_image: Option<String>,
    pub pricing: ProductPricing,
    pub rating: f64,
    pub review_count: u32,
    pub confectioner_name: Option<String>,
    pub available: bool,
    pub preparation_minutes: u32,
}

/// Category Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
}

/// Flavor offered for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorRecord {
    pub uuid: FlavorUuid,
    pub name: String,
    pub description: String,
}

/// Size offered for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRecord {
    pub uuid: SizeUuid,
    pub name: String,
    pub servings: u32,

    /// Signed amount added to the effective price, in minor units.
    pub price_modifier: i64,
}

/// Product Image Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImageRecord {
    pub uuid: ProductImageUuid,
    pub url: String,
    pub alt_text: String,
    pub is_primary: bool,
    pub display_order: i32,
}

/// Review Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub customer_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: Timestamp,
}

/// Public profile of a confectioner.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfectionerRecord {
    pub uuid: ConfectionerUuid,
    pub name: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub rating: f64,
}

/// Product with everything the detail page shows.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub product: ProductRecord,
    pub images: Vec<ProductImageRecord>,
    pub flavors: Vec<FlavorRecord>,
    pub sizes: Vec<SizeRecord>,
    pub reviews: Vec<ReviewRecord>,
    pub confectioner: Option<ConfectionerRecord>,
}

/// Pagination metadata of a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub page_size: u32,
}

impl Pagination {
    #[must_use]
    pub fn new(total_items: u64, current_page: u32, page_size: u32) -> Self {
        Self {
            total_items,
            total_pages: total_items.div_ceil(u64::from(page_size.max(1))),
            current_page,
            page_size,
        }
    }
}

/// One page of a product listing.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductSummaryRecord>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing(price: u64, promotional_price: Option<u64>, is_promotion: bool) -> ProductPricing {
        ProductPricing {
            price,
            promotional_price,
            is_promotion,
        }
    }

    #[test]
    fn effective_price_is_promotional_while_promoted() {
        let pricing = pricing(2000, Some(1500), true);

        assert_eq!(pricing.effective_price(), 1500);
        assert_eq!(pricing.original_price(), Some(2000));
    }

    #[test]
    fn effective_price_ignores_promotional_price_without_promotion() {
        let pricing = pricing(2000, Some(1500), false);

        assert_eq!(pricing.effective_price(), 2000);
        assert_eq!(pricing.original_price(), None);
    }

    #[test]
    fn promotion_without_promotional_price_falls_back_to_base() {
        let pricing = pricing(2000, None, true);

        assert_eq!(pricing.effective_price(), 2000);
        assert!(!pricing.is_promoted());
    }

    #[test]
    fn total_pages_rounds_up() {
        let pagination = Pagination::new(25, 1, 12);

        assert_eq!(pagination.total_pages, 3);
    }

    #[test]
    fn total_pages_exact_multiple() {
        let pagination = Pagination::new(24, 2, 12);

        assert_eq!(pagination.total_pages, 2);
        assert_eq!(pagination.current_page, 2);
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let pagination = Pagination::new(0, 1, 36);

        assert_eq!(pagination.total_pages, 0);
        assert_eq!(pagination.total_items, 0);
    }
}
