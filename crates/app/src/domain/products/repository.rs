//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    domain::{
        columns::{amount_to_column, try_get_amount, try_get_count, try_get_optional_amount},
        products::{
            data::{ProductListing, RelatedCriteria},
            records::{
                CategoryUuid, ConfectionerRecord, ConfectionerUuid, FlavorRecord, FlavorUuid,
                ProductImageRecord, ProductImageUuid, ProductPricing, ProductRecord,
                ProductSummaryRecord, ProductUuid, ReviewRecord, ReviewUuid, SizeRecord, SizeUuid,
            },
        },
    },
    uuids::uuid_filter,
};

const LIST_PRODUCTS_SQL: &str = concat!(
    include_str!("sql/matching_products.sql"),
    include_str!("sql/list_products.sql")
);
const COUNT_PRODUCTS_SQL: &str = concat!(
    include_str!("sql/matching_products.sql"),
    include_str!("sql/count_products.sql")
);
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_PRODUCT_IMAGES_SQL: &str = include_str!("sql/list_product_images.sql");
const LIST_PRODUCT_FLAVORS_SQL: &str = include_str!("sql/list_product_flavors.sql");
const LIST_PRODUCT_SIZES_SQL: &str = include_str!("sql/list_product_sizes.sql");
const LIST_PRODUCT_REVIEWS_SQL: &str = include_str!("sql/list_product_reviews.sql");
const GET_CONFECTIONER_SQL: &str = include_str!("sql/get_confectioner.sql");
const RELATED_PRODUCTS_SQL: &str = include_str!("sql/related_products.sql");
const FLAVOR_OFFERED_SQL: &str = include_str!("sql/flavor_offered.sql");
const SIZE_PRICE_MODIFIER_SQL: &str = include_str!("sql/size_price_modifier.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: &ProductListing,
    ) -> Result<Vec<ProductSummaryRecord>, sqlx::Error> {
        let limit = i64::from(listing.page_size.get());
        let offset = i64::try_from(listing.offset()).map_err(|e| sqlx::Error::ColumnDecode {
            index: "offset".to_string(),
            source: Box::new(e),
        })?;

        let min_price = listing
            .min_price
            .map(|price| amount_to_column("min_price", price))
            .transpose()?;

        let max_price = listing
            .max_price
            .map(|price| amount_to_column("max_price", price))
            .transpose()?;

        query_as::<Postgres, ProductSummaryRecord>(LIST_PRODUCTS_SQL)
            .bind(uuid_filter(&listing.category_uuids))
            .bind(uuid_filter(&listing.flavor_uuids))
            .bind(uuid_filter(&listing.size_uuids))
            .bind(uuid_filter(&listing.confectioner_uuids))
            .bind(min_price)
            .bind(max_price)
            .bind(listing.availability.as_str())
            .bind(listing.search_pattern())
            .bind(listing.sort.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    /// Counts the rows [`Self::list_products`] pages through, with the same predicates.
    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: &ProductListing,
    ) -> Result<u64, sqlx::Error> {
        let min_price = listing
            .min_price
            .map(|price| amount_to_column("min_price", price))
            .transpose()?;

        let max_price = listing
            .max_price
            .map(|price| amount_to_column("max_price", price))
            .transpose()?;

        let total: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(uuid_filter(&listing.category_uuids))
            .bind(uuid_filter(&listing.flavor_uuids))
            .bind(uuid_filter(&listing.size_uuids))
            .bind(uuid_filter(&listing.confectioner_uuids))
            .bind(min_price)
            .bind(max_price)
            .bind(listing.availability.as_str())
            .bind(listing.search_pattern())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn find_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductImageRecord>, sqlx::Error> {
        query_as::<Postgres, ProductImageRecord>(LIST_PRODUCT_IMAGES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_flavors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<FlavorRecord>, sqlx::Error> {
        query_as::<Postgres, FlavorRecord>(LIST_PRODUCT_FLAVORS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_sizes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<SizeRecord>, sqlx::Error> {
        query_as::<Postgres, SizeRecord>(LIST_PRODUCT_SIZES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_PRODUCT_REVIEWS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_confectioner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        confectioner: ConfectionerUuid,
    ) -> Result<Option<ConfectionerRecord>, sqlx::Error> {
        query_as::<Postgres, ConfectionerRecord>(GET_CONFECTIONER_SQL)
            .bind(confectioner.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Purchasable products sharing `criteria` with `reference`, excluding it.
    pub(crate) async fn related_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reference: &ProductRecord,
        criteria: RelatedCriteria,
        limit: u32,
    ) -> Result<Vec<ProductSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, ProductSummaryRecord>(RELATED_PRODUCTS_SQL)
            .bind(reference.uuid.into_uuid())
            .bind(criteria.as_str())
            .bind(reference.category_uuid.into_uuid())
            .bind(reference.confectioner_uuid.into_uuid())
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    /// Whether the flavor is offered for the product and currently enabled.
    pub(crate) async fn is_flavor_offered(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        flavor: FlavorUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(FLAVOR_OFFERED_SQL)
            .bind(product.into_uuid())
            .bind(flavor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Price modifier of the size when it is offered for the product and enabled.
    pub(crate) async fn offered_size_price_modifier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        size: SizeUuid,
    ) -> Result<Option<i64>, sqlx::Error> {
        query_scalar::<Postgres, i64>(SIZE_PRICE_MODIFIER_SQL)
            .bind(product.into_uuid())
            .bind(size.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

fn try_get_pricing(row: &PgRow) -> Result<ProductPricing, sqlx::Error> {
    Ok(ProductPricing {
        price: try_get_amount(row, "price")?,
        promotional_price: try_get_optional_amount(row, "promotional_price")?,
        is_promotion: row.try_get("is_promotion")?,
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            confectioner_uuid: ConfectionerUuid::from_uuid(row.try_get("confectioner_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            ingredients: row.try_get("ingredients")?,
            nutritional_info: row.try_get("nutritional_info")?,
            pricing: try_get_pricing(row)?,
            available: row.try_get("available")?,
            stock: try_get_count(row, "stock")?,
            preparation_minutes: try_get_count(row, "preparation_minutes")?,
            rating: row.try_get("rating")?,
            review_count: try_get_count(row, "review_count")?,
            sales_count: try_get_count(row, "sales_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSummaryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            primary_image: row.try_get("primary_image")?,
            pricing: try_get_pricing(row)?,
            rating: row.try_get("rating")?,
            review_count: try_get_count(row, "review_count")?,
            confectioner_name: row.try_get("confectioner_name")?,
            available: row.try_get("available")?,
            preparation_minutes: try_get_count(row, "preparation_minutes")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductImageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductImageUuid::from_uuid(row.try_get("uuid")?),
            url: row.try_get("url")?,
            alt_text: row.try_get("alt_text")?,
            is_primary: row.try_get("is_primary")?,
            display_order: row.try_get("display_order")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for FlavorRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: FlavorUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SizeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SizeUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            servings: try_get_count(row, "servings")?,
            price_modifier: row.try_get("price_modifier")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating_i16: i16 = row.try_get("rating")?;

        let rating = u8::try_from(rating_i16).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rating".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            customer_name: row.try_get("customer_name")?,
            rating,
            comment: row.try_get("comment")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ConfectionerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ConfectionerUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            bio: row.try_get("bio")?,
            avatar_url: row.try_get("avatar_url")?,
            city: row.try_get("city")?,
            rating: row.try_get("rating")?,
        })
    }
}
