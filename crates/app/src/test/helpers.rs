//! Catalog fixtures inserted through the superuser pool.

use sqlx::query;

use crate::{
    domain::{
        products::records::{
            CategoryUuid, ConfectionerUuid, FlavorUuid, ProductImageUuid, ProductUuid, ReviewUuid,
            SizeUuid,
        },
        tenants::records::TenantUuid,
    },
    test::TestContext,
};

/// Lookup rows most tests need.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Catalog {
    pub tenant: TenantUuid,
    pub category: CategoryUuid,
    pub confectioner: ConfectionerUuid,

    /// Active flavor, not yet offered for any product.
    pub flavor: FlavorUuid,

    /// Active size with a +500 price modifier, not yet offered for any product.
    pub size: SizeUuid,
}

impl Catalog {
    /// Purchasable product in the catalog's category, priced 20.00.
    pub(crate) fn product(&self, name: &str) -> ProductFixture {
        ProductFixture {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            category: self.category,
            confectioner: self.confectioner,
            price: 2000,
            promotional_price: None,
            is_promotion: false,
            available: true,
            stock: 5,
            rating: 4.0,
            sales_count: 10,
            deleted: false,
        }
    }

    /// Offer the catalog's flavor and size for the product.
    pub(crate) async fn offer_all(&self, ctx: &TestContext, product: ProductUuid) {
        offer_flavor(ctx, self.tenant, product, self.flavor, true).await;
        offer_size(ctx, self.tenant, product, self.size, true).await;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ProductFixture {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: CategoryUuid,
    pub confectioner: ConfectionerUuid,
    pub price: i64,
    pub promotional_price: Option<i64>,
    pub is_promotion: bool,
    pub available: bool,
    pub stock: i32,
    pub rating: f64,
    pub sales_count: i32,
    pub deleted: bool,
}

pub(crate) async fn insert_category(
    ctx: &TestContext,
    tenant: TenantUuid,
    name: &str,
) -> CategoryUuid {
    let uuid = CategoryUuid::new();

    query("INSERT INTO categories (uuid, tenant_uuid, name) VALUES ($1, $2, $3)")
        .bind(uuid.into_uuid())
        .bind(tenant.into_uuid())
        .bind(name)
        .execute(ctx.db.pool())
        .await
        .expect("Failed to insert category");

    uuid
}

pub(crate) async fn insert_confectioner(
    ctx: &TestContext,
    tenant: TenantUuid,
    name: &str,
) -> ConfectionerUuid {
    let uuid = ConfectionerUuid::new();

    query(
        "INSERT INTO confectioners (uuid, tenant_uuid, name, bio, city, rating) \
         VALUES ($1, $2, $3, 'Bakes to order', 'Lisbon', 4.8)",
    )
    .bind(uuid.into_uuid())
    .bind(tenant.into_uuid())
    .bind(name)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to insert confectioner");

    uuid
}

pub(crate) async fn insert_flavor(
    ctx: &TestContext,
    tenant: TenantUuid,
    name: &str,
    active: bool,
) -> FlavorUuid {
    let uuid = FlavorUuid::new();

    query("INSERT INTO flavors (uuid, tenant_uuid, name, active) VALUES ($1, $2, $3, $4)")
        .bind(uuid.into_uuid())
        .bind(tenant.into_uuid())
        .bind(name)
        .bind(active)
        .execute(ctx.db.pool())
        .await
        .expect("Failed to insert flavor");

    uuid
}

pub(crate) async fn insert_size(
    ctx: &TestContext,
    tenant: TenantUuid,
    name: &str,
    servings: i32,
    price_modifier: i64,
) -> SizeUuid {
    let uuid = SizeUuid::new();

    query(
        "INSERT INTO sizes (uuid, tenant_uuid, name, servings, price_modifier) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(uuid.into_uuid())
    .bind(tenant.into_uuid())
    .bind(name)
    .bind(servings)
    .bind(price_modifier)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to insert size");

    uuid
}

pub(crate) async fn insert_product(
    ctx: &TestContext,
    tenant: TenantUuid,
    product: &ProductFixture,
) -> ProductUuid {
    query(
        "INSERT INTO products ( \
             uuid, tenant_uuid, category_uuid, confectioner_uuid, name, description, \
             ingredients, price, promotional_price, is_promotion, available, stock, \
             preparation_minutes, rating, sales_count, deleted_at \
         ) VALUES ( \
             $1, $2, $3, $4, $5, 'Baked fresh', 'Flour, eggs, sugar', $6, $7, $8, $9, $10, \
             90, $11, $12, CASE WHEN $13 THEN now() END \
         )",
    )
    .bind(product.uuid.into_uuid())
    .bind(tenant.into_uuid())
    .bind(product.category.into_uuid())
    .bind(product.confectioner.into_uuid())
    .bind(&product.name)
    .bind(product.price)
    .bind(product.promotional_price)
    .bind(product.is_promotion)
    .bind(product.available)
    .bind(product.stock)
    .bind(product.rating)
    .bind(product.sales_count)
    .bind(product.deleted)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to insert product");

    product.uuid
}

pub(crate) async fn offer_flavor(
    ctx: &TestContext,
    tenant: TenantUuid,
    product: ProductUuid,
    flavor: FlavorUuid,
    available: bool,
) {
    query(
        "INSERT INTO product_flavors (product_uuid, flavor_uuid, tenant_uuid, available) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(product.into_uuid())
    .bind(flavor.into_uuid())
    .bind(tenant.into_uuid())
    .bind(available)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to offer flavor");
}

pub(crate) async fn offer_size(
    ctx: &TestContext,
    tenant: TenantUuid,
    product: ProductUuid,
    size: SizeUuid,
    available: bool,
) {
    query(
        "INSERT INTO product_sizes (product_uuid, size_uuid, tenant_uuid, available) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(product.into_uuid())
    .bind(size.into_uuid())
    .bind(tenant.into_uuid())
    .bind(available)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to offer size");
}

pub(crate) async fn insert_image(
    ctx: &TestContext,
    tenant: TenantUuid,
    product: ProductUuid,
    url: &str,
    is_primary: bool,
    display_order: i32,
) {
    query(
        "INSERT INTO product_images (uuid, tenant_uuid, product_uuid, url, is_primary, display_order) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(ProductImageUuid::new().into_uuid())
    .bind(tenant.into_uuid())
    .bind(product.into_uuid())
    .bind(url)
    .bind(is_primary)
    .bind(display_order)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to insert product image");
}

pub(crate) async fn insert_review(
    ctx: &TestContext,
    tenant: TenantUuid,
    product: ProductUuid,
    rating: i16,
) {
    query(
        "INSERT INTO reviews (uuid, tenant_uuid, product_uuid, customer_name, rating, comment) \
         VALUES ($1, $2, $3, 'Ana', $4, 'Lovely')",
    )
    .bind(ReviewUuid::new().into_uuid())
    .bind(tenant.into_uuid())
    .bind(product.into_uuid())
    .bind(rating)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to insert review");
}
