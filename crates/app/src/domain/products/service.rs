//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        products::{
            data::{ProductListing, RelatedCriteria, RelatedQuery},
            errors::ProductsServiceError,
            records::{
                Pagination, ProductDetails, ProductPage, ProductSummaryRecord, ProductUuid,
            },
            repository::PgProductsRepository,
        },
        tenants::records::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        tenant: TenantUuid,
        listing: ProductListing,
    ) -> Result<ProductPage, ProductsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let products = self.repository.list_products(&mut tx, &listing).await?;
        let total_items = self.repository.count_products(&mut tx, &listing).await?;

        tx.commit().await?;

        Ok(ProductPage {
            products,
            pagination: Pagination::new(total_items, listing.page, listing.page_size.get()),
        })
    }

    async fn get_product(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
    ) -> Result<ProductDetails, ProductsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let product = self
            .repository
            .find_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        let images = self.repository.list_images(&mut tx, product.uuid).await?;
        let flavors = self.repository.list_flavors(&mut tx, product.uuid).await?;
        let sizes = self.repository.list_sizes(&mut tx, product.uuid).await?;
        let reviews = self.repository.list_reviews(&mut tx, product.uuid).await?;

        let confectioner = self
            .repository
            .find_confectioner(&mut tx, product.confectioner_uuid)
            .await?;

        tx.commit().await?;

        Ok(ProductDetails {
            product,
            images,
            flavors,
            sizes,
            reviews,
            confectioner,
        })
    }

    async fn related_products(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
        query: RelatedQuery,
    ) -> Result<Vec<ProductSummaryRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let reference = self
            .repository
            .find_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if query.criteria == RelatedCriteria::Flavor {
            debug!(product = %product, "related products by flavor requested");

            return Err(ProductsServiceError::CriteriaNotImplemented(
                query.criteria,
            ));
        }

        let related = self
            .repository
            .related_products(&mut tx, &reference, query.criteria, query.limit)
            .await?;

        tx.commit().await?;

        Ok(related)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of products matching the listing filters.
    async fn list_products(
        &self,
        tenant: TenantUuid,
        listing: ProductListing,
    ) -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve a single product with its images, options, reviews and confectioner.
    async fn get_product(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
    ) -> Result<ProductDetails, ProductsServiceError>;

    /// Retrieve purchasable products related to the given one.
    async fn related_products(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
        query: RelatedQuery,
    ) -> Result<Vec<ProductSummaryRecord>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::products::data::{Availability, PageSize, SortKey},
        test::{
            TestContext,
            helpers::{ProductFixture, insert_image, insert_product, insert_review, offer_flavor},
        },
    };

    use super::*;

    #[tokio::test]
    async fn list_products_paginates_with_total_count() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        for n in 0..14 {
            insert_product(&ctx, ctx.tenant_uuid, &catalog.product(&format!("Cake {n}"))).await;
        }

        let page = ctx
            .products
            .list_products(
                ctx.tenant_uuid,
                ProductListing {
                    page: 2,
                    ..ProductListing::default()
                },
            )
            .await?;

        assert_eq!(page.products.len(), 2);
        assert_eq!(page.pagination.total_items, 14);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.page_size, 12);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_availability() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        let in_stock = insert_product(&ctx, ctx.tenant_uuid, &catalog.product("In stock")).await;

        let sold_out = insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                stock: 0,
                ..catalog.product("Sold out")
            },
        )
        .await;

        let withdrawn = insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                available: false,
                ..catalog.product("Withdrawn")
            },
        )
        .await;

        let available = ctx
            .products
            .list_products(ctx.tenant_uuid, ProductListing::default())
            .await?;

        let uuids: Vec<ProductUuid> = available.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![in_stock]);

        let unavailable = ctx
            .products
            .list_products(
                ctx.tenant_uuid,
                ProductListing {
                    availability: Availability::Unavailable,
                    ..ProductListing::default()
                },
            )
            .await?;

        let uuids: Vec<ProductUuid> = unavailable.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids.len(), 2);
        assert!(uuids.contains(&sold_out), "sold out product should be listed");
        assert!(uuids.contains(&withdrawn), "withdrawn product should be listed");
        assert!(unavailable.products.iter().all(|p| !p.available));

        let all = ctx
            .products
            .list_products(
                ctx.tenant_uuid,
                ProductListing {
                    availability: Availability::All,
                    ..ProductListing::default()
                },
            )
            .await?;

        assert_eq!(all.pagination.total_items, 3);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_by_relevance_orders_by_uuid_only() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        let mut inserted = Vec::new();

        for (low_bits, sales_count) in [(3_u128, 99), (2, 50), (1, 0)] {
            let product = ProductFixture {
                uuid: ProductUuid::from_uuid(Uuid::from_u128(low_bits)),
                sales_count,
                ..catalog.product(&format!("Cake {low_bits}"))
            };

            inserted.push(insert_product(&ctx, ctx.tenant_uuid, &product).await);
        }

        let page = ctx
            .products
            .list_products(ctx.tenant_uuid, ProductListing::default())
            .await?;

        let uuids: Vec<ProductUuid> = page.products.iter().map(|p| p.uuid).collect();

        inserted.sort();

        assert_eq!(ProductListing::default().sort, SortKey::Relevance);
        assert_eq!(uuids, inserted);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_sorts_by_effective_price() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        let cheap = insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                price: 1500,
                ..catalog.product("Cheap")
            },
        )
        .await;

        let promoted = insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                price: 5000,
                promotional_price: Some(1000),
                is_promotion: true,
                ..catalog.product("Promoted")
            },
        )
        .await;

        let pricey = insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                price: 3000,
                ..catalog.product("Pricey")
            },
        )
        .await;

        let page = ctx
            .products
            .list_products(
                ctx.tenant_uuid,
                ProductListing {
                    sort: SortKey::PriceAsc,
                    ..ProductListing::default()
                },
            )
            .await?;

        let uuids: Vec<ProductUuid> = page.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![promoted, cheap, pricey]);

        let promoted_summary = page
            .products
            .iter()
            .find(|p| p.uuid == promoted)
            .ok_or("promoted product missing")?;

        assert_eq!(promoted_summary.pricing.effective_price(), 1000);
        assert_eq!(promoted_summary.pricing.original_price(), Some(5000));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_price_range_and_search() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        let chocolate = insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                price: 2500,
                ..catalog.product("Dark Chocolate Torte")
            },
        )
        .await;

        insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                price: 9000,
                ..catalog.product("Chocolate Wedding Cake")
            },
        )
        .await;

        insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                price: 2000,
                ..catalog.product("Lemon Drizzle")
            },
        )
        .await;

        let page = ctx
            .products
            .list_products(
                ctx.tenant_uuid,
                ProductListing {
                    min_price: Some(2000),
                    max_price: Some(3000),
                    search_term: Some("chocolate".to_string()),
                    ..ProductListing::default()
                },
            )
            .await?;

        let uuids: Vec<ProductUuid> = page.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![chocolate]);
        assert_eq!(page.pagination.total_items, 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_available_flavor() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        let offered = insert_product(&ctx, ctx.tenant_uuid, &catalog.product("Offered")).await;
        let disabled = insert_product(&ctx, ctx.tenant_uuid, &catalog.product("Disabled")).await;

        offer_flavor(&ctx, ctx.tenant_uuid, offered, catalog.flavor, true).await;
        offer_flavor(&ctx, ctx.tenant_uuid, disabled, catalog.flavor, false).await;

        let page = ctx
            .products
            .list_products(
                ctx.tenant_uuid,
                ProductListing {
                    flavor_uuids: vec![catalog.flavor],
                    page_size: PageSize::from_requested(Some(24)),
                    ..ProductListing::default()
                },
            )
            .await?;

        let uuids: Vec<ProductUuid> = page.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![offered]);
        assert_eq!(page.pagination.page_size, 24);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_excludes_deleted_products() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                deleted: true,
                ..catalog.product("Deleted")
            },
        )
        .await;

        let page = ctx
            .products
            .list_products(ctx.tenant_uuid, ProductListing::default())
            .await?;

        assert!(page.products.is_empty());
        assert_eq!(page.pagination.total_items, 0);
        assert_eq!(page.pagination.total_pages, 0);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_details() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        let product = insert_product(&ctx, ctx.tenant_uuid, &catalog.product("Red Velvet")).await;

        catalog.offer_all(&ctx, product).await;
        insert_image(&ctx, ctx.tenant_uuid, product, "https://img/side.jpg", false, 1).await;
        insert_image(&ctx, ctx.tenant_uuid, product, "https://img/main.jpg", true, 2).await;
        insert_review(&ctx, ctx.tenant_uuid, product, 5).await;

        let details = ctx.products.get_product(ctx.tenant_uuid, product).await?;

        assert_eq!(details.product.uuid, product);
        assert_eq!(details.product.name, "Red Velvet");
        assert_eq!(details.images.len(), 2);
        assert_eq!(
            details.images.first().map(|image| image.url.as_str()),
            Some("https://img/main.jpg")
        );
        assert_eq!(details.flavors.len(), 1);
        assert_eq!(details.sizes.len(), 1);
        assert_eq!(details.reviews.len(), 1);
        assert_eq!(
            details.confectioner.map(|c| c.uuid),
            Some(catalog.confectioner)
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_with_no_associations_has_empty_lists() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        let product = insert_product(&ctx, ctx.tenant_uuid, &catalog.product("Plain")).await;

        let details = ctx.products.get_product(ctx.tenant_uuid, product).await?;

        assert!(details.images.is_empty());
        assert!(details.flavors.is_empty());
        assert!(details.sizes.is_empty());
        assert!(details.reviews.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .get_product(ctx.tenant_uuid, ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn product_not_visible_to_other_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        let product = insert_product(&ctx, ctx.tenant_uuid, &catalog.product("Private")).await;

        let tenant_b = ctx.create_tenant("Tenant B").await;

        // Tenant B cannot see Tenant A's product
        let result = ctx.products.get_product(tenant_b, product).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound for cross-tenant access, got {result:?}"
        );

        let page = ctx
            .products
            .list_products(tenant_b, ProductListing::default())
            .await?;

        assert!(page.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn related_products_share_category_and_exclude_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;
        let other_category = ctx.insert_category("Cupcakes").await;

        let reference = insert_product(&ctx, ctx.tenant_uuid, &catalog.product("Reference")).await;

        let sibling = insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                rating: 4.5,
                ..catalog.product("Sibling")
            },
        )
        .await;

        insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                stock: 0,
                ..catalog.product("Sold out sibling")
            },
        )
        .await;

        insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                category: other_category,
                ..catalog.product("Cupcake")
            },
        )
        .await;

        let related = ctx
            .products
            .related_products(ctx.tenant_uuid, reference, RelatedQuery::default())
            .await?;

        let uuids: Vec<ProductUuid> = related.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![sibling]);

        Ok(())
    }

    #[tokio::test]
    async fn related_products_by_popularity_orders_by_sales() -> TestResult {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;
        let other_category = ctx.insert_category("Cookies").await;

        let reference = insert_product(&ctx, ctx.tenant_uuid, &catalog.product("Reference")).await;

        let best_seller = insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                category: other_category,
                sales_count: 900,
                ..catalog.product("Best seller")
            },
        )
        .await;

        let steady = insert_product(
            &ctx,
            ctx.tenant_uuid,
            &ProductFixture {
                sales_count: 50,
                rating: 5.0,
                ..catalog.product("Steady")
            },
        )
        .await;

        let related = ctx
            .products
            .related_products(
                ctx.tenant_uuid,
                reference,
                RelatedQuery::new(Some(1), RelatedCriteria::Popularity),
            )
            .await?;

        let uuids: Vec<ProductUuid> = related.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![best_seller]);
        assert!(!uuids.contains(&steady));

        Ok(())
    }

    #[tokio::test]
    async fn related_products_by_flavor_is_not_implemented() {
        let ctx = TestContext::new().await;
        let catalog = ctx.seed_catalog().await;

        let reference = insert_product(&ctx, ctx.tenant_uuid, &catalog.product("Reference")).await;

        let result = ctx
            .products
            .related_products(
                ctx.tenant_uuid,
                reference,
                RelatedQuery::new(None, RelatedCriteria::Flavor),
            )
            .await;

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::CriteriaNotImplemented(
                    RelatedCriteria::Flavor
                ))
            ),
            "expected CriteriaNotImplemented, got {result:?}"
        );
    }

    #[tokio::test]
    async fn related_products_unknown_reference_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .related_products(ctx.tenant_uuid, ProductUuid::new(), RelatedQuery::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
