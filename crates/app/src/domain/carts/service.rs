//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{ITEM_QUANTITY_RANGE, NewCartItem, line_total, unit_price},
            errors::CartsServiceError,
            records::{CartItemRecord, CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::repository::PgProductsRepository,
        tenants::records::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(
        &self,
        tenant: TenantUuid,
        session_id: String,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let mut cart = self
            .carts_repository
            .find_cart_by_session(&mut tx, &session_id)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    async fn add_item(
        &self,
        tenant: TenantUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if !ITEM_QUANTITY_RANGE.contains(&item.quantity) {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let product = self
            .products_repository
            .find_product(&mut tx, item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductDoesntExist)?;

        if !product.is_purchasable() {
            return Err(CartsServiceError::ProductNotAvailable);
        }

        let flavor_offered = self
            .products_repository
            .is_flavor_offered(&mut tx, item.product_uuid, item.flavor_uuid)
            .await?;

        if !flavor_offered {
            return Err(CartsServiceError::FlavorNotAvailable);
        }

        let price_modifier = self
            .products_repository
            .offered_size_price_modifier(&mut tx, item.product_uuid, item.size_uuid)
            .await?
            .ok_or(CartsServiceError::SizeNotAvailable)?;

        let unit_price = unit_price(product.pricing.effective_price(), price_modifier)
            .ok_or(CartsServiceError::InvalidPrice)?;

        let total_price =
            line_total(unit_price, item.quantity).ok_or(CartsServiceError::InvalidPrice)?;

        let cart = self
            .carts_repository
            .upsert_cart(&mut tx, CartUuid::new(), &item.session_id)
            .await?;

        let Some(line) = self
            .items_repository
            .upsert_cart_item(&mut tx, cart.uuid, &item, unit_price, total_price)
            .await?
        else {
            debug!(cart = %cart.uuid, product = %item.product_uuid, "cart line quantity limit reached");

            return Err(CartsServiceError::QuantityExceedsMaximum);
        };

        tx.commit().await?;

        Ok(line)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the cart of a shopper session with its items.
    async fn get_cart(
        &self,
        tenant: TenantUuid,
        session_id: String,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Add an item to the session's cart, merging it into an existing line for
    /// the same product, flavor and size.
    async fn add_item(
        &self,
        tenant: TenantUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;
}
