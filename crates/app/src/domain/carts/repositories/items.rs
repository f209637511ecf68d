//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    carts::{
        data::{ITEM_QUANTITY_RANGE, NewCartItem},
        records::{CartItemRecord, CartItemUuid, CartUuid},
    },
    columns::{amount_to_column, try_get_amount},
    products::records::{FlavorUuid, ProductUuid, SizeUuid},
};

const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Inserts the line, or merges it into the existing line for the same
    /// product, flavor and size.
    ///
    /// Returns `None` without writing when the merged quantity would exceed
    /// the per-line maximum.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &NewCartItem,
        unit_price: u64,
        total_price: u64,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPSERT_CART_ITEM_SQL)
            .bind(CartItemUuid::new().into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.flavor_uuid.into_uuid())
            .bind(item.size_uuid.into_uuid())
            .bind(i32::from(item.quantity))
            .bind(amount_to_column("unit_price", unit_price)?)
            .bind(amount_to_column("total_price", total_price)?)
            .bind(item.observations.as_deref())
            .bind(i32::from(*ITEM_QUANTITY_RANGE.end()))
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u8::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            flavor_uuid: FlavorUuid::from_uuid(row.try_get("flavor_uuid")?),
            size_uuid: SizeUuid::from_uuid(row.try_get("size_uuid")?),
            quantity,
            unit_price: try_get_amount(row, "unit_price")?,
            total_price: try_get_amount(row, "total_price")?,
            observations: row.try_get("observations")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
