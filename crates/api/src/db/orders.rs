//! Order repository: cart lookup and the order/product association.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bodega_core::{CustomerId, OrderId, OrderStatus, ProductId};

use super::RepositoryError;
use crate::db::products::ProductRow;
use crate::models::order::Order;
use crate::models::product::Product;

const ORDER_COLUMNS: &str = "id, customer_id, status, created_at, updated_at";

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for order/product join queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderProductRow {
    order_id: i32,
    #[sqlx(flatten)]
    product: ProductRow,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the customer's open order (their cart), if any.
    ///
    /// The oldest open order wins, so the lookup is deterministic even if
    /// duplicates exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn open_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.customer_order
             WHERE customer_id = $1 AND status = $2
             ORDER BY created_at, id
             LIMIT 1"
        ))
        .bind(customer_id)
        .bind(OrderStatus::Open.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all orders belonging to any of the given customers, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_customers(
        &self,
        customer_ids: &[CustomerId],
    ) -> Result<Vec<Order>, RepositoryError> {
        if customer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = customer_ids.iter().map(CustomerId::as_i32).collect();

        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.customer_order
             WHERE customer_id = ANY($1)
             ORDER BY id"
        ))
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List the products linked to an order, oldest association first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn products_in_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT p.id, p.name, p.price, p.created_at, p.updated_at
             FROM shop.product p
             JOIN shop.order_product op ON op.product_id = p.id
             WHERE op.order_id = $1
             ORDER BY op.added_at, p.id",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List the products linked to any of the given orders, keyed by order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn products_for_orders(
        &self,
        order_ids: &[OrderId],
    ) -> Result<Vec<(OrderId, Product)>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = order_ids.iter().map(OrderId::as_i32).collect();

        let rows: Vec<OrderProductRow> = sqlx::query_as(
            "SELECT op.order_id, p.id, p.name, p.price, p.created_at, p.updated_at
             FROM shop.product p
             JOIN shop.order_product op ON op.product_id = p.id
             WHERE op.order_id = ANY($1)
             ORDER BY op.order_id, op.added_at, p.id",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (OrderId::new(row.order_id), row.product.into()))
            .collect())
    }

    /// Link a product to the customer's cart, lazily creating the open order.
    ///
    /// Runs as a single transaction: find-or-create the open order, then
    /// insert the association row. The join table's composite primary key
    /// rejects a duplicate pair, surfaced as `RepositoryError::Conflict`.
    ///
    /// Known limitation: two concurrent calls for the same customer can each
    /// observe no open order and both create one, leaving the customer with
    /// duplicate open orders. Cart lookup stays deterministic (oldest wins),
    /// but the extra row lingers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product is already in the
    /// cart, `RepositoryError::Database` for other failures.
    pub async fn add_product_to_cart(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.customer_order
             WHERE customer_id = $1 AND status = $2
             ORDER BY created_at, id
             LIMIT 1"
        ))
        .bind(customer_id)
        .bind(OrderStatus::Open.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let order_row: OrderRow = match existing {
            Some(row) => row,
            None => {
                sqlx::query_as(&format!(
                    "INSERT INTO shop.customer_order (customer_id, status)
                     VALUES ($1, $2)
                     RETURNING {ORDER_COLUMNS}"
                ))
                .bind(customer_id)
                .bind(OrderStatus::Open.as_str())
                .fetch_one(&mut *tx)
                .await?
            }
        };

        sqlx::query("INSERT INTO shop.order_product (order_id, product_id) VALUES ($1, $2)")
            .bind(order_row.id)
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("product already in cart".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        tx.commit().await?;

        order_row.try_into()
    }

    /// Unlink a product from an order.
    ///
    /// Returns `true` if the association existed, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove_product(
        &self,
        order_id: OrderId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM shop.order_product WHERE order_id = $1 AND product_id = $2")
                .bind(order_id)
                .bind(product_id)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
