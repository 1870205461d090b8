//! Shared query-building blocks for paginated listings.
//!
//! Every listing goes through the same pipeline: apply the optional
//! text filter and equality filters, order by the parsed sort key, count
//! the full filtered set, then fetch one page with `OFFSET`/`LIMIT`.

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};
use sea_orm::{DatabaseConnection, EntityTrait, Order, PaginatorTrait, QuerySelect, Select};

use crate::errors::AppResult;
use crate::types::{Page, SortDirection};

/// Case-insensitive substring predicate: `LOWER(col) LIKE '%needle%'`.
pub(crate) fn contains_ci<C: IntoColumnRef>(col: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(format!("%{}%", needle.to_lowercase()))
}

/// Map the parsed sort direction onto the query builder's order.
pub(crate) fn order_from(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Ascending => Order::Asc,
        SortDirection::Descending => Order::Desc,
    }
}

/// Run a fully-filtered, fully-ordered select as one page.
///
/// The count is taken over the query before `OFFSET`/`LIMIT` are applied,
/// so `total` always covers the whole filtered set regardless of paging.
pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    skip: u64,
    limit: u64,
) -> AppResult<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    let total = query.clone().count(db).await?;
    let docs = query.offset(skip).limit(limit).all(db).await?;

    Ok(Page::new(docs, total, limit, skip))
}
