use std::{error::Error, fmt::Debug};

use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use thiserror::Error;
use uuid::Uuid;

use crate::{domain::menu_category::sort_for_listing, models::{MenuItem, MenuItemChanges}, schema::menu_items, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[derive(Error)]
pub enum MenuQueryError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query on menu_items table")]
    QueryError(#[from] diesel::result::Error)
}

impl Debug for MenuQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum MenuOrder{
    // Public listing
    CategoryThenName,
    // Admin listing
    NewestFirst
}

#[tracing::instrument(
    "Getting menu items from db",
    skip(conn)
)]
pub async fn get_menu_items(
    mut conn: DbConnection,
    order: MenuOrder
) -> Result<Vec<MenuItem>, MenuQueryError>{

    let mut items = spawn_blocking_with_tracing(move || {
        menu_items::table
            .order(menu_items::created_at.desc())
            .select(MenuItem::as_select())
            .load::<MenuItem>(&mut conn)
    })
    .await??;

    // category is stored as text, so enum order is applied here
    if let MenuOrder::CategoryThenName = order {
        sort_for_listing(&mut items);
    }

    Ok(items)
}

#[tracing::instrument(
    "Getting menu item by id",
    skip(conn)
)]
pub async fn get_menu_item(
    mut conn: DbConnection,
    item_id: Uuid
) -> Result<Option<MenuItem>, MenuQueryError>{

    let item = spawn_blocking_with_tracing(move || {
        menu_items::table
            .find(item_id)
            .select(MenuItem::as_select())
            .first::<MenuItem>(&mut conn)
            .optional()
    })
    .await??;

    Ok(item)
}

#[tracing::instrument(
    "Insert a menu item to db",
    skip_all,
    fields(name = %item.name, category = %item.category)
)]
pub async fn insert_menu_item(
    mut conn: DbConnection,
    item: MenuItem
) -> Result<MenuItem, MenuQueryError> {

    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(menu_items::table)
            .values(&item)
            .returning(MenuItem::as_returning())
            .get_result(&mut conn)
    })
    .await??;

    Ok(res)
}

// Returns None when no item has this id
#[tracing::instrument(
    "Replacing menu item fields",
    skip(conn, changes)
)]
pub async fn update_menu_item(
    mut conn: DbConnection,
    item_id: Uuid,
    changes: MenuItemChanges
) -> Result<Option<MenuItem>, MenuQueryError> {

    let res = spawn_blocking_with_tracing(move || {
        diesel::update(menu_items::table.find(item_id))
            .set(&changes)
            .returning(MenuItem::as_returning())
            .get_result(&mut conn)
            .optional()
    })
    .await??;

    Ok(res)
}

// Returns false when no item has this id
#[tracing::instrument(
    "Deleting menu item",
    skip(conn)
)]
pub async fn delete_menu_item(
    mut conn: DbConnection,
    item_id: Uuid
) -> Result<bool, MenuQueryError> {

    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(menu_items::table)
            .filter(menu_items::id.eq(item_id))
            .execute(&mut conn)
    })
    .await??;

    Ok(affected_rows > 0)
}
