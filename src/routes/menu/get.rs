use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    db_interaction::{get_menu_item, get_menu_items, MenuOrder},
    domain::group_by_category,
    utils::{get_pooled_connection, DbPool}
};

use super::MenuRouteError;

// Public flat listing, category order then name
#[tracing::instrument(
    "Listing menu",
    skip(pool)
)]
pub async fn list_menu(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, MenuRouteError> {
    let conn = get_pooled_connection(&pool).await?;
    let items = get_menu_items(conn, MenuOrder::CategoryThenName).await?;

    Ok(HttpResponse::Ok().json(items))
}

#[tracing::instrument(
    "Listing menu sections",
    skip(pool)
)]
pub async fn list_menu_sections(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, MenuRouteError> {
    let conn = get_pooled_connection(&pool).await?;
    let items = get_menu_items(conn, MenuOrder::CategoryThenName).await?;

    Ok(HttpResponse::Ok().json(group_by_category(items)))
}

// Admin listing, newest first
#[tracing::instrument(
    "Listing menu for admin",
    skip(pool)
)]
pub async fn list_menu_admin(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, MenuRouteError> {
    let conn = get_pooled_connection(&pool).await?;
    let items = get_menu_items(conn, MenuOrder::NewestFirst).await?;

    Ok(HttpResponse::Ok().json(items))
}

#[tracing::instrument(
    "Getting menu item",
    skip(pool)
)]
pub async fn get_menu_entry(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, MenuRouteError> {
    let conn = get_pooled_connection(&pool).await?;
    let item = get_menu_item(conn, path.into_inner())
        .await?
        .ok_or(MenuRouteError::NotFound)?;

    Ok(HttpResponse::Ok().json(item))
}
