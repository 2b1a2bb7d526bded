use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{auth::IsAdmin, db_interaction::delete_menu_item, utils::{get_pooled_connection, DbPool}};

use super::MenuRouteError;

#[derive(Deserialize, Debug)]
pub struct MenuItemIdQuery{
    pub id: Option<Uuid>
}

async fn remove_menu_item(pool: &web::Data<DbPool>, item_id: Uuid) -> Result<HttpResponse, MenuRouteError> {
    let conn = get_pooled_connection(pool).await?;

    if !delete_menu_item(conn, item_id).await? {
        return Err(MenuRouteError::NotFound)
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[tracing::instrument(
    "Deleting menu item",
    skip(pool, _admin)
)]
pub async fn delete_menu_entry(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    _admin: IsAdmin
) -> Result<HttpResponse, MenuRouteError> {
    remove_menu_item(&pool, path.into_inner()).await
}

#[tracing::instrument(
    "Deleting menu item from query id",
    skip(pool, _admin)
)]
pub async fn delete_menu_entry_by_query(
    pool: web::Data<DbPool>,
    query: web::Query<MenuItemIdQuery>,
    _admin: IsAdmin
) -> Result<HttpResponse, MenuRouteError> {
    let item_id = query.into_inner().id.ok_or(MenuRouteError::MissingId)?;
    remove_menu_item(&pool, item_id).await
}
