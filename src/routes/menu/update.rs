use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::IsAdmin,
    db_interaction::update_menu_item,
    domain::{MenuItemForm, MenuItemInput},
    models::MenuItemChanges,
    utils::{get_pooled_connection, DbPool}
};

use super::MenuRouteError;

// Body of PUT /api/admin/menu/items, which names the item inline
#[derive(Deserialize, Debug)]
pub struct MenuItemReplacement{
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub form: MenuItemForm
}

async fn replace_menu_item(
    pool: &web::Data<DbPool>,
    item_id: Uuid,
    form: MenuItemForm
) -> Result<HttpResponse, MenuRouteError> {
    let input = MenuItemInput::parse(form)?;

    let conn = get_pooled_connection(pool).await?;
    let item = update_menu_item(conn, item_id, MenuItemChanges::from(input))
        .await?
        .ok_or(MenuRouteError::NotFound)?;

    Ok(HttpResponse::Ok().json(item))
}

#[tracing::instrument(
    "Replacing menu item",
    skip(pool, form, _admin)
)]
pub async fn update_menu_entry(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<MenuItemForm>,
    _admin: IsAdmin
) -> Result<HttpResponse, MenuRouteError> {
    replace_menu_item(&pool, path.into_inner(), form.into_inner()).await
}

#[tracing::instrument(
    "Replacing menu item from body id",
    skip(pool, body, _admin)
)]
pub async fn update_menu_entry_by_body(
    pool: web::Data<DbPool>,
    body: web::Json<MenuItemReplacement>,
    _admin: IsAdmin
) -> Result<HttpResponse, MenuRouteError> {
    let MenuItemReplacement{ id, form } = body.into_inner();
    let item_id = id.ok_or(MenuRouteError::MissingId)?;

    replace_menu_item(&pool, item_id, form).await
}
