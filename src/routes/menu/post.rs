use actix_web::{web, HttpResponse};

use crate::{
    auth::IsAdmin,
    db_interaction::insert_menu_item,
    domain::{MenuItemForm, MenuItemInput},
    models::MenuItem,
    utils::{get_pooled_connection, DbPool}
};

use super::MenuRouteError;

/// Validates before touching the database, so a rejected item is never
/// stored. Serves `/api/menu`, `/api/admin/menu` and `/api/admin/menu/items`.
#[tracing::instrument(
    "Creating menu item",
    skip(pool, form, _admin)
)]
pub async fn create_menu_item(
    pool: web::Data<DbPool>,
    form: web::Json<MenuItemForm>,
    _admin: IsAdmin
) -> Result<HttpResponse, MenuRouteError> {

    let input = MenuItemInput::parse(form.into_inner())?;

    let conn = get_pooled_connection(&pool).await?;
    let item = insert_menu_item(conn, MenuItem::from_input(input)).await?;

    Ok(HttpResponse::Created().json(item))
}
