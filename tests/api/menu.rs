use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use salud::schema::menu_items;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::TestApp;

async fn create_item(app: &TestApp, name: &str, category: &str) -> String {
    let response = app.post_menu_item(&json!({
        "name": name,
        "category": category,
        "price": 250
    }))
    .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

#[actix_web::test]
async fn invalid_category_is_rejected_and_nothing_is_stored(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;

    let response = app.post_menu_item(&json!({ "name": "X", "category": "Appetizer" })).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid category");

    let items = app.get_json("/api/admin/menu").await;
    assert!(items.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn blank_name_and_negative_price_are_rejected(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;

    let cases = vec![
        (json!({ "name": "  ", "category": "Soup" }), "blank name"),
        (json!({ "category": "Soup" }), "missing name"),
        (json!({ "name": "Bisque" }), "missing category"),
        (json!({ "name": "Bisque", "category": "Soup", "price": -1 }), "negative price")
    ];

    for (body, description) in cases {
        let response = app.post_menu_item(&body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 when the payload had a {}",
            description
        );
    }
}

#[actix_web::test]
async fn creating_menu_items_requires_admin_cookie(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/api/menu", app.get_app_url()))
        .json(&json!({ "name": "Flan", "category": "Dessert" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = app.post_menu_item(&json!({ "name": "Flan", "category": "Dessert" })).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn public_listing_is_ordered_by_category_then_name(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;

    create_item(&app, "Paella", "MainCourse").await;
    create_item(&app, "Sangria", "Drink").await;
    create_item(&app, "Gazpacho", "Soup").await;
    create_item(&app, "Agua Fresca", "Drink").await;

    let items = app.get_json("/api/menu").await;
    let names: Vec<&str> = items.as_array().unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Agua Fresca", "Sangria", "Gazpacho", "Paella"]);

    let admin_items = app.get_json("/api/admin/menu").await;
    assert_eq!(admin_items[0]["name"], "Agua Fresca");
}

#[actix_web::test]
async fn sections_group_items_and_skip_empty_categories(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;

    create_item(&app, "Churros", "Dessert").await;
    create_item(&app, "Sangria", "Drink").await;
    create_item(&app, "Flan", "Dessert").await;

    let sections = app.get_json("/api/menu/sections").await;
    let sections = sections.as_array().unwrap();
    assert_eq!(sections.len(), 2);

    assert_eq!(sections[0]["category"], "Drink");
    assert_eq!(sections[1]["category"], "Dessert");
    assert_eq!(sections[1]["label"], "Dessert");
    assert_eq!(sections[1]["items"][0]["name"], "Churros");
    assert_eq!(sections[1]["items"][1]["name"], "Flan");
}

#[actix_web::test]
async fn update_replaces_fields_through_either_route(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;
    let id = create_item(&app, "Gazpacho", "Soup").await;

    let response = app.api_client.put(format!("{}/api/admin/menu/{}", app.get_app_url(), id))
        .json(&json!({ "name": "Salmorejo", "category": "Soup", "isAvailable": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let item = app.get_json(&format!("/api/admin/menu/{}", id)).await;
    assert_eq!(item["name"], "Salmorejo");
    assert_eq!(item["isAvailable"], false);
    assert_eq!(item["price"], Value::Null);

    let response = app.api_client.put(format!("{}/api/admin/menu/items", app.get_app_url()))
        .json(&json!({ "id": id, "name": "Salmorejo", "category": "AmuseBouche", "price": "12.5" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["category"], "AmuseBouche");
    assert_eq!(body["price"], 12.5);

    let response = app.api_client.put(format!("{}/api/admin/menu/items", app.get_app_url()))
        .json(&json!({ "name": "Salmorejo", "category": "Soup" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn updating_unknown_item_is_not_found(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;

    let response = app.api_client.put(format!("{}/api/admin/menu/{}", app.get_app_url(), Uuid::new_v4()))
        .json(&json!({ "name": "Ghost", "category": "Soup" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn delete_by_query_requires_an_id(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;
    let id = create_item(&app, "Flan", "Dessert").await;

    let response = app.api_client.delete(format!("{}/api/admin/menu/items", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = app.api_client.delete(format!("{}/api/admin/menu/items?id={}", app.get_app_url(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = app.api_client.delete(format!("{}/api/menu/{}", app.get_app_url(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn replacing_an_item_stores_and_clears_its_menu_id(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;
    let id = create_item(&app, "Flan", "Dessert").await;
    let menu_id = Uuid::new_v4();

    let response = app.api_client.put(format!("{}/api/admin/menu/{}", app.get_app_url(), id))
        .json(&json!({ "name": "Flan", "category": "Dessert", "menuId": menu_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["menuId"], menu_id.to_string());

    let item_id = Uuid::parse_str(&id).unwrap();
    let stored: Option<Uuid> = menu_items::table
        .filter(menu_items::id.eq(item_id))
        .select(menu_items::menu_id)
        .first(&mut app.pool.get().unwrap())
        .unwrap();
    assert_eq!(stored, Some(menu_id));

    let response = app.api_client.put(format!("{}/api/admin/menu/{}", app.get_app_url(), id))
        .json(&json!({ "name": "Flan", "category": "Dessert" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let item = app.get_json(&format!("/api/admin/menu/{}", id)).await;
    assert_eq!(item["menuId"], Value::Null);
}

#[actix_web::test]
async fn malformed_item_id_is_a_json_bad_request(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;

    let response = app.api_client.get(format!("{}/api/admin/menu/not-a-uuid", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
