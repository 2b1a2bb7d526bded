use serde_json::{json, Value};

use crate::helpers::{asha_reservation, TestApp, RESTAURANT_INBOX};

async fn create_asha(app: &TestApp) -> String {
    let response = app.post_reservation(&asha_reservation()).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

#[actix_web::test]
async fn new_reservation_is_pending_and_emails_restaurant_and_guest(){
    let app = TestApp::spawn_app().await;
    app.mock_email_relay(200).await;

    let response = app.post_reservation(&asha_reservation()).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["name"], "Asha");
    assert_eq!(body["date"], "2025-01-10");
    assert_eq!(body["guests"], 4);

    let recipients: Vec<String> = app.sent_emails().await
        .iter()
        .map(|e| e["To"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(recipients, vec![RESTAURANT_INBOX.to_string(), "a@x.com".to_string()]);
}

#[actix_web::test]
async fn plural_intake_route_also_creates_reservations(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/api/reservations", app.get_app_url()))
        .json(&asha_reservation())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
}

#[actix_web::test]
async fn reservation_with_missing_fields_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.post_reservation(&json!({ "name": "Asha", "email": "a@x.com" })).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Missing required fields"));
    assert!(message.contains("phone"));

    app.login_admin().await;
    let listing: Value = app.get_admin_reservations().await.json().await.unwrap();
    assert!(listing.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn reservation_is_stored_even_when_email_relay_fails(){
    let app = TestApp::spawn_app().await;
    app.mock_email_relay(500).await;

    let id = create_asha(&app).await;

    app.login_admin().await;
    let listing: Value = app.get_admin_reservations().await.json().await.unwrap();
    assert_eq!(listing[0]["id"], id.as_str());
}

#[actix_web::test]
async fn confirming_sends_one_email_and_repeating_is_idempotent(){
    let app = TestApp::spawn_app().await;
    app.mock_email_relay(200).await;

    let id = create_asha(&app).await;
    app.login_admin().await;

    let response = app.patch_reservation(&id, &json!({ "status": "CONFIRMED" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "CONFIRMED");

    let emails = app.sent_emails().await;
    assert_eq!(emails.len(), 3);
    let confirmation = &emails[2];
    assert_eq!(confirmation["To"], "a@x.com");
    assert_eq!(confirmation["Subject"], "¡Your Reservation at Salud is Confirmed!");
    assert_eq!(confirmation["Attachments"].as_array().unwrap().len(), 2);

    let response = app.patch_reservation(&id, &json!({ "status": "CONFIRMED" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "CONFIRMED");

    let emails = app.sent_emails().await;
    assert_eq!(emails.len(), 4);
    assert_eq!(emails[3]["To"], "a@x.com");
    assert_eq!(emails[3]["Subject"], "¡Your Reservation at Salud is Confirmed!");
}

#[actix_web::test]
async fn status_update_succeeds_when_email_relay_fails(){
    let app = TestApp::spawn_app().await;
    app.mock_email_relay(500).await;

    let id = create_asha(&app).await;
    app.login_admin().await;

    let response = app.patch_reservation(&id, &json!({ "status": "CONFIRMED" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "CONFIRMED");

    let emails = app.sent_emails().await;
    assert_eq!(emails.len(), 3);
    assert_eq!(emails[2]["To"], "a@x.com");
}

#[actix_web::test]
async fn terminal_reservation_cannot_switch_to_the_other_outcome(){
    let app = TestApp::spawn_app().await;
    let id = create_asha(&app).await;
    app.login_admin().await;

    let response = app.patch_reservation(&id, &json!({ "status": "CONFIRMED" })).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.patch_reservation(&id, &json!({ "status": "REJECTED" })).await;
    assert_eq!(response.status().as_u16(), 400);

    let listing: Value = app.get_admin_reservations().await.json().await.unwrap();
    assert_eq!(listing[0]["status"], "CONFIRMED");
}

#[actix_web::test]
async fn missing_status_leaves_reservation_unchanged(){
    let app = TestApp::spawn_app().await;
    let id = create_asha(&app).await;
    app.login_admin().await;

    let response = app.patch_reservation(&id, &json!({ "adminNote": "see you soon" })).await;
    assert_eq!(response.status().as_u16(), 400);

    let listing: Value = app.get_admin_reservations().await.json().await.unwrap();
    assert_eq!(listing[0]["status"], "PENDING");
    assert_eq!(listing[0]["adminNote"], Value::Null);
}

#[actix_web::test]
async fn unknown_status_value_is_rejected(){
    let app = TestApp::spawn_app().await;
    let id = create_asha(&app).await;
    app.login_admin().await;

    let response = app.patch_reservation(&id, &json!({ "status": "MAYBE" })).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn rejecting_stores_the_admin_note(){
    let app = TestApp::spawn_app().await;
    app.mock_email_relay(200).await;
    let id = create_asha(&app).await;
    app.login_admin().await;

    let response = app.patch_reservation(&id, &json!({ "status": "REJECTED", "adminNote": "Fully booked" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["adminNote"], "Fully booked");

    let rejection = app.sent_emails().await.pop().unwrap();
    assert_eq!(rejection["Subject"], "Update on Your Salud Reservation");
    assert!(rejection["HtmlBody"].as_str().unwrap().contains("Fully booked"));
}

#[actix_web::test]
async fn updating_unknown_reservation_is_not_found(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;

    let response = app.patch_reservation(&uuid::Uuid::new_v4().to_string(), &json!({ "status": "CONFIRMED" })).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn status_update_requires_admin_cookie(){
    let app = TestApp::spawn_app().await;
    let id = create_asha(&app).await;

    let response = app.patch_reservation(&id, &json!({ "status": "CONFIRMED" })).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.api_client.patch(format!("{}/api/reservation/{}", app.get_app_url(), id))
        .json(&json!({ "status": "CONFIRMED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn pending_reservation_cannot_be_deleted(){
    let app = TestApp::spawn_app().await;
    let id = create_asha(&app).await;
    app.login_admin().await;

    let response = app.delete_reservation(&id).await;
    assert_eq!(response.status().as_u16(), 400);

    app.patch_reservation(&id, &json!({ "status": "REJECTED" })).await;

    let response = app.delete_reservation(&id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let response = app.delete_reservation(&id).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn listing_is_newest_first_and_never_cached(){
    let app = TestApp::spawn_app().await;
    let first = create_asha(&app).await;
    let second = create_asha(&app).await;
    app.login_admin().await;

    let response = app.get_admin_reservations().await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["cache-control"], "no-store, no-cache, must-revalidate");
    assert_eq!(response.headers()["pragma"], "no-cache");
    assert_eq!(response.headers()["expires"], "0");

    let listing: Value = response.json().await.unwrap();
    let ids: Vec<&str> = listing.as_array().unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[actix_web::test]
async fn collection_patch_takes_the_id_from_the_body(){
    let app = TestApp::spawn_app().await;
    app.mock_email_relay(200).await;
    let id = create_asha(&app).await;
    app.login_admin().await;

    let response = app.patch_reservations(&json!({ "id": id, "status": "REJECTED", "adminNote": "Fully booked" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["status"], "REJECTED");
    assert_eq!(body["adminNote"], "Fully booked");

    let rejection = app.sent_emails().await.pop().unwrap();
    assert_eq!(rejection["To"], "a@x.com");
    assert_eq!(rejection["Subject"], "Update on Your Salud Reservation");
}

#[actix_web::test]
async fn collection_patch_requires_id_and_status(){
    let app = TestApp::spawn_app().await;
    let id = create_asha(&app).await;
    app.login_admin().await;

    let cases = vec![
        (json!({ "status": "CONFIRMED" }), "missing id"),
        (json!({ "id": id }), "missing status"),
        (json!({}), "missing id and status")
    ];

    for (body, description) in cases {
        let response = app.patch_reservations(&body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 when the payload had a {}",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Missing required fields"));
    }

    let listing: Value = app.get_admin_reservations().await.json().await.unwrap();
    assert_eq!(listing[0]["status"], "PENDING");
}

#[actix_web::test]
async fn collection_patch_requires_admin_cookie(){
    let app = TestApp::spawn_app().await;
    let id = create_asha(&app).await;

    let response = app.patch_reservations(&json!({ "id": id, "status": "CONFIRMED" })).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn malformed_reservation_id_is_a_json_bad_request(){
    let app = TestApp::spawn_app().await;
    app.login_admin().await;

    let response = app.delete_reservation("not-a-uuid").await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.headers()["content-type"], "application/json");
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let response = app.patch_reservation("not-a-uuid", &json!({ "status": "CONFIRMED" })).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
