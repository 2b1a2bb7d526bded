use actix_web::{http::{header, StatusCode}, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    db_interaction::get_reservations,
    domain::{ReservationFilter, StatusCounts},
    models::Reservation,
    startup::RefreshInterval,
    utils::{get_pooled_connection, json_error_into, DbPool}
};

const DASHBOARD_PAGE: &str = "/admin/dashboard";

const LOGIN_FORM: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Salud Admin</title></head>
<body>
  <h1>Salud Admin</h1>
  <form id="login">
    <label>Username <input name="username" required></label>
    <label>Password <input name="password" type="password" required></label>
    <button type="submit">Sign in</button>
  </form>
  <p id="error"></p>
  <script>
    document.getElementById("login").addEventListener("submit", async (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      const res = await fetch("/api/admin/login", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ username: form.get("username"), password: form.get("password") })
      });
      if (res.ok) {
        window.location = "/admin/dashboard";
      } else {
        document.getElementById("error").textContent = "Invalid credentials";
      }
    });
  </script>
</body>
</html>"#;

#[tracing::instrument("Redirecting to dashboard")]
pub async fn admin_root() -> HttpResponse{
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, DASHBOARD_PAGE))
        .finish()
}

#[tracing::instrument("Serving admin login page")]
pub async fn login_page() -> HttpResponse{
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(LOGIN_FORM)
}

#[derive(Deserialize, Debug)]
pub struct DashboardQuery{
    pub filter: Option<String>
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView{
    pub counts: StatusCounts,
    pub filter: String,
    pub reservations: Vec<Reservation>,
    pub refresh_interval_secs: u64
}

/// Counts cover every reservation; the list is narrowed by `?filter=`
/// (ALL, PENDING, CONFIRMED or REJECTED).
#[tracing::instrument(
    "Building admin dashboard",
    skip(pool, refresh)
)]
pub async fn dashboard(
    pool: web::Data<DbPool>,
    refresh: web::Data<RefreshInterval>,
    query: web::Query<DashboardQuery>
) -> Result<HttpResponse, actix_web::Error>{
    let filter = match query.into_inner().filter {
        Some(value) => ReservationFilter::parse(&value)
            .map_err(|e| json_error_into(StatusCode::BAD_REQUEST, e))?,
        None => ReservationFilter::default()
    };

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            json_error_into(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch reservations")
        })?;

    let reservations = get_reservations(conn)
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            json_error_into(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch reservations")
        })?;

    let view = DashboardView{
        counts: StatusCounts::tally(&reservations),
        filter: match filter {
            ReservationFilter::All => "ALL".to_string(),
            ReservationFilter::Only(status) => status.as_str().to_string()
        },
        reservations: filter.apply(&reservations),
        refresh_interval_secs: refresh.0
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"))
        .json(view))
}
