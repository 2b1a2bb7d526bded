//! Rendering of every transactional email the site sends. Bodies live in
//! `templates/email` as tera templates; the `.html` ones are autoescaped.
//! `EmailTemplates` only turns a reservation into subject, html and text
//! plus the inline images the html refers to. Loading those images and
//! delivering the message is `notifications`' job.

use chrono::{NaiveDate, NaiveTime};
use tera::{Context, Tera};

use crate::{domain::ReservationStatus, models::Reservation};

pub const RESTAURANT_NAME: &str = "Salud Restaurant";
pub const RESTAURANT_ADDRESS: &str = "G962+F6R, Lake Range, Kalighat, Kolkata, West Bengal 700045";
pub const RESTAURANT_PHONE: &str = "+91 9831175550";

/// Static images embedded in the html through `cid:` references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineAsset{
    Logo,
    PaymentQr
}

impl InlineAsset {
    pub fn file_name(&self) -> &'static str {
        match self {
            InlineAsset::Logo => "logo.png",
            InlineAsset::PaymentQr => "payment-qr.png"
        }
    }

    pub fn content_id(&self) -> &'static str {
        match self {
            InlineAsset::Logo => "logo",
            InlineAsset::PaymentQr => "qrcode"
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedEmail{
    pub subject: String,
    pub html: String,
    pub text: String,
    pub inline_assets: Vec<InlineAsset>
}

// Friday, January 10, 2025
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

// 19:00 -> 7:00 PM, anything unparsable is shown as given
pub fn format_time(time: &str) -> String {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|_| time.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone, Debug)]
pub struct EmailTemplates{
    tera: Tera
}

impl EmailTemplates {
    /// Parses every template under `templates/` once.
    pub fn new() -> Result<Self, tera::Error> {
        let tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))?;
        Ok(Self{ tera })
    }

    // Fields shared by every template
    fn reservation_context(reservation: &Reservation, contact_email: &str) -> Context {
        let mut ctx = Context::new();
        ctx.insert("logo_cid", InlineAsset::Logo.content_id());
        ctx.insert("qr_cid", InlineAsset::PaymentQr.content_id());
        ctx.insert("restaurant_name", RESTAURANT_NAME);
        ctx.insert("restaurant_address", RESTAURANT_ADDRESS);
        ctx.insert("restaurant_phone", RESTAURANT_PHONE);
        ctx.insert("contact_email", contact_email);
        ctx.insert("name", &reservation.name);
        ctx.insert("email", &reservation.email);
        ctx.insert("phone", &reservation.phone);
        ctx.insert("date", &format_date(reservation.date));
        ctx.insert("time", &format_time(&reservation.time));
        ctx.insert("guests", &reservation.guests);
        ctx.insert("special_requests", &non_blank(reservation.special_requests.as_deref()));
        ctx
    }

    fn render_pair(&self, name: &str, ctx: &Context) -> Result<(String, String), tera::Error> {
        let html = self.tera.render(&format!("email/{}.html", name), ctx)?;
        let text = self.tera.render(&format!("email/{}.txt", name), ctx)?;
        Ok((html, text))
    }

    /// Email sent to the guest once an admin has confirmed or rejected their
    /// request. Returns `None` for PENDING, which has no customer-facing message.
    pub fn status_update(
        &self,
        reservation: &Reservation,
        status: ReservationStatus,
        note: Option<&str>,
        base_url: &str,
        contact_email: &str
    ) -> Result<Option<RenderedEmail>, tera::Error> {
        let base_url = base_url.trim_end_matches('/');
        let mut ctx = Self::reservation_context(reservation, contact_email);
        ctx.insert("note", &non_blank(note));

        let (template, subject, link, inline_assets) = match status {
            ReservationStatus::Pending => return Ok(None),
            ReservationStatus::Confirmed => (
                "confirmed",
                "¡Your Reservation at Salud is Confirmed!",
                base_url.to_string(),
                vec![InlineAsset::Logo, InlineAsset::PaymentQr]
            ),
            ReservationStatus::Rejected => (
                "rejected",
                "Update on Your Salud Reservation",
                format!("{}/#reservation", base_url),
                vec![InlineAsset::Logo]
            )
        };
        ctx.insert("link", &link);

        let (html, text) = self.render_pair(template, &ctx)?;

        Ok(Some(RenderedEmail{
            subject: subject.to_string(),
            html,
            text,
            inline_assets
        }))
    }

    // Acknowledgement sent to the guest right after they submit the form
    pub fn request_received(&self, reservation: &Reservation, contact_email: &str) -> Result<RenderedEmail, tera::Error> {
        let ctx = Self::reservation_context(reservation, contact_email);
        let (html, text) = self.render_pair("received", &ctx)?;

        Ok(RenderedEmail{
            subject: "We've Received Your Reservation Request - Salud Restaurant".to_string(),
            html,
            text,
            inline_assets: vec![InlineAsset::Logo]
        })
    }

    // Internal alert for the restaurant, plain details only
    pub fn restaurant_alert(&self, reservation: &Reservation) -> Result<RenderedEmail, tera::Error> {
        let mut ctx = Self::reservation_context(reservation, "");
        ctx.insert("received_at", &reservation.created_at.to_rfc3339());
        let (html, text) = self.render_pair("restaurant_alert", &ctx)?;

        Ok(RenderedEmail{
            subject: format!("New Reservation Request from {}", reservation.name),
            html,
            text,
            inline_assets: Vec::new()
        })
    }
}
