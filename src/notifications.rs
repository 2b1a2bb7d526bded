use std::{error::Error, fmt::Debug, path::PathBuf};

use thiserror::Error;

use crate::{
    domain::{EmailAddress, ReservationStatus},
    email_client::{EmailAttachment, EmailClient, EmailMessage},
    email_templates::{EmailTemplates, InlineAsset, RenderedEmail},
    models::Reservation,
    telemetry::spawn_blocking_with_tracing,
    utils::error_fmt_chain,
};

#[derive(Error)]
pub enum NotificationError{
    #[error("Failed to read static asset {0}")]
    AssetError(&'static str, #[source] std::io::Error),
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Recipient address is not valid: {0}")]
    InvalidRecipient(String),
    #[error("Failed to render email template")]
    TemplateError(#[from] tera::Error),
    #[error("Mail relay rejected the message")]
    DeliveryError(#[from] reqwest::Error)
}

impl Debug for NotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Images read from disk each time a message needs them
#[derive(Clone, Debug)]
pub struct StaticAssets{
    dir: PathBuf
}

impl StaticAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self{ dir: dir.into() }
    }

    #[tracing::instrument("Loading static asset", skip(self))]
    pub async fn load(&self, asset: InlineAsset) -> Result<EmailAttachment, NotificationError> {
        let path = self.dir.join(asset.file_name());

        let content = spawn_blocking_with_tracing(move || std::fs::read(path))
            .await?
            .map_err(|e| NotificationError::AssetError(asset.file_name(), e))?;

        Ok(EmailAttachment{
            name: asset.file_name().to_string(),
            content,
            content_type: "image/png".to_string(),
            content_id: Some(asset.content_id().to_string())
        })
    }
}

/// Renders and delivers reservation emails. Callers treat every error as
/// best effort: it is logged and the reservation write stands.
#[derive(Clone)]
pub struct Notifier{
    email_client: EmailClient,
    templates: EmailTemplates,
    assets: StaticAssets,
    base_url: String,
    restaurant_recipient: EmailAddress
}

impl Notifier {
    pub fn new(
        email_client: EmailClient,
        templates: EmailTemplates,
        assets: StaticAssets,
        base_url: String,
        restaurant_recipient: EmailAddress
    ) -> Self {
        Self{ email_client, templates, assets, base_url, restaurant_recipient }
    }

    async fn deliver(&self, recipient: &EmailAddress, rendered: RenderedEmail) -> Result<(), NotificationError> {
        let mut attachments = Vec::with_capacity(rendered.inline_assets.len());
        for asset in rendered.inline_assets.iter() {
            attachments.push(self.assets.load(*asset).await?);
        }

        let message = EmailMessage{
            subject: rendered.subject,
            html_body: rendered.html,
            text_body: rendered.text,
            attachments
        };

        self.email_client.send_email(recipient, &message).await?;
        Ok(())
    }

    #[tracing::instrument(
        "Sending reservation status email",
        skip(self, reservation, note),
        fields(reservation_id = %reservation.id)
    )]
    pub async fn status_changed(
        &self,
        reservation: &Reservation,
        status: ReservationStatus,
        note: Option<&str>
    ) -> Result<(), NotificationError> {
        let rendered = match self.templates.status_update(
            reservation,
            status,
            note,
            &self.base_url,
            self.restaurant_recipient.as_ref()
        )? {
            Some(rendered) => rendered,
            None => return Ok(())
        };

        let recipient = EmailAddress::parse(reservation.email.clone())
            .map_err(NotificationError::InvalidRecipient)?;

        self.deliver(&recipient, rendered).await
    }

    /// Alerts the restaurant and acknowledges the guest. Both sends are
    /// attempted; the first failure is returned.
    #[tracing::instrument(
        "Sending new reservation emails",
        skip(self, reservation),
        fields(reservation_id = %reservation.id)
    )]
    pub async fn reservation_received(&self, reservation: &Reservation) -> Result<(), NotificationError> {
        let alert = match self.templates.restaurant_alert(reservation) {
            Ok(rendered) => self.deliver(&self.restaurant_recipient, rendered).await,
            Err(e) => Err(e.into())
        };

        let acknowledgement = match EmailAddress::parse(reservation.email.clone()) {
            Ok(recipient) => match self.templates.request_received(reservation, self.restaurant_recipient.as_ref()) {
                Ok(rendered) => self.deliver(&recipient, rendered).await,
                Err(e) => Err(e.into())
            },
            Err(e) => Err(NotificationError::InvalidRecipient(e))
        };

        alert.and(acknowledgement)
    }
}
