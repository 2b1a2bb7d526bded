use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::EmailAddress;

// File sent along with a message. With a content id it can be
// referenced from the html body as `cid:<content_id>`
#[derive(Debug, Clone)]
pub struct EmailAttachment{
    pub name: String,
    pub content: Vec<u8>,
    pub content_type: String,
    pub content_id: Option<String>
}

#[derive(Debug, Clone, Default)]
pub struct EmailMessage{
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub attachments: Vec<EmailAttachment>
}

// Client to interact with email service
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: EmailAddress,
    authorization_token: SecretString,
}

impl EmailClient {
    #[tracing::instrument(
        "Sending email",
        skip(self, message),
        fields(subject = %message.subject, attachments = message.attachments.len())
    )]
    pub async fn send_email(
        &self,
        recipient: &EmailAddress,
        message: &EmailMessage,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.base_url);
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            subject: &message.subject,
            html_body: &message.html_body,
            text_body: &message.text_body,
            attachments: message.attachments
                .iter()
                .map(AttachmentBody::from)
                .collect(),
        };
        self.http_client
            .post(url)
            .json(&request_body)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    // create new email client
    pub fn new(
        base_url: String,
        sender: EmailAddress,
        authorization_token: SecretString,
        timeout: u64,
    ) -> Result<EmailClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailRequest<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub html_body: &'a str,
    pub text_body: &'a str,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentBody>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct AttachmentBody {
    pub name: String,
    // base64 encoded
    pub content: String,
    pub content_type: String,
    #[serde(rename = "ContentID", default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl From<&EmailAttachment> for AttachmentBody {
    fn from(attachment: &EmailAttachment) -> Self {
        AttachmentBody {
            name: attachment.name.clone(),
            content: STANDARD.encode(&attachment.content),
            content_type: attachment.content_type.clone(),
            content_id: attachment.content_id.as_ref().map(|id| format!("cid:{}", id)),
        }
    }
}
