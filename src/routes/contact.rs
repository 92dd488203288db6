use std::sync::LazyLock;

use askama::Template;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use chrono::Utc;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::AppError;
use crate::mailer::OutboundEmail;
use crate::routes::AppState;

/// Where operator notifications land. Fixed, never derived from input.
const NOTIFICATION_RECIPIENT: &str = "inbox@byteslide.dev";

/// Shown in the notification when the submitter left the company field blank.
const COMPANY_NOT_PROVIDED: &str = "Not provided";

/// Local part, one `@`, at least one dot in the domain. Intentionally loose;
/// real verification happens when the auto-reply bounces.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactPageTemplate;

/// GET / - Contact page with the submission form
pub async fn get_contact() -> Result<impl IntoResponse, AppError> {
    Ok(Html(ContactPageTemplate.render()?))
}

/// Raw request body. Every field is optional at the wire level so that an
/// absent field and an empty field produce the same validation failure.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A validated submission. Lives for the duration of one request; rendered
/// into the two outbound emails and then dropped.
#[derive(Debug)]
struct ContactSubmission {
    name: String,
    email: String,
    company: Option<String>,
    message: String,
}

impl ContactForm {
    fn validate(self) -> Result<ContactSubmission, AppError> {
        let name = self.name.unwrap_or_default();
        let email = self.email.unwrap_or_default();
        let message = self.message.unwrap_or_default();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(AppError::MissingFields);
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(AppError::InvalidEmail);
        }

        Ok(ContactSubmission {
            name,
            email,
            company: self.company,
            message,
        })
    }
}

impl ContactSubmission {
    fn company_display(&self) -> &str {
        match self.company.as_deref() {
            Some(company) if !company.is_empty() => company,
            _ => COMPANY_NOT_PROVIDED,
        }
    }
}

#[derive(Template)]
#[template(path = "emails/contact-notification.html")]
struct NotificationHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    company: &'a str,
    submitted_at: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/contact-notification.txt")]
struct NotificationTextTemplate<'a> {
    name: &'a str,
    email: &'a str,
    company: &'a str,
    submitted_at: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/auto-reply.html")]
struct AutoReplyHtmlTemplate<'a> {
    name: &'a str,
}

#[derive(Template)]
#[template(path = "emails/auto-reply.txt")]
struct AutoReplyTextTemplate<'a> {
    name: &'a str,
}

fn notification_email(submission: &ContactSubmission) -> Result<OutboundEmail, AppError> {
    let submitted_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let company = submission.company_display();

    let html_body = NotificationHtmlTemplate {
        name: &submission.name,
        email: &submission.email,
        company,
        submitted_at: &submitted_at,
        message: &submission.message,
    }
    .render()?;

    let text_body = NotificationTextTemplate {
        name: &submission.name,
        email: &submission.email,
        company,
        submitted_at: &submitted_at,
        message: &submission.message,
    }
    .render()?;

    Ok(OutboundEmail {
        to: NOTIFICATION_RECIPIENT.to_string(),
        subject: format!("New ByteSlide Contact: {}", submission.name),
        text_body,
        html_body,
    })
}

fn auto_reply_email(submission: &ContactSubmission) -> Result<OutboundEmail, AppError> {
    let html_body = AutoReplyHtmlTemplate {
        name: &submission.name,
    }
    .render()?;

    let text_body = AutoReplyTextTemplate {
        name: &submission.name,
    }
    .render()?;

    Ok(OutboundEmail {
        to: submission.email.clone(),
        subject: "Thank you for contacting ByteSlide!".to_string(),
        text_body,
        html_body,
    })
}

/// POST /api/contact - Validate a submission and relay it by email
///
/// The operator notification is load-bearing: if it cannot be sent the whole
/// request fails with 500 and the auto-reply is never attempted. The
/// auto-reply is a courtesy; its failure is logged and swallowed.
pub async fn post_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<impl IntoResponse, AppError> {
    let submission = form.validate()?;

    let notification = notification_email(&submission)?;
    state.mailer.send(&notification).await?;
    info!(
        name = %submission.name,
        email = %submission.email,
        "Contact notification delivered"
    );

    let reply = auto_reply_email(&submission)?;
    if let Err(e) = state.mailer.send(&reply).await {
        warn!(
            error = %e,
            to = %submission.email,
            "Auto-reply failed to send; the notification was already delivered"
        );
    }

    Ok(Json(json!({
        "success": true,
        "message": "Contact form submitted successfully"
    })))
}

/// OPTIONS /api/contact - CORS preflight
pub async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}

/// Fallback for every other method on the contact endpoint
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}
