pub mod contact;
pub mod health;

use std::sync::Arc;

use crate::mailer::MailTransport;

/// Shared application state injected into handlers.
///
/// The mail transport is behind a trait object so tests can swap in a fake
/// transport without touching the handler.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn MailTransport>,
}
