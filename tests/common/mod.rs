use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use byteslide_contact::mailer::{MailError, MailTransport, OutboundEmail};
use byteslide_contact::routes::AppState;
use byteslide_contact::server::create_router;

/// Mail transport that records every send instead of talking to an SMTP
/// server. Individual sends can be made to fail by call index.
#[derive(Clone, Default)]
pub struct FakeTransport {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    calls: Arc<Mutex<usize>>,
    fail_on: Vec<usize>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose Nth calls (zero-based) fail with a transport error.
    pub fn failing_on(indexes: &[usize]) -> Self {
        Self {
            fail_on: indexes.to_vec(),
            ..Self::default()
        }
    }

    /// Emails that were successfully "delivered", in send order.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Total send attempts, including failed ones.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl MailTransport for FakeTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            let index = *calls;
            *calls += 1;
            index
        };

        if self.fail_on.contains(&index) {
            return Err(transport_error());
        }

        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

fn transport_error() -> MailError {
    let err = "no-at-sign"
        .parse::<lettre::Address>()
        .expect_err("address without @ must not parse");
    MailError::Address(err)
}

/// Build the full application router around a fake transport.
pub fn app(transport: FakeTransport) -> Router {
    create_router(AppState {
        mailer: Arc::new(transport),
    })
}
