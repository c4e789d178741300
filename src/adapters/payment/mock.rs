//! Mock payment gateway for testing.
//!
//! Records every invoice it is asked to deliver instead of sending it to
//! a chat. The production transport lives with the bot wiring outside
//! this crate.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{InvoiceRequest, PaymentGateway, PaymentGatewayError};

/// Recording implementation of [`PaymentGateway`].
#[derive(Debug, Clone, Default)]
pub struct MockPaymentGateway {
    sent: Arc<Mutex<Vec<InvoiceRequest>>>,
    fail_delivery: Arc<Mutex<bool>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent delivery fail.
    pub fn set_fail_delivery(&self, fail: bool) {
        *self.fail_delivery.lock().unwrap() = fail;
    }

    /// All invoices delivered so far.
    pub fn sent(&self) -> Vec<InvoiceRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recent invoice, if any.
    pub fn last_invoice(&self) -> Option<InvoiceRequest> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn send_invoice(&self, invoice: InvoiceRequest) -> Result<(), PaymentGatewayError> {
        if *self.fail_delivery.lock().unwrap() {
            return Err(PaymentGatewayError::DeliveryFailed(
                "simulated delivery failure".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(invoice);
        Ok(())
    }
}
