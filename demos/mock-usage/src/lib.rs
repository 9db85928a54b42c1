//! A checkout flow whose collaborators are mocked in its tests.

use thiserror::Error;
use tracing::info;

pub trait PaymentGateway {
    fn currency(&self) -> String;
    /// Authorization code, or `None` when the payment is declined.
    fn authorize(&self, customer: &str, amount_cents: u64) -> Option<String>;
    fn capture(&self, authorization: &str);
    fn void(&self, authorization: &str, reason: Option<&str>);
}

pub trait Receipts {
    fn send(&self, customer: &str, lines: &[String]);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Order total is zero")]
    EmptyOrder,
    #[error("Payment for {customer} was declined")]
    Declined { customer: String },
}

pub struct Checkout<'a, G, R> {
    gateway: &'a G,
    receipts: &'a R,
}

impl<'a, G: PaymentGateway, R: Receipts> Checkout<'a, G, R> {
    pub fn new(gateway: &'a G, receipts: &'a R) -> Self {
        Self { gateway, receipts }
    }

    pub fn pay(&self, customer: &str, amount_cents: u64) -> Result<String, CheckoutError> {
        if amount_cents == 0 {
            return Err(CheckoutError::EmptyOrder);
        }

        let authorization = self
            .gateway
            .authorize(customer, amount_cents)
            .ok_or_else(|| CheckoutError::Declined {
                customer: customer.to_string(),
            })?;
        self.gateway.capture(&authorization);

        let total = format!(
            "{}.{:02} {}",
            amount_cents / 100,
            amount_cents % 100,
            self.gateway.currency()
        );
        self.receipts
            .send(customer, &[total, format!("auth {authorization}")]);
        info!(customer, amount_cents, "Payment captured");
        Ok(authorization)
    }

    pub fn refund(&self, authorization: &str, reason: Option<&str>) {
        self.gateway.void(authorization, reason);
    }
}
