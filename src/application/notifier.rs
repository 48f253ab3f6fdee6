use crate::domain::customer::CustomerData;
use crate::domain::ports::{Notifier, NotifierBox, TransportHandle};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use tracing::{info, warn};

pub const CONFIRMATION_SUBJECT: &str = "Payment Confirmation";
pub const CONFIRMATION_BODY: &str = "Thank you for your payment.";
pub const DEFAULT_SENDER: &str = "no-reply@example.com";

/// Email confirmation. Requires an email address on the customer.
pub struct EmailNotifier {
    transport: TransportHandle,
    sender: String,
}

impl EmailNotifier {
    pub fn new(transport: TransportHandle) -> Self {
        Self {
            transport,
            sender: DEFAULT_SENDER.to_string(),
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn channel(&self) -> &'static str {
        "email"
    }

    async fn send_confirmation(&self, customer: &CustomerData) -> Result<()> {
        let email = customer.contact_info.email().ok_or_else(|| {
            PaymentError::MissingContactChannel(format!(
                "customer {} has no email address",
                customer.name
            ))
        })?;
        let content = format!(
            "From: {}\nSubject: {CONFIRMATION_SUBJECT}\n\n{CONFIRMATION_BODY}",
            self.sender
        );
        self.transport.send(email, &content).await?;
        info!(to = email, "confirmation email sent");
        Ok(())
    }
}

/// SMS confirmation through a named gateway. A missing phone number is
/// logged and skipped.
pub struct SmsNotifier {
    transport: TransportHandle,
    gateway: String,
}

impl SmsNotifier {
    pub fn new(transport: TransportHandle, gateway: impl Into<String>) -> Self {
        Self {
            transport,
            gateway: gateway.into(),
        }
    }
}

#[async_trait]
impl Notifier for SmsNotifier {
    fn channel(&self) -> &'static str {
        "sms"
    }

    async fn send_confirmation(&self, customer: &CustomerData) -> Result<()> {
        let Some(phone) = customer.contact_info.phone() else {
            warn!(customer = %customer.name, "no phone number provided");
            return Ok(());
        };
        self.transport.send(phone, CONFIRMATION_BODY).await?;
        info!(to = phone, gateway = %self.gateway, "confirmation sms sent");
        Ok(())
    }
}

/// Transports available to the notifier selection.
#[derive(Clone)]
pub struct NotificationChannels {
    pub email: TransportHandle,
    pub sms: TransportHandle,
    pub sms_gateway: String,
}

/// Picks the confirmation channel for a customer: email first, then phone.
pub fn select_notifier(
    customer: &CustomerData,
    channels: &NotificationChannels,
) -> Result<NotifierBox> {
    if customer.contact_info.email().is_some() {
        return Ok(Box::new(EmailNotifier::new(channels.email.clone())));
    }
    if customer.contact_info.phone().is_some() {
        return Ok(Box::new(SmsNotifier::new(
            channels.sms.clone(),
            channels.sms_gateway.clone(),
        )));
    }
    Err(PaymentError::MissingContactChannel(format!(
        "customer {} has neither email nor phone",
        customer.name
    )))
}
