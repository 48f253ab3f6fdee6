#![allow(dead_code)]

use async_trait::async_trait;
use payflow::application::audit::TransactionLogger;
use payflow::application::listeners::ListenerRegistry;
use payflow::application::service::PaymentService;
use payflow::application::validation::ValidationChain;
use payflow::domain::customer::{ContactInfo, CustomerData};
use payflow::domain::gateway::{
    Charge, ChargeRequest, GatewayCustomer, GatewayError, GatewayResult, PaymentMethod,
    Subscription,
};
use payflow::domain::payment::{PaymentData, PaymentEvent, PaymentResponse};
use payflow::domain::ports::{
    AuditLog, GatewayClient, Listener, Notifier, PaymentProcessor, RefundProcessor,
};
use payflow::error::{PaymentError, Result};
use std::sync::{Arc, Mutex};

/// Ordered record of every collaborator call made during a test.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

/// Processor that records each call and returns a fixed response.
pub struct CountingProcessor {
    pub log: CallLog,
    pub response: PaymentResponse,
    pub refunds: bool,
}

impl CountingProcessor {
    pub fn new(log: &CallLog, response: PaymentResponse) -> Self {
        Self {
            log: log.clone(),
            response,
            refunds: false,
        }
    }

    pub fn with_refunds(mut self) -> Self {
        self.refunds = true;
        self
    }
}

#[async_trait]
impl PaymentProcessor for CountingProcessor {
    fn name(&self) -> &str {
        "counting"
    }

    async fn process_transaction(
        &self,
        _customer: &CustomerData,
        _payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        self.log.record("processor");
        Ok(self.response.clone())
    }

    fn as_refund(&self) -> Option<&dyn RefundProcessor> {
        self.refunds.then_some(self as &dyn RefundProcessor)
    }
}

#[async_trait]
impl RefundProcessor for CountingProcessor {
    async fn refund_payment(&self, transaction_id: &str) -> Result<PaymentResponse> {
        self.log.record(format!("refund:{transaction_id}"));
        Ok(PaymentResponse::success(0, transaction_id, "Refund success"))
    }
}

pub struct RecordingNotifier {
    pub log: CallLog,
    pub channel: &'static str,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> &'static str {
        self.channel
    }

    async fn send_confirmation(&self, customer: &CustomerData) -> Result<()> {
        self.log
            .record(format!("notifier:{}:{}", self.channel, customer.name));
        Ok(())
    }
}

pub struct RecordingAuditLog {
    pub log: CallLog,
}

#[async_trait]
impl AuditLog for RecordingAuditLog {
    async fn append(&self, line: &str) -> Result<()> {
        self.log.record(format!("audit:{line}"));
        Ok(())
    }
}

/// Audit sink whose every append fails, as a full disk would.
pub struct FailingAuditLog;

#[async_trait]
impl AuditLog for FailingAuditLog {
    async fn append(&self, _line: &str) -> Result<()> {
        Err(PaymentError::IoError(std::io::Error::other("disk full")))
    }
}

pub struct RecordingListener {
    pub log: CallLog,
    pub tag: &'static str,
}

#[async_trait]
impl Listener<PaymentEvent> for RecordingListener {
    async fn notify(&self, event: &PaymentEvent) -> Result<()> {
        self.log.record(format!(
            "listener:{}:{}",
            self.tag,
            event.transaction_id.as_deref().unwrap_or("-")
        ));
        Ok(())
    }
}

pub struct FailingListener;

#[async_trait]
impl Listener<PaymentEvent> for FailingListener {
    async fn notify(&self, _event: &PaymentEvent) -> Result<()> {
        Err(PaymentError::Listener("subscriber unavailable".into()))
    }
}

/// Gateway client that answers every charge with the same charge record.
pub struct StubGateway {
    pub log: CallLog,
    pub charge: Charge,
}

impl StubGateway {
    pub fn succeeding(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            charge: Charge {
                id: "ch_1".to_string(),
                status: "succeeded".to_string(),
                amount: 1500,
            },
        }
    }
}

#[async_trait]
impl GatewayClient for StubGateway {
    async fn charge(&self, request: ChargeRequest) -> GatewayResult<Charge> {
        self.log.record(format!(
            "gateway:charge:{}:{}:{}",
            request.amount, request.currency, request.source
        ));
        Ok(self.charge.clone())
    }

    async fn refund(&self, charge_id: &str) -> GatewayResult<Charge> {
        Err(GatewayError::NotFound(charge_id.to_string()))
    }

    async fn create_customer(&self, _name: &str, _email: &str) -> GatewayResult<GatewayCustomer> {
        Err(GatewayError::Unavailable("not stubbed".into()))
    }

    async fn retrieve_customer(&self, customer_id: &str) -> GatewayResult<GatewayCustomer> {
        Err(GatewayError::NotFound(customer_id.to_string()))
    }

    async fn retrieve_payment_method(&self, source: &str) -> GatewayResult<PaymentMethod> {
        Err(GatewayError::NotFound(source.to_string()))
    }

    async fn attach_payment_method(
        &self,
        _payment_method_id: &str,
        _customer_id: &str,
    ) -> GatewayResult<()> {
        Err(GatewayError::Unavailable("not stubbed".into()))
    }

    async fn set_default_payment_method(
        &self,
        _customer_id: &str,
        _payment_method_id: &str,
    ) -> GatewayResult<()> {
        Err(GatewayError::Unavailable("not stubbed".into()))
    }

    async fn create_subscription(
        &self,
        _customer_id: &str,
        _price_id: &str,
    ) -> GatewayResult<Subscription> {
        Err(GatewayError::Unavailable("not stubbed".into()))
    }
}

pub fn jon_doe() -> CustomerData {
    CustomerData::new("Jon Doe", ContactInfo::with_email("jon.doe@mail.co"))
}

/// Service wired entirely to recording collaborators sharing `log`.
pub fn recording_service(
    log: &CallLog,
    processor: Arc<dyn PaymentProcessor>,
    listener_tags: &[&'static str],
) -> PaymentService {
    let listeners: Vec<Arc<dyn Listener<PaymentEvent>>> = listener_tags
        .iter()
        .map(|&tag| {
            Arc::new(RecordingListener {
                log: log.clone(),
                tag,
            }) as Arc<dyn Listener<PaymentEvent>>
        })
        .collect();

    PaymentService::new(
        processor,
        ValidationChain::standard(),
        Box::new(RecordingNotifier {
            log: log.clone(),
            channel: "email",
        }),
        TransactionLogger::new(Arc::new(RecordingAuditLog { log: log.clone() })),
        Arc::new(ListenerRegistry::with_listeners(listeners)),
    )
}
