mod common;

use common::{
    CallLog, CountingProcessor, FailingAuditLog, FailingListener, RecordingAuditLog,
    RecordingNotifier, StubGateway, jon_doe, recording_service,
};
use payflow::application::builder::PaymentServiceBuilder;
use payflow::application::listeners::ListenerRegistry;
use payflow::application::processors::gateway::GatewayProcessor;
use payflow::application::service::{FailedResponsePolicy, PaymentOperations};
use payflow::domain::customer::{ContactInfo, CustomerData};
use payflow::domain::payment::{PaymentData, PaymentEvent, PaymentResponse};
use payflow::domain::ports::Listener;
use payflow::error::PaymentError;
use std::sync::Arc;

fn approving(log: &CallLog) -> Arc<CountingProcessor> {
    Arc::new(CountingProcessor::new(
        log,
        PaymentResponse::success(1500, "txn-1", "ok"),
    ))
}

#[tokio::test]
async fn test_processor_not_called_when_customer_invalid() {
    let log = CallLog::default();
    let service = recording_service(&log, approving(&log), &["a"]);
    let nameless = CustomerData::new("", ContactInfo::with_email("a@b.co"));
    let unreachable = CustomerData::new("Jon Doe", ContactInfo::default());
    let payment = PaymentData::new(1500, "tok_visa");

    for customer in [nameless, unreachable] {
        let err = service
            .process_transaction(&customer, &payment)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::ValidationFailed { .. }));
    }

    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn test_processor_not_called_when_payment_invalid() {
    let log = CallLog::default();
    let service = recording_service(&log, approving(&log), &["a"]);

    for payment in [
        PaymentData::new(0, "tok_visa"),
        PaymentData::new(-10, "tok_visa"),
        PaymentData::new(1500, ""),
    ] {
        let err = service
            .process_transaction(&jon_doe(), &payment)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::ValidationFailed { .. }));
    }

    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn test_valid_request_runs_steps_in_order() {
    let log = CallLog::default();
    let service = recording_service(&log, approving(&log), &["a", "b", "c"]);

    service
        .process_transaction(&jon_doe(), &PaymentData::new(1500, "tok_visa"))
        .await
        .unwrap();

    let entries = log.entries();
    assert_eq!(log.count("processor"), 1);
    assert_eq!(log.count("listener:"), 3);
    assert_eq!(log.count("notifier:"), 1);
    assert_eq!(log.count("audit:"), 1);
    assert_eq!(
        &entries[..5],
        &[
            "processor".to_string(),
            "listener:a:txn-1".to_string(),
            "listener:b:txn-1".to_string(),
            "listener:c:txn-1".to_string(),
            "notifier:email:Jon Doe".to_string(),
        ]
    );
    assert!(entries[5].starts_with("audit:Jon Doe paid 15.00 USD"));
    assert_eq!(entries.len(), 6);
}

#[tokio::test]
async fn test_no_listeners_still_notifies_and_logs() {
    let log = CallLog::default();
    let service = recording_service(&log, approving(&log), &[]);

    service
        .process_transaction(&jon_doe(), &PaymentData::new(100, "tok_visa"))
        .await
        .unwrap();

    assert_eq!(log.count("processor"), 1);
    assert_eq!(log.count("listener:"), 0);
    assert_eq!(log.count("notifier:"), 1);
    assert_eq!(log.count("audit:"), 1);
}

#[tokio::test]
async fn test_refund_without_capability_writes_nothing() {
    let log = CallLog::default();
    let service = recording_service(&log, approving(&log), &["a"]);

    let err = service.process_refund("txn-1").await.unwrap_err();

    assert!(matches!(err, PaymentError::UnsupportedOperation(_)));
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn test_refund_is_logged_once() {
    let log = CallLog::default();
    let processor = Arc::new(
        CountingProcessor::new(&log, PaymentResponse::success(1500, "txn-1", "ok")).with_refunds(),
    );
    let service = recording_service(&log, processor, &["a"]);

    let response = service.process_refund("txn-1").await.unwrap();

    assert_eq!(response.transaction_id.as_deref(), Some("txn-1"));
    assert_eq!(
        log.entries(),
        vec![
            "refund:txn-1".to_string(),
            "audit:refund processed for transaction txn-1 | status=success | message=Refund success"
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn test_failed_response_skips_listeners_and_confirmation() {
    let log = CallLog::default();
    let processor = Arc::new(CountingProcessor::new(
        &log,
        PaymentResponse::failed(1500, "card declined"),
    ));
    let service = recording_service(&log, processor, &["a"]);

    let response = service
        .process_transaction(&jon_doe(), &PaymentData::new(1500, "tok_visa"))
        .await
        .unwrap();

    assert!(response.is_failed());
    assert_eq!(log.count("listener:"), 0);
    assert_eq!(log.count("notifier:"), 0);
    assert_eq!(log.count("audit:"), 1);
}

#[tokio::test]
async fn test_failed_response_notifies_when_configured() {
    let log = CallLog::default();
    let processor = Arc::new(CountingProcessor::new(
        &log,
        PaymentResponse::failed(1500, "card declined"),
    ));
    let service = recording_service(&log, processor, &["a"])
        .with_failure_policy(FailedResponsePolicy::NotifyAnyway);

    service
        .process_transaction(&jon_doe(), &PaymentData::new(1500, "tok_visa"))
        .await
        .unwrap();

    assert_eq!(
        &log.entries()[..3],
        &[
            "processor".to_string(),
            "listener:a:-".to_string(),
            "notifier:email:Jon Doe".to_string(),
        ]
    );
    assert_eq!(log.count("audit:"), 1);
}

#[tokio::test]
async fn test_listener_error_aborts_before_confirmation() {
    let log = CallLog::default();
    let failing: Arc<dyn Listener<PaymentEvent>> = Arc::new(FailingListener);
    let service = PaymentServiceBuilder::new()
        .with_processor(approving(&log))
        .with_default_validations()
        .with_notifier(Box::new(RecordingNotifier {
            log: log.clone(),
            channel: "email",
        }))
        .with_logger(Arc::new(RecordingAuditLog { log: log.clone() }))
        .with_listeners(Arc::new(ListenerRegistry::with_listeners(vec![failing])))
        .build()
        .unwrap();

    let err = service
        .process_transaction(&jon_doe(), &PaymentData::new(1500, "tok_visa"))
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentError::Listener(_)));
    assert_eq!(log.entries(), vec!["processor".to_string()]);
}

#[tokio::test]
async fn test_audit_failure_still_returns_response() {
    let log = CallLog::default();
    let approved = PaymentResponse::success(1500, "txn-1", "ok");
    let processor = Arc::new(CountingProcessor::new(&log, approved.clone()).with_refunds());
    let service = PaymentServiceBuilder::new()
        .with_processor(processor)
        .with_default_validations()
        .with_notifier(Box::new(RecordingNotifier {
            log: log.clone(),
            channel: "email",
        }))
        .with_logger(Arc::new(FailingAuditLog))
        .with_listeners(Arc::new(ListenerRegistry::new()))
        .build()
        .unwrap();

    let charged = service
        .process_transaction(&jon_doe(), &PaymentData::new(1500, "tok_visa"))
        .await
        .unwrap();
    assert_eq!(charged, approved);
    assert_eq!(log.count("processor"), 1);
    assert_eq!(log.count("notifier:email:Jon Doe"), 1);

    let refunded = service.process_refund("txn-1").await.unwrap();
    assert_eq!(refunded.transaction_id.as_deref(), Some("txn-1"));
    assert_eq!(log.count("refund:txn-1"), 1);
}

#[tokio::test]
async fn test_listeners_added_after_build_are_notified() {
    let log = CallLog::default();
    let service = recording_service(&log, approving(&log), &[]);
    let late: Arc<dyn Listener<PaymentEvent>> = Arc::new(common::RecordingListener {
        log: log.clone(),
        tag: "late",
    });
    let id = service.listeners().subscribe(late).await;

    service
        .process_transaction(&jon_doe(), &PaymentData::new(100, "tok_visa"))
        .await
        .unwrap();
    assert_eq!(log.count("listener:late"), 1);

    assert!(service.listeners().unsubscribe(id).await);
    service
        .process_transaction(&jon_doe(), &PaymentData::new(100, "tok_visa"))
        .await
        .unwrap();
    assert_eq!(log.count("listener:late"), 1);
}

#[tokio::test]
async fn test_jon_doe_gateway_charge() {
    let log = CallLog::default();
    let gateway = Arc::new(StubGateway::succeeding(&log));
    let processor = Arc::new(GatewayProcessor::new(gateway, "price_default"));
    let service = recording_service(&log, processor, &["accounting"]);

    let response = service
        .process_transaction(&jon_doe(), &PaymentData::new(1500, "tok_mastercard"))
        .await
        .unwrap();

    assert_eq!(response.status, "succeeded");
    assert_eq!(response.amount, 1500);
    assert_eq!(response.transaction_id.as_deref(), Some("ch_1"));
    assert_eq!(
        log.entries(),
        vec![
            "gateway:charge:1500:usd:tok_mastercard".to_string(),
            "listener:accounting:ch_1".to_string(),
            "notifier:email:Jon Doe".to_string(),
            "audit:Jon Doe paid 15.00 USD | status=succeeded | transaction_id=ch_1 | message=Payment successful"
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn test_zero_amount_never_reaches_gateway() {
    let log = CallLog::default();
    let gateway = Arc::new(StubGateway::succeeding(&log));
    let processor = Arc::new(GatewayProcessor::new(gateway, "price_default"));
    let service = recording_service(&log, processor, &["accounting"]);

    let err = service
        .process_transaction(&jon_doe(), &PaymentData::new(0, "tok_mastercard"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Validation failed: amount must be positive");
    assert!(log.entries().is_empty());
}
