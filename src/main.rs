use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use payflow::application::builder::PaymentServiceBuilder;
use payflow::application::listeners::ListenerRegistry;
use payflow::application::logging::LoggingPaymentService;
use payflow::application::notifier::{EmailNotifier, NotificationChannels};
use payflow::application::processors::gateway::GatewayProcessor;
use payflow::application::processors::local::LocalProcessor;
use payflow::application::processors::offline::OfflineProcessor;
use payflow::application::selector::Backends;
use payflow::application::service::{FailedResponsePolicy, PaymentOperations, PaymentService};
use payflow::config::Settings;
use payflow::domain::customer::{ContactInfo, CustomerData};
use payflow::domain::payment::{PaymentData, PaymentEvent, PaymentType};
use payflow::domain::ports::{AuditLogHandle, Listener};
use payflow::infrastructure::audit_log::FileAuditLog;
use payflow::infrastructure::listeners::AccountabilityListener;
use payflow::infrastructure::sandbox::SandboxGateway;
use payflow::infrastructure::transport::ConsoleTransport;
use payflow::interfaces::csv::request_reader::PaymentRequestReader;
use payflow::interfaces::json::ResponseWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about = "Payment orchestration CLI", long_about = None)]
struct Cli {
    /// Audit log file. Overrides AUDIT_LOG_PATH.
    #[arg(long, global = true)]
    audit_log: Option<PathBuf>,

    /// Notify listeners and the customer even when the payment failed.
    #[arg(long, global = true)]
    notify_on_failure: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CustomerArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// Existing gateway customer identifier.
    #[arg(long)]
    customer_id: Option<String>,
}

impl From<CustomerArgs> for CustomerData {
    fn from(args: CustomerArgs) -> Self {
        CustomerData {
            name: args.name,
            contact_info: ContactInfo {
                email: args.email,
                phone: args.phone,
            },
            customer_id: args.customer_id,
        }
    }
}

#[derive(Args)]
struct PaymentArgs {
    /// Amount in minor currency units.
    #[arg(long, allow_negative_numbers = true)]
    amount: i64,
    /// Funding source token.
    #[arg(long)]
    source: String,
    #[arg(long, default_value = "USD")]
    currency: String,
    /// `online` or `offline`.
    #[arg(long = "type", default_value = "online")]
    payment_type: String,
}

impl PaymentArgs {
    fn into_payment(self) -> payflow::error::Result<PaymentData> {
        Ok(PaymentData::new(self.amount, self.source)
            .with_currency(self.currency)
            .with_type(self.payment_type.parse::<PaymentType>()?))
    }
}

#[derive(Subcommand)]
enum Command {
    /// Process a single payment.
    Charge {
        #[command(flatten)]
        customer: CustomerArgs,
        #[command(flatten)]
        payment: PaymentArgs,
    },
    /// Set up a recurring payment.
    Subscribe {
        #[command(flatten)]
        customer: CustomerArgs,
        #[command(flatten)]
        payment: PaymentArgs,
    },
    /// Refund a previous transaction.
    Refund {
        #[arg(long)]
        transaction_id: String,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long = "type", default_value = "online")]
        payment_type: String,
    },
    /// Process every payment listed in a CSV file.
    Batch {
        /// Input CSV file
        input: PathBuf,
    },
}

/// Collaborators shared by every request of one invocation.
struct Wiring {
    backends: Backends,
    channels: NotificationChannels,
    audit: AuditLogHandle,
    failure_policy: FailedResponsePolicy,
}

impl Wiring {
    fn new(settings: &Settings, gateway: SandboxGateway, failure_policy: FailedResponsePolicy) -> Self {
        let primary = GatewayProcessor::from_settings(Arc::new(gateway), &settings.gateway);
        Self {
            backends: Backends {
                offline: Arc::new(OfflineProcessor::new()),
                primary: Arc::new(primary),
                local: Arc::new(LocalProcessor::new()),
            },
            channels: NotificationChannels {
                email: Arc::new(ConsoleTransport::email()),
                sms: Arc::new(ConsoleTransport::sms()),
                sms_gateway: settings.sms_gateway.clone(),
            },
            audit: Arc::new(FileAuditLog::new(&settings.audit_log_path)),
            failure_policy,
        }
    }

    fn builder(&self, payment: &PaymentData) -> PaymentServiceBuilder {
        let accountability: Arc<dyn Listener<PaymentEvent>> = Arc::new(AccountabilityListener);
        PaymentServiceBuilder::new()
            .with_logger(self.audit.clone())
            .with_processor_for(&self.backends, payment)
            .with_default_validations()
            .with_listeners(Arc::new(ListenerRegistry::with_listeners(vec![
                accountability,
            ])))
            .with_failure_policy(self.failure_policy)
    }

    fn service_for(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> payflow::error::Result<LoggingPaymentService<PaymentService>> {
        let service = self
            .builder(payment)
            .with_notifier_for(customer, &self.channels)?
            .build()?;
        Ok(LoggingPaymentService::new(service))
    }

    fn refund_service(&self, payment: &PaymentData) -> payflow::error::Result<LoggingPaymentService<PaymentService>> {
        let service = self
            .builder(payment)
            .with_notifier(Box::new(EmailNotifier::new(self.channels.email.clone())))
            .build()?;
        Ok(LoggingPaymentService::new(service))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "payflow=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env().into_diagnostic()?;
    if let Some(path) = cli.audit_log {
        settings.audit_log_path = path;
    }
    let failure_policy = if cli.notify_on_failure {
        FailedResponsePolicy::NotifyAnyway
    } else {
        FailedResponsePolicy::SkipNotifications
    };
    let gateway = SandboxGateway::new(settings.gateway.api_key.clone());

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    match cli.command {
        Command::Charge { customer, payment } => {
            let customer = CustomerData::from(customer);
            let payment = payment.into_payment().into_diagnostic()?;
            let wiring = Wiring::new(&settings, gateway, failure_policy);
            let service = wiring.service_for(&customer, &payment).into_diagnostic()?;
            let response = service
                .process_transaction(&customer, &payment)
                .await
                .into_diagnostic()?;
            writer.write_response(&response).into_diagnostic()?;
        }
        Command::Subscribe { customer, payment } => {
            let customer = CustomerData::from(customer);
            let payment = payment.into_payment().into_diagnostic()?;
            // The sandbox bills the configured plan at the requested amount.
            let gateway = gateway.with_price(settings.gateway.price_id.clone(), payment.amount);
            let wiring = Wiring::new(&settings, gateway, failure_policy);
            let service = wiring.service_for(&customer, &payment).into_diagnostic()?;
            let response = service
                .setup_recurring(&customer, &payment)
                .await
                .into_diagnostic()?;
            writer.write_response(&response).into_diagnostic()?;
        }
        Command::Refund {
            transaction_id,
            currency,
            payment_type,
        } => {
            // Only type and currency matter for backend selection.
            let payment = PaymentData::new(0, "")
                .with_currency(currency)
                .with_type(payment_type.parse::<PaymentType>().into_diagnostic()?);
            let wiring = Wiring::new(&settings, gateway, failure_policy);
            let service = wiring.refund_service(&payment).into_diagnostic()?;
            let response = service
                .process_refund(&transaction_id)
                .await
                .into_diagnostic()?;
            writer.write_response(&response).into_diagnostic()?;
        }
        Command::Batch { input } => {
            let wiring = Wiring::new(&settings, gateway, failure_policy);
            let file = File::open(input).into_diagnostic()?;
            let reader = PaymentRequestReader::new(file);
            for request in reader.requests() {
                let request = match request {
                    Ok(request) => request,
                    Err(e) => {
                        eprintln!("Error reading request: {}", e);
                        continue;
                    }
                };
                let outcome = match wiring.service_for(&request.customer, &request.payment) {
                    Ok(service) => {
                        service
                            .process_transaction(&request.customer, &request.payment)
                            .await
                    }
                    Err(e) => Err(e),
                };
                match outcome {
                    Ok(response) => writer.write_response(&response).into_diagnostic()?,
                    Err(e) => eprintln!("Error processing request: {}", e),
                }
            }
        }
    }

    Ok(())
}
