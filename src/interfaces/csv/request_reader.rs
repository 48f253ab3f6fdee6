use crate::domain::customer::{ContactInfo, CustomerData};
use crate::domain::payment::{DEFAULT_CURRENCY, PaymentData, PaymentType};
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::io::Read;

/// One customer/payment pair read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub customer: CustomerData,
    pub payment: PaymentData,
}

#[derive(Debug, Deserialize)]
struct PaymentRow {
    name: String,
    email: Option<String>,
    phone: Option<String>,
    customer_id: Option<String>,
    amount: i64,
    source: String,
    currency: Option<String>,
    #[serde(rename = "type")]
    payment_type: Option<String>,
}

impl TryFrom<PaymentRow> for PaymentRequest {
    type Error = PaymentError;

    fn try_from(row: PaymentRow) -> Result<Self> {
        let payment_type = match row.payment_type.as_deref() {
            Some(raw) => raw.parse()?,
            None => PaymentType::default(),
        };
        Ok(PaymentRequest {
            customer: CustomerData {
                name: row.name,
                contact_info: ContactInfo {
                    email: row.email,
                    phone: row.phone,
                },
                customer_id: row.customer_id,
            },
            payment: PaymentData {
                amount: row.amount,
                source: row.source,
                currency: row
                    .currency
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                payment_type,
            },
        })
    }
}

/// Reads payment requests from a CSV source with the header
/// `name,email,phone,customer_id,amount,source,currency,type`.
///
/// Empty optional columns are treated as absent.
pub struct PaymentRequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentRequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one result per row.
    pub fn requests(self) -> impl Iterator<Item = Result<PaymentRequest>> {
        self.reader.into_deserialize::<PaymentRow>().map(|row| {
            row.map_err(PaymentError::from)
                .and_then(PaymentRequest::try_from)
        })
    }
}
