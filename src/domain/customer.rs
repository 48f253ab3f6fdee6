use serde::{Deserialize, Serialize};

/// Ways of reaching a customer. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            phone: None,
        }
    }

    pub fn with_phone(phone: impl Into<String>) -> Self {
        Self {
            email: None,
            phone: Some(phone.into()),
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// True when at least one channel is usable.
    pub fn has_channel(&self) -> bool {
        self.email().is_some() || self.phone().is_some()
    }
}

/// The paying customer.
///
/// `customer_id` refers to a record that already exists on the gateway side and
/// is used to avoid creating a second one during recurring setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerData {
    pub name: String,
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub customer_id: Option<String>,
}

impl CustomerData {
    pub fn new(name: impl Into<String>, contact_info: ContactInfo) -> Self {
        Self {
            name: name.into(),
            contact_info,
            customer_id: None,
        }
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref().filter(|id| !id.is_empty())
    }
}
