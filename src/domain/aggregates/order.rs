//! Consultation requests.
//!
//! A customer asking to be contacted about a piece (or about made-to-measure
//! in general). Posted to `/api/orders` and never kept locally.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::value_objects::Measurements;
use crate::Product;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ConsultationRequest {
    #[validate(custom = "not_blank", length(max = 120))]
    pub customer_name: String,
    #[validate(custom = "not_blank", length(max = 32))]
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub measurements: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

impl ConsultationRequest {
    pub fn new(customer_name: impl Into<String>, customer_phone: impl Into<String>) -> Self {
        Self { customer_name: customer_name.into(), customer_phone: customer_phone.into(), ..Default::default() }
    }

    pub fn for_product(mut self, product: &Product) -> Self {
        self.product_id = Some(product.id.clone());
        self.product_name = product.name.clone();
        self
    }

    pub fn with_measurements(mut self, measurements: &Measurements) -> Self {
        self.measurements = measurements.summary();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Trims every free-text field and drops empty optionals.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.customer_name,
            &mut self.customer_phone,
            &mut self.measurements,
            &mut self.notes,
            &mut self.product_name,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
        self.customer_email = self.customer_email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
        self.product_id = self.product_id.filter(|id| !id.trim().is_empty());
        self
    }
}
