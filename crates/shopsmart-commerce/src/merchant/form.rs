//! Merchant create/update form with client-side validation.

use crate::error::CommerceError;
use crate::ids::MerchantId;
use crate::merchant::Merchant;
use crate::validation::{is_valid_email, is_valid_phone, is_valid_pincode, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Whether the form creates a merchant or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    Create,
    Update,
}

/// Raw form input, as typed by the admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub pincode: String,
}

impl MerchantForm {
    /// Field names, in display order.
    pub const FIELDS: [&'static str; 6] = [
        "name",
        "email",
        "phone",
        "addressLine1",
        "addressLine2",
        "pincode",
    ];

    /// Prefill the form from a fetched merchant.
    pub fn from_merchant(merchant: &Merchant) -> Self {
        Self {
            name: merchant.name.clone(),
            email: merchant.email_address.clone(),
            phone: merchant.phone_number.clone(),
            address_line1: merchant.address_line1.clone(),
            address_line2: merchant.address_line2.clone().unwrap_or_default(),
            pincode: merchant.pincode.clone(),
        }
    }

    /// Validate one field, as on blur. Unknown fields are always valid.
    pub fn validate_field(&self, field: &str, mode: FormMode) -> Option<String> {
        let message = match field {
            "name" => required(&self.name, "Merchant Name is required"),
            "email" => required(&self.email, "Email is required").or_else(|| {
                (!is_valid_email(&self.email)).then_some("Invalid email format")
            }),
            "phone" => required(&self.phone, "Phone number is required").or_else(|| {
                (!is_valid_phone(&self.phone)).then_some("Invalid phone number")
            }),
            "addressLine1" => required(&self.address_line1, "Address Line 1 is required"),
            "addressLine2" if mode == FormMode::Create => {
                required(&self.address_line2, "Address Line 2 is required")
            }
            "pincode" => required(&self.pincode, "Pincode is required").or_else(|| {
                (!is_valid_pincode(&self.pincode)).then_some("Pincode must be 6 digits")
            }),
            _ => None,
        };
        message.map(str::to_string)
    }

    /// Validate every field and report all failures together.
    pub fn validate(&self, mode: FormMode) -> Result<(), CommerceError> {
        let mut errors = ValidationErrors::new();
        for field in Self::FIELDS {
            errors.add_if(field, self.validate_field(field, mode));
        }
        errors.into_result().map_err(CommerceError::from)
    }

    /// Build the merchant record to send. Validates first.
    pub fn to_merchant(
        &self,
        mode: FormMode,
        merchant_id: Option<MerchantId>,
    ) -> Result<Merchant, CommerceError> {
        self.validate(mode)?;

        let address_line2 = self.address_line2.trim();
        Ok(Merchant {
            merchant_id,
            name: self.name.trim().to_string(),
            email_address: self.email.trim().to_string(),
            address_line1: self.address_line1.trim().to_string(),
            address_line2: (!address_line2.is_empty()).then(|| address_line2.to_string()),
            phone_number: self.phone.trim().to_string(),
            pincode: self.pincode.trim().to_string(),
            blacklisted: false,
        })
    }
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.trim().is_empty().then_some(message)
}
