//! Merchant accounts and the admin's local list of them.

use crate::ids::MerchantId;
use serde::{Deserialize, Serialize};

/// A seller account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    /// Assigned by the backend; absent on a create request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<MerchantId>,
    pub name: String,
    pub email_address: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub phone_number: String,
    pub pincode: String,
    /// Blocked from selling.
    #[serde(default)]
    pub blacklisted: bool,
}

impl Merchant {
    /// Check whether the name or email contains `needle` (case-insensitive).
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email_address.to_lowercase().contains(&needle)
    }
}

/// The merchant list as last fetched, plus mutations the backend confirmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MerchantDirectory {
    merchants: Vec<Merchant>,
}

impl MerchantDirectory {
    pub fn new(merchants: Vec<Merchant>) -> Self {
        Self { merchants }
    }

    /// Replace the list with a fresh fetch.
    pub fn replace(&mut self, merchants: Vec<Merchant>) {
        self.merchants = merchants;
    }

    pub fn merchants(&self) -> &[Merchant] {
        &self.merchants
    }

    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }

    pub fn get(&self, merchant_id: &MerchantId) -> Option<&Merchant> {
        self.merchants
            .iter()
            .find(|m| m.merchant_id.as_ref() == Some(merchant_id))
    }

    /// Flip the blacklisted flag. Returns false if the merchant is unknown.
    pub fn set_blacklisted(&mut self, merchant_id: &MerchantId, blacklisted: bool) -> bool {
        match self
            .merchants
            .iter_mut()
            .find(|m| m.merchant_id.as_ref() == Some(merchant_id))
        {
            Some(merchant) => {
                merchant.blacklisted = blacklisted;
                true
            }
            None => false,
        }
    }

    /// Remove a merchant, returning it if it was listed.
    pub fn remove(&mut self, merchant_id: &MerchantId) -> Option<Merchant> {
        let index = self
            .merchants
            .iter()
            .position(|m| m.merchant_id.as_ref() == Some(merchant_id))?;
        Some(self.merchants.remove(index))
    }

    /// Insert a merchant or replace the listed one with the same id.
    pub fn upsert(&mut self, merchant: Merchant) {
        let existing = merchant.merchant_id.as_ref().and_then(|id| {
            self.merchants
                .iter()
                .position(|m| m.merchant_id.as_ref() == Some(id))
        });
        match existing {
            Some(index) => self.merchants[index] = merchant,
            None => self.merchants.push(merchant),
        }
    }

    /// Merchants whose name or email contains `needle`.
    pub fn search<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a Merchant> + 'a {
        self.merchants.iter().filter(move |m| m.matches(needle))
    }

    /// Count of blacklisted merchants.
    pub fn blacklisted_count(&self) -> usize {
        self.merchants.iter().filter(|m| m.blacklisted).count()
    }
}
