//! JSON bodies exchanged with the backend.
//!
//! Field names follow the backend's camelCase. Conversions into the
//! commerce types attach the configured currency to bare decimal prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopsmart_commerce::catalog::{ProductDetails, ProductSummary};
use shopsmart_commerce::customer::CustomerRewards;
use shopsmart_commerce::{Currency, MerchantId, Money, ProductId, UserId};

/// `GET /getCartItems/{userId}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItemsResponse {
    pub merchant_id: Option<MerchantId>,
    pub cart_items: Vec<CartItem>,
}

/// One product id and quantity as the cart service stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// `GET /getProduct/{merchantId}/products/{productId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub listing_price: Decimal,
    pub product_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProductResponse {
    pub fn into_details(self, currency: Currency) -> ProductDetails {
        ProductDetails {
            product_name: self.product_name,
            unit_price: Money::new(self.listing_price, currency),
            image_url: self.image_url,
        }
    }
}

/// One row of `POST /products/filter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummaryResponse {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub listing_price: Decimal,
    #[serde(default)]
    pub merchant_id: Option<MerchantId>,
    #[serde(default)]
    pub available_stock: i64,
    #[serde(default)]
    pub pincode: Option<String>,
}

impl ProductSummaryResponse {
    pub fn into_summary(self, currency: Currency) -> ProductSummary {
        ProductSummary {
            product_id: self.product_id,
            product_name: self.product_name,
            merchant_id: self.merchant_id,
            listing_price: Money::new(self.listing_price, currency),
            image_url: self.image_url,
            available_stock: self.available_stock,
            pincode: self.pincode,
        }
    }
}

/// `GET /getCustomer/{userId}/rewards`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsResponse {
    pub reward_amount: Decimal,
    #[serde(default)]
    pub reward_points: Option<Decimal>,
}

impl RewardsResponse {
    pub fn into_rewards(self, currency: Currency) -> CustomerRewards {
        CustomerRewards {
            reward_points: self.reward_points,
            reward_amount: Money::new(self.reward_amount, currency),
        }
    }
}

/// Body of `PUT /deleteFromCart/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFromCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Body of `POST /profile/login/generateOtp/admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOtpRequest {
    pub email: String,
}

/// Body of `POST /profile/login/verifyOtp/admin`.
///
/// The login service reads the address from either field, so both are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    pub email_address: String,
    pub otp: String,
}

impl VerifyOtpRequest {
    pub fn new(email: impl Into<String>, otp: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            email_address: email.clone(),
            email,
            otp: otp.into(),
        }
    }
}

/// What the login service returns on a successful verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyOtpResponse {
    pub user_id: Option<UserId>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_items_tolerate_missing_fields() {
        let empty: CartItemsResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.cart_items.is_empty());

        let full: CartItemsResponse = serde_json::from_str(
            r#"{"merchantId":"m-1","cartItems":[{"productId":"p-1","quantity":2}]}"#,
        )
        .unwrap();
        assert_eq!(full.merchant_id, Some(MerchantId::new("m-1")));
        assert_eq!(full.cart_items[0].quantity, 2);
    }

    #[test]
    fn test_product_price_keeps_decimals() {
        let product: ProductResponse = serde_json::from_str(
            r#"{"listingPrice":5.5,"productName":"Kopi O","imageUrl":null}"#,
        )
        .unwrap();
        let details = product.into_details(Currency::SGD);
        assert_eq!(details.unit_price, Money::from_minor(550, Currency::SGD));
        assert_eq!(details.image_url, None);
    }

    #[test]
    fn test_verify_request_sends_both_email_fields() {
        let body = serde_json::to_value(VerifyOtpRequest::new("ops@shopsmart.sg", "123456")).unwrap();
        assert_eq!(body["email"], "ops@shopsmart.sg");
        assert_eq!(body["emailAddress"], "ops@shopsmart.sg");
        assert_eq!(body["otp"], "123456");
    }
}
