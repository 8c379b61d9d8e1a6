//! Toast texts shown to storefront users.

pub const ORDER_PLACED_SUMMARY: &str = "Order Placed";
pub const ORDER_PLACED_DETAIL: &str = "Your order has been placed successfully";
pub const ORDER_FAILED: &str = "Error placing order. Please try again later.";

pub const REMOVE_ITEM_FAILED: &str = "Error deleting item from cart";
pub const CLEAR_CART_FAILED: &str = "Error clearing cart";
pub const LOAD_CART_FAILED: &str = "Error loading cart";

pub const MERCHANT_CREATED: &str = "Merchant created successfully";
pub const MERCHANT_UPDATED: &str = "Your Details have been updated successfully";
pub const MERCHANT_BLOCKED: &str = "Merchant has been blocked successfully";
pub const MERCHANT_UNBLOCKED: &str = "Merchant has been unblocked successfully";
pub const MERCHANT_DELETED: &str = "Merchant deleted successfully";
pub const MERCHANT_BAD_DATA: &str = "Please check the data you entered and try again.";

pub const LOGIN_SUCCESSFUL: &str = "Login Successful";
pub const OTP_RESENT: &str = "OTP has been resent to your email.";
pub const OTP_SEND_FAILED: &str = "Failed to send email. Please try again later.";
pub const OTP_VERIFY_FAILED: &str = "Error submitting OTP. Please try again later.";

/// Fallback for failures with no more specific text.
pub const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again later.";
