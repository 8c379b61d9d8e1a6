//! The local view of a customer's server-side cart.

use crate::cart::line::{check_line_limit, validate_quantity, CartLine};
use crate::cart::{CartSummary, RewardDiscount};
use crate::error::CommerceError;
use crate::ids::{MerchantId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// The backend owns the cart; this is the last fetched snapshot plus any
/// mutations the backend has confirmed since.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Merchant the cart's items belong to.
    pub merchant_id: Option<MerchantId>,
    /// Lines in display order.
    lines: Vec<CartLine>,
    /// Cart currency.
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            merchant_id: None,
            lines: Vec::new(),
            currency,
        }
    }

    /// Replace all lines with a fresh snapshot from the backend.
    pub fn replace(
        &mut self,
        merchant_id: Option<MerchantId>,
        lines: Vec<CartLine>,
    ) -> Result<(), CommerceError> {
        self.check_currencies(&lines)?;
        self.merchant_id = merchant_id;
        self.lines = lines;
        Ok(())
    }

    /// Add a line, merging with an existing line for the same product.
    pub fn add_line(&mut self, line: CartLine) -> Result<(), CommerceError> {
        validate_quantity(line.quantity)?;
        check_line_limit(line.quantity)?;
        self.check_currencies(std::slice::from_ref(&line))?;

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            let new_quantity = existing
                .quantity
                .checked_add(line.quantity)
                .ok_or(CommerceError::Overflow)?;

            check_line_limit(new_quantity)?;
            existing.quantity = new_quantity;
            return Ok(());
        }

        self.lines.push(line);
        Ok(())
    }

    /// Remove every line for a product. Returns how many were removed.
    pub fn remove_product(&mut self, product_id: &ProductId) -> usize {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        len_before - self.lines.len()
    }

    /// Clear all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn line_for(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.line_for(product_id).is_some()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Get number of lines (the cart badge count).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ(unit price × quantity) over priced lines, unrounded.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let totals = self
            .lines
            .iter()
            .map(CartLine::line_total)
            .collect::<Result<Vec<_>, _>>()?;

        Money::try_sum(totals.iter().flatten(), self.currency).ok_or(CommerceError::Overflow)
    }

    /// Derive the summary for the current lines and toggle state.
    pub fn summarize(
        &self,
        rewards: &RewardDiscount,
        requires_delivery: bool,
    ) -> Result<CartSummary, CommerceError> {
        CartSummary::compute(self.subtotal()?, rewards, requires_delivery)
    }

    fn check_currencies(&self, lines: &[CartLine]) -> Result<(), CommerceError> {
        for price in lines.iter().filter_map(|l| l.unit_price.as_ref()) {
            if price.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: price.currency.code().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::line::MAX_QUANTITY_PER_LINE;

    fn sgd(minor: i64) -> Money {
        Money::from_minor(minor, Currency::SGD)
    }

    fn line(id: &str, quantity: i64, price_minor: i64) -> CartLine {
        CartLine::new(ProductId::new(id), id, quantity, sgd(price_minor)).unwrap()
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let cart = Cart::new(Currency::SGD);
        assert!(cart.is_empty());
        assert!(cart.subtotal().unwrap().is_zero());
    }

    #[test]
    fn test_subtotal_example() {
        let mut cart = Cart::new(Currency::SGD);
        cart.replace(None, vec![line("a", 2, 1000), line("b", 1, 550)])
            .unwrap();
        assert_eq!(cart.subtotal().unwrap(), sgd(2550));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_subtotal_matches_sum_for_many_lines() {
        let mut cart = Cart::new(Currency::SGD);
        let mut expected = 0i64;
        for i in 1..=25i64 {
            let price = i * 37 % 1000;
            cart.add_line(line(&format!("p{i}"), i, price)).unwrap();
            expected += price * i;
        }
        assert_eq!(cart.subtotal().unwrap(), sgd(expected));
    }

    #[test]
    fn test_unpriced_lines_contribute_nothing() {
        let mut cart = Cart::new(Currency::SGD);
        cart.add_line(line("a", 1, 500)).unwrap();
        cart.add_line(CartLine::unavailable(ProductId::new("b"), 4).unwrap())
            .unwrap();
        assert_eq!(cart.subtotal().unwrap(), sgd(500));
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new(Currency::SGD);
        cart.add_line(line("a", 1, 1000)).unwrap();
        cart.add_line(line("a", 2, 1000)).unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new(Currency::SGD);
        cart.add_line(line("a", MAX_QUANTITY_PER_LINE, 1)).unwrap();
        let result = cart.add_line(line("a", 1, 1));
        assert!(matches!(
            result,
            Err(CommerceError::QuantityExceedsLimit(_, _))
        ));
    }

    #[test]
    fn test_replace_keeps_large_backend_quantities() {
        let mut cart = Cart::new(Currency::SGD);
        let bulk = line("a", MAX_QUANTITY_PER_LINE + 1, 100);
        cart.replace(None, vec![bulk, line("b", 1, 550)]).unwrap();
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.subtotal().unwrap(), sgd(1_000_000 + 550));
    }

    #[test]
    fn test_remove_product() {
        let mut cart = Cart::new(Currency::SGD);
        cart.replace(None, vec![line("a", 1, 100), line("b", 1, 200)])
            .unwrap();
        assert_eq!(cart.remove_product(&ProductId::new("a")), 1);
        assert!(!cart.contains(&ProductId::new("a")));
        assert_eq!(cart.subtotal().unwrap(), sgd(200));
    }

    #[test]
    fn test_remove_missing_product_is_noop() {
        let mut cart = Cart::new(Currency::SGD);
        cart.add_line(line("a", 1, 100)).unwrap();
        let before = cart.clone();
        assert_eq!(cart.remove_product(&ProductId::new("zzz")), 0);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut cart = Cart::new(Currency::SGD);
        let usd = CartLine::new(
            ProductId::new("a"),
            "a",
            1,
            Money::from_minor(100, Currency::USD),
        )
        .unwrap();
        assert!(matches!(
            cart.add_line(usd),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new(Currency::SGD);
        cart.add_line(line("a", 1, 100)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.subtotal().unwrap().is_zero());
    }
}
