use crate::domain::product::ProductEntry;
use crate::domain::types::Price;

/// A price drop worth telling the user about.
///
/// Alerts are not persisted; they only exist long enough to be rendered and
/// handed to a notifier.
#[derive(Debug, Clone, Copy)]
pub struct PriceAlert<'a> {
    pub product: &'a ProductEntry,
    pub price: Price,
}

impl<'a> PriceAlert<'a> {
    /// Returns an alert when `price` is at or below the product's target.
    pub fn check(product: &'a ProductEntry, price: Price) -> Option<Self> {
        price
            .is_at_or_below(product.target_price)
            .then_some(Self { product, price })
    }

    /// Plain-text message body sent to the chat.
    pub fn message(&self) -> String {
        format!(
            "🚨 PRICE DROP!\n\n{}\nCurrent: ₹{}\nTarget: ₹{}\n{}",
            self.product.name, self.price, self.product.target_price, self.product.url
        )
    }
}
