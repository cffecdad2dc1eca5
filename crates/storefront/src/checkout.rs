//! Mock checkout.
//!
//! Validates the checkout form and answers with an order confirmation. No
//! payment is taken and the cart is left as it is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use urban_store_core::{CartState, Email, OrderSummary};
use uuid::Uuid;

pub use crate::forms::FieldError;
use crate::forms::min_chars;

/// How the shopper intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    #[default]
    Card,
}

/// Checkout form as submitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// A checkout form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidCheckout {
    pub full_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
}

/// The answer to a successful checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub order_reference: Uuid,
    pub placed_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub item_count: u64,
    pub summary: OrderSummary,
}

impl CheckoutForm {
    /// Validate every field, reporting all failures at once.
    ///
    /// # Errors
    ///
    /// Returns the list of failing fields, in form order.
    pub fn validate(self) -> Result<ValidCheckout, Vec<FieldError>> {
        let mut errors = Vec::new();

        if !min_chars(&self.full_name, 2) {
            errors.push(FieldError {
                field: "fullName",
                message: "Full name is required",
            });
        }
        let email = Email::parse(&self.email);
        if email.is_err() {
            errors.push(FieldError {
                field: "email",
                message: "Please provide a valid email",
            });
        }
        if !min_chars(&self.phone, 8) {
            errors.push(FieldError {
                field: "phone",
                message: "Phone number is required",
            });
        }
        if !min_chars(&self.address, 5) {
            errors.push(FieldError {
                field: "address",
                message: "Address is required",
            });
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(ValidCheckout {
                full_name: self.full_name.trim().to_string(),
                email,
                phone: self.phone.trim().to_string(),
                address: self.address.trim().to_string(),
                payment_method: self.payment_method,
            }),
            _ => Err(errors),
        }
    }
}

/// Confirm an order for the current cart.
#[must_use]
pub fn confirm(order: &ValidCheckout, cart: &CartState) -> Confirmation {
    let confirmation = Confirmation {
        order_reference: Uuid::new_v4(),
        placed_at: Utc::now(),
        payment_method: order.payment_method,
        item_count: cart.count(),
        summary: cart.summary(),
    };

    tracing::info!(
        order_reference = %confirmation.order_reference,
        email_domain = order.email.domain(),
        payment_method = ?order.payment_method,
        items = confirmation.item_count,
        total = %confirmation.summary.total,
        "Checkout submitted"
    );

    confirmation
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use urban_store_core::{CartAction, Price, Product, ProductId};

    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Jordan Fox".to_string(),
            email: "jordan@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            address: "12 Market Street".to_string(),
            payment_method: PaymentMethod::Card,
        }
    }

    #[test]
    fn test_valid_form() {
        let valid = valid_form().validate().unwrap();
        assert_eq!(valid.email.as_str(), "jordan@example.com");
        assert_eq!(valid.payment_method, PaymentMethod::Card);
    }

    #[test]
    fn test_all_errors_reported_in_order() {
        let errors = CheckoutForm::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["fullName", "email", "phone", "address"]);
    }

    #[test]
    fn test_single_bad_field() {
        let form = CheckoutForm {
            email: "not-an-email".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors,
            [FieldError {
                field: "email",
                message: "Please provide a valid email",
            }]
        );
    }

    #[test]
    fn test_whitespace_does_not_count() {
        let form = CheckoutForm {
            full_name: "  J ".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap_err()[0].field, "fullName");
    }

    #[test]
    fn test_payment_method_defaults_to_card() {
        let form: CheckoutForm = serde_json::from_str(
            r#"{"fullName":"Jordan Fox","email":"j@example.com","phone":"55501000","address":"1 Main St"}"#,
        )
        .unwrap();
        assert_eq!(form.payment_method, PaymentMethod::Card);

        let cash: CheckoutForm = serde_json::from_str(r#"{"paymentMethod":"cash"}"#).unwrap();
        assert_eq!(cash.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_confirm_summarizes_cart_without_changing_it() {
        let product = Product {
            id: ProductId::new(2),
            name: "Essential Crew Tee".to_string(),
            category: "Tops".to_string(),
            image: String::new(),
            price: Price::from_cents(2400),
            stock: Some(40),
            description: String::new(),
            size: None,
            selected_size: Some("M".to_string()),
        };
        let cart = CartState::new().apply(CartAction::Add {
            product,
            quantity: 2,
        });

        let confirmation = confirm(&valid_form().validate().unwrap(), &cart);
        assert_eq!(confirmation.item_count, 2);
        assert_eq!(confirmation.summary.total, Price::from_cents(6000));
        assert_eq!(cart.count(), 2);
    }
}
