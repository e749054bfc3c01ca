//! Document trait implementation for the Customer type.
//!
//! Customers carry no field-edit path: the balance moves only through the
//! [`AdjustBalance`](CustomerAction::AdjustBalance) action and everything
//! else is fixed at insert time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{CustomerAction, CustomerActionResult};
use crate::model::{Customer, CustomerFields};
use crate::store::Document;

impl Document for Customer {
    type Id = String;
    type Fields = CustomerFields;
    type Patch = ();
    type Action = CustomerAction;
    type ActionResult = CustomerActionResult;

    /// Creates a new Customer with a zero opening balance.
    fn from_insert(
        id: String,
        fields: CustomerFields,
        created_at: DateTime<Utc>,
    ) -> Result<Self, String> {
        Ok(Self {
            id,
            name: fields.name,
            phone: fields.phone,
            balance: Decimal::ZERO,
            created_at,
        })
    }

    fn apply_patch(&mut self, _patch: ()) -> Result<(), String> {
        Err("customer fields are not editable".to_string())
    }

    /// Handles atomic customer actions.
    ///
    /// # Actions
    /// - `AdjustBalance`: moves the balance by a signed delta, returns the
    ///   new balance
    fn apply_action(&mut self, action: CustomerAction) -> Result<CustomerActionResult, String> {
        match action {
            CustomerAction::AdjustBalance(delta) => {
                self.balance += delta;
                Ok(CustomerActionResult::AdjustBalance(self.balance))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Customer {
        Customer::from_insert(
            "customer_1".to_string(),
            CustomerFields {
                name: "Alice".to_string(),
                phone: "555-0001".to_string(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn opening_balance_is_zero() {
        assert_eq!(alice().balance, Decimal::ZERO);
    }

    #[test]
    fn balance_adjustments_accumulate() {
        let mut customer = alice();
        let purchase: Decimal = "19.98".parse().unwrap();
        let payment: Decimal = "10.00".parse().unwrap();

        customer.apply_action(CustomerAction::AdjustBalance(purchase)).unwrap();
        let result = customer
            .apply_action(CustomerAction::AdjustBalance(-payment))
            .unwrap();

        let expected: Decimal = "9.98".parse().unwrap();
        match result {
            CustomerActionResult::AdjustBalance(balance) => assert_eq!(balance, expected),
        }
        assert_eq!(customer.balance, expected);
    }

    #[test]
    fn patches_are_rejected() {
        let mut customer = alice();
        assert!(customer.apply_patch(()).is_err());
    }
}
