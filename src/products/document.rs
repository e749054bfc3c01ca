//! Document trait implementation for the Product type.
//!
//! Includes support for atomic actions like stock checking and reservation.

use chrono::{DateTime, Utc};

use super::{ProductAction, ProductActionResult, ReserveOutcome};
use crate::model::{Product, ProductFields, ProductPatch};
use crate::store::Document;

impl Document for Product {
    type Id = String;
    type Fields = ProductFields;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    /// Creates a new Product from the insert payload.
    fn from_insert(
        id: String,
        fields: ProductFields,
        created_at: DateTime<Utc>,
    ) -> Result<Self, String> {
        Ok(Self {
            id,
            name: fields.name,
            price: fields.price,
            stock: fields.stock,
            created_at,
        })
    }

    /// Merges a partial update into the product.
    ///
    /// # Fields Updated
    /// - `price`: unit price
    /// - `stock`: available stock level
    fn apply_patch(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        Ok(())
    }

    /// Handles atomic product actions.
    ///
    /// # Actions
    /// - `CheckStock`: returns the current stock level
    /// - `ReserveStock`: decrements stock when available, otherwise reports
    ///   the shortfall without changing anything
    fn apply_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ReserveStock(quantity) => {
                let outcome = if self.stock >= quantity {
                    self.stock -= quantity;
                    ReserveOutcome::Reserved { remaining: self.stock }
                } else {
                    ReserveOutcome::Insufficient {
                        requested: quantity,
                        available: self.stock,
                    }
                };
                Ok(ProductActionResult::ReserveStock(outcome))
            }
        }
    }
}
