//! Capability table mapping inventory actions to the role they require.

use serde::{Deserialize, Serialize};

use crate::user::UserRole;

/// Inventory actions a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ViewProducts,
    ViewMetrics,
    ViewLowStock,
    ExportProducts,
    AddProduct,
    UpdateProduct,
    DeleteProduct,
}

impl Action {
    /// Minimum role required to perform this action
    pub fn required_role(&self) -> UserRole {
        match self {
            Action::AddProduct | Action::UpdateProduct | Action::DeleteProduct => UserRole::Admin,
            Action::ViewProducts
            | Action::ViewMetrics
            | Action::ViewLowStock
            | Action::ExportProducts => UserRole::Standard,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::ViewProducts => "view_products",
            Action::ViewMetrics => "view_metrics",
            Action::ViewLowStock => "view_low_stock",
            Action::ExportProducts => "export_products",
            Action::AddProduct => "add_product",
            Action::UpdateProduct => "update_product",
            Action::DeleteProduct => "delete_product",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutations_require_admin() {
        for action in [Action::AddProduct, Action::UpdateProduct, Action::DeleteProduct] {
            assert_eq!(action.required_role(), UserRole::Admin);
            assert!(UserRole::Admin.permits(action));
            assert!(!UserRole::Standard.permits(action));
        }
    }

    #[test]
    fn test_reads_allowed_for_every_role() {
        for action in [
            Action::ViewProducts,
            Action::ViewMetrics,
            Action::ViewLowStock,
            Action::ExportProducts,
        ] {
            assert_eq!(action.required_role(), UserRole::Standard);
            assert!(UserRole::Admin.permits(action));
            assert!(UserRole::Standard.permits(action));
        }
    }
}
