use serde::{Deserialize, Serialize};

use posline_core::{PosConfigId, SalespersonId};

/// Logo printed at the top of customized receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLogo {
    /// Base64-encoded image payload.
    pub data: String,
    pub filename: Option<String>,
}

/// Settings of one point-of-sale till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosConfig {
    pub id: PosConfigId,

    /// Print the customized header (cleaned company text, salespersons).
    #[serde(default)]
    pub use_customized_receipt: bool,
    /// Print customer name and address on the receipt.
    #[serde(default)]
    pub show_customer_details: bool,
    #[serde(default)]
    pub receipt_logo: Option<ReceiptLogo>,

    /// Company name as rich text (markup allowed).
    #[serde(default)]
    pub company_name: Option<String>,
    /// Company details as rich text (markup allowed).
    #[serde(default)]
    pub company_details: Option<String>,

    /// Offer salesperson assignment on order lines.
    #[serde(default)]
    pub active_salesperson_feature: bool,
    /// Salespersons selectable on this till, in display order.
    #[serde(default)]
    pub allowed_salesperson_ids: Vec<SalespersonId>,
}

impl PosConfig {
    pub fn new(id: PosConfigId) -> Self {
        Self {
            id,
            use_customized_receipt: false,
            show_customer_details: false,
            receipt_logo: None,
            company_name: None,
            company_details: None,
            active_salesperson_feature: false,
            allowed_salesperson_ids: Vec::new(),
        }
    }

    /// Salesperson ids offered for selection; empty when the feature is off.
    pub fn selectable_salespersons(&self) -> &[SalespersonId] {
        if self.active_salesperson_feature {
            &self.allowed_salesperson_ids
        } else {
            &[]
        }
    }
}
