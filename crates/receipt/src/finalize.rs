//! Order finalization: projection plus the till's receipt settings.
//!
//! Customer details for the printed receipt travel in the returned value
//! rather than being stashed on a shared session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use posline_config::PosConfig;
use posline_core::OrderId;
use posline_sales::{ImageRef, Order};

use crate::export::{BaseExport, ReceiptExport};
use crate::projector::project;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub address: Option<String>,
}

/// Everything the print step needs once an order is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedReceipt {
    pub order_id: OrderId,
    /// Receipt number shown to the customer.
    pub order_name: String,
    pub date: DateTime<Utc>,
    /// Present only when the till prints customer details.
    pub customer: Option<CustomerDetails>,
    pub export: ReceiptExport,
}

/// Finalize `order` for printing under `config`.
///
/// - customized receipts off: the base export is passed through unchanged;
/// - customer details off: customer fields are dropped from the header;
/// - company text missing on the order falls back to the till's settings;
/// - a configured logo is exposed as a `data:` URL.
pub fn finalize(order: &Order, config: &PosConfig, base: BaseExport) -> FinalizedReceipt {
    let customer = config
        .show_customer_details
        .then(|| order.customer())
        .flatten()
        .map(|c| CustomerDetails {
            name: c.name.clone(),
            address: c.address.clone(),
        });

    let export = if config.use_customized_receipt {
        let mut source = order.clone();
        let mut company = source.company().clone();
        if company.name.is_none() {
            company.name = config.company_name.clone();
        }
        if company.details.is_none() {
            company.details = config.company_details.clone();
        }
        source.set_company(company);

        let logo = config
            .receipt_logo
            .as_ref()
            .and_then(|logo| ImageRef::from_base64_png(&logo.data))
            .map(|image| image.as_str().to_string());
        let show_customer = config.show_customer_details;

        project(&source, base).map_header(|header| {
            if !show_customer {
                header.customer_name = None;
                header.customer_address = None;
            }
            header.receipt_logo = logo;
        })
    } else {
        ReceiptExport::passthrough(base)
    };

    tracing::info!(
        order_id = %order.id(),
        order_name = order.name(),
        customized = config.use_customized_receipt,
        "order finalized for printing"
    );

    FinalizedReceipt {
        order_id: order.id(),
        order_name: order.name().to_string(),
        date: order.created_at(),
        customer,
        export,
    }
}
