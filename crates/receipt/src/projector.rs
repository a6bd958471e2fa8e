use posline_sales::{Order, OrderLine};

use crate::export::{BaseExport, ReceiptExport, ReceiptHeader};
use crate::markup::strip_markup;

/// Distinct, non-empty salesperson names in order of first appearance.
///
/// Names compare by exact string equality (case-sensitive).
pub fn collect_salespersons<'a>(lines: impl IntoIterator<Item = &'a OrderLine>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in lines {
        let Some(attribution) = line.attribution() else {
            continue;
        };
        let name = attribution.person_name.as_str();
        if name.is_empty() || names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

/// Build the receipt export for `order` on top of the host's `base` export.
///
/// Never fails: a missing customer leaves both customer fields absent, missing
/// company text becomes empty text, and an order without lines has no
/// salespersons.
pub fn project(order: &Order, base: BaseExport) -> ReceiptExport {
    let company = order.company();
    let header = ReceiptHeader {
        customer_name: order.customer().map(|c| c.name.clone()),
        customer_address: order.customer().and_then(|c| c.address.clone()),
        company_name_clean: company.name.as_deref().map(strip_markup).unwrap_or_default(),
        company_details_clean: company
            .details
            .as_deref()
            .map(strip_markup)
            .unwrap_or_default(),
        salespersons: collect_salespersons(order.lines()),
        receipt_logo: None,
    };

    tracing::debug!(
        order_id = %order.id(),
        lines = order.lines().len(),
        salespersons = header.salespersons.len(),
        has_customer = header.customer_name.is_some(),
        "projected receipt export"
    );

    ReceiptExport::new(base, header)
}
