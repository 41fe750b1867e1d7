//! Dashboard ideas derived from which endpoints returned data.

use std::collections::HashSet;

use serde_json::Value;

use crate::analysis::first_data_item;

/// Label substring rules; the first matching rule wins for a label.
const COMPONENT_RULES: &[(&str, &[&str])] = &[
    (
        "Products",
        &[
            "Product Inventory Dashboard - Track stock levels, low inventory alerts",
            "Product Performance - Best/worst selling products, price analysis",
            "Category Analysis - Products by category, category performance",
        ],
    ),
    (
        "Orders",
        &[
            "Sales Dashboard - Order trends, daily/monthly sales",
            "Revenue Analytics - Sales performance over time",
            "Order Status Tracking - Pending, completed, cancelled orders",
        ],
    ),
    (
        "Customers",
        &[
            "Customer Analytics - Customer segmentation, purchase patterns",
            "Customer Retention - Repeat customers, customer lifetime value",
            "Geographic Analysis - Customer distribution by location",
        ],
    ),
    (
        "Invoices",
        &[
            "Financial Dashboard - Revenue, profit margins, payment status",
            "Invoice Management - Outstanding invoices, payment tracking",
        ],
    ),
    (
        "Branches",
        &[
            "Multi-Branch Analytics - Performance comparison across locations",
            "Branch Performance - Sales by branch, inventory distribution",
        ],
    ),
];

/// One line per available endpoint, matched on the exact label.
const AVAILABILITY_RULES: &[(&str, &str)] = &[
    ("Products", "Product Management: Inventory levels, product performance, category analysis"),
    ("Customers", "Customer Analytics: Customer segmentation, purchase history, demographics"),
    ("Orders", "Sales Dashboard: Order trends, sales performance, order status tracking"),
    ("Invoices", "Financial Dashboard: Revenue tracking, invoice status, payment analytics"),
    ("Cash Flow", "Cash Flow Analysis: Financial transactions, money flow patterns"),
    ("Branches", "Multi-branch Analytics: Performance comparison across locations"),
];

/// Suggest dashboard components for successful `(label, payload)` pairs.
///
/// Only payloads carrying a non-empty `data` array contribute. The result
/// keeps first-seen order with duplicates removed.
pub fn suggest_components<'a, I>(successes: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut seen = HashSet::new();
    let mut components = Vec::new();

    for (label, payload) in successes {
        if first_data_item(payload).is_none() {
            continue;
        }
        let rule = COMPONENT_RULES
            .iter()
            .find(|(needle, _)| label.contains(needle));
        if let Some((_, lines)) = rule {
            for line in lines.iter().copied() {
                if seen.insert(line) {
                    components.push(line);
                }
            }
        }
    }

    components
}

/// Summary suggestions keyed on which labels returned any payload.
pub fn availability_summary<'a, I>(available: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let available: HashSet<&str> = available.into_iter().collect();
    AVAILABILITY_RULES
        .iter()
        .filter(|(label, _)| available.contains(label))
        .map(|(_, line)| *line)
        .collect()
}
