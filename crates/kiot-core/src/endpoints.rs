//! Static endpoint descriptor tables.

/// A read endpoint of the public API together with its default query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Path relative to the API base URL, including the leading slash.
    pub path: &'static str,
    /// Human label used in reports and dashboard rules.
    pub label: &'static str,
    /// Default query parameters.
    pub params: &'static [(&'static str, u32)],
}

const SMALL_PAGE: &[(&str, u32)] = &[("pageSize", 5), ("currentItem", 0)];

/// Endpoints probed by the brute-force tool, each with a small page.
pub const PROBE_ENDPOINTS: &[Endpoint] = &[
    Endpoint { path: "/categories", label: "Categories", params: SMALL_PAGE },
    Endpoint { path: "/products", label: "Products", params: SMALL_PAGE },
    Endpoint { path: "/customers", label: "Customers", params: SMALL_PAGE },
    Endpoint { path: "/orders", label: "Orders", params: SMALL_PAGE },
    Endpoint { path: "/invoices", label: "Invoices", params: SMALL_PAGE },
    Endpoint { path: "/branches", label: "Branches", params: SMALL_PAGE },
    Endpoint { path: "/cashFlow", label: "Cash Flow", params: SMALL_PAGE },
    Endpoint { path: "/priceBooks", label: "Price Books", params: SMALL_PAGE },
    Endpoint { path: "/customerGroups", label: "Customer Groups", params: SMALL_PAGE },
];

/// Endpoints explored by the interactive tool.
pub const EXPLORE_ENDPOINTS: &[Endpoint] = &[
    Endpoint { path: "/categories", label: "Product Categories", params: &[("pageSize", 10)] },
    Endpoint { path: "/products", label: "Products", params: &[("pageSize", 5)] },
    Endpoint { path: "/customers", label: "Customers", params: &[("pageSize", 5)] },
    Endpoint { path: "/orders", label: "Orders", params: &[("pageSize", 5)] },
    Endpoint { path: "/invoices", label: "Invoices", params: &[("pageSize", 5)] },
    Endpoint { path: "/branches", label: "Branches", params: &[] },
    Endpoint { path: "/users", label: "Users", params: &[] },
    Endpoint { path: "/suppliers", label: "Suppliers", params: &[("pageSize", 5)] },
];

impl Endpoint {
    /// Query pairs as owned strings, with `pageSize` replaced when an
    /// override is given. Endpoints without a page size stay unpaged.
    pub fn query(&self, page_size: Option<u32>) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(name, value)| {
                let value = match (*name, page_size) {
                    ("pageSize", Some(size)) => size,
                    _ => *value,
                };
                (name.to_string(), value.to_string())
            })
            .collect()
    }

    /// Full URL for this endpoint under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}
