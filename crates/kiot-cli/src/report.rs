//! Console report rendering.
//!
//! Everything here builds lines; the binaries decide when to print them.

use kiot_core::analysis::{analyze, first_data_item, reported_total, sample_preview};
use kiot_core::{ResponseShape, TokenInsight};
use kiot_sdk::{ApiError, Attempt, ProbeReport, Session};
use serde_json::Value;

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Title between two rules.
pub fn section(title: &str) -> Vec<String> {
    vec![String::new(), rule(), title.to_string(), rule()]
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// One line with the whole error chain.
pub fn auth_failure_line(err: &ApiError) -> String {
    format!("Authentication failed: {:#}", err)
}

pub fn session_lines(session: &Session) -> Vec<String> {
    let mut lines = vec!["Authentication successful".to_string()];
    if let Some(token_type) = session.token_type() {
        lines.push(format!("Token type: {}", token_type));
    }
    match (session.expires_in(), session.expires_in_hours()) {
        (Some(secs), Some(hours)) => {
            lines.push(format!("Token expires in: {} seconds ({:.1} hours)", secs, hours))
        }
        _ => lines.push("Token expiry: unknown".to_string()),
    }
    if let Some(at) = session.expires_at() {
        lines.push(format!("Token expires at: {}", at.to_rfc3339()));
    }
    lines.push(format!("Access token: {}", session.token_preview()));
    lines
}

pub fn token_lines(insight: &TokenInsight) -> Vec<String> {
    let mut lines = vec![String::new(), "Token information:".to_string()];
    if let Some(alg) = &insight.algorithm {
        lines.push(format!("   alg: {}", alg));
    }
    for (name, value) in &insight.claims {
        lines.push(format!("   {}: {}", name, value));
    }
    for (name, value) in &insight.tenant_hints {
        lines.push(format!("   Found potential shop info - {}: {}", name, value));
    }
    lines
}

pub fn candidate_label(retailer: Option<&str>) -> String {
    match retailer {
        Some(name) => format!("with retailer: {}", name),
        None => "without retailer".to_string(),
    }
}

/// Per-attempt progress for the probe tool.
pub fn attempt_lines(attempt: &Attempt) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("--- Trying {} ---", candidate_label(attempt.retailer.as_deref())),
    ];
    if let Some(status) = attempt.status {
        lines.push(format!("Response status: {}", status));
    }
    if attempt.succeeded() {
        lines.push("Request successful".to_string());
        return lines;
    }
    match (&attempt.error, attempt.status) {
        (Some(error), _) => lines.push(format!("Request error: {}", error)),
        (None, Some(status)) => lines.push(format!("Request failed: {}", status)),
        (None, None) => {}
    }
    if let Some(excerpt) = &attempt.excerpt {
        lines.push(format!("Response: {}", excerpt));
    }
    if attempt.retailer_header_hint {
        lines.push(
            "Tip: you may need to provide a 'Retailer' header with your store name".to_string(),
        );
    }
    lines
}

/// Full shape analysis for the probe tool.
pub fn analysis_lines(label: &str, payload: &Value) -> Vec<String> {
    let shape = analyze(payload);
    let mut lines = vec![
        String::new(),
        format!("Analysis for {}:", label),
        format!("Response type: {}", shape.kind()),
    ];

    match &shape {
        ResponseShape::Mapping {
            keys,
            data,
            pagination,
        } => {
            lines.push(format!("Response keys: {:?}", keys));
            if let Some(data) = data {
                lines.push(format!("Data items count: {}", data.item_count));
                if let Some(first) = &data.first_item {
                    match &data.sample_keys {
                        Some(keys) => lines.push(format!("Sample item keys: {:?}", keys)),
                        None => lines.push("Sample item keys: not an object".to_string()),
                    }
                    lines.push("Sample item:".to_string());
                    lines.push(sample_preview(first));
                }
            }
            for (field, value) in pagination {
                lines.push(format!("{}: {}", field, value));
            }
        }
        ResponseShape::Sequence { len, first } => {
            lines.push(format!("List with {} items", len));
            if let Some(first) = first {
                lines.push(format!("Sample item: {}", first));
            }
        }
        ResponseShape::Scalar(value) => lines.push(format!("Value: {}", value)),
    }
    lines
}

/// Short success summary for the explore tool.
pub fn success_lines(label: &str, payload: &Value) -> Vec<String> {
    let mut lines = vec![format!("{}: SUCCESS", label)];
    if let ResponseShape::Mapping { data: Some(data), .. } = analyze(payload) {
        let total = payload
            .get("total")
            .map(Value::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        lines.push(format!("   Found {} items (total: {})", data.item_count, total));
        if data.item_count > 0 {
            match data.sample_keys {
                Some(keys) => lines.push(format!("   Sample item keys: {:?}", keys)),
                None => lines.push("   Sample item keys: not an object".to_string()),
            }
        }
    }
    lines
}

/// Failure summary for the explore tool, from its last attempt.
pub fn failure_lines(label: &str, attempts: &[Attempt]) -> Vec<String> {
    let Some(last) = attempts.last() else {
        return vec![format!("{}: not attempted", label)];
    };
    let mut lines = Vec::new();
    match (last.status, &last.error) {
        (Some(status), None) => lines.push(format!("{}: FAILED (Status: {})", label, status)),
        (_, Some(error)) => lines.push(format!("{}: ERROR - {}", label, error)),
        (None, None) => lines.push(format!("{}: FAILED", label)),
    }
    if let Some(excerpt) = &last.excerpt {
        lines.push(format!("   Error: {}", excerpt));
    }
    lines
}

/// Per-endpoint data structure notes ahead of dashboard suggestions.
pub fn dashboard_analysis_lines(report: &ProbeReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (label, payload) in report.successes() {
        lines.push(String::new());
        lines.push(format!("{} analysis:", label));
        let Some(first) = first_data_item(payload) else {
            continue;
        };
        if let Some(total) = reported_total(payload) {
            lines.push(format!("   - Total items available: {}", total));
        }
        match first.as_object() {
            Some(item) => lines.push(format!(
                "   - Sample data structure: {:?}",
                item.keys().collect::<Vec<_>>()
            )),
            None => lines.push("   - Sample data structure: unknown".to_string()),
        }
    }
    lines
}

/// Pretty sample items from the first `limit` successful endpoints.
pub fn sample_preview_lines(report: &ProbeReport, limit: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (label, payload) in report.successes().take(limit) {
        if let Some(first) = first_data_item(payload) {
            lines.push(String::new());
            lines.push(format!("{} - Sample item:", label));
            lines.push(sample_preview(first));
        }
    }
    lines
}

/// `1. first`, `2. second`, ...
pub fn numbered<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .collect()
}

/// Per-endpoint availability listing for the probe tool.
pub fn availability_lines(report: &ProbeReport) -> Vec<String> {
    report
        .results
        .iter()
        .map(|result| match result.success.as_ref() {
            Some(success) => match &success.retailer {
                Some(name) => format!("{}: Data available (Retailer: {})", result.endpoint.label, name),
                None => format!("{}: Data available", result.endpoint.label),
            },
            None => format!("{}: No data or access denied", result.endpoint.label),
        })
        .collect()
}
