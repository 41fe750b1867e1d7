//! Response shape summaries.

use serde_json::Value;

use crate::text::truncate;

/// Pagination fields echoed back by list endpoints.
pub const PAGINATION_FIELDS: &[&str] = &["total", "pageSize", "currentItem"];

/// Characters of pretty JSON shown in sample previews.
pub const SAMPLE_PREVIEW_CHARS: usize = 500;

/// Summary of a `data` array inside a mapping response.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSummary {
    pub item_count: usize,
    /// Keys of the first item; `None` when the first item is not an object
    /// or the array is empty.
    pub sample_keys: Option<Vec<String>>,
    pub first_item: Option<Value>,
}

/// Top-level classification of a JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    Mapping {
        keys: Vec<String>,
        data: Option<DataSummary>,
        /// Present pagination fields, in [`PAGINATION_FIELDS`] order.
        pagination: Vec<(String, Value)>,
    },
    Sequence {
        len: usize,
        first: Option<Value>,
    },
    Scalar(Value),
}

impl ResponseShape {
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseShape::Mapping { .. } => "object",
            ResponseShape::Sequence { .. } => "array",
            ResponseShape::Scalar(_) => "scalar",
        }
    }
}

/// Classify `payload` and summarise its contents.
pub fn analyze(payload: &Value) -> ResponseShape {
    match payload {
        Value::Object(map) => {
            let data = map.get("data").map(summarize_data);
            let pagination = PAGINATION_FIELDS
                .iter()
                .filter_map(|field| map.get(*field).map(|v| (field.to_string(), v.clone())))
                .collect();
            ResponseShape::Mapping {
                keys: map.keys().cloned().collect(),
                data,
                pagination,
            }
        }
        Value::Array(items) => ResponseShape::Sequence {
            len: items.len(),
            first: items.first().cloned(),
        },
        other => ResponseShape::Scalar(other.clone()),
    }
}

fn summarize_data(data: &Value) -> DataSummary {
    let items: &[Value] = match data {
        Value::Array(items) => items,
        _ => &[],
    };
    let first_item = items.first().cloned();
    let sample_keys = first_item
        .as_ref()
        .and_then(Value::as_object)
        .map(|item| item.keys().cloned().collect());
    DataSummary {
        item_count: items.len(),
        sample_keys,
        first_item,
    }
}

/// First item of a non-empty `data` array, if the payload has one.
pub fn first_data_item(payload: &Value) -> Option<&Value> {
    payload
        .get("data")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
}

/// `total` when reported, otherwise the length of `data`.
pub fn reported_total(payload: &Value) -> Option<String> {
    if let Some(total) = payload.get("total") {
        return Some(total.to_string());
    }
    payload
        .get("data")
        .and_then(Value::as_array)
        .map(|items| items.len().to_string())
}

/// Pretty JSON of `value`, cut to [`SAMPLE_PREVIEW_CHARS`].
pub fn sample_preview(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    truncate(&pretty, SAMPLE_PREVIEW_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mapping_with_data_reports_count_and_keys() {
        let payload = json!({"data": [{"a": 1}, {"a": 2}], "total": 2});
        let shape = analyze(&payload);

        match &shape {
            ResponseShape::Mapping { keys, data, pagination } => {
                assert_eq!(keys, &vec!["data".to_string(), "total".to_string()]);
                let data = data.as_ref().expect("data summary");
                assert_eq!(data.item_count, 2);
                assert_eq!(data.sample_keys, Some(vec!["a".to_string()]));
                assert_eq!(data.first_item, Some(json!({"a": 1})));
                assert_eq!(pagination, &vec![("total".to_string(), json!(2))]);
            }
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn keys_keep_response_order() {
        let payload: Value =
            serde_json::from_str(r#"{"total":1,"data":[{"name":"x","code":"y","id":3}]}"#).unwrap();
        match analyze(&payload) {
            ResponseShape::Mapping { keys, data: Some(data), .. } => {
                assert_eq!(keys, vec!["total".to_string(), "data".to_string()]);
                assert_eq!(
                    data.sample_keys,
                    Some(vec!["name".to_string(), "code".to_string(), "id".to_string()])
                );
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn sequence_reports_length_and_first() {
        let shape = analyze(&json!([1, 2, 3]));
        assert_eq!(
            shape,
            ResponseShape::Sequence {
                len: 3,
                first: Some(json!(1)),
            }
        );
    }

    #[test]
    fn null_or_empty_data_counts_zero() {
        for payload in [json!({"data": null}), json!({"data": []})] {
            match analyze(&payload) {
                ResponseShape::Mapping { data: Some(data), .. } => {
                    assert_eq!(data.item_count, 0);
                    assert_eq!(data.sample_keys, None);
                }
                other => panic!("unexpected shape {:?}", other),
            }
        }
    }

    #[test]
    fn non_object_items_have_no_sample_keys() {
        match analyze(&json!({"data": ["x"]})) {
            ResponseShape::Mapping { data: Some(data), .. } => {
                assert_eq!(data.item_count, 1);
                assert_eq!(data.sample_keys, None);
                assert_eq!(data.first_item, Some(json!("x")));
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn mapping_without_data_has_no_summary() {
        let shape = analyze(&json!({"message": "ok"}));
        assert!(matches!(shape, ResponseShape::Mapping { data: None, .. }));
        assert_eq!(shape.kind(), "object");
    }

    #[test]
    fn total_falls_back_to_data_length() {
        assert_eq!(reported_total(&json!({"data": [1, 2], "total": 40})).as_deref(), Some("40"));
        assert_eq!(reported_total(&json!({"data": [1, 2]})).as_deref(), Some("2"));
        assert_eq!(reported_total(&json!([1])), None);
    }

    #[test]
    fn preview_is_truncated() {
        let long = json!({"name": "x".repeat(600)});
        let preview = sample_preview(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), SAMPLE_PREVIEW_CHARS + 3);
    }
}
