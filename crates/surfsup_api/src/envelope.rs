//! JSON response envelopes.

use serde::Serialize;

/// Success body: `{"message": ..., "data": ...}`.
///
/// `data` is omitted when the query matched nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    /// Picks the data or no-data form based on the query result.
    pub fn from_option(
        data: Option<T>,
        message: impl FnOnce(&T) -> String,
        no_data_message: impl FnOnce() -> String,
    ) -> Self {
        match data {
            Some(data) => {
                let message = message(&data);
                Self::with_data(message, data)
            }
            None => Self::no_data(no_data_message()),
        }
    }
}

/// Failure body: `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::Envelope;

    #[test]
    fn no_data_envelope_omits_data_key() {
        let body = serde_json::to_value(Envelope::<Vec<String>>::no_data("nothing")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "nothing" }));
    }

    #[test]
    fn data_envelope_keeps_payload() {
        let envelope = Envelope::from_option(
            Some(vec![1, 2]),
            |data| format!("{} items", data.len()),
            || "none".to_string(),
        );
        let body = serde_json::to_value(envelope).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "2 items", "data": [1, 2] }));
    }
}
