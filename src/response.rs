use serde::Serialize;

/// Envelope returned by every registration endpoint: `data` carries the
/// projection on success, `errors` the accumulated validation messages on
/// rejection. Both keys are always present.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn errors(errors: Vec<String>) -> Self {
        Self { data: None, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_has_empty_errors() {
        let json = serde_json::to_value(Envelope::data("ok")).unwrap();
        assert_eq!(json["data"], "ok");
        assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn error_envelope_has_null_data_and_messages() {
        let env: Envelope<String> =
            Envelope::errors(vec!["Tax id already registered.".to_string()]);
        let json = serde_json::to_value(env).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["errors"][0], "Tax id already registered.");
    }
}
