use crate::domain::model::EstimateRequest;
use crate::utils::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads an estimate request from a JSON file.
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<EstimateRequest> {
    let data = fs::read_to_string(path)?;
    parse_request(&data)
}

pub fn parse_request(json: &str) -> Result<EstimateRequest> {
    Ok(serde_json::from_str(json)?)
}

pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::BudgetType;
    use crate::utils::error::EstimateError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_request() {
        let request = parse_request(
            r#"{
                "criteria": {"locations": ["ng"], "gender": "female"},
                "budget": {"type": "total", "amount": "200.50", "currency": "NGN"},
                "payment_method_id": "card"
            }"#,
        )
        .unwrap();

        assert_eq!(request.budget.budget_type, BudgetType::Total);
        assert_eq!(request.budget.currency, "NGN");
        assert_eq!(request.payment_method_id.as_deref(), Some("card"));
        assert!(request.criteria.locations.contains("ng"));
    }

    #[test]
    fn test_criteria_optional() {
        let request = parse_request(r#"{"budget": {"type": "daily", "amount": 10}}"#).unwrap();
        assert!(request.criteria.interests.is_empty());
        assert!(request.payment_method_id.is_none());
    }

    #[test]
    fn test_malformed_request() {
        let result = parse_request(r#"{"budget": {"type": "weekly", "amount": 10}}"#);
        assert!(matches!(result, Err(EstimateError::SerializationError(_))));
    }

    #[test]
    fn test_load_request_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{"budget": {"type": "daily", "amount": 25, "boost_speed": "slow"}}"#)
            .unwrap();

        let request = load_request(temp_file.path()).unwrap();
        assert_eq!(request.budget.amount.to_string(), "25");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_request("/definitely/not/here.json");
        assert!(matches!(result, Err(EstimateError::IoError(_))));
    }
}
