use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GenerateError;

/// One structured manual test record, as the model is asked to emit it.
///
/// Every field defaults to empty so deserialization never fails just because
/// the model omitted an optional field. `priority` is expected to be
/// High / Medium / Low but is carried as opaque text, not validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub test_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub preconditions: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub expected_results: Vec<String>,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub notes: String,
}

/// Parse the raw model reply into test cases.
///
/// The two failure modes are kept distinct on purpose: `Parse` means the model
/// did not return JSON at all (it ignored the instructions), `Schema` means it
/// returned JSON of the wrong shape. There is no fallback extraction of a JSON
/// fragment from mixed text.
pub fn parse_test_cases(content: &str) -> Result<Vec<TestCase>, GenerateError> {
    let payload: Value =
        serde_json::from_str(content).map_err(|e| GenerateError::Parse(e.to_string()))?;

    let cases = match payload.get("test_cases") {
        Some(Value::Array(items)) if !items.is_empty() => items.clone(),
        Some(Value::Array(_)) => {
            return Err(GenerateError::Schema("'test_cases' array is empty".into()))
        }
        Some(_) => {
            return Err(GenerateError::Schema("'test_cases' is not an array".into()))
        }
        None => {
            return Err(GenerateError::Schema("'test_cases' key is missing".into()))
        }
    };

    cases
        .into_iter()
        .map(|item| {
            serde_json::from_value::<TestCase>(item)
                .map_err(|e| GenerateError::Schema(format!("malformed test case: {e}")))
        })
        .collect()
}
