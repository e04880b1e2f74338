//! The three response shapes: success, missing inputs, error.

use serde::{Deserialize, Serialize};

use pf_solver::SolveResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolveResponse {
    Success { data: SolveResult },
    MissingInputs { data: MissingInputs },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingInputs {
    pub missing_inputs: Vec<String>,
}

impl SolveResponse {
    pub fn success(data: SolveResult) -> Self {
        Self::Success { data }
    }

    pub fn missing(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::MissingInputs {
            data: MissingInputs {
                missing_inputs: fields.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_field_tags_each_shape() {
        let v = serde_json::to_value(SolveResponse::missing(["Q", "h_a"])).unwrap();
        assert_eq!(v["status"], "missing_inputs");
        assert_eq!(v["data"]["missing_inputs"][0], "Q");

        let v = serde_json::to_value(SolveResponse::error("boom")).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["message"], "boom");

        let v =
            serde_json::to_value(SolveResponse::success(SolveResult::at_rest("gravity", &[])))
                .unwrap();
        assert_eq!(v["status"], "success");
        assert_eq!(v["data"]["mode"], "gravity");
    }
}
