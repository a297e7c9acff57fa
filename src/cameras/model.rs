use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SpypointError};

/// one entry from the vendor's camera model catalog. reference data, not
/// tied to any camera on the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraModel {
    pub name: String,
    pub icon_url: String,
    pub variants: Vec<String>,
}

/// parse the `/camera/models` response body
pub fn models_from_json(body: &Value) -> Result<Vec<CameraModel>> {
    let entries = body
        .as_array()
        .ok_or_else(|| SpypointError::InvalidResponse("expected a camera model array".to_string()))?;
    entries.iter().map(model_from_json).collect()
}

fn model_from_json(data: &Value) -> Result<CameraModel> {
    let name = data
        .get("name")
        .and_then(Value::as_str)
        .ok_or(SpypointError::MissingField("name"))?;

    Ok(CameraModel {
        name: name.to_string(),
        icon_url: data
            .get("iconUrl")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        variants: data
            .get("variants")
            .and_then(Value::as_array)
            .map(|variants| {
                variants
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_the_model_catalog() {
        let models = models_from_json(&json!([
            {"name": "CELL-LINK", "iconUrl": "https://icons/CELL-LINK.png", "variants": ["CELL-LINK-V"]},
            {"name": "FLEX", "iconUrl": "https://icons/FLEX.png", "variants": []},
        ]))
        .unwrap();

        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "CELL-LINK");
        assert_eq!(models[0].icon_url, "https://icons/CELL-LINK.png");
        assert_eq!(models[0].variants, vec!["CELL-LINK-V"]);
        assert_eq!(models[1].variants, Vec::<String>::new());
    }

    #[test]
    fn variants_and_icon_default_when_missing() {
        let models = models_from_json(&json!([{"name": "FLEX"}])).unwrap();

        assert_eq!(models[0].icon_url, "");
        assert_eq!(models[0].variants, Vec::<String>::new());
    }

    #[test]
    fn a_model_without_a_name_is_an_error() {
        let err = models_from_json(&json!([{"iconUrl": "https://icons/x.png"}])).unwrap_err();
        assert!(matches!(err, SpypointError::MissingField("name")));
    }
}
