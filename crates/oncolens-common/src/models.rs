//! Prediction models offered by the remote service.

use serde::{Deserialize, Serialize};

/// UI choice of model. Serialises to the backend key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelSelection {
    #[default]
    #[serde(rename = "rf")]
    RandomForest,
    #[serde(rename = "dt")]
    DecisionTree,
    #[serde(rename = "svc")]
    Svc,
}

impl ModelSelection {
    /// Radio-button order.
    pub const ALL: [ModelSelection; 3] = [
        ModelSelection::RandomForest,
        ModelSelection::DecisionTree,
        ModelSelection::Svc,
    ];

    /// Opaque identifier the service expects in `"model"`.
    pub fn key(&self) -> &'static str {
        match self {
            ModelSelection::RandomForest => "rf",
            ModelSelection::DecisionTree => "dt",
            ModelSelection::Svc          => "svc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelSelection::RandomForest => "Random Forest",
            ModelSelection::DecisionTree => "Decision Tree",
            ModelSelection::Svc          => "SVC",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_keys() {
        let keys: Vec<&str> = ModelSelection::ALL.iter().map(|m| m.key()).collect();
        assert_eq!(keys, vec!["rf", "dt", "svc"]);
    }

    #[test]
    fn test_from_key_round_trips_every_model() {
        for m in ModelSelection::ALL {
            assert_eq!(ModelSelection::from_key(m.key()), Some(m));
        }
        assert_eq!(ModelSelection::from_key("knn"), None);
    }

    #[test]
    fn test_serde_uses_backend_key() {
        assert_eq!(serde_json::to_string(&ModelSelection::Svc).unwrap(), "\"svc\"");
        let m: ModelSelection = serde_json::from_str("\"dt\"").unwrap();
        assert_eq!(m, ModelSelection::DecisionTree);
    }

    #[test]
    fn test_default_is_random_forest() {
        assert_eq!(ModelSelection::default(), ModelSelection::RandomForest);
    }
}
