//! Interaction model: a logged touchpoint (call, meeting, message) with an entity.

use super::common::IdRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Interaction {
    pub id: String,
    pub entity_id: String,
    pub interaction_type: String,
    pub occurred_at: String,
}

/// Request body for `POST /interactions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionInput {
    pub entity: IdRef,
    pub interaction_type: String,
    pub occurred_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_roundtrip_shapes() {
        let input = InteractionInput {
            entity: IdRef::new("per_1"),
            interaction_type: "meeting".to_string(),
            occurred_at: "2026-01-15T09:00:00Z".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({
                "entity": {"id": "per_1"},
                "interactionType": "meeting",
                "occurredAt": "2026-01-15T09:00:00Z"
            })
        );

        let json = r#"{"id": "int_1", "entityId": "per_1", "interactionType": "meeting", "occurredAt": "2026-01-15T09:00:00Z"}"#;
        let interaction: Interaction = serde_json::from_str(json).unwrap();
        assert_eq!(interaction.entity_id, "per_1");
        assert_eq!(interaction.interaction_type, "meeting");
    }
}
