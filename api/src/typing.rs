//! The `/type/{name}` record and the `/type` index.

use serde::Deserialize;

use crate::NamedResource;

/// One elemental type's damage relations. Only the `*_damage_from`
/// direction matters for defensive matchups; the `*_damage_to` lists
/// upstream are dropped at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    pub damage_relations: DamageRelations,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_from: Vec<NamedResource>,
}

/// The paginated `/type` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeIndex {
    pub results: Vec<NamedResource>,
}

/// Placeholder entries the API lists alongside the real types.
const SENTINEL_TYPES: [&str; 2] = ["shadow", "unknown"];

impl TypeIndex {
    /// All standard type names in listing order, sentinels excluded.
    pub fn standard_names(&self) -> Vec<String> {
        self.results
            .iter()
            .map(|r| r.name.clone())
            .filter(|n| !SENTINEL_TYPES.contains(&n.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relations_deserialize() {
        let record: TypeRecord = serde_json::from_str(
            r#"{
                "name": "electric",
                "damage_relations": {
                    "double_damage_from": [{"name": "ground", "url": "u"}],
                    "half_damage_from": [
                        {"name": "flying", "url": "u"},
                        {"name": "steel", "url": "u"},
                        {"name": "electric", "url": "u"}
                    ],
                    "no_damage_from": [],
                    "double_damage_to": [{"name": "water", "url": "u"}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(record.damage_relations.double_damage_from[0].name, "ground");
        assert_eq!(record.damage_relations.half_damage_from.len(), 3);
        assert!(record.damage_relations.no_damage_from.is_empty());
    }

    #[test]
    fn test_standard_names_filters_sentinels() {
        let index: TypeIndex = serde_json::from_str(
            r#"{
                "results": [
                    {"name": "normal", "url": "u"},
                    {"name": "fire", "url": "u"},
                    {"name": "unknown", "url": "u"},
                    {"name": "shadow", "url": "u"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(index.standard_names(), vec!["normal", "fire"]);
    }
}
