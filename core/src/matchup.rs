//! Defensive type matchups derived from live damage-relation data.

use std::collections::HashMap;

use anyhow::Result;
use futures_util::future::join_all;
use lumidex_api::TypeRecord;

use crate::cache::Cache;
use crate::source::TypeSource;

/// Attacking types grouped by how one defending type takes damage.
/// The three sets are disjoint; any type in none of them hits neutral.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRelations {
    pub double_from: Vec<String>,
    pub half_from: Vec<String>,
    pub none_from: Vec<String>,
}

impl TypeRelations {
    /// Flatten a wire record down to the attacker name sets.
    fn from_record(record: &TypeRecord) -> Self {
        let names = |list: &[lumidex_api::NamedResource]| -> Vec<String> {
            list.iter().map(|r| r.name.clone()).collect()
        };
        Self {
            double_from: names(&record.damage_relations.double_damage_from),
            half_from: names(&record.damage_relations.half_damage_from),
            none_from: names(&record.damage_relations.no_damage_from),
        }
    }
}

/// Fetch and normalize the damage relations for one type, memoized per
/// type name. A miss in the upstream type data propagates as an error.
pub async fn resolve_relations<S: TypeSource>(
    source: &S,
    cache: &Cache<TypeRelations>,
    name: &str,
) -> Result<TypeRelations> {
    cache
        .get_or_fetch(name, || async {
            let record = source.fetch_type(name).await?;
            Ok(TypeRelations::from_record(&record))
        })
        .await
}

/// Combined defensive multiplier for every attacking type, in attacker
/// listing order. Each of the defender's types contributes one factor
/// from {0, 0.5, 1, 2}; the product lands in {0, 0.25, 0.5, 1, 2, 4}.
///
/// The per-type relation fetches run concurrently; the result does not
/// depend on their completion order.
pub async fn effectiveness<S: TypeSource>(
    source: &S,
    cache: &Cache<TypeRelations>,
    attackers: &[String],
    defender_types: &[String],
) -> Result<Vec<(String, f32)>> {
    let fetched = join_all(
        defender_types
            .iter()
            .map(|t| resolve_relations(source, cache, t)),
    )
    .await;

    let mut table: HashMap<&str, f32> = attackers.iter().map(|n| (n.as_str(), 1.0)).collect();
    for relations in fetched {
        let relations = relations?;
        for name in &relations.double_from {
            if let Some(m) = table.get_mut(name.as_str()) {
                *m *= 2.0;
            }
        }
        for name in &relations.half_from {
            if let Some(m) = table.get_mut(name.as_str()) {
                *m *= 0.5;
            }
        }
        for name in &relations.none_from {
            if let Some(m) = table.get_mut(name.as_str()) {
                *m *= 0.0;
            }
        }
    }

    Ok(attackers
        .iter()
        .map(|n| (n.clone(), table[n.as_str()]))
        .collect())
}

/// One attacking type and its combined multiplier against the defender.
#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub attacker: String,
    pub multiplier: f32,
}

impl Matchup {
    /// Display annotation for the multiplier. The numeric value stays
    /// canonical; never parse this back.
    pub fn label(&self) -> &'static str {
        if self.multiplier >= 4.0 {
            "4×"
        } else if self.multiplier > 1.0 {
            "2×"
        } else if self.multiplier <= 0.25 {
            "¼×"
        } else {
            "½×"
        }
    }
}

/// The effectiveness table partitioned for display. Neutral (1×) types
/// appear in none of the three lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matchups {
    pub weak: Vec<Matchup>,
    pub resist: Vec<Matchup>,
    pub immune: Vec<String>,
}

impl Matchups {
    pub fn from_table(table: Vec<(String, f32)>) -> Self {
        let mut matchups = Self::default();
        for (attacker, multiplier) in table {
            if multiplier == 0.0 {
                matchups.immune.push(attacker);
            } else if multiplier > 1.0 {
                matchups.weak.push(Matchup {
                    attacker,
                    multiplier,
                });
            } else if multiplier < 1.0 {
                matchups.resist.push(Matchup {
                    attacker,
                    multiplier,
                });
            }
        }
        matchups
    }
}
