//! Evolution chain flattening and per-stage identifier resolution.

use lumidex_api::ChainNode;

use crate::cache::Cache;
use crate::source::CreatureSource;

/// One step of a linearized evolution line. The identifier is absent
/// when the stage's species has no resolvable creature record.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionStage {
    pub species: String,
    pub id: Option<u32>,
}

/// Walk the branching chain into one linear line of species names.
///
/// At every node only the first declared branch is followed; siblings
/// are dropped. This keeps split evolutions (Eevee and friends) down to
/// a single displayable path, chosen deterministically by declaration
/// order rather than by any property of the branches.
pub fn flatten_chain(root: &ChainNode) -> Vec<String> {
    let mut line = Vec::new();
    let mut node = root;
    loop {
        line.push(node.species.name.clone());
        match node.evolves_to.first() {
            Some(next) => node = next,
            None => break,
        }
    }
    line
}

/// Resolve a species name to its numeric identifier, memoized per name.
/// A failed lookup is logged and yields `None` without caching, so the
/// sequence keeps its stage and a later query may still succeed.
pub async fn resolve_stage_id<S: CreatureSource>(
    source: &S,
    cache: &Cache<u32>,
    species: &str,
) -> Option<u32> {
    match cache
        .get_or_fetch(species, || async {
            Ok(source.fetch_pokemon(species).await?.id)
        })
        .await
    {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(species, error = %e, "could not resolve species id");
            None
        }
    }
}
