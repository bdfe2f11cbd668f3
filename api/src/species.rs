//! The `/pokemon-species/{id}` record and the evolution chain tree.

use serde::Deserialize;

use crate::{ApiResource, NamedResource};

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    /// Absent for species with no chain data.
    pub evolution_chain: Option<ApiResource>,
}

/// The `/evolution-chain/{id}` envelope around the root node.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainRecord {
    pub chain: ChainNode,
}

/// One node of the branching evolution tree. Read-only input to the
/// flattener; `evolves_to` lists branches in API declaration order.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainNode {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainNode>,
}
