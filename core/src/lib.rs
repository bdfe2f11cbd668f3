mod cache;
mod dex;
mod evolution;
mod matchup;
mod source;

pub use lumidex_api::{ChainNode, LookupError, PokemonRecord};

pub use cache::Cache;
pub use dex::{Aggregation, Dex, SearchResult};
pub use evolution::{EvolutionStage, flatten_chain};
pub use matchup::{Matchup, Matchups, TypeRelations};
pub use source::{CreatureSource, SpeciesSource, TypeSource};
