//! Seams to the three upstream data sources. Implemented over the live
//! API by `lumidex-client` and by in-memory mocks in tests.

use anyhow::Result;
use lumidex_api::{ChainRecord, PokemonRecord, SpeciesRecord, TypeIndex, TypeRecord};

/// Source of full creature records, keyed by name or numeric id.
pub trait CreatureSource {
    async fn fetch_pokemon(&self, query: &str) -> Result<PokemonRecord>;
}

/// Source of elemental type data.
pub trait TypeSource {
    /// Damage relations for one type. Fails with
    /// [`LookupError::UnknownType`](lumidex_api::LookupError) when the
    /// source has no record for the name.
    async fn fetch_type(&self, name: &str) -> Result<TypeRecord>;

    /// The full type listing.
    async fn fetch_type_index(&self) -> Result<TypeIndex>;
}

/// Source of species records and evolution chains, keyed by the URLs
/// the API embeds in its records.
pub trait SpeciesSource {
    async fn fetch_species(&self, url: &str) -> Result<SpeciesRecord>;

    async fn fetch_chain(&self, url: &str) -> Result<ChainRecord>;
}
