use serde::Deserialize;
use thiserror::Error;

pub mod pokemon;
pub mod species;
pub mod typing;

pub use pokemon::{AbilitySlot, PokemonRecord, Sprites, StatSlot, TypeSlot};
pub use species::{ChainNode, ChainRecord, SpeciesRecord};
pub use typing::{DamageRelations, TypeIndex, TypeRecord};

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("no type record for '{0}'")]
    UnknownType(String),

    #[error("no pokemon matching '{0}'")]
    UnknownPokemon(String),
}

/// A `{ name, url }` reference object, PokeAPI's universal cross-link shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// A bare `{ url }` reference, used where PokeAPI omits the name
/// (e.g. a species' `evolution_chain` link).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResource {
    pub url: String,
}
