use anyhow::{Context, Result};
use futures_util::future::join_all;
use lumidex_api::PokemonRecord;
use tokio::sync::OnceCell;

use crate::cache::Cache;
use crate::evolution::{EvolutionStage, flatten_chain, resolve_stage_id};
use crate::matchup::{self, Matchups, TypeRelations};
use crate::source::{CreatureSource, SpeciesSource, TypeSource};

/// The derived view of one creature: its defensive matchups and its
/// linearized evolution line.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub matchups: Matchups,
    pub evolution: Vec<EvolutionStage>,
}

/// A resolved creature record together with everything derived from it.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub pokemon: PokemonRecord,
    pub aggregation: Aggregation,
}

/// Aggregation facade over one upstream source.
///
/// Owns the session-lifetime state: the type-relation and species-id
/// caches and the lazily fetched list of standard type names. Create one
/// per session and reuse it across queries so repeat lookups stay off
/// the network.
pub struct Dex<S> {
    source: S,
    type_names: OnceCell<Vec<String>>,
    relations: Cache<TypeRelations>,
    species_ids: Cache<u32>,
}

impl<S> Dex<S>
where
    S: CreatureSource + TypeSource + SpeciesSource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            type_names: OnceCell::new(),
            relations: Cache::new(),
            species_ids: Cache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch a creature by name or numeric id and derive its full view.
    pub async fn search(&self, query: &str) -> Result<SearchResult> {
        let pokemon = self.source.fetch_pokemon(query).await?;
        let aggregation = self.aggregate(&pokemon).await?;
        Ok(SearchResult {
            pokemon,
            aggregation,
        })
    }

    /// Derive matchups and evolution for an already-resolved record.
    ///
    /// The two derivations run concurrently. Evolution failures are
    /// absorbed into an empty sequence with a logged diagnostic; a
    /// matchup failure fails the whole aggregation.
    pub async fn aggregate(&self, pokemon: &PokemonRecord) -> Result<Aggregation> {
        let types = pokemon.type_names();
        let (matchups, evolution) = tokio::join!(
            self.matchups(&types),
            self.evolution(Some(pokemon.species.url.as_str())),
        );

        let evolution = evolution.unwrap_or_else(|e| {
            tracing::warn!(species = %pokemon.species.name, error = %e, "evolution chain unavailable");
            Vec::new()
        });

        Ok(Aggregation {
            matchups: matchups?,
            evolution,
        })
    }

    /// Defensive matchups for a 1-2 type defender, partitioned for
    /// display. Type order does not affect the result.
    pub async fn matchups(&self, defender_types: &[String]) -> Result<Matchups> {
        let attackers = self.all_type_names().await?;
        let table =
            matchup::effectiveness(&self.source, &self.relations, attackers, defender_types)
                .await?;
        Ok(Matchups::from_table(table))
    }

    /// Linearized evolution line for a species reference URL. An absent
    /// reference or a species without chain data yields an empty line.
    pub async fn evolution(&self, species_url: Option<&str>) -> Result<Vec<EvolutionStage>> {
        let Some(url) = species_url else {
            return Ok(Vec::new());
        };
        let species = self
            .source
            .fetch_species(url)
            .await
            .context("fetching species record")?;
        let Some(chain_ref) = species.evolution_chain else {
            return Ok(Vec::new());
        };
        let chain = self
            .source
            .fetch_chain(&chain_ref.url)
            .await
            .context("fetching evolution chain")?;

        let line = flatten_chain(&chain.chain);
        let ids = join_all(
            line.iter()
                .map(|name| resolve_stage_id(&self.source, &self.species_ids, name)),
        )
        .await;

        Ok(line
            .into_iter()
            .zip(ids)
            .map(|(species, id)| EvolutionStage { species, id })
            .collect())
    }

    /// The standard type names, fetched once per session on first use.
    async fn all_type_names(&self) -> Result<&Vec<String>> {
        self.type_names
            .get_or_try_init(|| async {
                let index = self
                    .source
                    .fetch_type_index()
                    .await
                    .context("fetching type index")?;
                Ok(index.standard_names())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use lumidex_api::{
        ApiResource, ChainNode, ChainRecord, DamageRelations, LookupError, NamedResource,
        SpeciesRecord, Sprites, TypeIndex, TypeRecord, TypeSlot,
    };

    use super::*;

    fn named(name: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: format!("https://example.test/{name}"),
        }
    }

    fn record(name: &str, id: u32, types: &[&str]) -> PokemonRecord {
        PokemonRecord {
            id,
            name: name.to_string(),
            height: 4,
            weight: 60,
            base_experience: Some(112),
            types: types
                .iter()
                .copied()
                .enumerate()
                .map(|(i, t)| TypeSlot {
                    slot: i as u8 + 1,
                    kind: named(t),
                })
                .collect(),
            abilities: Vec::new(),
            stats: Vec::new(),
            sprites: Sprites::default(),
            species: named(name),
        }
    }

    /// Self-contained upstream: electric mice plus enough of the type
    /// universe to derive their matchups.
    struct MockApi {
        chain_missing: bool,
        species_broken: bool,
    }

    impl MockApi {
        fn new() -> Self {
            Self {
                chain_missing: false,
                species_broken: false,
            }
        }
    }

    impl CreatureSource for MockApi {
        async fn fetch_pokemon(&self, query: &str) -> Result<PokemonRecord> {
            match query {
                "pichu" | "172" => Ok(record("pichu", 172, &["electric"])),
                "pikachu" | "25" => Ok(record("pikachu", 25, &["electric"])),
                "raichu" | "26" => Ok(record("raichu", 26, &["electric"])),
                _ => Err(LookupError::UnknownPokemon(query.to_string()).into()),
            }
        }
    }

    impl TypeSource for MockApi {
        async fn fetch_type(&self, name: &str) -> Result<TypeRecord> {
            if name != "electric" {
                return Err(LookupError::UnknownType(name.to_string()).into());
            }
            Ok(TypeRecord {
                name: name.to_string(),
                damage_relations: DamageRelations {
                    double_damage_from: vec![named("ground")],
                    half_damage_from: vec![named("flying"), named("steel"), named("electric")],
                    no_damage_from: Vec::new(),
                },
            })
        }

        async fn fetch_type_index(&self) -> Result<TypeIndex> {
            Ok(TypeIndex {
                results: ["electric", "ground", "flying", "steel", "normal", "unknown"]
                    .into_iter()
                    .map(named)
                    .collect(),
            })
        }
    }

    impl SpeciesSource for MockApi {
        async fn fetch_species(&self, _url: &str) -> Result<SpeciesRecord> {
            if self.species_broken {
                return Err(anyhow!("species endpoint unreachable"));
            }
            Ok(SpeciesRecord {
                name: "pikachu".to_string(),
                evolution_chain: (!self.chain_missing).then(|| ApiResource {
                    url: "https://example.test/chain/10".to_string(),
                }),
            })
        }

        async fn fetch_chain(&self, _url: &str) -> Result<ChainRecord> {
            Ok(ChainRecord {
                chain: ChainNode {
                    species: named("pichu"),
                    evolves_to: vec![ChainNode {
                        species: named("pikachu"),
                        evolves_to: vec![ChainNode {
                            species: named("raichu"),
                            evolves_to: Vec::new(),
                        }],
                    }],
                },
            })
        }
    }

    #[tokio::test]
    async fn test_search_produces_combined_view() {
        let dex = Dex::new(MockApi::new());
        let result = dex.search("pikachu").await.unwrap();

        assert_eq!(result.pokemon.id, 25);

        let matchups = &result.aggregation.matchups;
        assert_eq!(matchups.weak.len(), 1);
        assert_eq!(matchups.weak[0].attacker, "ground");
        assert_eq!(matchups.weak[0].multiplier, 2.0);
        assert_eq!(matchups.weak[0].label(), "2×");
        assert!(matchups.immune.is_empty());

        let evolution = &result.aggregation.evolution;
        assert_eq!(
            evolution
                .iter()
                .map(|s| (s.species.as_str(), s.id))
                .collect::<Vec<_>>(),
            vec![("pichu", Some(172)), ("pikachu", Some(25)), ("raichu", Some(26))]
        );
    }

    #[tokio::test]
    async fn test_missing_chain_link_degrades_to_empty_line() {
        let dex = Dex::new(MockApi {
            chain_missing: true,
            species_broken: false,
        });
        let result = dex.search("pikachu").await.unwrap();
        assert!(result.aggregation.evolution.is_empty());
        assert!(!result.aggregation.matchups.weak.is_empty());
    }

    #[tokio::test]
    async fn test_species_failure_absorbed_at_facade() {
        let dex = Dex::new(MockApi {
            chain_missing: false,
            species_broken: true,
        });
        let result = dex.search("pikachu").await.unwrap();
        assert!(result.aggregation.evolution.is_empty());
    }

    #[tokio::test]
    async fn test_absent_species_reference_yields_empty_line() {
        let dex = Dex::new(MockApi::new());
        assert!(dex.evolution(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_matchup_failure_fails_aggregation() {
        let dex = Dex::new(MockApi::new());
        let ghost = record("gastly", 92, &["ghost"]);

        let err = dex.aggregate(&ghost).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LookupError>(),
            Some(LookupError::UnknownType(name)) if name == "ghost"
        ));
    }

    #[tokio::test]
    async fn test_unknown_query_surfaces_not_found() {
        let dex = Dex::new(MockApi::new());
        let err = dex.search("missingno").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LookupError>(),
            Some(LookupError::UnknownPokemon(q)) if q == "missingno"
        ));
    }

    #[tokio::test]
    async fn test_sentinel_types_never_enter_the_table() {
        let dex = Dex::new(MockApi::new());
        let matchups = dex.matchups(&["electric".to_string()]).await.unwrap();
        let mentions = |name: &str| {
            matchups.weak.iter().any(|m| m.attacker == name)
                || matchups.resist.iter().any(|m| m.attacker == name)
                || matchups.immune.iter().any(|m| m == name)
        };
        assert!(!mentions("unknown"));
    }

    #[tokio::test]
    async fn test_caches_are_keyed_separately() {
        // "electric" as a type name and a hypothetical species name must
        // not collide: the caches live in different instances.
        let dex = Dex::new(MockApi::new());
        dex.relations.insert(
            "electric",
            TypeRelations {
                double_from: Vec::new(),
                half_from: Vec::new(),
                none_from: Vec::new(),
            },
        );
        dex.species_ids.insert("electric", 9001);

        assert_eq!(dex.species_ids.get("electric"), Some(9001));
        assert!(dex.relations.get("electric").is_some());
    }
}
