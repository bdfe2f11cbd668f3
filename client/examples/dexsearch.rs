//! Terminal Pokédex card: identity, stats, matchups, evolution line.
//!
//! Usage: `cargo run --example dexsearch -- pikachu`
//! With no argument a random creature is looked up.

use std::env;
use std::process;

use anyhow::Result;
use lumidex_client::PokeApiClient;
use lumidex_core::SearchResult;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let query = env::args().nth(1).unwrap_or_else(PokeApiClient::random_query);

    let dex = PokeApiClient::new().into_dex();
    match dex.search(&query).await {
        Ok(result) => print_card(&result),
        Err(e) => {
            eprintln!("Lookup failed for '{query}': {e:#}");
            eprintln!("Try names like pikachu or charizard, or an id like 25.");
            process::exit(1);
        }
    }

    Ok(())
}

fn print_card(result: &SearchResult) {
    let p = &result.pokemon;

    println!("┌─ {} #{}", cap(&p.name), p.id);
    println!("│  types: {}", p.type_names().join(" / "));
    println!(
        "│  height: {:.1} m   weight: {:.1} kg   base xp: {}",
        p.height as f32 / 10.0,
        p.weight as f32 / 10.0,
        p.base_experience
            .map_or_else(|| "—".to_string(), |xp| xp.to_string())
    );
    if let Some(url) = p.artwork() {
        println!("│  art: {url}");
    }

    println!("│");
    println!("│  abilities:");
    let mut abilities = p.abilities.clone();
    abilities.sort_by_key(|a| a.is_hidden);
    for a in &abilities {
        let hidden = if a.is_hidden { " (hidden)" } else { "" };
        println!("│   • {}{hidden}", a.ability.name.replace('-', " "));
    }

    println!("│");
    println!("│  stats:");
    for s in &p.stats {
        println!(
            "│   {:>4} {} {}",
            stat_label(&s.stat.name),
            bar(s.base_stat),
            s.base_stat
        );
    }

    println!("│");
    let m = &result.aggregation.matchups;
    println!("│  weak to:    {}", annotated(&m.weak));
    println!("│  resists:    {}", annotated(&m.resist));
    println!(
        "│  immune to:  {}",
        if m.immune.is_empty() {
            "—".to_string()
        } else {
            m.immune.join(", ")
        }
    );

    println!("│");
    let line = result
        .aggregation
        .evolution
        .iter()
        .map(|stage| match stage.id {
            Some(id) => format!("{} [{}]", cap(&stage.species), PokeApiClient::sprite_url(id)),
            None => cap(&stage.species),
        })
        .collect::<Vec<_>>()
        .join(" ➜ ");
    if line.is_empty() {
        println!("│  evolution:  (unavailable)");
    } else {
        println!("│  evolution:  {line}");
    }
    println!("└─");
}

fn annotated(matchups: &[lumidex_core::Matchup]) -> String {
    if matchups.is_empty() {
        return "—".to_string();
    }
    matchups
        .iter()
        .map(|m| format!("{} ({})", m.attacker, m.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn cap(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().to_string() + &chars.as_str().replace('-', " "),
        None => String::new(),
    }
}

fn stat_label(name: &str) -> String {
    match name {
        "hp" => "HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SpA".to_string(),
        "special-defense" => "SpD".to_string(),
        "speed" => "SPD".to_string(),
        other => cap(other),
    }
}

/// 20-cell bar scaled against a 200 base-stat ceiling.
fn bar(value: u32) -> String {
    let filled = (value.min(200) as usize * 20).div_ceil(200);
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}
