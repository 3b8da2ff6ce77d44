//! Random character names, unique among stored characters.

use nc_core::Store;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::error::{ChargenError, ChargenResult};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alistair", "Anneliese", "Beatrix", "Casimir", "Cordelia", "Dorian", "Elena",
    "Emeric", "Fiona", "Gideon", "Greta", "Hector", "Ilse", "Ivo", "Josephine", "Julian",
    "Katarina", "Lazlo", "Lucinda", "Magnus", "Marisol", "Nikolai", "Octavia", "Oskar",
    "Perpetua", "Quentin", "Rosalind", "Sebastian", "Selene", "Tobias", "Ursula", "Valentin",
    "Vivienne", "Wendell", "Yolanda", "Zachariah", "Zora",
];

const LAST_NAMES: &[&str] = &[
    "Abernathy", "Blackwood", "Carrow", "Delacroix", "Esterhazy", "Fairweather", "Grimaldi",
    "Harrowgate", "Ivanova", "Jaeger", "Kessler", "Lindqvist", "Moreau", "Nightingale",
    "Okonkwo", "Pendragon", "Quiller", "Ravenscroft", "Saltonstall", "Thorne", "Underhill",
    "Valdez", "Whitlock", "Xanthos", "Yamamoto", "Zelenko",
];

/// A random first and last name.
pub fn random_name(rng: &mut StdRng) -> (String, String) {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Nameless");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Stranger");
    (first.to_string(), last.to_string())
}

/// A name no stored character uses, trying at most `attempts` times.
pub async fn unique_name<S: Store + ?Sized>(
    store: &S,
    rng: &mut StdRng,
    attempts: u32,
) -> ChargenResult<(String, String)> {
    for attempt in 1..=attempts {
        let (first, last) = random_name(rng);
        if !store.name_taken(&first, &last).await? {
            debug!(attempt, first = %first, last = %last, "picked name");
            return Ok((first, last));
        }
    }
    Err(ChargenError::NamesExhausted { attempts })
}
