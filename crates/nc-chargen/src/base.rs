//! Ratings every generated character gets regardless of class.
//!
//! Attributes and abilities come from the dot allocator. Backgrounds, merits
//! and flaws spend a level-dependent pool of dots one at a time. Willpower is
//! rolled for V4 characters only (V5 derives it from Composure and Resolve),
//! and Humanity starts at a fixed value for the classes that track it.

use nc_core::store::CategoryFilter;
use nc_core::{Character, GameVersion, SheetSection, Store, TraitDefinition, names};
use nc_economy::TraitValueService;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::{debug, warn};

use crate::allocate::{Allocation, allocate};
use crate::error::{ChargenError, ChargenResult};
use crate::level::{AbilityFocus, ExperienceLevel};
use crate::lookup;
use crate::report::Shortfall;
use crate::tables::{
    ABILITY_DOT_BONUS, ADVANTAGE_STARTING_DOTS, ATTRIBUTE_DOT_BONUS, ATTRIBUTE_DOTS,
    FLAW_STARTING_DOTS,
};

/// Random picks allowed per dot before giving up on a saturated pool.
const ATTEMPTS_PER_DOT: u32 = 50;

/// Ratings written by a dot-spending step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DotSpend {
    /// Traits in the order they were first picked, with their ratings.
    pub assigned: Vec<(TraitDefinition, u32)>,
    /// Set when the pool saturated before every dot was placed.
    pub shortfall: Option<Shortfall>,
}

async fn write_all<S: Store>(
    service: &TraitValueService<S>,
    character: &Character,
    ratings: &[(TraitDefinition, u32)],
) -> ChargenResult<()> {
    for (def, value) in ratings {
        service
            .assign_constant_trait(character.id, def.id, def.clamp(*value))
            .await?;
    }
    Ok(())
}

async fn section_traits<S: Store>(
    store: &S,
    character: &Character,
    section: SheetSection,
) -> ChargenResult<Vec<(nc_core::TraitCategory, Vec<TraitDefinition>)>> {
    let filter = CategoryFilter::in_section(section)
        .for_class(character.character_class)
        .for_version(character.game_version);
    let mut grouped = Vec::new();
    for category in store.find_categories(&filter).await? {
        let traits = lookup::traits_for(store, character, [category.id]).await?;
        grouped.push((category, traits));
    }
    Ok(grouped)
}

/// Allocate attribute dots across the Attributes section.
///
/// Categories are visited in random order and each takes dots from the front
/// of the shuffled allocation. Attributes left without a dot get their minimum.
pub async fn attributes<S: Store>(
    service: &TraitValueService<S>,
    rng: &mut StdRng,
    character: &Character,
    level: ExperienceLevel,
) -> ChargenResult<Allocation> {
    let allocation = allocate(rng, &ATTRIBUTE_DOTS, level, &ATTRIBUTE_DOT_BONUS, 5);
    let mut groups = section_traits(service.store(), character, SheetSection::Attributes).await?;
    groups.shuffle(rng);

    let mut dots = allocation.values.iter().copied();
    let mut ratings = Vec::new();
    for (_, traits) in groups {
        for def in traits {
            let value = dots.next().unwrap_or(def.min_value);
            ratings.push((def, value));
        }
    }
    write_all(service, character, &ratings).await?;
    debug!(character_id = %character.id, count = ratings.len(), total = allocation.total(), "rated attributes");
    Ok(allocation)
}

/// Assign ability dots: each ability `favored` names takes the largest dot
/// remaining, the rest take dots in shuffled order, and anything left over
/// sits at its minimum.
pub fn plan_abilities(
    rng: &mut StdRng,
    mut abilities: Vec<TraitDefinition>,
    dots: &[u32],
    favored: &[String],
) -> Vec<(TraitDefinition, u32)> {
    abilities.shuffle(rng);
    let mut dots = dots.to_vec();
    let mut ratings = Vec::with_capacity(abilities.len());

    for name in favored {
        let Some(pos) = abilities.iter().position(|a| names::same_name(&a.name, name)) else {
            continue;
        };
        let def = abilities.remove(pos);
        let best = dots
            .iter()
            .enumerate()
            .max_by_key(|(_, d)| **d)
            .map(|(i, _)| i);
        let value = match best {
            Some(i) => dots.remove(i),
            None => def.min_value,
        };
        ratings.push((def, value));
    }

    let mut rest = dots.into_iter();
    for def in abilities {
        let value = rest.next().unwrap_or(def.min_value);
        ratings.push((def, value));
    }
    ratings
}

/// Allocate the focus's ability dots across the Abilities section.
pub async fn abilities<S: Store>(
    service: &TraitValueService<S>,
    rng: &mut StdRng,
    character: &Character,
    level: ExperienceLevel,
    focus: AbilityFocus,
    favored: &[String],
) -> ChargenResult<Allocation> {
    let allocation = allocate(rng, focus.distribution(), level, &ABILITY_DOT_BONUS, 5);
    let abilities: Vec<TraitDefinition> =
        section_traits(service.store(), character, SheetSection::Abilities)
            .await?
            .into_iter()
            .flat_map(|(_, traits)| traits)
            .collect();
    let ratings = plan_abilities(rng, abilities, &allocation.values, favored);
    write_all(service, character, &ratings).await?;
    debug!(character_id = %character.id, %focus, count = ratings.len(), "rated abilities");
    Ok(allocation)
}

/// Roll Willpower in `range` for V4 characters. V5 characters are skipped.
pub async fn willpower<S: Store>(
    service: &TraitValueService<S>,
    rng: &mut StdRng,
    character: &Character,
    range: (u32, u32),
) -> ChargenResult<Option<u32>> {
    if character.game_version != GameVersion::V4 {
        return Ok(None);
    }
    let def = lookup::trait_named(service.store(), names::WILLPOWER).await?;
    let value = def.clamp(rng.random_range(range.0..=range.1.max(range.0)));
    service
        .assign_constant_trait(character.id, def.id, value)
        .await?;
    Ok(Some(value))
}

/// Set Humanity to `start` if the character's class tracks it.
pub async fn humanity<S: Store>(
    service: &TraitValueService<S>,
    character: &Character,
    start: u32,
) -> ChargenResult<Option<u32>> {
    let def = lookup::trait_named(service.store(), names::HUMANITY).await?;
    if !def.applies_to_class(character.character_class) {
        return Ok(None);
    }
    let value = def.clamp(start);
    service
        .assign_constant_trait(character.id, def.id, value)
        .await?;
    Ok(Some(value))
}

/// A candidate for dot spending and the parent it needs first, if any.
pub type Candidate = (TraitDefinition, Option<TraitDefinition>);

/// Spend `dots` one at a time on random candidates.
///
/// A candidate whose parent is rated below `min(parent.max_value, 2)` sends
/// the dot to the parent instead. Saturated picks are retried until the
/// attempt budget runs out; the leftover is returned as a [`Shortfall`].
pub fn spend_dots(
    rng: &mut StdRng,
    candidates: &[Candidate],
    dots: u32,
    what: &str,
) -> DotSpend {
    let mut assigned: Vec<(TraitDefinition, u32)> = Vec::new();
    let mut left = dots;
    let mut attempts = dots.saturating_mul(ATTEMPTS_PER_DOT);

    while left > 0 && attempts > 0 {
        attempts -= 1;
        let Some((picked, parent)) = candidates.choose(rng) else {
            break;
        };
        let mut target = picked;
        if let Some(parent) = parent {
            let parent_value = assigned
                .iter()
                .find(|(d, _)| d.id == parent.id)
                .map_or(0, |(_, v)| *v);
            if parent_value < parent.max_value.min(2) {
                target = parent;
            }
        }

        match assigned.iter_mut().find(|(d, _)| d.id == target.id) {
            Some((def, value)) if *value < def.max_value => *value += 1,
            Some(_) => continue,
            None if target.max_value >= 1 => assigned.push((target.clone(), 1)),
            None => continue,
        }
        left -= 1;
    }

    let shortfall = Shortfall::check(what, dots as usize, (dots - left) as usize);
    DotSpend {
        assigned,
        shortfall,
    }
}

/// Pair each trait with the parent its advantage category requires.
async fn with_parents<S: Store>(
    store: &S,
    traits: Vec<TraitDefinition>,
) -> ChargenResult<Vec<Candidate>> {
    let mut out = Vec::with_capacity(traits.len());
    for def in traits {
        let parent = match def.advantage_category_id {
            Some(id) => {
                let category = store
                    .advantage_category(id)
                    .await?
                    .ok_or_else(|| ChargenError::missing("advantage category", id))?;
                if category.requires_parent {
                    Some(lookup::trait_named(store, &category.name).await?)
                } else {
                    None
                }
            }
            None => None,
        };
        out.push((def, parent));
    }
    Ok(out)
}

/// Spend the level's advantage dots on backgrounds and merits.
pub async fn advantages<S: Store>(
    service: &TraitValueService<S>,
    rng: &mut StdRng,
    character: &Character,
    level: ExperienceLevel,
) -> ChargenResult<DotSpend> {
    let store = service.store();
    let backgrounds = lookup::category_named(store, names::BACKGROUNDS).await?;
    let merits = lookup::category_named(store, names::MERITS).await?;
    let traits = lookup::traits_for(store, character, [backgrounds.id, merits.id]).await?;
    let candidates = with_parents(store, traits).await?;

    let spend = spend_dots(rng, &candidates, ADVANTAGE_STARTING_DOTS.get(level), "advantage dots");
    if let Some(shortfall) = &spend.shortfall {
        warn!(character_id = %character.id, %shortfall, "advantage pool saturated");
    }
    write_all(service, character, &spend.assigned).await?;
    debug!(character_id = %character.id, count = spend.assigned.len(), "rated advantages");
    Ok(spend)
}

/// Spend the level's flaw dots. Flaws whose parent the character lacks are
/// not eligible.
pub async fn flaws<S: Store>(
    service: &TraitValueService<S>,
    rng: &mut StdRng,
    character: &Character,
    level: ExperienceLevel,
) -> ChargenResult<DotSpend> {
    let store = service.store();
    let category = lookup::category_named(store, names::FLAWS).await?;
    let traits = lookup::traits_for(store, character, [category.id]).await?;

    let mut eligible = Vec::with_capacity(traits.len());
    for (def, parent) in with_parents(store, traits).await? {
        if let Some(parent) = parent {
            if store.find_assignment(character.id, parent.id).await?.is_none() {
                continue;
            }
        }
        eligible.push((def, None));
    }

    let spend = spend_dots(rng, &eligible, FLAW_STARTING_DOTS.get(level), "flaw dots");
    if let Some(shortfall) = &spend.shortfall {
        warn!(character_id = %character.id, %shortfall, "flaw pool saturated");
    }
    write_all(service, character, &spend.assigned).await?;
    debug!(character_id = %character.id, count = spend.assigned.len(), "rated flaws");
    Ok(spend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_core::seed::sample_catalog;
    use nc_core::{
        AssignmentStore, CategoryId, CharacterClass, CharacterStore, MemoryStore, TraitCatalog,
        UserId,
    };
    use rand::SeedableRng;
    use std::sync::Arc;

    fn def(name: &str, max: u32) -> TraitDefinition {
        TraitDefinition::new(name, CategoryId::new(), 0, max).unwrap()
    }

    #[test]
    fn favored_abilities_take_the_best_dots() {
        let mut rng = StdRng::seed_from_u64(42);
        let abilities = vec![def("Brawl", 5), def("Occult", 5), def("Stealth", 5), def("Drive", 5)];
        let ratings = plan_abilities(&mut rng, abilities, &[1, 4, 2], &["occult".to_string()]);

        assert_eq!(ratings[0].0.name, "Occult");
        assert_eq!(ratings[0].1, 4);
        assert_eq!(ratings.len(), 4);
        let total: u32 = ratings.iter().map(|(_, v)| v).sum();
        assert_eq!(total, 7);
    }

    #[test]
    fn favored_without_dots_gets_minimum() {
        let mut rng = StdRng::seed_from_u64(42);
        let favored = ["Brawl".to_string(), "Missing".to_string()];
        let ratings = plan_abilities(&mut rng, vec![def("Brawl", 5)], &[], &favored);
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].0.name, "Brawl");
        assert_eq!(ratings[0].1, 0);
    }

    #[test]
    fn dots_are_spent_within_max() {
        let mut rng = StdRng::seed_from_u64(42);
        let candidates: Vec<Candidate> = vec![(def("Allies", 3), None), (def("Resources", 5), None)];
        let spend = spend_dots(&mut rng, &candidates, 7, "advantage dots");
        assert!(spend.shortfall.is_none());
        assert_eq!(spend.assigned.iter().map(|(_, v)| v).sum::<u32>(), 7);
        assert!(spend.assigned.iter().all(|(d, v)| *v <= d.max_value));
    }

    #[test]
    fn saturated_pool_reports_shortfall() {
        let mut rng = StdRng::seed_from_u64(42);
        let candidates: Vec<Candidate> = vec![(def("Allies", 2), None)];
        let spend = spend_dots(&mut rng, &candidates, 5, "advantage dots");
        assert_eq!(spend.assigned[0].1, 2);
        let shortfall = spend.shortfall.unwrap();
        assert_eq!((shortfall.requested, shortfall.granted), (5, 2));
    }

    #[test]
    fn parent_is_rated_first() {
        let mut rng = StdRng::seed_from_u64(42);
        let haven = def("Haven", 3);
        let candidates: Vec<Candidate> = vec![(def("Library", 3), Some(haven.clone()))];
        let spend = spend_dots(&mut rng, &candidates, 4, "advantage dots");
        assert_eq!(spend.assigned[0], (haven, 2));
        assert_eq!(spend.assigned[1].0.name, "Library");
        assert_eq!(spend.assigned[1].1, 2);
    }

    #[test]
    fn empty_pool_spends_nothing() {
        let mut rng = StdRng::seed_from_u64(42);
        let spend = spend_dots(&mut rng, &[], 2, "flaw dots");
        assert!(spend.assigned.is_empty());
        assert_eq!(spend.shortfall.unwrap().granted, 0);
    }

    async fn setup(class: CharacterClass, version: GameVersion) -> (TraitValueService<MemoryStore>, Character) {
        let store = Arc::new(MemoryStore::new(sample_catalog().unwrap()));
        let character = Character::new("Jonathan", "Harker", class, version, UserId::new());
        store.insert_character(character.clone()).await.unwrap();
        (TraitValueService::new(store), character)
    }

    async fn value_of(service: &TraitValueService<MemoryStore>, c: &Character, name: &str) -> Option<u32> {
        let def = service.store().trait_by_name(name).await.unwrap()?;
        service
            .store()
            .find_assignment(c.id, def.id)
            .await
            .unwrap()
            .map(|a| a.value)
    }

    #[tokio::test]
    async fn attributes_use_every_dot_and_derive_willpower() {
        let (service, c) = setup(CharacterClass::Mortal, GameVersion::V5).await;
        let mut rng = StdRng::seed_from_u64(42);
        let allocation = attributes(&service, &mut rng, &c, ExperienceLevel::Intermediate).await.unwrap();
        assert_eq!(allocation.total(), 27);

        let assigned = service.store().assignments_for_character(c.id).await.unwrap();
        // nine attributes plus the derived willpower
        assert_eq!(assigned.len(), 10);
        let composure = value_of(&service, &c, "Composure").await.unwrap();
        let resolve = value_of(&service, &c, "Resolve").await.unwrap();
        assert_eq!(value_of(&service, &c, "Willpower").await, Some(composure + resolve));
    }

    #[tokio::test]
    async fn abilities_follow_focus() {
        let (service, c) = setup(CharacterClass::Mortal, GameVersion::V5).await;
        let mut rng = StdRng::seed_from_u64(42);
        let favored = vec!["Occult".to_string()];
        let allocation = abilities(&service, &mut rng, &c, ExperienceLevel::New, AbilityFocus::Specialist, &favored)
            .await
            .unwrap();
        assert_eq!(allocation.total(), 22);
        assert_eq!(value_of(&service, &c, "Occult").await, Some(4));

        let assigned = service.store().assignments_for_character(c.id).await.unwrap();
        assert_eq!(assigned.len(), 27);
        assert_eq!(assigned.iter().map(|a| a.value).sum::<u32>(), 22);
    }

    #[tokio::test]
    async fn willpower_is_rolled_for_v4_only() {
        let (service, v5) = setup(CharacterClass::Mortal, GameVersion::V5).await;
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(willpower(&service, &mut rng, &v5, (3, 7)).await.unwrap(), None);

        let (service, v4) = setup(CharacterClass::Mortal, GameVersion::V4).await;
        let rolled = willpower(&service, &mut rng, &v4, (3, 7)).await.unwrap().unwrap();
        assert!((3..=7).contains(&rolled));
        assert_eq!(value_of(&service, &v4, "Willpower").await, Some(rolled));
    }

    #[tokio::test]
    async fn humanity_depends_on_class() {
        let (service, vampire) = setup(CharacterClass::Vampire, GameVersion::V5).await;
        assert_eq!(humanity(&service, &vampire, 7).await.unwrap(), Some(7));
        let (service, werewolf) = setup(CharacterClass::Werewolf, GameVersion::V5).await;
        assert_eq!(humanity(&service, &werewolf, 7).await.unwrap(), None);
    }

    #[tokio::test]
    async fn advantages_and_flaws_spend_level_dots() {
        let (service, c) = setup(CharacterClass::Mortal, GameVersion::V5).await;
        let mut rng = StdRng::seed_from_u64(42);
        let level = ExperienceLevel::Advanced;

        let spend = advantages(&service, &mut rng, &c, level).await.unwrap();
        assert!(spend.shortfall.is_none());
        let total: u32 = spend.assigned.iter().map(|(_, v)| v).sum();
        assert_eq!(total, ADVANTAGE_STARTING_DOTS.get(level));

        // a haven merit is only rated once the haven itself has two dots
        let haven = service.store().trait_by_name("Haven").await.unwrap().unwrap();
        let has_haven_merit = spend
            .assigned
            .iter()
            .any(|(d, _)| d.advantage_category_id.is_some());
        if has_haven_merit {
            assert!(value_of(&service, &c, &haven.name).await.unwrap() >= 2);
        }

        let haven_rated = value_of(&service, &c, &haven.name).await.is_some();
        let spend = flaws(&service, &mut rng, &c, level).await.unwrap();
        let total: u32 = spend.assigned.iter().map(|(_, v)| v).sum();
        assert_eq!(total, FLAW_STARTING_DOTS.get(level));
        if !haven_rated {
            assert!(spend.assigned.iter().all(|(d, _)| d.advantage_category_id.is_none()));
        }
    }
}
