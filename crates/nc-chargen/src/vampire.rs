//! Clan, bane and disciplines for vampires; disciplines alone for ghouls.

use nc_core::{Character, CharacterClass, ClanId, Store, TraitDefinition};
use nc_core::model::VampireClan;
use nc_economy::TraitValueService;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::error::{ChargenError, ChargenResult};
use crate::level::ExperienceLevel;
use crate::lookup;
use crate::sample::CandidatePool;
use crate::tables::{DISCIPLINE_MEAN, EXTRA_DISCIPLINES};

/// What the vampire step wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct VampireOutcome {
    /// Clan the disciplines came from.
    pub clan: VampireClan,
    /// Disciplines and the ratings they were given.
    pub disciplines: Vec<(TraitDefinition, u32)>,
}

/// One of the clan's banes, picked at random when it has both.
pub fn choose_bane(rng: &mut StdRng, clan: &VampireClan) -> Option<String> {
    match (&clan.bane, &clan.variant_bane) {
        (Some(base), Some(variant)) => {
            if rng.random_bool(0.5) {
                Some(base.clone())
            } else {
                Some(variant.clone())
            }
        }
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (None, None) => None,
    }
}

/// Apply the experience cap or bonus to a raw rating and clamp to `[1, max_value]`.
///
/// New characters cap at 2 and intermediate ones at 3; advanced and elite
/// characters get one extra dot.
pub fn adjust_for_level(level: ExperienceLevel, raw: i64, max_value: u32) -> u32 {
    let value = match level {
        ExperienceLevel::New => raw.min(2),
        ExperienceLevel::Intermediate => raw.min(3),
        ExperienceLevel::Advanced | ExperienceLevel::Elite => raw.saturating_add(1),
    };
    value.min(i64::from(max_value)).max(1) as u32
}

/// Draw `count` ratings from the level's normal distribution.
pub fn roll_discipline_values(
    rng: &mut StdRng,
    level: ExperienceLevel,
    stdev: f64,
    max_values: &[u32],
) -> ChargenResult<Vec<u32>> {
    let normal = Normal::new(DISCIPLINE_MEAN.get(level), stdev)
        .map_err(|e| ChargenError::validation("discipline_stdev", e.to_string()))?;
    Ok(max_values
        .iter()
        .map(|max| adjust_for_level(level, normal.sample(rng) as i64, *max))
        .collect())
}

/// Pick a clan: the requested one, else a random active clan.
async fn resolve_clan<S: Store>(
    store: &S,
    rng: &mut StdRng,
    requested: Option<ClanId>,
) -> ChargenResult<VampireClan> {
    if let Some(id) = requested {
        return store
            .clan(id)
            .await?
            .ok_or_else(|| ChargenError::missing("vampire clan", id));
    }
    let active: Vec<VampireClan> = store
        .clans()
        .await?
        .into_iter()
        .filter(|c| !c.is_archived)
        .collect();
    active
        .choose(rng)
        .cloned()
        .ok_or_else(|| ChargenError::missing("vampire clan", "any active clan"))
}

/// Generate clan and disciplines for vampires and ghouls; `None` for other classes.
///
/// Only vampires get the clan written into their bundle. The discipline set
/// is the clan's own plus extra disciplines drawn from the rest of the
/// Disciplines category.
pub async fn generate<S: Store>(
    service: &TraitValueService<S>,
    rng: &mut StdRng,
    character: &mut Character,
    level: ExperienceLevel,
    clan_id: Option<ClanId>,
    stdev: f64,
) -> ChargenResult<Option<VampireOutcome>> {
    let class = character.character_class;
    if !matches!(class, CharacterClass::Vampire | CharacterClass::Ghoul) {
        return Ok(None);
    }
    let store = service.store();
    let clan = resolve_clan(store, rng, clan_id).await?;

    if class == CharacterClass::Vampire {
        let attrs = &mut character.vampire_attributes;
        attrs.clan_id = Some(clan.id);
        attrs.clan_name = Some(clan.name.clone());
        attrs.bane = choose_bane(rng, &clan);
        attrs.compulsion = clan.compulsion.clone();
        *character = store.update_character(character).await?;
        debug!(character_id = %character.id, clan = %clan.name, "assigned clan");
    }

    let mut disciplines = Vec::with_capacity(clan.discipline_ids.len());
    for id in &clan.discipline_ids {
        let def = store
            .trait_by_id(*id)
            .await?
            .ok_or_else(|| ChargenError::missing("discipline", id))?;
        disciplines.push(def);
    }

    let category = lookup::category_named(store, nc_core::names::DISCIPLINES).await?;
    let mut pool: CandidatePool<TraitDefinition> =
        lookup::traits_for(store, character, [category.id])
            .await?
            .into_iter()
            .filter(|d| !clan.discipline_ids.contains(&d.id))
            .collect();
    disciplines.extend(pool.draw_up_to(rng, EXTRA_DISCIPLINES.get(level)));

    let maxima: Vec<u32> = disciplines.iter().map(|d| d.max_value).collect();
    let values = roll_discipline_values(rng, level, stdev, &maxima)?;

    let mut rated = Vec::with_capacity(disciplines.len());
    for (def, value) in disciplines.into_iter().zip(values) {
        let value = def.clamp(value);
        service
            .assign_constant_trait(character.id, def.id, value)
            .await?;
        rated.push((def, value));
    }
    debug!(character_id = %character.id, count = rated.len(), "rated disciplines");

    Ok(Some(VampireOutcome {
        clan,
        disciplines: rated,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_core::seed::sample_catalog;
    use nc_core::{AssignmentStore, CharacterStore, GameVersion, MemoryStore, TraitCatalog, UserId};
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn bane_prefers_whatever_exists() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut clan = VampireClan::new("Test");
        assert_eq!(choose_bane(&mut rng, &clan), None);
        clan.variant_bane = Some("variant".into());
        assert_eq!(choose_bane(&mut rng, &clan).as_deref(), Some("variant"));
        clan.bane = Some("base".into());
        let picks: Vec<_> = (0..40).filter_map(|_| choose_bane(&mut rng, &clan)).collect();
        assert!(picks.iter().any(|b| b == "base"));
        assert!(picks.iter().any(|b| b == "variant"));
    }

    #[test]
    fn level_rule() {
        assert_eq!(adjust_for_level(ExperienceLevel::New, 4, 5), 2);
        assert_eq!(adjust_for_level(ExperienceLevel::Intermediate, 4, 5), 3);
        assert_eq!(adjust_for_level(ExperienceLevel::Advanced, 4, 5), 5);
        assert_eq!(adjust_for_level(ExperienceLevel::Elite, 5, 5), 5);
        assert_eq!(adjust_for_level(ExperienceLevel::New, -3, 5), 1);
        assert_eq!(adjust_for_level(ExperienceLevel::Elite, 0, 5), 1);
    }

    #[test]
    fn rolled_values_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for level in ExperienceLevel::ALL {
            let values = roll_discipline_values(&mut rng, level, 2.0, &[5; 50]).unwrap();
            assert!(values.iter().all(|v| (1..=5).contains(v)));
            if level == ExperienceLevel::New {
                assert!(values.iter().all(|v| *v <= 2));
            }
        }
    }

    #[test]
    fn negative_stdev_is_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = roll_discipline_values(&mut rng, ExperienceLevel::New, -1.0, &[5]).unwrap_err();
        assert!(matches!(err, ChargenError::Validation { field: "discipline_stdev", .. }));
    }

    async fn setup(class: CharacterClass) -> (TraitValueService<MemoryStore>, Character) {
        let store = Arc::new(MemoryStore::new(sample_catalog().unwrap()));
        let character = Character::new("Mina", "Murray", class, GameVersion::V5, UserId::new());
        store.insert_character(character.clone()).await.unwrap();
        (TraitValueService::new(store), character)
    }

    #[tokio::test]
    async fn vampire_gets_clan_and_disciplines() {
        let (service, mut character) = setup(CharacterClass::Vampire).await;
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = generate(&service, &mut rng, &mut character, ExperienceLevel::Elite, None, 2.0)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.disciplines.len(), 3 + EXTRA_DISCIPLINES.get(ExperienceLevel::Elite));
        let mut ids: Vec<_> = outcome.disciplines.iter().map(|(d, _)| d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), outcome.disciplines.len());

        let stored = service.store().character(character.id).await.unwrap().unwrap();
        assert_eq!(stored.vampire_attributes.clan_id, Some(outcome.clan.id));
        assert!(stored.vampire_attributes.bane.is_some());
        let assigned = service.store().assignments_for_character(character.id).await.unwrap();
        assert_eq!(assigned.len(), outcome.disciplines.len());
    }

    #[tokio::test]
    async fn requested_clan_is_used() {
        let (service, mut character) = setup(CharacterClass::Vampire).await;
        let clan = service.store().clans().await.unwrap()[2].clone();
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = generate(&service, &mut rng, &mut character, ExperienceLevel::New, Some(clan.id), 2.0)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.clan.id, clan.id);
        assert!(outcome.disciplines.iter().all(|(_, v)| (1..=2).contains(v)));
    }

    #[tokio::test]
    async fn ghoul_gets_disciplines_without_clan() {
        let (service, mut character) = setup(CharacterClass::Ghoul).await;
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = generate(&service, &mut rng, &mut character, ExperienceLevel::New, None, 2.0)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.disciplines.len(), 3);
        assert_eq!(character.vampire_attributes.clan_id, None);
    }

    #[tokio::test]
    async fn other_classes_are_skipped() {
        let (service, mut character) = setup(CharacterClass::Mortal).await;
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = generate(&service, &mut rng, &mut character, ExperienceLevel::New, None, 2.0)
            .await
            .unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn unknown_clan_is_fatal() {
        let (service, mut character) = setup(CharacterClass::Vampire).await;
        let mut rng = StdRng::seed_from_u64(42);
        let err = generate(&service, &mut rng, &mut character, ExperienceLevel::New, Some(ClanId::new()), 2.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ChargenError::MissingReference { kind: "vampire clan", .. }));
    }
}
