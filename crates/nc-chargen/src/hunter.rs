//! Creed, edges and perks for hunters.

use nc_core::model::{HunterEdge, HunterEdgeAssignment};
use nc_core::{Character, CharacterClass, EdgeId, HunterCreed, PerkId, Store};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::{debug, warn};

use crate::error::ChargenResult;
use crate::level::ExperienceLevel;
use crate::report::Shortfall;
use crate::sample::CandidatePool;
use crate::tables::{EXTRA_HUNTER_EDGES, EXTRA_HUNTER_PERKS};

/// A hunter bundle ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct HunterPlan {
    /// Chosen creed.
    pub creed: HunterCreed,
    /// Edges with the perks picked under each.
    pub edges: Vec<HunterEdgeAssignment>,
    /// Edges or perks that could not be supplied in full.
    pub shortfalls: Vec<Shortfall>,
}

impl HunterPlan {
    /// Perks across every edge.
    pub fn perk_count(&self) -> usize {
        self.edges.iter().map(|e| e.perk_ids.len()).sum()
    }
}

/// Plan a hunter: a random creed, either 2 edges and 1 perk or 1 edge and
/// 2 perks, plus the level's extras.
///
/// Perks come from shuffling every (edge, perk) pair of the chosen edges and
/// taking the first N, so the full count is reached whenever enough perks
/// exist. Anything less is reported as a [`Shortfall`].
pub fn plan_hunter(rng: &mut StdRng, catalog_edges: &[HunterEdge], level: ExperienceLevel) -> HunterPlan {
    let creed = *HunterCreed::ALL
        .choose(rng)
        .unwrap_or(&HunterCreed::Entrepreneurial);
    let (base_edges, base_perks) = *[(2, 1), (1, 2)].choose(rng).unwrap_or(&(2, 1));
    let edge_count = base_edges + EXTRA_HUNTER_EDGES.get(level);
    let perk_count = base_perks + EXTRA_HUNTER_PERKS.get(level);

    let mut pool: CandidatePool<&HunterEdge> =
        catalog_edges.iter().filter(|e| !e.is_archived).collect();
    let selected = pool.draw_up_to(rng, edge_count);

    let mut pairs: Vec<(EdgeId, PerkId)> = selected
        .iter()
        .flat_map(|e| e.perk_ids.iter().map(|p| (e.id, *p)))
        .collect();
    pairs.shuffle(rng);
    pairs.truncate(perk_count);

    let edges = selected
        .iter()
        .map(|edge| HunterEdgeAssignment {
            edge_id: edge.id,
            perk_ids: pairs
                .iter()
                .filter(|(e, _)| *e == edge.id)
                .map(|(_, p)| *p)
                .collect(),
        })
        .collect();

    let shortfalls = Shortfall::check("edges", edge_count, selected.len())
        .into_iter()
        .chain(Shortfall::check("perks", perk_count, pairs.len()))
        .collect();

    HunterPlan {
        creed,
        edges,
        shortfalls,
    }
}

/// Plan and write the hunter bundle; `None` for other classes.
pub async fn generate<S: Store>(
    store: &S,
    rng: &mut StdRng,
    character: &mut Character,
    level: ExperienceLevel,
) -> ChargenResult<Option<HunterPlan>> {
    if character.character_class != CharacterClass::Hunter {
        return Ok(None);
    }
    let plan = plan_hunter(rng, &store.edges().await?, level);
    for shortfall in &plan.shortfalls {
        warn!(character_id = %character.id, %shortfall, "hunter specials under-delivered");
    }

    character.hunter_attributes.creed = Some(plan.creed);
    character.hunter_attributes.edges = plan.edges.clone();
    *character = store.update_character(character).await?;
    debug!(
        character_id = %character.id,
        creed = %plan.creed,
        edges = plan.edges.len(),
        perks = plan.perk_count(),
        "assigned hunter specials"
    );
    Ok(Some(plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_core::seed::sample_catalog;
    use nc_core::{CharacterStore, GameVersion, MemoryStore, UserId};
    use rand::SeedableRng;

    #[test]
    fn baseline_counts_at_new() {
        let catalog = sample_catalog().unwrap();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = plan_hunter(&mut rng, &catalog.edges, ExperienceLevel::New);
            assert!(plan.shortfalls.is_empty());
            assert_eq!(plan.edges.len() + plan.perk_count(), 3);
        }
    }

    #[test]
    fn perks_belong_to_their_edges() {
        let catalog = sample_catalog().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let plan = plan_hunter(&mut rng, &catalog.edges, ExperienceLevel::Elite);
        for assignment in &plan.edges {
            let edge = catalog.edges.iter().find(|e| e.id == assignment.edge_id).unwrap();
            assert!(assignment.perk_ids.iter().all(|p| edge.perk_ids.contains(p)));
        }
        let mut perks: Vec<_> = plan.edges.iter().flat_map(|e| e.perk_ids.clone()).collect();
        let before = perks.len();
        perks.sort();
        perks.dedup();
        assert_eq!(perks.len(), before);
    }

    #[test]
    fn perk_shortfall_is_reported() {
        let mut edge = HunterEdge::new("Lonely");
        edge.perk_ids.push(PerkId::new());
        let mut rng = StdRng::seed_from_u64(42);
        let plan = plan_hunter(&mut rng, &[edge], ExperienceLevel::Elite);

        assert_eq!(plan.edges.len(), 1);
        assert_eq!(plan.perk_count(), 1);
        let perks = plan.shortfalls.iter().find(|s| s.what == "perks").unwrap();
        assert_eq!(perks.granted, 1);
        assert!(perks.requested > 1);
        assert!(plan.shortfalls.iter().any(|s| s.what == "edges"));
    }

    #[test]
    fn archived_edges_are_skipped() {
        let mut archived = HunterEdge::new("Old");
        archived.is_archived = true;
        let mut rng = StdRng::seed_from_u64(42);
        let plan = plan_hunter(&mut rng, &[archived], ExperienceLevel::New);
        assert!(plan.edges.is_empty());
        assert_eq!(plan.shortfalls.len(), 2);
    }

    #[tokio::test]
    async fn writes_bundle_for_hunters_only() {
        let store = MemoryStore::new(sample_catalog().unwrap());
        let mut hunter = Character::new("Van", "Helsing", CharacterClass::Hunter, GameVersion::V5, UserId::new());
        store.insert_character(hunter.clone()).await.unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let plan = generate(&store, &mut rng, &mut hunter, ExperienceLevel::Advanced)
            .await
            .unwrap()
            .unwrap();
        let stored = store.character(hunter.id).await.unwrap().unwrap();
        assert_eq!(stored.hunter_attributes.creed, Some(plan.creed));
        assert_eq!(stored.hunter_attributes.edges, plan.edges);
        let extras = EXTRA_HUNTER_EDGES.get(ExperienceLevel::Advanced)
            + EXTRA_HUNTER_PERKS.get(ExperienceLevel::Advanced);
        assert_eq!(plan.edges.len() + plan.perk_count(), 3 + extras);

        let mut mortal = Character::new("A", "B", CharacterClass::Mortal, GameVersion::V5, UserId::new());
        assert!(generate(&store, &mut rng, &mut mortal, ExperienceLevel::New).await.unwrap().is_none());
    }
}
