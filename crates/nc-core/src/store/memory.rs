//! In-memory [`Store`](super::Store) backed by a tokio `RwLock`.
//!
//! Catalog collections keep insertion order so that seeded generation
//! against the same catalog picks the same documents.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    AssignmentStore, CategoryFilter, CharacterStore, TraitCatalog, TraitFilter, WalletStore,
};
use crate::error::{CoreError, CoreResult};
use crate::id::{
    AdvantageCategoryId, AssignmentId, AuspiceId, CampaignId, CategoryId, CharacterId, ClanId,
    ConceptId, EdgeId, PerkId, TraitId, TribeId, UserId,
};
use crate::model::{
    AdvantageCategory, CampaignExperience, Catalog, Character, CharacterConcept, CharacterTrait,
    HunterEdge, HunterEdgePerk, TraitCategory, TraitDefinition, VampireClan, WerewolfAuspice,
    WerewolfGift, WerewolfRite, WerewolfTribe,
};
use crate::names::same_name;

#[derive(Default)]
struct Tables {
    catalog: Catalog,
    characters: HashMap<CharacterId, Character>,
    assignments: Vec<CharacterTrait>,
    wallets: HashMap<(UserId, CampaignId), CampaignExperience>,
}

/// A [`Store`](super::Store) holding everything in process memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a store seeded with `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            tables: RwLock::new(Tables {
                catalog,
                ..Tables::default()
            }),
        }
    }

    /// Snapshot of the catalog, including custom traits added since.
    pub async fn catalog(&self) -> Catalog {
        self.tables.read().await.catalog.clone()
    }

    /// Every stored character.
    pub async fn characters(&self) -> Vec<Character> {
        self.tables.read().await.characters.values().cloned().collect()
    }
}

fn active<T: Clone>(items: &[T], archived: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|i| !archived(i)).cloned().collect()
}

#[async_trait]
impl TraitCatalog for MemoryStore {
    async fn trait_by_id(&self, id: TraitId) -> CoreResult<Option<TraitDefinition>> {
        let t = self.tables.read().await;
        Ok(t.catalog.traits.iter().find(|d| d.id == id).cloned())
    }

    async fn trait_by_name(&self, name: &str) -> CoreResult<Option<TraitDefinition>> {
        let t = self.tables.read().await;
        Ok(t
            .catalog
            .traits
            .iter()
            .find(|d| !d.is_custom && same_name(&d.name, name))
            .cloned())
    }

    async fn find_traits(&self, filter: &TraitFilter) -> CoreResult<Vec<TraitDefinition>> {
        let t = self.tables.read().await;
        Ok(t
            .catalog
            .traits
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn insert_trait(&self, def: TraitDefinition) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        if t.catalog.traits.iter().any(|d| d.id == def.id) {
            return Err(CoreError::Duplicate {
                kind: "trait",
                id: def.id.to_string(),
            });
        }
        t.catalog.traits.push(def);
        Ok(())
    }

    async fn category_by_id(&self, id: CategoryId) -> CoreResult<Option<TraitCategory>> {
        let t = self.tables.read().await;
        Ok(t.catalog.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn category_by_name(&self, name: &str) -> CoreResult<Option<TraitCategory>> {
        Ok(self.tables.read().await.catalog.category_named(name).cloned())
    }

    async fn find_categories(&self, filter: &CategoryFilter) -> CoreResult<Vec<TraitCategory>> {
        let t = self.tables.read().await;
        Ok(t
            .catalog
            .categories
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn advantage_category(
        &self,
        id: AdvantageCategoryId,
    ) -> CoreResult<Option<AdvantageCategory>> {
        let t = self.tables.read().await;
        Ok(t
            .catalog
            .advantage_categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn clan(&self, id: ClanId) -> CoreResult<Option<VampireClan>> {
        let t = self.tables.read().await;
        Ok(t.catalog.clans.iter().find(|c| c.id == id).cloned())
    }

    async fn clans(&self) -> CoreResult<Vec<VampireClan>> {
        Ok(active(&self.tables.read().await.catalog.clans, |c| c.is_archived))
    }

    async fn tribe(&self, id: TribeId) -> CoreResult<Option<WerewolfTribe>> {
        let t = self.tables.read().await;
        Ok(t.catalog.tribes.iter().find(|x| x.id == id).cloned())
    }

    async fn tribes(&self) -> CoreResult<Vec<WerewolfTribe>> {
        Ok(active(&self.tables.read().await.catalog.tribes, |x| x.is_archived))
    }

    async fn auspice(&self, id: AuspiceId) -> CoreResult<Option<WerewolfAuspice>> {
        let t = self.tables.read().await;
        Ok(t.catalog.auspices.iter().find(|x| x.id == id).cloned())
    }

    async fn auspices(&self) -> CoreResult<Vec<WerewolfAuspice>> {
        Ok(active(&self.tables.read().await.catalog.auspices, |x| x.is_archived))
    }

    async fn gifts(&self) -> CoreResult<Vec<WerewolfGift>> {
        Ok(active(&self.tables.read().await.catalog.gifts, |x| x.is_archived))
    }

    async fn rites(&self) -> CoreResult<Vec<WerewolfRite>> {
        Ok(active(&self.tables.read().await.catalog.rites, |x| x.is_archived))
    }

    async fn edge(&self, id: EdgeId) -> CoreResult<Option<HunterEdge>> {
        let t = self.tables.read().await;
        Ok(t.catalog.edges.iter().find(|x| x.id == id).cloned())
    }

    async fn edges(&self) -> CoreResult<Vec<HunterEdge>> {
        Ok(active(&self.tables.read().await.catalog.edges, |x| x.is_archived))
    }

    async fn perk(&self, id: PerkId) -> CoreResult<Option<HunterEdgePerk>> {
        let t = self.tables.read().await;
        Ok(t.catalog.perks.iter().find(|x| x.id == id).cloned())
    }

    async fn concept(&self, id: ConceptId) -> CoreResult<Option<CharacterConcept>> {
        let t = self.tables.read().await;
        Ok(t.catalog.concepts.iter().find(|x| x.id == id).cloned())
    }

    async fn concepts(&self) -> CoreResult<Vec<CharacterConcept>> {
        Ok(active(&self.tables.read().await.catalog.concepts, |x| x.is_archived))
    }
}

#[async_trait]
impl CharacterStore for MemoryStore {
    async fn character(&self, id: CharacterId) -> CoreResult<Option<Character>> {
        Ok(self.tables.read().await.characters.get(&id).cloned())
    }

    async fn insert_character(&self, character: Character) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        if t.characters.contains_key(&character.id) {
            return Err(CoreError::Duplicate {
                kind: "character",
                id: character.id.to_string(),
            });
        }
        t.characters.insert(character.id, character);
        Ok(())
    }

    async fn update_character(&self, character: &Character) -> CoreResult<Character> {
        let mut t = self.tables.write().await;
        let stored = t
            .characters
            .get_mut(&character.id)
            .ok_or_else(|| CoreError::not_found("character", character.id))?;
        if stored.version != character.version {
            return Err(CoreError::StaleWrite {
                kind: "character",
                id: character.id.to_string(),
                expected: character.version,
                found: stored.version,
            });
        }
        *stored = character.clone();
        stored.version += 1;
        Ok(stored.clone())
    }

    async fn name_taken(&self, first: &str, last: &str) -> CoreResult<bool> {
        let t = self.tables.read().await;
        Ok(t
            .characters
            .values()
            .any(|c| c.name_first == first && c.name_last == last))
    }
}

#[async_trait]
impl AssignmentStore for MemoryStore {
    async fn assignment(&self, id: AssignmentId) -> CoreResult<Option<CharacterTrait>> {
        let t = self.tables.read().await;
        Ok(t.assignments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_assignment(
        &self,
        character_id: CharacterId,
        trait_id: TraitId,
    ) -> CoreResult<Option<CharacterTrait>> {
        let t = self.tables.read().await;
        Ok(t
            .assignments
            .iter()
            .find(|a| a.character_id == character_id && a.trait_id == trait_id)
            .cloned())
    }

    async fn assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> CoreResult<Vec<CharacterTrait>> {
        let t = self.tables.read().await;
        Ok(t
            .assignments
            .iter()
            .filter(|a| a.character_id == character_id)
            .cloned()
            .collect())
    }

    async fn insert_assignment(&self, assignment: CharacterTrait) -> CoreResult<CharacterTrait> {
        let mut t = self.tables.write().await;
        if t.assignments.iter().any(|a| {
            a.id == assignment.id
                || (a.character_id == assignment.character_id
                    && a.trait_id == assignment.trait_id)
        }) {
            return Err(CoreError::Duplicate {
                kind: "character trait",
                id: format!("{}/{}", assignment.character_id, assignment.trait_id),
            });
        }
        t.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn update_assignment(&self, assignment: &CharacterTrait) -> CoreResult<CharacterTrait> {
        let mut t = self.tables.write().await;
        let stored = t
            .assignments
            .iter_mut()
            .find(|a| a.id == assignment.id)
            .ok_or_else(|| CoreError::not_found("character trait", assignment.id))?;
        if stored.version != assignment.version {
            return Err(CoreError::StaleWrite {
                kind: "character trait",
                id: assignment.id.to_string(),
                expected: assignment.version,
                found: stored.version,
            });
        }
        *stored = assignment.clone();
        stored.version += 1;
        Ok(stored.clone())
    }

    async fn delete_assignment(&self, id: AssignmentId) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        let before = t.assignments.len();
        t.assignments.retain(|a| a.id != id);
        if t.assignments.len() == before {
            return Err(CoreError::not_found("character trait", id));
        }
        Ok(())
    }
}

#[async_trait]
impl WalletStore for MemoryStore {
    async fn wallet(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
    ) -> CoreResult<Option<CampaignExperience>> {
        let t = self.tables.read().await;
        Ok(t.wallets.get(&(user_id, campaign_id)).cloned())
    }

    async fn save_wallet(&self, wallet: &CampaignExperience) -> CoreResult<CampaignExperience> {
        let mut t = self.tables.write().await;
        let key = (wallet.user_id, wallet.campaign_id);
        let found = t.wallets.get(&key).map_or(0, |w| w.version);
        if found != wallet.version {
            return Err(CoreError::StaleWrite {
                kind: "campaign experience",
                id: format!("{}/{}", wallet.user_id, wallet.campaign_id),
                expected: wallet.version,
                found,
            });
        }
        let mut saved = wallet.clone();
        saved.version += 1;
        t.wallets.insert(key, saved.clone());
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CharacterClass, GameVersion, SheetSection};

    fn store_with_strength() -> (MemoryStore, TraitDefinition) {
        let cat = TraitCategory::new("Physical", SheetSection::Attributes);
        let def = TraitDefinition::new("Strength", cat.id, 1, 5).unwrap();
        let catalog = Catalog {
            categories: vec![cat],
            traits: vec![def.clone()],
            ..Catalog::default()
        };
        (MemoryStore::new(catalog), def)
    }

    #[tokio::test]
    async fn trait_lookup_by_name_ignores_case() {
        let (store, def) = store_with_strength();
        let found = store.trait_by_name("STRENGTH").await.unwrap().unwrap();
        assert_eq!(found.id, def.id);
        assert!(store.trait_by_name("Dexterity").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn assignment_pair_is_unique() {
        let (store, def) = store_with_strength();
        let character = CharacterId::new();
        store
            .insert_assignment(CharacterTrait::new(character, def.id, 2))
            .await
            .unwrap();
        let err = store
            .insert_assignment(CharacterTrait::new(character, def.id, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn assignment_update_is_compare_and_swap() {
        let (store, def) = store_with_strength();
        let saved = store
            .insert_assignment(CharacterTrait::new(CharacterId::new(), def.id, 2))
            .await
            .unwrap();

        let mut first = saved.clone();
        first.value = 3;
        let updated = store.update_assignment(&first).await.unwrap();
        assert_eq!(updated.version, 1);

        let mut stale = saved;
        stale.value = 4;
        let err = store.update_assignment(&stale).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::StaleWrite {
                expected: 0,
                found: 1,
                ..
            }
        ));
        let current = store.assignment(updated.id).await.unwrap().unwrap();
        assert_eq!(current.value, 3);
    }

    #[tokio::test]
    async fn wallet_insert_then_stale_save() {
        let store = MemoryStore::default();
        let wallet = CampaignExperience::new(UserId::new(), CampaignId::new()).with_xp(10, 10);
        let saved = store.save_wallet(&wallet).await.unwrap();
        assert_eq!(saved.version, 1);
        assert!(store.save_wallet(&wallet).await.is_err());
        let again = store.save_wallet(&saved).await.unwrap();
        assert_eq!(again.version, 2);
    }

    #[tokio::test]
    async fn character_update_bumps_version_and_name_taken() {
        let store = MemoryStore::default();
        let c = Character::new("Ada", "Byron", CharacterClass::Mortal, GameVersion::V5, UserId::new());
        store.insert_character(c.clone()).await.unwrap();
        assert!(store.name_taken("Ada", "Byron").await.unwrap());
        assert!(!store.name_taken("Ada", "King").await.unwrap());

        let updated = store.update_character(&c).await.unwrap();
        assert_eq!(updated.version, 1);
        assert!(store.update_character(&c).await.is_err());
    }

    #[tokio::test]
    async fn delete_missing_assignment_is_not_found() {
        let store = MemoryStore::default();
        let err = store.delete_assignment(AssignmentId::new()).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
