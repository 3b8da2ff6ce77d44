//! Add and remove class specials: hunter edges and perks, werewolf gifts and rites.
//!
//! Every operation is idempotent. Adding something already present, or
//! removing something absent, returns the character unchanged without a write.

use std::sync::Arc;

use nc_core::model::HunterEdgeAssignment;
use nc_core::{Character, CharacterId, EdgeId, GiftId, PerkId, RiteId, Store};
use tracing::debug;

use crate::error::{EconomyError, EconomyResult};

/// Mutates the hunter and werewolf bundles of stored characters.
pub struct SpecialsService<S> {
    store: Arc<S>,
}

impl<S: Store> SpecialsService<S> {
    /// Create a service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn load(&self, character_id: CharacterId) -> EconomyResult<Character> {
        self.store
            .character(character_id)
            .await?
            .ok_or_else(|| EconomyError::missing("character", character_id))
    }

    async fn save(&self, character: &Character) -> EconomyResult<Character> {
        Ok(self.store.update_character(character).await?)
    }

    /// Add a hunter edge.
    pub async fn add_edge(
        &self,
        character_id: CharacterId,
        edge_id: EdgeId,
    ) -> EconomyResult<Character> {
        if self.store.edge(edge_id).await?.is_none() {
            return Err(EconomyError::validation("edge_id", format!("no edge {edge_id}")));
        }
        let mut character = self.load(character_id).await?;
        if character.hunter_attributes.edge(edge_id).is_some() {
            return Ok(character);
        }
        character
            .hunter_attributes
            .edges
            .push(HunterEdgeAssignment::new(edge_id));
        debug!(%character_id, %edge_id, "added edge");
        self.save(&character).await
    }

    /// Remove a hunter edge and its perks.
    pub async fn remove_edge(
        &self,
        character_id: CharacterId,
        edge_id: EdgeId,
    ) -> EconomyResult<Character> {
        let mut character = self.load(character_id).await?;
        let edges = &mut character.hunter_attributes.edges;
        let before = edges.len();
        edges.retain(|e| e.edge_id != edge_id);
        if edges.len() == before {
            return Ok(character);
        }
        debug!(%character_id, %edge_id, "removed edge");
        self.save(&character).await
    }

    /// Add a perk under `edge_id`, adding the edge first if needed.
    ///
    /// Fails if the perk does not belong to the edge.
    pub async fn add_perk(
        &self,
        character_id: CharacterId,
        edge_id: EdgeId,
        perk_id: PerkId,
    ) -> EconomyResult<Character> {
        self.check_perk_on_edge(edge_id, perk_id).await?;
        let mut character = self.add_edge(character_id, edge_id).await?;
        let Some(entry) = character
            .hunter_attributes
            .edges
            .iter_mut()
            .find(|e| e.edge_id == edge_id)
        else {
            return Err(EconomyError::missing("edge on character", edge_id));
        };
        if entry.perk_ids.contains(&perk_id) {
            return Ok(character);
        }
        entry.perk_ids.push(perk_id);
        debug!(%character_id, %edge_id, %perk_id, "added perk");
        self.save(&character).await
    }

    /// Remove a perk from `edge_id`. Fails if the perk does not belong to the edge.
    pub async fn remove_perk(
        &self,
        character_id: CharacterId,
        edge_id: EdgeId,
        perk_id: PerkId,
    ) -> EconomyResult<Character> {
        self.check_perk_on_edge(edge_id, perk_id).await?;
        let mut character = self.load(character_id).await?;
        let Some(entry) = character
            .hunter_attributes
            .edges
            .iter_mut()
            .find(|e| e.edge_id == edge_id)
        else {
            return Ok(character);
        };
        let before = entry.perk_ids.len();
        entry.perk_ids.retain(|p| *p != perk_id);
        if entry.perk_ids.len() == before {
            return Ok(character);
        }
        debug!(%character_id, %edge_id, %perk_id, "removed perk");
        self.save(&character).await
    }

    async fn check_perk_on_edge(&self, edge_id: EdgeId, perk_id: PerkId) -> EconomyResult<()> {
        let perk = self
            .store
            .perk(perk_id)
            .await?
            .ok_or_else(|| EconomyError::validation("perk_id", format!("no perk {perk_id}")))?;
        if perk.edge_id != edge_id {
            return Err(EconomyError::validation("perk_id", "Perk not found on edge"));
        }
        Ok(())
    }

    /// Add a werewolf gift.
    pub async fn add_gift(
        &self,
        character_id: CharacterId,
        gift_id: GiftId,
    ) -> EconomyResult<Character> {
        let mut character = self.load(character_id).await?;
        let gifts = &mut character.werewolf_attributes.gift_ids;
        if gifts.contains(&gift_id) {
            return Ok(character);
        }
        gifts.push(gift_id);
        debug!(%character_id, %gift_id, "added gift");
        self.save(&character).await
    }

    /// Remove a werewolf gift.
    pub async fn remove_gift(
        &self,
        character_id: CharacterId,
        gift_id: GiftId,
    ) -> EconomyResult<Character> {
        let mut character = self.load(character_id).await?;
        let gifts = &mut character.werewolf_attributes.gift_ids;
        if !gifts.contains(&gift_id) {
            return Ok(character);
        }
        gifts.retain(|g| *g != gift_id);
        debug!(%character_id, %gift_id, "removed gift");
        self.save(&character).await
    }

    /// Add a werewolf rite.
    pub async fn add_rite(
        &self,
        character_id: CharacterId,
        rite_id: RiteId,
    ) -> EconomyResult<Character> {
        let mut character = self.load(character_id).await?;
        let rites = &mut character.werewolf_attributes.rite_ids;
        if rites.contains(&rite_id) {
            return Ok(character);
        }
        rites.push(rite_id);
        debug!(%character_id, %rite_id, "added rite");
        self.save(&character).await
    }

    /// Remove a werewolf rite.
    pub async fn remove_rite(
        &self,
        character_id: CharacterId,
        rite_id: RiteId,
    ) -> EconomyResult<Character> {
        let mut character = self.load(character_id).await?;
        let rites = &mut character.werewolf_attributes.rite_ids;
        if !rites.contains(&rite_id) {
            return Ok(character);
        }
        rites.retain(|r| *r != rite_id);
        debug!(%character_id, %rite_id, "removed rite");
        self.save(&character).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_core::seed::sample_catalog;
    use nc_core::{Catalog, CharacterClass, CharacterStore, GameVersion, MemoryStore, UserId};

    async fn setup(class: CharacterClass) -> (SpecialsService<MemoryStore>, Catalog, Character) {
        let catalog = sample_catalog().unwrap();
        let store = Arc::new(MemoryStore::new(catalog.clone()));
        let character = Character::new("Van", "Helsing", class, GameVersion::V5, UserId::new());
        store.insert_character(character.clone()).await.unwrap();
        (SpecialsService::new(store), catalog, character)
    }

    #[tokio::test]
    async fn add_edge_is_idempotent() {
        let (svc, catalog, c) = setup(CharacterClass::Hunter).await;
        let edge = catalog.edges[0].id;
        let once = svc.add_edge(c.id, edge).await.unwrap();
        let twice = svc.add_edge(c.id, edge).await.unwrap();
        assert_eq!(twice.hunter_attributes.edges.len(), 1);
        assert_eq!(once.version, twice.version);
    }

    #[tokio::test]
    async fn perk_adds_its_edge_and_must_belong_to_it() {
        let (svc, catalog, c) = setup(CharacterClass::Hunter).await;
        let edge = &catalog.edges[0];
        let perk = edge.perk_ids[0];

        let updated = svc.add_perk(c.id, edge.id, perk).await.unwrap();
        assert_eq!(updated.hunter_attributes.perk_count(), 1);
        let again = svc.add_perk(c.id, edge.id, perk).await.unwrap();
        assert_eq!(again.hunter_attributes.perk_count(), 1);

        let foreign = catalog.edges[1].perk_ids[0];
        let err = svc.add_perk(c.id, edge.id, foreign).await.unwrap_err();
        assert!(matches!(err, EconomyError::Validation { field: "perk_id", .. }));
    }

    #[tokio::test]
    async fn remove_perk_then_edge() {
        let (svc, catalog, c) = setup(CharacterClass::Hunter).await;
        let edge = &catalog.edges[2];
        svc.add_perk(c.id, edge.id, edge.perk_ids[0]).await.unwrap();
        svc.add_perk(c.id, edge.id, edge.perk_ids[1]).await.unwrap();

        let after = svc.remove_perk(c.id, edge.id, edge.perk_ids[0]).await.unwrap();
        assert_eq!(after.hunter_attributes.perk_count(), 1);

        let after = svc.remove_edge(c.id, edge.id).await.unwrap();
        assert!(after.hunter_attributes.edges.is_empty());
        let again = svc.remove_edge(c.id, edge.id).await.unwrap();
        assert_eq!(after.version, again.version);
    }

    #[tokio::test]
    async fn gifts_and_rites_are_idempotent() {
        let (svc, catalog, c) = setup(CharacterClass::Werewolf).await;
        let gift = catalog.gifts[0].id;
        let rite = catalog.rites[0].id;

        svc.add_gift(c.id, gift).await.unwrap();
        let c2 = svc.add_gift(c.id, gift).await.unwrap();
        assert_eq!(c2.werewolf_attributes.gift_ids, vec![gift]);

        svc.add_rite(c.id, rite).await.unwrap();
        let c3 = svc.add_rite(c.id, rite).await.unwrap();
        assert_eq!(c3.werewolf_attributes.rite_ids, vec![rite]);

        svc.remove_gift(c.id, gift).await.unwrap();
        let c4 = svc.remove_gift(c.id, gift).await.unwrap();
        assert!(c4.werewolf_attributes.gift_ids.is_empty());

        let c5 = svc.remove_rite(c.id, rite).await.unwrap();
        assert!(c5.werewolf_attributes.rite_ids.is_empty());
    }

    #[tokio::test]
    async fn unknown_edge_is_rejected() {
        let (svc, _, c) = setup(CharacterClass::Hunter).await;
        let err = svc.add_edge(c.id, EdgeId::new()).await.unwrap_err();
        assert!(matches!(err, EconomyError::Validation { field: "edge_id", .. }));
    }
}
