//! The trait value economy service.
//!
//! Every mutation guards the new value against the trait's bounds, writes
//! the assignment with a compare-and-swap on its version, and then runs the
//! derived-stat hook. Paid changes write the payment first (wallet or
//! starting points) and reverse it if the trait write is rejected. Once
//! both writes commit, a failing derived-stat hook is logged and the saved
//! assignment is still returned.

use std::collections::BTreeMap;
use std::sync::Arc;

use nc_core::names::same_name;
use nc_core::{
    AssignmentId, CampaignId, CategoryId, Character, CharacterId, CharacterTrait, CoreError, Store,
    TraitDefinition, TraitId, UserId,
};
use tracing::{debug, info, warn};

use crate::cost;
use crate::derived::{self, Recomputed};
use crate::error::{EconomyError, EconomyResult};
use crate::guard;
use crate::wallet::ExperienceLedger;

/// A character-scoped trait to create.
///
/// Zero or absent costs inherit from the parent category.
#[derive(Debug, Clone)]
pub struct CustomTraitRequest {
    /// Display name; must not collide with a trait the character already has.
    pub name: String,
    /// Parent category.
    pub category_id: CategoryId,
    /// Lowest legal rating.
    pub min_value: u32,
    /// Highest legal rating.
    pub max_value: u32,
    /// Cost override for the 0 -> 1 step.
    pub initial_cost: Option<u32>,
    /// Cost override for later steps.
    pub upgrade_cost: Option<u32>,
    /// Starting rating; defaults to `min_value`.
    pub value: Option<u32>,
}

impl CustomTraitRequest {
    /// A 0..=5 trait in `category_id` with inherited costs.
    pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            category_id,
            min_value: 0,
            max_value: 5,
            initial_cost: None,
            upgrade_cost: None,
            value: None,
        }
    }

    /// Set the rating bounds.
    pub fn with_bounds(mut self, min_value: u32, max_value: u32) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    /// Override the costs.
    pub fn with_costs(mut self, initial_cost: u32, upgrade_cost: u32) -> Self {
        self.initial_cost = Some(initial_cost);
        self.upgrade_cost = Some(upgrade_cost);
        self
    }

    /// Set the starting rating.
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }
}

/// Guards, mutates and recomputes trait values for one store.
pub struct TraitValueService<S> {
    store: Arc<S>,
}

impl<S> Clone for TraitValueService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> TraitValueService<S> {
    /// Create a service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn definition(&self, trait_id: TraitId) -> EconomyResult<TraitDefinition> {
        self.store
            .trait_by_id(trait_id)
            .await?
            .ok_or_else(|| EconomyError::missing("trait", trait_id))
    }

    async fn character(&self, character_id: CharacterId) -> EconomyResult<Character> {
        self.store
            .character(character_id)
            .await?
            .ok_or_else(|| EconomyError::missing("character", character_id))
    }

    /// Check that `assignment` can be raised by `amount`; returns the new value.
    pub async fn guard_increase(
        &self,
        assignment: &CharacterTrait,
        amount: u32,
    ) -> EconomyResult<u32> {
        let def = self.definition(assignment.trait_id).await?;
        guard::guard_increase(&def, assignment.value, amount)
    }

    /// Check that `assignment` can be lowered by `amount`; returns the new value.
    pub async fn guard_decrease(
        &self,
        assignment: &CharacterTrait,
        amount: u32,
    ) -> EconomyResult<u32> {
        let def = self.definition(assignment.trait_id).await?;
        guard::guard_decrease(&def, assignment.value, amount)
    }

    /// Set a character's rating in a trait, creating the assignment if needed.
    ///
    /// Idempotent: repeated calls leave exactly one assignment holding the
    /// latest value. The value is bounds-checked on both paths.
    pub async fn assign_constant_trait(
        &self,
        character_id: CharacterId,
        trait_id: TraitId,
        value: u32,
    ) -> EconomyResult<CharacterTrait> {
        let def = self.definition(trait_id).await?;
        guard::guard_value(&def, value)?;

        let saved = match self.store.find_assignment(character_id, trait_id).await? {
            Some(mut existing) => {
                existing.value = value;
                self.store.update_assignment(&existing).await?
            }
            None => {
                self.store
                    .insert_assignment(CharacterTrait::new(character_id, trait_id, value))
                    .await?
            }
        };
        debug!(%character_id, name = %def.name, value, "assigned trait");
        self.after_save(&saved).await?;
        Ok(saved)
    }

    /// Create a trait that only `character_id` can use, and assign it.
    pub async fn create_custom_trait(
        &self,
        character_id: CharacterId,
        request: CustomTraitRequest,
    ) -> EconomyResult<CharacterTrait> {
        if request.name.trim().is_empty() {
            return Err(EconomyError::validation("name", "must not be empty"));
        }
        let character = self.character(character_id).await?;

        for assignment in self.store.assignments_for_character(character.id).await? {
            let def = self.definition(assignment.trait_id).await?;
            if same_name(&def.name, &request.name) {
                return Err(EconomyError::Conflict(format!(
                    "trait named '{}' already exists on character",
                    request.name
                )));
            }
        }

        let category = self
            .store
            .category_by_id(request.category_id)
            .await?
            .ok_or_else(|| {
                EconomyError::validation(
                    "category_id",
                    format!("no category {}", request.category_id),
                )
            })?;

        let initial_cost = request
            .initial_cost
            .filter(|c| *c > 0)
            .unwrap_or(category.initial_cost);
        let upgrade_cost = request
            .upgrade_cost
            .filter(|c| *c > 0)
            .unwrap_or(category.upgrade_cost);

        let mut def = TraitDefinition::new(
            request.name.trim(),
            category.id,
            request.min_value,
            request.max_value,
        )
        .map_err(|e| EconomyError::validation("min_value", e.to_string()))?
        .with_costs(initial_cost, upgrade_cost)
        .for_classes(&category.character_classes)
        .for_versions(&category.game_versions);
        def.is_custom = true;
        def.custom_for_character_id = Some(character.id);

        let value = request.value.unwrap_or(def.min_value);
        guard::guard_value(&def, value)?;
        cost::check_cost_range(&def)?;

        self.store.insert_trait(def.clone()).await?;
        let saved = self
            .store
            .insert_assignment(CharacterTrait::new(character.id, def.id, value))
            .await?;
        info!(character_id = %character.id, name = %def.name, value, "created custom trait");
        self.after_save(&saved).await?;
        Ok(saved)
    }

    /// Raise a rating without payment.
    pub async fn increase(
        &self,
        assignment: &CharacterTrait,
        amount: u32,
    ) -> EconomyResult<CharacterTrait> {
        let value = self.guard_increase(assignment, amount).await?;
        self.write_value(assignment, value).await
    }

    /// Lower a rating without refund.
    pub async fn decrease(
        &self,
        assignment: &CharacterTrait,
        amount: u32,
    ) -> EconomyResult<CharacterTrait> {
        let value = self.guard_decrease(assignment, amount).await?;
        self.write_value(assignment, value).await
    }

    /// Raise a rating, paying from the player's campaign XP.
    ///
    /// Fails with [`EconomyError::NotEnoughXp`] before any write if the
    /// wallet cannot cover the cost.
    pub async fn purchase_with_xp(
        &self,
        assignment: &CharacterTrait,
        amount: u32,
    ) -> EconomyResult<CharacterTrait> {
        let def = self.definition(assignment.trait_id).await?;
        let value = guard::guard_increase(&def, assignment.value, amount)?;
        let cost = cost::upgrade_cost(&def, assignment.value, amount)?;
        let (user_id, campaign_id) = self.payer(assignment.character_id).await?;

        let ledger = ExperienceLedger::new(self.store.as_ref());
        ledger.spend_xp(user_id, campaign_id, cost).await?;

        match self.store_value(assignment, value).await {
            Ok(saved) => {
                info!(name = %def.name, value, cost, "purchased trait with xp");
                self.recompute_committed(&saved).await;
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, cost, "trait write failed; refunding xp");
                if let Err(undo) = ledger.add_xp(user_id, campaign_id, cost, false).await {
                    warn!(error = %undo, cost, "could not refund xp after failed purchase");
                }
                Err(e.into())
            }
        }
    }

    /// Lower a rating, crediting the savings to current XP only.
    pub async fn refund_with_xp(
        &self,
        assignment: &CharacterTrait,
        amount: u32,
    ) -> EconomyResult<CharacterTrait> {
        let def = self.definition(assignment.trait_id).await?;
        let value = guard::guard_decrease(&def, assignment.value, amount)?;
        let savings = cost::downgrade_savings(&def, assignment.value, amount)?;
        let (user_id, campaign_id) = self.payer(assignment.character_id).await?;

        let ledger = ExperienceLedger::new(self.store.as_ref());
        ledger.add_xp(user_id, campaign_id, savings, false).await?;

        match self.store_value(assignment, value).await {
            Ok(saved) => {
                info!(name = %def.name, value, savings, "refunded trait for xp");
                self.recompute_committed(&saved).await;
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, savings, "trait write failed; taking back refunded xp");
                if let Err(undo) = ledger.spend_xp(user_id, campaign_id, savings).await {
                    warn!(error = %undo, savings, "could not take back xp after failed refund");
                }
                Err(e.into())
            }
        }
    }

    /// Raise a rating, paying from the character's starting points.
    pub async fn purchase_with_starting_points(
        &self,
        assignment: &CharacterTrait,
        amount: u32,
    ) -> EconomyResult<CharacterTrait> {
        let def = self.definition(assignment.trait_id).await?;
        let value = guard::guard_increase(&def, assignment.value, amount)?;
        let cost = cost::upgrade_cost(&def, assignment.value, amount)?;

        let mut character = self.character(assignment.character_id).await?;
        if character.starting_points < cost {
            return Err(EconomyError::validation(
                "starting_points",
                format!(
                    "Not enough starting points: have {}, need {cost}",
                    character.starting_points
                ),
            ));
        }
        character.starting_points -= cost;
        self.store.update_character(&character).await?;

        match self.store_value(assignment, value).await {
            Ok(saved) => {
                info!(name = %def.name, value, cost, "purchased trait with starting points");
                self.recompute_committed(&saved).await;
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, cost, "trait write failed; restoring starting points");
                self.adjust_starting_points(assignment.character_id, cost, true)
                    .await;
                Err(e.into())
            }
        }
    }

    /// Lower a rating, returning the savings to the starting-point pool.
    pub async fn refund_with_starting_points(
        &self,
        assignment: &CharacterTrait,
        amount: u32,
    ) -> EconomyResult<CharacterTrait> {
        let def = self.definition(assignment.trait_id).await?;
        let value = guard::guard_decrease(&def, assignment.value, amount)?;
        let savings = cost::downgrade_savings(&def, assignment.value, amount)?;

        let mut character = self.character(assignment.character_id).await?;
        character.starting_points = character.starting_points.saturating_add(savings);
        self.store.update_character(&character).await?;

        match self.store_value(assignment, value).await {
            Ok(saved) => {
                info!(name = %def.name, value, savings, "refunded trait for starting points");
                self.recompute_committed(&saved).await;
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, savings, "trait write failed; taking back starting points");
                self.adjust_starting_points(assignment.character_id, savings, false)
                    .await;
                Err(e.into())
            }
        }
    }

    /// Recompute derived stats after `assignment` was written.
    pub async fn after_save(&self, assignment: &CharacterTrait) -> EconomyResult<Recomputed> {
        derived::after_save(self.store.as_ref(), assignment).await
    }

    /// Delete an assignment and recompute what depended on it.
    pub async fn delete_assignment(&self, assignment_id: AssignmentId) -> EconomyResult<()> {
        let assignment = self
            .store
            .assignment(assignment_id)
            .await?
            .ok_or_else(|| EconomyError::missing("character trait", assignment_id))?;
        self.store.delete_assignment(assignment_id).await?;
        debug!(%assignment_id, "deleted assignment");
        self.after_save(&assignment).await?;
        Ok(())
    }

    /// One page of a character's assignments, ordered by category.
    ///
    /// Returns the total number of matching assignments alongside the page.
    pub async fn list_character_traits(
        &self,
        character_id: CharacterId,
        category_id: Option<CategoryId>,
        limit: usize,
        offset: usize,
    ) -> EconomyResult<(usize, Vec<CharacterTrait>)> {
        let mut rows = Vec::new();
        for assignment in self.store.assignments_for_character(character_id).await? {
            let def = self.definition(assignment.trait_id).await?;
            if category_id.is_none_or(|c| c == def.category_id) {
                rows.push((def.category_id, assignment));
            }
        }
        rows.sort_by_key(|(category, _)| *category);
        let total = rows.len();
        let page = rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, a)| a)
            .collect();
        Ok((total, page))
    }

    /// Cumulative upgrade cost for every legal step count.
    pub async fn upgrade_cost_table(
        &self,
        assignment: &CharacterTrait,
    ) -> EconomyResult<BTreeMap<u32, u32>> {
        let def = self.definition(assignment.trait_id).await?;
        cost::all_upgrade_costs(&def, assignment.value)
    }

    /// Cumulative savings for every legal step count.
    pub async fn downgrade_savings_table(
        &self,
        assignment: &CharacterTrait,
    ) -> EconomyResult<BTreeMap<u32, u32>> {
        let def = self.definition(assignment.trait_id).await?;
        cost::all_downgrade_savings(&def, assignment.value)
    }

    /// The wallet that pays for `character_id`'s purchases.
    async fn payer(&self, character_id: CharacterId) -> EconomyResult<(UserId, CampaignId)> {
        let character = self.character(character_id).await?;
        let campaign_id = character.campaign_id.ok_or_else(|| {
            EconomyError::validation("campaign_id", "character is not in a campaign")
        })?;
        Ok((character.user_player_id, campaign_id))
    }

    async fn store_value(
        &self,
        assignment: &CharacterTrait,
        value: u32,
    ) -> Result<CharacterTrait, CoreError> {
        let mut next = assignment.clone();
        next.value = value;
        self.store.update_assignment(&next).await
    }

    async fn write_value(
        &self,
        assignment: &CharacterTrait,
        value: u32,
    ) -> EconomyResult<CharacterTrait> {
        let saved = self.store_value(assignment, value).await?;
        debug!(assignment_id = %saved.id, value, "updated trait value");
        self.after_save(&saved).await?;
        Ok(saved)
    }

    /// Run the derived-stat hook after a paid change has committed.
    ///
    /// The payment and the new rating are already stored, so a failure here
    /// is logged rather than returned. Callers can rerun
    /// [`TraitValueService::after_save`] to repair the derived stats.
    async fn recompute_committed(&self, saved: &CharacterTrait) {
        if let Err(e) = self.after_save(saved).await {
            warn!(
                error = %e,
                assignment_id = %saved.id,
                "derived stats not recomputed after committed change"
            );
        }
    }

    /// Best-effort reversal of a starting-point change.
    async fn adjust_starting_points(&self, character_id: CharacterId, amount: u32, credit: bool) {
        let result = async {
            let mut character = self.character(character_id).await?;
            character.starting_points = if credit {
                character.starting_points.saturating_add(amount)
            } else {
                character.starting_points.saturating_sub(amount)
            };
            self.store.update_character(&character).await?;
            Ok::<_, EconomyError>(())
        }
        .await;
        if let Err(e) = result {
            warn!(error = %e, %character_id, amount, "could not reverse starting points");
        }
    }
}
