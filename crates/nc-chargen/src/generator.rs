//! The autogeneration pipeline: a stored character with every rating filled in.

use std::sync::Arc;

use nc_core::model::CharacterConcept;
use nc_core::{
    AuspiceId, CampaignId, Character, CharacterClass, CharacterType, ClanId, ConceptId, Store,
    TribeId, UserId,
};
use nc_economy::TraitValueService;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use crate::allocate::Allocation;
use crate::base::{self, DotSpend};
use crate::config::ChargenConfig;
use crate::error::{ChargenError, ChargenResult};
use crate::hunter::{self, HunterPlan};
use crate::level::{AbilityFocus, ExperienceLevel};
use crate::lookup;
use crate::name::unique_name;
use crate::percentile::{PercentileTable, build_percentile_table, roll_class};
use crate::report::Shortfall;
use crate::vampire::{self, VampireOutcome};
use crate::werewolf::{self, WerewolfChoice, WerewolfOutcome};

/// Per-character choices; anything left `None` is picked at random.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Player the character belongs to.
    pub user_id: UserId,
    /// Kind of character sheet.
    pub character_type: CharacterType,
    /// Experience level; [`ExperienceLevel::New`] when unset.
    pub level: Option<ExperienceLevel>,
    /// Ability focus.
    pub focus: Option<AbilityFocus>,
    /// Class; rolled on the percentile table when unset.
    pub class: Option<CharacterClass>,
    /// Concept.
    pub concept_id: Option<ConceptId>,
    /// Clan for vampires and ghouls.
    pub clan_id: Option<ClanId>,
    /// Tribe for werewolves.
    pub tribe_id: Option<TribeId>,
    /// Auspice for werewolves.
    pub auspice_id: Option<AuspiceId>,
    /// Campaign the character joins.
    pub campaign_id: Option<CampaignId>,
}

impl GenerateOptions {
    /// Everything random, for `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            character_type: CharacterType::default(),
            level: None,
            focus: None,
            class: None,
            concept_id: None,
            clan_id: None,
            tribe_id: None,
            auspice_id: None,
            campaign_id: None,
        }
    }

    /// Set the character type.
    pub fn with_type(mut self, character_type: CharacterType) -> Self {
        self.character_type = character_type;
        self
    }

    /// Set the experience level.
    pub fn with_level(mut self, level: ExperienceLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the ability focus.
    pub fn with_focus(mut self, focus: AbilityFocus) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Set the class.
    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Set the concept.
    pub fn with_concept(mut self, concept_id: ConceptId) -> Self {
        self.concept_id = Some(concept_id);
        self
    }

    /// Set the clan.
    pub fn with_clan(mut self, clan_id: ClanId) -> Self {
        self.clan_id = Some(clan_id);
        self
    }

    /// Set the tribe.
    pub fn with_tribe(mut self, tribe_id: TribeId) -> Self {
        self.tribe_id = Some(tribe_id);
        self
    }

    /// Set the auspice.
    pub fn with_auspice(mut self, auspice_id: AuspiceId) -> Self {
        self.auspice_id = Some(auspice_id);
        self
    }

    /// Put the character in a campaign.
    pub fn in_campaign(mut self, campaign_id: CampaignId) -> Self {
        self.campaign_id = Some(campaign_id);
        self
    }
}

/// Everything a generation decided, step by step.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Level used.
    pub level: ExperienceLevel,
    /// Focus used.
    pub focus: AbilityFocus,
    /// Concept used, if the catalog has any.
    pub concept: Option<CharacterConcept>,
    /// Vampire or ghoul step.
    pub vampire: Option<VampireOutcome>,
    /// Werewolf step.
    pub werewolf: Option<WerewolfOutcome>,
    /// Hunter step.
    pub hunter: Option<HunterPlan>,
    /// Attribute dots.
    pub attributes: Allocation,
    /// Ability dots.
    pub abilities: Allocation,
    /// Rolled V4 Willpower.
    pub willpower: Option<u32>,
    /// Starting Humanity.
    pub humanity: Option<u32>,
    /// Backgrounds and merits.
    pub advantages: DotSpend,
    /// Flaws.
    pub flaws: DotSpend,
}

impl GenerationReport {
    /// Every pick that delivered less than asked, across all steps.
    pub fn shortfalls(&self) -> Vec<Shortfall> {
        let mut all = Vec::new();
        if let Some(w) = &self.werewolf {
            all.extend(w.shortfalls.iter().cloned());
        }
        if let Some(h) = &self.hunter {
            all.extend(h.shortfalls.iter().cloned());
        }
        for (what, allocation) in [("attribute dots", &self.attributes), ("ability dots", &self.abilities)] {
            let requested = (allocation.total() + allocation.unspent) as usize;
            all.extend(Shortfall::check(what, requested, allocation.total() as usize));
        }
        all.extend(self.advantages.shortfall.iter().cloned());
        all.extend(self.flaws.shortfall.iter().cloned());
        all
    }
}

/// A stored character and how it was generated.
#[derive(Debug, Clone)]
pub struct GeneratedCharacter {
    /// The character as stored after the last step.
    pub character: Character,
    /// Per-step decisions.
    pub report: GenerationReport,
}

/// Generates characters into a store.
///
/// Writes go through [`TraitValueService`], so derived stats stay current
/// after every rating. A failed step leaves the steps before it persisted.
pub struct CharacterGenerator<S> {
    service: TraitValueService<S>,
    config: ChargenConfig,
    table: PercentileTable,
    rng: StdRng,
}

impl<S: Store> CharacterGenerator<S> {
    /// Generator over `store`, seeded from `config.seed`.
    pub fn new(store: Arc<S>, config: ChargenConfig) -> Self {
        Self {
            service: TraitValueService::new(store),
            table: build_percentile_table(config.mortal_percentile),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        self.service.store()
    }

    /// The config in use.
    pub fn config(&self) -> &ChargenConfig {
        &self.config
    }

    /// The class percentile table in use.
    pub fn percentile_table(&self) -> &PercentileTable {
        &self.table
    }

    async fn resolve_concept(
        &mut self,
        requested: Option<ConceptId>,
    ) -> ChargenResult<Option<CharacterConcept>> {
        let store = self.service.store();
        if let Some(id) = requested {
            return store
                .concept(id)
                .await?
                .map(Some)
                .ok_or_else(|| ChargenError::missing("concept", id));
        }
        let active: Vec<CharacterConcept> = store
            .concepts()
            .await?
            .into_iter()
            .filter(|c| !c.is_archived)
            .collect();
        Ok(active.choose(&mut self.rng).cloned())
    }

    /// Generate one character.
    pub async fn generate(&mut self, options: GenerateOptions) -> ChargenResult<GeneratedCharacter> {
        let level = options.level.unwrap_or_default();
        let focus = options.focus.unwrap_or_else(|| {
            *AbilityFocus::ALL
                .choose(&mut self.rng)
                .unwrap_or(&AbilityFocus::Balanced)
        });
        let (first, last) =
            unique_name(self.service.store(), &mut self.rng, self.config.name_attempts).await?;
        let class = options
            .class
            .unwrap_or_else(|| roll_class(&mut self.rng, &self.table));
        let concept = self.resolve_concept(options.concept_id).await?;

        let mut character = Character::new(first, last, class, self.config.game_version, options.user_id)
            .with_type(options.character_type);
        character.is_chargen = true;
        character.concept_id = concept.as_ref().map(|c| c.id);
        character.campaign_id = options.campaign_id;
        self.service.store().insert_character(character.clone()).await?;
        debug!(
            character_id = %character.id,
            name = %character.full_name(),
            %class,
            %level,
            %focus,
            "created base character"
        );

        let service = &self.service;
        let rng = &mut self.rng;
        let config = &self.config;

        let vampire = vampire::generate(
            service,
            rng,
            &mut character,
            level,
            options.clan_id,
            config.discipline_stdev,
        )
        .await?;
        let choice = WerewolfChoice {
            tribe_id: options.tribe_id,
            auspice_id: options.auspice_id,
        };
        let werewolf = werewolf::generate(service, rng, &mut character, level, choice).await?;
        let hunter = hunter::generate(service.store(), rng, &mut character, level).await?;

        let favored = concept
            .as_ref()
            .map(|c| c.favored_ability_names.clone())
            .unwrap_or_default();
        let attributes = base::attributes(service, rng, &character, level).await?;
        let abilities = base::abilities(service, rng, &character, level, focus, &favored).await?;
        let willpower = base::willpower(service, rng, &character, config.v4_willpower).await?;
        let advantages = base::advantages(service, rng, &character, level).await?;
        let flaws = base::flaws(service, rng, &character, level).await?;
        let humanity = base::humanity(service, &character, config.starting_humanity).await?;

        let character = lookup::reload(service.store(), character.id).await?;
        let report = GenerationReport {
            level,
            focus,
            concept,
            vampire,
            werewolf,
            hunter,
            attributes,
            abilities,
            willpower,
            humanity,
            advantages,
            flaws,
        };
        info!(
            character_id = %character.id,
            name = %character.full_name(),
            %class,
            %level,
            shortfalls = report.shortfalls().len(),
            "generated character"
        );
        Ok(GeneratedCharacter { character, report })
    }
}
