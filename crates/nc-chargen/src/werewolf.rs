//! Tribe, auspice, Rage, Renown, gifts and rites for werewolves.

use nc_core::model::{WerewolfAuspice, WerewolfGift, WerewolfRite, WerewolfTribe};
use nc_core::{AuspiceId, Character, CharacterClass, GiftId, Renown, Store, TribeId, names};
use nc_economy::TraitValueService;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::{debug, warn};

use crate::divide::divide;
use crate::error::{ChargenError, ChargenResult};
use crate::level::ExperienceLevel;
use crate::lookup;
use crate::report::Shortfall;
use crate::sample::CandidatePool;
use crate::tables::{
    EXTRA_WEREWOLF_GIFTS, MAX_GIFTS_PER_POOL, RAGE_RANGE, RENOWN_MODIFIER, WEREWOLF_RITES,
};

/// Caller overrides for the werewolf step.
#[derive(Debug, Clone, Copy, Default)]
pub struct WerewolfChoice {
    /// Use this tribe instead of a random one.
    pub tribe_id: Option<TribeId>,
    /// Use this auspice instead of a random one.
    pub auspice_id: Option<AuspiceId>,
}

/// What the werewolf step wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct WerewolfOutcome {
    /// Chosen tribe.
    pub tribe: WerewolfTribe,
    /// Chosen auspice.
    pub auspice: WerewolfAuspice,
    /// Rage rating.
    pub rage: u32,
    /// Renown ratings, favored renown first.
    pub renown: [(Renown, u32); 3],
    /// Honor + Wisdom + Glory after the renown writes.
    pub total_renown: u32,
    /// Gifts granted.
    pub gifts: Vec<WerewolfGift>,
    /// Rites granted.
    pub rites: Vec<WerewolfRite>,
    /// Pools that could not supply every pick.
    pub shortfalls: Vec<Shortfall>,
}

/// Renown ratings: the favored renown gets `2 + modifier`, the other two get
/// `0 + modifier` and `1 + modifier` in random order.
pub fn plan_renown(
    rng: &mut StdRng,
    favored: Renown,
    level: ExperienceLevel,
) -> [(Renown, u32); 3] {
    let modifier = RENOWN_MODIFIER.get(level);
    let mut others: Vec<Renown> = Renown::ALL.into_iter().filter(|r| *r != favored).collect();
    others.shuffle(rng);
    [
        (favored, 2 + modifier),
        (others[0], modifier),
        (others[1], 1 + modifier),
    ]
}

/// Which catalog pool a gift is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GiftSource {
    Tribe(TribeId),
    Auspice(AuspiceId),
    Native,
}

impl GiftSource {
    fn label(self) -> &'static str {
        match self {
            Self::Tribe(_) => "tribe gifts",
            Self::Auspice(_) => "auspice gifts",
            Self::Native => "native gifts",
        }
    }

    fn offers(self, gift: &WerewolfGift) -> bool {
        match self {
            Self::Tribe(id) => gift.tribe_id == Some(id),
            Self::Auspice(id) => gift.auspice_id == Some(id),
            Self::Native => gift.is_native_gift,
        }
    }
}

/// Draw gifts: one from each of tribe, auspice and native pools, plus the
/// level's extra slots split randomly across the three.
///
/// Only gifts with `minimum_renown <= total_renown` that the character does
/// not already know are eligible.
pub fn pick_gifts(
    rng: &mut StdRng,
    catalog_gifts: &[WerewolfGift],
    known: &[GiftId],
    tribe_id: TribeId,
    auspice_id: AuspiceId,
    total_renown: u32,
    level: ExperienceLevel,
) -> ChargenResult<(Vec<WerewolfGift>, Vec<Shortfall>)> {
    let extra = divide(rng, EXTRA_WEREWOLF_GIFTS.get(level), 3, Some(MAX_GIFTS_PER_POOL), 0)?;
    let sources = [
        GiftSource::Tribe(tribe_id),
        GiftSource::Auspice(auspice_id),
        GiftSource::Native,
    ];

    let mut chosen: Vec<WerewolfGift> = Vec::new();
    let mut shortfalls = Vec::new();
    for (source, slots) in sources.into_iter().zip(extra) {
        let mut pool: CandidatePool<WerewolfGift> = catalog_gifts
            .iter()
            .filter(|g| !g.is_archived && source.offers(g) && g.minimum_renown <= total_renown)
            .filter(|g| !known.contains(&g.id) && !chosen.iter().any(|c| c.id == g.id))
            .cloned()
            .collect();
        let wanted = 1 + slots as usize;
        let drawn = pool.draw_up_to(rng, wanted);
        shortfalls.extend(Shortfall::check(source.label(), wanted, drawn.len()));
        chosen.extend(drawn);
    }
    Ok((chosen, shortfalls))
}

/// Draw the level's number of rites the character does not know yet.
pub fn pick_rites(
    rng: &mut StdRng,
    catalog_rites: &[WerewolfRite],
    known: &[nc_core::RiteId],
    level: ExperienceLevel,
) -> (Vec<WerewolfRite>, Option<Shortfall>) {
    let mut pool: CandidatePool<WerewolfRite> = catalog_rites
        .iter()
        .filter(|r| !r.is_archived && !known.contains(&r.id))
        .cloned()
        .collect();
    let wanted = WEREWOLF_RITES.get(level);
    let drawn = pool.draw_up_to(rng, wanted);
    let shortfall = Shortfall::check("rites", wanted, drawn.len());
    (drawn, shortfall)
}

async fn resolve_tribe<S: Store>(
    store: &S,
    rng: &mut StdRng,
    requested: Option<TribeId>,
) -> ChargenResult<WerewolfTribe> {
    if let Some(id) = requested {
        return store
            .tribe(id)
            .await?
            .ok_or_else(|| ChargenError::missing("werewolf tribe", id));
    }
    let active: Vec<WerewolfTribe> = store.tribes().await?.into_iter().filter(|t| !t.is_archived).collect();
    active
        .choose(rng)
        .cloned()
        .ok_or_else(|| ChargenError::missing("werewolf tribe", "any active tribe"))
}

async fn resolve_auspice<S: Store>(
    store: &S,
    rng: &mut StdRng,
    requested: Option<AuspiceId>,
) -> ChargenResult<WerewolfAuspice> {
    if let Some(id) = requested {
        return store
            .auspice(id)
            .await?
            .ok_or_else(|| ChargenError::missing("werewolf auspice", id));
    }
    let active: Vec<WerewolfAuspice> = store
        .auspices()
        .await?
        .into_iter()
        .filter(|a| !a.is_archived)
        .collect();
    active
        .choose(rng)
        .cloned()
        .ok_or_else(|| ChargenError::missing("werewolf auspice", "any active auspice"))
}

/// Generate the werewolf bundle and ratings; `None` for other classes.
///
/// Gifts are drawn only after every Renown write, so the eligibility filter
/// sees the final `total_renown`.
pub async fn generate<S: Store>(
    service: &TraitValueService<S>,
    rng: &mut StdRng,
    character: &mut Character,
    level: ExperienceLevel,
    choice: WerewolfChoice,
) -> ChargenResult<Option<WerewolfOutcome>> {
    if character.character_class != CharacterClass::Werewolf {
        return Ok(None);
    }
    let store = service.store();
    let tribe = resolve_tribe(store, rng, choice.tribe_id).await?;
    let auspice = resolve_auspice(store, rng, choice.auspice_id).await?;

    let attrs = &mut character.werewolf_attributes;
    attrs.tribe_id = Some(tribe.id);
    attrs.tribe_name = Some(tribe.name.clone());
    attrs.auspice_id = Some(auspice.id);
    attrs.auspice_name = Some(auspice.name.clone());
    *character = store.update_character(character).await?;
    debug!(character_id = %character.id, tribe = %tribe.name, auspice = %auspice.name, "assigned tribe and auspice");

    let rage_def = lookup::trait_named(store, names::RAGE).await?;
    let rage = rage_def.clamp(rng.random_range(RAGE_RANGE.0..=RAGE_RANGE.1));
    service
        .assign_constant_trait(character.id, rage_def.id, rage)
        .await?;

    let renown = plan_renown(rng, tribe.renown, level);
    for (kind, value) in renown {
        let def = lookup::trait_named(store, kind.trait_name()).await?;
        service
            .assign_constant_trait(character.id, def.id, def.clamp(value))
            .await?;
    }

    *character = lookup::reload(store, character.id).await?;
    let total_renown = character.werewolf_attributes.total_renown;

    let (gifts, mut shortfalls) = pick_gifts(
        rng,
        &store.gifts().await?,
        &character.werewolf_attributes.gift_ids,
        tribe.id,
        auspice.id,
        total_renown,
        level,
    )?;
    let (rites, rite_shortfall) = pick_rites(
        rng,
        &store.rites().await?,
        &character.werewolf_attributes.rite_ids,
        level,
    );
    shortfalls.extend(rite_shortfall);
    for shortfall in &shortfalls {
        warn!(character_id = %character.id, %shortfall, "werewolf pool ran dry");
    }

    let attrs = &mut character.werewolf_attributes;
    attrs.gift_ids.extend(gifts.iter().map(|g| g.id));
    attrs.rite_ids.extend(rites.iter().map(|r| r.id));
    *character = store.update_character(character).await?;
    debug!(
        character_id = %character.id,
        total_renown,
        gifts = gifts.len(),
        rites = rites.len(),
        "assigned gifts and rites"
    );

    Ok(Some(WerewolfOutcome {
        tribe,
        auspice,
        rage,
        renown,
        total_renown,
        gifts,
        rites,
        shortfalls,
    }))
}
