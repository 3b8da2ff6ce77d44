//! Trait and category names the engine resolves by name.
//!
//! Catalog documents are looked up case-insensitively, so these only need to
//! match the catalog's spelling up to case.

/// Attribute summed into Willpower.
pub const COMPOSURE: &str = "Composure";
/// Attribute summed into Willpower.
pub const RESOLVE: &str = "Resolve";
/// Derived from Composure + Resolve in V5; rolled directly in V4.
pub const WILLPOWER: &str = "Willpower";
/// Morality track for vampires, ghouls and mortals.
pub const HUMANITY: &str = "Humanity";
/// Werewolf rage track.
pub const RAGE: &str = "Rage";
/// Werewolf renown: Honor.
pub const HONOR: &str = "Honor";
/// Werewolf renown: Wisdom.
pub const WISDOM: &str = "Wisdom";
/// Werewolf renown: Glory.
pub const GLORY: &str = "Glory";

/// Category holding vampire disciplines.
pub const DISCIPLINES: &str = "Disciplines";
/// Advantage category: backgrounds.
pub const BACKGROUNDS: &str = "Backgrounds";
/// Advantage category: merits.
pub const MERITS: &str = "Merits";
/// Advantage category: flaws.
pub const FLAWS: &str = "Flaws";

/// Traits whose changes trigger a Willpower recompute.
pub const WILLPOWER_SOURCES: [&str; 2] = [COMPOSURE, RESOLVE];
/// Traits whose changes trigger a total-renown recompute.
pub const RENOWN_SOURCES: [&str; 3] = [HONOR, WISDOM, GLORY];

/// Case-insensitive name comparison used for every catalog lookup.
pub fn same_name(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Returns true if `name` is one of `set`, ignoring case.
pub fn is_one_of(name: &str, set: &[&str]) -> bool {
    set.iter().any(|s| same_name(s, name))
}
