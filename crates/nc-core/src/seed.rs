//! A small V5 catalog with everything generation touches.
//!
//! Used by the CLI when no catalog file is given, and by tests across the
//! workspace.

use crate::error::CoreResult;
use crate::model::{
    AdvantageCategory, Catalog, CharacterClass, CharacterConcept, HunterEdge, HunterEdgePerk,
    Renown, SheetSection, TraitCategory, TraitDefinition, VampireClan, WerewolfAuspice,
    WerewolfGift, WerewolfRite, WerewolfTribe,
};
use crate::names;

const ATTRIBUTES: [(&str, [&str; 3]); 3] = [
    ("Physical", ["Strength", "Dexterity", "Stamina"]),
    ("Social", ["Charisma", "Manipulation", names::COMPOSURE]),
    ("Mental", ["Intelligence", "Wits", names::RESOLVE]),
];

const SKILLS: [(&str, [&str; 9]); 3] = [
    (
        "Physical Skills",
        [
            "Athletics",
            "Brawl",
            "Craft",
            "Drive",
            "Firearms",
            "Larceny",
            "Melee",
            "Stealth",
            "Survival",
        ],
    ),
    (
        "Social Skills",
        [
            "Animal Ken",
            "Etiquette",
            "Insight",
            "Intimidation",
            "Leadership",
            "Performance",
            "Persuasion",
            "Streetwise",
            "Subterfuge",
        ],
    ),
    (
        "Mental Skills",
        [
            "Academics",
            "Awareness",
            "Finance",
            "Investigation",
            "Medicine",
            "Occult",
            "Politics",
            "Science",
            "Technology",
        ],
    ),
];

const DISCIPLINES: [&str; 11] = [
    "Animalism",
    "Auspex",
    "Blood Sorcery",
    "Celerity",
    "Dominate",
    "Fortitude",
    "Obfuscate",
    "Oblivion",
    "Potence",
    "Presence",
    "Protean",
];

struct ClanRow {
    name: &'static str,
    bane: &'static str,
    variant_bane: Option<&'static str>,
    compulsion: &'static str,
    disciplines: [&'static str; 3],
}

const CLANS: [ClanRow; 8] = [
    ClanRow {
        name: "Brujah",
        bane: "Violent Temper",
        variant_bane: Some("Infectious Rage"),
        compulsion: "Rebellion",
        disciplines: ["Celerity", "Potence", "Presence"],
    },
    ClanRow {
        name: "Gangrel",
        bane: "Bestial Features",
        variant_bane: Some("Feral Impulses"),
        compulsion: "Feral Impulses",
        disciplines: ["Animalism", "Fortitude", "Protean"],
    },
    ClanRow {
        name: "Malkavian",
        bane: "Fractured Perspective",
        variant_bane: Some("Unnatural Manifestations"),
        compulsion: "Delusion",
        disciplines: ["Auspex", "Dominate", "Obfuscate"],
    },
    ClanRow {
        name: "Nosferatu",
        bane: "Repulsiveness",
        variant_bane: Some("Infestation"),
        compulsion: "Cryptophilia",
        disciplines: ["Animalism", "Obfuscate", "Potence"],
    },
    ClanRow {
        name: "Toreador",
        bane: "Aesthetic Fixation",
        variant_bane: Some("Agonizing Empathy"),
        compulsion: "Obsession",
        disciplines: ["Auspex", "Celerity", "Presence"],
    },
    ClanRow {
        name: "Tremere",
        bane: "Deficient Blood",
        variant_bane: Some("Stolen Blood"),
        compulsion: "Perfectionism",
        disciplines: ["Auspex", "Blood Sorcery", "Dominate"],
    },
    ClanRow {
        name: "Ventrue",
        bane: "Rarefied Tastes",
        variant_bane: None,
        compulsion: "Arrogance",
        disciplines: ["Dominate", "Fortitude", "Presence"],
    },
    ClanRow {
        name: "Hecata",
        bane: "Painful Kiss",
        variant_bane: Some("Decay"),
        compulsion: "Morbidity",
        disciplines: ["Auspex", "Fortitude", "Oblivion"],
    },
];

const TRIBES: [(&str, Renown); 6] = [
    ("Black Furies", Renown::Honor),
    ("Bone Gnawers", Renown::Wisdom),
    ("Children of Gaia", Renown::Wisdom),
    ("Galestalkers", Renown::Glory),
    ("Red Talons", Renown::Wisdom),
    ("Shadow Lords", Renown::Glory),
];

const AUSPICES: [&str; 5] = ["Ragabash", "Theurge", "Philodox", "Galliard", "Ahroun"];

const NATIVE_GIFTS: [&str; 6] = [
    "Catfeet",
    "Eyes of the Cat",
    "Hare's Leap",
    "Penumbral Senses",
    "Raging Strike",
    "Staredown",
];

const RITES: [&str; 6] = [
    "Rite of Abjuration",
    "Rite of Binding",
    "Rite of Cleansing",
    "Rite of Contrition",
    "Rite of the Shroud",
    "Rite of Passage",
];

const EDGES: [(&str, [&str; 3]); 8] = [
    ("Arsenal", ["Team Requisition", "Special Features", "Exotics"]),
    ("Fleet", ["Armor", "Performance", "Surveillance"]),
    ("Ordnance", ["Multiple Payloads", "Non-Standard Delivery", "Improvised Explosives"]),
    ("Library", ["Where They Hide", "Who They Are", "How To Halt Them"]),
    ("Improvised Gear", ["Frugal", "Endless Toolkit", "Specialized"]),
    ("Global Access", ["Net Category Manipulation", "Backdoor", "Library Access"]),
    ("Drone Jockey", ["Armed Drone", "Autonomous Drone", "Variable Chassis"]),
    ("Beast Whisperer", ["Incite Feral Frenzy", "Animal Senses", "Pack Leader"]),
];

const BACKGROUNDS: [(&str, u32); 7] = [
    ("Allies", 5),
    ("Contacts", 3),
    ("Fame", 5),
    ("Influence", 5),
    ("Mask", 2),
    ("Resources", 5),
    ("Haven", 3),
];

const MERITS: [(&str, u32); 5] = [
    ("Linguistics", 3),
    ("Beautiful", 2),
    ("Iron Gullet", 3),
    ("Eat Food", 2),
    ("Bloodhound", 1),
];

const HAVEN_MERITS: [(&str, u32); 3] = [
    ("Hidden Armory", 3),
    ("Library", 3),
    ("Security System", 3),
];

const FLAWS: [(&str, u32); 4] = [
    ("Illiterate", 2),
    ("Addiction", 2),
    ("Enemy", 2),
    ("Dark Secret", 2),
];

const HAVEN_FLAWS: [(&str, u32); 2] = [("Haunted", 2), ("Compromised", 2)];

const CONCEPTS: [(&str, [&str; 3]); 4] = [
    ("Bruiser", ["Brawl", "Athletics", "Intimidation"]),
    ("Scholar", ["Academics", "Occult", "Investigation"]),
    ("Socialite", ["Etiquette", "Persuasion", "Insight"]),
    ("Thief", ["Larceny", "Stealth", "Streetwise"]),
];

/// Build the sample catalog.
pub fn sample_catalog() -> CoreResult<Catalog> {
    let mut catalog = Catalog::default();

    for (category, attrs) in ATTRIBUTES {
        let cat = TraitCategory::new(category, SheetSection::Attributes).with_costs(10, 5);
        for name in attrs {
            catalog
                .traits
                .push(TraitDefinition::new(name, cat.id, 1, 5)?.with_costs(10, 5));
        }
        catalog.categories.push(cat);
    }

    for (category, skills) in SKILLS {
        let cat = TraitCategory::new(category, SheetSection::Abilities).with_costs(3, 3);
        for name in skills {
            catalog
                .traits
                .push(TraitDefinition::new(name, cat.id, 0, 5)?.with_costs(3, 3));
        }
        catalog.categories.push(cat);
    }

    let blooded = [CharacterClass::Vampire, CharacterClass::Ghoul];
    let disciplines = TraitCategory::new(names::DISCIPLINES, SheetSection::Other)
        .with_costs(5, 5)
        .for_classes(&blooded);
    for name in DISCIPLINES {
        catalog.traits.push(
            TraitDefinition::new(name, disciplines.id, 0, 5)?
                .with_costs(5, 5)
                .for_classes(&blooded),
        );
    }

    for row in CLANS {
        let mut clan = VampireClan::new(row.name);
        clan.bane = Some(row.bane.to_string());
        clan.variant_bane = row.variant_bane.map(str::to_string);
        clan.compulsion = Some(row.compulsion.to_string());
        clan.discipline_ids = row
            .disciplines
            .iter()
            .filter_map(|d| catalog.trait_named(d).map(|t| t.id))
            .collect();
        catalog.clans.push(clan);
    }
    catalog.categories.push(disciplines);

    let haven = AdvantageCategory::new("Haven", true);
    let advantage = |name: &str| TraitCategory::new(name, SheetSection::Advantages).with_costs(3, 3);
    let backgrounds = advantage(names::BACKGROUNDS);
    let merits = advantage(names::MERITS);
    let flaws = advantage(names::FLAWS);
    for (name, max) in BACKGROUNDS {
        catalog
            .traits
            .push(TraitDefinition::new(name, backgrounds.id, 0, max)?.with_costs(3, 3));
    }
    for (name, max) in MERITS {
        catalog
            .traits
            .push(TraitDefinition::new(name, merits.id, 0, max)?.with_costs(3, 3));
    }
    for (name, max) in HAVEN_MERITS {
        catalog.traits.push(
            TraitDefinition::new(name, merits.id, 0, max)?
                .with_costs(3, 3)
                .in_advantage_category(haven.id),
        );
    }
    for (name, max) in FLAWS {
        catalog
            .traits
            .push(TraitDefinition::new(name, flaws.id, 0, max)?.with_costs(3, 3));
    }
    for (name, max) in HAVEN_FLAWS {
        catalog.traits.push(
            TraitDefinition::new(name, flaws.id, 0, max)?
                .with_costs(3, 3)
                .in_advantage_category(haven.id),
        );
    }
    catalog.categories.extend([backgrounds, merits, flaws]);
    catalog.advantage_categories.push(haven);

    let tracks = TraitCategory::new("Tracks", SheetSection::Other);
    catalog
        .traits
        .push(TraitDefinition::new(names::WILLPOWER, tracks.id, 1, 10)?);
    catalog.traits.push(
        TraitDefinition::new(names::HUMANITY, tracks.id, 0, 10)?.for_classes(&[
            CharacterClass::Vampire,
            CharacterClass::Ghoul,
            CharacterClass::Hunter,
            CharacterClass::Mortal,
        ]),
    );
    catalog.traits.push(
        TraitDefinition::new(names::RAGE, tracks.id, 0, 5)?
            .for_classes(&[CharacterClass::Werewolf]),
    );
    catalog.categories.push(tracks);

    let renown = TraitCategory::new("Renown", SheetSection::Other)
        .for_classes(&[CharacterClass::Werewolf]);
    for r in Renown::ALL {
        catalog.traits.push(
            TraitDefinition::new(r.trait_name(), renown.id, 0, 5)?
                .for_classes(&[CharacterClass::Werewolf]),
        );
    }
    catalog.categories.push(renown);

    for (name, favored) in TRIBES {
        catalog.tribes.push(WerewolfTribe::new(name, favored));
    }
    for name in AUSPICES {
        catalog.auspices.push(WerewolfAuspice::new(name));
    }
    for tribe in &catalog.tribes {
        for n in 1..=3 {
            catalog.gifts.push(WerewolfGift::tribal(
                format!("{} Gift {n}", tribe.name),
                tribe.id,
                n,
            ));
        }
    }
    for auspice in &catalog.auspices {
        for n in 1..=3 {
            catalog.gifts.push(WerewolfGift::auspice(
                format!("{} Gift {n}", auspice.name),
                auspice.id,
                n,
            ));
        }
    }
    for (i, name) in NATIVE_GIFTS.iter().enumerate() {
        catalog
            .gifts
            .push(WerewolfGift::native(*name, if i < 3 { 1 } else { 3 }));
    }
    for name in RITES {
        catalog.rites.push(WerewolfRite::new(name));
    }

    for (name, perks) in EDGES {
        let mut edge = HunterEdge::new(name);
        for perk in perks {
            let perk = HunterEdgePerk::new(perk, edge.id);
            edge.perk_ids.push(perk.id);
            catalog.perks.push(perk);
        }
        catalog.edges.push(edge);
    }

    for (name, favored) in CONCEPTS {
        catalog.concepts.push(CharacterConcept::new(name, &favored));
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_is_consistent() {
        let catalog = sample_catalog().unwrap();
        assert_eq!(catalog.clans.len(), 8);
        for clan in &catalog.clans {
            assert_eq!(clan.discipline_ids.len(), 3, "{}", clan.name);
        }
        for name in [
            names::WILLPOWER,
            names::HUMANITY,
            names::RAGE,
            names::HONOR,
            names::WISDOM,
            names::GLORY,
            "Haven",
        ] {
            assert!(catalog.trait_named(name).is_some(), "{name}");
        }
        for perk in &catalog.perks {
            assert!(catalog.edges.iter().any(|e| e.id == perk.edge_id));
        }
    }

    #[test]
    fn sample_catalog_round_trips_through_json() {
        let catalog = sample_catalog().unwrap();
        let json = catalog.to_json().unwrap();
        let back = Catalog::from_json(&json).unwrap();
        assert_eq!(back.traits.len(), catalog.traits.len());
        assert_eq!(back.gifts, catalog.gifts);
    }
}
