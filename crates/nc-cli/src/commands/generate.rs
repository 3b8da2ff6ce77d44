use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use nc_chargen::{
    AbilityFocus, ChargenConfig, CharacterGenerator, ExperienceLevel, GenerateOptions,
    GeneratedCharacter,
};
use nc_core::{
    AssignmentStore, CharacterClass, GameVersion, MemoryStore, TraitCatalog, UserId,
};
use serde_json::json;
use tracing::debug;

pub struct Args<'a> {
    pub class: Option<&'a str>,
    pub level: &'a str,
    pub focus: Option<&'a str>,
    pub game_version: &'a str,
    pub seed: u64,
    pub count: u32,
    pub catalog: Option<&'a Path>,
    pub json: bool,
}

/// One rated trait, flattened for display.
struct Row {
    category: String,
    name: String,
    value: u32,
    max: u32,
}

pub async fn run(args: Args<'_>) -> Result<(), String> {
    let level: ExperienceLevel = args.level.parse()?;
    let version: GameVersion = args.game_version.parse()?;
    let class = args.class.map(str::parse::<CharacterClass>).transpose()?;
    let focus = args.focus.map(str::parse::<AbilityFocus>).transpose()?;
    if args.count == 0 {
        return Err("count must be at least 1".into());
    }

    let store = Arc::new(MemoryStore::new(super::load_catalog(args.catalog)?));
    let config = ChargenConfig::default()
        .with_seed(args.seed)
        .with_game_version(version);
    let mut generator = CharacterGenerator::new(Arc::clone(&store), config);
    let user = UserId::new();
    debug!(seed = args.seed, count = args.count, %level, %version, "generating characters");

    let mut sheets = Vec::new();
    for _ in 0..args.count {
        let mut options = GenerateOptions::new(user).with_level(level);
        if let Some(class) = class {
            options = options.with_class(class);
        }
        if let Some(focus) = focus {
            options = options.with_focus(focus);
        }
        let generated = generator.generate(options).await.map_err(|e| e.to_string())?;
        let rows = rows_for(&store, &generated).await?;
        sheets.push((generated, rows));
    }

    if args.json {
        let out: Vec<_> = sheets.iter().map(|(g, rows)| sheet_json(g, rows)).collect();
        let text = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        for (generated, rows) in &sheets {
            print_sheet(generated, rows);
        }
    }
    Ok(())
}

async fn rows_for(store: &MemoryStore, generated: &GeneratedCharacter) -> Result<Vec<Row>, String> {
    let mut rows = Vec::new();
    let assignments = store
        .assignments_for_character(generated.character.id)
        .await
        .map_err(|e| e.to_string())?;
    for assignment in assignments {
        let Some(def) = store
            .trait_by_id(assignment.trait_id)
            .await
            .map_err(|e| e.to_string())?
        else {
            continue;
        };
        let category = store
            .category_by_id(def.category_id)
            .await
            .map_err(|e| e.to_string())?
            .map_or_else(|| "Other".to_string(), |c| c.name);
        rows.push(Row {
            category,
            name: def.name,
            value: assignment.value,
            max: def.max_value,
        });
    }
    rows.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
    Ok(rows)
}

fn print_sheet(generated: &GeneratedCharacter, rows: &[Row]) {
    let c = &generated.character;
    let report = &generated.report;
    println!(
        "  {} {}",
        c.full_name().bold(),
        format!(
            "({} {}, {}, {})",
            report.level, c.character_class, report.focus, c.game_version
        )
        .dimmed()
    );
    if let Some(concept) = &report.concept {
        println!("  Concept: {}", concept.name);
    }
    if let Some(vampire) = &report.vampire {
        println!("  Clan: {}", vampire.clan.name);
        if let Some(bane) = &c.vampire_attributes.bane {
            println!("  Bane: {bane}");
        }
    }
    if let Some(werewolf) = &report.werewolf {
        println!(
            "  Tribe: {}  Auspice: {}  Renown: {}",
            werewolf.tribe.name, werewolf.auspice.name, werewolf.total_renown
        );
        let gifts: Vec<&str> = werewolf.gifts.iter().map(|g| g.name.as_str()).collect();
        println!("  Gifts: {}", gifts.join(", "));
        let rites: Vec<&str> = werewolf.rites.iter().map(|r| r.name.as_str()).collect();
        println!("  Rites: {}", rites.join(", "));
    }
    if let Some(hunter) = &report.hunter {
        println!(
            "  Creed: {}  Edges: {}  Perks: {}",
            hunter.creed,
            hunter.edges.len(),
            hunter.perk_count()
        );
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Trait", "Rating"]);
    for row in rows {
        table.add_row(vec![
            row.category.clone(),
            row.name.clone(),
            super::dots(row.value, row.max),
        ]);
    }
    println!("{table}");

    for shortfall in report.shortfalls() {
        println!("  {} {shortfall}", "SHORT".yellow().bold());
    }
    println!();
}

fn sheet_json(generated: &GeneratedCharacter, rows: &[Row]) -> serde_json::Value {
    let traits: Vec<_> = rows
        .iter()
        .map(|r| json!({ "category": r.category, "name": r.name, "value": r.value }))
        .collect();
    json!({
        "character": generated.character,
        "level": generated.report.level,
        "focus": generated.report.focus,
        "traits": traits,
        "shortfalls": generated.report.shortfalls(),
    })
}
