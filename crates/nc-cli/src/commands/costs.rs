use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use nc_economy::cost::{all_downgrade_savings, all_upgrade_costs};

pub fn run(name: &str, value: u32, catalog: Option<&Path>) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;
    let def = catalog
        .trait_named(name)
        .ok_or_else(|| format!("no trait named '{name}'"))?;
    if !def.allows(value) {
        return Err(format!(
            "{value} is outside {}..={} for {}",
            def.min_value, def.max_value, def.name
        ));
    }

    println!(
        "  {} {}  {}",
        def.name.bold(),
        super::dots(value, def.max_value),
        format!("(initial {}, upgrade {} per dot)", def.initial_cost, def.upgrade_cost).dimmed()
    );
    println!();

    let upgrades = all_upgrade_costs(def, value).map_err(|e| e.to_string())?;
    let refunds = all_downgrade_savings(def, value).map_err(|e| e.to_string())?;
    if upgrades.is_empty() && refunds.is_empty() {
        println!("  No legal changes.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Change", "New rating", "XP"]);
    for (steps, cost) in &upgrades {
        table.add_row(vec![
            format!("+{steps}"),
            (value + steps).to_string(),
            format!("-{cost}"),
        ]);
    }
    for (steps, refund) in &refunds {
        table.add_row(vec![
            format!("-{steps}"),
            (value - steps).to_string(),
            format!("+{refund}"),
        ]);
    }
    println!("{table}");
    Ok(())
}
