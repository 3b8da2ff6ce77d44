use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use nc_chargen::build_percentile_table;

pub fn run(mortal: u32) -> Result<(), String> {
    if mortal > 100 {
        return Err(format!("mortal percentile must be 0-100, got {mortal}"));
    }
    let table = build_percentile_table(mortal);

    let mut out = Table::new();
    out.set_content_arrangement(ContentArrangement::Dynamic);
    out.set_header(vec!["Class", "Rolls", "Chance"]);
    for bucket in table.buckets() {
        let (rolls, chance) = if bucket.low > bucket.high {
            ("-".to_string(), 0)
        } else {
            // rolls run 1..=100, so the Mortal bucket's 0 is never rolled
            let low = bucket.low.max(1);
            (format!("{low}-{}", bucket.high), bucket.high + 1 - low)
        };
        out.add_row(vec![bucket.class.to_string(), rolls, format!("{chance}%")]);
    }

    println!("  {} (d100)", "Class Percentiles".bold());
    println!("{out}");
    Ok(())
}
