//! Terminal rendering of the aggregated verdict and biomarker ranking.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pdrisk_model::{AggregatedVerdict, ConfidenceLevel, Direction, RankedBiomarker, RiskLevel};

pub fn print_verdict(file_name: &str, verdict: &AggregatedVerdict, biomarkers: &[RankedBiomarker]) {
    println!("File: {file_name}");
    println!(
        "Patients analyzed: {} ({} PD positive, {} healthy)",
        verdict.total_patients, verdict.pd_positive, verdict.pd_negative
    );
    println!();

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Overall result"), header_cell("")]);
    table.add_row(vec![
        Cell::new("Verdict"),
        if verdict.is_positive {
            Cell::new("PD risk detected")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new("No PD risk detected")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        },
    ]);
    table.add_row(vec![
        Cell::new("Average probability"),
        Cell::new(format!("{:.1}%", verdict.probability)),
    ]);
    table.add_row(vec![Cell::new("Risk level"), risk_cell(verdict.risk_level)]);
    table.add_row(vec![
        Cell::new("Confidence"),
        confidence_cell(verdict.confidence_level),
    ]);
    println!("{table}");

    if !biomarkers.is_empty() {
        println!();
        print_biomarkers(biomarkers);
    }
}

pub fn print_biomarkers(biomarkers: &[RankedBiomarker]) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("#"),
        header_cell("Symbol"),
        header_cell("Name"),
        header_cell("Category"),
        header_cell("Importance"),
        header_cell("Direction"),
    ]);
    if let Some(column) = table.column_mut(4) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (rank, bio) in biomarkers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&bio.symbol).add_attribute(Attribute::Bold),
            Cell::new(&bio.name),
            Cell::new(&bio.category),
            Cell::new(format!("{:.4}", bio.importance)),
            direction_cell(bio.direction),
        ]);
    }
    println!("Top biomarkers");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn risk_cell(level: RiskLevel) -> Cell {
    let color = match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Moderate => Color::Yellow,
        RiskLevel::High | RiskLevel::VeryHigh => Color::Red,
    };
    Cell::new(level.label()).fg(color)
}

fn confidence_cell(level: ConfidenceLevel) -> Cell {
    let color = match level {
        ConfidenceLevel::Low => Color::Yellow,
        ConfidenceLevel::Medium | ConfidenceLevel::High => Color::Green,
    };
    Cell::new(level.label()).fg(color)
}

fn direction_cell(direction: Direction) -> Cell {
    match direction {
        Direction::Elevated => Cell::new("elevated").fg(Color::Red),
        Direction::Decreased => Cell::new("decreased").fg(Color::Blue),
    }
}
