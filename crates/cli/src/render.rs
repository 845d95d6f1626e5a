use crate::command::domain::{CompareOutput, InfoOutput, ListOutput, SearchOutput, TypesOutput};
use materials_compare::{ComparisonTable, Highlight};
use materials_protocol::Material;
use std::fmt::Write as _;

const BEST_MARK: &str = " (best)";
const WORST_MARK: &str = " (worst)";

pub fn material_line(material: &Material) -> String {
    format!(
        "{:>4}  {}  [{}]",
        material.id,
        material.heading(),
        material.material_type
    )
}

pub fn list(out: &ListOutput) -> String {
    let mut text = String::new();
    for material in &out.materials {
        let _ = writeln!(text, "{}", material_line(material));
    }
    let _ = write!(
        text,
        "Showing {} of {} materials",
        out.materials.len(),
        out.total
    );
    if out.remaining > 0 {
        let _ = write!(text, ", {} more (--more)", out.remaining);
    }
    text
}

pub fn search(out: &SearchOutput) -> String {
    if out.materials.is_empty() {
        return format!("No materials match {:?}", out.query);
    }
    out.materials
        .iter()
        .map(material_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn types(out: &TypesOutput) -> String {
    let width = out.types.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
    out.types
        .iter()
        .map(|t| format!("{:<width$}  {}", t.name, t.count))
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell_text(value: &str, highlight: Highlight) -> String {
    match highlight {
        Highlight::Best => format!("{value}{BEST_MARK}"),
        Highlight::Worst => format!("{value}{WORST_MARK}"),
        Highlight::Neutral => value.to_string(),
    }
}

/// Fixed-width grid; best and worst cells carry a textual marker.
pub fn table(table: &ComparisonTable) -> String {
    if table.is_empty() {
        return "No materials selected".to_string();
    }

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(table.rows.len() + 1);
    let mut header = vec!["Property".to_string()];
    header.extend(table.columns.iter().map(|c| c.heading.clone()));
    grid.push(header);
    for row in &table.rows {
        let mut line = vec![row.label.clone()];
        line.extend(row.cells.iter().map(|c| cell_text(&c.value, c.highlight)));
        grid.push(line);
    }

    let columns = grid[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            grid.iter()
                .filter_map(|line| line.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    grid.iter()
        .map(|line| {
            line.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn compare(out: &CompareOutput) -> String {
    format!("{}\n\n{}", out.href, table(&out.table))
}

pub fn info(out: &InfoOutput) -> String {
    format!(
        "{} {}\nRepository: {}\nDataset: {}\nMaterials: {}\nTypes: {}",
        out.name, out.version, out.repository, out.dataset, out.materials, out.types
    )
}
