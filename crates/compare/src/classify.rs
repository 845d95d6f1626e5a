use crate::polarity::{Highlight, Polarity};
use materials_protocol::Material;
use std::collections::HashMap;

/// Union of the selected materials' property keys, first-seen order.
pub fn compute_schema(selected: &[Material]) -> Vec<String> {
    let mut schema: Vec<String> = Vec::new();
    for material in selected {
        for key in material.properties.keys() {
            if !schema.iter().any(|existing| existing == key) {
                schema.push(key.to_string());
            }
        }
    }
    schema
}

/// Highlight every selected material for one property.
///
/// Absent and non-numeric values stay neutral and take no part in the
/// comparison. With fewer than two comparable values, an unclassified key,
/// or no spread between min and max, everything is neutral. Ties at an
/// extreme are all marked.
pub fn classify(key: &str, selected: &[Material]) -> HashMap<String, Highlight> {
    let mut highlights: HashMap<String, Highlight> = selected
        .iter()
        .map(|material| (material.id.clone(), Highlight::Neutral))
        .collect();

    let polarity = Polarity::of(key);
    if polarity == Polarity::Unclassified {
        return highlights;
    }

    let values: Vec<(&str, f64)> = selected
        .iter()
        .filter_map(|material| {
            let numeric = material.property(key)?.numeric()?;
            Some((material.id.as_str(), numeric))
        })
        .collect();
    if values.len() < 2 {
        return highlights;
    }

    let max = values.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    if max == min {
        return highlights;
    }

    for (id, value) in values {
        let highlight = if value == max {
            polarity.at_max()
        } else if value == min {
            polarity.at_min()
        } else {
            continue;
        };
        highlights.insert(id.to_string(), highlight);
    }
    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn material(id: &str, key: &str, value: &str) -> Material {
        Material::new(format!("Material {id}"), id, "Polymer")
            .with_id(id)
            .with_property(key, value)
    }

    fn highlight(map: &HashMap<String, Highlight>, id: &str) -> Highlight {
        map.get(id).copied().unwrap_or(Highlight::Neutral)
    }

    #[test]
    fn schema_is_first_seen_union() {
        let a = Material::new("A", "A", "T")
            .with_id("a")
            .with_property("x", "1")
            .with_property("y", "2");
        let b = Material::new("B", "B", "T")
            .with_id("b")
            .with_property("y", "3")
            .with_property("z", "4");
        assert_eq!(compute_schema(&[a, b]), vec!["x", "y", "z"]);
    }

    #[test]
    fn overflowing_value_degrades_to_neutral() {
        let huge = format!("1{} MPa", "0".repeat(400));
        let selected = [
            material("A", "uts", "30 MPa"),
            material("B", "uts", &huge),
            material("C", "uts", "45 MPa"),
        ];
        let map = classify("uts", &selected);
        assert_eq!(highlight(&map, "A"), Highlight::Worst);
        assert_eq!(highlight(&map, "B"), Highlight::Neutral);
        assert_eq!(highlight(&map, "C"), Highlight::Best);
    }

    #[test]
    fn schema_of_empty_selection_is_empty() {
        assert!(compute_schema(&[]).is_empty());
    }

    #[test]
    fn higher_is_better_marks_max_best() {
        let selected = [
            material("A", "youngsModulus", "1.2 GPa"),
            material("B", "youngsModulus", "3.5 GPa"),
        ];
        let map = classify("youngsModulus", &selected);
        assert_eq!(highlight(&map, "A"), Highlight::Worst);
        assert_eq!(highlight(&map, "B"), Highlight::Best);
    }

    #[test]
    fn lower_is_better_marks_min_best() {
        let selected = [
            material("A", "density", "0.95 g/cm³"),
            material("B", "density", "1.4 g/cm³"),
        ];
        let map = classify("density", &selected);
        assert_eq!(highlight(&map, "A"), Highlight::Best);
        assert_eq!(highlight(&map, "B"), Highlight::Worst);
    }

    #[test]
    fn middle_value_stays_neutral() {
        let selected = [
            material("A", "uts", "30 MPa"),
            material("B", "uts", "45 MPa"),
            material("C", "uts", "70 MPa"),
        ];
        let map = classify("uts", &selected);
        assert_eq!(highlight(&map, "A"), Highlight::Worst);
        assert_eq!(highlight(&map, "B"), Highlight::Neutral);
        assert_eq!(highlight(&map, "C"), Highlight::Best);
    }

    #[test]
    fn non_numeric_value_is_always_neutral() {
        let selected = [
            material("A", "impactCharpy", "No break"),
            material("B", "impactCharpy", "5 kJ/m²"),
            material("C", "impactCharpy", "12 kJ/m²"),
        ];
        let map = classify("impactCharpy", &selected);
        assert_eq!(highlight(&map, "A"), Highlight::Neutral);
        assert_eq!(highlight(&map, "B"), Highlight::Worst);
        assert_eq!(highlight(&map, "C"), Highlight::Best);
    }

    #[test]
    fn qualified_value_is_not_comparable() {
        let selected = [
            material("A", "waterAbsorption", "<0.01%"),
            material("B", "waterAbsorption", "0.2%"),
        ];
        let map = classify("waterAbsorption", &selected);
        assert_eq!(highlight(&map, "A"), Highlight::Neutral);
        assert_eq!(highlight(&map, "B"), Highlight::Neutral);
    }

    #[test]
    fn single_comparable_value_gives_no_basis() {
        let selected = [
            material("A", "uts", "30 MPa"),
            Material::new("B", "B", "Metal").with_id("B"),
            material("C", "uts", ""),
        ];
        let map = classify("uts", &selected);
        assert!(map.values().all(|h| *h == Highlight::Neutral));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn unclassified_key_is_never_highlighted() {
        let selected = [
            material("A", "hardness", "60 Shore D"),
            material("B", "hardness", "80 Shore D"),
        ];
        let map = classify("hardness", &selected);
        assert!(map.values().all(|h| *h == Highlight::Neutral));
    }

    #[test]
    fn equal_values_highlight_nothing() {
        let selected = [
            material("A", "uts", "30 MPa"),
            material("B", "uts", "30.0 MPa"),
        ];
        let map = classify("uts", &selected);
        assert!(map.values().all(|h| *h == Highlight::Neutral));
    }

    #[test]
    fn ties_at_an_extreme_are_all_marked() {
        let selected = [
            material("A", "costPerKg", "2.50 USD"),
            material("B", "costPerKg", "2.5 USD"),
            material("C", "costPerKg", "9 USD"),
        ];
        let map = classify("costPerKg", &selected);
        assert_eq!(highlight(&map, "A"), Highlight::Best);
        assert_eq!(highlight(&map, "B"), Highlight::Best);
        assert_eq!(highlight(&map, "C"), Highlight::Worst);
    }

    #[test]
    fn classification_is_repeatable() {
        let selected = [
            material("A", "meltingTemp", "135°C"),
            material("B", "meltingTemp", "220°C"),
        ];
        assert_eq!(classify("meltingTemp", &selected), classify("meltingTemp", &selected));
    }
}
