use materials_protocol::Material;

/// Candidates for the comparison picker.
///
/// Plain case-insensitive substring match over name, short name and type.
/// A blank filter returns everything in input order.
pub fn picker_candidates<'a>(materials: &'a [Material], filter: &str) -> Vec<&'a Material> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return materials.iter().collect();
    }
    materials
        .iter()
        .filter(|material| {
            [&material.name, &material.short_name, &material.material_type]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
