use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tabsmith_catalog::{
    ALL_CATEGORIES, FALLBACK_PREVIEW, TypeCatalog, TypeDescriptor, preview, preview_with_rng,
};

#[test]
fn builtin_ids_are_unique_and_non_empty() {
    let catalog = TypeCatalog::builtin();
    assert!(!catalog.is_empty());

    let mut ids: Vec<&str> = catalog.types().iter().map(|t| t.id.as_str()).collect();
    assert!(ids.iter().all(|id| !id.is_empty()));
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn category_counts_add_up() {
    let catalog = TypeCatalog::builtin();
    let categories = catalog.categories();
    assert_eq!(categories[0], (ALL_CATEGORIES.to_string(), catalog.len()));

    let per_category: usize = categories.iter().skip(1).map(|(_, count)| count).sum();
    assert_eq!(per_category, catalog.len());

    for (category, count) in categories.iter().skip(1) {
        assert_eq!(catalog.search("", Some(category)).len(), *count, "{category}");
    }
}

#[test]
fn builtin_previews_use_catalog_examples() {
    let catalog = TypeCatalog::builtin();
    for descriptor in catalog.types().iter().filter(|t| !t.example.is_empty()) {
        assert_eq!(preview(&descriptor.id), descriptor.example, "{}", descriptor.id);
    }
}

#[test]
fn unknown_types_fall_back_to_literal() {
    assert_eq!(preview("definitely_not_a_type"), FALLBACK_PREVIEW);
    assert_eq!(preview(""), "");
}

#[test]
fn custom_catalog_overrides_builtin_generator() {
    let catalog = TypeCatalog::new(vec![TypeDescriptor {
        id: "city".to_string(),
        display_name: "City".to_string(),
        category: "Location".to_string(),
        description: "Town name".to_string(),
        example: "Pune".to_string(),
        default_rule: None,
    }]);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    assert_eq!(preview_with_rng(&catalog, "city", &mut rng), "Pune");
    assert_eq!(preview_with_rng(&catalog, "City", &mut rng), "Pune");
}

#[test]
fn seeded_generation_is_reproducible() {
    let catalog = TypeCatalog::default();
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        ["email", "phone", "ip_v4", "credit_card_expiry"]
            .iter()
            .map(|id| preview_with_rng(&catalog, id, &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
    assert!(run(42)[0].ends_with("@example.com"));
}
