//! Domain-focused tests for pillars and category names.

use crate::taxonomy::domain::{
    Category, CategoryName, ParsePillarError, Pillar, TaxonomyDomainError,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("hard_work", Pillar::HardWork)]
#[case("Hard Work", Pillar::HardWork)]
#[case("hard-work", Pillar::HardWork)]
#[case(" CALMNESS ", Pillar::Calmness)]
#[case("family", Pillar::Family)]
fn pillar_parses_storage_and_display_forms(#[case] input: &str, #[case] expected: Pillar) {
    assert_eq!(Pillar::try_from(input), Ok(expected));
}

#[rstest]
fn pillar_rejects_unknown_value() {
    assert_eq!(
        Pillar::try_from("leisure"),
        Err(ParsePillarError("leisure".to_owned()))
    );
}

#[rstest]
fn pillars_split_the_day_evenly() {
    let total: u32 = Pillar::ALL
        .iter()
        .map(|pillar| pillar.daily_allocation_minutes())
        .sum();
    assert_eq!(total, 24 * 60);
}

#[rstest]
fn category_name_trims_input() {
    let name = CategoryName::new("  Deep work  ").expect("valid name");
    assert_eq!(name.as_str(), "Deep work");
}

#[rstest]
fn category_name_rejects_blank_input() {
    assert_eq!(CategoryName::new("   "), Err(TaxonomyDomainError::EmptyName));
}

#[rstest]
fn category_name_rejects_overlong_input() {
    let long = "x".repeat(101);
    assert_eq!(
        CategoryName::new(long.clone()),
        Err(TaxonomyDomainError::NameTooLong(long))
    );
}

#[rstest]
fn category_name_matching_ignores_case() {
    let left = CategoryName::new("Reading").expect("valid name");
    let right = CategoryName::new("READING").expect("valid name");
    assert!(left.matches(&right));
}

#[rstest]
fn blank_description_is_dropped() {
    let name = CategoryName::new("Exercise").expect("valid name");
    let category = Category::new(Pillar::Calmness, name, &DefaultClock).with_description("  ");
    assert_eq!(category.description(), None);
}
