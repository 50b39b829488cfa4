//! Filter Engine: narrows a loaded collection by name, country and budget.
//!
//! All three predicates must hold. The result keeps the relative order of the input.

use crate::model::Destination;
use serde::Deserialize;
use trek_domain::constants::{DEFAULT_BUDGET_MAX, DEFAULT_BUDGET_MIN};

/// Filter criteria. Empty `search` and `country` place no constraint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
#[serde(default)]
pub struct DestinationFilter {
    /// Case-insensitive substring of the destination name.
    pub search: String,
    /// Exact country; empty matches every country.
    pub country: String,
    /// Inclusive lower budget bound.
    pub min: f64,
    /// Inclusive upper budget bound.
    pub max: f64,
}

impl Default for DestinationFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            country: String::new(),
            min: DEFAULT_BUDGET_MIN,
            max: DEFAULT_BUDGET_MAX,
        }
    }
}

impl DestinationFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Sets the inclusive budget range. A reversed range matches nothing.
    #[must_use]
    pub const fn budget(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn matches(&self, destination: &Destination) -> bool {
        self.matcher().matches(destination)
    }

    /// Returns the matching records in their original order.
    #[must_use]
    pub fn apply<'a>(&self, destinations: &'a [Destination]) -> Vec<&'a Destination> {
        let matcher = self.matcher();
        destinations.iter().filter(|d| matcher.matches(d)).collect()
    }

    /// Like [`apply`](Self::apply) but consumes the collection.
    #[must_use]
    pub fn apply_owned(&self, destinations: Vec<Destination>) -> Vec<Destination> {
        let matcher = self.matcher();
        destinations.into_iter().filter(|d| matcher.matches(d)).collect()
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher { needle: self.search.to_lowercase(), filter: self }
    }
}

/// Filter with the search text lowered once per pass.
struct Matcher<'a> {
    needle: String,
    filter: &'a DestinationFilter,
}

impl Matcher<'_> {
    fn matches(&self, destination: &Destination) -> bool {
        let f = self.filter;
        destination.name.to_lowercase().contains(&self.needle)
            && (f.country.is_empty() || destination.country == f.country)
            && f.min <= destination.budget
            && destination.budget <= f.max
    }
}

/// Distinct countries of the collection in order of first appearance.
#[must_use]
pub fn country_options(destinations: &[Destination]) -> Vec<&str> {
    let mut seen = Vec::new();
    for country in destinations.iter().map(|d| d.country.as_str()) {
        if !seen.contains(&country) {
            seen.push(country);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dest(id: &str, name: &str, country: &str, budget: f64) -> Destination {
        Destination {
            id: id.to_owned(),
            name: name.to_owned(),
            country: country.to_owned(),
            budget,
            image: format!("{id}.jpg"),
            additional_image1: None,
            additional_image2: None,
            description: String::new(),
        }
    }

    fn sample() -> Vec<Destination> {
        vec![
            dest("1", "Paris Getaway", "France", 450.0),
            dest("2", "Tokyo Lights", "Japan", 900.0),
            dest("3", "Provence Lavender", "France", 500.0),
            dest("4", "Kyoto Temples", "Japan", 1200.0),
        ]
    }

    fn ids(result: &[&Destination]) -> Vec<String> {
        result.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let items = sample();
        for term in ["paris", "PARIS", "pArIs"] {
            assert_eq!(ids(&DestinationFilter::new().search(term).apply(&items)), ["1"]);
        }
        assert!(DestinationFilter::new().search("tokyo").apply(&items[..1]).is_empty());
    }

    #[test]
    fn budget_bounds_are_inclusive() {
        let items = sample();
        let result = DestinationFilter::new().budget(500.0, 1000.0).apply(&items);
        assert_eq!(ids(&result), ["2", "3"]);
    }

    #[test]
    fn default_range_excludes_budgets_above_it() {
        let items = sample();
        assert_eq!(ids(&DestinationFilter::new().apply(&items)), ["1", "2", "3"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let items = sample();
        let result = DestinationFilter::new().country("France").search("p").budget(0.0, 480.0);
        assert_eq!(ids(&result.apply(&items)), ["1"]);
    }

    #[test]
    fn country_must_match_exactly() {
        let items = sample();
        assert!(DestinationFilter::new().country("france").apply(&items).is_empty());
    }

    #[test]
    fn reversed_range_matches_nothing() {
        assert!(DestinationFilter::new().budget(800.0, 100.0).apply(&sample()).is_empty());
    }

    #[test]
    fn empty_collection_yields_empty_result() {
        assert!(DestinationFilter::new().search("x").apply(&[]).is_empty());
        assert!(country_options(&[]).is_empty());
    }

    #[test]
    fn country_options_are_distinct_in_first_seen_order() {
        assert_eq!(country_options(&sample()), ["France", "Japan"]);

        let two = [dest("a", "A", "Peru", 1.0), dest("b", "B", "Chile", 2.0)];
        assert_eq!(country_options(&two).len(), 2);
    }

    #[test]
    fn query_parameters_fall_back_to_defaults() {
        let filter: DestinationFilter = serde_json::from_str(r#"{"country":"Japan"}"#).unwrap();
        assert_eq!(filter, DestinationFilter::new().country("Japan"));
    }

    fn arb_destination() -> impl Strategy<Value = Destination> {
        ("[a-zA-Z ]{0,12}", prop::sample::select(vec!["France", "Japan", "Peru", ""]), 0u32..1500)
            .prop_map(|(name, country, budget)| dest("id", &name, country, f64::from(budget)))
    }

    fn arb_filter() -> impl Strategy<Value = DestinationFilter> {
        ("[a-zA-Z]{0,3}", prop::sample::select(vec!["", "France", "Japan"]), 0u32..1500, 0u32..1500)
            .prop_map(|(search, country, lo, hi)| {
                DestinationFilter::new().search(search).country(country).budget(
                    f64::from(lo),
                    f64::from(hi),
                )
            })
    }

    proptest! {
        #[test]
        fn result_is_an_ordered_subsequence(
            items in prop::collection::vec(arb_destination(), 0..40),
            filter in arb_filter(),
        ) {
            let result = filter.apply(&items);
            let mut cursor = items.iter();
            for picked in &result {
                prop_assert!(cursor.any(|candidate| std::ptr::eq(candidate, *picked)));
            }
            prop_assert!(result.iter().all(|d| filter.matches(d)));
        }

        #[test]
        fn neutral_filter_keeps_everything_in_range(
            items in prop::collection::vec(arb_destination(), 0..40),
        ) {
            let in_range: Vec<_> = items.iter().filter(|d| d.budget <= 1000.0).collect();
            prop_assert_eq!(DestinationFilter::new().apply(&items), in_range);
        }

        #[test]
        fn owned_and_borrowed_agree(
            items in prop::collection::vec(arb_destination(), 0..20),
            filter in arb_filter(),
        ) {
            let borrowed: Vec<Destination> = filter.apply(&items).into_iter().cloned().collect();
            prop_assert_eq!(filter.apply_owned(items), borrowed);
        }

        #[test]
        fn country_options_have_no_duplicates(
            items in prop::collection::vec(arb_destination(), 0..40),
        ) {
            let options = country_options(&items);
            let mut deduped = options.clone();
            deduped.sort_unstable();
            deduped.dedup();
            prop_assert_eq!(options.len(), deduped.len());
            prop_assert!(items.iter().all(|d| options.contains(&d.country.as_str())));
        }
    }
}
