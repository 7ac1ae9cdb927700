use catalog_core::{CatalogConfig, CatalogError, CatalogIndex, Summary};
use proptest::prelude::*;

fn titles_of(found: Option<catalog_core::LinkedSequence<&Summary>>) -> Vec<String> {
    found
        .expect("lookup should find results")
        .into_iter()
        .map(|summary| summary.title().to_string())
        .collect()
}

fn scenario_catalog() -> CatalogIndex {
    let mut catalog = CatalogIndex::new(&CatalogConfig::default());
    assert!(catalog.add(
        Summary::new("A", ["Ada Lovelace", "Alan Turing"], "first body", ["x", "y"]).unwrap()
    ));
    assert!(catalog.add(Summary::new("B", ["Alan Turing"], "second body", ["y", "z"]).unwrap()));
    catalog
}

#[test]
fn lookups_follow_insertion_order() {
    let catalog = scenario_catalog();

    assert_eq!(titles_of(catalog.find_by_author("alan turing")), vec!["A", "B"]);
    assert_eq!(titles_of(catalog.find_by_keyword("y")), vec!["A", "B"]);
    assert_eq!(
        catalog.list_keywords_sorted().into_iter().collect::<Vec<_>>(),
        vec!["x", "y", "z"]
    );
    assert_eq!(
        catalog.list_titles_sorted().into_iter().collect::<Vec<_>>(),
        vec!["A", "B"]
    );
    assert!(catalog.is_consistent());
}

#[test]
fn remove_cascades_and_purges_orphans() {
    let mut catalog = scenario_catalog();

    assert!(catalog.remove("A"));
    assert!(catalog.find_by_title("A").is_none());
    assert_eq!(titles_of(catalog.find_by_author("alan turing")), vec!["B"]);
    assert_eq!(titles_of(catalog.find_by_keyword("y")), vec!["B"]);

    assert!(catalog.find_by_author("ada lovelace").is_none());
    assert!(catalog.find_by_keyword("x").is_none());
    assert_eq!(
        catalog.list_keywords_sorted().into_iter().collect::<Vec<_>>(),
        vec!["y", "z"]
    );
    assert_eq!(catalog.author_count(), 1);
    assert!(catalog.is_consistent());

    assert!(!catalog.remove("A"));
}

#[test]
fn duplicate_title_leaves_every_index_unchanged() {
    let mut catalog = scenario_catalog();
    let duplicate = Summary::new("A", ["Grace Hopper"], "other", ["w"]).unwrap();

    assert!(!catalog.add(duplicate));
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.author_count(), 2);
    assert_eq!(catalog.keyword_count(), 3);
    assert!(catalog.find_by_author("grace hopper").is_none());
    assert!(catalog.find_by_keyword("w").is_none());
    assert_eq!(catalog.find_by_title("A").unwrap().body(), "first body");
    assert!(catalog.is_consistent());
}

#[test]
fn author_spellings_merge_on_case_and_whitespace() {
    let mut catalog = CatalogIndex::new(&CatalogConfig::default());
    catalog.add(Summary::new("One", ["Alan Turing"], "", ["k"]).unwrap());
    catalog.add(Summary::new("Two", [" alan turing "], "", ["k"]).unwrap());

    for spelling in ["Alan Turing", " alan turing ", "ALAN TURING"] {
        let author = catalog.find_author(spelling).expect("author should exist");
        assert_eq!(author.name(), "Alan Turing");
        assert_eq!(author.summary_count(), 2);
    }
    assert_eq!(titles_of(catalog.find_by_author("alan turing")), vec!["One", "Two"]);
    assert_eq!(catalog.list_authors_sorted().len(), 1);
}

#[test]
fn keywords_are_listed_once_and_sorted() {
    let mut catalog = CatalogIndex::new(&CatalogConfig::default());
    catalog.add(Summary::new("1", ["A"], "", ["beta", "alpha"]).unwrap());
    catalog.add(Summary::new("2", ["A"], "", ["gamma", "beta"]).unwrap());
    catalog.add(Summary::new("3", ["A"], "", ["alpha"]).unwrap());

    assert_eq!(
        catalog.list_keywords_sorted().into_iter().collect::<Vec<_>>(),
        vec!["alpha", "beta", "gamma"]
    );
    assert_eq!(
        catalog.keyword_listing(),
        "=== REGISTERED KEYWORDS ===\n\n• alpha\n• beta\n• gamma\n"
    );
}

#[test]
fn keyword_lookup_is_exact_match() {
    let catalog = scenario_catalog();
    assert!(catalog.find_by_keyword("Y").is_none());
    assert!(catalog.find_by_keyword(" y").is_none());
}

#[test]
fn unsorted_listing_contains_every_title() {
    let catalog = scenario_catalog();
    let mut titles: Vec<&str> = catalog.list_all_titles_unsorted().into_iter().collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["A", "B"]);
}

#[test]
fn format_details_renders_known_and_rejects_unknown() {
    let catalog = scenario_catalog();
    let details = catalog.format_details("A").unwrap();
    assert!(details.starts_with("TITLE: A\n"));
    assert!(details.contains("AUTHORS: Ada Lovelace, Alan Turing"));
    assert!(details.contains("KEYWORDS: x, y"));

    assert_eq!(
        catalog.format_details("missing").unwrap_err(),
        CatalogError::SummaryNotFound("missing".to_string())
    );
}

#[test]
fn empty_catalog_has_no_results() {
    let catalog = CatalogIndex::new(&CatalogConfig::default());
    assert!(catalog.is_empty());
    assert!(catalog.find_by_title("A").is_none());
    assert!(catalog.find_by_author("anyone").is_none());
    assert!(catalog.find_by_keyword("x").is_none());
    assert!(catalog.list_titles_sorted().is_empty());
    assert_eq!(
        catalog.keyword_listing(),
        "No keywords are registered in the catalogue."
    );
}

#[test]
fn churn_keeps_indexes_consistent() {
    let config = CatalogConfig {
        title_buckets: 7,
        keyword_buckets: 3,
        ..CatalogConfig::default()
    };
    let mut catalog = CatalogIndex::new(&config);
    let authors = ["Ann", "bob", "Cy", "ann"];
    let keywords = ["k0", "k1", "k2", "k3", "k4"];

    for round in 0..200u32 {
        let title = format!("title-{}", round % 37);
        if round % 3 == 0 {
            catalog.remove(&title);
        } else {
            let author = authors[(round % 4) as usize];
            let first = keywords[(round % 5) as usize];
            let second = keywords[(round % 2) as usize];
            let summary = Summary::new(title, [author], "", [first, second]).unwrap();
            catalog.add(summary);
        }
        assert!(catalog.is_consistent(), "inconsistent after round {round}");
    }
}

const TITLES: &[&str] = &["A", "a", "B", "C", "D"];
const AUTHORS: &[&str] = &["Ada", "ada", " ADA ", "Alan Turing", "alan turing ", "Grace"];
const KEYWORDS: &[&str] = &["x", "X", "y", "z"];

#[derive(Debug, Clone)]
enum CatalogOp {
    Add {
        title: &'static str,
        authors: Vec<&'static str>,
        keywords: Vec<&'static str>,
    },
    Remove(&'static str),
}

fn catalog_op() -> impl Strategy<Value = CatalogOp> {
    prop_oneof![
        3 => (
            prop::sample::select(TITLES),
            prop::collection::vec(prop::sample::select(AUTHORS), 1..4),
            prop::collection::vec(prop::sample::select(KEYWORDS), 0..4),
        )
            .prop_map(|(title, authors, keywords)| CatalogOp::Add {
                title,
                authors,
                keywords,
            }),
        1 => prop::sample::select(TITLES).prop_map(CatalogOp::Remove),
    ]
}

/// Plain list of live summaries, oldest first.
struct ModelEntry {
    title: &'static str,
    authors: Vec<&'static str>,
    keywords: Vec<&'static str>,
}

fn canonical_author(name: &str) -> String {
    name.trim().to_lowercase()
}

fn found_titles(found: Option<catalog_core::LinkedSequence<&Summary>>) -> Vec<String> {
    found
        .map(|summaries| {
            summaries
                .into_iter()
                .map(|summary| summary.title().to_string())
                .collect()
        })
        .unwrap_or_default()
}

proptest! {
    #[test]
    fn arbitrary_add_remove_sequences_match_model(
        ops in prop::collection::vec(catalog_op(), 0..60)
    ) {
        let config = CatalogConfig {
            title_buckets: 3,
            keyword_buckets: 1,
            ..CatalogConfig::default()
        };
        let mut catalog = CatalogIndex::new(&config);
        let mut model: Vec<ModelEntry> = Vec::new();

        for op in ops {
            match op {
                CatalogOp::Add { title, authors, keywords } => {
                    let fresh = model.iter().all(|entry| entry.title != title);
                    let summary = Summary::new(title, authors.clone(), "", keywords.clone()).unwrap();
                    prop_assert_eq!(catalog.add(summary), fresh);
                    if fresh {
                        model.push(ModelEntry { title, authors, keywords });
                    }
                }
                CatalogOp::Remove(title) => {
                    let position = model.iter().position(|entry| entry.title == title);
                    prop_assert_eq!(catalog.remove(title), position.is_some());
                    if let Some(position) = position {
                        model.remove(position);
                    }
                }
            }

            prop_assert!(catalog.is_consistent());

            let mut expected_titles: Vec<&str> = model.iter().map(|entry| entry.title).collect();
            expected_titles.sort_unstable();
            let titles: Vec<&str> = catalog.list_titles_sorted().into_iter().collect();
            prop_assert_eq!(titles, expected_titles);

            let mut expected_keywords: Vec<&str> = model
                .iter()
                .flat_map(|entry| entry.keywords.iter().copied())
                .collect();
            expected_keywords.sort_unstable();
            expected_keywords.dedup();
            let keywords: Vec<&str> = catalog.list_keywords_sorted().into_iter().collect();
            prop_assert_eq!(&keywords, &expected_keywords);

            for keyword in KEYWORDS {
                let expected: Vec<String> = model
                    .iter()
                    .filter(|entry| entry.keywords.contains(keyword))
                    .map(|entry| entry.title.to_string())
                    .collect();
                prop_assert_eq!(found_titles(catalog.find_by_keyword(keyword)), expected);
            }

            let mut live_authors: Vec<String> = model
                .iter()
                .flat_map(|entry| entry.authors.iter().map(|name| canonical_author(name)))
                .collect();
            live_authors.sort_unstable();
            live_authors.dedup();
            prop_assert_eq!(catalog.author_count(), live_authors.len());

            for name in AUTHORS {
                let wanted = canonical_author(name);
                let expected: Vec<String> = model
                    .iter()
                    .filter(|entry| entry.authors.iter().any(|author| canonical_author(author) == wanted))
                    .map(|entry| entry.title.to_string())
                    .collect();
                prop_assert_eq!(found_titles(catalog.find_by_author(name)), expected);
            }
        }
    }
}
