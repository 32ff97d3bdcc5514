use std::collections::HashSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use taxon_engine::{Engine, EngineConfig};
use taxon_gallery::filter_images;
use taxon_indexer::{CompletenessAnalyzer, CompletenessRow, PathIndexer};
use taxon_query::{apply, Filter, FilterMode, FilterUpdate, MatchedText, SearchOptions};
use taxon_value::{Collection, RecordId};

fn init_logging() {
    let _ = taxon_engine::logging::init(false);
}

fn taxa() -> Collection {
    Collection::from_json(json!([
        {"species": "a", "habitat": {"type": "forest"}},
        {"species": "b", "habitat": {"type": "desert"}},
        {"species": "c"}
    ]))
    .expect("array fixture")
}

fn mimosa() -> Collection {
    Collection::from_json(json!([
        {
            "specificEpithet": "pudica",
            "elevation": 100,
            "vernacularNames": ["sensitive plant", "dormideira"],
            "leaf": {
                "pinnae": {"pairs": 2},
                "imageUrl": "https://img/pudica-leaf.jpg",
                "imageUrlLegend": "Leaf of M. pudica"
            },
            "specimens": [
                {"collector": "Silva", "year": 1990},
                {"collector": "Lima"}
            ]
        },
        {
            "specificEpithet": "tenuiflora",
            "elevation": 250,
            "vernacularNames": ["jurema-preta"],
            "flower": {"color": "white", "imageUrl": "https://img/tenuiflora-flower.jpg"},
            "specimens": []
        },
        {
            "specificEpithet": "caesalpiniifolia",
            "elevation": "100",
            "leaf": {"pinnae": {}},
            "notes": null
        }
    ]))
    .expect("array fixture")
}

#[test]
fn worked_example_from_three_records() {
    init_logging();
    let records = taxa();
    let index = PathIndexer::default().index(&records).expect("index");

    for path in ["species", "habitat", "habitat.type"] {
        assert!(index.contains_path(path), "missing {path}");
    }
    assert_eq!(index.options("habitat.type"), ["desert", "forest"]);

    let report = CompletenessAnalyzer::analyze(&records, &index.all_paths);
    assert_eq!(
        report.row("habitat.type"),
        Some(&CompletenessRow {
            path: "habitat.type".to_string(),
            has: 2,
            missing: 1
        })
    );

    let ids = apply(&records, &[Filter::equals("habitat.type", "forest")]);
    assert_eq!(ids, vec![0]);
    assert_eq!(records.label(ids[0], "species").as_deref(), Some("a"));
}

#[test]
fn engine_tracks_filters_gallery_and_search() {
    init_logging();
    let config = EngineConfig {
        label_key: Some("specificEpithet".to_string()),
        ..EngineConfig::default()
    };
    let mut engine = Engine::load(mimosa(), config).expect("load");

    assert_eq!(engine.gallery().len(), 2);
    assert_eq!(engine.gallery_view().len(), 2);
    assert_eq!(engine.value_options("elevation"), ["100", "250"]);
    assert_eq!(engine.value_options("specimens.collector"), ["Lima", "Silva"]);

    // Numeric field stored as number and as string both match "100"
    let idx = engine
        .add_filter(Filter::equals("elevation", "100"))
        .expect("add elevation filter");
    assert_eq!(engine.filtered_ids(), &[0, 2]);
    let labels: Vec<Option<&str>> = engine
        .gallery_view()
        .iter()
        .map(|img| img.label.as_deref())
        .collect();
    assert_eq!(labels, vec![Some("pudica")]);

    engine
        .update_filter(idx, FilterUpdate::Path("vernacularNames".into()))
        .expect("switch path");
    assert_eq!(engine.filters()[idx].value(), "");
    // Incomplete equality filter does not restrict
    assert_eq!(engine.filtered_ids(), &[0, 1, 2]);

    engine
        .update_filter(idx, FilterUpdate::Value("jurema-preta".into()))
        .expect("set value");
    assert_eq!(engine.filtered_ids(), &[1]);
    let view = engine.gallery_view();
    assert_eq!(view.len(), 1);
    assert_eq!(view.get(0).map(|i| i.path.as_str()), Some("flower"));

    let results = engine
        .search_with("SILVA", SearchOptions::default(), 10)
        .expect("search");
    assert_eq!(results.total, 1);
    assert_eq!(results.hits[0].path, "specimens[0].collector");
    assert_eq!(results.hits[0].matched, MatchedText::Value("Silva".into()));
    assert_eq!(results.hits[0].label.as_deref(), Some("pudica"));
}

#[test]
fn every_offered_option_selects_its_record() {
    let collection = Collection::from_json(json!([
        {"grid": [["a", "b"], ["c"]]},
        {"grid": ["d"]}
    ]))
    .expect("array fixture");
    let mut engine = Engine::load(collection, EngineConfig::default()).expect("load");
    let options = engine.value_options("grid").to_vec();
    assert_eq!(options, ["a", "b", "c", "d"]);

    let idx = engine.add_filter(Filter::equals("grid", "a")).expect("add");
    for option in options {
        engine
            .update_filter(idx, FilterUpdate::Value(option.clone()))
            .expect("set value");
        let expected: &[RecordId] = if option == "d" { &[1] } else { &[0] };
        assert_eq!(engine.filtered_ids(), expected, "option {option}");
    }
}

#[test]
fn existence_filter_treats_null_as_present() {
    let mut engine = Engine::load(mimosa(), EngineConfig::default()).expect("load");
    engine.add_filter(Filter::exists("notes")).expect("add");
    assert_eq!(engine.filtered_ids(), &[2]);
}

#[test]
fn completeness_ignores_empty_containers() {
    let engine = Engine::load(mimosa(), EngineConfig::default()).expect("load");
    let report = engine.completeness();
    assert_eq!(report.total, 3);

    let pinnae = report.row("leaf.pinnae").expect("leaf.pinnae row");
    assert_eq!((pinnae.has, pinnae.missing), (1, 2));
    let specimens = report.row("specimens").expect("specimens row");
    assert_eq!((specimens.has, specimens.missing), (1, 2));
    let notes = report.row("notes").expect("notes row");
    assert_eq!((notes.has, notes.missing), (0, 3));

    assert!(engine.top_completeness().len() <= 10);
    assert!(report
        .rows
        .windows(2)
        .all(|pair| pair[0].has >= pair[1].has));
}

#[test]
fn mode_change_clears_value_before_evaluation() {
    let mut engine = Engine::load(taxa(), EngineConfig::default()).expect("load");
    let idx = engine
        .add_filter(Filter::equals("habitat.type", "forest"))
        .expect("add");
    engine
        .update_filter(idx, FilterUpdate::Mode(FilterMode::PathExists))
        .expect("mode");

    let filter = &engine.filters()[idx];
    assert_eq!(filter.value(), "");
    assert_eq!(filter.path(), "habitat.type");
    assert_eq!(engine.filtered_ids(), &[0, 1]);
}

#[test]
fn search_cap_does_not_change_result_order() {
    let engine = Engine::load(mimosa(), EngineConfig::default()).expect("load");
    let options = SearchOptions {
        search_keys: true,
        search_values: false,
    };
    let full = engine.search_with("i", options, usize::MAX).expect("search");
    let capped = engine.search_with("i", options, 3).expect("search");
    assert_eq!(capped.total, full.total);
    assert_eq!(capped.hits[..], full.hits[..3]);
}

proptest! {
    #[test]
    fn proptest_gallery_view_matches_filtered_owners(
        with_image in prop::collection::vec(any::<bool>(), 0..12),
        kinds in prop::collection::vec(0u8..3, 0..12),
        wanted in 0u8..3,
    ) {
        let records: Vec<serde_json::Value> = with_image
            .iter()
            .zip(kinds.iter())
            .enumerate()
            .map(|(i, (&img, &kind))| {
                if img {
                    json!({"kind": kind, "photo": {"imageUrl": format!("{i}.jpg")}})
                } else {
                    json!({"kind": kind})
                }
            })
            .collect();
        let collection = Collection::from_json(serde_json::Value::Array(records)).expect("array");
        let mut engine = Engine::load(collection, EngineConfig::default()).expect("load");

        if engine.path_index().is_value_path("kind") {
            engine
                .add_filter(Filter::equals("kind", wanted.to_string()))
                .expect("add");
        }

        let ids: HashSet<RecordId> = engine.filtered_ids().iter().copied().collect();
        let expected = filter_images(engine.gallery(), &ids);
        prop_assert_eq!(engine.gallery_view(), expected.clone());
        prop_assert!(expected.iter().all(|img| ids.contains(&img.owner)));

        let mut last = None;
        for img in expected.iter() {
            prop_assert!(last.map_or(true, |prev| prev <= img.owner));
            last = Some(img.owner);
        }
    }

    #[test]
    fn proptest_identity_filter_keeps_collection(len in 0usize..20) {
        let records: Vec<serde_json::Value> = (0..len).map(|i| json!({"n": i})).collect();
        let collection = Collection::from_json(serde_json::Value::Array(records)).expect("array");
        let engine = Engine::load(collection, EngineConfig::default()).expect("load");
        let all: Vec<RecordId> = (0..len).collect();
        prop_assert_eq!(engine.filtered_ids(), all.as_slice());
    }
}
