mod common;

use campdir_core::{
    models::{CampQuery, CampTerms, Listing, NewCamp, SortKey, Taxonomy},
    Database, DirectoryError,
};
use common::{approved, create_test_db, insert, linked, priced, raw_connection, season, term};
use jiff::civil::date;

fn run(db: &Database, query: &CampQuery) -> Vec<String> {
    db.search_camps(query)
        .expect("Query failed")
        .into_page()
        .items
        .into_iter()
        .map(|c| c.name)
        .collect()
}

#[test]
fn test_price_filter_uses_overlap() {
    let (_temp_file, mut db) = create_test_db();
    insert(&mut db, priced(approved("Overlapping"), 4000, 6000));
    insert(&mut db, priced(approved("Above"), 6000, 8000));
    insert(&mut db, priced(approved("Below"), 100, 900));
    insert(&mut db, approved("Unpriced"));

    let query = CampQuery {
        price_min: Some(1000),
        price_max: Some(5000),
        ..CampQuery::new()
    };
    assert_eq!(run(&db, &query), ["Overlapping"]);

    // A single bound still requires both camp prices to be known.
    let query = CampQuery {
        price_min: Some(5000),
        ..CampQuery::new()
    };
    assert_eq!(run(&db, &query), ["Above", "Overlapping"]);
}

#[test]
fn test_date_filter_uses_overlap() {
    let (_temp_file, mut db) = create_test_db();
    insert(
        &mut db,
        season(approved("Mid June"), date(2026, 6, 15), date(2026, 7, 15)),
    );
    insert(
        &mut db,
        season(approved("July"), date(2026, 7, 1), date(2026, 8, 1)),
    );
    insert(&mut db, approved("No Season"));

    let query = CampQuery {
        date_from: Some(date(2026, 6, 1)),
        date_to: Some(date(2026, 6, 30)),
        ..CampQuery::new()
    };
    assert_eq!(run(&db, &query), ["Mid June"]);
}

#[test]
fn test_type_and_week_filters_must_both_match() {
    let (_temp_file, mut db) = create_test_db();
    let day_camp = term(&mut db, Taxonomy::Type, "Day Camp");
    let two_weeks = term(&mut db, Taxonomy::Week, "2 Weeks");
    let four_weeks = term(&mut db, Taxonomy::Week, "4 Weeks");

    let id = insert(
        &mut db,
        linked(
            approved("Camp Birchwood"),
            CampTerms {
                types: vec![day_camp.id],
                weeks: vec![two_weeks.id],
                activities: Vec::new(),
            },
        ),
    );

    let query = CampQuery {
        type_id: Some(day_camp.id),
        week_id: Some(two_weeks.id),
        ..CampQuery::new()
    };
    let page = db.search_camps(&query).unwrap().into_page();
    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, id);
    assert_eq!(page.items[0].type_names, ["Day Camp"]);
    assert_eq!(page.items[0].week_names, ["2 Weeks"]);

    let query = CampQuery {
        type_id: Some(day_camp.id),
        week_id: Some(four_weeks.id),
        ..CampQuery::new()
    };
    assert!(run(&db, &query).is_empty());
}

#[test]
fn test_duplicate_pivot_rows_list_camp_once() {
    let (temp_file, mut db) = create_test_db();
    let day_camp = term(&mut db, Taxonomy::Type, "Day Camp");
    let two_weeks = term(&mut db, Taxonomy::Week, "2 Weeks");
    let id = insert(
        &mut db,
        linked(
            approved("Camp Birchwood"),
            CampTerms {
                types: vec![day_camp.id],
                weeks: vec![two_weeks.id],
                activities: Vec::new(),
            },
        ),
    );

    // Legacy data may carry repeated links; nothing in the schema forbids it.
    let raw = raw_connection(temp_file.path());
    for _ in 0..2 {
        raw.execute(
            "INSERT INTO camp_type_links (camp_id, term_id) VALUES (?1, ?2)",
            [id as i64, day_camp.id as i64],
        )
        .unwrap();
    }
    raw.execute(
        "INSERT INTO camp_week_links (camp_id, term_id) VALUES (?1, ?2)",
        [id as i64, two_weeks.id as i64],
    )
    .unwrap();

    let query = CampQuery {
        type_id: Some(day_camp.id),
        week_id: Some(two_weeks.id),
        ..CampQuery::new()
    };
    let page = db.search_camps(&query).unwrap().into_page();
    assert_eq!(page.total, 1);
    let ids: Vec<_> = page.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, [id]);
    assert_eq!(page.items[0].type_names, ["Day Camp"]);
}

#[test]
fn test_pagination_clamps_to_last_page() {
    let (_temp_file, mut db) = create_test_db();
    for i in 0..45 {
        insert(&mut db, approved(&format!("Camp {i:02}")));
    }

    let page_of = |page: u32| {
        db.search_camps(&CampQuery {
            page,
            ..CampQuery::new()
        })
        .unwrap()
        .into_page()
    };

    let first = page_of(1);
    assert_eq!(first.items.len(), 20);
    assert_eq!(first.total, 45);
    assert_eq!(first.total_pages, 3);

    let third = page_of(3);
    assert_eq!(third.items.len(), 5);
    assert_eq!(third.items[0].name, "Camp 40");

    let clamped = page_of(99);
    assert_eq!(clamped.page, 3);
    assert_eq!(clamped.items, third.items);

    let zero = page_of(0);
    assert_eq!(zero.page, 1);
    assert_eq!(zero.items, first.items);
}

#[test]
fn test_unapproved_camps_never_listed() {
    let (_temp_file, mut db) = create_test_db();
    let day_camp = term(&mut db, Taxonomy::Type, "Day Camp");
    let hidden = linked(
        priced(
            season(
                NewCamp {
                    city: Some("Lakeview".to_string()),
                    state: Some("VT".to_string()),
                    ..NewCamp::named("Hidden Lake Camp")
                },
                date(2026, 6, 1),
                date(2026, 8, 1),
            ),
            100,
            10_000,
        ),
        CampTerms {
            types: vec![day_camp.id],
            ..CampTerms::default()
        },
    );
    insert(&mut db, hidden);

    let queries = [
        CampQuery::new(),
        CampQuery {
            search: Some("Lake".to_string()),
            state: Some("vt".to_string()),
            type_id: Some(day_camp.id),
            price_min: Some(0),
            price_max: Some(100_000),
            date_from: Some(date(2026, 1, 1)),
            date_to: Some(date(2026, 12, 31)),
            ..CampQuery::new()
        },
    ];
    for query in &queries {
        let page = db.search_camps(query).unwrap().into_page();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }
    assert!(db.featured_camps(10).unwrap().is_empty());
}

#[test]
fn test_search_matches_any_text_field() {
    let (_temp_file, mut db) = create_test_db();
    insert(&mut db, approved("Lake Placid Summer Camp"));
    insert(
        &mut db,
        NewCamp {
            city: Some("Lakeview".to_string()),
            ..approved("Camp Cedar")
        },
    );
    insert(&mut db, approved("Mountain Adventures"));

    let query = CampQuery {
        search: Some("lake".to_string()),
        ..CampQuery::new()
    };
    assert_eq!(run(&db, &query), ["Camp Cedar", "Lake Placid Summer Camp"]);
}

#[test]
fn test_search_treats_wildcards_literally() {
    let (_temp_file, mut db) = create_test_db();
    insert(&mut db, approved("100% Fun Camp"));
    insert(&mut db, approved("Camp Tall Pines"));

    let query = CampQuery {
        search: Some("%".to_string()),
        ..CampQuery::new()
    };
    assert_eq!(run(&db, &query), ["100% Fun Camp"]);

    let query = CampQuery {
        search: Some("_".to_string()),
        ..CampQuery::new()
    };
    assert!(run(&db, &query).is_empty());
}

#[test]
fn test_name_sort_spans_pages() {
    let (_temp_file, mut db) = create_test_db();
    let names = ["delta", "Alpha", "charlie", "Bravo", "echo"];
    for i in 0..25 {
        insert(&mut db, approved(&format!("{} {i:02}", names[i % names.len()])));
    }

    let mut all = Vec::new();
    for page in 1..=2 {
        all.extend(run(
            &db,
            &CampQuery {
                page,
                ..CampQuery::new()
            },
        ));
    }
    assert_eq!(all.len(), 25);
    let lowered: Vec<_> = all.iter().map(|n| n.to_lowercase()).collect();
    assert!(lowered.windows(2).all(|w| w[0] <= w[1]));

    let descending = run(
        &db,
        &CampQuery {
            sort: SortKey::NameDesc,
            ..CampQuery::new()
        },
    );
    assert!(descending[0].starts_with("echo"));
}

#[test]
fn test_price_sort_puts_unknown_prices_last() {
    let (_temp_file, mut db) = create_test_db();
    insert(&mut db, approved("Unpriced"));
    insert(&mut db, priced(approved("Pricey"), 900, 2000));
    insert(&mut db, priced(approved("Cheap"), 100, 300));

    let query = CampQuery {
        sort: SortKey::PriceAsc,
        ..CampQuery::new()
    };
    assert_eq!(run(&db, &query), ["Cheap", "Pricey", "Unpriced"]);

    let query = CampQuery {
        sort: SortKey::PriceDesc,
        ..CampQuery::new()
    };
    assert_eq!(run(&db, &query), ["Pricey", "Cheap", "Unpriced"]);
}

#[test]
fn test_random_sort_lists_each_camp_once() {
    let (_temp_file, mut db) = create_test_db();
    for i in 0..10 {
        insert(&mut db, approved(&format!("Camp {i}")));
    }

    let mut names = run(
        &db,
        &CampQuery {
            sort: SortKey::Random,
            ..CampQuery::new()
        },
    );
    assert_eq!(names.len(), 10);
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 10);
}

#[test]
fn test_lazy_query_without_criteria_is_not_run() {
    let (_temp_file, mut db) = create_test_db();
    insert(&mut db, approved("Camp Birchwood"));

    let lazy = CampQuery {
        lazy: true,
        search: Some("   ".to_string()),
        ..CampQuery::new()
    };
    assert_eq!(db.search_camps(&lazy).unwrap(), Listing::NotQueried);

    let lazy_with_state = CampQuery {
        state: Some("VT".to_string()),
        ..lazy
    };
    assert!(db.search_camps(&lazy_with_state).unwrap().page().is_some());
}

#[test]
fn test_summary_previews_active_activities() {
    let (_temp_file, mut db) = create_test_db();
    let mut activities = Vec::new();
    for name in ["Archery", "Canoeing", "Drama", "Hiking", "Swimming", "Tennis"] {
        activities.push(term(&mut db, Taxonomy::Activity, name).id);
    }
    db.update_term(Taxonomy::Activity, activities[0], None, None, Some(false))
        .unwrap();

    insert(
        &mut db,
        linked(
            approved("Camp Birchwood"),
            CampTerms {
                activities,
                ..CampTerms::default()
            },
        ),
    );

    let page = db.search_camps(&CampQuery::new()).unwrap().into_page();
    let summary = &page.items[0];
    assert_eq!(
        summary.activity_names,
        ["Canoeing", "Drama", "Hiking", "Swimming"]
    );
    assert_eq!(summary.activity_count, 5);
    assert_eq!(summary.hidden_activities(), 1);
}

#[test]
fn test_failed_relink_leaves_camp_untouched() {
    let (_temp_file, mut db) = create_test_db();
    let day_camp = term(&mut db, Taxonomy::Type, "Day Camp");
    let id = insert(
        &mut db,
        linked(
            approved("Camp Birchwood"),
            CampTerms {
                types: vec![day_camp.id],
                ..CampTerms::default()
            },
        ),
    );

    let err = db
        .update_camp(
            id,
            linked(
                approved("Renamed"),
                CampTerms {
                    types: vec![day_camp.id, 999],
                    ..CampTerms::default()
                },
            ),
        )
        .unwrap_err();
    assert!(matches!(err, DirectoryError::TermNotFound { id: 999, .. }));

    let camp = db.get_camp(id).unwrap().unwrap();
    assert_eq!(camp.name, "Camp Birchwood");
    assert_eq!(camp.types.len(), 1);

    let query = CampQuery {
        type_id: Some(day_camp.id),
        ..CampQuery::new()
    };
    assert_eq!(run(&db, &query), ["Camp Birchwood"]);
}

#[test]
fn test_query_failure_is_an_error_not_an_empty_page() {
    let (temp_file, mut db) = create_test_db();
    let day_camp = term(&mut db, Taxonomy::Type, "Day Camp");
    insert(
        &mut db,
        linked(
            approved("Camp Birchwood"),
            CampTerms {
                types: vec![day_camp.id],
                ..CampTerms::default()
            },
        ),
    );

    let raw = raw_connection(temp_file.path());
    raw.execute_batch("ALTER TABLE camp_type_links RENAME TO camp_type_links_old")
        .expect("Failed to rename link table");

    let query = CampQuery {
        type_id: Some(day_camp.id),
        ..CampQuery::new()
    };
    let err = db.search_camps(&query).unwrap_err();
    assert!(matches!(err, DirectoryError::Database { .. }), "got {err:?}");
}
