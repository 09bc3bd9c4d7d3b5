use campus_core::db::migrations::latest_version;
use campus_core::db::open_db_in_memory;
use campus_core::{
    Article, HelpRequest, MenuItemReview, RecommendationRequest, RepoError, Repository,
    SqliteRepository, UcsbDiningCommonsMenuItem, UcsbOrganization,
};
use chrono::NaiveDateTime;
use rusqlite::Connection;

fn ldt(value: &str) -> NaiveDateTime {
    value.parse().unwrap()
}

fn sample_article(title: &str) -> Article {
    Article::new(
        title,
        "https://dailynexus.com/2025-04-17/bingo/",
        "first post",
        "binouye@ucsb.edu",
        ldt("2022-01-03T00:00:00"),
    )
}

#[test]
fn save_assigns_generated_key_and_find_by_id_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::<Article>::try_new(&conn).unwrap();

    let saved = repo.save(sample_article("A")).unwrap();
    assert_eq!(saved.id, 1);

    let loaded = repo.find_by_id(&saved.id).unwrap().unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn find_by_id_returns_none_for_missing_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::<Article>::try_new(&conn).unwrap();

    assert!(repo.find_by_id(&42).unwrap().is_none());
}

#[test]
fn find_all_preserves_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::<UcsbDiningCommonsMenuItem>::try_new(&conn).unwrap();

    let first = repo
        .save(UcsbDiningCommonsMenuItem::new("DLG", "Eggs", "Grill"))
        .unwrap();
    let second = repo
        .save(UcsbDiningCommonsMenuItem::new("ortega", "Tofu Banh Mi", "Entrees"))
        .unwrap();

    let all = repo.find_all().unwrap();
    assert_eq!(all, vec![first, second]);
}

#[test]
fn save_with_assigned_key_overwrites_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::<HelpRequest>::try_new(&conn).unwrap();

    let mut saved = repo
        .save(HelpRequest::new(
            "cgaucho@ucsb.edu",
            "s22-5pm-3",
            "7",
            ldt("2022-04-20T17:35:00"),
            "Need help with Swagger-ui",
            false,
        ))
        .unwrap();

    saved.solved = true;
    saved.explanation = "Dokku problems".to_string();
    repo.save(saved.clone()).unwrap();

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], saved);
}

#[test]
fn deleted_generated_keys_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::<MenuItemReview>::try_new(&conn).unwrap();

    let first = repo
        .save(MenuItemReview::new(
            7,
            "reviewer@ucsb.edu",
            5,
            ldt("2022-01-02T12:00:00"),
            "great",
        ))
        .unwrap();
    repo.delete(&first).unwrap();

    let second = repo
        .save(MenuItemReview::new(
            7,
            "reviewer@ucsb.edu",
            3,
            ldt("2022-01-03T12:00:00"),
            "fine",
        ))
        .unwrap();
    assert!(second.id > first.id);
    assert!(repo.find_by_id(&first.id).unwrap().is_none());
}

#[test]
fn delete_missing_row_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::<RecommendationRequest>::try_new(&conn).unwrap();

    let mut ghost = RecommendationRequest::new(
        "student@ucsb.edu",
        "prof@ucsb.edu",
        "grad school",
        ldt("2022-01-02T12:00:00"),
        ldt("2022-02-02T12:00:00"),
        false,
    );
    ghost.id = 9;

    let err = repo.delete(&ghost).unwrap_err();
    match err {
        RepoError::NotFound { entity, key } => {
            assert_eq!(entity, "RecommendationRequest");
            assert_eq!(key, "9");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn natural_key_records_upsert_by_code() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::<UcsbOrganization>::try_new(&conn).unwrap();

    repo.save(UcsbOrganization::new("ZPR", "ZETA PHI RHO", "ZETA PHI RHO", false))
        .unwrap();
    repo.save(UcsbOrganization::new("SKY", "SKYDIVING CLUB", "SKYDIVING CLUB AT UCSB", false))
        .unwrap();
    repo.save(UcsbOrganization::new("ZPR", "ZPR", "ZETA PHI RHO SORORITY", true))
        .unwrap();

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].org_code, "ZPR");
    assert_eq!(all[0].org_translation, "ZETA PHI RHO SORORITY");
    assert!(all[0].inactive);
    assert_eq!(all[1].org_code, "SKY");
}

#[test]
fn natural_key_record_without_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::<UcsbOrganization>::try_new(&conn).unwrap();

    let err = repo
        .save(UcsbOrganization::new("", "NONE", "NONE", false))
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingKey("UCSBOrganization")));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteRepository::<Article>::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteRepository::<Article>::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("articles"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE ucsb_dining_commons_menu_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            dining_commons_code TEXT NOT NULL,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteRepository::<UcsbDiningCommonsMenuItem>::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "ucsb_dining_commons_menu_items",
            column: "station"
        })
    ));
}
