//! Profile directory persistence tests.

use super::helpers::{store, unique_email};
use laneboard::board::{
    domain::{EmailAddress, Profile, UserId},
    ports::ProfileDirectory,
};

fn profile(user_id: UserId, email: &str, name: Option<&str>) -> Profile {
    Profile::new(
        user_id,
        EmailAddress::new(email).expect("valid email"),
        name,
        None,
    )
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn upsert_replaces_existing_profile() {
    let store = store();
    let user_id = UserId::new();
    let email = unique_email("upsert");

    store
        .upsert_profile(&profile(user_id, &email, Some("First")))
        .await
        .expect("insert should succeed");
    store
        .upsert_profile(&profile(user_id, &email, Some("Second")))
        .await
        .expect("update should succeed");
    let loaded = store
        .find_profile(user_id)
        .await
        .expect("lookup should succeed")
        .expect("profile exists");

    assert_eq!(loaded.name(), "Second");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn prefix_search_treats_wildcards_literally() {
    let store = store();
    let marker = uuid::Uuid::new_v4().simple().to_string();
    let literal = format!("p_{marker}@example.com");
    let lookalike = format!("px{marker}@example.com");
    store
        .upsert_profile(&profile(UserId::new(), &literal, None))
        .await
        .expect("insert should succeed");
    store
        .upsert_profile(&profile(UserId::new(), &lookalike, None))
        .await
        .expect("insert should succeed");

    let found = store
        .search_profiles_by_email_prefix(&format!("p_{marker}"), 10)
        .await
        .expect("search should succeed");

    let emails: Vec<&str> = found.iter().map(|entry| entry.email().as_str()).collect();
    assert_eq!(emails, [literal.as_str()]);
}
