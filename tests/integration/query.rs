//! SOQL and Tooling queries against a live org.

use super::common::client;
use dynforce::Context;
use std::collections::HashSet;
use std::time::Duration;

#[tokio::test]
#[ignore]
async fn test_query_pages_do_not_repeat() {
    let client = client();
    let ctx = Context::with_timeout(Duration::from_secs(120));

    let mut page = client
        .query(&ctx, "SELECT Id FROM User")
        .await
        .expect("query should succeed");
    let mut seen = HashSet::new();

    loop {
        for record in &page.records {
            let id = record.id().expect("query returns ids").to_string();
            assert!(seen.insert(id), "record repeated across pages");
        }
        if page.done {
            break;
        }
        let next = page
            .next_records_url
            .clone()
            .expect("undrained page has a continuation URL");
        page = client.query(&ctx, &next).await.expect("next page");
    }

    assert_eq!(seen.len() as u64, page.total_size);
}

#[tokio::test]
#[ignore]
async fn test_query_relationship_fields() {
    let client = client();
    let ctx = Context::with_timeout(Duration::from_secs(60));

    let page = client
        .query(&ctx, "SELECT Id, Name, Profile.Name FROM User LIMIT 1")
        .await
        .expect("query should succeed");
    let user = page.records.first().expect("org has at least one user");

    let profile = user
        .related_record("Profile", "Profile")
        .expect("Profile selected through the relationship");
    assert_eq!(profile.sobject_type(), "Profile");
    assert!(!profile.string_field("Name").is_empty());
    assert!(profile.is_live());
}

#[tokio::test]
#[ignore]
async fn test_tooling_query_and_anonymous_apex() {
    let client = client();
    let ctx = Context::with_timeout(Duration::from_secs(60));

    let tooling = client.tooling();
    let page = tooling
        .query(&ctx, "SELECT Id, Name FROM ApexClass LIMIT 5")
        .await
        .expect("tooling query should succeed");
    assert!(page.records.iter().all(|r| r.sobject_type() == "ApexClass"));

    let ok = client
        .execute_anonymous(&ctx, "System.debug('dynforce');")
        .await
        .expect("executeAnonymous should answer");
    assert!(ok.compiled && ok.success);

    let broken = client
        .execute_anonymous(&ctx, "System.debug('dynforce'")
        .await
        .expect("compile problems are reported in the result");
    assert!(!broken.compiled);
    assert!(broken.compile_problem.is_some());
}

#[tokio::test]
#[ignore]
async fn test_malformed_query_error() {
    let client = client();
    let err = client
        .query(&Context::background(), "SELECT Id FORM User")
        .await
        .expect_err("malformed query must fail");
    let fault = err.salesforce_error().expect("protocol error");
    assert_eq!(fault.http_status(), 400);
    assert_eq!(fault.error_code(), "MALFORMED_QUERY");
}
