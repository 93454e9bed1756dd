//! Record CRUD walkthrough
//!
//! Creates a Case, reads it back, updates it, pages through a query and
//! deletes the Case again.
//!
//! Required environment variables:
//! - SF_INSTANCE_URL
//! - SF_ACCESS_TOKEN
//! Optional:
//! - SF_API_VERSION
//!
//! Run with: cargo run --example record_crud

use std::time::Duration;

use anyhow::Context as _;
use dynforce::{Context, SalesforceRestClient, Session};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let client = client_from_env()?;
    let ctx = Context::with_timeout(Duration::from_secs(60));

    println!("=== Record CRUD ===\n");

    // Create
    let case = client
        .sobject("Case")
        .set("Subject", "dynforce demo case")
        .set("Origin", "Web")
        .create(&ctx)
        .await?;
    let id = case.id().context("create returned no id")?.to_string();
    println!("✓ Created Case {id}");

    // Read
    let fetched = client.sobject("Case").get(&ctx, Some(id.as_str())).await?;
    println!(
        "✓ Fetched: subject={:?} status={:?}",
        fetched.string_field("Subject"),
        fetched.string_field("Status")
    );

    // Update from the created record; a fetched one also carries
    // read-only system fields the server rejects on PATCH.
    let updated = case
        .set("Subject", "dynforce demo case (updated)")
        .update(&ctx)
        .await?;
    let refetched = updated.get(&ctx, None).await?;
    println!(
        "✓ Updated Case {}: subject={:?}",
        updated.id().unwrap_or_default(),
        refetched.string_field("Subject")
    );

    // Query, one page at a time
    println!("\n=== Query ===\n");
    let mut page = client
        .query(&ctx, "SELECT Id, Subject FROM Case ORDER BY CreatedDate DESC LIMIT 5")
        .await?;
    loop {
        for record in &page.records {
            println!(
                "  {} {}",
                record.id().unwrap_or_default(),
                record.string_field("Subject")
            );
        }
        match page.next_records_url.clone() {
            Some(next) if !page.done => page = client.query(&ctx, &next).await?,
            _ => break,
        }
    }

    // Delete
    updated.delete(&ctx).await?;
    println!("\n✓ Deleted Case {id}");

    match updated.delete(&ctx).await {
        Err(err) if err.is_not_found() => {
            info!(error = %err, "second delete rejected as expected");
            println!("✓ Second delete rejected: {err}");
        }
        Err(err) => return Err(err.into()),
        Ok(()) => anyhow::bail!("second delete unexpectedly succeeded"),
    }

    Ok(())
}

fn client_from_env() -> anyhow::Result<SalesforceRestClient> {
    let instance_url = std::env::var("SF_INSTANCE_URL").context("SF_INSTANCE_URL is not set")?;
    let access_token = std::env::var("SF_ACCESS_TOKEN").context("SF_ACCESS_TOKEN is not set")?;

    let mut session = Session::new(instance_url, access_token)?;
    if let Ok(version) = std::env::var("SF_API_VERSION") {
        session = session.with_api_version(version);
    }
    Ok(SalesforceRestClient::with_session(session)?)
}
