//! Lookup example.
//!
//! Demonstrates the success and failure shapes of a credential lookup using
//! the in-memory mock store.
//!
//! Run with: cargo run --example lookup

use credfetch::response::to_json;
use credfetch::stores::mock::MockStore;
use credfetch::{Config, CredentialQuery, Retriever, StoreKind, StoredCredential};

#[tokio::main]
async fn main() -> credfetch::Result<()> {
    println!("=== Credential Lookup Example ===\n");

    let store = MockStore::with_credentials(vec![StoredCredential::new(
        "www.sampledomain.com",
        "stevejoseph@sampledomain.com",
        "example-password",
    )]);
    let mut retriever = Retriever::with_store(Box::new(store), Config::new(StoreKind::Mock));

    println!("1. Existing credential:");
    let query = CredentialQuery::new("SteveJoseph@SampleDomain.com").with_target("www.sampledomain.com");
    match retriever.retrieve(&query).await {
        Ok(cred) => println!("   ✓ {} on {}", cred.user_name, cred.target_name),
        Err(failure) => println!("   Unexpected failure: {}", failure),
    }

    println!("\n2. Unknown user:");
    let query = CredentialQuery::new("nobody@sampledomain.com");
    let result = retriever.retrieve(&query).await;
    println!("   {}", serde_json::to_string(&to_json(&result)?)?);

    Ok(())
}
