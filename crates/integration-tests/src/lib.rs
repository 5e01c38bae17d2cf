//! Integration tests for userhub.
//!
//! The profile service is external, so these tests run `ProfileClient`
//! against a `mockito` server that plays the service's part: success
//! bodies in both tolerated list shapes, structured and garbage error
//! bodies, and the session side effects of each flow.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p userhub-integration-tests
//! ```

use std::sync::Arc;

use userhub_client::{ClientConfig, MemorySessionStore, ProfileClient};

/// Build a client against the mock server with a fresh in-memory
/// session store, returning both.
///
/// # Panics
///
/// Panics if the client cannot be constructed; tests treat that as a
/// setup failure.
#[must_use]
pub fn test_client(server: &mockito::Server) -> (ProfileClient, Arc<MemorySessionStore>) {
    let config = ClientConfig::new(&server.url(), "unused-session.json")
        .expect("mock server url is valid");
    let store = Arc::new(MemorySessionStore::new());
    let client =
        ProfileClient::with_store(&config, store.clone()).expect("client construction");
    (client, store)
}
