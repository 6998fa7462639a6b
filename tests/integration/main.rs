//! HTTP-level integration tests against the in-memory store.

mod health_test;
mod helpers;
mod module_test;
mod privacy_test;
mod session_test;
