// HTTP route tests
//
// Root and health endpoints, plus the JSON error body shape.
//
// Run all routes tests:
//   cargo test --test routes_tests

mod common;
mod support;

#[path = "suites/routes/mod.rs"]
mod routes;
