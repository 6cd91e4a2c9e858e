//! Property tests for connection-string normalisation and pool options.

use db_infra::{engine_options, normalize_database_url};
use proptest::prelude::*;

fn host() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}(\\.[a-z]{2,6}){0,2}(:[0-9]{2,5})?"
}

fn credentials() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z][a-z0-9_]{0,10}@",
        "[a-z][a-z0-9_]{0,10}:[A-Za-z0-9%]{1,16}@",
    ]
}

fn database() -> impl Strategy<Value = String> {
    "/[a-z_][a-z0-9_]{0,15}"
}

fn extra_params() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("(pgbouncer|application_name|options|connect_timeout)=[a-z0-9]{1,8}", 0..3)
}

fn ssl_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("disable".to_string()),
        Just("allow".to_string()),
        Just("prefer".to_string()),
        Just("require".to_string()),
        Just("verify-full".to_string()),
    ]
}

proptest! {
    #[test]
    fn alias_scheme_keeps_every_other_component(
        creds in credentials(),
        host in host(),
        db in database(),
        params in extra_params(),
        fragment in proptest::option::of("[a-z]{1,8}"),
    ) {
        let query = params.join("&");
        let mut rest = format!("{creds}{host}{db}");
        if !query.is_empty() {
            rest.push('?');
            rest.push_str(&query);
        }

        let mut raw = format!("postgres://{rest}");
        if let Some(f) = &fragment {
            raw.push('#');
            raw.push_str(f);
        }

        let normalized = normalize_database_url(&raw).unwrap();
        prop_assert!(normalized.starts_with("postgresql://"));

        let mut expected = format!("postgresql://{rest}");
        expected.push(if query.is_empty() { '?' } else { '&' });
        expected.push_str("sslmode=require");
        if let Some(f) = &fragment {
            expected.push('#');
            expected.push_str(f);
        }
        prop_assert_eq!(normalized, expected);
    }

    #[test]
    fn existing_ssl_mode_is_never_overridden_or_duplicated(
        creds in credentials(),
        host in host(),
        db in database(),
        mut params in extra_params(),
        ssl in ssl_value(),
        position in 0usize..3,
        alias in any::<bool>(),
    ) {
        let at = position.min(params.len());
        params.insert(at, format!("sslmode={ssl}"));
        let scheme = if alias { "postgres" } else { "postgresql" };
        let raw = format!("{scheme}://{creds}{host}{db}?{}", params.join("&"));

        let normalized = normalize_database_url(&raw).unwrap();
        let expected_tail = &raw[scheme.len()..];
        prop_assert_eq!(&normalized, &format!("postgresql{expected_tail}"));
        prop_assert_eq!(normalized.matches("sslmode=").count(), 1);
        let expected_param = format!("sslmode={}", ssl);
        prop_assert!(normalized.contains(&expected_param));
    }

    #[test]
    fn canonical_without_ssl_gets_exactly_one_directive(
        creds in credentials(),
        host in host(),
        db in database(),
        params in extra_params(),
    ) {
        let query = params.join("&");
        let raw = if query.is_empty() {
            format!("postgresql://{creds}{host}{db}")
        } else {
            format!("postgresql://{creds}{host}{db}?{query}")
        };

        let normalized = normalize_database_url(&raw).unwrap();
        prop_assert_eq!(normalized.matches("sslmode=").count(), 1);
        prop_assert!(normalized.ends_with("sslmode=require"));
        prop_assert!(normalized.starts_with(&raw));
    }

    #[test]
    fn options_depend_only_on_database_family(
        host in host(),
        db in database(),
        file in "[a-z]{1,10}\\.db",
    ) {
        let server = engine_options(&normalize_database_url(&format!("postgres://{host}{db}")).unwrap());
        prop_assert!(server.pre_ping);
        prop_assert!(server.has_server_settings());
        prop_assert!(server.keepalive.is_some());
        prop_assert!(server.pool_size.is_some() && server.max_overflow.is_some());

        let embedded = engine_options(&normalize_database_url(&format!("sqlite:///{file}")).unwrap());
        prop_assert!(embedded.pre_ping);
        prop_assert!(!embedded.has_server_settings());
    }
}
