use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_overrides() {
    let info = BuildInfo::from_lookup(lookup(&[]), false, ResolverFailurePolicy::FailClosed);
    assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(info.commit, "local");
    assert_eq!(info.env, "development");
}

#[test]
fn overrides_are_echoed_verbatim() {
    let info = BuildInfo::from_lookup(
        lookup(&[("APP_VERSION", "2.4.1"), ("GIT_COMMIT", "9f3c2ab"), ("APP_ENV", "production")]),
        false,
        ResolverFailurePolicy::FailClosed,
    );
    assert_eq!(info.version, "2.4.1");
    assert_eq!(info.commit, "9f3c2ab");
    assert_eq!(info.env, "production");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let info =
        BuildInfo::from_lookup(lookup(&[("GIT_COMMIT", ""), ("APP_ENV", "  ")]), false, ResolverFailurePolicy::FailClosed);
    assert_eq!(info.commit, DEFAULT_COMMIT);
    assert_eq!(info.env, DEFAULT_ENV);
}

#[test]
fn features_reflect_transport_and_policy() {
    let plain = BuildInfo::from_lookup(lookup(&[]), false, ResolverFailurePolicy::FailClosed);
    assert_eq!(plain.features.auth, "session-cookie");
    assert_eq!(plain.features.transport, "http");
    assert_eq!(plain.features.session_failure, "fail-closed");

    let secure = BuildInfo::from_lookup(lookup(&[]), true, ResolverFailurePolicy::ServiceUnavailable);
    assert_eq!(secure.features.transport, "https");
    assert_eq!(secure.features.session_failure, "unavailable");
}

#[test]
fn response_shape_uses_camel_case_string_fields() {
    let info = BuildInfo::from_lookup(lookup(&[]), false, ResolverFailurePolicy::FailClosed);
    let json = serde_json::to_value(info.response()).unwrap();
    let obj = json.as_object().unwrap();

    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["buildTime", "commit", "env", "features", "version"]);

    for (key, value) in obj {
        if key != "features" {
            assert!(value.is_string(), "{key} should be a string");
        }
    }
    for (key, value) in json["features"].as_object().unwrap() {
        assert!(value.is_string(), "features.{key} should be a string");
    }
    assert!(json["features"].get("sessionFailure").is_some());
}

#[test]
fn build_time_is_rfc3339() {
    let info = BuildInfo::from_lookup(lookup(&[]), false, ResolverFailurePolicy::FailClosed);
    let at = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    let resp = info.response_at(at);
    assert_eq!(resp.build_time, "2023-11-14T22:13:20Z");
}

#[test]
fn build_time_is_generated_per_response() {
    let info = BuildInfo::from_lookup(lookup(&[]), false, ResolverFailurePolicy::FailClosed);
    let earlier = info.response_at(OffsetDateTime::from_unix_timestamp(0).unwrap());
    let now = info.response();
    assert_ne!(earlier.build_time, now.build_time);
    assert!(now.build_time.ends_with('Z'));
}
