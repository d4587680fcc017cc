//! Purpose: Lock the public `Jur` contract: validation order, exact messages, accessors.
//! Exports: Integration tests only.
//! Role: Behavioral compatibility checks for clients matching on error text.
//! Invariants: Error strings asserted here are byte-exact.

use jur::api::{ErrorKind, Jur, Request, Unit, Violation};
use serde_json::{Value, json};

const VALID_RESPONSE: &str = r#"{"message":null,"request":"get","data":[{"id":1,"name":"New in PHP 7.2","author":"Carlo Daniele"},{"id":2,"name":"Help for new PHP project","author":"Khalyomede"}],"debug":{"elapsed":27,"issued_at":1529617930807795,"resolved_at":1529617930807822}}"#;

const ELAPSED: i64 = 27;
const ISSUED_AT: i64 = 1_529_617_930_807_795;
const RESOLVED_AT: i64 = 1_529_617_930_807_822;

fn valid_value() -> Value {
    serde_json::from_str(VALID_RESPONSE).expect("fixture")
}

fn parse_err(value: &Value) -> jur::api::Error {
    Jur::new()
        .parse(&value.to_string())
        .map(|_| ())
        .expect_err("should be rejected")
}

fn assert_rejected(value: Value, expected: &str) {
    let err = parse_err(&value);
    assert_eq!(err.kind(), ErrorKind::InvalidEnvelope);
    assert_eq!(err.to_string(), expected);
}

#[test]
fn parse_returns_self_for_chaining() {
    let mut jur = Jur::new();
    let request = jur.issued().parse(VALID_RESPONSE).unwrap().request().unwrap();
    assert_eq!(request, Request::Get);
}

#[test]
fn empty_object_misses_message() {
    assert_rejected(
        json!({}),
        r#"The response is not a valid JUR (the attribute "message" is missing from the response)."#,
    );
}

#[test]
fn each_missing_top_level_attribute_is_named() {
    for key in ["message", "data", "request", "debug"] {
        let mut value = valid_value();
        value.as_object_mut().unwrap().remove(key);
        assert_rejected(
            value,
            &format!(
                "The response is not a valid JUR (the attribute \"{key}\" is missing from the response)."
            ),
        );
    }
}

#[test]
fn each_missing_debug_attribute_is_named() {
    for key in ["elapsed", "issued_at", "resolved_at"] {
        let mut value = valid_value();
        value["debug"].as_object_mut().unwrap().remove(key);
        assert_rejected(
            value,
            &format!(
                "The response is not a valid JUR (the attribute \"{key}\" is missing from the attribute \"debug\")."
            ),
        );
    }
}

#[test]
fn message_must_be_string_or_null() {
    for bad in [json!(2), json!(true), json!([]), json!({})] {
        let mut value = valid_value();
        value["message"] = bad;
        assert_rejected(
            value,
            r#"The response is not a valid JUR (the attribute "message" must be either a string or null)."#,
        );
    }
}

#[test]
fn request_must_be_a_known_verb() {
    for bad in [json!("GET"), json!("head"), json!(null), json!(1)] {
        let mut value = valid_value();
        value["request"] = bad;
        assert_rejected(
            value,
            r#"The response is not a valid JUR (the attribute "debug" must have one of the following value: get, post, put, patch, delete)."#,
        );
    }
}

#[test]
fn debug_timings_must_be_numbers() {
    for key in ["elapsed", "issued_at", "resolved_at"] {
        for bad in [Value::Null, json!("27"), json!([27]), json!(false)] {
            let mut value = valid_value();
            value["debug"][key] = bad;
            let err = parse_err(&value);
            assert_eq!(
                err.to_string(),
                format!(
                    "The response is not a valid JUR (the attribute \"{key}\" of the attribute \"debug\" must be a number)."
                )
            );
            assert_eq!(err.violation(), Some(Violation::DebugNotNumber(key)));
        }
    }
}

#[test]
fn every_verb_round_trips() {
    for request in Request::ALL {
        let mut value = valid_value();
        value["request"] = json!(request.as_str());
        let mut jur = Jur::new();
        jur.parse(&value.to_string()).unwrap();
        assert_eq!(jur.request().unwrap(), request);
        assert_eq!(jur.to_object().unwrap()["request"], request.as_str());
    }
}

#[test]
fn accessors_fail_before_parse() {
    let jur = Jur::new();
    let expected = "Unable to access the property of the response before without parsing it.";
    let errors = [
        jur.message().map(|_| ()).unwrap_err(),
        jur.request().map(|_| ()).unwrap_err(),
        jur.data().map(|_| ()).unwrap_err(),
        jur.to_object().map(|_| ()).unwrap_err(),
        jur.elapsed(Unit::default()).map(|_| ()).unwrap_err(),
        jur.issued_at(Unit::default()).map(|_| ()).unwrap_err(),
        jur.resolved_at(Unit::default()).map(|_| ()).unwrap_err(),
        jur.latency(Unit::default()).map(|_| ()).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::NotParsed);
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn message_accessor_returns_string_or_none() {
    let mut value = valid_value();
    value["message"] = json!("hello world");
    let mut jur = Jur::new();
    jur.parse(&value.to_string()).unwrap();
    assert_eq!(jur.message().unwrap(), Some("hello world"));

    jur.parse(VALID_RESPONSE).unwrap();
    assert_eq!(jur.message().unwrap(), None);
}

#[test]
fn data_and_object_are_returned_verbatim() {
    let jur: Jur = VALID_RESPONSE.parse().unwrap();
    assert_eq!(jur.data().unwrap(), &valid_value()["data"]);
    assert_eq!(jur.to_object().unwrap(), &valid_value());
}

#[test]
fn debug_timings_default_to_microseconds() {
    let jur: Jur = VALID_RESPONSE.parse().unwrap();
    assert_eq!(jur.elapsed(Unit::default()).unwrap(), ELAPSED);
    assert_eq!(jur.issued_at(Unit::default()).unwrap(), ISSUED_AT);
    assert_eq!(jur.resolved_at(Unit::default()).unwrap(), RESOLVED_AT);
    assert_eq!(jur.elapsed("microsecond").unwrap(), ELAPSED);
}

#[test]
fn debug_timings_convert_with_nearest_integer_rounding() {
    let jur: Jur = VALID_RESPONSE.parse().unwrap();
    assert_eq!(jur.elapsed("millisecond").unwrap(), 0);
    assert_eq!(jur.elapsed("second").unwrap(), 0);
    assert_eq!(jur.issued_at("millisecond").unwrap(), 1_529_617_930_808);
    assert_eq!(jur.issued_at(Unit::Second).unwrap(), 1_529_617_931);
    assert_eq!(jur.resolved_at(Unit::Millisecond).unwrap(), 1_529_617_930_808);
    assert_eq!(jur.resolved_at("Second").unwrap(), 1_529_617_931);
}

#[test]
fn unknown_units_are_rejected_after_parse_check() {
    let jur: Jur = VALID_RESPONSE.parse().unwrap();
    let errors = [
        jur.elapsed("minute").unwrap_err(),
        jur.issued_at("ms").unwrap_err(),
        jur.resolved_at("").unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::UnsupportedUnit);
        assert_eq!(err.to_string(), "this unit is not supported.");
    }
    let unparsed = Jur::new();
    assert_eq!(
        unparsed.elapsed("minute").unwrap_err().kind(),
        ErrorKind::NotParsed
    );
}

#[test]
fn latency_requires_issued_time() {
    let jur: Jur = VALID_RESPONSE.parse().unwrap();
    let err = jur.latency(Unit::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IssuedTimeNotSet);
    assert_eq!(err.to_string(), "The issued time should be initialized first.");
}

#[test]
fn latency_rejects_unknown_unit() {
    let mut jur: Jur = VALID_RESPONSE.parse().unwrap();
    jur.issued();
    assert_eq!(
        jur.latency("hour").unwrap_err().to_string(),
        "this unit is not supported."
    );
}

#[test]
fn latency_is_client_issue_minus_server_issue() {
    let mut jur: Jur = VALID_RESPONSE.parse().unwrap();
    jur.issued_with(ISSUED_AT + 1_500_000);
    assert_eq!(jur.latency(Unit::default()).unwrap(), 1_500_000);
    assert_eq!(jur.latency("millisecond").unwrap(), 1_500);
    assert_eq!(jur.latency(Unit::Second).unwrap(), 2);

    jur.issued_with(ISSUED_AT - 2_000);
    assert_eq!(jur.latency("millisecond").unwrap(), -2);
}

#[test]
fn latency_with_wall_clock_is_bounded() {
    let mut jur: Jur = VALID_RESPONSE.parse().unwrap();
    jur.issued();
    let stamped = jur.issued_at_client().expect("stamped");
    assert_eq!(jur.latency(Unit::default()).unwrap(), stamped - ISSUED_AT);
    assert!(stamped > ISSUED_AT);
}

#[test]
fn parsing_twice_is_idempotent() {
    let mut jur = Jur::new();
    jur.parse(VALID_RESPONSE).unwrap();
    let first = (
        jur.to_object().unwrap().clone(),
        jur.elapsed(Unit::default()).unwrap(),
    );
    jur.parse(VALID_RESPONSE).unwrap();
    let second = (
        jur.to_object().unwrap().clone(),
        jur.elapsed(Unit::default()).unwrap(),
    );
    assert_eq!(first, second);
}
