// JSON renderings of a parsed envelope for CLI stdout.
use jur::api::{Error, Jur, Unit};
use serde_json::{Map, Value, json};

pub fn check_json(jur: &Jur) -> Result<Value, Error> {
    Ok(json!({
        "valid": true,
        "request": jur.request()?,
    }))
}

pub fn inspect_json(jur: &Jur, unit: Unit) -> Result<Value, Error> {
    let mut debug = Map::new();
    debug.insert("unit".to_string(), json!(unit));
    debug.insert("elapsed".to_string(), json!(jur.elapsed(unit)?));
    debug.insert("issued_at".to_string(), json!(jur.issued_at(unit)?));
    debug.insert("resolved_at".to_string(), json!(jur.resolved_at(unit)?));

    let mut out = Map::new();
    out.insert("message".to_string(), json!(jur.message()?));
    out.insert("request".to_string(), json!(jur.request()?));
    out.insert("data".to_string(), jur.data()?.clone());
    out.insert("debug".to_string(), Value::Object(debug));
    if jur.issued_at_client().is_some() {
        out.insert("latency".to_string(), json!(jur.latency(unit)?));
    }
    Ok(Value::Object(out))
}
