//! JSON replies written to stdout.
//!
//! Every command answers with one JSON document whose `status` is either
//! `success` or `failed`, so scripted callers can parse stdout regardless
//! of the exit code.

use std::io::Write;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::CliError;

/// Writes `{"status":"success", ...fields}`.
///
/// `fields` must serialize to a JSON object; its keys are merged after
/// `status`.
pub fn success<T: Serialize>(fields: &T) -> Result<(), CliError> {
    emit(&success_body(fields)?)
}

fn success_body<T: Serialize>(fields: &T) -> Result<Value, CliError> {
    let mut body = Map::new();
    body.insert("status".into(), Value::from("success"));
    match serde_json::to_value(fields)? {
        Value::Object(map) => body.extend(map),
        Value::Null => {}
        other => {
            body.insert("result".into(), other);
        }
    }
    Ok(Value::Object(body))
}

/// Writes `{"status":"success","message":message}`.
pub fn message(message: &str) -> Result<(), CliError> {
    success(&json!({ "message": message }))
}

/// Writes `{"status":"failed","message":message}`.
pub fn failure(message: &str) -> Result<(), CliError> {
    emit(&json!({ "status": "failed", "message": message }))
}

/// The success reply for a dry run: what would have happened.
pub fn dry_run(actions: &[String], warnings: &[String]) -> Result<(), CliError> {
    success(&json!({
        "dry_run": true,
        "actions": actions,
        "warnings": warnings,
    }))
}

fn emit(value: &Value) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}
