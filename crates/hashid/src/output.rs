use serde_json::{Value, json};

use crate::error::{ErrorResponse, IdError};
use crate::types::IssuedId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Human,
}

pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("error: failed to render output: {e}"),
    }
}

pub fn print_error(err: &IdError, mode: OutputMode) {
    match mode {
        OutputMode::Json => {
            let resp = ErrorResponse::from(err);
            match serde_json::to_string(&resp) {
                Ok(s) => eprintln!("{s}"),
                Err(_) => eprintln!("error: {err}"),
            }
        }
        OutputMode::Human => {
            eprintln!("error: {err}");
        }
    }
}

pub fn print_digest(keys: &[String], digest: &str, mode: OutputMode) {
    match mode {
        OutputMode::Json => print_json(&json!({ "keys": keys, "digest": digest })),
        OutputMode::Human => println!("{digest}"),
    }
}

pub fn print_issued(issued: &IssuedId, mode: OutputMode) {
    match mode {
        OutputMode::Json => print_json(&json!(issued)),
        OutputMode::Human => println!("{:<9} {}", issued.family, issued.id),
    }
}

pub fn print_issued_list(issued: &[IssuedId], mode: OutputMode) {
    match mode {
        OutputMode::Json => print_json(&json!(issued)),
        OutputMode::Human => {
            if issued.is_empty() {
                println!("(no ids)");
            }
            for item in issued {
                print_issued(item, OutputMode::Human);
            }
        }
    }
}

/// An accepted analysis id and whether a later lookup would find it.
pub fn print_analysis(issued: &IssuedId, observed: bool, mode: OutputMode) {
    match mode {
        OutputMode::Json => print_json(&json!({
            "family": issued.family,
            "id": issued.id,
            "observed": observed,
        })),
        OutputMode::Human => {
            let marker = if observed { "observed" } else { "not observed" };
            println!("{:<9} {}  ({marker})", issued.family, issued.id);
        }
    }
}
