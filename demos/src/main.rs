// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::fs;
use std::process;

use treejson::JsonValue;

fn main() {
    env_logger::init();

    let args: Vec<_> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} file.json", args[0]);
        process::exit(1);
    }
    let path = &args[1];
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: unable to read file '{}': {}", path, e);
            process::exit(1);
        }
    };
    log::debug!("read {} bytes from {}", bytes.len(), path);

    match treejson::parse_slice(&bytes) {
        Ok(value) => {
            println!("{}: root is {}{}", path, value.kind(), describe(&value));
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: JSON parsing failed: {}", e);
            process::exit(1);
        }
    }
}

fn describe(value: &JsonValue) -> String {
    match value {
        JsonValue::Object(object) => format!(" with {} members", object.len()),
        JsonValue::Array(array) => format!(" with {} elements", array.len()),
        _ => String::new(),
    }
}
