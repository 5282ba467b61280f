//! Flattening of CLI-style tokens into remote job parameters.
//!
//! The remote platform takes job parameters as a flat string-to-string map,
//! so every argument token is folded into one. Parsing is deliberately
//! permissive: duplicate keys are not rejected (the last occurrence wins) and
//! empty or otherwise odd keys are stored as-is, since downstream jobs may
//! rely on the lenient behavior.

use std::collections::BTreeMap;

/// Flatten raw argument tokens into a job parameter map.
///
/// A leading `--` or `-` is stripped, the token is split on the first `=`,
/// and tokens without `=` become presence flags with the value `"true"`.
pub fn parse_options(args: &[String]) -> BTreeMap<String, String> {
    let mut options = BTreeMap::new();
    for arg in args {
        let arg = arg
            .strip_prefix("--")
            .or_else(|| arg.strip_prefix('-'))
            .unwrap_or(arg);
        match arg.split_once('=') {
            Some((key, value)) => options.insert(key.to_string(), value.to_string()),
            None => options.insert(arg.to_string(), "true".to_string()),
        };
    }
    options
}
