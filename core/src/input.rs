use anyhow::{anyhow, Result};

/// Free-form command input split into bare words and `key:value` pairs, both in
/// the order given.
#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub words: Vec<String>,
    pub pairs: Vec<(String, String)>,
}

impl ParsedInput {
    /// Last value given for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut words = Vec::new();
    let mut pairs = Vec::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                pairs.push((key.to_lowercase(), value.to_string()));
                continue;
            }
        }
        words.push(arg.clone());
    }

    ParsedInput { words, pairs }
}

/// Expands `key` to the single candidate it names exactly or by prefix.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Splits a comma separated list, trimming items and dropping blanks.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parses `Math=2,Physics=1` into `(name, count)` pairs. Counts are kept signed
/// so a negative value reaches validation intact.
pub fn parse_assignments(input: &str) -> Result<Vec<(String, i64)>> {
    split_list(input)
        .into_iter()
        .map(|item| {
            let (name, count) = item
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected <subject>=<count>, got '{}'", item))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(anyhow!("Missing subject in '{}'", item));
            }
            let count: i64 = count
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid lecture count in '{}'", item))?;
            Ok((name.to_string(), count))
        })
        .collect()
}
