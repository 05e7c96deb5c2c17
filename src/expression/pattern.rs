use crate::core::{Result, ViewError};
use lru::LruCache;
use regex::Regex;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

const REGEX_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(200) {
    Some(n) => n,
    None => panic!("cache capacity must be non-zero"),
};

lazy_static::lazy_static! {
    static ref REGEX_LRU_CACHE: Arc<Mutex<LruCache<String, Arc<Regex>>>> =
        Arc::new(Mutex::new(LruCache::new(REGEX_CACHE_CAPACITY)));
}

/// Case-insensitive substring test. An empty needle matches everything.
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Reject patterns that cannot be compiled: a trailing unpaired `\`.
pub fn validate_like(pattern: &str) -> Result<()> {
    let mut escaped = false;
    for c in pattern.chars() {
        escaped = !escaped && c == '\\';
    }
    if escaped {
        return Err(ViewError::InvalidPattern(format!(
            "'{}' ends with an unpaired escape character",
            pattern
        )));
    }
    Ok(())
}

/// Translate a LIKE pattern (`%` any run, `_` any single char, `\` escape)
/// into an anchored regex.
#[inline]
fn like_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 2);
    regex.push('^');

    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            '\\' => {
                if let Some(next) = chars.next() {
                    regex.push_str(&regex::escape(&next.to_string()));
                }
            }
            c => regex.push_str(&regex::escape(&c.to_string())),
        }
    }

    regex.push('$');
    regex
}

/// Fast path for patterns that need no regex at all.
#[inline]
fn fast_path_like(text: &str, pattern: &str) -> Option<bool> {
    if pattern.contains('_') || pattern.contains('\\') {
        return None;
    }

    let wildcards = pattern.matches('%').count();
    let text = text.to_lowercase();

    // exact
    if wildcards == 0 {
        return Some(text == pattern.to_lowercase());
    }

    // "prefix%"
    if wildcards == 1 && pattern.ends_with('%') {
        let prefix = &pattern[..pattern.len() - 1];
        return Some(text.starts_with(&prefix.to_lowercase()));
    }

    // "%suffix"
    if wildcards == 1 && pattern.starts_with('%') {
        return Some(text.ends_with(&pattern[1..].to_lowercase()));
    }

    // "%substring%"
    if wildcards == 2 && pattern.len() >= 2 && pattern.starts_with('%') && pattern.ends_with('%') {
        let substring = &pattern[1..pattern.len() - 1];
        return Some(text.contains(&substring.to_lowercase()));
    }

    None
}

fn get_or_compile_regex(pattern: &str) -> Result<Arc<Regex>> {
    {
        let mut cache = REGEX_LRU_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(regex) = cache.get(pattern) {
            return Ok(Arc::clone(regex));
        }
    }

    let compiled = regex::RegexBuilder::new(&like_to_regex(pattern))
        .case_insensitive(true)
        .build()
        .map_err(|e| ViewError::InvalidPattern(e.to_string()))?;
    let compiled = Arc::new(compiled);

    let mut cache = REGEX_LRU_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.put(pattern.to_string(), Arc::clone(&compiled));

    Ok(compiled)
}

/// Case-insensitive LIKE match.
pub fn eval_like(text: &str, pattern: &str) -> Result<bool> {
    validate_like(pattern)?;

    if let Some(result) = fast_path_like(text, pattern) {
        return Ok(result);
    }

    let regex = get_or_compile_regex(pattern)?;
    Ok(regex.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Test Co", "test"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Other", "test"));
    }

    #[test]
    fn test_like_fast_paths() {
        assert!(eval_like("Pending", "pending").unwrap());
        assert!(eval_like("pending_review", "pend%").unwrap());
        assert!(eval_like("room-204", "%204").unwrap());
        assert!(eval_like("Suite 12 North", "%suite 12%").unwrap());
        assert!(!eval_like("approved", "pend%").unwrap());
    }

    #[test]
    fn test_like_regex_path() {
        assert!(eval_like("RM-101", "RM-1_1").unwrap());
        assert!(eval_like("a.b", "a.b").unwrap());
        assert!(!eval_like("axb", "a\\.b").unwrap());
        assert!(eval_like("50%", "50\\%").unwrap());
        assert!(eval_like("key_live_abc", "key%live%").unwrap());
    }

    #[test]
    fn test_unpaired_escape_is_rejected() {
        assert!(matches!(validate_like("abc\\"), Err(ViewError::InvalidPattern(_))));
        assert!(validate_like("abc\\\\").is_ok());
    }
}
