//! `%KEY%` substitution for group names.

use std::collections::HashMap;

use log::debug;

use super::ports::NameTemplate;

/// Replaces `%KEY%` tokens with known values and leaves everything else untouched.
#[derive(Debug, Clone, Default)]
pub struct KeySubstitution {
    values: HashMap<String, String>,
}

impl KeySubstitution {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl NameTemplate for KeySubstitution {
    fn resolve(&self, raw_name: &str) -> String {
        let mut out = String::with_capacity(raw_name.len());
        let mut rest = raw_name;

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('%') else {
                out.push_str(&rest[start..]);
                return out;
            };
            let key = &after[..end];
            match self.values.get(key) {
                Some(value) => {
                    debug!("[StaticGroup] Replacing %{}% with '{}'", key, value);
                    out.push_str(value);
                    rest = &after[end + 1..];
                }
                None => {
                    // the closing % may open the next token
                    out.push('%');
                    out.push_str(key);
                    rest = &after[end..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templater() -> KeySubstitution {
        let mut t = KeySubstitution::default();
        t.insert("NAME", "Firefox");
        t.insert("version", "128.0");
        t
    }

    #[test]
    fn known_keys_are_replaced() {
        assert_eq!(
            templater().resolve("%NAME% %version% testers"),
            "Firefox 128.0 testers"
        );
    }

    #[test]
    fn unknown_keys_and_lone_percent_are_kept() {
        let t = templater();
        assert_eq!(t.resolve("%MISSING% group"), "%MISSING% group");
        assert_eq!(t.resolve("100% %NAME%"), "100% Firefox");
        assert_eq!(t.resolve("50%"), "50%");
        assert_eq!(t.resolve("plain"), "plain");
    }
}
