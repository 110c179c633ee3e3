use serde::{Deserialize, Serialize};
use std::fmt;

/// A name split into words, independent of any casing convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name {
    pub words: Vec<String>,
}

impl Name {
    /// Parse a Name from a string (snake_case, camelCase, TitleCase)
    ///
    /// A word starts at every uppercase letter and after every `_`.
    pub fn from(name: &str) -> Self {
        let mut words = Vec::new();
        let mut current_word = String::new();

        for c in name.chars() {
            if c == '_' {
                if !current_word.is_empty() {
                    words.push(std::mem::take(&mut current_word));
                }
            } else if c.is_uppercase() {
                if !current_word.is_empty() {
                    words.push(std::mem::take(&mut current_word));
                }
                current_word.push(c);
            } else {
                current_word.push(c);
            }
        }
        if !current_word.is_empty() {
            words.push(current_word);
        }

        Name { words }
    }

    pub fn to_snake_case(&self) -> String {
        self.words.join("_").to_lowercase()
    }

    /// `CASE_INSENSITIVE_STRING_SERIALIZER` style, used for constant names
    pub fn to_screaming_snake_case(&self) -> String {
        self.words.join("_").to_uppercase()
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_snake_case())
    }
}
