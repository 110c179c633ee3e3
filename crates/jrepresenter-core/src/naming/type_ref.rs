use crate::error::{Error, Result};
use crate::naming::identifier::is_valid_identifier;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A reference to a type of the target language.
///
/// Package segments, a class name (dotted for nested classes) and generic
/// arguments. Identity is structural, so two references to `com.foo.User`
/// are equal however they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    package: Vec<String>,
    name: String,
    args: Vec<TypeRef>,
}

impl TypeRef {
    /// Build from an explicit package (may be empty) and class name
    pub fn new(package: &str, name: &str) -> Result<Self> {
        let package: Vec<String> = if package.is_empty() {
            Vec::new()
        } else {
            package.split('.').map(str::to_string).collect()
        };
        let qualified = if package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", package.join("."), name)
        };
        if package.iter().any(|s| !is_valid_identifier(s))
            || name.is_empty()
            || name.split('.').any(|s| !is_valid_identifier(s))
        {
            return Err(Error::InvalidTypeRef(qualified));
        }
        Ok(Self {
            package,
            name: name.to_string(),
            args: Vec::new(),
        })
    }

    /// Parse `com.foo.User`, `java.util.List<com.foo.User>` or `int`.
    ///
    /// Leading segments starting with a lowercase letter form the package,
    /// the remaining segments the (possibly nested) class name.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidTypeRef(s.to_string());

        let (head, args) = match s.find('<') {
            Some(open) => {
                let inner = s[open + 1..].strip_suffix('>').ok_or_else(invalid)?;
                let args = split_top_level(inner)
                    .ok_or_else(invalid)?
                    .into_iter()
                    .map(TypeRef::parse)
                    .collect::<Result<Vec<_>>>()
                    .map_err(|_| invalid())?;
                if args.is_empty() {
                    return Err(invalid());
                }
                (s[..open].trim(), args)
            }
            None => (s, Vec::new()),
        };

        let segments: Vec<&str> = head.split('.').collect();
        if segments.iter().any(|seg| !is_valid_identifier(seg)) {
            return Err(invalid());
        }
        let split = segments
            .iter()
            .position(|seg| !seg.starts_with(|c: char| c.is_lowercase()))
            .unwrap_or(segments.len() - 1);

        Ok(Self {
            package: segments[..split].iter().map(|seg| seg.to_string()).collect(),
            name: segments[split..].join("."),
            args,
        })
    }

    pub fn with_args(mut self, args: Vec<TypeRef>) -> Self {
        self.args = args;
        self
    }

    /// Dotted package, empty for unqualified types
    pub fn package(&self) -> String {
        self.package.join(".")
    }

    pub fn package_segments(&self) -> &[String] {
        &self.package
    }

    /// Class name including enclosing classes, e.g. `Outer.Inner`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Innermost class name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    /// Package and class name, without generic arguments
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package(), self.name)
        }
    }

    /// The same type without generic arguments
    pub fn erased(&self) -> TypeRef {
        Self {
            package: self.package.clone(),
            name: self.name.clone(),
            args: Vec::new(),
        }
    }
}

/// Split generic arguments on commas that are not nested in `<...>`.
fn split_top_level(s: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    let last = s[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    Some(parts)
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())?;
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> String {
        ty.to_string()
    }
}

impl TryFrom<String> for TypeRef {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        TypeRef::parse(&s)
    }
}

impl std::str::FromStr for TypeRef {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        TypeRef::parse(s)
    }
}

impl JsonSchema for TypeRef {
    fn schema_name() -> Cow<'static, str> {
        "TypeRef".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "description": "Fully qualified type name, e.g. `com.foo.User` or `java.util.List<com.foo.User>`"
        })
    }
}
