use serde::{Deserialize, Serialize};

/// Root configuration from jrepresenter.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JrepresenterConfig {
    /// Naming and compilation settings
    #[serde(default)]
    pub generator: GeneratorSection,

    /// Java rendering settings
    #[serde(default)]
    pub java: JavaSection,
}

/// [generator] section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Prepended to the representer's package to form the mapper's package
    #[serde(default = "default_package_prefix")]
    pub package_prefix: String,
    /// Stripped from the representer's simple name
    #[serde(default = "default_representer_suffix")]
    pub representer_suffix: String,
    /// Appended to form the mapper's simple name
    #[serde(default = "default_mapper_suffix")]
    pub mapper_suffix: String,
    /// Links provider that contributes nothing; treated as no provider
    #[serde(default = "default_empty_links_provider")]
    pub empty_links_provider: Option<String>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            package_prefix: default_package_prefix(),
            representer_suffix: default_representer_suffix(),
            mapper_suffix: default_mapper_suffix(),
            empty_links_provider: default_empty_links_provider(),
        }
    }
}

pub(crate) fn default_package_prefix() -> String {
    "gen".to_string()
}

pub(crate) fn default_representer_suffix() -> String {
    "Representer".to_string()
}

pub(crate) fn default_mapper_suffix() -> String {
    "Mapper".to_string()
}

pub(crate) fn default_empty_links_provider() -> Option<String> {
    Some("cd.go.jrepresenter.EmptyLinksProvider".to_string())
}

/// [java] section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaSection {
    /// Spaces per indentation level
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Target width handed to the pretty printer
    #[serde(default = "default_line_width")]
    pub line_width: usize,
    /// Emit the "generated file" header comment
    #[serde(default = "default_true")]
    pub file_comment: bool,
    /// Emit the class javadoc
    #[serde(default = "default_true")]
    pub javadoc: bool,
    /// Package of `RequestContext`, `LinksMapper` and `LinksProvider`
    #[serde(default = "default_runtime_package")]
    pub runtime_package: String,
}

impl Default for JavaSection {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            line_width: default_line_width(),
            file_comment: true,
            javadoc: true,
            runtime_package: default_runtime_package(),
        }
    }
}

pub(crate) fn default_indent() -> usize {
    2
}

pub(crate) fn default_line_width() -> usize {
    100
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_runtime_package() -> String {
    "cd.go.jrepresenter".to_string()
}
