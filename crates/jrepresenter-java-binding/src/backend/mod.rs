//! Java backend - render generated units to Java source

mod imports;
mod pretty_printer;

pub use pretty_printer::JavaPrinter;

use crate::error::Result;
use imports::{Builtins, TypeNames};
use jrepresenter_core::{GeneratedUnit, JavaSection};
use pretty::RcAllocator;
use std::path::PathBuf;
use tracing::debug;

/// One rendered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    /// Relative path derived from the mapper's package, e.g. `gen/com/foo/UserMapper.java`
    pub path: PathBuf,
    pub source: String,
}

/// Render a unit to the source text of its Java class
pub fn render_unit(unit: &GeneratedUnit, config: &JavaSection) -> Result<String> {
    let builtins = Builtins::new(config)?;
    let names = TypeNames::for_unit(unit, &builtins, config.javadoc);
    let alloc = RcAllocator;
    let printer = JavaPrinter::new(&alloc, &names, &builtins, config);
    let doc = printer.unit(unit);
    let mut output = Vec::new();
    doc.render(config.line_width, &mut output)?;
    let rendered = String::from_utf8(output)?;
    Ok(trim_trailing_whitespace(&rendered))
}

/// Render every unit, in order
pub fn render_all(units: &[GeneratedUnit], config: &JavaSection) -> Result<Vec<JavaFile>> {
    units
        .iter()
        .map(|unit| {
            let source = render_unit(unit, config)?;
            let path = source_path(unit);
            debug!("Rendered {} ({} bytes)", path.display(), source.len());
            Ok(JavaFile { path, source })
        })
        .collect()
}

fn source_path(unit: &GeneratedUnit) -> PathBuf {
    let mut path: PathBuf = unit.mapper.package_segments().iter().collect();
    path.push(format!("{}.java", unit.mapper.name()));
    path
}

/// Blank lines inside nested blocks carry indentation; strip it
fn trim_trailing_whitespace(source: &str) -> String {
    let mut out: String = source
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_whitespace() {
        assert_eq!(trim_trailing_whitespace("a {  \n  \n}"), "a {\n\n}\n");
    }
}
