//! Java pretty printer
//!
//! Lays out a generated unit as a Java class with the `pretty` crate.
//! Expressions are always single-line; only blocks and members break.

use pretty::{DocAllocator, DocBuilder, RcAllocator};

use super::imports::{Builtins, TypeNames};
use jrepresenter_core::JavaSection;
use jrepresenter_core::ir::{
    Constant, ConstantRole, Expr, Function, GeneratedUnit, MatchArm, Param, Stmt, ValueType, Var,
};
use jrepresenter_core::naming::name::capitalize;

/// Type alias for our document builder
type Doc<'a> = DocBuilder<'a, RcAllocator, ()>;

/// Java pretty printer using the `pretty` crate
pub struct JavaPrinter<'a> {
    alloc: &'a RcAllocator,
    names: &'a TypeNames,
    builtins: &'a Builtins,
    config: &'a JavaSection,
}

impl<'a> JavaPrinter<'a> {
    pub(crate) fn new(
        alloc: &'a RcAllocator,
        names: &'a TypeNames,
        builtins: &'a Builtins,
        config: &'a JavaSection,
    ) -> Self {
        Self {
            alloc,
            names,
            builtins,
            config,
        }
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn text<S: Into<std::borrow::Cow<'a, str>>>(&self, s: S) -> Doc<'a> {
        self.alloc.text(s)
    }

    fn nil(&self) -> Doc<'a> {
        self.alloc.nil()
    }

    fn hardline(&self) -> Doc<'a> {
        self.alloc.hardline()
    }

    fn join<I>(&self, docs: I, sep: Doc<'a>) -> Doc<'a>
    where
        I: IntoIterator<Item = Doc<'a>>,
    {
        self.alloc.intersperse(docs, sep)
    }

    fn blank_line(&self) -> Doc<'a> {
        self.hardline().append(self.hardline())
    }

    fn indent(&self) -> isize {
        self.config.indent as isize
    }

    /// `header {` + indented body + `}`
    fn block(&self, header: Doc<'a>, body: Vec<Doc<'a>>) -> Doc<'a> {
        if body.is_empty() {
            return header.append(self.text(" {")).append(self.hardline()).append(self.text("}"));
        }
        header
            .append(self.text(" {"))
            .append(
                self.hardline()
                    .append(self.join(body, self.hardline()))
                    .nest(self.indent()),
            )
            .append(self.hardline())
            .append(self.text("}"))
    }

    // ========================================================================
    // Unit printing
    // ========================================================================

    /// Print a whole compilation unit
    pub fn unit(&self, unit: &GeneratedUnit) -> Doc<'a> {
        let mut parts = Vec::new();

        if self.config.file_comment {
            for line in [
                "//",
                "// This file was automatically generated by jrepresenter",
                "// Any changes may be lost!",
            ] {
                parts.push(self.text(line));
                parts.push(self.hardline());
            }
        }

        let package = unit.mapper.package();
        if !package.is_empty() {
            parts.push(self.text(format!("package {};", package)));
            parts.push(self.blank_line());
        }

        let imports: Vec<Doc<'a>> = self
            .names
            .imports()
            .map(|import| self.text(format!("import {};", import)))
            .collect();
        if !imports.is_empty() {
            parts.push(self.join(imports, self.hardline()));
            parts.push(self.blank_line());
        }

        if self.config.javadoc {
            parts.push(self.javadoc(unit));
            parts.push(self.hardline());
        }

        parts.push(self.class(unit));
        parts.push(self.hardline());

        self.alloc.concat(parts)
    }

    fn javadoc(&self, unit: &GeneratedUnit) -> Doc<'a> {
        let lines = [
            "/**".to_string(),
            format!(" * Representer for {{@link {}}}.", self.names.name(&unit.model)),
            format!(
                " * Generated using representer {{@link {}}}.",
                self.names.name(unit.representer.as_type_ref())
            ),
            " */".to_string(),
        ];
        self.join(lines.into_iter().map(|line| self.text(line)), self.hardline())
    }

    fn class(&self, unit: &GeneratedUnit) -> Doc<'a> {
        let mut members = Vec::new();
        if !unit.constants.is_empty() {
            members.push(self.join(
                unit.constants.iter().map(|c| self.constant(unit, c)),
                self.hardline(),
            ));
        }
        members.extend(unit.functions.iter().map(|f| self.function(f)));

        let header = self.text(format!("public class {}", self.names.name(&unit.mapper)));
        if members.is_empty() {
            return self.block(header, Vec::new());
        }
        header
            .append(self.text(" {"))
            .append(
                self.hardline()
                    .append(self.join(members, self.blank_line()))
                    .nest(self.indent()),
            )
            .append(self.hardline())
            .append(self.text("}"))
    }

    /// Print a static helper field
    pub fn constant(&self, unit: &GeneratedUnit, constant: &Constant) -> Doc<'a> {
        let declared = match constant.role {
            ConstantRole::LinksProvider => format!(
                "{}<{}>",
                self.names.name(&self.builtins.links_provider),
                self.names.name(&unit.model)
            ),
            _ => self.names.name(&constant.ty),
        };
        self.text(format!(
            "private static final {} {} = new {}();",
            declared,
            constant.name,
            self.names.name(&constant.ty)
        ))
    }

    /// Print one `toJSON`/`fromJSON` method
    pub fn function(&self, function: &Function) -> Doc<'a> {
        let params: Vec<String> = function.params.iter().map(|p| self.param(p)).collect();
        let header = self.text(format!(
            "public static {} {}({})",
            self.value_type(&function.returns),
            function.kind.name(),
            params.join(", ")
        ));
        self.block(header, self.stmts(&function.body))
    }

    fn param(&self, param: &Param) -> String {
        format!("{} {}", self.value_type(&param.ty), var_name(param.var))
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn stmts(&self, stmts: &[Stmt]) -> Vec<Doc<'a>> {
        stmts.iter().map(|s| self.stmt(s)).collect()
    }

    /// Print a statement
    pub fn stmt(&self, stmt: &Stmt) -> Doc<'a> {
        match stmt {
            Stmt::Declare { var, ty, init } => self.text(format!(
                "{} {} = {};",
                self.value_type(ty),
                var_name(*var),
                self.expr(init)
            )),
            Stmt::Assign { var, value } => {
                self.text(format!("{} = {};", var_name(*var), self.expr(value)))
            }
            Stmt::Put { target, key, value } => self.text(format!(
                "{}.put({}, {});",
                var_name(*target),
                java_string(key),
                self.expr(value)
            )),
            Stmt::PutAll { target, source } => {
                self.text(format!("{}.putAll({});", var_name(*target), self.expr(source)))
            }
            Stmt::SetAttribute {
                target,
                attribute,
                value,
            } => self.text(format!(
                "{}.set{}({});",
                var_name(*target),
                capitalize(attribute.name()),
                self.expr(value)
            )),
            Stmt::If { condition, then } => self.block(
                self.text(format!("if ({})", self.expr(condition))),
                self.stmts(then),
            ),
            Stmt::Match { scrutinee, arms } => self.match_chain(scrutinee, arms),
            Stmt::Return(value) => self.text(format!("return {};", self.expr(value))),
        }
    }

    /// `if ("a".equals(x)) { .. } else if ("b".equals(x)) { .. }`
    fn match_chain(&self, scrutinee: &Expr, arms: &[MatchArm]) -> Doc<'a> {
        if arms.is_empty() {
            return self.nil();
        }
        let scrutinee = self.expr(scrutinee);
        let mut doc = self.nil();
        for (i, arm) in arms.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { " else if" };
            let condition = format!("{} ({}.equals({}))", keyword, java_string(&arm.literal), scrutinee);
            doc = doc.append(self.block(self.text(condition), self.stmts(&arm.body)));
        }
        doc
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    /// Print an expression on one line
    pub fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Var(var) => var_name(*var).to_string(),
            Expr::Null => "null".to_string(),
            Expr::Str(s) => java_string(s),
            Expr::NewContainer => format!("new {}()", self.names.name(&self.builtins.linked_hash_map)),
            Expr::New(ty) => format!("new {}()", self.names.name(ty)),
            Expr::EmptyList => format!("{}.emptyList()", self.names.name(&self.builtins.collections)),
            Expr::GetAttribute { target, attribute } => {
                format!("{}.get{}()", var_name(*target), capitalize(attribute.name()))
            }
            Expr::HasKey { container, key } => {
                format!("{}.containsKey({})", var_name(*container), java_string(key))
            }
            Expr::Lookup { container, key } => {
                format!("{}.get({})", var_name(*container), java_string(key))
            }
            Expr::SubContainer { container, key } => format!(
                "({}) {}.getOrDefault({}, {}.emptyMap())",
                self.names.name(&self.builtins.map),
                var_name(*container),
                java_string(key),
                self.names.name(&self.builtins.collections)
            ),
            Expr::IsNull(value) => format!("{} == null", self.expr(value)),
            Expr::IsInstance { value, ty } => {
                format!("{} instanceof {}", var_name(*value), self.names.name(ty))
            }
            Expr::Cast { target, value } => {
                format!("({}) {}", self.value_type(target), self.expr(value))
            }
            Expr::Apply { constant, argument } => {
                format!("{}.apply({})", constant, self.expr(argument))
            }
            Expr::Links {
                constant,
                value,
                context,
            } => format!(
                "{}.toJSON({}, {}, {})",
                self.names.name(&self.builtins.links_mapper),
                constant,
                var_name(*value),
                var_name(*context)
            ),
            Expr::CallMapper {
                mapper,
                function,
                args,
            } => {
                let args: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
                format!("{}.{}({})", self.names.name(mapper), function.name(), args.join(", "))
            }
            Expr::MapEach {
                source,
                mapper,
                function,
                context,
            } => {
                let args = match context {
                    Some(context) => format!("eachItem, {}", var_name(*context)),
                    None => "eachItem".to_string(),
                };
                format!(
                    "{}.stream().map(eachItem -> {}.{}({})).collect({}.toList())",
                    var_name(*source),
                    self.names.name(mapper),
                    function.name(),
                    args,
                    self.names.name(&self.builtins.collectors)
                )
            }
        }
    }

    fn value_type(&self, ty: &ValueType) -> String {
        let list = self.names.name(&self.builtins.list);
        let map = self.names.name(&self.builtins.map);
        match ty {
            ValueType::Declared(ty) => self.names.name(ty),
            ValueType::DeclaredList(ty) => format!("{}<{}>", list, self.names.name(ty)),
            ValueType::Container => map,
            ValueType::ContainerList => format!("{}<{}>", list, map),
            ValueType::SerializedList => list,
            ValueType::RequestContext => self.names.name(&self.builtins.request_context),
        }
    }
}

fn var_name(var: Var) -> &'static str {
    match var {
        Var::Value => "value",
        Var::Values => "values",
        Var::RequestContext => "requestContext",
        Var::Json => "json",
        Var::JsonArray => "jsonArray",
        Var::EmbeddedMap => "embeddedMap",
        Var::Model => "model",
    }
}

/// Java string literal
fn java_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jrepresenter_core::ir::FunctionKind;
    use jrepresenter_core::{Attribute, RepresenterId, TypeRef};
    use rstest::rstest;

    fn render_stmt(stmt: &Stmt) -> String {
        let unit = GeneratedUnit {
            mapper: TypeRef::parse("gen.com.foo.UserMapper").unwrap(),
            representer: RepresenterId::parse("com.foo.UserRepresenter").unwrap(),
            model: TypeRef::parse("com.foo.User").unwrap(),
            constants: vec![],
            functions: vec![],
        };
        let config = JavaSection::default();
        let builtins = Builtins::new(&config).unwrap();
        let names = TypeNames::for_unit(&unit, &builtins, false);
        let alloc = RcAllocator;
        let printer = JavaPrinter::new(&alloc, &names, &builtins, &config);
        let mut output = Vec::new();
        printer.stmt(stmt).render(100, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    #[case("first_name", "\"first_name\"")]
    #[case("a\"b", "\"a\\\"b\"")]
    #[case("c:\\dir", "\"c:\\\\dir\"")]
    #[case("line\n\ttab", "\"line\\n\\ttab\"")]
    fn test_java_string_escapes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(java_string(input), expected);
    }

    #[test]
    fn test_render_setter_with_cast() {
        let stmt = Stmt::SetAttribute {
            target: Var::Model,
            attribute: Attribute::untyped("fname").unwrap(),
            value: Expr::cast(
                ValueType::Declared(TypeRef::parse("String").unwrap()),
                Expr::lookup(Var::Json, "first_name"),
            ),
        };
        assert_eq!(
            render_stmt(&stmt),
            "model.setFname((String) json.get(\"first_name\"));"
        );
    }

    #[test]
    fn test_render_match_chain() {
        let arm = |literal: &str, mapper: &str| MatchArm {
            literal: literal.to_string(),
            body: vec![Stmt::Assign {
                var: Var::Model,
                value: Expr::CallMapper {
                    mapper: TypeRef::parse(mapper).unwrap(),
                    function: FunctionKind::FromJson,
                    args: vec![Expr::var(Var::Json)],
                },
            }],
        };
        let stmt = Stmt::Match {
            scrutinee: Expr::lookup(Var::Json, "type"),
            arms: vec![arm("git", "GitMapper"), arm("svn", "SvnMapper")],
        };
        assert_eq!(
            render_stmt(&stmt),
            "if (\"git\".equals(json.get(\"type\"))) {\n  model = GitMapper.fromJSON(json);\n} else if (\"svn\".equals(json.get(\"type\"))) {\n  model = SvnMapper.fromJSON(json);\n}"
        );
    }

    #[test]
    fn test_render_embedded_lookup() {
        let stmt = Stmt::Declare {
            var: Var::EmbeddedMap,
            ty: ValueType::Container,
            init: Expr::SubContainer {
                container: Var::Json,
                key: "_embedded".to_string(),
            },
        };
        assert_eq!(
            render_stmt(&stmt),
            "java.util.Map embeddedMap = (java.util.Map) json.getOrDefault(\"_embedded\", java.util.Collections.emptyMap());"
        );
    }
}
