//! Type name resolution and import collection
//!
//! Every type a unit mentions is rendered by its simple name and imported,
//! unless another type already claimed that simple name, in which case it
//! is written fully qualified. Types in the unit's own package and types
//! without a package are never imported.

use crate::error::Result;
use jrepresenter_core::JavaSection;
use jrepresenter_core::ir::{Constant, ConstantRole, Expr, GeneratedUnit, ValueType, Visitor, walker};
use jrepresenter_core::naming::TypeRef;
use std::collections::{BTreeSet, HashMap};

/// Library and runtime types the rendered code refers to.
pub(crate) struct Builtins {
    pub map: TypeRef,
    pub linked_hash_map: TypeRef,
    pub list: TypeRef,
    pub collections: TypeRef,
    pub collectors: TypeRef,
    pub request_context: TypeRef,
    pub links_mapper: TypeRef,
    pub links_provider: TypeRef,
}

impl Builtins {
    pub fn new(config: &JavaSection) -> Result<Self> {
        let runtime = config.runtime_package.as_str();
        Ok(Self {
            map: TypeRef::new("java.util", "Map")?,
            linked_hash_map: TypeRef::new("java.util", "LinkedHashMap")?,
            list: TypeRef::new("java.util", "List")?,
            collections: TypeRef::new("java.util", "Collections")?,
            collectors: TypeRef::new("java.util.stream", "Collectors")?,
            request_context: TypeRef::new(runtime, "RequestContext")?,
            links_mapper: TypeRef::new(runtime, "LinksMapper")?,
            links_provider: TypeRef::new(runtime, "LinksProvider")?,
        })
    }
}

/// Rendered names of every type used by one unit.
pub(crate) struct TypeNames {
    names: HashMap<String, String>,
    imports: BTreeSet<String>,
}

impl TypeNames {
    pub fn for_unit(unit: &GeneratedUnit, builtins: &Builtins, javadoc: bool) -> Self {
        let mut collector = TypeCollector {
            builtins,
            found: vec![unit.mapper.clone()],
        };
        if javadoc {
            collector.add(&unit.model);
            collector.add(unit.representer.as_type_ref());
        }
        collector.visit_unit(unit);

        let own_package = unit.mapper.package();
        let mut names = HashMap::new();
        let mut claimed: HashMap<String, String> = HashMap::new();
        let mut imports = BTreeSet::new();

        for ty in collector.found {
            let qualified = ty.qualified_name();
            if names.contains_key(&qualified) {
                continue;
            }
            let simple = ty.simple_name().to_string();
            let rendered = match claimed.get(&simple) {
                Some(owner) if *owner != qualified => qualified.clone(),
                _ => {
                    claimed.insert(simple.clone(), qualified.clone());
                    let package = ty.package();
                    if !package.is_empty() && package != own_package {
                        imports.insert(qualified.clone());
                    }
                    simple
                }
            };
            names.insert(qualified, rendered);
        }

        Self { names, imports }
    }

    /// Source form of a type, generic arguments included
    pub fn name(&self, ty: &TypeRef) -> String {
        let qualified = ty.qualified_name();
        let base = self.names.get(&qualified).cloned().unwrap_or(qualified);
        if ty.args().is_empty() {
            base
        } else {
            let args: Vec<String> = ty.args().iter().map(|arg| self.name(arg)).collect();
            format!("{}<{}>", base, args.join(", "))
        }
    }

    /// Imported types, sorted
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }
}

struct TypeCollector<'a> {
    builtins: &'a Builtins,
    found: Vec<TypeRef>,
}

impl TypeCollector<'_> {
    fn add(&mut self, ty: &TypeRef) {
        let erased = ty.erased();
        if !self.found.contains(&erased) {
            self.found.push(erased);
        }
    }
}

impl Visitor for TypeCollector<'_> {
    fn visit_constant(&mut self, constant: &Constant) {
        if constant.role == ConstantRole::LinksProvider {
            let builtins = self.builtins;
            self.add(&builtins.links_provider);
        }
        walker::walk_constant(self, constant);
    }

    fn visit_value_type(&mut self, ty: &ValueType) {
        let builtins = self.builtins;
        match ty {
            ValueType::Container => self.add(&builtins.map),
            ValueType::ContainerList => {
                self.add(&builtins.list);
                self.add(&builtins.map);
            }
            ValueType::DeclaredList(_) | ValueType::SerializedList => self.add(&builtins.list),
            ValueType::RequestContext => self.add(&builtins.request_context),
            ValueType::Declared(_) => {}
        }
        walker::walk_value_type(self, ty);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        let builtins = self.builtins;
        match expr {
            Expr::NewContainer => self.add(&builtins.linked_hash_map),
            Expr::EmptyList => self.add(&builtins.collections),
            Expr::SubContainer { .. } => {
                self.add(&builtins.map);
                self.add(&builtins.collections);
            }
            Expr::Links { .. } => self.add(&builtins.links_mapper),
            Expr::MapEach { .. } => self.add(&builtins.collectors),
            _ => {}
        }
        walker::walk_expr(self, expr);
    }

    fn visit_type_ref(&mut self, ty: &TypeRef) {
        self.add(ty);
        walker::walk_type_ref(self, ty);
    }
}
