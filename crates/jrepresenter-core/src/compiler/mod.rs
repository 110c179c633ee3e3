//! Mapping compiler
//!
//! Turns one [`RepresenterDescriptor`] plus its ordered attribute mappings
//! into a [`GeneratedUnit`]. The compiler holds a frozen registry and never
//! mutates it, so a single instance can compile many units concurrently.

mod deserialize;
mod serialize;
mod subclass;

use crate::config::GeneratorSection;
use crate::descriptor::{AttributeMapping, RepresenterDescriptor};
use crate::error::{Error, Result};
use crate::ir::{Constant, ConstantRole, Function, GeneratedUnit};
use crate::naming::{Name, RepresenterId, TypeRef};
use crate::registry::FrozenRegistry;
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info};

/// Name of the links provider constant in every unit
pub const LINKS_PROVIDER: &str = "LINKS_PROVIDER";

pub struct MappingCompiler {
    registry: FrozenRegistry,
    config: GeneratorSection,
}

impl MappingCompiler {
    pub fn new(registry: FrozenRegistry, config: GeneratorSection) -> Self {
        Self { registry, config }
    }

    /// Compiler using the default `[generator]` settings
    pub fn with_defaults(registry: FrozenRegistry) -> Self {
        Self::new(registry, GeneratorSection::default())
    }

    pub fn registry(&self) -> &FrozenRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GeneratorSection {
        &self.config
    }

    /// Type name of the unit generated for `representer`.
    ///
    /// `com.foo.representers.UserRepresenter` -> `gen.com.foo.representers.UserMapper`
    pub fn mapper_type(&self, representer: &RepresenterId) -> Result<TypeRef> {
        let ty = representer.as_type_ref();

        let package = match (self.config.package_prefix.as_str(), ty.package()) {
            ("", package) => package,
            (prefix, package) if package.is_empty() => prefix.to_string(),
            (prefix, package) => format!("{prefix}.{package}"),
        };

        let simple = ty.simple_name();
        let stem = match simple.strip_suffix(self.config.representer_suffix.as_str()) {
            Some(stem) if !stem.is_empty() => stem,
            _ => simple,
        };
        TypeRef::new(&package, &format!("{stem}{}", self.config.mapper_suffix))
    }

    /// Compile the registered descriptor with the given id
    pub fn compile_id(&self, representer: &RepresenterId) -> Result<GeneratedUnit> {
        let descriptor = self.registry.resolve(representer)?;
        self.compile(descriptor)
    }

    /// Compile one descriptor into its unit.
    ///
    /// Fails with [`Error::UnknownRepresenter`] when the descriptor was never
    /// registered and with [`Error::UnresolvedReference`] when one of its
    /// nested or subclass representers is missing from the registry.
    pub fn compile(&self, descriptor: &RepresenterDescriptor) -> Result<GeneratedUnit> {
        self.registry.resolve(descriptor.id())?;

        let mut builder = UnitBuilder::new(self, descriptor)?;
        builder.check_references()?;

        let mut functions = Vec::new();
        if !descriptor.skip_serialize {
            functions.push(serialize::to_json(&mut builder)?);
            functions.push(serialize::to_json_collection(&builder));
        }
        if !descriptor.skip_deserialize {
            functions.push(deserialize::from_json(&mut builder)?);
            functions.push(deserialize::from_json_collection(&builder));
        }

        let unit = GeneratedUnit {
            mapper: builder.mapper,
            representer: descriptor.representer.clone(),
            model: descriptor.model.clone(),
            constants: builder.constants.into_values().collect(),
            functions,
        };
        debug!(
            "Compiled {} into {} ({} functions, {} constants)",
            unit.representer,
            unit.mapper,
            unit.functions.len(),
            unit.constants.len()
        );
        Ok(unit)
    }

    /// Compile every locally registered descriptor, in registration order
    pub fn compile_all(&self) -> Result<Vec<GeneratedUnit>> {
        let descriptors: Vec<&RepresenterDescriptor> = self.registry.local_descriptors().collect();
        let units = descriptors
            .par_iter()
            .map(|descriptor| self.compile(descriptor))
            .collect::<Result<Vec<_>>>()?;
        info!("Compiled {} representers", units.len());
        Ok(units)
    }
}

/// Per-unit compilation state.
pub(crate) struct UnitBuilder<'a> {
    compiler: &'a MappingCompiler,
    descriptor: &'a RepresenterDescriptor,
    attributes: &'a [AttributeMapping],
    mapper: TypeRef,
    /// Keyed by helper type, in first-use order
    constants: IndexMap<TypeRef, Constant>,
}

impl<'a> UnitBuilder<'a> {
    fn new(compiler: &'a MappingCompiler, descriptor: &'a RepresenterDescriptor) -> Result<Self> {
        Ok(Self {
            compiler,
            descriptor,
            attributes: compiler.registry.attributes_of(descriptor.id()),
            mapper: compiler.mapper_type(descriptor.id())?,
            constants: IndexMap::new(),
        })
    }

    fn check_references(&self) -> Result<()> {
        for mapping in self.attributes {
            if let Some(nested) = mapping.nested_representer() {
                self.resolve(nested)?;
            }
        }
        if let Some(dispatch) = &self.descriptor.subclass_dispatch {
            subclass::resolve_variants(self, dispatch)?;
        }
        Ok(())
    }

    /// Descriptor of a representer referenced by this unit
    fn resolve(&self, referenced: &RepresenterId) -> Result<&'a RepresenterDescriptor> {
        self.compiler
            .registry
            .resolve(referenced)
            .map_err(|_| Error::UnresolvedReference {
                representer: self.descriptor.representer.clone(),
                missing: referenced.clone(),
            })
    }

    /// Mapper type of a representer referenced by this unit
    fn nested_mapper(&self, referenced: &RepresenterId) -> Result<TypeRef> {
        self.resolve(referenced)?;
        self.compiler.mapper_type(referenced)
    }

    /// The links provider, unless it is the configured no-op provider
    fn links_provider(&self) -> Option<&'a TypeRef> {
        let empty = self.compiler.config.empty_links_provider.as_deref();
        self.descriptor
            .links_provider
            .as_ref()
            .filter(|provider| Some(provider.qualified_name().as_str()) != empty)
    }

    fn has_embedded(&self) -> bool {
        self.attributes.iter().any(AttributeMapping::is_embedded)
    }

    /// Name of the constant holding an instance of `ty`, declared on first use
    fn constant(&mut self, ty: &TypeRef, role: ConstantRole) -> String {
        if let Some(existing) = self.constants.get(ty) {
            return existing.name.clone();
        }

        let base = match role {
            ConstantRole::LinksProvider => LINKS_PROVIDER.to_string(),
            _ => Name::from(ty.simple_name()).to_screaming_snake_case(),
        };
        let mut name = base.clone();
        let mut counter = 2;
        while self.constants.values().any(|c| c.name == name) {
            name = format!("{base}_{counter}");
            counter += 1;
        }

        self.constants.insert(
            ty.clone(),
            Constant {
                name: name.clone(),
                role,
                ty: ty.clone(),
            },
        );
        name
    }
}
