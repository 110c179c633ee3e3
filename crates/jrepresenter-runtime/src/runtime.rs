//! Loaded units and the collaborators they call.

use crate::context::RequestContext;
use crate::error::{Result, RuntimeError};
use crate::interpreter::Interpreter;
use crate::value::{Container, Model, Value};
use indexmap::IndexMap;
use jrepresenter_core::GeneratedUnit;
use jrepresenter_core::ir::FunctionKind;
use jrepresenter_core::naming::TypeRef;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Serializer, deserializer or custom deserializer implementation
pub type Callable = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// Links provider implementation: the links entries for one value
pub type LinksCallable = Arc<dyn Fn(&Value, &RequestContext) -> Result<Container> + Send + Sync>;

/// Executes generated units.
///
/// Helper types named by unit constants are bound by qualified type name
/// with [`Runtime::register_callable`] and [`Runtime::register_links_provider`].
#[derive(Default, Clone)]
pub struct Runtime {
    units: HashMap<String, GeneratedUnit>,
    callables: HashMap<String, Callable>,
    links_providers: HashMap<String, LinksCallable>,
    defaults: HashMap<String, IndexMap<String, Value>>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, unit: GeneratedUnit) {
        debug!("Loading unit {}", unit.mapper);
        self.units.insert(unit.mapper.qualified_name(), unit);
    }

    pub fn load_all(&mut self, units: impl IntoIterator<Item = GeneratedUnit>) {
        for unit in units {
            self.load(unit);
        }
    }

    pub fn register_callable<F>(&mut self, ty: &str, callable: F)
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.callables.insert(ty.to_string(), Arc::new(callable));
    }

    pub fn register_links_provider<F>(&mut self, ty: &str, provider: F)
    where
        F: Fn(&Value, &RequestContext) -> Result<Container> + Send + Sync + 'static,
    {
        self.links_providers
            .insert(ty.to_string(), Arc::new(provider));
    }

    /// Field values a freshly constructed `model` starts with
    pub fn set_defaults(&mut self, model: &str, fields: IndexMap<String, Value>) {
        self.defaults.insert(model.to_string(), fields);
    }

    /// Handle to the loaded unit named `mapper`, e.g. `gen.com.foo.UserMapper`
    pub fn mapper(&self, mapper: &str) -> Result<Mapper<'_>> {
        let unit = self
            .units
            .get(mapper)
            .ok_or_else(|| RuntimeError::UnknownMapper(mapper.to_string()))?;
        Ok(Mapper {
            runtime: self,
            unit,
        })
    }

    pub(crate) fn unit(&self, mapper: &TypeRef) -> Result<&GeneratedUnit> {
        self.units
            .get(&mapper.qualified_name())
            .ok_or_else(|| RuntimeError::UnknownMapper(mapper.to_string()))
    }

    pub(crate) fn callable(&self, ty: &TypeRef) -> Result<&Callable> {
        self.callables
            .get(&ty.qualified_name())
            .ok_or_else(|| RuntimeError::UnboundCallable(ty.to_string()))
    }

    pub(crate) fn links_provider(&self, ty: &TypeRef) -> Result<&LinksCallable> {
        self.links_providers
            .get(&ty.qualified_name())
            .ok_or_else(|| RuntimeError::UnboundCallable(ty.to_string()))
    }

    pub(crate) fn instantiate(&self, model: &TypeRef) -> Model {
        let type_name = model.qualified_name();
        let fields = self.defaults.get(&type_name).cloned().unwrap_or_default();
        Model { type_name, fields }
    }

    /// Run one function of a loaded unit
    pub(crate) fn call(
        &self,
        mapper: &TypeRef,
        function: FunctionKind,
        args: Vec<Value>,
        context: Option<&RequestContext>,
    ) -> Result<Value> {
        let unit = self.unit(mapper)?;
        Interpreter::new(self, unit).invoke(function, args, context)
    }
}

/// The four conversion functions of one loaded unit.
pub struct Mapper<'r> {
    runtime: &'r Runtime,
    unit: &'r GeneratedUnit,
}

impl Mapper<'_> {
    pub fn unit(&self) -> &GeneratedUnit {
        self.unit
    }

    pub fn to_json(&self, value: Value, context: &RequestContext) -> Result<Value> {
        self.run(FunctionKind::ToJson, value, Some(context))
    }

    pub fn to_json_list(&self, values: Value, context: &RequestContext) -> Result<Value> {
        self.run(FunctionKind::ToJsonCollection, values, Some(context))
    }

    pub fn from_json(&self, json: Value) -> Result<Value> {
        self.run(FunctionKind::FromJson, json, None)
    }

    pub fn from_json_list(&self, json: Value) -> Result<Value> {
        self.run(FunctionKind::FromJsonCollection, json, None)
    }

    fn run(
        &self,
        function: FunctionKind,
        argument: Value,
        context: Option<&RequestContext>,
    ) -> Result<Value> {
        Interpreter::new(self.runtime, self.unit).invoke(function, vec![argument], context)
    }
}
