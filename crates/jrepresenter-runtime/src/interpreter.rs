use crate::cast::cast;
use crate::context::RequestContext;
use crate::error::{Result, RuntimeError};
use crate::runtime::Runtime;
use crate::value::{Container, Value};
use jrepresenter_core::GeneratedUnit;
use jrepresenter_core::ir::{Expr, FunctionKind, Stmt, ValueType, Var};
use jrepresenter_core::naming::TypeRef;
use std::collections::HashMap;

/// Local variables of one function call.
struct Frame<'c> {
    vars: HashMap<Var, Value>,
    context: Option<&'c RequestContext>,
}

impl Frame<'_> {
    fn get(&self, var: Var) -> Result<&Value> {
        self.vars.get(&var).ok_or(RuntimeError::UnboundVariable(var))
    }

    fn get_mut(&mut self, var: Var) -> Result<&mut Value> {
        self.vars
            .get_mut(&var)
            .ok_or(RuntimeError::UnboundVariable(var))
    }

    fn context(&self) -> Result<&RequestContext> {
        self.context
            .ok_or(RuntimeError::UnboundVariable(Var::RequestContext))
    }

    /// Mutable container bound to `var`
    fn container_mut(&mut self, var: Var) -> Result<&mut Container> {
        match self.get_mut(var)? {
            Value::Map(map) => Ok(map),
            Value::Null => Err(RuntimeError::NullDereference(format!("{var:?}"))),
            other => Err(mismatch("map", other)),
        }
    }

    fn container(&self, var: Var) -> Result<&Container> {
        match self.get(var)? {
            Value::Map(map) => Ok(map),
            Value::Null => Err(RuntimeError::NullDereference(format!("{var:?}"))),
            other => Err(mismatch("map", other)),
        }
    }
}

enum Flow {
    Continue,
    Return(Value),
}

/// Tree-walking evaluator for the functions of one unit.
pub(crate) struct Interpreter<'r> {
    runtime: &'r Runtime,
    unit: &'r GeneratedUnit,
}

impl<'r> Interpreter<'r> {
    pub fn new(runtime: &'r Runtime, unit: &'r GeneratedUnit) -> Self {
        Self { runtime, unit }
    }

    /// Bind `args` to the non-context parameters of `function` in order and run it.
    ///
    /// Arguments are not checked against parameter types; a subclass model
    /// is a valid argument for its base unit.
    pub fn invoke(
        &self,
        function: FunctionKind,
        args: Vec<Value>,
        context: Option<&RequestContext>,
    ) -> Result<Value> {
        let func = self
            .unit
            .function(function)
            .ok_or_else(|| RuntimeError::MissingFunction {
                mapper: self.unit.mapper.to_string(),
                function,
            })?;

        let mut frame = Frame {
            vars: HashMap::new(),
            context,
        };
        let mut args = args.into_iter();
        for param in &func.params {
            if param.ty == ValueType::RequestContext {
                continue;
            }
            frame.vars.insert(param.var, args.next().unwrap_or_default());
        }

        match self.exec_block(&mut frame, &func.body)? {
            Flow::Return(value) => Ok(value),
            Flow::Continue => Ok(Value::Null),
        }
    }

    fn exec_block(&self, frame: &mut Frame<'_>, stmts: &[Stmt]) -> Result<Flow> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(frame, stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Continue)
    }

    fn exec_stmt(&self, frame: &mut Frame<'_>, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Declare { var, init, .. } => {
                let value = self.eval_expr(frame, init)?;
                frame.vars.insert(*var, value);
            }
            Stmt::Assign { var, value } => {
                let value = self.eval_expr(frame, value)?;
                frame.vars.insert(*var, value);
            }
            Stmt::Put { target, key, value } => {
                let value = self.eval_expr(frame, value)?;
                frame.container_mut(*target)?.insert(key.clone(), value);
            }
            Stmt::PutAll { target, source } => {
                let entries = match self.eval_expr(frame, source)? {
                    Value::Map(entries) => entries,
                    Value::Null => {
                        return Err(RuntimeError::NullDereference("putAll source".to_string()));
                    }
                    other => return Err(mismatch("map", &other)),
                };
                let container = frame.container_mut(*target)?;
                for (key, value) in entries {
                    container.insert(key, value);
                }
            }
            Stmt::SetAttribute {
                target,
                attribute,
                value,
            } => {
                let value = self.eval_expr(frame, value)?;
                match frame.get_mut(*target)? {
                    Value::Model(model) => model.set(attribute.name(), value),
                    Value::Null => {
                        return Err(RuntimeError::NullDereference(format!(
                            "set {}",
                            attribute.name()
                        )));
                    }
                    other => return Err(mismatch("model", other)),
                }
            }
            Stmt::If { condition, then } => {
                if self.eval_condition(frame, condition)? {
                    return self.exec_block(frame, then);
                }
            }
            Stmt::Match { scrutinee, arms } => {
                let scrutinee = self.eval_expr(frame, scrutinee)?;
                if let Some(arm) = arms
                    .iter()
                    .find(|arm| scrutinee.as_str() == Some(arm.literal.as_str()))
                {
                    return self.exec_block(frame, &arm.body);
                }
            }
            Stmt::Return(value) => return Ok(Flow::Return(self.eval_expr(frame, value)?)),
        }
        Ok(Flow::Continue)
    }

    fn eval_condition(&self, frame: &Frame<'_>, condition: &Expr) -> Result<bool> {
        let value = self.eval_expr(frame, condition)?;
        value.as_bool().ok_or_else(|| mismatch("boolean", &value))
    }

    fn eval_expr(&self, frame: &Frame<'_>, expr: &Expr) -> Result<Value> {
        Ok(match expr {
            Expr::Var(var) => frame.get(*var)?.clone(),
            Expr::Null => Value::Null,
            Expr::Str(s) => Value::string(s.as_str()),
            Expr::NewContainer => Value::Map(Container::new()),
            Expr::New(ty) => Value::Model(self.runtime.instantiate(ty)),
            Expr::EmptyList => Value::List(Vec::new()),
            Expr::GetAttribute { target, attribute } => match frame.get(*target)? {
                Value::Model(model) => model.get(attribute.name()).clone(),
                Value::Null => {
                    return Err(RuntimeError::NullDereference(format!(
                        "get {}",
                        attribute.name()
                    )));
                }
                other => return Err(mismatch("model", other)),
            },
            Expr::HasKey { container, key } => {
                Value::bool(frame.container(*container)?.contains_key(key))
            }
            Expr::Lookup { container, key } => frame
                .container(*container)?
                .get(key)
                .cloned()
                .unwrap_or_default(),
            Expr::SubContainer { container, key } => {
                match frame.container(*container)?.get(key) {
                    None => Value::Map(Container::new()),
                    Some(value) => cast(value.clone(), &ValueType::Container)?,
                }
            }
            Expr::IsNull(value) => Value::bool(self.eval_expr(frame, value)?.is_null()),
            Expr::IsInstance { value, ty } => Value::bool(
                frame
                    .get(*value)?
                    .as_model()
                    .is_some_and(|model| model.type_name == ty.qualified_name()),
            ),
            Expr::Cast { target, value } => cast(self.eval_expr(frame, value)?, target)?,
            Expr::Apply { constant, argument } => {
                let argument = self.eval_expr(frame, argument)?;
                let callable = self.runtime.callable(self.constant_type(constant)?)?;
                callable(argument)?
            }
            Expr::Links {
                constant,
                value,
                context,
            } => {
                if *context != Var::RequestContext {
                    return Err(RuntimeError::UnboundVariable(*context));
                }
                let provider = self.runtime.links_provider(self.constant_type(constant)?)?;
                Value::Map(provider(frame.get(*value)?, frame.context()?)?)
            }
            Expr::CallMapper {
                mapper,
                function,
                args,
            } => {
                let mut values = Vec::with_capacity(args.len());
                let mut context = None;
                for arg in args {
                    match arg {
                        Expr::Var(Var::RequestContext) => context = Some(frame.context()?),
                        arg => values.push(self.eval_expr(frame, arg)?),
                    }
                }
                self.runtime.call(mapper, *function, values, context)?
            }
            Expr::MapEach {
                source,
                mapper,
                function,
                context,
            } => {
                let context = match context {
                    Some(_) => Some(frame.context()?),
                    None => None,
                };
                let items = match frame.get(*source)? {
                    Value::List(items) => items,
                    Value::Null => {
                        return Err(RuntimeError::NullDereference(format!("{source:?}")));
                    }
                    other => return Err(mismatch("list", other)),
                };
                Value::List(
                    items
                        .iter()
                        .map(|item| {
                            self.runtime
                                .call(mapper, *function, vec![item.clone()], context)
                        })
                        .collect::<Result<Vec<_>>>()?,
                )
            }
        })
    }

    fn constant_type(&self, name: &str) -> Result<&'r TypeRef> {
        self.unit
            .constant(name)
            .map(|constant| &constant.ty)
            .ok_or_else(|| RuntimeError::UnboundCallable(name.to_string()))
    }
}

fn mismatch(expected: &str, found: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        expected: expected.to_string(),
        found: found.kind(),
    }
}
