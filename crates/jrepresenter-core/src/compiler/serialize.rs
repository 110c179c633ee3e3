use super::UnitBuilder;
use crate::EMBEDDED_KEY;
use crate::descriptor::AttributeMapping;
use crate::error::Result;
use crate::ir::{ConstantRole, Expr, Function, FunctionKind, Param, Stmt, ValueType, Var};

/// `toJSON(value, requestContext)`
pub(super) fn to_json(builder: &mut UnitBuilder<'_>) -> Result<Function> {
    let mut body = vec![Stmt::Declare {
        var: Var::Json,
        ty: ValueType::Container,
        init: Expr::NewContainer,
    }];

    if let Some(provider) = builder.links_provider() {
        let constant = builder.constant(provider, ConstantRole::LinksProvider);
        body.push(Stmt::PutAll {
            target: Var::Json,
            source: Expr::Links {
                constant,
                value: Var::Value,
                context: Var::RequestContext,
            },
        });
    }

    let attributes = builder.attributes;
    for mapping in attributes.iter().filter(|m| !m.is_embedded()) {
        let value = write_value(builder, mapping)?;
        body.push(Stmt::put(Var::Json, mapping.wire_key(), value));
    }

    if builder.has_embedded() {
        body.push(Stmt::Declare {
            var: Var::EmbeddedMap,
            ty: ValueType::Container,
            init: Expr::NewContainer,
        });
        for mapping in attributes.iter().filter(|m| m.is_embedded()) {
            let value = write_value(builder, mapping)?;
            body.push(Stmt::put(Var::EmbeddedMap, mapping.wire_key(), value));
        }
        body.push(Stmt::put(Var::Json, EMBEDDED_KEY, Expr::var(Var::EmbeddedMap)));
    }

    if let Some(dispatch) = &builder.descriptor.subclass_dispatch {
        body.extend(super::subclass::serialize(builder, dispatch)?);
    }

    body.push(Stmt::Return(Expr::var(Var::Json)));

    Ok(Function {
        kind: FunctionKind::ToJson,
        params: vec![
            Param {
                var: Var::Value,
                ty: ValueType::Declared(builder.descriptor.model.clone()),
            },
            Param {
                var: Var::RequestContext,
                ty: ValueType::RequestContext,
            },
        ],
        returns: ValueType::Container,
        body,
    })
}

/// `toJSON(values, requestContext)`
pub(super) fn to_json_collection(builder: &UnitBuilder<'_>) -> Function {
    Function {
        kind: FunctionKind::ToJsonCollection,
        params: vec![
            Param {
                var: Var::Values,
                ty: ValueType::DeclaredList(builder.descriptor.model.clone()),
            },
            Param {
                var: Var::RequestContext,
                ty: ValueType::RequestContext,
            },
        ],
        returns: ValueType::SerializedList,
        body: vec![Stmt::Return(Expr::MapEach {
            source: Var::Values,
            mapper: builder.mapper.clone(),
            function: FunctionKind::ToJson,
            context: Some(Var::RequestContext),
        })],
    }
}

/// Wire value of one mapping, read from `value`
fn write_value(builder: &mut UnitBuilder<'_>, mapping: &AttributeMapping) -> Result<Expr> {
    let current = Expr::get(Var::Value, mapping.model_attribute());
    Ok(match mapping {
        AttributeMapping::Property {
            serializer: Some(serializer),
            ..
        } => {
            let constant = builder.constant(serializer, ConstantRole::Serializer);
            Expr::apply(constant, current)
        }
        AttributeMapping::Property { .. } => current,
        AttributeMapping::SingleNested {
            nested_representer, ..
        } => Expr::CallMapper {
            mapper: builder.nested_mapper(nested_representer)?,
            function: FunctionKind::ToJson,
            args: vec![current, Expr::var(Var::RequestContext)],
        },
        AttributeMapping::Collection {
            nested_representer, ..
        } => Expr::CallMapper {
            mapper: builder.nested_mapper(nested_representer)?,
            function: FunctionKind::ToJsonCollection,
            args: vec![current, Expr::var(Var::RequestContext)],
        },
    })
}
