use super::UnitBuilder;
use crate::EMBEDDED_KEY;
use crate::descriptor::AttributeMapping;
use crate::error::Result;
use crate::ir::{ConstantRole, Expr, Function, FunctionKind, Param, Stmt, ValueType, Var};

/// `fromJSON(json)`
pub(super) fn from_json(builder: &mut UnitBuilder<'_>) -> Result<Function> {
    let descriptor = builder.descriptor;
    let mut body = vec![Stmt::when(
        Expr::is_null(Expr::var(Var::Json)),
        vec![Stmt::Return(Expr::Null)],
    )];

    if let Some(deserializer) = &descriptor.custom_deserializer {
        let constant = builder.constant(deserializer, ConstantRole::CustomDeserializer);
        body.push(Stmt::Return(Expr::apply(constant, Expr::var(Var::Json))));
        return Ok(from_json_function(builder, body));
    }

    match &descriptor.subclass_dispatch {
        Some(dispatch) => body.extend(super::subclass::construct(builder, dispatch)?),
        None => body.push(Stmt::Declare {
            var: Var::Model,
            ty: ValueType::Declared(descriptor.model.clone()),
            init: Expr::New(descriptor.model.clone()),
        }),
    }

    if builder.has_embedded() {
        body.push(Stmt::Declare {
            var: Var::EmbeddedMap,
            ty: ValueType::Container,
            init: Expr::SubContainer {
                container: Var::Json,
                key: EMBEDDED_KEY.to_string(),
            },
        });
    }

    for mapping in builder.attributes {
        let source = if mapping.is_embedded() {
            Var::EmbeddedMap
        } else {
            Var::Json
        };
        let key = mapping.wire_key();
        let value = read_value(builder, mapping, Expr::lookup(source, &key))?;
        body.push(Stmt::when(
            Expr::has_key(source, key),
            vec![Stmt::SetAttribute {
                target: Var::Model,
                attribute: mapping.model_attribute().clone(),
                value,
            }],
        ));
    }

    body.push(Stmt::Return(Expr::var(Var::Model)));
    Ok(from_json_function(builder, body))
}

fn from_json_function(builder: &UnitBuilder<'_>, body: Vec<Stmt>) -> Function {
    Function {
        kind: FunctionKind::FromJson,
        params: vec![Param {
            var: Var::Json,
            ty: ValueType::Container,
        }],
        returns: ValueType::Declared(builder.descriptor.model.clone()),
        body,
    }
}

/// `fromJSON(jsonArray)`; a null list reads as an empty one
pub(super) fn from_json_collection(builder: &UnitBuilder<'_>) -> Function {
    Function {
        kind: FunctionKind::FromJsonCollection,
        params: vec![Param {
            var: Var::JsonArray,
            ty: ValueType::ContainerList,
        }],
        returns: ValueType::DeclaredList(builder.descriptor.model.clone()),
        body: vec![
            Stmt::when(
                Expr::is_null(Expr::var(Var::JsonArray)),
                vec![Stmt::Return(Expr::EmptyList)],
            ),
            Stmt::Return(Expr::MapEach {
                source: Var::JsonArray,
                mapper: builder.mapper.clone(),
                function: FunctionKind::FromJson,
                context: None,
            }),
        ],
    }
}

/// Model value of one mapping, converted from the raw wire value
fn read_value(
    builder: &mut UnitBuilder<'_>,
    mapping: &AttributeMapping,
    raw: Expr,
) -> Result<Expr> {
    Ok(match mapping {
        AttributeMapping::Property {
            wire_attribute,
            deserializer: Some(deserializer),
            ..
        } => {
            let constant = builder.constant(deserializer, ConstantRole::Deserializer);
            let argument = match &wire_attribute.ty {
                Some(ty) => Expr::cast(ValueType::Declared(ty.clone()), raw),
                None => raw,
            };
            Expr::apply(constant, argument)
        }
        AttributeMapping::Property {
            model_attribute, ..
        } => match &model_attribute.ty {
            Some(ty) => Expr::cast(ValueType::Declared(ty.clone()), raw),
            None => raw,
        },
        AttributeMapping::SingleNested {
            nested_representer, ..
        } => Expr::CallMapper {
            mapper: builder.nested_mapper(nested_representer)?,
            function: FunctionKind::FromJson,
            args: vec![Expr::cast(ValueType::Container, raw)],
        },
        AttributeMapping::Collection {
            nested_representer, ..
        } => Expr::CallMapper {
            mapper: builder.nested_mapper(nested_representer)?,
            function: FunctionKind::FromJsonCollection,
            args: vec![Expr::cast(ValueType::ContainerList, raw)],
        },
    })
}
