use super::UnitBuilder;
use crate::descriptor::SubclassDispatch;
use crate::error::{Error, Result};
use crate::ir::{Expr, FunctionKind, MatchArm, Stmt, ValueType, Var};
use crate::naming::TypeRef;
use std::collections::HashSet;

/// A dispatch variant with its references resolved.
pub(super) struct ResolvedVariant<'d> {
    pub id: &'d str,
    pub mapper: TypeRef,
    pub model: TypeRef,
}

pub(super) fn resolve_variants<'d>(
    builder: &UnitBuilder<'_>,
    dispatch: &'d SubclassDispatch,
) -> Result<Vec<ResolvedVariant<'d>>> {
    let mut seen = HashSet::new();
    dispatch
        .variants
        .iter()
        .map(|variant| {
            if !seen.insert(variant.id.as_str()) {
                return Err(Error::DuplicateDiscriminator {
                    representer: builder.descriptor.representer.clone(),
                    id: variant.id.clone(),
                });
            }
            let descriptor = builder.resolve(&variant.representer)?;
            Ok(ResolvedVariant {
                id: &variant.id,
                mapper: builder.nested_mapper(&variant.representer)?,
                model: descriptor.model.clone(),
            })
        })
        .collect()
}

/// Write the discriminator and the variant's fields for whichever variant
/// the value is an instance of.
pub(super) fn serialize(builder: &UnitBuilder<'_>, dispatch: &SubclassDispatch) -> Result<Vec<Stmt>> {
    let variants = resolve_variants(builder, dispatch)?;
    Ok(variants
        .into_iter()
        .map(|variant| {
            let fields = Expr::CallMapper {
                mapper: variant.mapper,
                function: FunctionKind::ToJson,
                args: vec![
                    Expr::cast(ValueType::Declared(variant.model.clone()), Expr::var(Var::Value)),
                    Expr::var(Var::RequestContext),
                ],
            };
            let write = match &dispatch.nested_attribute {
                Some(nested) => Stmt::put(Var::Json, nested, fields),
                None => Stmt::PutAll {
                    target: Var::Json,
                    source: fields,
                },
            };
            Stmt::when(
                Expr::IsInstance {
                    value: Var::Value,
                    ty: variant.model,
                },
                vec![
                    Stmt::put(Var::Json, &dispatch.discriminator, Expr::Str(variant.id.to_string())),
                    write,
                ],
            )
        })
        .collect())
}

/// Declare `model` and construct it through the variant selected by the
/// discriminator; an unknown or missing discriminator leaves it null.
pub(super) fn construct(builder: &UnitBuilder<'_>, dispatch: &SubclassDispatch) -> Result<Vec<Stmt>> {
    let variants = resolve_variants(builder, dispatch)?;
    let source = match &dispatch.nested_attribute {
        Some(nested) => Expr::cast(ValueType::Container, Expr::lookup(Var::Json, nested)),
        None => Expr::var(Var::Json),
    };

    let arms = variants
        .into_iter()
        .map(|variant| MatchArm {
            literal: variant.id.to_string(),
            body: vec![Stmt::Assign {
                var: Var::Model,
                value: Expr::CallMapper {
                    mapper: variant.mapper,
                    function: FunctionKind::FromJson,
                    args: vec![source.clone()],
                },
            }],
        })
        .collect();

    Ok(vec![
        Stmt::Declare {
            var: Var::Model,
            ty: ValueType::Declared(builder.descriptor.model.clone()),
            init: Expr::Null,
        },
        Stmt::Match {
            scrutinee: Expr::lookup(Var::Json, &dispatch.discriminator),
            arms,
        },
        Stmt::when(
            Expr::is_null(Expr::var(Var::Model)),
            vec![Stmt::Return(Expr::var(Var::Model))],
        ),
    ])
}
