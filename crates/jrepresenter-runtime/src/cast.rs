//! Narrowing casts, following what the declared Java type accepts.

use crate::error::{Result, RuntimeError};
use crate::value::Value;
use jrepresenter_core::ir::ValueType;
use jrepresenter_core::naming::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CastKind {
    String,
    Integral,
    Number,
    Boolean,
    Map,
    List,
    Any,
    /// A model instance of exactly this type
    Model,
}

fn kind_of(ty: &TypeRef) -> CastKind {
    match ty.qualified_name().as_str() {
        "java.lang.String" | "String" => CastKind::String,
        "java.lang.Integer" | "Integer" | "int" | "java.lang.Long" | "Long" | "long"
        | "java.lang.Short" | "Short" | "short" | "java.lang.Byte" | "Byte" | "byte"
        | "java.math.BigInteger" => CastKind::Integral,
        "java.lang.Double" | "Double" | "double" | "java.lang.Float" | "Float" | "float"
        | "java.lang.Number" | "Number" | "java.math.BigDecimal" => CastKind::Number,
        "java.lang.Boolean" | "Boolean" | "boolean" => CastKind::Boolean,
        "java.util.Map" | "java.util.LinkedHashMap" | "java.util.HashMap" | "Map" => CastKind::Map,
        "java.util.List" | "java.util.ArrayList" | "java.util.Collection" | "List" => {
            CastKind::List
        }
        "java.lang.Object" | "Object" => CastKind::Any,
        _ => CastKind::Model,
    }
}

/// Check `value` against `target`; `null` passes every cast
pub(crate) fn cast(value: Value, target: &ValueType) -> Result<Value> {
    if value.is_null() {
        return Ok(value);
    }

    let (accepted, expected) = match target {
        ValueType::Container => (matches!(value, Value::Map(_)), "map".to_string()),
        ValueType::ContainerList | ValueType::SerializedList | ValueType::DeclaredList(_) => {
            (matches!(value, Value::List(_)), "list".to_string())
        }
        ValueType::RequestContext => (false, "request context".to_string()),
        ValueType::Declared(ty) => (accepts(ty, &value), ty.to_string()),
    };

    if accepted {
        Ok(value)
    } else {
        Err(RuntimeError::TypeMismatch {
            expected,
            found: value.kind(),
        })
    }
}

fn accepts(ty: &TypeRef, value: &Value) -> bool {
    use serde_json::Value as Json;

    match (kind_of(ty), value) {
        (CastKind::Any, _) => true,
        (CastKind::String, Value::Scalar(Json::String(_))) => true,
        (CastKind::Integral, Value::Scalar(Json::Number(n))) => n.is_i64() || n.is_u64(),
        (CastKind::Number, Value::Scalar(Json::Number(_))) => true,
        (CastKind::Boolean, Value::Scalar(Json::Bool(_))) => true,
        (CastKind::Map, Value::Map(_)) => true,
        (CastKind::List, Value::List(_)) => true,
        (CastKind::Model, Value::Model(model)) => model.type_name == ty.qualified_name(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Model;
    use rstest::rstest;
    use serde_json::json;

    fn declared(ty: &str) -> ValueType {
        ValueType::Declared(TypeRef::parse(ty).unwrap())
    }

    #[rstest]
    #[case("java.lang.String", json!("Bob"))]
    #[case("java.lang.Integer", json!(42))]
    #[case("int", json!(-7))]
    #[case("java.lang.Double", json!(1.5))]
    #[case("java.lang.Double", json!(2))]
    #[case("java.lang.Boolean", json!(true))]
    #[case("java.util.Map", json!({"a": 1}))]
    #[case("java.util.List", json!([1, 2]))]
    #[case("java.lang.Object", json!("anything"))]
    fn test_cast_accepts(#[case] ty: &str, #[case] json: serde_json::Value) {
        let value = Value::from_json(json);
        assert_eq!(cast(value.clone(), &declared(ty)), Ok(value));
    }

    #[rstest]
    #[case("java.lang.String", json!(42))]
    #[case("java.lang.Integer", json!(1.5))]
    #[case("java.lang.Integer", json!("42"))]
    #[case("java.lang.Boolean", json!("true"))]
    #[case("java.util.Map", json!([1]))]
    #[case("com.foo.User", json!({"fname": "Bob"}))]
    fn test_cast_rejects(#[case] ty: &str, #[case] json: serde_json::Value) {
        let result = cast(Value::from_json(json), &declared(ty));
        assert!(matches!(result, Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_null_passes_every_cast() {
        for target in [
            declared("java.lang.String"),
            declared("com.foo.User"),
            ValueType::Container,
            ValueType::ContainerList,
        ] {
            assert_eq!(cast(Value::Null, &target), Ok(Value::Null));
        }
    }

    #[test]
    fn test_model_cast_requires_exact_type() {
        let git = Value::Model(Model::new("com.foo.GitMaterial"));
        assert!(cast(git.clone(), &declared("com.foo.GitMaterial")).is_ok());
        assert_eq!(
            cast(git, &declared("com.foo.SvnMaterial")),
            Err(RuntimeError::TypeMismatch {
                expected: "com.foo.SvnMaterial".to_string(),
                found: "model `com.foo.GitMaterial`".to_string(),
            })
        );
    }

    #[test]
    fn test_container_casts() {
        let map = Value::from_json(json!({}));
        assert!(cast(map.clone(), &ValueType::Container).is_ok());
        assert!(cast(map, &ValueType::ContainerList).is_err());
    }
}
