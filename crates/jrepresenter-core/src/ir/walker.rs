use super::{Constant, Expr, Function, GeneratedUnit, Stmt, ValueType, Visitor};
use crate::naming::TypeRef;

pub fn walk_unit<V: Visitor>(visitor: &mut V, unit: &GeneratedUnit) {
    for constant in &unit.constants {
        visitor.visit_constant(constant);
    }
    for function in &unit.functions {
        visitor.visit_function(function);
    }
}

pub fn walk_constant<V: Visitor>(visitor: &mut V, constant: &Constant) {
    visitor.visit_type_ref(&constant.ty);
}

pub fn walk_function<V: Visitor>(visitor: &mut V, function: &Function) {
    for param in &function.params {
        visitor.visit_value_type(&param.ty);
    }
    visitor.visit_value_type(&function.returns);
    for stmt in &function.body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Declare { ty, init, .. } => {
            visitor.visit_value_type(ty);
            visitor.visit_expr(init);
        }
        Stmt::Assign { value, .. }
        | Stmt::Put { value, .. }
        | Stmt::SetAttribute { value, .. } => visitor.visit_expr(value),
        Stmt::PutAll { source, .. } => visitor.visit_expr(source),
        Stmt::If { condition, then } => {
            visitor.visit_expr(condition);
            for stmt in then {
                visitor.visit_stmt(stmt);
            }
        }
        Stmt::Match { scrutinee, arms } => {
            visitor.visit_expr(scrutinee);
            for arm in arms {
                for stmt in &arm.body {
                    visitor.visit_stmt(stmt);
                }
            }
        }
        Stmt::Return(value) => visitor.visit_expr(value),
    }
}

pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Var(_)
        | Expr::Null
        | Expr::Str(_)
        | Expr::NewContainer
        | Expr::EmptyList
        | Expr::GetAttribute { .. }
        | Expr::HasKey { .. }
        | Expr::Lookup { .. }
        | Expr::SubContainer { .. }
        | Expr::Links { .. } => {}
        Expr::New(ty) | Expr::IsInstance { ty, .. } => visitor.visit_type_ref(ty),
        Expr::IsNull(value) => visitor.visit_expr(value),
        Expr::Cast { target, value } => {
            visitor.visit_value_type(target);
            visitor.visit_expr(value);
        }
        Expr::Apply { argument, .. } => visitor.visit_expr(argument),
        Expr::CallMapper { mapper, args, .. } => {
            visitor.visit_mapper_ref(mapper);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::MapEach { mapper, .. } => visitor.visit_mapper_ref(mapper),
    }
}

pub fn walk_value_type<V: Visitor>(visitor: &mut V, ty: &ValueType) {
    match ty {
        ValueType::Declared(ty) | ValueType::DeclaredList(ty) => visitor.visit_type_ref(ty),
        ValueType::Container
        | ValueType::ContainerList
        | ValueType::SerializedList
        | ValueType::RequestContext => {}
    }
}

pub fn walk_type_ref<V: Visitor>(visitor: &mut V, ty: &TypeRef) {
    for arg in ty.args() {
        visitor.visit_type_ref(arg);
    }
}
