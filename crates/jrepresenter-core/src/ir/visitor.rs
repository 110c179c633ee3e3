use super::walker;
use super::{Constant, Expr, Function, GeneratedUnit, Stmt, ValueType};
use crate::naming::TypeRef;

/// Read-only traversal over a generated unit.
///
/// Every method defaults to walking its children; override the ones you
/// care about and call the matching `walker::walk_*` to keep descending.
pub trait Visitor: Sized {
    fn visit_unit(&mut self, unit: &GeneratedUnit) {
        walker::walk_unit(self, unit);
    }

    fn visit_constant(&mut self, constant: &Constant) {
        walker::walk_constant(self, constant);
    }

    fn visit_function(&mut self, function: &Function) {
        walker::walk_function(self, function);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walker::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walker::walk_expr(self, expr);
    }

    fn visit_value_type(&mut self, ty: &ValueType) {
        walker::walk_value_type(self, ty);
    }

    fn visit_type_ref(&mut self, ty: &TypeRef) {
        walker::walk_type_ref(self, ty);
    }

    /// A generated mapper referenced by a call; also visited as a type
    fn visit_mapper_ref(&mut self, mapper: &TypeRef) {
        self.visit_type_ref(mapper);
    }
}
