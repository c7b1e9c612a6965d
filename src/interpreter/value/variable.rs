use crate::{ast::TypeKeyword, interpreter::value::core::Value};

/// A named, typed slot in the environment.
///
/// Created by a declaration, by binding a parameter or loop variable, or by
/// registering a native. The `kind` is fixed when the record is written; a
/// later declaration of the same name replaces the whole record.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The declared type.
    pub kind:  TypeKeyword,
    /// The name the variable is looked up by.
    pub name:  String,
    /// The current value.
    pub value: Value,
}

impl Variable {
    /// Creates a variable record.
    #[must_use]
    pub fn new(kind: TypeKeyword, name: impl Into<String>, value: Value) -> Self {
        Self { kind,
               name: name.into(),
               value }
    }
}
