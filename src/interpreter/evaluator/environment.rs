use std::collections::HashMap;

use tracing::trace;

use crate::interpreter::value::variable::Variable;

/// Index of a scope in the [`Environment`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// The global scope. It is created with the environment and never popped.
pub const GLOBAL: ScopeId = ScopeId(0);

/// What a scope was pushed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The global store.
    Global,
    /// One function call.
    Frame,
    /// A binding that lives only for one loop iteration.
    Binding,
}

#[derive(Debug)]
struct Scope {
    parent:    Option<ScopeId>,
    kind:      ScopeKind,
    variables: HashMap<String, Variable>,
    /// The scope that was current before this one was pushed.
    return_to: ScopeId,
}

/// An arena of scopes with parent links.
///
/// Scopes are pushed and popped strictly LIFO. Lookups start at the current
/// scope and walk the parent links, so a loop binding sees the frame around it
/// and a call frame sees the globals. Call frames are parented to [`GLOBAL`],
/// never to the caller.
///
/// # Example
/// ```
/// use kpl::{
///     ast::TypeKeyword,
///     interpreter::{
///         evaluator::environment::{Environment, ScopeKind},
///         value::{core::Value, variable::Variable},
///     },
/// };
///
/// let mut env = Environment::new();
/// env.declare(Variable::new(TypeKeyword::Num, "x", Value::Number(1.0)));
///
/// env.push_scope(ScopeKind::Frame);
/// env.declare(Variable::new(TypeKeyword::Num, "local", Value::Number(2.0)));
/// assert!(env.lookup("x").is_some());
/// env.declare_global(Variable::new(TypeKeyword::Num, "shared", Value::Number(3.0)));
/// env.pop_scope();
///
/// assert!(env.lookup("local").is_none());
/// assert!(env.lookup("shared").is_some());
/// ```
#[derive(Debug)]
pub struct Environment {
    scopes:  Vec<Scope>,
    current: ScopeId,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only an empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:  vec![Scope { parent:    None,
                                     kind:      ScopeKind::Global,
                                     variables: HashMap::new(),
                                     return_to: GLOBAL, }],
               current: GLOBAL, }
    }

    /// Pushes a new scope and makes it current.
    ///
    /// A `Frame` is parented to the global scope; a `Binding` to the current
    /// scope.
    pub fn push_scope(&mut self, kind: ScopeKind) {
        let parent = match kind {
            ScopeKind::Frame | ScopeKind::Global => GLOBAL,
            ScopeKind::Binding => self.current,
        };
        let id = ScopeId(self.scopes.len());

        self.scopes.push(Scope { parent: Some(parent),
                                 kind,
                                 variables: HashMap::new(),
                                 return_to: self.current });
        trace!(scope = id.0, ?kind, "pushed scope");

        self.current = id;
    }

    /// Pops the most recently pushed scope and restores the scope that was
    /// current before it. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() <= 1 {
            return;
        }
        if let Some(scope) = self.scopes.pop() {
            trace!(scope = self.scopes.len(), kind = ?scope.kind, "popped scope");
            self.current = scope.return_to;
        }
    }

    /// Finds a variable by walking from the current scope to the global scope.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        let mut id = Some(self.current);

        while let Some(ScopeId(index)) = id {
            let scope = &self.scopes[index];
            if let Some(variable) = scope.variables.get(name) {
                return Some(variable);
            }
            id = scope.parent;
        }

        None
    }

    /// Mutable version of [`Environment::lookup`].
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Variable> {
        let index = self.resolve(name)?;
        self.scopes[index].variables.get_mut(name)
    }

    fn resolve(&self, name: &str) -> Option<usize> {
        let mut id = Some(self.current);

        while let Some(ScopeId(index)) = id {
            let scope = &self.scopes[index];
            if scope.variables.contains_key(name) {
                return Some(index);
            }
            id = scope.parent;
        }

        None
    }

    /// Writes a declaration into the nearest `Global` or `Frame` scope,
    /// replacing any record of the same name there.
    ///
    /// Loop bindings are skipped, so a declaration inside a loop body outlives
    /// the iteration. A loop variable of the same name is shadowed only until
    /// the iteration ends.
    pub fn declare(&mut self, variable: Variable) {
        let mut index = self.current.0;

        while self.scopes[index].kind == ScopeKind::Binding {
            match self.scopes[index].parent {
                Some(ScopeId(parent)) => index = parent,
                None => break,
            }
        }

        self.scopes[index].variables
                          .insert(variable.name.clone(), variable);
    }

    /// Writes a declaration straight into the global scope, wherever it is
    /// made. Function declarations go here, so a function declared inside a
    /// call can still call itself and its siblings from its own frame.
    pub fn declare_global(&mut self, variable: Variable) {
        self.scopes[GLOBAL.0].variables
                             .insert(variable.name.clone(), variable);
    }

    /// Writes a variable into the current scope. Used for parameters and loop
    /// variables.
    pub fn bind(&mut self, variable: Variable) {
        let index = self.current.0;
        self.scopes[index].variables
                          .insert(variable.name.clone(), variable);
    }
}
