//! Backward resolver.
//!
//! Finds the most recent binding of a name visible from a position and
//! statically evaluates its initializer to a module path:
//!
//! ```text
//! local app = hs.application()          -- app    → hs.application
//! local window = app:mainWindow()       -- window → hs.window
//! local tab = { win = window }          -- tab.win → hs.window
//! ```
//!
//! Evaluation recurses whenever an initializer depends on another variable
//! (a method receiver or a table field holding an identifier). Each nested
//! lookup only sees statements that start before the statement holding the
//! reference.

use smol_str::SmolStr;

use super::context::{QueryContext, ResolveLimits};
use super::declaration::{CallTarget, Declaration};
use super::error::ResolveError;
use crate::base::Position;
use crate::base::constants::{MODULE_SEPARATOR, ROOT_NAMESPACE};
use crate::docs::DocStore;
use crate::parser::{
    Block, Chunk, Expression, ExpressionKind, FunctionBody, Indexer, Statement, StatementKind,
    TableField, TableFieldKind,
};

type ResolveResult<T> = Result<T, ResolveError>;

/// Outcome of checking one candidate statement
enum Scan {
    /// The binding was found and evaluated
    Found(CallTarget),
    /// Not this statement, keep scanning backward
    Miss,
    /// The binding was found but cannot be evaluated
    Stop,
}

/// Resolves declarations against one parsed chunk
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    chunk: &'a Chunk,
    store: &'a DocStore,
    limits: ResolveLimits,
}

impl<'a> Resolver<'a> {
    pub fn new(chunk: &'a Chunk, store: &'a DocStore) -> Self {
        Self {
            chunk,
            store,
            limits: ResolveLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ResolveLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Module path (or opaque return type) held by the declared symbol
    pub fn resolve(&self, declaration: &Declaration) -> ResolveResult<Option<String>> {
        let mut ctx = QueryContext::new(self.limits);
        let target = self.find_statement(declaration, &mut ctx)?;
        Ok(target.and_then(|t| self.store.resolve_constructor(&t.base, &t.identifier)))
    }

    /// The call that produced the declared symbol's value, as seen from the
    /// end of the declaration's line
    pub fn find_statement(
        &self,
        declaration: &Declaration,
        ctx: &mut QueryContext,
    ) -> ResolveResult<Option<CallTarget>> {
        self.find_statement_before(declaration, Position::end_of_line(declaration.line), ctx)
    }

    fn find_statement_before(
        &self,
        declaration: &Declaration,
        cutoff: Position,
        ctx: &mut QueryContext,
    ) -> ResolveResult<Option<CallTarget>> {
        ctx.enter(declaration, cutoff)?;
        let result = self.scan(declaration, cutoff, ctx);
        ctx.leave();
        result
    }

    fn scan(
        &self,
        declaration: &Declaration,
        cutoff: Position,
        ctx: &mut QueryContext,
    ) -> ResolveResult<Option<CallTarget>> {
        let mut candidates = Vec::new();
        collect_statements(&self.chunk.body, cutoff, &mut candidates);
        tracing::trace!(
            name = %declaration.name,
            line = cutoff.line,
            candidates = candidates.len(),
            depth = ctx.depth(),
            "scanning declarations"
        );

        let mut name = SmolStr::new(&declaration.name);
        for statement in candidates.into_iter().rev() {
            match self.parse_variables(statement, &mut name, declaration, ctx)? {
                Scan::Found(target) => {
                    tracing::debug!(
                        name = %declaration.name,
                        base = %target.base,
                        identifier = %target.identifier,
                        "found declaration"
                    );
                    return Ok(Some(target));
                }
                Scan::Miss => {}
                Scan::Stop => return Ok(None),
            }
        }
        Ok(None)
    }

    // =========================================================================
    // Bindings
    // =========================================================================

    /// Check every name bound by `statement` against `name`.
    ///
    /// A plain identifier initializer renames the search so the scan goes on
    /// to follow the alias.
    fn parse_variables(
        &self,
        statement: &Statement,
        name: &mut SmolStr,
        declaration: &Declaration,
        ctx: &mut QueryContext,
    ) -> ResolveResult<Scan> {
        let (variables, init): (Vec<&str>, &[Expression]) = match &statement.kind {
            StatementKind::Local(local) => (
                local.variables.iter().map(|v| v.name.as_str()).collect(),
                &local.init,
            ),
            StatementKind::Assignment(assignment) => (
                assignment
                    .variables
                    .iter()
                    .map(|v| v.as_identifier().unwrap_or_default())
                    .collect(),
                &assignment.init,
            ),
            _ => return Ok(Scan::Miss),
        };

        for (index, variable) in variables.into_iter().enumerate() {
            if variable != name.as_str() {
                continue;
            }
            let Some(value) = init.get(index) else {
                tracing::debug!(name = %name, "more variables than initializers");
                return Ok(Scan::Stop);
            };

            match &value.kind {
                ExpressionKind::Call { base, .. } if is_member(base) => {
                    return Ok(match self.call_target(base, statement.span.start, ctx)? {
                        Some(target) => Scan::Found(target),
                        None => Scan::Stop,
                    });
                }
                ExpressionKind::Table(fields) if declaration.is_table_query() => {
                    if let Some(target) =
                        self.table_expression(fields, declaration, statement.span.start, ctx)?
                    {
                        return Ok(Scan::Found(target));
                    }
                }
                ExpressionKind::Identifier(alias) => {
                    tracing::trace!(from = %name, to = %alias, "following alias");
                    *name = alias.clone();
                }
                _ => {}
            }
        }
        Ok(Scan::Miss)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Module and member of a method or function call.
    ///
    /// `callee` is the called expression, `hs.application` in
    /// `hs.application()` or `app:mainWindow` in `app:mainWindow()`.
    fn call_target(
        &self,
        callee: &Expression,
        cutoff: Position,
        ctx: &mut QueryContext,
    ) -> ResolveResult<Option<CallTarget>> {
        let ExpressionKind::Member {
            base, identifier, ..
        } = &callee.kind
        else {
            return Ok(None);
        };
        let Some(module) = self.evaluate_receiver(base, cutoff, ctx)? else {
            return Ok(None);
        };
        Ok(Some(CallTarget {
            base: module,
            identifier: identifier.name.to_string(),
        }))
    }

    /// Module path of the value a member is looked up on
    fn evaluate_receiver(
        &self,
        receiver: &Expression,
        cutoff: Position,
        ctx: &mut QueryContext,
    ) -> ResolveResult<Option<String>> {
        match &receiver.kind {
            ExpressionKind::Identifier(name) if name == ROOT_NAMESPACE => {
                Ok(Some(ROOT_NAMESPACE.to_string()))
            }
            ExpressionKind::Identifier(name) => {
                let declaration = Declaration::new(name.as_str(), cutoff.line);
                self.resolve_module(&declaration, cutoff, ctx)
            }
            ExpressionKind::Member { .. } | ExpressionKind::Index { .. } => {
                if let Some(path) = namespace_path(receiver) {
                    return Ok(Some(path));
                }
                match table_reference(receiver, cutoff.line) {
                    Some(declaration) => self.resolve_module(&declaration, cutoff, ctx),
                    None => Ok(None),
                }
            }
            ExpressionKind::Call { base, .. } => {
                let Some(target) = self.call_target(base, cutoff, ctx)? else {
                    return Ok(None);
                };
                Ok(self
                    .store
                    .resolve_constructor(&target.base, &target.identifier)
                    .filter(|path| is_module_path(path)))
            }
            ExpressionKind::Paren(inner) => self.evaluate_receiver(inner, cutoff, ctx),
            _ => Ok(None),
        }
    }

    /// Nested resolution that must end in a module path
    fn resolve_module(
        &self,
        declaration: &Declaration,
        cutoff: Position,
        ctx: &mut QueryContext,
    ) -> ResolveResult<Option<String>> {
        let Some(target) = self.find_statement_before(declaration, cutoff, ctx)? else {
            return Ok(None);
        };
        Ok(self
            .store
            .resolve_constructor(&target.base, &target.identifier)
            .filter(|path| is_module_path(path)))
    }

    /// Find the field selected by the declaration's key or index.
    ///
    /// Descends into the first nested table while the requested depth is not
    /// reached; only fields at exactly the requested depth are candidates.
    fn table_expression(
        &self,
        fields: &[TableField],
        declaration: &Declaration,
        cutoff: Position,
        ctx: &mut QueryContext,
    ) -> ResolveResult<Option<CallTarget>> {
        let requested = declaration.requested_depth();
        let mut fields = fields;
        let mut depth = 1;
        while depth < requested {
            let Some(nested) = fields.iter().find_map(nested_table) else {
                return Ok(None);
            };
            tracing::trace!(depth = depth + 1, "descending into nested table");
            fields = nested;
            depth += 1;
        }

        let mut position = 0;
        for field in fields {
            let value = match &field.kind {
                TableFieldKind::Named { key, value } => {
                    if declaration.table_key.as_deref() != Some(key.name.as_str()) {
                        continue;
                    }
                    value
                }
                TableFieldKind::Positional { value } => {
                    position += 1;
                    if declaration.table_index != Some(position) {
                        continue;
                    }
                    value
                }
                TableFieldKind::Keyed { .. } => continue,
            };

            return match &value.kind {
                ExpressionKind::Call { base, .. } => self.call_target(base, cutoff, ctx),
                ExpressionKind::Identifier(name) => {
                    let declaration = Declaration::new(name.as_str(), field.span.start.line);
                    self.find_statement_before(&declaration, cutoff, ctx)
                }
                _ => Ok(None),
            };
        }
        Ok(None)
    }
}

// =============================================================================
// Statement collection
// =============================================================================

/// Gather local declarations and assignments visible from `cutoff`, in
/// source order.
///
/// Blocks are entered only when they span the cutoff line: the enclosing `if`
/// clause, loop or function bodies, and function literals in a statement's
/// expressions (callbacks passed to a call, functions assigned to a name).
fn collect_statements<'c>(block: &'c Block, cutoff: Position, out: &mut Vec<&'c Statement>) {
    for statement in block {
        if statement.span.start >= cutoff {
            break;
        }
        if statement.is_declaration() {
            out.push(statement);
        }
        if !statement.span.contains_line(cutoff.line) {
            continue;
        }

        match &statement.kind {
            StatementKind::If(if_statement) => {
                if let Some(clause) = if_statement
                    .clauses
                    .iter()
                    .find(|clause| clause.span.contains_line(cutoff.line))
                {
                    collect_statements(&clause.body, cutoff, out);
                }
            }
            _ => {
                if let Some(body) = statement.body() {
                    collect_statements(body, cutoff, out);
                }
            }
        }

        let mut functions = Vec::new();
        for expression in statement_expressions(statement) {
            function_literals(expression, &mut functions);
        }
        for function in functions {
            if function.span.contains_line(cutoff.line) {
                collect_statements(&function.body, cutoff, out);
            }
        }
    }
}

/// Expressions evaluated directly by a statement that may carry callbacks
fn statement_expressions(statement: &Statement) -> &[Expression] {
    match &statement.kind {
        StatementKind::Local(local) => &local.init,
        StatementKind::Assignment(assignment) => &assignment.init,
        StatementKind::Call(call) => std::slice::from_ref(call),
        StatementKind::Return { arguments } => arguments,
        _ => &[],
    }
}

/// Outermost function literals inside `expression`
fn function_literals<'c>(expression: &'c Expression, out: &mut Vec<&'c FunctionBody>) {
    match &expression.kind {
        ExpressionKind::Function(function) => out.push(function),
        ExpressionKind::Call { base, arguments } => {
            function_literals(base, out);
            for argument in arguments {
                function_literals(argument, out);
            }
        }
        ExpressionKind::Table(fields) => {
            for field in fields {
                function_literals(field.value(), out);
            }
        }
        ExpressionKind::Member { base, .. } => function_literals(base, out),
        ExpressionKind::Index { base, index } => {
            function_literals(base, out);
            function_literals(index, out);
        }
        ExpressionKind::Binary { left, right, .. } => {
            function_literals(left, out);
            function_literals(right, out);
        }
        ExpressionKind::Unary { operand, .. } => function_literals(operand, out),
        ExpressionKind::Paren(inner) => function_literals(inner, out),
        _ => {}
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn is_member(expression: &Expression) -> bool {
    matches!(expression.kind, ExpressionKind::Member { .. })
}

fn nested_table(field: &TableField) -> Option<&[TableField]> {
    match &field.kind {
        TableFieldKind::Named { value, .. } | TableFieldKind::Positional { value } => {
            match &value.kind {
                ExpressionKind::Table(fields) => Some(fields),
                _ => None,
            }
        }
        TableFieldKind::Keyed { .. } => None,
    }
}

/// `hs.application.watcher` written as a dotted chain from the root
fn namespace_path(expression: &Expression) -> Option<String> {
    let mut segments = Vec::new();
    let mut current = expression;
    loop {
        match &current.kind {
            ExpressionKind::Member {
                base,
                indexer: Indexer::Dot,
                identifier,
            } => {
                segments.push(identifier.name.as_str());
                current = base;
            }
            ExpressionKind::Identifier(name) if name == ROOT_NAMESPACE => {
                segments.push(name.as_str());
                break;
            }
            _ => return None,
        }
    }
    segments.reverse();
    let separator = MODULE_SEPARATOR.to_string();
    Some(segments.join(separator.as_str()))
}

/// Narrowed declaration for a table access such as `tab.foo.bar` or `tab[1][2]`.
///
/// The last key or index selects the field; the number of accesses is the
/// depth. Intermediate keys and indices are not recorded, so `tab[2][1]`
/// descends through the first nested table like `tab[1][1]` does.
fn table_reference(expression: &Expression, line: usize) -> Option<Declaration> {
    enum Slot {
        Key(String),
        Index(usize),
    }

    let mut slot = None;
    let mut depth = 0;
    let mut current = expression;
    let root = loop {
        let (base, accessed) = match &current.kind {
            ExpressionKind::Member {
                base,
                indexer: Indexer::Dot,
                identifier,
            } => (base, Slot::Key(identifier.name.to_string())),
            ExpressionKind::Index { base, index } => (base, index_slot(index)?),
            ExpressionKind::Identifier(name) => break name,
            _ => return None,
        };
        if slot.is_none() {
            slot = Some(accessed);
        }
        depth += 1;
        current = base;
    };

    fn index_slot(index: &Expression) -> Option<Slot> {
        match &index.kind {
            ExpressionKind::Number(n) => n.parse().ok().map(Slot::Index),
            ExpressionKind::String(s) => unquote(s).map(|key| Slot::Key(key.to_string())),
            _ => None,
        }
    }

    if root == ROOT_NAMESPACE {
        return None;
    }
    let declaration = Declaration::new(root.as_str(), line).with_depth(depth);
    Some(match slot? {
        Slot::Key(key) => declaration.with_table_key(key),
        Slot::Index(index) => declaration.with_table_index(index),
    })
}

/// Contents of a short string literal without escapes
fn unquote(literal: &str) -> Option<&str> {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| literal.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))?;
    (!inner.contains('\\')).then_some(inner)
}

/// `hs` followed by any number of `.segment`
pub(crate) fn is_module_path(path: &str) -> bool {
    let mut segments = path.split(MODULE_SEPARATOR);
    segments.next() == Some(ROOT_NAMESPACE)
        && segments.all(|s| !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_'))
}
