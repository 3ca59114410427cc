//! Syntax tree → markup renderer.
//!
//! Walks the tree recursively and rebuilds concrete syntax around every node:
//! keywords, punctuation, semicolons and parentheses the parser does not keep.
//! Each node except `Program` becomes exactly one labelled unit, registered in
//! the document's association table as it is opened. A name the source writes
//! once for two nodes (`{ a }`, `import { b }`) is one unit; the second node is
//! aliased to it.
//!
//! ```text
//! VariableDeclaration ─ "const " VariableDeclarator ";"
//!                                 └─ Identifier " = " Literal
//! ```

use log::warn;
use squirrel_ast::ast::{
    BinaryOp, Class, Function, LogicalOp, MethodKind, PropertyKind, UnaryOp, UpdateOp,
    VariableKind,
};
use squirrel_ast::{NodeId, NodeKind, SyntaxTree};

use crate::markup::{MarkupBuilder, RenderedDocument};
use crate::RenderOptions;

/// Label of the unit shown instead of a tree when parsing fails.
pub const PARSE_ERROR_LABEL: &str = "ParseError";

/// Label of the placeholder unit for node types without a template.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Render a whole tree, starting at its root.
pub fn render(tree: &SyntaxTree, options: &RenderOptions) -> RenderedDocument {
    let mut renderer = Renderer {
        tree,
        options,
        out: MarkupBuilder::new(),
    };
    renderer.node(tree.root(), 0);
    renderer.out.finish()
}

/// A document holding a single error unit and no associations.
pub fn render_error(message: &str) -> RenderedDocument {
    let mut out = MarkupBuilder::new();
    out.open(PARSE_ERROR_LABEL, None, None);
    out.text(message);
    out.close();
    out.finish()
}

// Binding strength of an expression in its position; higher binds tighter.
const SEQUENCE: u8 = 1;
const ASSIGN: u8 = 2;
const CONDITIONAL: u8 = 3;
const UNARY: u8 = 15;
const UPDATE: u8 = 16;
const CALL: u8 = 18;
const PRIMARY: u8 = 20;
const ALWAYS: u8 = u8::MAX;

fn binary_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::BitOr => 6,
        BinaryOp::BitXor => 7,
        BinaryOp::BitAnd => 8,
        BinaryOp::Eq | BinaryOp::Neq | BinaryOp::StrictEq | BinaryOp::StrictNeq => 9,
        BinaryOp::Lt
        | BinaryOp::Lte
        | BinaryOp::Gt
        | BinaryOp::Gte
        | BinaryOp::In
        | BinaryOp::Instanceof => 10,
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => 11,
        BinaryOp::Add | BinaryOp::Sub => 12,
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 13,
        BinaryOp::Exp => 14,
    }
}

fn logical_precedence(op: LogicalOp) -> u8 {
    match op {
        LogicalOp::NullishCoalescing | LogicalOp::Or => 4,
        LogicalOp::And => 5,
    }
}

fn precedence(kind: &NodeKind) -> u8 {
    match kind {
        NodeKind::SequenceExpression { .. } => SEQUENCE,
        NodeKind::AssignmentExpression { .. }
        | NodeKind::ArrowFunctionExpression { .. }
        | NodeKind::YieldExpression { .. } => ASSIGN,
        NodeKind::ConditionalExpression { .. } => CONDITIONAL,
        NodeKind::LogicalExpression { operator, .. } => logical_precedence(*operator),
        NodeKind::BinaryExpression { operator, .. } => binary_precedence(*operator),
        NodeKind::UnaryExpression { .. } | NodeKind::AwaitExpression { .. } => UNARY,
        NodeKind::UpdateExpression { .. } => UPDATE,
        NodeKind::CallExpression { .. }
        | NodeKind::NewExpression { .. }
        | NodeKind::MemberExpression { .. }
        | NodeKind::ChainExpression { .. }
        | NodeKind::TaggedTemplateExpression { .. }
        | NodeKind::ImportExpression { .. }
        | NodeKind::MetaProperty { .. } => CALL,
        _ => PRIMARY,
    }
}

/// `??` cannot be mixed with `||`/`&&` without parentheses.
fn mixes_nullish(op: LogicalOp, child: &NodeKind) -> bool {
    match child {
        NodeKind::LogicalExpression { operator, .. } => {
            (op == LogicalOp::NullishCoalescing) != (*operator == LogicalOp::NullishCoalescing)
        }
        _ => false,
    }
}

/// Whether a declaration ends with `;`. `for` headers render without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    Omitted,
}

struct Renderer<'t> {
    tree: &'t SyntaxTree,
    options: &'t RenderOptions,
    out: MarkupBuilder,
}

impl<'t> Renderer<'t> {
    fn text(&mut self, text: &str) {
        self.out.text(text);
    }

    fn indent(&mut self, level: usize) {
        let pad = self.options.indent.repeat(level);
        self.out.text(&pad);
    }

    /// Open a unit for `id`, let `body` fill it, close it.
    fn unit(&mut self, id: NodeId, body: impl FnOnce(&mut Self)) {
        let tree = self.tree;
        self.out.open(tree.type_name(id), None, Some(id));
        body(self);
        self.out.close();
    }

    fn leaf(&mut self, id: NodeId, text: &str) {
        self.unit(id, |r| r.text(text));
    }

    /// Render an expression, parenthesised if it binds looser than `min`.
    fn expr(&mut self, id: NodeId, min: u8, indent: usize) {
        let tree = self.tree;
        if precedence(&tree[id].kind) < min {
            self.text("(");
            self.node(id, indent);
            self.text(")");
        } else {
            self.node(id, indent);
        }
    }

    fn list(&mut self, ids: &[NodeId], indent: usize) {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            self.expr(id, ASSIGN, indent);
        }
    }

    fn sparse_list(&mut self, ids: &[Option<NodeId>], indent: usize) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            if let Some(id) = *id {
                self.expr(id, ASSIGN, indent);
            }
        }
        // A trailing hole needs its own comma: `[a, ,]`.
        if matches!(ids.last(), Some(None)) {
            self.text(",");
        }
    }

    /// Statements one per line at `indent`, as for a program body.
    fn lines(&mut self, ids: &[NodeId], indent: usize) {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                self.text("\n");
            }
            self.indent(indent);
            self.node(id, indent);
        }
    }

    /// `{`, one child per line one level deeper, `}` at `indent`.
    fn block(&mut self, ids: &[NodeId], indent: usize) {
        if ids.is_empty() {
            self.text("{}");
            return;
        }
        self.text("{\n");
        for &id in ids {
            self.indent(indent + 1);
            self.node(id, indent + 1);
            self.text("\n");
        }
        self.indent(indent);
        self.text("}");
    }

    fn property_key(&mut self, key: NodeId, computed: bool, indent: usize) {
        if computed {
            self.text("[");
            self.expr(key, ASSIGN, indent);
            self.text("]");
        } else {
            self.node(key, indent);
        }
    }

    fn function_flags(&self, id: NodeId) -> (bool, bool) {
        match &self.tree[id].kind {
            NodeKind::FunctionExpression(function) => (function.is_async, function.generator),
            _ => (false, false),
        }
    }

    fn params_and_body(&mut self, function: &Function, indent: usize) {
        self.text("(");
        self.list(&function.params, indent);
        self.text(") ");
        self.node(function.body, indent);
    }

    /// The function value of a method: `(params) body`, without `function`.
    fn method_value(&mut self, value: NodeId, indent: usize) {
        let tree = self.tree;
        match &tree[value].kind {
            NodeKind::FunctionExpression(function) => {
                self.unit(value, |r| r.params_and_body(function, indent));
            }
            _ => self.node(value, indent),
        }
    }

    fn function(&mut self, function: &Function, indent: usize) {
        if function.is_async {
            self.text("async ");
        }
        self.text("function");
        if function.generator {
            self.text("*");
        }
        self.text(" ");
        if let Some(id) = function.id {
            self.node(id, indent);
        }
        self.params_and_body(function, indent);
    }

    fn class(&mut self, class: &Class, indent: usize) {
        self.text("class");
        if let Some(id) = class.id {
            self.text(" ");
            self.node(id, indent);
        }
        if let Some(super_class) = class.super_class {
            self.text(" extends ");
            self.expr(super_class, CALL, indent);
        }
        self.text(" ");
        self.node(class.body, indent);
    }

    fn variable_declaration(
        &mut self,
        id: NodeId,
        kind: VariableKind,
        declarations: &[NodeId],
        terminator: Terminator,
        indent: usize,
    ) {
        self.unit(id, |r| {
            r.text(kind.as_str());
            r.text(" ");
            r.list(declarations, indent);
            if terminator == Terminator::Semicolon {
                r.text(";");
            }
        });
    }

    /// Initializer or left-hand side of a `for` header.
    fn for_head(&mut self, id: NodeId, indent: usize) {
        let tree = self.tree;
        match &tree[id].kind {
            NodeKind::VariableDeclaration { kind, declarations } => {
                self.variable_declaration(id, *kind, declarations, Terminator::Omitted, indent);
            }
            _ => self.expr(id, SEQUENCE, indent),
        }
    }

    fn same_name(&self, a: NodeId, b: NodeId) -> bool {
        match (&self.tree[a].kind, &self.tree[b].kind) {
            (NodeKind::Identifier { name: a }, NodeKind::Identifier { name: b }) => a == b,
            _ => false,
        }
    }

    /// The node whose text comes first when `id` is rendered: follows the
    /// leftmost operand down through calls, members, operators and sequences.
    fn leftmost(&self, mut id: NodeId) -> NodeId {
        loop {
            id = match &self.tree[id].kind {
                NodeKind::CallExpression { callee, .. } => *callee,
                NodeKind::MemberExpression { object, .. } => *object,
                NodeKind::TaggedTemplateExpression { tag, .. } => *tag,
                NodeKind::ChainExpression { expression } => *expression,
                NodeKind::BinaryExpression { left, .. }
                | NodeKind::LogicalExpression { left, .. }
                | NodeKind::AssignmentExpression { left, .. } => *left,
                NodeKind::ConditionalExpression { test, .. } => *test,
                NodeKind::UpdateExpression {
                    prefix: false,
                    argument,
                    ..
                } => *argument,
                NodeKind::SequenceExpression { expressions } => match expressions.first() {
                    Some(first) => *first,
                    None => return id,
                },
                _ => return id,
            };
        }
    }

    /// Whether `id` would begin with `{` and be read as a block.
    fn starts_with_brace(&self, id: NodeId) -> bool {
        matches!(
            self.tree[self.leftmost(id)].kind,
            NodeKind::ObjectExpression { .. } | NodeKind::ObjectPattern { .. }
        )
    }

    /// Whether `id` would begin with `function` or `class` and be read as a
    /// declaration.
    fn starts_with_declaration(&self, id: NodeId) -> bool {
        matches!(
            self.tree[self.leftmost(id)].kind,
            NodeKind::FunctionExpression(_) | NodeKind::ClassExpression(_)
        )
    }

    fn needs_statement_parens(&self, id: NodeId) -> bool {
        self.starts_with_brace(id) || self.starts_with_declaration(id)
    }

    /// `new a().b()` calls `a` with `new`; a callee containing a call needs
    /// its own parentheses.
    fn callee_contains_call(&self, mut id: NodeId) -> bool {
        loop {
            id = match &self.tree[id].kind {
                NodeKind::CallExpression { .. } | NodeKind::ChainExpression { .. } => {
                    return true
                }
                NodeKind::MemberExpression { object, .. } => *object,
                NodeKind::TaggedTemplateExpression { tag, .. } => *tag,
                _ => return false,
            };
        }
    }

    /// `1.x` reads the dot as a decimal point.
    fn is_bare_integer(&self, id: NodeId) -> bool {
        match &self.tree[id].kind {
            NodeKind::Literal(literal) => {
                literal.regex.is_none()
                    && !literal.raw.is_empty()
                    && literal.raw.chars().all(|c| c.is_ascii_digit() || c == '_')
            }
            _ => false,
        }
    }

    /// Give `alias` the unit already rendered for `target`, for nodes the
    /// source text spells only once.
    fn alias(&mut self, alias: NodeId, target: NodeId) {
        let target = match &self.tree[target].kind {
            NodeKind::AssignmentPattern { left, .. } => *left,
            _ => target,
        };
        if let Some(unit) = self.out.unit_for(target) {
            self.out.alias(alias, unit);
        }
    }

    fn import_clause(&mut self, specifiers: &[NodeId], source: NodeId, indent: usize) {
        let tree = self.tree;
        self.text("import ");
        if !specifiers.is_empty() {
            let of_type = |wanted: &str| -> Vec<NodeId> {
                specifiers
                    .iter()
                    .copied()
                    .filter(|&s| tree.type_name(s) == wanted)
                    .collect()
            };
            let defaults = of_type("ImportDefaultSpecifier");
            let namespaces = of_type("ImportNamespaceSpecifier");
            let named = of_type("ImportSpecifier");

            let mut first = true;
            for id in defaults.into_iter().chain(namespaces) {
                if !first {
                    self.text(", ");
                }
                first = false;
                self.node(id, indent);
            }
            if !named.is_empty() {
                if !first {
                    self.text(", ");
                }
                self.text("{ ");
                self.list(&named, indent);
                self.text(" }");
            }
            self.text(" from ");
        }
        self.node(source, indent);
        self.text(";");
    }

    fn node(&mut self, id: NodeId, indent: usize) {
        let tree = self.tree;
        match &tree[id].kind {
            NodeKind::Program { body, .. } => self.lines(body, indent),

            // Leaves
            NodeKind::Identifier { name } => self.leaf(id, name),
            NodeKind::PrivateIdentifier { name } => self.unit(id, |r| {
                r.text("#");
                r.text(name);
            }),
            NodeKind::Literal(literal) => self.unit(id, |r| match &literal.regex {
                Some(regex) => {
                    r.text("/");
                    r.text(&regex.pattern);
                    r.text("/");
                    r.text(&regex.flags);
                }
                None => r.text(&literal.raw),
            }),
            NodeKind::TemplateElement { raw, .. } => self.leaf(id, raw),
            NodeKind::ThisExpression => self.leaf(id, "this"),
            NodeKind::Super => self.leaf(id, "super"),

            // Statements
            NodeKind::ExpressionStatement { expression, .. } => self.unit(id, |r| {
                if r.needs_statement_parens(*expression) {
                    r.expr(*expression, ALWAYS, indent);
                } else {
                    r.expr(*expression, SEQUENCE, indent);
                }
                r.text(";");
            }),
            NodeKind::BlockStatement { body } => self.unit(id, |r| r.block(body, indent)),
            NodeKind::StaticBlock { body } => self.unit(id, |r| {
                r.text("static ");
                r.block(body, indent);
            }),
            NodeKind::EmptyStatement => self.leaf(id, ";"),
            NodeKind::DebuggerStatement => self.leaf(id, "debugger;"),
            NodeKind::WithStatement { object, body } => self.unit(id, |r| {
                r.text("with (");
                r.expr(*object, SEQUENCE, indent);
                r.text(") ");
                r.node(*body, indent);
            }),
            NodeKind::ReturnStatement { argument } => self.unit(id, |r| {
                r.text("return");
                if let Some(argument) = argument {
                    r.text(" ");
                    r.expr(*argument, SEQUENCE, indent);
                }
                r.text(";");
            }),
            NodeKind::LabeledStatement { label, body } => self.unit(id, |r| {
                r.node(*label, indent);
                r.text(": ");
                r.node(*body, indent);
            }),
            NodeKind::BreakStatement { label } | NodeKind::ContinueStatement { label } => {
                let keyword = match &tree[id].kind {
                    NodeKind::BreakStatement { .. } => "break",
                    _ => "continue",
                };
                self.unit(id, |r| {
                    r.text(keyword);
                    if let Some(label) = label {
                        r.text(" ");
                        r.node(*label, indent);
                    }
                    r.text(";");
                });
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => self.unit(id, |r| {
                r.text("if (");
                r.expr(*test, SEQUENCE, indent);
                r.text(") ");
                r.node(*consequent, indent);
                if let Some(alternate) = alternate {
                    r.text(" else ");
                    r.node(*alternate, indent);
                }
            }),
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => self.unit(id, |r| {
                r.text("switch (");
                r.expr(*discriminant, SEQUENCE, indent);
                r.text(") ");
                r.block(cases, indent);
            }),
            NodeKind::SwitchCase { test, consequent } => self.unit(id, |r| {
                match test {
                    Some(test) => {
                        r.text("case ");
                        r.expr(*test, SEQUENCE, indent);
                        r.text(":");
                    }
                    None => r.text("default:"),
                }
                for &statement in consequent {
                    r.text("\n");
                    r.indent(indent + 1);
                    r.node(statement, indent + 1);
                }
            }),
            NodeKind::ThrowStatement { argument } => self.unit(id, |r| {
                r.text("throw ");
                r.expr(*argument, SEQUENCE, indent);
                r.text(";");
            }),
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => self.unit(id, |r| {
                r.text("try ");
                r.node(*block, indent);
                if let Some(handler) = handler {
                    r.text(" ");
                    r.node(*handler, indent);
                }
                if let Some(finalizer) = finalizer {
                    r.text(" finally ");
                    r.node(*finalizer, indent);
                }
            }),
            NodeKind::CatchClause { param, body } => self.unit(id, |r| {
                r.text("catch");
                if let Some(param) = param {
                    r.text(" (");
                    r.node(*param, indent);
                    r.text(")");
                }
                r.text(" ");
                r.node(*body, indent);
            }),
            NodeKind::WhileStatement { test, body } => self.unit(id, |r| {
                r.text("while (");
                r.expr(*test, SEQUENCE, indent);
                r.text(") ");
                r.node(*body, indent);
            }),
            NodeKind::DoWhileStatement { body, test } => self.unit(id, |r| {
                r.text("do ");
                r.node(*body, indent);
                r.text(" while (");
                r.expr(*test, SEQUENCE, indent);
                r.text(");");
            }),
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => self.unit(id, |r| {
                r.text("for (");
                if let Some(init) = init {
                    r.for_head(*init, indent);
                }
                r.text(";");
                if let Some(test) = test {
                    r.text(" ");
                    r.expr(*test, SEQUENCE, indent);
                }
                r.text(";");
                if let Some(update) = update {
                    r.text(" ");
                    r.expr(*update, SEQUENCE, indent);
                }
                r.text(") ");
                r.node(*body, indent);
            }),
            NodeKind::ForInStatement { left, right, body } => self.unit(id, |r| {
                r.text("for (");
                r.for_head(*left, indent);
                r.text(" in ");
                r.expr(*right, SEQUENCE, indent);
                r.text(") ");
                r.node(*body, indent);
            }),
            NodeKind::ForOfStatement {
                is_await,
                left,
                right,
                body,
            } => self.unit(id, |r| {
                r.text(if *is_await { "for await (" } else { "for (" });
                r.for_head(*left, indent);
                r.text(" of ");
                r.expr(*right, ASSIGN, indent);
                r.text(") ");
                r.node(*body, indent);
            }),

            // Declarations
            NodeKind::FunctionDeclaration(function) | NodeKind::FunctionExpression(function) => {
                self.unit(id, |r| r.function(function, indent));
            }
            NodeKind::VariableDeclaration { kind, declarations } => {
                self.variable_declaration(id, *kind, declarations, Terminator::Semicolon, indent);
            }
            NodeKind::VariableDeclarator { id: target, init } => self.unit(id, |r| {
                r.node(*target, indent);
                if let Some(init) = init {
                    r.text(" = ");
                    r.expr(*init, ASSIGN, indent);
                }
            }),
            NodeKind::ClassDeclaration(class) | NodeKind::ClassExpression(class) => {
                self.unit(id, |r| r.class(class, indent));
            }

            // Classes
            NodeKind::ClassBody { body } => self.unit(id, |r| r.block(body, indent)),
            NodeKind::MethodDefinition {
                key,
                value,
                kind,
                computed,
                is_static,
            } => self.unit(id, |r| {
                if *is_static {
                    r.text("static ");
                }
                match kind {
                    MethodKind::Get => r.text("get "),
                    MethodKind::Set => r.text("set "),
                    MethodKind::Constructor | MethodKind::Method => {}
                }
                let (is_async, generator) = r.function_flags(*value);
                if is_async {
                    r.text("async ");
                }
                if generator {
                    r.text("*");
                }
                r.property_key(*key, *computed, indent);
                r.method_value(*value, indent);
            }),
            NodeKind::PropertyDefinition {
                key,
                value,
                computed,
                is_static,
            } => self.unit(id, |r| {
                if *is_static {
                    r.text("static ");
                }
                r.property_key(*key, *computed, indent);
                if let Some(value) = value {
                    r.text(" = ");
                    r.expr(*value, ASSIGN, indent);
                }
                r.text(";");
            }),

            // Expressions
            NodeKind::ArrayExpression { elements } | NodeKind::ArrayPattern { elements } => {
                self.unit(id, |r| {
                    r.text("[");
                    r.sparse_list(elements, indent);
                    r.text("]");
                });
            }
            NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties } => {
                self.unit(id, |r| {
                    if properties.is_empty() {
                        r.text("{}");
                    } else {
                        r.text("{ ");
                        r.list(properties, indent);
                        r.text(" }");
                    }
                });
            }
            NodeKind::Property {
                key,
                value,
                kind,
                method,
                shorthand,
                computed,
            } => self.unit(id, |r| {
                if *shorthand && !*method && *kind == PropertyKind::Init {
                    r.node(*value, indent);
                    r.alias(*key, *value);
                } else if *method || *kind != PropertyKind::Init {
                    match kind {
                        PropertyKind::Get => r.text("get "),
                        PropertyKind::Set => r.text("set "),
                        PropertyKind::Init => {}
                    }
                    let (is_async, generator) = r.function_flags(*value);
                    if is_async {
                        r.text("async ");
                    }
                    if generator {
                        r.text("*");
                    }
                    r.property_key(*key, *computed, indent);
                    r.method_value(*value, indent);
                } else {
                    r.property_key(*key, *computed, indent);
                    r.text(": ");
                    r.expr(*value, ASSIGN, indent);
                }
            }),
            NodeKind::ArrowFunctionExpression {
                params,
                body,
                is_async,
            } => self.unit(id, |r| {
                if *is_async {
                    r.text("async ");
                }
                r.text("(");
                r.list(params, indent);
                r.text(") => ");
                match &tree[*body].kind {
                    NodeKind::BlockStatement { .. } => r.node(*body, indent),
                    _ if r.starts_with_brace(*body) => r.expr(*body, ALWAYS, indent),
                    _ => r.expr(*body, ASSIGN, indent),
                }
            }),
            NodeKind::UnaryExpression { operator, argument } => self.unit(id, |r| {
                r.text(operator.as_str());
                let clashes = match &tree[*argument].kind {
                    NodeKind::UnaryExpression { operator: inner, .. } => {
                        matches!(
                            (operator, inner),
                            (UnaryOp::Minus, UnaryOp::Minus) | (UnaryOp::Plus, UnaryOp::Plus)
                        )
                    }
                    NodeKind::UpdateExpression {
                        operator: inner,
                        prefix: true,
                        ..
                    } => matches!(
                        (operator, inner),
                        (UnaryOp::Minus, UpdateOp::Decrement) | (UnaryOp::Plus, UpdateOp::Increment)
                    ),
                    _ => false,
                };
                if operator.is_keyword() || clashes {
                    r.text(" ");
                }
                r.expr(*argument, UNARY, indent);
            }),
            NodeKind::UpdateExpression {
                operator,
                prefix,
                argument,
            } => self.unit(id, |r| {
                if *prefix {
                    r.text(operator.as_str());
                    r.expr(*argument, UPDATE, indent);
                } else {
                    r.expr(*argument, UPDATE, indent);
                    r.text(operator.as_str());
                }
            }),
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => self.unit(id, |r| {
                let prec = binary_precedence(*operator);
                // `**` is right-associative and rejects a unary left operand.
                let (left_min, right_min) = if *operator == BinaryOp::Exp {
                    (UPDATE, prec)
                } else {
                    (prec, prec + 1)
                };
                r.expr(*left, left_min, indent);
                r.text(" ");
                r.text(operator.as_str());
                r.text(" ");
                r.expr(*right, right_min, indent);
            }),
            NodeKind::LogicalExpression {
                operator,
                left,
                right,
            } => self.unit(id, |r| {
                let prec = logical_precedence(*operator);
                let left_min = if mixes_nullish(*operator, &tree[*left].kind) {
                    ALWAYS
                } else {
                    prec
                };
                let right_min = if mixes_nullish(*operator, &tree[*right].kind) {
                    ALWAYS
                } else {
                    prec + 1
                };
                r.expr(*left, left_min, indent);
                r.text(" ");
                r.text(operator.as_str());
                r.text(" ");
                r.expr(*right, right_min, indent);
            }),
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => self.unit(id, |r| {
                r.node(*left, indent);
                r.text(" ");
                r.text(operator.as_str());
                r.text(" ");
                r.expr(*right, ASSIGN, indent);
            }),
            NodeKind::MemberExpression {
                object,
                property,
                computed,
                optional,
            } => self.unit(id, |r| {
                let object_min = if !*computed && r.is_bare_integer(*object) {
                    ALWAYS
                } else {
                    CALL
                };
                r.expr(*object, object_min, indent);
                if *computed {
                    r.text(if *optional { "?.[" } else { "[" });
                    r.expr(*property, SEQUENCE, indent);
                    r.text("]");
                } else {
                    r.text(if *optional { "?." } else { "." });
                    r.node(*property, indent);
                }
            }),
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => self.unit(id, |r| {
                r.expr(*test, CONDITIONAL + 1, indent);
                r.text(" ? ");
                r.expr(*consequent, ASSIGN, indent);
                r.text(" : ");
                r.expr(*alternate, ASSIGN, indent);
            }),
            NodeKind::CallExpression {
                callee,
                arguments,
                optional,
            } => self.unit(id, |r| {
                r.expr(*callee, CALL, indent);
                if *optional {
                    r.text("?.");
                }
                r.text("(");
                r.list(arguments, indent);
                r.text(")");
            }),
            NodeKind::NewExpression { callee, arguments } => self.unit(id, |r| {
                r.text("new ");
                let callee_min = if r.callee_contains_call(*callee) {
                    ALWAYS
                } else {
                    CALL
                };
                r.expr(*callee, callee_min, indent);
                r.text("(");
                r.list(arguments, indent);
                r.text(")");
            }),
            NodeKind::SequenceExpression { expressions } => {
                self.unit(id, |r| r.list(expressions, indent));
            }
            NodeKind::YieldExpression { argument, delegate } => self.unit(id, |r| {
                r.text(if *delegate { "yield*" } else { "yield" });
                if let Some(argument) = argument {
                    r.text(" ");
                    r.expr(*argument, ASSIGN, indent);
                }
            }),
            NodeKind::AwaitExpression { argument } => self.unit(id, |r| {
                r.text("await ");
                r.expr(*argument, UNARY, indent);
            }),
            NodeKind::TemplateLiteral {
                quasis,
                expressions,
            } => self.unit(id, |r| {
                r.text("`");
                for (i, &quasi) in quasis.iter().enumerate() {
                    r.node(quasi, indent);
                    if let Some(&expression) = expressions.get(i) {
                        r.text("${");
                        r.expr(expression, SEQUENCE, indent);
                        r.text("}");
                    }
                }
                r.text("`");
            }),
            NodeKind::TaggedTemplateExpression { tag, quasi } => self.unit(id, |r| {
                r.expr(*tag, CALL, indent);
                r.node(*quasi, indent);
            }),
            NodeKind::MetaProperty { meta, property } => self.unit(id, |r| {
                r.node(*meta, indent);
                r.text(".");
                r.node(*property, indent);
            }),
            NodeKind::ImportExpression { source } => self.unit(id, |r| {
                r.text("import(");
                r.expr(*source, ASSIGN, indent);
                r.text(")");
            }),
            NodeKind::ChainExpression { expression } => {
                self.unit(id, |r| r.node(*expression, indent));
            }
            NodeKind::ParenthesizedExpression { expression } => self.unit(id, |r| {
                r.text("(");
                r.expr(*expression, SEQUENCE, indent);
                r.text(")");
            }),
            NodeKind::SpreadElement { argument } | NodeKind::RestElement { argument } => {
                self.unit(id, |r| {
                    r.text("...");
                    r.expr(*argument, ASSIGN, indent);
                });
            }

            // Patterns
            NodeKind::AssignmentPattern { left, right } => self.unit(id, |r| {
                r.node(*left, indent);
                r.text(" = ");
                r.expr(*right, ASSIGN, indent);
            }),

            // Modules
            NodeKind::ImportDeclaration { specifiers, source } => {
                self.unit(id, |r| r.import_clause(specifiers, *source, indent));
            }
            NodeKind::ImportSpecifier { imported, local } => self.unit(id, |r| {
                r.node(*imported, indent);
                if r.same_name(*imported, *local) {
                    r.alias(*local, *imported);
                } else {
                    r.text(" as ");
                    r.node(*local, indent);
                }
            }),
            NodeKind::ImportDefaultSpecifier { local } => {
                self.unit(id, |r| r.node(*local, indent));
            }
            NodeKind::ImportNamespaceSpecifier { local } => self.unit(id, |r| {
                r.text("* as ");
                r.node(*local, indent);
            }),
            NodeKind::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => self.unit(id, |r| {
                r.text("export ");
                if let Some(declaration) = declaration {
                    r.node(*declaration, indent);
                    return;
                }
                if specifiers.is_empty() {
                    r.text("{}");
                } else {
                    r.text("{ ");
                    r.list(specifiers, indent);
                    r.text(" }");
                }
                if let Some(source) = source {
                    r.text(" from ");
                    r.node(*source, indent);
                }
                r.text(";");
            }),
            NodeKind::ExportSpecifier { local, exported } => self.unit(id, |r| {
                r.node(*local, indent);
                if r.same_name(*local, *exported) {
                    r.alias(*exported, *local);
                } else {
                    r.text(" as ");
                    r.node(*exported, indent);
                }
            }),
            NodeKind::ExportDefaultDeclaration { declaration } => self.unit(id, |r| {
                r.text("export default ");
                match &tree[*declaration].kind {
                    NodeKind::FunctionDeclaration(_) | NodeKind::ClassDeclaration(_) => {
                        r.node(*declaration, indent);
                    }
                    _ => {
                        let min = if r.starts_with_declaration(*declaration) {
                            ALWAYS
                        } else {
                            ASSIGN
                        };
                        r.expr(*declaration, min, indent);
                        r.text(";");
                    }
                }
            }),
            NodeKind::ExportAllDeclaration { exported, source } => self.unit(id, |r| {
                r.text("export *");
                if let Some(exported) = exported {
                    r.text(" as ");
                    r.node(*exported, indent);
                }
                r.text(" from ");
                r.node(*source, indent);
                r.text(";");
            }),

            NodeKind::Unknown { type_name, .. } => {
                warn!("no template for node type `{type_name}`, rendering placeholder");
                let unit = self
                    .out
                    .open(UNKNOWN_LABEL, Some(type_name.clone()), Some(id));
                self.text(&format!("/* Unknown: {type_name} */"));
                self.out.close();
                // Nodes below the placeholder resolve to it.
                let mut stack: Vec<NodeId> =
                    tree[id].kind.children().iter().map(|e| e.node).collect();
                while let Some(child) = stack.pop() {
                    self.out.alias(child, unit);
                    stack.extend(tree[child].kind.children().iter().map(|e| e.node));
                }
            }
        }
    }
}
