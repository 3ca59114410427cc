//! Arena-allocated ESTree syntax tree.
//!
//! Nodes live in a flat `Vec` owned by [`SyntaxTree`] and refer to their
//! children by [`NodeId`]. The tree is strict: every node except the root is
//! reachable through exactly one child edge.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::options::SourceType;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// An id taken from outside the tree, e.g. a handle round-tripped through
    /// JavaScript. Lookups with it may find nothing.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// Byte offsets reported by the parser (`start`/`end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub span: Option<Span>,
}

/// A lowered ESTree document.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn from_parts(nodes: Vec<NodeData>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The ESTree `type` tag of a node.
    pub fn type_name(&self, id: NodeId) -> &str {
        self[id].kind.type_name()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, data)| (NodeId::from_index(i), data))
    }

    /// First node (in arena order) matching the predicate.
    pub fn find(&self, mut predicate: impl FnMut(&NodeKind) -> bool) -> Option<NodeId> {
        self.iter()
            .find(|(_, data)| predicate(&data.kind))
            .map(|(id, _)| id)
    }
}

impl Index<NodeId> for SyntaxTree {
    type Output = NodeData;

    fn index(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

// ---------------------------------------------------------------------------
// Node kinds
// ---------------------------------------------------------------------------

/// One variant per ESTree node type (ES2022), plus [`NodeKind::Unknown`] for
/// types the model does not cover yet.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
        source_type: SourceType,
    },

    // Leaves
    Identifier {
        name: String,
    },
    PrivateIdentifier {
        name: String,
    },
    Literal(Literal),

    // Statements
    ExpressionStatement {
        expression: NodeId,
        directive: Option<String>,
    },
    BlockStatement {
        body: Vec<NodeId>,
    },
    StaticBlock {
        body: Vec<NodeId>,
    },
    EmptyStatement,
    DebuggerStatement,
    WithStatement {
        object: NodeId,
        body: NodeId,
    },
    ReturnStatement {
        argument: Option<NodeId>,
    },
    LabeledStatement {
        label: NodeId,
        body: NodeId,
    },
    BreakStatement {
        label: Option<NodeId>,
    },
    ContinueStatement {
        label: Option<NodeId>,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    SwitchStatement {
        discriminant: NodeId,
        cases: Vec<NodeId>,
    },
    SwitchCase {
        test: Option<NodeId>,
        consequent: Vec<NodeId>,
    },
    ThrowStatement {
        argument: NodeId,
    },
    TryStatement {
        block: NodeId,
        handler: Option<NodeId>,
        finalizer: Option<NodeId>,
    },
    CatchClause {
        param: Option<NodeId>,
        body: NodeId,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    DoWhileStatement {
        body: NodeId,
        test: NodeId,
    },
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    ForInStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    ForOfStatement {
        is_await: bool,
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },

    // Declarations
    FunctionDeclaration(Function),
    VariableDeclaration {
        kind: VariableKind,
        declarations: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    ClassDeclaration(Class),

    // Classes
    ClassBody {
        body: Vec<NodeId>,
    },
    MethodDefinition {
        key: NodeId,
        value: NodeId,
        kind: MethodKind,
        computed: bool,
        is_static: bool,
    },
    PropertyDefinition {
        key: NodeId,
        value: Option<NodeId>,
        computed: bool,
        is_static: bool,
    },

    // Expressions
    ThisExpression,
    Super,
    ArrayExpression {
        elements: Vec<Option<NodeId>>,
    },
    ObjectExpression {
        properties: Vec<NodeId>,
    },
    Property {
        key: NodeId,
        value: NodeId,
        kind: PropertyKind,
        method: bool,
        shorthand: bool,
        computed: bool,
    },
    FunctionExpression(Function),
    ArrowFunctionExpression {
        params: Vec<NodeId>,
        body: NodeId,
        is_async: bool,
    },
    ClassExpression(Class),
    UnaryExpression {
        operator: UnaryOp,
        argument: NodeId,
    },
    UpdateExpression {
        operator: UpdateOp,
        prefix: bool,
        argument: NodeId,
    },
    BinaryExpression {
        operator: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    LogicalExpression {
        operator: LogicalOp,
        left: NodeId,
        right: NodeId,
    },
    AssignmentExpression {
        operator: AssignOp,
        left: NodeId,
        right: NodeId,
    },
    MemberExpression {
        object: NodeId,
        property: NodeId,
        computed: bool,
        optional: bool,
    },
    ConditionalExpression {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
        optional: bool,
    },
    NewExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    SequenceExpression {
        expressions: Vec<NodeId>,
    },
    YieldExpression {
        argument: Option<NodeId>,
        delegate: bool,
    },
    AwaitExpression {
        argument: NodeId,
    },
    TemplateLiteral {
        quasis: Vec<NodeId>,
        expressions: Vec<NodeId>,
    },
    TaggedTemplateExpression {
        tag: NodeId,
        quasi: NodeId,
    },
    TemplateElement {
        raw: String,
        cooked: Option<String>,
        tail: bool,
    },
    MetaProperty {
        meta: NodeId,
        property: NodeId,
    },
    ImportExpression {
        source: NodeId,
    },
    ChainExpression {
        expression: NodeId,
    },
    ParenthesizedExpression {
        expression: NodeId,
    },
    SpreadElement {
        argument: NodeId,
    },

    // Patterns
    ObjectPattern {
        properties: Vec<NodeId>,
    },
    ArrayPattern {
        elements: Vec<Option<NodeId>>,
    },
    RestElement {
        argument: NodeId,
    },
    AssignmentPattern {
        left: NodeId,
        right: NodeId,
    },

    // Modules
    ImportDeclaration {
        specifiers: Vec<NodeId>,
        source: NodeId,
    },
    ImportSpecifier {
        imported: NodeId,
        local: NodeId,
    },
    ImportDefaultSpecifier {
        local: NodeId,
    },
    ImportNamespaceSpecifier {
        local: NodeId,
    },
    ExportNamedDeclaration {
        declaration: Option<NodeId>,
        specifiers: Vec<NodeId>,
        source: Option<NodeId>,
    },
    ExportSpecifier {
        local: NodeId,
        exported: NodeId,
    },
    ExportDefaultDeclaration {
        declaration: NodeId,
    },
    ExportAllDeclaration {
        exported: Option<NodeId>,
        source: NodeId,
    },

    /// A node type the model has no variant for. Node-valued fields are kept
    /// so the subtree can still be annotated and navigated.
    Unknown {
        type_name: String,
        fields: Vec<(String, UnknownField)>,
    },
}

/// Shared shape of function declarations and expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub id: Option<NodeId>,
    pub params: Vec<NodeId>,
    pub body: NodeId,
    pub is_async: bool,
    pub generator: bool,
}

/// Shared shape of class declarations and expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: Option<NodeId>,
    pub super_class: Option<NodeId>,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Source text of the literal, quotes and numeric formatting included.
    pub raw: String,
    pub regex: Option<RegexLiteral>,
    pub bigint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexLiteral {
    pub pattern: String,
    pub flags: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnknownField {
    Node(NodeId),
    Nodes(Vec<Option<NodeId>>),
}

/// A child reached from its parent through `field` (and `index` for sequences).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildEdge<'a> {
    pub field: &'a str,
    pub index: Option<usize>,
    pub node: NodeId,
}

struct Edges<'a>(Vec<ChildEdge<'a>>);

impl<'a> Edges<'a> {
    fn one(&mut self, field: &'a str, node: NodeId) -> &mut Self {
        self.0.push(ChildEdge {
            field,
            index: None,
            node,
        });
        self
    }

    fn opt(&mut self, field: &'a str, node: Option<NodeId>) -> &mut Self {
        if let Some(node) = node {
            self.one(field, node);
        }
        self
    }

    fn many(&mut self, field: &'a str, nodes: &[NodeId]) -> &mut Self {
        for (index, &node) in nodes.iter().enumerate() {
            self.0.push(ChildEdge {
                field,
                index: Some(index),
                node,
            });
        }
        self
    }

    // Holes keep their slot number but produce no edge.
    fn sparse(&mut self, field: &'a str, nodes: &[Option<NodeId>]) -> &mut Self {
        for (index, node) in nodes.iter().enumerate() {
            if let Some(node) = *node {
                self.0.push(ChildEdge {
                    field,
                    index: Some(index),
                    node,
                });
            }
        }
        self
    }
}

impl NodeKind {
    /// The ESTree `type` tag.
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::PrivateIdentifier { .. } => "PrivateIdentifier",
            NodeKind::Literal(_) => "Literal",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::BlockStatement { .. } => "BlockStatement",
            NodeKind::StaticBlock { .. } => "StaticBlock",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::WithStatement { .. } => "WithStatement",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::LabeledStatement { .. } => "LabeledStatement",
            NodeKind::BreakStatement { .. } => "BreakStatement",
            NodeKind::ContinueStatement { .. } => "ContinueStatement",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::SwitchStatement { .. } => "SwitchStatement",
            NodeKind::SwitchCase { .. } => "SwitchCase",
            NodeKind::ThrowStatement { .. } => "ThrowStatement",
            NodeKind::TryStatement { .. } => "TryStatement",
            NodeKind::CatchClause { .. } => "CatchClause",
            NodeKind::WhileStatement { .. } => "WhileStatement",
            NodeKind::DoWhileStatement { .. } => "DoWhileStatement",
            NodeKind::ForStatement { .. } => "ForStatement",
            NodeKind::ForInStatement { .. } => "ForInStatement",
            NodeKind::ForOfStatement { .. } => "ForOfStatement",
            NodeKind::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::ClassDeclaration(_) => "ClassDeclaration",
            NodeKind::ClassBody { .. } => "ClassBody",
            NodeKind::MethodDefinition { .. } => "MethodDefinition",
            NodeKind::PropertyDefinition { .. } => "PropertyDefinition",
            NodeKind::ThisExpression => "ThisExpression",
            NodeKind::Super => "Super",
            NodeKind::ArrayExpression { .. } => "ArrayExpression",
            NodeKind::ObjectExpression { .. } => "ObjectExpression",
            NodeKind::Property { .. } => "Property",
            NodeKind::FunctionExpression(_) => "FunctionExpression",
            NodeKind::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            NodeKind::ClassExpression(_) => "ClassExpression",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::UpdateExpression { .. } => "UpdateExpression",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::LogicalExpression { .. } => "LogicalExpression",
            NodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            NodeKind::MemberExpression { .. } => "MemberExpression",
            NodeKind::ConditionalExpression { .. } => "ConditionalExpression",
            NodeKind::CallExpression { .. } => "CallExpression",
            NodeKind::NewExpression { .. } => "NewExpression",
            NodeKind::SequenceExpression { .. } => "SequenceExpression",
            NodeKind::YieldExpression { .. } => "YieldExpression",
            NodeKind::AwaitExpression { .. } => "AwaitExpression",
            NodeKind::TemplateLiteral { .. } => "TemplateLiteral",
            NodeKind::TaggedTemplateExpression { .. } => "TaggedTemplateExpression",
            NodeKind::TemplateElement { .. } => "TemplateElement",
            NodeKind::MetaProperty { .. } => "MetaProperty",
            NodeKind::ImportExpression { .. } => "ImportExpression",
            NodeKind::ChainExpression { .. } => "ChainExpression",
            NodeKind::ParenthesizedExpression { .. } => "ParenthesizedExpression",
            NodeKind::SpreadElement { .. } => "SpreadElement",
            NodeKind::ObjectPattern { .. } => "ObjectPattern",
            NodeKind::ArrayPattern { .. } => "ArrayPattern",
            NodeKind::RestElement { .. } => "RestElement",
            NodeKind::AssignmentPattern { .. } => "AssignmentPattern",
            NodeKind::ImportDeclaration { .. } => "ImportDeclaration",
            NodeKind::ImportSpecifier { .. } => "ImportSpecifier",
            NodeKind::ImportDefaultSpecifier { .. } => "ImportDefaultSpecifier",
            NodeKind::ImportNamespaceSpecifier { .. } => "ImportNamespaceSpecifier",
            NodeKind::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            NodeKind::ExportSpecifier { .. } => "ExportSpecifier",
            NodeKind::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            NodeKind::ExportAllDeclaration { .. } => "ExportAllDeclaration",
            NodeKind::Unknown { type_name, .. } => type_name,
        }
    }

    /// Child edges in ESTree field order. Holes in sparse sequences are skipped.
    pub fn children(&self) -> Vec<ChildEdge<'_>> {
        let mut edges = Edges(Vec::new());
        match self {
            NodeKind::Program { body, .. }
            | NodeKind::BlockStatement { body }
            | NodeKind::StaticBlock { body }
            | NodeKind::ClassBody { body } => {
                edges.many("body", body);
            }
            NodeKind::Identifier { .. }
            | NodeKind::PrivateIdentifier { .. }
            | NodeKind::Literal(_)
            | NodeKind::EmptyStatement
            | NodeKind::DebuggerStatement
            | NodeKind::ThisExpression
            | NodeKind::Super
            | NodeKind::TemplateElement { .. } => {}
            NodeKind::ExpressionStatement { expression, .. }
            | NodeKind::ChainExpression { expression }
            | NodeKind::ParenthesizedExpression { expression } => {
                edges.one("expression", *expression);
            }
            NodeKind::WithStatement { object, body } => {
                edges.one("object", *object).one("body", *body);
            }
            NodeKind::ReturnStatement { argument } => {
                edges.opt("argument", *argument);
            }
            NodeKind::LabeledStatement { label, body } => {
                edges.one("label", *label).one("body", *body);
            }
            NodeKind::BreakStatement { label } | NodeKind::ContinueStatement { label } => {
                edges.opt("label", *label);
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                edges
                    .one("test", *test)
                    .one("consequent", *consequent)
                    .opt("alternate", *alternate);
            }
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => {
                edges.one("discriminant", *discriminant).many("cases", cases);
            }
            NodeKind::SwitchCase { test, consequent } => {
                edges.opt("test", *test).many("consequent", consequent);
            }
            NodeKind::ThrowStatement { argument }
            | NodeKind::AwaitExpression { argument }
            | NodeKind::SpreadElement { argument }
            | NodeKind::RestElement { argument }
            | NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. } => {
                edges.one("argument", *argument);
            }
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                edges
                    .one("block", *block)
                    .opt("handler", *handler)
                    .opt("finalizer", *finalizer);
            }
            NodeKind::CatchClause { param, body } => {
                edges.opt("param", *param).one("body", *body);
            }
            NodeKind::WhileStatement { test, body } => {
                edges.one("test", *test).one("body", *body);
            }
            NodeKind::DoWhileStatement { body, test } => {
                edges.one("body", *body).one("test", *test);
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                edges
                    .opt("init", *init)
                    .opt("test", *test)
                    .opt("update", *update)
                    .one("body", *body);
            }
            NodeKind::ForInStatement { left, right, body }
            | NodeKind::ForOfStatement {
                left, right, body, ..
            } => {
                edges
                    .one("left", *left)
                    .one("right", *right)
                    .one("body", *body);
            }
            NodeKind::FunctionDeclaration(function) | NodeKind::FunctionExpression(function) => {
                edges
                    .opt("id", function.id)
                    .many("params", &function.params)
                    .one("body", function.body);
            }
            NodeKind::ArrowFunctionExpression { params, body, .. } => {
                edges.many("params", params).one("body", *body);
            }
            NodeKind::VariableDeclaration { declarations, .. } => {
                edges.many("declarations", declarations);
            }
            NodeKind::VariableDeclarator { id, init } => {
                edges.one("id", *id).opt("init", *init);
            }
            NodeKind::ClassDeclaration(class) | NodeKind::ClassExpression(class) => {
                edges
                    .opt("id", class.id)
                    .opt("superClass", class.super_class)
                    .one("body", class.body);
            }
            NodeKind::MethodDefinition { key, value, .. } | NodeKind::Property { key, value, .. } => {
                edges.one("key", *key).one("value", *value);
            }
            NodeKind::PropertyDefinition { key, value, .. } => {
                edges.one("key", *key).opt("value", *value);
            }
            NodeKind::ArrayExpression { elements } | NodeKind::ArrayPattern { elements } => {
                edges.sparse("elements", elements);
            }
            NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties } => {
                edges.many("properties", properties);
            }
            NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. }
            | NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::AssignmentPattern { left, right } => {
                edges.one("left", *left).one("right", *right);
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => {
                edges.one("object", *object).one("property", *property);
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                edges
                    .one("test", *test)
                    .one("consequent", *consequent)
                    .one("alternate", *alternate);
            }
            NodeKind::CallExpression {
                callee, arguments, ..
            }
            | NodeKind::NewExpression { callee, arguments } => {
                edges.one("callee", *callee).many("arguments", arguments);
            }
            NodeKind::SequenceExpression { expressions } => {
                edges.many("expressions", expressions);
            }
            NodeKind::YieldExpression { argument, .. } => {
                edges.opt("argument", *argument);
            }
            NodeKind::TemplateLiteral {
                quasis,
                expressions,
            } => {
                edges.many("quasis", quasis).many("expressions", expressions);
            }
            NodeKind::TaggedTemplateExpression { tag, quasi } => {
                edges.one("tag", *tag).one("quasi", *quasi);
            }
            NodeKind::MetaProperty { meta, property } => {
                edges.one("meta", *meta).one("property", *property);
            }
            NodeKind::ImportExpression { source } => {
                edges.one("source", *source);
            }
            NodeKind::ImportDeclaration { specifiers, source } => {
                edges.many("specifiers", specifiers).one("source", *source);
            }
            NodeKind::ImportSpecifier { imported, local } => {
                edges.one("imported", *imported).one("local", *local);
            }
            NodeKind::ImportDefaultSpecifier { local }
            | NodeKind::ImportNamespaceSpecifier { local } => {
                edges.one("local", *local);
            }
            NodeKind::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => {
                edges
                    .opt("declaration", *declaration)
                    .many("specifiers", specifiers)
                    .opt("source", *source);
            }
            NodeKind::ExportSpecifier { local, exported } => {
                edges.one("local", *local).one("exported", *exported);
            }
            NodeKind::ExportDefaultDeclaration { declaration } => {
                edges.one("declaration", *declaration);
            }
            NodeKind::ExportAllDeclaration { exported, source } => {
                edges.opt("exported", *exported).one("source", *source);
            }
            NodeKind::Unknown { fields, .. } => {
                for (name, field) in fields {
                    match field {
                        UnknownField::Node(node) => edges.one(name, *node),
                        UnknownField::Nodes(nodes) => edges.sparse(name, nodes),
                    };
                }
            }
        }
        edges.0
    }
}

// ---------------------------------------------------------------------------
// Scalar enums
// ---------------------------------------------------------------------------

/// Declares a fieldless enum mapped one-to-one onto ESTree string values.
macro_rules! estree_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn from_estree(text: &str) -> Option<Self> {
                match text {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

estree_enum!(
    /// `var`, `let` or `const`.
    VariableKind {
        Var => "var",
        Let => "let",
        Const => "const",
    }
);

estree_enum!(
    /// `Property.kind`.
    PropertyKind {
        Init => "init",
        Get => "get",
        Set => "set",
    }
);

estree_enum!(
    /// `MethodDefinition.kind`.
    MethodKind {
        Constructor => "constructor",
        Method => "method",
        Get => "get",
        Set => "set",
    }
);

estree_enum!(
    UnaryOp {
        Minus => "-",
        Plus => "+",
        Not => "!",
        BitNot => "~",
        Typeof => "typeof",
        Void => "void",
        Delete => "delete",
    }
);

estree_enum!(
    UpdateOp {
        Increment => "++",
        Decrement => "--",
    }
);

estree_enum!(
    BinaryOp {
        Eq => "==",
        Neq => "!=",
        StrictEq => "===",
        StrictNeq => "!==",
        Lt => "<",
        Lte => "<=",
        Gt => ">",
        Gte => ">=",
        Shl => "<<",
        Shr => ">>",
        UShr => ">>>",
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Mod => "%",
        Exp => "**",
        BitOr => "|",
        BitXor => "^",
        BitAnd => "&",
        In => "in",
        Instanceof => "instanceof",
    }
);

estree_enum!(
    LogicalOp {
        Or => "||",
        And => "&&",
        NullishCoalescing => "??",
    }
);

estree_enum!(
    AssignOp {
        Assign => "=",
        AddAssign => "+=",
        SubAssign => "-=",
        MulAssign => "*=",
        DivAssign => "/=",
        ModAssign => "%=",
        ExpAssign => "**=",
        ShlAssign => "<<=",
        ShrAssign => ">>=",
        UShrAssign => ">>>=",
        BitOrAssign => "|=",
        BitXorAssign => "^=",
        BitAndAssign => "&=",
        OrAssign => "||=",
        AndAssign => "&&=",
        NullishAssign => "??=",
    }
);

impl UnaryOp {
    /// Keyword operators need a space before their operand.
    pub fn is_keyword(self) -> bool {
        matches!(self, UnaryOp::Typeof | UnaryOp::Void | UnaryOp::Delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(index: usize) -> NodeId {
        NodeId::from_index(index)
    }

    #[test]
    fn test_operator_round_trip() {
        assert_eq!(BinaryOp::from_estree(">>>"), Some(BinaryOp::UShr));
        assert_eq!(BinaryOp::UShr.as_str(), ">>>");
        assert_eq!(AssignOp::from_estree("??="), Some(AssignOp::NullishAssign));
        assert_eq!(LogicalOp::from_estree("+"), None);
    }

    #[test]
    fn test_keyword_unary_ops() {
        assert!(UnaryOp::Typeof.is_keyword());
        assert!(!UnaryOp::Not.is_keyword());
    }

    #[test]
    fn test_children_follow_field_order() {
        let kind = NodeKind::ForStatement {
            init: Some(id(0)),
            test: None,
            update: Some(id(1)),
            body: id(2),
        };
        let fields: Vec<&str> = kind.children().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["init", "update", "body"]);
    }

    #[test]
    fn test_sparse_children_keep_slot_numbers() {
        let kind = NodeKind::ArrayExpression {
            elements: vec![Some(id(0)), None, Some(id(1))],
        };
        let edges = kind.children();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].index, Some(2));
        assert_eq!(edges[1].node, id(1));
    }

    #[test]
    fn test_unknown_type_name_and_children() {
        let kind = NodeKind::Unknown {
            type_name: "JSXElement".into(),
            fields: vec![
                ("openingElement".into(), UnknownField::Node(id(0))),
                ("children".into(), UnknownField::Nodes(vec![None, Some(id(1))])),
            ],
        };
        assert_eq!(kind.type_name(), "JSXElement");
        let edges = kind.children();
        assert_eq!(edges[0].field, "openingElement");
        assert_eq!(edges[0].index, None);
        assert_eq!(edges[1].field, "children");
        assert_eq!(edges[1].index, Some(1));
    }

    #[test]
    fn test_leaves_have_no_children() {
        assert!(NodeKind::Identifier { name: "x".into() }.children().is_empty());
        assert!(NodeKind::ThisExpression.children().is_empty());
    }
}
