//! Lowering of ESTree JSON into a [`SyntaxTree`].
//!
//! Walks the parser's output once, recursively, pushing every node into the
//! arena after its children. Source-position metadata (`loc`, `range`,
//! `start`, `end`) is read into [`Span`] and never treated as structure.

use serde_json::{Map, Value};

use crate::ast::{
    AssignOp, BinaryOp, Class, Function, Literal, LogicalOp, MethodKind, NodeData, NodeId,
    NodeKind, PropertyKind, RegexLiteral, Span, SyntaxTree, UnaryOp, UnknownField, UpdateOp,
    VariableKind,
};
use crate::options::SourceType;
use crate::TreeError;

/// Fields that describe source positions rather than syntax.
const POSITION_FIELDS: [&str; 4] = ["loc", "range", "start", "end"];

impl SyntaxTree {
    /// Lower an ESTree document (usually a `Program`) into a typed tree.
    pub fn from_estree(value: &Value) -> Result<SyntaxTree, TreeError> {
        let mut lowerer = Lowerer { nodes: Vec::new() };
        let root = lowerer.node(value)?;
        Ok(SyntaxTree::from_parts(lowerer.nodes, root))
    }
}

/// Borrowed view of one ESTree object, with typed field accessors.
struct Fields<'v> {
    node_type: &'v str,
    obj: &'v Map<String, Value>,
}

impl<'v> Fields<'v> {
    /// Field value; explicit `null` counts as absent.
    fn get(&self, field: &str) -> Option<&'v Value> {
        self.obj.get(field).filter(|v| !v.is_null())
    }

    fn require(&self, field: &str) -> Result<&'v Value, TreeError> {
        self.get(field).ok_or_else(|| TreeError::MissingField {
            node_type: self.node_type.to_string(),
            field: field.to_string(),
        })
    }

    fn invalid(&self, field: &str, expected: &'static str) -> TreeError {
        TreeError::InvalidField {
            node_type: self.node_type.to_string(),
            field: field.to_string(),
            expected,
        }
    }

    fn string(&self, field: &str) -> Result<String, TreeError> {
        self.require(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(field, "a string"))
    }

    fn opt_string(&self, field: &str) -> Option<String> {
        self.get(field).and_then(Value::as_str).map(str::to_string)
    }

    /// Boolean flag; missing flags are `false`.
    fn flag(&self, field: &str) -> bool {
        self.get(field).and_then(Value::as_bool).unwrap_or(false)
    }

    fn array(&self, field: &str) -> Result<&'v Vec<Value>, TreeError> {
        self.require(field)?
            .as_array()
            .ok_or_else(|| self.invalid(field, "an array"))
    }

    fn keyword<T>(
        &self,
        field: &str,
        parse: impl Fn(&str) -> Option<T>,
        expected: &'static str,
    ) -> Result<T, TreeError> {
        let text = self.string(field)?;
        parse(&text).ok_or_else(|| self.invalid(field, expected))
    }

    fn span(&self) -> Option<Span> {
        let start = self.get("start").and_then(Value::as_u64)?;
        let end = self.get("end").and_then(Value::as_u64)?;
        Some(Span::new(start as usize, end as usize))
    }
}

fn node_object(value: &Value) -> Option<(&str, &Map<String, Value>)> {
    let obj = value.as_object()?;
    let node_type = obj.get("type")?.as_str()?;
    Some((node_type, obj))
}

struct Lowerer {
    nodes: Vec<NodeData>,
}

impl Lowerer {
    fn push(&mut self, kind: NodeKind, span: Option<Span>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData { kind, span });
        id
    }

    fn child(&mut self, f: &Fields<'_>, field: &str) -> Result<NodeId, TreeError> {
        let value = f.require(field)?;
        if node_object(value).is_none() {
            return Err(f.invalid(field, "a node"));
        }
        self.node(value)
    }

    fn opt_child(&mut self, f: &Fields<'_>, field: &str) -> Result<Option<NodeId>, TreeError> {
        match f.get(field) {
            Some(_) => self.child(f, field).map(Some),
            None => Ok(None),
        }
    }

    fn list(&mut self, f: &Fields<'_>, field: &str) -> Result<Vec<NodeId>, TreeError> {
        let items = f.array(field)?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            if node_object(item).is_none() {
                return Err(f.invalid(field, "an array of nodes"));
            }
            ids.push(self.node(item)?);
        }
        Ok(ids)
    }

    /// Array whose `null` slots are elisions (`[a, , b]`).
    fn sparse_list(
        &mut self,
        f: &Fields<'_>,
        field: &str,
    ) -> Result<Vec<Option<NodeId>>, TreeError> {
        let items = f.array(field)?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            if item.is_null() {
                ids.push(None);
            } else if node_object(item).is_some() {
                ids.push(Some(self.node(item)?));
            } else {
                return Err(f.invalid(field, "an array of nodes"));
            }
        }
        Ok(ids)
    }

    fn function(&mut self, f: &Fields<'_>) -> Result<Function, TreeError> {
        Ok(Function {
            id: self.opt_child(f, "id")?,
            params: self.list(f, "params")?,
            body: self.child(f, "body")?,
            is_async: f.flag("async"),
            generator: f.flag("generator"),
        })
    }

    fn class(&mut self, f: &Fields<'_>) -> Result<Class, TreeError> {
        Ok(Class {
            id: self.opt_child(f, "id")?,
            super_class: self.opt_child(f, "superClass")?,
            body: self.child(f, "body")?,
        })
    }

    fn literal(&mut self, f: &Fields<'_>) -> Result<Literal, TreeError> {
        let regex = match f.get("regex").and_then(Value::as_object) {
            Some(regex) => Some(RegexLiteral {
                pattern: regex
                    .get("pattern")
                    .and_then(Value::as_str)
                    .ok_or_else(|| f.invalid("regex", "a { pattern, flags } object"))?
                    .to_string(),
                flags: regex
                    .get("flags")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }),
            None => None,
        };
        let raw = match f.opt_string("raw") {
            Some(raw) => raw,
            // Producers without `raw` still carry `value`; strings keep JSON quoting.
            None => match f.obj.get("value") {
                Some(value) => value.to_string(),
                None => {
                    return Err(TreeError::MissingField {
                        node_type: f.node_type.to_string(),
                        field: "raw".into(),
                    })
                }
            },
        };
        Ok(Literal {
            raw,
            regex,
            bigint: f.opt_string("bigint"),
        })
    }

    fn unknown(&mut self, f: &Fields<'_>) -> Result<NodeKind, TreeError> {
        let mut fields = Vec::new();
        for (name, value) in f.obj {
            if name == "type" || POSITION_FIELDS.contains(&name.as_str()) {
                continue;
            }
            if node_object(value).is_some() {
                fields.push((name.clone(), UnknownField::Node(self.node(value)?)));
            } else if let Some(items) = value.as_array() {
                let is_node_list = items.iter().any(|v| node_object(v).is_some())
                    && items.iter().all(|v| v.is_null() || node_object(v).is_some());
                if is_node_list {
                    let mut ids = Vec::with_capacity(items.len());
                    for item in items {
                        ids.push(match item {
                            Value::Null => None,
                            item => Some(self.node(item)?),
                        });
                    }
                    fields.push((name.clone(), UnknownField::Nodes(ids)));
                }
            }
        }
        Ok(NodeKind::Unknown {
            type_name: f.node_type.to_string(),
            fields,
        })
    }

    fn node(&mut self, value: &Value) -> Result<NodeId, TreeError> {
        let (node_type, obj) = node_object(value).ok_or(TreeError::NotANode)?;
        let f = Fields { node_type, obj };

        let kind = match node_type {
            "Program" => NodeKind::Program {
                body: self.list(&f, "body")?,
                source_type: match f.opt_string("sourceType").as_deref() {
                    Some("script") => SourceType::Script,
                    _ => SourceType::Module,
                },
            },

            "Identifier" => NodeKind::Identifier {
                name: f.string("name")?,
            },
            "PrivateIdentifier" => NodeKind::PrivateIdentifier {
                name: f.string("name")?,
            },
            "Literal" => NodeKind::Literal(self.literal(&f)?),

            "ExpressionStatement" => NodeKind::ExpressionStatement {
                expression: self.child(&f, "expression")?,
                directive: f.opt_string("directive"),
            },
            "BlockStatement" => NodeKind::BlockStatement {
                body: self.list(&f, "body")?,
            },
            "StaticBlock" => NodeKind::StaticBlock {
                body: self.list(&f, "body")?,
            },
            "EmptyStatement" => NodeKind::EmptyStatement,
            "DebuggerStatement" => NodeKind::DebuggerStatement,
            "WithStatement" => NodeKind::WithStatement {
                object: self.child(&f, "object")?,
                body: self.child(&f, "body")?,
            },
            "ReturnStatement" => NodeKind::ReturnStatement {
                argument: self.opt_child(&f, "argument")?,
            },
            "LabeledStatement" => NodeKind::LabeledStatement {
                label: self.child(&f, "label")?,
                body: self.child(&f, "body")?,
            },
            "BreakStatement" => NodeKind::BreakStatement {
                label: self.opt_child(&f, "label")?,
            },
            "ContinueStatement" => NodeKind::ContinueStatement {
                label: self.opt_child(&f, "label")?,
            },
            "IfStatement" => NodeKind::IfStatement {
                test: self.child(&f, "test")?,
                consequent: self.child(&f, "consequent")?,
                alternate: self.opt_child(&f, "alternate")?,
            },
            "SwitchStatement" => NodeKind::SwitchStatement {
                discriminant: self.child(&f, "discriminant")?,
                cases: self.list(&f, "cases")?,
            },
            "SwitchCase" => NodeKind::SwitchCase {
                test: self.opt_child(&f, "test")?,
                consequent: self.list(&f, "consequent")?,
            },
            "ThrowStatement" => NodeKind::ThrowStatement {
                argument: self.child(&f, "argument")?,
            },
            "TryStatement" => NodeKind::TryStatement {
                block: self.child(&f, "block")?,
                handler: self.opt_child(&f, "handler")?,
                finalizer: self.opt_child(&f, "finalizer")?,
            },
            "CatchClause" => NodeKind::CatchClause {
                param: self.opt_child(&f, "param")?,
                body: self.child(&f, "body")?,
            },
            "WhileStatement" => NodeKind::WhileStatement {
                test: self.child(&f, "test")?,
                body: self.child(&f, "body")?,
            },
            "DoWhileStatement" => NodeKind::DoWhileStatement {
                body: self.child(&f, "body")?,
                test: self.child(&f, "test")?,
            },
            "ForStatement" => NodeKind::ForStatement {
                init: self.opt_child(&f, "init")?,
                test: self.opt_child(&f, "test")?,
                update: self.opt_child(&f, "update")?,
                body: self.child(&f, "body")?,
            },
            "ForInStatement" => NodeKind::ForInStatement {
                left: self.child(&f, "left")?,
                right: self.child(&f, "right")?,
                body: self.child(&f, "body")?,
            },
            "ForOfStatement" => NodeKind::ForOfStatement {
                is_await: f.flag("await"),
                left: self.child(&f, "left")?,
                right: self.child(&f, "right")?,
                body: self.child(&f, "body")?,
            },

            "FunctionDeclaration" => NodeKind::FunctionDeclaration(self.function(&f)?),
            "VariableDeclaration" => NodeKind::VariableDeclaration {
                kind: f.keyword("kind", VariableKind::from_estree, "var, let or const")?,
                declarations: self.list(&f, "declarations")?,
            },
            "VariableDeclarator" => NodeKind::VariableDeclarator {
                id: self.child(&f, "id")?,
                init: self.opt_child(&f, "init")?,
            },
            "ClassDeclaration" => NodeKind::ClassDeclaration(self.class(&f)?),

            "ClassBody" => NodeKind::ClassBody {
                body: self.list(&f, "body")?,
            },
            "MethodDefinition" => NodeKind::MethodDefinition {
                key: self.child(&f, "key")?,
                value: self.child(&f, "value")?,
                kind: f.keyword("kind", MethodKind::from_estree, "a method kind")?,
                computed: f.flag("computed"),
                is_static: f.flag("static"),
            },
            "PropertyDefinition" => NodeKind::PropertyDefinition {
                key: self.child(&f, "key")?,
                value: self.opt_child(&f, "value")?,
                computed: f.flag("computed"),
                is_static: f.flag("static"),
            },

            "ThisExpression" => NodeKind::ThisExpression,
            "Super" => NodeKind::Super,
            "ArrayExpression" => NodeKind::ArrayExpression {
                elements: self.sparse_list(&f, "elements")?,
            },
            "ObjectExpression" => NodeKind::ObjectExpression {
                properties: self.list(&f, "properties")?,
            },
            "Property" => NodeKind::Property {
                key: self.child(&f, "key")?,
                value: self.child(&f, "value")?,
                kind: match f.get("kind") {
                    Some(_) => f.keyword("kind", PropertyKind::from_estree, "init, get or set")?,
                    None => PropertyKind::Init,
                },
                method: f.flag("method"),
                shorthand: f.flag("shorthand"),
                computed: f.flag("computed"),
            },
            "FunctionExpression" => NodeKind::FunctionExpression(self.function(&f)?),
            "ArrowFunctionExpression" => NodeKind::ArrowFunctionExpression {
                params: self.list(&f, "params")?,
                body: self.child(&f, "body")?,
                is_async: f.flag("async"),
            },
            "ClassExpression" => NodeKind::ClassExpression(self.class(&f)?),
            "UnaryExpression" => NodeKind::UnaryExpression {
                operator: f.keyword("operator", UnaryOp::from_estree, "a unary operator")?,
                argument: self.child(&f, "argument")?,
            },
            "UpdateExpression" => NodeKind::UpdateExpression {
                operator: f.keyword("operator", UpdateOp::from_estree, "++ or --")?,
                prefix: f.flag("prefix"),
                argument: self.child(&f, "argument")?,
            },
            "BinaryExpression" => NodeKind::BinaryExpression {
                operator: f.keyword("operator", BinaryOp::from_estree, "a binary operator")?,
                left: self.child(&f, "left")?,
                right: self.child(&f, "right")?,
            },
            "LogicalExpression" => NodeKind::LogicalExpression {
                operator: f.keyword("operator", LogicalOp::from_estree, "a logical operator")?,
                left: self.child(&f, "left")?,
                right: self.child(&f, "right")?,
            },
            "AssignmentExpression" => NodeKind::AssignmentExpression {
                operator: f.keyword("operator", AssignOp::from_estree, "an assignment operator")?,
                left: self.child(&f, "left")?,
                right: self.child(&f, "right")?,
            },
            "MemberExpression" => NodeKind::MemberExpression {
                object: self.child(&f, "object")?,
                property: self.child(&f, "property")?,
                computed: f.flag("computed"),
                optional: f.flag("optional"),
            },
            "ConditionalExpression" => NodeKind::ConditionalExpression {
                test: self.child(&f, "test")?,
                consequent: self.child(&f, "consequent")?,
                alternate: self.child(&f, "alternate")?,
            },
            "CallExpression" => NodeKind::CallExpression {
                callee: self.child(&f, "callee")?,
                arguments: self.list(&f, "arguments")?,
                optional: f.flag("optional"),
            },
            "NewExpression" => NodeKind::NewExpression {
                callee: self.child(&f, "callee")?,
                arguments: self.list(&f, "arguments")?,
            },
            "SequenceExpression" => NodeKind::SequenceExpression {
                expressions: self.list(&f, "expressions")?,
            },
            "YieldExpression" => NodeKind::YieldExpression {
                argument: self.opt_child(&f, "argument")?,
                delegate: f.flag("delegate"),
            },
            "AwaitExpression" => NodeKind::AwaitExpression {
                argument: self.child(&f, "argument")?,
            },
            "TemplateLiteral" => NodeKind::TemplateLiteral {
                quasis: self.list(&f, "quasis")?,
                expressions: self.list(&f, "expressions")?,
            },
            "TaggedTemplateExpression" => NodeKind::TaggedTemplateExpression {
                tag: self.child(&f, "tag")?,
                quasi: self.child(&f, "quasi")?,
            },
            "TemplateElement" => {
                let value = f
                    .require("value")?
                    .as_object()
                    .ok_or_else(|| f.invalid("value", "a { raw, cooked } object"))?;
                NodeKind::TemplateElement {
                    raw: value
                        .get("raw")
                        .and_then(Value::as_str)
                        .ok_or_else(|| f.invalid("value", "a { raw, cooked } object"))?
                        .to_string(),
                    cooked: value.get("cooked").and_then(Value::as_str).map(str::to_string),
                    tail: f.flag("tail"),
                }
            }
            "MetaProperty" => NodeKind::MetaProperty {
                meta: self.child(&f, "meta")?,
                property: self.child(&f, "property")?,
            },
            "ImportExpression" => NodeKind::ImportExpression {
                source: self.child(&f, "source")?,
            },
            "ChainExpression" => NodeKind::ChainExpression {
                expression: self.child(&f, "expression")?,
            },
            "ParenthesizedExpression" => NodeKind::ParenthesizedExpression {
                expression: self.child(&f, "expression")?,
            },
            "SpreadElement" => NodeKind::SpreadElement {
                argument: self.child(&f, "argument")?,
            },

            "ObjectPattern" => NodeKind::ObjectPattern {
                properties: self.list(&f, "properties")?,
            },
            "ArrayPattern" => NodeKind::ArrayPattern {
                elements: self.sparse_list(&f, "elements")?,
            },
            "RestElement" => NodeKind::RestElement {
                argument: self.child(&f, "argument")?,
            },
            "AssignmentPattern" => NodeKind::AssignmentPattern {
                left: self.child(&f, "left")?,
                right: self.child(&f, "right")?,
            },

            "ImportDeclaration" => NodeKind::ImportDeclaration {
                specifiers: self.list(&f, "specifiers")?,
                source: self.child(&f, "source")?,
            },
            "ImportSpecifier" => NodeKind::ImportSpecifier {
                imported: self.child(&f, "imported")?,
                local: self.child(&f, "local")?,
            },
            "ImportDefaultSpecifier" => NodeKind::ImportDefaultSpecifier {
                local: self.child(&f, "local")?,
            },
            "ImportNamespaceSpecifier" => NodeKind::ImportNamespaceSpecifier {
                local: self.child(&f, "local")?,
            },
            "ExportNamedDeclaration" => NodeKind::ExportNamedDeclaration {
                declaration: self.opt_child(&f, "declaration")?,
                specifiers: self.list(&f, "specifiers")?,
                source: self.opt_child(&f, "source")?,
            },
            "ExportSpecifier" => NodeKind::ExportSpecifier {
                local: self.child(&f, "local")?,
                exported: self.child(&f, "exported")?,
            },
            "ExportDefaultDeclaration" => NodeKind::ExportDefaultDeclaration {
                declaration: self.child(&f, "declaration")?,
            },
            "ExportAllDeclaration" => NodeKind::ExportAllDeclaration {
                exported: self.opt_child(&f, "exported")?,
                source: self.child(&f, "source")?,
            },

            _ => self.unknown(&f)?,
        };

        Ok(self.push(kind, f.span()))
    }
}
