//! ESTree builders for unit tests, shaped like acorn output minus positions.

use serde_json::{json, Value};
use squirrel_ast::{NodeId, NodeKind, SyntaxTree};

pub(crate) fn lower(value: Value) -> SyntaxTree {
    SyntaxTree::from_estree(&value).unwrap()
}

pub(crate) fn program(body: Vec<Value>) -> Value {
    json!({ "type": "Program", "sourceType": "module", "body": body })
}

pub(crate) fn ident(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

pub(crate) fn lit_num(n: i64) -> Value {
    json!({ "type": "Literal", "value": n, "raw": n.to_string() })
}

pub(crate) fn lit_str(raw: &str) -> Value {
    json!({ "type": "Literal", "value": raw.trim_matches(|c| c == '\'' || c == '"'), "raw": raw })
}

pub(crate) fn expr_stmt(expression: Value) -> Value {
    json!({ "type": "ExpressionStatement", "expression": expression })
}

pub(crate) fn block(body: Vec<Value>) -> Value {
    json!({ "type": "BlockStatement", "body": body })
}

pub(crate) fn declarator(id: Value, init: Option<Value>) -> Value {
    json!({ "type": "VariableDeclarator", "id": id, "init": init })
}

pub(crate) fn var_decl(kind: &str, declarations: Vec<Value>) -> Value {
    json!({ "type": "VariableDeclaration", "kind": kind, "declarations": declarations })
}

pub(crate) fn const_decl(name: &str, init: Value) -> Value {
    var_decl("const", vec![declarator(ident(name), Some(init))])
}

pub(crate) fn call(callee: Value, arguments: Vec<Value>) -> Value {
    json!({ "type": "CallExpression", "callee": callee, "arguments": arguments, "optional": false })
}

pub(crate) fn member(object: Value, property: Value) -> Value {
    json!({
        "type": "MemberExpression", "object": object, "property": property,
        "computed": false, "optional": false
    })
}

pub(crate) fn array(elements: Vec<Option<Value>>) -> Value {
    json!({ "type": "ArrayExpression", "elements": elements })
}

pub(crate) fn unary(operator: &str, argument: Value) -> Value {
    json!({ "type": "UnaryExpression", "operator": operator, "prefix": true, "argument": argument })
}

pub(crate) fn binary(operator: &str, left: Value, right: Value) -> Value {
    json!({ "type": "BinaryExpression", "operator": operator, "left": left, "right": right })
}

pub(crate) fn logical(operator: &str, left: Value, right: Value) -> Value {
    json!({ "type": "LogicalExpression", "operator": operator, "left": left, "right": right })
}

pub(crate) fn assign(operator: &str, left: Value, right: Value) -> Value {
    json!({ "type": "AssignmentExpression", "operator": operator, "left": left, "right": right })
}

pub(crate) fn update(operator: &str, prefix: bool, argument: Value) -> Value {
    json!({ "type": "UpdateExpression", "operator": operator, "prefix": prefix, "argument": argument })
}

pub(crate) fn function_decl(name: &str, params: Vec<Value>, body: Vec<Value>) -> Value {
    json!({
        "type": "FunctionDeclaration", "id": ident(name), "expression": false,
        "generator": false, "async": false, "params": params, "body": block(body)
    })
}

pub(crate) fn function_expr(params: Vec<Value>, body: Vec<Value>) -> Value {
    json!({
        "type": "FunctionExpression", "id": null, "expression": false,
        "generator": false, "async": false, "params": params, "body": block(body)
    })
}

pub(crate) fn shorthand(name: &str) -> Value {
    json!({
        "type": "Property", "method": false, "shorthand": true, "computed": false,
        "key": ident(name), "value": ident(name), "kind": "init"
    })
}

pub(crate) fn class_expr(super_class: Option<Value>) -> Value {
    json!({
        "type": "ClassExpression", "id": null, "superClass": super_class,
        "body": { "type": "ClassBody", "body": [] }
    })
}

pub(crate) fn property(key: Value, value: Value) -> Value {
    json!({
        "type": "Property", "method": false, "shorthand": false, "computed": false,
        "key": key, "value": value, "kind": "init"
    })
}

pub(crate) fn object(properties: Vec<Value>) -> Value {
    json!({ "type": "ObjectExpression", "properties": properties })
}

pub(crate) fn find_ident(tree: &SyntaxTree, wanted: &str) -> NodeId {
    tree.find(|k| matches!(k, NodeKind::Identifier { name } if name == wanted))
        .unwrap_or_else(|| panic!("no identifier `{wanted}`"))
}

pub(crate) fn find_type(tree: &SyntaxTree, wanted: &str) -> NodeId {
    tree.find(|k| k.type_name() == wanted)
        .unwrap_or_else(|| panic!("no `{wanted}` node"))
}
