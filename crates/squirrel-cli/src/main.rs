use clap::{Parser, Subcommand};
use html_escape::encode_text;
use log::{info, warn};
use squirrel_ast::{NodeId, NodeKind, SyntaxTree, TreeError};
use squirrel_render::html::to_html;
use squirrel_render::{annotate, path_for, render, Generation, RenderOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "squirrel-pie")]
#[command(about = "Render ESTree syntax trees as clickable, labelled markup")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render an ESTree JSON file to a standalone HTML page
    Render {
        /// Input ESTree JSON file (e.g. `acorn --ecma2022 src.js > src.json`)
        path: PathBuf,

        /// Output file; defaults to the input path with an .html extension
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stylesheet linked from the page
        #[arg(long)]
        stylesheet: Option<String>,
    },

    /// Print the field path and type path of every node
    Paths {
        /// Input ESTree JSON file
        path: PathBuf,
    },

    /// Check that a file is a well-formed ESTree document
    Check {
        /// Input ESTree JSON file
        path: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Malformed syntax tree: {0}")]
    Tree(#[from] TreeError),
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render {
            path,
            output,
            stylesheet,
        } => cmd_render(&path, output, stylesheet.as_deref()),
        Command::Paths { path } => cmd_paths(&path),
        Command::Check { path } => cmd_check(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn read_tree(path: &Path) -> Result<SyntaxTree, CliError> {
    if !path.exists() {
        return Err(CliError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let estree: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(SyntaxTree::from_estree(&estree)?)
}

fn cmd_render(path: &Path, output: Option<PathBuf>, stylesheet: Option<&str>) -> Result<(), CliError> {
    let tree = read_tree(path)?;
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "squirrel-pie".to_string());
    let html = render_page(&tree, &title, stylesheet);

    let output = output.unwrap_or_else(|| path.with_extension("html"));
    std::fs::write(&output, html).map_err(|source| CliError::Write {
        path: output.clone(),
        source,
    })?;

    info!("Rendered: {}", output.display());
    Ok(())
}

fn cmd_paths(path: &Path) -> Result<(), CliError> {
    let tree = read_tree(path)?;
    for line in node_paths(&tree, &RenderOptions::default()) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<(), CliError> {
    let tree = read_tree(path)?;
    let unknown = unknown_types(&tree);
    for type_name in &unknown {
        warn!("no template for node type `{type_name}`");
    }
    info!(
        "OK: {} ({} nodes, {} without a template)",
        path.display(),
        tree.len(),
        unknown.len()
    );
    Ok(())
}

/// Standalone HTML page around the rendered markup.
fn render_page(tree: &SyntaxTree, title: &str, stylesheet: Option<&str>) -> String {
    let document = render(tree, &RenderOptions::default());
    let body = to_html(&document, Generation::default().next(), stylesheet);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
    html.push_str(&format!("  <title>{}</title>\n", encode_text(title)));
    html.push_str("</head>\n<body>\n<pre>");
    html.push_str(&body);
    html.push_str("</pre>\n</body>\n</html>\n");
    html
}

/// One `field path<TAB>type path` line per node, in document order.
fn node_paths(tree: &SyntaxTree, options: &RenderOptions) -> Vec<String> {
    let annotations = annotate(tree);
    let mut lines = Vec::with_capacity(tree.len());
    let mut stack: Vec<NodeId> = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let path = path_for(tree, &annotations, id);
        let field_path = path.array_path();
        let field_path = if field_path.is_empty() {
            "(root)".to_string()
        } else {
            field_path
        };
        lines.push(format!(
            "{field_path}\t{}",
            path.ast_path(&options.path_separator)
        ));
        stack.extend(tree[id].kind.children().iter().rev().map(|edge| edge.node));
    }
    lines
}

/// Distinct node types the renderer has no template for.
fn unknown_types(tree: &SyntaxTree) -> Vec<String> {
    let mut types: Vec<String> = tree
        .iter()
        .filter_map(|(_, data)| match &data.kind {
            NodeKind::Unknown { type_name, .. } => Some(type_name.clone()),
            _ => None,
        })
        .collect();
    types.sort();
    types.dedup();
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn const_x() -> SyntaxTree {
        SyntaxTree::from_estree(&json!({
            "type": "Program", "sourceType": "module",
            "body": [{
                "type": "VariableDeclaration", "kind": "const",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": { "type": "Identifier", "name": "x" },
                    "init": { "type": "Literal", "value": 1, "raw": "1" }
                }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_node_paths_in_document_order() {
        let lines = node_paths(&const_x(), &RenderOptions::default());
        assert_eq!(
            lines,
            vec![
                "(root)\tProgram",
                "body[0]\tProgram > VariableDeclaration",
                "body[0].declarations[0]\tProgram > VariableDeclaration > VariableDeclarator",
                "body[0].declarations[0].id\tProgram > VariableDeclaration > VariableDeclarator > Identifier",
                "body[0].declarations[0].init\tProgram > VariableDeclaration > VariableDeclarator > Literal",
            ]
        );
    }

    #[test]
    fn test_render_page() {
        let html = render_page(&const_x(), "a<b", Some("theme.css"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>a&lt;b</title>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="theme.css">"#));
        assert!(html.contains(r#"<span class="Identifier" title="Identifier" data-unit="2">x</span>"#));
    }

    #[test]
    fn test_unknown_types_are_distinct() {
        let tree = SyntaxTree::from_estree(&json!({
            "type": "Program", "sourceType": "module",
            "body": [
                { "type": "ExpressionStatement", "expression": { "type": "JSXElement" } },
                { "type": "ExpressionStatement", "expression": { "type": "JSXElement" } }
            ]
        }))
        .unwrap();
        assert_eq!(unknown_types(&tree), vec!["JSXElement"]);
        assert!(unknown_types(&const_x()).is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = read_tree(Path::new("/nonexistent/tree.json")).unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
    }
}
