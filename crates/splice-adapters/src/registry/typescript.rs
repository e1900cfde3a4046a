//! tree-sitter based registry editor for TypeScript sources.

use thiserror::Error;
use tracing::{debug, instrument};
use tree_sitter::{Language, Node, Parser, Tree};

use splice_core::{
    application::{ApplicationError, ports::RegistryEditor},
    domain::{MissingShapePolicy, RegistryEdit, RegistryPatch, RegistryTarget},
    error::{Context, SpliceError, SpliceResult},
};

use super::splice::{SourceText, Splice};

/// The part of the expected declaration shape that was not found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum MissingShape {
    #[error("class {0} not found")]
    Class(String),

    #[error("decorator @{decorator} not found on class {class}")]
    Decorator { class: String, decorator: String },

    #[error("@{0} has no object literal argument")]
    DecoratorArgument(String),

    #[error("property '{0}' not found in the decorator argument")]
    Property(String),

    #[error("property '{0}' is not an array literal")]
    NotAnArray(String),

    #[error("no default-exported array literal")]
    DefaultExportArray,
}

/// Splices registrations into TypeScript registry files.
///
/// Lookups are structural: classes by name, decorators by callee name,
/// properties by key. Decorators written above `export class` belong to the
/// export statement in the tree and are searched along with the class's own.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptRegistryEditor;

impl TypeScriptRegistryEditor {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, source: &str) -> SpliceResult<Tree> {
        let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .context("Failed to load the TypeScript grammar")?;
        parser.parse(source, None).ok_or_else(|| SpliceError::Internal {
            message: "TypeScript parser returned no tree".into(),
        })
    }
}

impl RegistryEditor for TypeScriptRegistryEditor {
    #[instrument(skip_all, fields(registry = %edit.registry(), target = %edit.target()))]
    fn apply(&self, source: &str, edit: &RegistryEdit) -> SpliceResult<RegistryPatch> {
        let precondition = |reason: String| -> SpliceError {
            ApplicationError::PreconditionFailed {
                registry: edit.registry().as_path().to_path_buf(),
                reason,
            }
            .into()
        };

        let tree = self.parse(source)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(precondition("source has syntax errors".into()));
        }

        let src = SourceText::new(source);
        let array = match edit.target() {
            RegistryTarget::DefaultExportArray => find_default_export_array(root, &src),
            RegistryTarget::DecoratedClassArray {
                class,
                decorator,
                property,
            } => find_decorated_class_array(
                root,
                &src,
                class.as_str(),
                decorator.as_str(),
                property.key(),
            ),
        };

        let mut splices = Vec::with_capacity(3);
        let element_appended = match array {
            Ok(array) => {
                splices.extend(append_element(array, &src, &edit.element().to_source()));
                true
            }
            Err(missing) => match edit.on_missing() {
                MissingShapePolicy::Fail => return Err(precondition(missing.to_string())),
                MissingShapePolicy::SkipAppend => {
                    debug!(%missing, "skipping append");
                    false
                }
            },
        };
        splices.push(insert_import(root, &src, &edit.import().to_statement()));

        Ok(RegistryPatch {
            source: src.apply(splices),
            element_appended,
        })
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named children without comments.
fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| !n.is_extra())
        .collect()
}

fn text<'a>(node: Node<'_>, src: &SourceText<'a>) -> &'a str {
    src.slice(node.byte_range())
}

/// Strip `( )`, `as T` and `satisfies T` around an expression.
fn unwrap_expression(mut node: Node<'_>) -> Node<'_> {
    while matches!(
        node.kind(),
        "parenthesized_expression" | "as_expression" | "satisfies_expression"
    ) {
        match named_children(node).first() {
            Some(inner) => node = *inner,
            None => break,
        }
    }
    node
}

/// `export default [ ... ]`, or `export default name` bound to an array.
fn find_default_export_array<'t>(
    root: Node<'t>,
    src: &SourceText<'_>,
) -> Result<Node<'t>, MissingShape> {
    for stmt in named_children(root) {
        if stmt.kind() != "export_statement"
            || !children(stmt).iter().any(|c| c.kind() == "default")
        {
            continue;
        }
        let Some(value) = stmt.child_by_field_name("value") else {
            continue;
        };

        let value = unwrap_expression(value);
        return match value.kind() {
            "array" => Ok(value),
            "identifier" => {
                find_array_binding(root, src, text(value, src)).ok_or(MissingShape::DefaultExportArray)
            }
            _ => Err(MissingShape::DefaultExportArray),
        };
    }
    Err(MissingShape::DefaultExportArray)
}

/// Top-level `const <name> = [ ... ]`.
fn find_array_binding<'t>(root: Node<'t>, src: &SourceText<'_>, name: &str) -> Option<Node<'t>> {
    named_children(root)
        .into_iter()
        .map(|stmt| match stmt.kind() {
            "export_statement" => stmt.child_by_field_name("declaration").unwrap_or(stmt),
            _ => stmt,
        })
        .filter(|decl| matches!(decl.kind(), "lexical_declaration" | "variable_declaration"))
        .flat_map(named_children)
        .filter(|d| d.kind() == "variable_declarator")
        .find(|d| {
            d.child_by_field_name("name")
                .is_some_and(|n| text(n, src) == name)
        })
        .and_then(|d| d.child_by_field_name("value"))
        .map(unwrap_expression)
        .filter(|v| v.kind() == "array")
}

/// `@<decorator>({ <property>: [ ... ] }) class <class>`
fn find_decorated_class_array<'t>(
    root: Node<'t>,
    src: &SourceText<'_>,
    class: &str,
    decorator: &str,
    property: &str,
) -> Result<Node<'t>, MissingShape> {
    let decorators =
        find_class_decorators(root, src, class).ok_or_else(|| MissingShape::Class(class.into()))?;

    let (_, arguments) = decorators
        .into_iter()
        .filter_map(|d| decorator_call(d, src))
        .find(|(name, _)| *name == decorator)
        .ok_or_else(|| MissingShape::Decorator {
            class: class.into(),
            decorator: decorator.into(),
        })?;

    let object = arguments
        .and_then(|args| named_children(args).first().copied())
        .filter(|arg| arg.kind() == "object")
        .ok_or_else(|| MissingShape::DecoratorArgument(decorator.into()))?;

    for member in named_children(object) {
        match member.kind() {
            "pair" => {
                let matches = member
                    .child_by_field_name("key")
                    .and_then(|k| property_key(k, src))
                    .is_some_and(|k| k == property);
                if !matches {
                    continue;
                }
                return member
                    .child_by_field_name("value")
                    .map(unwrap_expression)
                    .filter(|v| v.kind() == "array")
                    .ok_or_else(|| MissingShape::NotAnArray(property.into()));
            }
            "shorthand_property_identifier" if text(member, src) == property => {
                return Err(MissingShape::NotAnArray(property.into()));
            }
            _ => {}
        }
    }
    Err(MissingShape::Property(property.into()))
}

/// Decorators of the class named `name`, including those on its `export`.
fn find_class_decorators<'t>(
    root: Node<'t>,
    src: &SourceText<'_>,
    name: &str,
) -> Option<Vec<Node<'t>>> {
    for stmt in named_children(root) {
        let (class, export) = match stmt.kind() {
            "class_declaration" => (stmt, None),
            "export_statement" => match stmt.child_by_field_name("declaration") {
                Some(decl) if decl.kind() == "class_declaration" => (decl, Some(stmt)),
                _ => continue,
            },
            _ => continue,
        };

        let named = class
            .child_by_field_name("name")
            .is_some_and(|n| text(n, src) == name);
        if !named {
            continue;
        }

        let mut decorators: Vec<Node<'t>> = export
            .map(children)
            .unwrap_or_default()
            .into_iter()
            .filter(|c| c.kind() == "decorator")
            .collect();
        decorators.extend(children(class).into_iter().filter(|c| c.kind() == "decorator"));
        return Some(decorators);
    }
    None
}

/// Callee name and argument list of a decorator. `@Foo` has no arguments.
fn decorator_call<'a, 't>(
    decorator: Node<'t>,
    src: &SourceText<'a>,
) -> Option<(&'a str, Option<Node<'t>>)> {
    let expr = named_children(decorator).first().copied()?;
    match expr.kind() {
        "call_expression" => {
            let callee = callee_name(expr.child_by_field_name("function")?, src)?;
            Some((callee, expr.child_by_field_name("arguments")))
        }
        _ => Some((callee_name(expr, src)?, None)),
    }
}

/// `Module` for both `Module` and `common.Module`.
fn callee_name<'a>(node: Node<'_>, src: &SourceText<'a>) -> Option<&'a str> {
    match node.kind() {
        "identifier" => Some(text(node, src)),
        "member_expression" => node.child_by_field_name("property").map(|p| text(p, src)),
        _ => None,
    }
}

/// Key of an object pair as written: bare or quoted.
fn property_key<'a>(key: Node<'_>, src: &SourceText<'a>) -> Option<&'a str> {
    match key.kind() {
        "property_identifier" => Some(text(key, src)),
        "string" => {
            let raw = text(key, src);
            raw.get(1..raw.len().saturating_sub(1))
        }
        _ => None,
    }
}

// ── Mutations ────────────────────────────────────────────────────────────────

/// Insert `element` as the last element of `array`, following its layout.
fn append_element(array: Node<'_>, src: &SourceText<'_>, element: &str) -> Vec<Splice> {
    let elements = named_children(array);
    let (Some(first), Some(last)) = (elements.first(), elements.last()) else {
        return fill_empty_array(array, src, element);
    };

    let after_last: Vec<Node<'_>> = children(array)
        .into_iter()
        .filter(|c| c.start_byte() >= last.end_byte())
        .collect();
    let trailing_comma = after_last
        .iter()
        .find(|c| !c.is_extra())
        .filter(|c| c.kind() == ",")
        .copied();

    let multiline = first.start_position().row > array.start_position().row;
    if !multiline {
        return vec![match trailing_comma {
            Some(comma) => Splice::insert(comma.end_byte(), format!(" {element}")),
            None => Splice::insert(last.end_byte(), format!(", {element}")),
        }];
    }

    let nl = src.newline();
    let indent = src.indent_at(last.start_byte());
    let anchor = trailing_comma.unwrap_or(*last);

    // A comment on the anchor's line stays on that line.
    let line_end = after_last
        .iter()
        .find(|c| {
            c.is_extra()
                && c.start_byte() >= anchor.end_byte()
                && c.start_position().row == anchor.end_position().row
        })
        .map_or(anchor.end_byte(), |c| c.end_byte());

    match trailing_comma {
        Some(_) => vec![Splice::insert(line_end, format!("{nl}{indent}{element},"))],
        None if line_end == last.end_byte() => {
            vec![Splice::insert(line_end, format!(",{nl}{indent}{element}"))]
        }
        None => vec![
            Splice::insert(last.end_byte(), ","),
            Splice::insert(line_end, format!("{nl}{indent}{element}")),
        ],
    }
}

/// `[]` becomes `[X]`; an array holding only comments gets `X` after them.
fn fill_empty_array(array: Node<'_>, src: &SourceText<'_>, element: &str) -> Vec<Splice> {
    let inner = array.start_byte() + 1..array.end_byte() - 1;
    let last_comment = children(array).into_iter().filter(|c| c.is_extra()).last();

    match last_comment {
        None => vec![Splice::replace(inner, element)],
        Some(comment) if array.end_position().row > comment.end_position().row => {
            let indent = src.indent_at(comment.start_byte());
            vec![Splice::insert(
                comment.end_byte(),
                format!("{}{indent}{element}", src.newline()),
            )]
        }
        Some(comment) => vec![Splice::insert(comment.end_byte(), format!(" {element}"))],
    }
}

/// Put `statement` on the line after the last top-level import, or first.
fn insert_import(root: Node<'_>, src: &SourceText<'_>, statement: &str) -> Splice {
    let nl = src.newline();
    let last_import = named_children(root)
        .into_iter()
        .filter(|n| n.kind() == "import_statement")
        .last();

    match last_import {
        Some(import) => match src.next_line_start(import.end_byte()) {
            Some(at) => Splice::insert(at, format!("{statement}{nl}")),
            None => Splice::insert(src.as_str().len(), format!("{nl}{statement}")),
        },
        None => Splice::insert(0, format!("{statement}{nl}")),
    }
}
