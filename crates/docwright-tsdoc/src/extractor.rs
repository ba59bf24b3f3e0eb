//! Walks an `oxc` program and turns its top-level declarations into
//! [`AnnotationNode`]s.
//!
//! Only top-level statements are visited. Class and interface members become
//! children of their declaration; nothing nested inside function bodies is
//! reported.
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
  Class,
  ClassElement,
  Comment,
  Declaration,
  ExportDefaultDeclarationKind,
  Expression,
  FormalParameters,
  Function,
  PropertyKey,
  Statement,
  TSAccessibility,
  TSEnumDeclaration,
  TSInterfaceDeclaration,
  TSSignature,
  TSType,
  TSTypeAliasDeclaration,
  TSTypeAnnotation,
  VariableDeclaration,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};

use crate::{
  comment::parse_doc_comment,
  error::ExtractionError,
  syntax::{
    find_assignment,
    find_top_level,
    ident_prefix,
    is_ident_char,
    leading_doc,
    line_col,
    parse_member,
    split_members,
    split_top_level,
    strip_type_colon,
    trim_terminator,
    unquote,
  },
  types::{AnnotationKind, AnnotationNode, Parameter, SourceLocation},
};

/// Longest initializer kept verbatim in a variable's signature.
const MAX_INLINE_SIGNATURE: usize = 120;

/// A declaration of one of the six recognized kinds.
enum Decl<'s, 'a> {
  Function(&'s Function<'a>),
  Class(&'s Class<'a>),
  Interface(&'s TSInterfaceDeclaration<'a>),
  TypeAlias(&'s TSTypeAliasDeclaration<'a>),
  Enum(&'s TSEnumDeclaration<'a>),
  Variable(&'s VariableDeclaration<'a>),
}

/// The parts of a class method or method signature a child node is built
/// from.
struct Method<'s, 'a> {
  key:      &'s PropertyKey<'a>,
  computed: bool,
  optional: bool,
  params:   &'s FormalParameters<'a>,
  returns:  Option<&'s TSTypeAnnotation<'a>>,
}

impl<'s, 'a> Decl<'s, 'a> {
  fn from_statement(statement: &'s Statement<'a>) -> Option<Self> {
    match statement {
      Statement::FunctionDeclaration(func) => Some(Self::Function(func)),
      Statement::ClassDeclaration(class) => Some(Self::Class(class)),
      Statement::TSInterfaceDeclaration(iface) => Some(Self::Interface(iface)),
      Statement::TSTypeAliasDeclaration(alias) => Some(Self::TypeAlias(alias)),
      Statement::TSEnumDeclaration(decl) => Some(Self::Enum(decl)),
      Statement::VariableDeclaration(var) => Some(Self::Variable(var)),
      _ => None,
    }
  }

  fn from_declaration(declaration: &'s Declaration<'a>) -> Option<Self> {
    match declaration {
      Declaration::FunctionDeclaration(func) => Some(Self::Function(func)),
      Declaration::ClassDeclaration(class) => Some(Self::Class(class)),
      Declaration::TSInterfaceDeclaration(iface) => {
        Some(Self::Interface(iface))
      },
      Declaration::TSTypeAliasDeclaration(alias) => {
        Some(Self::TypeAlias(alias))
      },
      Declaration::TSEnumDeclaration(decl) => Some(Self::Enum(decl)),
      Declaration::VariableDeclaration(var) => Some(Self::Variable(var)),
      _ => None,
    }
  }

  fn from_default(kind: &'s ExportDefaultDeclarationKind<'a>) -> Option<Self> {
    match kind {
      ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
        Some(Self::Function(func))
      },
      ExportDefaultDeclarationKind::ClassDeclaration(class) => {
        Some(Self::Class(class))
      },
      ExportDefaultDeclarationKind::TSInterfaceDeclaration(iface) => {
        Some(Self::Interface(iface))
      },
      _ => None,
    }
  }
}

/// Parse `src` and collect its top-level annotation nodes in source order.
///
/// # Errors
///
/// Returns [`ExtractionError::Parse`] if the parser reports any error.
pub fn extract_nodes(
  src: &str,
  path: &Path,
) -> Result<Vec<AnnotationNode>, ExtractionError> {
  let allocator = Allocator::default();
  let source_type =
    SourceType::from_path(path).unwrap_or_else(|_| SourceType::ts());
  let ret = Parser::new(&allocator, src, source_type).parse();

  if ret.panicked || !ret.errors.is_empty() {
    return Err(ExtractionError::Parse {
      path:    path.to_path_buf(),
      message: ret
        .errors
        .iter()
        .map(std::string::ToString::to_string)
        .collect::<Vec<_>>()
        .join(", "),
    });
  }

  let mut walker = Walker {
    src,
    path,
    comments: ret.program.comments.iter().copied().collect(),
    nodes: Vec::new(),
    exported_names: Vec::new(),
  };
  for statement in &ret.program.body {
    walker.visit_statement(statement);
  }
  Ok(walker.finish())
}

struct Walker<'s> {
  src:            &'s str,
  path:           &'s Path,
  /// Every comment of the file, in source order.
  comments:       Vec<Comment>,
  nodes:          Vec<AnnotationNode>,
  /// Names exported through `export { .. }` or `export default name`.
  exported_names: Vec<String>,
}

impl<'s> Walker<'s> {
  fn visit_statement(&mut self, statement: &Statement<'_>) {
    match statement {
      Statement::ExportNamedDeclaration(export) => {
        if let Some(declaration) = &export.declaration {
          if let Some(decl) = Decl::from_declaration(declaration) {
            self.visit_decl(&decl, export.span.start, true);
          }
        } else if export.source.is_none() {
          self.note_export_list(export.span);
        }
      },
      Statement::ExportDefaultDeclaration(export) => {
        if let Some(decl) = Decl::from_default(&export.declaration) {
          self.visit_decl(&decl, export.span.start, true);
        } else {
          self.note_default_export(export.span);
        }
      },
      other => {
        if let Some(decl) = Decl::from_statement(other) {
          self.visit_decl(&decl, other.span().start, false);
        }
      },
    }
  }

  fn visit_decl(&mut self, decl: &Decl<'_, '_>, start: u32, exported: bool) {
    let start = start as usize;
    let mut produced = match decl {
      Decl::Function(func) => vec![self.function(func, start)],
      Decl::Class(class) => vec![self.class(class, start)],
      Decl::Interface(iface) => vec![self.interface(iface, start)],
      Decl::TypeAlias(alias) => vec![self.type_alias(alias, start)],
      Decl::Enum(decl) => vec![self.enumeration(decl, start)],
      Decl::Variable(var) => self.variables(var, start),
    };
    for node in &mut produced {
      node.exported = exported;
    }
    self.nodes.extend(produced);
  }

  /// `export { a, b as c };`
  fn note_export_list(&mut self, span: Span) {
    let text = self.text(span);
    let (Some(open), Some(close)) = (text.find('{'), text.rfind('}')) else {
      return;
    };
    if close <= open {
      return;
    }
    for (_, item) in split_top_level(&text[open + 1..close], &[',']) {
      let local = item.trim_start_matches("type ").trim_start();
      let name = ident_prefix(local);
      if !name.is_empty() {
        self.exported_names.push(name.to_string());
      }
    }
  }

  /// `export default name;`
  fn note_default_export(&mut self, span: Span) {
    let text = self.text(span);
    let value = trim_terminator(
      text
        .trim_start_matches("export")
        .trim_start()
        .trim_start_matches("default"),
    );
    if !value.is_empty() && value.chars().all(is_ident_char) {
      self.exported_names.push(value.to_string());
    }
  }

  fn finish(mut self) -> Vec<AnnotationNode> {
    for node in &mut self.nodes {
      if self.exported_names.iter().any(|name| *name == node.name) {
        node.exported = true;
      }
    }
    self.nodes
  }

  fn text(&self, span: Span) -> &'s str {
    self.slice(span.start as usize, span.end as usize)
  }

  fn slice(&self, start: usize, end: usize) -> &'s str {
    self.src.get(start..end).unwrap_or_default()
  }

  /// The doc comment the parser attached to the token at `start`.
  ///
  /// Line comments between it and the token are skipped; a plain block
  /// comment in that position means the token has no doc comment.
  fn doc_comment(&self, start: usize) -> Option<&'s str> {
    let start = u32::try_from(start).ok()?;
    let comment = self.comments.iter().rev().find(|comment| {
      comment.is_leading()
        && comment.attached_to == start
        && comment.span.end <= start
        && comment.is_block()
    })?;
    let text = self.text(comment.span);
    (text.starts_with("/**") && text.len() > 4).then_some(text)
  }

  /// One parameter per item of a parameter list, rest parameter last.
  fn parameters(&self, params: &FormalParameters<'_>) -> Vec<Parameter> {
    let mut out: Vec<Parameter> = params
      .items
      .iter()
      .map(|item| {
        let pattern = item.pattern.span();
        let name_end = item
          .type_annotation
          .as_ref()
          .map_or(pattern.end, |ty| ty.span.start.min(pattern.end));
        let default = item
          .initializer
          .as_ref()
          .map(|init| self.text(init.span()).trim().to_string());
        Parameter {
          name:        binding_name(
            self.slice(pattern.start as usize, name_end as usize),
          ),
          type_text:   self.type_text(item.type_annotation.as_deref()),
          optional:    item.optional || default.is_some(),
          default,
          description: None,
        }
      })
      .collect();

    if let Some(rest) = &params.rest {
      out.push(Parameter {
        name:        format!(
          "...{}",
          binding_name(self.text(rest.rest.argument.span()))
        ),
        type_text:   self.type_text(rest.type_annotation.as_deref()),
        optional:    false,
        default:     None,
        description: None,
      });
    }
    out
  }

  /// Literal text of a type annotation, without its colon.
  fn type_text(&self, ty: Option<&TSTypeAnnotation<'_>>) -> Option<String> {
    ty.and_then(|ty| strip_type_colon(self.text(ty.span)))
  }

  fn node(
    &self,
    name: &str,
    kind: AnnotationKind,
    start: usize,
  ) -> AnnotationNode {
    let (line, column) = line_col(self.src, start);
    AnnotationNode::new(name, kind, SourceLocation {
      file: self.path.to_path_buf(),
      line,
      column,
    })
  }

  fn function(&self, func: &Function<'_>, start: usize) -> AnnotationNode {
    let name = func.id.as_ref().map_or("default", |id| id.name.as_str());
    let mut node = self.node(name, AnnotationKind::Function, start);
    let head_end = func.body.as_ref().map_or(func.span.end, |b| b.span.start);
    node.signature =
      trim_terminator(self.slice(func.span.start as usize, head_end as usize))
        .to_string();
    node.parameters = self.parameters(&func.params);
    node.returns = self.type_text(func.return_type.as_deref());
    document(&mut node, self.doc_comment(start));
    node
  }

  fn class(&self, class: &Class<'_>, start: usize) -> AnnotationNode {
    let name = class.id.as_ref().map_or("default", |id| id.name.as_str());
    let mut node = self.node(name, AnnotationKind::Class, start);
    node.signature = self
      .slice(class.span.start as usize, class.body.span.start as usize)
      .trim()
      .to_string();

    for element in &class.body.body {
      let child = match element {
        ClassElement::MethodDefinition(method) => {
          if method.accessibility == Some(TSAccessibility::Private) {
            continue;
          }
          let end = method
            .value
            .body
            .as_ref()
            .map_or(method.span.end, |body| body.span.start);
          self.method(
            &Method {
              key:      &method.key,
              computed: method.computed,
              optional: method.optional,
              params:   &method.value.params,
              returns:  method.value.return_type.as_deref(),
            },
            Span::new(method.span.start, end),
          )
        },
        ClassElement::PropertyDefinition(prop) => self.property(prop.span),
        ClassElement::AccessorProperty(prop) => self.property(prop.span),
        _ => continue,
      };
      if let Some(child) = child {
        node.children.push(child);
      }
    }

    document(&mut node, self.doc_comment(start));
    node
  }

  fn interface(
    &self,
    iface: &TSInterfaceDeclaration<'_>,
    start: usize,
  ) -> AnnotationNode {
    let mut node =
      self.node(iface.id.name.as_str(), AnnotationKind::Interface, start);
    node.signature = self
      .slice(iface.span.start as usize, iface.body.span.start as usize)
      .trim()
      .to_string();
    node.children = self.signatures(&iface.body.body);
    document(&mut node, self.doc_comment(start));
    node
  }

  fn type_alias(
    &self,
    alias: &TSTypeAliasDeclaration<'_>,
    start: usize,
  ) -> AnnotationNode {
    let mut node =
      self.node(alias.id.name.as_str(), AnnotationKind::Type, start);
    node.signature = trim_terminator(self.text(alias.span)).to_string();
    node.type_text = strip_type_colon(self.text(alias.type_annotation.span()));
    if let TSType::TSTypeLiteral(literal) = &alias.type_annotation {
      node.children = self.signatures(&literal.members);
    }
    document(&mut node, self.doc_comment(start));
    node
  }

  fn signatures(&self, signatures: &[TSSignature<'_>]) -> Vec<AnnotationNode> {
    signatures
      .iter()
      .filter_map(|sig| match sig {
        TSSignature::TSPropertySignature(prop) => self.property(prop.span),
        TSSignature::TSMethodSignature(method) => self.method(
          &Method {
            key:      &method.key,
            computed: method.computed,
            optional: method.optional,
            params:   &method.params,
            returns:  method.return_type.as_deref(),
          },
          method.span,
        ),
        _ => None,
      })
      .collect()
  }

  /// Build a child node for a method from its tree.
  fn method(
    &self,
    method: &Method<'_, '_>,
    span: Span,
  ) -> Option<AnnotationNode> {
    if method.computed {
      return None;
    }
    let name = method.key.static_name()?;
    let start = span.start as usize;
    let mut node = self.node(&name, AnnotationKind::Function, start);
    node.signature = trim_terminator(self.text(span)).to_string();
    node.parameters = self.parameters(method.params);
    node.returns = self.type_text(method.returns);
    if method.optional {
      node.tags.insert("optional".to_string(), "true".into());
    }
    document(&mut node, self.doc_comment(start));
    Some(node)
  }

  fn property(&self, span: Span) -> Option<AnnotationNode> {
    let start = span.start as usize;
    self.member(self.text(span), start, self.doc_comment(start))
  }

  /// Build a child node from the text of one member.
  fn member(
    &self,
    text: &str,
    start: usize,
    doc: Option<&str>,
  ) -> Option<AnnotationNode> {
    let member = parse_member(text)?;
    let kind = if member.method {
      AnnotationKind::Function
    } else {
      AnnotationKind::Variable
    };
    let mut node = self.node(&member.name, kind, start);
    node.signature = trim_terminator(leading_doc(text).1).to_string();
    node.parameters = member.params;
    node.returns = member.returns;
    node.type_text = member.type_text;
    if member.optional {
      node.tags.insert("optional".to_string(), "true".into());
    }
    if let Some(default) = member.default {
      node.tags.insert("default".to_string(), default.into());
    }
    document(&mut node, doc);
    Some(node)
  }

  fn enumeration(
    &self,
    decl: &TSEnumDeclaration<'_>,
    start: usize,
  ) -> AnnotationNode {
    let mut node = self.node(decl.id.name.as_str(), AnnotationKind::Enum, start);
    let text = self.text(decl.span);
    let base = decl.span.start as usize;

    if let (Some(open), Some(close)) = (text.find('{'), text.rfind('}')) {
      node.signature = text[..open].trim().to_string();
      if open < close {
        let body_start = open + 1;
        for (offset, piece) in split_members(&text[body_start..close]) {
          let (doc, code) = leading_doc(piece);
          let member_start = base + body_start + offset + piece.len() - code.len();
          let (name, value) = match find_assignment(code) {
            Some(i) => (&code[..i], Some(code[i + 1..].trim())),
            None => (code, None),
          };
          let name = unquote(name);
          if name.is_empty() {
            continue;
          }
          let mut child =
            self.node(name, AnnotationKind::Variable, member_start);
          child.signature = code.to_string();
          child.type_text = value.map(ToString::to_string);
          document(&mut child, doc);
          node.children.push(child);
        }
      }
    } else {
      node.signature = text.trim().to_string();
    }

    document(&mut node, self.doc_comment(start));
    node
  }

  /// One node per declarator. The first declarator owns the statement's doc
  /// comment and location.
  fn variables(
    &self,
    var: &VariableDeclaration<'_>,
    start: usize,
  ) -> Vec<AnnotationNode> {
    let keyword = self
      .text(var.span)
      .split_whitespace()
      .find(|word| matches!(*word, "const" | "let" | "var" | "using"))
      .unwrap_or("const");

    let mut nodes = Vec::new();
    for (index, declarator) in var.declarations.iter().enumerate() {
      let text = self.text(declarator.span);
      let name = ident_prefix(text);
      if name.is_empty() {
        continue;
      }
      let node_start = if index == 0 {
        start
      } else {
        declarator.span.start as usize
      };
      let mut node = self.node(name, AnnotationKind::Variable, node_start);

      let head = find_assignment(text).map_or(text, |i| &text[..i]);
      node.type_text =
        find_top_level(head, ':').and_then(|i| strip_type_colon(&head[i + 1..]));

      let function_head = match &declarator.init {
        Some(Expression::ArrowFunctionExpression(arrow)) => {
          node.parameters = self.parameters(&arrow.params);
          node.returns = self.type_text(arrow.return_type.as_deref());
          Some(arrow.body.span.start)
        },
        Some(Expression::FunctionExpression(func)) => {
          node.parameters = self.parameters(&func.params);
          node.returns = self.type_text(func.return_type.as_deref());
          Some(func.body.as_ref().map_or(func.span.end, |b| b.span.start))
        },
        _ => None,
      };

      node.signature = match function_head {
        Some(body_start) => {
          let head = self.slice(declarator.span.start as usize, body_start as usize);
          format!("{keyword} {}", head.trim_end().trim_end_matches('{').trim_end())
        },
        None if text.contains('\n') || text.len() > MAX_INLINE_SIGNATURE => {
          format!("{keyword} {}", head.trim())
        },
        None => format!("{keyword} {text}"),
      };

      let doc = if index == 0 {
        self.doc_comment(start)
      } else {
        None
      };
      document(&mut node, doc);
      nodes.push(node);
    }
    nodes
  }
}

/// A parameter's binding as written, without an optional marker.
fn binding_name(text: &str) -> String {
  text.trim().trim_end_matches('?').trim_end().to_string()
}

/// Fill description, examples, tags and parameter descriptions from a raw
/// doc comment.
fn document(node: &mut AnnotationNode, raw: Option<&str>) {
  let Some(raw) = raw else {
    return;
  };
  let doc = parse_doc_comment(raw);
  for param in &mut node.parameters {
    param.description = doc.param(&param.name).map(ToString::to_string);
  }
  node.description = doc.description;
  node.examples = doc.examples;
  for (name, value) in doc.tags {
    node.tags.insert(name, value);
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  fn extract(src: &str) -> Vec<AnnotationNode> {
    extract_nodes(src, Path::new("test.ts")).unwrap()
  }

  #[test]
  fn test_function_with_doc() {
    let nodes = extract(
      "/** Adds two numbers */\nexport function add(a: number, b: number): \
       number { return a + b; }",
    );
    assert_eq!(nodes.len(), 1);
    let add = &nodes[0];
    assert_eq!(add.name, "add");
    assert_eq!(add.kind, AnnotationKind::Function);
    assert_eq!(add.description, "Adds two numbers");
    assert_eq!(add.source.line, 2);
    assert_eq!(add.source.column, 1);
    assert_eq!(
      add.signature,
      "function add(a: number, b: number): number"
    );
    assert_eq!(add.returns.as_deref(), Some("number"));
    assert!(add.exported);
  }

  #[test]
  fn test_undocumented_declarations_are_kept() {
    let nodes = extract("function helper() {}\nconst LIMIT = 3;\n");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].kind, AnnotationKind::Variable);
    assert_eq!(nodes[1].signature, "const LIMIT = 3");
    assert!(nodes.iter().all(|n| !n.exported && n.description.is_empty()));
  }

  #[test]
  fn test_export_list_marks_nodes() {
    let nodes = extract("function a() {}\nfunction b() {}\nexport { a };\n");
    assert!(nodes[0].exported);
    assert!(!nodes[1].exported);
  }

  #[test]
  fn test_multiple_declarators() {
    let nodes = extract("/** Pair */\nlet x = 1, y: string = 'a';");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].description, "Pair");
    assert!(nodes[1].description.is_empty());
    assert_eq!(nodes[1].type_text.as_deref(), Some("string"));
  }

  #[test]
  fn test_plain_block_comment_is_not_documentation() {
    let nodes = extract("/* internal */\nexport const a = 1;");
    assert!(nodes[0].description.is_empty());
  }

  #[test]
  fn test_parse_error() {
    let err = extract_nodes("function (", Path::new("bad.ts")).unwrap_err();
    assert!(matches!(err, ExtractionError::Parse { .. }));
  }
}
