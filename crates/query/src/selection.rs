//! Selection trees: automatic choice, parsing operator input, and rendering.

use crate::{QueryError, Result};
use gqlsh_introspect::TypeRef;
use gqlsh_schema::{CatalogType, FieldSpec, SchemaCatalog};

/// Levels of object nesting the automatic strategy expands, counting the
/// field's own type as the first.
pub const DEFAULT_SELECTION_DEPTH: usize = 2;

/// Deepest nesting accepted when rendering or parsing a selection.
pub const MAX_SELECTION_DEPTH: usize = 32;

/// One field of a selection set. A field without children is a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedField {
    pub name: String,
    pub children: Vec<SelectedField>,
}

impl SelectedField {
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(name: impl Into<String>, children: Vec<SelectedField>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Renders a selection set whose enclosing field sits at `depth`.
///
/// All-leaf lists stay on one line; anything with a nested field becomes a
/// block indented two spaces per level.
///
/// ```
/// use gqlsh_query::{render_selection, SelectedField};
///
/// let fields = vec![
///     SelectedField::leaf("id"),
///     SelectedField::with_children(
///         "posts",
///         vec![SelectedField::leaf("id"), SelectedField::leaf("title")],
///     ),
/// ];
/// assert_eq!(
///     render_selection(&fields, 1).unwrap(),
///     "{\n    id\n    posts { id title }\n  }"
/// );
/// ```
///
/// # Errors
///
/// Returns [`QueryError::DepthExceeded`] when the tree nests deeper than
/// [`MAX_SELECTION_DEPTH`].
pub fn render_selection(fields: &[SelectedField], depth: usize) -> Result<String> {
    if fields.is_empty() {
        return Ok(String::new());
    }
    if depth > MAX_SELECTION_DEPTH {
        return Err(QueryError::DepthExceeded {
            max: MAX_SELECTION_DEPTH,
        });
    }

    if fields.iter().all(SelectedField::is_leaf) {
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        return Ok(format!("{{ {} }}", names.join(" ")));
    }

    let child_indent = "  ".repeat(depth + 1);
    let mut out = String::from("{\n");
    for field in fields {
        out.push_str(&child_indent);
        out.push_str(&field.name);
        if !field.is_leaf() {
            out.push(' ');
            out.push_str(&render_selection(&field.children, depth + 1)?);
        }
        out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push('}');
    Ok(out)
}

/// Chooses a selection for a value of `type_ref`.
///
/// Leaf fields (scalars, enums, unknown types) are always selected. Object
/// and interface fields are expanded while fewer than
/// [`DEFAULT_SELECTION_DEPTH`] levels are open, unless they require arguments
/// or their type is already being expanded further up. Composite fields that
/// end up with nothing to select are dropped.
#[must_use]
pub fn auto_select(catalog: &SchemaCatalog, type_ref: &TypeRef) -> Vec<SelectedField> {
    let mut path = Vec::new();
    select_fields(catalog, type_ref.named_type(), DEFAULT_SELECTION_DEPTH, &mut path)
}

fn select_fields<'a>(
    catalog: &'a SchemaCatalog,
    type_name: &'a str,
    levels: usize,
    path: &mut Vec<&'a str>,
) -> Vec<SelectedField> {
    let Some(ty) = catalog.get_type(type_name) else {
        return Vec::new();
    };

    path.push(type_name);
    let mut selected = Vec::new();

    for field in selectable_fields(ty) {
        let field_type = field.type_ref.named_type();
        if catalog.is_leaf_type(field_type) {
            selected.push(SelectedField::leaf(&field.name));
            continue;
        }

        if levels <= 1 || field.has_required_arguments() || path.contains(&field_type) {
            continue;
        }

        let children = select_fields(catalog, field_type, levels - 1, path);
        if !children.is_empty() {
            selected.push(SelectedField::with_children(&field.name, children));
        }
    }

    path.pop();
    selected
}

fn selectable_fields(ty: &CatalogType) -> impl Iterator<Item = &FieldSpec> {
    ty.fields.iter().filter(|f| !f.name.starts_with("__"))
}

/// Parses operator selection text such as `id name posts { id title }`.
///
/// Fields are separated by whitespace or commas; braces after a field name
/// hold its children. The whole list may itself be wrapped in one pair of
/// braces.
///
/// # Errors
///
/// Returns [`QueryError::Syntax`] for unbalanced braces, empty braces or
/// characters that cannot appear in a field name, and
/// [`QueryError::DepthExceeded`] for trees deeper than [`MAX_SELECTION_DEPTH`].
pub fn parse_selection(text: &str) -> Result<Vec<SelectedField>> {
    let tokens = tokenize(text)?;
    let mut parser = SelectionParser { tokens, pos: 0 };

    let fields = if parser.peek() == Some(&Token::Open) {
        parser.pos += 1;
        let fields = parser.parse_list(1)?;
        parser.expect_close()?;
        fields
    } else {
        parser.parse_list(1)?
    };

    if let Some(token) = parser.peek() {
        return Err(QueryError::Syntax(format!("unexpected {token}")));
    }
    Ok(fields)
}

/// Checks a parsed selection against the catalog, starting at `type_name`.
///
/// # Errors
///
/// Fails on fields missing from their type, on children under leaf fields and
/// on composite fields without children.
pub fn validate_selection(
    catalog: &SchemaCatalog,
    type_name: &str,
    fields: &[SelectedField],
) -> Result<()> {
    let Some(ty) = catalog.get_type(type_name) else {
        return Ok(());
    };

    for selected in fields {
        if selected.name == "__typename" && selected.is_leaf() {
            continue;
        }
        let Some(field) = ty.field(&selected.name) else {
            return Err(QueryError::UnknownField {
                type_name: type_name.to_string(),
                field: selected.name.clone(),
            });
        };

        let field_type = field.type_ref.named_type();
        match (catalog.is_leaf_type(field_type), selected.is_leaf()) {
            (true, false) => {
                return Err(QueryError::UnexpectedSubselection {
                    type_name: type_name.to_string(),
                    field: selected.name.clone(),
                })
            }
            (false, true) => {
                return Err(QueryError::MissingSubselection {
                    type_name: type_name.to_string(),
                    field: selected.name.clone(),
                })
            }
            (false, false) => validate_selection(catalog, field_type, &selected.children)?,
            (true, true) => {}
        }
    }
    Ok(())
}

/// Selection text for a root field, rendered at the operation's field depth.
///
/// With `explicit` text the operator's selection is parsed and validated;
/// otherwise [`auto_select`] decides. Fields whose type has no fields get an
/// empty selection either way.
///
/// # Errors
///
/// Propagates parse, validation and rendering errors.
pub fn selection_for_field(
    catalog: &SchemaCatalog,
    field: &FieldSpec,
    explicit: Option<&str>,
) -> Result<String> {
    let type_name = field.type_ref.named_type();
    let has_fields = catalog
        .get_type(type_name)
        .is_some_and(|ty| selectable_fields(ty).next().is_some());
    if !has_fields {
        return Ok(String::new());
    }

    let fields = match explicit.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => {
            let fields = parse_selection(text)?;
            validate_selection(catalog, type_name, &fields)?;
            fields
        }
        None => auto_select(catalog, &field.type_ref),
    };
    render_selection(&fields, 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    Open,
    Close,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "'{name}'"),
            Self::Open => f.write_str("'{'"),
            Self::Close => f.write_str("'}'"),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '{' => tokens.push(Token::Open),
            '}' => tokens.push(Token::Close),
            c if c.is_whitespace() || c == ',' => {}
            c if c == '_' || c.is_ascii_alphabetic() => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if next == '_' || next.is_ascii_alphanumeric() {
                        end = i + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Name(text[start..end].to_string()));
            }
            other => {
                return Err(QueryError::Syntax(format!("unexpected character '{other}'")));
            }
        }
    }
    Ok(tokens)
}

struct SelectionParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl SelectionParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn parse_list(&mut self, depth: usize) -> Result<Vec<SelectedField>> {
        if depth > MAX_SELECTION_DEPTH {
            return Err(QueryError::DepthExceeded {
                max: MAX_SELECTION_DEPTH,
            });
        }

        let mut fields = Vec::new();
        while let Some(Token::Name(name)) = self.peek() {
            let name = name.clone();
            self.pos += 1;

            if self.peek() == Some(&Token::Open) {
                self.pos += 1;
                let children = self.parse_list(depth + 1)?;
                if children.is_empty() {
                    return Err(QueryError::Syntax(format!("empty selection for '{name}'")));
                }
                self.expect_close()?;
                fields.push(SelectedField::with_children(name, children));
            } else {
                fields.push(SelectedField::leaf(name));
            }
        }
        Ok(fields)
    }

    fn expect_close(&mut self) -> Result<()> {
        match self.peek() {
            Some(Token::Close) => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(QueryError::Syntax(format!("expected '}}', found {token}"))),
            None => Err(QueryError::Syntax("missing closing '}'".to_string())),
        }
    }
}
