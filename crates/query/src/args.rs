//! Line-oriented argument collection.

use crate::Result;
use gqlsh_introspect::TypeRef;
use gqlsh_schema::ArgumentSpec;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, Write};

/// A decoded argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Int(i64),
    Float(f64),
    Boolean(bool),
    /// Raw text for every other named type, enums and custom scalars included.
    String(String),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// Collected values keyed by argument name. Omitted optional arguments have no entry.
pub type ArgumentValues = BTreeMap<String, ArgValue>;

/// Prompts for each argument in declaration order and reads one line per prompt.
///
/// Returns `Ok(None)` when input ends before every argument was answered; the
/// caller treats that as a cancellation, not an error. An empty answer to a
/// required argument prints `    Required field.` and starts over from the
/// first argument, discarding everything collected so far.
///
/// ```
/// use gqlsh_introspect::TypeRef;
/// use gqlsh_query::{collect_arguments, ArgValue};
/// use gqlsh_schema::ArgumentSpec;
///
/// let args = [ArgumentSpec {
///     name: "first".to_string(),
///     description: None,
///     type_ref: TypeRef::named("Int"),
///     default_value: None,
/// }];
/// let mut out = Vec::new();
/// let values = collect_arguments(&args, &mut "5\n".as_bytes(), &mut out).unwrap().unwrap();
/// assert_eq!(values["first"], ArgValue::Int(5));
/// assert_eq!(String::from_utf8(out).unwrap(), "  first Int: ");
/// ```
///
/// # Errors
///
/// Returns [`crate::QueryError::Io`] if reading or writing fails.
pub fn collect_arguments<R, W>(
    arguments: &[ArgumentSpec],
    input: &mut R,
    output: &mut W,
) -> Result<Option<ArgumentValues>>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    'restart: loop {
        let mut values = ArgumentValues::new();

        for arg in arguments {
            let required = if arg.type_ref.is_non_null() {
                " (required)"
            } else {
                ""
            };
            write!(output, "  {} {}{required}: ", arg.name, arg.type_ref)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!(argument = %arg.name, "Input ended during argument collection");
                return Ok(None);
            }

            let answer = line.trim();
            if answer.is_empty() {
                if arg.is_required() {
                    writeln!(output, "    Required field.")?;
                    continue 'restart;
                }
                continue;
            }

            values.insert(arg.name.clone(), parse_value(answer, &arg.type_ref));
        }

        return Ok(Some(values));
    }
}

/// Decodes one answer according to the argument's innermost named type.
///
/// Surrounding `"` and `'` characters are stripped first. Numbers are read
/// from the leading numeric prefix, so `12abc` is `12` and `3.7` is `3` for an
/// `Int`. Input without a numeric prefix becomes zero.
#[must_use]
pub fn parse_value(input: &str, type_ref: &TypeRef) -> ArgValue {
    let input = input.trim_matches(|c| c == '"' || c == '\'');

    match type_ref.named_type() {
        "Int" => ArgValue::Int(scan_int(input).unwrap_or_else(|| {
            tracing::warn!(input, "Not an integer, using 0");
            0
        })),
        "Float" => ArgValue::Float(scan_float(input).unwrap_or_else(|| {
            tracing::warn!(input, "Not a float, using 0");
            0.0
        })),
        "Boolean" => ArgValue::Boolean(input.eq_ignore_ascii_case("true")),
        _ => ArgValue::String(input.to_string()),
    }
}

/// Length of the optional sign at the start of `s`.
fn sign_len(s: &str) -> usize {
    usize::from(s.starts_with(['+', '-']))
}

fn digits_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Longest leading `[+-]digits`.
fn scan_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let sign = sign_len(s);
    let digits = digits_len(&s[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Longest leading `[+-]digits[.digits][(e|E)[+-]digits]`.
fn scan_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let mut end = sign_len(s);
    let whole = digits_len(&s[end..]);
    end += whole;

    let mut fraction = 0;
    if s[end..].starts_with('.') {
        fraction = digits_len(&s[end + 1..]);
        if fraction > 0 || whole > 0 {
            end += 1 + fraction;
        }
    }
    if whole == 0 && fraction == 0 {
        return None;
    }

    if s[end..].starts_with(['e', 'E']) {
        let exponent_sign = sign_len(&s[end + 1..]);
        let exponent = digits_len(&s[end + 1 + exponent_sign..]);
        if exponent > 0 {
            end += 1 + exponent_sign + exponent;
        }
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, type_ref: TypeRef, default_value: Option<&str>) -> ArgumentSpec {
        ArgumentSpec {
            name: name.to_string(),
            description: None,
            type_ref,
            default_value: default_value.map(str::to_string),
        }
    }

    fn run(arguments: &[ArgumentSpec], input: &str) -> (Option<ArgumentValues>, String) {
        let mut output = Vec::new();
        let values = collect_arguments(arguments, &mut input.as_bytes(), &mut output).unwrap();
        (values, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_no_arguments_reads_nothing() {
        let (values, output) = run(&[], "");
        assert_eq!(values, Some(ArgumentValues::new()));
        assert!(output.is_empty());
    }

    #[test]
    fn test_prompts_mark_required() {
        let args = [
            spec("id", TypeRef::non_null(TypeRef::named("ID")), None),
            spec("first", TypeRef::named("Int"), Some("10")),
        ];
        let (values, output) = run(&args, "42\n\n");
        assert_eq!(output, "  id ID! (required):   first Int: ");

        let values = values.unwrap();
        assert_eq!(values.get("id"), Some(&ArgValue::String("42".to_string())));
        assert!(!values.contains_key("first"));
    }

    #[test]
    fn test_empty_required_answer_restarts_from_first_argument() {
        let args = [
            spec("name", TypeRef::named("String"), None),
            spec("id", TypeRef::non_null(TypeRef::named("ID")), None),
        ];
        let (values, output) = run(&args, "first try\n\nagain\n7\n");

        assert_eq!(
            output,
            "  name String:   id ID! (required):     Required field.\n  name String:   id ID! (required): "
        );
        let values = values.unwrap();
        assert_eq!(values["name"], ArgValue::String("again".to_string()));
        assert_eq!(values["id"], ArgValue::String("7".to_string()));
    }

    #[test]
    fn test_non_null_with_default_may_be_skipped() {
        let args = [spec("limit", TypeRef::non_null(TypeRef::named("Int")), Some("20"))];
        let (values, output) = run(&args, "\n");
        assert_eq!(output, "  limit Int! (required): ");
        assert_eq!(values, Some(ArgumentValues::new()));
    }

    #[test]
    fn test_end_of_input_cancels() {
        let args = [
            spec("a", TypeRef::named("String"), None),
            spec("b", TypeRef::named("String"), None),
        ];
        let (values, _) = run(&args, "only one\n");
        assert_eq!(values, None);
    }

    #[test]
    fn test_end_of_input_after_restart_cancels() {
        let args = [spec("id", TypeRef::non_null(TypeRef::named("ID")), None)];
        let (values, output) = run(&args, "\n");
        assert_eq!(values, None);
        assert!(output.contains("Required field."));
    }

    #[test]
    fn test_parse_value_by_type() {
        let int = TypeRef::non_null(TypeRef::named("Int"));
        assert_eq!(parse_value("42", &int), ArgValue::Int(42));
        assert_eq!(parse_value("\"-3\"", &int), ArgValue::Int(-3));
        assert_eq!(parse_value("many", &int), ArgValue::Int(0));
        assert_eq!(parse_value("3.7", &int), ArgValue::Int(3));
        assert_eq!(parse_value("12abc", &int), ArgValue::Int(12));
        assert_eq!(parse_value("+8", &int), ArgValue::Int(8));
        assert_eq!(parse_value("-", &int), ArgValue::Int(0));

        let float = TypeRef::named("Float");
        assert_eq!(parse_value("1.5", &float), ArgValue::Float(1.5));
        assert_eq!(parse_value("x", &float), ArgValue::Float(0.0));
        assert_eq!(parse_value("2.5kg", &float), ArgValue::Float(2.5));
        assert_eq!(parse_value("-.5", &float), ArgValue::Float(-0.5));
        assert_eq!(parse_value("7.", &float), ArgValue::Float(7.0));
        assert_eq!(parse_value("1e3x", &float), ArgValue::Float(1000.0));
        assert_eq!(parse_value("4e", &float), ArgValue::Float(4.0));
        assert_eq!(parse_value(".", &float), ArgValue::Float(0.0));

        let boolean = TypeRef::named("Boolean");
        assert_eq!(parse_value("TRUE", &boolean), ArgValue::Boolean(true));
        assert_eq!(parse_value("yes", &boolean), ArgValue::Boolean(false));

        let list = TypeRef::list(TypeRef::named("String"));
        assert_eq!(
            parse_value("'quoted'", &list),
            ArgValue::String("quoted".to_string())
        );
        assert_eq!(
            parse_value("ADMIN", &TypeRef::named("Role")),
            ArgValue::String("ADMIN".to_string())
        );
    }

    #[test]
    fn test_display_is_literal_form() {
        assert_eq!(ArgValue::Int(-7).to_string(), "-7");
        assert_eq!(ArgValue::Float(2.5).to_string(), "2.5");
        assert_eq!(ArgValue::Boolean(false).to_string(), "false");
        assert_eq!(ArgValue::String("ADMIN".to_string()).to_string(), "ADMIN");
    }
}
