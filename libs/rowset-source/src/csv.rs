use rowset::{FieldCatalog, Table, Value};

use crate::config::SourceConfig;
use crate::error::SourceError;

// ═══════════════════════════════════════════════════════════════
//  Column naming
// ═══════════════════════════════════════════════════════════════

/// Column names from a header line. Blank headers fall back to `col{i}`.
fn header_names(fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let name = f.trim();
            if name.is_empty() { format!("col{i}") } else { name.to_string() }
        })
        .collect()
}

/// Names for a headerless file: col0, col1, col2, ...
fn default_names(width: usize) -> Vec<String> {
    (0..width).map(|i| format!("col{i}")).collect()
}

// ═══════════════════════════════════════════════════════════════
//  RFC 4180 field splitter
// ═══════════════════════════════════════════════════════════════

/// Split one line into fields. With `quoting`, a field starting with `"`
/// runs to the matching quote and `""` inside it is a literal quote.
pub(crate) fn split_fields(line: &str, delimiter: char, quoting: bool) -> Vec<String> {
    if !quoting {
        return line.split(delimiter).map(str::to_string).collect();
    }

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    let mut at_start = true;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
            at_start = true;
            continue;
        } else if c == '"' && at_start {
            in_quotes = true;
        } else {
            field.push(c);
        }
        at_start = false;
    }
    // Unterminated quote: keep what was read
    fields.push(field);
    fields
}

// ═══════════════════════════════════════════════════════════════
//  Value inference
// ═══════════════════════════════════════════════════════════════

fn field_value(raw: String, config: &SourceConfig) -> Value {
    if raw == config.null_token {
        return Value::Null;
    }
    if !config.infer_types {
        return Value::String(raw);
    }
    match raw.as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Int64(n);
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Float64(n),
        _ => Value::String(raw),
    }
}

// ═══════════════════════════════════════════════════════════════
//  Reader
// ═══════════════════════════════════════════════════════════════

/// Materialise CSV text into a table.
///
/// Blank lines are skipped. A line shorter than the header leaves its
/// trailing fields absent; a longer one is an error.
pub fn read_csv(text: &str, config: &SourceConfig) -> Result<Table, SourceError> {
    let delimiter = config.delimiter_char()?;
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, split_fields(line, delimiter, config.quoting)))
        .peekable();

    let names = if config.header {
        match lines.next() {
            Some((_, fields)) => header_names(&fields),
            None => Vec::new(),
        }
    } else {
        match lines.peek() {
            Some((_, fields)) => default_names(fields.len()),
            None => Vec::new(),
        }
    };

    let mut table = Table::with_catalog(FieldCatalog::new(&names)?);
    let width = names.len();

    for (line_no, fields) in lines {
        if fields.len() > width {
            return Err(SourceError::parse(
                line_no,
                format!("{} fields, header has {width}", fields.len()),
            ));
        }
        let values = fields.into_iter().map(|f| field_value(f, config)).collect();
        table.push_row(values)?;
    }

    tracing::debug!(rows = table.len(), width, "csv parsed");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_fields() {
        assert_eq!(split_fields(r#"a,"b,c",d"#, ',', true), ["a", "b,c", "d"]);
        assert_eq!(split_fields(r#""say ""hi""",x"#, ',', true), [r#"say "hi""#, "x"]);
    }

    #[test]
    fn trailing_delimiter_adds_empty_field() {
        assert_eq!(split_fields("a,", ',', true), ["a", ""]);
        assert_eq!(split_fields("", ',', true), [""]);
    }

    #[test]
    fn quotes_are_literal_without_quoting() {
        assert_eq!(split_fields(r#""a,b""#, ',', false), ["\"a", "b\""]);
    }

    #[test]
    fn infers_types() {
        let cfg = SourceConfig::default();
        assert_eq!(field_value("12".into(), &cfg), Value::Int64(12));
        assert_eq!(field_value("1.5".into(), &cfg), Value::Float64(1.5));
        assert_eq!(field_value("true".into(), &cfg), Value::Bool(true));
        assert_eq!(field_value("".into(), &cfg), Value::Null);
        assert_eq!(field_value("NaN".into(), &cfg), Value::String("NaN".into()));
        assert_eq!(field_value("abc".into(), &cfg), Value::String("abc".into()));
    }

    #[test]
    fn text_only_when_inference_is_off() {
        let cfg = SourceConfig { infer_types: false, ..SourceConfig::default() };
        assert_eq!(field_value("12".into(), &cfg), Value::String("12".into()));
    }

    #[test]
    fn short_lines_leave_fields_absent() {
        let table = read_csv("id,name\n1,ann\n2\n", &SourceConfig::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].get("id"), Some(&Value::Int64(2)));
        assert_eq!(table.rows()[1].get("name"), Some(&Value::Null));
        assert_eq!(table.rows()[1].len(), 1);
    }

    #[test]
    fn long_lines_are_rejected() {
        let err = read_csv("id\n1\n2,3\n", &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, SourceError::Parse { record: 3, .. }));
    }

    #[test]
    fn headerless_files_get_positional_names() {
        let cfg = SourceConfig { header: false, ..SourceConfig::default() };
        let table = read_csv("1,2\n3,4\n", &cfg).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("col1"), Some(&Value::Int64(2)));
    }

    #[test]
    fn blank_header_cells_are_named_by_position() {
        let table = read_csv("id,,x\n1,2,3\n", &SourceConfig::default()).unwrap();
        assert_eq!(table.rows()[0].get("col1"), Some(&Value::Int64(2)));
    }

    #[test]
    fn duplicate_header_keeps_first_column() {
        let table = read_csv("a,a\n1,2\n", &SourceConfig::default()).unwrap();
        assert_eq!(table.rows()[0].get("a"), Some(&Value::Int64(1)));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"a":1}]"#);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = read_csv("", &SourceConfig::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.catalog().field_count(), 0);
    }
}
