use rowset::{Table, Value};

use crate::config::ShowArgs;
use crate::error::CliError;

pub fn run(args: ShowArgs) -> Result<(), CliError> {
    let mut table = args.input.load()?;

    for field in &args.drop {
        let removed = table.remove_field_everywhere(field);
        tracing::info!(field = %field, rows = removed, "dropped field");
    }
    for assignment in &args.set {
        let (name, value) = parse_assignment(assignment)?;
        apply(&mut table, name, &value)?;
        tracing::info!(field = %name, rows = table.len(), "set field");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        for row in table.rows() {
            println!("{row}");
        }
    }
    Ok(())
}

fn parse_assignment(raw: &str) -> Result<(&str, Value), CliError> {
    let (name, text) = raw
        .split_once('=')
        .ok_or_else(|| CliError::BadAssignment(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::BadAssignment(raw.to_string()));
    }
    let value = match serde_json::from_str(text) {
        Ok(json) => Value::from_json(json),
        Err(_) => Value::String(text.to_string()),
    };
    Ok((name, value))
}

fn apply(table: &mut Table, name: &str, value: &Value) -> Result<(), CliError> {
    for row in table.rows_mut() {
        row.insert(name, value.clone())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_values_prefer_json() {
        assert_eq!(parse_assignment("n=5").unwrap(), ("n", Value::Int64(5)));
        assert_eq!(parse_assignment("n=null").unwrap(), ("n", Value::Null));
        assert_eq!(parse_assignment("n=abc").unwrap(), ("n", Value::String("abc".into())));
        assert_eq!(parse_assignment("n=").unwrap(), ("n", Value::String(String::new())));
    }

    #[test]
    fn assignment_needs_a_name() {
        assert!(matches!(parse_assignment("=5"), Err(CliError::BadAssignment(_))));
        assert!(matches!(parse_assignment("novalue"), Err(CliError::BadAssignment(_))));
    }

    #[test]
    fn apply_writes_every_row() {
        let mut table = Table::new(["id"]).unwrap();
        table.push_row(vec![1.into()]).unwrap();
        table.push_row(vec![2.into()]).unwrap();
        apply(&mut table, "flag", &Value::Bool(true)).unwrap();
        assert!(table.rows().iter().all(|r| r.get("flag") == Some(&Value::Bool(true))));
    }
}
