use rowset::Table;

use crate::config::InputArgs;
use crate::error::CliError;

pub fn run(args: InputArgs) -> Result<(), CliError> {
    let table = args.load()?;
    for (index, name, live) in field_usage(&table) {
        println!("{index}\t{name}\t{live}/{}", table.len());
    }
    Ok(())
}

/// `(index, name, rows where the field is live)` for every catalog field.
fn field_usage(table: &Table) -> Vec<(usize, String, usize)> {
    table
        .field_names()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let live = table.rows().iter().filter(|r| r.value_at(index).is_some()).count();
            (index, name.to_string(), live)
        })
        .collect()
}
