//! This is the module handling the `list` sub-command.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use safar_providers::builtin;

/// List of built-in providers into a nicely formatted string.
///
#[tracing::instrument]
pub fn list_providers() -> Result<String> {
    trace!("list_providers");

    let header = vec!["Name", "Id", "Package"];

    let mut builder = Builder::default();
    builder.push_record(header);

    builtin().iter().for_each(|p| {
        let id = p.id().to_string();
        builder.push_record(vec![p.name(), &id, p.package()]);
    });

    let table = builder.build().with(Style::rounded()).to_string();
    let table = format!("Listing all providers:\n{table}");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_providers() {
        let str = list_providers().unwrap();
        assert!(str.contains("Namma Yatri"));
        assert!(str.contains("namma_yatri"));
        assert!(str.contains("com.ubercab"));
    }
}
