use toml::{Table, Value};

/// Inserts `value` at `path`, creating intermediate tables as needed.
///
/// A table landing on an existing table is merged into it; anything else
/// replaces what was there.
pub(crate) fn merge_at_path(table: &mut Table, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        if let Value::Table(overlay) = value {
            deep_merge(table, overlay);
        }
        return;
    };

    if rest.is_empty() {
        match (table.get_mut(first), value) {
            (Some(Value::Table(base)), Value::Table(overlay)) => deep_merge(base, overlay),
            (_, value) => {
                table.insert(first.clone(), value);
            }
        }
        return;
    }

    if !matches!(table.get(first), Some(Value::Table(_))) {
        table.insert(first.clone(), Value::Table(Table::new()));
    }

    if let Some(Value::Table(nested)) = table.get_mut(first) {
        merge_at_path(nested, rest, value);
    }
}

/// Merges `overlay` into `base`. Nested tables merge recursively; other
/// values (including arrays) are replaced.
pub(crate) fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_creates_intermediate_tables() {
        let mut table = Table::new();
        merge_at_path(&mut table, &path(&["databases", "default"]), Value::from("sqlite://"));
        assert_eq!(table["databases"]["default"].as_str(), Some("sqlite://"));
    }

    #[test]
    fn test_scalar_replaced_by_table_path() {
        let mut table: Table = toml::from_str("databases = \"flat\"").unwrap();
        merge_at_path(&mut table, &path(&["databases", "default"]), Value::from("x"));
        assert_eq!(table["databases"]["default"].as_str(), Some("x"));
    }

    #[test]
    fn test_deep_merge_keeps_siblings() {
        let mut base: Table = toml::from_str("[db]\nhost = \"a\"\nport = 1").unwrap();
        let overlay: Table = toml::from_str("[db]\nport = 2\nhosts = [\"b\"]").unwrap();
        deep_merge(&mut base, overlay);
        assert_eq!(base["db"]["host"].as_str(), Some("a"));
        assert_eq!(base["db"]["port"].as_integer(), Some(2));
        assert_eq!(base["db"]["hosts"].as_array().map(Vec::len), Some(1));
    }
}
