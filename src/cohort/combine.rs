use crate::table::{Table, Value};

/// Cell value used wherever a year's table has no value for a column.
pub const MISSING_SENTINEL: Value = Value::Int(0);

/// Stacks every year's table into one master table over the union of
/// their columns. Missing cells are filled with [`MISSING_SENTINEL`].
pub fn combine(tables: Vec<Table>) -> Table {
    Table::concat(tables, MISSING_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_preserves_rows_and_fills_gaps() {
        let a = Table::from_rows(
            vec!["source_of_payment_1".into(), "source_of_payment_2".into()],
            vec![vec!["Medicare".into(), "Self-Pay".into()]],
        );
        let b = Table::from_rows(
            vec!["source_of_payment_1".into()],
            vec![vec!["Medicaid".into()], vec!["Medicare".into()]],
        );

        let master = combine(vec![a, b]);

        assert_eq!(master.len(), 3);
        assert_eq!(master.get(0, "source_of_payment_2"), Some(&Value::from("Self-Pay")));
        assert_eq!(master.get(1, "source_of_payment_2"), Some(&MISSING_SENTINEL));
        assert_eq!(master.get(2, "source_of_payment_1"), Some(&Value::from("Medicare")));
    }

    #[test]
    fn test_combine_nothing() {
        let master = combine(Vec::new());
        assert!(master.is_empty());
        assert_eq!(master.width(), 0);
    }
}
