/// Builds a [`stmt::Record`](crate::stmt::Record) from `field => value` pairs.
///
/// ```
/// let rec = molecule_core::record! { "x" => "a", "y" => 1 };
/// assert_eq!(rec.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::Record::new()
    };
    (
        $( $field:expr => $value:expr ),+ $(,)?
    ) => {{
        let mut record = $crate::stmt::Record::new();
        $( record.insert($field, $crate::stmt::Value::from($value)); )+
        record
    }};
}
