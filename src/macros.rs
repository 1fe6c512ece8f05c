#[macro_export]
macro_rules! toml {
    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toml!($elem)),*])
    };

    // Handle empty table
    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    // Handle non-empty table; keys may be dotted paths
    ({ $($key:literal = $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table
                .insert($key, $crate::toml!($value))
                .expect("conflicting key in toml! literal");
        )*
        $crate::Value::Table(table)
    }};

    // Fallback for any expression with a From conversion
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
