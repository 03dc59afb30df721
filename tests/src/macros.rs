#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+
    ) => {
        mod sqlite {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::MoleculeTest::new($crate::TestDb::new());

                    test.run_test(|db| async move {
                        super::$f(db).await;
                    });
                }
            )*
        }
    };
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident,
        )+
    ) => {
        $crate::tests!( $(
            $( #[$attrs] )*
            $f
        ),+ );
    }
}

/// Builds a [`molecule::Value`] from JSON syntax.
#[macro_export]
macro_rules! value {
    ($($json:tt)+) => {
        molecule::Value::from($crate::serde_json::json!($($json)+))
    };
}
