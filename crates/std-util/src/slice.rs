#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {{
        let actual = &$e;
        assert!(actual.is_empty(), "expected empty; actual={:?}", actual);
    }};
}

#[macro_export]
macro_rules! assert_len {
    ($e:expr, $len:expr) => {{
        let actual = &$e;
        assert_eq!(
            actual.len(),
            $len,
            "unexpected length; actual={:?}",
            actual
        );
    }};
}
