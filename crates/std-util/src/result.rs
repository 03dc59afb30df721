/// Unwraps an `Ok` value, panicking with the error otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(err) => panic!("expected `Ok`; err={:?}", err),
        }
    };
}

/// Unwraps an error. Given the name of a predicate method, also checks the
/// error with it, as in `assert_err!(res, is_cancelled)`.
#[macro_export]
macro_rules! assert_err {
    ($e:expr) => {
        match $e {
            Err(err) => err,
            Ok(v) => panic!("expected `Err`; ok={:?}", v),
        }
    };
    ($e:expr, $pred:ident) => {{
        let err = $crate::assert_err!($e);
        assert!(
            err.$pred(),
            "expected error satisfying `{}`; err={:?}",
            stringify!($pred),
            err
        );
        err
    }};
}
