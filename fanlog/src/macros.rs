/// Path of the enclosing function, e.g. `my_crate::worker::run`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// Logs to the process-wide logger at `level`.
///
/// The call site's file, line and function are attached for levels that
/// allow a location. Without format arguments the record has no message.
/// Levels above [`MAX_LEVEL`](crate::MAX_LEVEL) compile to nothing.
///
/// ```
/// fanlog::emit!(fanlog::Level::Info, "{} jobs queued", 3);
/// fanlog::emit!(fanlog::Level::Debug);
/// ```
#[macro_export]
macro_rules! emit {
    ($level:expr $(,)?) => {{
        let level: $crate::Level = $level;
        if level <= $crate::MAX_LEVEL {
            let location = $crate::Location::new(
                ::std::line!(),
                ::std::file!(),
                $crate::function_name!(),
            );
            $crate::global().emit_empty(
                level,
                $crate::MAX_LOCATION.contains(level).then_some(&location),
            );
        }
    }};
    ($level:expr, $($arg:tt)+) => {{
        let level: $crate::Level = $level;
        if level <= $crate::MAX_LEVEL {
            let location = $crate::Location::new(
                ::std::line!(),
                ::std::file!(),
                $crate::function_name!(),
            );
            $crate::global().emit(
                level,
                $crate::MAX_LOCATION.contains(level).then_some(&location),
                ::std::format_args!($($arg)+),
            );
        }
    }};
}

#[macro_export]
macro_rules! critical {
    () => { $crate::emit!($crate::Level::Critical) };
    ($($arg:tt)+) => { $crate::emit!($crate::Level::Critical, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    () => { $crate::emit!($crate::Level::Error) };
    ($($arg:tt)+) => { $crate::emit!($crate::Level::Error, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    () => { $crate::emit!($crate::Level::Warning) };
    ($($arg:tt)+) => { $crate::emit!($crate::Level::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    () => { $crate::emit!($crate::Level::Info) };
    ($($arg:tt)+) => { $crate::emit!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    () => { $crate::emit!($crate::Level::Debug) };
    ($($arg:tt)+) => { $crate::emit!($crate::Level::Debug, $($arg)+) };
}

/// Aborts the process after logging an internal error when `cond` is false.
///
/// ```no_run
/// let workers = 0;
/// fanlog::fatal_assert!(workers > 0, "pool started with {} workers", workers);
/// ```
#[macro_export]
macro_rules! fatal_assert {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::global().fail_fatal(
                ::std::stringify!($cond),
                &$crate::Location::new(::std::line!(), ::std::file!(), $crate::function_name!()),
                ::std::option::Option::None,
            );
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::global().fail_fatal(
                ::std::stringify!($cond),
                &$crate::Location::new(::std::line!(), ::std::file!(), $crate::function_name!()),
                ::std::option::Option::Some(::std::format_args!($($arg)+)),
            );
        }
    };
}
