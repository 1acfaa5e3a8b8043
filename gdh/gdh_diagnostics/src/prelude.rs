// All the tagged log macros end up in the `log` facade, so whatever backend
// was installed by `log::init_logger` decides what gets printed.

#[macro_export]
macro_rules! tagged_log {
    ($level:ident, $prelude:tt, $($arg:expr),* $(,)*) => {
        $crate::__log::$level!("[ {} ] {}", $prelude, $($arg),*)
    };
}

#[macro_export]
macro_rules! lok {
    ($fmt:tt $(,$arg:expr)* $(,)?) => {
        $crate::tagged_log!(info, "OK", format_args!($fmt, $($arg),*))
    };
}

#[macro_export]
macro_rules! lerr {
    ($fmt:tt $(,$arg:expr)* $(,)?) => {
        $crate::tagged_log!(error, "ERROR", format_args!($fmt, $($arg),*))
    };
}

#[macro_export]
macro_rules! lwarn {
    ($fmt:tt $(,$arg:expr)* $(,)?) => {
        $crate::tagged_log!(warn, "WARNING", format_args!($fmt, $($arg),*))
    };
}

#[macro_export]
macro_rules! linfo {
    ($fmt:tt $(,$arg:expr)* $(,)?) => {
        $crate::tagged_log!(info, "INFO", format_args!($fmt, $($arg),*))
    };
}

#[macro_export]
macro_rules! ldebug {
    ($fmt:tt $(,$arg:expr)* $(,)?) => {
        $crate::tagged_log!(debug, "DEBUG", format_args!($fmt, $($arg),*))
    };
}

#[macro_export]
macro_rules! lverbose {
    ($fmt:tt $(,$arg:expr)* $(,)?) => {
        $crate::tagged_log!(trace, "VERBOSE", format_args!($fmt, $($arg),*))
    };
}
