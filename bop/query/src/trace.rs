//! Logs every token the parser consumes. Can be enabled using a flag.

#[cfg(feature = "trace_parser")]
pub const TRACE_ENABLED: bool = true;
#[cfg(not(feature = "trace_parser"))]
pub const TRACE_ENABLED: bool = false;

macro_rules! trace_token {
    ($($args:tt)*) => {
        if $crate::trace::TRACE_ENABLED {
            log::trace!($($args)*);
        }
    };
}

pub(crate) use trace_token;
