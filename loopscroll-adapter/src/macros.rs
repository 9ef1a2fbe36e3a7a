#[cfg(feature = "tracing")]
macro_rules! ladebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "loopscroll_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ladebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! lawarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "loopscroll_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lawarn {
    ($($tt:tt)*) => {};
}
