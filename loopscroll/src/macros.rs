#[cfg(feature = "tracing")]
macro_rules! lstrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "loopscroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lstrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! lsdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "loopscroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lsdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! lswarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "loopscroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lswarn {
    ($($tt:tt)*) => {};
}
