#[cfg(test)]
use std::any::Any;

/// Asserts that running `$run` panics. When given a second argument, the panic message must also
/// contain it.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert!(
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(),
            "assertion failed to panic"
        );
        println!("^ panic caught");
    };
    ($run:block, $needle:expr) => {
        let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run))
            .expect_err("assertion failed to panic");
        let message = $crate::util::panic::panic_message(&*payload);
        assert!(
            message.contains($needle),
            "panic message {:?} doesn't mention {:?}",
            message,
            $needle
        );
        println!("^ panic caught");
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;

/// Extracts the message from a caught panic payload, for panics raised with a format string.
#[cfg(test)]
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    match payload.downcast_ref::<String>() {
        Some(message) => message,
        None => payload.downcast_ref::<&str>().copied().unwrap_or_default(),
    }
}
