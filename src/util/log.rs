use super::Position;
use std::fmt::{Debug, Display, Formatter};

/// Verbosity knob for the scanner's rule dispatch and the compressor's
/// recorder activations, mirroring the teacher's own `util::logger::Log`.
/// Each variant beyond `None` carries a label (the crate uses `&'static str`)
/// printed ahead of every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

impl<T> Log<T> {
    /// Relative verbosity ordering; higher values print more.
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<TL: Display> Log<TL> {
    /// Print a successful rule/recorder match at `position`, gated to debug builds.
    pub fn log_success<T: Debug>(&self, position: Position, value: &T) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Success(()).order() {
            println!("[{}; success]: {:?} at {}", self, value, position);
        }
        #[cfg(not(debug_assertions))]
        let _ = (position, value);
    }

    /// Print a failed rule/recorder dispatch at `position`, gated to debug builds.
    pub fn log_failure(&self, position: Position) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Result(()).order() {
            println!("[{}; failure]: at {}", self, position);
        }
        #[cfg(not(debug_assertions))]
        let _ = position;
    }
}
