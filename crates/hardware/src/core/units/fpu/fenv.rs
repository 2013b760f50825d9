//! Ambient floating-point environment.
//!
//! Each thread owns one environment holding the active rounding mode and
//! the set of exceptions raised since it was last cleared, mirroring the
//! control/status register of a hardware FPU. Soft-float operations read
//! the mode and raise flags here; execution units read the raised set back.
//!
//! Units never touch the environment directly. They enter an
//! [`FpEnvGuard`], which saves the caller's environment, installs the
//! requested mode with a clean flag set, and restores the saved
//! environment when dropped, whichever path the call leaves by.

use std::cell::Cell;
use std::marker::PhantomData;

use super::exception_flags::FpFlags;
use super::rounding_modes::RoundingMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FpEnv {
    rounding: RoundingMode,
    raised: FpFlags,
}

impl FpEnv {
    const RESET: Self = Self {
        rounding: RoundingMode::Rne,
        raised: FpFlags::NONE,
    };
}

thread_local! {
    static FP_ENV: Cell<FpEnv> = const { Cell::new(FpEnv::RESET) };
}

/// Returns the rounding mode currently installed on this thread.
pub fn rounding_mode() -> RoundingMode {
    FP_ENV.with(|env| env.get().rounding)
}

/// Installs `rm` as this thread's ambient rounding mode.
///
/// [`RoundingMode::Rmm`] is ignored.
pub fn set_rounding_mode(rm: RoundingMode) {
    if rm.is_installable() {
        FP_ENV.with(|env| {
            let mut state = env.get();
            state.rounding = rm;
            env.set(state);
        });
    }
}

/// Returns the exceptions raised on this thread since the last clear.
pub fn raised() -> FpFlags {
    FP_ENV.with(|env| env.get().raised)
}

/// Raises `flags` in this thread's environment.
pub fn raise(flags: FpFlags) {
    if flags.is_empty() {
        return;
    }
    FP_ENV.with(|env| {
        let mut state = env.get();
        state.raised |= flags;
        env.set(state);
    });
}

/// Clears every raised exception on this thread.
pub fn clear_raised() {
    FP_ENV.with(|env| {
        let mut state = env.get();
        state.raised = FpFlags::NONE;
        env.set(state);
    });
}

/// Scoped ownership of the thread's floating-point environment.
///
/// Not `Send`: the saved state belongs to the thread that entered it.
#[derive(Debug)]
#[must_use = "dropping the guard immediately restores the previous environment"]
pub struct FpEnvGuard {
    saved: FpEnv,
    _thread_bound: PhantomData<*const ()>,
}

impl FpEnvGuard {
    /// Saves the current environment, installs `rm` and clears the raised set.
    pub fn enter(rm: RoundingMode) -> Self {
        let saved = FP_ENV.with(Cell::get);
        let rounding = if rm.is_installable() { rm } else { saved.rounding };
        FP_ENV.with(|env| {
            env.set(FpEnv {
                rounding,
                raised: FpFlags::NONE,
            });
        });
        Self {
            saved,
            _thread_bound: PhantomData,
        }
    }

    /// Rounding mode in effect inside this scope.
    pub fn rounding(&self) -> RoundingMode {
        rounding_mode()
    }

    /// Exceptions raised inside this scope so far.
    pub fn raised(&self) -> FpFlags {
        raised()
    }
}

impl Drop for FpEnvGuard {
    fn drop(&mut self) {
        let saved = self.saved;
        FP_ENV.with(|env| env.set(saved));
    }
}
