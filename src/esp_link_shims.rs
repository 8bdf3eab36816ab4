//! ESP-IDF symbol providers for the embassy time and critical-section
//! crates.
//!
//! `async-io-mini`'s `Timer` sits on `embassy-time`, which expects the
//! binary to supply a time driver.  The I/O task's read deadline and the
//! actuator's sleep-until-next-timer both depend on it.  Host builds get
//! the `std` driver from `embassy-time` instead.

use core::cell::{Cell, RefCell};
use core::task::Waker;
use core::time::Duration;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Stack for the short-lived wake threads.
const WAKE_THREAD_STACK: usize = 3 * 1024;

static CRITICAL_SECTION: Mutex<()> = Mutex::new(());

thread_local! {
    static DEPTH: Cell<u8> = const { Cell::new(0) };
    static GUARD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            let lock = CRITICAL_SECTION.lock().unwrap_or_else(PoisonError::into_inner);
            GUARD.with(|guard| *guard.borrow_mut() = Some(lock));
        }
        let d = d.saturating_add(1);
        depth.set(d);
        d
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    DEPTH.with(|depth| match depth.get() {
        0 => {}
        1 => {
            depth.set(0);
            GUARD.with(|guard| *guard.borrow_mut() = None);
        }
        d => depth.set(d - 1),
    });
}

/// Microseconds since boot (`embassy-time` runs at 1 MHz).
#[unsafe(no_mangle)]
pub extern "C" fn _embassy_time_now() -> u64 {
    // SAFETY: esp_timer_get_time has no preconditions once the scheduler runs.
    unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 }
}

/// Wake `waker` at tick `at`.  Each registration gets its own sleeper
/// thread; if one cannot be spawned the waker fires immediately and the
/// timer re-registers on its next poll.
#[unsafe(no_mangle)]
pub extern "C" fn _embassy_time_schedule_wake(at: u64, waker: *mut core::ffi::c_void) {
    if waker.is_null() {
        return;
    }
    // SAFETY: embassy-time passes a pointer to a live `Waker` for the
    // duration of this call; it is cloned before returning.
    let waker = unsafe { (*(waker as *const Waker)).clone() };

    let sleeper = waker.clone();
    let spawned = std::thread::Builder::new()
        .stack_size(WAKE_THREAD_STACK)
        .spawn(move || {
            let now = _embassy_time_now();
            if at > now {
                std::thread::sleep(Duration::from_micros(at - now));
            }
            sleeper.wake();
        });
    if spawned.is_err() {
        log::warn!("timer: wake thread spawn failed, waking now");
        waker.wake();
    }
}
