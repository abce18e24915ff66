//! Thread pinning for stable trial timings.
//!
//! On Linux the measuring thread is pinned with `sched_setaffinity` and the
//! previous mask is restored afterwards. Other platforms get a no-op guard.

#[cfg(target_os = "linux")]
mod platform {
    use std::cell::RefCell;

    thread_local! {
        static SAVED_MASK: RefCell<Option<libc::cpu_set_t>> = const { RefCell::new(None) };
    }

    pub fn online_cores() -> Option<usize> {
        let count = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        (count > 0).then_some(count as usize)
    }

    pub fn current_core() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    pub fn pin(core: usize) -> bool {
        unsafe {
            let mut saved: libc::cpu_set_t = std::mem::zeroed();
            if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut saved) != 0 {
                return false;
            }

            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core, &mut set);
            if libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) != 0 {
                return false;
            }

            SAVED_MASK.with(|cell| *cell.borrow_mut() = Some(saved));
            true
        }
    }

    pub fn unpin() -> bool {
        SAVED_MASK.with(|cell| match cell.borrow_mut().take() {
            Some(set) => unsafe {
                libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
            },
            None => false,
        })
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub fn online_cores() -> Option<usize> {
        None
    }
    pub fn current_core() -> Option<usize> {
        None
    }
    pub fn pin(_core: usize) -> bool {
        false
    }
    pub fn unpin() -> bool {
        true
    }
}

/// Number of online cores, if the platform reports it
pub fn online_cores() -> Option<usize> {
    platform::online_cores()
}

/// Pin the current thread to the core it is running on (or core 0).
///
/// Returns the pinned core, or `None` if pinning is unsupported or failed.
pub fn pin_to_current_core() -> Option<usize> {
    let core = platform::current_core().or_else(|| online_cores().map(|_| 0))?;
    platform::pin(core).then_some(core)
}

/// Restore the affinity saved by the last successful pin.
pub fn unpin() -> bool {
    platform::unpin()
}

/// Pins on creation, unpins on drop.
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
}

impl CpuPinGuard {
    pub fn new() -> Self {
        let pinned_core = pin_to_current_core();
        if pinned_core.is_none() {
            log::debug!("thread pinning unavailable; timings may include migrations");
        }
        Self { pinned_core }
    }

    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if self.pinned_core.is_some() {
            unpin();
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}
