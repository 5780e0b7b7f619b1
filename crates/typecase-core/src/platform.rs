//! Platform probes.

// This module owns an intentional OS/FFI boundary.
#![allow(unsafe_code)]

/// Check whether the current process runs with administrator privileges.
///
/// System-scope mutations will fail with `ElevationRequired` without them;
/// hosts can probe this up front and warn instead of attempting the write.
///
/// # Platform Behavior
/// - **Windows**: `IsUserAnAdmin` shell check
/// - **Other**: always `false` (no Windows font store to elevate for)
pub fn is_elevated() -> bool {
    #[cfg(windows)]
    {
        use windows_sys::Win32::UI::Shell::IsUserAnAdmin;
        // SAFETY: no arguments, no pointers; plain bool-returning shell call.
        unsafe { IsUserAnAdmin() != 0 }
    }

    #[cfg(not(windows))]
    {
        false
    }
}
