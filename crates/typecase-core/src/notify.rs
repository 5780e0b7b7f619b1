//! Post-mutation change notification.
//!
//! After any successful install or uninstall the OS is told that the font set
//! changed. The call is strictly fire-and-forget: it returns nothing, uses a
//! bounded wait, and failures are logged and discarded. It must never
//! influence the caller's success/failure outcome.

// This module owns an intentional OS/FFI boundary.
#![allow(unsafe_code)]

use tracing::debug;

/// Hook invoked after every successful mutation.
pub trait ChangeNotifier: Send + Sync {
    /// Announce a font-set change. Best-effort, side-effect only.
    fn notify_font_change(&self);
}

/// The real OS notifier: broadcasts `WM_FONTCHANGE` to all top-level windows
/// on Windows, does nothing elsewhere.
#[derive(Debug, Default)]
pub struct SystemNotifier;

impl SystemNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl ChangeNotifier for SystemNotifier {
    fn notify_font_change(&self) {
        #[cfg(windows)]
        {
            use crate::config::NotifyConfig;
            use windows_sys::Win32::UI::WindowsAndMessaging::{
                SendMessageTimeoutW, HWND_BROADCAST, SMTO_ABORTIFHUNG, WM_FONTCHANGE,
            };

            let mut result: usize = 0;
            // SAFETY: broadcast with null parameters is the documented way to
            // announce a font change; result is a valid out-pointer. The
            // timeout bounds the wait if some broadcast target is hung.
            let sent = unsafe {
                SendMessageTimeoutW(
                    HWND_BROADCAST,
                    WM_FONTCHANGE,
                    0,
                    0,
                    SMTO_ABORTIFHUNG,
                    NotifyConfig::BROADCAST_TIMEOUT.as_millis() as u32,
                    &mut result,
                )
            };
            if sent == 0 {
                debug!("Font change broadcast timed out or failed; ignoring");
            }
        }

        #[cfg(not(windows))]
        {
            debug!("Font change broadcast skipped (no system notifier on this platform)");
        }
    }
}
