//! Win32 registry hive backend.
//!
//! Owns the raw registry FFI for the two font keys. All `unsafe` in the crate
//! that touches the registry lives here.

// This module owns an intentional OS/FFI boundary.
#![allow(unsafe_code)]

use crate::config::RegistryConfig;
use crate::error::{FontError, Result};
use crate::hive::RegistryHive;
use crate::types::Scope;
use windows_sys::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS,
};
use windows_sys::Win32::System::Registry::{
    RegCloseKey, RegDeleteValueW, RegEnumValueW, RegOpenKeyExW, RegSetValueExW, HKEY,
    HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_SET_VALUE, REG_EXPAND_SZ, REG_SZ,
};

/// Registry value names are capped at 16383 characters.
const MAX_VALUE_NAME_CHARS: usize = 16_384;

/// The real font registry key for one scope: HKLM for `System`, HKCU for
/// `User`, both at the same subkey.
pub struct WindowsHive {
    scope: Scope,
}

impl WindowsHive {
    pub fn new(scope: Scope) -> Self {
        Self { scope }
    }

    fn root(&self) -> HKEY {
        match self.scope {
            Scope::System => HKEY_LOCAL_MACHINE,
            Scope::User => HKEY_CURRENT_USER,
        }
    }

    /// Open the fonts key with the given access rights.
    fn open(&self, access: u32) -> Result<OpenKey> {
        let subkey = to_wide(RegistryConfig::FONTS_SUBKEY);
        let mut handle: HKEY = std::ptr::null_mut();
        // SAFETY: subkey is a valid nul-terminated wide string and handle is a
        // valid out-pointer for the duration of the call.
        let status =
            unsafe { RegOpenKeyExW(self.root(), subkey.as_ptr(), 0, access, &mut handle) };
        match status {
            ERROR_SUCCESS => Ok(OpenKey(handle)),
            ERROR_ACCESS_DENIED => Err(FontError::privilege(self.scope)),
            code => Err(FontError::Registry {
                message: format!(
                    "Failed to open the {} fonts key (code {})",
                    self.scope, code
                ),
            }),
        }
    }
}

impl RegistryHive for WindowsHive {
    fn enumerate(&self) -> Result<Vec<(String, String)>> {
        let key = self.open(KEY_READ)?;
        let mut values = Vec::new();
        let mut data: Vec<u8> = vec![0; 1024];
        let mut index = 0u32;

        loop {
            let mut name = vec![0u16; MAX_VALUE_NAME_CHARS];
            let mut name_len = name.len() as u32;
            let mut value_type = 0u32;
            let mut data_len = data.len() as u32;

            // SAFETY: all buffers live across the call and the length
            // pointers describe their real capacities.
            let status = unsafe {
                RegEnumValueW(
                    key.0,
                    index,
                    name.as_mut_ptr(),
                    &mut name_len,
                    std::ptr::null(),
                    &mut value_type,
                    data.as_mut_ptr(),
                    &mut data_len,
                )
            };

            match status {
                ERROR_SUCCESS => {
                    // The fonts key only meaningfully holds string values;
                    // anything else is skipped.
                    if value_type == REG_SZ || value_type == REG_EXPAND_SZ {
                        let value_name = String::from_utf16_lossy(&name[..name_len as usize]);
                        let value_data = wide_bytes_to_string(&data[..data_len as usize]);
                        values.push((value_name, value_data));
                    }
                    index += 1;
                }
                ERROR_MORE_DATA => {
                    // Grow the data buffer and retry the same index.
                    data.resize(data_len as usize, 0);
                }
                ERROR_NO_MORE_ITEMS => break,
                code => {
                    return Err(FontError::Registry {
                        message: format!(
                            "Failed to enumerate the {} fonts key at index {} (code {})",
                            self.scope, index, code
                        ),
                    })
                }
            }
        }

        Ok(values)
    }

    fn set_value(&self, name: &str, data: &str) -> Result<()> {
        let key = self.open(KEY_SET_VALUE)?;
        let wide_name = to_wide(name);
        let wide_data = to_wide(data);
        let byte_len = (wide_data.len() * 2) as u32;

        // SAFETY: wide_data is a valid buffer of byte_len bytes including the
        // terminating nul, as REG_SZ requires.
        let status = unsafe {
            RegSetValueExW(
                key.0,
                wide_name.as_ptr(),
                0,
                REG_SZ,
                wide_data.as_ptr().cast::<u8>(),
                byte_len,
            )
        };
        match status {
            ERROR_SUCCESS => Ok(()),
            ERROR_ACCESS_DENIED => Err(FontError::privilege(self.scope)),
            code => Err(FontError::Registry {
                message: format!("Failed to write registry value \"{}\" (code {})", name, code),
            }),
        }
    }

    fn delete_value(&self, name: &str) -> Result<()> {
        let key = self.open(KEY_SET_VALUE)?;
        let wide_name = to_wide(name);

        // SAFETY: wide_name is a valid nul-terminated wide string.
        let status = unsafe { RegDeleteValueW(key.0, wide_name.as_ptr()) };
        match status {
            ERROR_SUCCESS => Ok(()),
            ERROR_FILE_NOT_FOUND => Err(FontError::RegistryEntryMissing {
                name: name.to_string(),
            }),
            ERROR_ACCESS_DENIED => Err(FontError::privilege(self.scope)),
            code => Err(FontError::Registry {
                message: format!(
                    "Failed to delete registry value \"{}\" (code {})",
                    name, code
                ),
            }),
        }
    }
}

/// Owned key handle, closed on drop.
struct OpenKey(HKEY);

impl Drop for OpenKey {
    fn drop(&mut self) {
        // SAFETY: the handle was returned by a successful RegOpenKeyExW and is
        // closed exactly once.
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode a REG_SZ byte payload: UTF-16LE, possibly nul-terminated.
fn wide_bytes_to_string(bytes: &[u8]) -> String {
    let wide: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&c| c != 0)
        .collect();
    String::from_utf16_lossy(&wide)
}
