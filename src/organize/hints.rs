//! Actionable hints for the I/O failures the mover logs.
//!
//! Rename and mkdir failures are per-file skips, so the log line is the only
//! place a user learns why a file stayed put. Attach a short platform-aware hint
//! keyed off the raw OS code, falling back to `ErrorKind`.

use std::io;

/// Short explanation for `e`, if we have one.
pub fn io_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error()
        && let Some(h) = os_code_hint(code)
    {
        return Some(h);
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("source vanished since the directory was listed"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

#[cfg(unix)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
        libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
        libc::EBUSY => Some("resource busy; another process may be using the file"),
        libc::ENOENT => Some("source vanished since the directory was listed"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EROFS => Some("read-only filesystem"),
        libc::ENAMETOOLONG => Some("filename or path too long"),
        libc::ENOTDIR => Some("a path component is a file, not a directory"),
        _ => None,
    }
}

#[cfg(windows)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),                 // ERROR_ACCESS_DENIED
        17 => Some("not same device; atomic rename not possible"),     // ERROR_NOT_SAME_DEVICE
        32 => Some("sharing violation; file is in use"),               // ERROR_SHARING_VIOLATION
        2 | 3 => Some("source vanished since the directory was listed"), // FILE/PATH NOT FOUND
        112 => Some("insufficient disk space"),                        // ERROR_DISK_FULL
        206 => Some("filename or path too long"),                      // ERROR_FILENAME_EXCED_RANGE
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_code_hint(_code: i32) -> Option<&'static str> {
    None
}
