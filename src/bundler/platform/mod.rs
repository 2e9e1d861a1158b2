//! Platform packaging backends.
//!
//! Only Windows targets are produced: MSI installers via the WiX toolset and
//! chocolatey packages wrapping those installers.

pub mod windows;
