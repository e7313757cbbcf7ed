//! Capability probes for the local print environment.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::runner::ProcessRunner;

/// True when a `ps2pdf` converter is reachable on the search path.
pub fn ps2pdf_available<R: ProcessRunner>(runner: &R) -> bool {
    runner.find_executable("ps2pdf").is_some()
}

/// True when the `psselect` page-extraction filter is reachable on the
/// search path. Needed for page selection on plain LPR spoolers.
pub fn psselect_available<R: ProcessRunner>(runner: &R) -> bool {
    runner.find_executable("psselect").is_some()
}

/// Presence check for the local CUPS service, abstracted so job
/// submission tests can force either dialect.
pub trait ServicePresence {
    fn cups_available(&self) -> bool;
}

/// Probes the machine itself: first the IPP port, then the domain
/// socket, then the configuration file as a last resort for a daemon
/// that is installed but not currently listening.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalServices;

impl ServicePresence for LocalServices {
    fn cups_available(&self) -> bool {
        let ipp = std::net::SocketAddr::from(([127, 0, 0, 1], 631));
        if std::net::TcpStream::connect_timeout(&ipp, Duration::from_millis(500)).is_ok() {
            debug!("cups detected on port 631");
            return true;
        }
        #[cfg(unix)]
        {
            if std::os::unix::net::UnixStream::connect("/var/run/cups/cups.sock").is_ok() {
                debug!("cups detected on domain socket");
                return true;
            }
        }
        let configured = Path::new("/etc/cups/cupsd.conf").is_file();
        if configured {
            debug!("cups config present but daemon unreachable");
        }
        configured
    }
}
