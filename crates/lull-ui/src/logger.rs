//! `log` facade bridge.
//!
//! A `cdylib` gets its own copy of the `log` statics, so records emitted
//! here would never reach the host's logger. [`HostScope`] points a small
//! forwarding logger at the host's callback table for the duration of one
//! update call. The pointer is per thread and needs no destructor, so an
//! unloaded image leaves nothing behind in thread-local storage.

use std::cell::Cell;
use std::sync::Once;

use log::{Level, LevelFilter, Metadata, Record};
use lull_api::{HostApi, LogLevel};

thread_local! {
    static HOST: Cell<*const HostApi> = const { Cell::new(std::ptr::null()) };
    static FORWARDING: Cell<bool> = const { Cell::new(false) };
}
static INSTALL: Once = Once::new();
static LOGGER: HostLogger = HostLogger;

struct HostLogger;

impl log::Log for HostLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        !HOST.get().is_null()
    }

    fn log(&self, record: &Record<'_>) {
        let host = HOST.get();
        // SAFETY: non-null only while a `HostScope` is alive, and the host
        // keeps its table alive for the whole update call.
        let Some(host) = (unsafe { host.as_ref() }) else {
            return;
        };
        // Linked in-process next to the host, the host re-emits through this
        // same logger.
        if FORWARDING.replace(true) {
            return;
        }
        let msg = record.args().to_string();
        host.log(level(record.level()), &msg);
        FORWARDING.set(false);
    }

    fn flush(&self) {}
}

fn level(level: Level) -> LogLevel {
    match level {
        Level::Error => LogLevel::Error,
        Level::Warn => LogLevel::Warn,
        Level::Info => LogLevel::Info,
        Level::Debug => LogLevel::Debug,
        Level::Trace => LogLevel::Trace,
    }
}

/// Routes `log` records to `host` until dropped.
pub(crate) struct HostScope(());

impl HostScope {
    pub(crate) fn enter(host: *const HostApi) -> Self {
        INSTALL.call_once(|| {
            // Fails when another logger owns the facade (the module linked
            // into the host process); records then go there directly.
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(LevelFilter::Debug);
            }
        });
        HOST.set(host);
        HostScope(())
    }
}

impl Drop for HostScope {
    fn drop(&mut self) {
        HOST.set(std::ptr::null());
    }
}
