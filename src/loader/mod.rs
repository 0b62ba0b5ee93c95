//! Dynamic loader
//!
//! Opens libX11 at runtime and resolves the whole symbol table against it.
//! Binding is all-or-nothing: if the library cannot be opened or any declared
//! symbol is absent, no [`Xlib`] is produced.

use crate::ffi::XlibFns;
use crate::xlib::Xlib;
use crate::{Error, Result};
use libloading::Library;
use std::env;
use std::os::raw::c_void;

/// Environment variable naming the library to load instead of the defaults.
pub const LIBRARY_ENV: &str = "XLIB_BIND_LIBRARY";

/// Library names tried in order when no override is given.
pub const DEFAULT_LIBRARIES: &[&str] = &["libX11.so", "libX11.so.6"];

/// Source of native entry point addresses.
pub trait SymbolResolver {
    /// Address of `name`, or `None` if the source does not export it.
    fn resolve(&self, name: &str) -> Option<*const c_void>;

    /// Human-readable name of the source, for error messages.
    fn describe(&self) -> String;
}

/// A shared library opened by the loader.
pub struct LoadedLibrary {
    name: String,
    library: Library,
}

impl LoadedLibrary {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SymbolResolver for LoadedLibrary {
    fn resolve(&self, name: &str) -> Option<*const c_void> {
        // The symbol is read as a data address; it is only reinterpreted as a
        // function pointer by `XlibFns::resolve`.
        unsafe {
            self.library
                .get::<*const c_void>(name.as_bytes())
                .ok()
                .map(|symbol| *symbol)
        }
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Which library to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Candidates, tried in order. The first that opens is bound.
    pub libraries: Vec<String>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            libraries: DEFAULT_LIBRARIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LoadConfig {
    /// Load exactly one library (a soname or a path).
    pub fn library(name: impl Into<String>) -> Self {
        LoadConfig {
            libraries: vec![name.into()],
        }
    }

    /// Defaults, unless `XLIB_BIND_LIBRARY` names a library.
    pub fn from_env() -> Self {
        Self::with_override(env::var(LIBRARY_ENV).ok())
    }

    fn with_override(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.trim().is_empty() => Self::library(name.trim()),
            _ => Self::default(),
        }
    }
}

impl Xlib {
    /// Load libX11 as configured by the environment.
    pub fn open() -> Result<Xlib> {
        Self::open_with(&LoadConfig::from_env())
    }

    /// Load the first candidate library that opens and bind every symbol.
    ///
    /// A library that opens but lacks symbols fails the load; later
    /// candidates are not tried.
    pub fn open_with(config: &LoadConfig) -> Result<Xlib> {
        let mut attempts = Vec::with_capacity(config.libraries.len());

        for name in &config.libraries {
            // Library initializers run here; libX11 has none with preconditions.
            let library = match unsafe { Library::new(name) } {
                Ok(library) => library,
                Err(e) => {
                    log::warn!("Could not open {}: {}", name, e);
                    attempts.push((name.clone(), e.to_string()));
                    continue;
                }
            };

            let library = LoadedLibrary {
                name: name.clone(),
                library,
            };
            let fns = unsafe { XlibFns::resolve(&library)? };
            log::debug!(
                "Bound {} Xlib symbols from {}",
                crate::ffi::SYMBOLS.len(),
                library.name
            );
            return Ok(Xlib {
                fns,
                library: Some(library),
            });
        }

        Err(Error::LibraryNotFound { attempts })
    }

    /// Bind every symbol through a caller-provided resolver.
    ///
    /// # Safety
    /// Every address the resolver returns must be a function with the C
    /// signature declared in [`SYMBOLS`](crate::SYMBOLS), and must stay valid
    /// for the lifetime of the returned `Xlib`.
    pub unsafe fn from_resolver<R: SymbolResolver + ?Sized>(resolver: &R) -> Result<Xlib> {
        let fns = XlibFns::resolve(resolver)?;
        log::debug!("Bound Xlib symbols from {}", resolver.describe());
        Ok(Xlib { fns, library: None })
    }
}


#[cfg(test)]
mod tests {
    use super::stub::StubResolver;
    use super::*;
    use crate::ffi::SYMBOLS;

    #[test]
    fn test_zeroed_stub_binds_everything() {
        let xlib = StubResolver::zeroed().load();
        assert!(xlib.library_name().is_none());
    }

    #[test]
    fn test_each_missing_symbol_fails_the_load() {
        for sig in SYMBOLS {
            let resolver = StubResolver::zeroed().without(sig.name);
            match unsafe { Xlib::from_resolver(&resolver) } {
                Err(Error::MissingSymbols { library, symbols }) => {
                    assert_eq!(library, "stub resolver");
                    assert_eq!(symbols, vec![sig.name]);
                }
                other => panic!("{} missing but load returned {:?}", sig.name, other),
            }
        }
    }

    #[test]
    fn test_all_missing_symbols_reported() {
        let resolver = StubResolver::zeroed()
            .without("XOpenDisplay")
            .without("XFree");
        let err = unsafe { Xlib::from_resolver(&resolver) }.unwrap_err();
        match err {
            Error::MissingSymbols { symbols, .. } => assert_eq!(symbols, vec!["XOpenDisplay", "XFree"]),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_null_address_counts_as_missing() {
        let resolver = StubResolver::zeroed().with("XMapWindow", std::ptr::null());
        assert!(unsafe { Xlib::from_resolver(&resolver) }.is_err());
    }

    #[test]
    fn test_missing_library() {
        let config = LoadConfig::library("libxlib-bind-does-not-exist.so");
        match Xlib::open_with(&config) {
            Err(Error::LibraryNotFound { attempts }) => {
                assert_eq!(attempts.len(), 1);
                assert_eq!(attempts[0].0, "libxlib-bind-does-not-exist.so");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_candidate_list() {
        let config = LoadConfig { libraries: Vec::new() };
        match Xlib::open_with(&config) {
            Err(Error::LibraryNotFound { attempts }) => assert!(attempts.is_empty()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_every_failed_candidate_keeps_its_reason() {
        let config = LoadConfig {
            libraries: vec![
                "libxlib-bind-missing-a.so".to_string(),
                "/nonexistent/libxlib-bind-missing-b.so".to_string(),
            ],
        };
        match Xlib::open_with(&config) {
            Err(Error::LibraryNotFound { attempts }) => {
                let names: Vec<&str> = attempts.iter().map(|(name, _)| name.as_str()).collect();
                assert_eq!(names, config.libraries);
                assert!(attempts.iter().all(|(_, reason)| !reason.is_empty()));
                assert!(attempts[1].1.contains("libxlib-bind-missing-b.so"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_config_override() {
        assert_eq!(LoadConfig::with_override(None), LoadConfig::default());
        assert_eq!(LoadConfig::with_override(Some("  ".to_string())), LoadConfig::default());
        assert_eq!(
            LoadConfig::with_override(Some("/opt/x11/lib/libX11.so.6".to_string())).libraries,
            vec!["/opt/x11/lib/libX11.so.6".to_string()]
        );
        assert_eq!(LoadConfig::default().libraries, vec!["libX11.so", "libX11.so.6"]);
    }
}
