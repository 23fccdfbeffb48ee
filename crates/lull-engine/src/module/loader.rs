use std::fs;
use std::path::{Path, PathBuf};

use libloading::Library;
use lull_api::{
    ApiVersionFn, GetVtableV0Fn, VtableV0, API_VERSION_SYMBOL, KNOWN_VERSIONS, VTABLE_V0_SYMBOL,
};

use super::error::{ModuleError, ModuleResult};
use super::record::ModuleTable;

/// Platform file name for a module called `name` (`libname.so`, `name.dll`,
/// `libname.dylib`).
pub fn dylib_file_name(name: &str) -> String {
    format!(
        "{}{}{}",
        std::env::consts::DLL_PREFIX,
        name,
        std::env::consts::DLL_SUFFIX
    )
}

/// The directory containing the running executable; cargo places cdylib
/// outputs next to the host binary.
pub fn modules_dir_near_exe() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

/// Where generation `generation` of `source` is staged before opening.
///
/// Each generation gets its own file so the build can overwrite `source`
/// while a copy is mapped, and so the platform loader never hands back a
/// cached handle for a path it has already seen.
pub(super) fn shadow_path(source: &Path, generation: u64) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "module".to_owned());
    let ext = source
        .extension()
        .map(|s| format!(".{}", s.to_string_lossy()))
        .unwrap_or_default();
    std::env::temp_dir()
        .join(format!("lull-{}", std::process::id()))
        .join(format!("{stem}.{generation}{ext}"))
}

/// Copies `source` to `shadow`, opens the copy and resolves its table.
pub(super) fn open(source: &Path, shadow: &Path) -> ModuleResult<(Library, ModuleTable)> {
    if !source.is_file() {
        return Err(ModuleError::NotFound(source.to_path_buf()));
    }

    let stage_err = |source_err| ModuleError::Stage {
        from: source.to_path_buf(),
        to: shadow.to_path_buf(),
        source: source_err,
    };
    if let Some(dir) = shadow.parent() {
        fs::create_dir_all(dir).map_err(stage_err)?;
    }
    fs::copy(source, shadow).map_err(stage_err)?;

    // SAFETY: loading runs the library's initializers. Modules are trusted
    // build outputs of this workspace.
    let lib = unsafe { Library::new(shadow) }.map_err(|e| ModuleError::Open {
        path: shadow.to_path_buf(),
        source: e,
    })?;

    let table = resolve(&lib, source)?;
    Ok((lib, table))
}

fn resolve(lib: &Library, path: &Path) -> ModuleResult<ModuleTable> {
    // Modules predating the version export are v0.
    let version = match unsafe { lib.get::<ApiVersionFn>(API_VERSION_SYMBOL) } {
        Ok(sym) => unsafe { (*sym)() },
        Err(_) => VtableV0::VERSION,
    };
    check_version(path, version)?;

    let getter: GetVtableV0Fn = unsafe { lib.get::<GetVtableV0Fn>(VTABLE_V0_SYMBOL) }
        .map(|sym| *sym)
        .map_err(|_| ModuleError::MissingSymbol {
            path: path.to_path_buf(),
            symbol: "ui_get_vtable_0",
        })?;

    check_table(path, unsafe { getter() })
}

/// Rejects ABI versions this host has no dispatch arm for.
pub(super) fn check_version(path: &Path, version: u32) -> ModuleResult<()> {
    if KNOWN_VERSIONS.contains(&version) {
        return Ok(());
    }
    Err(ModuleError::UnsupportedVersion {
        path: path.to_path_buf(),
        version,
        known: KNOWN_VERSIONS,
    })
}

/// The v0 getter must hand back a table tagged v0.
pub(super) fn check_table(path: &Path, table: VtableV0) -> ModuleResult<ModuleTable> {
    if table.version != VtableV0::VERSION {
        return Err(ModuleError::TableMismatch {
            path: path.to_path_buf(),
            expected: VtableV0::VERSION,
            found: table.version,
        });
    }
    Ok(ModuleTable::V0(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dylib_name_uses_platform_affixes() {
        let n = dylib_file_name("lull_ui");
        assert!(n.contains("lull_ui"));
        assert!(n.ends_with(std::env::consts::DLL_SUFFIX));
        assert!(n.starts_with(std::env::consts::DLL_PREFIX));
    }

    #[test]
    fn shadow_paths_differ_per_generation() {
        let src = Path::new("/tmp/build/liblull_ui.so");
        let a = shadow_path(src, 1);
        let b = shadow_path(src, 2);
        assert_ne!(a, b);
        assert_eq!(a.extension().and_then(|e| e.to_str()), Some("so"));
        assert!(a.to_string_lossy().contains("liblull_ui.1"));
    }

    #[test]
    fn missing_source_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("absent.so");
        let err = open(&src, &dir.path().join("shadow.so")).unwrap_err();
        assert!(matches!(err, ModuleError::NotFound(_)));
    }

    #[test]
    fn garbage_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join(dylib_file_name("garbage"));
        fs::write(&src, b"definitely not a shared object").unwrap();
        let shadow = dir.path().join("stage").join(dylib_file_name("garbage"));
        let err = open(&src, &shadow).unwrap_err();
        assert!(matches!(err, ModuleError::Open { .. }));
        assert!(shadow.is_file());
    }

    // ── version checks ────────────────────────────────────────────────────

    #[test]
    fn known_version_passes() {
        assert!(check_version(Path::new("m.so"), VtableV0::VERSION).is_ok());
    }

    #[test]
    fn unknown_version_is_its_own_error() {
        let err = check_version(Path::new("m.so"), 7).unwrap_err();
        assert!(matches!(err, ModuleError::UnsupportedVersion { version: 7, .. }));
        assert!(err.to_string().contains("ABI version 7"));
    }

    #[test]
    fn mismatched_table_tag_is_rejected() {
        let table = VtableV0 { version: 3, update: None };
        let err = check_table(Path::new("m.so"), table).unwrap_err();
        assert!(matches!(err, ModuleError::TableMismatch { expected: 0, found: 3, .. }));
    }

    #[test]
    fn v0_table_is_accepted() {
        let table = VtableV0 { version: VtableV0::VERSION, update: None };
        let resolved = check_table(Path::new("m.so"), table).unwrap();
        assert_eq!(resolved.version(), Some(VtableV0::VERSION));
    }
}
