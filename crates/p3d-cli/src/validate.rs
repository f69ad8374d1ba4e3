use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

/// Returns `true` if `path` ends in `.p3d`, ignoring case.
pub fn has_p3d_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("p3d"))
        .unwrap_or(false)
}

/// Check that every input exists and is a P3D file; returns absolute paths.
pub fn check_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    inputs
        .iter()
        .map(|input| {
            if !input.is_file() {
                bail!("could not find input path: {}", input.display());
            }
            if !has_p3d_extension(input) {
                bail!("input must be a P3D file: {}", input.display());
            }
            std::path::absolute(input)
                .with_context(|| format!("could not resolve input path: {}", input.display()))
        })
        .collect()
}

/// Check that the output can be written; returns the absolute path.
pub fn check_output(output: &Path) -> anyhow::Result<PathBuf> {
    let output = std::path::absolute(output)
        .with_context(|| format!("could not resolve output path: {}", output.display()))?;
    if !has_p3d_extension(&output) {
        bail!("output must be a P3D file: {}", output.display());
    }
    if let Some(dir) = output.parent() {
        if !dir.is_dir() {
            bail!("output directory {} doesn't exist", dir.display());
        }
    }
    if let Ok(meta) = std::fs::metadata(&output) {
        if meta.permissions().readonly() {
            bail!("output path {} is read only", output.display());
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert!(has_p3d_extension(Path::new("a.p3d")));
        assert!(has_p3d_extension(Path::new("dir/A.P3D")));
        assert!(!has_p3d_extension(Path::new("a.p3dz")));
        assert!(!has_p3d_extension(Path::new("p3d")));
    }

    #[test]
    fn inputs_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.p3d");
        let err = check_inputs(&[missing]).unwrap_err();
        assert!(err.to_string().starts_with("could not find input path"));
    }

    #[test]
    fn inputs_must_be_p3d() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, b"x").unwrap();
        let err = check_inputs(&[txt]).unwrap_err();
        assert!(err.to_string().starts_with("input must be a P3D file"));
    }

    #[test]
    fn valid_inputs_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.p3d");
        std::fs::write(&a, b"x").unwrap();
        let resolved = check_inputs(&[a.clone()]).unwrap();
        assert_eq!(resolved, vec![a]);
    }

    #[test]
    fn output_directory_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nope").join("out.p3d");
        let err = check_output(&out).unwrap_err();
        assert!(err.to_string().contains("doesn't exist"));
    }

    #[test]
    fn output_must_be_p3d() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_output(&dir.path().join("out.bin")).unwrap_err();
        assert!(err.to_string().starts_with("output must be a P3D file"));
    }

    #[test]
    fn read_only_output_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.p3d");
        std::fs::write(&out, b"x").unwrap();
        let mut perms = std::fs::metadata(&out).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(&out, perms).unwrap();

        let err = check_output(&out).unwrap_err();
        assert!(err.to_string().contains("read only"));
    }
}
