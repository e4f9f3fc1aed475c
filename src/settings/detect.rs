//! Guesses for settings left empty, probing well-known install locations.

/// Gmsh release the defaults point at.
const GMSH_DIR: &str = "gmsh-4.15.0-Windows64";

/// WSL distribution launched by the companion commands.
const WSL_DISTRIBUTION: &str = "DEXCS2025";

/// Guest user whose home is searched for `.bashrc`.
const GUEST_USER: &str = "jiedi";

/// Gmsh executable on `D:` or `C:`.
pub fn gmsh_path(exists: &dyn Fn(&str) -> bool) -> Option<String> {
    ['D', 'C']
        .iter()
        .map(|drive| format!("{}:\\{}\\gmsh.exe", drive, GMSH_DIR))
        .find(|path| exists(path))
}

/// `wslg.exe` launcher prefix, searched on `C:`, `D:` and `E:`.
pub fn wsl_base(exists: &dyn Fn(&str) -> bool) -> Option<String> {
    ['C', 'D', 'E']
        .iter()
        .map(|drive| format!("{}:\\Program Files\\WSL\\wslg.exe", drive))
        .find(|path| exists(path))
        .map(|path| format!("\"{}\" -d {}", path, WSL_DISTRIBUTION))
}

/// Guest `.bashrc` exposed as a mapped network drive, searched from `Z:` down to `H:`.
pub fn wsl_bashrc_path(exists: &dyn Fn(&str) -> bool) -> Option<String> {
    ('H'..='Z')
        .rev()
        .map(|drive| format!("{}:\\home\\{}\\.bashrc", drive, GUEST_USER))
        .find(|path| exists(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gmsh_prefers_d_drive() {
        let both = |path: &str| path.ends_with("gmsh.exe");
        assert_eq!(gmsh_path(&both).as_deref(), Some("D:\\gmsh-4.15.0-Windows64\\gmsh.exe"));

        let only_c = |path: &str| path.starts_with("C:");
        assert_eq!(gmsh_path(&only_c).as_deref(), Some("C:\\gmsh-4.15.0-Windows64\\gmsh.exe"));

        assert_eq!(gmsh_path(&|_: &str| false), None);
    }

    #[test]
    fn wsl_base_is_quoted_with_distribution() {
        let on_e = |path: &str| path.starts_with("E:");
        assert_eq!(
            wsl_base(&on_e).as_deref(),
            Some("\"E:\\Program Files\\WSL\\wslg.exe\" -d DEXCS2025")
        );
    }

    #[test]
    fn bashrc_search_starts_at_z() {
        let everywhere = |_: &str| true;
        assert_eq!(wsl_bashrc_path(&everywhere).as_deref(), Some("Z:\\home\\jiedi\\.bashrc"));
        let only_h = |path: &str| path.starts_with("H:");
        assert_eq!(wsl_bashrc_path(&only_h).as_deref(), Some("H:\\home\\jiedi\\.bashrc"));
        let only_g = |path: &str| path.starts_with("G:");
        assert_eq!(wsl_bashrc_path(&only_g), None);
    }
}
