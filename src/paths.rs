/// Mount point under which the guest shell exposes host drives.
pub const GUEST_MOUNT_ROOT: &str = "/mnt";

/// Convert a host path into the path the guest shell sees.
/// Backslashes become forward slashes, and a leading `X:` drive prefix is mapped to
/// `/mnt/x`. Anything else is passed through; the path is never checked for existence.
pub fn to_guest_path(host_path: &str) -> String {
    let path = normalize_separators(host_path);
    match path.as_bytes() {
        [drive, b':', ..] if drive.is_ascii_alphabetic() => {
            format!("{}/{}{}", GUEST_MOUNT_ROOT, drive.to_ascii_lowercase() as char, &path[2..])
        },
        _ => path,
    }
}

/// Replace host separators with forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Last `/`-separated component of a guest path.
pub fn file_name(guest_path: &str) -> &str {
    let trimmed = guest_path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, name)) => name,
        None => trimmed,
    }
}

/// Single-quote a string for a POSIX shell.
pub fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_letter_is_mounted() {
        assert_eq!(to_guest_path(r"D:\Data\mesh.msh"), "/mnt/d/Data/mesh.msh");
        assert_eq!(to_guest_path(r"c:\Users\me\case"), "/mnt/c/Users/me/case");
    }

    #[test]
    fn relative_paths_only_get_separators_fixed() {
        assert_eq!(to_guest_path(r"cases\pipe\mesh.msh"), "cases/pipe/mesh.msh");
        assert_eq!(to_guest_path("/home/user/case"), "/home/user/case");
    }

    #[test]
    fn malformed_input_still_translates() {
        assert_eq!(to_guest_path(":odd"), ":odd");
        assert_eq!(to_guest_path(""), "");
        assert_eq!(to_guest_path("D:"), "/mnt/d");
    }

    #[test]
    fn colon_outside_drive_prefix_is_kept() {
        assert_eq!(to_guest_path("/data/run:2/case"), "/data/run:2/case");
        assert_eq!(to_guest_path(r"cases\v1:final\mesh.msh"), "cases/v1:final/mesh.msh");
        assert_eq!(to_guest_path("ab:/x"), "ab:/x");
        assert_eq!(to_guest_path("1:/x"), "1:/x");
    }

    #[test]
    fn spaces_survive_translation() {
        assert_eq!(to_guest_path(r"E:\My Cases\run 1"), "/mnt/e/My Cases/run 1");
    }

    #[test]
    fn file_name_takes_last_component() {
        assert_eq!(file_name("/mnt/d/Data/mesh.msh"), "mesh.msh");
        assert_eq!(file_name("mesh.msh"), "mesh.msh");
        assert_eq!(file_name("/mnt/d/case/"), "case");
    }

    #[test]
    fn quoting_escapes_single_quotes() {
        assert_eq!(shell_quote("/mnt/d/My Case"), "'/mnt/d/My Case'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
