/// Filename helpers for uploaded documents

/// Suffix of the final path component including the leading dot.
///
/// Only `/` separates components; a backslash is part of the name.
/// Dotfiles (`.bashrc`), `..` and names without a dot have no extension.
pub fn extension_of(name: &str) -> &str {
    let trimmed = name.trim_end_matches('/');
    let base = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if base == ".." {
        return "";
    }
    match base.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &base[idx..],
    }
}

/// Repair a filename whose UTF-8 bytes were decoded as Latin-1 upstream.
///
/// Every char is narrowed to its low byte and the byte string is decoded
/// as UTF-8, with invalid sequences replaced.
pub fn redecode_latin1(name: &str) -> String {
    let bytes: Vec<u8> = name.chars().map(|c| c as u32 as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}
