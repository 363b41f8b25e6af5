//! Naming of generated artifacts.
//!
//! Paths are handled as plain strings: output locations are derived by text
//! substitution on the caller's input paths, so `out` and `out/` must both
//! produce `out/<name>`.

use crate::TargetLanguage;

/// Last `/`-separated component of `path`.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Replace the extension of `file_name` (text after the last `.`), or append
/// one if there is none.
pub fn change_extension(file_name: &str, extension: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) => format!("{}.{}", &file_name[..dot], extension),
        None => format!("{}.{}", file_name, extension),
    }
}

/// `dir` with exactly one trailing slash appended when missing.
pub fn folder_with_slash(dir: &str) -> String {
    if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{}/", dir)
    }
}

/// Where the generated source for `input` is written under `output_dir`.
///
/// ```
/// use wyvern_core::{TargetLanguage, output_file_path};
///
/// let path = output_file_path("dumps/a.dump", "build", TargetLanguage::Kotlin);
/// assert_eq!(path, "build/a.kt");
/// ```
pub fn output_file_path(input: &str, output_dir: &str, language: TargetLanguage) -> String {
    let file_name = change_extension(base_name(input), language.extension());
    folder_with_slash(output_dir) + &file_name
}

/// Path of the compiled archive inside `output_dir`.
pub fn archive_path(output_dir: &str, language: TargetLanguage) -> String {
    folder_with_slash(output_dir) + language.archive_name()
}
