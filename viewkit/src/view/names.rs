//! View name normalization and template discovery.
use std::fs::read_dir;
use std::path::Path;

/// Normalize a view name or template path.
///
/// Backslashes become `/`, a leading `/` is dropped, and a trailing
/// `extension` is stripped. The extension may be given with or without the dot.
///
/// ```
/// # use viewkit::view::names::normalize_file;
/// assert_eq!(normalize_file("/fruits.hbs", "hbs"), "fruits");
/// assert_eq!(normalize_file("layouts\\main.hbs", ".hbs"), "layouts/main");
/// assert_eq!(normalize_file("home", "html"), "home");
/// ```
pub fn normalize_file(path: &str, extension: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.strip_prefix('/').unwrap_or(&path);
    let extension = extension.trim_start_matches('.');

    if extension.is_empty() {
        return path.to_string();
    }

    match path.strip_suffix(&format!(".{}", extension)) {
        Some(stripped) => stripped.to_string(),
        None => path.to_string(),
    }
}

/// Normalize a folder so it always ends with `/` and never starts with one.
/// An empty folder stays empty.
pub fn normalize_folder(path: &str) -> String {
    let path = normalize_file(path, "");

    if path.is_empty() || path.ends_with('/') {
        path
    } else {
        format!("{}/", path)
    }
}

/// Find every template under `folder` with `extension` and return view names, sorted.
///
/// A missing folder has no templates.
pub fn discover(folder: impl AsRef<Path>, extension: &str) -> Result<Vec<String>, std::io::Error> {
    let folder = folder.as_ref();
    let mut views = vec![];

    if folder.is_dir() {
        walk(folder, folder, extension.trim_start_matches('.'), &mut views)?;
    }

    views.sort();
    Ok(views)
}

fn walk(
    root: &Path,
    dir: &Path,
    extension: &str,
    views: &mut Vec<String>,
) -> Result<(), std::io::Error> {
    for entry in read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            walk(root, &path, extension, views)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            if let Ok(relative) = path.strip_prefix(root) {
                views.push(normalize_file(&relative.to_string_lossy(), extension));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::{create_dir_all, write};
    use tempdir::TempDir;

    #[test]
    fn test_normalize_file() {
        assert_eq!(normalize_file("/home.html", ".html"), "home");
        assert_eq!(normalize_file("home.html.j2", "j2"), "home.html");
        assert_eq!(normalize_file("homehtml", "html"), "homehtml");
        assert_eq!(normalize_file("\\tera\\home", "html"), "tera/home");
    }

    #[test]
    fn test_normalize_folder() {
        assert_eq!(normalize_folder("/views"), "views/");
        assert_eq!(normalize_folder("views/"), "views/");
        assert_eq!(normalize_folder(""), "");
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new("views").unwrap();
        create_dir_all(dir.path().join("fruits")).unwrap();
        write(dir.path().join("home.hbs"), "").unwrap();
        write(dir.path().join("fruits/list.hbs"), "").unwrap();
        write(dir.path().join("notes.txt"), "").unwrap();

        assert_eq!(
            discover(dir.path(), ".hbs").unwrap(),
            vec!["fruits/list".to_string(), "home".to_string()]
        );
        assert!(discover(dir.path().join("missing"), "hbs").unwrap().is_empty());
    }
}
