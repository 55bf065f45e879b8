use std::path::{Component, Path, PathBuf};

/// Drop `.` components so `./app`, `app/.` and `app` compare equal.
/// An empty result means the current directory.
pub fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Number of directories between `root` and the file, counted by path
/// component so the separator style of the input never matters.
///
/// Returns `None` when `path` does not live below `root`.
pub fn directory_depth(path: &Path, root: &Path) -> Option<usize> {
    let path = normalize(path);
    let root = normalize(root);
    let rel = path.strip_prefix(&root).ok()?;
    let depth = rel
        .parent()
        .map(|dir| {
            dir.components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .count()
        })
        .unwrap_or(0);
    Some(depth)
}

/// `../` repeated `depth - offset` times.
///
/// Returns `None` when the file is shallower than `offset`; such files do not
/// follow the assumed layout and get no import.
pub fn relative_prefix(depth: usize, offset: usize) -> Option<String> {
    depth.checked_sub(offset).map(|ups| "../".repeat(ups))
}
