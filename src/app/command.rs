use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadNote(PathBuf),
    SaveNote(PathBuf, String, u64), // Path, contents, document generation
    LoadImage(PathBuf),
    SaveRecentFiles(PathBuf, Vec<PathBuf>), // Config file, list to write
}
