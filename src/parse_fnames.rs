use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

const DOCS_PATH: &str = "docs.gl/sl4";
const EXTENSION: &str = "xhtml";

/// `docs.gl/sl4`, next to the running executable.
pub fn default_input_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();

    Ok(dir.join(DOCS_PATH))
}

/// Every `.xhtml` page directly inside `dir`, in a stable order.
pub fn parse_fnames(dir: &Path) -> io::Result<BTreeSet<PathBuf>> {
    let mut output = BTreeSet::new();
    for file in fs::read_dir(dir)? {
        let path = file?.path();
        if path.is_file() && path.extension().map(|e| e == EXTENSION).unwrap_or_default() {
            output.insert(path);
        }
    }

    Ok(output)
}
