use anyhow::Result;
use std::path::Path;
use storefront_server::StorefrontConfig;

/// Load config from an explicit file or the working directory.
///
/// Relative paths inside the file resolve against the file's directory.
pub fn load_config(config: Option<&Path>, cwd: &Path) -> Result<StorefrontConfig> {
    Ok(match config {
        Some(path) => {
            let path = cwd.join(path);
            let base = path.parent().unwrap_or(cwd).to_path_buf();
            StorefrontConfig::load_file(&path)?.resolve_paths(&base)
        }
        None => StorefrontConfig::load(cwd)?.resolve_paths(cwd),
    })
}
