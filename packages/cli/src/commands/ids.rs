use crate::config::load_config;
use crate::errors::CliError;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use storefront_content::markup_scan;
use storefront_editor::{scan_selectable, LiveDocument};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct IdsArgs {
    /// Template markup file or directory of .html files (defaults to the catalog)
    pub path: Option<PathBuf>,

    /// Only print elements whose ids disagree
    #[arg(long)]
    pub mismatches: bool,
}

/// One element as both halves of the identity contract see it
#[derive(Debug, Clone, PartialEq)]
pub struct IdRow {
    pub tag: String,
    pub tree_id: Option<String>,
    pub markup_id: Option<String>,
}

impl IdRow {
    pub fn agrees(&self) -> bool {
        self.tree_id.is_some() && self.tree_id == self.markup_id
    }
}

/// Pair the live tree's ids with the markup scanner's, in document order
pub fn compare_ids(markup: &str) -> Vec<IdRow> {
    let doc = LiveDocument::parse(markup);
    let tree = scan_selectable(&doc);
    let scanned = markup_scan::scan_selectable(markup);

    let len = tree.len().max(scanned.len());
    (0..len)
        .map(|i| {
            let tree_entry = tree.get(i).map(|n| &n.identified);
            let scan_entry = scanned.get(i).map(|s| &s.identified);
            IdRow {
                tag: tree_entry
                    .or(scan_entry)
                    .map(|e| e.descriptor.tag.clone())
                    .unwrap_or_default(),
                tree_id: tree_entry.map(|e| e.id.as_str().to_string()),
                markup_id: scan_entry.map(|e| e.id.as_str().to_string()),
            }
        })
        .collect()
}

fn find_html_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "html"))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn print_rows(label: &str, rows: &[IdRow], mismatches_only: bool) -> usize {
    let bad = rows.iter().filter(|r| !r.agrees()).count();
    let status = if bad == 0 { "✓".green() } else { "✗".red() };
    println!("{} {} ({} elements)", status, label.bright_white().bold(), rows.len());

    for row in rows {
        if row.agrees() {
            if !mismatches_only {
                println!("    {:<8} {}", row.tag, row.tree_id.as_deref().unwrap_or_default());
            }
        } else {
            println!(
                "    {:<8} {} {} tree={} markup={}",
                row.tag,
                "≠".red(),
                "mismatch".red(),
                row.tree_id.as_deref().unwrap_or("-"),
                row.markup_id.as_deref().unwrap_or("-")
            );
        }
    }
    bad
}

pub fn ids(args: IdsArgs, config: Option<&Path>, cwd: &Path) -> Result<()> {
    let mut inputs: Vec<(String, String)> = Vec::new();

    match &args.path {
        Some(path) => {
            let path = cwd.join(path);
            if path.is_file() {
                inputs.push((path.display().to_string(), fs::read_to_string(&path)?));
            } else if path.is_dir() {
                for file in find_html_files(&path) {
                    let label = file.strip_prefix(&path).unwrap_or(&file).display().to_string();
                    inputs.push((label, fs::read_to_string(&file)?));
                }
            } else {
                return Err(CliError::MissingInput(path).into());
            }
        }
        None => {
            let catalog = load_config(config, cwd)?.catalog();
            for key in catalog.keys() {
                inputs.push((key.to_string(), catalog.load(*key)?.raw_markup));
            }
        }
    }

    if inputs.is_empty() {
        println!("{}", "⚠️  No .html files found".yellow());
        return Ok(());
    }

    let mut mismatched = 0;
    for (label, markup) in &inputs {
        mismatched += print_rows(label, &compare_ids(markup), args.mismatches);
    }

    if mismatched > 0 {
        return Err(CliError::IdMismatch { count: mismatched }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_templates::TemplateCatalog;

    #[test]
    fn test_catalog_templates_agree() {
        let catalog = TemplateCatalog::embedded();
        for key in catalog.keys() {
            let rows = compare_ids(&catalog.load(*key).unwrap().raw_markup);
            assert!(!rows.is_empty(), "{}", key);
            assert!(rows.iter().all(IdRow::agrees), "{}: {:?}", key, rows);
        }
    }

    #[test]
    fn test_duplicate_headings_get_suffixes() {
        let markup = "<html><body><h2>Shop</h2><h2>Shop</h2></body></html>";
        let rows = compare_ids(markup);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tree_id.as_deref(), Some("h2-shop"));
        assert_eq!(rows[1].tree_id.as_deref(), Some("h2-shop-2"));
        assert!(rows.iter().all(IdRow::agrees));
    }

    #[test]
    fn test_directory_walk() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.html"), "<html><body><h1>A</h1></body></html>").unwrap();
        fs::write(dir.path().join("nested/b.html"), "<html><body><p>B</p></body></html>").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let files = find_html_files(dir.path());
        assert_eq!(files.len(), 2);

        let args = IdsArgs {
            path: Some(dir.path().to_path_buf()),
            mismatches: true,
        };
        ids(args, None, dir.path()).unwrap();
    }
}
