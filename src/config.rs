use anyhow::Result;
use std::path::{Path, PathBuf};

const DATA_DIR: &str = "data";
const DB_FILE: &str = "expenses.db";
const LOG_FILE: &str = "app.log";

/// Where the database and log file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

impl Config {
    /// Defaults rooted at `root`: `<root>/data/expenses.db` and `<root>/app.log`.
    pub(crate) fn rooted_at(root: &Path) -> Self {
        Self {
            db_path: root.join(DATA_DIR).join(DB_FILE),
            log_path: root.join(LOG_FILE),
        }
    }

    /// Pull `--db <path>` and `--log <path>` out of `args`, wherever they
    /// appear, and return the config along with the remaining arguments.
    /// `args[0]` (the program name) is kept.
    pub(crate) fn from_args(args: &[String], root: &Path) -> Result<(Self, Vec<String>)> {
        let mut config = Self::rooted_at(root);
        let mut rest = Vec::with_capacity(args.len());
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--db" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--db requires a path"))?;
                    config.db_path = PathBuf::from(value);
                }
                "--log" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--log requires a path"))?;
                    config.log_path = PathBuf::from(value);
                }
                _ => rest.push(arg.clone()),
            }
        }

        Ok((config, rest))
    }
}

/// The directory the executable lives in. Falls back to the platform data
/// directory, then to the working directory.
pub(crate) fn install_root() -> PathBuf {
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        return dir;
    }
    if let Some(dirs) = directories::ProjectDirs::from("com", "expense-tracker", "ExpenseTracker") {
        return dirs.data_dir().to_path_buf();
    }
    PathBuf::from(".")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
