use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".chartbook";
const HOME_ENV: &str = "CHARTBOOK_HOME";
const DATA_DIR: &str = "data";
const CONFIG_DIR: &str = "config";
const STORE_FILE: &str = "books.json";
const CONFIG_FILE: &str = "config.json";

/// Application home: explicit override, then `CHARTBOOK_HOME`, then `~/.chartbook`.
pub fn app_home(override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the single-file store under `home`.
pub fn store_file_in(home: &Path) -> PathBuf {
    home.join(DATA_DIR).join(STORE_FILE)
}

/// Path of the configuration file under `home`.
pub fn config_file_in(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Reduces free text to a file-name friendly stem, keeping letters and digits.
pub fn file_stem_for(text: &str) -> String {
    let mut stem = String::new();
    let mut last_underscore = false;
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() {
            stem.push(ch);
            last_underscore = false;
        } else if !stem.is_empty() && !last_underscore {
            stem.push('_');
            last_underscore = true;
        }
    }
    let trimmed = stem.trim_matches('_');
    if trimmed.is_empty() {
        "report".into()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_environment() {
        let dir = PathBuf::from("/tmp/chartbook-override");
        assert_eq!(app_home(Some(dir.clone())), dir);
    }

    #[test]
    fn store_and_config_live_in_separate_folders() {
        let home = Path::new("/books");
        assert_eq!(store_file_in(home), Path::new("/books/data/books.json"));
        assert_eq!(config_file_in(home), Path::new("/books/config/config.json"));
    }

    #[test]
    fn file_stems_collapse_punctuation() {
        assert_eq!(file_stem_for("Acme S.A. de C.V."), "Acme_S_A_de_C_V");
        assert_eq!(file_stem_for("31/12/2024"), "31_12_2024");
        assert_eq!(file_stem_for("  ***  "), "report");
    }
}
