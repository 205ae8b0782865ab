use std::{env, fs, io, path::PathBuf};

const HOME_ENV: &str = "IDEABOARD_HOME";
const LOG_ENV: &str = "IDEABOARD_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        let data_dir = env::var_os(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let log_filter = env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
        Self {
            data_dir,
            log_filter,
        }
    }

    pub(crate) fn db_path(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(self.data_dir.join("ideaboard.db"))
    }

    pub(crate) fn log_dir(&self) -> io::Result<PathBuf> {
        let dir = self.data_dir.join("logs");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

fn default_data_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".ideaboard")
}
