use bookshelf::infrastructure::DEFAULT_LIBRARY_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "Personal library manager for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON file holding the library; rewritten after every change
    #[arg(short, long, env = "BOOKSHELF_LIBRARY", default_value = DEFAULT_LIBRARY_FILE)]
    pub library: PathBuf,

    /// File that receives log output
    #[arg(long, default_value = "bookshelf.log")]
    pub log_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["bookshelf"]).unwrap();
        assert_eq!(cli.log_file, PathBuf::from("bookshelf.log"));
    }

    #[test]
    fn test_library_default_value() {
        // read from the definition so BOOKSHELF_LIBRARY in the environment
        // cannot mask it
        let command = Cli::command();
        let library = command
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == "library")
            .unwrap();
        let defaults: Vec<Option<&str>> = library
            .get_default_values()
            .iter()
            .map(|value| value.to_str())
            .collect();
        assert_eq!(defaults, vec![Some("library.txt")]);
        assert_eq!(
            library.get_env(),
            Some(std::ffi::OsStr::new("BOOKSHELF_LIBRARY"))
        );
    }

    #[test]
    fn test_explicit_paths() {
        let cli = Cli::try_parse_from([
            "bookshelf",
            "--library",
            "books.json",
            "--log-file",
            "/tmp/b.log",
        ])
        .unwrap();
        assert_eq!(cli.library, PathBuf::from("books.json"));
        assert_eq!(cli.log_file, PathBuf::from("/tmp/b.log"));
    }
}
