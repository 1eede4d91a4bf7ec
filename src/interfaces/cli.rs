use crate::domain::model::ListKind;
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "cs")]
#[command(about = "Find movies from the command line.")]
#[command(version)]
pub struct Cli {
    /// Read queries line by line from stdin, as if typed into a search box
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Browse a catalog list instead of searching
    #[arg(short = 'l', long, value_enum)]
    pub list: Option<ListArg>,

    /// Page of the list to show
    #[arg(short = 'p', long, default_value_t = 1)]
    pub page: u32,

    /// Show details for a movie id
    #[arg(short = 'd', long)]
    pub details: Option<i64>,

    /// Override the search debounce delay (milliseconds)
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Query text
    #[arg(num_args = 1..)]
    pub query: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ListArg {
    NowPlaying,
    Popular,
    Upcoming,
}

impl From<ListArg> for ListKind {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::NowPlaying => ListKind::NowPlaying,
            ListArg::Popular => ListKind::Popular,
            ListArg::Upcoming => ListKind::Upcoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_words_are_collected() {
        let cli = Cli::try_parse_from(["cs", "the", "dark", "knight"]).unwrap();
        assert_eq!(cli.query.join(" "), "the dark knight");
        assert!(!cli.interactive);
        assert_eq!(cli.page, 1);
    }

    #[test]
    fn test_list_and_page() {
        let cli = Cli::try_parse_from(["cs", "--list", "now-playing", "-p", "3"]).unwrap();
        assert_eq!(cli.list.map(ListKind::from), Some(ListKind::NowPlaying));
        assert_eq!(cli.page, 3);
    }

    #[test]
    fn test_details_and_json() {
        let cli = Cli::try_parse_from(["cs", "-d", "27205", "--json"]).unwrap();
        assert_eq!(cli.details, Some(27205));
        assert!(cli.json);
    }

    #[test]
    fn test_unknown_list_is_rejected() {
        assert!(Cli::try_parse_from(["cs", "--list", "trending"]).is_err());
    }
}
