pub mod app;

use clap::Parser;
use collection_view::query::SortSpec;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "collection-view")]
#[command(about = "Filter, search, sort and page a JSON export of records")]
pub struct Cli {
    /// JSON file with a bare array of records or an {items, totalCount} envelope
    #[arg(long)]
    pub records: PathBuf,

    /// View configuration file
    #[arg(long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in screen configuration
    #[arg(long)]
    pub preset: Option<String>,

    #[arg(long)]
    pub search: Option<String>,

    /// Field the search looks at, repeatable. Replaces the configured ones.
    #[arg(long = "search-field")]
    pub search_fields: Vec<String>,

    /// name=value, repeatable. Known filter controls keep their kind.
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// field[:asc|desc]
    #[arg(long)]
    pub sort: Option<SortSpec>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the page as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn parse_filter(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("status=pending"),
            Ok(("status".to_string(), "pending".to_string()))
        );
        assert_eq!(
            parse_filter("amount=10..50"),
            Ok(("amount".to_string(), "10..50".to_string()))
        );
        assert_eq!(parse_filter("dateTo="), Ok(("dateTo".to_string(), String::new())));
        assert!(parse_filter("status").is_err());
        assert!(parse_filter("=pending").is_err());
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::try_parse_from([
            "collection-view",
            "--records",
            "tx.json",
            "--preset",
            "transactions",
            "--filter",
            "status=pending",
            "--sort",
            "amount:desc",
            "--page-size",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.filters.len(), 1);
        assert_eq!(cli.sort.map(|s| s.to_string()), Some("amount:desc".to_string()));
        assert_eq!(cli.page, 1);
        assert_eq!(cli.page_size, Some(5));

        assert!(
            Cli::try_parse_from([
                "collection-view",
                "--records",
                "tx.json",
                "--preset",
                "transactions",
                "--config",
                "view.json",
            ])
            .is_err()
        );
    }
}
