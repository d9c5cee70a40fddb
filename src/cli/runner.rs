//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{PaginatorConfig, SourceConfig, IN_MEMORY};
use crate::database::{json_to_duckdb_value, open_database, Filter, QuerySource};
use crate::error::{Error, Result};
use crate::pagination::Paginator;
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, printing its result
    pub fn run(&self) -> Result<()> {
        let output = self.execute()?;
        self.output_message(&output);
        Ok(())
    }

    /// Run the CLI command, returning its result
    pub fn execute(&self) -> Result<Value> {
        let config = self.load_config()?;
        let source_config = self.source_config(&config)?;

        let conn = open_database(&source_config.database)?;
        let source = QuerySource::from_config(&conn, &source_config)?;
        let mut paginator = Paginator::from_config(source, &config)?;

        match &self.cli.command {
            Commands::Page { page } => {
                if let Some(page) = page {
                    paginator.set_page(*page)?;
                }
                Self::page_message(&paginator)
            }
            Commands::Info { page } => {
                if let Some(page) = page {
                    paginator.set_page(*page)?;
                }
                Ok(json!({ "info": paginator.info()? }))
            }
            Commands::Seek { conditions, binds } => {
                let filter = build_filter(conditions, binds)?;
                match paginator.seek_to(&filter)? {
                    Some(page) => {
                        tracing::info!("First match is on page {}", page);
                        Self::page_message(&paginator)
                    }
                    None => Err(Error::Other(format!(
                        "No record matches {}",
                        filter.clause()
                    ))),
                }
            }
        }
    }

    /// Load configuration, applying command-line overrides
    fn load_config(&self) -> Result<PaginatorConfig> {
        let mut config = match &self.cli.config {
            Some(path) => PaginatorConfig::from_file(path)?,
            None => {
                tracing::warn!("No config file given, using defaults");
                PaginatorConfig::default()
            }
        };

        if let Some(page_size) = self.cli.page_size {
            config.page_size = i64::try_from(page_size).map_err(|_| {
                Error::invalid_value("page_size", format!("{page_size} is too large"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Resolve the source definition from the config file and flags
    fn source_config(&self, config: &PaginatorConfig) -> Result<SourceConfig> {
        let mut source = config.source.clone().unwrap_or_else(|| SourceConfig {
            database: IN_MEMORY.to_string(),
            query: String::new(),
            params: Vec::new(),
            order_by: None,
        });

        if let Some(database) = &self.cli.database {
            source.database.clone_from(database);
        }
        if let Some(query) = &self.cli.query {
            source.query.clone_from(query);
        }
        if !self.cli.params.is_empty() {
            source.params = self.cli.params.iter().map(|p| parse_literal(p)).collect();
        }
        if let Some(order_by) = &self.cli.order_by {
            source.order_by = Some(order_by.clone());
        }

        if source.query.trim().is_empty() {
            return Err(Error::missing_field("query"));
        }
        if source.is_in_memory() {
            tracing::debug!("Querying a scratch in-memory database");
        }

        source.validate()?;
        Ok(source)
    }

    /// Page info plus the records of the current page
    fn page_message(paginator: &Paginator<QuerySource<'_>>) -> Result<Value> {
        let info = paginator.info()?;
        let records = paginator.fetch_current()?;
        if records.is_empty() {
            tracing::warn!("Query returned no records");
        }
        Ok(json!({
            "info": info,
            "label": info.range_label(),
            "records": &*records,
        }))
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Parse a command-line value as a JSON literal, falling back to plain text
fn parse_literal(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Build a seek filter from `--where` conditions and `--bind` values
fn build_filter(conditions: &[String], binds: &[String]) -> Result<Filter> {
    let Some((first, rest)) = conditions.split_first() else {
        return Err(Error::missing_field("where"));
    };

    let filter = rest
        .iter()
        .fold(Filter::new(first.clone()), |filter, condition| {
            filter.and(condition.clone())
        });

    Ok(binds.iter().fold(filter, |filter, raw| {
        filter.bind(json_to_duckdb_value(&parse_literal(raw)))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    const NUMBERS: &str = "SELECT range + 1 AS n FROM range(95)";

    fn runner(args: &[&str]) -> Runner {
        let mut argv = vec!["pagekit"];
        argv.extend_from_slice(args);
        Runner::new(Cli::parse_from(argv))
    }

    #[test]
    fn test_page_command() {
        let output = runner(&["--query", NUMBERS, "--order-by", "n", "page", "--page", "99"])
            .execute()
            .unwrap();

        assert_eq!(output["info"]["page"], 5);
        assert_eq!(output["info"]["page_count"], 5);
        assert_eq!(output["label"], "Showing 81-95 of 95");
        assert_eq!(output["records"].as_array().unwrap().len(), 15);
        assert_eq!(output["records"][0]["n"], 81);
    }

    #[test]
    fn test_page_command_negative_page_clamps() {
        let output = runner(&["--query", NUMBERS, "--order-by", "n", "page", "--page", "-3"])
            .execute()
            .unwrap();
        assert_eq!(output["info"]["page"], 1);
        assert_eq!(output["records"][0]["n"], 1);
    }

    #[test]
    fn test_info_command_with_page_size() {
        let output = runner(&["--query", NUMBERS, "-s", "0", "info"]).execute().unwrap();
        assert_eq!(output["info"]["page_count"], 1);
        assert_eq!(output["info"]["last"], 95);
        assert!(output.get("records").is_none());
    }

    #[test]
    fn test_seek_command() {
        let output = runner(&[
            "--query",
            NUMBERS,
            "--order-by",
            "n",
            "seek",
            "--where",
            "n = ?",
            "--bind",
            "42",
        ])
        .execute()
        .unwrap();

        assert_eq!(output["info"]["page"], 3);
        let records = output["records"].as_array().unwrap();
        assert!(records.iter().any(|row| row["n"] == 42));
    }

    #[test]
    fn test_seek_command_not_found() {
        let err = runner(&["--query", NUMBERS, "seek", "--where", "n > 1000"])
            .execute()
            .unwrap_err();
        assert!(err.to_string().contains("No record matches (n > 1000)"));
    }

    #[test]
    fn test_query_params() {
        let output = runner(&[
            "--query",
            "SELECT * FROM range(50) t(n) WHERE n >= ?",
            "--param",
            "40",
            "info",
        ])
        .execute()
        .unwrap();
        assert_eq!(output["info"]["count"], 10);
    }

    #[test]
    fn test_missing_query() {
        let err = runner(&["info"]).execute().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "query"));
    }

    #[test]
    fn test_config_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size: 10").unwrap();
        writeln!(file, "max_page_size: 30").unwrap();
        writeln!(file, "source:").unwrap();
        writeln!(file, "  query: {NUMBERS}").unwrap();
        writeln!(file, "  order_by: n DESC").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let output = runner(&["-C", &path, "page"]).execute().unwrap();
        assert_eq!(output["info"]["page_size"], 10);
        assert_eq!(output["records"][0]["n"], 95);

        let err = runner(&["-C", &path, "-s", "50", "page"]).execute().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse_literal("42"), json!(42));
        assert_eq!(parse_literal("true"), json!(true));
        assert_eq!(parse_literal("\"quoted\""), json!("quoted"));
        assert_eq!(parse_literal("shipped"), json!("shipped"));
    }

    #[test]
    fn test_build_filter() {
        let filter = build_filter(
            &["a = ?".to_string(), "b > ?".to_string()],
            &["1".to_string(), "x".to_string()],
        )
        .unwrap();
        assert_eq!(filter.clause(), "(a = ?) AND (b > ?)");
        assert_eq!(filter.params().len(), 2);

        assert!(build_filter(&[], &[]).is_err());
    }
}
