//! CLI runner - executes commands

use crate::auth::AuthConfig;
use crate::backend::ElasticsearchBackend;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{DeepPager, PageRequest};
use crate::query::Query;
use crate::types::{JsonValue, SortOrder};
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info};

/// Cluster used when neither a settings file nor `--url` is given
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.settings()?;
        let pager = Self::build_pager(&settings)?;

        match &self.cli.command {
            Commands::Search {
                index,
                sort,
                desc,
                from,
                size,
                query,
                source,
                format,
            } => {
                let mut request = PageRequest::new(index.as_str(), sort.as_str())
                    .query(parse_query(query.as_deref())?)
                    .order(SortOrder::from_ascending(!desc))
                    .from(*from)
                    .size(*size);
                if let Some(fields) = source {
                    request = request.source(fields.iter().map(String::as_str));
                }

                let started = Instant::now();
                let hits = pager.search(&request).await?;
                info!(
                    index = %request.index,
                    from = request.from,
                    size = request.size,
                    returned = hits.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "search finished"
                );
                println!("{}", format_hits(*format, &hits)?);
            }
            Commands::Count { index, query } => {
                let count = pager.count(index, &parse_query(query.as_deref())?).await?;
                println!("{count}");
            }
            Commands::Check => {
                let cluster = pager.backend().ping().await?;
                println!(
                    "{}",
                    serde_json::to_string(&json!({
                        "status": "SUCCEEDED",
                        "cluster_name": cluster.cluster_name,
                        "name": cluster.name,
                        "version": cluster.version.number,
                    }))?
                );
            }
        }
        Ok(())
    }

    /// Settings file merged with command-line overrides
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.config {
            Some(path) => Settings::load(path)?,
            None => Settings::new(DEFAULT_URL),
        };

        if let Some(url) = &self.cli.url {
            settings.url.clone_from(url);
        }
        if let (Some(user), Some(password)) = (&self.cli.user, &self.cli.password) {
            settings.auth = AuthConfig::basic(user.as_str(), password.as_str());
        }
        if let Some(max_from) = self.cli.max_from {
            settings.pager.max_from = max_from;
        }
        if let Some(max_size) = self.cli.max_size {
            settings.pager.max_size = max_size;
        }

        settings.validate()?;
        debug!(url = %settings.url, pager = ?settings.pager, "settings resolved");
        Ok(settings)
    }

    fn build_pager(settings: &Settings) -> Result<DeepPager<ElasticsearchBackend>> {
        let client = HttpClient::with_auth(settings.http_config(), settings.auth_config())?;
        DeepPager::with_config(ElasticsearchBackend::new(client), settings.pager)
    }
}

fn parse_query(text: Option<&str>) -> Result<Query> {
    text.map_or(Ok(Query::MatchAll), Query::from_dsl_str)
}

/// Render search hits for stdout
pub fn format_hits(format: OutputFormat, hits: &[JsonValue]) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => hits
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join("\n"),
        OutputFormat::Pretty => serde_json::to_string_pretty(hits)?,
        OutputFormat::Count => hits.len().to_string(),
    })
}
