use anyhow::Result;
use clap::Args;
use openstates_api::types::Event;
use openstates_api::{Client, EventQuery, Query, Searchable};

use crate::output::{build_event_rows, collect_payloads, print_json, print_rows, OutputFormat};
use crate::validation;

#[derive(Args)]
pub struct EventsArgs {
    /// Filter by state (repeatable)
    #[arg(long)]
    pub state: Vec<String>,

    /// Filter by event type (e.g. committee:meeting)
    #[arg(long = "type")]
    pub event_type: Option<String>,

    /// Extra filters passed through as key=value (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

pub async fn run(args: &EventsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = EventQuery::default();

    for state in &args.state {
        query = query.with_state(&validation::validate_state(state)?);
    }
    if let Some(ref kind) = args.event_type {
        query = query.with_event_type(&validation::validate_search(kind)?);
    }
    for filter in &args.filters {
        let (key, value) = validation::parse_filter(filter)?;
        query = query.with_filter(&key, &value);
    }

    let events = Event::search(client, &query).await?;
    tracing::info!("Found {} events", events.len());

    match format {
        OutputFormat::Json => print_json(&collect_payloads(&events).await?),
        _ => print_rows(&build_event_rows(&events).await?, format)?,
    }
    Ok(())
}
