use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use openstates_api::types::Bill;
use openstates_api::{BillQuery, Client, Entity, Query, Searchable};

use crate::output::{
    build_action_rows, build_bill_rows, collect_payloads, print_json, print_rows, OutputFormat,
};
use crate::validation;

#[derive(Args)]
pub struct BillArgs {
    /// State abbreviation (e.g. ca)
    pub state: String,
    /// Session identifier (e.g. 20092010)
    pub session: String,
    /// Originating chamber: upper or lower
    pub chamber: String,
    /// Bill identifier as assigned by the state (e.g. "AB 667")
    pub bill_id: String,
}

#[derive(Args)]
pub struct BillsArgs {
    /// Full-text search over bill titles
    #[arg(long, short)]
    pub query: Option<String>,

    /// Filter by state (repeatable)
    #[arg(long)]
    pub state: Vec<String>,

    /// Filter by chamber: upper or lower
    #[arg(long)]
    pub chamber: Option<String>,

    /// Filter by session identifier
    #[arg(long)]
    pub session: Option<String>,

    /// Filter by subject (repeatable)
    #[arg(long)]
    pub subject: Vec<String>,

    /// Filter by sponsor's legislator ID
    #[arg(long)]
    pub sponsor_id: Option<String>,

    /// Only bills updated on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub updated_since: Option<String>,

    /// Extra filters passed through as key=value (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

pub async fn run_get(args: &BillArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let state = validation::validate_state(&args.state)?;
    let session = validation::validate_search(&args.session)?;
    let chamber = validation::validate_chamber(&args.chamber)?;
    let bill_id = validation::validate_search(&args.bill_id)?;

    let bill = Bill::get(client, &state, &session, &chamber.to_string(), &bill_id)?;

    if let OutputFormat::Json = format {
        print_json(&*bill.payload().await?);
        return Ok(());
    }

    let rows = build_bill_rows(std::slice::from_ref(&bill)).await?;
    print_rows(&rows, format)?;

    let actions = build_action_rows(&bill.actions().await?).await?;
    if !actions.is_empty() {
        println!();
        print_rows(&actions, format)?;
    }
    Ok(())
}

pub async fn run_search(args: &BillsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = BillQuery::default();

    if let Some(ref q) = args.query {
        query = query.with_query(&validation::validate_search(q)?);
    }
    for state in &args.state {
        query = query.with_state(&validation::validate_state(state)?);
    }
    if let Some(ref chamber) = args.chamber {
        query = query.with_chamber(validation::validate_chamber(chamber)?);
    }
    if let Some(ref session) = args.session {
        query = query.with_session(&validation::validate_search(session)?);
    }
    for subject in &args.subject {
        query = query.with_subject(&validation::validate_search(subject)?);
    }
    if let Some(ref sponsor_id) = args.sponsor_id {
        query = query.with_sponsor_id(&validation::validate_id(sponsor_id)?);
    }
    if let Some(ref date) = args.updated_since {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("invalid date '{}', expected YYYY-MM-DD", date))?;
        query = query.with_updated_since(date);
    }
    for filter in &args.filters {
        let (key, value) = validation::parse_filter(filter)?;
        query = query.with_filter(&key, &value);
    }

    let bills = Bill::search(client, &query).await?;
    tracing::info!("Found {} bills", bills.len());

    match format {
        OutputFormat::Json => print_json(&collect_payloads(&bills).await?),
        _ => print_rows(&build_bill_rows(&bills).await?, format)?,
    }
    Ok(())
}
