use anyhow::Result;
use clap::Args;
use openstates_api::types::Legislator;
use openstates_api::{Client, Entity, LegislatorQuery, Query, Searchable};

use crate::output::{
    build_legislator_rows, build_role_rows, collect_payloads, print_json, print_rows,
    OutputFormat,
};
use crate::validation;

#[derive(Args)]
pub struct LegislatorArgs {
    /// Open States legislator ID (e.g. TXL000139)
    pub id: String,
}

#[derive(Args)]
pub struct LegislatorsArgs {
    /// Filter by state (repeatable)
    #[arg(long)]
    pub state: Vec<String>,

    /// Filter by chamber: upper or lower
    #[arg(long)]
    pub chamber: Option<String>,

    /// Filter by first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Filter by last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Filter by party as the API spells it (e.g. Democratic)
    #[arg(long)]
    pub party: Option<String>,

    /// Filter by district name or number
    #[arg(long)]
    pub district: Option<String>,

    /// Only legislators currently in office
    #[arg(long)]
    pub active: bool,

    /// Extra filters passed through as key=value (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

#[derive(Args)]
pub struct GeoArgs {
    /// Latitude in decimal degrees
    #[arg(allow_hyphen_values = true)]
    pub lat: f64,
    /// Longitude in decimal degrees
    #[arg(allow_hyphen_values = true)]
    pub long: f64,
}

pub async fn run_get(args: &LegislatorArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let id = validation::validate_id(&args.id)?;
    let legislator = Legislator::get(client, &id)?;

    if let OutputFormat::Json = format {
        print_json(&*legislator.payload().await?);
        return Ok(());
    }

    let rows = build_legislator_rows(std::slice::from_ref(&legislator)).await?;
    print_rows(&rows, format)?;

    let roles = build_role_rows(&legislator.roles().await?).await?;
    if !roles.is_empty() {
        println!();
        print_rows(&roles, format)?;
    }
    Ok(())
}

pub async fn run_search(
    args: &LegislatorsArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let mut query = LegislatorQuery::default();

    for state in &args.state {
        query = query.with_state(&validation::validate_state(state)?);
    }
    if let Some(ref chamber) = args.chamber {
        query = query.with_chamber(validation::validate_chamber(chamber)?);
    }
    if let Some(ref name) = args.first_name {
        query = query.with_first_name(&validation::validate_search(name)?);
    }
    if let Some(ref name) = args.last_name {
        query = query.with_last_name(&validation::validate_search(name)?);
    }
    if let Some(ref party) = args.party {
        query = query.with_party(&validation::validate_search(party)?);
    }
    if let Some(ref district) = args.district {
        query = query.with_district(&validation::validate_search(district)?);
    }
    if args.active {
        query = query.with_active(true);
    }
    for filter in &args.filters {
        let (key, value) = validation::parse_filter(filter)?;
        query = query.with_filter(&key, &value);
    }

    let legislators = Legislator::search(client, &query).await?;
    tracing::info!("Found {} legislators", legislators.len());
    print_legislators(&legislators, format).await
}

pub async fn run_geo(args: &GeoArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let (lat, long) = validation::validate_coordinates(args.lat, args.long)?;
    let legislators = Legislator::geo(client, lat, long).await?;
    tracing::info!("Found {} legislators at {},{}", legislators.len(), lat, long);
    print_legislators(&legislators, format).await
}

async fn print_legislators(legislators: &[Legislator], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&collect_payloads(legislators).await?),
        _ => print_rows(&build_legislator_rows(legislators).await?, format)?,
    }
    Ok(())
}
