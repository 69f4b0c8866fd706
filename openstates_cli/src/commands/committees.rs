use anyhow::Result;
use clap::Args;
use openstates_api::types::Committee;
use openstates_api::{Client, CommitteeQuery, Entity, Query, Searchable};

use crate::output::{
    build_committee_rows, build_member_rows, collect_payloads, print_json, print_rows,
    OutputFormat,
};
use crate::validation;

#[derive(Args)]
pub struct CommitteeArgs {
    /// Open States committee ID (e.g. CAC000005)
    pub id: String,
}

#[derive(Args)]
pub struct CommitteesArgs {
    /// Filter by state (repeatable)
    #[arg(long)]
    pub state: Vec<String>,

    /// Filter by chamber: upper, lower or joint
    #[arg(long)]
    pub chamber: Option<String>,

    /// Filter by committee name
    #[arg(long)]
    pub committee: Option<String>,

    /// Filter by subcommittee name
    #[arg(long)]
    pub subcommittee: Option<String>,

    /// Extra filters passed through as key=value (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

pub async fn run_get(args: &CommitteeArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let id = validation::validate_id(&args.id)?;
    let committee = Committee::get(client, &id)?;

    if let OutputFormat::Json = format {
        print_json(&*committee.payload().await?);
        return Ok(());
    }

    let rows = build_committee_rows(std::slice::from_ref(&committee)).await?;
    print_rows(&rows, format)?;

    let members = build_member_rows(&committee.members().await?).await?;
    if !members.is_empty() {
        println!();
        print_rows(&members, format)?;
    }
    Ok(())
}

pub async fn run_search(
    args: &CommitteesArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let mut query = CommitteeQuery::default();

    for state in &args.state {
        query = query.with_state(&validation::validate_state(state)?);
    }
    if let Some(ref chamber) = args.chamber {
        query = query.with_chamber(validation::validate_chamber(chamber)?);
    }
    if let Some(ref name) = args.committee {
        query = query.with_committee(&validation::validate_search(name)?);
    }
    if let Some(ref name) = args.subcommittee {
        query = query.with_subcommittee(&validation::validate_search(name)?);
    }
    for filter in &args.filters {
        let (key, value) = validation::parse_filter(filter)?;
        query = query.with_filter(&key, &value);
    }

    let committees = Committee::search(client, &query).await?;
    tracing::info!("Found {} committees", committees.len());

    match format {
        OutputFormat::Json => print_json(&collect_payloads(&committees).await?),
        _ => print_rows(&build_committee_rows(&committees).await?, format)?,
    }
    Ok(())
}
