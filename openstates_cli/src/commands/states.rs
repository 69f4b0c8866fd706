use anyhow::Result;
use clap::Args;
use openstates_api::types::State;
use openstates_api::{Client, Entity};

use crate::output::{build_state_rows, build_term_rows, print_json, print_rows, OutputFormat};
use crate::validation;

#[derive(Args)]
pub struct StateArgs {
    /// Two-letter state abbreviation (e.g. ca, ny)
    pub state: String,
}

pub async fn run(args: &StateArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let abbrev = validation::validate_state(&args.state)?;
    let state = State::get(client, &abbrev)?;

    if let OutputFormat::Json = format {
        print_json(&*state.payload().await?);
        return Ok(());
    }

    let rows = build_state_rows(std::slice::from_ref(&state)).await?;
    print_rows(&rows, format)?;

    let terms = build_term_rows(&state.terms().await?).await?;
    if !terms.is_empty() {
        println!();
        print_rows(&terms, format)?;
    }
    Ok(())
}
