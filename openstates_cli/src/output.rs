use anyhow::Result;
use chrono::NaiveDateTime;
use openstates_api::types::{
    value_text, Action, Bill, Committee, CommitteeMember, Event, Legislator, Role, State, Term,
};
use openstates_api::{Entity, Record};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(input: &str) -> Self {
        match input {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct StateRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Abbr")]
    #[serde(rename = "Abbr")]
    abbreviation: String,
    #[tabled(rename = "Legislature")]
    #[serde(rename = "Legislature")]
    legislature: String,
    #[tabled(rename = "Upper")]
    #[serde(rename = "Upper")]
    upper: String,
    #[tabled(rename = "Lower")]
    #[serde(rename = "Lower")]
    lower: String,
}

#[derive(Tabled, Serialize)]
pub struct TermRow {
    #[tabled(rename = "Term")]
    #[serde(rename = "Term")]
    name: String,
    #[tabled(rename = "Years")]
    #[serde(rename = "Years")]
    years: String,
    #[tabled(rename = "Sessions")]
    #[serde(rename = "Sessions")]
    sessions: String,
}

#[derive(Tabled, Serialize)]
pub struct BillRow {
    #[tabled(rename = "Bill")]
    #[serde(rename = "Bill")]
    bill_id: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Session")]
    #[serde(rename = "Session")]
    session: String,
    #[tabled(rename = "Chamber")]
    #[serde(rename = "Chamber")]
    chamber: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
}

#[derive(Tabled, Serialize)]
pub struct ActionRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Actor")]
    #[serde(rename = "Actor")]
    actor: String,
    #[tabled(rename = "Action")]
    #[serde(rename = "Action")]
    action: String,
}

#[derive(Tabled, Serialize)]
pub struct LegislatorRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    leg_id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Chamber")]
    #[serde(rename = "Chamber")]
    chamber: String,
    #[tabled(rename = "District")]
    #[serde(rename = "District")]
    district: String,
}

#[derive(Tabled, Serialize)]
pub struct RoleRow {
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    kind: String,
    #[tabled(rename = "Term")]
    #[serde(rename = "Term")]
    term: String,
    #[tabled(rename = "Chamber")]
    #[serde(rename = "Chamber")]
    chamber: String,
    #[tabled(rename = "District")]
    #[serde(rename = "District")]
    district: String,
    #[tabled(rename = "Committee")]
    #[serde(rename = "Committee")]
    committee: String,
}

#[derive(Tabled, Serialize)]
pub struct CommitteeRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Chamber")]
    #[serde(rename = "Chamber")]
    chamber: String,
    #[tabled(rename = "Committee")]
    #[serde(rename = "Committee")]
    committee: String,
    #[tabled(rename = "Subcommittee")]
    #[serde(rename = "Subcommittee")]
    subcommittee: String,
}

#[derive(Tabled, Serialize)]
pub struct MemberRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    role: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    leg_id: String,
}

#[derive(Tabled, Serialize)]
pub struct EventRow {
    #[tabled(rename = "When")]
    #[serde(rename = "When")]
    when: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Location")]
    #[serde(rename = "Location")]
    location: String,
}

// -- Row builders --
//
// Every accessor awaits the handle's payload; for search results and nested
// entities it is already present, so these never touch the network.

pub async fn build_state_rows(states: &[State]) -> Result<Vec<StateRow>> {
    let mut rows = Vec::with_capacity(states.len());
    for s in states {
        rows.push(StateRow {
            name: text(s.name().await?),
            abbreviation: text(s.abbreviation().await?),
            legislature: text(s.legislature_name().await?),
            upper: text(s.upper_chamber_name().await?),
            lower: text(s.lower_chamber_name().await?),
        });
    }
    Ok(rows)
}

pub async fn build_term_rows(terms: &[Term]) -> Result<Vec<TermRow>> {
    let mut rows = Vec::with_capacity(terms.len());
    for t in terms {
        rows.push(TermRow {
            name: text(t.name().await?),
            years: format!(
                "{}-{}",
                t.start_year().await?.map(|y| y.to_string()).unwrap_or_default(),
                t.end_year().await?.map(|y| y.to_string()).unwrap_or_default()
            ),
            sessions: t.sessions().await?.join(", "),
        });
    }
    Ok(rows)
}

pub async fn build_bill_rows(bills: &[Bill]) -> Result<Vec<BillRow>> {
    let mut rows = Vec::with_capacity(bills.len());
    for b in bills {
        rows.push(BillRow {
            bill_id: text(b.bill_id().await?),
            state: text(b.state().await?),
            session: text(b.session().await?),
            chamber: text(b.chamber().await?),
            title: truncate(&text(b.title().await?), 60),
        });
    }
    Ok(rows)
}

pub async fn build_action_rows(actions: &[Action]) -> Result<Vec<ActionRow>> {
    let mut rows = Vec::with_capacity(actions.len());
    for a in actions {
        rows.push(ActionRow {
            date: date_text(a.date().await?),
            actor: text(a.actor().await?),
            action: truncate(&text(a.action().await?), 70),
        });
    }
    Ok(rows)
}

pub async fn build_legislator_rows(legislators: &[Legislator]) -> Result<Vec<LegislatorRow>> {
    let mut rows = Vec::with_capacity(legislators.len());
    for l in legislators {
        rows.push(LegislatorRow {
            leg_id: text(l.leg_id().await?),
            name: text(l.full_name().await?),
            party: text(l.party().await?),
            state: text(l.state().await?),
            chamber: text(l.chamber().await?),
            district: value_text(l.district().await?),
        });
    }
    Ok(rows)
}

pub async fn build_role_rows(roles: &[Role]) -> Result<Vec<RoleRow>> {
    let mut rows = Vec::with_capacity(roles.len());
    for r in roles {
        rows.push(RoleRow {
            kind: text(r.kind().await?),
            term: text(r.term().await?),
            chamber: text(r.chamber().await?),
            district: value_text(r.district().await?),
            committee: text(r.committee().await?),
        });
    }
    Ok(rows)
}

pub async fn build_committee_rows(committees: &[Committee]) -> Result<Vec<CommitteeRow>> {
    let mut rows = Vec::with_capacity(committees.len());
    for c in committees {
        rows.push(CommitteeRow {
            id: text(c.id().await?),
            state: text(c.state().await?),
            chamber: text(c.chamber().await?),
            committee: text(c.committee().await?),
            subcommittee: text(c.subcommittee().await?),
        });
    }
    Ok(rows)
}

pub async fn build_member_rows(members: &[CommitteeMember]) -> Result<Vec<MemberRow>> {
    let mut rows = Vec::with_capacity(members.len());
    for m in members {
        rows.push(MemberRow {
            name: text(m.name().await?),
            role: text(m.role().await?),
            leg_id: text(m.leg_id().await?),
        });
    }
    Ok(rows)
}

pub async fn build_event_rows(events: &[Event]) -> Result<Vec<EventRow>> {
    let mut rows = Vec::with_capacity(events.len());
    for e in events {
        rows.push(EventRow {
            when: date_text(e.when().await?),
            state: text(e.state().await?),
            kind: text(e.kind().await?),
            description: truncate(&text(e.description().await?), 60),
            location: text(e.location().await?),
        });
    }
    Ok(rows)
}

// -- Printing --

pub fn print_rows<R: Tabled + Serialize>(rows: &[R], format: &OutputFormat) -> Result<()> {
    print!("{}", render_rows(rows, format)?);
    Ok(())
}

/// Renders rows in the requested format, newline-terminated.
pub fn render_rows<R: Tabled + Serialize>(rows: &[R], format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Table => format!("{}\n", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            format!("{}\n", table)
        }
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => rows_to_csv(rows)?,
    })
}

pub fn rows_to_csv<R: Serialize>(rows: &[R]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

/// Collects the raw payload behind each handle, fetching unfetched ones.
pub async fn collect_payloads<E: Entity>(entities: &[E]) -> Result<Vec<Record>> {
    let mut payloads = Vec::with_capacity(entities.len());
    for entity in entities {
        payloads.push(Record::clone(&*entity.payload().await?));
    }
    Ok(payloads)
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn date_text(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn truncate(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let cut: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
