use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use data_provider::{
    DataProvider, GuestAwareProvider, RestDataProvider, SessionContext,
    auth::AuthClient,
    config::ProviderConfig,
    provider::{CreateParams, GetOneParams, ListParams, UpdateParams},
    query::{CrudFilter, FilterOperator, Pagination},
    services::{attendance::AttendanceService, dashboard::DashboardService},
    session::{LocalStore, disable_guest_mode, enable_guest_mode, is_guest_mode},
};
use log::info;
use models::{
    resource::{Action, Page, Resource, document_title},
    school_data::{AttendanceStatus, RecordId},
};
use serde_json::{Value, json};
use std::{error::Error, process::ExitCode, str::FromStr};

#[derive(Parser)]
#[command(name = "campusflow")]
#[command(version = "0.1.0")]
#[command(about = "Manage departments, subjects, classes, teachers, students and attendance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists every resource with its pages
    Resources,
    /// Lists records of a resource
    List {
        resource: Resource,

        #[arg(short, long, default_value_t = 1)]
        page: u64,

        #[arg(short = 's', long, default_value_t = 10)]
        page_size: u64,

        /// `field=value` or `field:operator=value`; may be repeated
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<CrudFilter>,
    },
    /// Shows a single record
    Show { resource: Resource, id: String },
    /// Creates a record from a JSON object
    Create {
        resource: Resource,

        #[arg(short, long)]
        data: String,
    },
    /// Updates a record from a JSON object
    Update {
        resource: Resource,
        id: String,

        #[arg(short, long)]
        data: String,
    },
    /// Summary counts shown on the home page
    Dashboard,
    /// Marks a class's attendance for one day
    Attendance {
        #[arg(short, long = "class")]
        class_id: String,

        /// `YYYY-MM-DD`; today (UTC) when omitted
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// `student=present|absent|late`; may be repeated
        #[arg(short, long = "mark", value_parser = parse_mark)]
        marks: Vec<(RecordId, AttendanceStatus)>,
    },
    /// Switches guest mode on or off
    Guest {
        #[command(subcommand)]
        action: GuestAction,
    },
    /// Signs in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Signs out and forgets the stored session
    Logout,
    /// Prints the current session, if any
    Session,
}

#[derive(Subcommand)]
enum GuestAction {
    Enable,
    Disable,
    Status,
}

fn parse_filter(raw: &str) -> Result<CrudFilter, String> {
    let (lhs, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected field=value, got '{raw}'"))?;

    let (field, operator) = match lhs.split_once(':') {
        Some((field, op)) => (
            field,
            FilterOperator::from_str(op).map_err(|_| format!("Unknown operator '{op}'"))?,
        ),
        None => (lhs, FilterOperator::Eq),
    };

    Ok(CrudFilter::Logical {
        field: field.trim().to_string(),
        operator,
        value: Value::String(value.to_string()),
    })
}

fn parse_mark(raw: &str) -> Result<(RecordId, AttendanceStatus), String> {
    let (student, status) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected student=status, got '{raw}'"))?;
    let status =
        AttendanceStatus::from_str(status).map_err(|_| format!("Unknown status '{status}'"))?;

    Ok((parse_id(student), status))
}

fn parse_id(raw: &str) -> RecordId {
    match RecordId::from_str(raw.trim()) {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

fn parse_json(raw: &str) -> Result<Value, Box<dyn Error>> {
    serde_json::from_str(raw).map_err(|e| format!("--data is not valid JSON: {e}").into())
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn title(resource: Resource, action: Action, id: Option<&str>) {
    info!(
        "{}",
        document_title(Page::Resource {
            resource,
            action,
            id,
        })
    );
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = ProviderConfig::from_env()?;
    let mut store = LocalStore::open(&config.state_path)?;
    let ctx = SessionContext::from_store(&store);
    let provider = GuestAwareProvider::new(RestDataProvider::new(config.backend_base_url.clone()));
    let auth = AuthClient::new(config.auth_base_url.clone());

    match cli.command {
        Commands::Resources => {
            let resources: Vec<Value> = Resource::navigable()
                .into_iter()
                .map(|r| {
                    json!({
                        "name": r.as_str(),
                        "label": r.label(),
                        "list": r.list_route(),
                        "create": r.create_route(),
                        "show": r.show_route(":id"),
                    })
                })
                .collect();
            print_json(&resources)?;
        }
        Commands::List {
            resource,
            page,
            page_size,
            filters,
        } => {
            title(resource, Action::List, None);
            let params = ListParams {
                resource,
                pagination: Pagination::new(page, page_size),
                filters,
            };
            let result = provider.get_list(&ctx, params).await?;
            print_json(&json!({ "data": result.data, "total": result.total }))?;
        }
        Commands::Show { resource, id } => {
            title(resource, Action::Show, Some(&id));
            let params = GetOneParams {
                resource,
                id: parse_id(&id),
            };
            let result = provider.get_one(&ctx, params).await?;
            print_json(&result.data)?;
        }
        Commands::Create { resource, data } => {
            title(resource, Action::Create, None);
            let params = CreateParams::new(resource, parse_json(&data)?);
            let result = provider.create(&ctx, params).await?;
            print_json(&result.data)?;
        }
        Commands::Update { resource, id, data } => {
            title(resource, Action::Edit, Some(&id));
            let params = UpdateParams {
                resource,
                id: parse_id(&id),
                variables: parse_json(&data)?,
            };
            let result = provider.update(&ctx, params).await?;
            print_json(&result.data)?;
        }
        Commands::Dashboard => {
            title(Resource::Dashboard, Action::List, None);
            let stats = DashboardService::stats(&provider, &ctx).await?;
            print_json(&stats)?;
        }
        Commands::Attendance {
            class_id,
            date,
            marks,
        } => {
            title(Resource::Attendance, Action::Create, None);
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let result =
                AttendanceService::mark(&provider, &ctx, &parse_id(&class_id), date, &marks)
                    .await?;
            print_json(&result.data)?;
        }
        Commands::Guest { action } => {
            match action {
                GuestAction::Enable => enable_guest_mode(&mut store)?,
                GuestAction::Disable => disable_guest_mode(&mut store)?,
                GuestAction::Status => {}
            }
            print_json(&json!({ "guest": is_guest_mode(&store) }))?;
        }
        Commands::Login { email, password } => {
            info!("{}", document_title(Page::Login));
            let result = auth.sign_in_email(&mut store, &email, &password).await?;
            print_json(&result)?;
        }
        Commands::Logout => {
            auth.sign_out(&mut store).await?;
            println!("Signed out");
        }
        Commands::Session => {
            let session = auth.get_session(&mut store).await?;
            print_json(&session)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
