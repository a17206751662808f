//! Org hierarchy CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use orghub_core::config::AppConfig;
use orghub_core::error::AppError;
use orghub_entity::user::UserStatus;
use orghub_service::org::{CreateCompanyRequest, CreateDepartmentRequest, CreateHoldingRequest};
use orghub_service::user::CreateUserRequest;

/// Arguments for org commands
#[derive(Debug, Args)]
pub struct OrgArgs {
    /// User to act as
    #[arg(long = "as-user")]
    pub as_user: String,

    /// Org subcommand
    #[command(subcommand)]
    pub command: OrgCommand,
}

/// Org subcommands
#[derive(Debug, Subcommand)]
pub enum OrgCommand {
    /// List visible holdings
    Holdings,
    /// List visible companies
    Companies {
        /// Only companies of this holding
        #[arg(long)]
        holding_id: Option<String>,
    },
    /// List visible departments
    Departments {
        /// Only departments of this company
        #[arg(long)]
        company_id: Option<String>,
    },
    /// List visible users
    Users {
        /// Only users with this status: active or blocked
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Create a holding
    CreateHolding {
        /// Holding name
        #[arg(short, long)]
        name: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Create a company under a holding
    CreateCompany {
        /// Parent holding ID
        #[arg(long)]
        holding_id: String,
        /// Company name
        #[arg(short, long)]
        name: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Create a department under a company
    CreateDepartment {
        /// Parent company ID
        #[arg(long)]
        company_id: String,
        /// Department name
        #[arg(short, long)]
        name: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Create a user
    CreateUser {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Role: superadmin, admin, director, or user
        #[arg(short, long)]
        role: String,
        /// Company ID (admins)
        #[arg(long)]
        company_id: Option<String>,
        /// Department ID (directors and users)
        #[arg(long)]
        department_id: Option<String>,
    },
}

/// Org node display row
#[derive(Debug, Serialize, Tabled)]
struct OrgRow {
    /// Node ID
    id: String,
    /// Name
    name: String,
    /// Parent node ID
    parent: String,
    /// Created at
    created_at: String,
}

/// User display row
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Company
    company: String,
    /// Department
    department: String,
}

fn or_dash<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}

/// Execute org commands
pub async fn execute(args: &OrgArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let services = super::open_services(config).await?;
    let ctx = super::acting_as(&services, &args.as_user).await?;
    let org = &services.org;

    match &args.command {
        OrgCommand::Holdings => {
            let rows: Vec<OrgRow> = org
                .list_holdings(&ctx)
                .await?
                .into_iter()
                .map(|h| OrgRow {
                    id: h.id.to_string(),
                    name: h.name,
                    parent: "-".into(),
                    created_at: h.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        OrgCommand::Companies { holding_id } => {
            let rows: Vec<OrgRow> = org
                .list_companies(&ctx, holding_id.as_deref())
                .await?
                .into_iter()
                .map(|c| OrgRow {
                    id: c.id.to_string(),
                    name: c.name,
                    parent: c.holding_id.to_string(),
                    created_at: c.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        OrgCommand::Departments { company_id } => {
            let rows: Vec<OrgRow> = org
                .list_departments(&ctx, company_id.as_deref())
                .await?
                .into_iter()
                .map(|d| OrgRow {
                    id: d.id.to_string(),
                    name: d.name,
                    parent: d.company_id.to_string(),
                    created_at: d.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        OrgCommand::Users { status } => {
            let status = status.as_deref().map(str::parse::<UserStatus>).transpose()?;
            let rows: Vec<UserRow> = services
                .users
                .list_users(&ctx, status)
                .await?
                .into_iter()
                .map(|u| UserRow {
                    id: u.id.to_string(),
                    role: u.role.clone().unwrap_or_else(|| "-".into()),
                    company: or_dash(u.company_id.as_ref()),
                    department: or_dash(u.department_id.as_ref()),
                    email: u.email,
                })
                .collect();
            output::print_list(&rows, format);
        }
        OrgCommand::CreateHolding { name, description } => {
            let holding = org
                .create_holding(
                    &ctx,
                    CreateHoldingRequest {
                        name: name.clone(),
                        description: description.clone(),
                    },
                )
                .await?;
            output::print_success(&format!("Holding '{}' created (id: {})", holding.name, holding.id));
        }
        OrgCommand::CreateCompany {
            holding_id,
            name,
            description,
        } => {
            let company = org
                .create_company(
                    &ctx,
                    CreateCompanyRequest {
                        name: name.clone(),
                        holding_id: holding_id.clone(),
                        description: description.clone(),
                        admin_id: None,
                    },
                )
                .await?;
            output::print_success(&format!("Company '{}' created (id: {})", company.name, company.id));
        }
        OrgCommand::CreateDepartment {
            company_id,
            name,
            description,
        } => {
            let department = org
                .create_department(
                    &ctx,
                    CreateDepartmentRequest {
                        name: name.clone(),
                        company_id: company_id.clone(),
                        description: description.clone(),
                        manager_id: None,
                    },
                )
                .await?;
            output::print_success(&format!(
                "Department '{}' created (id: {})",
                department.name, department.id
            ));
        }
        OrgCommand::CreateUser {
            email,
            role,
            company_id,
            department_id,
        } => {
            let user = services
                .users
                .create_user(
                    &ctx,
                    CreateUserRequest {
                        email: email.clone(),
                        full_name: None,
                        role: role.clone(),
                        holding_id: None,
                        company_id: company_id.clone(),
                        department_id: department_id.clone(),
                    },
                )
                .await?;
            output::print_success(&format!("User '{}' created (id: {})", user.email, user.id));
        }
    }

    Ok(())
}
