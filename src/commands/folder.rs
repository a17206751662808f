//! Knowledge-base folder CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use orghub_core::config::AppConfig;
use orghub_core::error::AppError;
use orghub_entity::folder::{Folder, FolderNode};
use orghub_service::folder::{CreateFolderRequest, MoveFolderRequest, RenameRequest};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// User to act as
    #[arg(long = "as-user")]
    pub as_user: String,

    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List child folders (root folders when no parent is given)
    List {
        /// Parent folder ID
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Create a new folder
    Create {
        /// Folder name
        #[arg(short, long)]
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: String,
    },
    /// Move a folder under a new parent
    Move {
        /// Folder ID
        id: String,
        /// New parent folder ID (omit to move to the root)
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Delete a folder with its subfolders and files
    Delete {
        /// Folder ID
        id: String,
    },
    /// Show the breadcrumb path of a folder
    Path {
        /// Folder ID
        id: String,
    },
    /// Show the folder tree under a folder
    Tree {
        /// Folder ID
        id: String,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Subfolders
    folders: usize,
    /// Files
    files: usize,
    /// Department
    department: String,
    /// Created at
    created_at: String,
}

impl From<Folder> for FolderRow {
    fn from(f: Folder) -> Self {
        Self {
            id: f.id.to_string(),
            folders: f.folder_ids.len(),
            files: f.file_ids.len(),
            department: f
                .context
                .department_id
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            created_at: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
            name: f.name,
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_services(config).await?;
    let ctx = super::acting_as(&services, &args.as_user).await?;
    let folders = &services.folders;

    match &args.command {
        FolderCommand::List { parent_id } => {
            let rows: Vec<FolderRow> = folders
                .list_children(&ctx, parent_id.as_deref())
                .await?
                .into_iter()
                .map(FolderRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        FolderCommand::Create { name, parent_id } => {
            let folder = folders
                .create_folder(
                    &ctx,
                    CreateFolderRequest {
                        name: name.clone(),
                        parent_id: parent_id.clone(),
                        folder_type: None,
                    },
                )
                .await?;
            output::print_success(&format!("Folder '{}' created (id: {})", folder.name, folder.id));
        }
        FolderCommand::Rename { id, name } => {
            let folder = folders
                .rename_folder(&ctx, id, RenameRequest { name: name.clone() })
                .await?;
            output::print_success(&format!("Folder {} renamed to '{}'", folder.id, folder.name));
        }
        FolderCommand::Move { id, to } => {
            let folder = folders
                .move_folder(
                    &ctx,
                    id,
                    MoveFolderRequest {
                        new_parent_id: to.clone(),
                    },
                )
                .await?;
            let target = folder
                .parent_id
                .as_ref()
                .map_or_else(|| "the root".to_string(), ToString::to_string);
            output::print_success(&format!("Folder {} moved to {target}", folder.id));
        }
        FolderCommand::Delete { id } => {
            let report = folders.delete_folder(&ctx, id).await?;
            match format {
                OutputFormat::Json => output::print_item(&report, format),
                OutputFormat::Table => output::print_success(&format!(
                    "Deleted {} folder(s) and {} file(s)",
                    report.folders_deleted, report.files_deleted
                )),
            }
        }
        FolderCommand::Path { id } => {
            let path = services
                .tree
                .get_path(&ctx, id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
            match format {
                OutputFormat::Json => output::print_item(&path, format),
                OutputFormat::Table => {
                    let names: Vec<&str> = path.iter().map(|item| item.name.as_str()).collect();
                    println!("{}", names.join(" / "));
                }
            }
        }
        FolderCommand::Tree { id } => {
            let tree = services
                .tree
                .get_tree(&ctx, id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
            match format {
                OutputFormat::Json => output::print_item(&tree, format),
                OutputFormat::Table => print_tree(&tree, 0),
            }
        }
    }

    Ok(())
}

fn print_tree(node: &FolderNode, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}├── {}/ ({} files)", node.name, node.file_count);
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}
