//! Command-line front end.
//!
//! Each subcommand stands in for one page of the web client: list commands
//! read through hooks, mutations call the services directly, and anything
//! that needs a session refuses to run before a request is made when no
//! one is logged in.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use pipetrack_proto::DEFAULT_PAGE;
use pipetrack_proto::candidate::{CreateCandidateInput, UpdateCandidateInput};
use pipetrack_proto::comment::{CreateCommentInput, UpdateCommentInput};
use pipetrack_proto::query::{PaginationParams, SortOrder};
use pipetrack_proto::task::{CreateTaskInput, TaskStatus, UpdateTaskInput};
use pipetrack_proto::user::{LoginInput, RegisterInput, User};

use crate::api::{ApiClient, ApiError};
use crate::config::{CliArgs, ClientConfig};
use crate::hooks::{
    AuthHook, CandidateHook, CandidateListHook, CandidateListLoader, CandidateLoader,
    CommentsHook, CommentsLoader, HookState, TaskHook, TaskListHook, TaskListKey, TaskListLoader,
    TaskLoader, TaskLogsHook, TaskLogsLoader,
};
use crate::services::{AuthService, CandidateService, CommentService, TaskService};
use crate::session::StoreError;
use crate::views::{self, BoardView, StatusCounts, StatusFilter};

/// Errors surfaced to the user by a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session file could not be written.
    #[error(transparent)]
    Session(#[from] StoreError),

    /// The command needs a logged-in user.
    #[error("not logged in; run `pipetrack login` first")]
    NotAuthenticated,

    /// Rejected before any request was made.
    #[error("{0}")]
    InvalidInput(String),

    /// A hook settled with an error.
    #[error("{0}")]
    Load(String),

    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Top-level parser.
#[derive(Parser, Debug)]
#[command(version, about = "Interview pipeline tracker")]
pub struct Cli {
    /// Options shared by every command.
    #[command(flatten)]
    pub global: CliArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create an account.
    Register {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Login e-mail.
        #[arg(long)]
        email: String,
        /// Password.
        #[arg(long, env = "PIPETRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and remember the session.
    Login {
        /// Login e-mail.
        #[arg(long)]
        email: String,
        /// Password.
        #[arg(long, env = "PIPETRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Pipeline items.
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Comments on a pipeline item.
    #[command(subcommand)]
    Comments(CommentCommand),
    /// Legacy candidate records.
    #[command(subcommand)]
    Candidates(CandidateCommand),
}

/// Pagination, search and sort flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// 1-based page.
    #[arg(long)]
    pub page: Option<u32>,
    /// Page size (default from config).
    #[arg(long)]
    pub limit: Option<u32>,
    /// Server-side search.
    #[arg(long)]
    pub search: Option<String>,
    /// Field to sort by.
    #[arg(long)]
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    #[arg(long)]
    pub order: Option<SortOrder>,
}

impl ListArgs {
    /// Query parameters, with the configured page size as the default limit.
    #[must_use]
    pub fn to_params(&self, page_size: u32) -> PaginationParams {
        PaginationParams {
            page: Some(self.page.unwrap_or(DEFAULT_PAGE)),
            limit: Some(self.limit.unwrap_or(page_size)),
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            sort_by: self.sort_by.clone(),
            order: self.order,
        }
    }
}

/// `tasks` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Show the board.
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Show archived items instead.
        #[arg(long)]
        archived: bool,
        /// `all`, `todo`, `in-progress` or `done`.
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Local case-insensitive filter on title and description.
        #[arg(long = "match")]
        matching: Option<String>,
        /// Only items I created.
        #[arg(long)]
        mine: bool,
    },
    /// Show one item with its comments and history.
    Show {
        /// Item id.
        id: u64,
    },
    /// Create an item.
    Create {
        /// Title (usually the candidate's name).
        #[arg(long)]
        title: String,
        /// Free-form notes.
        #[arg(long)]
        description: Option<String>,
        /// Initial status.
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Due date.
        #[arg(long)]
        due: Option<String>,
    },
    /// Change fields of an item.
    Update {
        /// Item id.
        id: u64,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New notes.
        #[arg(long)]
        description: Option<String>,
        /// New status.
        #[arg(long)]
        status: Option<TaskStatus>,
        /// New due date.
        #[arg(long)]
        due: Option<String>,
    },
    /// Delete an item.
    Delete {
        /// Item id.
        id: u64,
    },
    /// Archive an item.
    Archive {
        /// Item id.
        id: u64,
    },
    /// Restore an archived item.
    Unarchive {
        /// Item id.
        id: u64,
    },
    /// Show the change history of an item.
    Logs {
        /// Item id.
        id: u64,
    },
}

/// `comments` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum CommentCommand {
    /// Comments on an item.
    List {
        /// Item id.
        task_id: u64,
    },
    /// Comment on an item.
    Add {
        /// Item id.
        task_id: u64,
        /// Comment text.
        content: String,
    },
    /// Replace a comment's text.
    Edit {
        /// Comment id.
        id: u64,
        /// New text.
        content: String,
    },
    /// Delete a comment.
    Delete {
        /// Comment id.
        id: u64,
    },
}

/// `candidates` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum CandidateCommand {
    /// List candidates.
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one candidate.
    Show {
        /// Candidate id.
        id: u64,
    },
    /// Create a candidate.
    Create {
        /// Given name.
        #[arg(long)]
        first_name: String,
        /// Family name.
        #[arg(long)]
        last_name: String,
        /// Contact e-mail.
        #[arg(long)]
        email: String,
        /// Contact phone.
        #[arg(long)]
        phone: Option<String>,
        /// Postal address.
        #[arg(long)]
        address: Option<String>,
    },
    /// Change fields of a candidate.
    Update {
        /// Candidate id.
        id: u64,
        /// New given name.
        #[arg(long)]
        first_name: Option<String>,
        /// New family name.
        #[arg(long)]
        last_name: Option<String>,
        /// New e-mail.
        #[arg(long)]
        email: Option<String>,
        /// New phone.
        #[arg(long)]
        phone: Option<String>,
        /// New address.
        #[arg(long)]
        address: Option<String>,
    },
    /// Soft-delete a candidate.
    Delete {
        /// Candidate id.
        id: u64,
    },
    /// Archive a candidate.
    Archive {
        /// Candidate id.
        id: u64,
    },
    /// Restore an archived candidate.
    Unarchive {
        /// Candidate id.
        id: u64,
    },
}

/// Everything a command needs: resolved config, auth state and services.
#[derive(Debug)]
pub struct Context {
    config: ClientConfig,
    auth: AuthHook,
    tasks: TaskService,
    comments: CommentService,
    candidates: CandidateService,
}

impl Context {
    /// Builds the services over one shared client.
    #[must_use]
    pub fn new(client: &ApiClient, config: ClientConfig) -> Self {
        Self {
            config,
            auth: AuthHook::new(AuthService::new(client.clone())),
            tasks: TaskService::new(client.clone()),
            comments: CommentService::new(client.clone()),
            candidates: CandidateService::new(client.clone()),
        }
    }

    /// The logged-in user, or [`CliError::NotAuthenticated`].
    fn require_user(&self) -> Result<User, CliError> {
        match self.auth.user() {
            Some(user) if self.auth.is_authenticated() => Ok(user),
            _ => Err(CliError::NotAuthenticated),
        }
    }

    fn ts(&self) -> &str {
        &self.config.timestamp_format
    }
}

/// Runs one command, writing its output to `out`.
///
/// # Errors
///
/// Returns [`CliError`] if the command is refused or any call fails.
pub async fn run<W: Write>(ctx: &Context, command: Command, out: &mut W) -> Result<(), CliError> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            ctx.auth
                .register(&RegisterInput {
                    name,
                    email,
                    password,
                })
                .await?;
            writeln!(out, "Registered. Log in with `pipetrack login`.")?;
        }
        Command::Login { email, password } => {
            let user = ctx.auth.login(&LoginInput { email, password }).await?;
            writeln!(out, "Logged in as {} <{}>", user.name, user.email)?;
        }
        Command::Logout => {
            ctx.auth.logout()?;
            writeln!(out, "Logged out.")?;
        }
        Command::Whoami => {
            let user = ctx.require_user()?;
            writeln!(out, "{} <{}> (id {})", user.name, user.email, user.id)?;
        }
        Command::Tasks(cmd) => {
            let user = ctx.require_user()?;
            run_tasks(ctx, &user, cmd, out).await?;
        }
        Command::Comments(cmd) => {
            ctx.require_user()?;
            run_comments(ctx, cmd, out).await?;
        }
        Command::Candidates(cmd) => {
            ctx.require_user()?;
            run_candidates(ctx, cmd, out).await?;
        }
    }
    Ok(())
}

fn settled_data<T>(state: HookState<T>) -> Result<T, CliError> {
    match (state.data, state.error) {
        (Some(data), _) => Ok(data),
        (None, Some(error)) => Err(CliError::Load(error)),
        (None, None) => Err(CliError::InvalidInput("no such item".to_string())),
    }
}

async fn run_tasks<W: Write>(
    ctx: &Context,
    user: &User,
    cmd: TaskCommand,
    out: &mut W,
) -> Result<(), CliError> {
    match cmd {
        TaskCommand::List {
            list,
            archived,
            status,
            matching,
            mine,
        } => {
            let hook = TaskListHook::mount(
                TaskListLoader::new(ctx.tasks.clone()),
                TaskListKey {
                    params: list.to_params(ctx.config.page_size),
                    archived,
                },
            );
            let tasks = settled_data(hook.settled().await)?;

            let base = BoardView {
                filter: StatusFilter::All,
                search: matching.unwrap_or_default(),
                creator: mine.then_some(user.id),
            };
            let visible = base.apply(&tasks);
            let owned: Vec<_> = visible.into_iter().cloned().collect();
            writeln!(out, "{}", views::chip_line(StatusCounts::of(&owned), status))?;

            let board = BoardView {
                filter: status,
                ..base
            };
            let shown = board.apply(&owned);
            if shown.is_empty() {
                writeln!(out, "No items.")?;
            }
            for task in shown {
                writeln!(out, "{}", views::task_row(task))?;
            }
        }
        TaskCommand::Show { id } => {
            let task = TaskHook::mount(TaskLoader::new(ctx.tasks.clone()), id);
            let comments = CommentsHook::mount(CommentsLoader::new(ctx.comments.clone()), id);
            let logs = TaskLogsHook::mount(TaskLogsLoader::new(ctx.tasks.clone()), id);
            let (task, comments, logs) =
                tokio::join!(task.settled(), comments.settled(), logs.settled());

            let task = settled_data(task)?;
            write!(out, "{}", views::task_detail(&task, Some(user), ctx.ts()))?;

            writeln!(out, "\nComments:")?;
            match settled_data(comments) {
                Ok(comments) if comments.is_empty() => writeln!(out, "  (none)")?,
                Ok(comments) => {
                    for comment in &comments {
                        writeln!(out, "{}", views::comment_block(comment, ctx.ts()))?;
                    }
                }
                Err(e) => writeln!(out, "  could not load comments: {e}")?,
            }

            writeln!(out, "\nHistory:")?;
            match settled_data(logs) {
                Ok(logs) if logs.is_empty() => writeln!(out, "  (none)")?,
                Ok(logs) => {
                    for log in &logs {
                        writeln!(out, "  {}", views::log_line(log, ctx.ts()))?;
                    }
                }
                Err(e) => writeln!(out, "  could not load history: {e}")?,
            }
        }
        TaskCommand::Create {
            title,
            description,
            status,
            due,
        } => {
            if title.trim().is_empty() {
                return Err(CliError::InvalidInput("title cannot be empty".to_string()));
            }
            let task = ctx
                .tasks
                .create(&CreateTaskInput {
                    title,
                    description,
                    status,
                    due_date: due,
                })
                .await?;
            writeln!(out, "Created {}", views::task_row(&task))?;
        }
        TaskCommand::Update {
            id,
            title,
            description,
            status,
            due,
        } => {
            let input = UpdateTaskInput {
                title,
                description,
                status,
                due_date: due,
            };
            if input.is_empty() {
                return Err(CliError::InvalidInput("nothing to update".to_string()));
            }
            let task = ctx.tasks.update(id, &input).await?;
            writeln!(out, "Updated {}", views::task_row(&task))?;
        }
        TaskCommand::Delete { id } => {
            ctx.tasks.delete(id).await?;
            writeln!(out, "Deleted #{id}")?;
        }
        TaskCommand::Archive { id } => {
            ctx.tasks.archive(id).await?;
            writeln!(out, "Archived #{id}")?;
        }
        TaskCommand::Unarchive { id } => {
            ctx.tasks.unarchive(id).await?;
            writeln!(out, "Restored #{id}")?;
        }
        TaskCommand::Logs { id } => {
            let hook = TaskLogsHook::mount(TaskLogsLoader::new(ctx.tasks.clone()), id);
            for log in &settled_data(hook.settled().await)? {
                writeln!(out, "{}", views::log_line(log, ctx.ts()))?;
            }
        }
    }
    Ok(())
}

async fn run_comments<W: Write>(
    ctx: &Context,
    cmd: CommentCommand,
    out: &mut W,
) -> Result<(), CliError> {
    match cmd {
        CommentCommand::List { task_id } => {
            let hook = CommentsHook::mount(CommentsLoader::new(ctx.comments.clone()), task_id);
            let comments = settled_data(hook.settled().await)?;
            if comments.is_empty() {
                writeln!(out, "No comments.")?;
            }
            for comment in &comments {
                writeln!(out, "{}", views::comment_block(comment, ctx.ts()))?;
            }
        }
        CommentCommand::Add { task_id, content } => {
            let content = views::comment_input(&content)
                .ok_or_else(|| CliError::InvalidInput("comment cannot be empty".to_string()))?;
            let comment = ctx
                .comments
                .create(task_id, &CreateCommentInput { content })
                .await?;
            writeln!(out, "Added comment {}", comment.id)?;
        }
        CommentCommand::Edit { id, content } => {
            let content = views::comment_input(&content)
                .ok_or_else(|| CliError::InvalidInput("comment cannot be empty".to_string()))?;
            ctx.comments
                .update(id, &UpdateCommentInput { content })
                .await?;
            writeln!(out, "Updated comment {id}")?;
        }
        CommentCommand::Delete { id } => {
            ctx.comments.delete(id).await?;
            writeln!(out, "Deleted comment {id}")?;
        }
    }
    Ok(())
}

async fn run_candidates<W: Write>(
    ctx: &Context,
    cmd: CandidateCommand,
    out: &mut W,
) -> Result<(), CliError> {
    match cmd {
        CandidateCommand::List { list } => {
            let hook = CandidateListHook::mount(
                CandidateListLoader::new(ctx.candidates.clone()),
                list.to_params(ctx.config.page_size),
            );
            let page = settled_data(hook.settled().await)?;
            for candidate in &page.data {
                writeln!(out, "{}", views::candidate_row(candidate))?;
            }
            writeln!(
                out,
                "page {} ({} per page), {} total",
                page.page, page.limit, page.total
            )?;
        }
        CandidateCommand::Show { id } => {
            let hook = CandidateHook::mount(CandidateLoader::new(ctx.candidates.clone()), id);
            let candidate = settled_data(hook.settled().await)?;
            writeln!(out, "#{} {}", candidate.id, candidate.full_name())?;
            writeln!(out, "E-mail: {}", candidate.email)?;
            if let Some(phone) = &candidate.phone {
                writeln!(out, "Phone: {phone}")?;
            }
            if let Some(address) = &candidate.address {
                writeln!(out, "Address: {address}")?;
            }
            writeln!(
                out,
                "Added {}",
                views::format_timestamp(&candidate.created_at, ctx.ts())
            )?;
        }
        CandidateCommand::Create {
            first_name,
            last_name,
            email,
            phone,
            address,
        } => {
            let candidate = ctx
                .candidates
                .create(&CreateCandidateInput {
                    first_name,
                    last_name,
                    email,
                    phone,
                    address,
                })
                .await?;
            writeln!(out, "Created {}", views::candidate_row(&candidate))?;
        }
        CandidateCommand::Update {
            id,
            first_name,
            last_name,
            email,
            phone,
            address,
        } => {
            let input = UpdateCandidateInput {
                first_name,
                last_name,
                email,
                phone,
                address,
            };
            if input == UpdateCandidateInput::default() {
                return Err(CliError::InvalidInput("nothing to update".to_string()));
            }
            let candidate = ctx.candidates.update(id, &input).await?;
            writeln!(out, "Updated {}", views::candidate_row(&candidate))?;
        }
        CandidateCommand::Delete { id } => {
            ctx.candidates.delete(id).await?;
            writeln!(out, "Deleted candidate {id}")?;
        }
        CandidateCommand::Archive { id } => {
            ctx.candidates.archive(id).await?;
            writeln!(out, "Archived candidate {id}")?;
        }
        CandidateCommand::Unarchive { id } => {
            ctx.candidates.unarchive(id).await?;
            writeln!(out, "Restored candidate {id}")?;
        }
    }
    Ok(())
}
