//! Command line definitions for the `hams` dashboard client.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

use hams_dashboard::models::enums::{ReportEntity, Tier};

#[derive(Parser)]
#[command(
    name = "hams",
    version,
    about = "Open HAMS - animal and event management from the terminal"
)]
pub struct Cli {
    /// Directory holding default.toml and the RUN_MODE file
    #[arg(long = "config-dir", value_name = "DIR", default_value = "config", global = true)]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and keep the access token
    Login(LoginArgs),
    /// Forget the stored access token
    Logout,
    /// Create an account
    Signup(SignupArgs),
    /// Show the signed-in user
    Me,
    /// Edit your own account
    #[command(subcommand)]
    Profile(ProfileCommand),
    #[command(subcommand)]
    Animals(AnimalsCommand),
    #[command(subcommand)]
    Events(EventsCommand),
    #[command(subcommand)]
    EventTypes(EventTypesCommand),
    #[command(subcommand)]
    Groups(GroupsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    /// List roles and their permissions
    Roles,
    /// List zoos
    Zoos,
    /// Upload an image and print its URL
    Upload {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Download a CSV report
    Report(ReportArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Email or username
    pub username: String,
    #[arg(long, env = "HAMS_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "HAMS_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Update name and email
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand)]
pub enum AnimalsCommand {
    List,
    Show { id: i32 },
    /// Availability of every animal as computed by the server
    Status {
        #[arg(long)]
        zoo: Option<i32>,
    },
    Create(AnimalArgs),
    Update {
        id: i32,
        #[command(flatten)]
        changes: AnimalChanges,
    },
    Delete { id: i32 },
    Available { id: i32 },
    Unavailable { id: i32 },
    Audits { id: i32 },
    HealthLog { id: i32 },
    AddHealthLog {
        id: i32,
        details: String,
        /// Edit an existing entry instead of adding one
        #[arg(long)]
        log: Option<i32>,
    },
    CheckedOut,
    Resting,
    Feed,
}

#[derive(Args)]
pub struct AnimalArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub species: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub image: String,
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub handling_enabled: bool,
    #[arg(long, default_value_t = 2)]
    pub max_daily_checkout_hours: i32,
    #[arg(long, default_value_t = 3)]
    pub max_daily_checkouts: i32,
    /// Hours of rest after each checkin
    #[arg(long, default_value_t = 1.0)]
    pub rest_time: f64,
    #[arg(long, default_value = "1")]
    pub tier: Tier,
    #[arg(long)]
    pub zoo: i32,
}

#[derive(Args, Default)]
pub struct AnimalChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub species: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub handling_enabled: Option<bool>,
    #[arg(long)]
    pub max_daily_checkout_hours: Option<i32>,
    #[arg(long)]
    pub max_daily_checkouts: Option<i32>,
    #[arg(long)]
    pub rest_time: Option<f64>,
    #[arg(long)]
    pub tier: Option<Tier>,
    #[arg(long)]
    pub zoo: Option<i32>,
}

#[derive(Subcommand)]
pub enum EventsCommand {
    List,
    Show { id: i32 },
    /// Event cards of one day (today by default)
    Day {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Live and upcoming events
    Upcoming,
    Create(EventArgs),
    Update {
        id: i32,
        #[command(flatten)]
        event: EventArgs,
    },
    Delete { id: i32 },
    Comment { id: i32, text: String },
    /// Replace the animals assigned to an event
    AssignAnimals {
        id: i32,
        #[arg(value_delimiter = ',')]
        animals: Vec<i32>,
    },
    /// Replace the handlers assigned to an event
    AssignHandlers {
        id: i32,
        #[arg(value_delimiter = ',')]
        users: Vec<i32>,
    },
    /// Check animals back in from a started event (all when none given)
    CheckIn {
        id: i32,
        #[arg(value_delimiter = ',')]
        animals: Vec<i32>,
    },
    /// Check animals out for an upcoming event (all when none given)
    CheckOut {
        id: i32,
        #[arg(value_delimiter = ',')]
        animals: Vec<i32>,
    },
}

#[derive(Args)]
pub struct EventArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub from: NaiveDate,
    /// Last day, the same as `--from` when omitted
    #[arg(long)]
    pub to: Option<NaiveDate>,
    #[arg(long, value_name = "HH:MM", value_parser = parse_time)]
    pub start: NaiveTime,
    #[arg(long, value_name = "HH:MM", value_parser = parse_time)]
    pub end: NaiveTime,
    #[arg(long)]
    pub zoo: i32,
    #[arg(long = "event-type")]
    pub event_type: i32,
    #[arg(long, value_delimiter = ',')]
    pub handlers: Vec<i32>,
    #[arg(long, value_delimiter = ',')]
    pub animals: Vec<i32>,
    #[arg(long)]
    pub checkout_immediately: bool,
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("Invalid time of day: {} (expected HH:MM)", raw))
}

#[derive(Subcommand)]
pub enum EventTypesCommand {
    List,
    Create(EventTypeArgs),
    Update {
        id: i32,
        #[command(flatten)]
        event_type: EventTypeArgs,
    },
    SetGroup { id: i32, group: i32 },
    SetZoo { id: i32, zoo: i32 },
}

#[derive(Args)]
pub struct EventTypeArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub zoo: i32,
    #[arg(long)]
    pub group: Option<i32>,
}

#[derive(Subcommand)]
pub enum GroupsCommand {
    List,
    Create {
        title: String,
        #[arg(long)]
        zoo: i32,
    },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    List,
    Show { id: i32 },
    Handlers,
    SetRole { id: i32, role: String },
    SetTier { id: i32, tier: Tier },
    /// Move a user to a group, or out of any group without `--group`
    SetGroup {
        id: i32,
        #[arg(long)]
        group: Option<i32>,
    },
}

#[derive(Args)]
pub struct ReportArgs {
    #[arg(long, value_enum, default_value = "events")]
    pub entity: EntityArg,
    /// First day, a week ago by default
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day, today by default
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Directory the CSV is written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EntityArg {
    Events,
    Users,
    Animals,
}

impl From<EntityArg> for ReportEntity {
    fn from(e: EntityArg) -> Self {
        match e {
            EntityArg::Events => ReportEntity::Events,
            EntityArg::Users => ReportEntity::Users,
            EntityArg::Animals => ReportEntity::Animals,
        }
    }
}
