//! EduWaka command-line interface.
//!
//! One subcommand per API or guidance operation. Authentication state lives
//! in the session manager and persists across invocations; RUST_LOG controls
//! diagnostic output.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use eduwaka::api::assistant::{ChatMessage, Role};
use eduwaka::api::profile::ProfileUpdate;
use eduwaka::guidance::{combinations, fees, EligibilityForm, Sittings};
use eduwaka::{Config, SessionManager, SessionState, TokenStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eduwaka", version, about = "University admission guidance for Nigerian students")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        email: String,
    },
    /// Log in with email and password
    Login {
        email: String,
    },
    /// Log out and clear stored credentials
    Logout,
    /// Show the currently logged-in identity
    Whoami,
    /// Mint a new access token from the stored refresh token
    Refresh,
    /// View or update your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Search and inspect institutions
    Institutions {
        #[command(subcommand)]
        command: InstitutionCommands,
    },
    /// Search courses and their admission requirements
    Courses {
        /// Course name fragment
        term: String,
    },
    /// AI-generated overview of an institution
    Overview {
        institution_name: String,
    },
    /// Run the AI eligibility analysis
    Eligibility {
        #[arg(long)]
        institution: String,
        #[arg(long)]
        course: String,
        #[arg(long, value_enum, default_value_t = SittingsArg::One)]
        sittings: SittingsArg,
        /// O'Level results, 1st sitting (e.g. "Maths: B2, English: C4")
        #[arg(long)]
        sitting1: String,
        /// O'Level results, 2nd sitting
        #[arg(long, default_value = "")]
        sitting2: String,
        #[arg(long)]
        jamb_score: String,
        /// e.g. "English, Physics, Chemistry, Biology"
        #[arg(long)]
        jamb_subjects: String,
    },
    /// Estimate tuition fees for a course at an institution
    Fees {
        #[arg(long)]
        institution: String,
        #[arg(long)]
        course: String,
    },
    /// JAMB subject combination for a course
    Jamb {
        course: String,
    },
    /// O'Level subject combination for a course
    Olevel {
        course: String,
    },
    /// Talk to the EduWaka assistant
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
    /// Password recovery and change
    Password {
        #[command(subcommand)]
        command: PasswordCommands,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the current profile
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Upload a profile photo
    Photo {
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum InstitutionCommands {
    /// Search institutions by name
    Search {
        term: String,
    },
    /// Show one institution by id
    Show {
        id: u64,
    },
}

#[derive(Subcommand)]
enum ChatCommands {
    /// Send a message (the stored conversation is included as context)
    Send {
        message: String,
    },
    /// Print the stored conversation
    History,
}

#[derive(Subcommand)]
enum PasswordCommands {
    /// Request a password-reset email
    Forgot {
        email: String,
    },
    /// Complete a reset from the emailed link parameters
    Reset {
        uidb64: String,
        token: String,
    },
    /// Change the password of the logged-in account
    Change,
}

#[derive(Clone, Copy, ValueEnum)]
enum SittingsArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl From<SittingsArg> for Sittings {
    fn from(value: SittingsArg) -> Self {
        match value {
            SittingsArg::One => Sittings::One,
            SittingsArg::Two => Sittings::Two,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load();
    let api = eduwaka::ApiClient::new(&config.api_base_url)?;
    let store = TokenStore::at_default_location()?;
    let session = SessionManager::load(api.clone(), store);

    match cli.command {
        Commands::Register { email } => {
            let password = prompt_password("Password")?;
            let confirm = prompt_password("Confirm password")?;
            if password != confirm {
                anyhow::bail!("Passwords do not match.");
            }
            let identity = session.register(&email, &password).await?;
            println!("Registered and logged in as {}", identity.username);
        }
        Commands::Login { email } => {
            let password = prompt_password("Password")?;
            let identity = session.login(&email, &password).await?;
            println!("Logged in as {}", identity.username);
        }
        Commands::Logout => {
            session.logout()?;
            println!("Logged out.");
        }
        Commands::Whoami => match session.state() {
            SessionState::Authenticated(identity) => {
                println!("id:       {}", identity.id);
                println!("email:    {}", identity.email);
                println!("username: {}", identity.username);
            }
            SessionState::Anonymous => println!("Not logged in."),
        },
        Commands::Refresh => {
            let identity = session.refresh().await?;
            println!("Session refreshed for {}", identity.username);
        }
        Commands::Profile { command } => {
            let token = require_token(&session)?;
            match command {
                ProfileCommands::Show => {
                    print_profile(&api.fetch_profile(&token).await?);
                }
                ProfileCommands::Update {
                    email,
                    first_name,
                    last_name,
                } => {
                    let update = ProfileUpdate {
                        email,
                        first_name,
                        last_name,
                    };
                    let profile = api.update_profile(&token, &update).await?;
                    println!("Profile updated successfully!");
                    print_profile(&profile);
                }
                ProfileCommands::Photo { path } => {
                    let profile = api.upload_profile_photo(&token, &path).await?;
                    println!("Photo uploaded.");
                    print_profile(&profile);
                }
            }
        }
        Commands::Institutions { command } => match command {
            InstitutionCommands::Search { term } => {
                let page = api.search_institutions(&term).await?;
                if page.results.is_empty() {
                    println!("No institutions found.");
                }
                for institution in &page.results {
                    println!(
                        "{:>5}  {}  ({} | {})",
                        institution.id,
                        institution.name,
                        institution.ownership_type.as_deref().unwrap_or("-"),
                        institution.state.as_deref().unwrap_or("-"),
                    );
                }
                if page.next.is_some() {
                    println!("... {} total matches, refine your search", page.count);
                }
            }
            InstitutionCommands::Show { id } => {
                let institution = api.institution_detail(id).await?;
                println!("{}", institution.name);
                if let Some(abbreviation) = &institution.abbreviation {
                    println!("  abbreviation: {abbreviation}");
                }
                if let Some(kind) = &institution.institution_type {
                    println!("  type:         {kind}");
                }
                if let Some(ownership) = &institution.ownership_type {
                    println!("  ownership:    {ownership}");
                }
                if let Some(state) = &institution.state {
                    println!("  state:        {state}");
                }
                if let Some(year) = &institution.year_of_establishment {
                    println!("  established:  {year}");
                }
                if let Some(website) = &institution.website {
                    println!("  website:      {website}");
                }
                if let Some(description) = &institution.description {
                    println!("\n{description}");
                }
            }
        },
        Commands::Courses { term } => {
            let page = api.search_courses(&term).await?;
            if page.results.is_empty() {
                println!("No courses found.");
            }
            for course in &page.results {
                println!(
                    "{:>5}  {} — {} ({} years)",
                    course.id,
                    course.name,
                    course.institution_name.as_deref().unwrap_or("-"),
                    course.duration_years,
                );
                if let Some(requirements) = &course.jamb_requirements {
                    println!("       JAMB: {requirements}");
                }
            }
        }
        Commands::Overview { institution_name } => {
            let overview = api.institution_overview(&institution_name).await?;
            println!("{overview}");
        }
        Commands::Eligibility {
            institution,
            course,
            sittings,
            sitting1,
            sitting2,
            jamb_score,
            jamb_subjects,
        } => {
            let token = require_token(&session)?;
            let form = EligibilityForm {
                institution_name: institution,
                desired_course: course.clone(),
                sittings: sittings.into(),
                o_level_sitting_1: sitting1,
                o_level_sitting_2: sitting2,
                jamb_score,
                jamb_subjects,
            };
            let request = form.validate()?;
            let report = api.check_eligibility(&token, &request).await?;

            println!(
                "Eligibility: {}",
                if report.is_eligible {
                    "Eligible!"
                } else {
                    "Not Eligible"
                }
            );
            print_list("Reasons", &report.reasons);
            print_list("Missing Requirements", &report.missing_requirements);
            if !report.suggested_courses.is_empty() {
                println!("Suggested courses you can study instead of {course}:");
                for suggestion in &report.suggested_courses {
                    println!("  - {suggestion}");
                }
            }
            if report.o_level_credits_required > 0 {
                println!(
                    "O'Level credits typically required: {}",
                    report.o_level_credits_required
                );
            }
            if report.o_level_sittings_accepted > 0 {
                println!(
                    "O'Level sittings typically accepted: {}",
                    report.o_level_sittings_accepted
                );
            }
        }
        Commands::Fees {
            institution,
            course,
        } => {
            println!("{}", fees::estimate_fee(&institution, &course));
        }
        Commands::Jamb { course } => {
            println!("{}", combinations::jamb_combination(&course));
        }
        Commands::Olevel { course } => {
            println!("{}", combinations::olevel_combination(&course));
        }
        Commands::Chat { command } => {
            let token = require_token(&session)?;
            match command {
                ChatCommands::Send { message } => {
                    let mut history = api.chat_history(&token).await.unwrap_or_default();
                    history.push(ChatMessage::user(message));
                    let reply = api.send_chat(&token, &history).await?;
                    println!("{reply}");
                }
                ChatCommands::History => {
                    let history = api.chat_history(&token).await?;
                    if history.is_empty() {
                        println!("No messages yet. Send one to start chatting!");
                    }
                    for message in &history {
                        let speaker = match message.role {
                            Role::User => "you",
                            Role::Model => "eduwaka",
                        };
                        println!("[{speaker}] {}", message.text());
                    }
                }
            }
        }
        Commands::Password { command } => match command {
            PasswordCommands::Forgot { email } => {
                let detail = api.forgot_password(&email).await?;
                println!("{detail}");
            }
            PasswordCommands::Reset { uidb64, token } => {
                let new_password = prompt_password("New password")?;
                let confirm_password = prompt_password("Confirm password")?;
                let detail = api
                    .reset_password(&uidb64, &token, &new_password, &confirm_password)
                    .await?;
                println!("{detail}");
            }
            PasswordCommands::Change => {
                let token = require_token(&session)?;
                let old_password = prompt_password("Current password")?;
                let new_password = prompt_password("New password")?;
                let confirm = prompt_password("Confirm new password")?;
                let detail = api
                    .change_password(&token, &old_password, &new_password, &confirm)
                    .await?;
                println!("{detail}");
            }
        },
        Commands::Completions { .. } => unreachable!("handled before session setup"),
    }

    Ok(())
}

fn require_token(session: &SessionManager) -> Result<String> {
    session
        .access_token()
        .context("Authentication token not found. Please log in.")
}

fn prompt_password(prompt: &str) -> Result<String> {
    Ok(dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()?)
}

fn print_profile(profile: &eduwaka::api::profile::Profile) {
    println!("id:         {}", profile.id);
    println!("username:   {}", profile.username);
    println!("email:      {}", profile.email);
    if let Some(first_name) = &profile.first_name {
        println!("first name: {first_name}");
    }
    if let Some(last_name) = &profile.last_name {
        println!("last name:  {last_name}");
    }
    if let Some(photo) = &profile.photo {
        println!("photo:      {photo}");
    }
}

fn print_list(label: &str, items: &[String]) {
    if !items.is_empty() {
        println!("{label}:");
        for item in items {
            println!("  - {item}");
        }
    }
}
