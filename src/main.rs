use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use rendezvous::config::{ClientConfig, ConfigError};
use rendezvous::net::client::ApiClient;
use rendezvous::net::types::{ApiError, LoginRequest, RegisterRequest};
use rendezvous::router::navigator::Navigator;
use rendezvous::router::route::RouteError;
use rendezvous::router::table::RouteTable;
use rendezvous::state::session::{Role, SessionStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("navigation failed: {0}")]
    Route(#[from] RouteError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("no username; pass --username or --login")]
    MissingUsername,
}

#[derive(Parser, Debug)]
#[command(name = "rendezvous", about = "Activity reservation client")]
struct Cli {
    /// Overrides `RENDEZVOUS_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Log in with this email or username before running the command.
    #[arg(long, env = "RENDEZVOUS_LOGIN", requires = "password")]
    login: Option<String>,

    #[arg(long, env = "RENDEZVOUS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the session established by --login.
    Login,
    Register(RegisterArgs),
    /// Walk the given paths through the navigation guard.
    Navigate {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    Activity(ActivityCommand),
    Reservation(ReservationCommand),
    Subscription(SubscriptionCommand),
    User(UserCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Defaults to --password.
    #[arg(long)]
    repeat_password: Option<String>,
    /// `participant` or `organizer`.
    #[arg(long)]
    user_type: Role,
}

#[derive(Args, Debug)]
struct ActivityCommand {
    #[command(subcommand)]
    command: ActivitySubcommand,
}

#[derive(Subcommand, Debug)]
enum ActivitySubcommand {
    List {
        /// Query filter as key=value; repeatable.
        #[arg(long = "filter", value_parser = parse_pair)]
        filters: Vec<(String, String)>,
    },
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Cancel {
        id: String,
    },
}

#[derive(Args, Debug)]
struct ReservationCommand {
    #[command(subcommand)]
    command: ReservationSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReservationSubcommand {
    Make {
        #[arg(long)]
        data: String,
    },
    Cancel {
        id: String,
    },
    List {
        #[arg(long)]
        username: Option<String>,
    },
}

#[derive(Args, Debug)]
struct SubscriptionCommand {
    #[command(subcommand)]
    command: SubscriptionSubcommand,
}

#[derive(Subcommand, Debug)]
enum SubscriptionSubcommand {
    List {
        #[arg(long)]
        username: Option<String>,
    },
    Subscribers {
        #[arg(long)]
        username: Option<String>,
    },
    Subscribe {
        organizer: String,
        #[arg(long)]
        username: Option<String>,
    },
    Unsubscribe {
        organizer: String,
        #[arg(long)]
        username: Option<String>,
    },
}

#[derive(Args, Debug)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    Show { username: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.base_url.as_deref() {
        config = config.with_base_url(url)?;
    }

    let session = SessionStore::new();
    let client = ApiClient::new(&config, session.clone())?;

    if let (Some(login), Some(password)) = (cli.login, cli.password) {
        let credentials = LoginRequest { email_or_username: login, password };
        client.login(&credentials).await?;
    }

    match cli.command {
        Command::Login => {
            run_login(&session);
            Ok(())
        }
        Command::Register(args) => run_register(&client, args).await,
        Command::Navigate { paths } => run_navigate(&session, &paths),
        Command::Activity(cmd) => run_activity(&client, cmd).await,
        Command::Reservation(cmd) => run_reservation(&client, cmd).await,
        Command::Subscription(cmd) => run_subscription(&client, cmd).await,
        Command::User(cmd) => match cmd.command {
            UserSubcommand::Show { username } => print_json(&client.get_user(&username).await?),
        },
    }
}

fn run_login(session: &SessionStore) {
    let snapshot = session.snapshot();
    match (snapshot.username(), snapshot.role()) {
        (Some(username), Some(role)) => println!("logged in as {username} ({role})"),
        _ => println!("not logged in"),
    }
}

async fn run_register(client: &ApiClient, args: RegisterArgs) -> Result<(), CliError> {
    let repeat_password = args.repeat_password.unwrap_or_else(|| args.password.clone());
    let account = RegisterRequest {
        username: args.username,
        password: args.password,
        repeat_password,
        email: args.email,
        user_type: args.user_type,
    };
    print_json(&client.register(&account).await?)
}

fn run_navigate(session: &SessionStore, paths: &[String]) -> Result<(), CliError> {
    let mut navigator = Navigator::new(RouteTable::application()?, session.clone());
    for path in paths {
        let transition = navigator.navigate(path)?;
        let from = transition.from.as_deref().unwrap_or("-");
        match transition.redirected_from.as_deref() {
            Some(requested) => println!("{path}: {from} -> {} (redirected from {requested})", transition.to),
            None => println!("{path}: {from} -> {}", transition.to),
        }
    }
    Ok(())
}

async fn run_activity(client: &ApiClient, cmd: ActivityCommand) -> Result<(), CliError> {
    let json = match cmd.command {
        ActivitySubcommand::List { filters } => client.list_activities(&filters).await?,
        ActivitySubcommand::Get { id } => client.get_activity(&id).await?,
        ActivitySubcommand::Create { data } => {
            let body = serde_json::from_str::<Value>(&data)?;
            client.create_activity(&body).await?
        }
        ActivitySubcommand::Cancel { id } => client.cancel_activity(&id).await?,
    };
    print_json(&json)
}

async fn run_reservation(client: &ApiClient, cmd: ReservationCommand) -> Result<(), CliError> {
    let json = match cmd.command {
        ReservationSubcommand::Make { data } => {
            let body = serde_json::from_str::<Value>(&data)?;
            client.make_reservation(&body).await?
        }
        ReservationSubcommand::Cancel { id } => client.cancel_reservation(&id).await?,
        ReservationSubcommand::List { username } => {
            let username = username_or_session(client, username)?;
            client.list_reservations(&username).await?
        }
    };
    print_json(&json)
}

async fn run_subscription(client: &ApiClient, cmd: SubscriptionCommand) -> Result<(), CliError> {
    let json = match cmd.command {
        SubscriptionSubcommand::List { username } => {
            client.list_subscriptions(&username_or_session(client, username)?).await?
        }
        SubscriptionSubcommand::Subscribers { username } => {
            client.list_subscribers(&username_or_session(client, username)?).await?
        }
        SubscriptionSubcommand::Subscribe { organizer, username } => {
            client.subscribe(&organizer, &username_or_session(client, username)?).await?
        }
        SubscriptionSubcommand::Unsubscribe { organizer, username } => {
            client.unsubscribe(&organizer, &username_or_session(client, username)?).await?
        }
    };
    print_json(&json)
}

fn username_or_session(client: &ApiClient, explicit: Option<String>) -> Result<String, CliError> {
    explicit
        .or_else(|| client.session().username())
        .ok_or(CliError::MissingUsername)
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got {raw}"))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
