//! Terminal companion — drives the page stores the way the web pages do:
//! journal list/add/analyze/delete, the mood dashboard, and the chatbot.

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use uuid::Uuid;

use solace_client::dto::{LoginRequest, RegisterRequest};
use solace_client::store::{ChatStore, JournalStore, MoodDashboard};
use solace_client::{ApiClient, ClientError, ClientResult, Config, Session, TokenStore};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solace_client=warn".into()),
        )
        .json()
        .init();

    let config = Config::from_env();
    let args: Vec<String> = env::args().skip(1).collect();

    match run(&config, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            if e.redirect().is_some() {
                eprintln!("Sign in first: solace login <email> <password>");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, args: &[String]) -> ClientResult<()> {
    let session = Session::new(TokenStore::new(config.token_path.clone()))?;
    let api = ApiClient::new(config, session)?;

    let mut argv = args.iter().map(String::as_str);
    match argv.next() {
        Some("register") => {
            let (email, password, name) = match (argv.next(), argv.next(), argv.next()) {
                (Some(e), Some(p), Some(n)) => (e, p, n),
                _ => return usage_error("solace register <email> <password> <name>"),
            };
            let response = api
                .register(&RegisterRequest {
                    email: email.into(),
                    password: password.into(),
                    name: name.into(),
                })
                .await?;
            println!("Welcome, {}. You are signed in.", response.user.name);
            Ok(())
        }
        Some("login") => {
            let (email, password) = match (argv.next(), argv.next()) {
                (Some(e), Some(p)) => (e, p),
                _ => return usage_error("solace login <email> <password>"),
            };
            let response = api
                .login(&LoginRequest {
                    email: email.into(),
                    password: password.into(),
                })
                .await?;
            println!("Signed in as {}.", response.user.email);
            Ok(())
        }
        Some("logout") => {
            api.logout().await?;
            println!("Signed out.");
            Ok(())
        }
        Some("whoami") => {
            let user = api.me().await?;
            println!("{} <{}>", user.name, user.email);
            Ok(())
        }
        Some("journal") => journal_command(api, &argv.collect::<Vec<_>>()).await,
        Some("mood") => mood_command(api).await,
        Some("chat") => chat_command(api, &argv.collect::<Vec<_>>()).await,
        _ => {
            print_usage();
            Ok(())
        }
    }
}

async fn journal_command(api: ApiClient, args: &[&str]) -> ClientResult<()> {
    let mut store = JournalStore::new(api);
    match args.first().copied() {
        Some("list") | None => {
            store.refresh().await?;
            if store.entries().is_empty() {
                println!("No journal entries yet.");
                return Ok(());
            }
            for entry in store.entries() {
                let mood = entry.mood_label().unwrap_or_else(|| "-".into());
                println!(
                    "{}  {}  [{}]  {}",
                    entry.id,
                    entry.created_at.format("%Y-%m-%d"),
                    mood,
                    entry.title()
                );
            }
            Ok(())
        }
        Some("add") => {
            let (title, body) = split_title_body(&args[1..])?;
            let entry = store.create(&title, &body).await?;
            println!("Saved \"{}\" ({}).", entry.title(), entry.id);
            Ok(())
        }
        Some("analyze") => {
            let (title, body) = split_title_body(&args[1..])?;
            let entry = store.create_analyzed(&title, &body).await?;
            match entry.mood_label() {
                Some(label) => println!("Saved \"{}\" — mood: {}.", entry.title(), label),
                None => println!("Saved \"{}\" (no mood returned).", entry.title()),
            }
            Ok(())
        }
        Some("delete") => {
            let id = parse_id(args.get(1).copied())?;
            store.refresh().await?;
            store.delete(id).await?;
            println!("Deleted {}.", id);
            Ok(())
        }
        _ => usage_error("solace journal [list | add <title> <body> | analyze <title> <body> | delete <id>]"),
    }
}

async fn mood_command(api: ApiClient) -> ClientResult<()> {
    let mut dashboard = MoodDashboard::new(api);
    dashboard.refresh().await?;

    let analyzed = dashboard.analyzed_count();
    if analyzed == 0 {
        println!("No analyzed entries yet. Try `solace journal analyze`.");
        return Ok(());
    }

    println!("Mood dashboard ({} analyzed entries)", analyzed);
    if let Some(average) = dashboard.average_intensity() {
        println!("  average intensity: {}/10", average);
    }
    if let Some(dominant) = dashboard.dominant_emotion() {
        println!("  dominant emotion:  {}", dominant);
    }
    println!("  by emotion:");
    for (label, count) in dashboard.emotion_breakdown() {
        println!("    {:<12} {}", label, count);
    }
    println!("  daily trend:");
    for point in dashboard.daily_trend() {
        println!(
            "    {}  {:.1} ({} entries)",
            point.date, point.average_intensity, point.entries
        );
    }
    Ok(())
}

async fn chat_command(api: ApiClient, args: &[&str]) -> ClientResult<()> {
    let mut store = ChatStore::new(api);

    // One-shot: send a single message through the direct model endpoint.
    if !args.is_empty() {
        let reply = store.send_direct(&args.join(" ")).await?;
        println!("{}", reply.text);
        return Ok(());
    }

    // Interactive: a session-backed conversation until EOF or /quit.
    store.ensure_session().await?;
    println!("Connected. Type a message, or /quit to leave.");

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "/quit" {
            break;
        }

        match store.send(text).await {
            Ok(reply) => println!("solace> {}", reply.text),
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }
    Ok(())
}

fn split_title_body(args: &[&str]) -> ClientResult<(String, String)> {
    match args {
        [title, rest @ ..] if !rest.is_empty() => Ok((title.to_string(), rest.join(" "))),
        _ => Err(ClientError::Validation(
            "A title and a body are required".into(),
        )),
    }
}

fn parse_id(arg: Option<&str>) -> ClientResult<Uuid> {
    let raw = arg.ok_or_else(|| ClientError::Validation("An entry id is required".into()))?;
    Uuid::parse_str(raw).map_err(|_| ClientError::Validation("Invalid entry id".into()))
}

fn usage_error(usage: &str) -> ClientResult<()> {
    Err(ClientError::Validation(format!("Usage: {}", usage)))
}

fn print_usage() {
    println!("Solace terminal companion");
    println!();
    println!("  solace register <email> <password> <name>");
    println!("  solace login <email> <password>");
    println!("  solace logout");
    println!("  solace whoami");
    println!("  solace journal [list | add <title> <body> | analyze <title> <body> | delete <id>]");
    println!("  solace mood");
    println!("  solace chat [message]");
}
