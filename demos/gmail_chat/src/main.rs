// Interactive chat over the most recent Gmail messages, with a fixed-question demo mode.

use clap::Parser;
use inbox_chat::{
    AppConfig, InboxAssistant,
    shutdown::{CtrlCShutdown, Shutdown},
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEMO_QUERIES: [&str; 5] = [
    "What emails did I receive today?",
    "Are there any urgent emails?",
    "Tell me about work-related emails",
    "What are the main topics in my emails?",
    "Any emails about deadlines or meetings?",
];

/// Longest answer printed in demo mode, in characters.
const DEMO_ANSWER_CHARS: usize = 200;

#[derive(Parser)]
#[command(name = "gmail_chat", version, about = "Chat with your Gmail inbox")]
struct Cli {
    /// Number of recent emails to fetch and analyze
    #[arg(long, default_value_t = 10)]
    max_emails: usize,

    /// Run the fixed demo questions once instead of the interactive loop
    #[arg(long)]
    demo: bool,

    /// Print a daily digest of the processed emails before chatting
    #[arg(long)]
    digest: bool,
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {e}");
    }

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return;
        }
    };
    let mut assistant = match InboxAssistant::new(config) {
        Ok(assistant) => assistant,
        Err(e) => {
            error!(error = %e, "Failed to create assistant");
            return;
        }
    };

    println!("🤖 Gmail Q&A Chatbot");
    println!("{}", "=".repeat(50));
    println!("\n1️⃣ Setting up Gmail Chatbot...");

    let outcome = assistant.load_gmail(cli.max_emails).await;
    if !outcome.success {
        println!("❌ Setup failed: {}", outcome.message);
        return;
    }
    println!("✅ {}", outcome.message);

    if let Some(stats) = assistant.stats() {
        println!("\n📊 Email Stats:");
        println!("  • Total emails processed: {}", stats.total_emails);
        let recent: Vec<&str> = stats.subjects.iter().take(3).map(String::as_str).collect();
        println!("  • Recent subjects: {}...", recent.join(", "));
    }

    if cli.digest {
        print_digest(&assistant).await;
    }

    if cli.demo {
        run_demo(&mut assistant).await;
    } else {
        println!("\n📋 All Emails Overview:");
        println!("{}", "-".repeat(30));
        println!("{}", assistant.all_emails_summary());
        run_interactive(&mut assistant).await;
    }
    info!("gmail_chat finished");
}

async fn print_digest(assistant: &InboxAssistant) {
    let mut summarizer = match assistant.summarizer() {
        Ok(summarizer) => summarizer,
        Err(e) => {
            error!(error = %e, "Cannot build digest model");
            return;
        }
    };
    match assistant.daily_digest(&mut summarizer).await {
        Ok(digest) => {
            println!("\n📰 Daily Digest:");
            println!("{digest}");
        }
        Err(e) => error!(error = %e, "Digest failed"),
    }
}

async fn run_demo(assistant: &mut InboxAssistant) {
    println!("\n💬 Demo Questions & Answers:");
    println!("{}", "=".repeat(50));

    for (i, query) in DEMO_QUERIES.iter().enumerate() {
        println!("\n{}. 🤔 {query}", i + 1);
        let response = assistant.chat(query).await;
        let shown: String = response.chars().take(DEMO_ANSWER_CHARS).collect();
        let ellipsis = if shown.len() < response.len() { "..." } else { "" };
        println!("🤖 Assistant: {shown}{ellipsis}");
    }

    println!("\n✅ Demo completed!");
}

async fn run_interactive(assistant: &mut InboxAssistant) {
    println!("\n💬 Chat with your emails! (type 'quit' to exit)");
    println!("💡 Try: 'summarize all emails', 'show me all email subjects', 'what emails did I get?'");
    println!("{}", "=".repeat(50));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut shutdown = CtrlCShutdown::new();

    loop {
        let _ = stdout.write_all("\n🤔 Your question: ".as_bytes()).await;
        let _ = stdout.flush().await;

        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = shutdown.wait_for_signal() => break,
        };
        let query = match line {
            Ok(Some(line)) => line.trim().to_string(),
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Failed to read input");
                break;
            }
        };

        if matches!(query.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let response = assistant.chat(&query).await;
        println!("🤖 Assistant: {response}");
    }
    println!("\n👋 Goodbye!");
}
