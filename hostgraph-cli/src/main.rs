//! Host router binary: parse messages from the command line, route them and print the replies.

use clap::Parser;
use hostgraph_cli::{run_with_options, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "hostgraph")]
#[command(about = "Travel host router: checks the forecast before sharing stay ideas")]
struct Args {
    /// User message; repeat to send several messages in one session
    #[arg(short, long, value_name = "TEXT")]
    message: Vec<String>,

    /// Session id shared by all messages of this run
    #[arg(short, long, value_name = "ID")]
    session: Option<String>,

    /// Specialist base URL; repeat to register several (overrides SPECIALIST_URLS)
    #[arg(long, value_name = "URL")]
    specialist: Vec<String>,

    /// Print stage enter/exit and a config summary to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print the replies as JSON
    #[arg(long)]
    json: bool,

    /// Positional: user message (when -m/--message is not used)
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,
}

fn get_messages(args: &Args) -> Vec<String> {
    if !args.message.is_empty() {
        return args.message.clone();
    }
    let joined = args.rest.join(" ").trim().to_string();
    if joined.is_empty() {
        return vec!["What's the weather like in Seattle this weekend?".to_string()];
    }
    vec![joined]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let messages = get_messages(&args);
    let options = RunOptions {
        session_id: args.session.clone(),
        specialist_urls: args.specialist.clone(),
        verbose: args.verbose,
        json: args.json,
    };

    let turns = match run_with_options(&messages, &options).await {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        let body: Vec<serde_json::Value> = turns
            .iter()
            .map(|t| serde_json::json!({ "message": t.message, "responses": t.responses }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    for turn in &turns {
        println!("User: {}", turn.message);
        println!("---");
        for fragment in &turn.responses {
            println!("[Assistant] {}", fragment);
        }
    }
    Ok(())
}
