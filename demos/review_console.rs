//! Interactive review classifier on the terminal.
//!
//! ```text
//! cargo run --example review_console -- [config.toml]
//! ```
//!
//! Type a review and press enter. `:history` shows the session history,
//! `:stats` the sentiment distribution, `:clear` empties the history and
//! `:quit` exits. Set `RUST_LOG=review_sentiment=debug` for library logs.

use review_sentiment::config::AppConfig;
use review_sentiment::error::{Result, SentimentError};
use review_sentiment::sentiment::{ClassifierAdapter, Sentiment, Tone};
use review_sentiment::session::{Analysis, ReviewSession};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    println!("🛍️ Review Sentiment Classifier");
    println!("Loading model from '{}'...", config.model_dir.display());

    let adapter = Arc::new(ClassifierAdapter::from_config(&config));
    let mut session = ReviewSession::from_config(adapter, &config);

    if !session.adapter().is_available() {
        println!("[error] Model not loaded. Please check the model directory.");
    }

    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            ":quit" | ":q" => break,
            ":history" => print_history(&session),
            ":stats" => print_stats(&session),
            ":clear" => {
                session.clear_history();
                println!("History cleared.");
            }
            _ => match session.analyze(&line) {
                Ok(analysis) => print_analysis(&analysis),
                Err(SentimentError::EmptyInput) => {
                    println!("[warning] Please enter a review to analyze.")
                }
                Err(e @ SentimentError::ModelUnavailable(_)) => {
                    println!("[error] Model not loaded. Please check the model directory. ({e})")
                }
                Err(e) => println!("[error] Error during prediction: {e}"),
            },
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("📝 review> ");
    io::stdout().flush()?;
    Ok(())
}

fn tag(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => "[success]",
        Tone::Error => "[error]",
        Tone::Info => "[info]",
        Tone::Warning => "[warning]",
    }
}

fn print_analysis(analysis: &Analysis) {
    let tag = tag(analysis.sentiment.tone());
    match &analysis.warning {
        Some(warning) => println!("{tag} {warning} | Confidence: {}", analysis.confidence),
        None => println!(
            "{tag} Sentiment: {} {} | Confidence: {}",
            analysis.sentiment,
            analysis.sentiment.emoji().unwrap_or_default(),
            analysis.confidence
        ),
    }
}

fn print_history<C: review_sentiment::sentiment::TextClassifier>(session: &ReviewSession<C>) {
    let records = session.history().snapshot();
    if records.is_empty() {
        println!("No analysis history yet.");
        return;
    }

    println!("{:<19}  {:<53}  {:<9}  Confidence", "Timestamp", "Review", "Sentiment");
    for record in records {
        println!(
            "{:<19}  {:<53}  {:<9}  {}",
            record.formatted_timestamp(),
            record.review_excerpt,
            record.sentiment,
            record.confidence
        );
    }
}

fn print_stats<C: review_sentiment::sentiment::TextClassifier>(session: &ReviewSession<C>) {
    let summary = session.history().summary();
    println!("Total Reviews: {}", summary.total);
    for sentiment in Sentiment::ALL {
        println!(
            "{:<9} {:>3} ({:.1}%)",
            sentiment,
            summary.count(sentiment),
            summary.percentage(sentiment)
        );
    }
}
