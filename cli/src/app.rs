use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use swingcoach::{CoachSession, SessionError, VideoResource};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::output::{print_assistant_message, print_chat_instructions, print_frame_list};

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Runs the analysis pass for `video` and prints the resulting report
pub async fn run_analysis(session: &CoachSession, video: &VideoResource) -> Result<()> {
    let spinner = spinner("Analyzing your swing...");
    let result = session.analyze_swing(video).await;
    spinner.finish_and_clear();

    let summary = result.context("Failed to analyze swing")?;
    let snapshot = session.snapshot().await;
    print_frame_list(snapshot.analyses());
    print_assistant_message(&summary);
    println!();
    Ok(())
}

/// Follow-up chat loop; ends on `exit`, `quit` or end of input
pub async fn run_interactive_chat(session: &CoachSession) -> Result<()> {
    print_chat_instructions();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        // Prompt for user input
        stdout
            .write_all(format!("{}: ", "You".green().bold()).as_bytes())
            .await
            .context("Failed to write prompt")?;
        stdout.flush().await.context("Failed to flush stdout")?;

        let Some(input) = lines.next_line().await.context("Failed to read input")? else {
            println!();
            break;
        };

        // Check for exit command
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            println!("Ending session.");
            break;
        }

        let spinner = spinner("Thinking...");
        debug!("Sending follow-up: {}", input);
        let result = session.send_message(&input).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => print_assistant_message(&reply),
            Err(SessionError::EmptyInput) => continue,
            Err(e) => {
                warn!(error = %e, "Message rejected");
                eprintln!("{}", e.to_string().red());
            }
        }

        println!(); // Add spacing between interactions
    }

    Ok(())
}
