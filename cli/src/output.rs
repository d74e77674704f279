use colored::*;
use pulldown_cmark::{Event as MdEvent, HeadingLevel, Options, Parser as MdParser, Tag};
use swingcoach::{ChatMessage, FrameAnalysis};

/// Print an assistant chat bubble to the terminal
pub fn print_assistant_message(message: &ChatMessage) {
    let rendered = render_markdown(&message.text);
    println!(
        "{} {}\n{}",
        "Coach".blue().bold(),
        format!("[{}]", message.timestamp_label).dimmed(),
        rendered.trim_end()
    );
}

/// List the frames behind the report, in offset order
pub fn print_frame_list(analyses: &[FrameAnalysis]) {
    if analyses.is_empty() {
        return;
    }
    println!("{}", "Frames analyzed:".cyan());
    for analysis in analyses {
        println!(
            "  {:>6}ms  {:<18} {}",
            analysis.sample.offset_ms,
            analysis.sample.phase.label(),
            analysis.sample.image.uri().dimmed()
        );
    }
    println!();
}

pub fn print_chat_instructions() {
    println!(
        "{}",
        "Ask a follow-up question about your swing. Type 'exit' or 'quit' to end the session."
            .yellow()
    );
    println!();
}

/// Render the small markdown subset the coach produces: bold runs,
/// headings, bullet lists, and line breaks kept as typed.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = MdParser::new_ext(markdown, options);

    let mut output = String::new();
    let mut strong_depth = 0usize;

    for event in parser {
        match event {
            MdEvent::Start(Tag::Heading(level, ..)) => match level {
                HeadingLevel::H1 | HeadingLevel::H2 => {
                    output.push_str(&format!("\n{} ", "#".bright_cyan().bold()))
                }
                _ => output.push('\n'),
            },
            MdEvent::End(Tag::Heading(..)) => {
                output.push('\n');
            }
            MdEvent::Start(Tag::Paragraph) => {
                if !output.is_empty() && !output.ends_with('\n') {
                    output.push('\n');
                }
            }
            MdEvent::End(Tag::Paragraph) => {
                output.push_str("\n\n");
            }
            MdEvent::Start(Tag::List(_)) | MdEvent::End(Tag::List(_)) => {
                if !output.ends_with('\n') {
                    output.push('\n');
                }
            }
            MdEvent::Start(Tag::Item) => {
                output.push_str(&format!("{}  ", "•".yellow()));
            }
            MdEvent::End(Tag::Item) => {
                output.push('\n');
            }
            MdEvent::Start(Tag::Strong) => strong_depth += 1,
            MdEvent::End(Tag::Strong) => strong_depth = strong_depth.saturating_sub(1),
            MdEvent::Code(ref code) => {
                output.push_str(&format!("`{}`", code.on_bright_black().white()));
            }
            MdEvent::Text(ref text) => {
                if strong_depth > 0 {
                    output.push_str(&text.bold().to_string());
                } else {
                    output.push_str(text);
                }
            }
            // The coach writes one item per line, so keep the breaks
            MdEvent::SoftBreak | MdEvent::HardBreak => {
                output.push('\n');
            }
            _ => {}
        }
    }

    output
}
