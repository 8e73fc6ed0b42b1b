//! CLI output formatting utilities.

use crate::client::{FormStep, ProgressReporter};
use crate::pipeline::SeoContent;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print generated SEO content.
    pub fn seo_content(content: &SeoContent) {
        Output::header("SEO Content");
        Output::kv("Title", &content.title);
        Output::kv("Description", &content.description);

        if !content.summary.is_empty() {
            println!("\n{}\n{}", style("Summary").bold(), content.summary.trim());
        }

        if !content.key_points.is_empty() {
            println!("\n{}", style("Key Points").bold());
            for point in &content.key_points {
                Output::list_item(point);
            }
        }

        if !content.faqs.is_empty() {
            println!("\n{}", style("FAQ").bold());
            for faq in &content.faqs {
                println!("  {} {}", style("Q:").cyan().bold(), faq.question);
                println!("  {} {}", style("A:").dim(), faq.answer);
            }
        }

        if !content.tags.is_empty() {
            println!();
            Output::kv("Tags", &content.tags.join(", "));
        }
    }

    /// Create a step progress bar for the form sequence.
    pub fn step_bar() -> StepProgress {
        let pb = ProgressBar::new(FormStep::Done.index());
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        StepProgress { bar: pb }
    }
}

/// Progress bar that advances through the form steps.
pub struct StepProgress {
    bar: ProgressBar,
}

impl StepProgress {
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for StepProgress {
    fn step(&self, step: FormStep) {
        self.bar.set_position(step.index());
        self.bar.set_message(step.label());
    }
}
