//! Progress reporting for council execution

use colored::Colorize;
use council_application::CouncilProgressNotifier;
use council_domain::{AbortReason, CouncilId, Recommendation};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};

fn round_display_name(round: u32) -> &'static str {
    match round {
        1 => "Round 1: Analyze",
        2 => "Round 2: Rebut",
        _ => "Round 3: Synthesize",
    }
}

/// Reports progress during a council with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CouncilProgressNotifier for ProgressReporter {
    fn on_council_start(&self, council_id: &CouncilId, agents: usize) {
        let _ = self.multi.println(format!(
            "{} {} ({} agents)",
            "Council".bold(),
            council_id.as_str().cyan(),
            agents
        ));
    }

    fn on_round_start(&self, round: u32, total_agents: usize) {
        let pb = self.multi.add(ProgressBar::new(total_agents as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(round_display_name(round));
        pb.set_message("Starting...");

        *self.round_bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_agent_complete(&self, _round: u32, agent_id: &str, success: bool) {
        if let Some(pb) = self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), agent_id)
            } else {
                format!("{} {}", "x".red(), agent_id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, round: u32) {
        if let Some(pb) = self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_with_message(format!("Round {} complete!", round).green().to_string());
        }
    }

    fn on_council_aborted(&self, reason: &AbortReason) {
        if let Some(pb) = self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.abandon_with_message(format!("aborted: {}", reason).red().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl CouncilProgressNotifier for SimpleProgress {
    fn on_council_start(&self, council_id: &CouncilId, agents: usize) {
        eprintln!("{} {} ({} agents)", "->".cyan(), council_id, agents);
    }

    fn on_round_start(&self, round: u32, total_agents: usize) {
        eprintln!(
            "{} {} ({} agents)",
            "->".cyan(),
            round_display_name(round).bold(),
            total_agents
        );
    }

    fn on_agent_complete(&self, _round: u32, agent_id: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), agent_id);
        } else {
            eprintln!("  {} {} (fallback)", "x".red(), agent_id);
        }
    }

    fn on_round_complete(&self, _round: u32) {
        eprintln!();
    }

    fn on_council_aborted(&self, reason: &AbortReason) {
        eprintln!("{} {}", "aborted:".red().bold(), reason);
    }

    fn on_recommendation(&self, recommendation: Recommendation, confidence: f64) {
        eprintln!(
            "{} {} ({:.0}%)",
            "=>".cyan(),
            recommendation.as_str().bold(),
            confidence * 100.0
        );
    }
}
