//! Rendering of the creation wizard: step indicator and review screen.

use std::fmt;

use super::datetime::DateSpan;
use crate::{
    models::{DraftInput, StopPreference},
    validation::DraftValidator,
    wizard::{Wizard, WizardStep},
};

/// Progress through the wizard with one line per step.
pub struct StepIndicator {
    pub current: WizardStep,
    pub progress_percent: u8,
}

impl StepIndicator {
    pub fn new<V: DraftValidator>(wizard: &Wizard<V>) -> Self {
        Self {
            current: wizard.step(),
            progress_percent: wizard.progress_percent(),
        }
    }
}

impl fmt::Display for StepIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Step {} of {}: {} ({}%)",
            self.current.index() + 1,
            WizardStep::ALL.len(),
            self.current.title(),
            self.progress_percent
        )?;
        for step in WizardStep::ALL {
            let marker = match step.cmp(&self.current) {
                std::cmp::Ordering::Less => "✓",
                std::cmp::Ordering::Equal => "▶",
                std::cmp::Ordering::Greater => "○",
            };
            writeln!(f, "{marker} {} - {}", step.title(), step.description())?;
        }
        Ok(())
    }
}

/// The review screen shown before a trip is created.
pub struct ReviewSummary<'a>(pub &'a DraftInput);

impl fmt::Display for ReviewSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draft = self.0;
        writeln!(f, "## Review Your Trip")?;
        writeln!(f)?;
        writeln!(f, "- **Trip Name**: {}", draft.trip_name.trim())?;
        writeln!(f, "- **From**: {}", draft.start_location.trim())?;
        writeln!(f, "- **To**: {}", draft.destination.trim())?;
        writeln!(
            f,
            "- **Dates**: {}",
            DateSpan::new(draft.date_range.from, draft.date_range.to)
        )?;

        if draft.stop_preferences.is_empty() {
            writeln!(f, "- **Preferences**: No preferences selected")?;
        } else {
            let labels: Vec<&str> = draft
                .stop_preferences
                .iter()
                .map(|tag| {
                    tag.parse::<StopPreference>()
                        .map_or(tag.as_str(), |s| s.label())
                })
                .collect();
            writeln!(f, "- **Preferences**: {}", labels.join(", "))?;
        }

        if let Some(miles) = draft.distance_between_stops {
            writeln!(f, "- **Distance Between Stops**: {miles} miles")?;
        }
        if let Some(accommodation) = &draft.accommodation {
            writeln!(f, "- **Accommodation**: {}", capitalize(accommodation))?;
        }
        if let Some(dining) = &draft.dining {
            writeln!(f, "- **Dining**: {}", capitalize(dining))?;
        }
        Ok(())
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_summary() {
        let mut draft = DraftInput {
            trip_name: "Coast Run".to_string(),
            start_location: "LA".to_string(),
            destination: "SF".to_string(),
            ..Default::default()
        };
        let output = ReviewSummary(&draft).to_string();
        assert!(output.contains("- **Trip Name**: Coast Run"));
        assert!(output.contains("- **Preferences**: No preferences selected"));
        assert!(output.contains("- **Accommodation**: Hotel"));
        assert!(output.contains("- **Dining**: Casual"));

        draft.toggle_stop_preference("scenic", true);
        draft.toggle_stop_preference("nature", true);
        let output = ReviewSummary(&draft).to_string();
        assert!(output.contains("- **Preferences**: Scenic Routes, Nature Spots"));
    }

    #[test]
    fn test_step_indicator() {
        let indicator = StepIndicator {
            current: WizardStep::Preferences,
            progress_percent: 66,
        };
        let output = indicator.to_string();
        assert!(output.starts_with("Step 2 of 3: Preferences (66%)\n"));
        assert!(output.contains("✓ Trip Details"));
        assert!(output.contains("▶ Preferences"));
        assert!(output.contains("○ Review"));
    }
}
