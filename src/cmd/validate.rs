//! Validate command - report journal entries rejected by the posting rules

use super::LedgerArgs;
use booktax::ledger::{ErrorKind, Rejection};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output
#[derive(Debug, Clone, Serialize)]
struct ValidationIssue {
    row: usize,
    #[serde(rename = "type")]
    issue_type: &'static str,
    description: String,
    message: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    issue_count: usize,
    balanced: bool,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (ledger, rejections) = self.ledger.load()?;
        let balanced = ledger.trial_balance().is_balanced;
        let issues: Vec<ValidationIssue> = rejections.iter().map(ValidationIssue::from).collect();

        if self.json {
            let output = ValidationOutput {
                issue_count: issues.len(),
                balanced,
                issues: issues.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_text(&issues, balanced);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, issues: &[ValidationIssue], balanced: bool) {
        println!();
        println!("VALIDATION RESULTS");
        println!();

        if issues.is_empty() {
            println!("\u{2713} All entries accepted.");
        } else {
            println!("\u{26A0} {} entr(ies) rejected:", issues.len());
            println!();

            for issue in issues {
                println!(
                    "  Entry {}. [{}] {}",
                    issue.row, issue.issue_type, issue.description
                );
                println!("     {}", issue.message);
                println!();
            }
        }

        if !balanced {
            println!("\u{26A0} Trial balance does not balance (see `trial-balance`)");
        }
    }
}

impl From<&Rejection> for ValidationIssue {
    fn from(rejection: &Rejection) -> Self {
        ValidationIssue {
            row: rejection.row,
            issue_type: kind_name(rejection.error.kind()),
            description: rejection.description.clone(),
            message: rejection.error.to_string(),
        }
    }
}

fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "Validation",
        ErrorKind::ImbalancedEntry => "ImbalancedEntry",
        ErrorKind::NotFound => "NotFound",
        ErrorKind::DuplicateCode => "DuplicateCode",
        ErrorKind::ImmutableEntry => "ImmutableEntry",
    }
}
