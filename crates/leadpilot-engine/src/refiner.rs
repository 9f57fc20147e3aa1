//! Landing page audit.
//!
//! Every check runs on every call; results accumulate into blocking errors
//! (launch stoppers) and warnings (score penalties only).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::page::Block;

const BLOCKING_PENALTY: i32 = 15;
const WARNING_PENALTY: i32 = 5;

const MIN_IMAGE_WIDTH: f64 = 800.0;
const MIN_IMAGE_HEIGHT: f64 = 600.0;

const CTA_BLOCKS: &[&str] = &[
    "cta-form",
    "cta-grid",
    "hero-lead-form",
    "lead-interest-form",
    "booking-viewing",
];

const CONTACT_BLOCKS: &[&str] = &["contact-details", "chat-widget"];

const FORM_BLOCKS: &[&str] = &[
    "cta-form",
    "hero-lead-form",
    "lead-interest-form",
    "booking-viewing",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinerCheck {
    Contrast,
    ImageQuality,
    CtaPresence,
    ContactMethod,
    LeadFormFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub passed: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinerResult {
    /// `100 - 15 * blocking - 5 * warnings`, floored at 0.
    pub score: u8,
    pub blocking_errors: Vec<String>,
    pub warnings: Vec<String>,
    pub recommended_fixes: Vec<String>,
    pub checks: BTreeMap<RefinerCheck, CheckOutcome>,
    pub evaluated_at: DateTime<Utc>,
}

impl RefinerResult {
    /// `true` when nothing blocks the campaign launch.
    #[must_use]
    pub fn is_launch_ready(&self) -> bool {
        self.blocking_errors.is_empty()
    }
}

enum Severity {
    Blocking,
    Warning,
}

struct Failure {
    severity: Severity,
    error: &'static str,
    fix: &'static str,
}

#[derive(Default)]
struct Audit {
    blocking_errors: Vec<String>,
    warnings: Vec<String>,
    recommended_fixes: Vec<String>,
    checks: BTreeMap<RefinerCheck, CheckOutcome>,
}

impl Audit {
    fn pass(&mut self, check: RefinerCheck, message: &str) {
        self.checks.insert(
            check,
            CheckOutcome {
                passed: true,
                message: message.to_string(),
            },
        );
    }

    fn fail(&mut self, check: RefinerCheck, failure: &Failure) {
        match failure.severity {
            Severity::Blocking => self.blocking_errors.push(failure.error.to_string()),
            Severity::Warning => self.warnings.push(failure.error.to_string()),
        }
        self.recommended_fixes.push(failure.fix.to_string());
        self.checks.insert(
            check,
            CheckOutcome {
                passed: false,
                message: failure.error.to_string(),
            },
        );
    }

    fn score(&self) -> u8 {
        let blocking = i32::try_from(self.blocking_errors.len()).unwrap_or(i32::MAX);
        let warnings = i32::try_from(self.warnings.len()).unwrap_or(i32::MAX);
        let raw = 100_i32
            .saturating_sub(blocking.saturating_mul(BLOCKING_PENALTY))
            .saturating_sub(warnings.saturating_mul(WARNING_PENALTY));
        u8::try_from(raw.clamp(0, 100)).unwrap_or(0)
    }
}

/// Audit a page's blocks for lead-capture quality.
#[must_use]
pub fn run_refiner(page: &[Block]) -> RefinerResult {
    let mut audit = Audit::default();

    check_contrast(page, &mut audit);
    check_image_quality(page, &mut audit);
    check_cta(page, &mut audit);
    check_contact(page, &mut audit);
    check_lead_form(page, &mut audit);

    let score = audit.score();
    tracing::debug!(
        blocks = page.len(),
        score,
        blocking = audit.blocking_errors.len(),
        warnings = audit.warnings.len(),
        "refiner audit complete"
    );

    RefinerResult {
        score,
        blocking_errors: audit.blocking_errors,
        warnings: audit.warnings,
        recommended_fixes: audit.recommended_fixes,
        checks: audit.checks,
        evaluated_at: Utc::now(),
    }
}

fn check_contrast(page: &[Block], audit: &mut Audit) {
    // Pages without explicit colors use theme defaults and are not penalized.
    match page.iter().find_map(Block::colors) {
        None => audit.pass(RefinerCheck::Contrast, "No explicit colors; theme defaults apply"),
        Some((text, background)) if !text.eq_ignore_ascii_case(background) => {
            audit.pass(RefinerCheck::Contrast, "Text and background colors differ");
        }
        Some(_) => audit.fail(
            RefinerCheck::Contrast,
            &Failure {
                severity: Severity::Warning,
                error: "Text color matches background color",
                fix: "Choose a text color that contrasts with the block background",
            },
        ),
    }
}

fn check_image_quality(page: &[Block], audit: &mut Audit) {
    match page.iter().find_map(Block::image_size) {
        None => audit.pass(RefinerCheck::ImageQuality, "No image metadata to check"),
        Some((w, h)) if w >= MIN_IMAGE_WIDTH && h >= MIN_IMAGE_HEIGHT => {
            audit.pass(RefinerCheck::ImageQuality, "Image resolution is sufficient");
        }
        Some(_) => audit.fail(
            RefinerCheck::ImageQuality,
            &Failure {
                severity: Severity::Warning,
                error: "Image resolution below 800x600",
                fix: "Replace the image with one at least 800x600 pixels",
            },
        ),
    }
}

fn has_block_type(page: &[Block], types: &[&str]) -> bool {
    page.iter().any(|b| types.contains(&b.block_type.as_str()))
}

fn check_cta(page: &[Block], audit: &mut Audit) {
    if has_block_type(page, CTA_BLOCKS) {
        audit.pass(RefinerCheck::CtaPresence, "Call to action present");
    } else {
        audit.fail(
            RefinerCheck::CtaPresence,
            &Failure {
                severity: Severity::Blocking,
                error: "Call to action missing",
                fix: "Add a CTA form, CTA grid, or booking block",
            },
        );
    }
}

fn check_contact(page: &[Block], audit: &mut Audit) {
    if has_block_type(page, CONTACT_BLOCKS) {
        audit.pass(RefinerCheck::ContactMethod, "Contact method present");
    } else {
        audit.fail(
            RefinerCheck::ContactMethod,
            &Failure {
                severity: Severity::Blocking,
                error: "Contact method missing",
                fix: "Add contact details or a chat widget",
            },
        );
    }
}

fn check_lead_form(page: &[Block], audit: &mut Audit) {
    let Some(form) = page
        .iter()
        .find(|b| FORM_BLOCKS.contains(&b.block_type.as_str()))
    else {
        audit.fail(
            RefinerCheck::LeadFormFields,
            &Failure {
                severity: Severity::Blocking,
                error: "Lead form missing",
                fix: "Add a lead form that captures name and phone",
            },
        );
        return;
    };

    let fields: Vec<String> = form
        .form_fields()
        .iter()
        .map(|f| f.to_lowercase())
        .collect();
    let has_name = fields.iter().any(|f| f.contains("name"));
    let has_phone = fields.iter().any(|f| f.contains("phone"));

    if has_name && has_phone {
        audit.pass(RefinerCheck::LeadFormFields, "Lead form captures name and phone");
    } else {
        audit.fail(
            RefinerCheck::LeadFormFields,
            &Failure {
                severity: Severity::Blocking,
                error: "Lead form missing required fields (name, phone)",
                fix: "Add name and phone fields to the lead form",
            },
        );
    }
}
