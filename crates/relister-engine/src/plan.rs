use crate::selectors;
use relister_core::{AutomationSurface, Locator, Result};
use serde::Serialize;

/// How a select option is matched against its visible text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMatch {
    /// Any span with exactly this text
    Exact,
    /// Auto-direction span with exactly this text
    AutoDir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    MultilineText,
    /// Expand the field, then pick the option whose text matches the value
    Select(OptionMatch),
    /// Newline-separated file paths for a multi-file input
    FileUpload,
}

/// One form-population step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormStep {
    /// The field's aria-label
    pub field: String,
    pub value: String,
    pub kind: InputKind,
    /// Bring the field into view first; some fields are only interactable
    /// once scrolled to
    pub scroll_first: bool,
}

impl FormStep {
    pub fn new(field: impl Into<String>, value: impl Into<String>, kind: InputKind) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            kind,
            scroll_first: false,
        }
    }

    pub fn text(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, value, InputKind::Text)
    }

    pub fn multiline(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, value, InputKind::MultilineText)
    }

    pub fn select(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, value, InputKind::Select(OptionMatch::Exact))
    }

    pub fn select_auto(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, value, InputKind::Select(OptionMatch::AutoDir))
    }

    pub fn photos(paths: impl Into<String>) -> Self {
        Self::new("Photos", paths, InputKind::FileUpload)
    }

    /// Scroll to the field before touching it
    pub fn scrolled(mut self) -> Self {
        self.scroll_first = true;
        self
    }

    /// The element this step interacts with first
    pub fn target(&self) -> Locator {
        match self.kind {
            InputKind::Text => selectors::field_input(&self.field),
            InputKind::MultilineText => selectors::field_textarea(&self.field),
            InputKind::Select(_) => selectors::field_label(&self.field),
            InputKind::FileUpload => Locator::css(selectors::PHOTO_INPUT),
        }
    }

    /// Option to pick once a select is expanded
    pub fn option(&self) -> Option<Locator> {
        match self.kind {
            InputKind::Select(OptionMatch::Exact) => Some(Locator::span_text(&self.value)),
            InputKind::Select(OptionMatch::AutoDir) => Some(Locator::auto_span_text(&self.value)),
            _ => None,
        }
    }

    pub async fn execute<S>(&self, surface: &S) -> Result<()>
    where
        S: AutomationSurface + ?Sized,
    {
        let target = self.target();
        tracing::debug!("Filling '{}' via {}", self.field, target);

        if self.scroll_first {
            surface.scroll_into_view(&target).await?;
        }

        match self.kind {
            InputKind::Text | InputKind::MultilineText => {
                surface.send_keys(&target, &self.value).await
            }
            InputKind::FileUpload => surface.upload_files(&target, &self.value).await,
            InputKind::Select(_) => {
                surface.click(&target).await?;
                match self.option() {
                    Some(option) => surface.click(&option).await,
                    None => Ok(()),
                }
            }
        }
    }
}

/// Ordered form-population steps
///
/// Order follows the form top to bottom. Fields further down only become
/// interactable after the ones above them are filled and scrolled past.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepPlan {
    steps: Vec<FormStep>,
}

impl StepPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: FormStep) {
        self.steps.push(step);
    }

    pub fn then(mut self, step: FormStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn extend(&mut self, other: StepPlan) {
        self.steps.extend(other.steps);
    }

    pub fn steps(&self) -> &[FormStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Field names in plan order
    pub fn fields(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.field.as_str()).collect()
    }

    /// Find the step for `field`
    pub fn step(&self, field: &str) -> Option<&FormStep> {
        self.steps.iter().find(|step| step.field == field)
    }

    /// Run every step in order, stopping at the first failure
    pub async fn execute<S>(&self, surface: &S) -> Result<()>
    where
        S: AutomationSurface + ?Sized,
    {
        for step in &self.steps {
            step.execute(surface).await?;
        }
        Ok(())
    }
}
