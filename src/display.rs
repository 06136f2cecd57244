use crate::outcome::Outcome;

pub const PREDICTION_BAR_ID: &str = "prediction-bar";
pub const OPPOSITE_BAR_ID: &str = "opposite-bar";
pub const HISTORY_DISPLAY_ID: &str = "history-display";
pub const OUTCOME_BOX_CLASS: &str = "outcome-box";

pub const MIN_PREDICTED_WIDTH: f64 = 40.0;
pub const MAX_PREDICTED_WIDTH: f64 = 80.0;
pub const TIE_PREDICTED_WIDTH: f64 = 25.0;

/// Confidence used when the bootstrap carries none.
pub const DEFAULT_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionState {
    pub predicted: Outcome,
    pub opposite: Outcome,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarElement {
    pub id: &'static str,
    pub base_class: &'static str,
    pub background: Option<Outcome>,
    pub width_pct: f64,
}

impl BarElement {
    fn new(id: &'static str) -> Self {
        Self {
            id,
            base_class: id,
            background: None,
            width_pct: 50.0,
        }
    }

    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![self.base_class];
        if let Some(outcome) = self.background {
            classes.push(outcome.bg_class());
        }
        classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    fn reset(&mut self, background: Outcome) {
        self.base_class = self.id;
        self.background = Some(background);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub outcome: Outcome,
}

impl Marker {
    pub fn classes(&self) -> [&'static str; 2] {
        [OUTCOME_BOX_CLASS, self.outcome.bg_class()]
    }

    pub fn text(&self) -> &'static str {
        self.outcome.code()
    }
}

/// Rendered state of the prediction page: two bars plus the history strip.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayView {
    pub prediction_bar: BarElement,
    pub opposite_bar: BarElement,
    pub history: Vec<Marker>,
}

impl Default for DisplayView {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayView {
    pub fn new() -> Self {
        Self {
            prediction_bar: BarElement::new(PREDICTION_BAR_ID),
            opposite_bar: BarElement::new(OPPOSITE_BAR_ID),
            history: Vec::new(),
        }
    }

    pub fn history_codes(&self) -> Vec<&'static str> {
        self.history.iter().map(Marker::text).collect()
    }

    pub fn to_text(&self) -> String {
        let history = if self.history.is_empty() {
            "(empty)".to_string()
        } else {
            self.history_codes().join(" ")
        };
        let bar_line = |bar: &BarElement| {
            format!("{}: {:.1}% [{}]", bar.id, bar.width_pct, bar.classes().join(" "))
        };
        [
            format!("{HISTORY_DISPLAY_ID}: {history}"),
            bar_line(&self.prediction_bar),
            bar_line(&self.opposite_bar),
        ]
        .join("\n")
    }
}

/// Width of the predicted bar in percent. Ties get a fixed short bar;
/// everything else tracks confidence inside the 40..=80 band.
pub fn predicted_width(predicted: Outcome, confidence: f64) -> f64 {
    match predicted {
        Outcome::Tie => TIE_PREDICTED_WIDTH,
        Outcome::Player | Outcome::Banker => {
            if confidence.is_nan() {
                return MIN_PREDICTED_WIDTH;
            }
            (confidence * 100.0).clamp(MIN_PREDICTED_WIDTH, MAX_PREDICTED_WIDTH)
        }
    }
}

pub fn render_prediction(
    view: &mut DisplayView,
    predicted: Outcome,
    opposite: Outcome,
    confidence: f64,
) {
    view.prediction_bar.reset(predicted);
    view.opposite_bar.reset(opposite);

    let width = predicted_width(predicted, confidence);
    view.prediction_bar.width_pct = width;
    view.opposite_bar.width_pct = 100.0 - width;
}

pub fn render_prediction_state(view: &mut DisplayView, state: &PredictionState) {
    render_prediction(view, state.predicted, state.opposite, state.confidence);
}

pub fn render_history(view: &mut DisplayView, history: &[Outcome]) {
    view.history.clear();
    view.history
        .extend(history.iter().map(|&outcome| Marker { outcome }));
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bootstrap {
    pub prediction: Outcome,
    pub opposite: Outcome,
    pub confidence: Option<f64>,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            prediction: Outcome::Banker,
            opposite: Outcome::Player,
            confidence: None,
        }
    }
}

impl Bootstrap {
    /// Recovers the displayed outcomes from the classes already on each bar.
    /// Player wins over Banker when both are present; anything else reads as Tie.
    pub fn from_bar_classes(prediction_classes: &[&str], opposite_classes: &[&str]) -> Self {
        Self {
            prediction: outcome_from_classes(prediction_classes),
            opposite: outcome_from_classes(opposite_classes),
            confidence: None,
        }
    }

    pub fn from_view(view: &DisplayView) -> Self {
        Self::from_bar_classes(
            &view.prediction_bar.classes(),
            &view.opposite_bar.classes(),
        )
    }

    pub fn confidence_or_default(&self) -> f64 {
        self.confidence.unwrap_or(DEFAULT_CONFIDENCE)
    }
}

fn outcome_from_classes(classes: &[&str]) -> Outcome {
    if classes.contains(&Outcome::Player.bg_class()) {
        Outcome::Player
    } else if classes.contains(&Outcome::Banker.bg_class()) {
        Outcome::Banker
    } else {
        Outcome::Tie
    }
}

pub fn initialize(view: &mut DisplayView, bootstrap: &Bootstrap) {
    render_prediction(
        view,
        bootstrap.prediction,
        bootstrap.opposite,
        bootstrap.confidence_or_default(),
    );
}
