use baccarat_terminal::display::{
    Bootstrap, DEFAULT_CONFIDENCE, DisplayView, OUTCOME_BOX_CLASS, initialize, predicted_width,
    render_history, render_prediction,
};
use baccarat_terminal::outcome::Outcome;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn non_tie_width_tracks_confidence_inside_band() {
    for step in 0..=100 {
        let c = step as f64 / 100.0;
        for predicted in [Outcome::Player, Outcome::Banker] {
            let mut view = DisplayView::new();
            render_prediction(&mut view, predicted, Outcome::Tie, c);

            let expected = (c * 100.0).clamp(40.0, 80.0);
            assert!(approx(view.prediction_bar.width_pct, expected), "c={c}");
            assert_eq!(
                view.prediction_bar.width_pct + view.opposite_bar.width_pct,
                100.0,
                "c={c}"
            );
        }
    }
}

#[test]
fn out_of_range_confidence_stays_in_band() {
    assert_eq!(predicted_width(Outcome::Banker, -3.0), 40.0);
    assert_eq!(predicted_width(Outcome::Banker, 7.5), 80.0);
    assert_eq!(predicted_width(Outcome::Player, f64::INFINITY), 80.0);
    assert_eq!(predicted_width(Outcome::Player, f64::NEG_INFINITY), 40.0);
    assert_eq!(predicted_width(Outcome::Player, f64::NAN), 40.0);
}

#[test]
fn tie_prediction_uses_fixed_split() {
    for c in [0.0, 0.1, 0.6, 0.99, 5.0] {
        let mut view = DisplayView::new();
        render_prediction(&mut view, Outcome::Tie, Outcome::Banker, c);
        assert_eq!(view.prediction_bar.width_pct, 25.0);
        assert_eq!(view.opposite_bar.width_pct, 75.0);
    }
}

#[test]
fn bars_carry_base_and_background_classes() {
    let mut view = DisplayView::new();
    render_prediction(&mut view, Outcome::Banker, Outcome::Player, 0.72);
    assert_eq!(view.prediction_bar.classes(), vec!["prediction-bar", "banker-bg"]);
    assert_eq!(view.opposite_bar.classes(), vec!["opposite-bar", "player-bg"]);

    // A second render must not leave the previous background behind.
    render_prediction(&mut view, Outcome::Tie, Outcome::Banker, 0.72);
    assert_eq!(view.prediction_bar.classes(), vec!["prediction-bar", "tie-bg"]);
    assert!(!view.prediction_bar.has_class("banker-bg"));
    assert_eq!(view.opposite_bar.classes(), vec!["opposite-bar", "banker-bg"]);
}

#[test]
fn render_prediction_is_idempotent() {
    let mut once = DisplayView::new();
    render_prediction(&mut once, Outcome::Player, Outcome::Banker, 0.66);

    let mut twice = once.clone();
    render_prediction(&mut twice, Outcome::Player, Outcome::Banker, 0.66);
    assert_eq!(once, twice);
}

#[test]
fn history_markers_follow_input_order() {
    let history = [Outcome::Banker, Outcome::Player, Outcome::Tie, Outcome::Banker];
    let mut view = DisplayView::new();
    render_history(&mut view, &history);

    assert_eq!(view.history.len(), history.len());
    for (marker, outcome) in view.history.iter().zip(history) {
        assert_eq!(marker.text(), outcome.code());
        assert_eq!(marker.classes(), [OUTCOME_BOX_CLASS, outcome.bg_class()]);
    }
    assert_eq!(view.history_codes(), vec!["B", "P", "T", "B"]);
}

#[test]
fn render_history_replaces_previous_markers() {
    let mut view = DisplayView::new();
    render_history(&mut view, &[Outcome::Player, Outcome::Player, Outcome::Player]);
    render_history(&mut view, &[Outcome::Tie]);
    assert_eq!(view.history_codes(), vec!["T"]);

    render_history(&mut view, &[]);
    assert!(view.history.is_empty());
}

#[test]
fn initialize_defaults_confidence() {
    let mut view = DisplayView::new();
    initialize(&mut view, &Bootstrap::default());
    assert_eq!(view.prediction_bar.background, Some(Outcome::Banker));
    assert_eq!(view.opposite_bar.background, Some(Outcome::Player));
    assert!(approx(view.prediction_bar.width_pct, DEFAULT_CONFIDENCE * 100.0));
    assert!(approx(view.opposite_bar.width_pct, 40.0));
}

#[test]
fn initialize_prefers_explicit_confidence() {
    let mut view = DisplayView::new();
    let boot = Bootstrap {
        prediction: Outcome::Player,
        opposite: Outcome::Banker,
        confidence: Some(0.75),
    };
    initialize(&mut view, &boot);
    assert!(approx(view.prediction_bar.width_pct, 75.0));
}

#[test]
fn bootstrap_infers_outcomes_from_bar_classes() {
    let boot = Bootstrap::from_bar_classes(
        &["prediction-bar", "banker-bg"],
        &["opposite-bar", "player-bg"],
    );
    assert_eq!(boot.prediction, Outcome::Banker);
    assert_eq!(boot.opposite, Outcome::Player);
    assert_eq!(boot.confidence, None);

    let unstyled = Bootstrap::from_bar_classes(&["prediction-bar"], &[]);
    assert_eq!(unstyled.prediction, Outcome::Tie);
    assert_eq!(unstyled.opposite, Outcome::Tie);
}

#[test]
fn bootstrap_from_view_round_trips_rendered_outcomes() {
    let mut view = DisplayView::new();
    render_prediction(&mut view, Outcome::Player, Outcome::Banker, 0.9);
    let boot = Bootstrap::from_view(&view);
    assert_eq!(boot.prediction, Outcome::Player);
    assert_eq!(boot.opposite, Outcome::Banker);
}

#[test]
fn text_dump_lists_history_and_bars() {
    let mut view = DisplayView::new();
    render_history(&mut view, &[Outcome::Banker, Outcome::Player]);
    render_prediction(&mut view, Outcome::Banker, Outcome::Player, 0.72);
    let text = view.to_text();
    assert!(text.contains("history-display: B P"));
    assert!(text.contains("prediction-bar: 72.0% [prediction-bar banker-bg]"));
    assert!(text.contains("opposite-bar: 28.0% [opposite-bar player-bg]"));
}
