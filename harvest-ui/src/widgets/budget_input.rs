//! Budget slider with a synchronised free-text field.
//!
//! The widget keeps two fields for one logical value: the committed
//! [`Amount`] and the text buffer the user types into. The buffer follows
//! the value except while a drag is in progress, and is always re-rendered
//! from the value on blur.

use std::fmt;

use harvest_core::{
    Amount, BudgetBounds, RecommendedSteps,
    calculations::{format_amount, parse_amount, snap_to_recommended},
};
use tracing::{debug, trace};

type ChangeListener = Box<dyn FnMut(Amount)>;

pub struct BudgetInput {
    bounds: BudgetBounds,
    steps: RecommendedSteps,
    initial: Amount,
    value: Amount,
    text: String,
    dragging: bool,
    listener: Option<ChangeListener>,
}

impl BudgetInput {
    /// `initial` is clamped into `bounds`.
    pub fn new(
        bounds: BudgetBounds,
        steps: RecommendedSteps,
        initial: Amount,
    ) -> Self {
        let value = bounds.clamp(initial);
        Self {
            bounds,
            steps,
            initial: value,
            value,
            text: format_amount(value),
            dragging: false,
            listener: None,
        }
    }

    /// Registers the callback fired with every accepted value.
    /// Replaces any previous listener.
    pub fn on_change(
        &mut self,
        listener: impl FnMut(Amount) + 'static,
    ) {
        self.listener = Some(Box::new(listener));
    }

    pub fn value(&self) -> Amount {
        self.value
    }

    /// The text field contents, which may lag behind or disagree with
    /// [`value`](Self::value) until the next blur.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bounds(&self) -> &BudgetBounds {
        &self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Label shown next to the slider.
    pub fn display(&self) -> String {
        format_amount(self.value)
    }

    /// Handles a keystroke in the text field.
    ///
    /// Parseable text is clamped and committed immediately; the buffer keeps
    /// what the user typed. Unparseable text only changes the buffer.
    pub fn edit_text(
        &mut self,
        text: impl Into<String>,
    ) {
        self.text = text.into();
        match parse_amount(&self.text) {
            Some(parsed) => self.commit(self.bounds.clamp(parsed)),
            None => debug!(text = %self.text, "ignoring unparseable budget text"),
        }
    }

    /// The text field lost focus: show the committed value again.
    pub fn blur(&mut self) {
        let clamped = self.bounds.clamp(self.value);
        if clamped != self.value {
            self.commit(clamped);
        }
        self.sync_text();
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Handles a slider movement to `raw`.
    ///
    /// Outside a drag (a click on the track, arrow keys) the text field
    /// follows straight away.
    pub fn slide_to(
        &mut self,
        raw: Amount,
    ) {
        let quantized = self.bounds.quantize(raw);
        let snapped = snap_to_recommended(quantized, &self.steps, &self.bounds);
        trace!(raw, quantized, snapped, "budget slider moved");
        self.commit(snapped);
        if !self.dragging {
            self.sync_text();
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.sync_text();
    }

    /// Sets the value programmatically, clamped into range. The listener
    /// only hears about it if the value actually changes.
    pub fn set_value(
        &mut self,
        value: Amount,
    ) {
        let value = self.bounds.clamp(value);
        if value != self.value {
            self.commit(value);
        }
        self.sync_text();
    }

    /// Returns to the initial value and ends any drag.
    pub fn reset(&mut self) {
        self.dragging = false;
        self.set_value(self.initial);
    }

    fn commit(
        &mut self,
        value: Amount,
    ) {
        self.value = value;
        if let Some(listener) = self.listener.as_mut() {
            listener(value);
        }
    }

    fn sync_text(&mut self) {
        self.text = format_amount(self.value);
    }
}

impl fmt::Debug for BudgetInput {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("BudgetInput")
            .field("bounds", &self.bounds)
            .field("value", &self.value)
            .field("text", &self.text)
            .field("dragging", &self.dragging)
            .finish_non_exhaustive()
    }
}

impl Default for BudgetInput {
    fn default() -> Self {
        Self::new(
            BudgetBounds::default(),
            RecommendedSteps::default(),
            harvest_core::DEFAULT_INITIAL_BUDGET,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    fn recording_input() -> (BudgetInput, Rc<RefCell<Vec<Amount>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut input = BudgetInput::default();
        let sink = Rc::clone(&seen);
        input.on_change(move |value| sink.borrow_mut().push(value));
        (input, seen)
    }

    #[test]
    fn starts_with_formatted_initial_value() {
        let input = BudgetInput::default();

        assert_eq!(input.value(), 50_000);
        assert_eq!(input.text(), "₹50k");
    }

    #[test]
    fn initial_value_is_clamped() {
        let input = BudgetInput::new(BudgetBounds::default(), RecommendedSteps::default(), 5);

        assert_eq!(input.value(), 10_000);
    }

    #[test]
    fn valid_text_commits_but_keeps_buffer() {
        let (mut input, seen) = recording_input();

        input.edit_text("75k");

        assert_eq!(input.value(), 75_000);
        assert_eq!(input.text(), "75k");
        assert_eq!(*seen.borrow(), vec![75_000]);
    }

    #[test]
    fn out_of_range_text_is_clamped_silently() {
        let (mut input, seen) = recording_input();

        input.edit_text("5L");
        assert_eq!(input.value(), 200_000);

        input.edit_text("500");
        assert_eq!(input.value(), 10_000);

        assert_eq!(*seen.borrow(), vec![200_000, 10_000]);
    }

    #[test]
    fn text_commits_are_not_snapped() {
        let (mut input, _) = recording_input();

        input.edit_text("48500");

        assert_eq!(input.value(), 48_500);
    }

    #[test]
    fn unparseable_text_is_retained_until_blur() {
        let (mut input, seen) = recording_input();
        input.edit_text("80k");

        input.edit_text("80k?");
        assert_eq!(input.value(), 80_000);
        assert_eq!(input.text(), "80k?");

        input.blur();
        assert_eq!(input.text(), "₹80k");
        assert_eq!(*seen.borrow(), vec![80_000]);
    }

    #[test]
    fn blur_renders_canonical_text() {
        let (mut input, _) = recording_input();
        input.edit_text(" 1,50,000 ");

        input.blur();

        assert_eq!(input.text(), "₹1.5L");
    }

    #[test]
    fn drag_snaps_near_recommended_steps() {
        let (mut input, seen) = recording_input();

        input.begin_drag();
        input.slide_to(97_300);
        input.slide_to(123_000);
        input.end_drag();

        assert_eq!(*seen.borrow(), vec![100_000, 123_000]);
        assert_eq!(input.value(), 123_000);
    }

    #[test]
    fn drag_is_quantized_and_clamped() {
        let (mut input, seen) = recording_input();

        input.begin_drag();
        input.slide_to(131_420);
        input.slide_to(0);
        input.slide_to(900_000);
        input.end_drag();

        assert_eq!(*seen.borrow(), vec![131_000, 10_000, 200_000]);
    }

    #[test]
    fn text_is_frozen_while_dragging() {
        let (mut input, _) = recording_input();
        input.edit_text("60k");

        input.begin_drag();
        input.slide_to(131_000);
        assert_eq!(input.text(), "60k");
        assert!(input.is_dragging());

        input.end_drag();
        assert_eq!(input.text(), "₹1.3L");
        assert!(!input.is_dragging());
    }

    #[test]
    fn click_on_track_resyncs_immediately() {
        let (mut input, _) = recording_input();

        input.slide_to(150_000);

        assert_eq!(input.text(), "₹1.5L");
    }

    #[test]
    fn drag_never_snaps_below_a_raised_minimum() {
        let bounds = BudgetBounds::new(12_000, 200_000, 1_000).unwrap();
        let mut input = BudgetInput::new(bounds, RecommendedSteps::default(), 50_000);

        input.slide_to(12_000);
        assert_eq!(input.value(), 12_000);

        input.slide_to(0);
        assert_eq!(input.value(), 12_000);
    }

    #[test]
    fn set_value_notifies_only_on_change() {
        let (mut input, seen) = recording_input();

        input.set_value(50_000);
        input.set_value(250_000);
        input.set_value(200_000);

        assert_eq!(input.text(), "₹2L");
        assert_eq!(*seen.borrow(), vec![200_000]);
    }

    #[test]
    fn reset_restores_initial_value() {
        let (mut input, _) = recording_input();
        input.edit_text("1.2L");

        input.reset();

        assert_eq!(input.value(), 50_000);
        assert_eq!(input.text(), "₹50k");
    }
}
