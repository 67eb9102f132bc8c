//! Dashboard state and keyboard handling

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::features::{SliderField, SliderValues};
use crate::model::{ModelInfo, PriceModel};
use crate::presentation::Presentation;
use crate::ranking::RankedResultSet;
use crate::service::PriceService;

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Slider values changed; predictions must be recomputed
    Recompute,
    /// Only the selection changed
    Redraw,
    Ignore,
}

/// Application state for the dashboard
pub struct DashboardApp {
    pub values: SliderValues,
    pub selected: usize,
    pub ranked: RankedResultSet,
    pub last_update: Option<DateTime<Local>>,
    pub error_message: Option<String>,
    pub presentation: Presentation,
    pub model_info: Option<ModelInfo>,
}

impl DashboardApp {
    pub fn new(presentation: Presentation, model_info: Option<ModelInfo>) -> Self {
        Self {
            values: SliderValues::default(),
            selected: 0,
            ranked: RankedResultSet::default(),
            last_update: None,
            error_message: None,
            presentation,
            model_info,
        }
    }

    pub fn selected_field(&self) -> SliderField {
        SliderField::ALL[self.selected]
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        let field = self.selected_field();
        let before = self.values;

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyAction::Quit
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.selected = (self.selected + SliderField::ALL.len() - 1) % SliderField::ALL.len();
                return KeyAction::Redraw;
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected = (self.selected + 1) % SliderField::ALL.len();
                return KeyAction::Redraw;
            }
            KeyCode::Left | KeyCode::Char('h') => field.nudge(&mut self.values, -1),
            KeyCode::Right | KeyCode::Char('l') => field.nudge(&mut self.values, 1),
            KeyCode::Char('[') => field.nudge(&mut self.values, -10),
            KeyCode::Char(']') => field.nudge(&mut self.values, 10),
            KeyCode::Home => field.set(&mut self.values, field.spec().min),
            KeyCode::End => field.set(&mut self.values, field.spec().max),
            KeyCode::Char('d') | KeyCode::Char('D') => self.values = SliderValues::default(),
            _ => return KeyAction::Ignore,
        }

        if self.values != before {
            KeyAction::Recompute
        } else {
            KeyAction::Ignore
        }
    }

    /// Re-run the prediction pipeline for the current slider values
    ///
    /// On failure no partial results are kept; the error replaces the chart.
    pub fn refresh<M: PriceModel>(&mut self, service: &PriceService<M>) {
        match service.evaluate(&self.values) {
            Ok(ranked) => {
                self.ranked = ranked;
                self.last_update = Some(Local::now());
                self.error_message = None;
            }
            Err(e) => {
                warn!(error = %e, "Prediction failed");
                self.ranked = RankedResultSet::default();
                self.error_message = Some(e.to_string());
            }
        }
    }
}
