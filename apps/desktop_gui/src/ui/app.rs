//! The Venture Scout desktop window: the search form with its suggestion
//! cards, the evaluation form with its verdict panel, and the hand-off
//! between the two.

use std::collections::BTreeMap;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};

use client_core::flow::{FlowLifecycle, Settlement};
use client_core::forms::{EvaluationFormDraft, SearchFormDraft};
use client_core::view::{EvaluationView, SearchResultsView, SuggestionCard};
use shared::domain::{Severity, SuggestionId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{failure_notice, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub const SETTINGS_STORAGE_KEY: &str = "venture_scout.settings";

const NO_SUGGESTIONS_NOTICE: &str =
    "No suggestions found. Try different skills or a wider budget.";
/// Breathing room left above the evaluation form when a card hands off to it.
const EVAL_SCROLL_MARGIN: f32 = 20.0;
const TEXT_SCALE_STEP: f32 = 0.1;
const TEXT_SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.8..=1.6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadabilitySettings {
    pub text_scale: f32,
    pub high_contrast: bool,
}

impl ReadabilitySettings {
    pub fn defaults() -> Self {
        Self {
            text_scale: 1.0,
            high_contrast: false,
        }
    }
}

fn scaled_text_styles(text_scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= text_scale;
    }
    styles
}

fn visuals_for_readability(high_contrast: bool) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    if high_contrast {
        visuals.override_text_color = Some(egui::Color32::WHITE);
        visuals.window_fill = egui::Color32::BLACK;
        visuals.panel_fill = egui::Color32::BLACK;
        visuals.extreme_bg_color = egui::Color32::from_rgb(20, 20, 20);
        visuals.faint_bg_color = egui::Color32::from_rgb(32, 32, 32);
        visuals.widgets.noninteractive.bg_stroke =
            egui::Stroke::new(1.0, egui::Color32::from_rgb(200, 200, 200));
    }
    visuals
}

/// Fill, stroke and heading color for a verdict panel.
fn severity_style(
    severity: Severity,
    high_contrast: bool,
) -> (egui::Color32, egui::Stroke, egui::Color32) {
    let (fill, stroke, heading) = match severity {
        Severity::Positive => (
            egui::Color32::from_rgb(26, 62, 38),
            egui::Color32::from_rgb(72, 160, 98),
            egui::Color32::from_rgb(140, 230, 165),
        ),
        Severity::Cautionary => (
            egui::Color32::from_rgb(66, 52, 18),
            egui::Color32::from_rgb(181, 146, 52),
            egui::Color32::from_rgb(235, 200, 110),
        ),
        Severity::Negative => (
            egui::Color32::from_rgb(62, 30, 30),
            egui::Color32::from_rgb(175, 96, 96),
            egui::Color32::from_rgb(240, 150, 150),
        ),
    };
    if high_contrast {
        (egui::Color32::BLACK, egui::Stroke::new(2.0, stroke), heading)
    } else {
        (fill, egui::Stroke::new(1.0, stroke), heading)
    }
}

#[derive(Debug, Default)]
enum SearchPanel {
    #[default]
    Idle,
    NoMatches,
    Results(SearchResultsView),
    Failed(String),
}

#[derive(Debug, Default)]
enum EvaluationPanel {
    #[default]
    Idle,
    Verdict(EvaluationView),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    EvaluationNeighborhood,
}

/// Deferred card interactions, applied after the card list finishes
/// rendering so the list is never mutated mid-iteration.
enum CardAction {
    ToggleSteps(SuggestionId),
    EvaluateIdea(String),
}

pub struct AdvisorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    search_form: SearchFormDraft,
    search_flow: FlowLifecycle,
    search_panel: SearchPanel,

    eval_form: EvaluationFormDraft,
    eval_flow: FlowLifecycle,
    eval_panel: EvaluationPanel,

    pending_focus: Option<FocusTarget>,
    scroll_to_evaluation: bool,
    scroll_to_top: bool,

    status: String,
    worker_failed: bool,

    readability: ReadabilitySettings,
    applied_readability: Option<ReadabilitySettings>,
}

impl AdvisorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted_settings: Option<ReadabilitySettings>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            search_form: SearchFormDraft::default(),
            search_flow: FlowLifecycle::new(),
            search_panel: SearchPanel::Idle,
            eval_form: EvaluationFormDraft::default(),
            eval_flow: FlowLifecycle::new(),
            eval_panel: EvaluationPanel::Idle,
            pending_focus: None,
            scroll_to_evaluation: false,
            scroll_to_top: false,
            status: String::new(),
            worker_failed: false,
            readability: persisted_settings.unwrap_or_else(ReadabilitySettings::defaults),
            applied_readability: None,
        }
    }

    // ---------- event pump ----------

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::SearchSettled { ticket, outcome } => {
                    match self.search_flow.settle(ticket) {
                        Settlement::Stale => {
                            tracing::debug!("discarding stale search settlement");
                        }
                        Settlement::Current => match outcome {
                            Ok(body) if body.results.is_empty() => {
                                self.search_panel = SearchPanel::NoMatches;
                                self.status = "No suggestions found.".to_string();
                            }
                            Ok(body) => {
                                self.status =
                                    format!("{} suggestion(s) received.", body.results.len());
                                self.search_panel = SearchPanel::Results(
                                    SearchResultsView::from_results(&body.results),
                                );
                            }
                            Err(err) => {
                                let notice = failure_notice(&err);
                                self.status = notice.clone();
                                self.search_panel = SearchPanel::Failed(notice);
                            }
                        },
                    }
                }
                UiEvent::EvaluationSettled {
                    ticket,
                    business_name,
                    outcome,
                } => match self.eval_flow.settle(ticket) {
                    Settlement::Stale => {
                        tracing::debug!("discarding stale evaluation settlement");
                    }
                    Settlement::Current => match outcome {
                        Ok(body) => {
                            self.status = "Evaluation ready.".to_string();
                            self.eval_panel = EvaluationPanel::Verdict(EvaluationView::new(
                                &business_name,
                                &body,
                            ));
                        }
                        Err(err) => {
                            let notice = failure_notice(&err);
                            self.status = notice.clone();
                            self.eval_panel = EvaluationPanel::Failed(notice);
                        }
                    },
                },
                UiEvent::WorkerFailed(message) => {
                    self.worker_failed = true;
                    self.status = message;
                }
            }
        }
    }

    // ---------- submissions ----------

    fn submit_search(&mut self) {
        let Some(ticket) = self.search_flow.submit() else {
            return;
        };
        self.search_panel = SearchPanel::Idle;
        let cmd = BackendCommand::Search {
            ticket,
            query: self.search_form.to_query(),
        };
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.search_flow.settle(ticket);
        }
    }

    fn submit_evaluation(&mut self) {
        let Some(ticket) = self.eval_flow.submit() else {
            return;
        };
        self.eval_panel = EvaluationPanel::Idle;
        let cmd = BackendCommand::Evaluate {
            ticket,
            query: self.eval_form.to_query(),
        };
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.eval_flow.settle(ticket);
        }
    }

    // ---------- readability ----------

    fn apply_readability_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_readability == Some(self.readability) {
            return;
        }
        let mut style = (*ctx.style()).clone();
        style.visuals = visuals_for_readability(self.readability.high_contrast);
        style.text_styles = scaled_text_styles(self.readability.text_scale);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        ctx.set_style(style);
        self.applied_readability = Some(self.readability);
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Venture Scout").strong().size(18.0));
                ui.separator();
                if ui
                    .button("A−")
                    .on_hover_text("Smaller text")
                    .clicked()
                {
                    let scale = self.readability.text_scale - TEXT_SCALE_STEP;
                    self.readability.text_scale =
                        scale.clamp(*TEXT_SCALE_RANGE.start(), *TEXT_SCALE_RANGE.end());
                }
                if ui.button("A+").on_hover_text("Larger text").clicked() {
                    let scale = self.readability.text_scale + TEXT_SCALE_STEP;
                    self.readability.text_scale =
                        scale.clamp(*TEXT_SCALE_RANGE.start(), *TEXT_SCALE_RANGE.end());
                }
                ui.checkbox(&mut self.readability.high_contrast, "High contrast");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !self.status.is_empty() {
                        ui.small(egui::RichText::new(&self.status).weak());
                    }
                });
            });
        });
    }

    // ---------- form widgets ----------

    fn text_field(
        ui: &mut egui::Ui,
        id: &'static str,
        label: &str,
        hint: &str,
        value: &mut String,
        should_focus: bool,
    ) -> egui::Response {
        ui.label(egui::RichText::new(label).strong());
        let edit = egui::TextEdit::singleline(value)
            .id_salt(id)
            .hint_text(
                egui::RichText::new(hint)
                    .color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
            )
            .desired_width(f32::INFINITY);
        let response = ui.add_sized([ui.available_width(), 30.0], edit);
        if should_focus {
            response.request_focus();
        }
        response
    }

    fn section_frame(ui: &egui::Ui) -> egui::Frame {
        egui::Frame::new()
            .fill(ui.visuals().faint_bg_color)
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(12))
    }

    fn show_search_form(&mut self, ui: &mut egui::Ui) {
        Self::section_frame(ui).show(ui, |ui| {
            ui.label(
                egui::RichText::new("Find opportunities in your neighborhood")
                    .strong()
                    .size(16.0),
            );
            ui.add_space(4.0);

            Self::text_field(
                ui,
                "search_neighborhood",
                "Neighborhood",
                "Where do you live?",
                &mut self.search_form.neighborhood,
                false,
            );
            Self::text_field(
                ui,
                "search_skills",
                "Skills",
                "What are you good at?",
                &mut self.search_form.skills,
                false,
            );
            Self::text_field(
                ui,
                "search_interests",
                "Interests",
                "What kind of work do you enjoy?",
                &mut self.search_form.interests,
                false,
            );
            Self::text_field(
                ui,
                "search_dislikes",
                "Things to avoid",
                "Work you would rather not do",
                &mut self.search_form.dislikes,
                false,
            );

            ui.columns(2, |columns| {
                Self::text_field(
                    &mut columns[0],
                    "search_investment",
                    "Budget to invest",
                    "e.g. 1500",
                    &mut self.search_form.investment,
                    false,
                );
                Self::text_field(
                    &mut columns[1],
                    "search_hours",
                    "Hours per week",
                    "e.g. 20",
                    &mut self.search_form.hours_available,
                    false,
                );
            });

            Self::text_field(
                ui,
                "search_audience",
                "Audience to serve",
                "Who would you like to serve?",
                &mut self.search_form.priority_audience,
                false,
            );
            ui.checkbox(
                &mut self.search_form.accessibility_mode,
                "I need ideas that work with limited mobility",
            );

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let can_submit = !self.search_flow.is_submitting() && !self.worker_failed;
                let button =
                    egui::Button::new(egui::RichText::new("Find opportunities").strong());
                if ui.add_enabled(can_submit, button).clicked() {
                    self.submit_search();
                }
                if self.search_flow.is_submitting() {
                    ui.add(egui::Spinner::new().size(16.0));
                    ui.weak("Scoring your profile...");
                }
            });
        });
    }

    // ---------- search results ----------

    fn show_search_panel(&mut self, ui: &mut egui::Ui) {
        let mut actions: Vec<CardAction> = Vec::new();

        match &self.search_panel {
            SearchPanel::Idle => {}
            SearchPanel::NoMatches => {
                Self::section_frame(ui).show(ui, |ui| {
                    ui.label(NO_SUGGESTIONS_NOTICE);
                });
            }
            SearchPanel::Failed(notice) => {
                Self::error_frame(ui, notice);
            }
            SearchPanel::Results(view) => {
                for card in view.cards() {
                    Self::show_suggestion_card(
                        ui,
                        card,
                        view.is_expanded(&card.id),
                        &mut actions,
                    );
                    ui.add_space(6.0);
                }
            }
        }

        for action in actions {
            match action {
                CardAction::ToggleSteps(id) => {
                    if let SearchPanel::Results(view) = &mut self.search_panel {
                        view.toggle_expanded(&id);
                    }
                }
                CardAction::EvaluateIdea(name) => {
                    self.eval_form.adopt_business_name(&name);
                    self.pending_focus = Some(FocusTarget::EvaluationNeighborhood);
                    self.scroll_to_evaluation = true;
                }
            }
        }
    }

    fn show_suggestion_card(
        ui: &mut egui::Ui,
        card: &SuggestionCard,
        expanded: bool,
        actions: &mut Vec<CardAction>,
    ) {
        Self::section_frame(ui).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&card.name).strong().size(15.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{}%", card.score_percent))
                            .strong()
                            .color(egui::Color32::from_rgb(140, 230, 165)),
                    );
                    ui.weak("match");
                });
            });
            if !card.description.is_empty() {
                ui.label(&card.description);
            }

            ui.horizontal(|ui| {
                ui.weak("Starting budget:");
                ui.label(&card.investment_label);
                ui.separator();
                ui.weak("Competition:");
                ui.label(&card.competition_label);
            });
            ui.horizontal(|ui| {
                ui.weak("Why here:");
                ui.label(&card.rationale);
            });

            if let Some(preview) = &card.steps_preview {
                ui.add_space(4.0);
                ui.weak("First steps:");
                if expanded {
                    for (index, step) in card.validation_steps.iter().enumerate() {
                        ui.label(format!("{}. {step}", index + 1));
                    }
                } else {
                    ui.label(preview);
                }
                let toggle_label = if expanded { "Close" } else { "Show more" };
                if ui.small_button(toggle_label).clicked() {
                    actions.push(CardAction::ToggleSteps(card.id.clone()));
                }
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Evaluate this idea").clicked() {
                    actions.push(CardAction::EvaluateIdea(card.name.clone()));
                }
                if let Some(link) = &card.primary_link {
                    let label = link.label.as_deref().unwrap_or(link.link.as_str());
                    ui.hyperlink_to(label, &link.link);
                }
            });
        });
    }

    // ---------- evaluation ----------

    fn show_evaluation_form(&mut self, ui: &mut egui::Ui) -> egui::Rect {
        let focus_neighborhood =
            self.pending_focus.take() == Some(FocusTarget::EvaluationNeighborhood);

        let inner = Self::section_frame(ui).show(ui, |ui| {
            ui.label(
                egui::RichText::new("Already have an idea? Check it")
                    .strong()
                    .size(16.0),
            );
            ui.add_space(4.0);

            Self::text_field(
                ui,
                "eval_neighborhood",
                "Neighborhood",
                "Where would it operate?",
                &mut self.eval_form.neighborhood,
                focus_neighborhood,
            );
            Self::text_field(
                ui,
                "eval_business_name",
                "Business idea",
                "e.g. Food Cart",
                &mut self.eval_form.business_name,
                false,
            );
            Self::text_field(
                ui,
                "eval_skills",
                "Your skills",
                "What are you good at?",
                &mut self.eval_form.skills,
                false,
            );
            Self::text_field(
                ui,
                "eval_investment",
                "Budget to invest",
                "e.g. 800",
                &mut self.eval_form.investment,
                false,
            );

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let can_submit = !self.eval_flow.is_submitting() && !self.worker_failed;
                let button = egui::Button::new(egui::RichText::new("Evaluate").strong());
                if ui.add_enabled(can_submit, button).clicked() {
                    self.submit_evaluation();
                }
                if self.eval_flow.is_submitting() {
                    ui.add(egui::Spinner::new().size(16.0));
                    ui.weak("Evaluating...");
                }
            });
        });
        inner.response.rect
    }

    fn show_verdict_panel(&mut self, ui: &mut egui::Ui) {
        match &self.eval_panel {
            EvaluationPanel::Idle => {}
            EvaluationPanel::Failed(notice) => {
                Self::error_frame(ui, notice);
            }
            EvaluationPanel::Verdict(view) => {
                let (fill, stroke, heading_color) =
                    severity_style(view.severity, self.readability.high_contrast);
                let mut wants_suggestions = false;

                egui::Frame::new()
                    .fill(fill)
                    .stroke(stroke)
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::same(12))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{}: {}",
                                view.heading,
                                view.verdict.label()
                            ))
                            .strong()
                            .size(16.0)
                            .color(heading_color),
                        );
                        for reason in &view.reasons {
                            ui.label(format!("• {reason}"));
                        }
                        if view.offer_suggestions {
                            ui.add_space(4.0);
                            if ui.button("See good options for my profile").clicked() {
                                wants_suggestions = true;
                            }
                        }
                    });

                // Pure navigation back to the search form; no request is issued.
                if wants_suggestions {
                    self.scroll_to_top = true;
                }
            }
        }
    }

    fn error_frame(ui: &mut egui::Ui, notice: &str) {
        egui::Frame::new()
            .fill(egui::Color32::from_rgb(62, 30, 30))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(notice).color(egui::Color32::WHITE));
            });
    }
}

impl eframe::App for AdvisorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_readability_if_needed(ctx);
        self.show_top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if self.scroll_to_top {
                        ui.scroll_to_cursor(Some(egui::Align::TOP));
                        self.scroll_to_top = false;
                    }

                    ui.add_space(8.0);
                    self.show_search_form(ui);
                    ui.add_space(8.0);
                    self.show_search_panel(ui);

                    ui.add_space(12.0);
                    let eval_rect = self.show_evaluation_form(ui);
                    if self.scroll_to_evaluation {
                        let target =
                            eval_rect.expand2(egui::vec2(0.0, EVAL_SCROLL_MARGIN));
                        ui.scroll_to_rect(target, Some(egui::Align::TOP));
                        self.scroll_to_evaluation = false;
                    }

                    ui.add_space(8.0);
                    self.show_verdict_panel(ui);
                    ui.add_space(16.0);
                });
        });

        let busy = self.search_flow.is_submitting() || self.eval_flow.is_submitting();
        if busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.readability) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
