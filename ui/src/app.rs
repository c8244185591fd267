use egui::RichText;
use steward_business::SessionState;
use steward_states::{StateCtx, Time};

use crate::state::State;
use crate::text::{Text, tr};
use crate::widgets;

pub struct StewardApp {
    state: State,
}

impl StewardApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    /// Direct access to the state context, mainly for integration tests.
    pub fn ctx_mut(&mut self) -> &mut StateCtx {
        &mut self.state.ctx
    }
}

impl eframe::App for StewardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Advance the frame clock, then apply results from command futures.
        self.state.ctx.state_mut::<Time>().tick();
        self.state.ctx.sync_computes();

        // The admin's own credentials changed: stop rendering the console.
        if self.state.ctx.state::<SessionState>().is_invalidated() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(64.0);
                    ui.heading(tr(Text::SessionExpired));
                    ui.add_space(8.0);
                    ui.label(tr(Text::SessionExpiredPrompt));
                });
            });
            return;
        }

        let admin = self.state.ctx.state::<SessionState>().username();
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.label(RichText::new(tr(Text::AppTitle)).strong());
                widgets::env_version(ui);
                if let Some(admin) = admin {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(admin.as_str());
                    });
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::users_panel(&mut self.state.ctx, ui);
        });

        widgets::show_toasts(&mut self.state.ctx, ctx);

        // Dispatch everything the widgets enqueued this frame.
        self.state.ctx.flush_commands();
    }
}
