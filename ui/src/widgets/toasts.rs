//! Overlay rendering for transient notices.

use egui::{Align2, Context, Frame, Id, Order, RichText, vec2};
use steward_business::NoticeState;
use steward_states::{StateCtx, Time};

/// Renders the notice overlay in the top-right corner and expires old
/// notices against the frame clock.
pub fn show_toasts(state_ctx: &mut StateCtx, ctx: &Context) {
    let now = *state_ctx.state::<Time>().as_ref();

    let notices = state_ctx.state_mut::<NoticeState>();
    notices.prune(now);
    if notices.is_empty() {
        return;
    }

    let mut dismiss = None;
    egui::Area::new(Id::new("steward_toasts"))
        .anchor(Align2::RIGHT_TOP, vec2(-12.0, 12.0))
        .order(Order::Foreground)
        .show(ctx, |ui| {
            for (index, notice) in notices.iter().enumerate() {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&notice.title).strong());
                            ui.label(&notice.description);
                        });
                        if ui.small_button("✕").clicked() {
                            dismiss = Some(index);
                        }
                    });
                });
                ui.add_space(6.0);
            }
        });

    if let Some(index) = dismiss {
        notices.dismiss(index);
    }
}
