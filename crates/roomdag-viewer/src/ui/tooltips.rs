use bevy_egui::egui;

pub fn render_tooltip(ctx: &egui::Context, id: &str, pos: egui::Pos2, lines: Vec<String>) {
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            ui.group(|ui| {
                for line in lines {
                    ui.label(line);
                }
            });
        });
}
