// ui.rs - Controls, status and the grid painter for the visualizer

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use pathviz_core::{MazeAlgorithm, MazeType, PathAlgorithm, Position, SessionKind};

use crate::MazeVisualizer;
use crate::board::Paint;

const PASSAGE: Color32 = Color32::WHITE;
const WALL: Color32 = Color32::from_rgb(44, 62, 80);
const VISITED: Color32 = Color32::from_rgb(173, 216, 230);
const PATH: Color32 = Color32::from_rgb(241, 196, 15);
const START: Color32 = Color32::from_rgb(46, 204, 113);
const END: Color32 = Color32::from_rgb(231, 76, 60);

fn paint_color(paint: Paint) -> Color32 {
    match paint {
        Paint::Passage => PASSAGE,
        Paint::Wall => WALL,
        Paint::Visited => VISITED,
        Paint::Path => PATH,
        Paint::Start => START,
        Paint::End => END,
    }
}

impl eframe::App for MazeVisualizer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let busy = self.busy_kind();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Maze & Path Finding Visualizer");

            ui.horizontal(|ui| {
                ui.label("Maze:");
                egui::ComboBox::from_id_source("maze_algorithm")
                    .selected_text(self.maze_algorithm.label())
                    .show_ui(ui, |ui| {
                        for algorithm in MazeAlgorithm::ALL {
                            ui.selectable_value(&mut self.maze_algorithm, algorithm, algorithm.label());
                        }
                    });

                egui::ComboBox::from_id_source("maze_type")
                    .selected_text(self.maze_type.label())
                    .show_ui(ui, |ui| {
                        for maze_type in MazeType::ALL {
                            ui.selectable_value(&mut self.maze_type, maze_type, maze_type.label());
                        }
                    });

                if ui.button("Generate Maze").clicked() {
                    self.generate_maze();
                }
            });

            ui.horizontal(|ui| {
                ui.label("Search:");
                egui::ComboBox::from_id_source("path_algorithm")
                    .selected_text(self.path_algorithm.label())
                    .show_ui(ui, |ui| {
                        for algorithm in PathAlgorithm::ALL {
                            ui.selectable_value(&mut self.path_algorithm, algorithm, algorithm.label());
                        }
                    });

                if ui.add_enabled(busy.is_none(), egui::Button::new("Find Path")).clicked() {
                    self.find_path();
                }
                if ui.button("Reset").clicked() {
                    self.reset_board();
                }
                if ui.add_enabled(busy.is_none(), egui::Button::new("Check Maze")).clicked() {
                    self.check_validity();
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                ui.add_enabled(
                    busy.is_none(),
                    egui::Slider::new(&mut self.speed_ms, 1..=100).suffix(" ms"),
                );
            });

            match busy {
                Some(SessionKind::Generation) => {
                    ui.label("Generating maze... Please wait.");
                }
                Some(SessionKind::Pathfinding) => {
                    ui.label("Finding path...");
                }
                None => {
                    ui.label("Click a cell to move the end node.");
                }
            }

            let status = self.board.lock().status.clone();
            if let Some(status) = status {
                let color = if status.success {
                    Color32::from_rgb(39, 174, 96)
                } else {
                    Color32::from_rgb(192, 57, 43)
                };
                ui.colored_label(color, status.message);
            }

            ui.separator();

            let clicked = self.draw_grid(ui);
            if let Some(pos) = clicked {
                self.handle_cell_click(pos);
            }

            ui.separator();
            let (visited, path) = {
                let board = self.board.lock();
                (board.visited_count(), board.path_count())
            };
            ui.label(format!("Visited: {visited} | Path: {path}"));

            ui.horizontal(|ui| {
                for (name, color) in [
                    ("Start", START),
                    ("End", END),
                    ("Wall", WALL),
                    ("Visited", VISITED),
                    ("Path", PATH),
                ] {
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, color);
                    ui.label(name);
                }
            });
        });

        if busy.is_some() {
            ctx.request_repaint();
        }
    }
}

impl MazeVisualizer {
    /// Paints the board and returns the cell under a click, if any.
    fn draw_grid(&self, ui: &mut egui::Ui) -> Option<Position> {
        let board = self.board.lock();
        let (rows, cols) = (board.maze.rows(), board.maze.cols());
        let box_size = self.cell_size;

        let total_size = Vec2::new(box_size * cols as f32, box_size * rows as f32);
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
        let start_pos = response.rect.min;

        for row in 0..rows {
            for col in 0..cols {
                let rect = Rect::from_min_size(
                    egui::pos2(
                        start_pos.x + col as f32 * box_size,
                        start_pos.y + row as f32 * box_size,
                    ),
                    Vec2::splat(box_size),
                );
                let color = paint_color(board.paint(Position::new(row, col)));
                painter.rect_filled(rect, 0.0, color);
                painter.rect_stroke(rect, 0.0, Stroke::new(0.5, Color32::from_gray(200)));
            }
        }

        if !response.clicked() {
            return None;
        }
        let pos = response.interact_pointer_pos()? - start_pos;
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let (row, col) = ((pos.y / box_size) as usize, (pos.x / box_size) as usize);
        (row < rows && col < cols).then(|| Position::new(row, col))
    }
}
