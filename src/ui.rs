use crate::clipboard::write_clipboard_string;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::dispatch::{DispatchState, Dispatcher};
use crate::lang::{SourceLang, TargetLang, TranslationRequest};
use crate::position::WindowPosition;
use crate::translator::Translator;
use crate::worker::TranslationWorker;
use eframe::egui;
use once_cell::sync::OnceCell;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const TITLE: &str = "autotrans";

/// Font files tried in order for Japanese glyphs.
const CJK_FONTS: &[&str] = &[
    r"C:\Windows\Fonts\YuGothM.ttc",
    r"C:\Windows\Fonts\meiryo.ttc",
    r"C:\Windows\Fonts\msgothic.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
];

struct TranslatorApp {
    input: String,
    source: SourceLang,
    target: TargetLang,
    debouncer: Debouncer,
    dispatcher: Dispatcher,
    position: WindowPosition,
    position_path: PathBuf,
    saved: bool,
}

impl TranslatorApp {
    fn request(&self) -> TranslationRequest {
        TranslationRequest::new(self.input.clone(), self.source, self.target)
    }

    fn track_position(&mut self, ctx: &egui::Context) {
        if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
            self.position = WindowPosition { x: rect.min.x.round() as i32, y: rect.min.y.round() as i32 };
        }
    }

    fn save_position(&mut self) {
        if self.saved {
            return;
        }
        self.saved = true;
        if let Err(e) = self.position.save(&self.position_path) {
            warn!("Failed to save window position: {}", e);
        }
    }

    fn language_bar(&mut self, ui: &mut egui::Ui) -> bool {
        let (source, target) = (self.source, self.target);
        ui.horizontal(|ui| {
            ui.label("From:");
            egui::ComboBox::from_id_source("source_lang")
                .selected_text(self.source.label())
                .show_ui(ui, |ui| {
                    for lang in SourceLang::ALL {
                        ui.selectable_value(&mut self.source, lang, lang.label());
                    }
                });
            ui.label("To:");
            egui::ComboBox::from_id_source("target_lang")
                .selected_text(self.target.label())
                .show_ui(ui, |ui| {
                    for lang in TargetLang::ALL {
                        ui.selectable_value(&mut self.target, lang, lang.label());
                    }
                });
            if self.dispatcher.is_busy() {
                ui.spinner();
            }
        });
        source != self.source || target != self.target
    }
}

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.track_position(ctx);
        if ctx.input(|i| i.viewport().close_requested()) {
            info!("Main UI: close requested");
            self.debouncer.cancel();
            self.save_position();
        }

        self.dispatcher.poll();

        let mut edited = false;
        egui::TopBottomPanel::top("languages").show(ctx, |ui| {
            edited |= self.language_bar(ui);
        });

        let output = self.dispatcher.output().clone();
        let errored = self.dispatcher.state() == DispatchState::Errored;
        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if output.copy_visible {
                    let label = format!("{} Copy", egui_phosphor::regular::COPY);
                    if ui.button(label).clicked() && !write_clipboard_string(&output.text) {
                        ui.output_mut(|o| o.copied_text = output.text.clone());
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let width = ui.available_width();
            let half = ((ui.available_height() - ui.spacing().item_spacing.y) / 2.0).max(40.0);
            let resp = ui.add_sized(
                [width, half],
                egui::TextEdit::multiline(&mut self.input).hint_text("Type the text to translate here"),
            );
            edited |= resp.changed();

            let mut shown = output.text.as_str();
            let mut pane = egui::TextEdit::multiline(&mut shown).hint_text("The translation appears here");
            if errored {
                pane = pane.text_color(ui.visuals().error_fg_color);
            }
            ui.add_sized([width, half], pane);
        });

        let now = Instant::now();
        if edited {
            self.debouncer.arm(now);
        }
        if self.debouncer.poll(now) {
            let request = self.request();
            self.dispatcher.dispatch(request);
        }
        if let Some(left) = self.debouncer.remaining(now) {
            ctx.request_repaint_after(left);
        } else if self.dispatcher.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(120));
        }
    }
}

impl Drop for TranslatorApp {
    fn drop(&mut self) {
        self.save_position();
    }
}

fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    let loaded = CJK_FONTS.iter().find_map(|path| fs::read(path).ok().map(|bytes| (path, bytes)));
    match loaded {
        Some((path, bytes)) => {
            info!("Loaded CJK font: {}", path);
            fonts.font_data.insert("cjk".to_owned(), egui::FontData::from_owned(bytes));
            fonts.families.entry(egui::FontFamily::Proportional).or_default().push("cjk".to_owned());
            fonts.families.entry(egui::FontFamily::Monospace).or_default().push("cjk".to_owned());
        }
        None => warn!("No CJK font found; Japanese may render as squares"),
    }
    ctx.set_fonts(fonts);
}

/// Runs the window on the current thread until it is closed.
pub fn run(cfg: &Config, translator: Arc<dyn Translator>, position_path: PathBuf) -> anyhow::Result<()> {
    // the worker wakes the UI once the context exists
    let ctx_slot: Arc<OnceCell<egui::Context>> = Arc::new(OnceCell::new());
    let waker_slot = Arc::clone(&ctx_slot);
    let worker = TranslationWorker::spawn(
        translator,
        Some(Arc::new(move || {
            if let Some(ctx) = waker_slot.get() {
                ctx.request_repaint();
            }
        })),
    )?;
    let dispatcher = Dispatcher::new(worker);

    let position = WindowPosition::load(&position_path).unwrap_or_default();
    let app = TranslatorApp {
        input: String::new(),
        source: cfg.source_lang,
        target: cfg.target_lang,
        debouncer: Debouncer::new(cfg.debounce()),
        dispatcher,
        position,
        position_path,
        saved: false,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([cfg.window_width, cfg.window_height])
            .with_position(egui::pos2(position.x as f32, position.y as f32)),
        ..Default::default()
    };

    info!("Main UI: starting event loop at {}", position);
    eframe::run_native(
        TITLE,
        native_options,
        Box::new(move |cc| {
            install_fonts(&cc.egui_ctx);
            let _ = ctx_slot.set(cc.egui_ctx.clone());
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))?;
    info!("Main UI: event loop exited");
    Ok(())
}
