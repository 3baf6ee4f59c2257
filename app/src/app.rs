use crate::config::DemoConfig;
use crate::ui;

use eframe::egui;
use eframe::{App, Frame};
use knn_regression::{KnnError, Session};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{info, warn};

/// What the pointer is currently over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    /// A dataset point, by index.
    Known(usize),
    Query,
}

/// The main application struct.
/// The core state lives in the [`Session`]; everything else is presentation.
pub struct KnnApp {
    // --- Core State ---
    pub session: Session<f64>,
    rng: Xoshiro256PlusPlus,

    // --- UI State ---
    pub config: DemoConfig,
    /// The k chosen in the selector, used by the next classify action.
    pub selected_k: usize,
    pub hover: Option<Hover>,
    /// The last error reported by the core, shown under the controls.
    pub status: Option<String>,
}

impl KnnApp {
    /// Creates the application and scatters the first dataset.
    pub fn new(config: DemoConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        };
        let mut app = Self {
            session: Session::new(),
            rng,
            selected_k: config.default_k,
            config,
            hover: None,
            status: None,
        };
        app.scatter();
        app
    }

    /// Replaces the dataset; the query point and its neighbors go with it.
    pub fn scatter(&mut self) {
        self.session.regenerate(self.config.n_points, &mut self.rng);
        self.hover = None;
        self.status = None;
        info!(points = self.session.dataset().len(), "scattered points");
    }

    /// Places the query point at normalized coordinates.
    pub fn place_query(&mut self, x: f64, y: f64) {
        let result = self.session.place(x, y);
        self.report(result);
    }

    /// Runs the regression for the current query point with the selected k.
    pub fn classify(&mut self) {
        match self.session.classify(self.selected_k) {
            Ok(estimate) => {
                info!(k = self.selected_k, estimate, "classified query point");
                self.status = None;
            }
            Err(e) => self.report::<()>(Err(e)),
        }
    }

    fn report<T>(&mut self, result: Result<T, KnnError>) {
        match result {
            Ok(_) => self.status = None,
            Err(e) => {
                warn!(error = %e, "action ignored");
                self.status = Some(e.to_string());
            }
        }
    }
}

impl Default for KnnApp {
    fn default() -> Self {
        Self::new(DemoConfig::default())
    }
}

impl App for KnnApp {
    /// The main update loop, called by eframe on every frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ui::draw_side_panel(self, ctx);
        ui::draw_central_panel(self, ctx);
    }
}
