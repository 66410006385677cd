use compartment_store::storage::Cereal;

const MIN_STEP: f32 = 0.125;
const MAX_STEP: f32 = 1024.0;

#[derive(Debug)]
pub struct App {
    pub selected: usize,
    pub step: f32,
    pub report_open: bool,
}

impl App {
    pub fn new(step: f32) -> Self {
        Self {
            selected: 0,
            step: step.clamp(MIN_STEP, MAX_STEP),
            report_open: false,
        }
    }

    pub fn selected_cereal(&self) -> Cereal {
        Cereal::ALL[self.selected.min(Cereal::ALL.len() - 1)]
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = Cereal::ALL.len() as isize;
        let mut idx = self.selected as isize + delta;
        if idx < 0 {
            idx = len - 1;
        } else if idx >= len {
            idx = 0;
        }
        self.selected = idx as usize;
    }

    pub fn double_step(&mut self) {
        self.step = (self.step * 2.0).min(MAX_STEP);
    }

    pub fn halve_step(&mut self) {
        self.step = (self.step / 2.0).max(MIN_STEP);
    }

    pub fn toggle_report(&mut self) {
        self.report_open = !self.report_open;
    }
}
